//! Color and depth storage for software rendering

use thiserror::Error;
use super::types::Color;

/// Framebuffer allocation failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("framebuffer {width}x{height}x{bytes_per_pixel} has no pixels")]
    EmptyFramebuffer {
        width: usize,
        height: usize,
        bytes_per_pixel: usize,
    },
    #[error("could not allocate {0} bytes for the framebuffer")]
    Allocation(usize),
}

fn allocate<T: Clone>(len: usize, value: T) -> Result<Vec<T>, RenderError> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|_| RenderError::Allocation(len * std::mem::size_of::<T>()))?;
    v.resize(len, value);
    Ok(v)
}

/// Pixel bytes plus a parallel depth plane.
///
/// Depth uses reverse-Z: larger values are nearer, `0.0` is the far plane.
pub struct Framebuffer {
    pixels: Vec<u8>,
    depth: Vec<f32>,
    width: usize,
    height: usize,
    bytes_per_pixel: usize,
    allocations: usize,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize, bytes_per_pixel: usize) -> Result<Self, RenderError> {
        let size = width * height * bytes_per_pixel;
        if size == 0 {
            return Err(RenderError::EmptyFramebuffer { width, height, bytes_per_pixel });
        }
        Ok(Self {
            pixels: allocate(size, 0u8)?,
            depth: allocate(width * height, 0.0f32)?,
            width,
            height,
            bytes_per_pixel,
            allocations: 2,
        })
    }

    /// Change the logical size.
    ///
    /// Pixel memory is replaced only when the byte count changes and depth
    /// memory only when the pixel count changes; otherwise the old contents
    /// stay in place and the caller is expected to clear them.
    pub fn resize(&mut self, width: usize, height: usize, bytes_per_pixel: usize) -> Result<(), RenderError> {
        let size = width * height * bytes_per_pixel;
        if size == 0 {
            return Err(RenderError::EmptyFramebuffer { width, height, bytes_per_pixel });
        }
        let resolution = width * height;
        if size != self.pixels.len() {
            self.pixels = allocate(size, 0u8)?;
            self.allocations += 1;
        }
        if resolution != self.depth.len() {
            self.depth = allocate(resolution, 0.0f32)?;
            self.allocations += 1;
        }
        self.width = width;
        self.height = height;
        self.bytes_per_pixel = bytes_per_pixel;
        Ok(())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.bytes_per_pixel
    }

    /// Number of buffer allocations performed so far
    pub fn allocations(&self) -> usize {
        self.allocations
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn depth(&self) -> &[f32] {
        &self.depth
    }

    /// Flat pixel index, `None` outside the buffer
    pub fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    pub fn depth_at(&self, idx: usize) -> f32 {
        self.depth[idx]
    }

    pub fn set_depth_at(&mut self, idx: usize, z: f32) {
        self.depth[idx] = z;
    }

    pub fn clear_depth(&mut self, value: f32) {
        self.depth.fill(value);
    }

    /// Fill every pixel with one color
    pub fn clear(&mut self, color: Color) {
        let bytes = color.to_bytes();
        let bpp = self.bytes_per_pixel;
        let n = bpp.min(4);
        for px in self.pixels.chunks_exact_mut(bpp) {
            px[..n].copy_from_slice(&bytes[..n]);
        }
    }

    /// Store a color; out-of-range coordinates are ignored.
    ///
    /// Channels are written in RGBA order, as many as fit the pixel size.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(idx) = self.index(x, y) {
            let bpp = self.bytes_per_pixel;
            let n = bpp.min(4);
            let start = idx * bpp;
            self.pixels[start..start + n].copy_from_slice(&color.to_bytes()[..n]);
        }
    }

    pub fn get_pixel(&self, x: i32, y: i32) -> Option<&[u8]> {
        self.index(x, y).map(|idx| {
            let start = idx * self.bytes_per_pixel;
            &self.pixels[start..start + self.bytes_per_pixel]
        })
    }
}
