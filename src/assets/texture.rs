//! Textures and the texture cache

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::AssetError;
use crate::rasterizer::{Color, Framebuffer, Vec4};

/// Handle returned by [`TextureCache::add_texture`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Raw texel bytes, `channels` bytes per texel, rows top to bottom
#[derive(Debug, Clone)]
pub struct Texture {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
    pub data: Vec<u8>,
}

impl Texture {
    /// Copy `width * height * channels` bytes out of `bytes`
    ///
    /// # Panics
    ///
    /// Panics if `bytes` is shorter than `width * height * channels`.
    pub fn new(bytes: &[u8], width: usize, height: usize, channels: usize) -> Self {
        Self {
            width,
            height,
            channels,
            data: bytes[..width * height * channels].to_vec(),
        }
    }

    /// Decode a PNG, JPEG or BMP file, keeping its channel count
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let img = image::open(path.as_ref())?;
        let (width, height) = (img.width() as usize, img.height() as usize);
        let (channels, data) = match img.color().channel_count() {
            1 => (1, img.to_luma8().into_raw()),
            2 => (2, img.to_luma_alpha8().into_raw()),
            3 => (3, img.to_rgb8().into_raw()),
            _ => (4, img.to_rgba8().into_raw()),
        };
        Ok(Self { width, height, channels, data })
    }

    /// Create a checkerboard test texture with `cell`-sized squares
    pub fn checkerboard(width: usize, height: usize, cell: usize, color1: Color, color2: Color) -> Self {
        let cell = cell.max(1);
        let mut data = Vec::with_capacity(width * height * 4);
        for y in 0..height {
            for x in 0..width {
                let checker = ((x / cell) + (y / cell)) % 2 == 0;
                data.extend_from_slice(&if checker { color1 } else { color2 }.to_bytes());
            }
        }
        Self { width, height, channels: 4, data }
    }

    /// Nearest texel at `(u, v)`, `v = 0` at the bottom row.
    ///
    /// Missing channels read as 0, missing alpha as 1. Coordinates outside
    /// `[0, 1)` return opaque black.
    pub fn sample(&self, u: f32, v: f32) -> Vec4 {
        let mut texel = Vec4::new(0.0, 0.0, 0.0, 1.0);
        let iu = (u * self.width as f32) as i64;
        let iv = ((1.0 - v) * self.height as f32) as i64;
        if iu < 0 || iv < 0 || iu as usize >= self.width || iv as usize >= self.height {
            return texel;
        }
        let idx = (iv as usize * self.width + iu as usize) * self.channels;
        let channel = |i: usize| self.data[idx + i] as f32 / 255.0;
        if self.channels >= 4 {
            texel.w = channel(3);
        }
        if self.channels >= 3 {
            texel.z = channel(2);
        }
        if self.channels >= 2 {
            texel.y = channel(1);
        }
        if self.channels >= 1 {
            texel.x = channel(0);
        }
        texel
    }

    /// Write as PNG
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), AssetError> {
        save_bytes_png(path.as_ref(), &self.data, self.width, self.height, self.channels)
    }
}

fn color_type(channels: usize) -> Result<image::ColorType, AssetError> {
    match channels {
        1 => Ok(image::ColorType::L8),
        2 => Ok(image::ColorType::La8),
        3 => Ok(image::ColorType::Rgb8),
        4 => Ok(image::ColorType::Rgba8),
        n => Err(AssetError::UnsupportedChannels(n)),
    }
}

fn save_bytes_png(path: &Path, data: &[u8], width: usize, height: usize, channels: usize) -> Result<(), AssetError> {
    let color = color_type(channels)?;
    image::save_buffer_with_format(
        path,
        data,
        width as u32,
        height as u32,
        color,
        image::ImageFormat::Png,
    )?;
    debug!("wrote {}x{}x{} png to {}", width, height, channels, path.display());
    Ok(())
}

/// Write the color plane of a framebuffer as PNG
pub fn save_frame_png<P: AsRef<Path>>(framebuffer: &Framebuffer, path: P) -> Result<(), AssetError> {
    save_bytes_png(
        path.as_ref(),
        framebuffer.pixels(),
        framebuffer.width(),
        framebuffer.height(),
        framebuffer.bytes_per_pixel(),
    )
}

/// Owns every texture a set of shaders can sample
#[derive(Debug, Default)]
pub struct TextureCache {
    textures: Vec<Texture>,
    by_path: HashMap<PathBuf, TextureId>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Store a copy of raw texel bytes; ids are handed out in order from 0.
    /// Panics on a short slice, like [`Texture::new`].
    pub fn add_texture(&mut self, bytes: &[u8], width: usize, height: usize, channels: usize) -> TextureId {
        self.insert(Texture::new(bytes, width, height, channels))
    }

    pub fn insert(&mut self, texture: Texture) -> TextureId {
        self.textures.push(texture);
        TextureId(self.textures.len() as u32 - 1)
    }

    pub fn get(&self, id: TextureId) -> Option<&Texture> {
        self.textures.get(id.0 as usize)
    }

    /// Load an image file once; later calls with the same path reuse its id
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<TextureId, AssetError> {
        let path = path.as_ref();
        if let Some(id) = self.by_path.get(path) {
            return Ok(*id);
        }
        let texture = Texture::from_file(path)?;
        info!(
            "Loaded texture: {} ({}x{}, {} channels)",
            path.display(),
            texture.width,
            texture.height,
            texture.channels
        );
        let id = self.insert(texture);
        self.by_path.insert(path.to_path_buf(), id);
        Ok(id)
    }

    /// Sample texture `id`; unknown ids give opaque black
    pub fn sample(&self, id: TextureId, u: f32, v: f32) -> Vec4 {
        match self.get(id) {
            Some(texture) => texture.sample(u, v),
            None => Vec4::new(0.0, 0.0, 0.0, 1.0),
        }
    }

    pub fn save_png<P: AsRef<Path>>(&self, id: TextureId, path: P) -> Result<(), AssetError> {
        self.get(id)
            .ok_or(AssetError::UnknownTexture(id.0))?
            .save_png(path)
    }
}
