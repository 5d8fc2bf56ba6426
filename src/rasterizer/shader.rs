//! Shader contract
//!
//! Shaders are plain closures. Per-vertex and per-pixel data travel as packed
//! records read through [`AttribReader`]; camera matrices arrive as the typed
//! [`Builtins`] block and anything else the shader needs comes through the
//! opaque [`DescriptorSet`] or is captured by the closure itself.

use bytemuck::{Pod, Zeroable};
use super::format::{AttribReader, AttribWriter, VertexFormat};
use super::math::{Mat4, Vec4};

/// Matrices every shader can see, in this exact byte order
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Builtins {
    pub model: Mat4,
    pub view: Mat4,
    pub perspective: Mat4,
    /// `view * model`
    pub model_view: Mat4,
    /// `perspective * view * model`
    pub transform: Mat4,
}

impl Default for Builtins {
    fn default() -> Self {
        Self {
            model: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            perspective: Mat4::IDENTITY,
            model_view: Mat4::IDENTITY,
            transform: Mat4::IDENTITY,
        }
    }
}

impl Builtins {
    /// Raw view of the whole block
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

/// Opaque shader-defined uniform data.
///
/// Stored in 4-byte words so any `Pod` value with alignment up to 4 can be
/// viewed in place without copying.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DescriptorSet {
    words: Vec<u32>,
    len: usize,
}

impl DescriptorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut words = vec![0u32; bytes.len().div_ceil(4)];
        bytemuck::cast_slice_mut::<u32, u8>(&mut words)[..bytes.len()].copy_from_slice(bytes);
        Self { words, len: bytes.len() }
    }

    pub fn from_value<T: Pod>(value: &T) -> Self {
        Self::from_bytes(bytemuck::bytes_of(value))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &bytemuck::cast_slice(&self.words)[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Typed view of the leading `size_of::<T>()` bytes
    pub fn get<T: Pod>(&self) -> Option<&T> {
        let size = std::mem::size_of::<T>();
        if size > self.len {
            return None;
        }
        bytemuck::try_from_bytes(&self.as_bytes()[..size]).ok()
    }
}

/// Everything a shader invocation receives
pub struct ShaderInput<'a> {
    /// Vertex stage: model-space input position.
    /// Pixel stage: `(x, y, depth, 1/w)` in viewport space.
    pub position: Vec4,
    pub builtins: &'a Builtins,
    pub descriptors: &'a DescriptorSet,
    format: &'a VertexFormat,
    record: &'a [u8],
}

impl<'a> ShaderInput<'a> {
    pub fn new(
        position: Vec4,
        builtins: &'a Builtins,
        descriptors: &'a DescriptorSet,
        format: &'a VertexFormat,
        record: &'a [u8],
    ) -> Self {
        Self {
            position,
            builtins,
            descriptors,
            format,
            record,
        }
    }

    /// Typed cursor over the input record
    pub fn attributes(&self) -> AttribReader<'a> {
        AttribReader::new(self.format, self.record)
    }

    pub fn raw(&self) -> &'a [u8] {
        self.record
    }

    pub fn format(&self) -> &'a VertexFormat {
        self.format
    }
}

/// Vertex stage: returns the view-space position and fills the output record
pub type VertexShader = Box<dyn Fn(&ShaderInput<'_>, &mut AttribWriter<'_>) -> Vec4>;

/// Pixel stage: returns RGBA, expected in `[0, 1]`
pub type PixelShader = Box<dyn Fn(&ShaderInput<'_>) -> Vec4>;
