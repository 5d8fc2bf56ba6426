//! Collaborators of the pipeline: textures and OBJ models
//!
//! Nothing here is used by the rasterizer itself; shaders reach textures by
//! capturing a [`TextureCache`], and meshes are built from [`ObjModel`]s.

mod obj;
mod texture;

pub use obj::*;
pub use texture::*;

use thiserror::Error;

/// Errors from loading or writing asset files
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("unsupported channel count {0}")]
    UnsupportedChannels(usize),
    #[error("no texture with id {0}")]
    UnknownTexture(u32),
}
