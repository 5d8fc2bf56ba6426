//! softpipe: a CPU software 3D pipeline
//!
//! - Programmable vertex and pixel stages as Rust closures
//! - Packed per-vertex attribute records with a runtime [`rasterizer::VertexFormat`]
//! - View-frustum clipping, perspective-correct interpolation, reverse-Z depth
//! - RON scene files, OBJ models and image textures as collaborators

pub mod assets;
pub mod config;
pub mod mesh;
pub mod rasterizer;
pub mod scene;
pub mod shaders;

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
