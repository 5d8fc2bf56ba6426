//! Software 3D pipeline
//!
//! Features:
//! - Packed per-vertex attribute records described by a [`VertexFormat`]
//! - View-space frustum clipping with attribute interpolation
//! - Perspective-correct scanline triangles and major-axis lines
//! - Reverse-Z depth buffer (1 = near, 0 = far)

mod clip;
mod format;
mod framebuffer;
mod frustum;
mod math;
mod render;
mod shader;
mod types;

pub use clip::*;
pub use format::*;
pub use framebuffer::*;
pub use frustum::*;
pub use math::*;
pub use render::*;
pub use shader::*;
pub use types::*;
