//! Scene loading and saving
//!
//! Uses RON (Rusty Object Notation) for human-readable scene files.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rasterizer::{Color, CullingMode, Mat4, Vec3};
use crate::shaders::Light;

/// Error type for scene loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Serialize error: {0}")]
    Serialize(#[from] ron::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov: f32,
    pub znear: f32,
    pub zfar: f32,
    pub position: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: 90.0,
            znear: 0.1,
            zfar: 100.0,
            position: Vec3::ZERO,
        }
    }
}

impl CameraConfig {
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::translation(-self.position)
    }
}

/// A model drawn with the textured Phong shader
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub obj: PathBuf,
    /// Without a texture the model is drawn with vertex colors only
    #[serde(default)]
    pub texture: Option<PathBuf>,
    #[serde(default = "default_translation")]
    pub translation: Vec3,
    #[serde(default = "default_scale")]
    pub scale: f32,
    /// Seconds per full turn around Y and Z, `0` to stand still
    #[serde(default = "default_spin_period")]
    pub spin_period: f32,
}

fn default_translation() -> Vec3 {
    Vec3::new(0.0, 0.0, 0.7)
}

fn default_scale() -> f32 {
    0.5
}

fn default_spin_period() -> f32 {
    5.0
}

impl ModelConfig {
    /// `translation * rotation * scale` after `time` seconds
    pub fn model_matrix(&self, time: f32) -> Mat4 {
        let angle = if self.spin_period > 0.0 {
            std::f32::consts::TAU * (time / self.spin_period).fract()
        } else {
            0.0
        };
        let rotation = Mat4::rotation_y(angle) * Mat4::rotation_z(angle);
        Mat4::translation(self.translation) * rotation * Mat4::scaling(Vec3::splat(self.scale))
    }
}

/// Everything needed to render a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub width: usize,
    pub height: usize,
    pub bytes_per_pixel: usize,
    pub clear_color: Color,
    pub camera: CameraConfig,
    pub depth_test: bool,
    pub depth_write: bool,
    pub culling: CullingMode,
    /// Draw the red/green/blue triangle
    pub demo_triangle: bool,
    /// Also draw triangle edges as lines
    pub wireframe: bool,
    pub model: Option<ModelConfig>,
    pub lights: Vec<Light>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            bytes_per_pixel: 4,
            clear_color: Color::with_alpha(15, 15, 35, 255),
            camera: CameraConfig::default(),
            depth_test: true,
            depth_write: true,
            culling: CullingMode::CounterClockwise,
            demo_triangle: true,
            wireframe: false,
            model: None,
            lights: vec![
                Light::Ambient { intensity: 0.2 },
                Light::Point { intensity: 0.4, position: Vec3::new(-2.0, 0.0, -1.0) },
                Light::Directional { intensity: 0.4, direction: Vec3::new(-1.0, 0.0, 1.0) },
            ],
        }
    }
}

impl SceneConfig {
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

/// Load a scene from a RON file
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<SceneConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    load_scene_from_str(&contents)
}

/// Load a scene from a RON string (for embedded scenes or testing)
pub fn load_scene_from_str(s: &str) -> Result<SceneConfig, ConfigError> {
    Ok(ron::from_str(s)?)
}

/// Save a scene to a RON file
pub fn save_scene<P: AsRef<Path>>(scene: &SceneConfig, path: P) -> Result<(), ConfigError> {
    let config = ron::ser::PrettyConfig::new()
        .depth_limit(4)
        .indentor("  ".to_string());

    let contents = ron::ser::to_string_pretty(scene, config)?;
    fs::write(path, contents)?;
    Ok(())
}
