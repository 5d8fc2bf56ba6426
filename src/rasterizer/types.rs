//! Core types for the rasterizer

use serde::{Deserialize, Serialize};
use super::math::Vec4;

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const RED: Color = Color { r: 255, g: 0, b: 0, a: 255 };
    pub const GREEN: Color = Color { r: 0, g: 255, b: 0, a: 255 };
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255, a: 255 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Convert a `[0, 1]` float color. Out-of-range values saturate.
    pub fn from_vec4(c: Vec4) -> Self {
        Self {
            r: (c.x * 255.0) as u8,
            g: (c.y * 255.0) as u8,
            b: (c.z * 255.0) as u8,
            a: (c.w * 255.0) as u8,
        }
    }

    pub fn to_vec4(self) -> Vec4 {
        Vec4::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        )
    }

    /// Convert to [u8; 4] for framebuffer
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Which winding faces away from the camera
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CullingMode {
    #[default]
    None,
    /// Clockwise triangles are outside faces
    Clockwise,
    /// Counterclockwise triangles are outside faces
    CounterClockwise,
}

/// Primitive assembled from the index list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    Line,
    Triangle,
}

impl PrimitiveType {
    /// Indices consumed per primitive
    pub fn arity(self) -> usize {
        match self {
            PrimitiveType::Line => 2,
            PrimitiveType::Triangle => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_float_round_trip() {
        let c = Color::with_alpha(255, 0, 255, 0);
        assert_eq!(Color::from_vec4(c.to_vec4()), c);
    }

    #[test]
    fn test_color_saturates() {
        let c = Color::from_vec4(Vec4::new(2.0, -1.0, 0.5, 1.0));
        assert_eq!(c, Color::with_alpha(255, 0, 127, 255));
    }
}
