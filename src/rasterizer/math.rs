//! Vector and matrix math for the pipeline
//!
//! Matrices are row-major and multiply column vectors (`m * v`).

use std::ops::{Add, Mul, Neg, Sub};
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Tolerance used for on-plane and degenerate-geometry checks
pub const EPS: f32 = 1e-5;

/// 2D Vector (for texture coordinates)
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn scale(self, s: f32) -> Vec2 {
        Vec2 { x: self.x * s, y: self.y * s }
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, other: Vec2) -> Vec2 {
        Vec2 { x: self.x + other.x, y: self.y + other.y }
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, other: Vec2) -> Vec2 {
        Vec2 { x: self.x - other.x, y: self.y - other.y }
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, s: f32) -> Vec2 {
        self.scale(s)
    }
}

/// 3D Vector
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };
    pub const UP: Vec3 = Vec3 { x: 0.0, y: 1.0, z: 0.0 };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn splat(v: f32) -> Self {
        Self { x: v, y: v, z: v }
    }

    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn len(self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn normalize(self) -> Vec3 {
        let l = self.len();
        if l == 0.0 {
            return Vec3::ZERO;
        }
        Vec3 {
            x: self.x / l,
            y: self.y / l,
            z: self.z / l,
        }
    }

    pub fn scale(self, s: f32) -> Vec3 {
        Vec3 {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }

    /// Component-wise product
    pub fn mul_elem(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x * other.x,
            y: self.y * other.y,
            z: self.z * other.z,
        }
    }

    pub fn extend(self, w: f32) -> Vec4 {
        Vec4::new(self.x, self.y, self.z, w)
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    fn mul(self, s: f32) -> Vec3 {
        self.scale(s)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    fn neg(self) -> Vec3 {
        self.scale(-1.0)
    }
}

/// 4D Vector (homogeneous positions, RGBA colors)
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub const ZERO: Vec4 = Vec4 { x: 0.0, y: 0.0, z: 0.0, w: 0.0 };

    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub fn xyz(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn dot(self, other: Vec4) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    pub fn scale(self, s: f32) -> Vec4 {
        Vec4 {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
            w: self.w * s,
        }
    }

    /// Component-wise product (color modulation)
    pub fn mul_elem(self, other: Vec4) -> Vec4 {
        Vec4 {
            x: self.x * other.x,
            y: self.y * other.y,
            z: self.z * other.z,
            w: self.w * other.w,
        }
    }

    pub fn clamp(self, min: f32, max: f32) -> Vec4 {
        Vec4 {
            x: self.x.clamp(min, max),
            y: self.y.clamp(min, max),
            z: self.z.clamp(min, max),
            w: self.w.clamp(min, max),
        }
    }
}

impl Add for Vec4 {
    type Output = Vec4;
    fn add(self, other: Vec4) -> Vec4 {
        Vec4 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
            w: self.w + other.w,
        }
    }
}

impl Sub for Vec4 {
    type Output = Vec4;
    fn sub(self, other: Vec4) -> Vec4 {
        Vec4 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
            w: self.w - other.w,
        }
    }
}

impl Mul<f32> for Vec4 {
    type Output = Vec4;
    fn mul(self, s: f32) -> Vec4 {
        self.scale(s)
    }
}

/// 4x4 matrix, stored as four rows
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Mat4 {
    pub rows: [Vec4; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        rows: [
            Vec4 { x: 1.0, y: 0.0, z: 0.0, w: 0.0 },
            Vec4 { x: 0.0, y: 1.0, z: 0.0, w: 0.0 },
            Vec4 { x: 0.0, y: 0.0, z: 1.0, w: 0.0 },
            Vec4 { x: 0.0, y: 0.0, z: 0.0, w: 1.0 },
        ],
    };

    pub fn from_rows(r0: Vec4, r1: Vec4, r2: Vec4, r3: Vec4) -> Self {
        Self { rows: [r0, r1, r2, r3] }
    }

    pub fn column(&self, i: usize) -> Vec4 {
        let pick = |r: &Vec4| match i {
            0 => r.x,
            1 => r.y,
            2 => r.z,
            _ => r.w,
        };
        Vec4::new(
            pick(&self.rows[0]),
            pick(&self.rows[1]),
            pick(&self.rows[2]),
            pick(&self.rows[3]),
        )
    }

    pub fn transpose(&self) -> Mat4 {
        Mat4::from_rows(self.column(0), self.column(1), self.column(2), self.column(3))
    }

    pub fn translation(t: Vec3) -> Mat4 {
        let mut m = Mat4::IDENTITY;
        m.rows[0].w = t.x;
        m.rows[1].w = t.y;
        m.rows[2].w = t.z;
        m
    }

    pub fn scaling(s: Vec3) -> Mat4 {
        let mut m = Mat4::IDENTITY;
        m.rows[0].x = s.x;
        m.rows[1].y = s.y;
        m.rows[2].z = s.z;
        m
    }

    pub fn rotation_x(angle: f32) -> Mat4 {
        let (s, c) = angle.sin_cos();
        let mut m = Mat4::IDENTITY;
        m.rows[1] = Vec4::new(0.0, c, -s, 0.0);
        m.rows[2] = Vec4::new(0.0, s, c, 0.0);
        m
    }

    pub fn rotation_y(angle: f32) -> Mat4 {
        let (s, c) = angle.sin_cos();
        let mut m = Mat4::IDENTITY;
        m.rows[0] = Vec4::new(c, 0.0, s, 0.0);
        m.rows[2] = Vec4::new(-s, 0.0, c, 0.0);
        m
    }

    pub fn rotation_z(angle: f32) -> Mat4 {
        let (s, c) = angle.sin_cos();
        let mut m = Mat4::IDENTITY;
        m.rows[0] = Vec4::new(c, -s, 0.0, 0.0);
        m.rows[1] = Vec4::new(s, c, 0.0, 0.0);
        m
    }

    /// Reverse-Z perspective projection (left-handed, +Z forward).
    ///
    /// `fov` is the vertical field of view in radians. After the divide by
    /// `w` (which receives view-space Z), depth is 1 at `znear` and 0 at `zfar`.
    pub fn projection(fov: f32, aspect: f32, znear: f32, zfar: f32) -> Mat4 {
        let half = fov * 0.5;
        let cot = half.cos() / half.sin();
        let mut m = Mat4::IDENTITY;
        m.rows[1].y = cot;
        m.rows[0].x = cot / aspect;
        m.rows[3].z = 1.0;
        m.rows[3].w = 0.0;
        m.rows[2].z = znear / (znear - zfar);
        m.rows[2].w = (-znear * zfar) / (znear - zfar);
        m
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;
    fn mul(self, v: Vec4) -> Vec4 {
        Vec4 {
            x: self.rows[0].dot(v),
            y: self.rows[1].dot(v),
            z: self.rows[2].dot(v),
            w: self.rows[3].dot(v),
        }
    }
}

impl Mul for Mat4 {
    type Output = Mat4;
    fn mul(self, other: Mat4) -> Mat4 {
        let cols = [other.column(0), other.column(1), other.column(2), other.column(3)];
        let row = |r: Vec4| Vec4::new(r.dot(cols[0]), r.dot(cols[1]), r.dot(cols[2]), r.dot(cols[3]));
        Mat4::from_rows(
            row(self.rows[0]),
            row(self.rows[1]),
            row(self.rows[2]),
            row(self.rows[3]),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_dot() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert!((a.dot(b) - 32.0).abs() < 0.001);
    }

    #[test]
    fn test_vec3_cross() {
        let a = Vec3::new(1.0, 0.0, 0.0);
        let b = Vec3::new(0.0, 1.0, 0.0);
        let c = a.cross(b);
        assert!((c.z - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_mat4_identity_product() {
        let m = Mat4::translation(Vec3::new(1.0, 2.0, 3.0)) * Mat4::rotation_y(0.3);
        assert_eq!(Mat4::IDENTITY * m, m);
        assert_eq!(m * Mat4::IDENTITY, m);
    }

    #[test]
    fn test_translation_moves_point() {
        let p = Mat4::translation(Vec3::new(1.0, -2.0, 0.5)) * Vec4::new(1.0, 1.0, 1.0, 1.0);
        assert_eq!(p, Vec4::new(2.0, -1.0, 1.5, 1.0));
    }

    #[test]
    fn test_projection_reverse_z() {
        let m = Mat4::projection(std::f32::consts::FRAC_PI_2, 1.0, 0.5, 50.0);
        let near = m * Vec4::new(0.0, 0.0, 0.5, 1.0);
        let far = m * Vec4::new(0.0, 0.0, 50.0, 1.0);
        assert!((near.z / near.w - 1.0).abs() < 0.0001);
        assert!((far.z / far.w).abs() < 0.0001);
        assert!((near.w - 0.5).abs() < 0.0001);
    }
}
