//! View frustum planes in view space
//!
//! View space is left-handed with +Z forward. Every plane's normal points
//! out of the visible volume, so a positive signed distance means "outside".

use super::math::{Vec3, EPS};

/// Where a point lies relative to a plane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Inside,
    On,
    Outside,
}

/// Half-space boundary `dot(normal, p) + offset = 0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub offset: f32,
}

impl Plane {
    pub fn new(normal: Vec3, offset: f32) -> Self {
        Self { normal, offset }
    }

    /// Signed distance of `p`; positive is outside
    pub fn side(&self, p: Vec3) -> f32 {
        self.normal.dot(p) + self.offset
    }

    /// On-plane wins over a tiny positive distance
    pub fn classify(&self, p: Vec3) -> Side {
        let s = self.side(p);
        if s.abs() <= EPS {
            Side::On
        } else if s > 0.0 {
            Side::Outside
        } else {
            Side::Inside
        }
    }

    /// Parameter `k` where segment `a -> b` crosses the plane
    pub fn intersect(&self, a: Vec3, b: Vec3) -> f32 {
        (-self.normal.dot(a) - self.offset) / self.normal.dot(b - a)
    }
}

/// Index of each plane inside [`Frustum::planes`]
pub const NEAR: usize = 0;
pub const FAR: usize = 1;
pub const TOP: usize = 2;
pub const BOTTOM: usize = 3;
pub const LEFT: usize = 4;
pub const RIGHT: usize = 5;

/// The six clip planes of a pinhole camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    pub planes: [Plane; 6],
}

impl Default for Frustum {
    fn default() -> Self {
        Self::unit_cube()
    }
}

impl Frustum {
    /// The `[-1, 1]^3` box, matching an identity projection
    pub fn unit_cube() -> Self {
        Self {
            planes: [
                Plane::new(Vec3::new(0.0, 0.0, -1.0), -1.0),
                Plane::new(Vec3::new(0.0, 0.0, 1.0), -1.0),
                Plane::new(Vec3::new(0.0, -1.0, 0.0), -1.0),
                Plane::new(Vec3::new(0.0, 1.0, 0.0), -1.0),
                Plane::new(Vec3::new(-1.0, 0.0, 0.0), -1.0),
                Plane::new(Vec3::new(1.0, 0.0, 0.0), -1.0),
            ],
        }
    }

    /// Build the planes for a vertical `fov` (radians)
    pub fn new(fov: f32, aspect: f32, znear: f32, zfar: f32) -> Self {
        let half = 0.5 * fov;
        let (sin_v, cos_v) = half.sin_cos();

        // Points on the near plane where the side planes cross it
        let b = Vec3::new(0.0, znear * half.tan(), znear);
        let r = Vec3::new(znear * half.tan() * aspect, 0.0, znear);
        let t = Vec3::new(0.0, -b.y, znear);
        let l = Vec3::new(-r.x, 0.0, znear);

        let top = Vec3::new(0.0, -cos_v, -sin_v);
        let bottom = Vec3::new(0.0, cos_v, -sin_v);

        let horizontal = (aspect * b.y / znear).atan();
        let (sin_h, cos_h) = horizontal.sin_cos();
        let left = Vec3::new(-cos_h, 0.0, -sin_h);
        let right = Vec3::new(cos_h, 0.0, -sin_h);

        Self {
            planes: [
                Plane::new(Vec3::new(0.0, 0.0, -1.0), znear),
                Plane::new(Vec3::new(0.0, 0.0, 1.0), -zfar),
                Plane::new(top, -top.dot(t)),
                Plane::new(bottom, -bottom.dot(b)),
                Plane::new(left, -left.dot(l)),
                Plane::new(right, -right.dot(r)),
            ],
        }
    }

    /// True when `p` is inside or on every plane
    pub fn contains(&self, p: Vec3) -> bool {
        self.planes.iter().all(|plane| plane.classify(p) != Side::Outside)
    }
}
