//! Triangle and line clipping against the view frustum
//!
//! Triangles are clipped plane by plane (Sutherland-Hodgman style). Each
//! plane may split one triangle into two, so the working set is a flat list
//! of triangles that is rebuilt for every plane.

use super::format::{interpolate_attributes, VertexFormat};
use super::frustum::{Frustum, Plane, Side};
use super::math::Vec4;

/// Flat list of triangles with one attribute record per corner
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleList {
    positions: Vec<Vec4>,
    data: Vec<u8>,
    stride: usize,
}

impl TriangleList {
    pub fn new(stride: usize) -> Self {
        Self {
            positions: Vec::new(),
            data: Vec::new(),
            stride,
        }
    }

    /// Number of triangles
    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn clear(&mut self) {
        self.positions.clear();
        self.data.clear();
    }

    pub fn push(&mut self, positions: [Vec4; 3], data: [&[u8]; 3]) {
        for (p, d) in positions.into_iter().zip(data) {
            debug_assert_eq!(d.len(), self.stride);
            self.positions.push(p);
            self.data.extend_from_slice(d);
        }
    }

    /// Corners and records of triangle `i`
    pub fn triangle(&self, i: usize) -> ([Vec4; 3], [&[u8]; 3]) {
        let base = i * 3;
        let rec = |k: usize| &self.data[(base + k) * self.stride..(base + k + 1) * self.stride];
        (
            [self.positions[base], self.positions[base + 1], self.positions[base + 2]],
            [rec(0), rec(1), rec(2)],
        )
    }
}

/// A line segment that survived clipping
#[derive(Debug, Clone, PartialEq)]
pub struct ClippedLine {
    pub a: Vec4,
    pub b: Vec4,
    pub data_a: Vec<u8>,
    pub data_b: Vec<u8>,
}

/// Crossing point of the edge `inside -> outside`.
///
/// `w` is copied from the inside endpoint instead of being interpolated.
fn edge_crossing(
    plane: &Plane,
    inside: Vec4,
    outside: Vec4,
    inside_data: &[u8],
    outside_data: &[u8],
    format: &VertexFormat,
) -> (Vec4, Vec<u8>) {
    let k = plane.intersect(inside.xyz(), outside.xyz());
    let mut p = (outside - inside) * k + inside;
    p.w = inside.w;
    let mut data = vec![0u8; format.size()];
    interpolate_attributes(inside_data, outside_data, &mut data, k, format);
    (p, data)
}

/// Clip one triangle whose corner `o` is outside the plane.
///
/// `(p, q)` are the other two corners in their input cyclic order.
fn clip_one_outside(
    plane: &Plane,
    o: (Vec4, &[u8], Side),
    p: (Vec4, &[u8], Side),
    q: (Vec4, &[u8], Side),
    format: &VertexFormat,
    out: &mut TriangleList,
) {
    match (p.2, q.2) {
        (Side::Outside, Side::Outside) => {}
        (Side::Outside, _) => clip_two_outside(plane, q, format, out, [o, p]),
        (_, Side::Outside) => clip_two_outside(plane, p, format, out, [o, q]),
        (Side::On, Side::On) => {
            // only an edge touches the plane
        }
        (Side::On, Side::Inside) => {
            let (k, kd) = edge_crossing(plane, q.0, o.0, q.1, o.1, format);
            out.push([p.0, q.0, k], [p.1, q.1, &kd]);
        }
        (Side::Inside, Side::On) => {
            let (k, kd) = edge_crossing(plane, p.0, o.0, p.1, o.1, format);
            out.push([q.0, p.0, k], [q.1, p.1, &kd]);
        }
        (Side::Inside, Side::Inside) => {
            let (pk, pkd) = edge_crossing(plane, p.0, o.0, p.1, o.1, format);
            let (qk, qkd) = edge_crossing(plane, q.0, o.0, q.1, o.1, format);
            out.push([p.0, q.0, pk], [p.1, q.1, &pkd]);
            out.push([q.0, qk, pk], [q.1, &qkd, &pkd]);
        }
    }
}

fn clip_two_outside(
    plane: &Plane,
    inside: (Vec4, &[u8], Side),
    format: &VertexFormat,
    out: &mut TriangleList,
    outside: [(Vec4, &[u8], Side); 2],
) {
    if inside.2 == Side::On {
        // zero-area remainder
        return;
    }
    let (ak, akd) = edge_crossing(plane, inside.0, outside[0].0, inside.1, outside[0].1, format);
    let (bk, bkd) = edge_crossing(plane, inside.0, outside[1].0, inside.1, outside[1].1, format);
    out.push([inside.0, ak, bk], [inside.1, &akd, &bkd]);
}

fn clip_triangle_by_plane(
    plane: &Plane,
    positions: [Vec4; 3],
    data: [&[u8]; 3],
    format: &VertexFormat,
    out: &mut TriangleList,
) {
    let sides = positions.map(|p| plane.classify(p.xyz()));
    let outside = sides.iter().filter(|s| **s == Side::Outside).count();
    if outside == 0 {
        out.push(positions, data);
        return;
    }
    if outside == 3 {
        return;
    }
    let corner = |i: usize| (positions[i], data[i], sides[i]);
    // rotate so the first outside corner leads, keeping the cyclic order
    let first = sides.iter().position(|s| *s == Side::Outside).unwrap_or(0);
    let (o, p, q) = (corner(first), corner((first + 1) % 3), corner((first + 2) % 3));
    clip_one_outside(plane, o, p, q, format, out);
}

impl Frustum {
    /// Clip a view-space triangle against all six planes.
    ///
    /// Returns zero or more triangles. A triangle that is fully inside comes
    /// back unchanged, positions and record bytes alike.
    pub fn clip_triangle(&self, positions: [Vec4; 3], data: [&[u8]; 3], format: &VertexFormat) -> TriangleList {
        let mut front = TriangleList::new(format.size());
        let mut back = TriangleList::new(format.size());
        front.push(positions, data);

        for plane in &self.planes {
            back.clear();
            for i in 0..front.len() {
                let (p, d) = front.triangle(i);
                clip_triangle_by_plane(plane, p, d, format, &mut back);
            }
            std::mem::swap(&mut front, &mut back);
            if front.is_empty() {
                break;
            }
        }
        front
    }

    /// Clip a view-space segment; `None` when nothing of it is visible
    pub fn clip_line(&self, a: Vec4, b: Vec4, data_a: &[u8], data_b: &[u8], format: &VertexFormat) -> Option<ClippedLine> {
        let mut line = ClippedLine {
            a,
            b,
            data_a: data_a.to_vec(),
            data_b: data_b.to_vec(),
        };
        for plane in &self.planes {
            let side_a = plane.classify(line.a.xyz());
            let side_b = plane.classify(line.b.xyz());
            match (side_a, side_b) {
                // touching a plane from outside leaves nothing visible
                (Side::Outside, Side::Outside | Side::On) | (Side::On, Side::Outside) => return None,
                (Side::Outside, Side::Inside) => {
                    let (p, d) = edge_crossing(plane, line.b, line.a, &line.data_b, &line.data_a, format);
                    line.a = p;
                    line.data_a = d;
                }
                (Side::Inside, Side::Outside) => {
                    let (p, d) = edge_crossing(plane, line.a, line.b, &line.data_a, &line.data_b, format);
                    line.b = p;
                    line.data_b = d;
                }
                _ => {}
            }
        }
        Some(line)
    }
}
