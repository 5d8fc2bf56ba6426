//! Vertex formats and packed attribute records
//!
//! A record is a plain byte slice holding one vertex's (or one pixel's)
//! attributes back to back, in the order declared by its [`VertexFormat`].
//! Fields are native-endian and unaligned; all access goes through
//! `bytemuck` so no pointer casts are needed.

use bytemuck::Pod;
use super::math::{Vec2, Vec3, Vec4};

/// Kind of a single attribute slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttribKind {
    F32,
    I32,
    U8,
    Vec2,
    Vec3,
    Vec4,
}

impl AttribKind {
    /// Packed width in bytes
    pub const fn size(self) -> usize {
        match self {
            AttribKind::F32 => 4,
            AttribKind::I32 => 4,
            AttribKind::U8 => 1,
            AttribKind::Vec2 => 8,
            AttribKind::Vec3 => 12,
            AttribKind::Vec4 => 16,
        }
    }
}

/// Ordered attribute layout of a packed record
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VertexFormat {
    kinds: Vec<AttribKind>,
    size: usize,
}

impl VertexFormat {
    pub fn new(kinds: &[AttribKind]) -> Self {
        Self {
            kinds: kinds.to_vec(),
            size: kinds.iter().map(|k| k.size()).sum(),
        }
    }

    /// Total record size in bytes
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn kinds(&self) -> &[AttribKind] {
        &self.kinds
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Record `index` inside a buffer of back-to-back records
    pub fn record<'a>(&self, buffer: &'a [u8], index: usize) -> &'a [u8] {
        &buffer[index * self.size..(index + 1) * self.size]
    }
}

/// A value that can live in an attribute slot
pub trait Attribute: Pod {
    const KIND: AttribKind;

    /// `a + (b - a) * weight` in the slot's own type
    fn lerp(a: Self, b: Self, weight: f32) -> Self;

    fn scaled(self, s: f32) -> Self;
}

impl Attribute for f32 {
    const KIND: AttribKind = AttribKind::F32;

    // the blend form rounds at weight 1, so hand back `b` exactly
    fn lerp(a: Self, b: Self, weight: f32) -> Self {
        if weight == 1.0 {
            return b;
        }
        a + (b - a) * weight
    }

    fn scaled(self, s: f32) -> Self {
        self * s
    }
}

impl Attribute for i32 {
    const KIND: AttribKind = AttribKind::I32;

    // f64 keeps every i32 exact during the blend
    fn lerp(a: Self, b: Self, weight: f32) -> Self {
        let (a, b) = (a as f64, b as f64);
        (a + (b - a) * weight as f64) as i32
    }

    fn scaled(self, s: f32) -> Self {
        (self as f64 * s as f64) as i32
    }
}

impl Attribute for u8 {
    const KIND: AttribKind = AttribKind::U8;

    fn lerp(a: Self, b: Self, weight: f32) -> Self {
        let (a, b) = (a as f32, b as f32);
        (a + (b - a) * weight) as u8
    }

    fn scaled(self, s: f32) -> Self {
        (self as f32 * s) as u8
    }
}

impl Attribute for Vec2 {
    const KIND: AttribKind = AttribKind::Vec2;

    fn lerp(a: Self, b: Self, weight: f32) -> Self {
        Vec2::new(f32::lerp(a.x, b.x, weight), f32::lerp(a.y, b.y, weight))
    }

    fn scaled(self, s: f32) -> Self {
        self.scale(s)
    }
}

impl Attribute for Vec3 {
    const KIND: AttribKind = AttribKind::Vec3;

    fn lerp(a: Self, b: Self, weight: f32) -> Self {
        Vec3::new(
            f32::lerp(a.x, b.x, weight),
            f32::lerp(a.y, b.y, weight),
            f32::lerp(a.z, b.z, weight),
        )
    }

    fn scaled(self, s: f32) -> Self {
        self.scale(s)
    }
}

impl Attribute for Vec4 {
    const KIND: AttribKind = AttribKind::Vec4;

    fn lerp(a: Self, b: Self, weight: f32) -> Self {
        Vec4::new(
            f32::lerp(a.x, b.x, weight),
            f32::lerp(a.y, b.y, weight),
            f32::lerp(a.z, b.z, weight),
            f32::lerp(a.w, b.w, weight),
        )
    }

    fn scaled(self, s: f32) -> Self {
        self.scale(s)
    }
}

fn read_at<T: Pod>(bytes: &[u8], offset: usize) -> T {
    bytemuck::pod_read_unaligned(&bytes[offset..offset + std::mem::size_of::<T>()])
}

fn write_at<T: Pod>(bytes: &mut [u8], offset: usize, value: T) {
    bytes[offset..offset + std::mem::size_of::<T>()].copy_from_slice(bytemuck::bytes_of(&value));
}

fn lerp_field<T: Attribute>(a: &[u8], b: &[u8], out: &mut [u8], offset: usize, weight: f32) {
    let value = T::lerp(read_at(a, offset), read_at(b, offset), weight);
    write_at(out, offset, value);
}

fn scale_field<T: Attribute>(a: &[u8], out: &mut [u8], offset: usize, s: f32) {
    let value = read_at::<T>(a, offset).scaled(s);
    write_at(out, offset, value);
}

/// Blend two records field by field: `out = a + (b - a) * weight`.
///
/// `weight` is expected in `[0, 1]` and is not clamped.
pub fn interpolate_attributes(a: &[u8], b: &[u8], out: &mut [u8], weight: f32, format: &VertexFormat) {
    let mut offset = 0;
    for &kind in format.kinds() {
        match kind {
            AttribKind::F32 => lerp_field::<f32>(a, b, out, offset, weight),
            AttribKind::I32 => lerp_field::<i32>(a, b, out, offset, weight),
            AttribKind::U8 => lerp_field::<u8>(a, b, out, offset, weight),
            AttribKind::Vec2 => lerp_field::<Vec2>(a, b, out, offset, weight),
            AttribKind::Vec3 => lerp_field::<Vec3>(a, b, out, offset, weight),
            AttribKind::Vec4 => lerp_field::<Vec4>(a, b, out, offset, weight),
        }
        offset += kind.size();
    }
}

/// Scale every field of a record by `scalar`
pub fn multiply_attributes(a: &[u8], out: &mut [u8], scalar: f32, format: &VertexFormat) {
    let mut offset = 0;
    for &kind in format.kinds() {
        match kind {
            AttribKind::F32 => scale_field::<f32>(a, out, offset, scalar),
            AttribKind::I32 => scale_field::<i32>(a, out, offset, scalar),
            AttribKind::U8 => scale_field::<u8>(a, out, offset, scalar),
            AttribKind::Vec2 => scale_field::<Vec2>(a, out, offset, scalar),
            AttribKind::Vec3 => scale_field::<Vec3>(a, out, offset, scalar),
            AttribKind::Vec4 => scale_field::<Vec4>(a, out, offset, scalar),
        }
        offset += kind.size();
    }
}

/// Append one attribute value to a growing record buffer
pub fn append_attribute<T: Attribute>(buffer: &mut Vec<u8>, value: T) {
    buffer.extend_from_slice(bytemuck::bytes_of(&value));
}

/// Sequential typed reader over one record
pub struct AttribReader<'a> {
    format: &'a VertexFormat,
    bytes: &'a [u8],
    slot: usize,
    offset: usize,
}

impl<'a> AttribReader<'a> {
    pub fn new(format: &'a VertexFormat, bytes: &'a [u8]) -> Self {
        Self { format, bytes, slot: 0, offset: 0 }
    }

    /// Read the next slot as `T`.
    ///
    /// Panics if the slot's declared kind is not `T::KIND` or the record is
    /// exhausted.
    pub fn read<T: Attribute>(&mut self) -> T {
        let kind = self.format.kinds()[self.slot];
        assert_eq!(kind, T::KIND, "attribute slot {} is {:?}", self.slot, kind);
        let value = read_at(self.bytes, self.offset);
        self.slot += 1;
        self.offset += kind.size();
        value
    }

    /// Skip the next slot whatever its kind
    pub fn skip(&mut self) {
        self.offset += self.format.kinds()[self.slot].size();
        self.slot += 1;
    }

    pub fn remaining(&self) -> usize {
        self.format.len() - self.slot
    }
}

/// Sequential typed writer over one record
pub struct AttribWriter<'a> {
    format: &'a VertexFormat,
    bytes: &'a mut [u8],
    slot: usize,
    offset: usize,
}

impl<'a> AttribWriter<'a> {
    pub fn new(format: &'a VertexFormat, bytes: &'a mut [u8]) -> Self {
        Self { format, bytes, slot: 0, offset: 0 }
    }

    /// Write `value` into the next slot; panics on a kind mismatch
    pub fn write<T: Attribute>(&mut self, value: T) {
        let kind = self.format.kinds()[self.slot];
        assert_eq!(kind, T::KIND, "attribute slot {} is {:?}", self.slot, kind);
        write_at(self.bytes, self.offset, value);
        self.slot += 1;
        self.offset += kind.size();
    }

    pub fn remaining(&self) -> usize {
        self.format.len() - self.slot
    }
}
