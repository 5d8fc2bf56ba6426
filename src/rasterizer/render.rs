//! Render context: vertex processing, culling, clipping and rasterization
//!
//! Pipeline per primitive:
//! 1. vertex shader → view-space position + output record
//! 2. backface test (triangles only)
//! 3. frustum clipping in view space
//! 4. perspective divide + viewport mapping, records divided by w
//! 5. scanline (triangles) or major-axis (lines) traversal
//! 6. depth-tested pixel shading

use tracing::{trace, warn};

use super::clip::TriangleList;
use super::format::{interpolate_attributes, multiply_attributes, AttribWriter, VertexFormat};
use super::framebuffer::{Framebuffer, RenderError};
use super::frustum::Frustum;
use super::math::{Mat4, Vec3, Vec4, EPS};
use super::shader::{Builtins, DescriptorSet, PixelShader, ShaderInput, VertexShader};
use super::types::{Color, CullingMode, PrimitiveType};

/// Receives one diagnostic line per `draw_triangles` call
pub type LogSink = Box<dyn Fn(&str)>;

/// Segments shorter than this on both axes are drawn as a point
const POINT_EPS: f32 = 0.001;

/// A processed corner: viewport position with `1/w` in `w`, plus its
/// record already divided by `w`
struct Corner {
    p: Vec4,
    data: Vec<u8>,
}

/// Values sampled on an edge at one scanline
#[derive(Clone, Copy)]
struct EdgeSample {
    x: f32,
    z: f32,
    inv_w: f32,
}

struct Edge<'a> {
    from: &'a Corner,
    to: &'a Corner,
}

impl<'a> Edge<'a> {
    fn new(from: &'a Corner, to: &'a Corner) -> Self {
        Self { from, to }
    }

    fn weight(&self, y: f32) -> f32 {
        let dy = self.to.p.y - self.from.p.y;
        if dy.abs() < EPS {
            0.0
        } else {
            (y - self.from.p.y) / dy
        }
    }

    fn x_at(&self, y: f32) -> f32 {
        self.from.p.x + (self.to.p.x - self.from.p.x) * self.weight(y)
    }

    /// Interpolate position terms and the record at row `y`
    fn sample(&self, y: f32, format: &VertexFormat, out: &mut [u8]) -> EdgeSample {
        let t = self.weight(y);
        interpolate_attributes(&self.from.data, &self.to.data, out, t, format);
        EdgeSample {
            x: self.from.p.x + (self.to.p.x - self.from.p.x) * t,
            z: self.from.p.z + (self.to.p.z - self.from.p.z) * t,
            inv_w: self.from.p.w + (self.to.p.w - self.from.p.w) * t,
        }
    }
}

/// Owns the framebuffer and all pipeline state
pub struct RenderContext {
    framebuffer: Framebuffer,
    viewport_min: Vec3,
    viewport_max: Vec3,
    builtins: Builtins,
    descriptors: DescriptorSet,
    vertex_shader: Option<VertexShader>,
    pixel_shader: Option<PixelShader>,
    depth_test: bool,
    depth_write: bool,
    culling: CullingMode,
    frustum: Frustum,
    log_sink: Option<LogSink>,
}

impl RenderContext {
    /// Create a context with a `width x height` framebuffer.
    ///
    /// The viewport covers the whole buffer with depth in `[0, 1]`.
    pub fn new(width: usize, height: usize, bytes_per_pixel: usize) -> Result<Self, RenderError> {
        let framebuffer = Framebuffer::new(width, height, bytes_per_pixel)?;
        Ok(Self {
            framebuffer,
            viewport_min: Vec3::ZERO,
            viewport_max: Vec3::new(width as f32, height as f32, 1.0),
            builtins: Builtins::default(),
            descriptors: DescriptorSet::new(),
            vertex_shader: None,
            pixel_shader: None,
            depth_test: true,
            depth_write: true,
            culling: CullingMode::None,
            frustum: Frustum::default(),
            log_sink: None,
        })
    }

    /// Resize the framebuffer; the viewport is left to the caller
    pub fn resize(&mut self, width: usize, height: usize, bytes_per_pixel: usize) -> Result<(), RenderError> {
        self.framebuffer.resize(width, height, bytes_per_pixel)
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Raw color bytes for blitting
    pub fn frame(&self) -> &[u8] {
        self.framebuffer.pixels()
    }

    /// Size of [`RenderContext::frame`] in bytes
    pub fn frame_size(&self) -> usize {
        self.framebuffer.width() * self.framebuffer.height() * self.framebuffer.bytes_per_pixel()
    }

    pub fn width(&self) -> usize {
        self.framebuffer.width()
    }

    pub fn height(&self) -> usize {
        self.framebuffer.height()
    }

    pub fn set_viewport(&mut self, min: Vec3, max: Vec3) {
        self.viewport_min = min;
        self.viewport_max = max;
    }

    pub fn set_descriptor_set(&mut self, descriptors: DescriptorSet) {
        self.descriptors = descriptors;
    }

    pub fn set_vertex_shader<F>(&mut self, shader: F)
    where
        F: Fn(&ShaderInput<'_>, &mut AttribWriter<'_>) -> Vec4 + 'static,
    {
        self.vertex_shader = Some(Box::new(shader));
    }

    pub fn set_pixel_shader<F>(&mut self, shader: F)
    where
        F: Fn(&ShaderInput<'_>) -> Vec4 + 'static,
    {
        self.pixel_shader = Some(Box::new(shader));
    }

    pub fn set_log_sink<F>(&mut self, sink: F)
    where
        F: Fn(&str) + 'static,
    {
        self.log_sink = Some(Box::new(sink));
    }

    pub fn set_depth_test(&mut self, enabled: bool) {
        self.depth_test = enabled;
    }

    pub fn set_depth_write(&mut self, enabled: bool) {
        self.depth_write = enabled;
    }

    pub fn set_backface_culling(&mut self, mode: CullingMode) {
        self.culling = mode;
    }

    pub fn builtins(&self) -> &Builtins {
        &self.builtins
    }

    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    pub fn set_model_matrix(&mut self, m: Mat4) {
        self.builtins.model = m;
        self.update_composites();
    }

    pub fn set_view_matrix(&mut self, m: Mat4) {
        self.builtins.view = m;
        self.update_composites();
    }

    pub fn set_perspective_matrix(&mut self, m: Mat4) {
        self.builtins.perspective = m;
        self.update_composites();
    }

    fn update_composites(&mut self) {
        let b = &mut self.builtins;
        b.model_view = b.view * b.model;
        b.transform = b.perspective * b.model_view;
    }

    /// Projection and clip planes from one set of camera parameters
    pub fn set_perspective(&mut self, fov_degrees: f32, aspect: f32, znear: f32, zfar: f32) {
        let fov = fov_degrees.to_radians();
        self.set_frustum(fov, aspect, znear, zfar);
        self.set_perspective_matrix(Mat4::projection(fov, aspect, znear, zfar));
    }

    /// Rebuild the clip planes; `fov` in radians
    pub fn set_frustum(&mut self, fov: f32, aspect: f32, znear: f32, zfar: f32) {
        self.frustum = Frustum::new(fov, aspect, znear, zfar);
    }

    pub fn fill(&mut self, color: Color) {
        self.framebuffer.clear(color);
    }

    pub fn clear_depth(&mut self, value: f32) {
        self.framebuffer.clear_depth(value);
    }

    /// Write a `[0, 1]` color; out-of-range coordinates are dropped
    pub fn put_pixel(&mut self, x: i32, y: i32, color: Vec4) {
        self.framebuffer.set_pixel(x, y, Color::from_vec4(color));
    }

    /// Perspective divide and viewport mapping.
    ///
    /// Returns `(x, y, depth, 1/w)`; `1/w` is what later makes screen-space
    /// interpolation perspective-correct.
    pub fn process_vertex(&self, v: Vec4) -> Vec4 {
        let c = self.builtins.perspective * v;
        let inv_w = 1.0 / c.w;
        let ndc = Vec3::new(c.x * inv_w, -(c.y * inv_w), c.z * inv_w);
        let span = self.viewport_max - self.viewport_min;
        let s = (ndc + Vec3::splat(1.0)).scale(0.5).mul_elem(span) + self.viewport_min;
        Vec4::new(s.x, s.y, s.z, inv_w)
    }

    /// Clip a view-space triangle against the current frustum
    pub fn cull_triangle_by_frustum(
        &self,
        positions: [Vec4; 3],
        data: [&[u8]; 3],
        format: &VertexFormat,
    ) -> TriangleList {
        self.frustum.clip_triangle(positions, data, format)
    }

    fn shaders_ready(&self) -> bool {
        if self.vertex_shader.is_none() || self.pixel_shader.is_none() {
            warn!("draw call skipped: vertex and pixel shaders must both be set");
            return false;
        }
        true
    }

    fn valid_indices(indices: &[u32], primitive: PrimitiveType) -> bool {
        !indices.is_empty() && indices.len() % primitive.arity() == 0
    }

    /// Run the vertex shader on vertex `index`
    fn shade_vertex(
        &self,
        positions: &[Vec4],
        index: u32,
        vertex_data: &[u8],
        in_format: &VertexFormat,
        out_format: &VertexFormat,
    ) -> (Vec4, Vec<u8>) {
        let index = index as usize;
        let mut out = vec![0u8; out_format.size()];
        let position = match &self.vertex_shader {
            Some(shader) => {
                let input = ShaderInput::new(
                    positions[index],
                    &self.builtins,
                    &self.descriptors,
                    in_format,
                    in_format.record(vertex_data, index),
                );
                let mut writer = AttribWriter::new(out_format, &mut out);
                shader(&input, &mut writer)
            }
            None => positions[index],
        };
        (position, out)
    }

    /// True when the triangle should not be drawn under the culling mode
    fn is_culled(&self, a: Vec4, b: Vec4, c: Vec4) -> bool {
        let (side0, side1) = match self.culling {
            CullingMode::None => return false,
            CullingMode::Clockwise => (c - a, b - c),
            CullingMode::CounterClockwise => (b - a, c - b),
        };
        let normal = side0.xyz().cross(side1.xyz()).normalize();
        let centroid = (a + b + c).xyz();
        let len = centroid.len();
        if len < EPS {
            return true;
        }
        centroid.scale(1.0 / len).dot(normal) > 0.0
    }

    /// Draw an indexed triangle list. Returns the number of (clipped)
    /// triangles that reached the rasterizer.
    ///
    /// An index count that is zero or not a multiple of three draws nothing.
    pub fn draw_triangles(
        &mut self,
        positions: &[Vec4],
        indices: &[u32],
        vertex_data: &[u8],
        in_format: &VertexFormat,
        out_format: &VertexFormat,
    ) -> usize {
        if !Self::valid_indices(indices, PrimitiveType::Triangle) || !self.shaders_ready() {
            return 0;
        }
        let mut drawn = 0;
        for tri in indices.chunks_exact(3) {
            let (a, da) = self.shade_vertex(positions, tri[0], vertex_data, in_format, out_format);
            let (b, db) = self.shade_vertex(positions, tri[1], vertex_data, in_format, out_format);
            let (c, dc) = self.shade_vertex(positions, tri[2], vertex_data, in_format, out_format);

            if self.is_culled(a, b, c) {
                continue;
            }

            let visible = self.cull_triangle_by_frustum([a, b, c], [&da, &db, &dc], out_format);
            for i in 0..visible.len() {
                let (p, d) = visible.triangle(i);
                self.rasterize_triangle(p, d, out_format);
                drawn += 1;
            }
        }

        trace!(triangles = drawn, "draw_triangles");
        if let Some(sink) = &self.log_sink {
            sink(&format!("triangles drawn: {}", drawn));
        }
        drawn
    }

    /// Draw an indexed line list. Returns the number of visible segments.
    pub fn draw_lines(
        &mut self,
        positions: &[Vec4],
        indices: &[u32],
        vertex_data: &[u8],
        in_format: &VertexFormat,
        out_format: &VertexFormat,
    ) -> usize {
        if !Self::valid_indices(indices, PrimitiveType::Line) || !self.shaders_ready() {
            return 0;
        }
        let mut drawn = 0;
        for seg in indices.chunks_exact(2) {
            let (a, da) = self.shade_vertex(positions, seg[0], vertex_data, in_format, out_format);
            let (b, db) = self.shade_vertex(positions, seg[1], vertex_data, in_format, out_format);
            let Some(line) = self.frustum.clip_line(a, b, &da, &db, out_format) else {
                continue;
            };
            self.rasterize_line(line.a, line.b, &line.data_a, &line.data_b, out_format);
            drawn += 1;
        }
        trace!(lines = drawn, "draw_lines");
        drawn
    }

    /// Viewport-map a view-space corner and divide its record by `w`
    fn make_corner(&self, v: Vec4, data: &[u8], format: &VertexFormat) -> Corner {
        let p = self.process_vertex(v);
        let mut divided = vec![0u8; format.size()];
        multiply_attributes(data, &mut divided, p.w, format);
        Corner { p, data: divided }
    }

    fn rasterize_triangle(&mut self, corners: [Vec4; 3], data: [&[u8]; 3], format: &VertexFormat) {
        let mut sorted = [
            self.make_corner(corners[0], data[0], format),
            self.make_corner(corners[1], data[1], format),
            self.make_corner(corners[2], data[2], format),
        ];
        sorted.sort_by(|l, r| l.p.y.total_cmp(&r.p.y));
        let [a, b, c] = &sorted;

        let y_start = a.p.y.ceil() as i32;
        let y_end = c.p.y.ceil() as i32;
        if y_start >= y_end {
            return;
        }

        let ab = Edge::new(a, b);
        let bc = Edge::new(b, c);
        let ac = Edge::new(a, c);
        let short_edge = |y: f32| if y < b.p.y { &ab } else { &bc };

        // which side the a-b-c chain lies on, decided once at the middle row
        let middle = (y_start + (y_end - y_start) / 2) as f32;
        let short_on_left = short_edge(middle).x_at(middle) < ac.x_at(middle);

        let size = format.size();
        let mut long_data = vec![0u8; size];
        let mut short_data = vec![0u8; size];
        let mut span_data = vec![0u8; size];
        let mut pixel_data = vec![0u8; size];

        for row in y_start..y_end {
            let y = row as f32;
            let long = ac.sample(y, format, &mut long_data);
            let short = short_edge(y).sample(y, format, &mut short_data);
            let (left, right, left_data, right_data) = if short_on_left {
                (short, long, &short_data, &long_data)
            } else {
                (long, short, &long_data, &short_data)
            };

            let width = right.x - left.x;
            for col in left.x.ceil() as i32..right.x.ceil() as i32 {
                let x = col as f32;
                let h = if width.abs() < EPS { 0.0 } else { (x - left.x) / width };
                interpolate_attributes(left_data, right_data, &mut span_data, h, format);
                let z = left.z + (right.z - left.z) * h;
                let inv_w = left.inv_w + (right.inv_w - left.inv_w) * h;
                multiply_attributes(&span_data, &mut pixel_data, 1.0 / inv_w, format);
                self.render_pixel_depth_wise(Vec4::new(x, y, z, inv_w), &pixel_data, format);
            }
        }
    }

    fn rasterize_line(&mut self, a: Vec4, b: Vec4, data_a: &[u8], data_b: &[u8], format: &VertexFormat) {
        let mut from = self.make_corner(a, data_a, format);
        let mut to = self.make_corner(b, data_b, format);

        let dx = to.p.x - from.p.x;
        let dy = to.p.y - from.p.y;
        if dx.abs() < POINT_EPS && dy.abs() < POINT_EPS {
            self.render_pixel_depth_wise(from.p, data_a, format);
            return;
        }

        let y_major = dy.abs() > dx.abs();
        let major = |p: Vec4| if y_major { p.y } else { p.x };
        if major(from.p) > major(to.p) {
            std::mem::swap(&mut from, &mut to);
        }
        let start = major(from.p);
        let length = major(to.p) - start;

        let size = format.size();
        let mut lerp_data = vec![0u8; size];
        let mut pixel_data = vec![0u8; size];
        for step in start.ceil() as i32..major(to.p).ceil() as i32 {
            let m = step as f32;
            let t = (m - start) / length;
            let minor = if y_major {
                from.p.x + (to.p.x - from.p.x) * t
            } else {
                from.p.y + (to.p.y - from.p.y) * t
            };
            let z = from.p.z + (to.p.z - from.p.z) * t;
            let inv_w = from.p.w + (to.p.w - from.p.w) * t;
            interpolate_attributes(&from.data, &to.data, &mut lerp_data, t, format);
            multiply_attributes(&lerp_data, &mut pixel_data, 1.0 / inv_w, format);
            let (x, y) = if y_major { (minor, m) } else { (m, minor) };
            self.render_pixel_depth_wise(Vec4::new(x, y, z, inv_w), &pixel_data, format);
        }
    }

    /// Depth-tested shading of one pixel.
    ///
    /// With the test off every pixel is shaded. The depth write compares
    /// against the stored depth on its own, whatever the test decided.
    fn render_pixel_depth_wise(&mut self, p: Vec4, data: &[u8], format: &VertexFormat) {
        let (x, y) = (p.x.floor() as i32, p.y.floor() as i32);
        let Some(idx) = self.framebuffer.index(x, y) else {
            return;
        };
        let nearer = p.z > self.framebuffer.depth_at(idx);

        if !self.depth_test || nearer {
            if let Some(shader) = &self.pixel_shader {
                let input = ShaderInput::new(p, &self.builtins, &self.descriptors, format, data);
                let color = shader(&input);
                self.framebuffer.set_pixel(x, y, Color::from_vec4(color));
            }
        }
        if self.depth_write && nearer {
            self.framebuffer.set_depth_at(idx, p.z);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::format::{append_attribute, AttribKind};
    use std::cell::Cell;
    use std::rc::Rc;

    fn color_format() -> VertexFormat {
        VertexFormat::new(&[AttribKind::Vec4])
    }

    /// Pass-through position, copies the color record
    fn passthrough(ctx: &mut RenderContext) {
        ctx.set_vertex_shader(|input, out| {
            out.write(input.attributes().read::<Vec4>());
            input.builtins.model_view * input.position
        });
        ctx.set_pixel_shader(|input| input.attributes().read::<Vec4>());
    }

    fn colors(c: Vec4, n: usize) -> Vec<u8> {
        let mut buf = Vec::new();
        for _ in 0..n {
            append_attribute(&mut buf, c);
        }
        buf
    }

    fn lit_pixels(ctx: &RenderContext) -> usize {
        ctx.frame().chunks_exact(4).filter(|p| p[3] != 0).count()
    }

    #[test]
    fn test_composite_matrices() {
        let mut ctx = RenderContext::new(4, 4, 4).unwrap();
        let model = Mat4::translation(Vec3::new(1.0, 0.0, 0.0));
        let view = Mat4::rotation_y(0.5);
        let proj = Mat4::projection(1.2, 1.0, 0.1, 10.0);
        ctx.set_model_matrix(model);
        ctx.set_view_matrix(view);
        ctx.set_perspective_matrix(proj);
        let b = ctx.builtins();
        assert_eq!(b.model_view, view * model);
        assert_eq!(b.transform, proj * (view * model));
    }

    #[test]
    fn test_process_vertex_identity() {
        let ctx = RenderContext::new(64, 32, 4).unwrap();
        let p = ctx.process_vertex(Vec4::new(0.0, 0.5, 0.0, 1.0));
        assert!((p.x - 32.0).abs() < 0.0001);
        // +y is up in view space, down in raster space
        assert!((p.y - 8.0).abs() < 0.0001);
        assert!((p.z - 0.5).abs() < 0.0001);
        assert_eq!(p.w, 1.0);
    }

    #[test]
    fn test_process_vertex_keeps_inverse_w() {
        let mut ctx = RenderContext::new(64, 64, 4).unwrap();
        ctx.set_perspective(90.0, 1.0, 0.1, 100.0);
        let p = ctx.process_vertex(Vec4::new(0.0, 0.0, 4.0, 1.0));
        assert!((p.w - 0.25).abs() < 0.0001);
        assert!((p.x - 32.0).abs() < 0.0001);
    }

    #[test]
    fn test_bad_index_count_is_noop() {
        let mut ctx = RenderContext::new(8, 8, 4).unwrap();
        passthrough(&mut ctx);
        let fmt = color_format();
        let pos = [Vec4::new(0.0, 0.0, 0.0, 1.0); 4];
        let data = colors(Vec4::new(1.0, 1.0, 1.0, 1.0), 4);
        assert_eq!(ctx.draw_triangles(&pos, &[0, 1], &data, &fmt, &fmt), 0);
        assert_eq!(ctx.draw_triangles(&pos, &[], &data, &fmt, &fmt), 0);
        assert_eq!(ctx.draw_lines(&pos, &[0, 1, 2], &data, &fmt, &fmt), 0);
        assert_eq!(lit_pixels(&ctx), 0);
    }

    #[test]
    fn test_fullscreen_quad_covers_buffer() {
        let mut ctx = RenderContext::new(16, 16, 4).unwrap();
        passthrough(&mut ctx);
        let fmt = color_format();
        let pos = [
            Vec4::new(-1.0, -1.0, 0.0, 1.0),
            Vec4::new(1.0, -1.0, 0.0, 1.0),
            Vec4::new(1.0, 1.0, 0.0, 1.0),
            Vec4::new(-1.0, 1.0, 0.0, 1.0),
        ];
        let data = colors(Vec4::new(0.0, 1.0, 0.0, 1.0), 4);
        let drawn = ctx.draw_triangles(&pos, &[0, 1, 2, 0, 2, 3], &data, &fmt, &fmt);
        assert_eq!(drawn, 2);
        // shared edges are not drawn twice nor skipped
        assert_eq!(lit_pixels(&ctx), 16 * 16);
        assert_eq!(ctx.framebuffer().get_pixel(5, 9), Some(&[0u8, 255, 0, 255][..]));
    }

    #[test]
    fn test_depth_write_without_test() {
        let mut ctx = RenderContext::new(4, 4, 4).unwrap();
        ctx.set_depth_test(false);
        passthrough(&mut ctx);
        let fmt = color_format();
        let far = [
            Vec4::new(-1.0, -1.0, -0.5, 1.0),
            Vec4::new(1.0, -1.0, -0.5, 1.0),
            Vec4::new(1.0, 1.0, -0.5, 1.0),
        ];
        let near = far.map(|p| Vec4::new(p.x, p.y, 0.5, 1.0));
        let data = colors(Vec4::new(1.0, 0.0, 0.0, 1.0), 3);
        ctx.draw_triangles(&near, &[0, 1, 2], &data, &fmt, &fmt);
        ctx.draw_triangles(&far, &[0, 1, 2], &data, &fmt, &fmt);
        // nearer depth (0.75) survives the farther draw
        let covered = ctx.framebuffer().depth().iter().filter(|d| **d > 0.0).count();
        assert!(covered > 0);
        assert!(ctx
            .framebuffer()
            .depth()
            .iter()
            .filter(|d| **d > 0.0)
            .all(|d| (*d - 0.75).abs() < 0.0001));
    }

    #[test]
    fn test_horizontal_line_pixels() {
        let mut ctx = RenderContext::new(16, 16, 4).unwrap();
        passthrough(&mut ctx);
        let fmt = color_format();
        let pos = [Vec4::new(-0.5, 0.0, 0.0, 1.0), Vec4::new(0.5, 0.0, 0.0, 1.0)];
        let data = colors(Vec4::new(1.0, 1.0, 1.0, 1.0), 2);
        assert_eq!(ctx.draw_lines(&pos, &[0, 1], &data, &fmt, &fmt), 1);
        // x from 4 to 12, half-open
        assert_eq!(lit_pixels(&ctx), 8);
        assert!(ctx.framebuffer().get_pixel(4, 8).is_some_and(|p| p[0] == 255));
    }

    #[test]
    fn test_degenerate_line_is_point() {
        let mut ctx = RenderContext::new(8, 8, 4).unwrap();
        passthrough(&mut ctx);
        let fmt = color_format();
        let pos = [Vec4::new(0.0, 0.0, 0.0, 1.0); 2];
        let data = colors(Vec4::new(1.0, 1.0, 1.0, 1.0), 2);
        ctx.draw_lines(&pos, &[0, 1], &data, &fmt, &fmt);
        assert_eq!(lit_pixels(&ctx), 1);
    }

    #[test]
    fn test_log_sink_called_once_per_draw() {
        let mut ctx = RenderContext::new(8, 8, 4).unwrap();
        passthrough(&mut ctx);
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        ctx.set_log_sink(move |msg| {
            assert!(msg.starts_with("triangles drawn: "));
            seen.set(seen.get() + 1);
        });
        let fmt = color_format();
        let pos = [
            Vec4::new(-1.0, -1.0, 0.0, 1.0),
            Vec4::new(1.0, -1.0, 0.0, 1.0),
            Vec4::new(1.0, 1.0, 0.0, 1.0),
        ];
        let data = colors(Vec4::new(1.0, 1.0, 1.0, 1.0), 3);
        ctx.draw_triangles(&pos, &[0, 1, 2, 2, 1, 0], &data, &fmt, &fmt);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_missing_shaders_draw_nothing() {
        let mut ctx = RenderContext::new(8, 8, 4).unwrap();
        let fmt = color_format();
        let pos = [Vec4::new(0.0, 0.0, 0.0, 1.0); 3];
        let data = colors(Vec4::new(1.0, 1.0, 1.0, 1.0), 3);
        assert_eq!(ctx.draw_triangles(&pos, &[0, 1, 2], &data, &fmt, &fmt), 0);
    }
}
