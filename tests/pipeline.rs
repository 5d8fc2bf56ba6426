//! End-to-end rendering scenarios

use softpipe::rasterizer::{
    append_attribute, AttribKind, CullingMode, Frustum, Plane, RenderContext, Side, Vec2, Vec3,
    Vec4, VertexFormat,
};

const SIZE: usize = 64;

fn demo_positions() -> Vec<Vec4> {
    vec![
        Vec4::new(0.0, 0.0, 0.2, 1.0),
        Vec4::new(-0.7, -0.7, 0.2, 1.0),
        Vec4::new(0.7, -0.7, 0.2, 1.0),
    ]
}

/// 64x64 context, 90 degree camera, flat white, no output attributes
fn flat_context() -> RenderContext {
    let mut ctx = RenderContext::new(SIZE, SIZE, 4).unwrap();
    ctx.set_perspective(90.0, 1.0, 0.1, 100.0);
    ctx.set_vertex_shader(|input, _| input.builtins.model_view * input.position);
    ctx.set_pixel_shader(|_| Vec4::new(1.0, 1.0, 1.0, 1.0));
    ctx
}

fn lit(ctx: &RenderContext) -> Vec<(usize, usize)> {
    ctx.frame()
        .chunks_exact(4)
        .enumerate()
        .filter(|(_, px)| px[3] != 0)
        .map(|(i, _)| (i % SIZE, i / SIZE))
        .collect()
}

#[test]
fn test_triangle_area_matches_projection() {
    let mut ctx = flat_context();
    let empty = VertexFormat::new(&[]);
    let drawn = ctx.draw_triangles(&demo_positions(), &[0, 1, 2], &[], &empty, &empty);
    assert!(drawn > 0);

    // the view cuts the triangle down to apex (32, 32) and base y = 64, x 0..64
    let expected = 0.5 * 64.0 * 32.0;
    let pixels = lit(&ctx);
    let count = pixels.len() as f32;
    assert!(
        (count - expected).abs() <= 64.0,
        "covered {} pixels, expected about {}",
        count,
        expected
    );
    assert!(pixels.iter().all(|&(_, y)| y >= 32));
}

#[test]
fn test_reversed_winding_is_culled() {
    let empty = VertexFormat::new(&[]);

    let mut front = flat_context();
    front.set_backface_culling(CullingMode::CounterClockwise);
    front.draw_triangles(&demo_positions(), &[2, 1, 0], &[], &empty, &empty);
    assert!(!lit(&front).is_empty());

    let mut back = flat_context();
    back.set_backface_culling(CullingMode::CounterClockwise);
    assert_eq!(back.draw_triangles(&demo_positions(), &[0, 1, 2], &[], &empty, &empty), 0);
    assert!(lit(&back).is_empty());
}

fn quad(z: f32, half: f32) -> Vec<Vec4> {
    vec![
        Vec4::new(-half, -half, z, 1.0),
        Vec4::new(half, -half, z, 1.0),
        Vec4::new(half, half, z, 1.0),
        Vec4::new(-half, half, z, 1.0),
    ]
}

fn colored(color: Vec4) -> Vec<u8> {
    let mut data = Vec::new();
    for _ in 0..4 {
        append_attribute(&mut data, color);
    }
    data
}

fn draw_two_quads(near_first: bool) -> Vec<u8> {
    let format = VertexFormat::new(&[AttribKind::Vec4]);
    let mut ctx = RenderContext::new(SIZE, SIZE, 4).unwrap();
    ctx.set_perspective(90.0, 1.0, 0.1, 100.0);
    ctx.clear_depth(0.0);
    ctx.set_vertex_shader(|input, out| {
        out.write(input.attributes().read::<Vec4>());
        input.builtins.model_view * input.position
    });
    ctx.set_pixel_shader(|input| input.attributes().read::<Vec4>());

    let indices = [0, 1, 2, 0, 2, 3];
    // near covers x 16..48, far nearly the whole view
    let near = (quad(2.0, 1.0), colored(Vec4::new(1.0, 0.0, 0.0, 1.0)));
    let far = (quad(4.0, 3.5), colored(Vec4::new(0.0, 0.0, 1.0, 1.0)));
    let order = if near_first { [&near, &far] } else { [&far, &near] };
    for (positions, data) in order {
        ctx.draw_triangles(positions, &indices, data, &format, &format);
    }
    ctx.frame().to_vec()
}

#[test]
fn test_depth_order_independent() {
    let a = draw_two_quads(true);
    let b = draw_two_quads(false);
    assert_eq!(a, b);

    let center = (32 * SIZE + 32) * 4;
    assert_eq!(&a[center..center + 4], &[255, 0, 0, 255]);
    let covered = (32 * SIZE + 20) * 4;
    assert_eq!(&a[covered..covered + 4], &[255, 0, 0, 255]);
    // the far quad only shows around the near one
    let around = (32 * SIZE + 8) * 4;
    assert_eq!(&a[around..around + 4], &[0, 0, 255, 255]);
}

#[test]
fn test_uv_interpolation_is_perspective_correct() {
    // floor-like quad rising from (y = -1, z = 1) to (y = 1, z = 5)
    let positions = vec![
        Vec4::new(-1.0, -1.0, 1.0, 1.0),
        Vec4::new(1.0, -1.0, 1.0, 1.0),
        Vec4::new(1.0, 1.0, 5.0, 1.0),
        Vec4::new(-1.0, 1.0, 5.0, 1.0),
    ];
    let mut data = Vec::new();
    for uv in [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0), Vec2::new(0.0, 1.0)] {
        append_attribute(&mut data, uv);
    }
    let format = VertexFormat::new(&[AttribKind::Vec2]);

    let mut ctx = RenderContext::new(SIZE, SIZE, 4).unwrap();
    ctx.set_perspective(90.0, 1.0, 0.1, 100.0);
    ctx.set_vertex_shader(|input, out| {
        out.write(input.attributes().read::<Vec2>());
        input.builtins.model_view * input.position
    });
    ctx.set_pixel_shader(|input| {
        let uv = input.attributes().read::<Vec2>();
        Vec4::new(uv.x, uv.y, 0.0, 1.0)
    });
    ctx.draw_triangles(&positions, &[0, 1, 2, 0, 2, 3], &data, &format, &format);

    // row 32 is the horizon of the camera: y/z = 0, so y = -1 + 2v and
    // z = 1 + 4v give v = 0.5 at z = 3. Screen-linear interpolation would
    // give 0.83. Column 28 is x/z = -0.125, so x = -0.375 and u = 0.3125.
    let px = ctx.framebuffer().get_pixel(28, 32).unwrap();
    let u = px[0] as f32 / 255.0;
    let v = px[1] as f32 / 255.0;
    assert!((v - 0.5).abs() < 0.02, "v = {}", v);
    assert!((u - 0.3125).abs() < 0.02, "u = {}", u);
}

#[test]
fn test_resize_frame_size_and_allocations() {
    let mut ctx = RenderContext::new(16, 8, 4).unwrap();
    let before = ctx.framebuffer().allocations();
    ctx.resize(8, 16, 4).unwrap();
    assert_eq!(ctx.frame_size(), 8 * 16 * 4);
    assert_eq!(ctx.frame().len(), ctx.frame_size());
    assert_eq!(ctx.framebuffer().allocations(), before);

    ctx.resize(20, 10, 3).unwrap();
    assert_eq!(ctx.frame_size(), 20 * 10 * 3);
    assert!(ctx.framebuffer().allocations() > before);
    assert!(ctx.resize(0, 10, 3).is_err());
    assert_eq!(ctx.frame_size(), 20 * 10 * 3);
}

fn uv_record(u: f32, v: f32) -> Vec<u8> {
    let mut data = Vec::new();
    append_attribute(&mut data, Vec2::new(u, v));
    data
}

#[test]
fn test_clip_inside_keeps_triangle() {
    let frustum = Frustum::new(std::f32::consts::FRAC_PI_2, 1.0, 0.1, 100.0);
    let format = VertexFormat::new(&[AttribKind::Vec2]);
    let p = [
        Vec4::new(0.0, 0.5, 2.0, 1.0),
        Vec4::new(-0.5, -0.5, 2.0, 1.0),
        Vec4::new(0.5, -0.5, 3.0, 1.0),
    ];
    let d = [uv_record(0.0, 0.0), uv_record(1.0, 0.0), uv_record(0.0, 1.0)];
    let list = frustum.clip_triangle(p, [&d[0], &d[1], &d[2]], &format);
    assert_eq!(list.len(), 1);
    let (positions, data) = list.triangle(0);
    assert_eq!(positions, p);
    for i in 0..3 {
        assert_eq!(data[i], &d[i][..]);
    }
}

#[test]
fn test_clip_behind_far_plane_drops_triangle() {
    let frustum = Frustum::new(std::f32::consts::FRAC_PI_2, 1.0, 0.1, 10.0);
    let format = VertexFormat::new(&[AttribKind::Vec2]);
    let p = [
        Vec4::new(0.0, 0.5, 20.0, 1.0),
        Vec4::new(-0.5, -0.5, 20.0, 1.0),
        Vec4::new(0.5, -0.5, 30.0, 1.0),
    ];
    let d = uv_record(0.0, 0.0);
    assert!(frustum.clip_triangle(p, [&d, &d, &d], &format).is_empty());
}

#[test]
fn test_single_plane_cut_keeps_inside_corners() {
    // far plane at z = 10 cuts off one corner
    let frustum = Frustum::new(std::f32::consts::FRAC_PI_2, 1.0, 0.1, 10.0);
    let far: Plane = frustum.planes[1];
    let format = VertexFormat::new(&[AttribKind::Vec2]);
    let p = [
        Vec4::new(0.0, 0.0, 4.0, 1.0),
        Vec4::new(1.0, 0.0, 6.0, 1.0),
        Vec4::new(0.0, 1.0, 14.0, 1.0),
    ];
    let d = [uv_record(0.0, 0.0), uv_record(1.0, 0.0), uv_record(0.0, 1.0)];
    let list = frustum.clip_triangle(p, [&d[0], &d[1], &d[2]], &format);
    assert_eq!(list.len(), 2);

    let mut kept = [false; 2];
    for t in 0..list.len() {
        let (positions, data) = list.triangle(t);
        for (pos, bytes) in positions.iter().zip(data) {
            assert_ne!(far.classify(pos.xyz()), Side::Outside);
            for (k, corner) in p[..2].iter().enumerate() {
                if pos == corner {
                    assert_eq!(bytes, &d[k][..]);
                    kept[k] = true;
                }
            }
        }
    }
    assert_eq!(kept, [true, true]);
}

#[test]
fn test_line_through_near_plane() {
    let format = VertexFormat::new(&[AttribKind::Vec4]);
    let mut ctx = RenderContext::new(SIZE, SIZE, 4).unwrap();
    ctx.set_perspective(90.0, 1.0, 0.5, 100.0);
    ctx.set_vertex_shader(|input, out| {
        out.write(input.attributes().read::<Vec4>());
        input.builtins.model_view * input.position
    });
    ctx.set_pixel_shader(|input| input.attributes().read::<Vec4>());

    // starts behind the camera, ends in view
    let positions = [Vec4::new(0.0, -1.0, -1.0, 1.0), Vec4::new(0.0, -1.0, 3.0, 1.0)];
    let mut data = Vec::new();
    append_attribute(&mut data, Vec4::new(0.0, 1.0, 0.0, 1.0));
    append_attribute(&mut data, Vec4::new(0.0, 1.0, 0.0, 1.0));
    assert_eq!(ctx.draw_lines(&positions, &[0, 1], &data, &format, &format), 1);
    let pixels = lit(&ctx);
    assert!(!pixels.is_empty());
    assert!(pixels.iter().all(|&(x, y)| (31..=32).contains(&x) && y > 32));
}

#[test]
fn test_line_touching_left_plane_draws_nothing() {
    let format = VertexFormat::new(&[AttribKind::Vec4]);
    let mut ctx = RenderContext::new(SIZE, SIZE, 4).unwrap();
    ctx.set_perspective(90.0, 1.0, 0.1, 100.0);
    ctx.set_vertex_shader(|input, out| {
        out.write(input.attributes().read::<Vec4>());
        input.builtins.model_view * input.position
    });
    ctx.set_pixel_shader(|input| input.attributes().read::<Vec4>());

    // left of the view, ending exactly on the left plane
    let positions = [Vec4::new(-3.0, 0.0, 1.0, 1.0), Vec4::new(-1.0, 0.0, 1.0, 1.0)];
    let mut data = Vec::new();
    append_attribute(&mut data, Vec4::new(1.0, 1.0, 1.0, 1.0));
    append_attribute(&mut data, Vec4::new(1.0, 1.0, 1.0, 1.0));
    assert_eq!(ctx.draw_lines(&positions, &[0, 1], &data, &format, &format), 0);
    assert!(lit(&ctx).is_empty());
}

#[test]
fn test_frustum_matches_projection_edges() {
    // a point on the right frustum plane lands on the right viewport edge
    let mut ctx = RenderContext::new(SIZE, SIZE, 4).unwrap();
    ctx.set_perspective(90.0, 1.0, 0.1, 100.0);
    let edge = Vec3::new(2.0, 0.0, 2.0);
    assert_eq!(ctx.frustum().planes[5].classify(edge), Side::On);
    let p = ctx.process_vertex(edge.extend(1.0));
    assert!((p.x - SIZE as f32).abs() < 0.001);
}
