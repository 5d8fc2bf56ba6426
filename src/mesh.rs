//! Indexed meshes in the standard layout (color, uv, normal)

use crate::assets::ObjModel;
use crate::rasterizer::{append_attribute, Color, RenderContext, Vec2, Vec3, Vec4};
use crate::shaders::{mesh_input_format, mesh_output_format};

/// Vertex colors handed out by position index
pub const PALETTE: [Color; 8] = [
    Color::RED,
    Color::GREEN,
    Color::BLUE,
    Color { r: 200, g: 200, b: 0, a: 255 },
    Color { r: 200, g: 154, b: 165, a: 255 },
    Color { r: 0, g: 154, b: 154, a: 255 },
    Color { r: 205, g: 88, b: 0, a: 255 },
    Color { r: 107, g: 0, b: 215, a: 255 },
];

/// Positions, indices and packed input records ready for a draw call
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub positions: Vec<Vec4>,
    pub indices: Vec<u32>,
    pub attributes: Vec<u8>,
}

impl Mesh {
    pub fn push_vertex(&mut self, position: Vec3, color: Vec4, uv: Vec2, normal: Vec3) -> u32 {
        self.positions.push(position.extend(1.0));
        append_attribute(&mut self.attributes, color);
        append_attribute(&mut self.attributes, uv);
        append_attribute(&mut self.attributes, normal);
        self.positions.len() as u32 - 1
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Unrolled copy of an OBJ model, three vertices per face.
    ///
    /// Corners without uv get `(0, 0)`, without a normal get the face normal.
    /// Panics if a face references a missing position, uv or normal.
    pub fn from_obj(model: &ObjModel) -> Self {
        let mut mesh = Mesh::default();
        for face in &model.faces {
            let corners = face.indices.map(|c| model.positions[c.position]);
            let face_normal = (corners[1] - corners[0]).cross(corners[2] - corners[0]).normalize();

            for (corner, position) in face.indices.iter().zip(corners) {
                let color = PALETTE[corner.position % PALETTE.len()].to_vec4();
                let uv = corner.texture.map_or(Vec2::new(0.0, 0.0), |t| model.uvs[t]);
                let normal = corner.normal.map_or(face_normal, |n| model.normals[n]);
                let index = mesh.push_vertex(position, color, uv, normal);
                mesh.indices.push(index);
            }
        }
        mesh
    }

    /// Red/green/blue triangle just in front of the camera, facing it under
    /// counterclockwise culling
    pub fn demo_triangle() -> Self {
        let normal = Vec3::new(0.0, 0.0, -1.0);
        let mut mesh = Mesh::default();
        mesh.push_vertex(Vec3::new(0.0, 0.0, 0.2), Color::RED.to_vec4(), Vec2::new(0.0, 0.0), normal);
        mesh.push_vertex(Vec3::new(-0.7, -0.7, 0.2), Color::GREEN.to_vec4(), Vec2::new(1.0, 0.0), normal);
        mesh.push_vertex(Vec3::new(0.7, -0.7, 0.2), Color::BLUE.to_vec4(), Vec2::new(0.0, 1.0), normal);
        mesh.indices = vec![2, 1, 0];
        mesh
    }

    /// Triangle edges as a line index list
    pub fn edge_indices(&self) -> Vec<u32> {
        self.indices
            .chunks_exact(3)
            .flat_map(|t| [t[0], t[1], t[1], t[2], t[2], t[0]])
            .collect()
    }

    /// Draw with whatever shaders are bound, in the standard formats
    pub fn draw(&self, ctx: &mut RenderContext) -> usize {
        ctx.draw_triangles(
            &self.positions,
            &self.indices,
            &self.attributes,
            &mesh_input_format(),
            &mesh_output_format(),
        )
    }

    pub fn draw_wireframe(&self, ctx: &mut RenderContext) -> usize {
        ctx.draw_lines(
            &self.positions,
            &self.edge_indices(),
            &self.attributes,
            &mesh_input_format(),
            &mesh_output_format(),
        )
    }
}
