//! Stock shaders for the standard mesh layout
//!
//! Input record: color (`Vec4`), uv (`Vec2`), normal (`Vec3`).
//! Output record: view position (`Vec4`), color, uv, view normal (`Vec3`).

use std::rc::Rc;

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::assets::{TextureCache, TextureId};
use crate::rasterizer::{
    AttribKind, AttribWriter, DescriptorSet, ShaderInput, Vec2, Vec3, Vec4, VertexFormat,
};

/// Lights beyond this count are ignored
pub const MAX_LIGHTS: usize = 8;

/// Specular exponent of the Phong term
const SHININESS: i32 = 16;

pub fn mesh_input_format() -> VertexFormat {
    VertexFormat::new(&[AttribKind::Vec4, AttribKind::Vec2, AttribKind::Vec3])
}

pub fn mesh_output_format() -> VertexFormat {
    VertexFormat::new(&[AttribKind::Vec4, AttribKind::Vec4, AttribKind::Vec2, AttribKind::Vec3])
}

/// Scene light, positions and directions in view space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Light {
    Ambient { intensity: f32 },
    Point { intensity: f32, position: Vec3 },
    Directional { intensity: f32, direction: Vec3 },
}

const LIGHT_AMBIENT: i32 = 0;
const LIGHT_POINT: i32 = 1;
const LIGHT_DIRECTIONAL: i32 = 2;

/// One light as laid out in the descriptor set
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PackedLight {
    pub kind: i32,
    pub intensity: f32,
    /// Point: position. Directional: direction. Ambient: unused.
    pub vector: Vec3,
}

impl From<Light> for PackedLight {
    fn from(light: Light) -> Self {
        match light {
            Light::Ambient { intensity } => Self { kind: LIGHT_AMBIENT, intensity, vector: Vec3::ZERO },
            Light::Point { intensity, position } => Self { kind: LIGHT_POINT, intensity, vector: position },
            Light::Directional { intensity, direction } => {
                Self { kind: LIGHT_DIRECTIONAL, intensity, vector: direction }
            }
        }
    }
}

/// Descriptor-set block read by [`textured_phong`]
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LightingUniforms {
    pub camera_position: Vec3,
    pub light_count: i32,
    pub lights: [PackedLight; MAX_LIGHTS],
}

impl LightingUniforms {
    pub fn new(camera_position: Vec3, lights: &[Light]) -> Self {
        let mut uniforms = Self::zeroed();
        uniforms.camera_position = camera_position;
        for (slot, light) in uniforms.lights.iter_mut().zip(lights) {
            *slot = (*light).into();
        }
        uniforms.light_count = lights.len().min(MAX_LIGHTS) as i32;
        uniforms
    }

    pub fn to_descriptor_set(&self) -> DescriptorSet {
        DescriptorSet::from_value(self)
    }

    /// Total ambient + diffuse + specular intensity at `position`
    pub fn illumination(&self, position: Vec3, normal: Vec3) -> f32 {
        let count = (self.light_count.max(0) as usize).min(MAX_LIGHTS);
        let mut total = 0.0;
        for light in &self.lights[..count] {
            let to_light = match light.kind {
                LIGHT_AMBIENT => {
                    total += light.intensity;
                    continue;
                }
                LIGHT_POINT => (light.vector - position).normalize(),
                _ => (-light.vector).normalize(),
            };

            let v_dot_n = to_light.dot(normal);
            if v_dot_n <= 0.0 {
                continue;
            }
            total += v_dot_n * light.intensity;

            let reflected = (normal.scale(2.0 * v_dot_n) - to_light).normalize();
            let to_eye = (self.camera_position - position).normalize();
            let d_dot_r = to_eye.dot(reflected);
            if d_dot_r > 0.0 {
                total += d_dot_r.powi(SHININESS) * light.intensity;
            }
        }
        total
    }
}

/// Transform to view space and pass color, uv and the rotated normal through
pub fn standard_vertex_shader() -> impl Fn(&ShaderInput<'_>, &mut AttribWriter<'_>) -> Vec4 {
    |input, out| {
        let model_view = input.builtins.model_view;
        let position = model_view * input.position;
        let mut attrs = input.attributes();
        let color = attrs.read::<Vec4>();
        let uv = attrs.read::<Vec2>();
        let normal = attrs.read::<Vec3>();
        let normal = (model_view * normal.extend(0.0)).xyz().normalize();

        out.write(position);
        out.write(color);
        out.write(uv);
        out.write(normal);
        position
    }
}

/// Solid color, ignores every attribute
pub fn flat_color(color: Vec4) -> impl Fn(&ShaderInput<'_>) -> Vec4 {
    move |_| color
}

/// Interpolated vertex color
pub fn vertex_color() -> impl Fn(&ShaderInput<'_>) -> Vec4 {
    |input| {
        let mut attrs = input.attributes();
        attrs.skip();
        attrs.read::<Vec4>().clamp(0.0, 1.0)
    }
}

/// Vertex color times texture, lit by the [`LightingUniforms`] in the
/// descriptor set. Without uniforms the surface is drawn unlit, without a
/// texture it is treated as white.
pub fn textured_phong(
    textures: Rc<TextureCache>,
    texture: Option<TextureId>,
) -> impl Fn(&ShaderInput<'_>) -> Vec4 {
    move |input| {
        let mut attrs = input.attributes();
        let position = attrs.read::<Vec4>().xyz();
        let color = attrs.read::<Vec4>();
        let uv = attrs.read::<Vec2>();
        let normal = attrs.read::<Vec3>().normalize();

        let texel = match texture {
            Some(id) => textures.sample(id, uv.x, uv.y),
            None => Vec4::new(1.0, 1.0, 1.0, 1.0),
        };
        let light = input
            .descriptors
            .get::<LightingUniforms>()
            .map_or(1.0, |u| u.illumination(position, normal));
        color
            .mul_elem(texel)
            .mul_elem(Vec4::new(light, light, light, 1.0))
            .clamp(0.0, 1.0)
    }
}
