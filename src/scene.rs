//! Frame rendering for a [`SceneConfig`], shared by the viewer and the CLI

use std::rc::Rc;

use thiserror::Error;
use tracing::{debug, info};

use crate::assets::{load_obj, AssetError, TextureCache, TextureId};
use crate::config::{ConfigError, SceneConfig};
use crate::mesh::Mesh;
use crate::rasterizer::{Color, Mat4, RenderContext, RenderError, Vec3};
use crate::shaders::{flat_color, standard_vertex_shader, textured_phong, LightingUniforms};

/// Line color of the wireframe pass
const WIRE_COLOR: Color = Color { r: 0, g: 150, b: 0, a: 255 };

#[derive(Debug, Error)]
pub enum SceneError {
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub struct SceneRenderer {
    config: SceneConfig,
    ctx: RenderContext,
    textures: Rc<TextureCache>,
    texture: Option<TextureId>,
    triangle: Mesh,
    model: Option<Mesh>,
}

impl SceneRenderer {
    /// Allocate the framebuffer and load the model and texture, if any
    pub fn new(config: SceneConfig) -> Result<Self, SceneError> {
        let ctx = RenderContext::new(config.width, config.height, config.bytes_per_pixel)?;

        let mut textures = TextureCache::new();
        let mut model = None;
        let mut texture = None;
        if let Some(cfg) = &config.model {
            let mesh = Mesh::from_obj(&load_obj(&cfg.obj)?);
            info!("model ready: {} triangles", mesh.triangle_count());
            model = Some(mesh);
            if let Some(path) = &cfg.texture {
                texture = Some(textures.load(path)?);
            }
        }

        Ok(Self {
            config,
            ctx,
            textures: Rc::new(textures),
            texture,
            triangle: Mesh::demo_triangle(),
            model,
        })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn context(&self) -> &RenderContext {
        &self.ctx
    }

    pub fn set_wireframe(&mut self, on: bool) {
        self.config.wireframe = on;
    }

    /// Change the output resolution; takes effect on the next frame
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), SceneError> {
        if width == self.config.width && height == self.config.height {
            return Ok(());
        }
        self.ctx.resize(width, height, self.config.bytes_per_pixel)?;
        self.config.width = width;
        self.config.height = height;
        debug!("resized to {}x{}", width, height);
        Ok(())
    }

    /// Render one frame at `time` seconds; returns the triangles drawn
    pub fn render_frame(&mut self, time: f32) -> usize {
        let cfg = &self.config;
        let ctx = &mut self.ctx;

        ctx.set_viewport(Vec3::ZERO, Vec3::new(cfg.width as f32, cfg.height as f32, 1.0));
        ctx.clear_depth(0.0);
        ctx.fill(cfg.clear_color);

        ctx.set_view_matrix(cfg.camera.view_matrix());
        ctx.set_perspective(cfg.camera.fov, cfg.aspect(), cfg.camera.znear, cfg.camera.zfar);
        ctx.set_backface_culling(cfg.culling);
        ctx.set_depth_test(cfg.depth_test);
        ctx.set_depth_write(cfg.depth_write);
        // lights are given in view space, where the eye sits at the origin
        ctx.set_descriptor_set(LightingUniforms::new(Vec3::ZERO, &cfg.lights).to_descriptor_set());
        ctx.set_vertex_shader(standard_vertex_shader());
        ctx.set_pixel_shader(textured_phong(self.textures.clone(), self.texture));

        let mut drawn = 0;
        if cfg.demo_triangle {
            ctx.set_model_matrix(Mat4::IDENTITY);
            drawn += self.triangle.draw(ctx);
        }
        if let (Some(mesh), Some(model_cfg)) = (&self.model, &cfg.model) {
            ctx.set_model_matrix(model_cfg.model_matrix(time));
            drawn += mesh.draw(ctx);
        }

        if cfg.wireframe {
            ctx.set_pixel_shader(flat_color(WIRE_COLOR.to_vec4()));
            ctx.set_depth_test(false);
            if cfg.demo_triangle {
                ctx.set_model_matrix(Mat4::IDENTITY);
                self.triangle.draw_wireframe(ctx);
            }
            if let (Some(mesh), Some(model_cfg)) = (&self.model, &cfg.model) {
                ctx.set_model_matrix(model_cfg.model_matrix(time));
                mesh.draw_wireframe(ctx);
            }
        }
        drawn
    }
}
