//! softpipe viewer
//!
//! Renders a scene with the software pipeline every frame and blits the
//! framebuffer into the window.
//!
//! ```bash
//! softpipe                 # built-in demo triangle
//! softpipe scene.ron       # RON scene file
//! ```
//!
//! Keys: ESC quits, W toggles the wireframe pass, F12 saves a PNG.

use macroquad::prelude::*;
use softpipe::assets::save_frame_png;
use softpipe::config::{load_scene, SceneConfig};
use softpipe::scene::SceneRenderer;
use softpipe::VERSION;
use tracing::{error, info, warn};

fn window_conf() -> Conf {
    Conf {
        window_title: format!("softpipe v{}", VERSION),
        window_width: 960,
        window_height: 720,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

fn load_config() -> SceneConfig {
    let Some(path) = std::env::args().nth(1) else {
        return SceneConfig::default();
    };
    match load_scene(&path) {
        Ok(scene) => {
            info!("Loaded scene {}", path);
            scene
        }
        Err(e) => {
            warn!("Failed to load scene {}: {}, using the demo scene", path, e);
            SceneConfig::default()
        }
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut config = load_config();
    if config.bytes_per_pixel != 4 {
        warn!("viewer needs 4 bytes per pixel, ignoring {}", config.bytes_per_pixel);
        config.bytes_per_pixel = 4;
    }

    let mut renderer = match SceneRenderer::new(config) {
        Ok(r) => r,
        Err(e) => {
            error!("Failed to set up scene: {}", e);
            return;
        }
    };

    info!("=== softpipe ===");

    let mut time = 0.0f32;
    let mut snapshot = 0u32;

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }
        if is_key_pressed(KeyCode::W) {
            let on = !renderer.config().wireframe;
            renderer.set_wireframe(on);
        }

        time += get_frame_time();
        let drawn = renderer.render_frame(time);

        let fb = renderer.context().framebuffer();
        if is_key_pressed(KeyCode::F12) {
            let path = format!("softpipe_{:03}.png", snapshot);
            match save_frame_png(fb, &path) {
                Ok(()) => info!("Saved {}", path),
                Err(e) => error!("Failed to save {}: {}", path, e),
            }
            snapshot += 1;
        }

        clear_background(Color::from_rgba(30, 30, 35, 255));

        let texture = Texture2D::from_rgba8(fb.width() as u16, fb.height() as u16, fb.pixels());
        texture.set_filter(FilterMode::Nearest);

        // letterbox at the framebuffer's aspect ratio
        let (screen_w, screen_h) = (screen_width(), screen_height());
        let scale = (screen_w / fb.width() as f32).min(screen_h / fb.height() as f32);
        let (draw_w, draw_h) = (fb.width() as f32 * scale, fb.height() as f32 * scale);
        draw_texture_ex(
            &texture,
            (screen_w - draw_w) * 0.5,
            (screen_h - draw_h) * 0.5,
            WHITE,
            DrawTextureParams {
                dest_size: Some(Vec2::new(draw_w, draw_h)),
                ..Default::default()
            },
        );

        draw_text(&format!("{} triangles  {} fps", drawn, get_fps()), 8.0, 20.0, 20.0, GREEN);

        next_frame().await;
    }
}
