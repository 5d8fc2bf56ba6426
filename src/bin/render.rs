//! softpipe-render: headless renderer
//!
//! Renders one frame of a scene and writes it as PNG.
//!
//! ```bash
//! softpipe-render -o triangle.png
//! softpipe-render scene.ron -o out.png --time 1.25 --width 320 --height 240
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use softpipe::assets::save_frame_png;
use softpipe::config::{load_scene, save_scene, SceneConfig};
use softpipe::scene::SceneRenderer;

#[derive(Parser)]
#[command(name = "softpipe-render")]
#[command(author, version, about = "Render a softpipe scene to PNG")]
struct Args {
    /// RON scene file; the built-in demo scene when omitted
    scene: Option<PathBuf>,

    /// Output image
    #[arg(long, short = 'o', default_value = "frame.png")]
    output: PathBuf,

    /// Animation time in seconds
    #[arg(long, short = 't', default_value = "0")]
    time: f32,

    /// Override the scene width
    #[arg(long)]
    width: Option<usize>,

    /// Override the scene height
    #[arg(long)]
    height: Option<usize>,

    /// Draw triangle edges on top
    #[arg(long)]
    wireframe: bool,

    /// Write the effective scene as RON and exit
    #[arg(long)]
    dump_scene: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut scene = match &args.scene {
        Some(path) => load_scene(path)?,
        None => SceneConfig::default(),
    };
    if let Some(width) = args.width {
        scene.width = width;
    }
    if let Some(height) = args.height {
        scene.height = height;
    }
    scene.wireframe |= args.wireframe;

    if let Some(path) = &args.dump_scene {
        save_scene(&scene, path)?;
        info!("Wrote scene to {}", path.display());
        return Ok(());
    }

    let mut renderer = SceneRenderer::new(scene)?;
    let drawn = renderer.render_frame(args.time);
    save_frame_png(renderer.context().framebuffer(), &args.output)?;
    info!("Rendered {} triangles to {}", drawn, args.output.display());
    Ok(())
}
