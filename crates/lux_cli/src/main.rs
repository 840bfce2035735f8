//! Lux - renders the compiled-in Cornell box and writes one still image.
//!
//! Usage: `lux [--spheres] [OUTPUT]`
//!
//! OUTPUT defaults to `result.ppm`; a `.png` extension writes PNG instead.
//! Set `RUST_LOG=debug` for per-row progress.

use anyhow::{bail, Context, Result};
use lux_renderer::{render, Camera, RenderConfig, Scene, SceneKind};
use std::path::PathBuf;
use std::time::Instant;

const IMAGE_WIDTH: u32 = 1024;
const IMAGE_HEIGHT: u32 = 768;
const DEFAULT_OUTPUT: &str = "result.ppm";

/// Command line options.
#[derive(Debug)]
struct Options {
    output: PathBuf,
    scene: SceneKind,
}

impl Options {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut output = None;
        let mut scene = SceneKind::default();

        for arg in args {
            match arg.as_str() {
                "--spheres" => scene = SceneKind::Spheres,
                "--triangles" => scene = SceneKind::Triangles,
                flag if flag.starts_with("--") => bail!("unknown option {flag}"),
                path => {
                    if output.replace(PathBuf::from(path)).is_some() {
                        bail!("more than one output path given");
                    }
                }
            }
        }

        Ok(Self {
            output: output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            scene,
        })
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = Options::parse(std::env::args().skip(1))?;
    let config = RenderConfig::default();

    let start = Instant::now();
    let scene = Scene::build(options.scene);
    log::info!(
        "Scene '{}' built in {:?} ({} primitives)",
        options.scene.name(),
        start.elapsed(),
        scene.primitive_count()
    );

    let mut camera = Camera::new().with_resolution(IMAGE_WIDTH, IMAGE_HEIGHT);
    camera.initialize();

    let image = render(&camera, &scene, &config).context("render failed")?;

    image
        .save(&options.output)
        .with_context(|| format!("failed to write {}", options.output.display()))?;
    log::info!("Saved to {}", options.output.display());

    Ok(())
}
