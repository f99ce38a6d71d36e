//! ember command-line renderer.
//!
//! Renders the built-in box scene and writes `image.ppm`. Takes one optional
//! positional argument: the total number of samples per pixel.

use anyhow::{Context, Result};
use ember_render::{render, Camera, Integrator, RenderConfig, Scene, Vec3};
use std::env;
use std::fs::File;
use std::io::BufWriter;
use std::time::Instant;

const WIDTH: u32 = 480;
const HEIGHT: u32 = 360;
const OUTPUT: &str = "image.ppm";

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let total_samples = match env::args().nth(1) {
        Some(arg) => arg
            .parse()
            .with_context(|| format!("samples argument must be an integer, got {arg:?}"))?,
        None => 4,
    };
    let config = RenderConfig::with_total_samples(total_samples);

    let scene = Scene::box_scene();
    let camera = Camera::new(
        Vec3::new(50.0, 52.0, 295.6),
        Vec3::new(0.0, -0.042612, -1.0),
        WIDTH,
        HEIGHT,
    )?;

    let start = Instant::now();
    let film = render(&scene, &camera, &config, &Integrator::default())?;
    log::info!("rendered in {:.2?}", start.elapsed());

    let file = File::create(OUTPUT).with_context(|| format!("failed to create {OUTPUT}"))?;
    let mut out = BufWriter::new(file);
    film.write_ppm(&mut out)
        .with_context(|| format!("failed to write {OUTPUT}"))?;
    log::info!("wrote {OUTPUT}");

    Ok(())
}
