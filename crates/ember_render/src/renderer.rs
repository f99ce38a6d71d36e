//! Render loop, pixel accumulation and PPM output.

use crate::camera::Camera;
use crate::error::RenderResult;
use crate::integrator::Integrator;
use crate::sampler::{RngMode, Sampler};
use crate::scene::Scene;
use ember_math::Vec3;
use rayon::prelude::*;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU32, Ordering};

/// Render configuration.
#[derive(Debug, Clone, Copy)]
pub struct RenderConfig {
    /// Independent camera rays per sub-pixel cell (a 2x2 grid per pixel, so
    /// total samples per pixel is four times this).
    pub samples_per_subpixel: u32,
    /// How worker random streams are seeded.
    pub rng: RngMode,
}

impl RenderConfig {
    /// Configuration for a total per-pixel sample budget, as given on the
    /// command line; at least one sample per sub-pixel.
    pub fn with_total_samples(total: u32) -> Self {
        Self {
            samples_per_subpixel: (total / 4).max(1),
            rng: RngMode::Entropy,
        }
    }
}

/// Accumulated pixel colors, row-major with the top row first.
pub struct Film {
    width: u32,
    height: u32,
    pixels: Vec<Vec3>,
}

impl Film {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Vec3::ZERO; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Vec3] {
        &self.pixels
    }

    /// Get the pixel at (x, y), y counted from the top.
    pub fn get(&self, x: u32, y: u32) -> Vec3 {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Write the image as ASCII PPM (P3), gamma-encoded.
    pub fn write_ppm<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "P3")?;
        writeln!(out, "{} {}", self.width, self.height)?;
        writeln!(out, "255")?;
        for row in self.pixels.chunks(self.width as usize) {
            for pixel in row {
                write!(
                    out,
                    "{} {} {} ",
                    gamma_encode(pixel.x),
                    gamma_encode(pixel.y),
                    gamma_encode(pixel.z)
                )?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

/// Clamp to [0, 1], gamma-encode with exponent 1/2.2 and quantize to a byte.
#[inline]
pub fn gamma_encode(channel: f64) -> u8 {
    (channel.clamp(0.0, 1.0).powf(1.0 / 2.2) * 255.0 + 0.5) as u8
}

/// Render the scene.
///
/// Rows are fully independent and rendered in parallel; each row task owns
/// one pre-built random stream, so the hot path never locks. The only shared
/// mutable state is the progress counter.
pub fn render(
    scene: &Scene,
    camera: &Camera,
    config: &RenderConfig,
    integrator: &Integrator,
) -> RenderResult<Film> {
    let width = camera.width();
    let height = camera.height();
    let samplers = config.rng.streams(height)?;

    log::info!(
        "rendering {}x{} at {} spp",
        width,
        height,
        config.samples_per_subpixel * 4
    );

    let rows_done = AtomicU32::new(0);
    let rows: Vec<Vec<Vec3>> = samplers
        .into_par_iter()
        .enumerate()
        .map(|(y, mut sampler)| {
            let row = render_row(scene, camera, config, integrator, y as u32, &mut sampler);
            let done = rows_done.fetch_add(1, Ordering::Relaxed) + 1;
            log::debug!("rendered row {done}/{height}");
            row
        })
        .collect();

    // Row y is counted from the bottom in camera space; the film stores the
    // top row first.
    let mut film = Film::new(width, height);
    for (y, row) in rows.into_iter().enumerate() {
        let offset = (height as usize - 1 - y) * width as usize;
        film.pixels[offset..offset + width as usize].copy_from_slice(&row);
    }
    Ok(film)
}

fn render_row(
    scene: &Scene,
    camera: &Camera,
    config: &RenderConfig,
    integrator: &Integrator,
    y: u32,
    sampler: &mut Sampler,
) -> Vec<Vec3> {
    let width = camera.width();
    let sample_weight = 1.0 / config.samples_per_subpixel as f64;

    let mut row = Vec::with_capacity(width as usize);
    for x in 0..width {
        let mut pixel = Vec3::ZERO;
        for sy in 0..2 {
            for sx in 0..2 {
                let mut subpixel = Vec3::ZERO;
                for _ in 0..config.samples_per_subpixel {
                    let ray = camera.primary_ray(x, y, sx, sy, sampler);
                    subpixel += integrator.radiance(scene, ray, sampler) * sample_weight;
                }
                pixel += subpixel.clamp(Vec3::ZERO, Vec3::ONE) * 0.25;
            }
        }
        row.push(pixel);
    }
    row
}
