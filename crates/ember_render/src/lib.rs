//! ember - CPU Monte Carlo path tracing
//!
//! An unbiased path tracer over a small fixed sphere scene:
//! - Next-event estimation (explicit light sampling) at diffuse bounces
//! - Cosine-weighted indirect bounces with Russian roulette termination
//! - Per-row random streams, rows rendered in parallel with rayon

mod brdf;
mod camera;
mod error;
mod integrator;
mod light;
mod renderer;
mod sampler;
mod scene;
mod sphere;

pub use brdf::Brdf;
pub use camera::Camera;
pub use error::{RenderError, RenderResult};
pub use integrator::Integrator;
pub use light::{sample_sphere, LightSample};
pub use renderer::{render, Film, RenderConfig};
pub use sampler::{RngMode, Sampler};
pub use scene::{Hit, Scene};
pub use sphere::Sphere;

/// Re-export the math types every consumer needs.
pub use ember_math::{Ray, Vec3};
