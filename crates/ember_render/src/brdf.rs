//! Surface scattering models.
//!
//! The material set is closed and small (two variants), so this is a tagged
//! enum with explicit matches rather than a trait object; the estimator calls
//! `eval`/`sample` once per bounce.

use crate::sampler::Sampler;
use ember_math::Vec3;
use std::f64::consts::{FRAC_1_PI, PI};

/// Per-axis tolerance when matching a direction against the exact mirror
/// direction in the specular `eval`. The indirect term only ever evaluates
/// the direction it just sampled, so the match holds there by construction.
const MIRROR_EPS: f64 = 1e-4;

/// A surface's reflectance model.
///
/// `reflectance` is the per-channel albedo in [0, 1]^3.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Brdf {
    /// Ideal Lambertian reflector.
    Diffuse { reflectance: Vec3 },
    /// Ideal mirror. Scattering is a point mass on the mirror direction.
    Specular { reflectance: Vec3 },
}

impl Brdf {
    /// Whether scattering is a delta distribution.
    ///
    /// The estimator skips next-event estimation on specular surfaces: light
    /// sampling against a delta lobe contributes zero almost surely.
    pub fn is_specular(&self) -> bool {
        match self {
            Brdf::Diffuse { .. } => false,
            Brdf::Specular { .. } => true,
        }
    }

    /// Scattering value (without the cosine term) for outgoing direction `o`
    /// and incoming direction `i` about the shading normal `n`.
    ///
    /// The specular value is a discretized stand-in for a Dirac delta: it is
    /// only meaningful multiplied by the inverse of the pdf-1 point mass from
    /// [`Brdf::sample`], inside the estimator's indirect term.
    pub fn eval(&self, n: Vec3, o: Vec3, i: Vec3) -> Vec3 {
        match self {
            Brdf::Diffuse { reflectance } => *reflectance * FRAC_1_PI,
            Brdf::Specular { reflectance } => {
                let mirrored = mirror(n, o);
                if (i - mirrored).abs().max_element() <= MIRROR_EPS {
                    *reflectance / n.dot(i)
                } else {
                    Vec3::ZERO
                }
            }
        }
    }

    /// Draw one incoming direction and its pdf (solid-angle measure).
    pub fn sample(&self, n: Vec3, o: Vec3, sampler: &mut Sampler) -> (Vec3, f64) {
        match self {
            Brdf::Diffuse { .. } => cosine_sample_hemisphere(n, sampler),
            Brdf::Specular { .. } => (mirror(n, o), 1.0),
        }
    }
}

/// Mirror reflection of `o` about `n`.
#[inline]
fn mirror(n: Vec3, o: Vec3) -> Vec3 {
    2.0 * n.dot(o) * n - o
}

/// Orthonormal tangent pair for the frame about `n`.
///
/// The reference axis switches away from X when `n` is nearly aligned with
/// it, so the cross product never degenerates.
fn local_frame(n: Vec3) -> (Vec3, Vec3) {
    let reference = if n.x.abs() > 0.1 { Vec3::Y } else { Vec3::X };
    let u = reference.cross(n).normalize();
    let v = n.cross(u);
    (u, v)
}

/// Cosine-weighted direction on the hemisphere about `n`; pdf = cos(theta)/pi.
fn cosine_sample_hemisphere(n: Vec3, sampler: &mut Sampler) -> (Vec3, f64) {
    let z = sampler.next().sqrt();
    let r = (1.0 - z * z).sqrt();
    let phi = 2.0 * PI * sampler.next();

    let (u, v) = local_frame(n);
    let i = (u * (r * phi.cos()) + v * (r * phi.sin()) + n * z).normalize();
    (i, n.dot(i) * FRAC_1_PI)
}
