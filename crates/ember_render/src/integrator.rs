//! The radiance estimator: path construction with next-event estimation and
//! Russian roulette.

use crate::light::sample_sphere;
use crate::sampler::Sampler;
use crate::scene::Scene;
use ember_math::{Ray, Vec3};

/// Path-tracing parameters.
///
/// The roulette fields exist so tests can disable early termination
/// (`rr_continue_prob = 1.0`) and compare against the default schedule.
#[derive(Debug, Clone, Copy)]
pub struct Integrator {
    /// Bounce count below which paths always continue.
    pub rr_start_depth: u32,
    /// Continuation probability once roulette kicks in.
    pub rr_continue_prob: f64,
    /// Hard safety cap on path length. Roulette terminates essentially every
    /// path long before this; the cap only bounds the worst case.
    pub max_depth: u32,
}

impl Default for Integrator {
    fn default() -> Self {
        Self {
            rr_start_depth: 5,
            rr_continue_prob: 0.9,
            max_depth: 64,
        }
    }
}

impl Integrator {
    /// Unbiased estimate of the radiance arriving along `ray`.
    ///
    /// One path is built iteratively, carrying the accumulated throughput
    /// instead of recursing per bounce. At each non-specular hit the light is
    /// sampled explicitly (next-event estimation); surface emission is added
    /// only on the primary hit and after specular bounces, since NEE already
    /// accounts for direct light everywhere else. Survival under roulette is
    /// reweighted by 1/p, which keeps the expectation independent of the
    /// termination schedule.
    pub fn radiance(&self, scene: &Scene, ray: Ray, sampler: &mut Sampler) -> Vec3 {
        let mut accumulated = Vec3::ZERO;
        let mut throughput = Vec3::ONE;
        let mut include_emission = true;
        let mut ray = ray;
        let mut depth = 1u32;

        loop {
            let Some(hit) = scene.nearest_hit(&ray) else {
                break;
            };
            let sphere = &scene.spheres()[hit.index];
            let x = ray.at(hit.t);
            let o = -ray.direction;
            let mut n = sphere.normal_at(x);
            if n.dot(o) < 0.0 {
                n = -n;
            }

            if include_emission {
                accumulated += throughput * sphere.emission;
            }

            // Direct term: sample the light, unless this surface is a delta
            // reflector (NEE against a delta lobe is zero almost surely).
            if !sphere.brdf.is_specular() {
                let light = scene.light();
                let ls = sample_sphere(light, sampler);
                let to_light = ls.point - x;
                let dist_sq = to_light.length_squared();
                if dist_sq > 0.0 {
                    let wi = to_light / dist_sq.sqrt();
                    let cos_surface = n.dot(wi);
                    let cos_light = ls.normal.dot(-wi);
                    // Facing cosines must both be positive for the sampled
                    // point to contribute; otherwise skip the shadow ray.
                    if cos_surface > 0.0 && cos_light > 0.0 && scene.visible(x, ls.point) {
                        accumulated += throughput
                            * light.emission
                            * sphere.brdf.eval(n, wi, o)
                            * (cos_surface * cos_light / (dist_sq * ls.pdf));
                    }
                }
            }

            if depth >= self.max_depth {
                break;
            }
            let p = if depth < self.rr_start_depth {
                1.0
            } else {
                self.rr_continue_prob
            };
            if sampler.next() >= p {
                break;
            }

            let (wi, pdf) = sphere.brdf.sample(n, o, sampler);
            if pdf <= 0.0 {
                // A zero-density draw carries zero contribution; terminating
                // here avoids the division rather than propagating NaN.
                break;
            }

            throughput *= sphere.brdf.eval(n, o, wi) * (n.dot(wi) / (pdf * p));
            include_emission = sphere.brdf.is_specular();
            ray = Ray::new(x, wi);
            depth += 1;
        }

        accumulated
    }
}
