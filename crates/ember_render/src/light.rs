//! Area sampling of the light sphere.

use crate::sampler::Sampler;
use crate::sphere::Sphere;
use ember_math::Vec3;
use std::f64::consts::PI;

/// A point drawn uniformly on the light's surface.
#[derive(Debug, Clone, Copy)]
pub struct LightSample {
    /// Position on the light surface.
    pub point: Vec3,
    /// Outward unit normal at `point`.
    pub normal: Vec3,
    /// Density with respect to surface area: 1 / (4 pi r^2).
    pub pdf: f64,
}

/// Sample a point uniformly over the full surface of `light`.
pub fn sample_sphere(light: &Sphere, sampler: &mut Sampler) -> LightSample {
    let z = 2.0 * sampler.next() - 1.0;
    let phi = 2.0 * PI * sampler.next();
    let r = (1.0 - z * z).sqrt();
    let normal = Vec3::new(r * phi.cos(), r * phi.sin(), z);

    LightSample {
        point: light.center + normal * light.radius,
        normal,
        pdf: 1.0 / (4.0 * PI * light.radius * light.radius),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brdf::Brdf;

    #[test]
    fn test_sample_on_surface() {
        let light = Sphere::new(
            Vec3::new(50.0, 70.0, 81.6),
            5.0,
            Vec3::splat(50.0),
            Brdf::Diffuse {
                reflectance: Vec3::ZERO,
            },
        );
        let mut sampler = Sampler::seeded(9);

        let expected_pdf = 1.0 / (4.0 * PI * 25.0);
        for _ in 0..1_000 {
            let ls = sample_sphere(&light, &mut sampler);
            assert!(((ls.point - light.center).length() - light.radius).abs() < 1e-9);
            assert!((ls.normal.length() - 1.0).abs() < 1e-9);
            // Normal points away from the center.
            assert!(ls.normal.dot(ls.point - light.center) > 0.0);
            assert!((ls.pdf - expected_pdf).abs() < 1e-12);
        }
    }
}
