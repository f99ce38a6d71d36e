//! Scene: the fixed sphere list, nearest-hit query and visibility oracle.

use crate::brdf::Brdf;
use crate::error::{RenderError, RenderResult};
use crate::sphere::Sphere;
use ember_math::{Ray, Vec3};

/// Per-axis tolerance when deciding that a visibility ray's hit point is the
/// sampled light point itself rather than an occluder.
const HIT_TOLERANCE: f64 = 1e-4;

/// The nearest intersection along a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Distance along the ray.
    pub t: f64,
    /// Index of the hit sphere in the scene.
    pub index: usize,
}

/// A fixed list of spheres with one designated area light.
///
/// Constructed once before rendering and read-only for its duration; shared
/// across workers without locking.
pub struct Scene {
    spheres: Vec<Sphere>,
    light: usize,
}

impl Scene {
    /// Create a scene, validating its invariants: the light index is in
    /// range, the light is the one and only emitter, and every radius is
    /// strictly positive.
    pub fn new(spheres: Vec<Sphere>, light: usize) -> RenderResult<Self> {
        if light >= spheres.len() {
            return Err(RenderError::LightIndexOutOfRange {
                index: light,
                count: spheres.len(),
            });
        }
        for (index, sphere) in spheres.iter().enumerate() {
            if sphere.radius <= 0.0 {
                return Err(RenderError::InvalidRadius {
                    index,
                    radius: sphere.radius,
                });
            }
            let emits = sphere.emission != Vec3::ZERO;
            if index == light && !emits {
                return Err(RenderError::DarkLight { index });
            }
            if index != light && emits {
                return Err(RenderError::UnexpectedEmitter { index });
            }
        }
        Ok(Self { spheres, light })
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    /// The designated light sphere.
    pub fn light(&self) -> &Sphere {
        &self.spheres[self.light]
    }

    /// Globally nearest positive hit, by linear scan.
    ///
    /// The primitive count is small and fixed; no acceleration structure.
    pub fn nearest_hit(&self, ray: &Ray) -> Option<Hit> {
        let mut nearest: Option<Hit> = None;
        for (index, sphere) in self.spheres.iter().enumerate() {
            if let Some(t) = sphere.intersect(ray) {
                if nearest.map_or(true, |hit| t < hit.t) {
                    nearest = Some(Hit { t, index });
                }
            }
        }
        nearest
    }

    /// Binary hard-shadow test: is the segment from `from` to `to` clear?
    ///
    /// Casts a ray toward `to` and accepts only if the nearest hit point
    /// coincides with `to` within [`HIT_TOLERANCE`] per axis.
    pub fn visible(&self, from: Vec3, to: Vec3) -> bool {
        let Some(direction) = (to - from).try_normalize() else {
            return false;
        };
        let ray = Ray::new(from, direction);
        match self.nearest_hit(&ray) {
            Some(hit) => (ray.at(hit.t) - to).abs().max_element() <= HIT_TOLERANCE,
            None => false,
        }
    }

    /// The fixed demo scene: five wall spheres boxing the view, a bright
    /// diffuse ball, a mirror ball, and one small emissive sphere near the
    /// ceiling as the sole light.
    pub fn box_scene() -> Self {
        let white = Brdf::Diffuse {
            reflectance: Vec3::splat(0.75),
        };
        let spheres = vec![
            // Left wall
            Sphere::new(
                Vec3::new(1e5 + 1.0, 40.8, 81.6),
                1e5,
                Vec3::ZERO,
                Brdf::Diffuse {
                    reflectance: Vec3::new(0.75, 0.25, 0.25),
                },
            ),
            // Right wall
            Sphere::new(
                Vec3::new(-1e5 + 99.0, 40.8, 81.6),
                1e5,
                Vec3::ZERO,
                Brdf::Diffuse {
                    reflectance: Vec3::new(0.25, 0.25, 0.75),
                },
            ),
            // Back wall
            Sphere::new(Vec3::new(50.0, 40.8, 1e5), 1e5, Vec3::ZERO, white),
            // Floor
            Sphere::new(Vec3::new(50.0, 1e5, 81.6), 1e5, Vec3::ZERO, white),
            // Ceiling
            Sphere::new(Vec3::new(50.0, -1e5 + 81.6, 81.6), 1e5, Vec3::ZERO, white),
            // Matte ball
            Sphere::new(
                Vec3::new(27.0, 16.5, 47.0),
                16.5,
                Vec3::ZERO,
                Brdf::Diffuse {
                    reflectance: Vec3::splat(0.9),
                },
            ),
            // Mirror ball
            Sphere::new(
                Vec3::new(73.0, 16.5, 78.0),
                16.5,
                Vec3::ZERO,
                Brdf::Specular {
                    reflectance: Vec3::splat(0.999),
                },
            ),
            // Light
            Sphere::new(
                Vec3::new(50.0, 70.0, 81.6),
                5.0,
                Vec3::splat(50.0),
                Brdf::Diffuse {
                    reflectance: Vec3::ZERO,
                },
            ),
        ];
        // box_scene's invariants hold by construction.
        Self { spheres, light: 7 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball(center: Vec3, radius: f64) -> Sphere {
        Sphere::new(
            center,
            radius,
            Vec3::ZERO,
            Brdf::Diffuse {
                reflectance: Vec3::splat(0.5),
            },
        )
    }

    fn lamp(center: Vec3) -> Sphere {
        Sphere::new(
            center,
            1.0,
            Vec3::ONE,
            Brdf::Diffuse {
                reflectance: Vec3::ZERO,
            },
        )
    }

    #[test]
    fn test_validation() {
        // Light index out of range.
        assert!(matches!(
            Scene::new(vec![ball(Vec3::ZERO, 1.0)], 3),
            Err(RenderError::LightIndexOutOfRange { index: 3, count: 1 })
        ));
        // Light with zero emission.
        assert!(matches!(
            Scene::new(vec![ball(Vec3::ZERO, 1.0)], 0),
            Err(RenderError::DarkLight { index: 0 })
        ));
        // A second emitter.
        assert!(matches!(
            Scene::new(vec![lamp(Vec3::ZERO), lamp(Vec3::new(5.0, 0.0, 0.0))], 0),
            Err(RenderError::UnexpectedEmitter { index: 1 })
        ));
        // Degenerate radius.
        let mut flat = ball(Vec3::ZERO, 1.0);
        flat.radius = 0.0;
        assert!(matches!(
            Scene::new(vec![flat, lamp(Vec3::new(5.0, 0.0, 0.0))], 1),
            Err(RenderError::InvalidRadius { index: 0, .. })
        ));

        assert!(Scene::new(vec![ball(Vec3::ZERO, 1.0), lamp(Vec3::new(5.0, 0.0, 0.0))], 1).is_ok());
    }

    #[test]
    fn test_nearest_hit_picks_closest() {
        let scene = Scene::new(
            vec![
                ball(Vec3::new(0.0, 0.0, -10.0), 1.0),
                ball(Vec3::new(0.0, 0.0, -5.0), 1.0),
                lamp(Vec3::new(100.0, 0.0, 0.0)),
            ],
            2,
        )
        .unwrap();

        let hit = scene
            .nearest_hit(&Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0)))
            .unwrap();
        assert_eq!(hit.index, 1);
        assert!((hit.t - 4.0).abs() < 1e-9);

        assert!(scene.nearest_hit(&Ray::new(Vec3::ZERO, Vec3::Y)).is_none());
    }

    #[test]
    fn test_visibility() {
        // One target sphere at the origin; the light is far off to the side.
        let target = ball(Vec3::ZERO, 1.0);
        let scene = Scene::new(vec![target, lamp(Vec3::new(100.0, 0.0, 0.0))], 1).unwrap();

        let from = Vec3::new(0.0, 0.0, 10.0);
        let on_target = Vec3::new(0.0, 0.0, 1.0);
        assert!(scene.visible(from, on_target));

        // Insert an opaque sphere strictly between the two points.
        let scene = Scene::new(
            vec![
                ball(Vec3::ZERO, 1.0),
                ball(Vec3::new(0.0, 0.0, 5.0), 1.0),
                lamp(Vec3::new(100.0, 0.0, 0.0)),
            ],
            2,
        )
        .unwrap();
        assert!(!scene.visible(from, on_target));
    }

    #[test]
    fn test_box_scene_shape() {
        let scene = Scene::box_scene();
        assert_eq!(scene.spheres().len(), 8);
        assert_eq!(scene.light().emission, Vec3::splat(50.0));
        assert!(!scene.light().brdf.is_specular());
    }
}
