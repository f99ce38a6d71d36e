//! Sphere primitive.

use crate::brdf::Brdf;
use ember_math::{Ray, Vec3};

/// Smallest accepted intersection distance. Roots closer than this are
/// rejected so a bounce ray cannot re-hit the surface it just left.
pub const RAY_EPSILON: f64 = 1e-4;

/// A sphere primitive with its emission and surface model.
///
/// Spheres are owned by the [`Scene`](crate::Scene) and immutable for the
/// lifetime of a render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f64,
    /// Emitted radiance, non-zero only on the scene's light sphere.
    pub emission: Vec3,
    pub brdf: Brdf,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f64, emission: Vec3, brdf: Brdf) -> Self {
        Self {
            center,
            radius,
            emission,
            brdf,
        }
    }

    /// Analytic ray-sphere intersection.
    ///
    /// Returns the smallest root above [`RAY_EPSILON`], or `None` when the
    /// discriminant is negative or both roots are behind the origin. The ray
    /// direction must be unit length.
    pub fn intersect(&self, ray: &Ray) -> Option<f64> {
        // Solve t^2 + 2t(o-c).d + (o-c).(o-c) - r^2 = 0 for unit d.
        let oc = self.center - ray.origin;
        let b = oc.dot(ray.direction);
        let det = b * b - oc.length_squared() + self.radius * self.radius;
        if det < 0.0 {
            return None;
        }

        let det = det.sqrt();
        let t = b - det;
        if t > RAY_EPSILON {
            return Some(t);
        }
        let t = b + det;
        if t > RAY_EPSILON {
            return Some(t);
        }
        None
    }

    /// Outward unit normal at a point on the surface.
    pub fn normal_at(&self, p: Vec3) -> Vec3 {
        (p - self.center) / self.radius
    }
}
