//! Math primitives for the ember path tracer.
//!
//! Scene geometry is double precision: the box scene models its walls as
//! spheres of radius 1e5, and the ray-sphere quadratic cancels badly in f32
//! at that scale. `Vec3` is glam's `DVec3`.

pub use glam::DVec3 as Vec3;

mod ray;
pub use ray::Ray;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
        assert_eq!(a * b, Vec3::new(4.0, 10.0, 18.0));
    }

    #[test]
    fn test_normalize_unit_length() {
        let vectors = [
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(-0.001, 5000.0, 0.2),
            Vec3::new(1e5, -1e5, 1e-3),
            Vec3::X,
        ];
        for v in vectors {
            assert!((v.normalize().length() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_try_normalize_rejects_zero() {
        assert!(Vec3::ZERO.try_normalize().is_none());
        assert!(Vec3::new(2.0, 0.0, 0.0).try_normalize().is_some());
    }
}
