//! Pinhole camera and primary-ray generation.

use crate::error::{RenderError, RenderResult};
use crate::sampler::Sampler;
use ember_math::{Ray, Vec3};

/// Image-plane scale; together with the aspect ratio this fixes the field of
/// view.
const FOV_SCALE: f64 = 0.5135;

/// Camera with its derived image-plane basis.
///
/// The basis is computed once at construction; ray generation is pure
/// arithmetic plus the tent-filter jitter.
#[derive(Debug, Clone)]
pub struct Camera {
    origin: Vec3,
    direction: Vec3,
    cx: Vec3,
    cy: Vec3,
    width: u32,
    height: u32,
}

impl Camera {
    /// Create a camera at `origin` looking along `direction` for a
    /// `width` x `height` image.
    ///
    /// Fails if `direction` is (near) zero or parallel to the horizontal
    /// image axis, either of which degenerates the basis.
    pub fn new(origin: Vec3, direction: Vec3, width: u32, height: u32) -> RenderResult<Self> {
        let direction = direction
            .try_normalize()
            .ok_or(RenderError::DegenerateCamera)?;
        let cx = Vec3::new(width as f64 * FOV_SCALE / height as f64, 0.0, 0.0);
        let cy = cx
            .cross(direction)
            .try_normalize()
            .ok_or(RenderError::DegenerateCamera)?
            * FOV_SCALE;

        Ok(Self {
            origin,
            direction,
            cx,
            cy,
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Generate one jittered primary ray through pixel `(x, y)` (y counted
    /// from the bottom image row) in sub-pixel cell `(sx, sy)` of the 2x2
    /// grid.
    ///
    /// The jitter is tent-filtered: sub-pixel sample positions cluster
    /// toward the cell center, which anti-aliases better than a box filter.
    pub fn primary_ray(&self, x: u32, y: u32, sx: u32, sy: u32, sampler: &mut Sampler) -> Ray {
        let dx = tent(sampler.next());
        let dy = tent(sampler.next());

        let px = ((sx as f64 + 0.5 + dx) / 2.0 + x as f64) / self.width as f64 - 0.5;
        let py = ((sy as f64 + 0.5 + dy) / 2.0 + y as f64) / self.height as f64 - 0.5;
        let d = self.cx * px + self.cy * py + self.direction;

        Ray::new(self.origin, d.normalize())
    }
}

/// Map a uniform sample to a tent (triangle) distribution on [-1, 1].
#[inline]
fn tent(xi: f64) -> f64 {
    let r = 2.0 * xi;
    if r < 1.0 {
        r.sqrt() - 1.0
    } else {
        1.0 - (2.0 - r).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_directions_rejected() {
        assert!(matches!(
            Camera::new(Vec3::ZERO, Vec3::ZERO, 4, 3),
            Err(RenderError::DegenerateCamera)
        ));
        // Parallel to the horizontal axis: cx x d vanishes.
        assert!(matches!(
            Camera::new(Vec3::ZERO, Vec3::X, 4, 3),
            Err(RenderError::DegenerateCamera)
        ));
    }

    #[test]
    fn test_primary_rays_unit_and_forward() {
        let camera = Camera::new(
            Vec3::new(50.0, 52.0, 295.6),
            Vec3::new(0.0, -0.042612, -1.0),
            16,
            12,
        )
        .unwrap();
        let mut sampler = Sampler::seeded(1);

        for y in 0..12 {
            for x in 0..16 {
                let ray = camera.primary_ray(x, y, x % 2, y % 2, &mut sampler);
                assert!((ray.direction.length() - 1.0).abs() < 1e-12);
                assert!(ray.direction.z < 0.0);
                assert_eq!(ray.origin, Vec3::new(50.0, 52.0, 295.6));
            }
        }
    }

    #[test]
    fn test_tent_range_and_symmetry() {
        let mut sampler = Sampler::seeded(5);
        let mut sum = 0.0;
        let count = 10_000;
        for _ in 0..count {
            let d = tent(sampler.next());
            assert!((-1.0..=1.0).contains(&d));
            sum += d;
        }
        // Mean of the triangle distribution is 0.
        assert!((sum / count as f64).abs() < 0.02);
    }
}
