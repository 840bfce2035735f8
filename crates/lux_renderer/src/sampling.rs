//! Sampling warps used by the camera and the estimator.
//!
//! The warps take their uniform numbers as arguments; callers draw them from
//! the per-row generator with [`gen_f64`].

use lux_math::{orthonormal_basis, Vec3};
use rand::{Rng, RngCore};
use std::f64::consts::PI;

/// Draw a uniform number in [0, 1).
#[inline]
pub fn gen_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen::<f64>()
}

/// Cosine-weighted direction on the hemisphere around the unit vector `w`.
///
/// `r1` picks the azimuth over [0, 2π), `sqrt(r2)` is the radius on the disk.
pub fn cosine_hemisphere(w: Vec3, r1: f64, r2: f64) -> Vec3 {
    let (u, v) = orthonormal_basis(w);
    let phi = 2.0 * PI * r1;
    let r2s = r2.sqrt();

    (u * phi.cos() * r2s + v * phi.sin() * r2s + w * (1.0 - r2).sqrt()).normalize()
}

/// Direction uniformly distributed in solid angle inside the cone of
/// half-angle `acos(cos_a_max)` around the unit vector `axis`.
pub fn uniform_cone(axis: Vec3, cos_a_max: f64, e1: f64, e2: f64) -> Vec3 {
    let (u, v) = orthonormal_basis(axis);
    let cos_a = 1.0 - e1 + e1 * cos_a_max;
    let sin_a = (1.0 - cos_a * cos_a).max(0.0).sqrt();
    let phi = 2.0 * PI * e2;

    (u * phi.cos() * sin_a + v * phi.sin() * sin_a + axis * cos_a).normalize()
}

/// Solid angle of a cone with the given cosine half-angle.
#[inline]
pub fn cone_solid_angle(cos_a_max: f64) -> f64 {
    2.0 * PI * (1.0 - cos_a_max)
}

/// Tent filter warp: maps `v` in [0, 2) to an offset in [-1, 1) with a
/// triangular density peaking at zero.
#[inline]
pub fn tent(v: f64) -> f64 {
    if v < 1.0 {
        v.sqrt() - 1.0
    } else {
        1.0 - (2.0 - v).sqrt()
    }
}

/// Point on a disk of the given radius from polar coordinates.
///
/// Radius is taken linearly from `r_radius`, so samples cluster near the
/// center, matching the lens model the scene was tuned with.
pub fn polar_disk(r_angle: f64, r_radius: f64, radius: f64) -> Vec3 {
    let angle = 2.0 * PI * r_angle;
    let r = r_radius * radius;
    Vec3::new(angle.cos() * r, angle.sin() * r, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_gen_f64_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let x = gen_f64(&mut rng);
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn test_cosine_hemisphere_stays_above_surface() {
        let mut rng = StdRng::seed_from_u64(1);
        let n = Vec3::new(0.3, -0.8, 0.1).normalize();
        for _ in 0..1000 {
            let d = cosine_hemisphere(n, gen_f64(&mut rng), gen_f64(&mut rng));
            assert!(d.dot(n) >= -1e-12);
            assert!((d.length() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_cosine_hemisphere_mean_cosine() {
        // E[cos] under a cosine-weighted density is 2/3
        let mut rng = StdRng::seed_from_u64(2);
        let n = Vec3::Y;
        let count = 20_000;
        let sum: f64 = (0..count)
            .map(|_| cosine_hemisphere(n, gen_f64(&mut rng), gen_f64(&mut rng)).dot(n))
            .sum();
        assert!((sum / count as f64 - 2.0 / 3.0).abs() < 0.01);
    }

    #[test]
    fn test_uniform_cone_within_cone() {
        let mut rng = StdRng::seed_from_u64(3);
        let axis = Vec3::new(0.0, 1.0, 1.0).normalize();
        let cos_a_max = 0.95;
        for _ in 0..1000 {
            let d = uniform_cone(axis, cos_a_max, gen_f64(&mut rng), gen_f64(&mut rng));
            assert!(d.dot(axis) >= cos_a_max - 1e-9);
        }
    }

    #[test]
    fn test_cone_solid_angle() {
        assert!((cone_solid_angle(-1.0) - 4.0 * PI).abs() < 1e-12);
        assert!((cone_solid_angle(0.0) - 2.0 * PI).abs() < 1e-12);
        assert_eq!(cone_solid_angle(1.0), 0.0);
    }

    #[test]
    fn test_tent_range_and_center() {
        assert_eq!(tent(0.0), -1.0);
        assert_eq!(tent(1.0), 0.0);
        assert!(tent(1.999_999) < 1.0);
        assert!(tent(0.5) < 0.0 && tent(1.5) > 0.0);
        // Symmetric around the pixel center
        assert!((tent(0.5) + tent(1.5)).abs() < 1e-12);
    }

    #[test]
    fn test_polar_disk_radius() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..1000 {
            let p = polar_disk(gen_f64(&mut rng), gen_f64(&mut rng), 2.0);
            assert!(p.truncate().length() <= 2.0);
            assert_eq!(p.z, 0.0);
        }
        assert_eq!(polar_disk(0.3, 0.7, 0.0), Vec3::ZERO);
    }
}
