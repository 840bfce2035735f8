//! Lux math - vector algebra shared by the renderer crates.
//!
//! Everything is double precision. The Cornell box walls are spheres with a
//! radius of 1e5, far beyond what `f32` can intersect without acne.

// Re-export glam for convenience
pub use glam::{self, dvec3, DVec3};

/// Positions, directions and RGB colors all share one type.
pub type Vec3 = DVec3;

mod frame;
mod interval;
mod ray;

pub use frame::orthonormal_basis;
pub use interval::Interval;
pub use ray::Ray;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_creation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(a * b, Vec3::new(4.0, 10.0, 18.0));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
    }

    #[test]
    fn test_vec3_max_channel() {
        assert_eq!(Vec3::new(0.75, 0.25, 0.25).max_element(), 0.75);
        assert_eq!(Vec3::ZERO.max_element(), 0.0);
    }
}
