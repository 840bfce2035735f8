//! Sphere primitive for ray tracing.

use crate::{hittable::Hittable, Ray, Surface};
use lux_math::{Interval, Vec3};

/// A sphere primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f64,
    surface: Surface,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f64, surface: Surface) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            surface,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Hittable for Sphere {
    /// Solves `t² - 2bt + |C-O|² - r² = 0` with `b = (C-O)·D`, which holds
    /// for unit-length directions.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<f64> {
        let c2o = self.center - ray.origin;
        let b = c2o.dot(ray.direction);
        let discriminant = b * b - c2o.length_squared() + self.radius * self.radius;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let near = b - sqrtd;
        if ray_t.surrounds(near) {
            return Some(near);
        }
        let far = b + sqrtd;
        if ray_t.surrounds(far) {
            return Some(far);
        }
        None
    }

    fn outward_normal(&self, p: Vec3) -> Vec3 {
        (p - self.center).normalize()
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }
}
