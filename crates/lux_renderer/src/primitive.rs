//! Closed set of shapes the scene is built from.

use crate::{hittable::Hittable, Ray, Sphere, Surface, Triangle};
use lux_math::{Interval, Vec3};

/// A scene primitive: one intersection dispatch over every shape kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Sphere(Sphere),
    Triangle(Triangle),
}

impl Primitive {
    /// Distance used to push a totally reflected ray off the surface.
    /// Triangles are never refractive, so they report zero.
    pub fn escape_offset(&self) -> f64 {
        match self {
            Primitive::Sphere(sphere) => sphere.radius(),
            Primitive::Triangle(_) => 0.0,
        }
    }
}

impl Hittable for Primitive {
    #[inline]
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<f64> {
        match self {
            Primitive::Sphere(sphere) => sphere.hit(ray, ray_t),
            Primitive::Triangle(triangle) => triangle.hit(ray, ray_t),
        }
    }

    #[inline]
    fn outward_normal(&self, p: Vec3) -> Vec3 {
        match self {
            Primitive::Sphere(sphere) => sphere.outward_normal(p),
            Primitive::Triangle(triangle) => triangle.outward_normal(p),
        }
    }

    #[inline]
    fn surface(&self) -> &Surface {
        match self {
            Primitive::Sphere(sphere) => sphere.surface(),
            Primitive::Triangle(triangle) => triangle.surface(),
        }
    }
}

impl From<Sphere> for Primitive {
    fn from(sphere: Sphere) -> Self {
        Primitive::Sphere(sphere)
    }
}

impl From<Triangle> for Primitive {
    fn from(triangle: Triangle) -> Self {
        Primitive::Triangle(triangle)
    }
}
