//! Hittable trait and HitRecord for ray-object intersection.

use crate::{Primitive, Ray, Surface};
use lux_math::{Interval, Vec3};

/// Minimum hit distance. Hits closer than this are discarded so a bounce
/// ray does not re-intersect the surface it leaves.
pub const EPSILON: f64 = 1e-4;

/// Parameter range searched by every scene query.
pub const HIT_RANGE: Interval = Interval::new(EPSILON, f64::INFINITY);

/// Trait for shapes that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Distance to the nearest intersection strictly inside `ray_t`.
    ///
    /// `ray.direction` must be unit length.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<f64>;

    /// Geometric normal at a point on the surface, pointing outwards.
    fn outward_normal(&self, p: Vec3) -> Vec3;

    /// Shading attributes of the shape.
    fn surface(&self) -> &Surface;
}

/// Record of a ray-object intersection.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Point of intersection
    pub p: Vec3,
    /// Outward geometric normal
    pub normal: Vec3,
    /// Normal flipped to face the incoming ray
    pub facing_normal: Vec3,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
    /// Index of the primitive in its scene
    pub index: usize,
    pub primitive: &'a Primitive,
}

impl<'a> HitRecord<'a> {
    /// Build a record for a hit at parameter `t` on `primitive`.
    pub fn new(ray: &Ray, t: f64, index: usize, primitive: &'a Primitive) -> Self {
        let p = ray.at(t);
        let normal = primitive.outward_normal(p);

        // If the ray and normal point in the same direction, we're inside
        let front_face = normal.dot(ray.direction) <= 0.0;
        let facing_normal = if front_face { normal } else { -normal };

        Self {
            t,
            p,
            normal,
            facing_normal,
            front_face,
            index,
            primitive,
        }
    }

    /// Shading attributes at the hit.
    #[inline]
    pub fn surface(&self) -> &'a Surface {
        self.primitive.surface()
    }
}
