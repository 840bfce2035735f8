//! Triangle primitive for ray tracing.
//!
//! Intersects the supporting plane first, then accepts the hit point if its
//! barycentric coordinates all fall inside [0, 1].

use crate::{hittable::Hittable, Ray, Surface};
use lux_math::{Interval, Vec3};

/// Determinants below this are treated as degenerate.
const DEGENERATE: f64 = 1e-12;

/// A triangle primitive given by one vertex and two edges.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    /// Vertices (p1 = p0 + edge_a, p2 = p0 + edge_b)
    p0: Vec3,
    p1: Vec3,
    p2: Vec3,
    /// Pre-computed face normal (unit length, zero if degenerate)
    normal: Vec3,
    /// Projection plane for the barycentric solve
    axes: (usize, usize),
    surface: Surface,
}

impl Triangle {
    /// Create a new triangle from an origin vertex and two edge vectors.
    pub fn new(p0: Vec3, edge_a: Vec3, edge_b: Vec3, surface: Surface) -> Self {
        let normal = edge_a.cross(edge_b).try_normalize().unwrap_or(Vec3::ZERO);

        Self {
            p0,
            p1: p0 + edge_a,
            p2: p0 + edge_b,
            normal,
            axes: projection_axes(normal),
            surface,
        }
    }

    /// Create a triangle from three vertices.
    pub fn from_vertices(v0: Vec3, v1: Vec3, v2: Vec3, surface: Surface) -> Self {
        Self::new(v0, v1 - v0, v2 - v0, surface)
    }

    pub fn vertices(&self) -> [Vec3; 3] {
        [self.p0, self.p1, self.p2]
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Barycentric coordinates (λ0, λ1, λ2) of a point in the triangle's
    /// plane, weighting p0, p1 and p2 respectively.
    ///
    /// The 2x2 system is solved in the coordinate plane that drops the
    /// normal's dominant axis, the projection with the largest area. Returns
    /// `None` for zero-area triangles.
    pub fn barycentric(&self, q: Vec3) -> Option<Vec3> {
        let (i, j) = self.axes;
        let (p0, p1, p2) = (self.p0, self.p1, self.p2);

        let det = (p0[i] - p2[i]) * (p1[j] - p2[j]) - (p0[j] - p2[j]) * (p1[i] - p2[i]);
        if det.abs() < DEGENERATE {
            return None;
        }

        let qi = q[i] - p2[i];
        let qj = q[j] - p2[j];
        let l0 = ((p1[j] - p2[j]) * qi + (p2[i] - p1[i]) * qj) / det;
        let l1 = ((p2[j] - p0[j]) * qi + (p0[i] - p2[i]) * qj) / det;

        Some(Vec3::new(l0, l1, 1.0 - l0 - l1))
    }
}

/// Pick the two axes that remain after dropping the normal's largest component.
fn projection_axes(normal: Vec3) -> (usize, usize) {
    let n = normal.abs();
    let dropped = if n.x >= n.y && n.x >= n.z {
        0
    } else if n.y >= n.z {
        1
    } else {
        2
    };
    ((dropped + 1) % 3, (dropped + 2) % 3)
}

impl Hittable for Triangle {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<f64> {
        let denom = ray.direction.dot(self.normal);

        // Ray is parallel to the plane (or the triangle is degenerate)
        if denom.abs() < DEGENERATE {
            return None;
        }

        let t = (self.p0 - ray.origin).dot(self.normal) / denom;
        if !ray_t.surrounds(t) {
            return None;
        }

        let lambda = self.barycentric(ray.at(t))?;
        let inside = (0.0..=1.0).contains(&lambda.x)
            && (0.0..=1.0).contains(&lambda.y)
            && (0.0..=1.0).contains(&lambda.z);

        inside.then_some(t)
    }

    fn outward_normal(&self, _p: Vec3) -> Vec3 {
        self.normal
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }
}
