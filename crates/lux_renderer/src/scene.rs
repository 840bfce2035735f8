//! Immutable scene: an ordered primitive list plus one spherical light.
//!
//! Two compiled-in Cornell boxes are provided, one built from huge spheres
//! and one from triangle pairs. [`SceneKind`] selects which one is rendered;
//! the two geometry sets are never mixed.

use crate::hittable::{HitRecord, Hittable, EPSILON, HIT_RANGE};
use crate::{Color, Primitive, Ray, Sphere, Surface, Triangle};
use lux_math::{Interval, Vec3};

/// Which compiled-in geometry set to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SceneKind {
    /// Walls are spheres of radius 1e5; includes a mirror and a glass ball.
    Spheres,
    /// Walls are triangle pairs; includes a diffuse cuboid.
    #[default]
    Triangles,
}

impl SceneKind {
    pub fn name(&self) -> &'static str {
        match self {
            SceneKind::Spheres => "spheres",
            SceneKind::Triangles => "triangles",
        }
    }
}

/// Read-only scene shared by every render worker.
#[derive(Debug, Clone)]
pub struct Scene {
    primitives: Vec<Primitive>,
    light: Sphere,
    light_index: usize,
}

impl Scene {
    /// Create a scene from its geometry and the light source.
    ///
    /// The light is appended to the primitive list so that camera rays and
    /// specular continuations can hit it like any other object.
    pub fn new(geometry: Vec<Primitive>, light: Sphere) -> Self {
        let mut primitives = geometry;
        let light_index = primitives.len();
        primitives.push(Primitive::Sphere(light.clone()));

        Self {
            primitives,
            light,
            light_index,
        }
    }

    /// Build one of the compiled-in scenes.
    pub fn build(kind: SceneKind) -> Self {
        let scene = match kind {
            SceneKind::Spheres => Self::cornell_spheres(),
            SceneKind::Triangles => Self::cornell_triangles(),
        };
        log::debug!(
            "Built {} scene with {} primitives",
            kind.name(),
            scene.primitive_count()
        );
        scene
    }

    /// The spherical light used by both compiled-in scenes.
    pub fn default_light() -> Sphere {
        Sphere::new(
            Vec3::new(50.0, 81.6 - 16.5, 81.6),
            1.5,
            Surface::emitter(Color::splat(400.0)),
        )
    }

    /// Cornell box whose walls are spheres large enough to look flat.
    pub fn cornell_spheres() -> Self {
        let wall = |center: Vec3, albedo: Color| -> Primitive {
            Sphere::new(center, 1e5, Surface::diffuse(albedo)).into()
        };
        let white = Color::splat(0.75);

        let geometry = vec![
            wall(Vec3::new(1e5 + 1.0, 40.8, 81.6), Color::new(0.75, 0.25, 0.25)), // Left
            wall(Vec3::new(-1e5 + 99.0, 40.8, 81.6), Color::new(0.25, 0.25, 0.75)), // Right
            wall(Vec3::new(50.0, 40.8, 1e5), white),                                // Back
            wall(Vec3::new(50.0, 40.8, -1e5 + 170.0), Color::ZERO),                // Front
            wall(Vec3::new(50.0, 1e5, 81.6), white),                                // Floor
            wall(Vec3::new(50.0, -1e5 + 81.6, 81.6), white),                        // Ceiling
            Sphere::new(
                Vec3::new(27.0, 16.5, 47.0),
                16.5,
                Surface::specular(Color::splat(0.999)),
            )
            .into(),
            Sphere::new(
                Vec3::new(73.0, 16.5, 78.0),
                16.5,
                Surface::refractive(Color::splat(0.999)),
            )
            .into(),
        ];

        Self::new(geometry, Self::default_light())
    }

    /// Cornell box made of triangle pairs with a diffuse cuboid inside.
    pub fn cornell_triangles() -> Self {
        let quad = |p0: Vec3, a: Vec3, b: Vec3, q0: Vec3, c: Vec3, d: Vec3, albedo: Color| {
            [
                Primitive::from(Triangle::new(p0, a, b, Surface::diffuse(albedo))),
                Primitive::from(Triangle::new(q0, c, d, Surface::diffuse(albedo))),
            ]
        };
        let v = Vec3::new;
        let white = Color::splat(0.75);

        let mut geometry = Vec::with_capacity(22);

        // Box walls
        geometry.extend(quad(
            v(0.0, 0.0, 0.0), v(100.0, 0.0, 0.0), v(0.0, 80.0, 0.0),
            v(100.0, 80.0, 0.0), v(-100.0, 0.0, 0.0), v(0.0, -80.0, 0.0),
            white,
        )); // Back
        geometry.extend(quad(
            v(0.0, 0.0, 170.0), v(100.0, 0.0, 0.0), v(0.0, 0.0, -170.0),
            v(100.0, 0.0, 0.0), v(-100.0, 0.0, 0.0), v(0.0, 0.0, 170.0),
            white,
        )); // Bottom
        geometry.extend(quad(
            v(0.0, 80.0, 0.0), v(100.0, 0.0, 0.0), v(0.0, 0.0, 170.0),
            v(100.0, 80.0, 170.0), v(-100.0, 0.0, 0.0), v(0.0, 0.0, -170.0),
            white,
        )); // Top
        geometry.extend(quad(
            v(0.0, 0.0, 170.0), v(0.0, 0.0, -170.0), v(0.0, 80.0, 0.0),
            v(0.0, 80.0, 0.0), v(0.0, 0.0, 170.0), v(0.0, -80.0, 0.0),
            Color::new(0.75, 0.25, 0.25),
        )); // Left
        geometry.extend(quad(
            v(100.0, 0.0, 0.0), v(0.0, 0.0, 170.0), v(0.0, 80.0, 0.0),
            v(100.0, 80.0, 170.0), v(0.0, 0.0, -170.0), v(0.0, -80.0, 0.0),
            Color::new(0.25, 0.25, 0.75),
        )); // Right
        geometry.extend(quad(
            v(100.0, 0.0, 170.0), v(-100.0, 0.0, 0.0), v(0.0, 80.0, 0.0),
            v(0.0, 80.0, 170.0), v(100.0, 0.0, 0.0), v(0.0, -80.0, 0.0),
            Color::ZERO,
        )); // Front, behind the camera

        // Cuboid in the room
        geometry.extend(quad(
            v(30.0, 0.0, 100.0), v(0.0, 0.0, -20.0), v(0.0, 40.0, 0.0),
            v(30.0, 40.0, 80.0), v(0.0, 0.0, 20.0), v(0.0, -40.0, 0.0),
            white,
        )); // Right
        geometry.extend(quad(
            v(10.0, 0.0, 80.0), v(0.0, 0.0, 20.0), v(0.0, 40.0, 0.0),
            v(10.0, 40.0, 100.0), v(0.0, 0.0, -20.0), v(0.0, -40.0, 0.0),
            white,
        )); // Left
        geometry.extend(quad(
            v(10.0, 0.0, 100.0), v(20.0, 0.0, 0.0), v(0.0, 40.0, 0.0),
            v(30.0, 40.0, 100.0), v(-20.0, 0.0, 0.0), v(0.0, -40.0, 0.0),
            white,
        )); // Front
        geometry.extend(quad(
            v(30.0, 0.0, 80.0), v(-20.0, 0.0, 0.0), v(0.0, 40.0, 0.0),
            v(10.0, 40.0, 80.0), v(20.0, 0.0, 0.0), v(0.0, -40.0, 0.0),
            white,
        )); // Back
        geometry.extend(quad(
            v(10.0, 40.0, 100.0), v(20.0, 0.0, 0.0), v(0.0, 0.0, -20.0),
            v(30.0, 40.0, 80.0), v(-20.0, 0.0, 0.0), v(0.0, 0.0, 20.0),
            white,
        )); // Top

        Self::new(geometry, Self::default_light())
    }

    /// All primitives, the light included.
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn light(&self) -> &Sphere {
        &self.light
    }

    /// Position of the light in [`Scene::primitives`].
    pub fn light_index(&self) -> usize {
        self.light_index
    }

    /// Number of primitives, the light included.
    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
    }

    /// Nearest hit with `t > EPSILON` among all primitives.
    pub fn intersect(&self, ray: &Ray) -> Option<HitRecord<'_>> {
        let mut closest: Option<(usize, f64)> = None;
        let mut closest_so_far = HIT_RANGE.max;

        for (index, primitive) in self.primitives.iter().enumerate() {
            if let Some(t) = primitive.hit(ray, Interval::new(HIT_RANGE.min, closest_so_far)) {
                closest = Some((index, t));
                closest_so_far = t;
            }
        }

        closest.map(|(index, t)| HitRecord::new(ray, t, index, &self.primitives[index]))
    }

    /// Does the ray hit the light source at all (occluders ignored)?
    pub fn hits_light(&self, ray: &Ray) -> bool {
        self.light.hit(ray, HIT_RANGE).is_some()
    }

    /// Does the ray reach the light source before any other primitive?
    pub fn light_visible(&self, ray: &Ray) -> bool {
        let Some(t_light) = self.light.hit(ray, HIT_RANGE) else {
            return false;
        };

        let blockers = Interval::new(EPSILON, t_light);
        !self
            .primitives
            .iter()
            .enumerate()
            .any(|(index, primitive)| index != self.light_index && primitive.hit(ray, blockers).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MaterialKind;

    fn small_light() -> Sphere {
        Sphere::new(Vec3::new(0.0, 10.0, 0.0), 1.0, Surface::emitter(Color::splat(10.0)))
    }

    #[test]
    fn test_light_is_registered_as_primitive() {
        let scene = Scene::new(Vec::new(), small_light());
        assert_eq!(scene.primitive_count(), 1);
        assert_eq!(scene.light_index(), 0);
        assert!(scene.primitives()[0].surface().is_emissive());
    }

    #[test]
    fn test_intersect_returns_nearest() {
        let near = Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, Surface::diffuse(Color::splat(0.5)));
        let far = Sphere::new(Vec3::new(0.0, 0.0, -10.0), 1.0, Surface::diffuse(Color::splat(0.5)));
        let scene = Scene::new(vec![far.into(), near.into()], small_light());

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let hit = scene.intersect(&ray).expect("should hit");
        assert_eq!(hit.index, 1);
        assert!((hit.t - 4.0).abs() < 1e-9);
        assert!((hit.p - Vec3::new(0.0, 0.0, -4.0)).length() < 1e-9);
        assert!(hit.front_face);
    }

    #[test]
    fn test_intersect_miss() {
        let scene = Scene::new(Vec::new(), small_light());
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, -1.0, 0.0));
        assert!(scene.intersect(&ray).is_none());
    }

    #[test]
    fn test_facing_normal_flips_inside() {
        let shell = Sphere::new(Vec3::ZERO, 50.0, Surface::diffuse(Color::splat(0.5)));
        let scene = Scene::new(vec![shell.into()], small_light());

        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));
        let hit = scene.intersect(&ray).expect("should hit shell");
        assert!(!hit.front_face);
        assert!((hit.normal - Vec3::X).length() < 1e-9);
        assert!((hit.facing_normal + Vec3::X).length() < 1e-9);
    }

    #[test]
    fn test_light_queries() {
        let blocker = Sphere::new(Vec3::new(0.0, 5.0, 0.0), 1.0, Surface::diffuse(Color::splat(0.5)));
        let scene = Scene::new(vec![blocker.into()], small_light());

        let up = Ray::new(Vec3::ZERO, Vec3::Y);
        assert!(scene.hits_light(&up));
        assert!(!scene.light_visible(&up));

        let beside = Ray::normalized(Vec3::new(3.0, 0.0, 0.0), Vec3::new(-3.0, 10.0, 0.0));
        assert!(scene.hits_light(&beside));
        assert!(scene.light_visible(&beside));

        let away = Ray::new(Vec3::ZERO, -Vec3::Y);
        assert!(!scene.hits_light(&away));
        assert!(!scene.light_visible(&away));
    }

    #[test]
    fn test_builtin_scenes() {
        let spheres = Scene::build(SceneKind::Spheres);
        assert_eq!(spheres.primitive_count(), 9);
        assert!(spheres
            .primitives()
            .iter()
            .any(|p| p.surface().material == MaterialKind::Refractive));

        let triangles = Scene::build(SceneKind::Triangles);
        assert_eq!(triangles.primitive_count(), 23);
        assert!(triangles
            .primitives()
            .iter()
            .all(|p| p.surface().material == MaterialKind::Diffuse));

        for scene in [&spheres, &triangles] {
            let emissive = scene
                .primitives()
                .iter()
                .filter(|p| p.surface().is_emissive())
                .count();
            assert_eq!(emissive, 1);
            assert!(scene.primitives()[scene.light_index()].surface().is_emissive());
        }
    }

    #[test]
    fn test_builtin_scenes_are_closed_towards_the_back() {
        // A ray from inside the box towards the back wall always hits something
        let ray = Ray::new(Vec3::new(50.0, 40.0, 150.0), Vec3::new(0.0, 0.0, -1.0));
        for kind in [SceneKind::Spheres, SceneKind::Triangles] {
            let scene = Scene::build(kind);
            assert!(scene.intersect(&ray).is_some(), "{} scene leaks", kind.name());
        }
    }
}
