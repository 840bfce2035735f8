//! Monte Carlo radiance estimator.
//!
//! Recursive path tracing over diffuse, mirror and glass surfaces:
//! - Russian roulette once a path exceeds `max_depth` bounces, or on black
//!   surfaces, with survivors rescaled by `1/p`
//! - Explicit sampling of the spherical light on diffuse hits; emission is
//!   then suppressed on the following bounce so direct light is counted once
//! - Schlick-weighted glass, evaluating both branches near the camera and
//!   picking one by roulette deeper in the path

use crate::hittable::{HitRecord, Hittable};
use crate::material::{reflect, schlick_reflectance, IOR_AIR, IOR_GLASS};
use crate::sampling::{cone_solid_angle, cosine_hemisphere, gen_f64, uniform_cone};
use crate::{Color, MaterialKind, Ray, RenderConfig, Scene};
use lux_math::Vec3;
use rand::RngCore;
use std::f64::consts::FRAC_1_PI;

/// Radiance returned by rays that leave the scene.
pub const BACKGROUND: Color = Color::ZERO;

/// Estimate the radiance arriving along `ray`.
///
/// `depth` is the number of bounces already taken (0 for camera rays).
/// `include_emission` is false right after a diffuse bounce, whose direct
/// lighting was already added by light sampling.
pub fn radiance(
    ray: &Ray,
    scene: &Scene,
    depth: u32,
    include_emission: bool,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let depth = depth + 1;

    let Some(hit) = scene.intersect(ray) else {
        return BACKGROUND;
    };

    let surface = hit.surface();
    let emission = if include_emission {
        surface.emission
    } else {
        Color::ZERO
    };

    // Russian roulette on the maximum reflectivity
    let mut albedo = surface.albedo;
    let p = albedo.max_element();
    if depth > config.max_depth || p == 0.0 {
        if gen_f64(rng) < p {
            albedo /= p;
        } else {
            return emission;
        }
    }

    match surface.material {
        MaterialKind::Diffuse => {
            let nl = hit.facing_normal;
            let d = cosine_hemisphere(nl, gen_f64(rng), gen_f64(rng));
            let direct = sample_light(scene, &hit, albedo, rng);
            let indirect = radiance(&Ray::new(hit.p, d), scene, depth, false, config, rng);

            emission + direct + albedo * indirect
        }
        MaterialKind::Specular => {
            let reflected = Ray::normalized(hit.p, reflect(ray.direction, hit.normal));
            surface.emission + albedo * radiance(&reflected, scene, depth, true, config, rng)
        }
        MaterialKind::Refractive => {
            surface.emission + albedo * refract(ray, &hit, depth, scene, config, rng)
        }
    }
}

/// Direct lighting at a diffuse hit from one sample of the light's cone.
fn sample_light(scene: &Scene, hit: &HitRecord, albedo: Color, rng: &mut dyn RngCore) -> Color {
    let light = scene.light();
    let to_light = light.center() - hit.p;
    let dist_sq = to_light.length_squared();
    if dist_sq <= light.radius() * light.radius() {
        return Color::ZERO;
    }

    // Cone of directions subtended by the light
    let cos_a_max = (1.0 - light.radius() * light.radius() / dist_sq).sqrt();
    let l = uniform_cone(to_light.normalize(), cos_a_max, gen_f64(rng), gen_f64(rng));

    if !scene.light_visible(&Ray::new(hit.p, l)) {
        return Color::ZERO;
    }

    let cos_theta = l.dot(hit.facing_normal).max(0.0);
    let omega = cone_solid_angle(cos_a_max);

    // Constant Lambertian BRDF 1/π
    albedo * light.surface().emission * (cos_theta * omega * FRAC_1_PI)
}

/// Incoming radiance through a glass interface, before the albedo tint.
fn refract(
    ray: &Ray,
    hit: &HitRecord,
    depth: u32,
    scene: &Scene,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let n = hit.normal;
    let nl = hit.facing_normal;
    let reflect_dir = reflect(ray.direction, n);

    let into = hit.front_face;
    let nnt = if into {
        IOR_AIR / IOR_GLASS
    } else {
        IOR_GLASS / IOR_AIR
    };
    let ddn = ray.direction.dot(nl);
    let cos2t = 1.0 - nnt * nnt * (1.0 - ddn * ddn);

    // Total internal reflection
    if cos2t <= 0.0 {
        return radiance(&escape_ray(reflect_dir, hit), scene, depth, true, config, rng);
    }

    let sign = if into { 1.0 } else { -1.0 };
    let tdir: Vec3 = (ray.direction * nnt - n * (sign * (ddn * nnt + cos2t.sqrt()))).normalize();

    // Cosine on the air side of the interface
    let cos_theta = if into { -ddn } else { tdir.dot(n) };
    let re = schlick_reflectance(cos_theta, IOR_AIR, IOR_GLASS);
    let tr = 1.0 - re;

    let reflected = Ray::normalized(hit.p, reflect_dir);
    let transmitted = Ray::new(hit.p, tdir);

    if depth < config.split_depth {
        radiance(&reflected, scene, depth, true, config, rng) * re
            + radiance(&transmitted, scene, depth, true, config, rng) * tr
    } else {
        let p = 0.25 + 0.5 * re;
        if gen_f64(rng) < p {
            radiance(&reflected, scene, depth, true, config, rng) * (re / p)
        } else {
            radiance(&transmitted, scene, depth, true, config, rng) * (tr / (1.0 - p))
        }
    }
}

/// Totally reflected ray, restarted outside the primitive it was trapped in.
fn escape_ray(direction: Vec3, hit: &HitRecord) -> Ray {
    Ray::normalized(hit.p + hit.normal * hit.primitive.escape_offset(), direction)
}
