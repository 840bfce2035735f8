//! Lux Renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer for a closed Cornell box scene:
//! diffuse, mirror and glass surfaces, explicit sampling of a spherical
//! light, Russian roulette termination and a thin-lens camera.

mod camera;
mod error;
mod hittable;
mod image_buffer;
mod material;
mod primitive;
mod radiance;
mod renderer;
pub mod sampling;
mod scene;
mod sphere;
mod triangle;

pub use camera::Camera;
pub use error::{RenderError, RenderResult};
pub use hittable::{HitRecord, Hittable, EPSILON, HIT_RANGE};
pub use image_buffer::{color_to_rgb, to_gamma_u8, ImageBuffer, GAMMA};
pub use material::{
    reflect, schlick_reflectance, Color, MaterialKind, Surface, IOR_AIR, IOR_GLASS,
};
pub use primitive::Primitive;
pub use radiance::{radiance, BACKGROUND};
pub use renderer::{
    render, render_pixel, render_with_cancel, row_rng, RenderConfig, RenderStats, SUBPIXELS,
};
pub use scene::{Scene, SceneKind};
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Re-export the math types from lux_math
pub use lux_math::{Interval, Ray, Vec3};
