//! Camera for primary ray generation.
//!
//! Pixels are split into 2x2 subpixels. Each sample is jittered with a tent
//! filter, pushed forward into the box and optionally perturbed by a thin
//! lens for depth of field.

use crate::sampling::{gen_f64, polar_disk, tent};
use crate::Ray;
use lux_math::Vec3;
use rand::RngCore;

/// Camera for generating rays into the scene.
#[derive(Debug, Clone)]
pub struct Camera {
    // Image settings
    pub image_width: u32,
    pub image_height: u32,

    // Camera positioning
    origin: Vec3,
    direction: Vec3,

    /// Half-extent of the image plane at unit distance
    fov_scale: f64,
    /// Distance rays are advanced so they start inside the box
    start_distance: f64,

    // Lens settings
    aperture: f64,       // Lens radius, 0 disables depth of field
    focal_distance: f64, // Distance from lens to plane of perfect focus

    // Cached computed values (set by initialize())
    cx: Vec3,
    cy: Vec3,
}

impl Camera {
    /// Create a new camera with the default Cornell box framing.
    pub fn new() -> Self {
        Self {
            image_width: 1024,
            image_height: 768,
            origin: Vec3::new(50.0, 52.0, 295.6),
            direction: Vec3::new(0.0, -0.042612, -1.0).normalize(),
            fov_scale: 0.5135,
            start_distance: 130.0,
            aperture: 2.0,
            focal_distance: 65.0,
            cx: Vec3::X,
            cy: Vec3::Y,
        }
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set camera position and viewing direction.
    pub fn with_position(mut self, origin: Vec3, direction: Vec3) -> Self {
        self.origin = origin;
        self.direction = direction.normalize();
        self
    }

    /// Set lens settings. An aperture of zero gives a pinhole camera.
    pub fn with_lens(mut self, aperture: f64, focal_distance: f64) -> Self {
        self.aperture = aperture.max(0.0);
        self.focal_distance = focal_distance;
        self
    }

    /// Set the image plane scale and the distance rays are advanced.
    pub fn with_projection(mut self, fov_scale: f64, start_distance: f64) -> Self {
        self.fov_scale = fov_scale;
        self.start_distance = start_distance;
        self
    }

    /// Initialize the camera (must be called before generating rays).
    pub fn initialize(&mut self) {
        let aspect = self.image_width as f64 / self.image_height.max(1) as f64;

        // Image edge vectors for pixel sampling. The horizontal edge is world X
        // unless the view looks along X, where it is taken level with the floor.
        let horizontal = if self.direction.cross(Vec3::X).length_squared() > 1e-12 {
            Vec3::X
        } else {
            self.direction.cross(Vec3::Y).normalize()
        };
        self.cx = horizontal * (aspect * self.fov_scale);
        self.cy = self.cx.cross(self.direction).normalize() * self.fov_scale;
    }

    /// Generate a ray for subpixel (sx, sy) of pixel (x, y).
    ///
    /// `y` counts scanlines from the bottom of the image.
    pub fn get_ray(&self, x: u32, y: u32, sx: u32, sy: u32, rng: &mut dyn RngCore) -> Ray {
        // Transform uniform into non-uniform filter samples
        let dx = tent(2.0 * gen_f64(rng));
        let dy = tent(2.0 * gen_f64(rng));

        let ray = self.pinhole_ray(x, y, sx, sy, dx, dy);
        if self.aperture > 0.0 {
            let r_angle = gen_f64(rng);
            let r_radius = gen_f64(rng);
            self.thin_lens(ray, r_angle, r_radius)
        } else {
            ray
        }
    }

    /// Primary ray before the lens is applied, for filter offsets `dx, dy`.
    pub fn pinhole_ray(&self, x: u32, y: u32, sx: u32, sy: u32, dx: f64, dy: f64) -> Ray {
        let fx = (x as f64 + (sx as f64 + 0.5 + dx) / 2.0) / self.image_width as f64 - 0.5;
        let fy = (y as f64 + (sy as f64 + 0.5 + dy) / 2.0) / self.image_height as f64 - 0.5;
        let dir = self.cx * fx + self.cy * fy + self.direction;

        // Extend camera ray to start inside box
        let start = self.origin + dir * self.start_distance;
        Ray::normalized(start, dir)
    }

    /// Move the origin to a point on the lens and re-aim the ray so it
    /// passes through the same point on the focal plane.
    pub fn thin_lens(&self, ray: Ray, r_angle: f64, r_radius: f64) -> Ray {
        let offset = polar_disk(r_angle, r_radius, self.aperture);
        Ray::normalized(
            ray.origin + offset,
            ray.direction * self.focal_distance - offset,
        )
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
