//! Render driver.
//!
//! Every pixel is split into 2x2 subpixels. Each subpixel averages
//! `samples_per_subpixel` radiance estimates, is clamped to [0, 1], and
//! contributes a quarter of the pixel color. Rows are rendered in parallel
//! with rayon; each row owns a generator seeded from its scanline index.

use crate::error::{RenderError, RenderResult};
use crate::radiance::radiance;
use crate::{Camera, Color, ImageBuffer, Scene};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Subpixels per pixel edge.
pub const SUBPIXELS: u32 = 2;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Radiance samples averaged per subpixel
    pub samples_per_subpixel: u32,
    /// Bounces before Russian roulette applies to every hit
    pub max_depth: u32,
    /// Glass hits at a depth below this evaluate both reflection and refraction
    pub split_depth: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_subpixel: 50,
            max_depth: 5,
            split_depth: 3,
        }
    }
}

impl RenderConfig {
    /// Camera rays traced per pixel.
    pub fn samples_per_pixel(&self) -> u64 {
        u64::from(self.samples_per_subpixel) * u64::from(SUBPIXELS * SUBPIXELS)
    }
}

/// Summary of a finished render.
#[derive(Debug, Clone, Copy)]
pub struct RenderStats {
    pub width: u32,
    pub height: u32,
    pub samples_per_pixel: u64,
    pub elapsed: Duration,
}

impl RenderStats {
    /// Camera rays traced per second.
    pub fn rays_per_second(&self) -> f64 {
        let rays = self.samples_per_pixel as f64 * self.width as f64 * self.height as f64;
        rays / self.elapsed.as_secs_f64().max(f64::EPSILON)
    }
}

impl fmt::Display for RenderStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} @ {} spp in {:.2?} ({:.0} camera rays/s)",
            self.width,
            self.height,
            self.samples_per_pixel,
            self.elapsed,
            self.rays_per_second()
        )
    }
}

/// Generator for one scanline, seeded from its index (counted from the bottom).
pub fn row_rng(y: u32) -> StdRng {
    StdRng::seed_from_u64(u64::from(y).pow(3))
}

/// Render a single pixel with 2x2 subpixel sampling.
///
/// `y` counts scanlines from the bottom of the image.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let inv_samples = 1.0 / config.samples_per_subpixel as f64;
    let subpixel_weight = 1.0 / (SUBPIXELS * SUBPIXELS) as f64;
    let mut pixel_color = Color::ZERO;

    for sy in 0..SUBPIXELS {
        for sx in 0..SUBPIXELS {
            let mut accumulated = Color::ZERO;
            for _ in 0..config.samples_per_subpixel {
                let ray = camera.get_ray(x, y, sx, sy, rng);
                accumulated += radiance(&ray, scene, 0, true, config, rng) * inv_samples;
            }
            pixel_color += accumulated.clamp(Color::ZERO, Color::ONE) * subpixel_weight;
        }
    }

    pixel_color
}

/// Render the entire scene to an image buffer.
pub fn render(camera: &Camera, scene: &Scene, config: &RenderConfig) -> RenderResult<ImageBuffer> {
    let cancel = AtomicBool::new(false);
    render_with_cancel(camera, scene, config, &cancel).map(|(image, _)| image)
}

/// Render the scene, skipping rows that have not started once `cancel` is set.
///
/// A cancelled render returns [`RenderError::Cancelled`].
pub fn render_with_cancel(
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
    cancel: &AtomicBool,
) -> RenderResult<(ImageBuffer, RenderStats)> {
    validate(camera, config)?;

    let width = camera.image_width;
    let height = camera.image_height;
    let mut image = ImageBuffer::new(width, height);
    let rows_done = AtomicUsize::new(0);

    log::info!(
        "Rendering {}x{} @ {} samples per subpixel ({} primitives)",
        width,
        height,
        config.samples_per_subpixel,
        scene.primitive_count()
    );
    let start = Instant::now();

    image
        .pixels
        .par_chunks_mut(width as usize)
        .enumerate()
        .for_each(|(row, pixels)| {
            if cancel.load(Ordering::Relaxed) {
                return;
            }

            // Image rows are stored top first, scanlines count from the bottom
            let y = height - 1 - row as u32;
            let mut rng = row_rng(y);
            for (x, pixel) in pixels.iter_mut().enumerate() {
                *pixel = render_pixel(camera, scene, x as u32, y, config, &mut rng);
            }

            let done = rows_done.fetch_add(1, Ordering::Relaxed) + 1;
            log::debug!("Row {} finished ({}/{})", y, done, height);
        });

    let rows_done = rows_done.into_inner();
    if rows_done < height as usize {
        log::warn!("Render cancelled after {} of {} rows", rows_done, height);
        return Err(RenderError::Cancelled {
            rows_done,
            rows: height as usize,
        });
    }

    let stats = RenderStats {
        width,
        height,
        samples_per_pixel: config.samples_per_pixel(),
        elapsed: start.elapsed(),
    };
    log::info!("Rendered {}", stats);

    Ok((image, stats))
}

fn validate(camera: &Camera, config: &RenderConfig) -> RenderResult<()> {
    if camera.image_width == 0 || camera.image_height == 0 {
        return Err(RenderError::InvalidDimensions {
            width: camera.image_width,
            height: camera.image_height,
        });
    }
    if config.samples_per_subpixel == 0 {
        return Err(RenderError::NoSamples);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SceneKind, Sphere, Surface, Triangle};
    use lux_math::Vec3;

    fn small_camera(width: u32, height: u32) -> Camera {
        let mut camera = Camera::new().with_resolution(width, height);
        camera.initialize();
        camera
    }

    fn quick_config(samples: u32) -> RenderConfig {
        RenderConfig {
            samples_per_subpixel: samples,
            ..RenderConfig::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = RenderConfig::default();
        assert_eq!(config.samples_per_subpixel, 50);
        assert_eq!(config.max_depth, 5);
        assert_eq!(config.split_depth, 3);
        assert_eq!(config.samples_per_pixel(), 200);
    }

    #[test]
    fn test_invalid_dimensions() {
        let scene = Scene::build(SceneKind::Triangles);
        let camera = small_camera(0, 4);
        let result = render(&camera, &scene, &quick_config(1));
        assert!(matches!(
            result,
            Err(RenderError::InvalidDimensions { width: 0, height: 4 })
        ));
    }

    #[test]
    fn test_zero_samples() {
        let scene = Scene::build(SceneKind::Triangles);
        let camera = small_camera(4, 4);
        let result = render(&camera, &scene, &quick_config(0));
        assert!(matches!(result, Err(RenderError::NoSamples)));
    }

    #[test]
    fn test_cancelled_before_start() {
        let scene = Scene::build(SceneKind::Triangles);
        let camera = small_camera(4, 3);
        let cancel = AtomicBool::new(true);

        let result = render_with_cancel(&camera, &scene, &quick_config(1), &cancel);
        assert!(matches!(
            result,
            Err(RenderError::Cancelled { rows_done: 0, rows: 3 })
        ));
    }

    #[test]
    fn test_render_pixel_is_reproducible_per_row() {
        let scene = Scene::build(SceneKind::Spheres);
        let camera = small_camera(16, 12);
        let config = quick_config(2);

        let a = render_pixel(&camera, &scene, 7, 5, &config, &mut row_rng(5));
        let b = render_pixel(&camera, &scene, 7, 5, &config, &mut row_rng(5));
        assert_eq!(a, b);
    }

    #[test]
    fn test_render_small_image() {
        let _ = env_logger::builder().is_test(true).try_init();

        for kind in [SceneKind::Spheres, SceneKind::Triangles] {
            let scene = Scene::build(kind);
            let camera = small_camera(8, 6);
            let config = quick_config(2);

            let (image, stats) =
                render_with_cancel(&camera, &scene, &config, &AtomicBool::new(false)).unwrap();
            assert_eq!(image.pixels.len(), 48);
            assert_eq!(stats.samples_per_pixel, 8);
            assert!(image
                .pixels
                .iter()
                .all(|c| c.min_element() >= 0.0 && c.max_element() <= 1.0));
            assert!(image.pixels.iter().any(|c| c.max_element() > 0.0));

            // Rows own their generators, so thread scheduling does not matter
            let again = render(&camera, &scene, &config).unwrap();
            assert_eq!(image.pixels, again.pixels);
        }
    }

    #[test]
    fn test_shadowed_floor_is_darker() {
        let floor = Triangle::new(
            Vec3::new(-100.0, 0.0, -100.0),
            Vec3::new(300.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 300.0),
            Surface::diffuse(Color::splat(0.75)),
        );
        // Sits exactly between the light and the floor at x = 10
        let blocker = Sphere::new(Vec3::new(5.0, 5.0, 0.0), 2.5, Surface::diffuse(Color::splat(0.75)));
        let light = Sphere::new(Vec3::new(0.0, 10.0, 0.0), 1.0, Surface::emitter(Color::splat(400.0)));
        let scene = Scene::new(vec![floor.into(), blocker.into()], light);
        let config = quick_config(64);

        let look_down_at = |x: f64| {
            let mut camera = Camera::new()
                .with_resolution(1, 1)
                .with_position(Vec3::new(x, 1.0, 0.0), -Vec3::Y)
                .with_lens(0.0, 1.0)
                .with_projection(0.01, 0.0);
            camera.initialize();
            render(&camera, &scene, &config).unwrap().get(0, 0)
        };

        let lit = look_down_at(-10.0);
        let shadowed = look_down_at(10.0);

        assert!(lit.x > 0.5, "lit floor too dark: {lit:?}");
        assert!(lit.x > shadowed.x + 0.3, "lit {lit:?} vs shadowed {shadowed:?}");
    }
}
