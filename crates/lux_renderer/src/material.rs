//! Surface description and the perfect-reflection helpers.

use lux_math::Vec3;

/// Color type alias (RGB values, linear radiance)
pub type Color = Vec3;

/// Index of refraction outside every dielectric (air).
pub const IOR_AIR: f64 = 1.0;
/// Index of refraction of the glass material.
pub const IOR_GLASS: f64 = 1.5;

/// Transport rule applied when a path reaches a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaterialKind {
    /// Lambertian reflector; gets explicit light sampling.
    #[default]
    Diffuse,
    /// Perfect mirror.
    Specular,
    /// Smooth dielectric (glass) with Fresnel-weighted reflection and refraction.
    Refractive,
}

/// Shading attributes carried by every primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    /// Radiance emitted by the surface (zero for everything but the light)
    pub emission: Color,
    /// Fraction of light reflected per channel
    pub albedo: Color,
    pub material: MaterialKind,
}

impl Surface {
    /// Create a new surface.
    pub fn new(emission: Color, albedo: Color, material: MaterialKind) -> Self {
        Self {
            emission,
            albedo,
            material,
        }
    }

    /// A non-emitting diffuse surface.
    pub fn diffuse(albedo: Color) -> Self {
        Self::new(Color::ZERO, albedo, MaterialKind::Diffuse)
    }

    /// A non-emitting mirror.
    pub fn specular(albedo: Color) -> Self {
        Self::new(Color::ZERO, albedo, MaterialKind::Specular)
    }

    /// A non-emitting glass surface.
    pub fn refractive(albedo: Color) -> Self {
        Self::new(Color::ZERO, albedo, MaterialKind::Refractive)
    }

    /// A light emitter. It reflects nothing, so roulette always kills paths
    /// that reach it after their emission has been collected.
    pub fn emitter(emission: Color) -> Self {
        Self::new(emission, Color::ZERO, MaterialKind::Diffuse)
    }

    /// True if the surface emits any light.
    pub fn is_emissive(&self) -> bool {
        self.emission.max_element() > 0.0
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::diffuse(Color::ZERO)
    }
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Schlick's approximation of the Fresnel reflectance between media with
/// indices `nc` and `nt`. `cos_theta` is the cosine of the angle on the
/// less dense side of the interface.
#[inline]
pub fn schlick_reflectance(cos_theta: f64, nc: f64, nt: f64) -> f64 {
    let r0 = ((nt - nc) / (nt + nc)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cos_theta).powi(5)
}
