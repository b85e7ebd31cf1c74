//! Surface materials.
//!
//! A material is a plain value embedded directly in its sphere, so a whole
//! scene is one contiguous list with no shared ownership. Scattering lives
//! in the renderer; this module only describes the surface.

use sphaera_math::Vec3;

/// Color type alias (linear RGB, typically 0-1)
pub type Color = Vec3;

/// How light interacts with a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Lambertian-like diffuse surface. `albedo` is the attenuation.
    Diffuse { albedo: Color },

    /// Specular reflector. `fuzz` in [0, 1] jitters the reflected direction.
    Metal { albedo: Color, fuzz: f32 },

    /// Clear refractive surface (glass, water, diamond).
    ///
    /// Attenuation is always white; `refractive_index` > 1 controls the
    /// reflect/refract split.
    Dielectric { refractive_index: f32 },
}

/// Discriminant of a [`Material`], for statistics and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialKind {
    Diffuse,
    Metal,
    Dielectric,
}

impl Material {
    /// Create a diffuse material with the given albedo color.
    pub fn diffuse(albedo: Color) -> Self {
        Material::Diffuse { albedo }
    }

    /// Create a metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough (clamped)
    pub fn metal(albedo: Color, fuzz: f32) -> Self {
        Material::Metal {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    /// Create a dielectric material.
    ///
    /// - `refractive_index`: 1.0 = air, 1.5 = glass, 2.4 = diamond
    pub fn dielectric(refractive_index: f32) -> Self {
        Material::Dielectric { refractive_index }
    }

    /// Which variant this is.
    pub fn kind(&self) -> MaterialKind {
        match self {
            Material::Diffuse { .. } => MaterialKind::Diffuse,
            Material::Metal { .. } => MaterialKind::Metal,
            Material::Dielectric { .. } => MaterialKind::Dielectric,
        }
    }

    /// Attenuation applied on a successful scatter.
    ///
    /// Dielectrics never tint light, so they report white.
    pub fn attenuation(&self) -> Color {
        match *self {
            Material::Diffuse { albedo } | Material::Metal { albedo, .. } => albedo,
            Material::Dielectric { .. } => Color::ONE,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Material::diffuse(Color::splat(0.5)) // Grey default
    }
}
