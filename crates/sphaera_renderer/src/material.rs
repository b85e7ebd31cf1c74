//! Scattering behavior for each material variant.

use sphaera_core::{Color, Material};
use sphaera_math::{Ray, Vec3};

use crate::hittable::HitRecord;
use crate::rng::{random_in_unit_sphere, UniformSource};

/// Result of a successful scatter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterResult {
    /// Color multiplied into the path throughput
    pub attenuation: Color,
    /// Outgoing ray leaving the hit point
    pub scattered: Ray,
}

/// Surfaces that redirect an incoming ray.
pub trait Scatter {
    /// Scatter an incoming ray.
    ///
    /// Returns `None` if the ray is absorbed.
    fn scatter<S: UniformSource + ?Sized>(
        &self,
        ray_in: &Ray,
        hit: &HitRecord,
        rng: &mut S,
    ) -> Option<ScatterResult>;
}

impl Scatter for Material {
    fn scatter<S: UniformSource + ?Sized>(
        &self,
        ray_in: &Ray,
        hit: &HitRecord,
        rng: &mut S,
    ) -> Option<ScatterResult> {
        match *self {
            Material::Diffuse { .. } => {
                let target = hit.point + hit.normal + random_in_unit_sphere(rng);
                let mut direction = target - hit.point;

                // Catch degenerate scatter direction
                if direction.length_squared() < 1e-8 {
                    direction = hit.normal;
                }

                Some(ScatterResult {
                    attenuation: self.attenuation(),
                    scattered: Ray::new(hit.point, direction),
                })
            }
            Material::Metal { fuzz, .. } => {
                let direction =
                    reflect(ray_in.direction(), hit.normal) + fuzz * random_in_unit_sphere(rng);

                // Below the surface means absorbed
                (direction.dot(hit.normal) > 0.0).then(|| ScatterResult {
                    attenuation: self.attenuation(),
                    scattered: Ray::new(hit.point, direction),
                })
            }
            Material::Dielectric { refractive_index } => Some(ScatterResult {
                attenuation: self.attenuation(),
                scattered: Ray::new(
                    hit.point,
                    dielectric_direction(ray_in.direction(), hit.normal, refractive_index, rng),
                ),
            }),
        }
    }
}

/// Pick reflection or refraction through a dielectric boundary.
fn dielectric_direction<S: UniformSource + ?Sized>(
    unit_direction: Vec3,
    outward_normal: Vec3,
    refractive_index: f32,
    rng: &mut S,
) -> Vec3 {
    let d_dot_n = unit_direction.dot(outward_normal);
    let exiting = d_dot_n > 0.0;

    // Normal facing against the incoming ray
    let (facing_normal, ratio) = if exiting {
        (-outward_normal, refractive_index)
    } else {
        (outward_normal, 1.0 / refractive_index)
    };

    let refracted = refract(unit_direction, facing_normal, ratio);
    if refracted.length_squared() <= 0.0 {
        // Total internal reflection
        return reflect(unit_direction, outward_normal);
    }

    // Schlick wants the angle on the outside of the sphere
    let cosine = if exiting {
        -refracted.dot(facing_normal)
    } else {
        -d_dot_n
    };

    if rng.next_float() < schlick(cosine, refractive_index) {
        reflect(unit_direction, outward_normal)
    } else {
        refracted
    }
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface with normal `n` facing against it.
///
/// Returns the zero vector on total internal reflection.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, eta_ratio: f32) -> Vec3 {
    let dt = uv.dot(n);
    let discriminant = 1.0 - eta_ratio * eta_ratio * (1.0 - dt * dt);
    if discriminant > 0.0 {
        eta_ratio * (uv - n * dt) - n * discriminant.sqrt()
    } else {
        Vec3::ZERO
    }
}

/// Schlick's approximation for Fresnel reflectance.
#[inline]
pub fn schlick(cosine: f32, refractive_index: f32) -> f32 {
    let r0 = ((1.0 - refractive_index) / (1.0 + refractive_index)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}
