//! Path integrator.
//!
//! Traces a single path through the scene iteratively, multiplying the
//! attenuation of every scatter until the path escapes to the sky, is
//! absorbed, or runs out of bounces.

use sphaera_core::{Color, Sphere};
use sphaera_math::{Interval, Ray};

use crate::hittable::scene_intersect;
use crate::material::Scatter;
use crate::rng::UniformSource;

/// Maximum number of scene intersections per path.
pub const MAX_BOUNCES: u32 = 16;

/// Lower bound on hit distance, avoiding self-intersection (shadow acne).
pub const T_MIN: f32 = 0.001;

/// Compute the radiance estimate carried by one path.
///
/// Exhausting the bounce limit returns the attenuation gathered so far.
/// A path absorbed on its very first hit carries no light.
pub fn shade<S: UniformSource + ?Sized>(primary: &Ray, spheres: &[Sphere], rng: &mut S) -> Color {
    let ray_t = Interval::new(T_MIN, f32::MAX);
    let mut ray = *primary;
    let mut attenuation: Option<Color> = None;

    for _ in 0..MAX_BOUNCES {
        let Some(hit) = scene_intersect(&ray, ray_t, spheres) else {
            attenuation = Some(compose(attenuation, sky_gradient(&ray)));
            break;
        };

        let material = spheres[hit.sphere_index].material();
        match material.scatter(&ray, &hit, rng) {
            Some(result) => {
                attenuation = Some(compose(attenuation, result.attenuation));
                ray = result.scattered;
            }
            None => break,
        }
    }

    attenuation.unwrap_or(Color::ZERO)
}

/// First contribution is assigned, later ones multiply.
#[inline]
fn compose(current: Option<Color>, factor: Color) -> Color {
    match current {
        Some(color) => color * factor,
        None => factor,
    }
}

/// Background gradient, white looking straight down to blue looking straight up.
pub fn sky_gradient(ray: &Ray) -> Color {
    let a = 0.5 * (ray.direction().y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}
