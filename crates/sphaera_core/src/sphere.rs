//! Sphere primitive.

use sphaera_math::Vec3;

use crate::Material;

/// A sphere with an embedded material.
///
/// The radius is stored squared, which is the only form the intersection
/// test needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius_squared: f32,
    material: Material,
}

impl Sphere {
    /// Create a new sphere. Negative radii are treated as zero.
    pub fn new(center: Vec3, radius: f32, material: Material) -> Self {
        let radius = radius.max(0.0);
        Self {
            center,
            radius_squared: radius * radius,
            material,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        self.center
    }

    #[inline]
    pub fn radius_squared(&self) -> f32 {
        self.radius_squared
    }

    /// The radius, recovered with a square root. Not for hot paths.
    pub fn radius(&self) -> f32 {
        self.radius_squared.sqrt()
    }

    #[inline]
    pub fn material(&self) -> &Material {
        &self.material
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_is_stored_squared() {
        let sphere = Sphere::new(Vec3::ZERO, 0.5, Material::default());
        assert_eq!(sphere.radius_squared(), 0.25);
        assert_eq!(sphere.radius(), 0.5);
    }

    #[test]
    fn test_negative_radius_clamps_to_zero() {
        let sphere = Sphere::new(Vec3::ONE, -2.0, Material::default());
        assert_eq!(sphere.radius_squared(), 0.0);
    }
}
