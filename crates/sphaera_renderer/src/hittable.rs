//! Ray/sphere intersection and nearest-hit selection.

use sphaera_core::Sphere;
use sphaera_math::{Interval, Ray, Vec3};

/// Record of a ray-sphere intersection.
///
/// Produced and consumed within a single bounce; the sphere is referenced
/// by index into the scene list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Point of intersection
    pub point: Vec3,
    /// Outward unit surface normal
    pub normal: Vec3,
    /// Index of the hit sphere in the scene
    pub sphere_index: usize,
}

/// Objects that can be hit by rays.
pub trait Hittable {
    /// Test if a ray hits this object strictly within `ray_t`.
    ///
    /// The returned record carries `sphere_index` 0; callers scanning a scene
    /// replace it with the real index.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord>;
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        // Direction is unit length, so a == 1
        let oc = ray.origin() - self.center();
        let half_b = oc.dot(ray.direction());
        let c = oc.length_squared() - self.radius_squared();

        let discriminant = half_b * half_b - c;
        if discriminant <= 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Nearest root first
        let mut root = -half_b - sqrtd;
        if !ray_t.surrounds(root) {
            root = -half_b + sqrtd;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let point = ray.at(root);
        Some(HitRecord {
            t: root,
            point,
            normal: (point - self.center()).normalize(),
            sphere_index: 0,
        })
    }
}

/// Find the closest hit among `spheres` within `ray_t`.
///
/// Linear scan; the upper bound shrinks to the best hit found so far.
pub fn scene_intersect(ray: &Ray, ray_t: Interval, spheres: &[Sphere]) -> Option<HitRecord> {
    let mut closest: Option<HitRecord> = None;
    let mut closest_so_far = ray_t.max;

    for (index, sphere) in spheres.iter().enumerate() {
        if let Some(hit) = sphere.hit(ray, ray_t.with_max(closest_so_far)) {
            closest_so_far = hit.t;
            closest = Some(HitRecord {
                sphere_index: index,
                ..hit
            });
        }
    }

    closest
}
