//! Thin-lens camera for ray generation.

use sphaera_math::{Ray, Vec3};

use crate::error::{RenderError, Result};
use crate::rng::{random_in_unit_disk, UniformSource};

/// Inputs for building a [`Camera`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraParams {
    /// Eye position
    pub eye: Vec3,
    /// Look-at point; also the plane of perfect focus
    pub target: Vec3,
    /// Approximate up direction
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub vfov: f32,
    /// Image width divided by height
    pub aspect: f32,
    /// Lens radius; 0 gives a pinhole camera
    pub lens_radius: f32,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            eye: Vec3::new(13.0, 2.0, 3.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            vfov: 20.0,
            aspect: 16.0 / 9.0,
            lens_radius: 0.05,
        }
    }
}

/// Immutable camera: an orthonormal basis plus an image-plane description.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    origin: Vec3,
    lens_radius: f32,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
}

impl Camera {
    /// Build a camera, focusing on the look-at target.
    pub fn new(params: CameraParams) -> Result<Self> {
        let CameraParams {
            eye,
            target,
            up,
            vfov,
            aspect,
            lens_radius,
        } = params;

        if !(vfov > 0.0 && vfov < 180.0) {
            return Err(RenderError::InvalidFov(vfov));
        }
        if !(aspect.is_finite() && aspect > 0.0) {
            return Err(RenderError::InvalidAspect(aspect));
        }
        if !(lens_radius.is_finite() && lens_radius >= 0.0) {
            return Err(RenderError::InvalidLensRadius(lens_radius));
        }

        let w = (eye - target).try_normalize().ok_or(RenderError::DegenerateView)?;
        let u = up.cross(w).try_normalize().ok_or(RenderError::DegenerateView)?;
        let v = w.cross(u);

        let half_height = (vfov.to_radians() / 2.0).tan();
        let half_width = aspect * half_height;
        let focus_dist = eye.distance(target);

        let lower_left_corner = eye
            - half_width * focus_dist * u
            - half_height * focus_dist * v
            - focus_dist * w;

        Ok(Self {
            origin: eye,
            lens_radius,
            u,
            v,
            w,
            lower_left_corner,
            horizontal: 2.0 * half_width * focus_dist * u,
            vertical: 2.0 * half_height * focus_dist * v,
        })
    }

    /// Generate a ray through normalized image-plane coordinates (s, t).
    ///
    /// (0, 0) is the lower-left corner, (1, 1) the upper-right.
    pub fn generate_ray<S: UniformSource + ?Sized>(&self, s: f32, t: f32, rng: &mut S) -> Ray {
        let rd = self.lens_radius * random_in_unit_disk(rng);
        let offset = self.u * rd.x + self.v * rd.y;

        Ray::new(
            self.origin + offset,
            self.lower_left_corner + s * self.horizontal + t * self.vertical - self.origin - offset,
        )
    }

    /// The eye position.
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn lens_radius(&self) -> f32 {
        self.lens_radius
    }

    /// Backward view axis (points from the target toward the eye).
    pub fn w(&self) -> Vec3 {
        self.w
    }
}

/// Build a camera from loose parameters.
pub fn make_camera(
    eye: Vec3,
    target: Vec3,
    up: Vec3,
    vfov: f32,
    aspect: f32,
    lens_radius: f32,
) -> Result<Camera> {
    Camera::new(CameraParams {
        eye,
        target,
        up,
        vfov,
        aspect,
        lens_radius,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{PixelRng, UniformSource};

    #[test]
    fn test_camera_basis() {
        let camera = make_camera(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y, 90.0, 1.0, 0.0)
            .unwrap();

        assert!((camera.w() - Vec3::Z).length() < 1e-6);
        assert!((camera.u - Vec3::X).length() < 1e-6);
        assert!((camera.v - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn test_center_ray_hits_target() {
        let camera = make_camera(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y, 40.0, 1.5, 0.0)
            .unwrap();
        let mut rng = PixelRng::from_seed(3);

        let ray = camera.generate_ray(0.5, 0.5, &mut rng);
        assert!((ray.direction() - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_corners_span_field_of_view() {
        let camera = make_camera(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y, 90.0, 2.0, 0.0)
            .unwrap();
        let mut rng = PixelRng::from_seed(3);

        // 90 degree vfov: top edge at 45 degrees up
        let top = camera.generate_ray(0.5, 1.0, &mut rng).direction();
        assert!((top - Vec3::new(0.0, 1.0, -1.0).normalize()).length() < 1e-5);

        let lower_left = camera.generate_ray(0.0, 0.0, &mut rng).direction();
        assert!((lower_left - Vec3::new(-2.0, -1.0, -1.0).normalize()).length() < 1e-5);
    }

    #[test]
    fn test_pinhole_origin_is_eye() {
        let eye = Vec3::new(13.0, 2.0, 3.0);
        let camera = make_camera(eye, Vec3::ZERO, Vec3::Y, 20.0, 1.5, 0.0).unwrap();

        for seed in 0..200 {
            let mut rng = PixelRng::from_seed(seed);
            let st = rng.next_float2();
            let ray = camera.generate_ray(st.x, st.y, &mut rng);
            assert_eq!(ray.origin(), eye);
        }
    }

    #[test]
    fn test_lens_offsets_stay_on_disk() {
        let eye = Vec3::new(0.0, 0.0, 5.0);
        let camera = make_camera(eye, Vec3::ZERO, Vec3::Y, 30.0, 1.0, 0.25).unwrap();

        let mut moved = false;
        for seed in 0..200 {
            let mut rng = PixelRng::from_seed(seed);
            let ray = camera.generate_ray(0.5, 0.5, &mut rng);
            let offset = ray.origin() - eye;
            assert!(offset.length() < 0.25 + 1e-6);
            assert!(offset.z.abs() < 1e-6);
            moved |= offset.length() > 0.0;
        }
        assert!(moved);
    }

    #[test]
    fn test_invalid_params() {
        let base = CameraParams::default();

        assert_eq!(
            Camera::new(CameraParams { vfov: 180.0, ..base }),
            Err(RenderError::InvalidFov(180.0))
        );
        assert_eq!(
            Camera::new(CameraParams { aspect: 0.0, ..base }),
            Err(RenderError::InvalidAspect(0.0))
        );
        assert_eq!(
            Camera::new(CameraParams { lens_radius: -1.0, ..base }),
            Err(RenderError::InvalidLensRadius(-1.0))
        );
        assert_eq!(
            Camera::new(CameraParams { target: base.eye, ..base }),
            Err(RenderError::DegenerateView)
        );
        assert_eq!(
            Camera::new(CameraParams {
                eye: Vec3::new(0.0, 5.0, 0.0),
                target: Vec3::ZERO,
                up: Vec3::Y,
                ..base
            }),
            Err(RenderError::DegenerateView)
        );
    }
}
