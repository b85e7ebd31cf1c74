//! Sphaera Renderer - progressive CPU path tracing over sphere scenes.
//!
//! Each pass traces one jittered sample per pixel and adds it to a
//! persistent accumulation buffer; the displayable image is derived from
//! that buffer at any point, so partially converged frames are always valid.
//!
//! The host drives the render through [`ProgressiveRenderer::run_one_pass`]
//! until the configured sample cap is reached.

mod bucket;
mod buffer;
mod camera;
mod error;
mod hittable;
mod integrator;
mod kernel;
mod material;
mod progressive;
mod rng;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use buffer::{AccumulationBuffer, DisplayBuffer};
pub use camera::{make_camera, Camera, CameraParams};
pub use error::{RenderError, Result};
pub use hittable::{scene_intersect, HitRecord, Hittable};
pub use integrator::{linear_to_gamma, shade, sky_gradient, MAX_BOUNCES, T_MIN};
pub use kernel::{render_pass, sample_pixel, PassParams};
pub use material::{reflect, refract, schlick, Scatter, ScatterResult};
pub use progressive::{PassReport, ProgressiveRenderer, RenderSettings, RenderState};
pub use rng::{
    random_in_unit_disk, random_in_unit_sphere, PixelRng, UniformSource, MAX_REJECTION_ATTEMPTS,
};

/// Re-export scene types from sphaera_core
pub use sphaera_core::{Color, Material, Scene, Sphere};

/// Re-export Vec3 and common math types from sphaera_math
pub use sphaera_math::{Interval, Ray, Vec2, Vec3};
