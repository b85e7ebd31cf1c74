//! The per-pass kernel: one jittered camera sample per pixel, traced and
//! added into the accumulation buffer.

use std::time::Instant;

use rayon::prelude::*;
use sphaera_core::{Color, Sphere};

use crate::bucket::{generate_buckets, render_bucket, BucketResult};
use crate::buffer::{AccumulationBuffer, DisplayBuffer};
use crate::camera::Camera;
use crate::error::{RenderError, Result};
use crate::integrator::shade;
use crate::rng::{PixelRng, UniformSource};

/// Everything a single pass needs besides the scene and the buffers.
#[derive(Debug, Clone, Copy)]
pub struct PassParams<'a> {
    pub width: u32,
    pub height: u32,
    pub camera: &'a Camera,
    /// Random seed for this pass
    pub seed: u64,
    /// Index of the pass being rendered (0 for the first)
    pub pass_index: u32,
    /// Tile edge length; does not affect the result
    pub bucket_size: u32,
}

/// Trace one sample for pixel (x, y).
///
/// The pixel center is jittered by up to one pixel in each direction, so
/// successive passes anti-alias. Row 0 is the top of the image.
pub fn sample_pixel(x: u32, y: u32, params: &PassParams, spheres: &[Sphere]) -> Color {
    let mut rng = PixelRng::for_pixel(params.seed, x, y, params.pass_index);

    let jitter = rng.next_float2() * 2.0 - 1.0;
    let s = (x as f32 + 0.5 + jitter.x) / params.width as f32;
    let t = 1.0 - (y as f32 + 0.5 + jitter.y) / params.height as f32;

    let ray = params.camera.generate_ray(s, t, &mut rng);
    shade(&ray, spheres, &mut rng)
}

fn check_buffer(params: &PassParams, width: u32, height: u32) -> Result<()> {
    if width != params.width || height != params.height {
        return Err(RenderError::BufferSizeMismatch {
            width: params.width,
            height: params.height,
            actual_width: width,
            actual_height: height,
        });
    }
    Ok(())
}

/// Render one pass over the full pixel grid.
///
/// Buckets are traced in parallel; their samples are merged into `accum`
/// only after every bucket has finished, then `display` is refreshed.
pub fn render_pass(
    params: &PassParams,
    spheres: &[Sphere],
    accum: &mut AccumulationBuffer,
    display: &mut DisplayBuffer,
) -> Result<()> {
    if params.width == 0 || params.height == 0 {
        return Err(RenderError::InvalidDimensions {
            width: params.width,
            height: params.height,
        });
    }
    if params.bucket_size == 0 {
        return Err(RenderError::ZeroBucketSize);
    }
    check_buffer(params, accum.width(), accum.height())?;
    check_buffer(params, display.width(), display.height())?;

    let start = Instant::now();
    let buckets = generate_buckets(params.width, params.height, params.bucket_size);

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| render_bucket(bucket, params, spheres))
        .collect();

    for result in &results {
        for (x, y, color) in result.iter_pixels() {
            accum.add_sample(x, y, color);
        }
    }

    accum.resolve_into(display)?;

    log::debug!(
        "Pass {} finished: {} buckets in {:?}",
        params.pass_index,
        results.len(),
        start.elapsed()
    );

    Ok(())
}
