//! Host-side progressive rendering loop.
//!
//! [`ProgressiveRenderer`] owns the scene, camera, persistent buffers and
//! the pass counter. Each call to [`ProgressiveRenderer::run_one_pass`] does
//! one bounded pass of work, so any host loop (batch driver, timer, event
//! loop) can drive it.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sphaera_core::Scene;

use crate::bucket::DEFAULT_BUCKET_SIZE;
use crate::buffer::{AccumulationBuffer, DisplayBuffer};
use crate::camera::Camera;
use crate::error::{RenderError, Result};
use crate::kernel::{render_pass, PassParams};

/// Render configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    /// Samples per pixel at which rendering stops (one per pass)
    pub max_samples: u32,
    /// Tile edge length for parallel dispatch
    pub bucket_size: u32,
    /// Seed for per-pass seeds. `None` draws a fresh one per run.
    pub seed: Option<u64>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 640,
            height: 360,
            max_samples: 256,
            bucket_size: DEFAULT_BUCKET_SIZE,
            seed: None,
        }
    }
}

impl RenderSettings {
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.max_samples == 0 {
            return Err(RenderError::ZeroSampleCap);
        }
        if self.bucket_size == 0 {
            return Err(RenderError::ZeroBucketSize);
        }
        Ok(())
    }

    /// Width divided by height, for camera setup.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Pass counter. Starts at 0 and is advanced exactly once per completed
/// pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderState {
    passes_completed: u32,
}

impl RenderState {
    /// Number of completed passes, which is also the index of the next one.
    pub fn passes_completed(&self) -> u32 {
        self.passes_completed
    }

    fn advance(&mut self) {
        self.passes_completed += 1;
    }
}

/// Summary of one completed pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassReport {
    pub pass_index: u32,
    /// Samples per pixel accumulated so far, including this pass
    pub samples_per_pixel: u32,
    pub elapsed: Duration,
    /// True once the sample cap has been reached
    pub complete: bool,
}

/// Owns everything needed to render a scene progressively.
pub struct ProgressiveRenderer {
    settings: RenderSettings,
    camera: Camera,
    scene: Scene,
    accum: AccumulationBuffer,
    display: DisplayBuffer,
    state: RenderState,
    seeds: StdRng,
}

impl ProgressiveRenderer {
    pub fn new(settings: RenderSettings, camera: Camera, scene: Scene) -> Result<Self> {
        settings.validate()?;

        let seed = settings.seed.unwrap_or_else(rand::random);
        log::debug!("Render seed {}", seed);

        Ok(Self {
            accum: AccumulationBuffer::new(settings.width, settings.height)?,
            display: DisplayBuffer::new(settings.width, settings.height)?,
            settings,
            camera,
            scene,
            state: RenderState::default(),
            seeds: StdRng::seed_from_u64(seed),
        })
    }

    /// Render one more pass, unless the sample cap has been reached.
    ///
    /// Returns `Ok(None)` without doing any work once complete.
    pub fn run_one_pass(&mut self) -> Result<Option<PassReport>> {
        if self.is_complete() {
            return Ok(None);
        }

        let start = Instant::now();
        let pass_index = self.state.passes_completed();
        let params = PassParams {
            width: self.settings.width,
            height: self.settings.height,
            camera: &self.camera,
            seed: self.seeds.gen(),
            pass_index,
            bucket_size: self.settings.bucket_size,
        };

        render_pass(
            &params,
            self.scene.spheres(),
            &mut self.accum,
            &mut self.display,
        )?;
        self.state.advance();

        let report = PassReport {
            pass_index,
            samples_per_pixel: self.state.passes_completed(),
            elapsed: start.elapsed(),
            complete: self.is_complete(),
        };

        if report.complete {
            log::info!(
                "Reached {} samples per pixel, rendering complete",
                report.samples_per_pixel
            );
        }

        Ok(Some(report))
    }

    /// Run passes until the sample cap, calling `on_pass` after each one.
    pub fn run_to_completion<F>(&mut self, mut on_pass: F) -> Result<()>
    where
        F: FnMut(&PassReport, &DisplayBuffer),
    {
        while let Some(report) = self.run_one_pass()? {
            on_pass(&report, &self.display);
        }
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.state.passes_completed() >= self.settings.max_samples
    }

    /// Fraction of the sample cap reached, in [0, 1].
    pub fn progress(&self) -> f32 {
        self.state.passes_completed() as f32 / self.settings.max_samples as f32
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn accumulation(&self) -> &AccumulationBuffer {
        &self.accum
    }

    /// The current tone-mapped image, valid at any point mid-render.
    pub fn display(&self) -> &DisplayBuffer {
        &self.display
    }
}
