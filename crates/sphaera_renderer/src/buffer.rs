//! Persistent per-pixel buffers.
//!
//! The accumulation buffer holds a running radiance sum and sample weight
//! per pixel; the display buffer is the tone-mapped RGBA float image
//! derived from it.

use rayon::prelude::*;
use sphaera_core::Color;
use sphaera_math::{Interval, Vec4};

use crate::error::{RenderError, Result};
use crate::integrator::linear_to_gamma;

fn check_dimensions(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(RenderError::InvalidDimensions { width, height });
    }
    Ok(width as usize * height as usize)
}

/// Running sum of radiance (xyz) and sample weight (w) per pixel.
///
/// Never cleared during a render; sample counts only grow.
#[derive(Debug, Clone, PartialEq)]
pub struct AccumulationBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Vec4>,
}

impl AccumulationBuffer {
    /// Create an empty buffer (zero sum, zero weight everywhere).
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let len = check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![Vec4::ZERO; len],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        (y * self.width + x) as usize
    }

    /// Add one sample of `color` to pixel (x, y).
    #[inline]
    pub fn add_sample(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] += color.extend(1.0);
    }

    /// Sum of all radiance samples at (x, y).
    pub fn sum(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)].truncate()
    }

    /// Number of samples accumulated at (x, y).
    pub fn sample_count(&self, x: u32, y: u32) -> u32 {
        self.pixels[self.index(x, y)].w as u32
    }

    /// Mean radiance at (x, y), or black before the first sample.
    pub fn average(&self, x: u32, y: u32) -> Color {
        average(self.pixels[self.index(x, y)])
    }

    /// Tone-map every pixel into `display`: `sqrt(sum / count)` per channel.
    pub fn resolve_into(&self, display: &mut DisplayBuffer) -> Result<()> {
        if display.width != self.width || display.height != self.height {
            return Err(RenderError::BufferSizeMismatch {
                width: self.width,
                height: self.height,
                actual_width: display.width,
                actual_height: display.height,
            });
        }

        display
            .pixels
            .par_iter_mut()
            .zip(self.pixels.par_iter())
            .for_each(|(out, acc)| {
                let mean = average(*acc);
                *out = [
                    linear_to_gamma(mean.x),
                    linear_to_gamma(mean.y),
                    linear_to_gamma(mean.z),
                    1.0,
                ];
            });

        Ok(())
    }
}

#[inline]
fn average(acc: Vec4) -> Color {
    if acc.w > 0.0 {
        acc.truncate() / acc.w
    } else {
        Color::ZERO
    }
}

/// Tone-mapped RGBA float image, row-major with row 0 at the top.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayBuffer {
    width: u32,
    height: u32,
    pixels: Vec<[f32; 4]>,
}

impl DisplayBuffer {
    /// Create a new display buffer filled with opaque black.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let len = check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![[0.0, 0.0, 0.0, 1.0]; len],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> [f32; 4] {
        debug_assert!(x < self.width && y < self.height);
        self.pixels[(y * self.width + x) as usize]
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[[f32; 4]] {
        &self.pixels
    }

    /// Convert to 8-bit RGBA bytes (for display or saving).
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for pixel in &self.pixels {
            for channel in pixel {
                bytes.push((255.0 * Interval::UNIT.clamp(*channel) + 0.5) as u8);
            }
        }
        bytes
    }
}
