//! Errors reported by the renderer's setup and pass entry points.
//!
//! Nothing inside the per-pixel kernel can fail; these cover invalid
//! configuration handed in by the host.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Image dimensions must be non-zero, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Sample cap must be at least one pass")]
    ZeroSampleCap,

    #[error("Bucket size must be non-zero")]
    ZeroBucketSize,

    #[error("Buffer is {actual_width}x{actual_height} but the pass renders {width}x{height}")]
    BufferSizeMismatch {
        width: u32,
        height: u32,
        actual_width: u32,
        actual_height: u32,
    },

    #[error("Vertical field of view must be in (0, 180) degrees, got {0}")]
    InvalidFov(f32),

    #[error("Aspect ratio must be positive and finite, got {0}")]
    InvalidAspect(f32),

    #[error("Lens radius must be non-negative and finite, got {0}")]
    InvalidLensRadius(f32),

    #[error("Camera eye and target coincide, or up is parallel to the view direction")]
    DegenerateView,
}

pub type Result<T> = std::result::Result<T, RenderError>;
