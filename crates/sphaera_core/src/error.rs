//! Errors raised while assembling a scene.

use thiserror::Error;

/// Errors that can occur while validating scene parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("Grid half extent must be positive, got {0}")]
    EmptyGrid(i32),

    #[error("Base sphere radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    #[error("Radius jitter {jitter} must be non-negative and smaller than the base radius {radius}")]
    InvalidJitter { radius: f32, jitter: f32 },
}

pub type Result<T> = std::result::Result<T, SceneError>;
