//! Sphaera Core - scene data for the sphere path tracer.
//!
//! This crate provides:
//!
//! - **Materials**: `Material`, a tagged value type embedded in each sphere
//! - **Geometry**: `Sphere`, stored with a pre-squared radius
//! - **Scenes**: `Scene`, an ordered, index-addressable sphere list, and
//!   `SceneBuilder`, which generates the procedural showcase scene
//!
//! # Example
//!
//! ```
//! use sphaera_core::{SceneBuilder, SceneParams};
//!
//! let scene = SceneBuilder::new(SceneParams::seeded(7)).build_showcase()?;
//! assert!(scene.len() >= 4);
//! # Ok::<(), sphaera_core::SceneError>(())
//! ```

pub mod error;
pub mod material;
pub mod scene;
pub mod sphere;

// Re-export commonly used types
pub use error::{Result, SceneError};
pub use material::{Color, Material, MaterialKind};
pub use scene::{MaterialCounts, Scene, SceneBuilder, SceneParams};
pub use sphere::Sphere;
