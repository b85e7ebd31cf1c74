// Re-export glam for convenience
pub use glam::*;

// Sphaera math types
mod interval;
mod ray;
pub use interval::Interval;
pub use ray::Ray;
