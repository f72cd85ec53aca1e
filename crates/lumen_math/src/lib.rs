//! Lumen math types.
//!
//! Re-exports `glam` and adds the small value types the tracer passes around.

// Re-export glam for convenience
pub use glam::*;

mod interval;
mod ray;

pub use interval::Interval;
pub use ray::Ray;

/// RGB color. Components are unclamped while shading accumulates light.
pub type Color = Vec3;
