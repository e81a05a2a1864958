//! Math primitives for traceify: vectors, intervals, bounding boxes, rays and colour.

// Re-export glam for convenience
pub use glam::DVec3;

/// 3-D vector used throughout the renderer (double precision).
pub type Vec3 = DVec3;

mod aabb;
mod color;
mod interval;
mod ray;

pub use aabb::Aabb;
pub use color::{Color, Rgb8};
pub use interval::Interval;
pub use ray::Ray;
