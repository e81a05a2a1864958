//! Point lights.

use traceify_math::{Color, Vec3};

/// A point light source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub colour: Color,
}

impl Light {
    pub fn new(position: Vec3, colour: Color) -> Self {
        Self { position, colour }
    }

    /// Unit vector from `p` towards the light (zero if `p` is the light position).
    pub fn direction_from(&self, p: Vec3) -> Vec3 {
        (self.position - p).normalize_or_zero()
    }

    /// Distance from `p` to the light.
    pub fn distance_from(&self, p: Vec3) -> f64 {
        (self.position - p).length()
    }
}
