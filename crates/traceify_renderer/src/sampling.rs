//! Supersampling settings, per-pixel sample statistics and render counters.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use traceify_math::{Color, Vec3};

/// Highest supported supersampling level (8x8 = 64 samples per pixel).
pub const MAX_SUPERSAMPLING_LEVEL: u32 = 4;

/// Spread below which adaptive sampling accepts level `k`, indexed by `k - 2`.
pub const VARIANCE_THRESHOLDS: [f64; 2] = [0.01, 0.05];

/// How the per-pixel sample count is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SupersamplingMode {
    /// Start at 2x2 and refine noisy pixels up to the configured level.
    #[default]
    Adaptive,
    /// Always take the configured number of samples.
    Uniform,
}

impl fmt::Display for SupersamplingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SupersamplingMode::Adaptive => write!(f, "adaptive"),
            SupersamplingMode::Uniform => write!(f, "uniform"),
        }
    }
}

/// Supersampling level on a log scale: level 1 is a single centre ray and
/// level `k >= 2` is a `2^(k-1)` square grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Supersampling {
    pub level: u32,
    pub mode: SupersamplingMode,
}

impl Supersampling {
    pub fn new(level: u32, mode: SupersamplingMode) -> Self {
        Self { level, mode }
    }

    pub fn adaptive(level: u32) -> Self {
        Self::new(level, SupersamplingMode::Adaptive)
    }

    pub fn uniform(level: u32) -> Self {
        Self::new(level, SupersamplingMode::Uniform)
    }

    /// Level the first pass for each pixel is rendered at.
    pub fn first_level(&self) -> u32 {
        match self.mode {
            SupersamplingMode::Adaptive if self.level > 1 => 2,
            _ => self.level,
        }
    }

    pub fn is_valid(&self) -> bool {
        (1..=MAX_SUPERSAMPLING_LEVEL).contains(&self.level)
    }
}

impl Default for Supersampling {
    fn default() -> Self {
        Self::adaptive(2)
    }
}

/// Samples per side of the pixel grid at `level`.
pub fn grid_for_level(level: u32) -> u32 {
    1 << level.saturating_sub(1)
}

/// Whether sub-samples at `level` are jittered.
pub fn is_jittered(level: u32) -> bool {
    level > 2
}

/// Deterministic per-pixel RNG, independent of which thread renders the pixel.
pub fn pixel_rng(seed: u64, i: u32, j: u32) -> StdRng {
    let pixel = ((i as u64) << 32) | j as u64;
    StdRng::seed_from_u64(seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ pixel)
}

/// Uniform offset in `[-0.5, 0.5)` of a grid cell.
pub fn jitter_offset(rng: &mut StdRng) -> f64 {
    rng.gen::<f64>() - 0.5
}

/// Running mean and variance of colour samples.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleAccumulator {
    sum: Vec3,
    sum_sq: Vec3,
    count: u32,
}

impl SampleAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, sample: Color) {
        let x = sample.to_vec();
        self.sum += x;
        self.sum_sq += x * x;
        self.count += 1;
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn mean(&self) -> Color {
        if self.count == 0 {
            return Color::BLACK;
        }
        Color::from_vec(self.sum / self.count as f64)
    }

    /// Length of the per-channel variance vector `E[x^2] - E[x]^2`.
    pub fn spread(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        let n = self.count as f64;
        let mean = self.sum / n;
        (self.sum_sq / n - mean * mean).max(Vec3::ZERO).length()
    }
}

/// Count of pixels finished at each sample level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub single: u64,
    pub x4: u64,
    pub x16: u64,
    pub x64: u64,
}

impl RenderStats {
    /// Record one pixel accepted at `level`.
    pub fn record(&mut self, level: u32) {
        match level {
            0 | 1 => self.single += 1,
            2 => self.x4 += 1,
            3 => self.x16 += 1,
            _ => self.x64 += 1,
        }
    }

    pub fn merge(&mut self, other: &RenderStats) {
        self.single += other.single;
        self.x4 += other.x4;
        self.x16 += other.x16;
        self.x64 += other.x64;
    }

    pub fn total(&self) -> u64 {
        self.single + self.x4 + self.x16 + self.x64
    }

    /// Total primary rays traced.
    pub fn samples(&self) -> u64 {
        self.single + 4 * self.x4 + 16 * self.x16 + 64 * self.x64
    }

    pub fn log_summary(&self) {
        log::info!("--- traceify rendering statistics ---");
        log::info!("  pixels rendered @ x1  : {}", self.single);
        log::info!("  pixels rendered @ x4  : {}", self.x4);
        log::info!("  pixels rendered @ x16 : {}", self.x16);
        log::info!("  pixels rendered @ x64 : {}", self.x64);
        log::info!("  primary rays          : {}", self.samples());
    }
}
