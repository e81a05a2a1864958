//! Whole-image rendering: configuration and the parallel bucket driver.

use std::time::Instant;

use rayon::prelude::*;

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::{
    ImageBuffer, RenderError, RenderResult, RenderStats, Supersampling, World,
    MAX_SUPERSAMPLING_LEVEL,
};

/// Render configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Cast shadow rays towards each light
    pub shadows: bool,
    /// Spawn mirror rays from reflective materials
    pub reflections: bool,
    /// Samples per pixel and how they are chosen
    pub supersampling: Supersampling,
    /// Seed for sub-sample jitter
    pub seed: u64,
    /// Jitter sub-samples beyond the 2x2 grid
    pub jitter: bool,
    /// Side of the square tiles rendered in parallel
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            shadows: true,
            reflections: true,
            supersampling: Supersampling::default(),
            seed: 0,
            jitter: true,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> RenderResult<()> {
        if !self.supersampling.is_valid() {
            return Err(RenderError::InvalidSupersampling {
                level: self.supersampling.level,
                max: MAX_SUPERSAMPLING_LEVEL,
            });
        }
        Ok(())
    }
}

/// A finished render.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub image: ImageBuffer,
    pub stats: RenderStats,
}

/// Render the whole image, buckets in parallel.
///
/// Either every pixel is written or an error is returned; no partial image
/// escapes.
pub fn render(world: &World) -> RenderResult<RenderOutput> {
    let config = world.config();
    config.validate()?;

    let viewport = world.viewport();
    let (width, height) = (viewport.width(), viewport.height());

    if world.lights().is_empty() {
        log::warn!("Scene has no lights; only the background and reflections will show");
    }

    let buckets = generate_buckets(width, height, config.bucket_size);
    log::info!(
        "Rendering {}x{} ({} primitives, {} lights) in {} buckets, supersampling {} level {}",
        width,
        height,
        world.primitive_count(),
        world.lights().len(),
        buckets.len(),
        config.supersampling.mode,
        config.supersampling.level
    );

    let start = Instant::now();
    let results = buckets
        .par_iter()
        .map(|bucket| render_bucket(bucket, world))
        .collect::<RenderResult<Vec<BucketResult>>>()?;

    let mut image = ImageBuffer::new(width, height);
    let mut stats = RenderStats::default();
    for result in results {
        for ((i, j), colour) in result.bucket.pixels().zip(result.pixels) {
            image.set_colour(i, j, colour)?;
        }
        stats.merge(&result.stats);
    }

    log::info!("Render finished in {:.2?}", start.elapsed());
    Ok(RenderOutput { image, stats })
}
