//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that can be rendered
//! independently and in parallel using rayon.

use crate::{RenderResult, RenderStats, World};
use traceify_math::Color;

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// First pixel column of the bucket
    pub x: u32,
    /// First pixel row of the bucket (rows count up from the bottom)
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Pixel coordinates in row-major order within the bucket.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (self.y..self.y + self.height)
            .flat_map(move |j| (self.x..self.x + self.width).map(move |i| (i, j)))
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Generate buckets covering a `width x height` image, sorted centre-out.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let bucket_size = bucket_size.max(1);
    let mut buckets = Vec::new();

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, 0));
            x += bucket_size;
        }
        y += bucket_size;
    }

    sort_spiral(&mut buckets, width, height);

    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Sort buckets by distance of their centre from the image centre.
fn sort_spiral(buckets: &mut [Bucket], width: u32, height: u32) {
    let centre_x = width as f64 / 2.0;
    let centre_y = height as f64 / 2.0;
    let distance = |b: &Bucket| {
        let bx = b.x as f64 + b.width as f64 / 2.0;
        let by = b.y as f64 + b.height as f64 / 2.0;
        (bx - centre_x).powi(2) + (by - centre_y).powi(2)
    };

    buckets.sort_by(|a, b| distance(a).total_cmp(&distance(b)));
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Pixel colours in the order of `Bucket::pixels`
    pub pixels: Vec<Color>,
    /// Sample levels used by this bucket's pixels
    pub stats: RenderStats,
}

/// Render every pixel of one bucket.
pub fn render_bucket(bucket: &Bucket, world: &World) -> RenderResult<BucketResult> {
    let mut stats = RenderStats::default();
    let pixels = bucket
        .pixels()
        .map(|(i, j)| world.colour_for_pixel(i, j, &mut stats))
        .collect::<RenderResult<Vec<_>>>()?;

    log::debug!("Bucket {} done ({} pixels)", bucket.index, pixels.len());
    Ok(BucketResult {
        bucket: *bucket,
        pixels,
        stats,
    })
}
