//! traceify renderer - CPU Whitted ray tracing
//!
//! Spheres and planes grouped under clusters and bounding volume hierarchies,
//! Phong shading with hard shadows and mirror reflections, and adaptive
//! supersampling. Images are rendered in parallel buckets.

mod bucket;
mod bvh;
mod cluster;
mod error;
mod hittable;
mod image_buffer;
mod light;
mod material;
mod plane;
mod renderer;
mod sampling;
mod sphere;
mod viewport;
mod world;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use bvh::BvhNode;
pub use cluster::Cluster;
pub use error::{GeometryError, RenderError, RenderResult};
pub use hittable::{Hit, Hittable, SceneObject, Shadable};
pub use image_buffer::ImageBuffer;
pub use light::Light;
pub use material::Material;
pub use plane::{Plane, BBOX_EPS};
pub use renderer::{render, RenderConfig, RenderOutput};
pub use sampling::{
    RenderStats, SampleAccumulator, Supersampling, SupersamplingMode, MAX_SUPERSAMPLING_LEVEL,
    VARIANCE_THRESHOLDS,
};
pub use sphere::Sphere;
pub use viewport::{Camera, Viewport};
pub use world::{World, MAX_TRACE_DEPTH, REFLECTION_EPS, SHADOW_EPS};

/// Re-export common math types from traceify_math
pub use traceify_math::{Aabb, Color, Interval, Ray, Rgb8, Vec3};
