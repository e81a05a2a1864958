//! Error types for scene construction and rendering.
//!
//! A ray missing everything is not an error; it is an `Option::None` from the
//! intersection routines. These types only cover misuse: authoring mistakes in
//! the scene and out-of-range access at the image boundary.

use thiserror::Error;

/// Errors raised while building scene geometry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Can't create a BVH node with an empty object list")]
    EmptyBvh,

    #[error("Cannot get the bounding box of an unbounded {shape}")]
    Unbounded { shape: &'static str },
}

/// Errors raised while rendering or writing an image.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Pixel ({i}, {j}) is out of the {width}x{height} image")]
    PixelOutOfRange {
        i: u32,
        j: u32,
        width: u32,
        height: u32,
    },

    #[error("Supersampling level {level} is not supported (expected 1..={max})")]
    InvalidSupersampling { level: u32, max: u32 },

    #[error("Image buffer holds {len} pixels, expected {width}x{height}")]
    BufferSize { width: u32, height: u32, len: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;
