//! traceify scene - scene files and built-in scenes.
//!
//! This crate provides:
//!
//! - **Scene description types**: `SceneDescription`, `ObjectDescription`,
//!   `MaterialDescription`, serialized as JSON with serde
//! - **Loading**: reading a scene file and building a renderer `World`
//! - **Presets**: a handful of scenes that need no file
//!
//! # Example
//!
//! ```ignore
//! use traceify_scene::load_scene;
//!
//! let world = load_scene("scenes/mirror_spheres.json")?;
//! let output = traceify_renderer::render(&world)?;
//! output.image.save("mirror_spheres.png")?;
//! ```

pub mod description;
pub mod loader;
pub mod presets;

// Re-export commonly used types
pub use description::{
    CameraDescription, ImageSettings, LightDescription, MaterialDescription, ObjectDescription,
    RenderOptions, SamplingMode, SceneDescription, Shading,
};
pub use loader::{load_description, load_scene, LoadError, LoadResult};
pub use presets::Preset;
