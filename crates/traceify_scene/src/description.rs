//! Serializable scene description.
//!
//! A `SceneDescription` is plain data: image size, camera, render options,
//! lights and a tree of objects. It maps one-to-one onto the renderer's
//! `World`; see [`crate::loader`] for the conversion.

use serde::{Deserialize, Serialize};

/// Root of a scene file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    /// Scene name (defaults to the file stem when loaded from disk)
    #[serde(default)]
    pub name: String,

    pub image: ImageSettings,

    pub camera: CameraDescription,

    /// Colour returned by rays that hit nothing
    #[serde(default)]
    pub background: [f64; 3],

    #[serde(default)]
    pub render: RenderOptions,

    #[serde(default)]
    pub lights: Vec<LightDescription>,

    #[serde(default)]
    pub objects: Vec<ObjectDescription>,
}

/// Output resolution in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageSettings {
    pub width: u32,
    pub height: u32,
}

/// Pinhole camera placement.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraDescription {
    pub position: [f64; 3],

    /// Width of the sensor rectangle in scene units
    pub sensor_width: f64,

    /// Distance from the camera to the sensor
    pub focal_distance: f64,

    /// Yaw applied after construction, in degrees
    #[serde(default)]
    pub rotate_y_degrees: f64,

    /// Pitch applied after the yaw, in degrees
    #[serde(default)]
    pub rotate_x_degrees: f64,
}

/// Sample count selection mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingMode {
    #[default]
    Adaptive,
    Uniform,
}

/// Renderer switches stored with the scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub shadows: bool,
    pub reflections: bool,
    /// Supersampling level, 1 (single ray) to 4 (8x8)
    pub supersampling: u32,
    pub mode: SamplingMode,
    pub jitter: bool,
    pub seed: u64,
    pub bucket_size: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            shadows: true,
            reflections: true,
            supersampling: 2,
            mode: SamplingMode::Adaptive,
            jitter: true,
            seed: 0,
            bucket_size: 64,
        }
    }
}

/// A point light.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LightDescription {
    pub position: [f64; 3],
    #[serde(default = "white")]
    pub colour: [f64; 3],
}

/// Node of the object tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectDescription {
    Sphere {
        centre: [f64; 3],
        radius: f64,
        #[serde(default)]
        material: MaterialDescription,
    },
    /// Plane `r . normal + k = 0`
    Plane {
        normal: [f64; 3],
        k: f64,
        #[serde(default)]
        material: MaterialDescription,
    },
    /// Flat group culled by one bounding box
    Cluster { objects: Vec<ObjectDescription> },
    /// Objects organised into a bounding volume hierarchy
    Bvh { objects: Vec<ObjectDescription> },
}

impl ObjectDescription {
    pub fn kind(&self) -> &'static str {
        match self {
            ObjectDescription::Sphere { .. } => "sphere",
            ObjectDescription::Plane { .. } => "plane",
            ObjectDescription::Cluster { .. } => "cluster",
            ObjectDescription::Bvh { .. } => "bvh",
        }
    }
}

/// Surface description.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialDescription {
    #[serde(flatten)]
    pub shading: Shading,

    /// Mirror reflections tinted by the specular colour
    #[serde(default)]
    pub reflective: bool,
}

impl Default for MaterialDescription {
    fn default() -> Self {
        Self {
            shading: Shading::Diffuse {
                colour: [0.5, 0.5, 0.5],
                ambient: 0.1,
            },
            reflective: false,
        }
    }
}

/// Illumination model of a material.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum Shading {
    /// Flat colour, unaffected by lights
    Constant { colour: [f64; 3] },
    /// Lambertian plus ambient
    Diffuse {
        colour: [f64; 3],
        #[serde(default = "default_ambient")]
        ambient: f64,
    },
    /// Lambertian, ambient and a Blinn-Phong highlight
    Phong {
        colour: [f64; 3],
        specularity: f64,
        #[serde(default = "default_ambient")]
        ambient: f64,
        /// Highlight and reflection tint; white when omitted
        #[serde(default)]
        specular_colour: Option<[f64; 3]>,
    },
}

fn white() -> [f64; 3] {
    [1.0, 1.0, 1.0]
}

fn default_ambient() -> f64 {
    0.1
}
