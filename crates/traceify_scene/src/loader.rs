//! Scene file loading and conversion to a renderable `World`.

use std::path::Path;

use thiserror::Error;
use traceify_math::{Color, Vec3};
use traceify_renderer::{
    BvhNode, Cluster, GeometryError, Light, Material, Plane, RenderConfig, RenderError,
    SceneObject, Sphere, Supersampling, SupersamplingMode, Viewport, World,
};

use crate::description::{
    LightDescription, MaterialDescription, ObjectDescription, RenderOptions, SamplingMode,
    SceneDescription, Shading,
};

/// Errors that can occur while loading a scene.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("Render settings error: {0}")]
    Render(#[from] RenderError),

    #[error("Invalid scene: {0}")]
    InvalidScene(String),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Read a scene description from a JSON file.
///
/// An unnamed scene takes the file stem as its name.
pub fn load_description<P: AsRef<Path>>(path: P) -> LoadResult<SceneDescription> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let mut desc = SceneDescription::from_json(&text)?;

    if desc.name.is_empty() {
        desc.name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unnamed")
            .to_string();
    }

    log::info!(
        "Loaded scene '{}' from {} ({} top-level objects, {} lights)",
        desc.name,
        path.display(),
        desc.objects.len(),
        desc.lights.len()
    );
    Ok(desc)
}

/// Load a JSON scene file and build the world it describes.
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<World> {
    load_description(path)?.build_world()
}

impl SceneDescription {
    pub fn from_json(text: &str) -> LoadResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> LoadResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check values the type system cannot.
    pub fn validate(&self) -> LoadResult<()> {
        if self.image.width == 0 || self.image.height == 0 {
            return Err(LoadError::InvalidScene(format!(
                "image size {}x{} has no pixels",
                self.image.width, self.image.height
            )));
        }
        if !(self.camera.sensor_width > 0.0) {
            return Err(LoadError::InvalidScene(format!(
                "sensor width must be positive, got {}",
                self.camera.sensor_width
            )));
        }
        if !(self.camera.focal_distance > 0.0) {
            return Err(LoadError::InvalidScene(format!(
                "focal distance must be positive, got {}",
                self.camera.focal_distance
            )));
        }
        self.render_config().validate()?;
        Ok(())
    }

    pub fn render_config(&self) -> RenderConfig {
        self.render.to_config()
    }

    /// Build the renderable world. Every object is converted and moved in.
    pub fn build_world(&self) -> LoadResult<World> {
        self.validate()?;

        let viewport = Viewport::new(
            self.image.width,
            self.image.height,
            self.camera.sensor_width,
            self.camera.focal_distance,
        );
        let mut world = World::new(
            viewport,
            Vec3::from_array(self.camera.position),
            Color::from(self.background),
        )
        .with_config(self.render_config());

        world.rotate_camera_y(self.camera.rotate_y_degrees.to_radians());
        world.rotate_camera_x(self.camera.rotate_x_degrees.to_radians());

        for object in &self.objects {
            world.add_object(object.to_scene_object()?);
        }
        for light in &self.lights {
            world.add_light(light.to_light());
        }

        if self.lights.is_empty() {
            log::warn!("Scene '{}' has no lights", self.name);
        }
        log::debug!(
            "Built world for '{}' with {} primitives",
            self.name,
            world.primitive_count()
        );
        Ok(world)
    }
}

impl RenderOptions {
    pub fn to_config(&self) -> RenderConfig {
        let mode = match self.mode {
            SamplingMode::Adaptive => SupersamplingMode::Adaptive,
            SamplingMode::Uniform => SupersamplingMode::Uniform,
        };
        RenderConfig {
            shadows: self.shadows,
            reflections: self.reflections,
            supersampling: Supersampling::new(self.supersampling, mode),
            seed: self.seed,
            jitter: self.jitter,
            bucket_size: self.bucket_size,
        }
    }
}

impl LightDescription {
    pub fn to_light(&self) -> Light {
        Light::new(Vec3::from_array(self.position), Color::from(self.colour))
    }
}

impl MaterialDescription {
    pub fn to_material(&self) -> Material {
        let material = match &self.shading {
            Shading::Constant { colour } => Material::constant(Color::from(*colour)),
            Shading::Diffuse { colour, ambient } => Material::diffuse(Color::from(*colour), *ambient),
            Shading::Phong {
                colour,
                specularity,
                ambient,
                specular_colour,
            } => Material::full(
                Color::from(*colour),
                specular_colour.map_or(Color::WHITE, Color::from),
                *specularity,
                *ambient,
            ),
        };

        if self.reflective {
            material.with_reflection()
        } else {
            material
        }
    }
}

impl ObjectDescription {
    /// Convert this node and its children into renderer objects.
    pub fn to_scene_object(&self) -> LoadResult<SceneObject> {
        match self {
            ObjectDescription::Sphere {
                centre,
                radius,
                material,
            } => {
                if !(*radius >= 0.0) {
                    return Err(LoadError::InvalidScene(format!(
                        "sphere radius must be non-negative, got {radius}"
                    )));
                }
                Ok(Sphere::new(Vec3::from_array(*centre), *radius, material.to_material()).into())
            }

            ObjectDescription::Plane { normal, k, material } => {
                let normal = Vec3::from_array(*normal);
                if normal.length_squared() == 0.0 {
                    return Err(LoadError::InvalidScene("plane normal is zero".to_string()));
                }
                Ok(Plane::new(normal, *k, material.to_material()).into())
            }

            ObjectDescription::Cluster { objects } => {
                let mut cluster = Cluster::new();
                for object in objects {
                    cluster.add_object(object.to_scene_object()?)?;
                }
                Ok(cluster.into())
            }

            ObjectDescription::Bvh { objects } => {
                let children = objects
                    .iter()
                    .map(ObjectDescription::to_scene_object)
                    .collect::<LoadResult<Vec<_>>>()?;
                Ok(BvhNode::build(children)?.into())
            }
        }
    }
}
