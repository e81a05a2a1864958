//! The scene: objects, lights and camera, plus recursive Whitted shading.

use rand::rngs::StdRng;
use traceify_math::{Color, Ray, Vec3};

use crate::sampling::{
    grid_for_level, is_jittered, jitter_offset, pixel_rng, SampleAccumulator, VARIANCE_THRESHOLDS,
};
use crate::{
    Camera, Hit, Hittable, Light, RenderConfig, RenderError, RenderResult, RenderStats, SceneObject,
    Viewport, MAX_SUPERSAMPLING_LEVEL,
};

/// Offset along a reflected ray before intersections count.
pub const REFLECTION_EPS: f64 = 0.00001;
/// Offset along a shadow ray before occluders count.
pub const SHADOW_EPS: f64 = 0.00001;
/// Reflection rays are only spawned from hits shallower than this.
pub const MAX_TRACE_DEPTH: u32 = 3;

/// Everything needed to render one image.
///
/// The world owns its objects; `add_object` moves them in. It is never mutated
/// while rendering, so a `&World` can be shared across threads.
#[derive(Debug, Clone)]
pub struct World {
    objects: Vec<SceneObject>,
    lights: Vec<Light>,
    camera: Camera,
    viewport: Viewport,
    background: Color,
    config: RenderConfig,
}

impl World {
    pub fn new(viewport: Viewport, camera_position: Vec3, background: Color) -> Self {
        Self {
            objects: Vec::new(),
            lights: Vec::new(),
            camera: Camera::new(camera_position),
            viewport,
            background,
            config: RenderConfig::default(),
        }
    }

    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn add_object(&mut self, object: impl Into<SceneObject>) {
        self.objects.push(object.into());
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Pitch the camera by `theta` radians.
    pub fn rotate_camera_x(&mut self, theta: f64) {
        self.camera.rotate_x(theta);
    }

    /// Yaw the camera by `theta` radians.
    pub fn rotate_camera_y(&mut self, theta: f64) {
        self.camera.rotate_y(theta);
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut RenderConfig {
        &mut self.config
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn primitive_count(&self) -> usize {
        self.objects.iter().map(SceneObject::primitive_count).sum()
    }

    /// Nearest primitive hit with `t > t_min`; ties go to the earliest object.
    pub fn nearest_hit(&self, ray: &Ray, t_min: f64) -> Option<Hit<'_>> {
        self.objects
            .iter()
            .fold(None, |best, object| Hit::nearest(best, object.intersect(ray, t_min)))
    }

    /// True if something sits between `p` and the light. Hits at or past the
    /// light's distance are ignored, so a light enclosed by geometry still lights.
    pub fn in_shadow(&self, p: Vec3, light: &Light) -> bool {
        let shadow_ray = Ray::new(p, light.direction_from(p));
        let distance = light.distance_from(p);
        self.nearest_hit(&shadow_ray, SHADOW_EPS)
            .is_some_and(|hit| hit.t < distance)
    }

    /// Colour seen along `ray`, ignoring hits at or before `t_min`.
    pub fn trace_ray(&self, ray: &Ray, t_min: f64, depth: u32) -> Color {
        let Some(hit) = self.nearest_hit(ray, t_min) else {
            return self.background;
        };

        let p = ray.at(hit.t);
        let n = hit.object.surface_normal(p);
        let v = (ray.origin - p).normalize_or_zero();
        let material = hit.object.material();

        let mut colour = Color::BLACK;
        for light in &self.lights {
            if self.config.shadows && self.in_shadow(p, light) {
                continue;
            }
            let l = light.direction_from(p);
            colour += material.shade(light, n, v, l);
        }

        if self.config.reflections && material.is_reflective() && depth < MAX_TRACE_DEPTH {
            let d = ray.direction;
            let reflected = Ray::new(p, d - n * (2.0 * d.dot(n)));
            let reflected_colour = self.trace_ray(&reflected, REFLECTION_EPS, depth + 1);
            if !reflected_colour.is_black() {
                colour += reflected_colour * material.specular_colour();
            }
        }

        colour
    }

    /// Estimate the colour of pixel `(i, j)`, with `j = 0` the bottom row.
    ///
    /// Records the sample level the pixel was accepted at in `stats`.
    pub fn colour_for_pixel(&self, i: u32, j: u32, stats: &mut RenderStats) -> RenderResult<Color> {
        let (width, height) = (self.viewport.width(), self.viewport.height());
        if i >= width || j >= height {
            return Err(RenderError::PixelOutOfRange {
                i,
                j,
                width,
                height,
            });
        }

        let supersampling = self.config.supersampling;
        if !supersampling.is_valid() {
            return Err(RenderError::InvalidSupersampling {
                level: supersampling.level,
                max: MAX_SUPERSAMPLING_LEVEL,
            });
        }

        let mut rng = pixel_rng(self.config.seed, i, j);
        let mut level = supersampling.first_level();
        loop {
            let samples = self.sample_pixel(i, j, level, &mut rng);
            let spread = samples.spread();
            let smooth = level
                .checked_sub(2)
                .and_then(|k| VARIANCE_THRESHOLDS.get(k as usize))
                .is_some_and(|threshold| spread < *threshold);

            if smooth || level >= supersampling.level {
                stats.record(level);
                return Ok(samples.mean());
            }

            log::trace!("Pixel ({i}, {j}) spread {spread:.4} at level {level}, refining");
            level += 1;
        }
    }

    /// Trace a `grid x grid` set of primary rays through pixel `(i, j)`.
    fn sample_pixel(&self, i: u32, j: u32, level: u32, rng: &mut StdRng) -> SampleAccumulator {
        let grid = grid_for_level(level);
        let jitter = self.config.jitter && is_jittered(level);
        let focal_distance = self.viewport.focal_distance();

        let mut samples = SampleAccumulator::new();
        for a in 0..grid {
            for b in 0..grid {
                let (ju, jv) = if jitter {
                    (jitter_offset(rng), jitter_offset(rng))
                } else {
                    (0.0, 0.0)
                };
                let u = self.viewport.u_amount(i, grid, a, ju);
                let v = self.viewport.v_amount(j, grid, b, jv);
                let ray = self.camera.ray(focal_distance, u, v);
                samples.add(self.trace_ray(&ray, 0.0, 0));
            }
        }
        samples
    }
}
