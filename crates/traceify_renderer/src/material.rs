//! Surface reflectance parameters and the local illumination model.

use crate::Light;
use traceify_math::{Color, Vec3};

/// Per-object reflectance parameters.
///
/// A specularity of `0.0` means no specular highlight is computed. Reflective
/// materials spawn mirror rays tinted by `specular_colour`.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    diffuse: bool,
    ambient: f64,
    specularity: f64,
    colour: Color,
    specular_colour: Color,
    reflective: bool,
}

impl Material {
    /// Constant colour: full ambient, no diffuse or specular shading.
    pub fn constant(colour: Color) -> Self {
        Self {
            diffuse: false,
            ambient: 1.0,
            specularity: 0.0,
            colour,
            specular_colour: Color::BLACK,
            reflective: false,
        }
    }

    /// Diffuse + ambient, no specular term.
    pub fn diffuse(colour: Color, ambient: f64) -> Self {
        Self {
            diffuse: true,
            ambient,
            ..Self::constant(colour)
        }
    }

    /// Diffuse + specular + ambient with a white specular colour.
    pub fn phong(colour: Color, specularity: f64, ambient: f64) -> Self {
        Self::full(colour, Color::WHITE, specularity, ambient)
    }

    /// Diffuse + specular + ambient with an explicit specular colour.
    pub fn full(colour: Color, specular_colour: Color, specularity: f64, ambient: f64) -> Self {
        Self {
            diffuse: true,
            ambient,
            specularity: specularity.max(0.0),
            colour,
            specular_colour,
            reflective: false,
        }
    }

    /// Make the surface a mirror; reflections are tinted by the specular colour.
    pub fn with_reflection(mut self) -> Self {
        self.reflective = true;
        self
    }

    pub fn with_specular_colour(mut self, specular_colour: Color) -> Self {
        self.specular_colour = specular_colour;
        self
    }

    pub fn colour(&self) -> Color {
        self.colour
    }

    pub fn specular_colour(&self) -> Color {
        self.specular_colour
    }

    pub fn ambient(&self) -> f64 {
        self.ambient
    }

    pub fn specularity(&self) -> f64 {
        self.specularity
    }

    pub fn is_diffuse(&self) -> bool {
        self.diffuse
    }

    pub fn is_reflective(&self) -> bool {
        self.reflective
    }

    /// Contribution of one light at a surface point.
    ///
    /// `n` is the unit surface normal, `v` the unit vector towards the viewer and
    /// `l` the unit vector towards the light.
    pub fn shade(&self, light: &Light, n: Vec3, v: Vec3, l: Vec3) -> Color {
        let mut result = self.colour.scaled(self.ambient);

        if self.diffuse {
            result += (self.colour * light.colour).scaled(n.dot(l).max(0.0));
        }

        if self.specularity > 0.0 {
            let h = (v + l).normalize_or_zero();
            let coefficient = n.dot(h).max(0.0).powf(self.specularity);
            result += (self.specular_colour * light.colour).scaled(coefficient);
        }

        result
    }
}

impl Default for Material {
    /// Grey diffuse surface with a little ambient light.
    fn default() -> Self {
        Self::diffuse(Color::new(0.5, 0.5, 0.5), 0.1)
    }
}
