//! Sphere primitive for ray tracing.

use crate::{GeometryError, Hit, Hittable, Material, Shadable};
use traceify_math::{Aabb, Ray, Vec3};

/// A sphere primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    centre: Vec3,
    radius: f64,
    material: Material,
}

impl Sphere {
    /// Create a new sphere. Negative radii are treated as zero.
    pub fn new(centre: Vec3, radius: f64, material: Material) -> Self {
        let radius = radius.max(0.0);
        if radius == 0.0 {
            log::warn!("Sphere at {centre} has zero radius and will never be hit");
        }

        Self {
            centre,
            radius,
            material,
        }
    }

    pub fn centre(&self) -> Vec3 {
        self.centre
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Parametric distance to the near surface, if it lies beyond `t_min`.
    ///
    /// Only the smaller root of the quadratic is considered: a ray starting
    /// inside the sphere, or whose near hit is at or behind `t_min`, misses.
    /// Non-positive t is always rejected.
    pub fn intersection_t(&self, ray: &Ray, t_min: f64) -> Option<f64> {
        let e = ray.origin;
        let d = ray.direction;
        let ec = e - self.centre;

        let a = d.dot(d);
        if a == 0.0 {
            return None;
        }

        let b = d.dot(ec);
        let c = ec.dot(ec) - self.radius * self.radius;
        let discriminant = b * b - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let t = (-b - discriminant.sqrt()) / a;
        if t <= t_min.max(0.0) {
            return None;
        }
        Some(t)
    }
}

impl Hittable for Sphere {
    fn intersect(&self, ray: &Ray, t_min: f64) -> Option<Hit<'_>> {
        self.intersection_t(ray, t_min).map(|t| Hit::new(t, self))
    }

    fn bounding_box(&self) -> Result<Aabb, GeometryError> {
        let rvec = Vec3::splat(self.radius);
        Ok(Aabb::from_points(self.centre - rvec, self.centre + rvec))
    }
}

impl Shadable for Sphere {
    fn surface_normal(&self, point: Vec3) -> Vec3 {
        (point - self.centre).normalize_or_zero()
    }

    fn material(&self) -> &Material {
        &self.material
    }

    fn tag(&self) -> &'static str {
        "Sphere"
    }
}
