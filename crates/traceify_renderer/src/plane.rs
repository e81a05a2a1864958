//! Infinite plane primitive, `r·n + k = 0`.

use crate::{GeometryError, Hit, Hittable, Material, Shadable};
use traceify_math::{Aabb, Interval, Ray, Vec3};

/// Half-thickness of the slab used to bound an axis-aligned plane.
pub const BBOX_EPS: f64 = 0.00001;

/// An infinite plane with unit normal `n` and offset `k`.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    normal: Vec3,
    k: f64,
    material: Material,
}

impl Plane {
    /// Create a plane from any non-zero normal.
    ///
    /// The normal is normalized and `k` rescaled by the same factor, so the
    /// set of points satisfying `r·n + k = 0` is unchanged. A zero normal gives
    /// a plane that no ray can hit.
    pub fn new(normal: Vec3, k: f64, material: Material) -> Self {
        let len = normal.length();
        let (normal, k) = if len > 0.0 {
            (normal / len, k / len)
        } else {
            log::warn!("Plane has a zero normal and will never be hit");
            (Vec3::ZERO, k)
        };

        Self {
            normal,
            k,
            material,
        }
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn k(&self) -> f64 {
        self.k
    }

    /// The axis this plane is exactly perpendicular to, if any.
    fn bounded_axis(&self) -> Option<usize> {
        let pwnorm = self.normal.abs();
        [Vec3::X, Vec3::Y, Vec3::Z]
            .iter()
            .position(|axis| pwnorm == *axis)
    }

    /// Parametric distance to the plane, if it lies beyond `t_min`.
    pub fn intersection_t(&self, ray: &Ray, t_min: f64) -> Option<f64> {
        let d_dot_n = ray.direction.dot(self.normal);
        // Parallel to (or lying in) the plane
        if d_dot_n == 0.0 {
            return None;
        }

        let t = -(self.k + ray.origin.dot(self.normal)) / d_dot_n;
        if t <= t_min.max(0.0) {
            return None;
        }
        Some(t)
    }
}

impl Hittable for Plane {
    fn intersect(&self, ray: &Ray, t_min: f64) -> Option<Hit<'_>> {
        self.intersection_t(ray, t_min).map(|t| Hit::new(t, self))
    }

    /// Unbounded except along the axis the plane is perpendicular to, where it
    /// is a thin slab around the plane.
    fn bounding_box(&self) -> Result<Aabb, GeometryError> {
        let axis = self
            .bounded_axis()
            .ok_or(GeometryError::Unbounded { shape: "plane" })?;

        // n is ±e_axis, so every point on the plane has coordinate -k / n_axis
        let coord = -self.k / self.normal[axis];
        let mut bbox = Aabb::UNIVERSE;
        bbox.set_axis_interval(axis, Interval::new(coord - BBOX_EPS, coord + BBOX_EPS));
        Ok(bbox)
    }
}

impl Shadable for Plane {
    fn surface_normal(&self, _point: Vec3) -> Vec3 {
        self.normal
    }

    fn material(&self) -> &Material {
        &self.material
    }

    fn tag(&self) -> &'static str {
        "Plane"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor(y: f64) -> Plane {
        // y = -k  <=>  r·(0,1,0) + k = 0
        Plane::new(Vec3::Y, -y, Material::default())
    }

    #[test]
    fn test_plane_hit_point_satisfies_equation() {
        let plane = Plane::new(Vec3::new(1.0, 2.0, -0.5), 3.0, Material::default());
        let origins = [Vec3::new(5.0, 5.0, 5.0), Vec3::new(-3.0, 0.5, 2.0)];
        let dirs = [Vec3::new(-1.0, -1.0, 0.0), Vec3::new(0.3, -2.0, 0.1)];

        for origin in origins {
            for dir in dirs {
                let ray = Ray::new(origin, dir);
                if let Some(t) = plane.intersection_t(&ray, 0.0) {
                    let r = ray.at(t);
                    assert!((r.dot(plane.normal()) + plane.k()).abs() < 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_plane_normalizes_normal() {
        let plane = Plane::new(Vec3::new(0.0, 2.0, 0.0), 4.0, Material::default());
        assert_eq!(plane.normal(), Vec3::Y);
        assert_eq!(plane.k(), 2.0);
        // Still the plane y = -2
        let ray = Ray::new(Vec3::ZERO, -Vec3::Y);
        assert_eq!(plane.intersection_t(&ray, 0.0), Some(2.0));
    }

    #[test]
    fn test_plane_parallel_ray_misses() {
        let plane = floor(-1.0);
        let above = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 0.0, 0.3));
        let inside = Ray::new(Vec3::new(0.0, -1.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(plane.intersection_t(&above, 0.0).is_none());
        assert!(plane.intersection_t(&inside, 0.0).is_none());
    }

    #[test]
    fn test_plane_behind_ray_misses() {
        let plane = floor(-1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        assert!(plane.intersection_t(&ray, 0.0).is_none());
    }

    #[test]
    fn test_plane_bounding_box_is_slab_at_plane() {
        let plane = floor(-1.0);
        let bbox = plane.bounding_box().unwrap();
        assert!((bbox.y.min - (-1.0 - BBOX_EPS)).abs() < 1e-12);
        assert!((bbox.y.max - (-1.0 + BBOX_EPS)).abs() < 1e-12);
        assert_eq!(bbox.x, Interval::UNIVERSE);
        assert_eq!(bbox.z, Interval::UNIVERSE);

        // Flipped normal describes the same plane
        let flipped = Plane::new(-Vec3::Y, -1.0, Material::default());
        let flipped_box = flipped.bounding_box().unwrap();
        assert!((flipped_box.y.midpoint() - (-1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_oblique_plane_is_unbounded() {
        let plane = Plane::new(Vec3::new(1.0, 1.0, 0.0), 0.0, Material::default());
        assert_eq!(
            plane.bounding_box(),
            Err(GeometryError::Unbounded { shape: "plane" })
        );
    }

    #[test]
    fn test_zero_normal_plane_never_hit() {
        let plane = Plane::new(Vec3::ZERO, 1.0, Material::default());
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.2, -1.0, 0.4));
        assert!(plane.intersection_t(&ray, 0.0).is_none());
    }
}
