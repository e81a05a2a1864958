//! Flat grouping of scene objects behind one bounding box.

use crate::{GeometryError, Hit, Hittable, SceneObject};
use traceify_math::{Aabb, Interval, Ray};

/// A list of objects culled as a unit by their union bounding box.
#[derive(Debug, Clone)]
pub struct Cluster {
    objects: Vec<SceneObject>,
    bbox: Aabb,
}

impl Cluster {
    /// Create a new empty cluster.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            bbox: Aabb::EMPTY,
        }
    }

    /// Add an object to the cluster, growing the bounding box to include it.
    ///
    /// Objects without a bounding box are rejected and the cluster is left unchanged.
    pub fn add_object(&mut self, object: impl Into<SceneObject>) -> Result<(), GeometryError> {
        let object = object.into();
        let object_box = object.bounding_box()?;
        self.bbox.swallow(&object_box);
        self.objects.push(object);
        Ok(())
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Get the number of direct children.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the cluster is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn primitive_count(&self) -> usize {
        self.objects.iter().map(SceneObject::primitive_count).sum()
    }
}

impl Default for Cluster {
    fn default() -> Self {
        Self::new()
    }
}

impl Hittable for Cluster {
    fn intersect(&self, ray: &Ray, t_min: f64) -> Option<Hit<'_>> {
        self.bbox.hit(ray, Interval::after(t_min))?;

        self.objects
            .iter()
            .fold(None, |best, object| Hit::nearest(best, object.intersect(ray, t_min)))
    }

    fn bounding_box(&self) -> Result<Aabb, GeometryError> {
        Ok(self.bbox)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Material, Plane, Sphere};
    use traceify_math::{Color, Vec3};

    fn sphere(centre: Vec3, radius: f64, colour: Color) -> Sphere {
        Sphere::new(centre, radius, Material::constant(colour))
    }

    #[test]
    fn test_cluster_box_contains_every_child() {
        let mut cluster = Cluster::new();
        let spheres = [
            sphere(Vec3::new(0.0, 0.0, 0.0), 1.0, Color::WHITE),
            sphere(Vec3::new(5.0, -2.0, 1.0), 0.5, Color::WHITE),
            sphere(Vec3::new(-3.0, 4.0, 9.0), 2.0, Color::WHITE),
        ];

        for s in spheres.iter().cloned() {
            cluster.add_object(s).unwrap();
        }
        cluster.add_object(Plane::new(Vec3::Y, 3.0, Material::default())).unwrap();

        let bbox = cluster.bounding_box().unwrap();
        for child in cluster.objects() {
            assert!(bbox.contains(&child.bounding_box().unwrap()));
        }
        assert_eq!(cluster.len(), 4);
    }

    #[test]
    fn test_cluster_returns_nearest_child() {
        let mut cluster = Cluster::new();
        cluster.add_object(sphere(Vec3::new(0.0, 0.0, 10.0), 1.0, Color::BLACK)).unwrap();
        cluster.add_object(sphere(Vec3::new(0.0, 0.0, 5.0), 1.0, Color::WHITE)).unwrap();

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let hit = cluster.intersect(&ray, 0.0).unwrap();
        assert!((hit.t - 4.0).abs() < 1e-9);
        assert_eq!(hit.object.material().colour(), Color::WHITE);
    }

    #[test]
    fn test_cluster_culls_by_box() {
        let mut cluster = Cluster::new();
        cluster.add_object(sphere(Vec3::new(0.0, 0.0, 5.0), 1.0, Color::WHITE)).unwrap();

        let ray = Ray::new(Vec3::new(10.0, 0.0, 0.0), Vec3::Z);
        assert!(cluster.intersect(&ray, 0.0).is_none());
    }

    #[test]
    fn test_cluster_honours_t_min() {
        let mut cluster = Cluster::new();
        cluster.add_object(sphere(Vec3::new(0.0, 0.0, 5.0), 1.0, Color::WHITE)).unwrap();
        cluster.add_object(sphere(Vec3::new(0.0, 0.0, 10.0), 1.0, Color::BLACK)).unwrap();

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let hit = cluster.intersect(&ray, 5.0).unwrap();
        assert!((hit.t - 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_cluster_never_hit() {
        let cluster = Cluster::new();
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(cluster.intersect(&ray, 0.0).is_none());
        assert!(cluster.is_empty());
    }

    #[test]
    fn test_cluster_rejects_unbounded_object() {
        let mut cluster = Cluster::new();
        let oblique = Plane::new(Vec3::new(1.0, 1.0, 1.0), 0.0, Material::default());
        assert_eq!(
            cluster.add_object(oblique),
            Err(GeometryError::Unbounded { shape: "plane" })
        );
        assert!(cluster.is_empty());
    }
}
