//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! Objects are partitioned at the midpoint of their union box, cycling the
//! split axis x, y, z at each level. Queries descend into both children of
//! every branch whose box the ray enters and keep the nearest primitive hit.

use crate::{GeometryError, Hit, Hittable, SceneObject};
use traceify_math::{Aabb, Interval, Ray};

/// BVH node - either a branch with two children or a leaf with one object.
///
/// Children are full scene objects, so a leaf may hold a whole Cluster and a
/// branch built from two objects holds them directly.
#[derive(Debug, Clone)]
pub enum BvhNode {
    /// Internal node with two children.
    Branch {
        left: Box<SceneObject>,
        right: Box<SceneObject>,
        bbox: Aabb,
    },
    /// Leaf node wrapping a single object.
    Leaf { object: Box<SceneObject>, bbox: Aabb },
}

impl BvhNode {
    /// Create a BVH from a list of scene objects, taking ownership of them.
    ///
    /// Fails on an empty list, or if any object has no bounding box.
    pub fn build(objects: Vec<SceneObject>) -> Result<Self, GeometryError> {
        let count = objects.len();
        let node = Self::build_on_axis(objects, 0)?;
        log::info!(
            "Built BVH over {} objects ({} primitives, depth {})",
            count,
            node.primitive_count(),
            node.depth()
        );
        Ok(node)
    }

    /// Recursive construction, splitting on `axis` at this level.
    fn build_on_axis(objects: Vec<SceneObject>, axis: usize) -> Result<Self, GeometryError> {
        if objects.is_empty() {
            return Err(GeometryError::EmptyBvh);
        }

        let boxes = objects
            .iter()
            .map(<SceneObject as Hittable>::bounding_box)
            .collect::<Result<Vec<_>, _>>()?;
        let bbox = boxes
            .iter()
            .fold(Aabb::EMPTY, |acc, b| Aabb::surrounding(&acc, b));

        if objects.len() <= 2 {
            let mut objects = objects.into_iter();
            return match (objects.next(), objects.next()) {
                (Some(left), Some(right)) => Ok(BvhNode::Branch {
                    left: Box::new(left),
                    right: Box::new(right),
                    bbox,
                }),
                (Some(object), None) => Ok(BvhNode::Leaf {
                    object: Box::new(object),
                    bbox,
                }),
                (None, _) => Err(GeometryError::EmptyBvh),
            };
        }

        let split = bbox.midpoint_for_axis(axis);
        let (left, right): (Vec<_>, Vec<_>) = objects
            .into_iter()
            .zip(boxes.iter())
            .partition(|(_, b)| b.midpoint_for_axis(axis) <= split);
        let mut left: Vec<SceneObject> = left.into_iter().map(|(o, _)| o).collect();
        let mut right: Vec<SceneObject> = right.into_iter().map(|(o, _)| o).collect();

        // Every midpoint on one side: fall back to halving by order
        if left.is_empty() || right.is_empty() {
            log::trace!("Degenerate midpoint split on axis {axis}, halving instead");
            left.append(&mut right);
            right = left.split_off(left.len() / 2);
        }

        let next_axis = (axis + 1) % 3;
        let left = Self::build_on_axis(left, next_axis)?;
        let right = Self::build_on_axis(right, next_axis)?;

        Ok(BvhNode::Branch {
            left: Box::new(left.into()),
            right: Box::new(right.into()),
            bbox,
        })
    }

    /// Number of BVH levels below and including this node.
    pub fn depth(&self) -> usize {
        fn child_depth(object: &SceneObject) -> usize {
            match object {
                SceneObject::Bvh(node) => node.depth(),
                _ => 0,
            }
        }

        match self {
            BvhNode::Leaf { object, .. } => 1 + child_depth(object),
            BvhNode::Branch { left, right, .. } => 1 + child_depth(left).max(child_depth(right)),
        }
    }

    pub fn primitive_count(&self) -> usize {
        match self {
            BvhNode::Leaf { object, .. } => object.primitive_count(),
            BvhNode::Branch { left, right, .. } => left.primitive_count() + right.primitive_count(),
        }
    }
}

impl Hittable for BvhNode {
    fn intersect(&self, ray: &Ray, t_min: f64) -> Option<Hit<'_>> {
        match self {
            BvhNode::Leaf { object, bbox } => {
                bbox.hit(ray, Interval::after(t_min))?;
                object.intersect(ray, t_min)
            }

            BvhNode::Branch { left, right, bbox } => {
                bbox.hit(ray, Interval::after(t_min))?;
                Hit::nearest(left.intersect(ray, t_min), right.intersect(ray, t_min))
            }
        }
    }

    fn bounding_box(&self) -> Result<Aabb, GeometryError> {
        match self {
            BvhNode::Leaf { bbox, .. } | BvhNode::Branch { bbox, .. } => Ok(*bbox),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cluster, Material, Plane, Sphere};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use traceify_math::{Color, Vec3};

    fn sphere(centre: Vec3, radius: f64) -> SceneObject {
        Sphere::new(centre, radius, Material::default()).into()
    }

    fn random_spheres(rng: &mut StdRng, n: usize) -> Vec<SceneObject> {
        (0..n)
            .map(|_| {
                let centre = Vec3::new(
                    rng.gen_range(-10.0..10.0),
                    rng.gen_range(-10.0..10.0),
                    rng.gen_range(5.0..25.0),
                );
                sphere(centre, rng.gen_range(0.2..1.5))
            })
            .collect()
    }

    fn brute_force<'a>(objects: &'a [SceneObject], ray: &Ray) -> Option<Hit<'a>> {
        objects
            .iter()
            .fold(None, |best, o| Hit::nearest(best, o.intersect(ray, 0.0)))
    }

    #[test]
    fn test_bvh_empty() {
        let result = BvhNode::build(vec![]);
        assert!(matches!(result, Err(GeometryError::EmptyBvh)));
    }

    #[test]
    fn test_bvh_single_sphere() {
        let bvh = BvhNode::build(vec![sphere(Vec3::new(0.0, 0.0, -1.0), 0.5)]).unwrap();

        // Should create a leaf
        assert!(matches!(bvh, BvhNode::Leaf { .. }));

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let hit = bvh.intersect(&ray, 0.0).unwrap();
        assert!((hit.t - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_bvh_two_objects_are_direct_children() {
        let bvh = BvhNode::build(vec![
            sphere(Vec3::new(-2.0, 0.0, 5.0), 1.0),
            sphere(Vec3::new(2.0, 0.0, 5.0), 1.0),
        ])
        .unwrap();

        match &bvh {
            BvhNode::Branch { left, right, .. } => {
                assert_eq!(left.tag(), "Sphere");
                assert_eq!(right.tag(), "Sphere");
            }
            BvhNode::Leaf { .. } => panic!("two objects should make a branch"),
        }
        assert_eq!(bvh.depth(), 1);
    }

    #[test]
    fn test_bvh_multiple_spheres() {
        let spheres = (0..10)
            .map(|i| sphere(Vec3::new(i as f64, 0.0, -5.0), 0.5))
            .collect();
        let bvh = BvhNode::build(spheres).unwrap();
        assert_eq!(bvh.primitive_count(), 10);

        // Test ray that hits sphere at x=5
        let ray = Ray::new(Vec3::new(5.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = bvh.intersect(&ray, 0.0).unwrap();

        // Hit point should be near z = -4.5 (sphere at z=-5, radius 0.5)
        assert!((ray.at(hit.t).z - (-4.5)).abs() < 1e-9);
    }

    #[test]
    fn test_bvh_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(7);
        let objects = random_spheres(&mut rng, 64);
        let bvh = BvhNode::build(objects.clone()).unwrap();

        for _ in 0..500 {
            let target = Vec3::new(rng.gen_range(-12.0..12.0), rng.gen_range(-12.0..12.0), 15.0);
            let ray = Ray::new(Vec3::ZERO, target);

            let expected = brute_force(&objects, &ray).map(|h| h.t);
            let actual = bvh.intersect(&ray, 0.0).map(|h| h.t);
            match (expected, actual) {
                (Some(e), Some(a)) => assert!((e - a).abs() < 1e-9),
                (None, None) => {}
                other => panic!("BVH disagrees with brute force: {other:?}"),
            }
        }
    }

    #[test]
    fn test_bvh_box_contains_children() {
        let mut rng = StdRng::seed_from_u64(11);
        let bvh = BvhNode::build(random_spheres(&mut rng, 20)).unwrap();

        fn check(node: &BvhNode) {
            let bbox = node.bounding_box().unwrap();
            let children: Vec<&SceneObject> = match node {
                BvhNode::Leaf { object, .. } => vec![object.as_ref()],
                BvhNode::Branch { left, right, .. } => vec![left.as_ref(), right.as_ref()],
            };
            for child in children {
                assert!(bbox.contains(&child.bounding_box().unwrap()));
                if let SceneObject::Bvh(inner) = child {
                    check(inner);
                }
            }
        }
        check(&bvh);
    }

    #[test]
    fn test_bvh_coincident_midpoints_terminate() {
        // Concentric spheres share a midpoint on every axis
        let objects = (1..=9)
            .map(|i| sphere(Vec3::new(0.0, 0.0, 20.0), i as f64))
            .collect();
        let bvh = BvhNode::build(objects).unwrap();
        assert_eq!(bvh.primitive_count(), 9);

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let hit = bvh.intersect(&ray, 0.0).unwrap();
        assert!((hit.t - 11.0).abs() < 1e-9);
    }

    #[test]
    fn test_bvh_accepts_axis_aligned_plane_and_cluster() {
        let mut cluster = Cluster::new();
        cluster.add_object(sphere(Vec3::new(0.0, 0.0, 10.0), 1.0)).unwrap();

        let floor = Plane::new(Vec3::Y, 2.0, Material::constant(Color::WHITE));
        let bvh = BvhNode::build(vec![
            cluster.into(),
            floor.into(),
            sphere(Vec3::new(4.0, 0.0, 10.0), 1.0),
        ])
        .unwrap();
        assert_eq!(bvh.primitive_count(), 3);

        let down = Ray::new(Vec3::new(0.0, 0.0, -3.0), -Vec3::Y);
        let hit = bvh.intersect(&down, 0.0).unwrap();
        assert_eq!(hit.object.tag(), "Plane");
        assert!((hit.t - 2.0).abs() < 1e-9);

        let forward = Ray::new(Vec3::ZERO, Vec3::Z);
        assert_eq!(bvh.intersect(&forward, 0.0).unwrap().object.tag(), "Sphere");
    }

    #[test]
    fn test_bvh_rejects_oblique_plane() {
        let oblique = Plane::new(Vec3::new(0.0, 1.0, 1.0), 0.0, Material::default());
        let result = BvhNode::build(vec![sphere(Vec3::Z, 1.0), oblique.into()]);
        assert!(matches!(result, Err(GeometryError::Unbounded { shape: "plane" })));
    }

    #[test]
    fn test_bvh_clone_is_independent() {
        let bvh = BvhNode::build(vec![sphere(Vec3::Z * 5.0, 1.0)]).unwrap();
        let copy = bvh.clone();
        drop(bvh);

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(copy.intersect(&ray, 0.0).is_some());
    }
}
