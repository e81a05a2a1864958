//! Scene object capabilities and the scene graph node type.

use std::fmt::Debug;

use crate::{BvhNode, Cluster, GeometryError, Material, Plane, Sphere};
use traceify_math::{Aabb, Ray, Vec3};

/// Nearest intersection found along a ray, borrowed from the scene.
#[derive(Clone, Copy)]
pub struct Hit<'a> {
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// The primitive that was hit
    pub object: &'a dyn Shadable,
}

impl<'a> Hit<'a> {
    pub fn new(t: f64, object: &'a dyn Shadable) -> Self {
        Self { t, object }
    }

    /// Keep whichever hit is closer; on a tie the existing hit wins.
    #[inline]
    pub fn nearest(current: Option<Hit<'a>>, candidate: Option<Hit<'a>>) -> Option<Hit<'a>> {
        match (current, candidate) {
            (Some(cur), Some(cand)) if cand.t < cur.t => Some(cand),
            (None, cand) => cand,
            (cur, _) => cur,
        }
    }
}

impl Debug for Hit<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hit")
            .field("t", &self.t)
            .field("object", &self.object.tag())
            .finish()
    }
}

/// Trait for anything a ray can be tested against.
pub trait Hittable {
    /// Nearest primitive hit with `t > t_min`, if any.
    fn intersect(&self, ray: &Ray, t_min: f64) -> Option<Hit<'_>>;

    /// Axis-aligned bounds of the object.
    ///
    /// Fails for shapes that are unbounded along every axis, which cannot be
    /// placed inside an acceleration structure.
    fn bounding_box(&self) -> Result<Aabb, GeometryError>;
}

/// Primitives that can actually be shaded.
pub trait Shadable: Send + Sync {
    /// Unit surface normal at a point assumed to lie on the surface.
    fn surface_normal(&self, point: Vec3) -> Vec3;

    fn material(&self) -> &Material;

    /// Short name for logging.
    fn tag(&self) -> &'static str;
}

/// Closed set of things that can live in a scene.
#[derive(Debug, Clone)]
pub enum SceneObject {
    Sphere(Sphere),
    Plane(Plane),
    Cluster(Cluster),
    Bvh(BvhNode),
}

impl SceneObject {
    /// True for flat groups that are culled by a single box.
    pub fn is_cluster(&self) -> bool {
        matches!(self, SceneObject::Cluster(_))
    }

    /// Number of shadable primitives contained in this object.
    pub fn primitive_count(&self) -> usize {
        match self {
            SceneObject::Sphere(_) | SceneObject::Plane(_) => 1,
            SceneObject::Cluster(cluster) => cluster.primitive_count(),
            SceneObject::Bvh(bvh) => bvh.primitive_count(),
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            SceneObject::Sphere(_) => "Sphere",
            SceneObject::Plane(_) => "Plane",
            SceneObject::Cluster(_) => "Cluster",
            SceneObject::Bvh(_) => "BVHNode",
        }
    }
}

impl Hittable for SceneObject {
    fn intersect(&self, ray: &Ray, t_min: f64) -> Option<Hit<'_>> {
        match self {
            SceneObject::Sphere(sphere) => sphere.intersect(ray, t_min),
            SceneObject::Plane(plane) => plane.intersect(ray, t_min),
            SceneObject::Cluster(cluster) => cluster.intersect(ray, t_min),
            SceneObject::Bvh(bvh) => bvh.intersect(ray, t_min),
        }
    }

    fn bounding_box(&self) -> Result<Aabb, GeometryError> {
        match self {
            SceneObject::Sphere(sphere) => sphere.bounding_box(),
            SceneObject::Plane(plane) => plane.bounding_box(),
            SceneObject::Cluster(cluster) => cluster.bounding_box(),
            SceneObject::Bvh(bvh) => bvh.bounding_box(),
        }
    }
}

impl From<Sphere> for SceneObject {
    fn from(sphere: Sphere) -> Self {
        SceneObject::Sphere(sphere)
    }
}

impl From<Plane> for SceneObject {
    fn from(plane: Plane) -> Self {
        SceneObject::Plane(plane)
    }
}

impl From<Cluster> for SceneObject {
    fn from(cluster: Cluster) -> Self {
        SceneObject::Cluster(cluster)
    }
}

impl From<BvhNode> for SceneObject {
    fn from(bvh: BvhNode) -> Self {
        SceneObject::Bvh(bvh)
    }
}
