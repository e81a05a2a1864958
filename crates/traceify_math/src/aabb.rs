use crate::{Interval, Ray, Vec3};

/// Axis-Aligned Bounding Box for spatial acceleration structures (BVH, clusters).
///
/// An AABB is defined by three intervals (one per axis) that bound a 3D volume.
/// Axes may be unbounded (infinite ends) to describe shapes such as planes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    /// Create a new AABB from three intervals.
    pub fn new(x: Interval, y: Interval, z: Interval) -> Self {
        Self { x, y, z }
    }

    /// Create an AABB from two corner points.
    ///
    /// Zero-width axes are padded so the box never degenerates to a flat sheet.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        let x = Interval::new(a.x.min(b.x), a.x.max(b.x));
        let y = Interval::new(a.y.min(b.y), a.y.max(b.y));
        let z = Interval::new(a.z.min(b.z), a.z.max(b.z));

        let mut aabb = Self { x, y, z };
        aabb.pad_to_minimums();
        aabb
    }

    /// Create an AABB that surrounds two other AABBs.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Self {
        Self {
            x: Interval::surrounding(&box0.x, &box1.x),
            y: Interval::surrounding(&box0.y, &box1.y),
            z: Interval::surrounding(&box0.z, &box1.z),
        }
    }

    /// Grow this box so that it also encloses `other`.
    pub fn swallow(&mut self, other: &Aabb) {
        *self = Aabb::surrounding(self, other);
    }

    /// Get the interval for a specific axis (0=X, 1=Y, 2=Z).
    pub fn axis_interval(&self, n: usize) -> Interval {
        match n {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// Replace the interval for a specific axis (0=X, 1=Y, 2=Z).
    pub fn set_axis_interval(&mut self, n: usize, interval: Interval) {
        match n {
            0 => self.x = interval,
            1 => self.y = interval,
            _ => self.z = interval,
        }
    }

    /// Midpoint along one axis; `0.0` for an unbounded axis.
    pub fn midpoint_for_axis(&self, n: usize) -> f64 {
        self.axis_interval(n).midpoint()
    }

    /// Returns the center point of the bounding box (unbounded axes map to 0).
    pub fn midpoint(&self) -> Vec3 {
        Vec3::new(
            self.midpoint_for_axis(0),
            self.midpoint_for_axis(1),
            self.midpoint_for_axis(2),
        )
    }

    /// Returns true if `other` lies entirely inside this box.
    pub fn contains(&self, other: &Aabb) -> bool {
        other.is_empty()
            || (self.x.encloses(&other.x) && self.y.encloses(&other.y) && self.z.encloses(&other.z))
    }

    /// Returns true if the box encloses nothing on at least one axis.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty() || self.y.is_empty() || self.z.is_empty()
    }

    /// Returns true if every axis is bounded.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Test if a ray intersects this AABB within the given parametric interval.
    ///
    /// Uses the slab method. Returns the parameter at which the ray enters the
    /// part of the box inside `ray_t`, or `None` on a miss.
    ///
    /// A zero direction component never divides: the ray either lies within
    /// that slab for every t or misses the box entirely.
    pub fn hit(&self, r: &Ray, mut ray_t: Interval) -> Option<f64> {
        for axis in 0..3 {
            let slab = self.axis_interval(axis);
            let origin = r.origin[axis];
            let dir = r.direction[axis];

            if dir == 0.0 {
                if !slab.contains(origin) {
                    return None;
                }
                continue;
            }

            let adinv = 1.0 / dir;
            let mut t0 = (slab.min - origin) * adinv;
            let mut t1 = (slab.max - origin) * adinv;
            if adinv < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }
            ray_t.min = t0.max(ray_t.min);
            ray_t.max = t1.min(ray_t.max);
            if ray_t.max <= ray_t.min {
                return None;
            }
        }

        Some(ray_t.min)
    }

    /// Pad intervals to avoid zero-width AABBs (degenerate cases).
    fn pad_to_minimums(&mut self) {
        let delta = 0.0001;
        if self.x.size() < delta {
            self.x = self.x.expand(delta);
        }
        if self.y.size() < delta {
            self.y = self.y.expand(delta);
        }
        if self.z.size() < delta {
            self.z = self.z.expand(delta);
        }
    }

    /// The empty box: identity element for `surrounding`.
    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };

    /// A box that contains all of space.
    pub const UNIVERSE: Aabb = Aabb {
        x: Interval::UNIVERSE,
        y: Interval::UNIVERSE,
        z: Interval::UNIVERSE,
    };
}
