//! Axis-aligned bounding boxes and the slab ray test.

use carapace_math::Vec3;

use crate::ray::Ray;
use crate::triangle::Triangle;

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// The empty box (inverted infinite bounds); growing it by any
    /// point yields that point's box.
    pub const EMPTY: Self = Self {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    /// Bounds of a single triangle.
    pub fn of_triangle(tri: &Triangle) -> Self {
        Self {
            min: tri.a.min(tri.b).min(tri.c),
            max: tri.a.max(tri.b).max(tri.c),
        }
    }

    /// Expands to contain `point`.
    #[inline]
    pub fn grow(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Expands to contain `other`.
    #[inline]
    pub fn union(&mut self, other: &Aabb) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// Box center.
    #[inline]
    pub fn centroid(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Extent along each axis.
    #[inline]
    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    /// Index of the longest axis (0 = X, 1 = Y, 2 = Z).
    pub fn longest_axis(&self) -> usize {
        let e = self.extent();
        if e.x >= e.y && e.x >= e.z {
            0
        } else if e.y >= e.z {
            1
        } else {
            2
        }
    }

    /// Slab test: distance at which the ray enters the box, or `None`
    /// when the ray misses it entirely or enters beyond `max_t`.
    ///
    /// `inv_dir` is the componentwise reciprocal of the ray direction,
    /// precomputed once per ray.
    #[inline]
    pub fn ray_entry(&self, ray: &Ray, inv_dir: Vec3, max_t: f32) -> Option<f32> {
        let t1 = (self.min - ray.origin) * inv_dir;
        let t2 = (self.max - ray.origin) * inv_dir;

        let t_near = t1.min(t2).max_element().max(0.0);
        let t_far = t1.max(t2).min_element().min(max_t);

        if t_near <= t_far {
            Some(t_near)
        } else {
            None
        }
    }
}
