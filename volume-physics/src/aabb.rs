use crate::error::{PhysicsError, Result};
use glam::{Mat4, Vec3};

/// An Axis-Aligned Bounding Box.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AABB {
    pub min: Vec3,
    pub max: Vec3,
}

impl AABB {
    /// Box spanning two arbitrary corners, in any order.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        AABB {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Box from explicit extents. Fails if `min > max` on any axis.
    pub fn try_new(min: Vec3, max: Vec3) -> Result<Self> {
        let aabb = AABB { min, max };
        aabb.validate()?;
        Ok(aabb)
    }

    /// Checks the `min <= max` invariant. Infinite and NaN extents fail it
    /// as well.
    pub fn validate(&self) -> Result<()> {
        if self.is_finite() && self.min.cmple(self.max).all() {
            Ok(())
        } else {
            Err(PhysicsError::InvalidBounds {
                min: self.min,
                max: self.max,
            })
        }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        self.min + self.size() * 0.5
    }

    #[inline]
    pub fn translate(&self, translation: Vec3) -> Self {
        AABB {
            min: self.min + translation,
            max: self.max + translation,
        }
    }

    /// Componentwise scale of both extents. A negative factor flips that axis,
    /// so the result may violate the invariant; callers validate.
    #[inline]
    pub fn scaled(&self, scale: Vec3) -> Self {
        AABB {
            min: self.min * scale,
            max: self.max * scale,
        }
    }

    pub fn corners(&self) -> [Vec3; 8] {
        let (min, max) = (self.min, self.max);
        [
            Vec3::new(min.x, min.y, min.z),
            Vec3::new(min.x, min.y, max.z),
            Vec3::new(min.x, max.y, min.z),
            Vec3::new(min.x, max.y, max.z),
            Vec3::new(max.x, min.y, min.z),
            Vec3::new(max.x, min.y, max.z),
            Vec3::new(max.x, max.y, min.z),
            Vec3::new(max.x, max.y, max.z),
        ]
    }

    /// Tightest box enclosing this box after `world` is applied to all eight
    /// corners. Exact for translation and scale, loose under rotation.
    pub fn transform(&self, world: &Mat4) -> Self {
        let corners = self.corners().map(|corner| world.transform_point3(corner));
        let mut min = corners[0];
        let mut max = corners[0];
        for corner in &corners[1..] {
            min = min.min(*corner);
            max = max.max(*corner);
        }
        AABB { min, max }
    }

    /// Touching boxes count as intersecting.
    #[inline]
    pub fn intersects(&self, other: &AABB) -> bool {
        intervals_overlap(self.min.x, self.max.x, other.min.x, other.max.x)
            && intervals_overlap(self.min.y, self.max.y, other.min.y, other.max.y)
            && intervals_overlap(self.min.z, self.max.z, other.min.z, other.max.z)
    }

}

/// Closed-interval overlap: `[0, 1]` and `[1, 2]` overlap.
#[inline]
pub fn intervals_overlap(min1: f32, max1: f32, min2: f32, max2: f32) -> bool {
    !(min1 > max2 || min2 > max1)
}

#[inline]
pub fn boxes_intersect(a: &AABB, b: &AABB) -> bool {
    a.intersects(b)
}
