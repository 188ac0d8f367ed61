use crate::aabb::AABB;
use crate::error::Result;
use glam::Vec3;

/// Mover extents around the eye position, which sits at the top of the box.
pub const MOVER_MIN: Vec3 = Vec3::new(-0.5, -2.0, -0.5);
pub const MOVER_MAX: Vec3 = Vec3::new(0.5, 2.0, 0.5);

/// Volume box before the node's authored scale is applied.
pub const VOLUME_MIN: Vec3 = Vec3::splat(-1.0);
pub const VOLUME_MAX: Vec3 = Vec3::splat(1.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionConfig {
    pub mover_box: AABB,
    pub volume_box: AABB,
}

impl CollisionConfig {
    pub fn validate(&self) -> Result<()> {
        self.mover_box.validate()?;
        self.volume_box.validate()
    }
}

impl Default for CollisionConfig {
    fn default() -> Self {
        CollisionConfig {
            mover_box: AABB {
                min: MOVER_MIN,
                max: MOVER_MAX,
            },
            volume_box: AABB {
                min: VOLUME_MIN,
                max: VOLUME_MAX,
            },
        }
    }
}
