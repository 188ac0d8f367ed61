use crate::aabb::AABB;
use crate::config::CollisionConfig;
use glam::{Mat4, Quat, Vec3};

/// The agent kept out of solid volumes.
#[derive(Debug, Clone)]
pub struct Mover {
    pub position: Vec3,
    /// Body orientation. Camera pitch does not belong here, only yaw.
    pub rotation: Quat,
    local_aabb: AABB,
}

impl Mover {
    pub fn new(position: Vec3, local_aabb: AABB) -> Self {
        Mover {
            position,
            rotation: Quat::IDENTITY,
            local_aabb,
        }
    }

    #[inline]
    pub fn local_aabb(&self) -> AABB {
        self.local_aabb
    }

    #[inline]
    pub fn world_transform(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position)
    }

    pub fn get_world_aabb(&self) -> AABB {
        self.local_aabb.transform(&self.world_transform())
    }
}

impl Default for Mover {
    fn default() -> Self {
        Mover::new(Vec3::ZERO, CollisionConfig::default().mover_box)
    }
}
