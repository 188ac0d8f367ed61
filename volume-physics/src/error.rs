use crate::hierarchy::NodeId;
use glam::Vec3;
use thiserror::Error;

pub type Result<T, E = PhysicsError> = std::result::Result<T, E>;

/// Whose world transform turned out to be unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformSubject {
    Mover,
    Node(NodeId),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    /// A box with `min > max` on some axis. Raised while building colliders
    /// and fatal to level setup.
    #[error("invalid bounds: min {min} exceeds max {max}")]
    InvalidBounds { min: Vec3, max: Vec3 },

    /// A world transform with non-finite entries. The affected collider is
    /// skipped for the current tick only.
    #[error("non-finite world transform for {subject:?}")]
    DegenerateTransform { subject: TransformSubject },

    /// The collider's node was removed from the hierarchy without retiring
    /// the collider first.
    #[error("node {node:?} no longer exists in the hierarchy")]
    MissingReference { node: NodeId },
}

impl PhysicsError {
    /// Per-tick errors only affect one collider; everything else aborts setup.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, PhysicsError::InvalidBounds { .. })
    }
}
