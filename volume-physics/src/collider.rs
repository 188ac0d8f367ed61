use crate::aabb::AABB;
use crate::error::{PhysicsError, Result};
use crate::event::TriggerEvent;
use crate::hierarchy::{Hierarchy, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColliderKind {
    /// Blocks the mover.
    Solid,
    /// Fires once on first overlap, then retires. Never blocks.
    Trigger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColliderState {
    Active,
    /// Terminal.
    Destroyed,
}

/// A box volume bound to one hierarchy node.
#[derive(Debug, Clone)]
pub struct Collider {
    node: NodeId,
    local_aabb: AABB,
    kind: ColliderKind,
    event: Option<TriggerEvent>,
    state: ColliderState,
}

impl Collider {
    /// Builds a collider for `node` from `volume_box` scaled by the node's
    /// authored scale. The scale is read here once and never again.
    pub fn new(
        hierarchy: &Hierarchy,
        node: NodeId,
        kind: ColliderKind,
        event: Option<TriggerEvent>,
        volume_box: AABB,
    ) -> Result<Self> {
        let scale = hierarchy
            .node(node)
            .ok_or(PhysicsError::MissingReference { node })?
            .scale;

        let local_aabb = volume_box.scaled(scale);
        local_aabb.validate()?;

        if kind == ColliderKind::Solid && event.is_some() {
            log::debug!("Ignoring trigger payload on solid collider {:?}", node);
        }

        Ok(Collider {
            node,
            local_aabb,
            kind,
            event: if kind == ColliderKind::Trigger { event } else { None },
            state: ColliderState::Active,
        })
    }

    #[inline]
    pub fn node(&self) -> NodeId {
        self.node
    }

    #[inline]
    pub fn local_aabb(&self) -> AABB {
        self.local_aabb
    }

    #[inline]
    pub fn kind(&self) -> ColliderKind {
        self.kind
    }

    #[inline]
    pub fn event(&self) -> Option<TriggerEvent> {
        self.event
    }

    #[inline]
    pub fn state(&self) -> ColliderState {
        self.state
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state == ColliderState::Active
    }

    /// Marks the collider destroyed and flags its node so it is no longer
    /// drawn. Returns `false` if the collider was already destroyed.
    pub fn retire(&mut self, hierarchy: &mut Hierarchy) -> bool {
        if self.state == ColliderState::Destroyed {
            return false;
        }
        self.state = ColliderState::Destroyed;
        if !hierarchy.mark_destroyed(self.node) {
            log::debug!("Retired collider whose node {:?} is already gone", self.node);
        }
        true
    }
}
