use crate::hierarchy::NodeId;
use crate::manager::ColliderId;

/// What a trigger volume means to the host. The collision core only carries
/// the value; counters and effects live with whoever drains the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerEvent {
    /// A collectible counted towards the end of the session.
    Pickup,
    /// A scripted scare effect.
    Scare,
    /// Host-defined event identified by a number.
    Custom(u32),
}

/// Published once per trigger volume, in the tick where the mover first
/// overlaps it and before the collider is retired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerFired {
    pub collider: ColliderId,
    pub node: NodeId,
    pub event: TriggerEvent,
}
