mod aabb;
mod collider;
mod collision;
pub mod config;
mod error;
mod event;
mod hierarchy;
mod manager;
mod mover;

pub use aabb::{AABB, boxes_intersect, intervals_overlap};
pub use collider::{Collider, ColliderKind, ColliderState};
pub use collision::minimum_translation;
pub use config::CollisionConfig;
pub use error::{PhysicsError, Result, TransformSubject};
pub use event::{TriggerEvent, TriggerFired};
pub use hierarchy::{Hierarchy, Node, NodeId, NodeTags};
pub use manager::{ColliderId, CollisionManager, Resolution, TickReport};
pub use mover::Mover;
