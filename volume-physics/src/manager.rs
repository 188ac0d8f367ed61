use crate::collider::{Collider, ColliderKind};
use crate::collision::minimum_translation;
use crate::config::CollisionConfig;
use crate::error::{PhysicsError, Result, TransformSubject};
use crate::event::{TriggerEvent, TriggerFired};
use crate::hierarchy::{Hierarchy, NodeId};
use crate::mover::Mover;
use crossbeam_channel::{Receiver, Sender, unbounded};
use glam::Vec3;

/// Position of a collider in the manager's evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColliderId(usize);

impl ColliderId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Outcome of resolving the mover against one collider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    /// Collider was already destroyed, or retired because its node was, and
    /// was not evaluated.
    Inactive,
    /// No overlap.
    Separated,
    /// Trigger fired and the collider retired.
    Triggered(Option<TriggerEvent>),
    /// Mover displaced by this vector.
    Pushed(Vec3),
    /// Overlap without any usable push direction. Mover left in place.
    Enclosed,
}

#[derive(Debug, Default)]
pub struct TickReport {
    pub evaluated: usize,
    /// Non-zero pushes. A resting contact resolves to a zero push and is not
    /// counted.
    pub pushes: usize,
    pub triggers: usize,
    pub errors: Vec<PhysicsError>,
}

impl TickReport {
    fn record(&mut self, resolution: Resolution) {
        match resolution {
            Resolution::Inactive => return,
            Resolution::Pushed(push) if push != Vec3::ZERO => self.pushes += 1,
            Resolution::Triggered(_) => self.triggers += 1,
            Resolution::Pushed(_) | Resolution::Separated | Resolution::Enclosed => {}
        }
        self.evaluated += 1;
    }
}

/// Owns the collision volumes of a session and keeps the mover out of the
/// solid ones.
///
/// Colliders are evaluated in registration order. Retiring a collider only
/// flips its state, the list itself never changes shape during a tick.
pub struct CollisionManager {
    colliders: Vec<Collider>,
    mover: Mover,
    config: CollisionConfig,
    event_sender: Sender<TriggerFired>,
    event_receiver: Receiver<TriggerFired>,
}

impl CollisionManager {
    pub fn new(mover: Mover) -> Self {
        let (event_sender, event_receiver) = unbounded::<TriggerFired>();
        Self {
            colliders: Vec::new(),
            mover,
            config: CollisionConfig::default(),
            event_sender,
            event_receiver,
        }
    }

    /// Places a mover built from `config.mover_box` at `position`.
    pub fn with_config(position: Vec3, config: CollisionConfig) -> Result<Self> {
        config.validate()?;
        let mut manager = Self::new(Mover::new(position, config.mover_box));
        manager.config = config;
        Ok(manager)
    }

    /// Receiving end of the trigger channel. Every clone sees each event once
    /// between them, so the host should drain from a single place.
    pub fn events(&self) -> Receiver<TriggerFired> {
        self.event_receiver.clone()
    }

    pub fn mover(&self) -> &Mover {
        &self.mover
    }

    pub fn mover_mut(&mut self) -> &mut Mover {
        &mut self.mover
    }

    pub fn config(&self) -> &CollisionConfig {
        &self.config
    }

    pub fn collider(&self, id: ColliderId) -> Option<&Collider> {
        self.colliders.get(id.0)
    }

    pub fn colliders(&self) -> impl Iterator<Item = (ColliderId, &Collider)> {
        self.colliders
            .iter()
            .enumerate()
            .map(|(index, collider)| (ColliderId(index), collider))
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.colliders.iter().filter(|c| c.is_active()).count()
    }

    /// Wraps `node` in a collider, appends it to the evaluation order and puts
    /// the node in the render set. Renderers skip it by its tags.
    pub fn register(
        &mut self,
        hierarchy: &mut Hierarchy,
        node: NodeId,
        kind: ColliderKind,
        event: Option<TriggerEvent>,
    ) -> Result<ColliderId> {
        let collider = Collider::new(hierarchy, node, kind, event, self.config.volume_box)?;
        let id = ColliderId(self.colliders.len());
        log::debug!(
            "Registered {:?} collider {:?} for node {:?} with local box {:?}",
            kind,
            id,
            node,
            collider.local_aabb()
        );
        self.colliders.push(collider);
        hierarchy.add_to_render_set(node);
        Ok(id)
    }

    /// Registers a collider for every tagged node in the hierarchy. A node
    /// with several tags gets one collider per tag. Stops at the first error.
    pub fn register_scene(&mut self, hierarchy: &mut Hierarchy) -> Result<usize> {
        let mut registered = 0;
        for node in hierarchy.traverse() {
            let Some(tags) = hierarchy.node(node).map(|n| n.tags) else {
                continue;
            };
            if tags.solid {
                self.register(hierarchy, node, ColliderKind::Solid, None)?;
                registered += 1;
            }
            if tags.pickup {
                self.register(
                    hierarchy,
                    node,
                    ColliderKind::Trigger,
                    Some(TriggerEvent::Pickup),
                )?;
                registered += 1;
            }
            if tags.scare {
                self.register(
                    hierarchy,
                    node,
                    ColliderKind::Trigger,
                    Some(TriggerEvent::Scare),
                )?;
                registered += 1;
            }
        }
        log::debug!("Registered {} colliders from scene", registered);
        Ok(registered)
    }

    /// Retires a collider from outside the tick. Returns `false` for unknown
    /// or already destroyed colliders.
    pub fn remove(&mut self, id: ColliderId, hierarchy: &mut Hierarchy) -> bool {
        self.colliders
            .get_mut(id.0)
            .is_some_and(|collider| collider.retire(hierarchy))
    }

    /// One detect-and-resolve pass over every live collider.
    pub fn tick(&mut self, dt: f32, hierarchy: &mut Hierarchy) -> TickReport {
        log::trace!("Collision tick dt={dt:.4}, {} colliders", self.colliders.len());
        let mut report = TickReport::default();

        for index in 0..self.colliders.len() {
            if !self.colliders[index].is_active() {
                continue;
            }
            match self.resolve(ColliderId(index), hierarchy) {
                Ok(resolution) => report.record(resolution),
                Err(err) => {
                    log::warn!("Skipping collider {} this tick: {}", index, err);
                    report.errors.push(err);
                }
            }
        }

        report
    }

    /// Resolves the mover against a single collider.
    pub fn resolve(&mut self, id: ColliderId, hierarchy: &mut Hierarchy) -> Result<Resolution> {
        let Some(collider) = self.colliders.get_mut(id.0) else {
            return Ok(Resolution::Inactive);
        };
        if !collider.is_active() {
            return Ok(Resolution::Inactive);
        }

        let node = collider.node();
        let Some(frame) = hierarchy.collision_frame(node) else {
            collider.retire(hierarchy);
            return Err(PhysicsError::MissingReference { node });
        };
        if hierarchy.is_destroyed(node) {
            log::debug!("Node {:?} was destroyed elsewhere, retiring its collider", node);
            collider.retire(hierarchy);
            return Ok(Resolution::Inactive);
        }

        let mover_frame = self.mover.world_transform();
        if !mover_frame.is_finite() {
            return Err(PhysicsError::DegenerateTransform {
                subject: TransformSubject::Mover,
            });
        }
        if !frame.is_finite() {
            return Err(PhysicsError::DegenerateTransform {
                subject: TransformSubject::Node(node),
            });
        }

        let mover_box = self.mover.local_aabb().transform(&mover_frame);
        let collider_box = collider.local_aabb().transform(&frame);
        if !mover_box.is_finite() {
            return Err(PhysicsError::DegenerateTransform {
                subject: TransformSubject::Mover,
            });
        }
        if !collider_box.is_finite() {
            return Err(PhysicsError::DegenerateTransform {
                subject: TransformSubject::Node(node),
            });
        }

        if !mover_box.intersects(&collider_box) {
            return Ok(Resolution::Separated);
        }

        match collider.kind() {
            ColliderKind::Trigger => {
                let event = collider.event();
                if let Some(event) = event {
                    let fired = TriggerFired {
                        collider: id,
                        node,
                        event,
                    };
                    if self.event_sender.send(fired).is_err() {
                        log::error!("Trigger channel closed for {:?}", node);
                    }
                }
                collider.retire(hierarchy);
                log::debug!("Trigger {:?} fired for node {:?}", event, node);
                Ok(Resolution::Triggered(event))
            }
            ColliderKind::Solid => match minimum_translation(&mover_box, &collider_box) {
                Some(push) => {
                    self.mover.position += push;
                    Ok(Resolution::Pushed(push))
                }
                None => {
                    log::debug!("Mover enclosed by {:?}, leaving it in place", node);
                    Ok(Resolution::Enclosed)
                }
            },
        }
    }
}
