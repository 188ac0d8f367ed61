use crate::error::{PhysicsError, Result};
use glam::{Mat4, Quat, Vec3};
use slotmap::SlotMap;
use smallvec::SmallVec;
use std::collections::HashSet;

slotmap::new_key_type! {
    /// Generational handle to a node in a [`Hierarchy`]. Once the node is
    /// removed the handle never resolves again, even if the slot is reused.
    pub struct NodeId;
}

/// Authoring tags read when the level is scanned for collision volumes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeTags {
    pub solid: bool,
    pub pickup: bool,
    pub scare: bool,
}

impl NodeTags {
    pub const NONE: NodeTags = NodeTags {
        solid: false,
        pickup: false,
        scare: false,
    };

    pub fn solid() -> Self {
        NodeTags {
            solid: true,
            ..Self::NONE
        }
    }

    pub fn pickup() -> Self {
        NodeTags {
            pickup: true,
            ..Self::NONE
        }
    }

    pub fn scare() -> Self {
        NodeTags {
            scare: true,
            ..Self::NONE
        }
    }

    /// Collision volumes are never drawn themselves.
    #[inline]
    pub fn is_collision_volume(&self) -> bool {
        self.solid || self.pickup || self.scare
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub tags: NodeTags,
    pub destroyed: bool,
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 4]>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Node {
            name: name.into(),
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            tags: NodeTags::NONE,
            destroyed: false,
            parent: None,
            children: SmallVec::new(),
        }
    }

    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_tags(mut self, tags: NodeTags) -> Self {
        self.tags = tags;
        self
    }

    #[inline]
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Arena of scene nodes. Parent and child links are stored as [`NodeId`]s,
/// so removing a node can never leave a dangling reference behind.
///
/// Besides the tree itself the hierarchy keeps a render set: the nodes a
/// renderer starts its walk from. Roots join it on insertion, other nodes
/// are added explicitly.
#[derive(Debug, Default)]
pub struct Hierarchy {
    nodes: SlotMap<NodeId, Node>,
    roots: Vec<NodeId>,
    render_set: Vec<NodeId>,
}

impl Hierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a top-level node.
    pub fn insert(&mut self, mut node: Node) -> NodeId {
        node.parent = None;
        node.children.clear();
        let id = self.nodes.insert(node);
        self.roots.push(id);
        self.render_set.push(id);
        id
    }

    pub fn insert_child(&mut self, parent: NodeId, mut node: Node) -> Result<NodeId> {
        if !self.nodes.contains_key(parent) {
            return Err(PhysicsError::MissingReference { node: parent });
        }
        node.parent = Some(parent);
        node.children.clear();
        let id = self.nodes.insert(node);
        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.push(id);
        }
        Ok(id)
    }

    /// Removes a node and its whole subtree. Handles to any of them go stale.
    pub fn remove(&mut self, id: NodeId) -> Option<Node> {
        let parent = self.nodes.get(id)?.parent;
        match parent {
            Some(parent) => {
                if let Some(parent_node) = self.nodes.get_mut(parent) {
                    parent_node.children.retain(|child| *child != id);
                }
            }
            None => self.roots.retain(|root| *root != id),
        }

        let mut pending: Vec<NodeId> = vec![id];
        let mut removed = None;
        while let Some(next) = pending.pop() {
            if let Some(node) = self.nodes.remove(next) {
                pending.extend(node.children.iter().copied());
                if next == id {
                    removed = Some(node);
                }
            }
        }

        let nodes = &self.nodes;
        self.render_set.retain(|entry| nodes.contains_key(*entry));
        removed
    }

    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every node, depth first, roots and children in insertion order.
    pub fn traverse(&self) -> Vec<NodeId> {
        let mut visited = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            visited.push(id);
            stack.extend(node.children.iter().rev().copied());
        }
        visited
    }

    /// Local matrices composed from the root down to `id`.
    pub fn world_transform(&self, id: NodeId) -> Option<Mat4> {
        let node = self.nodes.get(id)?;
        let parent_world = self.parent_world(node)?;
        Some(parent_world * node.local_matrix())
    }

    /// World transform of `id` with the node's own scale left out. Ancestor
    /// scale still applies.
    pub fn collision_frame(&self, id: NodeId) -> Option<Mat4> {
        let node = self.nodes.get(id)?;
        let parent_world = self.parent_world(node)?;
        Some(parent_world * Mat4::from_rotation_translation(node.rotation, node.translation))
    }

    fn parent_world(&self, node: &Node) -> Option<Mat4> {
        let mut world = Mat4::IDENTITY;
        let mut cursor = node.parent;
        while let Some(ancestor) = cursor {
            let ancestor_node = self.nodes.get(ancestor)?;
            world = ancestor_node.local_matrix() * world;
            cursor = ancestor_node.parent;
        }
        Some(world)
    }

    /// Whether `id` or one of its ancestors carries the destroyed flag. Missing
    /// nodes report `false`.
    pub fn is_destroyed(&self, id: NodeId) -> bool {
        self.nodes
            .get(id)
            .is_some_and(|node| node.destroyed || self.has_destroyed_ancestor(node))
    }

    fn has_destroyed_ancestor(&self, node: &Node) -> bool {
        let mut cursor = node.parent;
        while let Some(ancestor) = cursor.and_then(|id| self.nodes.get(id)) {
            if ancestor.destroyed {
                return true;
            }
            cursor = ancestor.parent;
        }
        false
    }

    /// Flags a node so renderers and later collision passes skip it. Returns
    /// `false` if the node no longer exists.
    pub fn mark_destroyed(&mut self, id: NodeId) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.destroyed = true;
                true
            }
            None => false,
        }
    }

    /// Adds a node to the render set. Returns `false` if it was already there
    /// or no longer exists.
    pub fn add_to_render_set(&mut self, id: NodeId) -> bool {
        if !self.nodes.contains_key(id) || self.render_set.contains(&id) {
            return false;
        }
        self.render_set.push(id);
        true
    }

    pub fn render_set(&self) -> &[NodeId] {
        &self.render_set
    }

    /// Nodes a renderer should draw, with their world transforms. Walks the
    /// render set recursively. Destroyed nodes are skipped together with their
    /// subtrees; collision volumes are not drawn themselves but their children
    /// are. Each node is yielded at most once.
    pub fn drawables(&self) -> Vec<(NodeId, Mat4)> {
        let mut drawables = Vec::new();
        let mut seen: HashSet<NodeId> = HashSet::new();
        let mut stack: Vec<(NodeId, Mat4)> = Vec::new();

        for &entry in self.render_set.iter().rev() {
            let Some(node) = self.nodes.get(entry) else {
                continue;
            };
            if self.has_destroyed_ancestor(node) {
                continue;
            }
            if let Some(parent_world) = self.parent_world(node) {
                stack.push((entry, parent_world));
            }
        }

        while let Some((id, parent_world)) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            if node.destroyed || !seen.insert(id) {
                continue;
            }
            let world = parent_world * node.local_matrix();
            if !node.tags.is_collision_volume() {
                drawables.push((id, world));
            }
            stack.extend(node.children.iter().rev().map(|child| (*child, world)));
        }

        drawables
    }
}
