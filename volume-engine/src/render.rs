use crate::frustum::Frustum;
use glam::{Mat4, Vec3};
use volume_physics::{AABB, Hierarchy, NodeId};

const FOV_Y: f32 = std::f32::consts::FRAC_PI_2;
const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 100.0;

/// Every mesh in the level is a unit cube scaled by its node.
const MESH_BOUNDS: AABB = AABB {
    min: Vec3::splat(-1.0),
    max: Vec3::splat(1.0),
};

#[derive(Debug, Clone, Copy)]
pub struct DrawItem {
    pub node: NodeId,
    pub world: Mat4,
    pub distance_sq: f32,
}

#[derive(Debug, Default)]
pub struct DrawList {
    /// Front to back.
    pub items: Vec<DrawItem>,
    pub culled: usize,
}

pub fn view_projection(view: Mat4, aspect_ratio: f32) -> Mat4 {
    Mat4::perspective_rh(FOV_Y, aspect_ratio, Z_NEAR, Z_FAR) * view
}

/// Collects what the renderer would draw this frame. Only nodes the
/// hierarchy reports as drawable are considered, so collision volumes and
/// retired pickups never show up.
pub fn build_draw_list(hierarchy: &Hierarchy, view_proj: &Mat4, eye: Vec3) -> DrawList {
    let frustum = Frustum::from_view_proj(view_proj);
    let mut list = DrawList::default();

    for (node, world) in hierarchy.drawables() {
        let bounds = MESH_BOUNDS.transform(&world);
        if !frustum.intersects_aabb(&bounds) {
            list.culled += 1;
            continue;
        }
        list.items.push(DrawItem {
            node,
            world,
            distance_sq: eye.distance_squared(bounds.center()),
        });
    }

    list.items.sort_by(|a, b| a.distance_sq.total_cmp(&b.distance_sq));
    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use volume_physics::{Node, NodeTags};

    fn looking_down_negative_z(eye: Vec3) -> Mat4 {
        let view = Mat4::look_at_rh(eye, eye - Vec3::Z, Vec3::Y);
        view_projection(view, 16.0 / 9.0)
    }

    #[test]
    fn test_culls_nodes_behind_camera() {
        let mut hierarchy = Hierarchy::new();
        let ahead =
            hierarchy.insert(Node::new("ahead").with_translation(Vec3::new(0.0, 0.0, -10.0)));
        hierarchy.insert(Node::new("behind").with_translation(Vec3::new(0.0, 0.0, 10.0)));

        let list = build_draw_list(&hierarchy, &looking_down_negative_z(Vec3::ZERO), Vec3::ZERO);
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items[0].node, ahead);
        assert_eq!(list.culled, 1);
    }

    #[test]
    fn test_sorted_front_to_back() {
        let mut hierarchy = Hierarchy::new();
        let far = hierarchy.insert(Node::new("far").with_translation(Vec3::new(0.0, 0.0, -30.0)));
        let near =
            hierarchy.insert(Node::new("near").with_translation(Vec3::new(0.0, 0.0, -5.0)));

        let list = build_draw_list(&hierarchy, &looking_down_negative_z(Vec3::ZERO), Vec3::ZERO);
        let order: Vec<_> = list.items.iter().map(|item| item.node).collect();
        assert_eq!(order, vec![near, far]);
    }

    #[test]
    fn test_volumes_hidden_but_children_drawn_until_destroyed() {
        let mut hierarchy = Hierarchy::new();
        let pickup = hierarchy.insert(
            Node::new("pickup")
                .with_translation(Vec3::new(0.0, 0.0, -5.0))
                .with_tags(NodeTags::pickup()),
        );
        let mesh = hierarchy.insert_child(pickup, Node::new("mesh")).unwrap();

        let view_proj = looking_down_negative_z(Vec3::ZERO);
        let list = build_draw_list(&hierarchy, &view_proj, Vec3::ZERO);
        let drawn: Vec<_> = list.items.iter().map(|item| item.node).collect();
        assert_eq!(drawn, vec![mesh]);

        hierarchy.mark_destroyed(pickup);
        let list = build_draw_list(&hierarchy, &view_proj, Vec3::ZERO);
        assert!(list.items.is_empty());
    }
}
