use glam::Vec3;
use volume_physics::{Hierarchy, Node, NodeId, NodeTags};

use crate::error::AppError;

/// Eye height above the floor; the mover's box reaches exactly down to it.
pub const EYE_HEIGHT: f32 = 2.0;

const ARENA_HALF_SIZE: f32 = 20.0;
const WALL_HALF_HEIGHT: f32 = 2.0;
const PICKUP_SCALE: f32 = 0.5;

const PICKUP_SPOTS: [Vec3; 4] = [
    Vec3::new(-10.0, 1.0, 10.0),
    Vec3::new(-10.0, 1.0, -10.0),
    Vec3::new(10.0, 1.0, -10.0),
    Vec3::new(10.0, 1.0, 10.0),
];

/// Order in which the autopilot visits the pickups.
const ROUTE: [usize; 4] = [1, 2, 3, 0];

/// Where the mover starts and the route the autopilot walks.
#[derive(Debug, Clone)]
pub struct Layout {
    pub spawn: Vec3,
    pub route: Vec<Vec3>,
}

/// Builds the level: a floor, perimeter walls, an inner wall, four pickups
/// and one scare volume.
///
/// Solid and scare volumes are bare tagged nodes. Walls and pickups carry a
/// visible mesh child, which disappears with the pickup once it is collected.
pub fn build(hierarchy: &mut Hierarchy) -> Result<Layout, AppError> {
    let map = hierarchy.insert(Node::new("map"));

    solid(
        hierarchy,
        map,
        "floor",
        Vec3::new(0.0, -1.0, 0.0),
        Vec3::new(ARENA_HALF_SIZE, 1.0, ARENA_HALF_SIZE),
    )?;

    let wall_offset = ARENA_HALF_SIZE + 1.0;
    let long_side = Vec3::new(wall_offset + 1.0, WALL_HALF_HEIGHT, 1.0);
    let short_side = Vec3::new(1.0, WALL_HALF_HEIGHT, wall_offset + 1.0);
    let perimeter = [
        ("wall_north", Vec3::new(0.0, WALL_HALF_HEIGHT, -wall_offset), long_side),
        ("wall_south", Vec3::new(0.0, WALL_HALF_HEIGHT, wall_offset), long_side),
        ("wall_west", Vec3::new(-wall_offset, WALL_HALF_HEIGHT, 0.0), short_side),
        ("wall_east", Vec3::new(wall_offset, WALL_HALF_HEIGHT, 0.0), short_side),
    ];
    for (name, translation, half_extents) in perimeter {
        solid(hierarchy, map, name, translation, half_extents)?;
    }

    solid(
        hierarchy,
        map,
        "wall_inner",
        Vec3::new(0.0, WALL_HALF_HEIGHT, -5.0),
        Vec3::new(8.0, WALL_HALF_HEIGHT, 0.5),
    )?;

    for (index, spot) in PICKUP_SPOTS.iter().enumerate() {
        let pickup = hierarchy.insert_child(
            map,
            Node::new(format!("apricot_{index}"))
                .with_translation(*spot)
                .with_scale(Vec3::splat(PICKUP_SCALE))
                .with_tags(NodeTags::pickup()),
        )?;
        hierarchy.insert_child(pickup, Node::new(format!("apricot_{index}_mesh")))?;
    }

    hierarchy.insert_child(
        map,
        Node::new("scare")
            .with_translation(Vec3::new(0.0, WALL_HALF_HEIGHT, -10.0))
            .with_scale(Vec3::splat(2.0))
            .with_tags(NodeTags::scare()),
    )?;

    // The first leg cuts diagonally across the inner wall and slides along it.
    let route = ROUTE
        .iter()
        .map(|&index| {
            let spot = PICKUP_SPOTS[index];
            Vec3::new(spot.x, EYE_HEIGHT, spot.z)
        })
        .collect();

    Ok(Layout {
        spawn: Vec3::new(0.0, EYE_HEIGHT, 10.0),
        route,
    })
}

fn solid(
    hierarchy: &mut Hierarchy,
    parent: NodeId,
    name: &str,
    translation: Vec3,
    half_extents: Vec3,
) -> Result<NodeId, AppError> {
    let volume = hierarchy.insert_child(
        parent,
        Node::new(name)
            .with_translation(translation)
            .with_scale(half_extents)
            .with_tags(NodeTags::solid()),
    )?;
    hierarchy.insert_child(volume, Node::new(format!("{name}_mesh")))?;
    Ok(volume)
}
