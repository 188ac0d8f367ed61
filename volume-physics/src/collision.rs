use crate::aabb::AABB;
use glam::Vec3;

/// Push directions in evaluation order. Ties go to the earliest entry.
const PUSH_AXES: [Vec3; 6] = [
    Vec3::X,
    Vec3::Y,
    Vec3::Z,
    Vec3::NEG_X,
    Vec3::NEG_Y,
    Vec3::NEG_Z,
];

/// Single-axis displacement that moves `mover` out of `obstacle`.
///
/// Candidates are the penetration depths `obstacle.max - mover.min` (push
/// towards +axis) and `mover.max - obstacle.min` (push towards -axis).
/// Negative and non-finite candidates are discarded and the smallest of the
/// rest wins. Returns `None` when nothing is left, in which case the mover
/// is left where it is.
pub fn minimum_translation(mover: &AABB, obstacle: &AABB) -> Option<Vec3> {
    let towards_positive = obstacle.max - mover.min;
    let towards_negative = mover.max - obstacle.min;
    let candidates = [
        towards_positive.x,
        towards_positive.y,
        towards_positive.z,
        towards_negative.x,
        towards_negative.y,
        towards_negative.z,
    ];

    let mut best: Option<(f32, Vec3)> = None;
    for (depth, axis) in candidates.into_iter().zip(PUSH_AXES) {
        if !depth.is_finite() || depth < 0.0 {
            continue;
        }
        match best {
            Some((best_depth, _)) if depth >= best_depth => {}
            _ => best = Some((depth, axis)),
        }
    }

    best.map(|(depth, axis)| axis * depth)
}
