use glam::{Mat4, Quat, Vec3};
use volume_physics::{AABB, PhysicsError, boxes_intersect, intervals_overlap, minimum_translation};

fn assert_vec3_approx_eq(a: Vec3, b: Vec3, tolerance: f32) {
    assert!(
        (a - b).length_squared() < tolerance * tolerance,
        "Assertion failed: {:?} != {:?} within tolerance {}",
        a,
        b,
        tolerance
    );
}

fn sample_boxes() -> Vec<AABB> {
    vec![
        AABB::new(Vec3::ZERO, Vec3::ONE),
        AABB::new(Vec3::splat(1.0), Vec3::splat(2.0)),
        AABB::new(Vec3::new(1.01, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0)),
        AABB::new(Vec3::splat(-5.0), Vec3::splat(5.0)),
        AABB::new(Vec3::new(-0.5, -2.0, -0.5), Vec3::new(0.5, 2.0, 0.5)),
        AABB::new(Vec3::new(10.0, 0.0, 0.0), Vec3::new(11.0, 1.0, 1.0)),
    ]
}

#[test]
fn test_touching_intervals_overlap() {
    assert!(intervals_overlap(0.0, 1.0, 1.0, 2.0));
    assert!(intervals_overlap(1.0, 2.0, 0.0, 1.0));
    assert!(!intervals_overlap(0.0, 1.0, 1.01, 2.0));
    assert!(!intervals_overlap(1.01, 2.0, 0.0, 1.0));
}

#[test]
fn test_intersection_is_commutative() {
    let boxes = sample_boxes();
    for a in &boxes {
        for b in &boxes {
            assert_eq!(
                boxes_intersect(a, b),
                boxes_intersect(b, a),
                "intersection of {:?} and {:?} depends on order",
                a,
                b
            );
        }
    }
}

#[test]
fn test_touching_boxes_intersect() {
    let a = AABB::new(Vec3::ZERO, Vec3::ONE);
    let touching_face = AABB::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));
    let touching_corner = AABB::new(Vec3::ONE, Vec3::splat(2.0));
    let apart = AABB::new(Vec3::new(0.0, 1.01, 0.0), Vec3::new(1.0, 2.0, 1.0));

    assert!(a.intersects(&touching_face));
    assert!(a.intersects(&touching_corner));
    assert!(!a.intersects(&apart));
}

#[test]
fn test_separated_on_one_axis_is_enough() {
    let a = AABB::new(Vec3::ZERO, Vec3::ONE);
    let b = AABB::new(Vec3::new(0.0, 0.0, 3.0), Vec3::new(1.0, 1.0, 4.0));
    assert!(!boxes_intersect(&a, &b));
}

#[test]
fn test_identity_transform_is_fixed_point() {
    for aabb in sample_boxes() {
        assert_eq!(aabb.transform(&Mat4::IDENTITY), aabb);
    }
}

#[test]
fn test_translation_transform() {
    let aabb = AABB::new(Vec3::splat(-1.0), Vec3::splat(1.0));
    let moved = aabb.transform(&Mat4::from_translation(Vec3::new(1.4, 0.0, 0.0)));
    assert_vec3_approx_eq(moved.min, Vec3::new(0.4, -1.0, -1.0), 1e-6);
    assert_vec3_approx_eq(moved.max, Vec3::new(2.4, 1.0, 1.0), 1e-6);
}

#[test]
fn test_non_uniform_scale_transform() {
    let aabb = AABB::new(Vec3::splat(-1.0), Vec3::splat(1.0));
    let scaled = aabb.transform(&Mat4::from_scale(Vec3::new(2.0, 0.5, 3.0)));
    assert_vec3_approx_eq(scaled.min, Vec3::new(-2.0, -0.5, -3.0), 1e-6);
    assert_vec3_approx_eq(scaled.max, Vec3::new(2.0, 0.5, 3.0), 1e-6);
}

#[test]
fn test_rotated_box_is_enclosed_loosely() {
    let aabb = AABB::new(Vec3::splat(-1.0), Vec3::splat(1.0));
    let rotated = aabb.transform(&Mat4::from_quat(Quat::from_rotation_y(
        std::f32::consts::FRAC_PI_4,
    )));
    let half_diagonal = std::f32::consts::SQRT_2;

    assert_vec3_approx_eq(
        rotated.min,
        Vec3::new(-half_diagonal, -1.0, -half_diagonal),
        1e-5,
    );
    assert_vec3_approx_eq(
        rotated.max,
        Vec3::new(half_diagonal, 1.0, half_diagonal),
        1e-5,
    );
}

#[test]
fn test_try_new_rejects_inverted_bounds() {
    let result = AABB::try_new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
    assert!(matches!(result, Err(PhysicsError::InvalidBounds { .. })));

    let flat = AABB::try_new(Vec3::ZERO, Vec3::new(1.0, 0.0, 1.0));
    assert!(flat.is_ok(), "zero thickness boxes are valid");
}

#[test]
fn test_scaled_with_negative_factor_fails_validation() {
    let aabb = AABB::new(Vec3::splat(-1.0), Vec3::splat(1.0));
    assert!(aabb.scaled(Vec3::new(1.0, -1.0, 1.0)).validate().is_err());
    assert!(aabb.scaled(Vec3::new(2.0, 3.0, 4.0)).validate().is_ok());
}

#[test]
fn test_infinite_extents_fail_validation() {
    let unbounded = AABB::new(Vec3::new(f32::NEG_INFINITY, -1.0, -1.0), Vec3::ONE);
    assert!(matches!(
        unbounded.validate(),
        Err(PhysicsError::InvalidBounds { .. })
    ));
    assert!(AABB::try_new(Vec3::ZERO, Vec3::new(1.0, f32::INFINITY, 1.0)).is_err());
}

#[test]
fn test_minimum_translation_picks_smallest_candidate() {
    let mover = AABB::new(Vec3::new(-0.5, -2.0, -0.5), Vec3::new(0.5, 2.0, 0.5));
    let obstacle = AABB::new(Vec3::new(0.4, -1.0, -1.0), Vec3::new(2.4, 1.0, 1.0));

    let push = minimum_translation(&mover, &obstacle).expect("boxes overlap");

    let expected = mover.max.x - obstacle.min.x;
    assert_vec3_approx_eq(push, Vec3::new(-expected, 0.0, 0.0), 1e-6);
}

#[test]
fn test_minimum_translation_tie_prefers_positive_x() {
    let mover = AABB::new(Vec3::splat(-1.0), Vec3::splat(1.0));
    let obstacle = AABB::new(Vec3::splat(-1.0), Vec3::splat(1.0));

    let push = minimum_translation(&mover, &obstacle).expect("boxes overlap");
    assert_eq!(push, Vec3::new(2.0, 0.0, 0.0));
}

#[test]
fn test_minimum_translation_tie_between_y_and_neg_x() {
    // +Y and -X both penetrate by 0.25; +Y is evaluated first.
    let mover = AABB::new(Vec3::new(0.0, 0.75, -5.0), Vec3::new(1.25, 3.0, 5.0));
    let obstacle = AABB::new(Vec3::new(1.0, -1.0, -5.0), Vec3::new(3.0, 1.0, 5.0));

    let push = minimum_translation(&mover, &obstacle).expect("boxes overlap");
    assert_eq!(push, Vec3::new(0.0, 0.25, 0.0));
}

#[test]
fn test_minimum_translation_discards_negative_candidates() {
    let mover = AABB::new(Vec3::ZERO, Vec3::ONE);
    let obstacle = AABB::new(Vec3::new(5.0, 5.0, 5.0), Vec3::new(6.0, 6.0, 6.0));

    // Every -axis candidate is negative here; the +axis ones remain.
    let push = minimum_translation(&mover, &obstacle).expect("positive candidates remain");
    assert_eq!(push, Vec3::new(6.0, 0.0, 0.0));
}

#[test]
fn test_minimum_translation_with_no_usable_candidate() {
    let mover = AABB {
        min: Vec3::splat(f32::NAN),
        max: Vec3::splat(f32::NAN),
    };
    let obstacle = AABB::new(Vec3::ZERO, Vec3::ONE);
    assert_eq!(minimum_translation(&mover, &obstacle), None);
}
