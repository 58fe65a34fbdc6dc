//! Property-based tests for the aligner.
//!
//! These tests use proptest to generate random placements and point pairs
//! and verify the geometric guarantees of each mode.
//!
//! Run with: cargo test -p mesh-align -- proptest

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use mesh_align::{AlignmentMode, AlignmentRequest, WorldTransform, align, shortest_arc};
use nalgebra::{Point3, Unit, UnitQuaternion, Vector3};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn arb_point() -> impl Strategy<Value = Point3<f64>> {
    prop::array::uniform3(-10.0..10.0f64).prop_map(|[x, y, z]| Point3::new(x, y, z))
}

/// A random rigid placement: rotation from a scaled axis, plus translation.
fn arb_placement() -> impl Strategy<Value = WorldTransform> {
    (
        prop::array::uniform3(-3.0..3.0f64),
        prop::array::uniform3(-50.0..50.0f64),
    )
        .prop_map(|([ax, ay, az], [tx, ty, tz])| {
            let rotation = UnitQuaternion::from_scaled_axis(Vector3::new(ax, ay, az));
            WorldTransform::from_parts(&rotation, Vector3::new(tx, ty, tz))
        })
}

fn arb_points(n: usize) -> impl Strategy<Value = Vec<Point3<f64>>> {
    prop::collection::vec(arb_point(), n)
}

// =============================================================================
// Helpers
// =============================================================================

fn world(request: &AlignmentRequest, transform: &WorldTransform) -> Vec<Point3<f64>> {
    request
        .source_points_local
        .iter()
        .map(|p| transform.transform_point(p))
        .collect()
}

fn projected(v: Vector3<f64>, axis: &Unit<Vector3<f64>>) -> Vector3<f64> {
    let axis = axis.into_inner();
    v - axis * v.dot(&axis)
}

fn well_separated(points: &[Point3<f64>]) -> bool {
    (points[1] - points[0]).norm() > 0.5
}

fn roll_defined(points: &[Point3<f64>]) -> bool {
    let axis = Unit::new_normalize(points[1] - points[0]);
    projected(points[2] - points[0], &axis).norm() > 0.5
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn proptest_position_only_lands_pivot(
        placement in arb_placement(),
        source in arb_points(1),
        target in arb_points(1),
    ) {
        let request = AlignmentRequest::new(source, placement, target.clone());
        let result = align(&request).unwrap();

        prop_assert_eq!(result.mode, AlignmentMode::PositionOnly);
        let p1 = world(&request, &result.transform)[0];
        prop_assert!((p1 - target[0]).norm() < 1e-9);
        prop_assert!(result.transform.linear_part() == placement.linear_part());
    }

    #[test]
    fn proptest_position_only_idempotent(
        placement in arb_placement(),
        source in arb_points(1),
    ) {
        let target = vec![placement.transform_point(&source[0])];
        let request = AlignmentRequest::new(source, placement, target);
        let result = align(&request).unwrap();

        prop_assert!(result.offset.norm() < 1e-12);
    }

    #[test]
    fn proptest_two_points_align_direction(
        placement in arb_placement(),
        source in arb_points(2),
        target in arb_points(2),
    ) {
        let request = AlignmentRequest::new(source, placement, target.clone());
        prop_assume!(well_separated(&world(&request, &placement)));
        prop_assume!(well_separated(&target));

        let result = align(&request).unwrap();
        prop_assert_eq!(result.applied, AlignmentMode::PartialRotation);

        let aligned = world(&request, &result.transform);
        prop_assert!((aligned[0] - target[0]).norm() < 1e-5);

        let source_dir = (aligned[1] - aligned[0]).normalize();
        let target_dir = (target[1] - target[0]).normalize();
        prop_assert!(source_dir.cross(&target_dir).norm() < 1e-7);
        prop_assert!(source_dir.dot(&target_dir) > 0.0);
    }

    #[test]
    fn proptest_three_points_align_roll(
        placement in arb_placement(),
        source in arb_points(3),
        target in arb_points(3),
    ) {
        let request = AlignmentRequest::new(source, placement, target.clone());
        let start = world(&request, &placement);
        prop_assume!(well_separated(&start) && roll_defined(&start));
        prop_assume!(well_separated(&target) && roll_defined(&target));

        let result = align(&request).unwrap();
        prop_assert_eq!(result.applied, AlignmentMode::FullRotation);

        let aligned = world(&request, &result.transform);
        prop_assert!((aligned[0] - target[0]).norm() < 1e-5);

        let axis = Unit::new_normalize(target[1] - target[0]);
        let source_dir = (aligned[1] - aligned[0]).normalize();
        prop_assert!(source_dir.cross(&axis.into_inner()).norm() < 1e-7);

        let source_roll = projected(aligned[2] - aligned[0], &axis).normalize();
        let target_roll = projected(target[2] - target[0], &axis).normalize();
        prop_assert!(source_roll.cross(&target_roll).norm() < 1e-7);
        prop_assert!(source_roll.dot(&target_roll) > 0.0);
    }

    #[test]
    fn proptest_rigid_motion_preserves_shape(
        placement in arb_placement(),
        source in arb_points(3),
        target in arb_points(3),
    ) {
        let request = AlignmentRequest::new(source, placement, target);
        let result = align(&request).unwrap();

        let before = world(&request, &placement);
        let after = world(&request, &result.transform);
        for (i, j) in [(0, 1), (1, 2), (0, 2)] {
            let d0 = (before[i] - before[j]).norm();
            let d1 = (after[i] - after[j]).norm();
            prop_assert!((d0 - d1).abs() < 1e-9);
        }
    }

    #[test]
    fn proptest_anti_parallel_is_finite(
        pivot in arb_point(),
        direction in prop::array::uniform3(-1.0..1.0f64),
    ) {
        let direction = Vector3::from(direction);
        prop_assume!(direction.norm() > 0.1);

        let request = AlignmentRequest::new(
            vec![pivot, pivot + direction],
            WorldTransform::identity(),
            vec![pivot, pivot - direction],
        );
        let result = align(&request).unwrap();

        prop_assert!(result.transform.is_finite());
        let tip = result.transform.transform_point(&(pivot + direction));
        // acos loses precision next to -1, so allow a few ulps of angle.
        prop_assert!((tip - (pivot - direction)).norm() < 1e-6);
    }

    #[test]
    fn proptest_reversed_direction_under_placement(
        placement in arb_placement(),
        source in arb_points(2),
        t0 in arb_point(),
    ) {
        let start: Vec<_> = source.iter().map(|p| placement.transform_point(p)).collect();
        prop_assume!(well_separated(&start));

        let target = vec![t0, t0 - (start[1] - start[0])];
        let request = AlignmentRequest::new(source, placement, target.clone());
        let result = align(&request).unwrap();
        prop_assert_eq!(result.applied, AlignmentMode::PartialRotation);

        let aligned = world(&request, &result.transform);
        prop_assert!((aligned[0] - target[0]).norm() < 1e-9);
        let source_dir = (aligned[1] - aligned[0]).normalize();
        let target_dir = (target[1] - target[0]).normalize();
        prop_assert!((source_dir - target_dir).norm() < 1e-9);
    }

    #[test]
    fn proptest_shortest_arc_near_opposite(
        from in prop::array::uniform3(-1.0..1.0f64),
        nudge in prop::array::uniform3(-1.0..1.0f64),
        exponent in -16i32..-6,
    ) {
        let from = Vector3::from(from);
        prop_assume!(from.norm() > 0.1);

        let to = -from + Vector3::from(nudge) * 10f64.powi(exponent);
        let q = shortest_arc(&from, &to, 1e-12).unwrap();
        prop_assert!((q * from.normalize() - to.normalize()).norm() < 1e-9);
    }

    #[test]
    fn proptest_shortest_arc_maps_direction(
        from in prop::array::uniform3(-1.0..1.0f64),
        to in prop::array::uniform3(-1.0..1.0f64),
    ) {
        let from = Vector3::from(from);
        let to = Vector3::from(to);
        prop_assume!(from.norm() > 0.1 && to.norm() > 0.1);

        let q = shortest_arc(&from, &to, 1e-12).unwrap();
        prop_assert!((q * from.normalize() - to.normalize()).norm() < 1e-9);
    }

    #[test]
    fn proptest_collinear_third_point_degrades(
        placement in arb_placement(),
        source in arb_points(2),
        target in arb_points(3),
        t in -2.0..2.0f64,
    ) {
        let third = source[0] + (source[1] - source[0]) * t;
        let mut three = source.clone();
        three.push(third);

        let partial = align(&AlignmentRequest::new(source, placement, target[..2].to_vec())).unwrap();
        let full = align(&AlignmentRequest::new(three, placement, target)).unwrap();

        prop_assume!(partial.applied == AlignmentMode::PartialRotation);
        prop_assert_eq!(full.applied, AlignmentMode::PartialRotation);
        prop_assert!(full.transform.approx_eq(&partial.transform, 1e-12));
        prop_assert!(full.transform.is_finite());
    }
}
