//! Property-based tests for the table geometry and proposal workflow.
//!
//! Run with: cargo test --test geometry_properties

use kowsim::battle::*;
use kowsim::core::config::EngineConfig;
use kowsim::geometry::{closest_point, OrientedRect, Point};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn arb_point() -> impl Strategy<Value = Point> {
    (-100.0..100.0f64, -100.0..100.0f64).prop_map(|(x, y)| Point::new(x, y))
}

fn arb_rect() -> impl Strategy<Value = OrientedRect> {
    (arb_point(), 0.0..20.0f64, 0.0..20.0f64, 0.0..360.0f64)
        .prop_map(|(center, width, depth, rotation)| OrientedRect::new(center, width, depth, rotation))
}

fn arb_pose() -> impl Strategy<Value = Pose> {
    (0.0..72.0f64, 0.0..48.0f64, 0.0..360.0f64).prop_map(|(x, y, rot)| Pose::new(x, y, rot))
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn closest_point_never_beats_by_a_corner(point in arb_point(), rect in arb_rect()) {
        let (_, distance) = closest_point(point, &rect);
        let nearest_corner = rect
            .corners()
            .iter()
            .map(|c| c.distance(&point))
            .fold(f64::INFINITY, f64::min);
        prop_assert!(distance <= nearest_corner + 1e-9);
    }

    #[test]
    fn rotation_fold_is_symmetric(delta in -359.999..359.999f64) {
        let folded = fold_rotation(delta);
        prop_assert_eq!(folded, fold_rotation(-delta));
        prop_assert!((0.0..=180.0).contains(&folded));
    }

    #[test]
    fn axis_removes_a_degree_of_freedom(
        pose in arb_pose(),
        kind in prop_oneof![Just(AxisKind::Forward), Just(AxisKind::Sideways)],
        t in -30.0..30.0f64,
        off_a in -30.0..30.0f64,
        off_b in -30.0..30.0f64,
    ) {
        let mut field = Battlefield::new(&EngineConfig::default());
        let id = field.add_unit(Unit::new("Probe", Footprint::new(5.0, 2.0).unwrap(), pose));
        let handle = field.begin_move(id).unwrap();
        field.toggle_axis(handle, kind).unwrap();

        let axis = kind.axis_for(&pose);
        let normal = Point::new(-axis.direction.y, axis.direction.x);
        let along = axis.origin + axis.direction * t;

        let a = field.update_free(handle, along + normal * off_a).unwrap().position();
        let b = field.update_free(handle, along + normal * off_b).unwrap().position();
        prop_assert!(a.distance(&b) < 1e-9);
        prop_assert!(a.distance(&along) < 1e-9);
    }

    #[test]
    fn cancel_restores_committed_pose(pose in arb_pose(), cursor in arb_point(), aim in arb_point()) {
        let mut field = Battlefield::new(&EngineConfig::default());
        let id = field.add_unit(Unit::new("Probe", Footprint::new(5.0, 2.0).unwrap(), pose));
        let handle = field.begin_move(id).unwrap();
        field.update_free(handle, cursor).unwrap();
        field.rotate_to(handle, aim).unwrap();
        field.cancel(handle).unwrap();
        prop_assert_eq!(field.unit(id).unwrap().pose(), pose);
    }

    #[test]
    fn rotation_stays_normalized(pose in arb_pose(), degrees in -1000.0..1000.0f64) {
        let mut field = Battlefield::new(&EngineConfig::default());
        let id = field.add_unit(Unit::new("Probe", Footprint::new(5.0, 2.0).unwrap(), pose));
        let handle = field.begin_rotate(id).unwrap();
        let heading = field.set_rotation(handle, degrees).unwrap();
        prop_assert!((0.0..360.0).contains(&heading));
    }

    #[test]
    fn point_ahead_is_in_front_arc(pose in arb_pose()) {
        let footprint = Footprint::new(6.0, 3.0).unwrap();
        let ahead = pose.to_world(Point::new(0.0, -3.0));
        prop_assert_eq!(determine_arc(ahead, &pose, &footprint), Some(FacingArc::Front));
    }
}
