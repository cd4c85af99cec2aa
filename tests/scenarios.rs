//! End-to-end lookahead scenarios
//!
//! Most cases use a straight path from (0, 0) to (10, 0) with one point per
//! meter.

use pure_pursuit::path_tracking::AnchorPolicy;
use pure_pursuit::{
    advance, BracketKind, ControllerState, DrivingDirection, Path, PathSegment, PathTracker,
    Point2D, Pose2D, PurePursuitConfig, PurePursuitController, PursuitError, RobotState,
};

fn straight(direction: DrivingDirection) -> PathSegment {
    PathSegment::from_positions(direction, (0..=10).map(|i| Point2D::new(i as f64, 0.0)))
}

fn assert_point(actual: Point2D, x: f64, y: f64) {
    assert!(
        (actual.x - x).abs() < 1e-9 && (actual.y - y).abs() < 1e-9,
        "expected ({}, {}), got {:?}",
        x,
        y,
        actual
    );
}

#[test]
fn lookahead_from_path_start() {
    let robot = RobotState::new(Pose2D::new(0.0, 0.0, 0.0), 0.0);
    let state = ControllerState::with_anchor(Point2D::new(0.0, 0.0));
    let result = advance(
        &straight(DrivingDirection::Forward),
        &robot,
        3.0,
        &state,
        &PurePursuitConfig::default(),
    )
    .unwrap();
    assert_point(result.lookahead_point, 3.0, 0.0);
    assert_eq!(result.bracket.kind, BracketKind::Crossing);
}

#[test]
fn lookahead_clamps_to_path_end() {
    let state = ControllerState::with_anchor(Point2D::new(9.0, 0.0));
    for robot_x in [0.0, 9.0] {
        let robot = RobotState::from_xy_yaw(robot_x, 0.0, 0.0);
        let result = advance(
            &straight(DrivingDirection::Forward),
            &robot,
            3.0,
            &state,
            &PurePursuitConfig::default(),
        )
        .unwrap();
        assert_point(result.lookahead_point, 10.0, 0.0);
        assert_eq!(result.bracket.kind, BracketKind::ClampedToEnd);
    }
}

#[test]
fn zero_lookahead_is_rejected() {
    let robot = RobotState::from_xy_yaw(4.0, 0.0, 0.0);
    let state = ControllerState::with_anchor(Point2D::new(4.0, 0.0));
    let err = advance(
        &straight(DrivingDirection::Forward),
        &robot,
        0.0,
        &state,
        &PurePursuitConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, PursuitError::InvalidGeometry(_)));
}

#[test]
fn reverse_direction_looks_toward_path_start() {
    let robot = RobotState::new(Pose2D::new(7.0, 0.0, 0.0), -1.0);
    let state = ControllerState::with_anchor(Point2D::new(7.0, 0.0));
    let result = advance(
        &straight(DrivingDirection::Reverse),
        &robot,
        3.0,
        &state,
        &PurePursuitConfig::default(),
    )
    .unwrap();
    assert_point(result.lookahead_point, 4.0, 0.0);
}

#[test]
fn empty_segment_is_rejected() {
    let empty = PathSegment::from_positions(DrivingDirection::Forward, vec![]);
    let err = advance(
        &empty,
        &RobotState::from_xy_yaw(0.0, 0.0, 0.0),
        1.0,
        &ControllerState::new(),
        &PurePursuitConfig::default(),
    )
    .unwrap_err();
    assert_eq!(err, PursuitError::EmptySegment);
}

/// Drive a point robot toward the lookahead point at a fixed step and check
/// it converges onto the path and reaches the end.
#[test]
fn point_robot_converges_to_path_end() {
    let config = PurePursuitConfig {
        anchor_policy: AnchorPolicy::ClosestPathPoint,
        ..Default::default()
    };
    let mut controller = PurePursuitController::new(config).unwrap();
    controller.load_segment(straight(DrivingDirection::Forward));

    let mut position = Point2D::new(0.0, 0.5);
    let mut last_index = 0;
    let mut last_target_x = f64::MIN;
    for _ in 0..200 {
        let robot = RobotState::from_xy_yaw(position.x, position.y, 0.0);
        let result = controller.track(&robot, 2.0).unwrap();

        assert!(result.closest_point_index >= last_index);
        assert!(result.lookahead_point.x >= last_target_x - 1e-9);
        assert!(result.lookahead_point.y.abs() < 1e-9);
        last_index = result.closest_point_index;
        last_target_x = result.lookahead_point.x;

        let to_target = result.lookahead_point.to_vector() - position.to_vector();
        let dist = to_target.norm();
        if dist > 1e-12 {
            let step = dist.min(0.2);
            position = Point2D::from(position.to_vector() + to_target / dist * step);
        }
    }

    assert!(position.distance(&Point2D::new(10.0, 0.0)) < 1e-6);
    assert_eq!(last_index, 10);
}

/// Sparse path: the circle regularly falls between two points without
/// containing either, and the carrot must keep moving forward.
#[test]
fn sparse_path_lookahead_moves_forward() {
    let segment = PathSegment::from_positions(
        DrivingDirection::Forward,
        vec![Point2D::new(0.0, 0.0), Point2D::new(10.0, 0.0), Point2D::new(20.0, 0.0)],
    );
    let mut controller = PurePursuitController::new(PurePursuitConfig::default()).unwrap();
    controller.load_segment(segment);
    let robot = RobotState::from_xy_yaw(0.0, 0.0, 0.0);

    let mut last_x = f64::MIN;
    let mut kinds = Vec::new();
    for _ in 0..10 {
        let result = controller.track(&robot, 3.0).unwrap();
        assert!(
            result.lookahead_point.x >= last_x - 1e-9,
            "lookahead fell back from {} to {}",
            last_x,
            result.lookahead_point.x
        );
        last_x = result.lookahead_point.x;
        kinds.push(result.bracket.kind);
    }
    assert!((last_x - 20.0).abs() < 1e-9);
    assert!(kinds.contains(&BracketKind::Spanning));
    assert!(!kinds.contains(&BracketKind::ClampedToStart));
}

/// Forward leg then a reverse leg, loaded one after the other.
#[test]
fn forward_then_reverse_segments() {
    let mut waypoints: Vec<(Point2D, DrivingDirection)> = (0..=5)
        .map(|i| (Point2D::new(i as f64, 0.0), DrivingDirection::Forward))
        .collect();
    waypoints.extend((1..=5).map(|i| {
        (Point2D::new(5.0 - i as f64, i as f64), DrivingDirection::Reverse)
    }));
    let path = Path::from_waypoints(waypoints);
    assert_eq!(path.len(), 2);
    assert!((path.total_length() - (5.0 + 5.0 * 2.0_f64.sqrt())).abs() < 1e-9);

    let reverse = &path.segments[1];
    let start = reverse.travel_start().unwrap();
    assert_eq!(reverse.position(start).unwrap(), Point2D::new(5.0, 0.0));

    let mut controller = PurePursuitController::new(PurePursuitConfig::default()).unwrap();
    controller.load_segment(path.segments[0].clone());
    let result = controller.track(&RobotState::from_xy_yaw(4.0, 0.0, 0.0), 0.5).unwrap();
    assert_point(result.lookahead_point, 4.5, 0.0);
    assert!(controller.is_goal_reached(&RobotState::from_xy_yaw(5.2, 0.0, 0.0)));

    // the switch leg from (5, 0) to (4, 1) is tracked by the reverse segment
    controller.load_segment(reverse.clone());
    let robot = RobotState::new(Pose2D::new(5.0, 0.0, 0.0), -0.5);
    let result = controller.track(&robot, 1.0).unwrap();
    let half = 0.5_f64.sqrt();
    assert_point(result.lookahead_point, 5.0 - half, half);

    controller.load_segment(reverse.clone());
    let robot = RobotState::new(Pose2D::new(4.0, 1.0, 0.0), -0.5);
    let result = controller.track(&robot, 2.0_f64.sqrt()).unwrap();
    assert_point(result.lookahead_point, 3.0, 2.0);
}
