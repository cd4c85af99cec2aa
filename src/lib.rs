//! pure_pursuit - geometric core of a pure pursuit path tracking controller
//!
//! Given a reference path, the vehicle pose and a lookahead distance, each
//! control cycle resolves one steering target on the path ahead. Steering
//! angle computation, path planning, message marshalling and visualization
//! are left to the caller.

// Core modules
pub mod common;
pub mod geometry;

// Algorithm modules
pub mod path;
pub mod path_tracking;

// Re-export common types for convenience
pub use common::{Point2D, Pose2D, RobotState};
pub use common::PathTracker;
pub use common::{PursuitError, PursuitResult};
pub use geometry::{intersect, Circle, Intersection, IntersectionPoint, Line};
pub use path::{DrivingDirection, Path, PathPoint, PathSegment};
pub use path_tracking::{
    advance, closest_point_index, find_bracket, Bracket, BracketKind, ControllerState,
    PurePursuitConfig, PurePursuitController, StepObserver, StepResult,
};
