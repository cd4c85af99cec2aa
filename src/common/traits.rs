//! Common traits defining interfaces for path tracking

use crate::common::error::PursuitResult;
use crate::common::types::RobotState;

/// Trait for path tracking/following algorithms
pub trait PathTracker {
    /// What one tracking cycle resolves
    type Output;

    /// Resolve the steering target for the current cycle
    fn track(&mut self, robot: &RobotState, lookahead_distance: f64) -> PursuitResult<Self::Output>;

    /// Check if the goal has been reached
    fn is_goal_reached(&self, robot: &RobotState) -> bool;
}
