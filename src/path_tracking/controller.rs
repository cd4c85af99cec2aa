//! Stateful pure pursuit controller
//!
//! Owns the active path segment and the [`ControllerState`], and commits
//! the state returned by [`advance`] only after a cycle succeeds. One
//! controller instance serves one vehicle; cycles must be serialized by the
//! caller.

use crate::common::{PathTracker, Point2D, PursuitError, PursuitResult, RobotState};
use crate::path::PathSegment;
use crate::path_tracking::config::PurePursuitConfig;
use crate::path_tracking::pure_pursuit::{advance, ControllerState, StepObserver, StepResult};

/// Pure pursuit controller bound to one path segment at a time
#[derive(Debug, Clone)]
pub struct PurePursuitController {
    config: PurePursuitConfig,
    segment: Option<PathSegment>,
    state: ControllerState,
    last_result: Option<StepResult>,
}

impl PurePursuitController {
    pub fn new(config: PurePursuitConfig) -> PursuitResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            segment: None,
            state: ControllerState::default(),
            last_result: None,
        })
    }

    pub fn config(&self) -> &PurePursuitConfig {
        &self.config
    }

    pub fn segment(&self) -> Option<&PathSegment> {
        self.segment.as_ref()
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    /// Result of the last successful cycle
    pub fn last_result(&self) -> Option<&StepResult> {
        self.last_result.as_ref()
    }

    /// Replace the active segment and start over from a fresh state
    pub fn load_segment(&mut self, segment: PathSegment) {
        log::debug!(
            "loaded {:?} segment with {} points, {:.2}m",
            segment.direction(),
            segment.len(),
            segment.total_length()
        );
        self.segment = Some(segment);
        self.reset();
    }

    /// Place the anchor explicitly, e.g. at controller start
    pub fn set_anchor_point(&mut self, anchor: Point2D) {
        self.state.anchor_point = Some(anchor);
    }

    pub fn reset(&mut self) {
        self.state.reset();
        self.last_result = None;
    }

    /// Run one cycle with an explicit lookahead distance
    pub fn advance(&mut self, robot: &RobotState, lookahead_distance: f64) -> PursuitResult<StepResult> {
        let segment = self.segment.as_ref().ok_or(PursuitError::EmptySegment)?;
        match advance(segment, robot, lookahead_distance, &self.state, &self.config) {
            Ok(result) => {
                self.state = result.state;
                self.last_result = Some(result);
                Ok(result)
            }
            Err(e) => {
                log::warn!("pure pursuit cycle failed, state kept: {}", e);
                Err(e)
            }
        }
    }

    /// Run one cycle with the lookahead distance scheduled from the robot speed
    pub fn advance_scheduled(&mut self, robot: &RobotState) -> PursuitResult<StepResult> {
        let direction = self
            .segment
            .as_ref()
            .map(PathSegment::direction)
            .ok_or(PursuitError::EmptySegment)?;
        let lookahead_distance = self.config.lookahead.distance(direction, robot.v);
        self.advance(robot, lookahead_distance)
    }

    /// Run one cycle and hand the same result to `observer`
    pub fn advance_observed<O>(
        &mut self,
        robot: &RobotState,
        lookahead_distance: f64,
        observer: &mut O,
    ) -> PursuitResult<StepResult>
    where
        O: StepObserver + ?Sized,
    {
        let result = self.advance(robot, lookahead_distance)?;
        observer.on_step(&result);
        Ok(result)
    }

    /// Whether the robot has driven past the end of the active segment
    pub fn is_segment_complete(&self, robot: &RobotState) -> bool {
        self.segment
            .as_ref()
            .map_or(false, |segment| segment.is_past_end(&robot.position()))
    }
}

impl PathTracker for PurePursuitController {
    type Output = StepResult;

    fn track(&mut self, robot: &RobotState, lookahead_distance: f64) -> PursuitResult<StepResult> {
        self.advance(robot, lookahead_distance)
    }

    fn is_goal_reached(&self, robot: &RobotState) -> bool {
        self.is_segment_complete(robot)
    }
}
