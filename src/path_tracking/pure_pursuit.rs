//! Pure pursuit lookahead step
//!
//! One control cycle maps `(state, inputs)` to `(state', outputs)`:
//!
//! 1. locate the path point closest to the robot, hinted by the last cycle,
//! 2. bracket the lookahead circle around the anchor point,
//! 3. intersect the bracketing line with the lookahead circle,
//! 4. pick the intersection ahead in the direction of travel,
//! 5. roll the anchor according to the configured [`AnchorPolicy`].
//!
//! Nothing is mutated here; the caller commits [`StepResult::state`] only
//! when the cycle succeeded.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::common::{Point2D, PursuitResult, RobotState};
use crate::geometry::{intersect, Circle, Intersection, Line};
use crate::path::PathSegment;
use crate::path_tracking::bracket::{find_bracket, Bracket, BracketKind};
use crate::path_tracking::closest_point::closest_point_index_within;
use crate::path_tracking::config::{AnchorPolicy, PurePursuitConfig, SelectionPolicy};

/// State carried from one cycle to the next
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ControllerState {
    /// Closest path index found in the last cycle, used as search hint
    pub last_closest_point_index: Option<usize>,
    /// Center of the next lookahead circle. `None` starts at the robot.
    pub anchor_point: Option<Point2D>,
    /// Lookahead distance used in the last cycle
    pub active_lookahead_distance: Option<f64>,
}

impl ControllerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_anchor(anchor: Point2D) -> Self {
        Self {
            anchor_point: Some(anchor),
            ..Self::default()
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Everything resolved in one cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepResult {
    /// State to carry into the next cycle
    pub state: ControllerState,
    pub closest_point_index: usize,
    pub bracket: Bracket,
    /// Center of this cycle's lookahead circle
    pub anchor_point: Point2D,
    /// Anchor for the next cycle
    pub next_anchor_point: Point2D,
    /// Steering target
    pub lookahead_point: Point2D,
    pub lookahead_distance: f64,
    /// Raw solutions on the bracketing line, unclipped
    pub intersection: Intersection,
}

/// Read-only consumer of resolved cycles (visualization, debug logging).
///
/// Observers receive exactly the values returned to the control path and
/// cannot touch controller state.
pub trait StepObserver {
    fn on_step(&mut self, result: &StepResult);
}

impl<F> StepObserver for F
where
    F: FnMut(&StepResult),
{
    fn on_step(&mut self, result: &StepResult) {
        self(result)
    }
}

/// Run one pure pursuit cycle.
///
/// `config` is validated first, so an invalid configuration fails with
/// `InvalidParameter`. Errors from the locator, bracket search or
/// intersection solver are returned unchanged and `state` is left as it was.
pub fn advance(
    segment: &PathSegment,
    robot: &RobotState,
    lookahead_distance: f64,
    state: &ControllerState,
    config: &PurePursuitConfig,
) -> PursuitResult<StepResult> {
    config.validate()?;
    let robot_position = robot.position();
    let closest_point_index = closest_point_index_within(
        segment,
        &robot_position,
        state.last_closest_point_index,
        config.closest_point_window,
    )?;

    let anchor_point = state.anchor_point.unwrap_or(robot_position);
    let bracket = find_bracket(segment, &anchor_point, closest_point_index, lookahead_distance)?;

    let (lo, hi) = bracket.ordered();
    let line = Line::new(segment.position(lo)?, segment.position(hi)?);
    let circle = Circle::new(anchor_point, lookahead_distance);
    let intersection = intersect(&line, &circle)?;

    let lookahead_point = select_lookahead_point(segment, &bracket, &intersection, &config.selection)?;

    let next_anchor_point = match config.anchor_policy {
        AnchorPolicy::LookaheadPoint => lookahead_point,
        AnchorPolicy::CloserBracketPoint => segment.position(bracket.closer)?,
        AnchorPolicy::ClosestPathPoint => segment.position(closest_point_index)?,
    };

    log::trace!(
        "closest {} bracket ({}, {}) {:?} anchor ({:.3}, {:.3}) lookahead ({:.3}, {:.3}) with {} intersection(s)",
        closest_point_index,
        bracket.closer,
        bracket.farther,
        bracket.kind,
        anchor_point.x,
        anchor_point.y,
        lookahead_point.x,
        lookahead_point.y,
        intersection.count()
    );

    Ok(StepResult {
        state: ControllerState {
            last_closest_point_index: Some(closest_point_index),
            anchor_point: Some(next_anchor_point),
            active_lookahead_distance: Some(lookahead_distance),
        },
        closest_point_index,
        bracket,
        anchor_point,
        next_anchor_point,
        lookahead_point,
        lookahead_distance,
        intersection,
    })
}

/// Choose the steering target from the intersection solutions.
///
/// A bracket clamped to the end yields the segment end. Otherwise the
/// on-segment solution preferred by `policy` wins; with none on the segment
/// the closer bracket point is used.
pub fn select_lookahead_point(
    segment: &PathSegment,
    bracket: &Bracket,
    intersection: &Intersection,
    policy: &SelectionPolicy,
) -> PursuitResult<Point2D> {
    if bracket.kind == BracketKind::ClampedToEnd {
        return segment.position(bracket.farther);
    }

    let candidates = intersection.within_segment();
    let chosen = if policy.prefers_larger_parameter(segment.direction()) {
        candidates.max_by_key(|p| OrderedFloat(p.t))
    } else {
        candidates.min_by_key(|p| OrderedFloat(p.t))
    };

    match chosen {
        Some(solution) => Ok(solution.point),
        None => {
            log::debug!(
                "no intersection on bracket ({}, {}), holding closer point",
                bracket.closer,
                bracket.farther
            );
            segment.position(bracket.closer)
        }
    }
}
