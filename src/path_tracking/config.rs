//! Pure pursuit controller configuration

use serde::{Deserialize, Serialize};

use crate::common::{PursuitError, PursuitResult};
use crate::path::DrivingDirection;

/// Default half-width of the closest-point search window [points]
pub const DEFAULT_CLOSEST_POINT_WINDOW: usize = 20;

/// Which of two on-segment intersections becomes the lookahead point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntersectionChoice {
    /// Larger line parameter, i.e. farther along the path
    FartherAlongPath,
    /// Smaller line parameter
    CloserAlongPath,
}

/// Intersection disambiguation policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionPolicy {
    pub choice: IntersectionChoice,
    /// Swap the choice on reverse segments, whose travel runs against the
    /// line parametrization
    pub mirror_in_reverse: bool,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            choice: IntersectionChoice::FartherAlongPath,
            mirror_in_reverse: true,
        }
    }
}

impl SelectionPolicy {
    /// Whether the larger line parameter wins for `direction`
    pub fn prefers_larger_parameter(&self, direction: DrivingDirection) -> bool {
        let farther = self.choice == IntersectionChoice::FartherAlongPath;
        match direction {
            DrivingDirection::Reverse if self.mirror_in_reverse => !farther,
            _ => farther,
        }
    }
}

/// Where the anchor point moves after a successful cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnchorPolicy {
    /// Roll the anchor to the resolved lookahead point
    LookaheadPoint,
    /// Roll the anchor to the closer point of the bracket
    CloserBracketPoint,
    /// Pin the anchor to the path point nearest the robot
    ClosestPathPoint,
}

impl Default for AnchorPolicy {
    fn default() -> Self {
        AnchorPolicy::LookaheadPoint
    }
}

/// Speed-scheduled lookahead distance:
/// `clamp(base(direction) + speed_gain * |v|, min_distance, max_distance)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookaheadSchedule {
    /// Base distance on forward segments [m]
    pub forward_distance: f64,
    /// Base distance on reverse segments [m]
    pub reverse_distance: f64,
    /// Additional distance per unit speed [s]
    pub speed_gain: f64,
    pub min_distance: f64,
    pub max_distance: f64,
}

impl Default for LookaheadSchedule {
    fn default() -> Self {
        Self {
            forward_distance: 2.0,
            reverse_distance: 1.5,
            speed_gain: 0.1,
            min_distance: 0.5,
            max_distance: 10.0,
        }
    }
}

impl LookaheadSchedule {
    pub fn distance(&self, direction: DrivingDirection, speed: f64) -> f64 {
        let base = match direction {
            DrivingDirection::Forward => self.forward_distance,
            DrivingDirection::Reverse => self.reverse_distance,
        };
        (base + self.speed_gain * speed.abs())
            .max(self.min_distance)
            .min(self.max_distance)
    }

    pub fn validate(&self) -> PursuitResult<()> {
        let finite = [
            self.forward_distance,
            self.reverse_distance,
            self.speed_gain,
            self.min_distance,
            self.max_distance,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite {
            return Err(PursuitError::InvalidParameter(
                "lookahead schedule values must be finite".to_string(),
            ));
        }
        if self.min_distance <= 0.0 || self.min_distance > self.max_distance {
            return Err(PursuitError::InvalidParameter(format!(
                "lookahead bounds must satisfy 0 < min <= max, got [{}, {}]",
                self.min_distance, self.max_distance
            )));
        }
        if self.speed_gain < 0.0 {
            return Err(PursuitError::InvalidParameter(format!(
                "lookahead speed gain must be non-negative, got {}",
                self.speed_gain
            )));
        }
        Ok(())
    }
}

/// Configuration for the pure pursuit core
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PurePursuitConfig {
    /// Half-width of the closest-point search window around the hint
    #[serde(default = "default_closest_point_window")]
    pub closest_point_window: usize,

    #[serde(default)]
    pub lookahead: LookaheadSchedule,

    #[serde(default)]
    pub selection: SelectionPolicy,

    #[serde(default)]
    pub anchor_policy: AnchorPolicy,
}

fn default_closest_point_window() -> usize {
    DEFAULT_CLOSEST_POINT_WINDOW
}

impl Default for PurePursuitConfig {
    fn default() -> Self {
        Self {
            closest_point_window: DEFAULT_CLOSEST_POINT_WINDOW,
            lookahead: LookaheadSchedule::default(),
            selection: SelectionPolicy::default(),
            anchor_policy: AnchorPolicy::default(),
        }
    }
}

impl PurePursuitConfig {
    pub fn validate(&self) -> PursuitResult<()> {
        if self.closest_point_window == 0 {
            return Err(PursuitError::InvalidParameter(
                "closest point window must be at least 1".to_string(),
            ));
        }
        self.lookahead.validate()
    }
}
