//! Directional path segments
//!
//! A [`PathSegment`] is an ordered, read-only run of [`PathPoint`]s driven in
//! a single [`DrivingDirection`]. Forward segments are traversed in
//! increasing index order, reverse segments from the last index down to 0.

use std::iter::Rev;
use std::ops::{Range, RangeInclusive};

use itertools::{Either, Itertools};
use serde::{Deserialize, Serialize};

use crate::common::{Point2D, PursuitError, PursuitResult};

/// Consecutive points closer than this are merged on construction [m]
pub const COINCIDENT_POINT_TOLERANCE: f64 = 1e-6;

/// Traversal sense of a path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrivingDirection {
    Forward,
    Reverse,
}

impl Default for DrivingDirection {
    fn default() -> Self {
        DrivingDirection::Forward
    }
}

/// Path point with optional heading/curvature metadata
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub position: Point2D,
    pub heading: Option<f64>,
    pub curvature: Option<f64>,
    /// Index within the owning segment, assigned on construction
    pub index: usize,
}

impl PathPoint {
    pub fn new(position: Point2D) -> Self {
        Self {
            position,
            heading: None,
            curvature: None,
            index: 0,
        }
    }

    pub fn with_heading(mut self, heading: f64) -> Self {
        self.heading = Some(heading);
        self
    }

    pub fn with_curvature(mut self, curvature: f64) -> Self {
        self.curvature = Some(curvature);
        self
    }
}

impl From<Point2D> for PathPoint {
    fn from(position: Point2D) -> Self {
        PathPoint::new(position)
    }
}

/// Ordered run of path points sharing one driving direction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSegment {
    direction: DrivingDirection,
    points: Vec<PathPoint>,
}

impl PathSegment {
    /// Build a segment, dropping points coincident with their predecessor
    /// and re-indexing the rest from 0.
    pub fn new(direction: DrivingDirection, points: Vec<PathPoint>) -> Self {
        let input_len = points.len();
        let points: Vec<PathPoint> = points
            .into_iter()
            .dedup_by(|a, b| a.position.distance(&b.position) < COINCIDENT_POINT_TOLERANCE)
            .enumerate()
            .map(|(index, point)| PathPoint { index, ..point })
            .collect();

        if points.len() < input_len {
            log::warn!(
                "dropped {} coincident point(s) from {:?} segment",
                input_len - points.len(),
                direction
            );
        }

        Self { direction, points }
    }

    pub fn from_positions<I>(direction: DrivingDirection, positions: I) -> Self
    where
        I: IntoIterator<Item = Point2D>,
    {
        Self::new(direction, positions.into_iter().map(PathPoint::new).collect())
    }

    pub fn from_xy(direction: DrivingDirection, x: &[f64], y: &[f64]) -> PursuitResult<Self> {
        if x.len() != y.len() {
            return Err(PursuitError::InvalidParameter(format!(
                "coordinate arrays differ in length: {} x vs {} y",
                x.len(),
                y.len()
            )));
        }
        let positions = x.iter().zip(y.iter()).map(|(&x, &y)| Point2D::new(x, y));
        Ok(Self::from_positions(direction, positions))
    }

    pub fn direction(&self) -> DrivingDirection {
        self.direction
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[PathPoint] {
        &self.points
    }

    pub fn point(&self, index: usize) -> PursuitResult<&PathPoint> {
        self.points.get(index).ok_or(PursuitError::IndexOutOfRange {
            index,
            len: self.points.len(),
        })
    }

    pub fn position(&self, index: usize) -> PursuitResult<Point2D> {
        self.point(index).map(|p| p.position)
    }

    pub fn total_length(&self) -> f64 {
        self.points
            .iter()
            .tuple_windows()
            .map(|(a, b)| a.position.distance(&b.position))
            .sum()
    }

    /// Index of the first point in travel order
    pub fn travel_start(&self) -> Option<usize> {
        match self.direction {
            _ if self.points.is_empty() => None,
            DrivingDirection::Forward => Some(0),
            DrivingDirection::Reverse => Some(self.points.len() - 1),
        }
    }

    /// Index of the last point in travel order
    pub fn travel_end(&self) -> Option<usize> {
        match self.direction {
            _ if self.points.is_empty() => None,
            DrivingDirection::Forward => Some(self.points.len() - 1),
            DrivingDirection::Reverse => Some(0),
        }
    }

    /// Indices from `from` (inclusive) to the travel end, in travel order.
    /// Empty when `from` is out of range.
    pub fn travel_indices_from(&self, from: usize) -> Either<Range<usize>, Rev<RangeInclusive<usize>>> {
        match self.direction {
            DrivingDirection::Reverse if from < self.points.len() => Either::Right((0..=from).rev()),
            DrivingDirection::Reverse => Either::Left(0..0),
            DrivingDirection::Forward => Either::Left(from..self.points.len()),
        }
    }

    /// Whether `position` lies beyond the travel end, measured along the
    /// final sub-segment.
    pub fn is_past_end(&self, position: &Point2D) -> bool {
        let (Some(end), true) = (self.travel_end(), self.points.len() >= 2) else {
            return false;
        };
        let before_end = match self.direction {
            DrivingDirection::Forward => end - 1,
            DrivingDirection::Reverse => end + 1,
        };
        let end_pos = self.points[end].position.to_vector();
        let approach = end_pos - self.points[before_end].position.to_vector();
        approach.dot(&(position.to_vector() - end_pos)) > 0.0
    }
}
