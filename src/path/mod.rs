//! Path model
//!
//! A [`Path`] is an ordered list of [`PathSegment`]s, each driven in a
//! single direction. Paths are loaded externally and never mutated by the
//! tracking core.

pub mod segment;

pub use segment::*;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::common::Point2D;

/// Sequence of directional path segments
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub segments: Vec<PathSegment>,
}

impl Path {
    pub fn new() -> Self {
        Self { segments: Vec::new() }
    }

    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    /// Split waypoints, given in travel order, into maximal runs of equal
    /// driving direction.
    ///
    /// The waypoint where the direction switches ends one segment and also
    /// starts the next. Reverse runs are stored back to front, since reverse
    /// segments are traversed from their last index toward index 0.
    pub fn from_waypoints<I>(waypoints: I) -> Self
    where
        I: IntoIterator<Item = (Point2D, DrivingDirection)>,
    {
        let runs = waypoints.into_iter().group_by(|(_, direction)| *direction);
        let mut segments = Vec::new();
        let mut switch_point: Option<Point2D> = None;
        for (direction, run) in &runs {
            let mut positions: Vec<Point2D> = switch_point
                .into_iter()
                .chain(run.map(|(point, _)| point))
                .collect();
            switch_point = positions.last().copied();
            if direction == DrivingDirection::Reverse {
                positions.reverse();
            }
            segments.push(PathSegment::from_positions(direction, positions));
        }
        Self { segments }
    }

    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segment(&self, index: usize) -> Option<&PathSegment> {
        self.segments.get(index)
    }

    pub fn total_length(&self) -> f64 {
        self.segments.iter().map(PathSegment::total_length).sum()
    }
}
