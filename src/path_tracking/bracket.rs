//! Lookahead bracket search
//!
//! Walks the segment in travel order from a starting index and finds the
//! pair of adjacent points straddling the lookahead circle around the
//! anchor: the last point inside the circle and the first point after it
//! that lies outside. On sparse paths the circle can fall between two
//! points without containing either; the first such sub-segment is used.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::common::{Point2D, PursuitError, PursuitResult};
use crate::geometry::{intersect, Circle, Line};
use crate::path::{DrivingDirection, PathSegment};

/// How a bracket was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BracketKind {
    /// `closer` is inside the circle, `farther` is outside
    Crossing,
    /// The segment ends inside the circle; the bracket is the final pair
    /// and the lookahead point clamps to the segment end
    ClampedToEnd,
    /// Both points are outside the circle but the sub-segment between them
    /// passes through it
    Spanning,
    /// No scanned point is inside the circle and no scanned sub-segment
    /// touches it; the bracket is the first pair of the scan
    ClampedToStart,
}

/// Adjacent pair of path indices. `closer` precedes `farther` in travel
/// order, so on reverse segments `closer > farther`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bracket {
    pub closer: usize,
    pub farther: usize,
    pub kind: BracketKind,
}

impl Bracket {
    /// Indices in increasing order
    pub fn ordered(&self) -> (usize, usize) {
        (self.closer.min(self.farther), self.closer.max(self.farther))
    }
}

/// Next index in travel order
fn step(segment: &PathSegment, index: usize) -> Option<usize> {
    match segment.direction() {
        DrivingDirection::Forward => Some(index + 1).filter(|&i| i < segment.len()),
        DrivingDirection::Reverse => index.checked_sub(1),
    }
}

/// Previous index in travel order
fn step_back(segment: &PathSegment, index: usize) -> Option<usize> {
    match segment.direction() {
        DrivingDirection::Forward => index.checked_sub(1),
        DrivingDirection::Reverse => Some(index + 1).filter(|&i| i < segment.len()),
    }
}

/// First travel pair after `from_index` whose sub-segment meets `circle`
fn first_spanning_pair(segment: &PathSegment, circle: &Circle, from_index: usize) -> Option<(usize, usize)> {
    let points = segment.points();
    segment
        .travel_indices_from(from_index)
        .tuple_windows()
        .find(|&(a, b)| {
            let line = Line::new(points[a.min(b)].position, points[a.max(b)].position);
            intersect(&line, circle).map_or(false, |hit| hit.within_segment().next().is_some())
        })
}

/// Find the pair of points bracketing the lookahead circle.
///
/// Points before the scan first enters the circle are skipped. If the scan
/// reaches the travel end while still inside the circle, the final two
/// points are returned ([`BracketKind::ClampedToEnd`]). If no scanned point
/// is inside, the first pair whose sub-segment meets the circle is returned
/// ([`BracketKind::Spanning`]). Failing that, `from_index` and its successor
/// are returned, or the final pair when `from_index` is the travel end
/// ([`BracketKind::ClampedToStart`]).
pub fn find_bracket(
    segment: &PathSegment,
    anchor: &Point2D,
    from_index: usize,
    lookahead_distance: f64,
) -> PursuitResult<Bracket> {
    let len = segment.len();
    if len < 2 {
        return Err(PursuitError::EmptySegment);
    }
    if from_index >= len {
        return Err(PursuitError::IndexOutOfRange { index: from_index, len });
    }

    let circle = Circle::new(*anchor, lookahead_distance);
    let points = segment.points();
    let mut last_inside = None;
    for i in segment.travel_indices_from(from_index) {
        if circle.contains(&points[i].position) {
            last_inside = Some(i);
        } else if let Some(closer) = last_inside {
            return Ok(Bracket {
                closer,
                farther: i,
                kind: BracketKind::Crossing,
            });
        }
    }

    if last_inside.is_none() {
        if let Some((closer, farther)) = first_spanning_pair(segment, &circle, from_index) {
            return Ok(Bracket {
                closer,
                farther,
                kind: BracketKind::Spanning,
            });
        }
    }

    let kind = match last_inside {
        Some(_) => BracketKind::ClampedToEnd,
        None => BracketKind::ClampedToStart,
    };
    let (closer, farther) = match (kind, step(segment, from_index)) {
        (BracketKind::ClampedToStart, Some(next)) => (from_index, next),
        _ => {
            let end = segment.travel_end().ok_or(PursuitError::EmptySegment)?;
            let before_end = step_back(segment, end).ok_or(PursuitError::EmptySegment)?;
            (before_end, end)
        }
    };
    log::debug!(
        "lookahead bracket {:?}: ({}, {}) from index {}",
        kind,
        closer,
        farther,
        from_index
    );
    Ok(Bracket { closer, farther, kind })
}
