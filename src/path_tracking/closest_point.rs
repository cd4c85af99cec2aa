//! Closest path point search
//!
//! The previous cycle's result is used as a hint so that each cycle only
//! scans a bounded window of the segment, and so that a looped path cannot
//! make the tracker jump to a far-away, spuriously closer point.

use ordered_float::OrderedFloat;

use crate::common::{Point2D, PursuitError, PursuitResult};
use crate::path::PathSegment;
use crate::path_tracking::config::DEFAULT_CLOSEST_POINT_WINDOW;

/// Index of the path point closest to `query`, using the default window.
///
/// See [`closest_point_index_within`].
pub fn closest_point_index(
    segment: &PathSegment,
    query: &Point2D,
    hint: Option<usize>,
) -> PursuitResult<usize> {
    closest_point_index_within(segment, query, hint, DEFAULT_CLOSEST_POINT_WINDOW)
}

/// Index of the path point closest to `query`.
///
/// Without a hint the whole segment is scanned. With a hint, the scan covers
/// `window` points either side of it and re-centers on the winner until the
/// winner is the minimum of its own window, so feeding the result back as
/// the hint returns the same index. Ties go to the lower index.
pub fn closest_point_index_within(
    segment: &PathSegment,
    query: &Point2D,
    hint: Option<usize>,
    window: usize,
) -> PursuitResult<usize> {
    let len = segment.len();
    if len == 0 {
        return Err(PursuitError::EmptySegment);
    }

    let Some(mut center) = hint else {
        return Ok(nearest_in_range(segment, query, 0, len));
    };
    if center >= len {
        return Err(PursuitError::IndexOutOfRange { index: center, len });
    }

    // every re-center strictly improves (distance, index), so this ends
    loop {
        let lo = center.saturating_sub(window);
        let hi = center.saturating_add(window).saturating_add(1).min(len);
        let best = nearest_in_range(segment, query, lo, hi);
        if best == center {
            return Ok(best);
        }
        log::trace!("closest point moved {} -> {}", center, best);
        center = best;
    }
}

/// Caller guarantees `lo < hi <= segment.len()`.
fn nearest_in_range(segment: &PathSegment, query: &Point2D, lo: usize, hi: usize) -> usize {
    let points = segment.points();
    (lo..hi)
        .min_by_key(|&i| (OrderedFloat(points[i].position.distance_squared(query)), i))
        .unwrap_or(lo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::DrivingDirection;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use rand_distr::{Distribution, Normal};

    fn straight() -> PathSegment {
        PathSegment::from_positions(
            DrivingDirection::Forward,
            (0..=10).map(|i| Point2D::new(i as f64, 0.0)),
        )
    }

    /// Closed loop around the origin, traversed twice so that indices far
    /// apart share a location.
    fn double_loop() -> PathSegment {
        let n = 40;
        PathSegment::from_positions(
            DrivingDirection::Forward,
            (0..2 * n).map(|i| {
                let a = 2.0 * std::f64::consts::PI * i as f64 / n as f64;
                // shrink the second lap so consecutive laps never coincide
                let r = if i < n { 5.0 } else { 4.9 };
                Point2D::new(r * a.cos(), r * a.sin())
            }),
        )
    }

    #[test]
    fn test_empty_segment() {
        let segment = PathSegment::from_positions(DrivingDirection::Forward, vec![]);
        let err = closest_point_index(&segment, &Point2D::origin(), None).unwrap_err();
        assert_eq!(err, PursuitError::EmptySegment);
    }

    #[test]
    fn test_hint_out_of_range() {
        let err = closest_point_index(&straight(), &Point2D::origin(), Some(11)).unwrap_err();
        assert_eq!(err, PursuitError::IndexOutOfRange { index: 11, len: 11 });
    }

    #[test]
    fn test_full_scan_without_hint() {
        let idx = closest_point_index(&straight(), &Point2D::new(6.7, 2.0), None).unwrap();
        assert_eq!(idx, 7);
    }

    #[test]
    fn test_tie_prefers_lower_index() {
        let idx = closest_point_index(&straight(), &Point2D::new(4.5, 1.0), None).unwrap();
        assert_eq!(idx, 4);
        let idx = closest_point_index(&straight(), &Point2D::new(4.5, 1.0), Some(5)).unwrap();
        assert_eq!(idx, 4);
    }

    #[test]
    fn test_window_recenters_toward_query() {
        let idx = closest_point_index_within(&straight(), &Point2D::new(9.2, 0.0), Some(0), 2)
            .unwrap();
        assert_eq!(idx, 9);
    }

    #[test]
    fn test_hint_keeps_tracker_on_current_lap() {
        let segment = double_loop();
        let query = Point2D::new(5.0, 0.0);
        // the first lap passes exactly through the query
        assert_eq!(closest_point_index(&segment, &query, None).unwrap(), 0);
        // on the second lap the hint keeps us there
        let idx = closest_point_index_within(&segment, &query, Some(41), 3).unwrap();
        assert_eq!(idx, 40);
    }

    #[test]
    fn test_result_is_a_fixed_point() {
        let segment = double_loop();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let query = Point2D::new(rng.gen_range(-7.0..7.0), rng.gen_range(-7.0..7.0));
            let hint = rng.gen_range(0..segment.len());
            let window = rng.gen_range(1..6);
            let first = closest_point_index_within(&segment, &query, Some(hint), window).unwrap();
            let again = closest_point_index_within(&segment, &query, Some(first), window).unwrap();
            assert_eq!(first, again);
        }
    }

    #[test]
    fn test_forward_motion_is_monotonic() {
        let segment = PathSegment::from_positions(
            DrivingDirection::Forward,
            (0..=100).map(|i| Point2D::new(i as f64 * 0.5, (i as f64 * 0.05).sin())),
        );
        let mut rng = StdRng::seed_from_u64(3);
        let lateral = Normal::new(0.0, 0.2).unwrap();
        let mut hint = None;
        let mut last = 0;
        let mut x = 0.0;
        while x < 50.0 {
            let query = Point2D::new(x, (x * 0.1).sin() + lateral.sample(&mut rng));
            let idx = closest_point_index_within(&segment, &query, hint, 5).unwrap();
            assert!(idx >= last, "index went back from {} to {}", last, idx);
            last = idx;
            hint = Some(idx);
            x += 0.3;
        }
        assert!(last >= 98);
    }
}
