//! Line-circle intersection
//!
//! Solves for the parameters `t` along a [`Line`] at which the distance to a
//! [`Circle`] center equals its radius. The solver works on the infinite
//! line; each solution carries its parameter so callers can decide whether
//! it lies on the finite segment (`0 <= t <= 1`).

use crate::common::{Point2D, PursuitResult};
use crate::geometry::{Circle, Line, GEOMETRY_EPSILON};

/// Slack on the `[0, 1]` parameter range when testing segment membership
pub const SEGMENT_PARAMETER_TOLERANCE: f64 = 1e-9;

/// One solution of the line-circle system
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionPoint {
    pub point: Point2D,
    /// Parameter along the line, `p0 + t * (p1 - p0)`
    pub t: f64,
}

impl IntersectionPoint {
    pub fn is_within_segment(&self) -> bool {
        self.t >= -SEGMENT_PARAMETER_TOLERANCE && self.t <= 1.0 + SEGMENT_PARAMETER_TOLERANCE
    }
}

/// Zero, one or two solutions. Secant solutions are ordered by ascending `t`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intersection {
    None,
    Tangent(IntersectionPoint),
    Secant(IntersectionPoint, IntersectionPoint),
}

impl Intersection {
    /// Number of valid solutions
    pub fn count(&self) -> usize {
        match self {
            Intersection::None => 0,
            Intersection::Tangent(_) => 1,
            Intersection::Secant(_, _) => 2,
        }
    }

    pub fn first(&self) -> Option<IntersectionPoint> {
        match *self {
            Intersection::None => None,
            Intersection::Tangent(p) | Intersection::Secant(p, _) => Some(p),
        }
    }

    pub fn second(&self) -> Option<IntersectionPoint> {
        match *self {
            Intersection::Secant(_, p) => Some(p),
            _ => None,
        }
    }

    /// All solutions on the infinite line, ascending in `t`
    pub fn points(&self) -> impl Iterator<Item = IntersectionPoint> {
        self.first().into_iter().chain(self.second())
    }

    /// Solutions lying on the finite segment
    pub fn within_segment(&self) -> impl Iterator<Item = IntersectionPoint> {
        self.points().filter(IntersectionPoint::is_within_segment)
    }
}

/// Intersect the infinite extension of `line` with `circle`.
///
/// Fails with `InvalidGeometry` for a zero-length line or a non-positive
/// radius. Does not clip to the segment bounds.
pub fn intersect(line: &Line, circle: &Circle) -> PursuitResult<Intersection> {
    line.validate()?;
    circle.validate()?;

    let d = line.direction();
    let a = d.norm_squared();
    let f = line.p0.to_vector() - circle.center.to_vector();

    // foot of the perpendicular from the center onto the line
    let t_foot = -f.dot(&d) / a;
    let h = (f + d * t_foot).norm();
    let r = circle.radius;
    let tol = GEOMETRY_EPSILON * r.max(1.0);

    let solution = |t: f64| IntersectionPoint {
        point: line.point_at(t),
        t,
    };

    if h > r + tol {
        return Ok(Intersection::None);
    }
    if (r - h).abs() <= tol {
        return Ok(Intersection::Tangent(solution(t_foot)));
    }

    let half_chord = ((r - h) * (r + h)).sqrt();
    let dt = half_chord / a.sqrt();
    Ok(Intersection::Secant(solution(t_foot - dt), solution(t_foot + dt)))
}
