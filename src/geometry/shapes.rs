//! Line and circle primitives

use nalgebra::Vector2;

use crate::common::{Point2D, PursuitError, PursuitResult};
use crate::geometry::GEOMETRY_EPSILON;

/// Line through two points, parametrized as `p0 + t * (p1 - p0)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub p0: Point2D,
    pub p1: Point2D,
}

impl Line {
    pub fn new(p0: Point2D, p1: Point2D) -> Self {
        Self { p0, p1 }
    }

    pub fn direction(&self) -> Vector2<f64> {
        self.p1.to_vector() - self.p0.to_vector()
    }

    pub fn length(&self) -> f64 {
        self.p0.distance(&self.p1)
    }

    /// Point at parameter `t`. `t` in [0, 1] lies on the finite segment.
    pub fn point_at(&self, t: f64) -> Point2D {
        Point2D::from(self.p0.to_vector() + self.direction() * t)
    }

    /// Reject zero-length and non-finite lines
    pub fn validate(&self) -> PursuitResult<()> {
        if !self.p0.is_finite() || !self.p1.is_finite() {
            return Err(PursuitError::InvalidGeometry(format!(
                "line endpoints must be finite, got {:?} -> {:?}",
                self.p0, self.p1
            )));
        }
        if self.length() <= GEOMETRY_EPSILON {
            return Err(PursuitError::InvalidGeometry(format!(
                "zero-length line at ({:.3}, {:.3})",
                self.p0.x, self.p0.y
            )));
        }
        Ok(())
    }
}

/// Circle given by center and radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point2D,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: Point2D, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Whether `point` lies inside or on the circle
    pub fn contains(&self, point: &Point2D) -> bool {
        self.center.distance(point) <= self.radius
    }

    /// Reject zero, negative and non-finite radii
    pub fn validate(&self) -> PursuitResult<()> {
        if !self.center.is_finite() {
            return Err(PursuitError::InvalidGeometry(format!(
                "circle center must be finite, got {:?}",
                self.center
            )));
        }
        if !self.radius.is_finite() || self.radius <= GEOMETRY_EPSILON {
            return Err(PursuitError::InvalidGeometry(format!(
                "circle radius must be positive, got {}",
                self.radius
            )));
        }
        Ok(())
    }
}
