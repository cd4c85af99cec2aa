//! Geometry primitives for the lookahead search
//!
//! Lines, circles and the line-circle intersection solver. Everything in
//! here is a pure function of its inputs.

pub mod shapes;
pub mod intersection;

pub use shapes::*;
pub use intersection::*;

/// Absolute tolerance used for degenerate-geometry and tangency checks [m]
pub const GEOMETRY_EPSILON: f64 = 1e-9;
