//! Path tracking: pure pursuit lookahead resolution

pub mod config;
pub mod closest_point;
pub mod bracket;
pub mod pure_pursuit;
pub mod controller;

pub use config::*;
pub use closest_point::*;
pub use bracket::*;
pub use pure_pursuit::*;
pub use controller::*;
