//! Common types, traits, and error definitions for pure_pursuit
//!
//! This module provides the foundational building blocks shared by the
//! geometry, path and path tracking modules.

pub mod types;
pub mod traits;
pub mod error;

pub use types::*;
pub use traits::*;
pub use error::*;
