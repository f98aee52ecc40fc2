//! Reference environments for qlearn
//!
//! This crate provides small environments implementing
//! [`Environment`](qlearn_core::Environment):
//! - [`TargetSeek`]: walk a bounded line to a target position
//! - [`FoodGrid`]: steer a walker on a grid towards food

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod food;
pub mod target;

// Re-export environments
pub use food::{FoodGrid, Heading};
pub use target::TargetSeek;

// Re-export core types
pub use qlearn_core::{Environment, RunSummary};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{FoodGrid, TargetSeek};
    pub use qlearn_core::prelude::*;
}
