//! Core numeric engine and RL types for qlearn
//!
//! This crate provides the dense [`Tensor`] engine, the closed
//! [`Activation`] and [`Loss`] tables used by the network, the
//! [`Transition`] record stored by replay memory, and the
//! [`Environment`] capability trait agents are driven against.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod activation;
pub mod environment;
pub mod error;
pub mod loss;
pub mod tensor;
pub mod trajectory;

// Re-export core traits and types
pub use activation::Activation;
pub use environment::Environment;
pub use error::{RLError, Result};
pub use loss::Loss;
pub use tensor::Tensor;
pub use trajectory::{RunSummary, Transition};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{Activation, Environment, Loss, RLError, Result, Tensor, Transition};
}
