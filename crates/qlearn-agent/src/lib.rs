//! Value-learning agents for qlearn
//!
//! This crate provides the learning engines and the agent that drives them:
//! - Sparse Q-tables with Bellman updates
//! - Feed-forward networks with replay memory and a target network (DQN)
//! - Externally implemented policies
//!
//! plus the runner that plays an [`Agent`] against an
//! [`Environment`](qlearn_core::Environment).

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod agent;
pub mod config;
pub mod memory;
pub mod network;
pub mod policy;
pub mod random;
pub mod runner;
pub mod snapshot;
pub mod table;
pub mod utils;

// Re-export the agent
pub use agent::{Agent, Session};
pub use config::{AgentOptions, CompileOptions};

// Re-export engines
pub use memory::ReplayMemory;
pub use network::{Layer, LayerSpec, NeuralNetwork, Target};
pub use table::{state_key, QTable};

// Re-export policy components
pub use policy::ExternalPolicy;
pub use random::RandomPolicy;

// Re-export utilities
pub use runner::{run, step, StepOutcome};
pub use snapshot::{Mode, Snapshot};
pub use utils::{ConstantSchedule, LinearSchedule, Schedule};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Agent, AgentOptions, CompileOptions, ExternalPolicy, LayerSpec, Mode, RandomPolicy,
        StepOutcome,
    };
    pub use qlearn_core::prelude::*;
}
