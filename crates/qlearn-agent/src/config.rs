//! Agent hyperparameters and compile options

use serde::{Deserialize, Serialize};

use qlearn_core::{Loss, RLError, Result};

/// Hyperparameters shared by every agent mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AgentOptions {
    /// Learning rate
    pub alpha: f64,
    /// Discount factor
    pub gamma: f64,
    /// Initial exploration rate
    pub epsilon: f64,
    /// Number of predictions over which epsilon decays linearly to zero
    pub epsilon_decay: Option<usize>,
    /// Replay memory capacity
    pub max_memory: usize,
    /// Replay sample size
    pub batch_size: usize,
    /// Episodes between target network syncs
    pub episode_size: usize,
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            gamma: 0.95,
            epsilon: 0.1,
            epsilon_decay: Some(1_000_000),
            max_memory: 1000,
            batch_size: 100,
            episode_size: 50,
        }
    }
}

impl AgentOptions {
    /// Parse options from JSON; absent keys take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Reject options no agent can run with
    pub fn validate(&self) -> Result<()> {
        if !self.alpha.is_finite() {
            return Err(RLError::Config(format!("alpha must be finite, got {}", self.alpha)));
        }
        if !(0.0..=1.0).contains(&self.gamma) {
            return Err(RLError::Config(format!("gamma must be in [0, 1], got {}", self.gamma)));
        }
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(RLError::Config(format!(
                "epsilon must be in [0, 1], got {}",
                self.epsilon
            )));
        }
        if self.batch_size == 0 {
            return Err(RLError::Config("batchSize must be at least 1".into()));
        }
        if self.episode_size == 0 {
            return Err(RLError::Config("episodeSize must be at least 1".into()));
        }
        if self.max_memory == 0 {
            return Err(RLError::Config("maxMemory must be at least 1".into()));
        }
        if self.max_memory <= self.batch_size {
            tracing::warn!(
                max_memory = self.max_memory,
                batch_size = self.batch_size,
                "replay memory can never exceed the batch size; replay training will not run"
            );
        }
        Ok(())
    }
}

/// Options applied when a model is compiled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    /// Loss used for back-propagation
    pub loss: Loss,
}
