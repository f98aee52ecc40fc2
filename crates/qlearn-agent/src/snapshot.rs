//! Persistence blob exchanged by [`Agent::export`](crate::Agent::export) and
//! [`Agent::import`](crate::Agent::import)
//!
//! ```json
//! { "m": 1, "s": 2, "a": 3, "w": { "0,1": [0.0, 0.5, 0.0] } }
//! ```
//!
//! `m` is the mode tag, `s`/`a` the state and action counts, and `w` the
//! mode-specific payload: per-layer flat weights for a model, the key to
//! values map for a table, or the policy's own JSON for an external policy.

use serde::{Deserialize, Serialize};

/// Agent operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Neural network with replay memory and a target network
    Model,
    /// Sparse Q-table
    Table,
    /// Externally implemented policy
    External,
}

impl Mode {
    /// Numeric tag stored in snapshots
    #[must_use]
    pub fn tag(self) -> u8 {
        match self {
            Self::Model => 0,
            Self::Table => 1,
            Self::External => 2,
        }
    }

    /// Mode for a snapshot tag
    #[must_use]
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::Model),
            1 => Some(Self::Table),
            2 => Some(Self::External),
            _ => None,
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Model => "model",
            Self::Table => "table",
            Self::External => "external",
        };
        f.write_str(name)
    }
}

/// Serialized agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Mode tag, see [`Mode::tag`]
    #[serde(default)]
    pub m: Option<u8>,
    /// Number of state components
    pub s: usize,
    /// Number of actions
    pub a: usize,
    /// Mode-specific payload
    #[serde(default)]
    pub w: serde_json::Value,
}
