//! Error types for the qlearn libraries

use thiserror::Error;

/// Core error type for tensor, network, table and agent operations
#[derive(Error, Debug)]
pub enum RLError {
    /// Bad construction arguments (empty layer list, mismatched output units, bad options)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Interaction attempted before a required configuration step
    #[error("Not ready: {0}")]
    NotReady(String),

    /// Element-wise tensor operation on differently shaped operands
    #[error("Shape mismatch: {left:?} vs {right:?}")]
    ShapeMismatch {
        /// Shape of the left operand
        left: (usize, usize),
        /// Shape of the right operand
        right: (usize, usize),
    },

    /// Dimension mismatch
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Required length
        expected: usize,
        /// Length that was supplied
        actual: usize,
    },

    /// Action index outside of the configured action space
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// Malformed or incompatible import payload
    #[error("Format error: {0}")]
    Format(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RLError {
    /// Shorthand for a [`RLError::DimensionMismatch`]
    #[must_use]
    pub fn dimension(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }
}

/// Result type alias for RL operations
pub type Result<T> = std::result::Result<T, RLError>;
