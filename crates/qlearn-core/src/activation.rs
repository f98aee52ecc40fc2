//! Layer nonlinearities and their derivatives

use serde::{Deserialize, Serialize};

use crate::Tensor;

/// Closed set of activation functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    /// Identity
    Linear,
    /// Rectified linear unit
    Relu,
    /// Logistic sigmoid
    Sigmoid,
    /// Hyperbolic tangent
    Tanh,
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

impl Activation {
    /// Apply the activation element-wise
    #[must_use]
    pub fn forward(self, x: &Tensor) -> Tensor {
        match self {
            Self::Linear => x.clone(),
            Self::Relu => x.map(|n, _| n.max(0.0)),
            Self::Sigmoid => x.map(|n, _| sigmoid(n)),
            Self::Tanh => x.map(|n, _| n.tanh()),
        }
    }

    /// Element-wise derivative evaluated at `x`
    #[must_use]
    pub fn derivative(self, x: &Tensor) -> Tensor {
        match self {
            Self::Linear => x.map(|_, _| 1.0),
            Self::Relu => x.map(|n, _| if n > 0.0 { 1.0 } else { 0.0 }),
            Self::Sigmoid => x.map(|n, _| sigmoid(n) * (1.0 - sigmoid(n))),
            Self::Tanh => x.map(|n, _| 1.0 - n.tanh().powi(2)),
        }
    }
}
