//! Loss functions used by network back-propagation
//!
//! Derivatives point from the prediction towards the target
//! (`target - prediction`) and are not scaled by the element count, even for
//! [`Loss::MeanSquaredError`]. Learning rates tuned against this network rely
//! on that scaling.

use serde::{Deserialize, Serialize};

use crate::{Result, Tensor};

/// Closed set of loss functions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Loss {
    /// Mean of squared differences
    #[default]
    MeanSquaredError,
    /// Mean of absolute differences
    MeanAbsoluteError,
}

impl Loss {
    /// Scalar loss between `prediction` and `target`
    pub fn forward(self, prediction: &Tensor, target: &Tensor) -> Result<f64> {
        let diff = target.subtract(prediction)?;
        let n = diff.len().max(1) as f64;
        let total = match self {
            Self::MeanSquaredError => diff.map(|d, _| d * d).sum(),
            Self::MeanAbsoluteError => diff.map(|d, _| d.abs()).sum(),
        };
        Ok(total / n)
    }

    /// Error signal propagated into the output layer
    pub fn derivative(self, prediction: &Tensor, target: &Tensor) -> Result<Tensor> {
        let diff = target.subtract(prediction)?;
        Ok(match self {
            Self::MeanSquaredError => diff,
            // a zero difference counts as negative
            Self::MeanAbsoluteError => diff.map(|d, _| if d > 0.0 { 1.0 } else { -1.0 }),
        })
    }
}
