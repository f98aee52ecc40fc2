//! Transitions and run summaries

use serde::{Deserialize, Serialize};

/// Single observed `(state, action, reward, next state)` tuple
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    /// State the action was taken in
    pub current: Vec<f64>,
    /// Action taken
    pub action: usize,
    /// Reward received
    pub reward: f64,
    /// State observed after the action
    pub next: Vec<f64>,
}

impl Transition {
    /// Create a new transition
    #[must_use]
    pub fn new(current: Vec<f64>, action: usize, reward: f64, next: Vec<f64>) -> Self {
        Self {
            current,
            action,
            reward,
            next,
        }
    }
}

/// Totals for a sequence of environment steps
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Number of steps taken
    pub steps: usize,
    /// Sum of rewards received
    pub total_reward: f64,
}

impl RunSummary {
    /// Record one step
    pub fn push(&mut self, reward: f64) {
        self.steps += 1;
        self.total_reward += reward;
    }

    /// Mean reward per step, zero for an empty run
    #[must_use]
    pub fn mean_reward(&self) -> f64 {
        if self.steps == 0 {
            0.0
        } else {
            self.total_reward / self.steps as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary() {
        let mut summary = RunSummary::default();
        assert_eq!(summary.mean_reward(), 0.0);
        summary.push(2.0);
        summary.push(-1.0);
        assert_eq!(summary.steps, 2);
        assert_eq!(summary.total_reward, 1.0);
        assert_eq!(summary.mean_reward(), 0.5);
    }
}
