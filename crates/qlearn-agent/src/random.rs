//! Random policy for baseline comparisons

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use qlearn_core::{RLError, Result, Transition};

use crate::ExternalPolicy;

/// Serialized form of a [`RandomPolicy`]
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RandomPolicyState {
    actions: usize,
    observed: usize,
}

/// Policy that selects actions uniformly at random
#[derive(Debug)]
pub struct RandomPolicy {
    /// Number of actions
    actions: usize,
    /// Transitions seen by [`ExternalPolicy::learn`]
    observed: usize,
    rng: StdRng,
}

impl RandomPolicy {
    /// Create a new random policy seeded from entropy
    #[must_use]
    pub fn new(actions: usize) -> Self {
        Self::from_rng(actions, StdRng::from_entropy())
    }

    /// Create a new random policy with a fixed seed
    #[must_use]
    pub fn seeded(actions: usize, seed: u64) -> Self {
        Self::from_rng(actions, StdRng::seed_from_u64(seed))
    }

    fn from_rng(actions: usize, rng: StdRng) -> Self {
        Self {
            actions,
            observed: 0,
            rng,
        }
    }

    /// Number of transitions observed so far
    #[must_use]
    pub fn observed(&self) -> usize {
        self.observed
    }
}

impl ExternalPolicy for RandomPolicy {
    fn act(&mut self, _state: &[f64]) -> Result<usize> {
        if self.actions == 0 {
            return Err(RLError::Config("random policy has no actions".into()));
        }
        Ok(self.rng.gen_range(0..self.actions))
    }

    fn learn(&mut self, _transition: &Transition) -> Result<()> {
        // Random policy doesn't learn from experience
        self.observed += 1;
        Ok(())
    }

    fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(RandomPolicyState {
            actions: self.actions,
            observed: self.observed,
        })?)
    }

    fn from_json(&mut self, value: &serde_json::Value) -> Result<()> {
        let state: RandomPolicyState = serde_json::from_value(value.clone())
            .map_err(|e| RLError::Format(format!("random policy payload: {e}")))?;
        if state.actions != self.actions {
            return Err(RLError::Format(format!(
                "random policy payload has {} actions, expected {}",
                state.actions, self.actions
            )));
        }
        self.observed = state.observed;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actions_in_range() {
        let mut policy = RandomPolicy::seeded(3, 5);
        for _ in 0..100 {
            assert!(policy.act(&[0.0]).unwrap() < 3);
        }
    }

    #[test]
    fn test_json_round_trip() {
        let mut policy = RandomPolicy::seeded(2, 1);
        policy.learn(&Transition::new(vec![0.0], 1, 1.0, vec![1.0])).unwrap();
        let json = policy.to_json().unwrap();

        let mut restored = RandomPolicy::seeded(2, 9);
        restored.from_json(&json).unwrap();
        assert_eq!(restored.observed(), 1);

        let mut wrong = RandomPolicy::seeded(4, 9);
        assert!(matches!(wrong.from_json(&json), Err(RLError::Format(_))));
    }
}
