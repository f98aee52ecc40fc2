//! Externally implemented policies
//!
//! An agent in external mode hands action selection and learning to an
//! [`ExternalPolicy`]. The agent still applies epsilon-greedy exploration on
//! top of [`ExternalPolicy::act`], so [`ExternalPolicy::learn`] always receives
//! the action that was actually taken.

use qlearn_core::{Result, Transition};

/// Policy implemented outside of the table and network engines
pub trait ExternalPolicy: Send {
    /// Preferred action for `state`
    fn act(&mut self, state: &[f64]) -> Result<usize>;

    /// Learn from one transition
    fn learn(&mut self, transition: &Transition) -> Result<()>;

    /// Serialize the policy for [`Agent::export`](crate::Agent::export)
    fn to_json(&self) -> Result<serde_json::Value>;

    /// Restore the policy from [`ExternalPolicy::to_json`] output
    fn from_json(&mut self, value: &serde_json::Value) -> Result<()>;
}

impl std::fmt::Debug for dyn ExternalPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ExternalPolicy")
    }
}
