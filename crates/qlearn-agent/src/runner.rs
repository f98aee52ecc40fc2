//! Plays an [`Agent`] against an [`Environment`]

use tracing::{debug, info};

use qlearn_core::{Environment, Result, RunSummary};

use crate::Agent;

/// Result of a single environment step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    /// Action the agent chose
    pub action: usize,
    /// Reward the environment returned
    pub reward: f64,
}

/// Run one interaction step.
///
/// Reads the state, asks the agent for an action, performs it, collects the
/// reward, renders, and feeds the reward with the new state back to the agent.
pub fn step<E: Environment + ?Sized>(agent: &mut Agent, env: &mut E) -> Result<StepOutcome> {
    let state = env.state();
    let action = agent.predict(&state)?;
    env.perform(action);
    let reward = env.reward();
    env.render();
    let next = env.state();
    agent.reward(reward, &next)?;
    Ok(StepOutcome { action, reward })
}

/// Reset the environment and run `steps` interaction steps
pub fn run<E: Environment + ?Sized>(
    agent: &mut Agent,
    env: &mut E,
    steps: usize,
) -> Result<RunSummary> {
    env.reset();
    let mut summary = RunSummary::default();
    for _ in 0..steps {
        let outcome = step(agent, env)?;
        debug!(action = outcome.action, reward = outcome.reward, "step");
        summary.push(outcome.reward);
    }
    info!(
        steps = summary.steps,
        total_reward = summary.total_reward,
        epsilon = agent.epsilon(),
        "run finished"
    );
    Ok(summary)
}
