//! Example: DQN agent learning to find food on a grid

use qlearn_agent::{run, Agent, AgentOptions, CompileOptions, LayerSpec};
use qlearn_core::{Activation, Loss};
use qlearn_env::FoodGrid;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let options = AgentOptions {
        epsilon: 0.15,
        alpha: 0.001,
        gamma: 0.975,
        episode_size: 50,
        batch_size: 300,
        max_memory: 1_000_000,
        epsilon_decay: Some(1_000_000),
    };
    let mut agent = Agent::model(FoodGrid::STATES, FoodGrid::ACTIONS, options)?;
    agent.add_layers(&[
        LayerSpec::new(64, Activation::Sigmoid),
        LayerSpec::new(FoodGrid::ACTIONS, Activation::Linear),
    ])?;
    agent.compile(CompileOptions { loss: Loss::MeanAbsoluteError })?;

    let mut env = FoodGrid::new(40);
    let num_rounds = 20;
    let mut round_rewards = Vec::new();

    for round in 0..num_rounds {
        let summary = run(&mut agent, &mut env, 1_000)?;
        round_rewards.push(summary.total_reward);
        println!(
            "Round {}: Total Reward = {:.2}, Mean Reward = {:.4}",
            round + 1,
            summary.total_reward,
            summary.mean_reward()
        );
    }

    let avg_reward: f64 = round_rewards.iter().sum::<f64>() / round_rewards.len() as f64;
    println!("\nAverage Reward over {num_rounds} rounds: {avg_reward:.2}");
    Ok(())
}
