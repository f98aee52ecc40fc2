//! Example: Q-table agent walking to a target position

use qlearn_agent::{run, Agent, AgentOptions};
use qlearn_env::TargetSeek;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let num_episodes = 300;
    let steps = 50;
    let options = AgentOptions {
        alpha: 0.5,
        gamma: 0.9,
        epsilon: 1.0,
        epsilon_decay: Some(200 * steps),
        ..AgentOptions::default()
    };
    let mut agent = Agent::table(1, TargetSeek::ACTIONS, options)?;
    let mut env = TargetSeek::default();

    for episode in 0..num_episodes {
        let summary = run(&mut agent, &mut env, steps)?;
        if (episode + 1) % 50 == 0 {
            println!(
                "Episode {}: Total Reward = {:.2}, Epsilon = {:.3}, Reached target = {}",
                episode + 1,
                summary.total_reward,
                agent.epsilon(),
                env.at_target()
            );
        }
    }

    println!("\nTests:");
    for position in [5.0, 12.0, 14.0] {
        println!("What to do at x={position}? {}", agent.predict(&[position])?);
    }

    println!("\nExport: {}", agent.export()?);
    Ok(())
}
