//! Training the network and model agents on small supervised problems

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use qlearn_agent::{Agent, AgentOptions, CompileOptions, LayerSpec, NeuralNetwork, Target};
use qlearn_core::{Activation, Loss, Tensor};

fn larger_of_two(rng: &mut StdRng) -> (Vec<f64>, Vec<f64>) {
    let input = vec![rng.gen::<f64>(), rng.gen::<f64>()];
    let target = if input[0] > input[1] { vec![1.0, 0.0] } else { vec![0.0, 1.0] };
    (input, target)
}

#[test]
fn test_network_learns_larger_of_two() {
    let mut rng = StdRng::seed_from_u64(7);
    let specs = [
        LayerSpec::new(8, Activation::Sigmoid),
        LayerSpec::new(2, Activation::Sigmoid),
    ];
    let mut net = NeuralNetwork::new(2, 2, &specs, Loss::MeanSquaredError, 0.1, &mut rng).unwrap();

    let iterations: u32 = 10_000;
    let mut correct: u32 = 0;
    for _ in 0..iterations {
        let (input, target) = larger_of_two(&mut rng);
        let output = net.forward(&input).unwrap();
        if Tensor::argmax(&output) == Tensor::argmax(&target) {
            correct += 1;
        }
        net.backward(&Target::Vector(target), 1.0).unwrap();
    }

    let accuracy = f64::from(correct) / f64::from(iterations);
    assert!(accuracy > 0.5, "accuracy {accuracy} should beat random guessing");
}

#[test]
fn test_agent_train_reduces_loss() {
    let mut agent = Agent::model(2, 2, AgentOptions::default()).unwrap().with_seed(11);
    agent
        .add_layers(&[
            LayerSpec::new(8, Activation::Sigmoid),
            LayerSpec::new(2, Activation::Sigmoid),
        ])
        .unwrap();
    agent.compile(CompileOptions { loss: Loss::MeanSquaredError }).unwrap();

    let mut rng = StdRng::seed_from_u64(12);
    let (inputs, outputs): (Vec<_>, Vec<_>) = (0..200).map(|_| larger_of_two(&mut rng)).unzip();

    let first = agent.train(&inputs, &outputs).unwrap();
    let mut last = first;
    for _ in 0..20 {
        last = agent.train(&inputs, &outputs).unwrap();
    }
    assert!(last < first, "loss went from {first} to {last}");
}

#[test]
fn test_train_rejects_mismatched_pairs() {
    let mut agent = Agent::model(2, 2, AgentOptions::default()).unwrap();
    agent.add_layers(&[LayerSpec::new(2, Activation::Linear)]).unwrap();
    agent.compile(CompileOptions::default()).unwrap();
    assert!(agent.train(&[vec![0.0, 1.0]], &[]).is_err());
    assert!(agent.train(&[], &[]).is_err());

    let mut table = Agent::table(2, 2, AgentOptions::default()).unwrap();
    assert!(table.train(&[vec![0.0, 1.0]], &[vec![1.0, 0.0]]).is_err());
}
