//! Feed-forward network with manual back-propagation
//!
//! Layers hold a `units x input_dim` weight matrix and no bias. Inputs are
//! treated as column vectors; a forward pass computes `a = f(W · a_prev)`
//! layer by layer. Only the most recent network input is cached, so
//! [`NeuralNetwork::backward`] recomputes every intermediate output from it.

use rand::Rng;
use rand_distr::{Distribution, Uniform};
use serde::{Deserialize, Serialize};

use qlearn_core::{Activation, Loss, RLError, Result, Tensor};

/// User-facing description of a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerSpec {
    /// Number of output units
    pub units: usize,
    /// Activation applied to the layer output
    pub activation: Activation,
}

impl LayerSpec {
    /// Create a layer description
    #[must_use]
    pub fn new(units: usize, activation: Activation) -> Self {
        Self { units, activation }
    }
}

/// A built layer with its weights
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Number of output units
    pub units: usize,
    /// Activation applied to the layer output
    pub activation: Activation,
    /// `units x input_dim` weights
    pub weights: Tensor,
}

/// Desired output for a backward pass
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    /// Full desired output vector
    Vector(Vec<f64>),
    /// Desired value for one action; the other outputs keep the network's own prediction
    Action {
        /// Output index to override
        action: usize,
        /// Desired value at that index
        value: f64,
    },
}

/// Ordered stack of bias-free dense layers
#[derive(Debug, Clone)]
pub struct NeuralNetwork {
    layers: Vec<Layer>,
    states: usize,
    actions: usize,
    loss: Loss,
    alpha: f64,
    /// Most recent forward input as a column vector
    cache: Option<Tensor>,
}

impl NeuralNetwork {
    /// Build a network with weights drawn uniformly from `[0, 0.5)`
    pub fn new<R: Rng + ?Sized>(
        states: usize,
        actions: usize,
        specs: &[LayerSpec],
        loss: Loss,
        alpha: f64,
        rng: &mut R,
    ) -> Result<Self> {
        let last = specs
            .last()
            .ok_or_else(|| RLError::Config("a network needs at least one layer".into()))?;
        if last.units != actions {
            return Err(RLError::Config(format!(
                "last layer has {} units but the network has {actions} actions",
                last.units
            )));
        }
        if states == 0 {
            return Err(RLError::Config("a network needs at least one input".into()));
        }
        if let Some(i) = specs.iter().position(|spec| spec.units == 0) {
            return Err(RLError::Config(format!("layer {i} has zero units")));
        }

        let init = Uniform::new(0.0, 0.5);
        let mut input_dim = states;
        let mut layers = Vec::with_capacity(specs.len());
        for spec in specs {
            let weights = Tensor::from_fn((spec.units, input_dim), |_| init.sample(&mut *rng));
            layers.push(Layer {
                units: spec.units,
                activation: spec.activation,
                weights,
            });
            input_dim = spec.units;
        }

        Ok(Self {
            layers,
            states,
            actions,
            loss,
            alpha,
            cache: None,
        })
    }

    /// Input dimensionality
    #[must_use]
    pub fn states(&self) -> usize {
        self.states
    }

    /// Output dimensionality
    #[must_use]
    pub fn actions(&self) -> usize {
        self.actions
    }

    /// Loss used by [`NeuralNetwork::backward`]
    #[must_use]
    pub fn loss(&self) -> Loss {
        self.loss
    }

    /// Built layers
    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    fn input_column(&self, input: &[f64]) -> Result<Tensor> {
        if input.len() != self.states {
            return Err(RLError::dimension(self.states, input.len()));
        }
        Ok(Tensor::column(input))
    }

    /// Outputs of every layer, starting with the input itself
    fn activations(&self, input: Tensor) -> Result<Vec<Tensor>> {
        let mut outputs = Vec::with_capacity(self.layers.len() + 1);
        outputs.push(input);
        for layer in &self.layers {
            let z = layer.weights.multiply(&outputs[outputs.len() - 1])?;
            outputs.push(layer.activation.forward(&z));
        }
        Ok(outputs)
    }

    /// Run the network without touching the input cache
    pub fn evaluate(&self, input: &[f64]) -> Result<Vec<f64>> {
        let column = self.input_column(input)?;
        let mut outputs = self.activations(column)?;
        Ok(outputs.pop().map(|out| out.to_vec()).unwrap_or_default())
    }

    /// Run the network and remember `input` for the next backward pass
    pub fn forward(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        let output = self.evaluate(input)?;
        self.cache = Some(Tensor::column(input));
        Ok(output)
    }

    /// Update the weights towards `target` for the cached input.
    ///
    /// Every layer gets `W += (f'(out) ⊙ error ⊙ alpha ⊙ multiplier) · prev_outᵀ`
    /// and passes `W_updatedᵀ · error` on to the layer before it. Returns the
    /// loss of the prediction made before the update.
    pub fn backward(&mut self, target: &Target, multiplier: f64) -> Result<f64> {
        let input = self
            .cache
            .clone()
            .ok_or_else(|| RLError::NotReady("backward() needs a preceding forward()".into()))?;
        let outputs = self.activations(input)?;
        let prediction = &outputs[outputs.len() - 1];

        let desired = match target {
            Target::Vector(values) => {
                if values.len() != self.actions {
                    return Err(RLError::dimension(self.actions, values.len()));
                }
                Tensor::column(values)
            }
            Target::Action { action, value } => {
                if *action >= self.actions {
                    return Err(RLError::InvalidAction(format!(
                        "action {action} outside of 0..{}",
                        self.actions
                    )));
                }
                prediction.map(|v, i| if i == *action { *value } else { v })
            }
        };

        let loss = self.loss.forward(prediction, &desired)?;
        let mut error = self.loss.derivative(prediction, &desired)?;

        for (i, layer) in self.layers.iter_mut().enumerate().rev() {
            let gradient = layer
                .activation
                .derivative(&outputs[i + 1])
                .dot(&error)?
                .dot_scalar(self.alpha)
                .dot_scalar(multiplier);
            let delta = gradient.multiply(&outputs[i].transpose())?;
            layer.weights = layer.weights.add(&delta)?;
            error = layer.weights.transpose().multiply(&error)?;
        }

        Ok(loss)
    }

    /// Export per-layer weights as flat row-major arrays
    #[must_use]
    pub fn save(&self) -> Vec<Vec<f64>> {
        self.layers.iter().map(|layer| layer.weights.to_vec()).collect()
    }

    /// Replace every layer's weights. Nothing changes unless all layers validate.
    pub fn load(&mut self, weights: &[Vec<f64>]) -> Result<()> {
        if weights.len() != self.layers.len() {
            return Err(RLError::dimension(self.layers.len(), weights.len()));
        }
        for (layer, values) in self.layers.iter().zip(weights) {
            if values.len() != layer.weights.len() {
                return Err(RLError::dimension(layer.weights.len(), values.len()));
            }
        }
        for (layer, values) in self.layers.iter_mut().zip(weights) {
            layer.weights.set(values.clone())?;
        }
        Ok(())
    }

    /// Hard-copy every weight from `other`
    pub fn copy_weights_from(&mut self, other: &Self) -> Result<()> {
        self.load(&other.save())
    }
}
