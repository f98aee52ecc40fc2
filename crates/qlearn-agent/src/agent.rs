//! Mode-dispatching agent
//!
//! An [`Agent`] is configured once as a table, a model or an external policy
//! and never changes mode afterwards. Models additionally need their layers
//! added and [`Agent::compile`] called before they can predict.
//!
//! Interaction alternates [`Agent::predict`] and [`Agent::reward`]: predict
//! records the state and chosen action, reward learns from them together with
//! the reward and the next state.

use indexmap::IndexMap;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use qlearn_core::{RLError, Result, Tensor, Transition};

use crate::network::{LayerSpec, NeuralNetwork, Target};
use crate::snapshot::{Mode, Snapshot};
use crate::utils::{epsilon_schedule, Schedule};
use crate::{AgentOptions, CompileOptions, ExternalPolicy, QTable, ReplayMemory};

/// Online network, its lagged target copy, and the replay memory feeding them
#[derive(Debug)]
struct Compiled {
    online: NeuralNetwork,
    target: NeuralNetwork,
    memory: ReplayMemory,
}

#[derive(Debug)]
enum ModelEngine {
    Pending { layers: Vec<LayerSpec> },
    Compiled(Compiled),
}

#[derive(Debug)]
enum Engine {
    Table(QTable),
    Model(ModelEngine),
    External(Box<dyn ExternalPolicy>),
}

/// State carried from one call to the next
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    /// State passed to the most recent predict
    pub last_state: Option<Vec<f64>>,
    /// Action returned by the most recent predict
    pub last_action: usize,
    /// Number of reward calls so far
    pub episode: usize,
    /// Number of predict calls so far
    pub steps: usize,
    /// Current exploration rate
    pub epsilon: f64,
}

/// Reinforcement-learning agent
#[derive(Debug)]
pub struct Agent {
    states: usize,
    actions: usize,
    options: AgentOptions,
    engine: Engine,
    session: Session,
    schedule: Box<dyn Schedule>,
    rng: StdRng,
}

impl Agent {
    fn configure(
        states: usize,
        actions: usize,
        options: AgentOptions,
        engine: Engine,
    ) -> Result<Self> {
        if states == 0 || actions == 0 {
            return Err(RLError::Config(format!(
                "states and actions must be positive, got {states} and {actions}"
            )));
        }
        options.validate()?;
        Ok(Self {
            states,
            actions,
            schedule: epsilon_schedule(options.epsilon, options.epsilon_decay),
            session: Session {
                epsilon: options.epsilon,
                ..Session::default()
            },
            options,
            engine,
            rng: StdRng::from_entropy(),
        })
    }

    /// Q-table agent
    pub fn table(states: usize, actions: usize, options: AgentOptions) -> Result<Self> {
        Self::configure(states, actions, options, Engine::Table(QTable::new(states, actions)))
    }

    /// Network agent; add layers and [`compile`](Agent::compile) before use
    pub fn model(states: usize, actions: usize, options: AgentOptions) -> Result<Self> {
        let engine = Engine::Model(ModelEngine::Pending { layers: Vec::new() });
        Self::configure(states, actions, options, engine)
    }

    /// Agent delegating action values and learning to `policy`
    pub fn external(
        states: usize,
        actions: usize,
        options: AgentOptions,
        policy: Box<dyn ExternalPolicy>,
    ) -> Result<Self> {
        Self::configure(states, actions, options, Engine::External(policy))
    }

    /// Use a fixed seed for weight initialisation, exploration and replay sampling
    #[must_use]
    pub fn with_seed(self, seed: u64) -> Self {
        self.with_rng(StdRng::seed_from_u64(seed))
    }

    /// Use the given random source
    #[must_use]
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Append layers to a model that has not been compiled yet
    pub fn add_layers(&mut self, specs: &[LayerSpec]) -> Result<()> {
        if specs.is_empty() {
            return Err(RLError::Config("no layers were provided".into()));
        }
        let mode = self.mode();
        match &mut self.engine {
            Engine::Model(ModelEngine::Pending { layers }) => {
                layers.extend_from_slice(specs);
                Ok(())
            }
            Engine::Model(ModelEngine::Compiled(_)) => Err(RLError::Config(
                "layers cannot be added after compile()".into(),
            )),
            Engine::Table(_) | Engine::External(_) => Err(RLError::Config(format!(
                "layers are not supported in {mode} mode"
            ))),
        }
    }

    /// Build the online and target networks and the replay memory
    pub fn compile(&mut self, options: CompileOptions) -> Result<()> {
        let layers = match &self.engine {
            Engine::Model(ModelEngine::Pending { layers }) => layers,
            Engine::Model(ModelEngine::Compiled(_)) => {
                return Err(RLError::Config("model is already compiled".into()));
            }
            Engine::Table(_) | Engine::External(_) => {
                tracing::warn!(
                    mode = %self.mode(),
                    "compile() is not required for non-model modes"
                );
                return Ok(());
            }
        };

        let (states, actions, alpha) = (self.states, self.actions, self.options.alpha);
        let online =
            NeuralNetwork::new(states, actions, layers, options.loss, alpha, &mut self.rng)?;
        let mut target =
            NeuralNetwork::new(states, actions, layers, options.loss, alpha, &mut self.rng)?;
        target.copy_weights_from(&online)?;
        let memory = ReplayMemory::new(self.options.max_memory, self.options.batch_size);

        tracing::info!(
            states = self.states,
            actions = self.actions,
            layers = layers.len(),
            loss = ?options.loss,
            "compiled model"
        );
        self.engine = Engine::Model(ModelEngine::Compiled(Compiled {
            online,
            target,
            memory,
        }));
        Ok(())
    }

    fn ensure_ready(&self) -> Result<()> {
        match self.engine {
            Engine::Model(ModelEngine::Pending { .. }) => Err(RLError::NotReady(
                "a call to compile() is required before interaction".into(),
            )),
            _ => Ok(()),
        }
    }

    fn check_state(&self, state: &[f64]) -> Result<()> {
        if state.len() == self.states {
            Ok(())
        } else {
            Err(RLError::dimension(self.states, state.len()))
        }
    }

    fn greedy(&mut self, state: &[f64]) -> Result<usize> {
        let action = match &mut self.engine {
            Engine::Table(table) => Tensor::argmax(&table.get(state)?),
            Engine::Model(ModelEngine::Compiled(model)) => {
                Tensor::argmax(&model.online.forward(state)?)
            }
            Engine::Model(ModelEngine::Pending { .. }) => {
                return Err(RLError::NotReady("model is not compiled".into()));
            }
            Engine::External(policy) => {
                let action = policy.act(state)?;
                if action >= self.actions {
                    return Err(RLError::InvalidAction(format!(
                        "external policy chose {action} outside of 0..{}",
                        self.actions
                    )));
                }
                Some(action)
            }
        };
        Ok(action.unwrap_or(0))
    }

    /// Choose an action for `state` (epsilon-greedy)
    pub fn predict(&mut self, state: &[f64]) -> Result<usize> {
        self.ensure_ready()?;
        self.check_state(state)?;

        let explore = self.rng.gen::<f64>() < self.session.epsilon;
        let action = if explore {
            self.rng.gen_range(0..self.actions)
        } else {
            self.greedy(state)?
        };

        self.session.steps += 1;
        self.session.epsilon = self.schedule.value(self.session.steps);
        self.session.last_state = Some(state.to_vec());
        self.session.last_action = action;

        metrics::counter!("qlearn_predictions_total", 1);
        metrics::gauge!("qlearn_epsilon", self.session.epsilon);
        tracing::trace!(action, explore, epsilon = self.session.epsilon, "predicted");
        Ok(action)
    }

    /// Learn from the reward for the last predicted action and the resulting state
    pub fn reward(&mut self, reward: f64, next: &[f64]) -> Result<()> {
        self.ensure_ready()?;
        self.check_state(next)?;
        let last_state = self
            .session
            .last_state
            .clone()
            .ok_or_else(|| RLError::NotReady("reward() needs a preceding predict()".into()))?;
        let last_action = self.session.last_action;

        self.session.episode += 1;
        metrics::counter!("qlearn_rewards_total", 1);

        let AgentOptions { alpha, gamma, .. } = self.options;
        match &mut self.engine {
            Engine::Table(table) => {
                let current = table.get(&last_state)?[last_action];
                let best_next = Tensor::max(&table.get(next)?).unwrap_or(0.0);
                let target = reward + gamma * best_next;
                let q = current + alpha * (target - current);
                table.set(&last_state, last_action, q)
            }
            Engine::Model(ModelEngine::Compiled(model)) => {
                let transition = Transition::new(last_state, last_action, reward, next.to_vec());
                model.replay(transition, &self.options, self.session.episode, &mut self.rng)
            }
            Engine::Model(ModelEngine::Pending { .. }) => {
                Err(RLError::NotReady("model is not compiled".into()))
            }
            Engine::External(policy) => {
                policy.learn(&Transition::new(last_state, last_action, reward, next.to_vec()))
            }
        }
    }

    /// Supervised fitting of the online network on input/output pairs.
    ///
    /// Returns the mean loss over the pairs, measured before each update.
    pub fn train(&mut self, inputs: &[Vec<f64>], outputs: &[Vec<f64>]) -> Result<f64> {
        self.ensure_ready()?;
        if inputs.is_empty() || inputs.len() != outputs.len() {
            return Err(RLError::Config(format!(
                "inputs and outputs must be equal in number and non-empty, got {} and {}",
                inputs.len(),
                outputs.len()
            )));
        }
        let Engine::Model(ModelEngine::Compiled(model)) = &mut self.engine else {
            return Err(RLError::Config("supervised training requires model mode".into()));
        };

        let mut total = 0.0;
        for (input, output) in inputs.iter().zip(outputs) {
            model.online.forward(input)?;
            total += model.online.backward(&Target::Vector(output.clone()), 1.0)?;
        }
        Ok(total / inputs.len() as f64)
    }

    /// Serialize the mode, dimensions and learned values
    pub fn export(&self) -> Result<String> {
        let w = match &self.engine {
            Engine::Table(table) => serde_json::to_value(table.save())?,
            Engine::Model(ModelEngine::Compiled(model)) => {
                serde_json::to_value(model.online.save())?
            }
            Engine::Model(ModelEngine::Pending { .. }) => {
                return Err(RLError::NotReady("a model must be compiled before export".into()));
            }
            Engine::External(policy) => policy.to_json()?,
        };
        let snapshot = Snapshot {
            m: Some(self.mode().tag()),
            s: self.states,
            a: self.actions,
            w,
        };
        Ok(serde_json::to_string(&snapshot)?)
    }

    /// Restore values previously produced by [`Agent::export`]
    pub fn import(&mut self, data: &str) -> Result<()> {
        let snapshot: Snapshot = serde_json::from_str(data)
            .map_err(|e| RLError::Format(format!("invalid snapshot: {e}")))?;
        let tag = snapshot
            .m
            .ok_or_else(|| RLError::Format("snapshot has no mode tag".into()))?;
        let mode = Mode::from_tag(tag)
            .ok_or_else(|| RLError::Format(format!("unknown mode tag {tag}")))?;
        if snapshot.s != self.states || snapshot.a != self.actions {
            return Err(RLError::Format(format!(
                "snapshot is {}x{} but the agent is {}x{}",
                snapshot.s, snapshot.a, self.states, self.actions
            )));
        }
        if mode != self.mode() {
            return Err(RLError::Format(format!(
                "snapshot is for {mode} mode but the agent is in {} mode",
                self.mode()
            )));
        }

        match &mut self.engine {
            Engine::Table(table) => {
                let rows: IndexMap<String, Vec<f64>> = serde_json::from_value(snapshot.w)
                    .map_err(|e| RLError::Format(format!("invalid table payload: {e}")))?;
                table.load(rows)
            }
            Engine::Model(ModelEngine::Compiled(model)) => {
                let weights: Vec<Vec<f64>> = serde_json::from_value(snapshot.w)
                    .map_err(|e| RLError::Format(format!("invalid model payload: {e}")))?;
                model.online.load(&weights)?;
                model.target.load(&weights)
            }
            Engine::Model(ModelEngine::Pending { .. }) => Err(RLError::NotReady(
                "a model must be compiled before import".into(),
            )),
            Engine::External(policy) => policy.from_json(&snapshot.w),
        }
    }

    /// Operating mode
    #[must_use]
    pub fn mode(&self) -> Mode {
        match self.engine {
            Engine::Table(_) => Mode::Table,
            Engine::Model(_) => Mode::Model,
            Engine::External(_) => Mode::External,
        }
    }

    /// True once a model has been compiled; always true for other modes
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ensure_ready().is_ok()
    }

    /// Number of state components
    #[must_use]
    pub fn states(&self) -> usize {
        self.states
    }

    /// Number of actions
    #[must_use]
    pub fn actions(&self) -> usize {
        self.actions
    }

    /// Hyperparameters
    #[must_use]
    pub fn options(&self) -> &AgentOptions {
        &self.options
    }

    /// Current exploration rate
    #[must_use]
    pub fn epsilon(&self) -> f64 {
        self.session.epsilon
    }

    /// Number of reward calls so far
    #[must_use]
    pub fn episode(&self) -> usize {
        self.session.episode
    }

    /// Per-call session state
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Q-table, in table mode
    #[must_use]
    pub fn table_values(&self) -> Option<&QTable> {
        match &self.engine {
            Engine::Table(table) => Some(table),
            _ => None,
        }
    }

    /// Online network, once compiled
    #[must_use]
    pub fn network(&self) -> Option<&NeuralNetwork> {
        self.compiled().map(|model| &model.online)
    }

    /// Target network, once compiled
    #[must_use]
    pub fn target_network(&self) -> Option<&NeuralNetwork> {
        self.compiled().map(|model| &model.target)
    }

    /// Replay memory, once compiled
    #[must_use]
    pub fn memory(&self) -> Option<&ReplayMemory> {
        self.compiled().map(|model| &model.memory)
    }

    fn compiled(&self) -> Option<&Compiled> {
        match &self.engine {
            Engine::Model(ModelEngine::Compiled(model)) => Some(model),
            _ => None,
        }
    }
}

impl Compiled {
    /// Store `transition`, then train on a replay batch plus the newest transition
    fn replay(
        &mut self,
        transition: Transition,
        options: &AgentOptions,
        episode: usize,
        rng: &mut StdRng,
    ) -> Result<()> {
        self.memory.push(transition);

        let Some(mut batch) = self.memory.sample(rng) else {
            tracing::debug!(stored = self.memory.len(), "not enough history to replay");
            return Ok(());
        };
        if let Some(latest) = self.memory.back() {
            batch.push(latest.clone());
        }

        let multiplier = 1.0 / options.batch_size as f64;
        let mut total = 0.0;
        for t in &batch {
            let best_next = Tensor::max(&self.target.evaluate(&t.next)?).unwrap_or(0.0);
            let value = t.reward + options.gamma * best_next;
            self.online.forward(&t.current)?;
            total += self.online.backward(&Target::Action { action: t.action, value }, multiplier)?;
        }
        let loss = total / batch.len() as f64;
        metrics::histogram!("qlearn_batch_loss", loss);
        tracing::debug!(batch = batch.len(), loss, "replayed batch");

        if episode % options.episode_size == 0 {
            self.target.copy_weights_from(&self.online)?;
            metrics::counter!("qlearn_target_syncs_total", 1);
            tracing::info!(episode, "synced target network");
        }
        Ok(())
    }
}
