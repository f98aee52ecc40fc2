//! Environment capability trait

/// An environment an agent can interact with.
///
/// The interaction protocol is: read [`state`](Environment::state), choose an
/// action, [`perform`](Environment::perform) it, then read
/// [`reward`](Environment::reward), which reflects the action just taken.
pub trait Environment {
    /// Current state as a fixed-length numeric vector
    fn state(&self) -> Vec<f64>;

    /// Apply an action
    fn perform(&mut self, action: usize);

    /// Reward for the most recently performed action
    fn reward(&mut self) -> f64;

    /// Render the environment (optional, side effects only)
    fn render(&self) {}

    /// Return to the initial configuration (optional)
    fn reset(&mut self) {}
}

impl<E: Environment + ?Sized> Environment for Box<E> {
    fn state(&self) -> Vec<f64> {
        (**self).state()
    }

    fn perform(&mut self, action: usize) {
        (**self).perform(action);
    }

    fn reward(&mut self) -> f64 {
        (**self).reward()
    }

    fn render(&self) {
        (**self).render();
    }

    fn reset(&mut self) {
        (**self).reset();
    }
}
