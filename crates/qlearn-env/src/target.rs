//! Scalar target seeking

use qlearn_core::Environment;

/// Walk along a bounded line until reaching a target position.
///
/// State is the single component `[position]`. Actions are
/// [`TargetSeek::DECREMENT`], [`TargetSeek::INCREMENT`] and [`TargetSeek::STAY`];
/// moves are clamped to `[0, limit]`. The reward is `+2` when the position
/// equals the target after the move and `-1` otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSeek {
    position: usize,
    start: usize,
    target: usize,
    limit: usize,
}

impl TargetSeek {
    /// Move one step down
    pub const DECREMENT: usize = 0;
    /// Move one step up
    pub const INCREMENT: usize = 1;
    /// Keep the current position
    pub const STAY: usize = 2;
    /// Number of actions
    pub const ACTIONS: usize = 3;

    /// Create an environment starting at `start`. Positions beyond `limit` are clamped.
    #[must_use]
    pub fn new(start: usize, target: usize, limit: usize) -> Self {
        let start = start.min(limit);
        Self {
            position: start,
            start,
            target: target.min(limit),
            limit,
        }
    }

    /// Current position
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Target position
    #[must_use]
    pub fn target(&self) -> usize {
        self.target
    }

    /// True when the walker is on the target
    #[must_use]
    pub fn at_target(&self) -> bool {
        self.position == self.target
    }
}

impl Default for TargetSeek {
    fn default() -> Self {
        Self::new(6, 12, 20)
    }
}

impl Environment for TargetSeek {
    fn state(&self) -> Vec<f64> {
        vec![self.position as f64]
    }

    fn perform(&mut self, action: usize) {
        match action {
            Self::DECREMENT => self.position = self.position.saturating_sub(1),
            Self::INCREMENT => self.position = (self.position + 1).min(self.limit),
            _ => {}
        }
    }

    fn reward(&mut self) -> f64 {
        if self.at_target() {
            2.0
        } else {
            -1.0
        }
    }

    fn render(&self) {
        tracing::trace!(position = self.position, target = self.target, "target seek");
    }

    fn reset(&mut self) {
        self.position = self.start;
    }
}
