//! Exploration schedules

/// Trait for schedules (e.g., for epsilon decay)
pub trait Schedule: Send + Sync + std::fmt::Debug {
    /// Get value at step t
    fn value(&self, t: usize) -> f64;
}

/// Linear schedule that decays from start to end over steps
#[derive(Debug, Clone)]
pub struct LinearSchedule {
    /// Starting value
    pub start: f64,
    /// Ending value
    pub end: f64,
    /// Number of steps for decay
    pub steps: usize,
}

impl LinearSchedule {
    /// Create a new linear schedule
    #[must_use]
    pub fn new(start: f64, end: f64, steps: usize) -> Self {
        Self { start, end, steps }
    }
}

impl Schedule for LinearSchedule {
    fn value(&self, t: usize) -> f64 {
        if t >= self.steps {
            self.end
        } else {
            let progress = t as f64 / self.steps as f64;
            self.start + (self.end - self.start) * progress
        }
    }
}

/// Constant schedule
#[derive(Debug, Clone)]
pub struct ConstantSchedule {
    /// Constant value
    pub value: f64,
}

impl Schedule for ConstantSchedule {
    fn value(&self, _t: usize) -> f64 {
        self.value
    }
}

/// Epsilon schedule for an initial rate and an optional decay horizon.
///
/// A horizon of zero steps means no decay.
#[must_use]
pub fn epsilon_schedule(epsilon: f64, decay: Option<usize>) -> Box<dyn Schedule> {
    match decay {
        Some(steps) if steps > 0 => Box::new(LinearSchedule::new(epsilon, 0.0, steps)),
        _ => Box::new(ConstantSchedule { value: epsilon }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_reaches_floor() {
        let schedule = LinearSchedule::new(0.5, 0.0, 4);
        assert_relative_eq!(schedule.value(0), 0.5);
        assert_relative_eq!(schedule.value(1), 0.375);
        assert_relative_eq!(schedule.value(4), 0.0);
        assert_relative_eq!(schedule.value(100), 0.0);
    }

    #[test]
    fn test_epsilon_schedule() {
        assert_relative_eq!(epsilon_schedule(0.2, None).value(1_000), 0.2);
        assert_relative_eq!(epsilon_schedule(0.2, Some(10)).value(5), 0.1);
    }

    #[test]
    fn test_zero_decay_keeps_epsilon() {
        let schedule = epsilon_schedule(0.2, Some(0));
        assert_relative_eq!(schedule.value(1), 0.2);
        assert_relative_eq!(schedule.value(1_000), 0.2);
    }
}
