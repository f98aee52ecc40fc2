//! Experience replay memory

use rand::seq::index;
use rand::Rng;
use std::collections::VecDeque;

use qlearn_core::Transition;

/// Bounded FIFO of transitions with uniform sampling
#[derive(Debug, Clone)]
pub struct ReplayMemory {
    /// Buffer storage, oldest first
    buffer: VecDeque<Transition>,
    /// Maximum capacity
    capacity: usize,
    /// Number of transitions returned by [`ReplayMemory::sample`]
    batch_size: usize,
}

impl ReplayMemory {
    /// Create a new replay memory
    #[must_use]
    pub fn new(capacity: usize, batch_size: usize) -> Self {
        Self {
            buffer: VecDeque::with_capacity(capacity.min(4096)),
            capacity,
            batch_size,
        }
    }

    /// Add a transition, evicting the oldest one when full
    pub fn add(&mut self, current: Vec<f64>, action: usize, reward: f64, next: Vec<f64>) {
        self.push(Transition::new(current, action, reward, next));
    }

    /// Add an already built transition
    pub fn push(&mut self, transition: Transition) {
        while self.buffer.len() >= self.capacity.max(1) {
            self.buffer.pop_front();
        }
        self.buffer.push_back(transition);
    }

    /// Sample `batch_size` distinct transitions.
    ///
    /// Returns `None` until the memory holds more than `batch_size` entries.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Vec<Transition>> {
        if self.buffer.len() <= self.batch_size {
            return None;
        }

        let batch = index::sample(rng, self.buffer.len(), self.batch_size)
            .into_iter()
            .map(|i| self.buffer[i].clone())
            .collect();

        Some(batch)
    }

    /// Most recently added transition
    #[must_use]
    pub fn back(&self) -> Option<&Transition> {
        self.buffer.back()
    }

    /// Get the current size of the memory
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if memory is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Maximum number of stored transitions
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Configured sample size
    #[must_use]
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Clear the memory
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Replace the contents, keeping only the newest `capacity` transitions
    pub fn load(&mut self, transitions: Vec<Transition>) {
        self.buffer.clear();
        for transition in transitions {
            self.push(transition);
        }
    }

    /// Export every stored transition, oldest first
    #[must_use]
    pub fn save(&self) -> Vec<Transition> {
        self.buffer.iter().cloned().collect()
    }

    /// Iterate over stored transitions, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Transition> {
        self.buffer.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn filled(capacity: usize, batch_size: usize, count: usize) -> ReplayMemory {
        let mut memory = ReplayMemory::new(capacity, batch_size);
        for i in 0..count {
            memory.add(vec![i as f64], i, i as f64, vec![i as f64 + 1.0]);
        }
        memory
    }

    #[test]
    fn test_fifo_eviction() {
        let memory = filled(3, 1, 4);
        assert_eq!(memory.len(), 3);
        let actions: Vec<usize> = memory.iter().map(|t| t.action).collect();
        assert_eq!(actions, vec![1, 2, 3]);
        assert_eq!(memory.back().map(|t| t.action), Some(3));
    }

    #[test]
    fn test_sample_needs_more_than_batch() {
        let mut rng = StdRng::seed_from_u64(7);
        let memory = filled(10, 4, 4);
        assert!(memory.sample(&mut rng).is_none());

        let memory = filled(10, 4, 5);
        let batch = memory.sample(&mut rng).unwrap();
        assert_eq!(batch.len(), 4);
    }

    #[test]
    fn test_sample_without_replacement() {
        let mut rng = StdRng::seed_from_u64(11);
        let memory = filled(50, 20, 50);
        for _ in 0..20 {
            let batch = memory.sample(&mut rng).unwrap();
            let distinct: HashSet<usize> = batch.iter().map(|t| t.action).collect();
            assert_eq!(distinct.len(), 20);
        }
    }

    #[test]
    fn test_save_load_respects_capacity() {
        let source = filled(10, 2, 6);
        let mut memory = ReplayMemory::new(4, 2);
        memory.load(source.save());
        assert_eq!(memory.len(), 4);
        assert_eq!(memory.iter().next().map(|t| t.action), Some(2));

        memory.clear();
        assert!(memory.is_empty());
        assert!(memory.back().is_none());
    }
}
