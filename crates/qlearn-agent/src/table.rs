//! Sparse tabular Q-values

use indexmap::IndexMap;

use qlearn_core::{RLError, Result};

/// Build the table key for a state vector.
///
/// Components are rendered with the shortest round-trip float format and
/// joined with `,`. A rendered float never contains `,`, so distinct vectors
/// map to distinct keys. `-0` is folded into `0`.
#[must_use]
pub fn state_key(state: &[f64]) -> String {
    state
        .iter()
        .map(|&v| if v == 0.0 { 0.0 } else { v })
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Mapping from discrete state to per-action values; unseen states read as zeros
#[derive(Debug, Clone, PartialEq)]
pub struct QTable {
    table: IndexMap<String, Vec<f64>>,
    states: usize,
    actions: usize,
}

impl QTable {
    /// Create an empty table
    #[must_use]
    pub fn new(states: usize, actions: usize) -> Self {
        Self {
            table: IndexMap::new(),
            states,
            actions,
        }
    }

    fn check_state(&self, state: &[f64]) -> Result<()> {
        if state.len() == self.states {
            Ok(())
        } else {
            Err(RLError::dimension(self.states, state.len()))
        }
    }

    /// Action values for `state`. Misses are not materialised.
    pub fn get(&self, state: &[f64]) -> Result<Vec<f64>> {
        self.check_state(state)?;
        Ok(self
            .table
            .get(&state_key(state))
            .cloned()
            .unwrap_or_else(|| vec![0.0; self.actions]))
    }

    /// Write `value` for `action` in `state`
    pub fn set(&mut self, state: &[f64], action: usize, value: f64) -> Result<()> {
        self.check_state(state)?;
        if action >= self.actions {
            return Err(RLError::InvalidAction(format!(
                "action {action} outside of 0..{}",
                self.actions
            )));
        }
        let actions = self.actions;
        let row = self
            .table
            .entry(state_key(state))
            .or_insert_with(|| vec![0.0; actions]);
        row[action] = value;
        Ok(())
    }

    /// Replace the whole mapping. Every key must have `states` components.
    pub fn load(&mut self, table: IndexMap<String, Vec<f64>>) -> Result<()> {
        if let Some(key) = table.keys().find(|key| key.split(',').count() != self.states) {
            return Err(RLError::Format(format!(
                "table key {key:?} does not have {} components",
                self.states
            )));
        }
        if let Some(row) = table.values().find(|row| row.len() != self.actions) {
            return Err(RLError::dimension(self.actions, row.len()));
        }
        self.table = table;
        Ok(())
    }

    /// Export the whole mapping
    #[must_use]
    pub fn save(&self) -> &IndexMap<String, Vec<f64>> {
        &self.table
    }

    /// Number of materialised states
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// True when no state has been written
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unseen_state_is_zero() {
        let table = QTable::new(2, 2);
        assert_eq!(table.get(&[1.0, 2.0]).unwrap(), vec![0.0, 0.0]);
        assert!(table.is_empty());
    }

    #[test]
    fn test_set_then_get_persists() {
        let mut table = QTable::new(2, 2);
        table.set(&[1.0, 2.0], 1, 5.0).unwrap();
        assert_eq!(table.get(&[1.0, 2.0]).unwrap(), vec![0.0, 5.0]);

        table.set(&[3.0, 4.0], 0, -1.0).unwrap();
        table.set(&[2.0, 1.0], 1, 2.0).unwrap();
        assert_eq!(table.get(&[1.0, 2.0]).unwrap(), vec![0.0, 5.0]);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_dimension_checks() {
        let mut table = QTable::new(2, 3);
        assert!(matches!(
            table.set(&[1.0], 0, 1.0),
            Err(RLError::DimensionMismatch { expected: 2, actual: 1 })
        ));
        assert!(matches!(table.get(&[1.0, 2.0, 3.0]), Err(RLError::DimensionMismatch { .. })));
        assert!(matches!(table.set(&[1.0, 2.0], 3, 1.0), Err(RLError::InvalidAction(_))));
    }

    #[test]
    fn test_keys() {
        assert_eq!(state_key(&[1.0, 0.5, -2.0]), "1,0.5,-2");
        assert_eq!(state_key(&[-0.0]), state_key(&[0.0]));
        assert_ne!(state_key(&[1.0, 23.0]), state_key(&[12.0, 3.0]));
    }

    #[test]
    fn test_load_validates_rows() {
        let mut table = QTable::new(1, 2);
        let mut rows = IndexMap::new();
        rows.insert("1".to_string(), vec![1.0, 2.0, 3.0]);
        assert!(table.load(rows).is_err());

        let mut rows = IndexMap::new();
        rows.insert("1".to_string(), vec![1.0, 2.0]);
        table.load(rows).unwrap();
        assert_eq!(table.get(&[1.0]).unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_load_rejects_keys_of_wrong_arity() {
        let mut table = QTable::new(1, 3);
        let mut rows = IndexMap::new();
        rows.insert("1,2,3".to_string(), vec![9.0, 9.0, 9.0]);
        assert!(matches!(table.load(rows), Err(RLError::Format(_))));
        assert!(table.is_empty());

        let mut table = QTable::new(2, 1);
        let mut rows = IndexMap::new();
        rows.insert(state_key(&[0.5, -1.0]), vec![1.0]);
        table.load(rows).unwrap();
        assert_eq!(table.get(&[0.5, -1.0]).unwrap(), vec![1.0]);
    }
}
