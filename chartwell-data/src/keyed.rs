use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::error::ChartwellDataError;

/// Sparse table of values addressed by row and column keys.
///
/// Keys keep their insertion order. A cell that was never set is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: Deserialize<'de>"
))]
pub struct KeyedValues2D<T> {
    column_keys: IndexSet<String>,
    rows: IndexMap<String, IndexMap<String, T>>,
}

impl<T> Default for KeyedValues2D<T> {
    fn default() -> Self {
        Self {
            column_keys: IndexSet::new(),
            rows: IndexMap::new(),
        }
    }
}

impl<T> KeyedValues2D<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.column_keys.len()
    }

    pub fn row_key(&self, row: usize) -> Option<&str> {
        self.rows.get_index(row).map(|(key, _)| key.as_str())
    }

    pub fn column_key(&self, column: usize) -> Option<&str> {
        self.column_keys.get_index(column).map(|key| key.as_str())
    }

    pub fn row_index(&self, key: &str) -> Option<usize> {
        self.rows.get_index_of(key)
    }

    pub fn column_index(&self, key: &str) -> Option<usize> {
        self.column_keys.get_index_of(key)
    }

    pub fn get(&self, row: usize, column: usize) -> Option<&T> {
        let column_key = self.column_keys.get_index(column)?;
        self.rows.get_index(row)?.1.get(column_key)
    }

    /// Fails when either key is unknown; a known but empty cell is `Ok(None)`
    pub fn get_by_key(&self, row_key: &str, column_key: &str) -> Result<Option<&T>, ChartwellDataError> {
        let row = self
            .rows
            .get(row_key)
            .ok_or_else(|| ChartwellDataError::UnknownKey(row_key.to_string()))?;
        if !self.column_keys.contains(column_key) {
            return Err(ChartwellDataError::UnknownKey(column_key.to_string()));
        }
        Ok(row.get(column_key))
    }

    pub fn get_mut_by_key(&mut self, row_key: &str, column_key: &str) -> Option<&mut T> {
        self.rows.get_mut(row_key)?.get_mut(column_key)
    }

    pub fn set(&mut self, row_key: &str, column_key: &str, value: T) {
        self.column_keys.insert(column_key.to_string());
        self.rows
            .entry(row_key.to_string())
            .or_default()
            .insert(column_key.to_string(), value);
    }

    /// Removes one cell, then drops its row and column if they became empty
    pub fn remove(&mut self, row_key: &str, column_key: &str) -> Result<Option<T>, ChartwellDataError> {
        let row = self
            .rows
            .get_mut(row_key)
            .ok_or_else(|| ChartwellDataError::UnknownKey(row_key.to_string()))?;
        if !self.column_keys.contains(column_key) {
            return Err(ChartwellDataError::UnknownKey(column_key.to_string()));
        }
        let removed = row.shift_remove(column_key);
        if row.is_empty() {
            self.rows.shift_remove(row_key);
        }
        if !self.rows.values().any(|r| r.contains_key(column_key)) {
            self.column_keys.shift_remove(column_key);
        }
        Ok(removed)
    }

    pub fn remove_row(&mut self, row_key: &str) -> Result<(), ChartwellDataError> {
        self.rows
            .shift_remove(row_key)
            .map(|_| ())
            .ok_or_else(|| ChartwellDataError::UnknownKey(row_key.to_string()))
    }

    pub fn remove_column(&mut self, column_key: &str) -> Result<(), ChartwellDataError> {
        if !self.column_keys.shift_remove(column_key) {
            return Err(ChartwellDataError::UnknownKey(column_key.to_string()));
        }
        for row in self.rows.values_mut() {
            row.shift_remove(column_key);
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.column_keys.clear();
    }

    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.rows.values().flat_map(|row| row.values())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_order_and_removal() {
        let mut table = KeyedValues2D::new();
        table.set("R1", "C1", 1);
        table.set("R1", "C2", 2);
        table.set("R2", "C2", 3);
        assert_eq!(table.column_key(1), Some("C2"));
        assert_eq!(table.get(1, 0), None);
        assert_eq!(table.get(1, 1), Some(&3));

        assert_eq!(table.remove("R1", "C1"), Ok(Some(1)));
        assert_eq!(table.column_count(), 1);
        assert_eq!(table.remove("R2", "C2"), Ok(Some(3)));
        assert_eq!(table.row_count(), 1);
        assert!(table.get_by_key("R2", "C2").is_err());
    }

    #[test]
    fn test_remove_column() {
        let mut table = KeyedValues2D::new();
        table.set("R1", "C1", 1.0);
        table.set("R1", "C2", 2.0);
        table.remove_column("C1").unwrap();
        assert_eq!(table.get(0, 0), Some(&2.0));
        assert!(table.remove_column("C1").is_err());
        assert!(table.remove_row("R9").is_err());
    }
}
