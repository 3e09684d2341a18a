use std::cmp::Ordering;

use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::error::ChartwellDataError;
use crate::listeners::{ChangeListeners, DatasetChangeEvent, DatasetChangeKind};
use crate::traits::PieDataset;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Ordered key to value mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DefaultPieDataset {
    data: IndexMap<String, Option<f64>>,
    #[serde(skip)]
    listeners: ChangeListeners<DatasetChangeEvent>,
}

impl DefaultPieDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<K: Into<String>>(pairs: impl IntoIterator<Item = (K, f64)>) -> Self {
        Self {
            data: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), Some(v)))
                .collect(),
            listeners: Default::default(),
        }
    }

    pub fn listeners_mut(&mut self) -> &mut ChangeListeners<DatasetChangeEvent> {
        &mut self.listeners
    }

    pub fn set_notify(&mut self, notify: bool) {
        if self.listeners.set_notify(notify) {
            self.fire(DatasetChangeKind::Refreshed);
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.data.keys().map(|k| k.as_str())
    }

    /// Updates the value in place if `key` exists, otherwise appends it
    pub fn set_value(&mut self, key: impl Into<String>, value: Option<f64>) {
        self.data.insert(key.into(), value);
        self.fire(DatasetChangeKind::ValueChanged);
    }

    /// Inserts at `position`, moving `key` there if it already exists
    pub fn insert_value(
        &mut self,
        position: usize,
        key: impl Into<String>,
        value: Option<f64>,
    ) -> Result<(), ChartwellDataError> {
        let key = key.into();
        let len = self.data.len() - usize::from(self.data.contains_key(&key));
        if position > len {
            return Err(ChartwellDataError::IndexOutOfBounds {
                index: position,
                len,
            });
        }
        self.data.shift_remove(&key);
        self.data.shift_insert(position, key, value);
        self.fire(DatasetChangeKind::KeysChanged);
        Ok(())
    }

    pub fn value_by_key(&self, key: &str) -> Result<Option<f64>, ChartwellDataError> {
        self.data
            .get(key)
            .copied()
            .ok_or_else(|| ChartwellDataError::UnknownKey(key.to_string()))
    }

    pub fn remove(&mut self, key: &str) -> Result<Option<f64>, ChartwellDataError> {
        let removed = self
            .data
            .shift_remove(key)
            .ok_or_else(|| ChartwellDataError::UnknownKey(key.to_string()))?;
        self.fire(DatasetChangeKind::KeysChanged);
        Ok(removed)
    }

    pub fn clear(&mut self) {
        if !self.data.is_empty() {
            self.data.clear();
            self.fire(DatasetChangeKind::Cleared);
        }
    }

    pub fn sort_by_keys(&mut self, order: SortOrder) {
        self.data.sort_by(|a, _, b, _| apply_order(a.cmp(b), order));
        self.fire(DatasetChangeKind::Reordered);
    }

    /// Missing values sort last in either order
    pub fn sort_by_values(&mut self, order: SortOrder) {
        self.data.sort_by(|_, a, _, b| match (a, b) {
            (Some(a), Some(b)) => apply_order(OrderedFloat(*a).cmp(&OrderedFloat(*b)), order),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        self.fire(DatasetChangeKind::Reordered);
    }

    fn fire(&mut self, kind: DatasetChangeKind) {
        self.listeners
            .notify(&DatasetChangeEvent::new("DefaultPieDataset", kind));
    }
}

fn apply_order(ordering: Ordering, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Ascending => ordering,
        SortOrder::Descending => ordering.reverse(),
    }
}

impl PieDataset for DefaultPieDataset {
    fn item_count(&self) -> usize {
        self.data.len()
    }

    fn key(&self, index: usize) -> Option<&str> {
        self.data.get_index(index).map(|(k, _)| k.as_str())
    }

    fn value(&self, index: usize) -> Option<f64> {
        self.data.get_index(index).and_then(|(_, v)| *v)
    }

    fn index_of(&self, key: &str) -> Option<usize> {
        self.data.get_index_of(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_value_keeps_position() {
        let mut dataset = DefaultPieDataset::from_pairs([("A", 1.0), ("B", 2.0)]);
        dataset.set_value("A", Some(5.0));
        assert_eq!(dataset.key(0), Some("A"));
        assert_eq!(dataset.value(0), Some(5.0));
        dataset.set_value("C", None);
        assert_eq!(dataset.index_of("C"), Some(2));
        assert_eq!(dataset.value_by_key("C"), Ok(None));
        assert!(dataset.value_by_key("D").is_err());
    }

    #[test]
    fn test_insert_value() {
        let mut dataset = DefaultPieDataset::from_pairs([("A", 1.0), ("B", 2.0), ("C", 3.0)]);
        dataset.insert_value(0, "C", Some(4.0)).unwrap();
        assert_eq!(dataset.keys().collect::<Vec<_>>(), vec!["C", "A", "B"]);
        assert!(dataset.insert_value(9, "D", None).is_err());
    }

    #[test]
    fn test_sorting() {
        let mut dataset = DefaultPieDataset::from_pairs([("B", 1.0), ("C", 3.0), ("A", 2.0)]);
        dataset.set_value("D", None);
        dataset.sort_by_values(SortOrder::Descending);
        assert_eq!(dataset.keys().collect::<Vec<_>>(), vec!["C", "A", "B", "D"]);
        dataset.sort_by_keys(SortOrder::Ascending);
        assert_eq!(dataset.keys().collect::<Vec<_>>(), vec!["A", "B", "C", "D"]);
        assert_eq!(dataset.remove("D"), Ok(None));
        assert_eq!(dataset.item_count(), 3);
    }
}
