use serde::{Deserialize, Serialize};

use crate::error::ChartwellDataError;
use crate::keyed::KeyedValues2D;
use crate::listeners::{ChangeListeners, DatasetChangeEvent, DatasetChangeKind};
use crate::traits::CategoryDataset;

/// Values in a table of row (series) keys by column (category) keys
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DefaultCategoryDataset {
    data: KeyedValues2D<Option<f64>>,
    #[serde(skip)]
    listeners: ChangeListeners<DatasetChangeEvent>,
}

impl DefaultCategoryDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listeners_mut(&mut self) -> &mut ChangeListeners<DatasetChangeEvent> {
        &mut self.listeners
    }

    pub fn set_notify(&mut self, notify: bool) {
        if self.listeners.set_notify(notify) {
            self.fire(DatasetChangeKind::Refreshed);
        }
    }

    /// Same as [`Self::set_value`]
    pub fn add_value(&mut self, value: Option<f64>, row_key: &str, column_key: &str) {
        self.set_value(value, row_key, column_key);
    }

    pub fn set_value(&mut self, value: Option<f64>, row_key: &str, column_key: &str) {
        self.data.set(row_key, column_key, value);
        self.fire(DatasetChangeKind::ValueChanged);
    }

    /// Adds `delta` to an existing cell; a missing value counts as zero
    pub fn increment_value(
        &mut self,
        delta: f64,
        row_key: &str,
        column_key: &str,
    ) -> Result<(), ChartwellDataError> {
        let current = self.data.get_by_key(row_key, column_key)?.copied().flatten();
        self.data
            .set(row_key, column_key, Some(current.unwrap_or(0.0) + delta));
        self.fire(DatasetChangeKind::ValueChanged);
        Ok(())
    }

    pub fn value_by_key(
        &self,
        row_key: &str,
        column_key: &str,
    ) -> Result<Option<f64>, ChartwellDataError> {
        Ok(self.data.get_by_key(row_key, column_key)?.copied().flatten())
    }

    pub fn remove_value(&mut self, row_key: &str, column_key: &str) -> Result<(), ChartwellDataError> {
        self.data.remove(row_key, column_key)?;
        self.fire(DatasetChangeKind::ValueChanged);
        Ok(())
    }

    pub fn remove_row(&mut self, row_key: &str) -> Result<(), ChartwellDataError> {
        self.data.remove_row(row_key)?;
        self.fire(DatasetChangeKind::KeysChanged);
        Ok(())
    }

    pub fn remove_column(&mut self, column_key: &str) -> Result<(), ChartwellDataError> {
        self.data.remove_column(column_key)?;
        self.fire(DatasetChangeKind::KeysChanged);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.data.clear();
        self.fire(DatasetChangeKind::Cleared);
    }

    fn fire(&mut self, kind: DatasetChangeKind) {
        self.listeners
            .notify(&DatasetChangeEvent::new("DefaultCategoryDataset", kind));
    }
}

impl CategoryDataset for DefaultCategoryDataset {
    fn row_count(&self) -> usize {
        self.data.row_count()
    }

    fn column_count(&self) -> usize {
        self.data.column_count()
    }

    fn row_key(&self, row: usize) -> Option<&str> {
        self.data.row_key(row)
    }

    fn column_key(&self, column: usize) -> Option<&str> {
        self.data.column_key(column)
    }

    fn value(&self, row: usize, column: usize) -> Option<f64> {
        self.data.get(row, column).copied().flatten()
    }

    fn row_index(&self, key: &str) -> Option<usize> {
        self.data.row_index(key)
    }

    fn column_index(&self, key: &str) -> Option<usize> {
        self.data.column_index(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn sample() -> DefaultCategoryDataset {
        let mut dataset = DefaultCategoryDataset::new();
        dataset.add_value(Some(1.0), "S1", "Jan");
        dataset.add_value(Some(4.0), "S1", "Feb");
        dataset.add_value(Some(3.0), "S2", "Feb");
        dataset
    }

    #[test]
    fn test_table_shape() {
        let dataset = sample();
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(dataset.column_keys(), vec!["Jan", "Feb"]);
        assert_eq!(dataset.value(1, 0), None);
        assert_eq!(dataset.value(1, 1), Some(3.0));
        assert_eq!(dataset.value_by_key("S2", "Jan"), Ok(None));
        assert!(dataset.value_by_key("S3", "Jan").is_err());
    }

    #[test]
    fn test_increment() {
        let mut dataset = sample();
        dataset.increment_value(2.5, "S1", "Jan").unwrap();
        assert_eq!(dataset.value_by_key("S1", "Jan"), Ok(Some(3.5)));
        dataset.increment_value(1.0, "S2", "Jan").unwrap();
        assert_eq!(dataset.value_by_key("S2", "Jan"), Ok(Some(1.0)));
        assert_eq!(
            dataset.increment_value(1.0, "S9", "Jan"),
            Err(ChartwellDataError::UnknownKey("S9".to_string()))
        );
    }

    #[test]
    fn test_remove() {
        let mut dataset = sample();
        dataset.remove_value("S1", "Jan").unwrap();
        assert_eq!(dataset.column_keys(), vec!["Feb"]);
        dataset.remove_row("S1").unwrap();
        assert_eq!(dataset.row_keys(), vec!["S2"]);
        assert!(dataset.remove_column("Jan").is_err());
    }

    #[test]
    fn test_suppressed_events_resume_with_one() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let mut dataset = DefaultCategoryDataset::new();
        let sink = events.clone();
        dataset
            .listeners_mut()
            .subscribe(move |e: &DatasetChangeEvent| sink.lock().unwrap().push(e.kind.clone()));
        dataset.set_notify(false);
        dataset.set_value(Some(1.0), "A", "B");
        dataset.set_value(Some(2.0), "A", "C");
        dataset.set_notify(true);
        assert_eq!(*events.lock().unwrap(), vec![DatasetChangeKind::Refreshed]);
    }
}
