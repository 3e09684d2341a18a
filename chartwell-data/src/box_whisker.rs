use serde::{Deserialize, Serialize};

use crate::error::ChartwellDataError;
use crate::keyed::KeyedValues2D;
use crate::listeners::{ChangeListeners, DatasetChangeEvent, DatasetChangeKind};
use crate::statistics::{BoxAndWhiskerCalculator, BoxAndWhiskerItem};
use crate::traits::{BoxAndWhiskerCategoryDataset, CategoryDataset};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DefaultBoxAndWhiskerCategoryDataset {
    data: KeyedValues2D<BoxAndWhiskerItem>,
    #[serde(skip)]
    listeners: ChangeListeners<DatasetChangeEvent>,
}

impl DefaultBoxAndWhiskerCategoryDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listeners_mut(&mut self) -> &mut ChangeListeners<DatasetChangeEvent> {
        &mut self.listeners
    }

    pub fn add_item(&mut self, item: BoxAndWhiskerItem, row_key: &str, column_key: &str) {
        self.data.set(row_key, column_key, item);
        self.fire(DatasetChangeKind::ValueChanged);
    }

    /// Summarizes a raw sample and stores the result
    pub fn add_values(
        &mut self,
        values: &[f64],
        row_key: &str,
        column_key: &str,
    ) -> Result<(), ChartwellDataError> {
        let item = BoxAndWhiskerCalculator::calculate(values)?;
        self.add_item(item, row_key, column_key);
        Ok(())
    }

    pub fn item_by_key(
        &self,
        row_key: &str,
        column_key: &str,
    ) -> Result<Option<&BoxAndWhiskerItem>, ChartwellDataError> {
        self.data.get_by_key(row_key, column_key)
    }

    pub fn remove(&mut self, row_key: &str, column_key: &str) -> Result<(), ChartwellDataError> {
        self.data.remove(row_key, column_key)?;
        self.fire(DatasetChangeKind::ValueChanged);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.data.clear();
        self.fire(DatasetChangeKind::Cleared);
    }

    /// Lowest and highest values drawn, outliers included
    pub fn value_bounds(&self) -> Option<(f64, f64)> {
        self.data
            .values()
            .map(|item| item.value_bounds())
            .reduce(|(lo, hi), (a, b)| (lo.min(a), hi.max(b)))
    }

    fn fire(&mut self, kind: DatasetChangeKind) {
        self.listeners.notify(&DatasetChangeEvent::new(
            "DefaultBoxAndWhiskerCategoryDataset",
            kind,
        ));
    }
}

impl CategoryDataset for DefaultBoxAndWhiskerCategoryDataset {
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

    /// The median
    fn value(&self, row: usize, column: usize) -> Option<f64> {
        self.data.get(row, column).map(|item| item.median)
    }
}

impl BoxAndWhiskerCategoryDataset for DefaultBoxAndWhiskerCategoryDataset {
    fn item(&self, row: usize, column: usize) -> Option<&BoxAndWhiskerItem> {
        self.data.get(row, column)
    }
}
