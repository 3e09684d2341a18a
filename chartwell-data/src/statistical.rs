use serde::{Deserialize, Serialize};

use crate::error::ChartwellDataError;
use crate::keyed::KeyedValues2D;
use crate::listeners::{ChangeListeners, DatasetChangeEvent, DatasetChangeKind};
use crate::traits::{CategoryDataset, StatisticalCategoryDataset};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeanAndStandardDeviation {
    pub mean: Option<f64>,
    pub std_dev: Option<f64>,
}

/// Category data where each cell holds a mean and a standard deviation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DefaultStatisticalCategoryDataset {
    data: KeyedValues2D<MeanAndStandardDeviation>,
    #[serde(skip)]
    listeners: ChangeListeners<DatasetChangeEvent>,
}

impl DefaultStatisticalCategoryDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listeners_mut(&mut self) -> &mut ChangeListeners<DatasetChangeEvent> {
        &mut self.listeners
    }

    pub fn add(
        &mut self,
        mean: Option<f64>,
        std_dev: Option<f64>,
        row_key: &str,
        column_key: &str,
    ) {
        self.data
            .set(row_key, column_key, MeanAndStandardDeviation { mean, std_dev });
        self.fire(DatasetChangeKind::ValueChanged);
    }

    pub fn remove(&mut self, row_key: &str, column_key: &str) -> Result<(), ChartwellDataError> {
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

    /// Lowest and highest of `mean - std_dev` and `mean + std_dev` over all cells
    pub fn range_bounds_including_deviation(&self) -> Option<(f64, f64)> {
        self.data
            .values()
            .filter_map(|cell| {
                let mean = cell.mean?;
                let sd = cell.std_dev.unwrap_or(0.0);
                Some((mean - sd, mean + sd))
            })
            .reduce(|(lo, hi), (a, b)| (lo.min(a), hi.max(b)))
    }

    fn fire(&mut self, kind: DatasetChangeKind) {
        self.listeners.notify(&DatasetChangeEvent::new(
            "DefaultStatisticalCategoryDataset",
            kind,
        ));
    }
}

impl CategoryDataset for DefaultStatisticalCategoryDataset {
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
        self.mean_value(row, column)
    }
}

impl StatisticalCategoryDataset for DefaultStatisticalCategoryDataset {
    fn mean_value(&self, row: usize, column: usize) -> Option<f64> {
        self.data.get(row, column).and_then(|cell| cell.mean)
    }

    fn std_dev_value(&self, row: usize, column: usize) -> Option<f64> {
        self.data.get(row, column).and_then(|cell| cell.std_dev)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_is_value() {
        let mut dataset = DefaultStatisticalCategoryDataset::new();
        dataset.add(Some(10.0), Some(2.0), "S1", "C1");
        dataset.add(Some(4.0), None, "S1", "C2");
        assert_eq!(dataset.value(0, 0), Some(10.0));
        assert_eq!(dataset.std_dev_value(0, 1), None);
        assert_eq!(dataset.range_bounds_including_deviation(), Some((4.0, 12.0)));
        dataset.remove("S1", "C1").unwrap();
        assert_eq!(dataset.column_count(), 1);
    }
}
