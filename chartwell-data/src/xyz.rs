use serde::{Deserialize, Serialize};

use crate::error::ChartwellDataError;
use crate::listeners::{ChangeListeners, DatasetChangeEvent, DatasetChangeKind};
use crate::traits::{SeriesDataset, XYDataset, XYZDataset};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XYZSeriesData {
    pub key: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

/// Series of `(x, y, z)` triples held as parallel arrays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DefaultXYZDataset {
    series: Vec<XYZSeriesData>,
    #[serde(skip)]
    listeners: ChangeListeners<DatasetChangeEvent>,
}

impl DefaultXYZDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listeners_mut(&mut self) -> &mut ChangeListeners<DatasetChangeEvent> {
        &mut self.listeners
    }

    /// Adds a series, replacing any existing series with the same key
    pub fn add_series(
        &mut self,
        key: impl Into<String>,
        x: Vec<f64>,
        y: Vec<f64>,
        z: Vec<f64>,
    ) -> Result<(), ChartwellDataError> {
        let key = key.into();
        if x.len() != y.len() || x.len() != z.len() {
            return Err(ChartwellDataError::LengthMismatch { series: key });
        }
        let data = XYZSeriesData {
            key: key.clone(),
            x,
            y,
            z,
        };
        match self.series_index(&key) {
            Some(idx) => {
                self.series[idx] = data;
                self.fire(DatasetChangeKind::SeriesChanged(key));
            }
            None => {
                self.series.push(data);
                self.fire(DatasetChangeKind::SeriesAdded(key));
            }
        }
        Ok(())
    }

    pub fn remove_series(&mut self, key: &str) -> Result<XYZSeriesData, ChartwellDataError> {
        let idx = self
            .series_index(key)
            .ok_or_else(|| ChartwellDataError::UnknownKey(key.to_string()))?;
        let removed = self.series.remove(idx);
        self.fire(DatasetChangeKind::SeriesRemoved(key.to_string()));
        Ok(removed)
    }

    fn fire(&mut self, kind: DatasetChangeKind) {
        self.listeners
            .notify(&DatasetChangeEvent::new("DefaultXYZDataset", kind));
    }
}

impl SeriesDataset for DefaultXYZDataset {
    fn series_count(&self) -> usize {
        self.series.len()
    }

    fn series_key(&self, series: usize) -> Option<&str> {
        self.series.get(series).map(|s| s.key.as_str())
    }
}

impl XYDataset for DefaultXYZDataset {
    fn item_count(&self, series: usize) -> usize {
        self.series.get(series).map_or(0, |s| s.x.len())
    }

    fn x(&self, series: usize, item: usize) -> f64 {
        self.series
            .get(series)
            .and_then(|s| s.x.get(item).copied())
            .unwrap_or(f64::NAN)
    }

    fn y(&self, series: usize, item: usize) -> f64 {
        self.series
            .get(series)
            .and_then(|s| s.y.get(item).copied())
            .unwrap_or(f64::NAN)
    }
}

impl XYZDataset for DefaultXYZDataset {
    fn z(&self, series: usize, item: usize) -> f64 {
        self.series
            .get(series)
            .and_then(|s| s.z.get(item).copied())
            .unwrap_or(f64::NAN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lengths_must_match() {
        let mut dataset = DefaultXYZDataset::new();
        assert_eq!(
            dataset.add_series("A", vec![1.0], vec![1.0, 2.0], vec![1.0]),
            Err(ChartwellDataError::LengthMismatch {
                series: "A".to_string()
            })
        );
    }

    #[test]
    fn test_replace_series_with_same_key() {
        let mut dataset = DefaultXYZDataset::new();
        dataset
            .add_series("A", vec![1.0], vec![2.0], vec![3.0])
            .unwrap();
        dataset
            .add_series("A", vec![4.0, 5.0], vec![6.0, 7.0], vec![8.0, 9.0])
            .unwrap();
        assert_eq!(dataset.series_count(), 1);
        assert_eq!(dataset.item_count(0), 2);
        assert_eq!(dataset.z(0, 1), 9.0);
        assert!(dataset.remove_series("B").is_err());
    }
}
