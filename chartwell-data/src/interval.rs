use serde::{Deserialize, Serialize};

use crate::error::ChartwellDataError;
use crate::listeners::{ChangeListeners, DatasetChangeEvent, DatasetChangeKind};
use crate::traits::{IntervalXYDataset, SeriesDataset, XYDataset};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XYIntervalDataItem {
    pub x: f64,
    pub x_low: f64,
    pub x_high: f64,
    pub y: f64,
    pub y_low: f64,
    pub y_high: f64,
}

impl XYIntervalDataItem {
    pub fn try_new(
        x: f64,
        x_low: f64,
        x_high: f64,
        y: f64,
        y_low: f64,
        y_high: f64,
    ) -> Result<Self, ChartwellDataError> {
        check_interval(x_low, x, x_high)?;
        check_interval(y_low, y, y_high)?;
        Ok(Self {
            x,
            x_low,
            x_high,
            y,
            y_low,
            y_high,
        })
    }
}

fn check_interval(low: f64, value: f64, high: f64) -> Result<(), ChartwellDataError> {
    if low <= value && value <= high {
        Ok(())
    } else {
        Err(ChartwellDataError::InvalidInterval { low, value, high })
    }
}

/// Items sorted by x, each with an x interval and a y interval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct XYIntervalSeries {
    key: String,
    items: Vec<XYIntervalDataItem>,
}

impl XYIntervalSeries {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            items: Vec::new(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn items(&self) -> &[XYIntervalDataItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn add(
        &mut self,
        x: f64,
        x_low: f64,
        x_high: f64,
        y: f64,
        y_low: f64,
        y_high: f64,
    ) -> Result<(), ChartwellDataError> {
        let item = XYIntervalDataItem::try_new(x, x_low, x_high, y, y_low, y_high)?;
        let idx = self.items.partition_point(|existing| existing.x <= x);
        self.items.insert(idx, item);
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<XYIntervalDataItem, ChartwellDataError> {
        if index >= self.items.len() {
            return Err(ChartwellDataError::IndexOutOfBounds {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct XYIntervalSeriesCollection {
    series: Vec<XYIntervalSeries>,
    #[serde(skip)]
    listeners: ChangeListeners<DatasetChangeEvent>,
}

impl XYIntervalSeriesCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listeners_mut(&mut self) -> &mut ChangeListeners<DatasetChangeEvent> {
        &mut self.listeners
    }

    pub fn series(&self, index: usize) -> Option<&XYIntervalSeries> {
        self.series.get(index)
    }

    pub fn add_series(&mut self, series: XYIntervalSeries) -> Result<(), ChartwellDataError> {
        if self.series_index(series.key()).is_some() {
            return Err(ChartwellDataError::DuplicateKey(series.key));
        }
        let key = series.key.clone();
        self.series.push(series);
        self.fire(DatasetChangeKind::SeriesAdded(key));
        Ok(())
    }

    pub fn remove_series(&mut self, index: usize) -> Result<XYIntervalSeries, ChartwellDataError> {
        if index >= self.series.len() {
            return Err(ChartwellDataError::IndexOutOfBounds {
                index,
                len: self.series.len(),
            });
        }
        let removed = self.series.remove(index);
        self.fire(DatasetChangeKind::SeriesRemoved(removed.key.clone()));
        Ok(removed)
    }

    pub fn update_series<R>(
        &mut self,
        index: usize,
        f: impl FnOnce(&mut XYIntervalSeries) -> R,
    ) -> Result<R, ChartwellDataError> {
        let len = self.series.len();
        let series = self
            .series
            .get_mut(index)
            .ok_or(ChartwellDataError::IndexOutOfBounds { index, len })?;
        let result = f(series);
        let key = series.key.clone();
        self.fire(DatasetChangeKind::SeriesChanged(key));
        Ok(result)
    }

    fn item(&self, series: usize, item: usize) -> Option<&XYIntervalDataItem> {
        self.series.get(series).and_then(|s| s.items.get(item))
    }

    fn fire(&mut self, kind: DatasetChangeKind) {
        self.listeners
            .notify(&DatasetChangeEvent::new("XYIntervalSeriesCollection", kind));
    }
}

impl SeriesDataset for XYIntervalSeriesCollection {
    fn series_count(&self) -> usize {
        self.series.len()
    }

    fn series_key(&self, series: usize) -> Option<&str> {
        self.series.get(series).map(|s| s.key.as_str())
    }
}

impl XYDataset for XYIntervalSeriesCollection {
    fn item_count(&self, series: usize) -> usize {
        self.series.get(series).map_or(0, |s| s.len())
    }

    fn x(&self, series: usize, item: usize) -> f64 {
        self.item(series, item).map_or(f64::NAN, |i| i.x)
    }

    fn y(&self, series: usize, item: usize) -> f64 {
        self.item(series, item).map_or(f64::NAN, |i| i.y)
    }
}

impl IntervalXYDataset for XYIntervalSeriesCollection {
    fn start_x(&self, series: usize, item: usize) -> f64 {
        self.item(series, item).map_or(f64::NAN, |i| i.x_low)
    }

    fn end_x(&self, series: usize, item: usize) -> f64 {
        self.item(series, item).map_or(f64::NAN, |i| i.x_high)
    }

    fn start_y(&self, series: usize, item: usize) -> f64 {
        self.item(series, item).map_or(f64::NAN, |i| i.y_low)
    }

    fn end_y(&self, series: usize, item: usize) -> f64 {
        self.item(series, item).map_or(f64::NAN, |i| i.y_high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_validation() {
        let mut series = XYIntervalSeries::new("A");
        assert_eq!(
            series.add(1.0, 2.0, 3.0, 5.0, 4.0, 6.0),
            Err(ChartwellDataError::InvalidInterval {
                low: 2.0,
                value: 1.0,
                high: 3.0
            })
        );
        series.add(2.0, 1.5, 2.5, 5.0, 4.0, 6.0).unwrap();
        series.add(1.0, 0.5, 1.5, 3.0, 3.0, 3.0).unwrap();
        assert_eq!(series.items()[0].x, 1.0);
    }

    #[test]
    fn test_collection_accessors() {
        let mut series = XYIntervalSeries::new("A");
        series.add(2.0, 1.5, 2.5, 5.0, 4.0, 6.0).unwrap();
        let mut collection = XYIntervalSeriesCollection::new();
        collection.add_series(series).unwrap();
        assert_eq!(collection.start_x(0, 0), 1.5);
        assert_eq!(collection.end_y(0, 0), 6.0);
        assert!(collection.start_y(1, 0).is_nan());
    }
}
