use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ChartwellDataError;
use crate::listeners::{
    ChangeListeners, DatasetChangeEvent, DatasetChangeKind, SeriesChangeEvent,
};
use crate::traits::{IntervalXYDataset, SeriesDataset, XYDataset};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XYDataItem {
    pub x: f64,
    pub y: Option<f64>,
}

impl XYDataItem {
    pub fn new(x: f64, y: Option<f64>) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XYSeries {
    key: String,
    auto_sort: bool,
    allow_duplicate_x: bool,
    maximum_item_count: Option<usize>,
    items: Vec<XYDataItem>,
    #[serde(skip)]
    listeners: ChangeListeners<SeriesChangeEvent>,
}

impl Default for XYSeries {
    fn default() -> Self {
        Self::new("")
    }
}

impl XYSeries {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            auto_sort: true,
            allow_duplicate_x: true,
            maximum_item_count: None,
            items: Vec::new(),
            listeners: Default::default(),
        }
    }

    pub fn with_options(key: impl Into<String>, auto_sort: bool, allow_duplicate_x: bool) -> Self {
        Self {
            auto_sort,
            allow_duplicate_x,
            ..Self::new(key)
        }
    }

    /// Builds an auto-sorted series from `(x, y)` pairs
    pub fn from_points(
        key: impl Into<String>,
        points: impl IntoIterator<Item = (f64, f64)>,
    ) -> Result<Self, ChartwellDataError> {
        let mut series = Self::new(key);
        for (x, y) in points {
            series.add(x, Some(y))?;
        }
        Ok(series)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn auto_sort(&self) -> bool {
        self.auto_sort
    }

    pub fn allow_duplicate_x(&self) -> bool {
        self.allow_duplicate_x
    }

    pub fn listeners_mut(&mut self) -> &mut ChangeListeners<SeriesChangeEvent> {
        &mut self.listeners
    }

    pub fn items(&self) -> &[XYDataItem] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<&XYDataItem> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn x(&self, index: usize) -> Option<f64> {
        self.items.get(index).map(|item| item.x)
    }

    pub fn y(&self, index: usize) -> Option<f64> {
        self.items.get(index).and_then(|item| item.y)
    }

    pub fn maximum_item_count(&self) -> Option<usize> {
        self.maximum_item_count
    }

    /// Drops the oldest items until the series fits
    pub fn set_maximum_item_count(&mut self, maximum: Option<usize>) {
        self.maximum_item_count = maximum;
        if self.evict() {
            self.fire_changed();
        }
    }

    fn evict(&mut self) -> bool {
        match self.maximum_item_count {
            Some(max) if self.items.len() > max => {
                let excess = self.items.len() - max;
                self.items.drain(0..excess);
                true
            }
            _ => false,
        }
    }

    pub fn index_of(&self, x: f64) -> Option<usize> {
        if self.auto_sort {
            let idx = self.items.partition_point(|item| item.x < x);
            (idx < self.items.len() && self.items[idx].x == x).then_some(idx)
        } else {
            self.items.iter().position(|item| item.x == x)
        }
    }

    pub fn add(&mut self, x: f64, y: Option<f64>) -> Result<(), ChartwellDataError> {
        self.add_item(XYDataItem::new(x, y))
    }

    pub fn add_item(&mut self, item: XYDataItem) -> Result<(), ChartwellDataError> {
        if !self.allow_duplicate_x && self.index_of(item.x).is_some() {
            return Err(ChartwellDataError::DuplicateX {
                series: self.key.clone(),
                x: item.x,
            });
        }
        if self.auto_sort {
            // duplicates go after the existing items with the same x
            let idx = self.items.partition_point(|existing| existing.x <= item.x);
            self.items.insert(idx, item);
        } else {
            self.items.push(item);
        }
        self.evict();
        self.fire_changed();
        Ok(())
    }

    /// Replaces the y value at `x` if present, otherwise adds a new item.
    /// Returns the replaced item.
    pub fn add_or_update(
        &mut self,
        x: f64,
        y: Option<f64>,
    ) -> Result<Option<XYDataItem>, ChartwellDataError> {
        if self.allow_duplicate_x {
            return Err(ChartwellDataError::InvalidArgument(format!(
                "series `{}` allows duplicate x values, add_or_update is ambiguous",
                self.key
            )));
        }
        match self.index_of(x) {
            Some(idx) => {
                let old = self.items[idx];
                self.items[idx].y = y;
                self.fire_changed();
                Ok(Some(old))
            }
            None => {
                self.add(x, y)?;
                Ok(None)
            }
        }
    }

    pub fn update(&mut self, x: f64, y: Option<f64>) -> Result<(), ChartwellDataError> {
        let idx = self.index_of(x).ok_or_else(|| ChartwellDataError::UnknownX {
            series: self.key.clone(),
            x,
        })?;
        self.update_by_index(idx, y)
    }

    pub fn update_by_index(&mut self, index: usize, y: Option<f64>) -> Result<(), ChartwellDataError> {
        let len = self.items.len();
        let item = self
            .items
            .get_mut(index)
            .ok_or(ChartwellDataError::IndexOutOfBounds { index, len })?;
        item.y = y;
        self.fire_changed();
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<XYDataItem, ChartwellDataError> {
        if index >= self.items.len() {
            return Err(ChartwellDataError::IndexOutOfBounds {
                index,
                len: self.items.len(),
            });
        }
        let item = self.items.remove(index);
        self.fire_changed();
        Ok(item)
    }

    pub fn clear(&mut self) {
        if !self.items.is_empty() {
            self.items.clear();
            self.fire_changed();
        }
    }

    pub fn min_x(&self) -> Option<f64> {
        fold_min(self.items.iter().map(|item| item.x))
    }

    pub fn max_x(&self) -> Option<f64> {
        fold_max(self.items.iter().map(|item| item.x))
    }

    pub fn min_y(&self) -> Option<f64> {
        fold_min(self.items.iter().filter_map(|item| item.y))
    }

    pub fn max_y(&self) -> Option<f64> {
        fold_max(self.items.iter().filter_map(|item| item.y))
    }

    fn fire_changed(&mut self) {
        let event = SeriesChangeEvent {
            series_key: self.key.clone(),
        };
        self.listeners.notify(&event);
    }
}

pub(crate) fn fold_min(values: impl Iterator<Item = f64>) -> Option<f64> {
    values
        .filter(|v| !v.is_nan())
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.min(v))))
}

pub(crate) fn fold_max(values: impl Iterator<Item = f64>) -> Option<f64> {
    values
        .filter(|v| !v.is_nan())
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))))
}

/// Width given to each x value when the collection is viewed as interval data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalWidth {
    /// Smallest gap between consecutive x values in any series, 1.0 if none
    Auto,
    Fixed(f64),
}

impl Default for IntervalWidth {
    fn default() -> Self {
        Self::Auto
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XYSeriesCollection {
    series: Vec<XYSeries>,
    interval_width: IntervalWidth,
    /// Where the x value sits within its interval: 0 at the start, 1 at the end
    interval_position_factor: f64,
    #[serde(skip)]
    listeners: ChangeListeners<DatasetChangeEvent>,
}

impl Default for XYSeriesCollection {
    fn default() -> Self {
        Self {
            series: Vec::new(),
            interval_width: IntervalWidth::Auto,
            interval_position_factor: 0.5,
            listeners: Default::default(),
        }
    }
}

impl XYSeriesCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_series(series: Vec<XYSeries>) -> Result<Self, ChartwellDataError> {
        let mut collection = Self::new();
        for s in series {
            collection.add_series(s)?;
        }
        Ok(collection)
    }

    pub fn listeners_mut(&mut self) -> &mut ChangeListeners<DatasetChangeEvent> {
        &mut self.listeners
    }

    pub fn set_notify(&mut self, notify: bool) {
        if self.listeners.set_notify(notify) {
            self.fire(DatasetChangeKind::Refreshed);
        }
    }

    pub fn series(&self, index: usize) -> Option<&XYSeries> {
        self.series.get(index)
    }

    pub fn series_by_key(&self, key: &str) -> Option<&XYSeries> {
        self.series.iter().find(|s| s.key == key)
    }

    pub fn all_series(&self) -> &[XYSeries] {
        &self.series
    }

    pub fn add_series(&mut self, series: XYSeries) -> Result<(), ChartwellDataError> {
        if self.series_by_key(&series.key).is_some() {
            return Err(ChartwellDataError::DuplicateKey(series.key));
        }
        debug!("adding series `{}` with {} items", series.key, series.len());
        let key = series.key.clone();
        self.series.push(series);
        self.fire(DatasetChangeKind::SeriesAdded(key));
        Ok(())
    }

    pub fn remove_series(&mut self, index: usize) -> Result<XYSeries, ChartwellDataError> {
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

    pub fn remove_series_by_key(&mut self, key: &str) -> Result<XYSeries, ChartwellDataError> {
        let index = self
            .series_index(key)
            .ok_or_else(|| ChartwellDataError::UnknownKey(key.to_string()))?;
        self.remove_series(index)
    }

    pub fn remove_all_series(&mut self) {
        self.series.clear();
        self.fire(DatasetChangeKind::Cleared);
    }

    /// Applies `f` to one series and notifies listeners of the collection
    pub fn update_series<R>(
        &mut self,
        index: usize,
        f: impl FnOnce(&mut XYSeries) -> R,
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

    pub fn interval_width(&self) -> IntervalWidth {
        self.interval_width
    }

    pub fn set_interval_width(&mut self, width: IntervalWidth) -> Result<(), ChartwellDataError> {
        if let IntervalWidth::Fixed(w) = width {
            if w.is_nan() || w < 0.0 {
                return Err(ChartwellDataError::InvalidArgument(format!(
                    "interval width must be non-negative, got {w}"
                )));
            }
        }
        self.interval_width = width;
        self.fire(DatasetChangeKind::ValueChanged);
        Ok(())
    }

    pub fn set_interval_position_factor(&mut self, factor: f64) -> Result<(), ChartwellDataError> {
        if !(0.0..=1.0).contains(&factor) {
            return Err(ChartwellDataError::InvalidArgument(format!(
                "interval position factor must be within [0, 1], got {factor}"
            )));
        }
        self.interval_position_factor = factor;
        self.fire(DatasetChangeKind::ValueChanged);
        Ok(())
    }

    /// Effective interval width
    pub fn resolved_interval_width(&self) -> f64 {
        match self.interval_width {
            IntervalWidth::Fixed(w) => w,
            IntervalWidth::Auto => {
                let gaps = self.series.iter().flat_map(|s| {
                    s.items
                        .windows(2)
                        .map(|w| (w[1].x - w[0].x).abs())
                        .filter(|gap| *gap > 0.0)
                });
                fold_min(gaps).unwrap_or(1.0)
            }
        }
    }

    fn fire(&mut self, kind: DatasetChangeKind) {
        self.listeners
            .notify(&DatasetChangeEvent::new("XYSeriesCollection", kind));
    }
}

impl SeriesDataset for XYSeriesCollection {
    fn series_count(&self) -> usize {
        self.series.len()
    }

    fn series_key(&self, series: usize) -> Option<&str> {
        self.series.get(series).map(|s| s.key.as_str())
    }
}

impl XYDataset for XYSeriesCollection {
    fn item_count(&self, series: usize) -> usize {
        self.series.get(series).map_or(0, |s| s.len())
    }

    fn x(&self, series: usize, item: usize) -> f64 {
        self.series
            .get(series)
            .and_then(|s| s.x(item))
            .unwrap_or(f64::NAN)
    }

    fn y(&self, series: usize, item: usize) -> f64 {
        self.series
            .get(series)
            .and_then(|s| s.y(item))
            .unwrap_or(f64::NAN)
    }
}

impl IntervalXYDataset for XYSeriesCollection {
    fn start_x(&self, series: usize, item: usize) -> f64 {
        self.x(series, item) - self.resolved_interval_width() * self.interval_position_factor
    }

    fn end_x(&self, series: usize, item: usize) -> f64 {
        self.start_x(series, item) + self.resolved_interval_width()
    }

    fn start_y(&self, series: usize, item: usize) -> f64 {
        self.y(series, item)
    }

    fn end_y(&self, series: usize, item: usize) -> f64 {
        self.y(series, item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_auto_sort_inserts_in_order() {
        let mut series = XYSeries::new("S1");
        series.add(3.0, Some(30.0)).unwrap();
        series.add(1.0, Some(10.0)).unwrap();
        series.add(2.0, None).unwrap();
        let xs: Vec<f64> = series.items().iter().map(|i| i.x).collect();
        assert_eq!(xs, vec![1.0, 2.0, 3.0]);
        assert_eq!(series.index_of(2.0), Some(1));
        assert_eq!(series.y(1), None);
        assert_eq!(series.min_y(), Some(10.0));
        assert_eq!(series.max_x(), Some(3.0));
    }

    #[test]
    fn test_duplicates_rejected_when_disallowed() {
        let mut series = XYSeries::with_options("S1", true, false);
        series.add(1.0, Some(1.0)).unwrap();
        assert_eq!(
            series.add(1.0, Some(2.0)),
            Err(ChartwellDataError::DuplicateX {
                series: "S1".to_string(),
                x: 1.0
            })
        );
        let old = series.add_or_update(1.0, Some(5.0)).unwrap();
        assert_eq!(old, Some(XYDataItem::new(1.0, Some(1.0))));
        assert_eq!(series.y(0), Some(5.0));
        assert_eq!(series.add_or_update(2.0, Some(6.0)).unwrap(), None);
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn test_unsorted_series_keeps_insertion_order() {
        let mut series = XYSeries::with_options("S1", false, true);
        series.add(5.0, Some(1.0)).unwrap();
        series.add(2.0, Some(2.0)).unwrap();
        assert_eq!(series.x(0), Some(5.0));
        assert_eq!(series.index_of(2.0), Some(1));
    }

    #[test]
    fn test_maximum_item_count_evicts_oldest() {
        let mut series = XYSeries::with_options("S1", false, true);
        series.set_maximum_item_count(Some(2));
        for i in 0..4 {
            series.add(i as f64, Some(i as f64)).unwrap();
        }
        assert_eq!(series.len(), 2);
        assert_eq!(series.x(0), Some(2.0));
    }

    #[test]
    fn test_series_events() {
        let count = Arc::new(Mutex::new(0));
        let mut series = XYSeries::new("S1");
        let sink = count.clone();
        series.listeners_mut().subscribe(move |_| *sink.lock().unwrap() += 1);
        series.add(1.0, Some(1.0)).unwrap();
        series.update(1.0, Some(2.0)).unwrap();
        assert!(series.update(9.0, None).is_err());
        series.remove(0).unwrap();
        assert_eq!(*count.lock().unwrap(), 3);
    }

    #[test]
    fn test_collection_keys_unique() {
        let mut collection = XYSeriesCollection::new();
        collection.add_series(XYSeries::new("A")).unwrap();
        assert_eq!(
            collection.add_series(XYSeries::new("A")),
            Err(ChartwellDataError::DuplicateKey("A".to_string()))
        );
        assert_eq!(collection.series_index("A"), Some(0));
        assert!(collection.remove_series_by_key("B").is_err());
    }

    #[test]
    fn test_collection_events_and_clone() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let mut collection = XYSeriesCollection::new();
        let sink = events.clone();
        collection
            .listeners_mut()
            .subscribe(move |e: &DatasetChangeEvent| sink.lock().unwrap().push(e.kind.clone()));

        collection.add_series(XYSeries::new("A")).unwrap();
        collection
            .update_series(0, |s| s.add(1.0, Some(2.0)))
            .unwrap()
            .unwrap();

        let mut copy = collection.clone();
        copy.add_series(XYSeries::new("B")).unwrap();
        assert_eq!(
            *events.lock().unwrap(),
            vec![
                DatasetChangeKind::SeriesAdded("A".to_string()),
                DatasetChangeKind::SeriesChanged("A".to_string()),
            ]
        );
        assert_eq!(collection.series_count(), 1);
    }

    #[test]
    fn test_auto_interval_width() {
        let collection = XYSeriesCollection::from_series(vec![
            XYSeries::from_points("A", [(1.0, 1.0), (3.0, 2.0), (4.0, 2.0)]).unwrap(),
        ])
        .unwrap();
        assert_approx_eq!(f64, collection.resolved_interval_width(), 1.0);
        assert_approx_eq!(f64, collection.start_x(0, 1), 2.5);
        assert_approx_eq!(f64, collection.end_x(0, 1), 3.5);
        assert!(collection.x(0, 10).is_nan());
    }

    #[test]
    fn test_serde_skips_listeners() {
        let mut collection = XYSeriesCollection::new();
        collection.listeners_mut().subscribe(|_| {});
        collection
            .add_series(XYSeries::from_points("A", [(1.0, 2.0)]).unwrap())
            .unwrap();
        let json = serde_json::to_string(&collection).unwrap();
        let back: XYSeriesCollection = serde_json::from_str(&json).unwrap();
        assert_eq!(back, collection);
    }
}
