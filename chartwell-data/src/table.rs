use serde::{Deserialize, Serialize};

use crate::error::ChartwellDataError;
use crate::listeners::{ChangeListeners, DatasetChangeEvent, DatasetChangeKind};
use crate::traits::{IntervalXYDataset, SeriesDataset, TableXYDataset, XYDataset};
use crate::xy::XYSeries;

/// XY series that all share one sorted set of x values.
///
/// Adding a value at a new x inserts that x into every series, with a missing y
/// where no value was given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DefaultTableXYDataset {
    series: Vec<XYSeries>,
    /// Remove x values whose y is missing in every series
    auto_prune: bool,
    interval_width: Option<f64>,
    #[serde(skip)]
    listeners: ChangeListeners<DatasetChangeEvent>,
}

impl DefaultTableXYDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_auto_prune(mut self, auto_prune: bool) -> Self {
        self.auto_prune = auto_prune;
        self
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

    /// Shared x values in ascending order
    pub fn x_values(&self) -> Vec<f64> {
        self.series
            .first()
            .map(|s| s.items().iter().map(|item| item.x).collect())
            .unwrap_or_default()
    }

    pub fn add_series(&mut self, series: XYSeries) -> Result<(), ChartwellDataError> {
        if series.allow_duplicate_x() || !series.auto_sort() {
            return Err(ChartwellDataError::InvalidArgument(format!(
                "series `{}` must be sorted and must not allow duplicate x values",
                series.key()
            )));
        }
        if self.series_index(series.key()).is_some() {
            return Err(ChartwellDataError::DuplicateKey(series.key().to_string()));
        }
        let key = series.key().to_string();
        self.series.push(series);
        self.sync_x_values()?;
        self.fire(DatasetChangeKind::SeriesAdded(key));
        Ok(())
    }

    /// Empty series that can take values at any x
    pub fn add_empty_series(&mut self, key: impl Into<String>) -> Result<(), ChartwellDataError> {
        self.add_series(XYSeries::with_options(key, true, false))
    }

    pub fn remove_series(&mut self, index: usize) -> Result<XYSeries, ChartwellDataError> {
        if index >= self.series.len() {
            return Err(ChartwellDataError::IndexOutOfBounds {
                index,
                len: self.series.len(),
            });
        }
        let removed = self.series.remove(index);
        if self.auto_prune {
            self.prune();
        }
        self.fire(DatasetChangeKind::SeriesRemoved(removed.key().to_string()));
        Ok(removed)
    }

    /// Sets the y value of `series` at `x`, adding `x` to the table if needed
    pub fn add(&mut self, series: usize, x: f64, y: Option<f64>) -> Result<(), ChartwellDataError> {
        let len = self.series.len();
        let target = self
            .series
            .get_mut(series)
            .ok_or(ChartwellDataError::IndexOutOfBounds { index: series, len })?;
        target.add_or_update(x, y)?;
        self.sync_x_values()?;
        if self.auto_prune {
            self.prune();
        }
        let key = self.series[series].key().to_string();
        self.fire(DatasetChangeKind::SeriesChanged(key));
        Ok(())
    }

    pub fn remove_all_values_for_x(&mut self, x: f64) {
        for series in self.series.iter_mut() {
            if let Some(idx) = series.index_of(x) {
                let _ = series.remove(idx);
            }
        }
        self.fire(DatasetChangeKind::ValueChanged);
    }

    /// Removes x values where every series is missing a y value
    pub fn prune(&mut self) {
        let empty: Vec<f64> = self
            .x_values()
            .into_iter()
            .filter(|x| {
                self.series.iter().all(|s| {
                    s.index_of(*x)
                        .and_then(|idx| s.y(idx))
                        .is_none()
                })
            })
            .collect();
        for x in empty {
            for series in self.series.iter_mut() {
                if let Some(idx) = series.index_of(x) {
                    let _ = series.remove(idx);
                }
            }
        }
    }

    pub fn set_interval_width(&mut self, width: Option<f64>) {
        self.interval_width = width;
        self.fire(DatasetChangeKind::ValueChanged);
    }

    fn resolved_interval_width(&self) -> f64 {
        self.interval_width.unwrap_or_else(|| {
            let xs = self.x_values();
            crate::xy::fold_min(xs.windows(2).map(|w| w[1] - w[0])).unwrap_or(1.0)
        })
    }

    fn sync_x_values(&mut self) -> Result<(), ChartwellDataError> {
        let mut all: Vec<f64> = self
            .series
            .iter()
            .flat_map(|s| s.items().iter().map(|item| item.x))
            .collect();
        all.sort_by(f64::total_cmp);
        all.dedup();
        for series in self.series.iter_mut() {
            for x in all.iter() {
                if series.index_of(*x).is_none() {
                    series.add(*x, None)?;
                }
            }
        }
        Ok(())
    }

    fn fire(&mut self, kind: DatasetChangeKind) {
        self.listeners
            .notify(&DatasetChangeEvent::new("DefaultTableXYDataset", kind));
    }
}

impl SeriesDataset for DefaultTableXYDataset {
    fn series_count(&self) -> usize {
        self.series.len()
    }

    fn series_key(&self, series: usize) -> Option<&str> {
        self.series.get(series).map(|s| s.key())
    }
}

impl XYDataset for DefaultTableXYDataset {
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

impl TableXYDataset for DefaultTableXYDataset {
    fn table_item_count(&self) -> usize {
        self.series.first().map_or(0, |s| s.len())
    }
}

impl IntervalXYDataset for DefaultTableXYDataset {
    fn start_x(&self, series: usize, item: usize) -> f64 {
        self.x(series, item) - self.resolved_interval_width() / 2.0
    }

    fn end_x(&self, series: usize, item: usize) -> f64 {
        self.x(series, item) + self.resolved_interval_width() / 2.0
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

    #[test]
    fn test_series_share_x_values() {
        let mut table = DefaultTableXYDataset::new();
        table.add_empty_series("A").unwrap();
        table.add_empty_series("B").unwrap();
        table.add(0, 2.0, Some(5.0)).unwrap();
        table.add(1, 1.0, Some(3.0)).unwrap();

        assert_eq!(table.x_values(), vec![1.0, 2.0]);
        assert_eq!(table.table_item_count(), 2);
        assert!(table.y(0, 0).is_nan());
        assert_eq!(table.y(0, 1), 5.0);
        assert_eq!(table.y(1, 0), 3.0);
        assert!(table.y(1, 1).is_nan());
    }

    #[test]
    fn test_rejects_series_with_duplicates() {
        let mut table = DefaultTableXYDataset::new();
        assert!(matches!(
            table.add_series(XYSeries::new("A")),
            Err(ChartwellDataError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_existing_series_gain_new_x() {
        let mut table = DefaultTableXYDataset::new();
        let mut a = XYSeries::with_options("A", true, false);
        a.add(1.0, Some(1.0)).unwrap();
        let mut b = XYSeries::with_options("B", true, false);
        b.add(3.0, Some(3.0)).unwrap();
        table.add_series(a).unwrap();
        table.add_series(b).unwrap();
        assert_eq!(table.item_count(0), 2);
        assert_eq!(table.item_count(1), 2);
    }

    #[test]
    fn test_auto_prune() {
        let mut table = DefaultTableXYDataset::new().with_auto_prune(true);
        table.add_empty_series("A").unwrap();
        table.add(0, 1.0, Some(1.0)).unwrap();
        table.add(0, 2.0, None).unwrap();
        assert_eq!(table.x_values(), vec![1.0]);
    }
}
