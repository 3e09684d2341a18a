//! Time periods and time series. All periods are computed in UTC and
//! timestamps are milliseconds since the Unix epoch.

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime, TimeDelta, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::ChartwellDataError;
use crate::listeners::{
    ChangeListeners, DatasetChangeEvent, DatasetChangeKind, SeriesChangeEvent,
};
use crate::traits::{IntervalXYDataset, SeriesDataset, XYDataset};
use crate::xy::{fold_max, fold_min};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
}

/// Which instant of a period stands for the whole period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimePeriodAnchor {
    #[default]
    Start,
    Middle,
    End,
}

/// A calendar aligned period such as one month or one hour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PeriodRepr", into = "PeriodRepr")]
pub struct RegularTimePeriod {
    unit: TimeUnit,
    start: i64,
    end: i64,
}

#[derive(Serialize, Deserialize)]
struct PeriodRepr {
    unit: TimeUnit,
    start: i64,
}

impl TryFrom<PeriodRepr> for RegularTimePeriod {
    type Error = ChartwellDataError;

    fn try_from(value: PeriodRepr) -> Result<Self, Self::Error> {
        let period = RegularTimePeriod::containing(value.unit, value.start)?;
        if period.start != value.start {
            return Err(ChartwellDataError::InvalidPeriod(format!(
                "{} is not the start of a {:?} period",
                value.start, value.unit
            )));
        }
        Ok(period)
    }
}

impl From<RegularTimePeriod> for PeriodRepr {
    fn from(value: RegularTimePeriod) -> Self {
        PeriodRepr {
            unit: value.unit,
            start: value.start,
        }
    }
}

fn midnight(year: i32, month: u32, day: u32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)
}

fn truncate(unit: TimeUnit, dt: NaiveDateTime) -> Option<NaiveDateTime> {
    let date = dt.date();
    match unit {
        TimeUnit::Year => midnight(date.year(), 1, 1),
        TimeUnit::Month => midnight(date.year(), date.month(), 1),
        TimeUnit::Day => date.and_hms_opt(0, 0, 0),
        TimeUnit::Hour => date.and_hms_opt(dt.hour(), 0, 0),
        TimeUnit::Minute => date.and_hms_opt(dt.hour(), dt.minute(), 0),
        TimeUnit::Second => date.and_hms_opt(dt.hour(), dt.minute(), dt.second()),
        TimeUnit::Millisecond => date.and_hms_milli_opt(
            dt.hour(),
            dt.minute(),
            dt.second(),
            dt.nanosecond() / 1_000_000,
        ),
    }
}

fn advance(unit: TimeUnit, start: NaiveDateTime) -> Option<NaiveDateTime> {
    match unit {
        TimeUnit::Year => start.checked_add_months(Months::new(12)),
        TimeUnit::Month => start.checked_add_months(Months::new(1)),
        TimeUnit::Day => start.checked_add_signed(TimeDelta::days(1)),
        TimeUnit::Hour => start.checked_add_signed(TimeDelta::hours(1)),
        TimeUnit::Minute => start.checked_add_signed(TimeDelta::minutes(1)),
        TimeUnit::Second => start.checked_add_signed(TimeDelta::seconds(1)),
        TimeUnit::Millisecond => start.checked_add_signed(TimeDelta::milliseconds(1)),
    }
}

impl RegularTimePeriod {
    fn from_start(
        unit: TimeUnit,
        start: Option<NaiveDateTime>,
        description: impl FnOnce() -> String,
    ) -> Result<Self, ChartwellDataError> {
        let start = start.ok_or_else(|| ChartwellDataError::InvalidPeriod(description()))?;
        let next = advance(unit, start)
            .ok_or_else(|| ChartwellDataError::InvalidPeriod(format!("{start} has no successor")))?;
        Ok(Self {
            unit,
            start: start.and_utc().timestamp_millis(),
            end: next.and_utc().timestamp_millis() - 1,
        })
    }

    pub fn year(year: i32) -> Result<Self, ChartwellDataError> {
        Self::from_start(TimeUnit::Year, midnight(year, 1, 1), || {
            format!("year {year}")
        })
    }

    pub fn month(year: i32, month: u32) -> Result<Self, ChartwellDataError> {
        Self::from_start(TimeUnit::Month, midnight(year, month, 1), || {
            format!("month {year}-{month}")
        })
    }

    pub fn day(year: i32, month: u32, day: u32) -> Result<Self, ChartwellDataError> {
        Self::from_start(TimeUnit::Day, midnight(year, month, day), || {
            format!("day {year}-{month}-{day}")
        })
    }

    pub fn hour(year: i32, month: u32, day: u32, hour: u32) -> Result<Self, ChartwellDataError> {
        let start = NaiveDate::from_ymd_opt(year, month, day).and_then(|d| d.and_hms_opt(hour, 0, 0));
        Self::from_start(TimeUnit::Hour, start, || {
            format!("hour {year}-{month}-{day} {hour}")
        })
    }

    pub fn minute(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
    ) -> Result<Self, ChartwellDataError> {
        let start =
            NaiveDate::from_ymd_opt(year, month, day).and_then(|d| d.and_hms_opt(hour, minute, 0));
        Self::from_start(TimeUnit::Minute, start, || {
            format!("minute {year}-{month}-{day} {hour}:{minute}")
        })
    }

    pub fn second(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Self, ChartwellDataError> {
        let start = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hour, minute, second));
        Self::from_start(TimeUnit::Second, start, || {
            format!("second {year}-{month}-{day} {hour}:{minute}:{second}")
        })
    }

    pub fn millisecond(millis: i64) -> Result<Self, ChartwellDataError> {
        Self::containing(TimeUnit::Millisecond, millis)
    }

    /// The period of the given unit containing the instant `millis`
    pub fn containing(unit: TimeUnit, millis: i64) -> Result<Self, ChartwellDataError> {
        let dt = DateTime::from_timestamp_millis(millis)
            .ok_or_else(|| ChartwellDataError::InvalidPeriod(format!("timestamp {millis}")))?
            .naive_utc();
        Self::from_start(unit, truncate(unit, dt), || format!("timestamp {millis}"))
    }

    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// First millisecond of the period
    pub fn start_millis(&self) -> i64 {
        self.start
    }

    /// Last millisecond of the period
    pub fn end_millis(&self) -> i64 {
        self.end
    }

    pub fn middle_millis(&self) -> i64 {
        self.start + (self.end - self.start) / 2
    }

    pub fn millis_at(&self, anchor: TimePeriodAnchor) -> i64 {
        match anchor {
            TimePeriodAnchor::Start => self.start,
            TimePeriodAnchor::Middle => self.middle_millis(),
            TimePeriodAnchor::End => self.end,
        }
    }

    pub fn next(&self) -> Result<Self, ChartwellDataError> {
        Self::containing(self.unit, self.end + 1)
    }

    pub fn previous(&self) -> Result<Self, ChartwellDataError> {
        Self::containing(self.unit, self.start - 1)
    }

    pub fn contains(&self, millis: i64) -> bool {
        self.start <= millis && millis <= self.end
    }
}

impl PartialOrd for RegularTimePeriod {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RegularTimePeriod {
    fn cmp(&self, other: &Self) -> Ordering {
        self.start
            .cmp(&other.start)
            .then_with(|| self.end.cmp(&other.end))
    }
}

impl Display for RegularTimePeriod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let pattern = match self.unit {
            TimeUnit::Year => "%Y",
            TimeUnit::Month => "%Y-%m",
            TimeUnit::Day => "%Y-%m-%d",
            TimeUnit::Hour => "%Y-%m-%d %H:00",
            TimeUnit::Minute => "%Y-%m-%d %H:%M",
            TimeUnit::Second => "%Y-%m-%d %H:%M:%S",
            TimeUnit::Millisecond => "%Y-%m-%d %H:%M:%S%.3f",
        };
        match DateTime::from_timestamp_millis(self.start) {
            Some(dt) => write!(f, "{}", dt.format(pattern)),
            None => write!(f, "{}", self.start),
        }
    }
}

/// An arbitrary span of time with inclusive bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SimpleTimePeriodRepr")]
pub struct SimpleTimePeriod {
    start: i64,
    end: i64,
}

#[derive(Deserialize)]
struct SimpleTimePeriodRepr {
    start: i64,
    end: i64,
}

impl TryFrom<SimpleTimePeriodRepr> for SimpleTimePeriod {
    type Error = ChartwellDataError;

    fn try_from(value: SimpleTimePeriodRepr) -> Result<Self, Self::Error> {
        SimpleTimePeriod::try_new(value.start, value.end)
    }
}

impl SimpleTimePeriod {
    pub fn try_new(start: i64, end: i64) -> Result<Self, ChartwellDataError> {
        if start > end {
            return Err(ChartwellDataError::InvalidPeriod(format!(
                "start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// From midnight of the first date to midnight of the second, UTC
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Result<Self, ChartwellDataError> {
        Self::try_new(date_millis(start)?, date_millis(end)?)
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn end(&self) -> i64 {
        self.end
    }

    pub fn duration(&self) -> i64 {
        self.end - self.start
    }

    pub fn contains(&self, millis: i64) -> bool {
        self.start <= millis && millis <= self.end
    }
}

fn date_millis(date: NaiveDate) -> Result<i64, ChartwellDataError> {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp_millis())
        .ok_or_else(|| ChartwellDataError::InvalidPeriod(date.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesDataItem {
    pub period: RegularTimePeriod,
    pub value: Option<f64>,
}

/// Values keyed by periods of a single unit, kept in time order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeSeries {
    key: String,
    items: Vec<TimeSeriesDataItem>,
    maximum_item_count: Option<usize>,
    #[serde(skip)]
    listeners: ChangeListeners<SeriesChangeEvent>,
}

impl Default for TimeSeries {
    fn default() -> Self {
        Self::new("")
    }
}

impl TimeSeries {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            items: Vec::new(),
            maximum_item_count: None,
            listeners: Default::default(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn listeners_mut(&mut self) -> &mut ChangeListeners<SeriesChangeEvent> {
        &mut self.listeners
    }

    pub fn items(&self) -> &[TimeSeriesDataItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Unit shared by every period in the series, if it has any items
    pub fn unit(&self) -> Option<TimeUnit> {
        self.items.first().map(|item| item.period.unit())
    }

    pub fn period(&self, index: usize) -> Option<RegularTimePeriod> {
        self.items.get(index).map(|item| item.period)
    }

    pub fn value_at(&self, index: usize) -> Option<f64> {
        self.items.get(index).and_then(|item| item.value)
    }

    pub fn value(&self, period: &RegularTimePeriod) -> Option<f64> {
        self.index_of(period).and_then(|idx| self.items[idx].value)
    }

    pub fn index_of(&self, period: &RegularTimePeriod) -> Option<usize> {
        self.items
            .binary_search_by(|item| item.period.cmp(period))
            .ok()
    }

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

    fn check_unit(&self, period: &RegularTimePeriod) -> Result<(), ChartwellDataError> {
        match self.unit() {
            Some(unit) if unit != period.unit() => Err(ChartwellDataError::PeriodMismatch {
                period: period.to_string(),
                expected: format!("{unit:?}"),
            }),
            _ => Ok(()),
        }
    }

    pub fn add(
        &mut self,
        period: RegularTimePeriod,
        value: Option<f64>,
    ) -> Result<(), ChartwellDataError> {
        self.check_unit(&period)?;
        match self.items.binary_search_by(|item| item.period.cmp(&period)) {
            Ok(_) => Err(ChartwellDataError::DuplicatePeriod(period.to_string())),
            Err(idx) => {
                self.items.insert(idx, TimeSeriesDataItem { period, value });
                self.evict();
                self.fire_changed();
                Ok(())
            }
        }
    }

    /// Returns the replaced item when `period` was already present
    pub fn add_or_update(
        &mut self,
        period: RegularTimePeriod,
        value: Option<f64>,
    ) -> Result<Option<TimeSeriesDataItem>, ChartwellDataError> {
        match self.index_of(&period) {
            Some(idx) => {
                let old = self.items[idx];
                self.items[idx].value = value;
                self.fire_changed();
                Ok(Some(old))
            }
            None => {
                self.add(period, value)?;
                Ok(None)
            }
        }
    }

    pub fn update(
        &mut self,
        period: &RegularTimePeriod,
        value: Option<f64>,
    ) -> Result<(), ChartwellDataError> {
        let idx = self
            .index_of(period)
            .ok_or_else(|| ChartwellDataError::UnknownKey(period.to_string()))?;
        self.items[idx].value = value;
        self.fire_changed();
        Ok(())
    }

    /// Removes items `start..=end`
    pub fn delete(&mut self, start: usize, end: usize) -> Result<(), ChartwellDataError> {
        let len = self.items.len();
        if start > end || end >= len {
            return Err(ChartwellDataError::IndexOutOfBounds { index: end, len });
        }
        self.items.drain(start..=end);
        self.fire_changed();
        Ok(())
    }

    pub fn clear(&mut self) {
        if !self.items.is_empty() {
            self.items.clear();
            self.fire_changed();
        }
    }

    /// Copy holding the items whose periods fall within `[start, end]`
    pub fn create_copy(
        &self,
        start: &RegularTimePeriod,
        end: &RegularTimePeriod,
    ) -> Result<TimeSeries, ChartwellDataError> {
        if start > end {
            return Err(ChartwellDataError::InvalidArgument(format!(
                "copy start {start} is after end {end}"
            )));
        }
        let mut copy = TimeSeries::new(self.key.clone());
        copy.maximum_item_count = self.maximum_item_count;
        copy.items = self
            .items
            .iter()
            .filter(|item| item.period >= *start && item.period <= *end)
            .copied()
            .collect();
        Ok(copy)
    }

    pub fn min_y(&self) -> Option<f64> {
        fold_min(self.items.iter().filter_map(|item| item.value))
    }

    pub fn max_y(&self) -> Option<f64> {
        fold_max(self.items.iter().filter_map(|item| item.value))
    }

    fn fire_changed(&mut self) {
        let event = SeriesChangeEvent {
            series_key: self.key.clone(),
        };
        self.listeners.notify(&event);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TimeSeriesCollection {
    series: Vec<TimeSeries>,
    x_position: TimePeriodAnchor,
    #[serde(skip)]
    listeners: ChangeListeners<DatasetChangeEvent>,
}

impl TimeSeriesCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_series(series: Vec<TimeSeries>) -> Result<Self, ChartwellDataError> {
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

    pub fn x_position(&self) -> TimePeriodAnchor {
        self.x_position
    }

    pub fn set_x_position(&mut self, anchor: TimePeriodAnchor) {
        self.x_position = anchor;
        self.fire(DatasetChangeKind::ValueChanged);
    }

    pub fn series(&self, index: usize) -> Option<&TimeSeries> {
        self.series.get(index)
    }

    pub fn add_series(&mut self, series: TimeSeries) -> Result<(), ChartwellDataError> {
        if self.series_index(series.key()).is_some() {
            return Err(ChartwellDataError::DuplicateKey(series.key));
        }
        let key = series.key.clone();
        self.series.push(series);
        self.fire(DatasetChangeKind::SeriesAdded(key));
        Ok(())
    }

    pub fn remove_series(&mut self, index: usize) -> Result<TimeSeries, ChartwellDataError> {
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
        f: impl FnOnce(&mut TimeSeries) -> R,
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

    fn period(&self, series: usize, item: usize) -> Option<RegularTimePeriod> {
        self.series.get(series).and_then(|s| s.period(item))
    }

    fn fire(&mut self, kind: DatasetChangeKind) {
        self.listeners
            .notify(&DatasetChangeEvent::new("TimeSeriesCollection", kind));
    }
}

impl SeriesDataset for TimeSeriesCollection {
    fn series_count(&self) -> usize {
        self.series.len()
    }

    fn series_key(&self, series: usize) -> Option<&str> {
        self.series.get(series).map(|s| s.key.as_str())
    }
}

impl XYDataset for TimeSeriesCollection {
    fn item_count(&self, series: usize) -> usize {
        self.series.get(series).map_or(0, |s| s.len())
    }

    fn x(&self, series: usize, item: usize) -> f64 {
        self.period(series, item)
            .map_or(f64::NAN, |p| p.millis_at(self.x_position) as f64)
    }

    fn y(&self, series: usize, item: usize) -> f64 {
        self.series
            .get(series)
            .and_then(|s| s.value_at(item))
            .unwrap_or(f64::NAN)
    }

    fn is_temporal(&self) -> bool {
        true
    }
}

impl IntervalXYDataset for TimeSeriesCollection {
    fn start_x(&self, series: usize, item: usize) -> f64 {
        self.period(series, item)
            .map_or(f64::NAN, |p| p.start_millis() as f64)
    }

    fn end_x(&self, series: usize, item: usize) -> f64 {
        self.period(series, item)
            .map_or(f64::NAN, |p| p.end_millis() as f64)
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
    use rstest::rstest;

    #[test]
    fn test_month_bounds() {
        let feb = RegularTimePeriod::month(2024, 2).unwrap();
        let start = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let march = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(feb.start_millis(), date_millis(start).unwrap());
        assert_eq!(feb.end_millis(), date_millis(march).unwrap() - 1);
        assert_eq!(feb.next().unwrap(), RegularTimePeriod::month(2024, 3).unwrap());
        assert_eq!(
            RegularTimePeriod::month(2024, 1).unwrap().previous().unwrap(),
            RegularTimePeriod::month(2023, 12).unwrap()
        );
        assert_eq!(feb.to_string(), "2024-02");
    }

    #[rstest]
    #[case(RegularTimePeriod::month(2024, 13))]
    #[case(RegularTimePeriod::day(2023, 2, 29))]
    #[case(RegularTimePeriod::hour(2024, 1, 1, 24))]
    fn test_invalid_periods(#[case] period: Result<RegularTimePeriod, ChartwellDataError>) {
        assert!(matches!(period, Err(ChartwellDataError::InvalidPeriod(_))));
    }

    #[test]
    fn test_anchor() {
        let hour = RegularTimePeriod::hour(2024, 1, 1, 5).unwrap();
        assert_eq!(
            hour.millis_at(TimePeriodAnchor::Middle) - hour.start_millis(),
            1_799_999
        );
        assert_eq!(
            RegularTimePeriod::containing(TimeUnit::Day, hour.middle_millis()).unwrap(),
            RegularTimePeriod::day(2024, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_simple_period_validation() {
        assert!(SimpleTimePeriod::try_new(10, 5).is_err());
        assert!(serde_json::from_str::<SimpleTimePeriod>(r#"{"start":10,"end":5}"#).is_err());
        assert_eq!(SimpleTimePeriod::try_new(5, 10).unwrap().duration(), 5);
    }

    #[test]
    fn test_series_ordering_and_units() {
        let mut series = TimeSeries::new("Sales");
        series
            .add(RegularTimePeriod::month(2024, 3).unwrap(), Some(3.0))
            .unwrap();
        series
            .add(RegularTimePeriod::month(2024, 1).unwrap(), Some(1.0))
            .unwrap();
        assert_eq!(series.value_at(0), Some(1.0));
        assert!(matches!(
            series.add(RegularTimePeriod::month(2024, 1).unwrap(), None),
            Err(ChartwellDataError::DuplicatePeriod(_))
        ));
        assert!(matches!(
            series.add(RegularTimePeriod::day(2024, 2, 1).unwrap(), None),
            Err(ChartwellDataError::PeriodMismatch { .. })
        ));
        let old = series
            .add_or_update(RegularTimePeriod::month(2024, 3).unwrap(), Some(4.0))
            .unwrap();
        assert_eq!(old.and_then(|item| item.value), Some(3.0));
        assert_eq!(series.max_y(), Some(4.0));
    }

    #[test]
    fn test_create_copy() {
        let mut series = TimeSeries::new("S");
        let mut period = RegularTimePeriod::year(2000).unwrap();
        for i in 0..5 {
            series.add(period, Some(i as f64)).unwrap();
            period = period.next().unwrap();
        }
        let copy = series
            .create_copy(
                &RegularTimePeriod::year(2001).unwrap(),
                &RegularTimePeriod::year(2003).unwrap(),
            )
            .unwrap();
        assert_eq!(copy.len(), 3);
        assert_eq!(copy.value_at(0), Some(1.0));
        series.delete(0, 1).unwrap();
        assert_eq!(series.len(), 3);
    }

    #[test]
    fn test_collection_x_values() {
        let mut series = TimeSeries::new("S");
        let day = RegularTimePeriod::day(2024, 6, 1).unwrap();
        series.add(day, Some(2.0)).unwrap();
        let mut collection = TimeSeriesCollection::from_series(vec![series]).unwrap();
        assert_eq!(collection.x(0, 0), day.start_millis() as f64);
        collection.set_x_position(TimePeriodAnchor::End);
        assert_eq!(collection.x(0, 0), day.end_millis() as f64);
        assert!(collection.is_temporal());
    }

    #[test]
    fn test_period_serde() {
        let period = RegularTimePeriod::minute(2024, 1, 2, 3, 4).unwrap();
        let json = serde_json::to_string(&period).unwrap();
        assert_eq!(serde_json::from_str::<RegularTimePeriod>(&json).unwrap(), period);
        assert!(serde_json::from_str::<RegularTimePeriod>(r#"{"unit":"day","start":5}"#).is_err());
    }
}
