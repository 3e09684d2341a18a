use chartwell_data::category::DefaultCategoryDataset;
use chartwell_data::dataset_utils::{find_category_range_bounds, find_stacked_table_range_bounds};
use chartwell_data::gantt::{Task, TaskSeries, TaskSeriesCollection};
use chartwell_data::table::DefaultTableXYDataset;
use chartwell_data::time::{RegularTimePeriod, SimpleTimePeriod, TimeSeries, TimeSeriesCollection};
use chartwell_data::traits::{CategoryDataset, SeriesDataset, XYDataset};
use chartwell_data::{CategoryDatasetKind, XYDatasetKind};
use std::sync::{Arc, Mutex};

#[test]
fn test_time_series_kind_round_trip() {
    let mut series = TimeSeries::new("Visitors");
    let mut month = RegularTimePeriod::month(2024, 1).unwrap();
    for value in [120.0, 135.5, 98.0] {
        series.add(month, Some(value)).unwrap();
        month = month.next().unwrap();
    }
    let kind: XYDatasetKind = TimeSeriesCollection::from_series(vec![series])
        .unwrap()
        .into();

    let json = serde_json::to_value(&kind).unwrap();
    assert_eq!(json["type"], "time_series");
    let back: XYDatasetKind = serde_json::from_value(json).unwrap();
    assert_eq!(back, kind);
    assert!(back.is_temporal());
    assert!(back.as_interval().is_some());
    assert!(back.as_table().is_none());
    assert_eq!(back.item_count(0), 3);
}

#[test]
fn test_gantt_kind_round_trip() {
    let mut series = TaskSeries::new("Plan");
    series.add(Task::new(
        "Write",
        Some(SimpleTimePeriod::try_new(0, 86_400_000).unwrap()),
    ));
    let mut collection = TaskSeriesCollection::new();
    collection.add(series).unwrap();
    let kind: CategoryDatasetKind = collection.into();

    let json = serde_json::to_string(&kind).unwrap();
    let back: CategoryDatasetKind = serde_json::from_str(&json).unwrap();
    assert_eq!(back.column_keys(), vec!["Write"]);
    let range = find_category_range_bounds(&back, true).unwrap();
    assert_eq!(range.upper(), 86_400_000.0);
}

#[test]
fn test_clone_is_independent() {
    let notified = Arc::new(Mutex::new(0));
    let mut original = DefaultCategoryDataset::new();
    let sink = notified.clone();
    original
        .listeners_mut()
        .subscribe(move |_| *sink.lock().unwrap() += 1);
    original.add_value(Some(1.0), "S1", "C1");

    let mut copy = original.clone();
    copy.add_value(Some(2.0), "S1", "C1");
    copy.add_value(Some(3.0), "S2", "C1");

    assert_eq!(*notified.lock().unwrap(), 1);
    assert_eq!(original.row_count(), 1);
    assert_eq!(original.value(0, 0), Some(1.0));
    assert_eq!(copy.value(0, 0), Some(2.0));
}

#[test]
fn test_stacked_table_bounds() {
    let mut table = DefaultTableXYDataset::new();
    table.add_empty_series("A").unwrap();
    table.add_empty_series("B").unwrap();
    for (x, a, b) in [(1.0, 2.0, 3.0), (2.0, 4.0, -1.0), (3.0, 1.0, 1.0)] {
        table.add(0, x, Some(a)).unwrap();
        table.add(1, x, Some(b)).unwrap();
    }
    assert_eq!(table.series_count(), 2);
    let range = find_stacked_table_range_bounds(&table, 0.0).unwrap();
    assert_eq!((range.lower(), range.upper()), (-1.0, 5.0));
}
