//! Bounds and totals computed across datasets.

use chartwell_common::range::Range;
use tracing::warn;

use crate::kinds::{CategoryDatasetKind, XYDatasetKind};
use crate::pie::DefaultPieDataset;
use crate::traits::{
    CategoryDataset, GanttCategoryDataset, PieDataset, SeriesDataset, TableXYDataset, XYDataset,
};

fn include_all(range: Option<Range>, values: impl Iterator<Item = f64>) -> Option<Range> {
    values.fold(range, Range::expand_to_include)
}

/// Range of x values, using interval bounds when `include_interval` is set and
/// the dataset has them
pub fn find_domain_bounds(dataset: &XYDatasetKind, include_interval: bool) -> Option<Range> {
    match dataset.as_interval() {
        Some(interval) if include_interval => {
            let mut range = None;
            for s in 0..interval.series_count() {
                for i in 0..interval.item_count(s) {
                    range = include_all(
                        range,
                        [interval.start_x(s, i), interval.end_x(s, i)].into_iter(),
                    );
                }
            }
            range
        }
        _ => iterate_domain_bounds(dataset),
    }
}

pub fn iterate_domain_bounds(dataset: &dyn XYDataset) -> Option<Range> {
    let mut range = None;
    for s in 0..dataset.series_count() {
        range = include_all(range, (0..dataset.item_count(s)).map(|i| dataset.x(s, i)));
    }
    range
}

/// Range of y values, using interval bounds when `include_interval` is set and
/// the dataset has them
pub fn find_range_bounds(dataset: &XYDatasetKind, include_interval: bool) -> Option<Range> {
    match dataset.as_interval() {
        Some(interval) if include_interval => {
            let mut range = None;
            for s in 0..interval.series_count() {
                for i in 0..interval.item_count(s) {
                    range = include_all(
                        range,
                        [interval.start_y(s, i), interval.end_y(s, i)].into_iter(),
                    );
                }
            }
            range
        }
        _ => iterate_range_bounds(dataset),
    }
}

pub fn iterate_range_bounds(dataset: &dyn XYDataset) -> Option<Range> {
    let mut range = None;
    for s in 0..dataset.series_count() {
        range = include_all(range, (0..dataset.item_count(s)).map(|i| dataset.y(s, i)));
    }
    range
}

/// Range of y values that only covers items whose x falls in `x_range`
pub fn find_range_bounds_in_domain(dataset: &dyn XYDataset, x_range: &Range) -> Option<Range> {
    let mut range = None;
    for s in 0..dataset.series_count() {
        for i in 0..dataset.item_count(s) {
            if x_range.contains(dataset.x(s, i)) {
                range = Range::expand_to_include(range, dataset.y(s, i));
            }
        }
    }
    range
}

/// Range of category values. With `include_interval`, statistical data spans
/// `mean ± std_dev`, box and whisker data spans the outliers and Gantt data
/// spans task start to end.
pub fn find_category_range_bounds(
    dataset: &CategoryDatasetKind,
    include_interval: bool,
) -> Option<Range> {
    if include_interval {
        match dataset {
            CategoryDatasetKind::Statistical(d) => {
                return d
                    .range_bounds_including_deviation()
                    .and_then(|(lo, hi)| Range::try_new(lo, hi).ok());
            }
            CategoryDatasetKind::BoxAndWhisker(d) => {
                return d
                    .value_bounds()
                    .and_then(|(lo, hi)| Range::try_new(lo, hi).ok());
            }
            CategoryDatasetKind::Gantt(gantt) => {
                let mut range = None;
                for r in 0..gantt.row_count() {
                    for c in 0..gantt.column_count() {
                        let bounds = [gantt.start_value(r, c), gantt.end_value(r, c)];
                        range = include_all(range, bounds.into_iter().flatten());
                    }
                }
                return range;
            }
            CategoryDatasetKind::Default(_) => {}
        }
    }
    iterate_category_range_bounds(dataset)
}

pub fn iterate_category_range_bounds(dataset: &dyn CategoryDataset) -> Option<Range> {
    let mut range = None;
    for r in 0..dataset.row_count() {
        for c in 0..dataset.column_count() {
            if let Some(v) = dataset.value(r, c) {
                range = Range::expand_to_include(range, v);
            }
        }
    }
    range
}

/// Range of the stacked totals of each category, where positive values stack up
/// from `base` and negative values stack down from it
pub fn find_stacked_range_bounds(dataset: &dyn CategoryDataset, base: f64) -> Option<Range> {
    if dataset.row_count() == 0 || dataset.column_count() == 0 {
        return None;
    }
    let mut range = None;
    for c in 0..dataset.column_count() {
        let (mut positive, mut negative) = (base, base);
        for r in 0..dataset.row_count() {
            match dataset.value(r, c) {
                Some(v) if v > 0.0 => positive += v,
                Some(v) if v < 0.0 => negative += v,
                _ => {}
            }
        }
        range = include_all(range, [positive, negative].into_iter());
    }
    range
}

/// Stacked bounds for table data, stacking series at each shared x value
pub fn find_stacked_table_range_bounds(dataset: &dyn TableXYDataset, base: f64) -> Option<Range> {
    let items = dataset.table_item_count();
    if items == 0 {
        return None;
    }
    let mut range = None;
    for i in 0..items {
        let (mut positive, mut negative) = (base, base);
        for s in 0..dataset.series_count() {
            let v = dataset.y(s, i);
            if v > 0.0 {
                positive += v;
            } else if v < 0.0 {
                negative += v;
            }
        }
        range = include_all(range, [positive, negative].into_iter());
    }
    range
}

pub fn find_minimum_domain_value(dataset: &dyn XYDataset) -> Option<f64> {
    iterate_domain_bounds(dataset).map(|r| r.lower())
}

pub fn find_maximum_domain_value(dataset: &dyn XYDataset) -> Option<f64> {
    iterate_domain_bounds(dataset).map(|r| r.upper())
}

pub fn find_minimum_range_value(dataset: &dyn XYDataset) -> Option<f64> {
    iterate_range_bounds(dataset).map(|r| r.lower())
}

pub fn find_maximum_range_value(dataset: &dyn XYDataset) -> Option<f64> {
    iterate_range_bounds(dataset).map(|r| r.upper())
}

/// Sum of the positive values
pub fn calculate_pie_total(dataset: &dyn PieDataset) -> f64 {
    (0..dataset.item_count())
        .filter_map(|i| dataset.value(i))
        .filter(|v| *v > 0.0)
        .sum()
}

/// Copy of `source` where items below `min_percent` of the total are merged into
/// a single `other_key` item, provided at least `min_items` items qualify
pub fn create_consolidated_pie_dataset(
    source: &dyn PieDataset,
    other_key: &str,
    min_percent: f64,
    min_items: usize,
) -> DefaultPieDataset {
    let total = calculate_pie_total(source);
    let mut result = DefaultPieDataset::new();
    if total <= 0.0 {
        warn!("pie dataset has no positive values, nothing to consolidate");
    }

    let is_minor = |i: usize| {
        total > 0.0
            && source
                .value(i)
                .is_some_and(|v| v / total < min_percent)
    };
    let minor: Vec<usize> = (0..source.item_count()).filter(|i| is_minor(*i)).collect();
    let consolidate = minor.len() >= min_items;

    let mut other_total = 0.0;
    for i in 0..source.item_count() {
        let Some(key) = source.key(i) else { continue };
        if consolidate && minor.contains(&i) {
            other_total += source.value(i).unwrap_or(0.0);
        } else {
            result.set_value(key, source.value(i));
        }
    }
    if consolidate {
        result.set_value(other_key, Some(other_total));
    }
    result
}
