//! Read-only views over datasets, used by renderers and `dataset_utils`.
//!
//! Missing values are reported as `NaN` for XY data and `None` for keyed data.

use crate::statistics::BoxAndWhiskerItem;

pub trait SeriesDataset {
    fn series_count(&self) -> usize;
    fn series_key(&self, series: usize) -> Option<&str>;

    fn series_index(&self, key: &str) -> Option<usize> {
        (0..self.series_count()).find(|s| self.series_key(*s) == Some(key))
    }
}

pub trait XYDataset: SeriesDataset {
    fn item_count(&self, series: usize) -> usize;
    fn x(&self, series: usize, item: usize) -> f64;
    fn y(&self, series: usize, item: usize) -> f64;

    /// Whether x values are stored as epoch milliseconds
    fn is_temporal(&self) -> bool {
        false
    }
}

pub trait IntervalXYDataset: XYDataset {
    fn start_x(&self, series: usize, item: usize) -> f64;
    fn end_x(&self, series: usize, item: usize) -> f64;
    fn start_y(&self, series: usize, item: usize) -> f64;
    fn end_y(&self, series: usize, item: usize) -> f64;
}

pub trait XYZDataset: XYDataset {
    fn z(&self, series: usize, item: usize) -> f64;
}

/// XY data where every series shares the same x values
pub trait TableXYDataset: XYDataset {
    fn table_item_count(&self) -> usize;
}

pub trait CategoryDataset {
    fn row_count(&self) -> usize;
    fn column_count(&self) -> usize;
    fn row_key(&self, row: usize) -> Option<&str>;
    fn column_key(&self, column: usize) -> Option<&str>;
    fn value(&self, row: usize, column: usize) -> Option<f64>;

    fn row_index(&self, key: &str) -> Option<usize> {
        (0..self.row_count()).find(|r| self.row_key(*r) == Some(key))
    }

    fn column_index(&self, key: &str) -> Option<usize> {
        (0..self.column_count()).find(|c| self.column_key(*c) == Some(key))
    }

    fn row_keys(&self) -> Vec<String> {
        (0..self.row_count())
            .filter_map(|r| self.row_key(r).map(String::from))
            .collect()
    }

    fn column_keys(&self) -> Vec<String> {
        (0..self.column_count())
            .filter_map(|c| self.column_key(c).map(String::from))
            .collect()
    }
}

pub trait StatisticalCategoryDataset: CategoryDataset {
    fn mean_value(&self, row: usize, column: usize) -> Option<f64>;
    fn std_dev_value(&self, row: usize, column: usize) -> Option<f64>;
}

pub trait BoxAndWhiskerCategoryDataset: CategoryDataset {
    fn item(&self, row: usize, column: usize) -> Option<&BoxAndWhiskerItem>;
}

pub trait GanttCategoryDataset: CategoryDataset {
    fn start_value(&self, row: usize, column: usize) -> Option<f64>;
    fn end_value(&self, row: usize, column: usize) -> Option<f64>;
    fn percent_complete(&self, row: usize, column: usize) -> Option<f64>;
    fn sub_interval_count(&self, row: usize, column: usize) -> usize;
    fn sub_interval_start(&self, row: usize, column: usize, sub: usize) -> Option<f64>;
    fn sub_interval_end(&self, row: usize, column: usize, sub: usize) -> Option<f64>;
    fn sub_interval_percent_complete(&self, row: usize, column: usize, sub: usize)
        -> Option<f64>;
}

pub trait PieDataset {
    fn item_count(&self) -> usize;
    fn key(&self, index: usize) -> Option<&str>;
    fn value(&self, index: usize) -> Option<f64>;

    fn index_of(&self, key: &str) -> Option<usize> {
        (0..self.item_count()).find(|i| self.key(*i) == Some(key))
    }
}

pub trait ValueDataset {
    fn value(&self) -> Option<f64>;
}
