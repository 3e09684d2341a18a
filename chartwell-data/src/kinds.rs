//! Serializable containers for every dataset a plot can hold.

use serde::{Deserialize, Serialize};

use crate::box_whisker::DefaultBoxAndWhiskerCategoryDataset;
use crate::category::DefaultCategoryDataset;
use crate::gantt::TaskSeriesCollection;
use crate::interval::XYIntervalSeriesCollection;
use crate::statistical::DefaultStatisticalCategoryDataset;
use crate::table::DefaultTableXYDataset;
use crate::time::TimeSeriesCollection;
use crate::traits::{
    BoxAndWhiskerCategoryDataset, CategoryDataset, GanttCategoryDataset, IntervalXYDataset,
    SeriesDataset, StatisticalCategoryDataset, TableXYDataset, XYDataset, XYZDataset,
};
use crate::xy::XYSeriesCollection;
use crate::xyz::DefaultXYZDataset;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum XYDatasetKind {
    Series(XYSeriesCollection),
    Table(DefaultTableXYDataset),
    Xyz(DefaultXYZDataset),
    Interval(XYIntervalSeriesCollection),
    TimeSeries(TimeSeriesCollection),
}

impl XYDatasetKind {
    pub fn as_xy(&self) -> &dyn XYDataset {
        match self {
            XYDatasetKind::Series(d) => d,
            XYDatasetKind::Table(d) => d,
            XYDatasetKind::Xyz(d) => d,
            XYDatasetKind::Interval(d) => d,
            XYDatasetKind::TimeSeries(d) => d,
        }
    }

    pub fn as_interval(&self) -> Option<&dyn IntervalXYDataset> {
        match self {
            XYDatasetKind::Series(d) => Some(d),
            XYDatasetKind::Table(d) => Some(d),
            XYDatasetKind::Interval(d) => Some(d),
            XYDatasetKind::TimeSeries(d) => Some(d),
            XYDatasetKind::Xyz(_) => None,
        }
    }

    pub fn as_xyz(&self) -> Option<&dyn XYZDataset> {
        match self {
            XYDatasetKind::Xyz(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&dyn TableXYDataset> {
        match self {
            XYDatasetKind::Table(d) => Some(d),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            XYDatasetKind::Series(_) => "series",
            XYDatasetKind::Table(_) => "table",
            XYDatasetKind::Xyz(_) => "xyz",
            XYDatasetKind::Interval(_) => "interval",
            XYDatasetKind::TimeSeries(_) => "time_series",
        }
    }
}

impl SeriesDataset for XYDatasetKind {
    fn series_count(&self) -> usize {
        self.as_xy().series_count()
    }

    fn series_key(&self, series: usize) -> Option<&str> {
        self.as_xy().series_key(series)
    }
}

impl XYDataset for XYDatasetKind {
    fn item_count(&self, series: usize) -> usize {
        self.as_xy().item_count(series)
    }

    fn x(&self, series: usize, item: usize) -> f64 {
        self.as_xy().x(series, item)
    }

    fn y(&self, series: usize, item: usize) -> f64 {
        self.as_xy().y(series, item)
    }

    fn is_temporal(&self) -> bool {
        self.as_xy().is_temporal()
    }
}

impl From<XYSeriesCollection> for XYDatasetKind {
    fn from(value: XYSeriesCollection) -> Self {
        XYDatasetKind::Series(value)
    }
}

impl From<DefaultTableXYDataset> for XYDatasetKind {
    fn from(value: DefaultTableXYDataset) -> Self {
        XYDatasetKind::Table(value)
    }
}

impl From<DefaultXYZDataset> for XYDatasetKind {
    fn from(value: DefaultXYZDataset) -> Self {
        XYDatasetKind::Xyz(value)
    }
}

impl From<XYIntervalSeriesCollection> for XYDatasetKind {
    fn from(value: XYIntervalSeriesCollection) -> Self {
        XYDatasetKind::Interval(value)
    }
}

impl From<TimeSeriesCollection> for XYDatasetKind {
    fn from(value: TimeSeriesCollection) -> Self {
        XYDatasetKind::TimeSeries(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CategoryDatasetKind {
    Default(DefaultCategoryDataset),
    Statistical(DefaultStatisticalCategoryDataset),
    BoxAndWhisker(DefaultBoxAndWhiskerCategoryDataset),
    Gantt(TaskSeriesCollection),
}

impl CategoryDatasetKind {
    pub fn as_category(&self) -> &dyn CategoryDataset {
        match self {
            CategoryDatasetKind::Default(d) => d,
            CategoryDatasetKind::Statistical(d) => d,
            CategoryDatasetKind::BoxAndWhisker(d) => d,
            CategoryDatasetKind::Gantt(d) => d,
        }
    }

    pub fn as_statistical(&self) -> Option<&dyn StatisticalCategoryDataset> {
        match self {
            CategoryDatasetKind::Statistical(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_box_and_whisker(&self) -> Option<&dyn BoxAndWhiskerCategoryDataset> {
        match self {
            CategoryDatasetKind::BoxAndWhisker(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_gantt(&self) -> Option<&dyn GanttCategoryDataset> {
        match self {
            CategoryDatasetKind::Gantt(d) => Some(d),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            CategoryDatasetKind::Default(_) => "default",
            CategoryDatasetKind::Statistical(_) => "statistical",
            CategoryDatasetKind::BoxAndWhisker(_) => "box_and_whisker",
            CategoryDatasetKind::Gantt(_) => "gantt",
        }
    }
}

impl CategoryDataset for CategoryDatasetKind {
    fn row_count(&self) -> usize {
        self.as_category().row_count()
    }

    fn column_count(&self) -> usize {
        self.as_category().column_count()
    }

    fn row_key(&self, row: usize) -> Option<&str> {
        self.as_category().row_key(row)
    }

    fn column_key(&self, column: usize) -> Option<&str> {
        self.as_category().column_key(column)
    }

    fn value(&self, row: usize, column: usize) -> Option<f64> {
        self.as_category().value(row, column)
    }
}

impl From<DefaultCategoryDataset> for CategoryDatasetKind {
    fn from(value: DefaultCategoryDataset) -> Self {
        CategoryDatasetKind::Default(value)
    }
}

impl From<DefaultStatisticalCategoryDataset> for CategoryDatasetKind {
    fn from(value: DefaultStatisticalCategoryDataset) -> Self {
        CategoryDatasetKind::Statistical(value)
    }
}

impl From<DefaultBoxAndWhiskerCategoryDataset> for CategoryDatasetKind {
    fn from(value: DefaultBoxAndWhiskerCategoryDataset) -> Self {
        CategoryDatasetKind::BoxAndWhisker(value)
    }
}

impl From<TaskSeriesCollection> for CategoryDatasetKind {
    fn from(value: TaskSeriesCollection) -> Self {
        CategoryDatasetKind::Gantt(value)
    }
}
