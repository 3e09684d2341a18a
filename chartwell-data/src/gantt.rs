use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::ChartwellDataError;
use crate::listeners::{ChangeListeners, DatasetChangeEvent, DatasetChangeKind};
use crate::time::SimpleTimePeriod;
use crate::traits::{CategoryDataset, GanttCategoryDataset};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub description: String,
    #[serde(default)]
    pub duration: Option<SimpleTimePeriod>,
    /// Fraction complete in `[0, 1]`
    #[serde(default)]
    pub percent_complete: Option<f64>,
    #[serde(default)]
    pub subtasks: Vec<Task>,
}

impl Task {
    pub fn new(description: impl Into<String>, duration: Option<SimpleTimePeriod>) -> Self {
        Self {
            description: description.into(),
            duration,
            percent_complete: None,
            subtasks: Vec::new(),
        }
    }

    pub fn with_percent_complete(mut self, percent: f64) -> Self {
        self.percent_complete = Some(percent);
        self
    }

    pub fn with_subtask(mut self, task: Task) -> Self {
        self.subtasks.push(task);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TaskSeries {
    pub key: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl TaskSeries {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            tasks: Vec::new(),
        }
    }

    pub fn add(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub fn get(&self, description: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.description == description)
    }

    pub fn remove(&mut self, description: &str) -> Option<Task> {
        let idx = self.tasks.iter().position(|t| t.description == description)?;
        Some(self.tasks.remove(idx))
    }
}

/// Task series as category data: one row per series, one column per task
/// description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TaskSeriesCollection {
    series: Vec<TaskSeries>,
    #[serde(skip)]
    listeners: ChangeListeners<DatasetChangeEvent>,
}

impl TaskSeriesCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listeners_mut(&mut self) -> &mut ChangeListeners<DatasetChangeEvent> {
        &mut self.listeners
    }

    pub fn series(&self, index: usize) -> Option<&TaskSeries> {
        self.series.get(index)
    }

    pub fn add(&mut self, series: TaskSeries) -> Result<(), ChartwellDataError> {
        if self.row_index(&series.key).is_some() {
            return Err(ChartwellDataError::DuplicateKey(series.key));
        }
        let key = series.key.clone();
        self.series.push(series);
        self.fire(DatasetChangeKind::SeriesAdded(key));
        Ok(())
    }

    pub fn remove(&mut self, key: &str) -> Result<TaskSeries, ChartwellDataError> {
        let idx = self
            .row_index(key)
            .ok_or_else(|| ChartwellDataError::UnknownKey(key.to_string()))?;
        let removed = self.series.remove(idx);
        self.fire(DatasetChangeKind::SeriesRemoved(removed.key.clone()));
        Ok(removed)
    }

    pub fn update_series<R>(
        &mut self,
        index: usize,
        f: impl FnOnce(&mut TaskSeries) -> R,
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

    fn descriptions(&self) -> IndexSet<&str> {
        self.series
            .iter()
            .flat_map(|s| s.tasks.iter().map(|t| t.description.as_str()))
            .collect()
    }

    pub fn task(&self, row: usize, column: usize) -> Option<&Task> {
        let descriptions = self.descriptions();
        let description = descriptions.get_index(column)?;
        self.series.get(row)?.get(description)
    }

    fn subtask(&self, row: usize, column: usize, sub: usize) -> Option<&Task> {
        self.task(row, column)?.subtasks.get(sub)
    }

    fn fire(&mut self, kind: DatasetChangeKind) {
        self.listeners
            .notify(&DatasetChangeEvent::new("TaskSeriesCollection", kind));
    }
}

impl CategoryDataset for TaskSeriesCollection {
    fn row_count(&self) -> usize {
        self.series.len()
    }

    fn column_count(&self) -> usize {
        self.descriptions().len()
    }

    fn row_key(&self, row: usize) -> Option<&str> {
        self.series.get(row).map(|s| s.key.as_str())
    }

    fn column_key(&self, column: usize) -> Option<&str> {
        self.descriptions().get_index(column).copied()
    }

    /// Task start, in epoch milliseconds
    fn value(&self, row: usize, column: usize) -> Option<f64> {
        self.start_value(row, column)
    }
}

impl GanttCategoryDataset for TaskSeriesCollection {
    fn start_value(&self, row: usize, column: usize) -> Option<f64> {
        let duration = self.task(row, column)?.duration?;
        Some(duration.start() as f64)
    }

    fn end_value(&self, row: usize, column: usize) -> Option<f64> {
        let duration = self.task(row, column)?.duration?;
        Some(duration.end() as f64)
    }

    fn percent_complete(&self, row: usize, column: usize) -> Option<f64> {
        self.task(row, column)?.percent_complete
    }

    fn sub_interval_count(&self, row: usize, column: usize) -> usize {
        self.task(row, column).map_or(0, |t| t.subtasks.len())
    }

    fn sub_interval_start(&self, row: usize, column: usize, sub: usize) -> Option<f64> {
        let duration = self.subtask(row, column, sub)?.duration?;
        Some(duration.start() as f64)
    }

    fn sub_interval_end(&self, row: usize, column: usize, sub: usize) -> Option<f64> {
        let duration = self.subtask(row, column, sub)?.duration?;
        Some(duration.end() as f64)
    }

    fn sub_interval_percent_complete(&self, row: usize, column: usize, sub: usize) -> Option<f64> {
        self.subtask(row, column, sub)?.percent_complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period(start: i64, end: i64) -> Option<SimpleTimePeriod> {
        Some(SimpleTimePeriod::try_new(start, end).unwrap())
    }

    fn sample() -> TaskSeriesCollection {
        let mut scheduled = TaskSeries::new("Scheduled");
        scheduled.add(Task::new("Design", period(0, 10)).with_percent_complete(1.0));
        scheduled.add(
            Task::new("Build", period(10, 30))
                .with_subtask(Task::new("Frame", period(10, 20)))
                .with_subtask(Task::new("Roof", period(20, 30))),
        );
        let mut actual = TaskSeries::new("Actual");
        actual.add(Task::new("Build", period(12, 35)));
        actual.add(Task::new("Test", period(35, 40)));

        let mut collection = TaskSeriesCollection::new();
        collection.add(scheduled).unwrap();
        collection.add(actual).unwrap();
        collection
    }

    #[test]
    fn test_columns_are_union_of_descriptions() {
        let collection = sample();
        assert_eq!(collection.column_keys(), vec!["Design", "Build", "Test"]);
        assert_eq!(collection.start_value(1, 0), None);
        assert_eq!(collection.start_value(1, 1), Some(12.0));
        assert_eq!(collection.end_value(0, 1), Some(30.0));
        assert_eq!(collection.percent_complete(0, 0), Some(1.0));
    }

    #[test]
    fn test_subtasks() {
        let collection = sample();
        assert_eq!(collection.sub_interval_count(0, 1), 2);
        assert_eq!(collection.sub_interval_start(0, 1, 1), Some(20.0));
        assert_eq!(collection.sub_interval_end(0, 1, 2), None);
    }

    #[test]
    fn test_duplicate_series() {
        let mut collection = sample();
        assert!(collection.add(TaskSeries::new("Actual")).is_err());
        collection.remove("Actual").unwrap();
        assert_eq!(collection.column_count(), 2);
    }
}
