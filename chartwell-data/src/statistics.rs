//! Descriptive statistics over samples. `NaN` values are ignored throughout.

use serde::{Deserialize, Serialize};

use crate::error::ChartwellDataError;

fn finite_sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    sorted.sort_by(f64::total_cmp);
    sorted
}

pub fn mean(values: &[f64]) -> Option<f64> {
    let (sum, count) = values
        .iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

pub fn median(values: &[f64]) -> Option<f64> {
    let sorted = finite_sorted(values);
    if sorted.is_empty() {
        None
    } else {
        Some(sorted_median(&sorted, 0, sorted.len() - 1))
    }
}

/// Sample standard deviation (n - 1 denominator)
pub fn stddev(values: &[f64]) -> Option<f64> {
    let avg = mean(values)?;
    let finite: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if finite.len() < 2 {
        return Some(0.0);
    }
    let sum_sq: f64 = finite.iter().map(|v| (v - avg).powi(2)).sum();
    Some((sum_sq / (finite.len() - 1) as f64).sqrt())
}

/// Median of `sorted[start..=end]`
fn sorted_median(sorted: &[f64], start: usize, end: usize) -> f64 {
    let count = end - start + 1;
    let mid = start + count / 2;
    if count % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}

/// First and third quartiles as medians of the lower and upper halves. For an
/// odd number of values both halves include the median.
pub fn quartiles(values: &[f64]) -> Option<(f64, f64)> {
    let sorted = finite_sorted(values);
    let count = sorted.len();
    if count == 0 {
        return None;
    }
    let (q1, q3) = if count % 2 == 1 {
        if count > 1 {
            (
                sorted_median(&sorted, 0, count / 2),
                sorted_median(&sorted, count / 2, count - 1),
            )
        } else {
            (sorted[0], sorted[0])
        }
    } else {
        (
            sorted_median(&sorted, 0, count / 2 - 1),
            sorted_median(&sorted, count / 2, count - 1),
        )
    };
    Some((q1, q3))
}

/// Summary drawn by box and whisker renderers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxAndWhiskerItem {
    pub mean: f64,
    pub median: f64,
    pub q1: f64,
    pub q3: f64,
    /// Smallest value within 1.5 IQR of the box
    pub min_regular: f64,
    pub max_regular: f64,
    /// Smallest value within 2 IQR of the box
    pub min_outlier: f64,
    pub max_outlier: f64,
    #[serde(default)]
    pub outliers: Vec<f64>,
}

impl BoxAndWhiskerItem {
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Values beyond this are drawn as far-out markers
    pub fn far_out_bounds(&self) -> (f64, f64) {
        (self.q1 - 2.0 * self.iqr(), self.q3 + 2.0 * self.iqr())
    }

    pub fn value_bounds(&self) -> (f64, f64) {
        let min = self.outliers.iter().copied().fold(self.min_outlier, f64::min);
        let max = self.outliers.iter().copied().fold(self.max_outlier, f64::max);
        (min.min(self.min_regular), max.max(self.max_regular))
    }
}

pub struct BoxAndWhiskerCalculator;

impl BoxAndWhiskerCalculator {
    pub fn calculate(values: &[f64]) -> Result<BoxAndWhiskerItem, ChartwellDataError> {
        let mean = mean(values).ok_or(ChartwellDataError::EmptySample)?;
        let median = median(values).ok_or(ChartwellDataError::EmptySample)?;
        let (q1, q3) = quartiles(values).ok_or(ChartwellDataError::EmptySample)?;

        let iqr = q3 - q1;
        let upper_outlier = q3 + 1.5 * iqr;
        let lower_outlier = q1 - 1.5 * iqr;
        let upper_far_out = q3 + 2.0 * iqr;
        let lower_far_out = q1 - 2.0 * iqr;

        let mut min_regular = f64::INFINITY;
        let mut max_regular = f64::NEG_INFINITY;
        let mut min_outlier = f64::INFINITY;
        let mut max_outlier = f64::NEG_INFINITY;
        let mut outliers = Vec::new();

        for value in values.iter().copied().filter(|v| !v.is_nan()) {
            if value > upper_outlier {
                outliers.push(value);
                if value > max_outlier && value <= upper_far_out {
                    max_outlier = value;
                }
            } else if value < lower_outlier {
                outliers.push(value);
                if value < min_outlier && value >= lower_far_out {
                    min_outlier = value;
                }
            } else {
                min_regular = min_regular.min(value);
                max_regular = max_regular.max(value);
            }
            min_outlier = min_outlier.min(min_regular);
            max_outlier = max_outlier.max(max_regular);
        }

        Ok(BoxAndWhiskerItem {
            mean,
            median,
            q1,
            q3,
            min_regular,
            max_regular,
            min_outlier,
            max_outlier,
            outliers,
        })
    }
}
