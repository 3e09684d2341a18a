pub mod linear;
pub mod log;

use linear::LinearNumericScale;
use log::LogNumericScale;

/// Common operations of scales mapping a continuous domain onto a pixel range
pub trait ContinuousNumericScale {
    fn domain(&self) -> (f64, f64);
    fn range(&self) -> (f64, f64);
    fn clamp(&self) -> bool;
    fn scale(&self, value: f64) -> f64;
    fn invert(&self, value: f64) -> f64;
    fn ticks(&self, count: Option<usize>) -> Vec<f64>;

    fn scale_values(&self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|v| self.scale(*v)).collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum NumericScale {
    Linear(LinearNumericScale),
    Log(LogNumericScale),
}

impl NumericScale {
    pub fn with_range(self, range: (f64, f64)) -> Self {
        match self {
            NumericScale::Linear(scale) => NumericScale::Linear(scale.with_range(range)),
            NumericScale::Log(scale) => NumericScale::Log(scale.with_range(range)),
        }
    }

    pub fn is_log(&self) -> bool {
        matches!(self, NumericScale::Log(_))
    }
}

impl ContinuousNumericScale for NumericScale {
    fn domain(&self) -> (f64, f64) {
        match self {
            NumericScale::Linear(scale) => scale.domain(),
            NumericScale::Log(scale) => scale.domain(),
        }
    }

    fn range(&self) -> (f64, f64) {
        match self {
            NumericScale::Linear(scale) => scale.range(),
            NumericScale::Log(scale) => scale.range(),
        }
    }

    fn clamp(&self) -> bool {
        match self {
            NumericScale::Linear(scale) => scale.clamp(),
            NumericScale::Log(scale) => scale.clamp(),
        }
    }

    fn scale(&self, value: f64) -> f64 {
        match self {
            NumericScale::Linear(scale) => scale.scale(value),
            NumericScale::Log(scale) => scale.scale(value),
        }
    }

    fn invert(&self, value: f64) -> f64 {
        match self {
            NumericScale::Linear(scale) => scale.invert(value),
            NumericScale::Log(scale) => scale.invert(value),
        }
    }

    fn ticks(&self, count: Option<usize>) -> Vec<f64> {
        match self {
            NumericScale::Linear(scale) => scale.ticks(count),
            NumericScale::Log(scale) => scale.ticks(count),
        }
    }
}

impl From<LinearNumericScale> for NumericScale {
    fn from(scale: LinearNumericScale) -> Self {
        NumericScale::Linear(scale)
    }
}

impl From<LogNumericScale> for NumericScale {
    fn from(scale: LogNumericScale) -> Self {
        NumericScale::Log(scale)
    }
}
