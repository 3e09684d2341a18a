use chartwell_common::error::ChartwellCommonError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartwellDataError {
    #[error("Unknown key: `{0}`")]
    UnknownKey(String),

    #[error("Duplicate series key: `{0}`")]
    DuplicateKey(String),

    #[error("Index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Series `{series}` already contains x = {x} and does not allow duplicates")]
    DuplicateX { series: String, x: f64 },

    #[error("Series `{series}` has no item with x = {x}")]
    UnknownX { series: String, x: f64 },

    #[error("Time period {0} is already present in the series")]
    DuplicatePeriod(String),

    #[error("Time period {period} does not match the {expected} periods in the series")]
    PeriodMismatch { period: String, expected: String },

    #[error("Invalid time period: {0}")]
    InvalidPeriod(String),

    #[error("Invalid interval: {low} <= {value} <= {high} does not hold")]
    InvalidInterval { low: f64, value: f64, high: f64 },

    #[error("Arrays for series `{series}` have different lengths")]
    LengthMismatch { series: String },

    #[error("Cannot compute statistics of an empty sample")]
    EmptySample,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Common error: {0}")]
    CommonError(#[from] ChartwellCommonError),
}
