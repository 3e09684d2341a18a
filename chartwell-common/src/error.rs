use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartwellCommonError {
    #[error("Invalid range: lower bound {lower} is greater than upper bound {upper}")]
    InvalidRange { lower: f64, upper: f64 },

    #[error("Range bounds must not be NaN")]
    NaNRangeBound,

    #[error("Invalid color string `{0}`: {1}")]
    InvalidColor(String, String),

    #[error("Invalid size {0}: sizes must be non-negative")]
    NegativeSize(f32),
}
