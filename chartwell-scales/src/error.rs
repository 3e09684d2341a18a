#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChartwellScaleError {
    #[error("Empty domain")]
    EmptyDomain,

    #[error("Log scale domain must be strictly positive, got [{lower}, {upper}]")]
    InvalidLogDomain { lower: f64, upper: f64 },

    #[error("Log scale base must be positive and not 1, got {0}")]
    InvalidLogBase(f64),

    #[error("Invalid number format: `{0}`")]
    InvalidFormat(String),

    #[error("Invalid date pattern: `{0}`")]
    InvalidDatePattern(String),

    #[error("Timestamp out of range: {0}")]
    TimestampOutOfRange(i64),

    #[error("Domain value not found: {0}")]
    DomainValueNotFound(String),
}
