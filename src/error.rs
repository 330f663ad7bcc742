use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KDIndexError {
    /// A rectangle was constructed with a minimum bound greater than its maximum bound.
    #[error("Invalid rectangle: {0}")]
    InvalidRectangle(String),

    /// A coordinate was NaN or infinite.
    #[error("Non-finite coordinate: {0}")]
    NonFiniteCoordinate(String),
}

pub type Result<T> = std::result::Result<T, KDIndexError>;
