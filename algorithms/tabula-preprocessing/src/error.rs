//! Error definitions for preprocessing
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PreprocessingError>;

#[derive(Error, Debug)]
pub enum PreprocessingError {
    #[error("not enough samples")]
    NotEnoughSamples,
    #[error("minimum value for MinMax scaler cannot be greater than the maximum")]
    FlippedMinMaxRange,
    #[error("expected {expected} features, but the records have {found}")]
    MismatchedFeatures { expected: usize, found: usize },
    #[error("category {value} of column {column} was not seen during fitting")]
    UnknownCategory { column: usize, value: String },
    #[error("binary targets need exactly two distinct labels, found {0}")]
    WrongLabelCount(usize),
    #[error("label {0} was not seen during fitting")]
    UnknownLabel(String),
    #[error(transparent)]
    BaseCrate(#[from] tabula::Error),
}
