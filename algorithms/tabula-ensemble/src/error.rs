//! Error definitions for boosted ensembles
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AdaboostError>;

#[derive(Error, Debug)]
pub enum AdaboostError {
    /// Empty, malformed or shape-mismatched data
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// A target outside of {-1, +1}
    #[error("label {value} of sample {index} is neither -1 nor +1")]
    InvalidLabel { index: usize, value: f64 },
    /// Prediction or export requested before a successful fit
    #[error("the model has not been fitted")]
    ModelNotFitted,
    /// A persisted model record which does not describe a usable ensemble
    #[error("invalid model state: {0}")]
    InvalidState(String),
    #[error(transparent)]
    BaseCrate(#[from] tabula::Error),
    #[cfg(feature = "serde")]
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}
