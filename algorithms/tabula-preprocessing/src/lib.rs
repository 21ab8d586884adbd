//! # Preprocessing
//! ## The Big Picture
//!
//! `tabula-preprocessing` is a crate in the `tabula` workspace, a toolkit for classical machine
//! learning on dense tabular data.
//!
//! ## Current state
//! `tabula-preprocessing` provides the encoders which turn raw tabular data into the dense
//! numeric records and `-1`/`+1` targets the estimators of the workspace work with:
//! * [One-hot encoding](OneHotEncoder) of categorical columns
//! * [Min-max scaling](MinMaxScaler) of numeric columns
//! * [Binarization](Binarizer) of numeric columns
//! * [Sign encoding](SignLabelEncoder) of binary targets
//!
//! Encoders with learned state follow the `Fit`/`Transformer` split of the core crate: fitting
//! returns a fitted encoder which transforms new data with the parameters learned from the
//! training data.

mod binarizer;
pub mod error;
mod min_max;
mod one_hot;
mod sign_labels;

pub use binarizer::Binarizer;
pub use error::{PreprocessingError, Result};
pub use min_max::{FittedMinMaxScaler, MinMaxScaler, MinMaxScalerParams};
pub use one_hot::{FittedOneHotEncoder, OneHotEncoder};
pub use sign_labels::{FittedSignLabelEncoder, SignLabelEncoder};
