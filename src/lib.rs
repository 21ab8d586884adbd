//! `tabula` provides the shared building blocks for classical machine learning on dense
//! tabular data.
//!
//! Kin in spirit to Python's `scikit-learn`, the workspace is split into a small core crate
//! and algorithm crates built on top of it:
//!
//! * `tabula` (this crate): datasets, the `Fit`/`Predict`/`Transformer` traits, hyperparameter
//!   checking and common metrics
//! * `tabula-ensemble`: AdaBoost over axis-aligned decision stumps
//! * `tabula-preprocessing`: one-hot encoding, min-max scaling, binarization and label encoding
//! * `tabula-datasets`: synthetic datasets for tests and benchmarks
//!
//! ## Example
//!
//! ```
//! use tabula::prelude::*;
//! use ndarray::array;
//!
//! let dataset = Dataset::new(array![[0., 1.], [1., 0.]], array![-1., 1.]);
//! assert_eq!(dataset.nsamples(), 2);
//! assert_eq!(dataset.nfeatures(), 2);
//! ```

pub mod dataset;
pub mod error;
mod metrics_classification;
mod param_guard;
pub mod prelude;
pub mod traits;

#[cfg(feature = "benchmarks")]
pub mod benchmarks;

pub use dataset::{Dataset, DatasetBase, DatasetView, Float, Label};
pub use error::Error;
pub use param_guard::ParamGuard;

/// Common metrics functions for classification
pub mod metrics {
    pub use crate::metrics_classification::{BinaryConfusionMatrix, ToBinaryConfusionMatrix};
}
