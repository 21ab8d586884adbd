//! Provide traits for different classes of algorithms
//!

use crate::dataset::{DatasetBase, Records};
use ndarray::{ArrayBase, Data, Ix2};
use std::convert::From;

/// Transformation algorithms
///
/// A transformer takes a dataset and transforms it into a different one. It has no concept of
/// state and provides therefore no method to predict new data. A typical example are kernel
/// methods.
///
/// It should be implemented for all algorithms, also for those which can be fitted.
///
pub trait Transformer<R, T> {
    fn transform(&self, x: R) -> T;
}

/// Fittable algorithms
///
/// A fittable algorithm takes a dataset and creates a concept of some kind about it. For example
/// in *KMeans* this would be the mean values for each class, or in *SVM* the separating
/// hyperplane. It returns a model, which can be used to predict targets for new data.
pub trait Fit<R: Records, T, E: std::error::Error + From<crate::error::Error>> {
    type Object;

    fn fit(&self, dataset: &DatasetBase<R, T>) -> Result<Self::Object, E>;
}

/// Predict with model into a mutable reference of targets.
///
/// Validation of the input happens before any target is written, so a failed prediction leaves
/// `y` untouched.
pub trait PredictInplace<R: Records, T> {
    type Error: std::error::Error + From<crate::error::Error>;

    /// Predict something in place
    fn predict_inplace<'a>(&'a self, x: &'a R, y: &mut T) -> Result<(), Self::Error>;

    /// Create targets that `predict_inplace` works with.
    fn default_target(&self, x: &R) -> T;
}

/// Predict with model
///
/// This trait assumes the `PredictInplace` implementation and provides additional input/output
/// combinations.
pub trait Predict<R, T> {
    type Error;

    fn predict(&self, x: R) -> Result<T, Self::Error>;
}

impl<'a, D, T, O> Predict<&'a ArrayBase<D, Ix2>, T> for O
where
    D: Data,
    O: PredictInplace<ArrayBase<D, Ix2>, T>,
{
    type Error = O::Error;

    fn predict(&self, records: &'a ArrayBase<D, Ix2>) -> Result<T, Self::Error> {
        let mut targets = self.default_target(records);
        self.predict_inplace(records, &mut targets)?;
        Ok(targets)
    }
}

impl<'a, D, T, S, O> Predict<&'a DatasetBase<ArrayBase<D, Ix2>, S>, T> for O
where
    D: Data,
    O: PredictInplace<ArrayBase<D, Ix2>, T>,
{
    type Error = O::Error;

    fn predict(&self, ds: &'a DatasetBase<ArrayBase<D, Ix2>, S>) -> Result<T, Self::Error> {
        let mut targets = self.default_target(&ds.records);
        self.predict_inplace(&ds.records, &mut targets)?;
        Ok(targets)
    }
}
