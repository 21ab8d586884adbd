//! Thresholding of features into zero and one

use ndarray::{Array2, ArrayBase, Data, Ix2};
use tabula::dataset::DatasetBase;
use tabula::traits::Transformer;
use tabula::Float;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Maps every value strictly above the threshold to one and everything else to zero
///
/// The binarizer has no state to learn, so it transforms records directly.
///
/// ### Example
///
/// ```rust
/// use tabula::traits::Transformer;
/// use tabula_preprocessing::Binarizer;
/// use ndarray::array;
///
/// let binarized = Binarizer::new().threshold(0.5).transform(array![[0.2, 0.5, 0.7]]);
/// assert_eq!(binarized, array![[0., 0., 1.]]);
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Binarizer<F> {
    threshold: F,
}

impl<F: Float> Binarizer<F> {
    /// Binarizer with threshold zero
    pub fn new() -> Self {
        Binarizer {
            threshold: F::zero(),
        }
    }

    pub fn threshold(mut self, threshold: F) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn get_threshold(&self) -> F {
        self.threshold
    }
}

impl<F: Float> Default for Binarizer<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float, D: Data<Elem = F>> Transformer<&ArrayBase<D, Ix2>, Array2<F>> for Binarizer<F> {
    fn transform(&self, x: &ArrayBase<D, Ix2>) -> Array2<F> {
        x.mapv(|el| {
            if el > self.threshold {
                F::one()
            } else {
                F::zero()
            }
        })
    }
}

impl<F: Float> Transformer<Array2<F>, Array2<F>> for Binarizer<F> {
    fn transform(&self, x: Array2<F>) -> Array2<F> {
        self.transform(&x)
    }
}

impl<F: Float, D: Data<Elem = F>, T>
    Transformer<DatasetBase<ArrayBase<D, Ix2>, T>, DatasetBase<Array2<F>, T>> for Binarizer<F>
{
    /// Substitutes the records of the dataset with their binarized version.
    fn transform(&self, x: DatasetBase<ArrayBase<D, Ix2>, T>) -> DatasetBase<Array2<F>, T> {
        let binarized = self.transform(&x.records);
        x.with_records(binarized)
    }
}
