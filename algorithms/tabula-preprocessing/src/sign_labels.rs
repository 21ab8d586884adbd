//! Encoding of binary targets into the sign convention

use std::collections::BTreeSet;
use std::fmt;

use crate::error::{PreprocessingError, Result};
use log::debug;
use ndarray::{Array1, ArrayBase, Data, Ix1};
use tabula::dataset::{DatasetBase, Records};
use tabula::traits::{Fit, Transformer};
use tabula::{Float, Label};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Maps binary targets of any label type onto `-1` and `+1`
///
/// Fitting requires exactly two distinct labels. Unless a positive label is chosen explicitly,
/// the larger of the two labels becomes `+1`.
///
/// ### Example
///
/// ```rust
/// use tabula::traits::{Fit, Transformer};
/// use tabula::DatasetBase;
/// use tabula_preprocessing::{Result, SignLabelEncoder};
/// use ndarray::{array, Array1};
///
/// let dataset = DatasetBase::new(array![[0.], [1.], [2.]], array!["spam", "ham", "spam"]);
/// let encoder = SignLabelEncoder::new().positive("spam").fit(&dataset)?;
///
/// let signs: Result<Array1<f64>> = encoder.transform(&dataset.targets);
/// let signs = signs?;
/// assert_eq!(signs, array![1., -1., 1.]);
/// assert_eq!(encoder.inverse_transform(&signs), array!["spam", "ham", "spam"]);
/// # Ok::<(), tabula_preprocessing::PreprocessingError>(())
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct SignLabelEncoder<L> {
    positive: Option<L>,
}

impl<L: Label + Ord + fmt::Display> SignLabelEncoder<L> {
    pub fn new() -> Self {
        SignLabelEncoder { positive: None }
    }

    /// Label which is encoded as `+1`
    pub fn positive(mut self, label: L) -> Self {
        self.positive = Some(label);
        self
    }
}

impl<L: Label + Ord + fmt::Display> Default for SignLabelEncoder<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L, R, S> Fit<R, ArrayBase<S, Ix1>, PreprocessingError> for SignLabelEncoder<L>
where
    L: Label + Ord + fmt::Display,
    R: Records,
    S: Data<Elem = L>,
{
    type Object = FittedSignLabelEncoder<L>;

    /// Collects the two labels of the targets. Fails on any other number of labels and on a
    /// positive label which does not occur.
    fn fit(&self, dataset: &DatasetBase<R, ArrayBase<S, Ix1>>) -> Result<Self::Object> {
        let labels = dataset.targets().iter().cloned().collect::<BTreeSet<_>>();
        if labels.len() != 2 {
            return Err(PreprocessingError::WrongLabelCount(labels.len()));
        }

        let mut labels = labels.into_iter();
        let (mut negative, mut positive) = match (labels.next(), labels.next()) {
            (Some(smaller), Some(larger)) => (smaller, larger),
            _ => return Err(PreprocessingError::WrongLabelCount(0)),
        };

        if let Some(chosen) = &self.positive {
            if *chosen == negative {
                std::mem::swap(&mut negative, &mut positive);
            } else if *chosen != positive {
                return Err(PreprocessingError::UnknownLabel(chosen.to_string()));
            }
        }

        debug!("encoding label {} as +1 and {} as -1", positive, negative);

        Ok(FittedSignLabelEncoder { negative, positive })
    }
}

/// The result of fitting a [`SignLabelEncoder`]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct FittedSignLabelEncoder<L> {
    negative: L,
    positive: L,
}

impl<L: Label + Ord + fmt::Display> FittedSignLabelEncoder<L> {
    /// Label encoded as `-1`
    pub fn negative(&self) -> &L {
        &self.negative
    }

    /// Label encoded as `+1`
    pub fn positive(&self) -> &L {
        &self.positive
    }

    /// Maps signs back onto labels, non-negative values become the positive label
    pub fn inverse_transform<F: Float, D: Data<Elem = F>>(
        &self,
        signs: &ArrayBase<D, Ix1>,
    ) -> Array1<L> {
        signs.map(|sign| {
            if *sign >= F::zero() {
                self.positive.clone()
            } else {
                self.negative.clone()
            }
        })
    }
}

impl<L, S, F> Transformer<&ArrayBase<S, Ix1>, Result<Array1<F>>> for FittedSignLabelEncoder<L>
where
    L: Label + Ord + fmt::Display,
    S: Data<Elem = L>,
    F: Float,
{
    /// Encodes every label. Fails on labels other than the two seen during fitting.
    fn transform(&self, targets: &ArrayBase<S, Ix1>) -> Result<Array1<F>> {
        targets
            .iter()
            .map(|label| {
                if *label == self.positive {
                    Ok(F::one())
                } else if *label == self.negative {
                    Ok(-F::one())
                } else {
                    Err(PreprocessingError::UnknownLabel(label.to_string()))
                }
            })
            .collect()
    }
}

impl<L, R, S, F> Transformer<DatasetBase<R, ArrayBase<S, Ix1>>, Result<DatasetBase<R, Array1<F>>>>
    for FittedSignLabelEncoder<L>
where
    L: Label + Ord + fmt::Display,
    R: Records,
    S: Data<Elem = L>,
    F: Float,
{
    /// Substitutes the targets of the dataset with their signs
    fn transform(
        &self,
        dataset: DatasetBase<R, ArrayBase<S, Ix1>>,
    ) -> Result<DatasetBase<R, Array1<F>>> {
        let signs = self.transform(&dataset.targets)?;
        Ok(dataset.with_targets(signs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn autotraits() {
        fn has_autotraits<T: Send + Sync + Sized + Unpin>() {}
        has_autotraits::<SignLabelEncoder<String>>();
        has_autotraits::<FittedSignLabelEncoder<usize>>();
    }

    #[test]
    fn larger_label_is_positive_by_default() {
        let dataset = DatasetBase::new(array![[0.], [0.], [0.]], array![7usize, 3, 7]);
        let encoder = SignLabelEncoder::new().fit(&dataset).unwrap();

        assert_eq!(encoder.positive(), &7);
        assert_eq!(encoder.negative(), &3);

        let signs: Result<Array1<f64>> = encoder.transform(&dataset.targets);
        assert_eq!(signs.unwrap(), array![1., -1., 1.]);
    }

    #[test]
    fn chosen_positive_label_is_respected() {
        let dataset = DatasetBase::new(array![[0.], [0.]], array![false, true]);
        let encoder = SignLabelEncoder::new().positive(false).fit(&dataset).unwrap();

        let signs: Result<Array1<f32>> = encoder.transform(&dataset.targets);
        assert_eq!(signs.unwrap(), array![1f32, -1.]);

        let res = SignLabelEncoder::new().positive(2usize).fit(&DatasetBase::new(
            array![[0.], [0.]],
            array![0usize, 1],
        ));
        assert!(matches!(res, Err(PreprocessingError::UnknownLabel(label)) if label == "2"));
    }

    #[test]
    fn targets_need_exactly_two_labels() {
        let single = DatasetBase::new(array![[0.], [0.]], array![1usize, 1]);
        let res = SignLabelEncoder::new().fit(&single);
        assert!(matches!(res, Err(PreprocessingError::WrongLabelCount(1))));

        let three = DatasetBase::new(array![[0.], [0.], [0.]], array!["a", "b", "c"]);
        let res = SignLabelEncoder::new().fit(&three);
        assert!(matches!(res, Err(PreprocessingError::WrongLabelCount(3))));
    }

    #[test]
    fn unknown_labels_fail_to_encode() {
        let dataset = DatasetBase::new(array![[0.], [0.]], array!["no", "yes"]);
        let encoder = SignLabelEncoder::new().fit(&dataset).unwrap();

        let signs: Result<Array1<f64>> = encoder.transform(&array!["yes", "maybe"]);
        assert!(matches!(signs, Err(PreprocessingError::UnknownLabel(label)) if label == "maybe"));
    }

    #[test]
    fn inverse_restores_labels() {
        let labels = array!["no".to_string(), "yes".to_string(), "yes".to_string()];
        let dataset = DatasetBase::new(array![[0.], [1.], [2.]], labels.clone());
        let encoder = SignLabelEncoder::new().fit(&dataset).unwrap();

        let encoded: DatasetBase<_, Array1<f64>> = encoder.transform(dataset).unwrap();
        assert_eq!(encoded.targets, array![-1., 1., 1.]);
        assert_eq!(encoder.inverse_transform(&encoded.targets), labels);
        assert_eq!(
            encoder.inverse_transform(&array![0., -0.5]),
            array!["yes".to_string(), "no".to_string()]
        );
    }
}
