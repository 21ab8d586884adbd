//! One-hot encoding of categorical features

use std::collections::BTreeSet;
use std::fmt;

use crate::error::{PreprocessingError, Result};
use log::debug;
use ndarray::{Array2, ArrayBase, Axis, Data, Ix2};
use tabula::dataset::{DatasetBase, Records};
use tabula::traits::{Fit, Transformer};
use tabula::{Float, Label};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Encodes every categorical column into one indicator column per category
///
/// Fitting collects the distinct categories of every column and sorts them. The encoded
/// records hold the indicator columns of the first input column, in sorted category order,
/// followed by those of the second column and so on. Every row therefore has exactly one `1`
/// per input column.
///
/// Categories which were not seen during fitting are an error, unless unknown categories are
/// ignored, in which case their block of indicators stays all zero.
///
/// ### Example
///
/// ```rust
/// use tabula::traits::{Fit, Transformer};
/// use tabula_preprocessing::{OneHotEncoder, Result};
/// use ndarray::{array, Array2};
///
/// let records = array![["red", "S"], ["blue", "M"], ["red", "M"]];
/// let encoder = OneHotEncoder::new().fit(&records.view().into())?;
///
/// let encoded: Result<Array2<f64>> = encoder.transform(&records);
/// assert_eq!(
///     encoded?,
///     array![[0., 1., 0., 1.], [1., 0., 1., 0.], [0., 1., 1., 0.]]
/// );
/// # Ok::<(), tabula_preprocessing::PreprocessingError>(())
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OneHotEncoder {
    ignore_unknown: bool,
}

impl OneHotEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode unseen categories as an all-zero block instead of failing
    pub fn ignore_unknown(mut self, ignore_unknown: bool) -> Self {
        self.ignore_unknown = ignore_unknown;
        self
    }

    pub fn is_ignoring_unknown(&self) -> bool {
        self.ignore_unknown
    }
}

impl<L, D, T> Fit<ArrayBase<D, Ix2>, T, PreprocessingError> for OneHotEncoder
where
    L: Label + Ord + fmt::Display,
    D: Data<Elem = L>,
{
    type Object = FittedOneHotEncoder<L>;

    /// Collects the sorted categories of every column. Fails if the dataset contains no
    /// samples.
    fn fit(&self, x: &DatasetBase<ArrayBase<D, Ix2>, T>) -> Result<Self::Object> {
        let records = x.records();
        if records.nsamples() == 0 {
            return Err(PreprocessingError::NotEnoughSamples);
        }

        let categories = records
            .axis_iter(Axis(1))
            .map(|column| {
                column
                    .iter()
                    .cloned()
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();

        let encoder = FittedOneHotEncoder {
            categories,
            input_names: x.feature_names(),
            ignore_unknown: self.ignore_unknown,
        };
        debug!(
            "fitted one-hot encoder on {} columns producing {} indicators",
            encoder.nfeatures_in(),
            encoder.nfeatures_out()
        );

        Ok(encoder)
    }
}

/// The result of fitting a [`OneHotEncoder`]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct FittedOneHotEncoder<L> {
    categories: Vec<Vec<L>>,
    input_names: Vec<String>,
    ignore_unknown: bool,
}

impl<L: Label + Ord + fmt::Display> FittedOneHotEncoder<L> {
    /// Sorted categories of every input column
    pub fn categories(&self) -> &[Vec<L>] {
        &self.categories
    }

    pub fn nfeatures_in(&self) -> usize {
        self.categories.len()
    }

    pub fn nfeatures_out(&self) -> usize {
        self.categories.iter().map(Vec::len).sum()
    }

    /// Names of the indicator columns in the form `{input feature}={category}`
    pub fn feature_names(&self) -> Vec<String> {
        self.input_names
            .iter()
            .zip(&self.categories)
            .flat_map(|(name, categories)| {
                categories
                    .iter()
                    .map(move |category| format!("{}={}", name, category))
            })
            .collect()
    }
}

impl<L, D, F> Transformer<&ArrayBase<D, Ix2>, Result<Array2<F>>> for FittedOneHotEncoder<L>
where
    L: Label + Ord + fmt::Display,
    D: Data<Elem = L>,
    F: Float,
{
    /// Encodes every row of `x`. Fails on a different number of columns than seen during fitting
    /// and, unless they are ignored, on unknown categories.
    fn transform(&self, x: &ArrayBase<D, Ix2>) -> Result<Array2<F>> {
        if x.ncols() != self.nfeatures_in() {
            return Err(PreprocessingError::MismatchedFeatures {
                expected: self.nfeatures_in(),
                found: x.ncols(),
            });
        }

        let mut encoded = Array2::zeros((x.nrows(), self.nfeatures_out()));
        let mut offset = 0;
        for (column, (values, categories)) in x
            .axis_iter(Axis(1))
            .zip(&self.categories)
            .enumerate()
        {
            for (row, value) in values.iter().enumerate() {
                match categories.binary_search(value) {
                    Ok(idx) => encoded[(row, offset + idx)] = F::one(),
                    Err(_) if self.ignore_unknown => {}
                    Err(_) => {
                        return Err(PreprocessingError::UnknownCategory {
                            column,
                            value: value.to_string(),
                        })
                    }
                }
            }
            offset += categories.len();
        }

        Ok(encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn autotraits() {
        fn has_autotraits<T: Send + Sync + Sized + Unpin>() {}
        has_autotraits::<OneHotEncoder>();
        has_autotraits::<FittedOneHotEncoder<String>>();
    }

    #[test]
    fn categories_are_sorted_per_column() {
        let records = array![[3usize, 10], [1, 10], [2, 20], [1, 30]];
        let encoder = OneHotEncoder::new().fit(&records.view().into()).unwrap();

        assert_eq!(encoder.categories(), &[vec![1, 2, 3], vec![10, 20, 30]]);
        assert_eq!(encoder.nfeatures_in(), 2);
        assert_eq!(encoder.nfeatures_out(), 6);

        let encoded: Result<Array2<f32>> = encoder.transform(&records);
        assert_eq!(
            encoded.unwrap(),
            array![
                [0f32, 0., 1., 1., 0., 0.],
                [1., 0., 0., 1., 0., 0.],
                [0., 1., 0., 0., 1., 0.],
                [1., 0., 0., 0., 0., 1.]
            ]
        );
    }

    #[test]
    fn one_indicator_per_input_column() {
        let records = array![[true, false], [false, false], [true, true]];
        let encoder = OneHotEncoder::new().fit(&records.view().into()).unwrap();

        let encoded: Result<Array2<f64>> = encoder.transform(&records);
        for row in encoded.unwrap().rows() {
            assert_eq!(row.sum(), 2.);
        }
    }

    #[test]
    fn unknown_categories() {
        let train = array![["a".to_string()], ["b".to_string()]];
        let test = array![["b".to_string()], ["c".to_string()]];

        let strict = OneHotEncoder::new().fit(&train.view().into()).unwrap();
        let encoded: Result<Array2<f64>> = strict.transform(&test);
        match encoded {
            Err(PreprocessingError::UnknownCategory { column, value }) => {
                assert_eq!(column, 0);
                assert_eq!(value, "c");
            }
            other => panic!("expected an unknown category, got {:?}", other),
        }

        let lenient = OneHotEncoder::new()
            .ignore_unknown(true)
            .fit(&train.view().into())
            .unwrap();
        let encoded: Result<Array2<f64>> = lenient.transform(&test);
        assert_eq!(encoded.unwrap(), array![[0., 1.], [0., 0.]]);
    }

    #[test]
    fn column_count_is_checked() {
        let encoder = OneHotEncoder::new()
            .fit(&array![["a", "x"], ["b", "y"]].into())
            .unwrap();

        let encoded: Result<Array2<f64>> = encoder.transform(&array![["a"]]);
        assert!(matches!(
            encoded,
            Err(PreprocessingError::MismatchedFeatures {
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn feature_names_follow_output_columns() {
        let dataset = DatasetBase::from(array![["red", "S"], ["blue", "M"]])
            .with_feature_names(vec!["color", "size"]);
        let encoder = OneHotEncoder::new().fit(&dataset).unwrap();

        assert_eq!(
            encoder.feature_names(),
            vec!["color=blue", "color=red", "size=M", "size=S"]
        );

        let unnamed = OneHotEncoder::new()
            .fit(&array![[1usize], [2]].into())
            .unwrap();
        assert_eq!(unnamed.feature_names(), vec!["feature-0=1", "feature-0=2"]);
    }

    #[test]
    fn empty_records_are_rejected() {
        let records = Array2::<usize>::zeros((0, 2));
        let res = OneHotEncoder::new().fit(&records.view().into());
        assert!(matches!(res, Err(PreprocessingError::NotEnoughSamples)));
    }
}
