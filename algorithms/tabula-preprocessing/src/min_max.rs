//! Min-max scaling

use crate::error::{PreprocessingError, Result};
use approx::abs_diff_eq;
use log::debug;
use ndarray::{Array1, Array2, ArrayBase, Axis, Data, Ix2, Zip};
use tabula::dataset::{DatasetBase, Records};
use tabula::traits::{Fit, Transformer};
use tabula::{Float, ParamGuard};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Min-max scaler: learns the range of every feature from a dataset and produces a
/// [fitted scaler](FittedMinMaxScaler) which maps that range linearly onto `[min, max]`.
///
/// ### Example
///
/// ```rust
/// use tabula::traits::{Fit, Transformer};
/// use tabula_preprocessing::MinMaxScaler;
/// use ndarray::array;
///
/// let dataset = array![[1., -1.], [3., 1.]].into();
/// let scaler = MinMaxScaler::params().fit(&dataset).unwrap();
///
/// let scaled = scaler.transform(array![[2., 1.]]).unwrap();
/// assert_eq!(scaled, array![[0.5, 1.]]);
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct MinMaxScaler<F> {
    min: F,
    max: F,
}

/// Unchecked range of a [`MinMaxScaler`]
#[derive(Clone, Debug, PartialEq)]
pub struct MinMaxScalerParams<F>(MinMaxScaler<F>);

impl<F: Float> MinMaxScaler<F> {
    /// Scaler with the target range `[0, 1]`
    pub fn params() -> MinMaxScalerParams<F> {
        MinMaxScalerParams(MinMaxScaler {
            min: F::zero(),
            max: F::one(),
        })
    }

    /// Scaler with the target range `[min, max]`
    ///
    /// If `min` is bigger than `max` then fitting will return an error on any input.
    pub fn range(min: F, max: F) -> MinMaxScalerParams<F> {
        Self::params().range(min, max)
    }

    pub fn min(&self) -> F {
        self.min
    }

    pub fn max(&self) -> F {
        self.max
    }
}

impl<F: Float> MinMaxScalerParams<F> {
    pub fn range(mut self, min: F, max: F) -> Self {
        self.0.min = min;
        self.0.max = max;
        self
    }
}

impl<F: Float> ParamGuard for MinMaxScalerParams<F> {
    type Checked = MinMaxScaler<F>;
    type Error = PreprocessingError;

    fn check_ref(&self) -> Result<&Self::Checked> {
        // NaN bounds fail the comparison as well
        if self.0.min <= self.0.max {
            Ok(&self.0)
        } else {
            Err(PreprocessingError::FlippedMinMaxRange)
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}

impl<F: Float, D: Data<Elem = F>, T> Fit<ArrayBase<D, Ix2>, T, PreprocessingError>
    for MinMaxScaler<F>
{
    type Object = FittedMinMaxScaler<F>;

    /// Learns the minimum and maximum of every feature. Fails if the dataset contains no
    /// samples.
    fn fit(&self, x: &DatasetBase<ArrayBase<D, Ix2>, T>) -> Result<Self::Object> {
        let records = x.records();
        if records.nsamples() == 0 {
            return Err(PreprocessingError::NotEnoughSamples);
        }

        let mins = records.fold_axis(
            Axis(0),
            F::infinity(),
            |&x, &prev| if x < prev { x } else { prev },
        );
        let mut scales = records.fold_axis(
            Axis(0),
            F::neg_infinity(),
            |&x, &prev| if x > prev { x } else { prev },
        );
        Zip::from(&mut scales).and(&mins).for_each(|max, min| {
            if abs_diff_eq!(*max - *min, F::zero()) {
                // constant features are only shifted
                *max = F::one();
            } else {
                *max = F::one() / (*max - *min);
            }
        });

        debug!(
            "fitted min-max scaler on {} samples with {} features",
            records.nsamples(),
            records.nfeatures()
        );

        Ok(FittedMinMaxScaler {
            offsets: mins,
            scales,
            range: self.clone(),
        })
    }
}

/// The result of fitting a [`MinMaxScaler`]. Scales records with the parameters learned
/// during fitting.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct FittedMinMaxScaler<F> {
    offsets: Array1<F>,
    scales: Array1<F>,
    range: MinMaxScaler<F>,
}

impl<F: Float> FittedMinMaxScaler<F> {
    /// Minimum of every feature in the training records, subtracted before scaling
    pub fn offsets(&self) -> &Array1<F> {
        &self.offsets
    }

    /// Inverse range of every feature in the training records, one for constant features
    pub fn scales(&self) -> &Array1<F> {
        &self.scales
    }

    pub fn range(&self) -> &MinMaxScaler<F> {
        &self.range
    }

    pub fn nfeatures(&self) -> usize {
        self.offsets.len()
    }
}

impl<F: Float> Transformer<Array2<F>, Result<Array2<F>>> for FittedMinMaxScaler<F> {
    /// Scales an array of size (nsamples, nfeatures) according to the scaler's `offsets` and
    /// `scales`. Fails if the number of features differs from the fitted records.
    fn transform(&self, x: Array2<F>) -> Result<Array2<F>> {
        if x.ncols() != self.nfeatures() {
            return Err(PreprocessingError::MismatchedFeatures {
                expected: self.nfeatures(),
                found: x.ncols(),
            });
        }

        let (min, max) = (self.range.min, self.range.max);
        let mut x = x;
        Zip::from(x.columns_mut())
            .and(self.offsets())
            .and(self.scales())
            .for_each(|mut col, &offset, &scale| {
                col.mapv_inplace(|el| (el - offset) * scale * (max - min) + min);
            });

        Ok(x)
    }
}

impl<F: Float, D: Data<Elem = F>, T>
    Transformer<DatasetBase<ArrayBase<D, Ix2>, T>, Result<DatasetBase<Array2<F>, T>>>
    for FittedMinMaxScaler<F>
{
    /// Substitutes the records of the dataset with their scaled version.
    fn transform(
        &self,
        x: DatasetBase<ArrayBase<D, Ix2>, T>,
    ) -> Result<DatasetBase<Array2<F>, T>> {
        let transformed_records = self.transform(x.records.to_owned())?;
        Ok(x.with_records(transformed_records))
    }
}
