//! Decision stumps and the weak learner interface of the boosting loop
use std::fmt;

use ndarray::{Array1, ArrayBase, ArrayView1, ArrayView2, Axis, Data, Ix1};
use tabula::Float;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::error::{AdaboostError, Result};
use crate::search::StumpSearch;
use crate::weights::SampleWeights;

/// Which side of the threshold is predicted as the positive class
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    /// Samples at or above the threshold are `+1`
    Positive,
    /// Samples below the threshold are `+1`
    Negative,
}

impl Polarity {
    pub fn sign<F: Float>(self) -> F {
        match self {
            Polarity::Positive => F::one(),
            Polarity::Negative => -F::one(),
        }
    }

    pub fn flip(self) -> Self {
        match self {
            Polarity::Positive => Polarity::Negative,
            Polarity::Negative => Polarity::Positive,
        }
    }

    /// The polarity with the given sign, `None` for anything but `+1` and `-1`
    pub fn from_sign(sign: i8) -> Option<Self> {
        match sign {
            1 => Some(Polarity::Positive),
            -1 => Some(Polarity::Negative),
            _ => None,
        }
    }

    pub fn as_sign(self) -> i8 {
        match self {
            Polarity::Positive => 1,
            Polarity::Negative => -1,
        }
    }
}

/// A single-feature threshold classifier
///
/// The stump first compares one feature against its threshold,
///
/// ```text
/// raw(x) = +1 if x[feature_index] >= threshold else -1
/// ```
///
/// and multiplies the outcome with its polarity. Flipping the polarity therefore negates every
/// prediction of the stump.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionStump<F> {
    feature_index: usize,
    threshold: F,
    polarity: Polarity,
}

impl<F: Float> DecisionStump<F> {
    pub fn new(feature_index: usize, threshold: F, polarity: Polarity) -> Self {
        DecisionStump {
            feature_index,
            threshold,
            polarity,
        }
    }

    pub fn feature_index(&self) -> usize {
        self.feature_index
    }

    pub fn threshold(&self) -> F {
        self.threshold
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Predicts `+1` or `-1` for a single sample
    pub fn predict_one<D: Data<Elem = F>>(&self, sample: &ArrayBase<D, Ix1>) -> F {
        let raw = if sample[self.feature_index] >= self.threshold {
            F::one()
        } else {
            -F::one()
        };
        self.polarity.sign::<F>() * raw
    }

    /// Weighted misclassification rate of the stump
    pub fn weighted_error(
        &self,
        records: ArrayView2<F>,
        targets: ArrayView1<F>,
        weights: &SampleWeights<F>,
    ) -> F {
        records
            .axis_iter(Axis(0))
            .zip(targets.iter())
            .zip(weights.view().iter())
            .filter(|((row, y), _)| self.predict_one(row) != **y)
            .map(|(_, w)| *w)
            .sum()
    }
}

impl<F: Float> fmt::Display for DecisionStump<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let op = match self.polarity {
            Polarity::Positive => ">=",
            Polarity::Negative => "<",
        };
        write!(
            f,
            "+1 if x[{}] {} {} else -1",
            self.feature_index, op, self.threshold
        )
    }
}

/// A learner which can be boosted
///
/// A boosting round asks the learner family for the member with the smallest weighted error
/// under the current sample distribution and afterwards only evaluates single samples. The
/// ensemble never looks into the learner beyond these two operations.
pub trait WeakLearner<F: Float>: Sized {
    /// Settings of the per-round search
    type Params: Clone + Default + fmt::Debug + Send + Sync;

    /// Selects the learner with minimum weighted error and returns it with that error
    ///
    /// The returned error is at most `0.5` for a normalized weight distribution.
    fn fit_round(
        params: &Self::Params,
        records: ArrayView2<F>,
        targets: ArrayView1<F>,
        weights: &SampleWeights<F>,
    ) -> Result<(Self, F)>;

    /// Predicts `+1` or `-1` for a single sample
    fn predict_sample(&self, sample: ArrayView1<F>) -> F;

    /// Predicts every row of `records`
    fn predict_batch(&self, records: ArrayView2<F>) -> Array1<F> {
        records
            .axis_iter(Axis(0))
            .map(|row| self.predict_sample(row))
            .collect()
    }
}

impl<F: Float> WeakLearner<F> for DecisionStump<F> {
    type Params = StumpSearch;

    fn fit_round(
        params: &StumpSearch,
        records: ArrayView2<F>,
        targets: ArrayView1<F>,
        weights: &SampleWeights<F>,
    ) -> Result<(Self, F)> {
        let best = params.search(records, targets, weights)?;
        Ok((best.stump, best.error))
    }

    fn predict_sample(&self, sample: ArrayView1<F>) -> F {
        self.predict_one(&sample)
    }
}

/// Checks that a stump can be evaluated on samples with `nfeatures` columns
pub(crate) fn check_feature_index(feature_index: usize, nfeatures: usize) -> Result<()> {
    if feature_index >= nfeatures {
        Err(AdaboostError::InvalidState(format!(
            "stump splits on feature {}, but the model has {} features",
            feature_index, nfeatures
        )))
    } else {
        Ok(())
    }
}
