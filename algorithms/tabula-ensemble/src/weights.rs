//! Sample weight distribution and the per-round boosting update
use ndarray::{Array1, ArrayBase, ArrayView1, Data, Ix1, Zip};
use tabula::Float;

use crate::error::{AdaboostError, Result};

/// A probability distribution over the training samples
///
/// Every weight is non-negative and the weights sum to one. The distribution is the state that
/// one boosting round hands to the next; it lives only for the duration of a fit.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleWeights<F> {
    weights: Array1<F>,
}

impl<F: Float> SampleWeights<F> {
    /// The uniform distribution `1/n` over `n` samples
    pub fn uniform(nsamples: usize) -> Result<Self> {
        if nsamples == 0 {
            return Err(AdaboostError::InvalidInput(
                "cannot weight an empty set of samples".to_string(),
            ));
        }

        let w = F::one() / F::cast(nsamples);
        Ok(SampleWeights {
            weights: Array1::from_elem(nsamples, w),
        })
    }

    /// Normalizes arbitrary non-negative weights into a distribution
    pub fn from_weights(weights: Array1<F>) -> Result<Self> {
        if weights.is_empty() {
            return Err(AdaboostError::InvalidInput(
                "cannot weight an empty set of samples".to_string(),
            ));
        }
        if let Some(idx) = weights.iter().position(|w| !w.is_finite() || *w < F::zero()) {
            return Err(AdaboostError::InvalidInput(format!(
                "weight of sample {} is {}, but weights must be finite and non-negative",
                idx, weights[idx]
            )));
        }

        let total = weights.sum();
        if total <= F::zero() {
            return Err(AdaboostError::InvalidInput(
                "sample weights sum to zero".to_string(),
            ));
        }

        Ok(SampleWeights {
            weights: weights.mapv(|w| w / total),
        })
    }

    pub fn nsamples(&self) -> usize {
        self.weights.len()
    }

    pub fn view(&self) -> ArrayView1<F> {
        self.weights.view()
    }

    pub fn sum(&self) -> F {
        self.weights.sum()
    }

    pub fn into_inner(self) -> Array1<F> {
        self.weights
    }
}

/// Turns the weighted error of a round's learner into its vote weight and the next round's
/// sample distribution.
///
/// The confidence of a learner with weighted error `e` is
///
/// ```text
/// alpha = 0.5 * ln((1 - e + eps) / (e + eps))
/// ```
///
/// where `eps` is the smoothing term which keeps `alpha` finite for a perfect learner. Each
/// sample weight is then multiplied by `exp(-alpha * y * h(x))` and the result renormalized, so
/// correctly classified samples lose weight and misclassified ones gain it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightUpdater<F> {
    smoothing: F,
}

impl<F: Float> WeightUpdater<F> {
    pub fn new(smoothing: F) -> Self {
        WeightUpdater { smoothing }
    }

    pub fn smoothing(&self) -> F {
        self.smoothing
    }

    /// Confidence coefficient of a learner with weighted error `error`
    pub fn alpha(&self, error: F) -> F {
        let eps = self.smoothing;
        F::cast(0.5) * ((F::one() - error + eps) / (error + eps)).ln()
    }

    /// Computes `alpha` and the reweighted, renormalized distribution
    ///
    /// The update runs in log space and subtracts the largest log-weight before exponentiating,
    /// so it cannot overflow. Weights that underflow are floored at the smallest positive normal
    /// value, keeping every weight strictly positive.
    pub fn update<D1, D2>(
        &self,
        weights: &SampleWeights<F>,
        predictions: &ArrayBase<D1, Ix1>,
        targets: &ArrayBase<D2, Ix1>,
        error: F,
    ) -> Result<(F, SampleWeights<F>)>
    where
        D1: Data<Elem = F>,
        D2: Data<Elem = F>,
    {
        let n = weights.nsamples();
        if predictions.len() != n || targets.len() != n {
            return Err(AdaboostError::InvalidInput(format!(
                "expected {} predictions and targets, got {} and {}",
                n,
                predictions.len(),
                targets.len()
            )));
        }

        let alpha = self.alpha(error);

        let log_weights = Zip::from(&weights.weights)
            .and(predictions)
            .and(targets)
            .map_collect(|&w, &pred, &y| w.ln() - alpha * y * pred);
        let max = log_weights.fold(F::neg_infinity(), |acc, &l| acc.max(l));

        let mut next = log_weights.mapv(|l| (l - max).exp().max(F::min_positive_value()));
        let total = next.sum();
        next.mapv_inplace(|w| w / total);

        Ok((alpha, SampleWeights { weights: next }))
    }
}
