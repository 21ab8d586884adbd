use tabula::{
    error::{Error, Result},
    Float, ParamGuard,
};

use crate::search::StumpSearch;
use crate::stump::{DecisionStump, WeakLearner};
use crate::Adaboost;

/// The set of hyperparameters that can be specified for fitting an
/// [AdaBoost ensemble](crate::Adaboost).
///
/// ### Example
///
/// ```rust
/// use tabula_ensemble::Adaboost;
/// use tabula::prelude::*;
/// use ndarray::array;
///
/// let dataset = Dataset::new(array![[0.], [1.], [2.], [3.]], array![-1., -1., 1., 1.]);
///
/// let model = Adaboost::params()
///     .n_estimators(3)
///     .smoothing(1e-10)
///     .fit(&dataset)
///     .unwrap();
///
/// assert_eq!(model.predict(&dataset.records).unwrap(), array![-1., -1., 1., 1.]);
/// ```
#[derive(Clone, Debug)]
pub struct AdaboostValidParams<F: Float, W: WeakLearner<F> = DecisionStump<F>> {
    n_estimators: usize,
    smoothing: F,
    learner_params: W::Params,
}

impl<F: Float, W: WeakLearner<F>> AdaboostValidParams<F, W> {
    /// Number of boosting rounds and therefore of ensemble members
    pub fn n_estimators(&self) -> usize {
        self.n_estimators
    }

    pub fn smoothing(&self) -> F {
        self.smoothing
    }

    pub fn learner_params(&self) -> &W::Params {
        &self.learner_params
    }
}

#[derive(Clone, Debug)]
pub struct AdaboostParams<F: Float, W: WeakLearner<F> = DecisionStump<F>>(
    AdaboostValidParams<F, W>,
);

impl<F: Float, W: WeakLearner<F>> AdaboostParams<F, W> {
    pub fn new() -> Self {
        Self(AdaboostValidParams {
            n_estimators: 10,
            smoothing: F::cast(1e-10),
            learner_params: W::Params::default(),
        })
    }

    /// Sets the number of boosting rounds. Zero rounds produce an empty ensemble which
    /// predicts `+1` for every sample.
    pub fn n_estimators(mut self, n_estimators: usize) -> Self {
        self.0.n_estimators = n_estimators;
        self
    }

    /// Sets the term added to numerator and denominator of the confidence ratio, which keeps
    /// the vote of a perfect learner finite
    pub fn smoothing(mut self, smoothing: F) -> Self {
        self.0.smoothing = smoothing;
        self
    }

    /// Sets the params for the weak learner search of every round
    pub fn learner_params(mut self, learner_params: W::Params) -> Self {
        self.0.learner_params = learner_params;
        self
    }
}

impl<F: Float> AdaboostParams<F, DecisionStump<F>> {
    /// Enables or disables searching the features of a round on the rayon thread pool
    pub fn parallel_search(mut self, parallel: bool) -> Self {
        self.0.learner_params = StumpSearch::new().parallel(parallel);
        self
    }
}

impl<F: Float, W: WeakLearner<F>> Default for AdaboostParams<F, W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> Adaboost<F> {
    /// Defaults are provided if the optional parameters are not specified:
    /// * `n_estimators = 10`
    /// * `smoothing = 1e-10`
    /// * parallel stump search
    // Violates the convention that new should return a value of type `Self`
    #[allow(clippy::new_ret_no_self)]
    pub fn params() -> AdaboostParams<F> {
        AdaboostParams::new()
    }
}

impl<F: Float, W: WeakLearner<F>> ParamGuard for AdaboostParams<F, W> {
    type Checked = AdaboostValidParams<F, W>;
    type Error = Error;

    fn check_ref(&self) -> Result<&Self::Checked> {
        let smoothing = self.0.smoothing;
        if !smoothing.is_finite() || smoothing <= F::zero() || smoothing >= F::cast(0.5) {
            Err(Error::Parameters(format!(
                "Smoothing should be positive and smaller than 0.5, but was {}",
                smoothing
            )))
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let params = Adaboost::<f64>::params().check().unwrap();
        assert_eq!(params.n_estimators(), 10);
        assert_eq!(params.smoothing(), 1e-10);
        assert!(params.learner_params().is_parallel());
    }

    #[test]
    fn builder_sets_values() {
        let params = Adaboost::<f32>::params()
            .n_estimators(0)
            .smoothing(1e-6)
            .parallel_search(false)
            .check()
            .unwrap();
        assert_eq!(params.n_estimators(), 0);
        assert_eq!(params.smoothing(), 1e-6);
        assert!(!params.learner_params().is_parallel());
    }

    #[test]
    fn invalid_smoothing_is_rejected() {
        for smoothing in [0.0, -1e-10, 0.5, f64::NAN, f64::INFINITY].iter() {
            let res = Adaboost::<f64>::params().smoothing(*smoothing).check();
            assert!(matches!(res, Err(Error::Parameters(_))));
        }
    }
}
