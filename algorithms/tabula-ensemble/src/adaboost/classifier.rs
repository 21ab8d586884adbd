use log::debug;
use ndarray::{Array1, ArrayBase, Data, Ix1, Ix2};
use tabula::{dataset::DatasetBase, traits::*, Float, ParamGuard};

use super::{Adaboost, AdaboostParams};
use crate::error::{AdaboostError, Result};
use crate::stump::{DecisionStump, WeakLearner};

/// Whether a classifier holds a trained ensemble
#[derive(Debug, Clone, PartialEq)]
pub enum FitState<F, W = DecisionStump<F>> {
    Uninitialized,
    Trained(Adaboost<F, W>),
}

/// An AdaBoost classifier which owns its configuration and, once fitted, its ensemble
///
/// Where [`Adaboost::params`] produces a fresh model on every fit, the classifier keeps the
/// fitted model in place. Fitting again discards the previous ensemble and retrains from
/// scratch. Fitting takes the classifier mutably, so it can never overlap with a prediction.
///
/// ```rust
/// use tabula_ensemble::{AdaboostClassifier, AdaboostError};
/// use tabula::prelude::*;
/// use ndarray::array;
///
/// let mut clf = AdaboostClassifier::<f64>::default();
/// assert!(matches!(clf.predict(&array![[0.]]), Err(AdaboostError::ModelNotFitted)));
///
/// let dataset = Dataset::new(array![[0.], [1.], [2.], [3.]], array![-1., -1., 1., 1.]);
/// clf.fit(&dataset)?;
/// assert_eq!(clf.predict(&array![[0.5], [2.5]])?, array![-1., 1.]);
/// # Ok::<(), AdaboostError>(())
/// ```
#[derive(Debug, Clone)]
pub struct AdaboostClassifier<F: Float, W: WeakLearner<F> = DecisionStump<F>> {
    params: AdaboostParams<F, W>,
    state: FitState<F, W>,
}

impl<F: Float, W: WeakLearner<F>> AdaboostClassifier<F, W> {
    pub fn new(params: AdaboostParams<F, W>) -> Self {
        AdaboostClassifier {
            params,
            state: FitState::Uninitialized,
        }
    }

    pub(crate) fn from_model(params: AdaboostParams<F, W>, model: Adaboost<F, W>) -> Self {
        AdaboostClassifier {
            params,
            state: FitState::Trained(model),
        }
    }

    pub fn params(&self) -> &AdaboostParams<F, W> {
        &self.params
    }

    pub fn state(&self) -> &FitState<F, W> {
        &self.state
    }

    pub fn is_fitted(&self) -> bool {
        matches!(self.state, FitState::Trained(_))
    }

    /// The trained ensemble
    pub fn model(&self) -> Result<&Adaboost<F, W>> {
        match &self.state {
            FitState::Trained(model) => Ok(model),
            FitState::Uninitialized => Err(AdaboostError::ModelNotFitted),
        }
    }

    /// Trains a new ensemble on `dataset`, replacing any previous one
    ///
    /// The classifier is reset before training starts, so a failed fit leaves it unfitted.
    pub fn fit<D, S>(
        &mut self,
        dataset: &DatasetBase<ArrayBase<D, Ix2>, ArrayBase<S, Ix1>>,
    ) -> Result<()>
    where
        D: Data<Elem = F>,
        S: Data<Elem = F>,
    {
        if self.is_fitted() {
            debug!("discarding the previously trained ensemble");
        }
        self.state = FitState::Uninitialized;

        let model = self.params.check_ref()?.fit(dataset)?;
        self.state = FitState::Trained(model);
        Ok(())
    }

    /// Predicts `+1` or `-1` for every row of `x`
    pub fn predict<D: Data<Elem = F>>(&self, x: &ArrayBase<D, Ix2>) -> Result<Array1<F>> {
        self.model()?.predict(x)
    }

    /// Weighted vote of the ensemble for every row of `x`
    pub fn decision_function<D: Data<Elem = F>>(
        &self,
        x: &ArrayBase<D, Ix2>,
    ) -> Result<Array1<F>> {
        self.model()?.decision_function(x)
    }

    /// Drops the trained ensemble and keeps the configuration
    pub fn reset(&mut self) {
        self.state = FitState::Uninitialized;
    }
}

impl<F: Float, W: WeakLearner<F>> Default for AdaboostClassifier<F, W> {
    fn default() -> Self {
        Self::new(AdaboostParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use tabula::Dataset;

    #[test]
    fn autotraits() {
        fn has_autotraits<T: Send + Sync + Sized + Unpin>() {}
        has_autotraits::<AdaboostClassifier<f64>>();
        has_autotraits::<FitState<f32>>();
    }

    #[test]
    fn unfitted_classifier_refuses_to_predict() {
        let clf = AdaboostClassifier::<f64>::default();

        assert!(!clf.is_fitted());
        assert_eq!(clf.state(), &FitState::Uninitialized);
        assert!(matches!(
            clf.predict(&array![[1., 2.]]),
            Err(AdaboostError::ModelNotFitted)
        ));
        assert!(matches!(
            clf.decision_function(&array![[1., 2.]]),
            Err(AdaboostError::ModelNotFitted)
        ));
    }

    #[test]
    fn failed_fit_leaves_classifier_unfitted() -> Result<()> {
        let mut clf = AdaboostClassifier::new(Adaboost::params().n_estimators(2));
        clf.fit(&Dataset::new(array![[0.], [1.]], array![-1., 1.]))?;
        assert!(clf.is_fitted());

        let res = clf.fit(&Dataset::new(array![[0.], [1.]], array![-1., 2.]));
        assert!(matches!(res, Err(AdaboostError::InvalidLabel { index: 1, .. })));
        assert!(!clf.is_fitted());
        assert!(matches!(clf.model(), Err(AdaboostError::ModelNotFitted)));

        clf.fit(&Dataset::new(array![[0., 1.], [1., 0.]], array![-1., 1.]))?;
        assert!(clf.is_fitted());

        // five samples against four labels
        let res = clf.fit(&Dataset::new(
            ndarray::Array2::<f64>::zeros((5, 2)),
            array![1., -1., 1., -1.],
        ));
        assert!(matches!(res, Err(AdaboostError::InvalidInput(_))));
        assert!(matches!(clf.state(), FitState::Uninitialized));
        assert!(matches!(
            clf.predict(&array![[0., 0.]]),
            Err(AdaboostError::ModelNotFitted)
        ));
        Ok(())
    }

    #[test]
    fn refit_replaces_the_ensemble() -> Result<()> {
        let mut clf = AdaboostClassifier::new(Adaboost::params().n_estimators(1));

        clf.fit(&Dataset::new(array![[0.], [1.]], array![-1., 1.]))?;
        assert_eq!(clf.predict(&array![[0.], [1.]])?, array![-1., 1.]);

        clf.fit(&Dataset::new(array![[0.], [1.]], array![1., -1.]))?;
        assert_eq!(clf.predict(&array![[0.], [1.]])?, array![1., -1.]);
        assert_eq!(clf.model()?.n_estimators(), 1);
        Ok(())
    }

    #[test]
    fn invalid_params_are_reported_on_fit() {
        let mut clf = AdaboostClassifier::new(Adaboost::params().smoothing(1.0));
        let res = clf.fit(&Dataset::new(array![[0.], [1.]], array![-1., 1.]));

        assert!(matches!(res, Err(AdaboostError::BaseCrate(_))));
        assert!(!clf.is_fitted());
    }

    #[test]
    fn reset_keeps_configuration() -> Result<()> {
        let mut clf = AdaboostClassifier::new(Adaboost::params().n_estimators(4));
        clf.fit(&Dataset::new(array![[0.], [1.]], array![-1., 1.]))?;

        clf.reset();
        assert!(!clf.is_fitted());
        assert_eq!(clf.params().check_ref()?.n_estimators(), 4);
        Ok(())
    }
}
