use log::debug;
use ndarray::{Array1, ArrayBase, ArrayView1, ArrayView2, Axis, Data, Ix1, Ix2, Zip};
use tabula::{dataset::DatasetBase, traits::*, Float};

use super::AdaboostValidParams;
use crate::error::{AdaboostError, Result};
use crate::stump::{DecisionStump, WeakLearner};
use crate::weights::{SampleWeights, WeightUpdater};

/// A weak learner together with the weight of its vote
#[derive(Debug, Clone, PartialEq)]
pub struct EnsembleMember<F, W> {
    learner: W,
    alpha: F,
}

impl<F: Float, W> EnsembleMember<F, W> {
    pub fn new(learner: W, alpha: F) -> Self {
        EnsembleMember { learner, alpha }
    }

    pub fn learner(&self) -> &W {
        &self.learner
    }

    pub fn alpha(&self) -> F {
        self.alpha
    }
}

/// A fitted AdaBoost ensemble
///
/// AdaBoost builds its members one round at a time. Each round selects the weak learner with
/// the smallest weighted error under the current sample distribution, rates it with the
/// confidence `alpha` and shifts weight towards the samples it got wrong, so that the next
/// round concentrates on them.
///
/// A sample is classified by the weighted vote
///
/// ```text
/// score(x) = sum_m alpha_m * h_m(x)
/// ```
///
/// and mapped to `+1` if `score(x) >= 0` and to `-1` otherwise. An ensemble without members
/// therefore predicts `+1` everywhere.
///
/// The members are stored in round order and never change after fitting.
///
/// ### Example
///
/// ```rust
/// use tabula::prelude::*;
/// use tabula_ensemble::{Adaboost, AdaboostError};
/// use ndarray::array;
///
/// let dataset = Dataset::new(
///     array![[1., 0.], [2., 0.], [3., 1.], [4., 1.]],
///     array![-1., -1., 1., 1.],
/// );
///
/// let model = Adaboost::params().n_estimators(5).fit(&dataset)?;
/// let predictions = model.predict(&array![[0.5, 0.], [3.5, 1.]])?;
///
/// assert_eq!(predictions, array![-1., 1.]);
/// # Ok::<(), AdaboostError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Adaboost<F, W = DecisionStump<F>> {
    members: Vec<EnsembleMember<F, W>>,
    n_features: usize,
}

impl<F: Float, W: WeakLearner<F>> Adaboost<F, W> {
    pub(crate) fn from_members(members: Vec<EnsembleMember<F, W>>, n_features: usize) -> Self {
        Adaboost {
            members,
            n_features,
        }
    }

    /// Members of the ensemble in training round order
    pub fn members(&self) -> &[EnsembleMember<F, W>] {
        &self.members
    }

    /// Number of boosting rounds the ensemble was built with
    pub fn n_estimators(&self) -> usize {
        self.members.len()
    }

    /// Number of features of the training records
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Weighted vote of all members for every row of `x`
    pub fn decision_function<D: Data<Elem = F>>(
        &self,
        x: &ArrayBase<D, Ix2>,
    ) -> Result<Array1<F>> {
        self.check_features(x.ncols())?;

        Ok(x.axis_iter(Axis(0))
            .map(|sample| self.score(sample))
            .collect())
    }

    fn score(&self, sample: ArrayView1<F>) -> F {
        self.members
            .iter()
            .map(|m| m.alpha * m.learner.predict_sample(sample))
            .sum()
    }

    fn check_features(&self, nfeatures: usize) -> Result<()> {
        if nfeatures != self.n_features {
            Err(AdaboostError::InvalidInput(format!(
                "expected {} features, but the records have {}",
                self.n_features, nfeatures
            )))
        } else {
            Ok(())
        }
    }
}

impl<F: Float> Adaboost<F, DecisionStump<F>> {
    /// Share of the total vote cast by the stumps splitting on each feature
    ///
    /// The importances sum up to one, unless no member casts a vote at all, in which case
    /// all of them are zero.
    pub fn feature_importances(&self) -> Array1<F> {
        let mut importances = Array1::zeros(self.n_features);
        for member in &self.members {
            importances[member.learner.feature_index()] += member.alpha;
        }

        let total = importances.sum();
        if total > F::zero() {
            importances.mapv_inplace(|x| x / total);
        }
        importances
    }
}

/// Maps a vote to a label, a tie counts as positive
fn sign<F: Float>(score: F) -> F {
    if score >= F::zero() {
        F::one()
    } else {
        -F::one()
    }
}

impl<F: Float, W: WeakLearner<F>, D: Data<Elem = F>> PredictInplace<ArrayBase<D, Ix2>, Array1<F>>
    for Adaboost<F, W>
{
    type Error = AdaboostError;

    /// Make predictions for each row of a matrix of features `x`.
    fn predict_inplace(&self, x: &ArrayBase<D, Ix2>, y: &mut Array1<F>) -> Result<()> {
        if x.nrows() != y.len() {
            return Err(AdaboostError::InvalidInput(format!(
                "the number of data points ({}) must match the number of output targets ({})",
                x.nrows(),
                y.len()
            )));
        }

        let scores = self.decision_function(x)?;
        Zip::from(y).and(&scores).for_each(|target, &score| {
            *target = sign(score);
        });

        Ok(())
    }

    fn default_target(&self, x: &ArrayBase<D, Ix2>) -> Array1<F> {
        Array1::zeros(x.nrows())
    }
}

/// Rejects empty, ragged or non-finite records and labels other than `-1` and `+1`
pub(crate) fn validate_training_data<F: Float>(
    records: ArrayView2<F>,
    targets: ArrayView1<F>,
) -> Result<()> {
    let (nsamples, nfeatures) = records.dim();
    if nsamples == 0 {
        return Err(AdaboostError::InvalidInput(
            "the training records contain no samples".to_string(),
        ));
    }
    if nfeatures == 0 {
        return Err(AdaboostError::InvalidInput(
            "the training records contain no features".to_string(),
        ));
    }
    if targets.len() != nsamples {
        return Err(AdaboostError::InvalidInput(format!(
            "{} records but {} targets",
            nsamples,
            targets.len()
        )));
    }

    if let Some(((row, col), value)) = records.indexed_iter().find(|(_, x)| !x.is_finite()) {
        return Err(AdaboostError::InvalidInput(format!(
            "value {} of sample {} feature {} is not finite",
            value, row, col
        )));
    }

    let one = F::one();
    if let Some((index, value)) = targets
        .iter()
        .enumerate()
        .find(|(_, y)| **y != one && **y != -one)
    {
        return Err(AdaboostError::InvalidLabel {
            index,
            value: value.to_f64().unwrap_or(f64::NAN),
        });
    }

    Ok(())
}

/// Starting distribution of the boosting loop: the dataset's sample weights if it carries
/// any, uniform otherwise
fn initial_weights<F: Float, R: tabula::dataset::Records, T>(
    dataset: &DatasetBase<R, T>,
) -> Result<SampleWeights<F>> {
    match dataset.weights() {
        None => SampleWeights::uniform(dataset.nsamples()),
        Some(weights) if weights.len() == dataset.nsamples() => {
            SampleWeights::from_weights(weights.iter().map(|w| F::cast(*w)).collect())
        }
        Some(weights) => Err(AdaboostError::InvalidInput(format!(
            "{} sample weights for {} samples",
            weights.len(),
            dataset.nsamples()
        ))),
    }
}

impl<F, D, S, W> Fit<ArrayBase<D, Ix2>, ArrayBase<S, Ix1>, AdaboostError>
    for AdaboostValidParams<F, W>
where
    F: Float,
    D: Data<Elem = F>,
    S: Data<Elem = F>,
    W: WeakLearner<F>,
{
    type Object = Adaboost<F, W>;

    /// Fits an ensemble of `n_estimators` members.
    ///
    /// All inputs are validated before the first round, so a failing fit never does any work.
    fn fit(
        &self,
        dataset: &DatasetBase<ArrayBase<D, Ix2>, ArrayBase<S, Ix1>>,
    ) -> Result<Self::Object> {
        let records = dataset.records().view();
        let targets = dataset.targets().view();
        validate_training_data(records, targets)?;

        let updater = WeightUpdater::new(self.smoothing());
        let mut weights = initial_weights(dataset)?;
        let mut members = Vec::with_capacity(self.n_estimators());

        for round in 0..self.n_estimators() {
            let (learner, error) = W::fit_round(self.learner_params(), records, targets, &weights)?;
            let predictions = learner.predict_batch(records);
            let (alpha, next) = updater.update(&weights, &predictions, &targets, error)?;

            debug!(
                "boosting round {}/{}: weighted error {}, alpha {}",
                round + 1,
                self.n_estimators(),
                error,
                alpha
            );

            members.push(EnsembleMember::new(learner, alpha));
            weights = next;
        }

        Ok(Adaboost::from_members(members, records.ncols()))
    }
}
