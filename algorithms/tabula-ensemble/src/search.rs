//! Exhaustive search for the decision stump with minimum weighted error
use std::cmp::Ordering;

use log::trace;
use ndarray::{ArrayView1, ArrayView2};
use rayon::prelude::*;
use tabula::Float;

use crate::error::{AdaboostError, Result};
use crate::stump::{DecisionStump, Polarity};
use crate::weights::SampleWeights;

/// The winner of a stump search together with its weighted error
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StumpCandidate<F> {
    pub stump: DecisionStump<F>,
    pub error: F,
}

/// Settings of the per-round stump search
///
/// Every distinct value of every feature is tried as threshold. For each threshold the error of
/// the positive polarity is computed and, if it exceeds one half, the polarity is flipped and
/// the error replaced by its complement. The candidate with the smallest error wins; ties go to
/// the lower feature index and, within a feature, to the lower threshold.
///
/// With `parallel` enabled the features are distributed over the rayon thread pool. Every
/// feature is still searched by the same sequential sweep and the per-feature winners are reduced
/// with the same tie-break, so both modes select the identical stump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StumpSearch {
    parallel: bool,
}

impl Default for StumpSearch {
    fn default() -> Self {
        StumpSearch { parallel: true }
    }
}

impl StumpSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Search features on the rayon thread pool
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Finds the stump with minimum weighted error under `weights`
    pub fn search<F: Float>(
        &self,
        records: ArrayView2<F>,
        targets: ArrayView1<F>,
        weights: &SampleWeights<F>,
    ) -> Result<StumpCandidate<F>> {
        let (nsamples, nfeatures) = records.dim();
        if nsamples == 0 || nfeatures == 0 {
            return Err(AdaboostError::InvalidInput(format!(
                "cannot search stumps on a {}x{} matrix",
                nsamples, nfeatures
            )));
        }
        if targets.len() != nsamples || weights.nsamples() != nsamples {
            return Err(AdaboostError::InvalidInput(format!(
                "expected {} targets and weights, got {} and {}",
                nsamples,
                targets.len(),
                weights.nsamples()
            )));
        }

        let weights = weights.view();
        let best = if self.parallel {
            (0..nfeatures)
                .into_par_iter()
                .filter_map(|j| best_split(j, records.column(j), targets, weights))
                .reduce_with(prefer)
        } else {
            (0..nfeatures)
                .filter_map(|j| best_split(j, records.column(j), targets, weights))
                .reduce(prefer)
        };

        // every feature is constant, fall back to the trivial stump on the first one
        let best = match best {
            Some(best) => best,
            None => constant_split(records.column(0), targets, weights),
        };

        trace!(
            "best stump on feature {} at {} ({:?}) with weighted error {}",
            best.stump.feature_index(),
            best.stump.threshold(),
            best.stump.polarity(),
            best.error
        );

        Ok(best)
    }
}

/// Associative selection of the better candidate
fn prefer<F: Float>(a: StumpCandidate<F>, b: StumpCandidate<F>) -> StumpCandidate<F> {
    let b_wins = b.error < a.error
        || (b.error == a.error && b.stump.feature_index() < a.stump.feature_index());
    if b_wins {
        b
    } else {
        a
    }
}

/// Applies the polarity flip to the error of a positive-polarity stump
fn oriented<F: Float>(raw_error: F) -> (Polarity, F) {
    if raw_error > F::cast(0.5) {
        (Polarity::Negative, F::one() - raw_error)
    } else {
        (Polarity::Positive, raw_error)
    }
}

/// Total weight of positive and negative samples sharing one feature value
struct ValueGroup<F> {
    value: F,
    positive: F,
    negative: F,
}

/// Sorted distinct values of one feature with the class weights falling on each of them
fn group_by_value<F: Float>(
    column: ArrayView1<F>,
    targets: ArrayView1<F>,
    weights: ArrayView1<F>,
) -> Vec<ValueGroup<F>> {
    let mut order = (0..column.len()).collect::<Vec<_>>();
    order.sort_by(|&a, &b| {
        column[a]
            .partial_cmp(&column[b])
            .unwrap_or(Ordering::Equal)
    });

    let mut groups: Vec<ValueGroup<F>> = Vec::new();
    for idx in order {
        let (value, w) = (column[idx], weights[idx]);
        let (positive, negative) = if targets[idx] > F::zero() {
            (w, F::zero())
        } else {
            (F::zero(), w)
        };

        match groups.last_mut() {
            Some(group) if group.value == value => {
                group.positive += positive;
                group.negative += negative;
            }
            _ => groups.push(ValueGroup {
                value,
                positive,
                negative,
            }),
        }
    }

    groups
}

/// Weighted error of the positive-polarity stump `x >= threshold`, summed in sample order
///
/// Two stumps which misclassify the same samples get bit-identical errors, regardless of the
/// feature they split on.
fn positive_error<F: Float>(
    threshold: F,
    column: ArrayView1<F>,
    targets: ArrayView1<F>,
    weights: ArrayView1<F>,
) -> F {
    column
        .iter()
        .zip(targets.iter())
        .zip(weights.iter())
        .filter(|((x, y), _)| {
            let raw = if **x >= threshold { F::one() } else { -F::one() };
            raw != **y
        })
        .map(|(_, w)| *w)
        .sum()
}

/// Sweeps all thresholds of a single feature, `None` if the feature is constant
///
/// With positive polarity the error at threshold `t` is the positive weight strictly below `t`
/// plus the negative weight at or above `t`. Both parts are accumulated from non-negative terms,
/// the first from the left and the second from the right. The sweep only shortlists thresholds;
/// every threshold within rounding distance of the sweep's minimum is rescored with
/// [`positive_error`] and the first minimum of those errors wins.
fn best_split<F: Float>(
    feature_index: usize,
    column: ArrayView1<F>,
    targets: ArrayView1<F>,
    weights: ArrayView1<F>,
) -> Option<StumpCandidate<F>> {
    let groups = group_by_value(column, targets, weights);
    if groups.len() < 2 {
        return None;
    }

    let mut negative_at_or_above = vec![F::zero(); groups.len()];
    let mut acc = F::zero();
    for (k, group) in groups.iter().enumerate().rev() {
        acc += group.negative;
        negative_at_or_above[k] = acc;
    }

    let mut swept = Vec::with_capacity(groups.len());
    let mut positive_below = F::zero();
    for (group, negative) in groups.iter().zip(negative_at_or_above) {
        swept.push((group.value, oriented(positive_below + negative).1));
        positive_below += group.positive;
    }

    let lowest = swept
        .iter()
        .map(|(_, error)| *error)
        .fold(F::infinity(), |a, b| if b < a { b } else { a });
    // both summation orders stay within this bound of the exact error
    let tolerance = F::cast(4 * (column.len() + 1)) * F::epsilon();

    let mut best: Option<StumpCandidate<F>> = None;
    for (threshold, _) in swept
        .into_iter()
        .filter(|(_, error)| *error <= lowest + tolerance)
    {
        let (polarity, error) = oriented(positive_error(threshold, column, targets, weights));
        if best.map_or(true, |b| error < b.error) {
            best = Some(StumpCandidate {
                stump: DecisionStump::new(feature_index, threshold, polarity),
                error,
            });
        }
    }

    best
}

/// The only stump available when every feature is constant: all samples land on one side
fn constant_split<F: Float>(
    column: ArrayView1<F>,
    targets: ArrayView1<F>,
    weights: ArrayView1<F>,
) -> StumpCandidate<F> {
    let value = column[0];
    let (polarity, error) = oriented(positive_error(value, column, targets, weights));

    StumpCandidate {
        stump: DecisionStump::new(0, value, polarity),
        error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array1, Array2};
    use ndarray_rand::rand_distr::Uniform;
    use ndarray_rand::RandomExt;
    use rand::{rngs::SmallRng, Rng, SeedableRng};

    #[test]
    fn separable_feature_is_found() {
        let records = array![[5., 0.], [5., 1.], [5., 2.], [5., 3.]];
        let targets = array![-1., -1., 1., 1.];
        let weights = SampleWeights::uniform(4).unwrap();

        let best = StumpSearch::new()
            .search(records.view(), targets.view(), &weights)
            .unwrap();

        assert_eq!(best.stump, DecisionStump::new(1, 2., Polarity::Positive));
        assert_abs_diff_eq!(best.error, 0.0);
    }

    #[test]
    fn error_above_half_flips_polarity() {
        let records = array![[0.], [1.], [2.], [3.]];
        let targets = array![1., 1., -1., -1.];
        let weights = SampleWeights::from_weights(array![0.05, 0.05, 0.45, 0.45]).unwrap();

        // with positive polarity every threshold is wrong for most of the mass
        let raw = DecisionStump::new(0, 2., Polarity::Positive);
        assert_abs_diff_eq!(
            raw.weighted_error(records.view(), targets.view(), &weights),
            1.0,
            epsilon = 1e-12
        );

        let best = StumpSearch::new()
            .search(records.view(), targets.view(), &weights)
            .unwrap();
        assert_eq!(best.stump, DecisionStump::new(0, 2., Polarity::Negative));
        assert_abs_diff_eq!(best.error, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn flipped_error_is_recorded_as_complement() {
        // the only available stump predicts +1 everywhere and misses 90% of the mass
        let records = array![[3.], [3.], [3.]];
        let targets = array![-1., -1., 1.];
        let weights = SampleWeights::from_weights(array![0.45, 0.45, 0.1]).unwrap();

        let raw = DecisionStump::new(0, 3., Polarity::Positive);
        assert_abs_diff_eq!(
            raw.weighted_error(records.view(), targets.view(), &weights),
            0.9,
            epsilon = 1e-12
        );

        let best = StumpSearch::new()
            .search(records.view(), targets.view(), &weights)
            .unwrap();
        assert_eq!(best.stump.polarity(), Polarity::Negative);
        assert_abs_diff_eq!(best.error, 0.1, epsilon = 1e-12);
        assert_abs_diff_eq!(
            best.stump
                .weighted_error(records.view(), targets.view(), &weights),
            0.1,
            epsilon = 1e-12
        );

        let (polarity, error) = oriented(0.9);
        assert_eq!(polarity, Polarity::Negative);
        assert_abs_diff_eq!(error, 0.1, epsilon = 1e-12);
    }

    #[test]
    fn best_error_is_never_above_half() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..20 {
            let records = Array2::random_using((30, 3), Uniform::new(-1., 1.), &mut rng);
            let targets: Array1<f64> = (0..30)
                .map(|_| if rng.gen::<bool>() { 1. } else { -1. })
                .collect();
            let weights =
                SampleWeights::from_weights(Array1::random_using(30, Uniform::new(0.01, 1.), &mut rng))
                    .unwrap();

            let best = StumpSearch::new()
                .search(records.view(), targets.view(), &weights)
                .unwrap();
            assert!(best.error <= 0.5);
            assert_abs_diff_eq!(
                best.stump
                    .weighted_error(records.view(), targets.view(), &weights),
                best.error,
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn parallel_and_sequential_agree() {
        let mut rng = SmallRng::seed_from_u64(42);
        // coarse values produce many exact ties between features and thresholds
        let records = Array2::random_using((200, 16), Uniform::new(0, 4), &mut rng).mapv(|x| x as f64);
        let targets: Array1<f64> = (0..200)
            .map(|_| if rng.gen::<bool>() { 1. } else { -1. })
            .collect();
        let weights = SampleWeights::uniform(200).unwrap();

        let parallel = StumpSearch::new()
            .parallel(true)
            .search(records.view(), targets.view(), &weights)
            .unwrap();
        let sequential = StumpSearch::new()
            .parallel(false)
            .search(records.view(), targets.view(), &weights)
            .unwrap();

        assert_eq!(parallel, sequential);
        assert_eq!(parallel.error.to_bits(), sequential.error.to_bits());
    }

    #[test]
    fn ties_go_to_first_feature_and_threshold() {
        // both features separate the data equally well
        let records = array![[0., 10.], [1., 11.], [2., 12.], [3., 13.]];
        let targets = array![-1., -1., 1., 1.];
        let weights = SampleWeights::uniform(4).unwrap();

        for parallel in [true, false].iter() {
            let best = StumpSearch::new()
                .parallel(*parallel)
                .search(records.view(), targets.view(), &weights)
                .unwrap();
            assert_eq!(best.stump, DecisionStump::new(0, 2., Polarity::Positive));
        }

        // a constant target ties every threshold, the lowest one wins
        let targets = array![1., 1., 1., 1.];
        let best = StumpSearch::new()
            .search(records.view(), targets.view(), &weights)
            .unwrap();
        assert_eq!(best.stump, DecisionStump::new(0, 0., Polarity::Positive));
        assert_abs_diff_eq!(best.error, 0.0);
    }

    #[test]
    fn identical_stumps_on_different_features_tie_exactly() {
        // sample 2 is the only positive one and sits in the middle of every feature, so predicting
        // -1 everywhere is optimal and every feature offers it at its minimum
        let records = array![
            [0., 4., 1.],
            [1., 3., 4.],
            [2., 2., 2.],
            [3., 1., 0.],
            [4., 0., 3.]
        ];
        let targets = array![-1., -1., 1., -1., -1.];
        let weights = SampleWeights::<f64>::from_weights(array![0.13, 0.31, 0.07, 0.29, 0.2]).unwrap();
        let w = weights.view();

        let per_feature = (0..3)
            .map(|j| best_split(j, records.column(j), targets.view(), w).unwrap())
            .collect::<Vec<_>>();
        for candidate in &per_feature {
            assert_eq!(candidate.stump.threshold(), 0.);
            assert_eq!(candidate.stump.polarity(), Polarity::Negative);
            assert_eq!(candidate.error.to_bits(), per_feature[0].error.to_bits());
        }

        for parallel in [true, false].iter() {
            let best = StumpSearch::new()
                .parallel(*parallel)
                .search(records.view(), targets.view(), &weights)
                .unwrap();
            assert_eq!(best.stump, DecisionStump::new(0, 0., Polarity::Negative));
            assert_abs_diff_eq!(best.error, 0.07, epsilon = 1e-12);
        }
    }

    /// Direct evaluation of every candidate in feature-then-threshold order, first minimum wins
    fn exhaustive_search(
        records: &Array2<f64>,
        targets: &Array1<f64>,
        weights: &SampleWeights<f64>,
    ) -> StumpCandidate<f64> {
        let mut best: Option<StumpCandidate<f64>> = None;
        for (j, column) in records.columns().into_iter().enumerate() {
            let mut values = column.to_vec();
            values.sort_by(|a, b| a.partial_cmp(b).unwrap());
            values.dedup();
            if values.len() < 2 {
                continue;
            }
            for t in values {
                let raw = DecisionStump::new(j, t, Polarity::Positive).weighted_error(
                    records.view(),
                    targets.view(),
                    weights,
                );
                let (polarity, error) = if raw > 0.5 {
                    (Polarity::Negative, 1. - raw)
                } else {
                    (Polarity::Positive, raw)
                };
                if best.map_or(true, |b| error < b.error) {
                    best = Some(StumpCandidate {
                        stump: DecisionStump::new(j, t, polarity),
                        error,
                    });
                }
            }
        }
        best.unwrap()
    }

    #[test]
    fn matches_exhaustive_search_on_coarse_data() {
        let mut rng = SmallRng::seed_from_u64(2024);
        for _ in 0..500 {
            let nsamples = rng.gen_range(2..12);
            let mut records = Array2::random_using((nsamples, 4), Uniform::new(0, 3), &mut rng)
                .mapv(|x| x as f64);
            // keep at least one feature non-constant
            records[(0, 0)] = 0.;
            records[(1, 0)] = 1.;
            let targets: Array1<f64> = (0..nsamples)
                .map(|_| if rng.gen::<bool>() { 1. } else { -1. })
                .collect();
            let weights = SampleWeights::from_weights(Array1::random_using(
                nsamples,
                Uniform::new(0.01, 1.),
                &mut rng,
            ))
            .unwrap();

            let expected = exhaustive_search(&records, &targets, &weights);
            for parallel in [true, false].iter() {
                let found = StumpSearch::new()
                    .parallel(*parallel)
                    .search(records.view(), targets.view(), &weights)
                    .unwrap();
                assert_eq!(found.stump, expected.stump);
                assert_eq!(found.error.to_bits(), expected.error.to_bits());
            }
        }
    }

    #[test]
    fn constant_features_are_skipped() {
        let records = array![[7., 0.], [7., 1.], [7., 2.]];
        let targets = array![1., 1., 1.];
        let weights = SampleWeights::uniform(3).unwrap();

        let best = StumpSearch::new()
            .search(records.view(), targets.view(), &weights)
            .unwrap();
        assert_eq!(best.stump.feature_index(), 1);
    }

    #[test]
    fn all_constant_features_yield_trivial_stump() {
        let records = array![[7., 3.], [7., 3.], [7., 3.]];
        let targets = array![-1., -1., 1.];
        let weights = SampleWeights::uniform(3).unwrap();

        let best = StumpSearch::new()
            .search(records.view(), targets.view(), &weights)
            .unwrap();
        // predicting -1 everywhere is the best constant rule
        assert_eq!(best.stump, DecisionStump::new(0, 7., Polarity::Negative));
        assert_abs_diff_eq!(best.error, 1. / 3., epsilon = 1e-12);
    }

    #[test]
    fn empty_input_is_rejected() {
        let weights = SampleWeights::uniform(2).unwrap();
        let records = Array2::<f64>::zeros((2, 0));
        let targets = array![1., -1.];

        let res = StumpSearch::new().search(records.view(), targets.view(), &weights);
        assert!(matches!(res, Err(AdaboostError::InvalidInput(_))));

        let records = Array2::<f64>::zeros((3, 1));
        let res = StumpSearch::new().search(records.view(), targets.view(), &weights);
        assert!(matches!(res, Err(AdaboostError::InvalidInput(_))));
    }
}
