//! Utility functions for randomly generating datasets

use ndarray::{s, Array, Array1, Array2, ArrayBase, Data, Ix1};
use ndarray_rand::{
    rand::Rng,
    rand_distr::{Distribution, StandardNormal, Uniform},
    RandomExt,
};
use tabula::Dataset;

/// Generate `blob_size` data points (a "blob") around `blob_centroid` using the given distribution.
fn make_blob(
    blob_size: usize,
    blob_centroid: &ArrayBase<impl Data<Elem = f64>, Ix1>,
    distribution: impl Distribution<f64>,
    rng: &mut impl Rng,
) -> Array2<f64> {
    let shape = (blob_size, blob_centroid.len());
    let origin_blob: Array2<f64> = Array::random_using(shape, distribution, rng);
    origin_blob + blob_centroid
}

/// Two blobs of `blob_size` points each, sampled from a standard normal distribution around
/// `negative` and `positive`
///
/// The points around `negative` are labelled `-1`, the points around `positive` are labelled
/// `+1`. Both centroids need the same number of features.
///
/// # Panics
///
/// If the centroids differ in length.
pub fn sign_blobs(
    blob_size: usize,
    negative: &ArrayBase<impl Data<Elem = f64>, Ix1>,
    positive: &ArrayBase<impl Data<Elem = f64>, Ix1>,
    rng: &mut impl Rng,
) -> Dataset<f64, f64> {
    assert_eq!(
        negative.len(),
        positive.len(),
        "both centroids need the same number of features"
    );

    let mut records = Array2::zeros((2 * blob_size, negative.len()));
    records
        .slice_mut(s![..blob_size, ..])
        .assign(&make_blob(blob_size, negative, StandardNormal, rng));
    records
        .slice_mut(s![blob_size.., ..])
        .assign(&make_blob(blob_size, positive, StandardNormal, rng));

    let targets = (0..2 * blob_size)
        .map(|i| if i < blob_size { -1. } else { 1. })
        .collect::<Array1<_>>();

    Dataset::new(records, targets)
}

/// Records drawn uniformly from `[-1, 1)` in every feature
pub fn uniform_records(nsamples: usize, nfeatures: usize, rng: &mut impl Rng) -> Array2<f64> {
    Array::random_using((nsamples, nfeatures), Uniform::new(-1., 1.), rng)
}

/// Uniform records labelled by the sign of their first feature, with every label flipped with
/// probability `noise`
///
/// A single threshold on the first feature explains all labels but the flipped ones, the other
/// features are pure noise.
pub fn noisy_sign_dataset(
    nsamples: usize,
    nfeatures: usize,
    noise: f64,
    rng: &mut impl Rng,
) -> Dataset<f64, f64> {
    let records = uniform_records(nsamples, nfeatures.max(1), rng);
    let targets = records
        .column(0)
        .iter()
        .map(|x| {
            let label = if *x >= 0. { 1. } else { -1. };
            if rng.gen_bool(noise) {
                -label
            } else {
                label
            }
        })
        .collect::<Array1<_>>();

    Dataset::new(records, targets)
}

/// Two uniform features, labelled `+1` on and above the diagonal `x0 + x1 = 0` and `-1` below
///
/// The best axis-aligned split classifies only about three quarters of the samples correctly,
/// while a staircase of many splits approximates the diagonal arbitrarily well.
pub fn diagonal_dataset(nsamples: usize, rng: &mut impl Rng) -> Dataset<f64, f64> {
    let records = uniform_records(nsamples, 2, rng);
    let targets = records
        .rows()
        .into_iter()
        .map(|row| if row[0] + row[1] >= 0. { 1. } else { -1. })
        .collect::<Array1<_>>();

    Dataset::new(records, targets)
}
