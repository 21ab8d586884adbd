use super::{Dataset, DatasetBase, DatasetView, Records};
use ndarray::{s, Array1, ArrayBase, Axis, Data, Ix1, Ix2};
use rand::{seq::SliceRandom, Rng};

/// Implementation without constraints on records and targets
///
/// This implementation block provides methods for the creation and mutation of datasets. This
/// includes swapping the targets, return the records etc.
impl<R: Records, T> DatasetBase<R, T> {
    /// Create a new dataset from records and targets
    ///
    /// # Example
    ///
    /// ```ignore
    /// let dataset = Dataset::new(records, targets);
    /// ```
    pub fn new(records: R, targets: T) -> DatasetBase<R, T> {
        DatasetBase {
            records,
            targets,
            weights: Array1::zeros(0),
            feature_names: Vec::new(),
        }
    }

    /// Returns reference to targets
    pub fn targets(&self) -> &T {
        &self.targets
    }

    /// Returns optionally weights
    pub fn weights(&self) -> Option<&[f32]> {
        if !self.weights.is_empty() {
            self.weights.as_slice()
        } else {
            None
        }
    }

    /// Returns feature names
    ///
    /// A feature name gives a human-readable string describing the purpose of a single feature.
    /// This allow the reader to understand its purpose while analysing results, for example
    /// correlation analysis or feature importance.
    pub fn feature_names(&self) -> Vec<String> {
        if !self.feature_names.is_empty() {
            self.feature_names.clone()
        } else {
            (0..self.records.nfeatures())
                .map(|idx| format!("feature-{}", idx))
                .collect()
        }
    }

    /// Return records of a dataset
    ///
    /// The records are data points from which predictions are made. This functions returns a
    /// reference to the record field.
    pub fn records(&self) -> &R {
        &self.records
    }

    /// Updates the records of a dataset
    ///
    /// This function overwrites the records in a dataset. It also invalides the weights and
    /// feature names.
    pub fn with_records<T2: Records>(self, records: T2) -> DatasetBase<T2, T> {
        DatasetBase {
            records,
            targets: self.targets,
            weights: Array1::zeros(0),
            feature_names: Vec::new(),
        }
    }

    /// Updates the targets field of the dataset
    pub fn with_targets<T2>(self, targets: T2) -> DatasetBase<R, T2> {
        DatasetBase {
            records: self.records,
            targets,
            weights: self.weights,
            feature_names: self.feature_names,
        }
    }

    /// Updates the weights of a dataset
    pub fn with_weights(mut self, weights: Array1<f32>) -> DatasetBase<R, T> {
        self.weights = weights;

        self
    }

    /// Updates the feature names of a dataset
    pub fn with_feature_names<I: Into<String>>(mut self, names: Vec<I>) -> DatasetBase<R, T> {
        let feature_names = names.into_iter().map(|x| x.into()).collect();

        self.feature_names = feature_names;

        self
    }

    /// Number of samples in the dataset
    pub fn nsamples(&self) -> usize {
        self.records.nsamples()
    }

    /// Number of features of every sample
    pub fn nfeatures(&self) -> usize {
        self.records.nfeatures()
    }
}

impl<F, E, D, S> DatasetBase<ArrayBase<D, Ix2>, ArrayBase<S, Ix1>>
where
    F: Clone,
    E: Clone,
    D: Data<Elem = F>,
    S: Data<Elem = E>,
{
    /// Creates a view of a dataset
    pub fn view(&self) -> DatasetView<F, E> {
        DatasetBase::new(self.records.view(), self.targets.view())
            .with_weights(self.weights.clone())
            .with_feature_names(self.feature_names.clone())
    }

    /// Shuffles the samples of a dataset, keeping every record together with its target and
    /// weight
    pub fn shuffle<R: Rng>(&self, rng: &mut R) -> Dataset<F, E> {
        let mut indices = (0..self.nsamples()).collect::<Vec<_>>();
        indices.shuffle(rng);

        let weights = if self.weights.is_empty() {
            Array1::zeros(0)
        } else {
            self.weights.select(Axis(0), &indices)
        };

        DatasetBase::new(
            self.records.select(Axis(0), &indices),
            self.targets.select(Axis(0), &indices),
        )
        .with_weights(weights)
        .with_feature_names(self.feature_names.clone())
    }
}

/// Number of samples placed in the first part of a split
fn split_index(nsamples: usize, ratio: f32) -> usize {
    let n = (nsamples as f32 * ratio).ceil() as usize;
    n.min(nsamples)
}

fn split_weights(weights: &Array1<f32>, n: usize) -> (Array1<f32>, Array1<f32>) {
    if weights.is_empty() {
        (Array1::zeros(0), Array1::zeros(0))
    } else {
        (
            weights.slice(s![..n]).to_owned(),
            weights.slice(s![n..]).to_owned(),
        )
    }
}

impl<F: Clone, E: Clone> Dataset<F, E> {
    /// Split dataset into two disjoint chunks
    ///
    /// This function splits the observations in a dataset into two disjoint chunks. The splitting
    /// threshold is calculated with the `ratio`. For example a ratio of `0.9` allocates 90% to the
    /// first chunks and 10% to the second. This is often used in training, validation splitting
    /// procedures.
    pub fn split_with_ratio(self, ratio: f32) -> (Self, Self) {
        let n = split_index(self.nsamples(), ratio);
        let (first_weights, second_weights) = split_weights(&self.weights, n);

        let first = DatasetBase::new(
            self.records.slice(s![..n, ..]).to_owned(),
            self.targets.slice(s![..n]).to_owned(),
        )
        .with_weights(first_weights)
        .with_feature_names(self.feature_names.clone());

        let second = DatasetBase::new(
            self.records.slice(s![n.., ..]).to_owned(),
            self.targets.slice(s![n..]).to_owned(),
        )
        .with_weights(second_weights)
        .with_feature_names(self.feature_names);

        (first, second)
    }
}

impl<'a, F, E> DatasetView<'a, F, E> {
    /// Split dataset view into two disjoint views, see [`Dataset::split_with_ratio`]
    pub fn split_with_ratio(&self, ratio: f32) -> (DatasetView<'a, F, E>, DatasetView<'a, F, E>) {
        let n = split_index(self.nsamples(), ratio);
        let (first_weights, second_weights) = split_weights(&self.weights, n);

        let (first_records, second_records) = self.records.clone().split_at(Axis(0), n);
        let (first_targets, second_targets) = self.targets.clone().split_at(Axis(0), n);

        let first = DatasetBase::new(first_records, first_targets)
            .with_weights(first_weights)
            .with_feature_names(self.feature_names.clone());
        let second = DatasetBase::new(second_records, second_targets)
            .with_weights(second_weights)
            .with_feature_names(self.feature_names.clone());

        (first, second)
    }
}

impl<R: Records, T> From<(R, T)> for DatasetBase<R, T> {
    fn from(rec_tar: (R, T)) -> Self {
        DatasetBase::new(rec_tar.0, rec_tar.1)
    }
}

/// Records without targets, as used by unsupervised transformations
impl<R: Records> From<R> for DatasetBase<R, ()> {
    fn from(records: R) -> Self {
        DatasetBase::new(records, ())
    }
}
