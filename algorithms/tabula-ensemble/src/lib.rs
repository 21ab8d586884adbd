//!
//! # Boosted ensembles
//! `tabula-ensemble` provides AdaBoost, the classic boosting algorithm for binary
//! classification, over axis-aligned decision stumps.
//!
//! # The big picture
//!
//! `tabula-ensemble` is a crate in the `tabula` workspace, a toolkit for classical machine
//! learning on dense tabular data.
//!
//! AdaBoost combines many weak learners, each only slightly better than guessing, into one
//! strong classifier. Training runs a fixed number of rounds. Every round searches the
//! [decision stump](DecisionStump) with the smallest weighted error under the current
//! [sample distribution](SampleWeights), turns that error into a vote weight and
//! [reweights the samples](WeightUpdater) so that the next round concentrates on the ones the
//! ensemble still gets wrong.
//!
//! # Current state
//!
//! * [`Adaboost`] is the fitted model, created by fitting [`AdaboostParams`]
//! * [`AdaboostClassifier`] keeps its configuration and trained ensemble together and can be
//!   refitted in place
//! * [`AdaboostRecord`] is the portable form of a trained ensemble; with the `serde` feature it
//!   can be written to and read from JSON
//!
//! Targets follow the sign convention: every label is either `-1` or `+1`. The
//! `tabula-preprocessing` crate encodes other binary labels into this form.
//!
//! The stump search of every round can run on the rayon thread pool and selects the same stump
//! as the sequential search.
//!
//! ## Example
//!
//! ```rust
//! use tabula::prelude::*;
//! use tabula_ensemble::{Adaboost, AdaboostError};
//! use ndarray::array;
//!
//! let dataset = Dataset::new(
//!     array![[0., 5.], [1., 3.], [2., 4.], [3., 1.], [4., 0.]],
//!     array![-1., -1., -1., 1., 1.],
//! );
//!
//! let model = Adaboost::params().n_estimators(10).fit(&dataset)?;
//! assert_eq!(model.predict(&dataset)?, dataset.targets);
//!
//! let restored = Adaboost::from_state(model.to_state())?;
//! assert_eq!(restored.predict(&dataset)?, dataset.targets);
//! # Ok::<(), AdaboostError>(())
//! ```

mod adaboost;
mod codec;
mod error;
mod search;
mod stump;
mod weights;

pub use adaboost::*;
pub use codec::{AdaboostRecord, StumpRecord};
pub use error::{AdaboostError, Result};
pub use search::{StumpCandidate, StumpSearch};
pub use stump::{DecisionStump, Polarity, WeakLearner};
pub use weights::{SampleWeights, WeightUpdater};
