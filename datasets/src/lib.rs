//! `tabula-datasets` provides synthetic datasets ready to be used in tests, examples and
//! benchmarks.
//!
//! ## The Big Picture
//!
//! `tabula-datasets` is a crate in the `tabula` workspace, a toolkit for classical machine
//! learning on dense tabular data.
//!
//! ## Current State
//!
//! All datasets are generated from a caller supplied random number generator, so a seeded
//! generator always reproduces the same data. Binary targets follow the sign convention of
//! `tabula-ensemble` and are either `-1.0` or `+1.0`.
//!
//! * [`generate::sign_blobs`]: two gaussian blobs, one per class
//! * [`generate::noisy_sign_dataset`]: the sign of the first feature with a share of flipped labels
//! * [`generate::diagonal_dataset`]: two classes split by a diagonal, which no single
//!   axis-aligned split separates
//!
//! ## Using a dataset
//!
//! ```
//! use rand::{rngs::SmallRng, SeedableRng};
//!
//! let mut rng = SmallRng::seed_from_u64(42);
//! let (train, valid) = tabula_datasets::generate::diagonal_dataset(100, &mut rng)
//!     .split_with_ratio(0.8);
//!
//! assert_eq!(train.nsamples(), 80);
//! assert_eq!(valid.nsamples(), 20);
//! ```

pub mod generate;
