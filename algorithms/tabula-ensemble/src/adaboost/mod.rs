//! AdaBoost ensembles of weak learners
mod algorithm;
mod classifier;
mod hyperparams;

pub use algorithm::*;
pub use classifier::*;
pub use hyperparams::*;
