//! Common metrics for performance evaluation of binary classifiers
//!
//! Predictions and ground truth use the signed label convention: `+1` marks the positive
//! class and `-1` the negative class. All scores (precision, accuracy, recall, f1-score and
//! the Matthews correlation) are derived from the entries of a 2x2 confusion matrix.
use std::fmt;

use ndarray::prelude::*;
use ndarray::Data;

use crate::error::{Error, Result};
use crate::Float;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Confusion matrix for signed binary evaluation
///
/// Rows correspond to the ground truth and columns to the prediction, positive class first.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, PartialEq)]
pub struct BinaryConfusionMatrix {
    matrix: Array2<usize>,
}

impl BinaryConfusionMatrix {
    pub fn true_positives(&self) -> usize {
        self.matrix[(0, 0)]
    }

    pub fn false_negatives(&self) -> usize {
        self.matrix[(0, 1)]
    }

    pub fn false_positives(&self) -> usize {
        self.matrix[(1, 0)]
    }

    pub fn true_negatives(&self) -> usize {
        self.matrix[(1, 1)]
    }

    /// Calculate precision of the positive class
    pub fn precision(&self) -> f32 {
        let predicted = self.true_positives() + self.false_positives();
        ratio(self.true_positives(), predicted)
    }

    /// Calculate recall of the positive class
    pub fn recall(&self) -> f32 {
        let actual = self.true_positives() + self.false_negatives();
        ratio(self.true_positives(), actual)
    }

    /// Return mean accuracy
    pub fn accuracy(&self) -> f32 {
        ratio(self.matrix.diag().sum(), self.matrix.sum())
    }

    /// Return the beta score of the positive class
    pub fn f_score(&self, beta: f32) -> f32 {
        let sb = beta * beta;
        let (p, r) = (self.precision(), self.recall());

        if p + r == 0.0 {
            0.0
        } else {
            (1.0 + sb) * (p * r) / (sb * p + r)
        }
    }

    /// Return the beta=1 score of the positive class
    pub fn f1_score(&self) -> f32 {
        self.f_score(1.0)
    }

    /// Return the Matthew Correlation Coefficient
    ///
    /// Estimates the normalized cross-correlation between target and predicted variable
    pub fn mcc(&self) -> f32 {
        let (tp, fp) = (self.true_positives() as f32, self.false_positives() as f32);
        let (tn, fn_) = (self.true_negatives() as f32, self.false_negatives() as f32);

        let denom = ((tp + fp) * (tp + fn_) * (tn + fp) * (tn + fn_)).sqrt();
        if denom == 0.0 {
            0.0
        } else {
            (tp * tn - fp * fn_) / denom
        }
    }
}

fn ratio(num: usize, denom: usize) -> f32 {
    if denom == 0 {
        0.0
    } else {
        num as f32 / denom as f32
    }
}

/// Print a confusion matrix
impl fmt::Debug for BinaryConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "-----------------")?;
        writeln!(f, "|    | +1 | -1 |")?;
        writeln!(
            f,
            "| +1 | {} | {} |",
            self.true_positives(),
            self.false_negatives()
        )?;
        writeln!(
            f,
            "| -1 | {} | {} |",
            self.false_positives(),
            self.true_negatives()
        )?;
        write!(f, "-----------------")
    }
}

/// Compare a signed prediction with the ground truth
pub trait ToBinaryConfusionMatrix<F, D: Data<Elem = F>> {
    fn confusion_matrix(&self, ground_truth: &ArrayBase<D, Ix1>) -> Result<BinaryConfusionMatrix>;
}

impl<F: Float, C: Data<Elem = F>, D: Data<Elem = F>> ToBinaryConfusionMatrix<F, D>
    for ArrayBase<C, Ix1>
{
    fn confusion_matrix(&self, ground_truth: &ArrayBase<D, Ix1>) -> Result<BinaryConfusionMatrix> {
        if self.len() != ground_truth.len() {
            return Err(Error::MismatchedShapes(ground_truth.len(), self.len()));
        }

        // values are bucketed by sign, zero counts as positive
        let index = |x: F| if x >= F::zero() { 0 } else { 1 };

        let mut matrix = Array2::zeros((2, 2));
        for (predicted, truth) in self.iter().zip(ground_truth.iter()) {
            matrix[(index(*truth), index(*predicted))] += 1;
        }

        Ok(BinaryConfusionMatrix { matrix })
    }
}

#[cfg(test)]
mod tests {
    use super::ToBinaryConfusionMatrix;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_confusion_matrix() {
        let predicted = array![-1., 1., -1., 1., -1., 1.];
        let ground_truth = array![1., 1., -1., 1., -1., 1.];

        let cm = predicted.confusion_matrix(&ground_truth).unwrap();

        assert_eq!(cm.true_positives(), 3);
        assert_eq!(cm.false_negatives(), 1);
        assert_eq!(cm.false_positives(), 0);
        assert_eq!(cm.true_negatives(), 2);
    }

    #[test]
    fn test_cm_metrices() {
        let predicted = array![-1., 1., -1., 1., -1., 1.];
        let ground_truth = array![1., 1., -1., 1., -1., 1.];

        let x = predicted.confusion_matrix(&ground_truth).unwrap();

        assert_abs_diff_eq!(x.accuracy(), 5.0 / 6.0);
        assert_abs_diff_eq!(x.precision(), 1.0);
        assert_abs_diff_eq!(x.recall(), 3.0 / 4.0);
        assert_abs_diff_eq!(x.f1_score(), 6.0 / 7.0, epsilon = 1e-6);
        assert_abs_diff_eq!(
            x.mcc(),
            (3. * 2. - 0. * 1.) / (3.0f32 * 4. * 2. * 3.).sqrt(),
            epsilon = 1e-6
        );
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let predicted = array![1., -1.];
        let ground_truth = array![1., -1., 1.];

        assert!(predicted.confusion_matrix(&ground_truth).is_err());
    }

    #[test]
    fn empty_classes_do_not_divide_by_zero() {
        let predicted = array![-1., -1.];
        let ground_truth = array![-1., -1.];

        let cm = predicted.confusion_matrix(&ground_truth).unwrap();
        assert_eq!(cm.precision(), 0.0);
        assert_eq!(cm.recall(), 0.0);
        assert_eq!(cm.f1_score(), 0.0);
        assert_eq!(cm.accuracy(), 1.0);
    }
}
