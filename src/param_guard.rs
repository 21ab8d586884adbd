use std::error::Error;

use crate::{
    dataset::{DatasetBase, Records},
    traits::{Fit, Transformer},
};

/// A set of hyperparameters whose values have not been checked for validity. A reference to the
/// checked hyperparameters can only be obtained after checking has completed. If the
/// `Transformer` or `Fit` traits have been implemented on the checked hyperparameters, they will
/// also be implemented on the unchecked hyperparameters with the checking step done
/// automatically.
///
/// The hyperparameter validation done in `check_ref()` and `check()` should be identical.
pub trait ParamGuard {
    /// The checked hyperparameters
    type Checked;
    /// Error type resulting from failed hyperparameter checking
    type Error: Error;

    /// Checks the hyperparameters and returns a reference to the checked hyperparameters if
    /// successful
    fn check_ref(&self) -> Result<&Self::Checked, Self::Error>;

    /// Checks the hyperparameters and returns the checked hyperparameters if successful
    fn check(self) -> Result<Self::Checked, Self::Error>;

    /// Calls `check()` and unwraps the result
    fn check_unwrap(self) -> Self::Checked
    where
        Self: Sized,
    {
        self.check().unwrap()
    }
}

/// Performs the checking step and calls `transform` on the checked hyperparameters. Returns error
/// if checking was unsuccessful.
impl<R, T, P: ParamGuard> Transformer<R, Result<T, P::Error>> for P
where
    P::Checked: Transformer<R, T>,
{
    fn transform(&self, x: R) -> Result<T, P::Error> {
        self.check_ref().map(|p| p.transform(x))
    }
}

/// Performs checking step and calls `fit` on the checked hyperparameters. If checking failed, the
/// checking error is converted to the original error type of `Fit` and returned.
impl<R: Records, T, E, P: ParamGuard> Fit<R, T, E> for P
where
    P::Checked: Fit<R, T, E>,
    E: Error + From<crate::error::Error> + From<P::Error>,
{
    type Object = <<P as ParamGuard>::Checked as Fit<R, T, E>>::Object;

    fn fit(&self, dataset: &DatasetBase<R, T>) -> Result<Self::Object, E> {
        let checked = self.check_ref()?;
        checked.fit(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error as BaseError, Result};

    struct Checked(f64);
    struct Unchecked(Checked);

    impl ParamGuard for Unchecked {
        type Checked = Checked;
        type Error = BaseError;

        fn check_ref(&self) -> Result<&Checked> {
            if (self.0).0 < 0.0 {
                Err(BaseError::Parameters(format!(
                    "value should be non-negative, but was {}",
                    (self.0).0
                )))
            } else {
                Ok(&self.0)
            }
        }

        fn check(self) -> Result<Checked> {
            self.check_ref()?;
            Ok(self.0)
        }
    }

    impl Transformer<f64, f64> for Checked {
        fn transform(&self, x: f64) -> f64 {
            x * self.0
        }
    }

    #[test]
    fn transform_runs_check_first() {
        let ok = Unchecked(Checked(2.0));
        assert_eq!(ok.transform(3.0).unwrap(), 6.0);

        let bad = Unchecked(Checked(-1.0));
        assert!(matches!(bad.transform(3.0), Err(BaseError::Parameters(_))));
    }

    #[test]
    #[should_panic]
    fn check_unwrap_panics_on_invalid() {
        Unchecked(Checked(-1.0)).check_unwrap();
    }
}
