//! Portable records of trained ensembles
//!
//! A record holds everything prediction needs and nothing of the training run: per member the
//! stump and its vote, plus the round count and the feature count the model was trained on.
//! Sample weights and training data are never part of it.
use tabula::Float;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::adaboost::{Adaboost, AdaboostClassifier, AdaboostParams, EnsembleMember};
use crate::error::{AdaboostError, Result};
use crate::stump::{check_feature_index, DecisionStump, Polarity};

/// A single ensemble member in plain data form
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct StumpRecord<F> {
    pub feature_index: usize,
    pub threshold: F,
    /// `1` or `-1`
    pub polarity: i8,
    pub alpha: F,
}

/// A trained AdaBoost ensemble in plain data form
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct AdaboostRecord<F> {
    pub n_estimators: usize,
    pub n_features: usize,
    pub members: Vec<StumpRecord<F>>,
}

impl<F: Float> StumpRecord<F> {
    fn into_member(
        self,
        index: usize,
        n_features: usize,
    ) -> Result<EnsembleMember<F, DecisionStump<F>>> {
        check_feature_index(self.feature_index, n_features)?;

        let polarity = Polarity::from_sign(self.polarity).ok_or_else(|| {
            AdaboostError::InvalidState(format!(
                "member {} has polarity {}, expected 1 or -1",
                index, self.polarity
            ))
        })?;

        if !self.threshold.is_finite() || !self.alpha.is_finite() {
            return Err(AdaboostError::InvalidState(format!(
                "member {} has threshold {} and alpha {}, both must be finite",
                index, self.threshold, self.alpha
            )));
        }

        Ok(EnsembleMember::new(
            DecisionStump::new(self.feature_index, self.threshold, polarity),
            self.alpha,
        ))
    }
}

impl<F: Float> Adaboost<F, DecisionStump<F>> {
    /// Exports the ensemble as a plain record
    pub fn to_state(&self) -> AdaboostRecord<F> {
        let members = self
            .members()
            .iter()
            .map(|member| {
                let stump = member.learner();
                StumpRecord {
                    feature_index: stump.feature_index(),
                    threshold: stump.threshold(),
                    polarity: stump.polarity().as_sign(),
                    alpha: member.alpha(),
                }
            })
            .collect();

        AdaboostRecord {
            n_estimators: self.n_estimators(),
            n_features: self.n_features(),
            members,
        }
    }

    /// Rebuilds a trained ensemble from a record
    ///
    /// Fails with `InvalidState` if the record could not have been produced by a fit: a member
    /// count different from `n_estimators`, no features, a member splitting on a feature the
    /// model does not have, a polarity other than `1` or `-1`, or a non-finite number.
    pub fn from_state(record: AdaboostRecord<F>) -> Result<Self> {
        let AdaboostRecord {
            n_estimators,
            n_features,
            members,
        } = record;

        if members.len() != n_estimators {
            return Err(AdaboostError::InvalidState(format!(
                "record lists {} members for {} estimators",
                members.len(),
                n_estimators
            )));
        }
        if n_features == 0 {
            return Err(AdaboostError::InvalidState(
                "record was trained on zero features".to_string(),
            ));
        }

        let members = members
            .into_iter()
            .enumerate()
            .map(|(index, member)| member.into_member(index, n_features))
            .collect::<Result<Vec<_>>>()?;

        Ok(Adaboost::from_members(members, n_features))
    }
}

impl<F: Float> AdaboostClassifier<F, DecisionStump<F>> {
    /// Exports the trained ensemble, fails with `ModelNotFitted` before the first fit
    pub fn to_state(&self) -> Result<AdaboostRecord<F>> {
        Ok(self.model()?.to_state())
    }

    /// A trained classifier predicting with the ensemble stored in `record`
    ///
    /// The configuration is the default one with the record's round count, so fitting the
    /// classifier again trains an ensemble of the same size.
    pub fn from_state(record: AdaboostRecord<F>) -> Result<Self> {
        let model = Adaboost::from_state(record)?;
        let params = AdaboostParams::new().n_estimators(model.n_estimators());

        Ok(AdaboostClassifier::from_model(params, model))
    }
}

#[cfg(feature = "serde")]
impl<F> AdaboostRecord<F>
where
    F: Float + Serialize + for<'de> Deserialize<'de>,
{
    /// Encodes the record as JSON text
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes a record from JSON text, the record is validated once it is turned into a model
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
