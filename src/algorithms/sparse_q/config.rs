//! Configuration for the sparse cooperative Q-learner.

use super::error::{check_unit_interval, Hyperparameter, LearnerError};
use crate::algorithms::variable_elimination::EliminationOrder;
use crate::rules::IndexStrategy;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Hyperparameters and algorithm choices for [`SparseCooperativeQLearning`].
///
/// [`SparseCooperativeQLearning`]: super::SparseCooperativeQLearning
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LearnerConfig {
    /// Discount factor γ, in `(0, 1]`.
    pub discount: f64,
    /// Learning rate α, in `(0, 1]`.
    pub learning_rate: f64,
    /// Order used when selecting greedy joint actions.
    pub elimination: EliminationOrder,
    /// Index layout of the rule store.
    pub index: IndexStrategy,
}

impl LearnerConfig {
    pub fn new(discount: f64, learning_rate: f64) -> Self {
        Self {
            discount,
            learning_rate,
            ..Self::default()
        }
    }

    /// Checks both hyperparameters, discount first.
    pub fn validate(&self) -> Result<(), LearnerError> {
        check_unit_interval(Hyperparameter::Discount, self.discount)?;
        check_unit_interval(Hyperparameter::LearningRate, self.learning_rate)?;
        Ok(())
    }
}

impl Default for LearnerConfig {
    fn default() -> Self {
        Self {
            discount: 1.0,
            learning_rate: 0.1,
            elimination: EliminationOrder::MinDegree,
            index: IndexStrategy::ScopeTrie,
        }
    }
}
