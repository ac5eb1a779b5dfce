use std::fmt;

use thiserror::Error;

/// Tunable learner parameters that are range-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hyperparameter {
    Discount,
    LearningRate,
}

impl fmt::Display for Hyperparameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hyperparameter::Discount => write!(f, "Discount parameter"),
            Hyperparameter::LearningRate => write!(f, "Learning rate parameter"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LearnerError {
    #[error("{parameter} must be in (0,1], got {value}")]
    InvalidConfiguration {
        parameter: Hyperparameter,
        value: f64,
    },
}

/// Checks that `value` lies in `(0, 1]`. NaN is rejected.
pub(crate) fn check_unit_interval(parameter: Hyperparameter, value: f64) -> Result<f64, LearnerError> {
    if value > 0.0 && value <= 1.0 {
        Ok(value)
    } else {
        Err(LearnerError::InvalidConfiguration { parameter, value })
    }
}
