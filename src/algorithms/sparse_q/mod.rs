//! Sparse cooperative Q-learning.
//!
//! The learner keeps a factored Q-function as a [`RuleStore`](crate::rules::RuleStore)
//! of local payoff rules and updates it from single transitions. Each step:
//!
//! 1. picks the greedy next joint action with variable elimination over the
//!    rules matching the successor state;
//! 2. gathers the rules matching the taken `(state, action)` and the
//!    greedy `(next_state, next_action)`;
//! 3. builds a per-agent TD error from each agent's share of those rules;
//! 4. moves every rule matching `(state, action)` by the learning rate
//!    times the summed TD errors of its agents.
//!
//! Exploration is left to the caller: the returned action is always greedy.

mod config;
mod error;
mod learner;


pub use config::LearnerConfig;
pub use error::{Hyperparameter, LearnerError};
pub use learner::SparseCooperativeQLearning;
