//! cooprl - Sparse cooperative Q-learning for multi-agent systems
//!
//! A factored joint action-value function stored as sparse local payoff
//! rules, an indexed rule store, and exact max-sum variable elimination for
//! selecting joint actions without enumerating the joint action space.

pub mod algorithms;
pub mod rules;
pub mod space;

// Re-export the learner surface for ergonomic use
pub use algorithms::{LearnerConfig, LearnerError, SparseCooperativeQLearning};
pub use rules::{QFunctionRule, RuleStore};
pub use space::{Factors, PartialAssignment};
