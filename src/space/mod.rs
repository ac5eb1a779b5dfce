//! Discrete factored state and action spaces.
//!
//! A state is a vector of factor values and a joint action is a vector of
//! per-agent choices. Both are described by a [`Factors`] list of
//! cardinalities. Rules and queries refer to subsets of those factors
//! through [`PartialAssignment`]s.

mod assignment;
mod enumerate;
mod factors;

pub use assignment::PartialAssignment;
pub use enumerate::Enumerator;
pub use factors::Factors;

/// Descriptor of a factored state space.
pub type StateSpace = Factors;

/// Descriptor of a joint action space (one cardinality per agent).
pub type ActionSpace = Factors;
