//! Sparse factored Q-function rules and their indexed store.
//!
//! A factored Q-function is the sum of many small [`QFunctionRule`]s, each
//! covering a few state factors and a few agents. The [`RuleStore`] keeps
//! them indexed by scope so that the rules applying to a (partial)
//! state/action pair can be found without scanning the whole set.

mod index;
mod rule;
mod store;


pub use index::{IndexStrategy, RuleId};
pub use rule::QFunctionRule;
pub use store::{Matches, RuleStore};
