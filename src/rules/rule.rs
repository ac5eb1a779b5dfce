//! Local payoff rules of a factored Q-function.

use crate::space::PartialAssignment;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One additive term of a factored action-value function.
///
/// The global estimate is `Q(s, a) = Σ r.value` over every rule `r` whose
/// `state` is compatible with `s` and whose `action` is compatible with `a`.
///
/// # Examples
///
/// ```
/// use cooprl::rules::QFunctionRule;
/// use cooprl::space::PartialAssignment;
///
/// // Agents 0 and 2 both choose action 1, whatever the state.
/// let rule = QFunctionRule::new(
///     PartialAssignment::new(),
///     PartialAssignment::from_pairs([(0, 1), (2, 1)]),
///     0.5,
/// );
/// assert_eq!(rule.agents(), &[0, 2]);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QFunctionRule {
    /// State factors the rule applies to.
    pub state: PartialAssignment,
    /// Agent choices the rule applies to.
    pub action: PartialAssignment,
    /// Payoff contributed when the rule matches.
    pub value: f64,
}

impl QFunctionRule {
    pub fn new(state: PartialAssignment, action: PartialAssignment, value: f64) -> Self {
        Self {
            state,
            action,
            value,
        }
    }

    /// Rule that only depends on agent choices.
    pub fn for_action(action: PartialAssignment, value: f64) -> Self {
        Self::new(PartialAssignment::new(), action, value)
    }

    /// Sorted agents this rule involves.
    pub fn agents(&self) -> &[usize] {
        self.action.keys()
    }

    /// Returns true if the rule involves `agent`.
    pub fn involves(&self, agent: usize) -> bool {
        self.action.contains_key(agent)
    }

    /// Returns true if the rule applies to the given (partial) state and action.
    pub fn matches(&self, state: &PartialAssignment, action: &PartialAssignment) -> bool {
        self.state.is_compatible(state) && self.action.is_compatible(action)
    }
}
