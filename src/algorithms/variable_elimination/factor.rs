//! Dense payoff tables over small agent scopes.

use std::collections::BTreeMap;

use crate::rules::QFunctionRule;
use crate::space::{Enumerator, Factors};

/// Payoff table over a sorted set of agents.
///
/// `table` is laid out in [`Enumerator`] order (first agent varies fastest).
/// Assignments no rule mentions hold 0.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Factor {
    scope: Vec<usize>,
    sizes: Vec<usize>,
    table: Vec<f64>,
}

impl Factor {
    /// All-zero table over `scope`. Every agent in `scope` must exist in `actions`.
    pub(crate) fn zeros(scope: Vec<usize>, actions: &Factors) -> Self {
        let sizes: Vec<usize> = scope
            .iter()
            .map(|&a| actions.size(a).unwrap_or(0))
            .collect();
        let len = sizes.iter().product();
        Self {
            scope,
            sizes,
            table: vec![0.0; len],
        }
    }

    pub(crate) fn from_table(scope: Vec<usize>, sizes: Vec<usize>, table: Vec<f64>) -> Self {
        debug_assert_eq!(table.len(), sizes.iter().product::<usize>());
        Self {
            scope,
            sizes,
            table,
        }
    }

    pub(crate) fn scope(&self) -> &[usize] {
        &self.scope
    }

    pub(crate) fn mentions(&self, agent: usize) -> bool {
        self.scope.binary_search(&agent).is_ok()
    }

    /// Adds `value` at the entry for `values` (aligned with the scope).
    fn add(&mut self, values: &[usize], value: f64) {
        let index = Enumerator::index_of(&self.sizes, values);
        self.table[index] += value;
    }

    /// Reads the entry selected by `combined`, where `positions[i]` is the
    /// slot in `combined` holding the value of `scope[i]`.
    pub(crate) fn at(&self, combined: &[usize], positions: &[usize]) -> f64 {
        let mut index = 0;
        let mut stride = 1;
        for (&pos, &size) in positions.iter().zip(&self.sizes) {
            index += combined[pos] * stride;
            stride *= size;
        }
        self.table[index]
    }

    /// Value of an empty-scope factor.
    pub(crate) fn constant(&self) -> f64 {
        if self.scope.is_empty() {
            self.table.first().copied().unwrap_or(0.0)
        } else {
            0.0
        }
    }
}

/// Folds rules into one factor per distinct agent scope.
///
/// State scopes are ignored; callers pass rules already filtered for the
/// state. Agents outside the action space are dropped from a rule's scope,
/// since a full joint action never constrains them. A rule choosing an
/// out-of-range action can never match and is skipped.
pub(crate) fn factors_from_rules<'r, I>(rules: I, actions: &Factors) -> Vec<Factor>
where
    I: IntoIterator<Item = &'r QFunctionRule>,
{
    let mut grouped: BTreeMap<Vec<usize>, Factor> = BTreeMap::new();
    for rule in rules {
        let mut scope = Vec::with_capacity(rule.action.len());
        let mut values = Vec::with_capacity(rule.action.len());
        let mut in_range = true;
        for (agent, value) in rule.action.iter() {
            match actions.size(agent) {
                Some(size) if value < size => {
                    scope.push(agent);
                    values.push(value);
                }
                Some(_) => in_range = false,
                None => {}
            }
        }
        if !in_range {
            continue;
        }
        grouped
            .entry(scope.clone())
            .or_insert_with(|| Factor::zeros(scope, actions))
            .add(&values, rule.value);
    }
    grouped.into_values().collect()
}
