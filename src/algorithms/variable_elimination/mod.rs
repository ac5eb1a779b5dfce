//! Exact max-sum variable elimination over a coordination graph.
//!
//! Finds the joint action maximizing the sum of agent-scoped payoff rules
//! without enumerating the joint action space. Running time is exponential
//! only in the induced width of the elimination order.
//!
//! # Algorithm
//!
//! 1. Rules are folded into dense factors, one per distinct agent scope.
//! 2. Agents are eliminated one at a time, in the configured
//!    [`EliminationOrder`]. Eliminating agent `g`:
//!    - collects every active factor mentioning `g`;
//!    - for each assignment to the other agents in those factors (the
//!      separator), maximizes the collected sum over `g`'s actions;
//!    - replaces the collected factors with one factor over the separator,
//!      and records the best action of `g` per separator assignment.
//! 3. Once every agent is gone, the remaining constant factors sum to the
//!    optimum.
//! 4. Records are replayed in reverse to fix each agent's action.
//!
//! Ties keep the first maximal action found, so results are deterministic
//! for a given order. An agent no rule mentions is fixed to action 0.
//!
//! # Module Structure
//!
//! - [`graph`] - Coordination graph, used to compute min-degree orderings
//! - [`order`] - Elimination orderings
//! - `factor` - Dense payoff tables built from rules

mod factor;
pub mod graph;
pub mod order;

use crate::rules::QFunctionRule;
use crate::space::{Enumerator, Factors};

use factor::{factors_from_rules, Factor};

pub use graph::CoordinationGraph;
pub use order::EliminationOrder;

/// Result of a variable elimination run.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Maximizing joint action, one entry per agent.
    pub action: Vec<usize>,
    /// Sum of the values of every rule compatible with `action`.
    pub value: f64,
    /// Largest separator produced during elimination.
    pub induced_width: usize,
}

/// Best action of one eliminated agent for every assignment of its separator.
#[derive(Debug, Clone)]
struct EliminationRecord {
    agent: usize,
    separator: Vec<usize>,
    sizes: Vec<usize>,
    best: Vec<usize>,
}

/// Max-sum variable elimination solver for a joint action space.
///
/// # Examples
///
/// ```
/// use cooprl::algorithms::variable_elimination::VariableElimination;
/// use cooprl::rules::QFunctionRule;
/// use cooprl::space::{Factors, PartialAssignment};
///
/// let actions = Factors::new(vec![2, 2]);
/// let rules = vec![
///     // Agents 0 and 1 are rewarded for agreeing on action 1.
///     QFunctionRule::for_action(PartialAssignment::from_pairs([(0, 1), (1, 1)]), 3.0),
///     QFunctionRule::for_action(PartialAssignment::from_pairs([(0, 0)]), 2.0),
/// ];
///
/// let solution = VariableElimination::new(&actions).solve(&rules);
/// assert_eq!(solution.action, vec![1, 1]);
/// assert_eq!(solution.value, 3.0);
/// ```
#[derive(Debug, Clone)]
pub struct VariableElimination<'a> {
    actions: &'a Factors,
    order: EliminationOrder,
}

impl<'a> VariableElimination<'a> {
    /// Creates a solver using the default [`EliminationOrder`].
    pub fn new(actions: &'a Factors) -> Self {
        Self {
            actions,
            order: EliminationOrder::default(),
        }
    }

    pub fn with_order(mut self, order: EliminationOrder) -> Self {
        self.order = order;
        self
    }

    pub fn order(&self) -> &EliminationOrder {
        &self.order
    }

    /// Computes the joint action maximizing the summed value of `rules`.
    ///
    /// Only the action scope of each rule is considered; rules are expected
    /// to be already filtered for the current state.
    pub fn solve<'r, I>(&self, rules: I) -> Solution
    where
        I: IntoIterator<Item = &'r QFunctionRule>,
    {
        let agents = self.actions.len();
        let mut active = factors_from_rules(rules, self.actions);
        let order = self
            .order
            .resolve(agents, active.iter().map(Factor::scope));

        let mut records = Vec::with_capacity(agents);
        let mut induced_width = 0;
        for agent in order {
            let record = self.eliminate(&mut active, agent);
            induced_width = induced_width.max(record.separator.len());
            log::trace!(
                "eliminated agent {} with separator {:?}",
                record.agent,
                record.separator
            );
            records.push(record);
        }

        let value: f64 = active.iter().map(Factor::constant).sum();

        let mut action = vec![0; agents];
        for record in records.iter().rev() {
            let fixed: Vec<usize> = record.separator.iter().map(|&a| action[a]).collect();
            action[record.agent] = record.best[Enumerator::index_of(&record.sizes, &fixed)];
        }

        Solution {
            action,
            value,
            induced_width,
        }
    }

    /// Maximizes `agent` out of every active factor mentioning it.
    fn eliminate(&self, active: &mut Vec<Factor>, agent: usize) -> EliminationRecord {
        let (collected, rest): (Vec<Factor>, Vec<Factor>) =
            active.drain(..).partition(|f| f.mentions(agent));
        *active = rest;

        if collected.is_empty() {
            return EliminationRecord {
                agent,
                separator: Vec::new(),
                sizes: Vec::new(),
                best: vec![0],
            };
        }

        let mut separator: Vec<usize> = collected
            .iter()
            .flat_map(|f| f.scope().iter().copied())
            .filter(|&a| a != agent)
            .collect();
        separator.sort_unstable();
        separator.dedup();

        // Slot layout of `combined`: separator values, then the agent's value.
        let agent_slot = separator.len();
        let positions: Vec<Vec<usize>> = collected
            .iter()
            .map(|f| {
                f.scope()
                    .iter()
                    .map(|&a| separator.binary_search(&a).unwrap_or(agent_slot))
                    .collect()
            })
            .collect();

        let agent_size = self.actions.size(agent).unwrap_or(0);
        let assignments = Enumerator::new(self.actions, &separator);
        let sizes = assignments.sizes().to_vec();
        let total = assignments.count_total();
        let mut table = Vec::with_capacity(total);
        let mut best = Vec::with_capacity(total);

        for values in assignments {
            let mut combined = values;
            combined.push(0);

            let mut best_value = f64::NEG_INFINITY;
            let mut best_action = 0;
            for x in 0..agent_size {
                combined[agent_slot] = x;
                let sum: f64 = collected
                    .iter()
                    .zip(&positions)
                    .map(|(f, pos)| f.at(&combined, pos))
                    .sum();
                if sum > best_value {
                    best_value = sum;
                    best_action = x;
                }
            }
            table.push(best_value);
            best.push(best_action);
        }

        active.push(Factor::from_table(separator.clone(), sizes.clone(), table));
        EliminationRecord {
            agent,
            separator,
            sizes,
            best,
        }
    }
}

#[cfg(test)]
mod tests;
