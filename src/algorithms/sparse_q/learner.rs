//! Online update step of sparse cooperative Q-learning.

use super::config::LearnerConfig;
use super::error::{check_unit_interval, Hyperparameter, LearnerError};
use crate::algorithms::variable_elimination::{EliminationOrder, Solution, VariableElimination};
use crate::rules::{QFunctionRule, RuleId, RuleStore};
use crate::space::{Factors, PartialAssignment};

/// Cooperative Q-learner over a sparse set of local payoff rules.
///
/// The joint action-value function is the sum of every [`QFunctionRule`]
/// compatible with a state/action pair. Each update adjusts only the rules
/// that matched the transition, splitting each rule's value evenly across
/// the agents it involves to build per-agent temporal-difference errors.
///
/// # Examples
///
/// ```
/// use cooprl::algorithms::sparse_q::SparseCooperativeQLearning;
/// use cooprl::rules::QFunctionRule;
/// use cooprl::space::{Factors, PartialAssignment};
///
/// let mut learner =
///     SparseCooperativeQLearning::new(Factors::default(), Factors::new(vec![2, 2]), 0.9, 0.5)
///         .unwrap();
/// learner.insert_rule(QFunctionRule::for_action(PartialAssignment::from_pairs([(0, 0)]), 0.0));
/// learner.insert_rule(QFunctionRule::for_action(PartialAssignment::from_pairs([(1, 0)]), 0.0));
///
/// let next = learner.step_update_q(&[], &[0, 0], &[], &[1.0, 1.0]);
/// assert_eq!(next, vec![0, 0]);
/// assert!(learner.rules().iter().all(|r| r.value == 0.5));
/// ```
#[derive(Debug, Clone)]
pub struct SparseCooperativeQLearning {
    discount: f64,
    learning_rate: f64,
    elimination: EliminationOrder,
    rules: RuleStore,
}

impl SparseCooperativeQLearning {
    /// Creates a learner with no rules.
    ///
    /// # Errors
    ///
    /// [`LearnerError::InvalidConfiguration`] if `discount` or `learning_rate`
    /// is outside `(0, 1]`.
    pub fn new(
        state_space: Factors,
        action_space: Factors,
        discount: f64,
        learning_rate: f64,
    ) -> Result<Self, LearnerError> {
        Self::with_config(
            state_space,
            action_space,
            LearnerConfig::new(discount, learning_rate),
        )
    }

    pub fn with_config(
        state_space: Factors,
        action_space: Factors,
        config: LearnerConfig,
    ) -> Result<Self, LearnerError> {
        config.validate()?;
        Ok(Self {
            discount: config.discount,
            learning_rate: config.learning_rate,
            elimination: config.elimination,
            rules: RuleStore::with_strategy(state_space, action_space, config.index),
        })
    }

    pub fn insert_rule(&mut self, rule: QFunctionRule) -> RuleId {
        self.rules.insert(rule)
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Read-only view of every rule.
    pub fn rules(&self) -> &RuleStore {
        &self.rules
    }

    pub fn state_space(&self) -> &Factors {
        self.rules.state_space()
    }

    pub fn action_space(&self) -> &Factors {
        self.rules.action_space()
    }

    pub fn discount(&self) -> f64 {
        self.discount
    }

    /// Sets the discount factor. On error the previous value is kept.
    pub fn set_discount(&mut self, discount: f64) -> Result<(), LearnerError> {
        self.discount = checked(Hyperparameter::Discount, discount)?;
        Ok(())
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Sets the learning rate. On error the previous value is kept.
    pub fn set_learning_rate(&mut self, learning_rate: f64) -> Result<(), LearnerError> {
        self.learning_rate = checked(Hyperparameter::LearningRate, learning_rate)?;
        Ok(())
    }

    pub fn elimination_order(&self) -> &EliminationOrder {
        &self.elimination
    }

    pub fn set_elimination_order(&mut self, order: EliminationOrder) {
        self.elimination = order;
    }

    /// Current estimate of `Q(s, a)`: the summed value of compatible rules.
    pub fn q_value(&self, state: &[usize], action: &[usize]) -> f64 {
        self.rules
            .filter(&PartialAssignment::full(state), &PartialAssignment::full(action))
            .total_value()
    }

    /// Joint action maximizing the current estimate in `state`.
    pub fn greedy_action(&self, state: &[usize]) -> Solution {
        let candidates = self
            .rules
            .filter(&PartialAssignment::full(state), &PartialAssignment::new());
        VariableElimination::new(self.rules.action_space())
            .with_order(self.elimination.clone())
            .solve(&candidates)
    }

    /// Learns from one transition and returns the greedy action for `next_state`.
    ///
    /// For every rule `r` matching `(state, action)`:
    ///
    /// ```text
    /// δ = Σ_{g ∈ r.agents} rewards[g] + γ·Q_g(next_state, a*) − Q_g(state, action)
    /// r.value += α·δ
    /// ```
    ///
    /// where `a*` is the returned action and `Q_g` sums each matching rule's
    /// value divided by its number of agents, over the rules involving `g`.
    /// Rules are updated in insertion order and later rules see the new
    /// values of earlier ones.
    ///
    /// # Panics
    ///
    /// If `rewards` does not hold exactly one entry per agent.
    pub fn step_update_q(
        &mut self,
        state: &[usize],
        action: &[usize],
        next_state: &[usize],
        rewards: &[f64],
    ) -> Vec<usize> {
        assert_eq!(
            rewards.len(),
            self.action_space().len(),
            "expected one reward per agent"
        );

        let next = self.greedy_action(next_state);

        let before = self
            .rules
            .filter(&PartialAssignment::full(state), &PartialAssignment::full(action))
            .into_ids();
        let after = self
            .rules
            .filter(
                &PartialAssignment::full(next_state),
                &PartialAssignment::full(&next.action),
            )
            .into_ids();

        for &id in &before {
            let Some(rule) = self.rules.get(id) else {
                continue;
            };
            let delta: f64 = rule
                .agents()
                .iter()
                .map(|&agent| {
                    let reward = rewards.get(agent).copied().unwrap_or(0.0);
                    reward + self.discount * local_q(&self.rules, agent, &after)
                        - local_q(&self.rules, agent, &before)
                })
                .sum();
            if let Some(value) = self.rules.value_mut(id) {
                *value += self.learning_rate * delta;
            }
        }

        log::debug!(
            "updated {} rules; next action {:?} (estimated value {})",
            before.len(),
            next.action,
            next.value
        );
        next.action
    }
}

fn checked(parameter: Hyperparameter, value: f64) -> Result<f64, LearnerError> {
    check_unit_interval(parameter, value)
        .inspect_err(|e| log::warn!("rejected hyperparameter: {}", e))
}

/// Share of `agent` in the rules `ids`: each rule involving the agent
/// contributes its value divided by its number of agents.
fn local_q(rules: &RuleStore, agent: usize, ids: &[RuleId]) -> f64 {
    ids.iter()
        .filter_map(|&id| rules.get(id))
        .filter(|r| r.involves(agent))
        .map(|r| r.value / r.agents().len() as f64)
        .sum()
}
