//! Test suite for variable elimination.

use super::*;
use crate::space::PartialAssignment;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const EPS: f64 = 1e-9;

fn rule<const N: usize>(pairs: [(usize, usize); N], value: f64) -> QFunctionRule {
    QFunctionRule::for_action(PartialAssignment::from_pairs(pairs), value)
}

/// Value of a full joint action: sum of every compatible rule.
fn evaluate(rules: &[QFunctionRule], action: &[usize]) -> f64 {
    let a = PartialAssignment::full(action);
    rules
        .iter()
        .filter(|r| r.action.is_compatible(&a))
        .map(|r| r.value)
        .sum()
}

/// Exhaustive maximum over every joint action.
fn brute_force(actions: &Factors, rules: &[QFunctionRule]) -> f64 {
    let keys: Vec<usize> = (0..actions.len()).collect();
    Enumerator::new(actions, &keys)
        .map(|a| evaluate(rules, &a))
        .fold(f64::NEG_INFINITY, f64::max)
}

fn random_rules(rng: &mut StdRng, actions: &Factors, count: usize, max_scope: usize) -> Vec<QFunctionRule> {
    (0..count)
        .map(|_| {
            let mut a = PartialAssignment::new();
            let width = rng.gen_range(0..=max_scope);
            for _ in 0..width {
                let agent = rng.gen_range(0..actions.len());
                let size = actions.size(agent).unwrap_or(1);
                a.insert(agent, rng.gen_range(0..size));
            }
            QFunctionRule::for_action(a, rng.gen_range(-5.0..5.0))
        })
        .collect()
}

fn all_orders() -> Vec<EliminationOrder> {
    vec![
        EliminationOrder::Sequential,
        EliminationOrder::MinDegree,
        EliminationOrder::Random { seed: 3 },
        EliminationOrder::Random { seed: 99 },
        EliminationOrder::Custom(vec![2, 0]),
    ]
}

#[cfg(test)]
mod basic_cases {
    use super::*;

    #[test]
    fn test_no_rules_returns_zero_action() {
        let actions = Factors::new(vec![3, 2, 4]);
        let solution = VariableElimination::new(&actions).solve(&[]);
        assert_eq!(solution.action, vec![0, 0, 0]);
        assert_eq!(solution.value, 0.0);
        assert_eq!(solution.induced_width, 0);
    }

    #[test]
    fn test_single_agent_picks_best_action() {
        let actions = Factors::new(vec![3]);
        let rules = vec![rule([(0, 0)], 1.0), rule([(0, 2)], 4.0), rule([(0, 1)], -1.0)];
        let solution = VariableElimination::new(&actions).solve(&rules);
        assert_eq!(solution.action, vec![2]);
        assert_eq!(solution.value, 4.0);
    }

    #[test]
    fn test_ties_keep_first_action() {
        let actions = Factors::new(vec![2, 2]);
        let rules = vec![rule([(0, 0)], 0.0), rule([(1, 0)], 0.0)];
        let solution = VariableElimination::new(&actions).solve(&rules);
        assert_eq!(solution.action, vec![0, 0]);
        assert_eq!(solution.value, 0.0);
    }

    #[test]
    fn test_negative_rules_are_avoided() {
        // Every rule is a penalty; the unmentioned action 1 scores 0.
        let actions = Factors::new(vec![2]);
        let rules = vec![rule([(0, 0)], -2.0)];
        let solution = VariableElimination::new(&actions).solve(&rules);
        assert_eq!(solution.action, vec![1]);
        assert_eq!(solution.value, 0.0);
    }

    #[test]
    fn test_unreferenced_agent_is_fixed_to_zero() {
        let actions = Factors::new(vec![2, 5, 2]);
        let rules = vec![rule([(0, 1), (2, 1)], 2.0)];
        let solution = VariableElimination::new(&actions).solve(&rules);
        assert_eq!(solution.action, vec![1, 0, 1]);
        assert_eq!(solution.value, 2.0);
    }

    #[test]
    fn test_empty_scope_rule_adds_constant() {
        let actions = Factors::new(vec![2]);
        let rules = vec![rule([], 1.5), rule([(0, 1)], 1.0)];
        let solution = VariableElimination::new(&actions).solve(&rules);
        assert_eq!(solution.action, vec![1]);
        assert!((solution.value - 2.5).abs() < EPS);
    }

    #[test]
    fn test_coordination_beats_local_greed() {
        // Individually each agent prefers 0, but jointly (1, 1) wins.
        let actions = Factors::new(vec![2, 2]);
        let rules = vec![
            rule([(0, 0)], 1.0),
            rule([(1, 0)], 1.0),
            rule([(0, 1), (1, 1)], 5.0),
        ];
        let solution = VariableElimination::new(&actions).solve(&rules);
        assert_eq!(solution.action, vec![1, 1]);
        assert_eq!(solution.value, 5.0);
    }

    #[test]
    fn test_chain_has_width_one_under_min_degree() {
        let actions = Factors::new(vec![2; 6]);
        let rules: Vec<QFunctionRule> = (0..5)
            .map(|i| rule([(i, 1), (i + 1, 1)], 1.0))
            .collect();
        let solution = VariableElimination::new(&actions)
            .with_order(EliminationOrder::MinDegree)
            .solve(&rules);
        assert_eq!(solution.induced_width, 1);
        assert_eq!(solution.action, vec![1; 6]);
        assert_eq!(solution.value, 5.0);
    }
}

#[cfg(test)]
mod optimality {
    use super::*;

    #[test]
    fn test_matches_brute_force_on_small_spaces() {
        let mut rng = StdRng::seed_from_u64(2024);
        for trial in 0..40 {
            let actions = Factors::new(vec![2, 3, 2, 2]);
            let rules = random_rules(&mut rng, &actions, 10, 3);
            let expected = brute_force(&actions, &rules);

            for order in all_orders() {
                let solution = VariableElimination::new(&actions)
                    .with_order(order.clone())
                    .solve(&rules);
                assert!(
                    (solution.value - expected).abs() < EPS,
                    "trial {} order {:?}: {} vs {}",
                    trial,
                    order,
                    solution.value,
                    expected
                );
                // The returned action must actually achieve the reported value.
                assert!((evaluate(&rules, &solution.action) - solution.value).abs() < EPS);
            }
        }
    }

    #[test]
    fn test_three_agents_two_actions_exhaustive() {
        let actions = Factors::new(vec![2, 2, 2]);
        let rules = vec![
            rule([(0, 0), (1, 1)], 2.0),
            rule([(1, 1), (2, 0)], 3.0),
            rule([(0, 1), (2, 1)], 4.0),
            rule([(1, 0)], 1.0),
        ];
        let solution = VariableElimination::new(&actions).solve(&rules);
        assert_eq!(solution.value, brute_force(&actions, &rules));
        assert_eq!(solution.value, 5.0);
    }
}
