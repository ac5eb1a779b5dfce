//! End-to-end scenarios driving the learner the way a control loop would.

use cooprl::algorithms::variable_elimination::EliminationOrder;
use cooprl::rules::IndexStrategy;
use cooprl::{Factors, LearnerConfig, PartialAssignment, QFunctionRule, SparseCooperativeQLearning};

fn pa<const N: usize>(pairs: [(usize, usize); N]) -> PartialAssignment {
    PartialAssignment::from_pairs(pairs)
}

#[test]
fn stateless_two_agent_transition() {
    let mut learner =
        SparseCooperativeQLearning::new(Factors::default(), Factors::new(vec![2, 2]), 0.9, 0.5)
            .unwrap();
    learner.insert_rule(QFunctionRule::for_action(pa([(0, 0)]), 0.0));
    learner.insert_rule(QFunctionRule::for_action(pa([(1, 0)]), 0.0));

    let next = learner.step_update_q(&[], &[0, 0], &[], &[1.0, 1.0]);

    assert_eq!(next, vec![0, 0]);
    let values: Vec<f64> = learner.rules().iter().map(|r| r.value).collect();
    assert_eq!(values, vec![0.5, 0.5]);
}

/// Coordination game: both agents must pick action 1 together to earn the
/// team reward; miscoordination is penalized. Rules cover every pairwise
/// joint action, so the learner has to discover the joint optimum.
#[test]
fn learns_to_coordinate_on_joint_reward() {
    for index in [IndexStrategy::ScopeTrie, IndexStrategy::ScopeGroups] {
        let config = LearnerConfig {
            index,
            elimination: EliminationOrder::MinDegree,
            ..LearnerConfig::new(0.5, 0.3)
        };
        let mut learner =
            SparseCooperativeQLearning::with_config(Factors::default(), Factors::new(vec![2, 2]), config)
                .unwrap();
        for a0 in 0..2 {
            for a1 in 0..2 {
                learner.insert_rule(QFunctionRule::for_action(pa([(0, a0), (1, a1)]), 0.0));
            }
        }

        let reward = |a: &[usize]| -> Vec<f64> {
            match (a[0], a[1]) {
                (1, 1) => vec![1.0, 1.0],
                (0, 0) => vec![0.2, 0.2],
                _ => vec![-1.0, -1.0],
            }
        };

        // Try every joint action a few times, as an exploring control loop would.
        for _ in 0..30 {
            for a in [[0, 0], [0, 1], [1, 0], [1, 1]] {
                learner.step_update_q(&[], &a, &[], &reward(&a));
            }
        }

        let greedy = learner.greedy_action(&[]);
        assert_eq!(greedy.action, vec![1, 1], "index {:?}", index);
        assert!(learner.q_value(&[], &[1, 1]) > learner.q_value(&[], &[0, 0]));
    }
}

/// State-dependent rules: the best action flips with the state factor.
#[test]
fn greedy_action_follows_state() {
    let mut learner =
        SparseCooperativeQLearning::new(Factors::new(vec![2]), Factors::new(vec![2]), 0.9, 0.5)
            .unwrap();
    for s in 0..2 {
        for a in 0..2 {
            learner.insert_rule(QFunctionRule::new(pa([(0, s)]), pa([(0, a)]), 0.0));
        }
    }

    // Action matches state → reward 1, otherwise 0. The state alternates and
    // the action switches every two steps, so every pair gets visited.
    let mut state = 0;
    for step in 0..200 {
        let action = (step / 2) % 2;
        let r = if action == state { 1.0 } else { 0.0 };
        let next_state = 1 - state;
        learner.step_update_q(&[state], &[action], &[next_state], &[r]);
        state = next_state;
    }

    assert_eq!(learner.greedy_action(&[0]).action, vec![0]);
    assert_eq!(learner.greedy_action(&[1]).action, vec![1]);
}

#[cfg(feature = "serde")]
#[test]
fn rules_roundtrip_through_json() {
    let rule = QFunctionRule::new(pa([(0, 2)]), pa([(1, 0), (3, 1)]), -0.25);
    let json = serde_json::to_string(&rule).unwrap();
    let restored: QFunctionRule = serde_json::from_str(&json).unwrap();
    assert_eq!(rule, restored);

    let space = Factors::new(vec![2, 3]);
    let json = serde_json::to_string(&space).unwrap();
    let restored: Factors = serde_json::from_str(&json).unwrap();
    assert_eq!(space, restored);
}
