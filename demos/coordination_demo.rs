// Demonstration: agents on a ring learn to coordinate with their neighbors.
//
// Each agent picks one of two channels. A pair of neighbors earns 1 when
// they pick different channels and loses 1 when they collide, so the best
// joint action alternates channels around the ring.
//
// Build/run from this repo root:
//   cargo run --example coordination_demo -- --agents 6 --episodes 400 --seed 7

use std::env;

use cooprl::{Factors, PartialAssignment, QFunctionRule, SparseCooperativeQLearning};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn main() {
    let args: Vec<String> = env::args().collect();
    let agents: usize = arg_value(&args, "--agents")
        .and_then(|s| s.parse().ok())
        .unwrap_or(6);
    let episodes: usize = arg_value(&args, "--episodes")
        .and_then(|s| s.parse().ok())
        .unwrap_or(400);
    let seed: u64 = arg_value(&args, "--seed")
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    let epsilon = 0.2;

    if agents < 2 {
        eprintln!("--agents must be at least 2");
        std::process::exit(2);
    }

    let mut learner = match SparseCooperativeQLearning::new(
        Factors::default(),
        Factors::new(vec![2; agents]),
        0.9,
        0.1,
    ) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    // One rule per neighbor pair and joint channel choice.
    for i in 0..agents {
        let j = (i + 1) % agents;
        for ci in 0..2 {
            for cj in 0..2 {
                let action = PartialAssignment::from_pairs([(i, ci), (j, cj)]);
                learner.insert_rule(QFunctionRule::for_action(action, 0.0));
            }
        }
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut action = vec![0; agents];
    for _ in 0..episodes {
        // Exploration lives in the control loop, not in the learner.
        for a in action.iter_mut() {
            if rng.gen_bool(epsilon) {
                *a = rng.gen_range(0..2);
            }
        }
        let rewards = ring_rewards(&action);
        action = learner.step_update_q(&[], &action, &[], &rewards);
    }

    let greedy = learner.greedy_action(&[]);
    let team: f64 = ring_rewards(&greedy.action).iter().sum();
    println!("Agents: {}", agents);
    println!("Rules: {}", learner.rule_count());
    println!("Greedy joint action: {:?}", greedy.action);
    println!("Estimated Q: {:.3}", greedy.value);
    println!("Team reward: {:.1}", team);
    println!("Induced width: {}", greedy.induced_width);
}

/// Per-agent reward: half of each adjacent pair's payoff.
fn ring_rewards(action: &[usize]) -> Vec<f64> {
    let n = action.len();
    let mut rewards = vec![0.0; n];
    for i in 0..n {
        let j = (i + 1) % n;
        let pair = if action[i] != action[j] { 1.0 } else { -1.0 };
        rewards[i] += pair / 2.0;
        rewards[j] += pair / 2.0;
    }
    rewards
}

fn arg_value<'a>(args: &'a [String], key: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
}
