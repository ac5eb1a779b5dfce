//! Elimination orderings.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::graph::CoordinationGraph;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Order in which agents are eliminated.
///
/// Every order gives the same maximum value; they differ in the size of
/// the intermediate factors, and so in running time. Argmax ties may be
/// resolved differently under different orders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EliminationOrder {
    /// Agents in index order.
    Sequential,
    /// Greedy min-degree on the coordination graph, lowest index on ties.
    #[default]
    MinDegree,
    /// Seeded random permutation, reproducible for a given seed.
    Random { seed: u64 },
    /// Listed agents first; unlisted agents follow in index order.
    /// Duplicates and out-of-range entries are ignored.
    Custom(Vec<usize>),
}

impl EliminationOrder {
    /// Resolves the order for `agents` agents whose rules have the given scopes.
    pub fn resolve<'s, I>(&self, agents: usize, scopes: I) -> Vec<usize>
    where
        I: IntoIterator<Item = &'s [usize]>,
    {
        match self {
            EliminationOrder::Sequential => (0..agents).collect(),
            EliminationOrder::MinDegree => CoordinationGraph::new(agents, scopes).min_degree_order(),
            EliminationOrder::Random { seed } => {
                let mut order: Vec<usize> = (0..agents).collect();
                order.shuffle(&mut StdRng::seed_from_u64(*seed));
                order
            }
            EliminationOrder::Custom(listed) => {
                let mut seen = vec![false; agents];
                let mut order = Vec::with_capacity(agents);
                for a in listed.iter().copied().chain(0..agents) {
                    if a < agents && !seen[a] {
                        seen[a] = true;
                        order.push(a);
                    }
                }
                order
            }
        }
    }
}
