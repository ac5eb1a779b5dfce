//! Coordination graph over agents.

use petgraph::stable_graph::{NodeIndex, StableUnGraph};

/// Undirected graph whose nodes are agents and whose edges join agents
/// that appear together in some rule scope.
///
/// Node indices stay stable while agents are eliminated, so the graph can
/// be consumed one agent at a time to simulate the fill-in that variable
/// elimination produces.
#[derive(Debug, Clone)]
pub struct CoordinationGraph {
    graph: StableUnGraph<usize, ()>,
    nodes: Vec<Option<NodeIndex>>,
}

impl CoordinationGraph {
    /// Builds the graph for `agents` agents, adding a clique per scope.
    ///
    /// Scope entries outside `0..agents` are ignored.
    pub fn new<'s, I>(agents: usize, scopes: I) -> Self
    where
        I: IntoIterator<Item = &'s [usize]>,
    {
        let mut graph = StableUnGraph::with_capacity(agents, 0);
        let nodes: Vec<Option<NodeIndex>> = (0..agents).map(|a| Some(graph.add_node(a))).collect();
        let mut cg = Self { graph, nodes };
        for scope in scopes {
            let members: Vec<usize> = scope.iter().copied().filter(|&a| a < agents).collect();
            cg.connect_all(&members);
        }
        cg
    }

    /// Number of agents not yet eliminated.
    pub fn agent_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn contains(&self, agent: usize) -> bool {
        self.node(agent).is_some()
    }

    /// Sorted neighbors of `agent`; empty if the agent was eliminated.
    pub fn neighbors(&self, agent: usize) -> Vec<usize> {
        let Some(n) = self.node(agent) else {
            return Vec::new();
        };
        let mut out: Vec<usize> = self
            .graph
            .neighbors(n)
            .filter_map(|m| self.graph.node_weight(m).copied())
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }

    pub fn degree(&self, agent: usize) -> usize {
        self.neighbors(agent).len()
    }

    /// Removes `agent`, connecting all of its neighbors to each other.
    ///
    /// Returns the neighbors, i.e. the separator the elimination creates.
    pub fn eliminate(&mut self, agent: usize) -> Vec<usize> {
        let separator = self.neighbors(agent);
        self.connect_all(&separator);
        if let Some(n) = self.nodes.get_mut(agent).and_then(Option::take) {
            self.graph.remove_node(n);
        }
        separator
    }

    /// Greedy min-degree elimination order; ties go to the lowest agent.
    pub fn min_degree_order(mut self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.agent_count());
        loop {
            let next = (0..self.nodes.len())
                .filter(|&a| self.contains(a))
                .min_by_key(|&a| (self.degree(a), a));
            let Some(next) = next else {
                break;
            };
            self.eliminate(next);
            order.push(next);
        }
        order
    }

    fn node(&self, agent: usize) -> Option<NodeIndex> {
        self.nodes.get(agent).copied().flatten()
    }

    fn connect_all(&mut self, agents: &[usize]) {
        for (i, &a) in agents.iter().enumerate() {
            for &b in &agents[i + 1..] {
                if let (Some(na), Some(nb)) = (self.node(a), self.node(b)) {
                    if na != nb {
                        self.graph.update_edge(na, nb, ());
                    }
                }
            }
        }
    }
}
