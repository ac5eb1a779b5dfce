//! Scope indexes backing the [`RuleStore`](super::RuleStore).
//!
//! Both strategies work on the joined key space (state factors first, then
//! agents) and answer the same question: which rules agree with a query
//! wherever both specify a value. They differ only in how the work scales.
//!
//! | Strategy      | Insert               | Query                                                        |
//! |---------------|----------------------|--------------------------------------------------------------|
//! | `ScopeTrie`   | O(scope)             | trie nodes on paths compatible with the query                |
//! | `ScopeGroups` | O(scope²) hash       | per group, one lookup on the longest specified scope prefix, then a check of the rules it returns |
//!
//! Scopes put state factors before agents, so a query with a full state
//! and no action reaches each group's state-matching rules by one lookup.

use std::collections::{BTreeMap, HashMap};

use crate::space::PartialAssignment;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable handle to a rule inside a [`RuleStore`](super::RuleStore).
///
/// Ids are assigned in insertion order starting at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuleId(pub(crate) usize);

impl RuleId {
    /// Position of the rule in insertion order.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// How a rule store organizes its scope index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum IndexStrategy {
    /// Trie over each rule's sorted joined scope. A query descends only
    /// into children whose key it leaves unset or whose value it matches.
    #[default]
    ScopeTrie,
    /// Rules grouped by their exact scope, then hashed by value prefix.
    /// Suited to many rules sharing a handful of distinct scopes.
    ScopeGroups,
}

#[derive(Debug, Clone)]
pub(crate) enum RuleIndex {
    ScopeTrie(TrieIndex),
    ScopeGroups(ScopeIndex),
}

impl RuleIndex {
    pub(crate) fn new(strategy: IndexStrategy) -> Self {
        match strategy {
            IndexStrategy::ScopeTrie => RuleIndex::ScopeTrie(TrieIndex::new()),
            IndexStrategy::ScopeGroups => RuleIndex::ScopeGroups(ScopeIndex::default()),
        }
    }

    pub(crate) fn strategy(&self) -> IndexStrategy {
        match self {
            RuleIndex::ScopeTrie(_) => IndexStrategy::ScopeTrie,
            RuleIndex::ScopeGroups(_) => IndexStrategy::ScopeGroups,
        }
    }

    /// Registers `id` under its joined scope.
    pub(crate) fn insert(&mut self, id: RuleId, scope: &PartialAssignment) {
        match self {
            RuleIndex::ScopeTrie(index) => index.insert(id, scope),
            RuleIndex::ScopeGroups(index) => index.insert(id, scope),
        }
    }

    /// Ids of every rule compatible with `query`, ascending.
    pub(crate) fn query(&self, query: &PartialAssignment) -> Vec<RuleId> {
        self.search(query).0
    }

    /// Like [`query`](Self::query), also returning how many index entries
    /// were examined.
    pub(crate) fn search(&self, query: &PartialAssignment) -> (Vec<RuleId>, usize) {
        match self {
            RuleIndex::ScopeTrie(index) => index.search(query),
            RuleIndex::ScopeGroups(index) => index.search(query),
        }
    }
}

#[derive(Debug, Clone, Default)]
struct TrieNode {
    /// Rules whose scope ends at this node.
    ids: Vec<RuleId>,
    /// Child node by next scope key, then by that key's value.
    children: BTreeMap<usize, HashMap<usize, usize>>,
}

#[derive(Debug, Clone)]
pub(crate) struct TrieIndex {
    /// Node 0 is the root (the empty scope).
    nodes: Vec<TrieNode>,
}

impl TrieIndex {
    fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
        }
    }

    fn insert(&mut self, id: RuleId, scope: &PartialAssignment) {
        let mut node = 0;
        for (key, value) in scope.iter() {
            let fresh = self.nodes.len();
            let child = *self.nodes[node]
                .children
                .entry(key)
                .or_default()
                .entry(value)
                .or_insert(fresh);
            if child == fresh {
                self.nodes.push(TrieNode::default());
            }
            node = child;
        }
        self.nodes[node].ids.push(id);
    }

    /// Returns the matching ids and the number of nodes visited.
    fn search(&self, query: &PartialAssignment) -> (Vec<RuleId>, usize) {
        let mut out = Vec::new();
        let mut visited = 0;
        let mut stack = vec![0];
        while let Some(node) = stack.pop() {
            visited += 1;
            let node = &self.nodes[node];
            out.extend_from_slice(&node.ids);
            for (key, by_value) in &node.children {
                match query.get(*key) {
                    Some(value) => stack.extend(by_value.get(&value)),
                    None => stack.extend(by_value.values()),
                }
            }
        }
        out.sort_unstable();
        (out, visited)
    }
}

#[derive(Debug, Clone)]
struct ScopeGroup {
    scope: Vec<usize>,
    /// Value tuple of every rule in the group.
    entries: Vec<(RuleId, Vec<usize>)>,
    /// `prefixes[p]` maps the values of the first `p` scope keys to entries.
    prefixes: Vec<HashMap<Vec<usize>, Vec<usize>>>,
}

impl ScopeGroup {
    fn new(scope: Vec<usize>) -> Self {
        Self {
            prefixes: vec![HashMap::new(); scope.len() + 1],
            scope,
            entries: Vec::new(),
        }
    }

    fn insert(&mut self, id: RuleId, values: &[usize]) {
        let entry = self.entries.len();
        self.entries.push((id, values.to_vec()));
        for (p, by_prefix) in self.prefixes.iter_mut().enumerate() {
            by_prefix.entry(values[..p].to_vec()).or_default().push(entry);
        }
    }

    /// Pushes matching ids into `out` and returns the number of candidates checked.
    fn search(&self, query: &PartialAssignment, out: &mut Vec<RuleId>) -> usize {
        let p = self
            .scope
            .iter()
            .take_while(|&&k| query.contains_key(k))
            .count();
        let prefix: Vec<usize> = self.scope[..p]
            .iter()
            .filter_map(|&k| query.get(k))
            .collect();
        let Some(candidates) = self.prefixes[p].get(&prefix) else {
            return 0;
        };

        let rest = &self.scope[p..];
        for &entry in candidates {
            let (id, values) = &self.entries[entry];
            let agrees = rest
                .iter()
                .zip(&values[p..])
                .all(|(&k, &v)| query.get(k).map_or(true, |q| q == v));
            if agrees {
                out.push(*id);
            }
        }
        candidates.len()
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct ScopeIndex {
    groups: Vec<ScopeGroup>,
    group_of: HashMap<Vec<usize>, usize>,
}

impl ScopeIndex {
    fn insert(&mut self, id: RuleId, scope: &PartialAssignment) {
        let key = scope.keys().to_vec();
        let group = match self.group_of.get(&key) {
            Some(&g) => g,
            None => {
                self.groups.push(ScopeGroup::new(key.clone()));
                self.group_of.insert(key, self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        self.groups[group].insert(id, scope.values());
    }

    /// Returns the matching ids and the number of groups plus candidates examined.
    fn search(&self, query: &PartialAssignment) -> (Vec<RuleId>, usize) {
        let mut out = Vec::new();
        let mut examined = self.groups.len();
        for group in &self.groups {
            examined += group.search(query, &mut out);
        }
        out.sort_unstable();
        (out, examined)
    }
}
