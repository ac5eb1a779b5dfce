use super::index::{IndexStrategy, RuleId, RuleIndex};
use super::rule::QFunctionRule;
use crate::space::{Factors, PartialAssignment};

/// Indexed container of [`QFunctionRule`]s.
///
/// Rules are indexed under the join of their state scope and action scope
/// (agent `g` maps to key `state_space.len() + g`), so a query only touches
/// the index entries of the variables it specifies.
///
/// # Invariants
///
/// - Every inserted rule is returned by exactly the queries compatible with it
/// - Rules are never removed and their scopes never change; only `value` is
///   mutable, through [`value_mut`](Self::value_mut)
/// - [`RuleId`]s are dense and follow insertion order
///
/// # Examples
///
/// ```
/// use cooprl::rules::{QFunctionRule, RuleStore};
/// use cooprl::space::{Factors, PartialAssignment};
///
/// let mut store = RuleStore::new(Factors::new(vec![2]), Factors::new(vec![2, 2]));
/// store.insert(QFunctionRule::new(
///     PartialAssignment::from_pairs([(0, 1)]),
///     PartialAssignment::from_pairs([(1, 0)]),
///     2.0,
/// ));
///
/// let hits = store.filter(&PartialAssignment::full(&[1]), &PartialAssignment::new());
/// assert_eq!(hits.len(), 1);
///
/// let misses = store.filter(&PartialAssignment::full(&[0]), &PartialAssignment::new());
/// assert!(misses.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct RuleStore {
    state_space: Factors,
    action_space: Factors,
    rules: Vec<QFunctionRule>,
    index: RuleIndex,
}

impl RuleStore {
    /// Creates an empty store using the default [`IndexStrategy`].
    pub fn new(state_space: Factors, action_space: Factors) -> Self {
        Self::with_strategy(state_space, action_space, IndexStrategy::default())
    }

    pub fn with_strategy(
        state_space: Factors,
        action_space: Factors,
        strategy: IndexStrategy,
    ) -> Self {
        Self {
            state_space,
            action_space,
            rules: Vec::new(),
            index: RuleIndex::new(strategy),
        }
    }

    /// Adds a rule and returns its handle.
    ///
    /// Rules with identical scopes are kept as separate additive terms.
    pub fn insert(&mut self, rule: QFunctionRule) -> RuleId {
        let id = RuleId(self.rules.len());
        let scope = self.joined(&rule.state, &rule.action);
        self.index.insert(id, &scope);
        self.rules.push(rule);
        id
    }

    /// Returns every rule compatible with the given state and action.
    ///
    /// Either assignment may be partial; an empty action matches every
    /// action scope. The result borrows the store and can be iterated any
    /// number of times.
    ///
    /// The index is walked once, up front, and the matching ids are kept;
    /// only the rule lookups are deferred to iteration. The walk costs time
    /// in the number of index entries compatible with the query, not in
    /// the size of the store.
    pub fn filter(&self, state: &PartialAssignment, action: &PartialAssignment) -> Matches<'_> {
        let query = self.joined(state, action);
        Matches {
            store: self,
            ids: self.index.query(&query),
        }
    }

    pub fn get(&self, id: RuleId) -> Option<&QFunctionRule> {
        self.rules.get(id.0)
    }

    /// Mutable access to a rule's value. Scopes cannot be changed.
    pub fn value_mut(&mut self, id: RuleId) -> Option<&mut f64> {
        self.rules.get_mut(id.0).map(|r| &mut r.value)
    }

    /// Iterates all rules in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &QFunctionRule> + '_ {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn state_space(&self) -> &Factors {
        &self.state_space
    }

    pub fn action_space(&self) -> &Factors {
        &self.action_space
    }

    pub fn strategy(&self) -> IndexStrategy {
        self.index.strategy()
    }

    fn joined(&self, state: &PartialAssignment, action: &PartialAssignment) -> PartialAssignment {
        PartialAssignment::join(state, action, self.state_space.len())
    }
}

/// Result of [`RuleStore::filter`]: handles to matching rules, in insertion order.
///
/// The id list is computed when the view is created. Iterating it resolves
/// each id against the borrowed store, so values are read live and never
/// copied.
#[derive(Debug, Clone)]
pub struct Matches<'a> {
    store: &'a RuleStore,
    ids: Vec<RuleId>,
}

impl<'a> Matches<'a> {
    /// Iterates the matching rules.
    pub fn iter(&self) -> impl Iterator<Item = &'a QFunctionRule> + '_ {
        let store = self.store;
        self.ids.iter().filter_map(move |&id| store.get(id))
    }

    pub fn ids(&self) -> &[RuleId] {
        &self.ids
    }

    /// Releases the borrow on the store, keeping only the handles.
    pub fn into_ids(self) -> Vec<RuleId> {
        self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Sum of the matching rules' values.
    pub fn total_value(&self) -> f64 {
        self.iter().map(|r| r.value).sum()
    }
}

impl<'m, 'a> IntoIterator for &'m Matches<'a> {
    type Item = &'a QFunctionRule;
    type IntoIter = Box<dyn Iterator<Item = &'a QFunctionRule> + 'm>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
