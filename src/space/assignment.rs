//! Partial assignments over factored spaces.

use std::cmp::Ordering;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A mapping from a subset of factor indices to values.
///
/// Keys are kept strictly increasing, so two assignments can be compared
/// for compatibility with a single merge walk.
///
/// # Invariants
///
/// - `keys` is sorted and has no duplicates
/// - `keys.len() == values.len()`
///
/// # Examples
///
/// ```
/// use cooprl::space::PartialAssignment;
///
/// let a = PartialAssignment::from_pairs([(2, 1), (0, 3)]);
/// assert_eq!(a.keys(), &[0, 2]);
/// assert_eq!(a.get(2), Some(1));
///
/// let b = PartialAssignment::from_pairs([(0, 3), (1, 0)]);
/// assert!(a.is_compatible(&b));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "Vec<(usize, usize)>", into = "Vec<(usize, usize)>")
)]
pub struct PartialAssignment {
    keys: Vec<usize>,
    values: Vec<usize>,
}

impl PartialAssignment {
    /// Creates an empty assignment, compatible with everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a full assignment where factor `i` takes `values[i]`.
    pub fn full(values: &[usize]) -> Self {
        Self {
            keys: (0..values.len()).collect(),
            values: values.to_vec(),
        }
    }

    /// Builds an assignment from `(key, value)` pairs in any order.
    ///
    /// When a key appears more than once, the last value wins.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut out = Self::new();
        for (k, v) in pairs {
            out.insert(k, v);
        }
        out
    }

    /// Sets `key` to `value`, replacing any previous value.
    pub fn insert(&mut self, key: usize, value: usize) {
        match self.keys.binary_search(&key) {
            Ok(pos) => self.values[pos] = value,
            Err(pos) => {
                self.keys.insert(pos, key);
                self.values.insert(pos, value);
            }
        }
    }

    /// Value assigned to `key`, if any.
    pub fn get(&self, key: usize) -> Option<usize> {
        self.keys
            .binary_search(&key)
            .ok()
            .map(|pos| self.values[pos])
    }

    pub fn contains_key(&self, key: usize) -> bool {
        self.keys.binary_search(&key).is_ok()
    }

    /// Sorted factor indices this assignment covers.
    pub fn keys(&self) -> &[usize] {
        &self.keys
    }

    /// Values aligned with [`keys`](Self::keys).
    pub fn values(&self) -> &[usize] {
        &self.values
    }

    /// Iterates `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.keys.iter().copied().zip(self.values.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns true if both assignments agree on every key they share.
    pub fn is_compatible(&self, other: &PartialAssignment) -> bool {
        let (mut i, mut j) = (0, 0);
        while i < self.keys.len() && j < other.keys.len() {
            match self.keys[i].cmp(&other.keys[j]) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    if self.values[i] != other.values[j] {
                        return false;
                    }
                    i += 1;
                    j += 1;
                }
            }
        }
        true
    }

    /// Restricts the assignment to `keys`, skipping keys it does not cover.
    pub fn project(&self, keys: &[usize]) -> PartialAssignment {
        PartialAssignment::from_pairs(
            keys.iter()
                .filter_map(|&k| self.get(k).map(|v| (k, v))),
        )
    }

    /// Joins a state assignment and an action assignment into the combined
    /// key space, where agent `g` becomes key `state_len + g`.
    ///
    /// State keys at or beyond `state_len` are kept as they are; callers
    /// are expected to pass state keys within the state space.
    pub fn join(
        state: &PartialAssignment,
        action: &PartialAssignment,
        state_len: usize,
    ) -> PartialAssignment {
        let mut out = state.clone();
        for (k, v) in action.iter() {
            out.insert(state_len + k, v);
        }
        out
    }
}

impl FromIterator<(usize, usize)> for PartialAssignment {
    fn from_iter<I: IntoIterator<Item = (usize, usize)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

/// Serialized form: `(key, value)` pairs. Decoding goes through
/// [`PartialAssignment::from_pairs`], so unsorted or repeated keys are normalized.
impl From<Vec<(usize, usize)>> for PartialAssignment {
    fn from(pairs: Vec<(usize, usize)>) -> Self {
        Self::from_pairs(pairs)
    }
}

impl From<PartialAssignment> for Vec<(usize, usize)> {
    fn from(assignment: PartialAssignment) -> Self {
        assignment.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_pairs_sorts_and_last_wins() {
        let a = PartialAssignment::from_pairs([(3, 1), (1, 2), (3, 0)]);
        assert_eq!(a.keys(), &[1, 3]);
        assert_eq!(a.values(), &[2, 0]);
    }

    #[test]
    fn full_covers_every_factor() {
        let a = PartialAssignment::full(&[4, 0, 1]);
        assert_eq!(a.keys(), &[0, 1, 2]);
        assert_eq!(a.get(0), Some(4));
        assert!(!a.contains_key(3));
    }

    #[test]
    fn empty_is_compatible_with_anything() {
        let e = PartialAssignment::new();
        let a = PartialAssignment::from_pairs([(0, 1), (5, 2)]);
        assert!(e.is_compatible(&a));
        assert!(a.is_compatible(&e));
    }

    #[test]
    fn disagreement_on_shared_key_is_incompatible() {
        let a = PartialAssignment::from_pairs([(0, 1), (2, 2)]);
        let b = PartialAssignment::from_pairs([(1, 0), (2, 3)]);
        assert!(!a.is_compatible(&b));
        assert!(!b.is_compatible(&a));
    }

    #[test]
    fn disjoint_keys_are_compatible() {
        let a = PartialAssignment::from_pairs([(0, 1), (4, 1)]);
        let b = PartialAssignment::from_pairs([(1, 0), (3, 3)]);
        assert!(a.is_compatible(&b));
    }

    #[test]
    fn project_skips_missing_keys() {
        let a = PartialAssignment::from_pairs([(0, 1), (2, 2), (3, 0)]);
        let p = a.project(&[3, 1, 0]);
        assert_eq!(p.keys(), &[0, 3]);
        assert_eq!(p.values(), &[1, 0]);
    }

    #[test]
    fn join_offsets_action_keys() {
        let s = PartialAssignment::full(&[1, 2]);
        let a = PartialAssignment::from_pairs([(0, 1), (2, 0)]);
        let j = PartialAssignment::join(&s, &a, 2);
        assert_eq!(j.keys(), &[0, 1, 2, 4]);
        assert_eq!(j.values(), &[1, 2, 1, 0]);
    }

    #[test]
    fn pairs_conversion_keeps_invariant() {
        let a = PartialAssignment::from(vec![(4, 0), (1, 2), (4, 3)]);
        assert_eq!(a.keys(), &[1, 4]);
        assert_eq!(a.values(), &[2, 3]);
        let pairs: Vec<(usize, usize)> = a.into();
        assert_eq!(pairs, vec![(1, 2), (4, 3)]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_normalizes_unsorted_and_repeated_keys() {
        let a: PartialAssignment = serde_json::from_str("[[3,1],[1,2],[3,0]]").unwrap();
        assert_eq!(a.keys(), &[1, 3]);
        assert_eq!(a.values(), &[2, 0]);
        assert!(!a.is_compatible(&PartialAssignment::from_pairs([(3, 1)])));

        let json = serde_json::to_string(&a).unwrap();
        assert_eq!(json, "[[1,2],[3,0]]");
    }
}
