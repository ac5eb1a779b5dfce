//! Cardinality descriptors for discrete factored spaces.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ordered list of factor cardinalities.
///
/// Used both for state spaces (one entry per state variable) and for joint
/// action spaces (one entry per agent, holding that agent's number of
/// actions).
///
/// # Examples
///
/// ```
/// use cooprl::space::Factors;
///
/// let actions = Factors::new(vec![2, 3, 2]);
/// assert_eq!(actions.len(), 3);
/// assert_eq!(actions.size(1), Some(3));
/// assert_eq!(actions.joint_size(), 12);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Factors {
    sizes: Vec<usize>,
}

impl Factors {
    /// Creates a descriptor from per-factor cardinalities.
    pub fn new(sizes: Vec<usize>) -> Self {
        Self { sizes }
    }

    /// Number of factors.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Returns true if there are no factors (e.g. a stateless problem).
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Cardinality of factor `i`, if it exists.
    pub fn size(&self, i: usize) -> Option<usize> {
        self.sizes.get(i).copied()
    }

    /// All cardinalities in factor order.
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Number of full assignments over every factor.
    ///
    /// Saturates at `usize::MAX` instead of overflowing.
    pub fn joint_size(&self) -> usize {
        self.sizes
            .iter()
            .fold(1usize, |acc, &s| acc.saturating_mul(s))
    }
}

impl From<Vec<usize>> for Factors {
    fn from(sizes: Vec<usize>) -> Self {
        Self::new(sizes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_space_has_one_assignment() {
        let f = Factors::default();
        assert!(f.is_empty());
        assert_eq!(f.joint_size(), 1);
    }

    #[test]
    fn size_is_none_past_the_end() {
        let f = Factors::new(vec![4, 5]);
        assert_eq!(f.size(1), Some(5));
        assert_eq!(f.size(2), None);
    }

    #[test]
    fn joint_size_saturates() {
        let f = Factors::new(vec![usize::MAX, 2]);
        assert_eq!(f.joint_size(), usize::MAX);
    }
}
