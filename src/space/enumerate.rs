//! Odometer enumeration of assignments over a subset of factors.

use super::factors::Factors;

/// Iterates every assignment to a fixed list of factor keys.
///
/// Values are yielded aligned with the keys passed to [`Enumerator::new`].
/// The first key varies fastest. An empty key list yields exactly one
/// (empty) assignment; a key whose cardinality is zero (or unknown) yields
/// none.
///
/// # Examples
///
/// ```
/// use cooprl::space::{Enumerator, Factors};
///
/// let f = Factors::new(vec![2, 5, 3]);
/// let all: Vec<Vec<usize>> = Enumerator::new(&f, &[0, 2]).collect();
/// assert_eq!(all.len(), 6);
/// assert_eq!(all[0], vec![0, 0]);
/// assert_eq!(all[1], vec![1, 0]);
/// assert_eq!(all[2], vec![0, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct Enumerator {
    sizes: Vec<usize>,
    current: Vec<usize>,
    done: bool,
}

impl Enumerator {
    /// Creates an enumerator over `keys` using the cardinalities in `factors`.
    pub fn new(factors: &Factors, keys: &[usize]) -> Self {
        let sizes: Vec<usize> = keys
            .iter()
            .map(|&k| factors.size(k).unwrap_or(0))
            .collect();
        let done = sizes.iter().any(|&s| s == 0);
        Self {
            current: vec![0; sizes.len()],
            sizes,
            done,
        }
    }

    /// Total number of assignments this enumerator produces.
    pub fn count_total(&self) -> usize {
        self.sizes
            .iter()
            .fold(1usize, |acc, &s| acc.saturating_mul(s))
    }

    /// Mixed-radix index of `values` in enumeration order.
    ///
    /// `values` must be aligned with the enumerator's keys and in range.
    pub fn index_of(sizes: &[usize], values: &[usize]) -> usize {
        let mut index = 0;
        let mut stride = 1;
        for (&v, &s) in values.iter().zip(sizes) {
            index += v * stride;
            stride *= s;
        }
        index
    }

    /// Cardinalities aligned with the enumerated keys.
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }
}

impl Iterator for Enumerator {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let out = self.current.clone();

        // Advance the odometer; wrapping past the last digit ends iteration.
        let mut carried = true;
        for (digit, &size) in self.current.iter_mut().zip(&self.sizes) {
            *digit += 1;
            if *digit < size {
                carried = false;
                break;
            }
            *digit = 0;
        }
        if carried {
            self.done = true;
        }
        Some(out)
    }
}
