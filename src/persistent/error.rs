//! Error types for persistent map construction.
//!
//! Lookups of absent keys are not errors (they yield `None`), and broken tree
//! invariants are bugs that panic. The only recoverable failure is feeding
//! out-of-order input to the linear-time bulk builder.

use std::fmt;

/// Represents an input sequence that is not strictly ascending by key.
///
/// Returned by [`WeightBalancedMap::from_sorted_pairs`](super::WeightBalancedMap::from_sorted_pairs)
/// when the key at `position` does not compare greater than the key before it.
///
/// # Examples
///
/// ```rust
/// use wbtree::persistent::{UnsortedPairsError, WeightBalancedMap};
///
/// let result = WeightBalancedMap::from_sorted_pairs([(1, "a"), (3, "c"), (2, "b")]);
/// assert_eq!(result, Err(UnsortedPairsError { position: 2 }));
/// assert_eq!(
///     result.unwrap_err().to_string(),
///     "pair at position 2 is not strictly greater than its predecessor"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnsortedPairsError {
    /// Zero-based index of the first offending pair in the input.
    pub position: usize,
}

impl fmt::Display for UnsortedPairsError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "pair at position {} is not strictly greater than its predecessor",
            self.position
        )
    }
}

impl std::error::Error for UnsortedPairsError {}
