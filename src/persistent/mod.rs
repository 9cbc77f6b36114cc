//! Persistent (immutable) ordered maps.
//!
//! This module provides [`WeightBalancedMap`], an ordered map that uses
//! structural sharing to minimize copying.
//!
//! # Structural Sharing
//!
//! An update never touches an existing node. It allocates new nodes only along
//! the path from the root to the edited position and points them at the
//! unmodified subtrees of the previous version, so old and new versions stay
//! valid side by side.
//!
//! # Examples
//!
//! ```rust
//! use wbtree::persistent::WeightBalancedMap;
//!
//! let map = WeightBalancedMap::new()
//!     .insert(3, "three")
//!     .insert(1, "one")
//!     .insert(2, "two");
//!
//! // Entries are always in sorted order
//! let keys: Vec<&i32> = map.keys().collect();
//! assert_eq!(keys, vec![&1, &2, &3]);
//!
//! // Structural sharing: the original map is preserved
//! let updated = map.insert(1, "ONE");
//! assert_eq!(map.get(&1), Some(&"one"));
//! assert_eq!(updated.get(&1), Some(&"ONE"));
//! ```

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`,
/// which is thread-safe but has slightly higher overhead.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

// =============================================================================
// Balance Tuning
// =============================================================================

/// Maximum allowed ratio between the sizes of two sibling subtrees.
///
/// For every node whose subtrees hold `ln` and `rn` entries with
/// `ln + rn >= 2`, both `rn <= RATIO * ln` and `ln <= RATIO * rn` hold.
/// Subtrees with fewer than two entries combined are exempt.
pub const RATIO: usize = 5;

static_assertions::const_assert!(RATIO >= 3);

mod error;
mod weight_balanced;

pub use error::UnsortedPairsError;
pub use weight_balanced::WeightBalancedMap;
pub use weight_balanced::WeightBalancedMapIntoIterator;
pub use weight_balanced::WeightBalancedMapIterator;
pub use weight_balanced::WeightBalancedMapKeys;
pub use weight_balanced::WeightBalancedMapValues;

#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(WeightBalancedMap<i32, String>: Send, Sync);

#[cfg(not(feature = "arc"))]
static_assertions::assert_not_impl_any!(WeightBalancedMap<i32, String>: Send, Sync);
