//! # wbtree
//!
//! A persistent (immutable) ordered map backed by a weight-balanced binary
//! search tree, following the Adams balancing scheme.
//!
//! ## Overview
//!
//! - **Persistent Map**: [`persistent::WeightBalancedMap`], where every update
//!   returns a new version sharing all untouched subtrees with the old one
//! - **Fold Helpers**: the [`typeclass::Foldable`] trait, implemented for
//!   `Option`, `Vec` and the map
//!
//! ## Feature Flags
//!
//! - `arc`: use `Arc` instead of `Rc` for node sharing, making maps `Send + Sync`
//! - `tracing`: emit `tracing` events from bulk builds and invariant guards
//!
//! ## Example
//!
//! ```rust
//! use wbtree::prelude::*;
//!
//! let map = WeightBalancedMap::from_pairs([(3, "three"), (8, "eight"), (1, "one")]);
//! let updated = map.insert(5, "five");
//!
//! assert_eq!(map.len(), 3);
//! assert_eq!(updated.len(), 4);
//! assert_eq!(updated.keys().copied().collect::<Vec<_>>(), vec![1, 3, 5, 8]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// ```rust
/// use wbtree::prelude::*;
/// ```
pub mod prelude {
    pub use crate::persistent::*;
    pub use crate::typeclass::*;
}

pub mod persistent;
pub mod typeclass;
