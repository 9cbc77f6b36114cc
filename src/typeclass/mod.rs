//! Generic traversal helpers shared by the collections in this crate.
//!
//! - [`Foldable`]: Folding over structures to produce summary values
//!
//! # Examples
//!
//! ```rust
//! use wbtree::typeclass::Foldable;
//!
//! let values = vec![1, 2, 3];
//! assert_eq!(values.fold_left(0, |accumulator, element| accumulator + element), 6);
//!
//! let missing: Option<i32> = None;
//! assert_eq!(missing.to_list(), Vec::<i32>::new());
//! ```

mod foldable;

pub use foldable::Foldable;
