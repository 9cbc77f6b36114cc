//! Persistent (immutable) ordered map based on a weight-balanced tree.
//!
//! This module provides [`WeightBalancedMap`], an immutable ordered map
//! that uses structural sharing for efficient operations.
//!
//! # Overview
//!
//! The tree follows the Adams scheme: every node caches the size of its
//! subtree, and sibling subtrees may differ in size by at most a factor of
//! [`RATIO`](crate::persistent::RATIO). Size caching makes the balance check
//! O(1) and bounds the height logarithmically.
//!
//! - O(log N) get
//! - O(log N) insert
//! - O(log N) remove
//! - O(log N) min/max and `pop_min`/`pop_max`
//! - O(1) len and `is_empty`
//!
//! # Examples
//!
//! ```rust
//! use wbtree::persistent::WeightBalancedMap;
//!
//! let map = WeightBalancedMap::from_pairs([(3, "three"), (8, "eight"), (1, "one")]);
//! let removed = map.remove(&3);
//!
//! assert_eq!(map.len(), 3);
//! assert_eq!(removed.len(), 2);
//! assert_eq!(removed.keys().collect::<Vec<_>>(), vec![&1, &8]);
//! ```
//!
//! # Internal Structure
//!
//! After every public operation the tree satisfies:
//! 1. Keys in a left subtree compare below the node's key, keys in a right
//!    subtree compare above it
//! 2. Each node's cached size equals one plus the sizes of its subtrees
//! 3. For sibling sizes `ln`, `rn` with `ln + rn >= 2`, neither exceeds
//!    `RATIO` times the other

mod balance;
mod iter;
mod node;
mod split;

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Index;

use self::balance::balance;
use self::node::{Node, NodeRef, Tree, height, invariant_violation, size, verified_size};
use self::split::{glue, split_max, split_min};
use super::error::UnsortedPairsError;
use crate::typeclass::Foldable;

pub use self::iter::{
    WeightBalancedMapIntoIterator, WeightBalancedMapIterator, WeightBalancedMapKeys,
    WeightBalancedMapValues,
};

// =============================================================================
// WeightBalancedMap Definition
// =============================================================================

/// A persistent (immutable) ordered map based on a weight-balanced tree.
///
/// Keys must implement `Ord`. Every update returns a new map; the receiver is
/// never modified and keeps sharing all untouched subtrees with the result.
/// Cloning a map is O(1).
///
/// # Time Complexity
///
/// | Operation           | Complexity   |
/// |---------------------|--------------|
/// | `new`/`singleton`   | O(1)         |
/// | `get`               | O(log N)     |
/// | `contains_key`      | O(log N)     |
/// | `insert`            | O(log N)     |
/// | `remove`            | O(log N)     |
/// | `min`/`max`         | O(log N)     |
/// | `pop_min`/`pop_max` | O(log N)     |
/// | `len`               | O(1)         |
/// | `from_pairs`        | O(N log N)   |
/// | `from_sorted_pairs` | O(N)         |
///
/// # Examples
///
/// ```rust
/// use wbtree::persistent::WeightBalancedMap;
///
/// let map = WeightBalancedMap::singleton(42, "answer");
/// assert_eq!(map.get(&42), Some(&"answer"));
///
/// let map = map.insert(7, "seven").insert(99, "ninety-nine");
/// let keys: Vec<&i32> = map.keys().collect();
/// assert_eq!(keys, vec![&7, &42, &99]);
/// ```
pub struct WeightBalancedMap<K, V> {
    root: Tree<K, V>,
}

impl<K, V> Clone for WeightBalancedMap<K, V> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
        }
    }
}

impl<K, V> WeightBalancedMap<K, V> {
    /// Creates a new empty map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use wbtree::persistent::WeightBalancedMap;
    ///
    /// let map: WeightBalancedMap<i32, String> = WeightBalancedMap::new();
    /// assert!(map.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { root: None }
    }

    /// Creates a map containing a single key-value pair.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use wbtree::persistent::WeightBalancedMap;
    ///
    /// let map = WeightBalancedMap::singleton(1, "one");
    /// assert_eq!(map.len(), 1);
    /// ```
    #[inline]
    #[must_use]
    pub fn singleton(key: K, value: V) -> Self {
        Self {
            root: Some(NodeRef::new(Node::leaf(key, value))),
        }
    }

    /// Returns the number of entries in the map.
    ///
    /// Reads the size cached at the root.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        size(self.root.as_ref())
    }

    /// Returns `true` if the map contains no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns `true` if both maps are the same version, i.e. share their root
    /// node.
    ///
    /// Equal contents do not imply `ptr_eq`, but `ptr_eq` implies equal
    /// contents.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use wbtree::persistent::WeightBalancedMap;
    ///
    /// let map = WeightBalancedMap::from_pairs([(1, "one"), (2, "two")]);
    /// assert!(map.ptr_eq(&map.clone()));
    /// assert!(map.ptr_eq(&map.remove(&3)));
    /// assert!(!map.ptr_eq(&map.insert(3, "three")));
    /// ```
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.root, &other.root) {
            (None, None) => true,
            (Some(left), Some(right)) => NodeRef::ptr_eq(left, right),
            _ => false,
        }
    }

    /// Returns the number of nodes on the longest root-to-leaf path.
    ///
    /// The weight invariant keeps this logarithmic in [`len`](Self::len).
    #[must_use]
    pub fn height(&self) -> usize {
        height(self.root.as_ref())
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the map's key type, but the
    /// ordering on the borrowed form must match the ordering on the key type.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use wbtree::persistent::WeightBalancedMap;
    ///
    /// let map = WeightBalancedMap::singleton("hello".to_string(), 42);
    ///
    /// // Can use &str to look up String keys
    /// assert_eq!(map.get("hello"), Some(&42));
    /// assert_eq!(map.get("world"), None);
    /// ```
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root.as_ref();
        while let Some(node) = current {
            current = match key.cmp(node.key.borrow()) {
                Ordering::Less => node.left.as_ref(),
                Ordering::Greater => node.right.as_ref(),
                Ordering::Equal => return Some(&node.value),
            };
        }
        None
    }

    /// Returns `true` if the map contains a value for the specified key.
    ///
    /// # Complexity
    ///
    /// O(log N)
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Returns the entry with the minimum key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use wbtree::persistent::WeightBalancedMap;
    ///
    /// let map = WeightBalancedMap::from_pairs([(3, "three"), (1, "one"), (2, "two")]);
    /// assert_eq!(map.min(), Some((&1, &"one")));
    /// ```
    #[must_use]
    pub fn min(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_ref()?;
        while let Some(left) = node.left.as_ref() {
            node = left;
        }
        Some((&node.key, &node.value))
    }

    /// Returns the entry with the maximum key.
    #[must_use]
    pub fn max(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_ref()?;
        while let Some(right) = node.right.as_ref() {
            node = right;
        }
        Some((&node.key, &node.value))
    }

    /// Returns a lazy iterator over entries in ascending key order.
    ///
    /// The iterator is finite and can be recreated at any time; each call
    /// starts a fresh traversal.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use wbtree::persistent::WeightBalancedMap;
    ///
    /// let map = WeightBalancedMap::from_pairs([(2, 'b'), (1, 'a')]);
    /// let entries: Vec<(&i32, &char)> = map.iter().collect();
    /// assert_eq!(entries, vec![(&1, &'a'), (&2, &'b')]);
    /// ```
    #[must_use]
    pub fn iter(&self) -> WeightBalancedMapIterator<'_, K, V> {
        WeightBalancedMapIterator::new(self.root.as_ref(), self.len())
    }

    /// Returns an iterator over keys in ascending order.
    #[must_use]
    pub fn keys(&self) -> WeightBalancedMapKeys<'_, K, V> {
        WeightBalancedMapKeys { inner: self.iter() }
    }

    /// Returns an iterator over values in ascending key order.
    #[must_use]
    pub fn values(&self) -> WeightBalancedMapValues<'_, K, V> {
        WeightBalancedMapValues { inner: self.iter() }
    }

    /// Calls `visit` once per entry, in ascending key order.
    ///
    /// This is the eager counterpart of [`iter`](Self::iter).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use wbtree::persistent::WeightBalancedMap;
    ///
    /// let map = WeightBalancedMap::from_pairs([(3, 30), (1, 10), (2, 20)]);
    /// let mut visited = Vec::new();
    /// map.for_each(|key, value| visited.push((*key, *value)));
    /// assert_eq!(visited, vec![(1, 10), (2, 20), (3, 30)]);
    /// ```
    pub fn for_each<F>(&self, mut visit: F)
    where
        F: FnMut(&K, &V),
    {
        fn walk<K, V, F: FnMut(&K, &V)>(node: Option<&NodeRef<K, V>>, visit: &mut F) {
            if let Some(node) = node {
                walk(node.left.as_ref(), visit);
                visit(&node.key, &node.value);
                walk(node.right.as_ref(), visit);
            }
        }

        walk(self.root.as_ref(), &mut visit);
    }

    /// Folds the entries in ascending key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use wbtree::persistent::WeightBalancedMap;
    ///
    /// let map = WeightBalancedMap::from_pairs([(1, 10), (2, 20), (3, 30)]);
    /// let total = map.fold(0, |accumulator, _, value| accumulator + value);
    /// assert_eq!(total, 60);
    /// ```
    pub fn fold<B, F>(&self, init: B, mut function: F) -> B
    where
        F: FnMut(B, &K, &V) -> B,
    {
        self.iter()
            .fold(init, |accumulator, (key, value)| function(accumulator, key, value))
    }
}

impl<K: Ord, V> WeightBalancedMap<K, V> {
    /// Re-verifies the structural invariants over the whole tree: key
    /// ordering, cached sizes and the weight ratio between siblings.
    ///
    /// Every map produced by this crate's operations is well formed; this is
    /// a diagnostic for tests and debugging.
    ///
    /// # Complexity
    ///
    /// O(N)
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        verified_size(self.root.as_ref(), None, None).is_some()
    }
}

impl<K: Clone + Ord, V: Clone> WeightBalancedMap<K, V> {
    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contains the key, only the value is replaced: the
    /// stored key and the tree shape are kept.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use wbtree::persistent::WeightBalancedMap;
    ///
    /// let map1 = WeightBalancedMap::new().insert(1, "one");
    /// let map2 = map1.insert(1, "ONE");
    ///
    /// assert_eq!(map1.get(&1), Some(&"one")); // Original unchanged
    /// assert_eq!(map2.get(&1), Some(&"ONE")); // New version
    /// ```
    #[must_use]
    pub fn insert(&self, key: K, value: V) -> Self {
        let (root, _) = Self::insert_into_node(self.root.as_ref(), key, value);
        Self { root: Some(root) }
    }

    /// Recursive helper for insert.
    /// Returns (`new_node`, `was_added`) where `was_added` is false for a pure
    /// value update.
    fn insert_into_node(node: Option<&NodeRef<K, V>>, key: K, value: V) -> (NodeRef<K, V>, bool) {
        let Some(node) = node else {
            return (NodeRef::new(Node::leaf(key, value)), true);
        };

        match key.cmp(&node.key) {
            Ordering::Less => {
                let (new_left, added) = Self::insert_into_node(node.left.as_ref(), key, value);
                let rebuilt = if added {
                    balance(
                        node.key.clone(),
                        node.value.clone(),
                        Some(new_left),
                        node.right.clone(),
                    )
                } else {
                    NodeRef::new(node.with_children(Some(new_left), node.right.clone()))
                };
                (rebuilt, added)
            }
            Ordering::Greater => {
                let (new_right, added) = Self::insert_into_node(node.right.as_ref(), key, value);
                let rebuilt = if added {
                    balance(
                        node.key.clone(),
                        node.value.clone(),
                        node.left.clone(),
                        Some(new_right),
                    )
                } else {
                    NodeRef::new(node.with_children(node.left.clone(), Some(new_right)))
                };
                (rebuilt, added)
            }
            Ordering::Equal => (NodeRef::new(node.with_value(value)), false),
        }
    }

    /// Removes a key from the map.
    ///
    /// Returns a new map without the key. If the key is absent the result is
    /// the same version as `self` (see [`ptr_eq`](Self::ptr_eq)); nothing is
    /// allocated.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use wbtree::persistent::WeightBalancedMap;
    ///
    /// let map = WeightBalancedMap::from_pairs([(1, "one"), (2, "two")]);
    /// let removed = map.remove(&1);
    ///
    /// assert_eq!(map.len(), 2);     // Original unchanged
    /// assert_eq!(removed.len(), 1); // New version
    /// assert_eq!(removed.get(&1), None);
    /// ```
    #[must_use]
    pub fn remove<Q>(&self, key: &Q) -> Self
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.root
            .as_ref()
            .and_then(|root| Self::remove_from_node(root, key))
            .map_or_else(|| self.clone(), |root| Self { root })
    }

    /// Recursive helper for remove.
    /// Returns `None` when the key is not in the subtree, otherwise the
    /// rebuilt subtree.
    #[allow(clippy::option_option)]
    fn remove_from_node<Q>(node: &NodeRef<K, V>, key: &Q) -> Option<Tree<K, V>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match key.cmp(node.key.borrow()) {
            Ordering::Less => {
                let new_left = Self::remove_from_node(node.left.as_ref()?, key)?;
                Some(Some(balance(
                    node.key.clone(),
                    node.value.clone(),
                    new_left,
                    node.right.clone(),
                )))
            }
            Ordering::Greater => {
                let new_right = Self::remove_from_node(node.right.as_ref()?, key)?;
                Some(Some(balance(
                    node.key.clone(),
                    node.value.clone(),
                    node.left.clone(),
                    new_right,
                )))
            }
            Ordering::Equal => Some(glue(&node.left, &node.right)),
        }
    }

    /// Removes the entry with the minimum key.
    ///
    /// Returns the removed entry and the remaining map, or `None` if the map
    /// is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use wbtree::persistent::WeightBalancedMap;
    ///
    /// let map = WeightBalancedMap::from_pairs([(2, "two"), (1, "one"), (3, "three")]);
    /// let ((key, value), rest) = map.pop_min().unwrap();
    /// assert_eq!((key, value), (1, "one"));
    /// assert_eq!(rest.len(), 2);
    /// ```
    #[must_use]
    pub fn pop_min(&self) -> Option<((K, V), Self)> {
        self.root.as_ref().map(|root| {
            let (key, value, remainder) = split_min(root);
            ((key, value), Self { root: remainder })
        })
    }

    /// Removes the entry with the maximum key.
    ///
    /// Returns the removed entry and the remaining map, or `None` if the map
    /// is empty.
    #[must_use]
    pub fn pop_max(&self) -> Option<((K, V), Self)> {
        self.root.as_ref().map(|root| {
            let (key, value, remainder) = split_max(root);
            ((key, value), Self { root: remainder })
        })
    }

    /// Builds a map by inserting the pairs in sequence order.
    ///
    /// When a key occurs more than once, the last occurrence wins.
    ///
    /// # Complexity
    ///
    /// O(N log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use wbtree::persistent::WeightBalancedMap;
    ///
    /// let map = WeightBalancedMap::from_pairs([(1, "first"), (2, "two"), (1, "last")]);
    /// assert_eq!(map.len(), 2);
    /// assert_eq!(map.get(&1), Some(&"last"));
    /// ```
    #[must_use]
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let map = pairs
            .into_iter()
            .fold(Self::new(), |map, (key, value)| map.insert(key, value));

        #[cfg(feature = "tracing")]
        tracing::debug!(entries = map.len(), "built weight-balanced map from pairs");

        map
    }

    /// Builds a perfectly balanced map from pairs with strictly ascending keys.
    ///
    /// # Errors
    ///
    /// Returns [`UnsortedPairsError`] with the position of the first pair whose
    /// key is not greater than its predecessor's.
    ///
    /// # Complexity
    ///
    /// O(N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use wbtree::persistent::WeightBalancedMap;
    ///
    /// let map = WeightBalancedMap::from_sorted_pairs((0..100).map(|key| (key, key * 2))).unwrap();
    /// assert_eq!(map.len(), 100);
    /// assert_eq!(map.height(), 7);
    /// ```
    pub fn from_sorted_pairs<I>(pairs: I) -> Result<Self, UnsortedPairsError>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let entries: Vec<(K, V)> = pairs.into_iter().collect();

        if let Some(position) = entries
            .windows(2)
            .position(|window| window[0].0 >= window[1].0)
        {
            #[cfg(feature = "tracing")]
            tracing::warn!(position = position + 1, "rejected unsorted pairs");

            return Err(UnsortedPairsError {
                position: position + 1,
            });
        }

        let length = entries.len();
        let mut entries = entries.into_iter();
        let root = Self::build_sorted(length, &mut entries);

        #[cfg(feature = "tracing")]
        tracing::debug!(entries = length, "built weight-balanced map from sorted pairs");

        Ok(Self { root })
    }

    /// Builds a subtree of `count` entries, consuming them in order.
    fn build_sorted<I>(count: usize, entries: &mut I) -> Tree<K, V>
    where
        I: Iterator<Item = (K, V)>,
    {
        if count == 0 {
            return None;
        }

        let left_count = count / 2;
        let left = Self::build_sorted(left_count, entries);
        let Some((key, value)) = entries.next() else {
            invariant_violation("sorted build ran out of entries")
        };
        let right = Self::build_sorted(count - left_count - 1, entries);
        Some(NodeRef::new(Node::new(key, value, left, right)))
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V> Default for WeightBalancedMap<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone + Ord, V: Clone> FromIterator<(K, V)> for WeightBalancedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

impl<K: Clone + Ord, V: Clone> Extend<(K, V)> for WeightBalancedMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            *self = self.insert(key, value);
        }
    }
}

impl<K: Clone, V: Clone> IntoIterator for WeightBalancedMap<K, V> {
    type Item = (K, V);
    type IntoIter = WeightBalancedMapIntoIterator<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        let entries: Vec<(K, V)> = self
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        WeightBalancedMapIntoIterator {
            entries: entries.into_iter(),
        }
    }
}

impl<'a, K, V> IntoIterator for &'a WeightBalancedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = WeightBalancedMapIterator<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for WeightBalancedMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || (self.len() == other.len() && self.iter().eq(other.iter()))
    }
}

impl<K: Eq, V: Eq> Eq for WeightBalancedMap<K, V> {}

/// Hashes the length, then each (key, value) pair in key order, so equal maps
/// hash equally regardless of how they were built.
impl<K: Hash, V: Hash> Hash for WeightBalancedMap<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for (key, value) in self {
            key.hash(state);
            value.hash(state);
        }
    }
}

impl<K, Q, V> Index<&Q> for WeightBalancedMap<K, V>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    type Output = V;

    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    fn index(&self, key: &Q) -> &Self::Output {
        self.get(key).expect("key not found in WeightBalancedMap")
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for WeightBalancedMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for WeightBalancedMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for (key, value) in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}: {value}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Type Class Implementations
// =============================================================================

impl<K: Clone, V: Clone> Foldable for WeightBalancedMap<K, V> {
    type Item = (K, V);

    fn fold_left<B, F>(self, init: B, function: F) -> B
    where
        F: FnMut(B, Self::Item) -> B,
    {
        self.into_iter().fold(init, function)
    }

    fn fold_right<B, F>(self, init: B, mut function: F) -> B
    where
        F: FnMut(Self::Item, B) -> B,
    {
        self.into_iter()
            .rev()
            .fold(init, |accumulator, entry| function(entry, accumulator))
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    #[inline]
    fn length(&self) -> usize {
        self.len()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn assert_well_formed<K: Ord, V>(map: &WeightBalancedMap<K, V>) {
        assert!(map.is_well_formed(), "tree invariants broken");
    }

    // =========================================================================
    // Display Tests
    // =========================================================================

    #[rstest]
    fn test_display_empty_map() {
        let map: WeightBalancedMap<i32, String> = WeightBalancedMap::new();
        assert_eq!(format!("{map}"), "{}");
    }

    #[rstest]
    fn test_display_multiple_elements_sorted() {
        let map = WeightBalancedMap::new()
            .insert(3, "three".to_string())
            .insert(1, "one".to_string())
            .insert(2, "two".to_string());
        assert_eq!(format!("{map}"), "{1: one, 2: two, 3: three}");
    }

    #[rstest]
    fn test_debug_uses_map_form() {
        let map = WeightBalancedMap::from_pairs([(2, 'b'), (1, 'a')]);
        assert_eq!(format!("{map:?}"), "{1: 'a', 2: 'b'}");
    }

    // =========================================================================
    // Core Operation Tests
    // =========================================================================

    #[rstest]
    fn test_singleton() {
        let map = WeightBalancedMap::singleton(1, "one");
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&1), Some(&"one"));
        assert_eq!(map.height(), 1);
        assert_well_formed(&map);
    }

    #[rstest]
    fn test_update_keeps_shape_and_shares_siblings() {
        let map: WeightBalancedMap<i32, i32> = (0..31).map(|key| (key, key)).collect();
        let root_key = map.root.as_ref().map(|root| root.key).unwrap();
        let key = root_key / 2;
        let updated = map.insert(key, 700);

        assert_eq!(updated.len(), map.len());
        assert_eq!(updated.height(), map.height());
        assert_eq!(updated.get(&key), Some(&700));
        assert_eq!(map.get(&key), Some(&key));

        let original_keys: Vec<i32> = map.keys().copied().collect();
        let updated_keys: Vec<i32> = updated.keys().copied().collect();
        assert_eq!(original_keys, updated_keys);

        // The key lies left of the root, so the right subtree is reused as-is.
        let original_right = map.root.as_ref().and_then(|root| root.right.as_ref());
        let updated_right = updated.root.as_ref().and_then(|root| root.right.as_ref());
        assert!(NodeRef::ptr_eq(original_right.unwrap(), updated_right.unwrap()));
    }

    #[rstest]
    fn test_update_keeps_stored_key() {
        #[derive(Clone, Debug)]
        struct Tagged(i32, &'static str);
        impl PartialEq for Tagged {
            fn eq(&self, other: &Self) -> bool {
                self.0 == other.0
            }
        }
        impl Eq for Tagged {}
        impl PartialOrd for Tagged {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }
        impl Ord for Tagged {
            fn cmp(&self, other: &Self) -> Ordering {
                self.0.cmp(&other.0)
            }
        }

        let map = WeightBalancedMap::singleton(Tagged(1, "original"), 'a')
            .insert(Tagged(1, "replacement"), 'b');
        let (key, value) = map.min().unwrap();
        assert_eq!(key.1, "original");
        assert_eq!(*value, 'b');
    }

    #[rstest]
    fn test_remove_absent_key_returns_same_version() {
        let map: WeightBalancedMap<i32, i32> = (0..10).map(|key| (key * 2, key)).collect();
        let removed = map.remove(&5);
        assert!(removed.ptr_eq(&map));

        let empty: WeightBalancedMap<i32, i32> = WeightBalancedMap::new();
        assert!(empty.remove(&1).is_empty());
    }

    #[rstest]
    fn test_remove_root_glues_children() {
        let map = WeightBalancedMap::from_pairs([(2, "two"), (1, "one"), (3, "three")]);
        let root_key = map.root.as_ref().map(|root| root.key);
        let removed = map.remove(&root_key.unwrap());
        assert_eq!(removed.len(), 2);
        assert_well_formed(&removed);
    }

    #[rstest]
    fn test_remove_everything_in_various_orders() {
        let map: WeightBalancedMap<i32, i32> = (0..64).map(|key| (key, key)).collect();

        let ascending = (0..64).fold(map.clone(), |map, key| {
            let next = map.remove(&key);
            assert_well_formed(&next);
            next
        });
        assert!(ascending.is_empty());

        let descending = (0..64).rev().fold(map.clone(), |map, key| {
            let next = map.remove(&key);
            assert_well_formed(&next);
            next
        });
        assert!(descending.is_empty());

        let interleaved = (0..64).map(|index| (index * 37) % 64).fold(map, |map, key| {
            let next = map.remove(&key);
            assert_well_formed(&next);
            next
        });
        assert!(interleaved.is_empty());
    }

    #[rstest]
    fn test_remove_that_needs_repaired_rotation() {
        // Removing 1 forces a double rotation whose raw form leaves a node with
        // an empty side facing two entries.
        let map = WeightBalancedMap::from_pairs([(5, ()), (1, ()), (16, ())])
            .insert(8, ())
            .insert(18, ())
            .insert(7, ())
            .insert(19, ());
        assert_well_formed(&map);
        let removed = map.remove(&1);
        assert_well_formed(&removed);
        assert_eq!(
            removed.keys().copied().collect::<Vec<_>>(),
            vec![5, 7, 8, 16, 18, 19]
        );
    }

    #[rstest]
    #[case::ascending((0..500).collect::<Vec<i32>>())]
    #[case::descending((0..500).rev().collect::<Vec<i32>>())]
    #[case::zigzag((0..250).flat_map(|index| [index, 499 - index]).collect::<Vec<i32>>())]
    fn test_insert_sequences_stay_balanced(#[case] keys: Vec<i32>) {
        let mut map = WeightBalancedMap::new();
        for key in keys {
            map = map.insert(key, key);
            assert_well_formed(&map);
        }
        assert_eq!(map.len(), 500);
        // log base 6/5 of 501 is about 34
        assert!(map.height() <= 34, "height {} too large", map.height());
    }

    #[rstest]
    fn test_pop_min_and_pop_max() {
        let map: WeightBalancedMap<i32, i32> = (1..=10).map(|key| (key, key * 10)).collect();

        let ((min_key, min_value), rest) = map.pop_min().unwrap();
        assert_eq!((min_key, min_value), (1, 10));
        assert_eq!(rest.len(), 9);
        assert_well_formed(&rest);

        let ((max_key, max_value), rest) = rest.pop_max().unwrap();
        assert_eq!((max_key, max_value), (10, 100));
        assert_eq!(rest.keys().copied().collect::<Vec<_>>(), (2..=9).collect::<Vec<_>>());

        let empty: WeightBalancedMap<i32, i32> = WeightBalancedMap::new();
        assert!(empty.pop_min().is_none());
        assert!(empty.pop_max().is_none());
    }

    #[rstest]
    fn test_min_max_on_empty_map() {
        let map: WeightBalancedMap<i32, i32> = WeightBalancedMap::new();
        assert_eq!(map.min(), None);
        assert_eq!(map.max(), None);
    }

    // =========================================================================
    // Bulk Build Tests
    // =========================================================================

    #[rstest]
    fn test_from_pairs_last_occurrence_wins() {
        let map = WeightBalancedMap::from_pairs([(1, "a"), (2, "b"), (1, "c"), (2, "d")]);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&1), Some(&"c"));
        assert_eq!(map.get(&2), Some(&"d"));
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    #[case(100)]
    #[case(1023)]
    fn test_from_sorted_pairs_is_balanced(#[case] count: i32) {
        let map = WeightBalancedMap::from_sorted_pairs((0..count).map(|key| (key, key))).unwrap();
        assert_eq!(map.len(), usize::try_from(count).unwrap());
        assert_well_formed(&map);
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), (0..count).collect::<Vec<_>>());
    }

    #[rstest]
    #[case(vec![(1, 'a'), (1, 'b')], 1)]
    #[case(vec![(1, 'a'), (2, 'b'), (3, 'c'), (0, 'd')], 3)]
    fn test_from_sorted_pairs_rejects_unsorted(
        #[case] pairs: Vec<(i32, char)>,
        #[case] position: usize,
    ) {
        assert_eq!(
            WeightBalancedMap::from_sorted_pairs(pairs),
            Err(UnsortedPairsError { position })
        );
    }

    #[rstest]
    fn test_extend_inserts_in_order() {
        let mut map = WeightBalancedMap::singleton(1, "one");
        map.extend([(2, "two"), (1, "uno")]);
        assert_eq!(map.len(), 2);
        assert_eq!(map[&1], "uno");
    }

    #[rstest]
    #[should_panic(expected = "key not found")]
    fn test_index_missing_key_panics() {
        let map = WeightBalancedMap::singleton(1, "one");
        let _value = map[&2];
    }

    // =========================================================================
    // Fold Tests
    // =========================================================================

    #[rstest]
    fn test_fold_left_visits_entries_in_order() {
        let map = WeightBalancedMap::from_pairs([(3, "c"), (1, "a"), (2, "b")]);
        let joined = map.fold_left(String::new(), |mut accumulator, (_, value)| {
            accumulator.push_str(value);
            accumulator
        });
        assert_eq!(joined, "abc");
    }

    #[rstest]
    fn test_fold_right_visits_entries_in_reverse() {
        let map = WeightBalancedMap::from_pairs([(3, "c"), (1, "a"), (2, "b")]);
        let keys = map.fold_right(Vec::new(), |(key, _), mut accumulator| {
            accumulator.push(key);
            accumulator
        });
        assert_eq!(keys, vec![3, 2, 1]);
    }
}
