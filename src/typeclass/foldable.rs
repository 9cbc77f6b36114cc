//! Foldable type class - folding over data structures.
//!
//! A `Foldable` can have its elements reduced, in a fixed order, into a single
//! summary value. Ordered structures fold in their natural order: `Vec` by
//! index, `Option` over its zero or one element, and
//! [`WeightBalancedMap`](crate::persistent::WeightBalancedMap) by ascending key.
//!
//! # Laws
//!
//! ```text
//! fa.fold_left(init, f)  == fa.to_list().into_iter().fold(init, f)
//! fa.fold_right(init, f) == fa.to_list().into_iter().rev().fold(init, flip(f))
//! fa.length()            == fa.to_list().len()
//! ```

/// A type class for data structures that can be folded to a summary value.
///
/// # Required Methods
///
/// - `fold_left`, `fold_right`: ordered folds
/// - `is_empty`, `length`: size queries
///
/// # Provided Methods
///
/// - `to_list`, `find`, `exists`, `for_all`
///
/// # Examples
///
/// ```rust
/// use wbtree::typeclass::Foldable;
///
/// let words = vec!["a", "b", "c"];
/// let joined = words.fold_right(String::new(), |element, accumulator| {
///     format!("{element}{accumulator}")
/// });
/// assert_eq!(joined, "abc");
/// ```
pub trait Foldable {
    /// The element type produced by the fold.
    type Item;

    /// Folds the structure from left to right with an accumulator.
    fn fold_left<B, F>(self, init: B, function: F) -> B
    where
        F: FnMut(B, Self::Item) -> B;

    /// Folds the structure from right to left with an accumulator.
    fn fold_right<B, F>(self, init: B, function: F) -> B
    where
        F: FnMut(Self::Item, B) -> B;

    /// Returns whether the structure contains no elements.
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the structure.
    fn length(&self) -> usize;

    /// Converts the structure to a `Vec` in fold order.
    fn to_list(self) -> Vec<Self::Item>
    where
        Self: Sized,
    {
        let capacity = self.length();
        self.fold_left(Vec::with_capacity(capacity), |mut accumulator, element| {
            accumulator.push(element);
            accumulator
        })
    }

    /// Finds the first element, in fold order, satisfying a predicate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use wbtree::typeclass::Foldable;
    ///
    /// assert_eq!(vec![1, 2, 3, 4].find(|element| *element > 2), Some(3));
    /// assert_eq!(Some(1).find(|element| *element > 2), None);
    /// ```
    fn find<P>(self, mut predicate: P) -> Option<Self::Item>
    where
        P: FnMut(&Self::Item) -> bool,
        Self: Sized,
    {
        self.fold_left(None, |found, element| {
            found.or_else(|| predicate(&element).then_some(element))
        })
    }

    /// Checks if any element satisfies the predicate.
    fn exists<P>(self, predicate: P) -> bool
    where
        P: FnMut(&Self::Item) -> bool,
        Self: Sized,
    {
        self.find(predicate).is_some()
    }

    /// Checks if all elements satisfy the predicate. Vacuously `true` when
    /// empty.
    fn for_all<P>(self, mut predicate: P) -> bool
    where
        P: FnMut(&Self::Item) -> bool,
        Self: Sized,
    {
        !self.exists(|element| !predicate(element))
    }
}

// =============================================================================
// Option<A> Implementation
// =============================================================================

impl<A> Foldable for Option<A> {
    type Item = A;

    fn fold_left<B, F>(self, init: B, mut function: F) -> B
    where
        F: FnMut(B, A) -> B,
    {
        match self {
            Some(element) => function(init, element),
            None => init,
        }
    }

    fn fold_right<B, F>(self, init: B, mut function: F) -> B
    where
        F: FnMut(A, B) -> B,
    {
        match self {
            Some(element) => function(element, init),
            None => init,
        }
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.is_none()
    }

    #[inline]
    fn length(&self) -> usize {
        usize::from(self.is_some())
    }
}

// =============================================================================
// Vec<T> Implementation
// =============================================================================

impl<T> Foldable for Vec<T> {
    type Item = T;

    fn fold_left<B, F>(self, init: B, function: F) -> B
    where
        F: FnMut(B, T) -> B,
    {
        self.into_iter().fold(init, function)
    }

    fn fold_right<B, F>(self, init: B, mut function: F) -> B
    where
        F: FnMut(T, B) -> B,
    {
        self.into_iter()
            .rev()
            .fold(init, |accumulator, element| function(element, accumulator))
    }

    #[inline]
    fn is_empty(&self) -> bool {
        Vec::is_empty(self)
    }

    #[inline]
    fn length(&self) -> usize {
        self.len()
    }

    #[inline]
    fn to_list(self) -> Self {
        self
    }
}
