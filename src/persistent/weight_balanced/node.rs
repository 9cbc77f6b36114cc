//! Tree nodes and size accounting.

use crate::persistent::{RATIO, ReferenceCounter};

/// Shared handle to a non-empty subtree.
pub(super) type NodeRef<K, V> = ReferenceCounter<Node<K, V>>;

/// A possibly empty subtree. `None` is the zero-size leaf.
pub(super) type Tree<K, V> = Option<NodeRef<K, V>>;

/// Internal node of the weight-balanced tree.
///
/// Nodes are never mutated after construction; `size` is fixed at creation
/// and always equals `1 + size(left) + size(right)`.
pub(super) struct Node<K, V> {
    pub(super) key: K,
    pub(super) value: V,
    pub(super) size: usize,
    pub(super) left: Tree<K, V>,
    pub(super) right: Tree<K, V>,
}

impl<K, V> Node<K, V> {
    /// Creates a node over two subtrees, caching the combined size.
    pub(super) fn new(key: K, value: V, left: Tree<K, V>, right: Tree<K, V>) -> Self {
        Self {
            size: 1 + size(left.as_ref()) + size(right.as_ref()),
            key,
            value,
            left,
            right,
        }
    }

    /// Creates a node with no children.
    pub(super) const fn leaf(key: K, value: V) -> Self {
        Self {
            key,
            value,
            size: 1,
            left: None,
            right: None,
        }
    }

    /// Copies this node's entry over new children.
    pub(super) fn with_children(&self, left: Tree<K, V>, right: Tree<K, V>) -> Self
    where
        K: Clone,
        V: Clone,
    {
        Self::new(self.key.clone(), self.value.clone(), left, right)
    }

    /// Copies this node's key and children around a new value.
    pub(super) fn with_value(&self, value: V) -> Self
    where
        K: Clone,
    {
        Self {
            key: self.key.clone(),
            value,
            size: self.size,
            left: self.left.clone(),
            right: self.right.clone(),
        }
    }
}

/// Number of entries in a subtree. O(1).
#[inline]
pub(super) fn size<K, V>(tree: Option<&NodeRef<K, V>>) -> usize {
    tree.map_or(0, |node| node.size)
}

/// Returns `true` when sibling subtrees of the given sizes satisfy the weight
/// invariant.
#[inline]
pub(super) const fn is_weight_balanced(left_size: usize, right_size: usize) -> bool {
    left_size + right_size < 2
        || (right_size <= RATIO * left_size && left_size <= RATIO * right_size)
}

/// Number of nodes on the longest root-to-leaf path.
pub(super) fn height<K, V>(tree: Option<&NodeRef<K, V>>) -> usize {
    tree.map_or(0, |node| {
        1 + height(node.left.as_ref()).max(height(node.right.as_ref()))
    })
}

/// Re-verifies ordering, size caches and weight balance for a subtree whose
/// keys must lie strictly between `lower` and `upper`.
///
/// Returns the verified size, or `None` at the first broken invariant.
pub(super) fn verified_size<K: Ord, V>(
    tree: Option<&NodeRef<K, V>>,
    lower: Option<&K>,
    upper: Option<&K>,
) -> Option<usize> {
    let Some(node) = tree else {
        return Some(0);
    };

    if lower.is_some_and(|bound| *bound >= node.key) || upper.is_some_and(|bound| *bound <= node.key)
    {
        return None;
    }

    let left_size = verified_size(node.left.as_ref(), lower, Some(&node.key))?;
    let right_size = verified_size(node.right.as_ref(), Some(&node.key), upper)?;

    (node.size == 1 + left_size + right_size && is_weight_balanced(left_size, right_size))
        .then_some(node.size)
}

/// Halts on a tree shape that the balancing logic guarantees cannot occur.
#[cold]
#[inline(never)]
#[track_caller]
pub(super) fn invariant_violation(context: &str) -> ! {
    #[cfg(feature = "tracing")]
    tracing::error!(context = %context, "weight-balanced tree invariant violated");

    panic!("weight-balanced tree invariant violated: {context}")
}
