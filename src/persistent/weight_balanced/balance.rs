//! Rotations and the `balance` smart constructor.
//!
//! `balance` is the only place nodes are assembled after a size change. Its
//! inputs must each be weight-balanced internally; only the pair `left`/`right`
//! may be out of ratio, by at most the amount one insertion or removal causes.
//!
//! The four rotations reproduce the canonical shapes
//!
//! ```text
//! single left:   (a, x, (b, y, z))           => (b, (a, x, y), z)
//! double left:   (a, x, (c, (b, y1, y2), z)) => (b, (a, x, y1), (c, y2, z))
//! single right:  (a, (b, x, y), z)           => (b, x, (a, y, z))
//! double right:  (a, (c, x, (b, y1, y2)), z) => (b, (c, x, y1), (a, y2, z))
//! ```
//!
//! with the lowered nodes assembled through `balance` as well. For inputs where
//! the canonical lowered node is already within ratio that is a plain node, so
//! the shape is unchanged; for small subtrees where it is not (a lowered node
//! ending up with an empty side facing two entries) the nested call repairs it.

use super::node::{Node, NodeRef, Tree, invariant_violation, size};
use crate::persistent::RATIO;

/// Builds a node from `key`, `value` and two subtrees, rotating when the
/// subtrees are out of ratio.
pub(super) fn balance<K: Clone, V: Clone>(
    key: K,
    value: V,
    left: Tree<K, V>,
    right: Tree<K, V>,
) -> NodeRef<K, V> {
    let left_size = size(left.as_ref());
    let right_size = size(right.as_ref());

    if left_size + right_size < 2 {
        NodeRef::new(Node::new(key, value, left, right))
    } else if right_size > RATIO * left_size {
        rotate_left(key, value, left, right)
    } else if left_size > RATIO * right_size {
        rotate_right(key, value, left, right)
    } else {
        NodeRef::new(Node::new(key, value, left, right))
    }
}

/// Moves weight from the right subtree to the left one.
fn rotate_left<K: Clone, V: Clone>(
    key: K,
    value: V,
    left: Tree<K, V>,
    right: Tree<K, V>,
) -> NodeRef<K, V> {
    let Some(right) = right else {
        invariant_violation("left rotation around an empty right subtree")
    };

    if size(right.left.as_ref()) < size(right.right.as_ref()) {
        single_left(key, value, left, &right)
    } else {
        double_left(key, value, left, &right)
    }
}

/// Moves weight from the left subtree to the right one.
fn rotate_right<K: Clone, V: Clone>(
    key: K,
    value: V,
    left: Tree<K, V>,
    right: Tree<K, V>,
) -> NodeRef<K, V> {
    let Some(left) = left else {
        invariant_violation("right rotation around an empty left subtree")
    };

    if size(left.right.as_ref()) < size(left.left.as_ref()) {
        single_right(key, value, &left, right)
    } else {
        double_right(key, value, &left, right)
    }
}

fn single_left<K: Clone, V: Clone>(
    key: K,
    value: V,
    x: Tree<K, V>,
    right: &Node<K, V>,
) -> NodeRef<K, V> {
    let lowered = balance(key, value, x, right.left.clone());
    NodeRef::new(Node::new(
        right.key.clone(),
        right.value.clone(),
        Some(lowered),
        right.right.clone(),
    ))
}

fn double_left<K: Clone, V: Clone>(
    key: K,
    value: V,
    x: Tree<K, V>,
    right: &Node<K, V>,
) -> NodeRef<K, V> {
    let Some(middle) = right.left.as_ref() else {
        invariant_violation("double left rotation without a right-left grandchild")
    };

    let lowered_left = balance(key, value, x, middle.left.clone());
    let lowered_right = balance(
        right.key.clone(),
        right.value.clone(),
        middle.right.clone(),
        right.right.clone(),
    );
    NodeRef::new(Node::new(
        middle.key.clone(),
        middle.value.clone(),
        Some(lowered_left),
        Some(lowered_right),
    ))
}

fn single_right<K: Clone, V: Clone>(
    key: K,
    value: V,
    left: &Node<K, V>,
    z: Tree<K, V>,
) -> NodeRef<K, V> {
    let lowered = balance(key, value, left.right.clone(), z);
    NodeRef::new(Node::new(
        left.key.clone(),
        left.value.clone(),
        left.left.clone(),
        Some(lowered),
    ))
}

fn double_right<K: Clone, V: Clone>(
    key: K,
    value: V,
    left: &Node<K, V>,
    z: Tree<K, V>,
) -> NodeRef<K, V> {
    let Some(middle) = left.right.as_ref() else {
        invariant_violation("double right rotation without a left-right grandchild")
    };

    let lowered_left = balance(
        left.key.clone(),
        left.value.clone(),
        left.left.clone(),
        middle.left.clone(),
    );
    let lowered_right = balance(key, value, middle.right.clone(), z);
    NodeRef::new(Node::new(
        middle.key.clone(),
        middle.value.clone(),
        Some(lowered_left),
        Some(lowered_right),
    ))
}
