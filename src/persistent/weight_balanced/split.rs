//! Boundary extraction and gluing of sibling subtrees.

use super::balance::balance;
use super::node::{Node, Tree};

/// Extracts the minimum entry of a non-empty subtree, returning it together
/// with the rebalanced remainder.
pub(super) fn split_min<K: Clone, V: Clone>(node: &Node<K, V>) -> (K, V, Tree<K, V>) {
    match node.left.as_ref() {
        None => (node.key.clone(), node.value.clone(), node.right.clone()),
        Some(left) => {
            let (key, value, remainder) = split_min(left);
            let rebuilt = balance(
                node.key.clone(),
                node.value.clone(),
                remainder,
                node.right.clone(),
            );
            (key, value, Some(rebuilt))
        }
    }
}

/// Extracts the maximum entry of a non-empty subtree, returning it together
/// with the rebalanced remainder.
pub(super) fn split_max<K: Clone, V: Clone>(node: &Node<K, V>) -> (K, V, Tree<K, V>) {
    match node.right.as_ref() {
        None => (node.key.clone(), node.value.clone(), node.left.clone()),
        Some(right) => {
            let (key, value, remainder) = split_max(right);
            let rebuilt = balance(
                node.key.clone(),
                node.value.clone(),
                node.left.clone(),
                remainder,
            );
            (key, value, Some(rebuilt))
        }
    }
}

/// Merges two balanced subtrees where every key of `left` is below every key
/// of `right`.
///
/// The new root is taken from the larger side so the result stays within ratio.
pub(super) fn glue<K: Clone, V: Clone>(left: &Tree<K, V>, right: &Tree<K, V>) -> Tree<K, V> {
    match (left, right) {
        (None, _) => right.clone(),
        (_, None) => left.clone(),
        (Some(left_node), Some(right_node)) => {
            if left_node.size > right_node.size {
                let (key, value, remainder) = split_max(left_node);
                Some(balance(key, value, remainder, right.clone()))
            } else {
                let (key, value, remainder) = split_min(right_node);
                Some(balance(key, value, left.clone(), remainder))
            }
        }
    }
}
