//! In-order iterators over a [`WeightBalancedMap`](super::WeightBalancedMap).

use smallvec::SmallVec;
use std::iter::FusedIterator;

use super::node::{Node, NodeRef};

/// Inline capacity of the descent stacks. The weight invariant keeps trees of
/// a few million entries below this depth.
const STACK_CAPACITY: usize = 48;

type Stack<'a, K, V> = SmallVec<[&'a Node<K, V>; STACK_CAPACITY]>;

fn push_left_spine<'a, K, V>(mut node: Option<&'a NodeRef<K, V>>, stack: &mut Stack<'a, K, V>) {
    while let Some(current) = node {
        stack.push(current);
        node = current.left.as_ref();
    }
}

fn push_right_spine<'a, K, V>(mut node: Option<&'a NodeRef<K, V>>, stack: &mut Stack<'a, K, V>) {
    while let Some(current) = node {
        stack.push(current);
        node = current.right.as_ref();
    }
}

/// A lazy iterator over key-value pairs in ascending key order.
///
/// Only the current root-to-node path is held, so creating the iterator is
/// O(log N) and advancing is amortized O(1). The iterator is double-ended and
/// exact-size; the two ends never cross because `remaining` bounds them.
pub struct WeightBalancedMapIterator<'a, K, V> {
    front: Stack<'a, K, V>,
    back: Stack<'a, K, V>,
    remaining: usize,
}

impl<'a, K, V> WeightBalancedMapIterator<'a, K, V> {
    pub(super) fn new(root: Option<&'a NodeRef<K, V>>, length: usize) -> Self {
        let mut front = Stack::new();
        let mut back = Stack::new();
        push_left_spine(root, &mut front);
        push_right_spine(root, &mut back);
        Self {
            front,
            back,
            remaining: length,
        }
    }
}

impl<K, V> Clone for WeightBalancedMapIterator<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            front: self.front.clone(),
            back: self.back.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Iterator for WeightBalancedMapIterator<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.front.pop()?;
        push_left_spine(node.right.as_ref(), &mut self.front);
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for WeightBalancedMapIterator<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.back.pop()?;
        push_right_spine(node.left.as_ref(), &mut self.back);
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }
}

impl<K, V> ExactSizeIterator for WeightBalancedMapIterator<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for WeightBalancedMapIterator<'_, K, V> {}

/// An iterator over the keys of a map in ascending order.
pub struct WeightBalancedMapKeys<'a, K, V> {
    pub(super) inner: WeightBalancedMapIterator<'a, K, V>,
}

impl<'a, K, V> Iterator for WeightBalancedMapKeys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for WeightBalancedMapKeys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, _)| key)
    }
}

impl<K, V> ExactSizeIterator for WeightBalancedMapKeys<'_, K, V> {}

/// An iterator over the values of a map in ascending key order.
pub struct WeightBalancedMapValues<'a, K, V> {
    pub(super) inner: WeightBalancedMapIterator<'a, K, V>,
}

impl<'a, K, V> Iterator for WeightBalancedMapValues<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for WeightBalancedMapValues<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

impl<K, V> ExactSizeIterator for WeightBalancedMapValues<'_, K, V> {}

/// An owning iterator over key-value pairs in ascending key order.
///
/// Nodes may be shared with other map versions, so entries are cloned out of
/// the tree when the iterator is created.
pub struct WeightBalancedMapIntoIterator<K, V> {
    pub(super) entries: std::vec::IntoIter<(K, V)>,
}

impl<K, V> Iterator for WeightBalancedMapIntoIterator<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for WeightBalancedMapIntoIterator<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.entries.next_back()
    }
}

impl<K, V> ExactSizeIterator for WeightBalancedMapIntoIterator<K, V> {}
