//! Node definition shared by the plain and the balanced tree.
//!
//! Nodes live in an [`Arena`](crate::arena::Arena) and refer to each other by
//! `Option<u32>` indices into it. The parent link is navigation only; the tree
//! owns every node reachable from its root through the arena.

use std::cmp::Ordering;

/// Comparator used by the trees.
pub type Comparator<K> = fn(&K, &K) -> Ordering;

/// Which child slot of its parent a node occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Tree node.
#[derive(Clone, Debug)]
pub struct Node<K, V> {
    pub p: Option<u32>,
    pub l: Option<u32>,
    pub r: Option<u32>,
    pub k: K,
    pub v: V,
    /// Balance factor, `height(right) - height(left)`.
    ///
    /// Steady state is `-1..=1`; `±2` only appears while a fix-up is running.
    /// Unused (always 0) in the plain binary search tree.
    pub bf: i8,
}

impl<K, V> Node<K, V> {
    pub fn new(k: K, v: V) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            k,
            v,
            bf: 0,
        }
    }

    /// New leaf already linked up to `parent`.
    pub fn with_parent(k: K, v: V, parent: Option<u32>) -> Self {
        Self {
            p: parent,
            ..Self::new(k, v)
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.l.is_none() && self.r.is_none()
    }

    pub fn has_two_children(&self) -> bool {
        self.l.is_some() && self.r.is_some()
    }

    pub fn child(&self, side: Side) -> Option<u32> {
        match side {
            Side::Left => self.l,
            Side::Right => self.r,
        }
    }

    pub fn set_child(&mut self, side: Side, v: Option<u32>) {
        match side {
            Side::Left => self.l = v,
            Side::Right => self.r = v,
        }
    }
}

/// Natural ordering comparator.
pub fn default_comparator<K: Ord>(a: &K, b: &K) -> Ordering {
    a.cmp(b)
}
