//! Plain, unbalanced binary search tree.
//!
//! This is the base the AVL tree builds on: it owns the node arena and the
//! root, and provides insertion at the correct leaf, lookup, in-order
//! neighbours, the structural node swap and traversal. [`AvlTree`] reuses all
//! of it and replaces only `insert` and `remove`.
//!
//! [`AvlTree`]: crate::avl::AvlTree

pub mod iter;

use std::cmp::Ordering;
use std::fmt::{self, Debug};

use crate::arena::Arena;
use crate::error::ValidationError;
use crate::types::{default_comparator, Comparator, Node, Side};
use crate::util::{self, Slot};

pub use iter::{Iter, Keys, Values};

pub struct BinarySearchTree<K, V, C = Comparator<K>>
where
    C: Fn(&K, &K) -> Ordering,
{
    pub(crate) arena: Arena<K, V>,
    pub(crate) root: Option<u32>,
    comparator: C,
}

impl<K: Ord, V> BinarySearchTree<K, V> {
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<K>)
    }
}

impl<K: Ord, V> Default for BinarySearchTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> BinarySearchTree<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            comparator,
        }
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    pub fn root(&self) -> Option<u32> {
        self.root
    }

    pub(crate) fn set_root(&mut self, root: Option<u32>) {
        self.root = root;
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    pub fn node(&self, idx: u32) -> &Node<K, V> {
        &self.arena[idx]
    }

    pub fn key(&self, idx: u32) -> &K {
        &self.arena[idx].k
    }

    pub fn value(&self, idx: u32) -> &V {
        &self.arena[idx].v
    }

    pub fn value_mut(&mut self, idx: u32) -> &mut V {
        &mut self.arena[idx].v
    }

    pub fn find(&self, key: &K) -> Option<u32> {
        util::find(&self.arena, self.root, key, &self.comparator)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(key).map(|i| &self.arena[i].v)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let idx = self.find(key)?;
        Some(&mut self.arena[idx].v)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Entry with the greatest key not above `key`.
    pub fn get_or_next_lower(&self, key: &K) -> Option<(&K, &V)> {
        util::find_or_next_lower(&self.arena, self.root, key, &self.comparator).map(|i| self.entry(i))
    }

    /// In-order predecessor of the node at `idx`.
    pub fn predecessor(&self, idx: u32) -> Option<u32> {
        util::prev(&self.arena, idx)
    }

    /// In-order successor of the node at `idx`.
    pub fn successor(&self, idx: u32) -> Option<u32> {
        util::next(&self.arena, idx)
    }

    /// Exchanges the tree positions of two nodes, links and root pointer
    /// included. Keys, values and balance factors stay with their nodes.
    pub fn node_swap(&mut self, a: u32, b: u32) {
        let Some(root) = self.root else {
            return;
        };
        self.root = Some(util::swap(&mut self.arena, root, a, b));
    }

    pub fn first(&self) -> Option<(&K, &V)> {
        util::first(&self.arena, self.root).map(|i| self.entry(i))
    }

    pub fn last(&self) -> Option<(&K, &V)> {
        util::last(&self.arena, self.root).map(|i| self.entry(i))
    }

    pub fn height(&self) -> usize {
        util::height(&self.arena, self.root)
    }

    /// Whether every node's subtrees differ in height by at most one.
    pub fn is_balanced(&self) -> bool {
        fn balanced_height<K, V>(arena: &Arena<K, V>, node: Option<u32>) -> Option<usize> {
            let Some(i) = node else {
                return Some(0);
            };
            let l = balanced_height(arena, arena[i].l)?;
            let r = balanced_height(arena, arena[i].r)?;
            (l.abs_diff(r) <= 1).then_some(1 + l.max(r))
        }
        balanced_height(&self.arena, self.root).is_some()
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.arena, self.root)
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Unbalanced insert. Overwrites and returns the old value when `key` is
    /// already present.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match util::locate(&self.arena, self.root, &key, &self.comparator) {
            None => {
                self.root = Some(self.arena.alloc(Node::new(key, value)));
                None
            }
            Some(Slot::Occupied(idx)) => Some(std::mem::replace(&mut self.arena[idx].v, value)),
            Some(Slot::Vacant { parent, side }) => {
                self.attach(parent, side, key, value);
                None
            }
        }
    }

    /// Unbalanced remove. Returns the removed value, `None` if `key` is absent.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let n = self.find(key)?;
        while self.arena[n].has_two_children() {
            let pred = util::last(&self.arena, self.arena[n].l).expect("left subtree exists");
            self.node_swap(pred, n);
        }

        // At most one child is left; it takes `n`'s place under the parent.
        let (p, child) = (self.arena[n].p, self.arena[n].l.or(self.arena[n].r));
        if let Some(child) = child {
            util::set_p(&mut self.arena, child, p);
        }
        self.root = util::replace_child(&mut self.arena, self.root, p, n, child);
        Some(self.arena.dealloc(n).v)
    }

    /// Allocates a new leaf under `parent` on `side`.
    pub(crate) fn attach(&mut self, parent: u32, side: Side, key: K, value: V) -> u32 {
        let idx = self.arena.alloc(Node::with_parent(key, value, Some(parent)));
        self.arena[parent].set_child(side, Some(idx));
        idx
    }

    /// Unlinks leaf `n` from its parent and frees its slot.
    pub(crate) fn detach_leaf(&mut self, n: u32) -> Node<K, V> {
        assert!(self.arena[n].is_leaf(), "node {n} is not a leaf");
        let p = self.arena[n].p;
        self.root = util::replace_child(&mut self.arena, self.root, p, n, None);
        self.arena.dealloc(n)
    }

    fn entry(&self, idx: u32) -> (&K, &V) {
        let n = &self.arena[idx];
        (&n.k, &n.v)
    }

    /// Checks parent back-links, strict key order and the node count.
    pub fn assert_valid(&self) -> Result<(), ValidationError> {
        let Some(root) = self.root else {
            return match self.arena.len() {
                0 => Ok(()),
                actual => Err(ValidationError::SizeMismatch { expected: 0, actual }),
            };
        };
        if self.arena[root].p.is_some() {
            return Err(ValidationError::RootHasParent { root });
        }

        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            for child in [self.arena[node].l, self.arena[node].r].into_iter().flatten() {
                if self.arena[child].p != Some(node) {
                    return Err(ValidationError::BrokenParentLink { node, child });
                }
                stack.push(child);
            }
        }

        let mut count = 0;
        let mut prev: Option<u32> = None;
        let mut curr = util::first(&self.arena, Some(root));
        while let Some(i) = curr {
            if let Some(p) = prev {
                if (self.comparator)(&self.arena[p].k, &self.arena[i].k) != Ordering::Less {
                    return Err(ValidationError::OrderViolated { node: i });
                }
            }
            count += 1;
            prev = Some(i);
            curr = util::next(&self.arena, i);
        }

        if count != self.arena.len() {
            return Err(ValidationError::SizeMismatch {
                expected: self.arena.len(),
                actual: count,
            });
        }
        Ok(())
    }
}

impl<K, V, C> BinarySearchTree<K, V, C>
where
    K: Debug,
    V: Debug,
    C: Fn(&K, &K) -> Ordering,
{
    pub fn print(&self) -> String {
        util::print(&self.arena, self.root, "")
    }
}

impl<K: Debug, V: Debug, C> Debug for BinarySearchTree<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V, C> IntoIterator for &'a BinarySearchTree<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
