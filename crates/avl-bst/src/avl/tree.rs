use std::cmp::Ordering;
use std::fmt::{self, Debug};

use crate::bst::{BinarySearchTree, Iter, Keys, Values};
use crate::error::ValidationError;
use crate::types::{default_comparator, Comparator, Node, Side};
use crate::util::{self, Slot};

use super::util::{assert_avl_tree, insert_fix, remove_fix};

/// Ordered map kept height-balanced by AVL rotations.
///
/// Builds on [`BinarySearchTree`] for storage, lookup and traversal; only
/// [`insert`](Self::insert) and [`remove`](Self::remove) differ, walking back
/// up from the changed node to restore `|balance| <= 1` everywhere.
pub struct AvlTree<K, V, C = Comparator<K>>
where
    C: Fn(&K, &K) -> Ordering,
{
    base: BinarySearchTree<K, V, C>,
}

impl<K: Ord, V> AvlTree<K, V> {
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<K>)
    }
}

impl<K: Ord, V> Default for AvlTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> AvlTree<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            base: BinarySearchTree::with_comparator(comparator),
        }
    }

    /// Inserts `key`, or overwrites its value if already present.
    ///
    /// Overwriting returns the old value and leaves the shape untouched.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let slot = util::locate(&self.base.arena, self.base.root, &key, self.base.comparator());
        let (parent, side) = match slot {
            None => {
                let idx = self.base.arena.alloc(Node::new(key, value));
                self.base.set_root(Some(idx));
                return None;
            }
            Some(Slot::Occupied(idx)) => {
                return Some(std::mem::replace(self.base.value_mut(idx), value));
            }
            Some(Slot::Vacant { parent, side }) => (parent, side),
        };

        let n = self.base.attach(parent, side, key, value);
        let arena = &mut self.base.arena;
        if arena[parent].bf != 0 {
            // Parent was leaning away from the new leaf; its height is unchanged.
            arena[parent].bf = 0;
            return None;
        }

        arena[parent].bf = match side {
            Side::Left => -1,
            Side::Right => 1,
        };
        if let Some(root) = self.base.root {
            let root = insert_fix(arena, root, parent, n);
            self.base.set_root(Some(root));
        }
        None
    }

    /// Removes `key`, returning its value. No-op if absent.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let Some(n) = self.base.find(key) else {
            tracing::debug!("remove: key not present");
            return None;
        };

        if self.base.arena[n].has_two_children() {
            let pred = util::last(&self.base.arena, self.base.arena[n].l)
                .expect("node with two children has a predecessor");
            self.node_swap(pred, n);
        }
        if let Some(child) = self.base.arena[n].l.or(self.base.arena[n].r) {
            self.node_swap(child, n);
        }

        let p = self.base.arena[n].p;
        let diff = if util::is_left_child(&self.base.arena, n) { 1 } else { -1 };
        let removed = self.base.detach_leaf(n);

        if let Some(root) = self.base.root {
            let root = remove_fix(&mut self.base.arena, root, p, diff);
            self.base.set_root(Some(root));
        }
        Some(removed.v)
    }

    /// Structural swap of two nodes that also exchanges their balance
    /// factors, so each position keeps the balance it had.
    fn node_swap(&mut self, a: u32, b: u32) {
        self.base.node_swap(a, b);
        let arena = &mut self.base.arena;
        let tmp = arena[a].bf;
        arena[a].bf = arena[b].bf;
        arena[b].bf = tmp;
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.base.get(key)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.base.get_mut(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.base.contains_key(key)
    }

    pub fn get_or_next_lower(&self, key: &K) -> Option<(&K, &V)> {
        self.base.get_or_next_lower(key)
    }

    /// Arena index of the node holding `key`.
    pub fn find(&self, key: &K) -> Option<u32> {
        self.base.find(key)
    }

    pub fn root(&self) -> Option<u32> {
        self.base.root()
    }

    pub fn key(&self, idx: u32) -> &K {
        self.base.key(idx)
    }

    pub fn value(&self, idx: u32) -> &V {
        self.base.value(idx)
    }

    /// Balance factor of the node at `idx`, `height(right) - height(left)`.
    pub fn balance(&self, idx: u32) -> i8 {
        self.base.node(idx).bf
    }

    pub fn node(&self, idx: u32) -> &Node<K, V> {
        self.base.node(idx)
    }

    pub fn len(&self) -> usize {
        self.base.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }

    pub fn clear(&mut self) {
        self.base.clear();
    }

    pub fn height(&self) -> usize {
        self.base.height()
    }

    pub fn is_balanced(&self) -> bool {
        self.base.is_balanced()
    }

    pub fn first(&self) -> Option<(&K, &V)> {
        self.base.first()
    }

    pub fn last(&self) -> Option<(&K, &V)> {
        self.base.last()
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        self.base.iter()
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        self.base.keys()
    }

    pub fn values(&self) -> Values<'_, K, V> {
        self.base.values()
    }

    /// Read-only view of the underlying plain tree.
    pub fn as_bst(&self) -> &BinarySearchTree<K, V, C> {
        &self.base
    }

    pub fn assert_valid(&self) -> Result<(), ValidationError> {
        self.base.assert_valid()?;
        assert_avl_tree(&self.base.arena, self.base.root, self.base.comparator())
    }
}

impl<K, V, C> AvlTree<K, V, C>
where
    K: Debug,
    V: Debug,
    C: Fn(&K, &K) -> Ordering,
{
    pub fn print(&self) -> String {
        self.base.print()
    }
}

impl<K: Debug, V: Debug, C> Debug for AvlTree<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.base.fmt(f)
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for AvlTree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K, V, C> Extend<(K, V)> for AvlTree<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K, V, C> IntoIterator for &'a AvlTree<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
