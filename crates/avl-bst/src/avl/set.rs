use std::cmp::Ordering;
use std::fmt::{self, Debug};

use crate::bst::Keys;
use crate::error::ValidationError;
use crate::types::{default_comparator, Comparator};

use super::tree::AvlTree;

/// AVL tree set backed by [`AvlTree<K, ()>`].
pub struct AvlSet<K, C = Comparator<K>>
where
    C: Fn(&K, &K) -> Ordering,
{
    inner: AvlTree<K, (), C>,
}

impl<K: Ord> AvlSet<K> {
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<K>)
    }
}

impl<K: Ord> Default for AvlSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, C> AvlSet<K, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            inner: AvlTree::with_comparator(comparator),
        }
    }

    /// Adds `value`; `false` if it was already present.
    pub fn insert(&mut self, value: K) -> bool {
        self.inner.insert(value, ()).is_none()
    }

    /// Removes `value`; `false` if it was not present.
    pub fn remove(&mut self, value: &K) -> bool {
        self.inner.remove(value).is_some()
    }

    pub fn contains(&self, value: &K) -> bool {
        self.inner.contains_key(value)
    }

    pub fn clear(&mut self) {
        self.inner.clear()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn height(&self) -> usize {
        self.inner.height()
    }

    pub fn first(&self) -> Option<&K> {
        self.inner.first().map(|(k, _)| k)
    }

    pub fn last(&self) -> Option<&K> {
        self.inner.last().map(|(k, _)| k)
    }

    pub fn get_or_next_lower(&self, value: &K) -> Option<&K> {
        self.inner.get_or_next_lower(value).map(|(k, _)| k)
    }

    pub fn iter(&self) -> Keys<'_, K, ()> {
        self.inner.keys()
    }

    pub fn assert_valid(&self) -> Result<(), ValidationError> {
        self.inner.assert_valid()
    }
}

impl<K: Debug, C> Debug for AvlSet<K, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K: Ord> FromIterator<K> for AvlSet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<K, C> Extend<K> for AvlSet<K, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for k in iter {
            self.insert(k);
        }
    }
}

impl<'a, K, C> IntoIterator for &'a AvlSet<K, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    type Item = &'a K;
    type IntoIter = Keys<'a, K, ()>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
