//! Node storage addressed by stable `u32` indices.
//!
//! Slots vacated by removal are kept on a free list and handed out again by
//! the next allocation, so an index stays valid exactly as long as its node
//! is in the tree.

use std::ops::{Index, IndexMut};

use crate::types::Node;

#[derive(Clone, Debug)]
pub struct Arena<K, V> {
    slots: Vec<Option<Node<K, V>>>,
    free: Vec<u32>,
}

impl<K, V> Default for Arena<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Arena<K, V> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Stores `node` and returns its index.
    pub fn alloc(&mut self, node: Node<K, V>) -> u32 {
        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx as usize] = Some(node);
                idx
            }
            None => {
                self.slots.push(Some(node));
                (self.slots.len() - 1) as u32
            }
        };
        tracing::trace!(idx, "node allocated");
        idx
    }

    /// Vacates slot `idx` and hands the node back to the caller.
    ///
    /// Panics if the slot is already vacant.
    pub fn dealloc(&mut self, idx: u32) -> Node<K, V> {
        let Some(node) = self.slots.get_mut(idx as usize).and_then(Option::take) else {
            panic!("dealloc of vacant arena slot {idx}");
        };
        self.free.push(idx);
        tracing::trace!(idx, "node deallocated");
        node
    }

    pub fn get(&self, idx: u32) -> Option<&Node<K, V>> {
        self.slots.get(idx as usize).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, idx: u32) -> Option<&mut Node<K, V>> {
        self.slots.get_mut(idx as usize).and_then(Option::as_mut)
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of slots ever handed out, live or vacant.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

impl<K, V> Index<u32> for Arena<K, V> {
    type Output = Node<K, V>;

    fn index(&self, idx: u32) -> &Self::Output {
        match self.get(idx) {
            Some(node) => node,
            None => panic!("vacant arena slot {idx}"),
        }
    }
}

impl<K, V> IndexMut<u32> for Arena<K, V> {
    fn index_mut(&mut self, idx: u32) -> &mut Self::Output {
        match self.get_mut(idx) {
            Some(node) => node,
            None => panic!("vacant arena slot {idx}"),
        }
    }
}
