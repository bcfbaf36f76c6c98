//! Base-tree helpers over an [`Arena`].
//!
//! Everything here is balance-agnostic: plain binary-search-tree navigation,
//! lookup and the structural node swap. The balanced tree calls into these and
//! layers its own bookkeeping on top.

pub mod print;
pub mod swap;

use std::cmp::Ordering;

use crate::arena::Arena;
use crate::types::Side;

pub use print::print;
pub use swap::swap;

#[inline]
pub(crate) fn get_p<K, V>(arena: &Arena<K, V>, idx: u32) -> Option<u32> {
    arena[idx].p
}

#[inline]
pub(crate) fn get_l<K, V>(arena: &Arena<K, V>, idx: u32) -> Option<u32> {
    arena[idx].l
}

#[inline]
pub(crate) fn get_r<K, V>(arena: &Arena<K, V>, idx: u32) -> Option<u32> {
    arena[idx].r
}

#[inline]
pub(crate) fn set_p<K, V>(arena: &mut Arena<K, V>, idx: u32, v: Option<u32>) {
    arena[idx].p = v;
}

#[inline]
pub(crate) fn set_l<K, V>(arena: &mut Arena<K, V>, idx: u32, v: Option<u32>) {
    arena[idx].l = v;
}

#[inline]
pub(crate) fn set_r<K, V>(arena: &mut Arena<K, V>, idx: u32, v: Option<u32>) {
    arena[idx].r = v;
}

/// Side of its parent `idx` hangs on, `None` for the root.
pub fn side_of<K, V>(arena: &Arena<K, V>, idx: u32) -> Option<Side> {
    let p = get_p(arena, idx)?;
    if get_l(arena, p) == Some(idx) {
        Some(Side::Left)
    } else {
        Some(Side::Right)
    }
}

pub fn is_left_child<K, V>(arena: &Arena<K, V>, idx: u32) -> bool {
    side_of(arena, idx) == Some(Side::Left)
}

pub fn is_right_child<K, V>(arena: &Arena<K, V>, idx: u32) -> bool {
    side_of(arena, idx) == Some(Side::Right)
}

/// Points `parent`'s link that currently holds `old` at `new`.
///
/// With no parent, `new` becomes the root and is returned as such; otherwise
/// `root` is returned unchanged. Does not touch `new`'s parent link.
pub(crate) fn replace_child<K, V>(
    arena: &mut Arena<K, V>,
    root: Option<u32>,
    parent: Option<u32>,
    old: u32,
    new: Option<u32>,
) -> Option<u32> {
    match parent {
        None => new,
        Some(p) => {
            if get_l(arena, p) == Some(old) {
                set_l(arena, p, new);
            } else {
                set_r(arena, p, new);
            }
            root
        }
    }
}

/// Leftmost node in the tree.
pub fn first<K, V>(arena: &Arena<K, V>, root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(l) = get_l(arena, curr) {
        curr = l;
    }
    Some(curr)
}

/// Rightmost node in the tree.
pub fn last<K, V>(arena: &Arena<K, V>, root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(r) = get_r(arena, curr) {
        curr = r;
    }
    Some(curr)
}

/// In-order successor.
pub fn next<K, V>(arena: &Arena<K, V>, mut curr: u32) -> Option<u32> {
    if let Some(r) = get_r(arena, curr) {
        return first(arena, Some(r));
    }
    let mut p = get_p(arena, curr);
    while let Some(pi) = p {
        if get_r(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// In-order predecessor.
pub fn prev<K, V>(arena: &Arena<K, V>, mut curr: u32) -> Option<u32> {
    if let Some(l) = get_l(arena, curr) {
        return last(arena, Some(l));
    }
    let mut p = get_p(arena, curr);
    while let Some(pi) = p {
        if get_l(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

fn size_inner<K, V>(arena: &Arena<K, V>, root: u32) -> usize {
    1 + get_l(arena, root).map_or(0, |l| size_inner(arena, l))
        + get_r(arena, root).map_or(0, |r| size_inner(arena, r))
}

/// Number of nodes reachable from `root`.
pub fn size<K, V>(arena: &Arena<K, V>, root: Option<u32>) -> usize {
    root.map_or(0, |r| size_inner(arena, r))
}

/// Height of the subtree at `root`; an empty subtree has height 0.
pub fn height<K, V>(arena: &Arena<K, V>, root: Option<u32>) -> usize {
    root.map_or(0, |i| {
        1 + height(arena, get_l(arena, i)).max(height(arena, get_r(arena, i)))
    })
}

/// Finds a node by key.
pub fn find<K, V, C>(arena: &Arena<K, V>, root: Option<u32>, key: &K, comparator: &C) -> Option<u32>
where
    C: Fn(&K, &K) -> Ordering,
{
    let mut curr = root;
    while let Some(i) = curr {
        curr = match comparator(key, &arena[i].k) {
            Ordering::Equal => return Some(i),
            Ordering::Less => get_l(arena, i),
            Ordering::Greater => get_r(arena, i),
        };
    }
    None
}

/// Finds node by key, or the next lower node if the exact key does not exist.
pub fn find_or_next_lower<K, V, C>(
    arena: &Arena<K, V>,
    root: Option<u32>,
    key: &K,
    comparator: &C,
) -> Option<u32>
where
    C: Fn(&K, &K) -> Ordering,
{
    let mut curr = root;
    let mut result: Option<u32> = None;
    while let Some(i) = curr {
        match comparator(&arena[i].k, key) {
            Ordering::Equal => return Some(i),
            Ordering::Greater => curr = get_l(arena, i),
            Ordering::Less => {
                result = Some(i);
                curr = get_r(arena, i);
            }
        }
    }
    result
}

/// Where a key belongs in the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    /// A node with an equal key already exists.
    Occupied(u32),
    /// Empty child slot of `parent` on `side`.
    Vacant { parent: u32, side: Side },
}

/// Descends from `root` to the node holding `key` or to the leaf slot it
/// would be attached at. `None` for an empty tree.
pub fn locate<K, V, C>(arena: &Arena<K, V>, root: Option<u32>, key: &K, comparator: &C) -> Option<Slot>
where
    C: Fn(&K, &K) -> Ordering,
{
    let mut curr = root?;
    loop {
        let (side, child) = match comparator(key, &arena[curr].k) {
            Ordering::Equal => return Some(Slot::Occupied(curr)),
            Ordering::Less => (Side::Left, get_l(arena, curr)),
            Ordering::Greater => (Side::Right, get_r(arena, curr)),
        };
        match child {
            Some(next) => curr = next,
            None => return Some(Slot::Vacant { parent: curr, side }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{default_comparator, Node};

    /// Builds
    /// ```text
    ///       4
    ///     2   6
    ///    1 3 5 7
    /// ```
    fn full_tree() -> (Arena<i32, ()>, u32) {
        let mut arena = Arena::new();
        let ids: Vec<u32> = (1..=7).map(|k| arena.alloc(Node::new(k, ()))).collect();
        let link = |arena: &mut Arena<i32, ()>, p: usize, l: usize, r: usize| {
            set_l(arena, ids[p - 1], Some(ids[l - 1]));
            set_r(arena, ids[p - 1], Some(ids[r - 1]));
            set_p(arena, ids[l - 1], Some(ids[p - 1]));
            set_p(arena, ids[r - 1], Some(ids[p - 1]));
        };
        link(&mut arena, 4, 2, 6);
        link(&mut arena, 2, 1, 3);
        link(&mut arena, 6, 5, 7);
        (arena, ids[3])
    }

    #[test]
    fn walks_in_order_both_ways() {
        let (arena, root) = full_tree();
        let mut keys = Vec::new();
        let mut curr = first(&arena, Some(root));
        while let Some(i) = curr {
            keys.push(arena[i].k);
            curr = next(&arena, i);
        }
        assert_eq!(keys, vec![1, 2, 3, 4, 5, 6, 7]);

        let mut keys = Vec::new();
        let mut curr = last(&arena, Some(root));
        while let Some(i) = curr {
            keys.push(arena[i].k);
            curr = prev(&arena, i);
        }
        assert_eq!(keys, vec![7, 6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn size_height_and_lookup() {
        let (arena, root) = full_tree();
        assert_eq!(size(&arena, Some(root)), 7);
        assert_eq!(height(&arena, Some(root)), 3);
        assert_eq!(height(&arena, None), 0);

        let cmp = default_comparator::<i32>;
        let five = find(&arena, Some(root), &5, &cmp).map(|i| arena[i].k);
        assert_eq!(five, Some(5));
        assert_eq!(find(&arena, Some(root), &8, &cmp), None);

        let lower = find_or_next_lower(&arena, Some(root), &0, &cmp);
        assert_eq!(lower, None);
        let lower = find_or_next_lower(&arena, Some(root), &100, &cmp).map(|i| arena[i].k);
        assert_eq!(lower, Some(7));
    }

    #[test]
    fn locate_reports_attach_point() {
        let (arena, root) = full_tree();
        let cmp = default_comparator::<i32>;
        match locate(&arena, Some(root), &8, &cmp) {
            Some(Slot::Vacant { parent, side }) => {
                assert_eq!(arena[parent].k, 7);
                assert_eq!(side, Side::Right);
            }
            other => panic!("unexpected slot {other:?}"),
        }
        assert!(matches!(locate(&arena, Some(root), &2, &cmp), Some(Slot::Occupied(_))));
        assert_eq!(locate(&arena, None, &2, &cmp), None);
    }

    #[test]
    fn child_sides() {
        let (arena, root) = full_tree();
        let two = arena[root].l.unwrap();
        let six = arena[root].r.unwrap();
        assert!(is_left_child(&arena, two));
        assert!(is_right_child(&arena, six));
        assert_eq!(side_of(&arena, root), None);
        assert!(!is_left_child(&arena, root));
    }
}
