use crate::arena::Arena;
use crate::types::Side;

use super::{get_l, get_p, get_r, set_p, side_of};

/// A node's links plus the side it hangs from, captured before any rewiring.
#[derive(Clone, Copy)]
struct Position {
    p: Option<u32>,
    l: Option<u32>,
    r: Option<u32>,
    side: Option<Side>,
}

impl Position {
    fn of<K, V>(arena: &Arena<K, V>, idx: u32) -> Self {
        Self {
            p: get_p(arena, idx),
            l: get_l(arena, idx),
            r: get_r(arena, idx),
            side: side_of(arena, idx),
        }
    }
}

/// Exchanges the tree positions of nodes `x` and `y`.
///
/// Only links move: each node keeps its key, value and balance. Works for
/// any pair, including parent and child or two children of one parent.
/// Returns the new root.
pub fn swap<K, V>(arena: &mut Arena<K, V>, root: u32, x: u32, y: u32) -> u32 {
    if x == y {
        return root;
    }

    let at_x = Position::of(arena, x);
    let at_y = Position::of(arena, y);
    // Links between the pair flip to the partner.
    let other = |link: Option<u32>| {
        link.map(|i| match i {
            i if i == x => y,
            i if i == y => x,
            i => i,
        })
    };

    occupy(arena, x, y, at_y, other);
    occupy(arena, y, x, at_x, other);

    match (at_x.p, at_y.p) {
        (None, _) => y,
        (_, None) => x,
        _ => root,
    }
}

/// Moves `node` into position `pos`, formerly held by `partner`, and points
/// the surrounding nodes back at it. Links between the pair itself are left
/// to the partner's own move.
fn occupy<K, V>(
    arena: &mut Arena<K, V>,
    node: u32,
    partner: u32,
    pos: Position,
    other: impl Fn(Option<u32>) -> Option<u32>,
) {
    let (l, r) = (other(pos.l), other(pos.r));
    {
        let n = &mut arena[node];
        n.p = other(pos.p);
        n.l = l;
        n.r = r;
    }
    for child in [l, r].into_iter().flatten().filter(|&c| c != partner) {
        set_p(arena, child, Some(node));
    }
    if let (Some(p), Some(side)) = (pos.p, pos.side) {
        if p != node {
            arena[p].set_child(side, Some(node));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Node;
    use crate::util::{first, next, set_l, set_r};

    fn keys(arena: &Arena<i32, ()>, root: u32) -> Vec<i32> {
        let mut out = Vec::new();
        let mut curr = first(arena, Some(root));
        while let Some(i) = curr {
            out.push(arena[i].k);
            curr = next(arena, i);
        }
        out
    }

    /// ```text
    ///     2
    ///   1   3
    /// ```
    fn small() -> (Arena<i32, ()>, [u32; 3]) {
        let mut arena = Arena::new();
        let one = arena.alloc(Node::new(1, ()));
        let two = arena.alloc(Node::new(2, ()));
        let three = arena.alloc(Node::new(3, ()));
        set_l(&mut arena, two, Some(one));
        set_r(&mut arena, two, Some(three));
        set_p(&mut arena, one, Some(two));
        set_p(&mut arena, three, Some(two));
        (arena, [one, two, three])
    }

    #[test]
    fn swaps_root_with_its_child() {
        let (mut arena, [one, two, three]) = small();
        let root = swap(&mut arena, two, one, two);
        assert_eq!(root, one);
        assert_eq!(arena[one].p, None);
        assert_eq!(arena[one].l, Some(two));
        assert_eq!(arena[one].r, Some(three));
        assert_eq!(arena[two].p, Some(one));
        assert!(arena[two].is_leaf());
        assert_eq!(arena[three].p, Some(one));
        // Keys now out of order: 2 sits left of 1.
        assert_eq!(keys(&arena, root), vec![2, 1, 3]);
    }

    #[test]
    fn swaps_siblings() {
        let (mut arena, [one, two, three]) = small();
        let root = swap(&mut arena, two, one, three);
        assert_eq!(root, two);
        assert_eq!(arena[two].l, Some(three));
        assert_eq!(arena[two].r, Some(one));
        assert_eq!(arena[one].p, Some(two));
        assert_eq!(arena[three].p, Some(two));
        assert_eq!(keys(&arena, root), vec![3, 2, 1]);
    }

    #[test]
    fn swaps_siblings_below_the_root_with_their_subtrees() {
        // 4 -> (2 -> (1, 3), 6); swap 1 and 3, then 2 and 6.
        let mut arena = Arena::new();
        let idx: Vec<u32> = (1..=6).map(|k| arena.alloc(Node::new(k, ()))).collect();
        let [one, two, three, four, _, six] = [idx[0], idx[1], idx[2], idx[3], idx[4], idx[5]];
        set_l(&mut arena, four, Some(two));
        set_r(&mut arena, four, Some(six));
        set_p(&mut arena, two, Some(four));
        set_p(&mut arena, six, Some(four));
        set_l(&mut arena, two, Some(one));
        set_r(&mut arena, two, Some(three));
        set_p(&mut arena, one, Some(two));
        set_p(&mut arena, three, Some(two));

        let root = swap(&mut arena, four, one, three);
        assert_eq!(root, four);
        assert_eq!(arena[two].l, Some(three));
        assert_eq!(arena[two].r, Some(one));
        assert_eq!(arena[one].p, Some(two));
        assert_eq!(arena[three].p, Some(two));

        let root = swap(&mut arena, root, two, six);
        assert_eq!(root, four);
        assert_eq!(arena[four].l, Some(six));
        assert_eq!(arena[four].r, Some(two));
        assert_eq!(arena[two].p, Some(four));
        assert_eq!(arena[six].p, Some(four));
        // 2 keeps its own children when it moves.
        assert_eq!(arena[two].l, Some(three));
        assert_eq!(arena[three].p, Some(two));
        assert_eq!(keys(&arena, root), vec![6, 4, 3, 2, 1]);
    }

    #[test]
    fn swaps_distant_nodes() {
        let (mut arena, [one, two, three]) = small();
        let four = arena.alloc(Node::new(4, ()));
        set_r(&mut arena, three, Some(four));
        set_p(&mut arena, four, Some(three));

        let root = swap(&mut arena, two, one, four);
        assert_eq!(root, two);
        assert_eq!(arena[two].l, Some(four));
        assert_eq!(arena[three].r, Some(one));
        assert_eq!(arena[one].p, Some(three));
        assert_eq!(arena[four].p, Some(two));
        assert_eq!(keys(&arena, root), vec![4, 2, 3, 1]);
    }

    #[test]
    fn swap_with_self_is_noop() {
        let (mut arena, [_, two, _]) = small();
        assert_eq!(swap(&mut arena, two, two, two), two);
        assert_eq!(keys(&arena, two), vec![1, 2, 3]);
    }
}
