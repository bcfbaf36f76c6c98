//! Balance maintenance: rotations and the two fix-up walks.
//!
//! All functions take the arena plus the current root and return the root
//! after the operation, since a rotation at the top promotes a new node.
//! Balance factors are `height(right) - height(left)`.

use std::cmp::Ordering;

use crate::arena::Arena;
use crate::error::ValidationError;
use crate::util::{first, get_l, get_p, get_r, height, is_left_child, next, set_l, set_p, set_r};

#[inline]
fn bf<K, V>(arena: &Arena<K, V>, i: u32) -> i8 {
    arena[i].bf
}

#[inline]
fn set_bf<K, V>(arena: &mut Arena<K, V>, i: u32, v: i8) {
    arena[i].bf = v;
}

/// Rotates the subtree at `r` to the left around its right child.
///
/// The right child takes `r`'s place (becoming root if `r` was), `r` becomes
/// its left child and inherits its former left subtree. Balance factors are
/// left to the caller. No-op if `r` has no right child.
pub fn rotate_left<K, V>(arena: &mut Arena<K, V>, root: u32, r: u32) -> u32 {
    let Some(c) = get_r(arena, r) else {
        return root;
    };
    let p = get_p(arena, r);
    let cl = get_l(arena, c);

    set_r(arena, r, cl);
    if let Some(cl) = cl {
        set_p(arena, cl, Some(r));
    }

    let root = match p {
        None => c,
        Some(p) => {
            if get_l(arena, p) == Some(r) {
                set_l(arena, p, Some(c));
            } else {
                set_r(arena, p, Some(c));
            }
            root
        }
    };

    set_p(arena, c, p);
    set_l(arena, c, Some(r));
    set_p(arena, r, Some(c));
    tracing::trace!(pivot = r, top = c, "rotate left");
    root
}

/// Mirror of [`rotate_left`], pivoting on `r`'s left child.
pub fn rotate_right<K, V>(arena: &mut Arena<K, V>, root: u32, r: u32) -> u32 {
    let Some(c) = get_l(arena, r) else {
        return root;
    };
    let p = get_p(arena, r);
    let cr = get_r(arena, c);

    set_l(arena, r, cr);
    if let Some(cr) = cr {
        set_p(arena, cr, Some(r));
    }

    let root = match p {
        None => c,
        Some(p) => {
            if get_r(arena, p) == Some(r) {
                set_r(arena, p, Some(c));
            } else {
                set_l(arena, p, Some(c));
            }
            root
        }
    };

    set_p(arena, c, p);
    set_r(arena, c, Some(r));
    set_p(arena, r, Some(c));
    tracing::trace!(pivot = r, top = c, "rotate right");
    root
}

/// Propagates a height increase of `p`'s subtree, where `n` is the child of
/// `p` whose subtree grew.
///
/// Stops at the root, when an ancestor absorbs the growth, or after the one
/// rotation an insertion can need.
pub fn insert_fix<K, V>(arena: &mut Arena<K, V>, root: u32, p: u32, n: u32) -> u32 {
    let Some(g) = get_p(arena, p) else {
        return root;
    };

    if is_left_child(arena, p) {
        let gbf = bf(arena, g) - 1;
        set_bf(arena, g, gbf);
        match gbf {
            0 => root,
            -1 => insert_fix(arena, root, g, p),
            -2 => {
                if get_l(arena, p) == Some(n) {
                    let root = rotate_right(arena, root, g);
                    set_bf(arena, p, 0);
                    set_bf(arena, g, 0);
                    tracing::trace!(node = g, "insert fix: zig-zig left");
                    root
                } else {
                    let nbf = bf(arena, n);
                    let root = rotate_left(arena, root, p);
                    let root = rotate_right(arena, root, g);
                    let (pbf, gbf) = match nbf {
                        -1 => (0, 1),
                        1 => (-1, 0),
                        _ => (0, 0),
                    };
                    set_bf(arena, p, pbf);
                    set_bf(arena, g, gbf);
                    set_bf(arena, n, 0);
                    tracing::trace!(node = g, "insert fix: zig-zag left");
                    root
                }
            }
            other => unreachable!("node {g}: balance {other} during insert fix"),
        }
    } else {
        let gbf = bf(arena, g) + 1;
        set_bf(arena, g, gbf);
        match gbf {
            0 => root,
            1 => insert_fix(arena, root, g, p),
            2 => {
                if get_r(arena, p) == Some(n) {
                    let root = rotate_left(arena, root, g);
                    set_bf(arena, p, 0);
                    set_bf(arena, g, 0);
                    tracing::trace!(node = g, "insert fix: zig-zig right");
                    root
                } else {
                    let nbf = bf(arena, n);
                    let root = rotate_right(arena, root, p);
                    let root = rotate_left(arena, root, g);
                    let (pbf, gbf) = match nbf {
                        1 => (0, -1),
                        -1 => (1, 0),
                        _ => (0, 0),
                    };
                    set_bf(arena, p, pbf);
                    set_bf(arena, g, gbf);
                    set_bf(arena, n, 0);
                    tracing::trace!(node = g, "insert fix: zig-zag right");
                    root
                }
            }
            other => unreachable!("node {g}: balance {other} during insert fix"),
        }
    }
}

/// Propagates a height decrease below `n`.
///
/// `diff` is the shift of `n`'s balance: `+1` when its left subtree shrank,
/// `-1` when its right subtree shrank. Unlike insertion this may rotate at
/// every level on the way up.
pub fn remove_fix<K, V>(arena: &mut Arena<K, V>, root: u32, n: Option<u32>, diff: i8) -> u32 {
    let Some(n) = n else {
        return root;
    };

    let p = get_p(arena, n);
    let ndiff = if is_left_child(arena, n) { 1 } else { -1 };
    let nbf = bf(arena, n) + diff;

    if diff == -1 {
        match nbf {
            -2 => {
                let c = get_l(arena, n).expect("left-heavy node has a left child");
                match bf(arena, c) {
                    -1 => {
                        let root = rotate_right(arena, root, n);
                        set_bf(arena, n, 0);
                        set_bf(arena, c, 0);
                        remove_fix(arena, root, p, ndiff)
                    }
                    0 => {
                        let root = rotate_right(arena, root, n);
                        set_bf(arena, n, -1);
                        set_bf(arena, c, 1);
                        root
                    }
                    _ => {
                        let g = get_r(arena, c).expect("right-heavy node has a right child");
                        let gbf = bf(arena, g);
                        let root = rotate_left(arena, root, c);
                        let root = rotate_right(arena, root, n);
                        let (nb, cb) = match gbf {
                            1 => (0, -1),
                            -1 => (1, 0),
                            _ => (0, 0),
                        };
                        set_bf(arena, n, nb);
                        set_bf(arena, c, cb);
                        set_bf(arena, g, 0);
                        remove_fix(arena, root, p, ndiff)
                    }
                }
            }
            -1 => {
                set_bf(arena, n, -1);
                root
            }
            0 => {
                set_bf(arena, n, 0);
                remove_fix(arena, root, p, ndiff)
            }
            other => unreachable!("node {n}: balance {other} during remove fix"),
        }
    } else {
        match nbf {
            2 => {
                let c = get_r(arena, n).expect("right-heavy node has a right child");
                match bf(arena, c) {
                    1 => {
                        let root = rotate_left(arena, root, n);
                        set_bf(arena, n, 0);
                        set_bf(arena, c, 0);
                        remove_fix(arena, root, p, ndiff)
                    }
                    0 => {
                        let root = rotate_left(arena, root, n);
                        set_bf(arena, n, 1);
                        set_bf(arena, c, -1);
                        root
                    }
                    _ => {
                        let g = get_l(arena, c).expect("left-heavy node has a left child");
                        let gbf = bf(arena, g);
                        let root = rotate_right(arena, root, c);
                        let root = rotate_left(arena, root, n);
                        let (nb, cb) = match gbf {
                            -1 => (0, 1),
                            1 => (-1, 0),
                            _ => (0, 0),
                        };
                        set_bf(arena, n, nb);
                        set_bf(arena, c, cb);
                        set_bf(arena, g, 0);
                        remove_fix(arena, root, p, ndiff)
                    }
                }
            }
            1 => {
                set_bf(arena, n, 1);
                root
            }
            0 => {
                set_bf(arena, n, 0);
                remove_fix(arena, root, p, ndiff)
            }
            other => unreachable!("node {n}: balance {other} during remove fix"),
        }
    }
}

/// Checks that every stored balance factor matches the real subtree heights
/// and stays within `-1..=1`, plus parent links and key order.
pub fn assert_avl_tree<K, V, C>(
    arena: &Arena<K, V>,
    root: Option<u32>,
    comparator: &C,
) -> Result<(), ValidationError>
where
    C: Fn(&K, &K) -> Ordering,
{
    let Some(root) = root else {
        return Ok(());
    };

    if get_p(arena, root).is_some() {
        return Err(ValidationError::RootHasParent { root });
    }

    fn validate_links_and_bf<K, V>(arena: &Arena<K, V>, node: u32) -> Result<(), ValidationError> {
        let l = get_l(arena, node);
        let r = get_r(arena, node);

        for child in [l, r].into_iter().flatten() {
            if get_p(arena, child) != Some(node) {
                return Err(ValidationError::BrokenParentLink { node, child });
            }
            validate_links_and_bf(arena, child)?;
        }

        let expected = height(arena, r) as i64 - height(arena, l) as i64;
        let actual = bf(arena, node);
        if i64::from(actual) != expected {
            return Err(ValidationError::BalanceMismatch {
                node,
                expected,
                actual,
            });
        }
        if !(-1..=1).contains(&actual) {
            return Err(ValidationError::Unbalanced {
                node,
                balance: actual,
            });
        }
        Ok(())
    }

    validate_links_and_bf(arena, root)?;

    let mut curr = first(arena, Some(root));
    let mut prev_node: Option<u32> = None;
    while let Some(i) = curr {
        if let Some(prev) = prev_node {
            if comparator(&arena[prev].k, &arena[i].k) != Ordering::Less {
                return Err(ValidationError::OrderViolated { node: i });
            }
        }
        prev_node = Some(i);
        curr = next(arena, i);
    }

    Ok(())
}
