use std::collections::BTreeMap;

use avl_bst::AvlTree;
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Insert(u16, u32),
    Remove(u16),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0u16..256, any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        2 => (0u16..256).prop_map(Op::Remove),
    ]
}

/// Worst-case AVL height (counted in nodes) for `n` nodes:
/// `log_phi(sqrt(5) * (n + 2)) - 2`.
fn height_bound(n: usize) -> f64 {
    let phi = (1.0 + 5f64.sqrt()) / 2.0;
    (5f64.sqrt() * (n as f64 + 2.0)).ln() / phi.ln() - 2.0
}

/// Per-node `(key, left key, right key, balance)`, in key order.
fn snapshot(tree: &AvlTree<u16, u32>) -> Vec<(u16, Option<u16>, Option<u16>, i8)> {
    tree.keys()
        .map(|k| {
            let idx = tree.find(k).unwrap();
            let n = tree.node(idx);
            (n.k, n.l.map(|i| *tree.key(i)), n.r.map(|i| *tree.key(i)), n.bf)
        })
        .collect()
}

proptest! {
    #[test]
    fn random_ops_match_btree_map(ops in prop::collection::vec(op(), 1..400)) {
        let mut tree = AvlTree::new();
        let mut model = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(k, v) => prop_assert_eq!(tree.insert(k, v), model.insert(k, v)),
                Op::Remove(k) => prop_assert_eq!(tree.remove(&k), model.remove(&k)),
            }
            prop_assert_eq!(tree.assert_valid(), Ok(()));
            prop_assert_eq!(tree.len(), model.len());
        }

        let entries: Vec<_> = tree.iter().map(|(k, v)| (*k, *v)).collect();
        let expected: Vec<_> = model.into_iter().collect();
        prop_assert_eq!(entries, expected);
        prop_assert!(tree.is_balanced());
    }

    #[test]
    fn height_stays_within_avl_bound(keys in prop::collection::vec(any::<u32>(), 0..2000)) {
        let mut tree = AvlTree::new();
        for k in keys {
            tree.insert(k, ());
        }
        prop_assert!(tree.height() as f64 <= height_bound(tree.len()));
    }

    #[test]
    fn overwrite_keeps_shape(
        keys in prop::collection::btree_set(0u16..1024, 1..200),
        pick in any::<prop::sample::Index>(),
    ) {
        let keys: Vec<u16> = keys.into_iter().collect();
        let mut tree = AvlTree::new();
        for &k in &keys {
            tree.insert(k, 0);
        }
        let before = snapshot(&tree);
        let root = tree.root();

        let k = keys[pick.index(keys.len())];
        prop_assert_eq!(tree.insert(k, 7), Some(0));
        prop_assert_eq!(tree.get(&k), Some(&7));
        prop_assert_eq!(tree.root(), root);
        prop_assert_eq!(snapshot(&tree), before);
    }

    #[test]
    fn insert_then_remove_round_trips(
        keys in prop::collection::btree_set(0u16..1024, 0..200),
        extra in 1024u16..2048,
    ) {
        let mut tree = AvlTree::new();
        for k in keys {
            tree.insert(k, u32::from(k) * 3);
        }
        let before: Vec<_> = tree.iter().map(|(k, v)| (*k, *v)).collect();

        tree.insert(extra, 1);
        prop_assert_eq!(tree.remove(&extra), Some(1));
        prop_assert_eq!(tree.assert_valid(), Ok(()));

        let after: Vec<_> = tree.iter().map(|(k, v)| (*k, *v)).collect();
        prop_assert_eq!(after, before);
    }
}
