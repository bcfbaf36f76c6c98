//! AVL tree: the self-balancing layer over [`crate::bst`].

pub mod set;
pub mod tree;
pub mod util;

#[cfg(feature = "serde")]
mod serde_impl;

pub use set::AvlSet;
pub use tree::AvlTree;
pub use util::{assert_avl_tree, insert_fix, remove_fix, rotate_left, rotate_right};
