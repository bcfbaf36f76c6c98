//! Arena-based AVL tree.
//!
//! An ordered key-value map that keeps its height logarithmic under insertion
//! and removal. Each node carries a balance factor; after a structural change
//! the tree walks back towards the root adjusting balances and rotating where
//! a subtree has become two levels lopsided.
//!
//! Nodes live in an [`Arena`] and link to each other through `Option<u32>`
//! indices, so rotations and swaps only rewrite a handful of indices and can
//! never leave a dangling or doubly-owned node.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`types`] | [`Node`] and [`Side`] |
//! | [`arena`] | [`Arena`]: slot storage with a free list |
//! | [`util`] | balance-agnostic helpers: `first`, `next`, `prev`, `find`, `swap`, `print` |
//! | [`bst`] | [`BinarySearchTree`]: the unbalanced base tree |
//! | [`avl`] | [`AvlTree`], [`AvlSet`], rotations and fix-up walks |
//! | [`error`] | [`ValidationError`] |
//!
//! ```
//! use avl_bst::AvlTree;
//!
//! let mut tree = AvlTree::new();
//! for k in [10, 20, 30] {
//!     tree.insert(k, k * 2);
//! }
//! let root = tree.root().unwrap();
//! assert_eq!(*tree.key(root), 20);
//! assert_eq!(tree.remove(&20), Some(40));
//! assert!(tree.assert_valid().is_ok());
//! ```

pub mod arena;
pub mod avl;
pub mod bst;
pub mod error;
pub mod types;
pub mod util;

pub use arena::Arena;
pub use avl::{AvlSet, AvlTree};
pub use bst::BinarySearchTree;
pub use error::ValidationError;
pub use types::{Comparator, Node, Side};
