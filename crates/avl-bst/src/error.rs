//! Structural validation errors.
//!
//! Client operations on the trees never fail; these are only produced by the
//! `assert_valid` checkers used by tests and debugging tools.

/// A broken structural invariant, naming the arena index where it was found.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("root {root} has a parent")]
    RootHasParent { root: u32 },
    #[error("child {child} of node {node} does not link back to it")]
    BrokenParentLink { node: u32, child: u32 },
    #[error("node {node}: balance factor expected {expected}, got {actual}")]
    BalanceMismatch { node: u32, expected: i64, actual: i8 },
    #[error("node {node}: balance factor {balance} outside -1..=1")]
    Unbalanced { node: u32, balance: i8 },
    #[error("node {node} breaks in-order key order")]
    OrderViolated { node: u32 },
    #[error("tree reaches {actual} nodes but tracks {expected}")]
    SizeMismatch { expected: usize, actual: usize },
}
