//! Pointer-free trees stored as flat preorder sequences of slots.
//!
//! Every slot records its *skip*: the number of slots taken by its subtree,
//! itself included. The children of the node at `i` occupy `i + 1..i + skip`
//! and are visited by jumping from one sibling to the next.

mod builder;
mod cursor;
mod error;
mod index;
mod sparse;
mod tree;

/// Preorder builder that back-patches skips when a node is finished.
pub use builder::Builder;
/// Read-only navigation over a skip array.
pub use cursor::{Children, Cursor, Preorder};
pub use error::TreeError;
pub use index::SkipIndex;
/// Overlay tree over a subset of another tree's indices.
pub use sparse::{Seeker, SparseSkipTree};
pub use tree::SkipTree;
