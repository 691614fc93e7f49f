//! Component tree produced by the structural parser.
//!
//! Nodes are rules, blocks, functions and preserved tokens, stored in a
//! `SkipTree` in document order. Nodes only record where they start; text is
//! re-read from the `Source` they were parsed from.

mod component;
mod tree;

/// Kinds and slot payload of the component tree.
pub use component::{Component, ComponentKind};
/// Read-only access to a parsed style sheet.
pub use tree::ComponentTree;
/// Navigation types shared with the underlying skip tree.
pub use vellum_skip_tree::{Children, Cursor, Preorder};
