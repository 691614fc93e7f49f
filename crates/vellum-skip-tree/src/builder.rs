//! Preorder construction for producers that emit nodes in document order.

use crate::index::next_index;
use crate::{SkipIndex, SkipTree, TreeError};

/// Builds a `SkipTree` one node at a time, in preorder.
///
/// `start_node` writes the node's slot with a placeholder skip; the skip is
/// patched by `finish_node` once every descendant has been pushed. Unlike
/// `SkipTree::append_child` no existing slot ever moves.
#[derive(Debug)]
pub struct Builder<V, I = u32> {
    skips: Vec<I>,
    values: Vec<V>,
    opened: Vec<usize>,
}

const DEFAULT_TREE_DEPTH: usize = 32;

impl<V, I: SkipIndex> Default for Builder<V, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, I: SkipIndex> Builder<V, I> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            skips: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
            opened: Vec::with_capacity(DEFAULT_TREE_DEPTH),
        }
    }

    /// Number of slots pushed so far.
    pub fn len(&self) -> usize {
        self.skips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skips.is_empty()
    }

    /// Number of nodes started but not yet finished.
    pub fn depth(&self) -> usize {
        self.opened.len()
    }

    /// Opens a node under the innermost open node.
    pub fn start_node(&mut self, value: V) -> Result<I, TreeError> {
        let index = self.push(value)?;
        self.opened.try_reserve(1)?;
        self.opened.push(index.index());
        Ok(index)
    }

    /// Pushes a node without children under the innermost open node.
    pub fn leaf(&mut self, value: V) -> Result<I, TreeError> {
        self.push(value)
    }

    fn push(&mut self, value: V) -> Result<I, TreeError> {
        assert!(
            !self.opened.is_empty() || self.skips.is_empty(),
            "a skip tree has exactly one root"
        );
        let index = next_index::<I>(self.len())?;
        self.skips.try_reserve(1)?;
        self.values.try_reserve(1)?;
        self.skips.push(I::ONE);
        self.values.push(value);
        Ok(index)
    }

    /// Closes the innermost open node, fixing its skip to cover everything
    /// pushed since it was started.
    #[track_caller]
    pub fn finish_node(&mut self) -> I {
        let index = self.opened.pop().expect("no opened nodes?");
        self.skips[index] = I::new(self.skips.len() - index);
        I::new(index)
    }

    /// Drops the innermost open node together with everything pushed under it.
    #[track_caller]
    pub fn abandon_node(&mut self) {
        let index = self.opened.pop().expect("no opened nodes?");
        self.skips.truncate(index);
        self.values.truncate(index);
    }

    pub fn value_mut(&mut self, index: I) -> &mut V {
        &mut self.values[index.index()]
    }

    pub fn finish(self) -> SkipTree<V, I> {
        assert!(self.opened.is_empty(), "you should finish every started node");
        SkipTree::from_parts(self.skips, self.values)
    }
}
