use std::ops::Index;

use crate::cursor::{Children, Cursor, Preorder};
use crate::index::next_index;
use crate::{SkipIndex, TreeError};

/// A tree laid out as a flat preorder sequence of slots.
///
/// The node at index `i` with skip `s` owns exactly the slots `i..i + s`. The
/// root, when present, is slot 0 and its skip equals the number of slots.
/// Nodes are never removed or reordered once added.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SkipTree<V, I = u32> {
    skips: Vec<I>,
    values: Vec<V>,
}

impl<V, I: SkipIndex> Default for SkipTree<V, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, I: SkipIndex> SkipTree<V, I> {
    pub fn new() -> Self {
        Self { skips: Vec::new(), values: Vec::new() }
    }

    pub(crate) fn from_parts(skips: Vec<I>, values: Vec<V>) -> Self {
        debug_assert_eq!(skips.len(), values.len());
        Self { skips, values }
    }

    pub fn len(&self) -> usize {
        self.skips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skips.is_empty()
    }

    /// Number of slots, read off the root's skip.
    pub fn size(&self) -> I {
        self.skips.first().copied().unwrap_or(I::ZERO)
    }

    pub fn skips(&self) -> &[I] {
        &self.skips
    }

    pub fn values(&self) -> &[V] {
        &self.values
    }

    pub fn skip(&self, index: I) -> I {
        self.skips[index.index()]
    }

    pub fn get(&self, index: I) -> Option<&V> {
        self.values.get(index.index())
    }

    /// Adds the root to an empty tree.
    pub fn create_root(&mut self, value: V) -> Result<I, TreeError> {
        assert!(self.is_empty(), "the tree already has a root");
        let root = next_index::<I>(0)?;
        self.skips.try_reserve(1)?;
        self.values.try_reserve(1)?;
        self.skips.push(I::ONE);
        self.values.push(value);
        Ok(root)
    }

    /// Adds `value` as the new last child of `parent` and returns its index.
    ///
    /// Every skip on the path from the root down to `parent` grows by one. The
    /// new slot lands at the end of `parent`'s subtree, so slots after it
    /// shift right by one.
    pub fn append_child(&mut self, parent: I, value: V) -> Result<I, TreeError> {
        let parent = parent.index();
        assert!(parent < self.len(), "node {parent} does not exist");
        next_index::<I>(self.len())?;
        self.skips.try_reserve(1)?;
        self.values.try_reserve(1)?;

        let mut index = 0;
        while index != parent {
            let skip = self.skips[index].index();
            if parent < index + skip {
                self.skips[index] = I::new(skip + 1);
                index += 1;
            } else {
                index += skip;
            }
        }

        let parent_skip = self.skips[parent].index();
        let child = parent + parent_skip;
        self.skips[parent] = I::new(parent_skip + 1);
        self.skips.insert(child, I::ONE);
        self.values.insert(child, value);
        Ok(I::new(child))
    }

    /// A cursor on the root, or an exhausted cursor for an empty tree.
    pub fn cursor(&self) -> Cursor<I> {
        Cursor::new(I::ZERO, self.size())
    }

    pub fn children(&self, index: I) -> Children<'_, I> {
        self.siblings(Cursor::children_of(&self.skips, index))
    }

    /// Iterates the siblings from `cursor` up to the cursor's end.
    pub fn siblings(&self, cursor: Cursor<I>) -> Children<'_, I> {
        Children::new(&self.skips, cursor)
    }

    /// Walks the subtree rooted at `index`, yielding every node with its depth
    /// relative to `index`.
    pub fn preorder(&self, index: I) -> Preorder<'_, I> {
        Preorder::new(&self.skips, index)
    }
}

impl<V, I: SkipIndex> Index<I> for SkipTree<V, I> {
    type Output = V;

    fn index(&self, index: I) -> &Self::Output {
        &self.values[index.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// root -> {0, 1}, 0 -> {00, 01}, 00 -> {000, 001}, 01 -> {010}, 1 -> {10}
    fn example() -> SkipTree<&'static str, u16> {
        let mut tree = SkipTree::new();
        let root = tree.create_root("root").unwrap();
        let n0 = tree.append_child(root, "0").unwrap();
        let n1 = tree.append_child(root, "1").unwrap();
        let n00 = tree.append_child(n0, "00").unwrap();
        let n01 = tree.append_child(n0, "01").unwrap();
        tree.append_child(n01, "010").unwrap();
        tree.append_child(n00, "000").unwrap();
        tree.append_child(n00, "001").unwrap();
        // `1` moved right while the `0` subtree grew.
        let n1 = n1 + 5;
        tree.append_child(n1, "10").unwrap();
        tree
    }

    #[test]
    fn append_child_keeps_preorder() {
        let tree = example();
        assert_eq!(tree.skips(), &[9, 6, 3, 1, 1, 2, 1, 2, 1]);
        assert_eq!(tree.values(), &["root", "0", "00", "000", "001", "01", "010", "1", "10"]);
        assert_eq!(tree.size(), 9);
    }

    #[test]
    fn every_subtree_fits() {
        let tree = example();
        let size = tree.size() as usize;
        for (index, &skip) in tree.skips().iter().enumerate() {
            assert!(index + skip as usize <= size, "node {index} overflows the tree");
        }
    }

    #[test]
    fn children_are_visited_in_order() {
        let tree = example();
        let children: Vec<_> = tree.children(0).map(|child| tree[child]).collect();
        assert_eq!(children, ["0", "1"]);
        let children: Vec<_> = tree.children(1).map(|child| tree[child]).collect();
        assert_eq!(children, ["00", "01"]);
        assert_eq!(tree.children(3).count(), 0);
    }

    #[test]
    fn overflow_is_reported() {
        let mut tree = SkipTree::<(), u8>::new();
        let root = tree.create_root(()).unwrap();
        for _ in 1..u8::MAX {
            tree.append_child(root, ()).unwrap();
        }
        assert_eq!(tree.size(), u8::MAX);
        assert!(matches!(tree.append_child(root, ()), Err(TreeError::Overflow { max: 255 })));
        assert_eq!(tree.len(), 255);
    }

    #[test]
    #[should_panic(expected = "does not exist")]
    fn append_to_missing_parent() {
        let mut tree = SkipTree::<(), u32>::new();
        tree.create_root(()).unwrap();
        let _ = tree.append_child(3, ());
    }

    #[test]
    #[should_panic(expected = "already has a root")]
    fn second_root() {
        let mut tree = SkipTree::<(), u32>::new();
        tree.create_root(()).unwrap();
        let _ = tree.create_root(());
    }
}
