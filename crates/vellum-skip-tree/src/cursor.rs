use crate::SkipIndex;

/// A position inside a run of siblings.
///
/// `index` is the current node and `end` is one past the last slot of the
/// run, i.e. the end of the parent's subtree. The cursor only carries two
/// integers; every move takes the skip array it walks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cursor<I> {
    index: I,
    end: I,
}

impl<I: SkipIndex> Cursor<I> {
    pub fn new(index: I, end: I) -> Self {
        Self { index, end }
    }

    /// A cursor on the first child of `parent`.
    pub fn children_of(skips: &[I], parent: I) -> Self {
        let parent = parent.index();
        Self { index: I::new(parent + 1), end: I::new(parent + skips[parent].index()) }
    }

    pub fn index(self) -> I {
        self.index
    }

    pub fn end(self) -> I {
        self.end
    }

    pub fn is_done(self) -> bool {
        self.index >= self.end
    }

    /// A cursor on the first child of the current node.
    pub fn first_child(self, skips: &[I]) -> Self {
        Self::children_of(skips, self.index)
    }

    /// Jumps over the current node's subtree.
    pub fn next_sibling(&mut self, skips: &[I]) {
        self.index = I::new(self.index.index() + skips[self.index.index()].index());
    }

    /// Moves down to `target`, which must be the current node, a later
    /// sibling, or a descendant of one. Afterwards the cursor sits on `target`
    /// and `end` bounds `target`'s siblings.
    pub fn next_parent(&mut self, skips: &[I], target: I) {
        let target = target.index();
        let mut index = self.index.index();
        let mut end = self.end.index();
        assert!(index <= target && target < end, "node {target} is not ahead of the cursor");

        while index != target {
            let skip = skips[index].index();
            if target < index + skip {
                end = index + skip;
                index += 1;
            } else {
                index += skip;
            }
        }

        self.index = I::new(index);
        self.end = I::new(end);
    }
}

/// Iterator over the children of one node.
#[derive(Clone, Debug)]
pub struct Children<'a, I> {
    skips: &'a [I],
    cursor: Cursor<I>,
}

impl<'a, I: SkipIndex> Children<'a, I> {
    pub(crate) fn new(skips: &'a [I], cursor: Cursor<I>) -> Self {
        Self { skips, cursor }
    }
}

impl<I: SkipIndex> Iterator for Children<'_, I> {
    type Item = I;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor.is_done() {
            return None;
        }
        let index = self.cursor.index();
        self.cursor.next_sibling(self.skips);
        Some(index)
    }
}

/// Preorder walk over a subtree yielding `(index, depth)`.
#[derive(Clone, Debug)]
pub struct Preorder<'a, I> {
    skips: &'a [I],
    index: usize,
    end: usize,
    ends: Vec<usize>,
}

impl<'a, I: SkipIndex> Preorder<'a, I> {
    pub(crate) fn new(skips: &'a [I], root: I) -> Self {
        let index = root.index();
        let end = skips.get(index).map_or(index, |skip| index + skip.index());
        Self { skips, index, end, ends: Vec::new() }
    }
}

impl<I: SkipIndex> Iterator for Preorder<'_, I> {
    type Item = (I, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.end {
            return None;
        }
        while self.ends.last().is_some_and(|&end| self.index >= end) {
            self.ends.pop();
        }

        let index = self.index;
        let depth = self.ends.len();
        self.ends.push(index + self.skips[index].index());
        self.index += 1;
        Some((I::new(index), depth))
    }
}
