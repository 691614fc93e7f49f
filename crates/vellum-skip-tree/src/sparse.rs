use crate::index::next_index;
use crate::{SkipIndex, TreeError};

/// A skip tree holding values for a subset of another tree's nodes.
///
/// Each slot remembers the index of the node it annotates in the *reference*
/// tree. Ancestry mirrors the reference tree: slot `a` is an ancestor of slot
/// `b` exactly when `b`'s reference index lies inside `a`'s reference
/// subtree. Because both trees are in preorder, reference indices strictly
/// increase from slot to slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SparseSkipTree<V, I = u32> {
    skips: Vec<I>,
    reference_indices: Vec<I>,
    values: Vec<V>,
}

impl<V, I: SkipIndex> Default for SparseSkipTree<V, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, I: SkipIndex> SparseSkipTree<V, I> {
    pub fn new() -> Self {
        Self { skips: Vec::new(), reference_indices: Vec::new(), values: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.skips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skips.is_empty()
    }

    pub fn skips(&self) -> &[I] {
        &self.skips
    }

    pub fn reference_indices(&self) -> &[I] {
        &self.reference_indices
    }

    pub fn values(&self) -> &[V] {
        &self.values
    }

    /// Looks up the value attached to `reference_index`.
    pub fn find(&self, reference_index: I) -> Option<&V> {
        let slot = self.reference_indices.binary_search(&reference_index).ok()?;
        Some(&self.values[slot])
    }

    /// Attaches `value` to the reference node `reference_index` and returns
    /// the slot it was stored in.
    ///
    /// `reference_skips` is the skip array of the reference tree. Existing
    /// slots whose reference nodes lie below `reference_index` become children
    /// of the new slot. Attaching a second value to the same reference node is
    /// a caller bug.
    pub fn insert(
        &mut self,
        reference_skips: &[I],
        reference_index: I,
        value: V,
    ) -> Result<I, TreeError> {
        let reference = reference_index.index();
        assert!(reference < reference_skips.len(), "reference node {reference} does not exist");
        assert!(
            self.reference_indices.binary_search(&reference_index).is_err(),
            "reference node {reference} already has a value"
        );
        let reference_end = reference + reference_skips[reference].index();

        next_index::<I>(self.len())?;
        self.skips.try_reserve(1)?;
        self.reference_indices.try_reserve(1)?;
        self.values.try_reserve(1)?;

        // Find the slot to insert at, growing every sparse ancestor on the way.
        let mut index = 0;
        let mut end = self.len();
        while index < end {
            let current = self.reference_indices[index].index();
            if current > reference {
                break;
            }
            let skip = self.skips[index].index();
            if reference < current + reference_skips[current].index() {
                self.skips[index] = I::new(skip + 1);
                end = index + skip;
                index += 1;
            } else {
                index += skip;
            }
        }

        // Later siblings inside the new node's reference subtree become its
        // children.
        let mut absorbed = index;
        while absorbed < end && self.reference_indices[absorbed].index() < reference_end {
            absorbed += self.skips[absorbed].index();
        }

        self.skips.insert(index, I::new(absorbed - index + 1));
        self.reference_indices.insert(index, reference_index);
        self.values.insert(index, value);
        Ok(I::new(index))
    }

    pub fn seeker(&self) -> Seeker<'_, V, I> {
        Seeker {
            skips: &self.skips,
            reference_indices: &self.reference_indices,
            values: &self.values,
            cursor: 0,
            found: false,
        }
    }
}

/// Forward-only lookup into a `SparseSkipTree`.
///
/// Meant to be driven alongside a preorder walk of the reference tree:
/// seeking every reference index in increasing order costs one pass over the
/// sparse slots in total.
#[derive(Debug, Clone)]
pub struct Seeker<'a, V, I> {
    skips: &'a [I],
    reference_indices: &'a [I],
    values: &'a [V],
    cursor: usize,
    found: bool,
}

impl<'a, V, I: SkipIndex> Seeker<'a, V, I> {
    /// Advances to `reference_index` and reports whether it has a value.
    ///
    /// Calls must not go backwards.
    pub fn seek_forward(&mut self, reference_index: I) -> bool {
        debug_assert!(
            self.cursor == 0 || self.reference_indices[self.cursor - 1] < reference_index,
            "seek_forward moved backwards to {reference_index:?}"
        );
        while self.reference_indices.get(self.cursor).is_some_and(|&it| it < reference_index) {
            self.cursor += 1;
        }
        self.found = self.reference_indices.get(self.cursor) == Some(&reference_index);
        self.found
    }

    /// The value found by the last successful `seek_forward`.
    pub fn get(&self) -> Option<&'a V> {
        self.found.then(|| &self.values[self.cursor])
    }

    /// Projects one field out of the value found by the last `seek_forward`.
    pub fn get_field<T>(&self, field: impl FnOnce(&'a V) -> T) -> Option<T> {
        self.get().map(field)
    }

    /// Sparse skip of the slot found by the last `seek_forward`.
    pub fn skip(&self) -> Option<I> {
        self.found.then(|| self.skips[self.cursor])
    }

    /// Sparse slot the seeker is parked on.
    pub fn position(&self) -> usize {
        self.cursor
    }
}
