use std::fmt::Debug;
use std::hash::Hash;

use crate::TreeError;

/// Unsigned integer types usable as slot indices and skips.
pub trait SkipIndex: Copy + Ord + Eq + Hash + Debug {
    const ZERO: Self;
    const ONE: Self;
    const MAX: Self;

    /// Converts `value`, returning `None` if it does not fit.
    fn from_usize(value: usize) -> Option<Self>;

    /// Converts a value the caller already knows to be in range.
    fn new(value: usize) -> Self;

    fn index(self) -> usize;
}

macro_rules! impl_skip_index {
    ($($ty:ty),*) => {
        $(
            impl SkipIndex for $ty {
                const ZERO: Self = 0;
                const ONE: Self = 1;
                const MAX: Self = <$ty>::MAX;

                #[inline]
                fn from_usize(value: usize) -> Option<Self> {
                    Self::try_from(value).ok()
                }

                #[inline]
                fn new(value: usize) -> Self {
                    debug_assert!(value <= Self::MAX as usize, "index {value} out of range");
                    value as Self
                }

                #[inline]
                fn index(self) -> usize {
                    self as usize
                }
            }
        )*
    };
}

impl_skip_index!(u8, u16, u32, usize);

/// Returns the index a new slot would get in a tree of `len` slots, if the
/// root's skip could still count it.
pub(crate) fn next_index<I: SkipIndex>(len: usize) -> Result<I, TreeError> {
    match len.checked_add(1).and_then(I::from_usize) {
        Some(_) => Ok(I::new(len)),
        None => Err(TreeError::Overflow { max: I::MAX.index() }),
    }
}
