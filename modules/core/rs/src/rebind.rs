use std::collections::VecDeque;

use crate::sequence::{RandomAccessSequence, Sequence};
use crate::view::Bound;

/// Re-derives cursors of one handle against another handle to equal content.
///
/// A cursor obtained from `self` is translated into the cursor that addresses the same element
/// of `new`. Both handles must present equal-length, equal-content sequences. Composite sequences
/// translate every cursor they store and rebuild themselves around the results.
pub trait Rebind: Sequence {
    fn rebind(&self, cursor: &Self::Cursor, new: &Self) -> Self::Cursor;

    fn rebind_bound(&self, bound: &Bound<Self::Cursor>, new: &Self) -> Bound<Self::Cursor> {
        match bound {
            Bound::At(cursor) => Bound::At(self.rebind(cursor, new)),
            Bound::Natural => Bound::Natural,
            Bound::Unreachable => Bound::Unreachable,
        }
    }
}

/// Random-access anchor: measures the offset from the old beginning and re-applies it.
pub fn rebind_by_offset<S: RandomAccessSequence>(
    old: &S,
    cursor: &S::Cursor,
    new: &S,
) -> S::Cursor {
    let offset = old.distance(&old.begin(), cursor);
    let mut rebound = new.begin();
    new.offset(&mut rebound, offset);
    rebound
}

/// Forward-only anchor: walks both sequences in lock-step until the old cursor is reached.
pub fn rebind_by_walk<S: Sequence>(old: &S, cursor: &S::Cursor, new: &S) -> S::Cursor {
    let mut walked = old.begin();
    let mut rebound = new.begin();
    while walked != *cursor {
        debug_assert!(!old.is_end(&walked), "cursor does not belong to the old sequence");
        old.inc(&mut walked);
        new.inc(&mut rebound);
    }
    rebound
}

macro_rules! impl_rebind_by_offset {
    ([$($generics:tt)*], $handle:ty) => {
        impl<$($generics)*> Rebind for $handle {
            fn rebind(&self, cursor: &usize, new: &Self) -> usize {
                rebind_by_offset(self, cursor, new)
            }
        }
    };
}

impl_rebind_by_offset!(['a, T], &'a [T]);
impl_rebind_by_offset!(['b, 'a, T], &'b &'a [T]);
impl_rebind_by_offset!(['a, T], &'a Vec<T>);
impl_rebind_by_offset!(['a, T, const N: usize], &'a [T; N]);
impl_rebind_by_offset!(['a, T], &'a VecDeque<T>);

impl Rebind for &str {
    fn rebind(&self, cursor: &usize, new: &Self) -> usize {
        rebind_by_walk(self, cursor, new)
    }
}

impl Rebind for &String {
    fn rebind(&self, cursor: &usize, new: &Self) -> usize {
        rebind_by_walk(self, cursor, new)
    }
}

impl<S: Rebind> Rebind for crate::view::View<S> {
    fn rebind(&self, cursor: &Self::Cursor, new: &Self) -> Self::Cursor {
        self.base().rebind(cursor, new.base())
    }
}
