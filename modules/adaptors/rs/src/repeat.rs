use derive_getters::{Dissolve, Getters};
use derive_more::Constructor;
use lazyseq_core_rs::{
    BidirectionalSequence, Category, CommonSequence, ConstDual, RandomAccessSequence, Rebind,
    Sequence, SizedSequence, Traversal,
};

use crate::kinds::{impl_adaptor_source, RepeatKind};

const UNBOUNDED: Category = Category {
    traversal: Traversal::RandomAccess,
    sized: false,
    common: false,
    borrowed: false,
    mutable: false,
    infinite: true,
};

const BOUNDED: Category = Category {
    traversal: Traversal::RandomAccess,
    sized: true,
    common: true,
    borrowed: false,
    mutable: false,
    infinite: false,
};

/// One value, endlessly.
///
/// There is no default or empty state: a repetition always owns the value it repeats.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Constructor, Getters, Dissolve)]
pub struct Repeat<T> {
    value: T,
}

/// One value, `len` times.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Constructor, Getters, Dissolve)]
pub struct RepeatN<T> {
    value: T,
    len: usize,
}

pub fn repeat<T>(value: T) -> Repeat<T> {
    Repeat::new(value)
}

pub fn repeat_n<T>(value: T, len: usize) -> RepeatN<T> {
    RepeatN::new(value, len)
}

/// Repetitions absorb prefix operations instead of being wrapped by them.
pub trait Repeated: Sized {
    type Value;

    fn dropping_front(self, n: usize) -> Self;

    fn taking_front(self, n: usize) -> RepeatN<Self::Value>;
}

impl<T> Repeated for Repeat<T> {
    type Value = T;

    fn dropping_front(self, _n: usize) -> Self {
        self
    }

    fn taking_front(self, n: usize) -> RepeatN<T> {
        RepeatN::new(self.value, n)
    }
}

impl<T> Repeated for RepeatN<T> {
    type Value = T;

    fn dropping_front(self, n: usize) -> Self {
        RepeatN::new(self.value, self.len.saturating_sub(n))
    }

    fn taking_front(self, n: usize) -> RepeatN<T> {
        RepeatN::new(self.value, self.len.min(n))
    }
}

fn shifted(cursor: usize, by: isize) -> usize {
    let shifted = cursor.checked_add_signed(by);
    debug_assert!(shifted.is_some(), "offset moves before the beginning");
    shifted.unwrap_or(0)
}

impl<'a, T> Sequence for &'a Repeat<T> {
    type Element = &'a T;
    type Cursor = usize;

    const CATEGORY: Category = UNBOUNDED;

    fn begin(&self) -> usize {
        0
    }

    fn is_end(&self, _cursor: &usize) -> bool {
        false
    }

    fn inc(&self, cursor: &mut usize) {
        *cursor += 1;
    }

    fn read_at(&self, _cursor: &usize) -> &'a T {
        let repeat: &'a Repeat<T> = self;
        &repeat.value
    }

    fn distance_hint(&self, from: &usize, to: &usize) -> Option<usize> {
        to.checked_sub(*from)
    }

    fn skip(&self, cursor: &mut usize, n: usize) -> usize {
        *cursor = cursor.saturating_add(n);
        n
    }
}

impl<T> BidirectionalSequence for &Repeat<T> {
    fn dec(&self, cursor: &mut usize) {
        debug_assert!(*cursor > 0, "decrementing past the beginning");
        *cursor -= 1;
    }
}

impl<T> RandomAccessSequence for &Repeat<T> {
    fn offset(&self, cursor: &mut usize, by: isize) {
        *cursor = shifted(*cursor, by);
    }

    fn distance(&self, from: &usize, to: &usize) -> isize {
        *to as isize - *from as isize
    }
}

impl<T> Rebind for &Repeat<T> {
    fn rebind(&self, cursor: &usize, _new: &Self) -> usize {
        *cursor
    }
}

impl<'a, T> Sequence for &'a RepeatN<T> {
    type Element = &'a T;
    type Cursor = usize;

    const CATEGORY: Category = BOUNDED;

    fn begin(&self) -> usize {
        0
    }

    fn is_end(&self, cursor: &usize) -> bool {
        *cursor >= self.len
    }

    fn inc(&self, cursor: &mut usize) {
        debug_assert!(*cursor < self.len, "advancing past the end");
        *cursor += 1;
    }

    fn read_at(&self, cursor: &usize) -> &'a T {
        debug_assert!(*cursor < self.len, "index {cursor} is out of bounds");
        let repeat: &'a RepeatN<T> = self;
        &repeat.value
    }

    fn distance_hint(&self, from: &usize, to: &usize) -> Option<usize> {
        to.checked_sub(*from)
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.len)
    }

    fn skip(&self, cursor: &mut usize, n: usize) -> usize {
        let moved = n.min(self.len.saturating_sub(*cursor));
        *cursor += moved;
        moved
    }
}

impl<T> BidirectionalSequence for &RepeatN<T> {
    fn dec(&self, cursor: &mut usize) {
        debug_assert!(*cursor > 0, "decrementing past the beginning");
        *cursor -= 1;
    }
}

impl<T> RandomAccessSequence for &RepeatN<T> {
    fn offset(&self, cursor: &mut usize, by: isize) {
        *cursor = shifted(*cursor, by);
        debug_assert!(*cursor <= self.len, "offset moves past the end");
    }

    fn distance(&self, from: &usize, to: &usize) -> isize {
        *to as isize - *from as isize
    }
}

impl<T> CommonSequence for &RepeatN<T> {
    fn end(&self) -> usize {
        self.len
    }
}

impl<T> SizedSequence for &RepeatN<T> {
    fn size(&self) -> usize {
        self.len
    }
}

impl<T> Rebind for &RepeatN<T> {
    fn rebind(&self, cursor: &usize, _new: &Self) -> usize {
        *cursor
    }
}

impl_adaptor_source!([T], Repeat<T>, RepeatKind);
impl_adaptor_source!([T], RepeatN<T>, RepeatKind);

impl<T> ConstDual for Repeat<T> {
    type Const = Self;

    fn into_const(self) -> Self {
        self
    }
}

impl<T> ConstDual for RepeatN<T> {
    type Const = Self;

    fn into_const(self) -> Self {
        self
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    #[test]
    fn test_unbounded_repeat() {
        let sevens = repeat(7);
        assert_eq!((&sevens).elements().take(3).copied().collect_vec(), vec![7, 7, 7]);
        assert_eq!((&sevens).read_nth(1_000_000), &7);
        assert!(<&Repeat<i32> as Sequence>::CATEGORY.infinite);
        assert!(!<&Repeat<i32> as Sequence>::CATEGORY.sized);
    }

    #[test]
    fn test_bounded_repeat() {
        let word = repeat_n("ab", 3);
        assert_eq!((&word).elements().join(""), "ababab");
        assert_eq!((&word).size(), 3);
        assert_eq!((&word).back(), Some(&"ab"));
        assert!((&repeat_n(1, 0)).empty());
    }

    #[test]
    fn test_prefix_operations_are_absorbed() {
        for (repeated, dropped, taken, expected) in [
            (repeat_n('x', 5), 2, 2, 2),
            (repeat_n('x', 5), 4, 3, 1),
            (repeat_n('x', 2), 0, 9, 2),
        ] {
            let result = repeated.dropping_front(dropped).taking_front(taken);
            assert_eq!(*result.len(), expected);
        }
        assert_eq!(*repeat('y').taking_front(4).len(), 4);
    }

    #[test]
    fn test_skipping_is_constant_time() {
        let endless = repeat(0);
        let mut cursor = (&endless).begin();
        assert_eq!((&endless).skip(&mut cursor, usize::MAX), usize::MAX);
        assert_eq!((&endless).skip(&mut cursor, 5), 5);
        assert_eq!(cursor, usize::MAX);

        let bounded = repeat_n(0, 4);
        let mut cursor = 1;
        assert_eq!((&bounded).skip(&mut cursor, usize::MAX), 3);
        assert!((&bounded).is_end(&cursor));
    }
}
