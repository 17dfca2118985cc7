use derive_getters::{Dissolve, Getters};
use derive_more::Constructor;
use lazyseq_core_rs::{
    Adaptor, BidirectionalSequence, Category, CommonSequence, ConstDual, Coroutine, Engine,
    IntoOwner, IntoPull, RandomAccessSequence, Rebind, Resume, Sequence, SizedSequence, Source,
};

use crate::kinds::{impl_adaptor_source, MultiPass, Pulled, ZipKind};

/// Two owners walked in lock-step, ending with the shorter one.
#[derive(Clone, Default, Debug, Constructor, Getters, Dissolve)]
pub struct Zip<A, B> {
    left: A,
    right: B,
}

impl<'a, A, B> Sequence for &'a Zip<A, B>
where
    &'a A: Sequence,
    &'a B: Sequence,
{
    type Element = (<&'a A as Sequence>::Element, <&'a B as Sequence>::Element);
    type Cursor = (<&'a A as Sequence>::Cursor, <&'a B as Sequence>::Cursor);

    const CATEGORY: Category =
        <&'a A as Sequence>::CATEGORY.zipped(<&'a B as Sequence>::CATEGORY);

    fn begin(&self) -> Self::Cursor {
        let (left, right): (&'a A, &'a B) = (&self.left, &self.right);
        (left.begin(), right.begin())
    }

    fn is_end(&self, cursor: &Self::Cursor) -> bool {
        let (left, right): (&'a A, &'a B) = (&self.left, &self.right);
        left.is_end(&cursor.0) || right.is_end(&cursor.1)
    }

    fn inc(&self, cursor: &mut Self::Cursor) {
        let (left, right): (&'a A, &'a B) = (&self.left, &self.right);
        left.inc(&mut cursor.0);
        right.inc(&mut cursor.1);
    }

    fn read_at(&self, cursor: &Self::Cursor) -> Self::Element {
        let (left, right): (&'a A, &'a B) = (&self.left, &self.right);
        (left.read_at(&cursor.0), right.read_at(&cursor.1))
    }

    fn distance_hint(&self, from: &Self::Cursor, to: &Self::Cursor) -> Option<usize> {
        let (left, right): (&'a A, &'a B) = (&self.left, &self.right);
        left.distance_hint(&from.0, &to.0)
            .or_else(|| right.distance_hint(&from.1, &to.1))
    }

    /// An endless side does not limit the length.
    fn size_hint(&self) -> Option<usize> {
        let (left, right): (&'a A, &'a B) = (&self.left, &self.right);
        match (left.size_hint(), right.size_hint()) {
            (Some(l), Some(r)) => Some(l.min(r)),
            (Some(l), None) if <&'a B as Sequence>::CATEGORY.infinite => Some(l),
            (None, Some(r)) if <&'a A as Sequence>::CATEGORY.infinite => Some(r),
            _ => None,
        }
    }

    /// The right side never moves further than the left side did.
    fn skip(&self, cursor: &mut Self::Cursor, n: usize) -> usize {
        let (left, right): (&'a A, &'a B) = (&self.left, &self.right);
        let moved = left.skip(&mut cursor.0, n);
        right.skip(&mut cursor.1, moved)
    }
}

impl<'a, A, B> BidirectionalSequence for &'a Zip<A, B>
where
    &'a A: BidirectionalSequence,
    &'a B: BidirectionalSequence,
{
    fn dec(&self, cursor: &mut Self::Cursor) {
        let (left, right): (&'a A, &'a B) = (&self.left, &self.right);
        left.dec(&mut cursor.0);
        right.dec(&mut cursor.1);
    }
}

impl<'a, A, B> RandomAccessSequence for &'a Zip<A, B>
where
    &'a A: RandomAccessSequence,
    &'a B: RandomAccessSequence,
{
    fn offset(&self, cursor: &mut Self::Cursor, by: isize) {
        let (left, right): (&'a A, &'a B) = (&self.left, &self.right);
        left.offset(&mut cursor.0, by);
        right.offset(&mut cursor.1, by);
    }

    fn distance(&self, from: &Self::Cursor, to: &Self::Cursor) -> isize {
        let left: &'a A = &self.left;
        left.distance(&from.0, &to.0)
    }
}

/// The end is both inputs advanced by the shorter length, so walking back from it stays in
/// lock-step.
impl<'a, A, B> CommonSequence for &'a Zip<A, B>
where
    &'a A: RandomAccessSequence + SizedSequence,
    &'a B: RandomAccessSequence + SizedSequence,
{
    fn end(&self) -> Self::Cursor {
        let len = self.size() as isize;
        let mut cursor = self.begin();
        self.offset(&mut cursor, len);
        cursor
    }
}

impl<'a, A, B> SizedSequence for &'a Zip<A, B>
where
    &'a A: SizedSequence,
    &'a B: SizedSequence,
{
    fn size(&self) -> usize {
        let (left, right): (&'a A, &'a B) = (&self.left, &self.right);
        left.size().min(right.size())
    }
}

impl<'a, A, B> Rebind for &'a Zip<A, B>
where
    &'a A: Rebind,
    &'a B: Rebind,
{
    fn rebind(&self, cursor: &Self::Cursor, new: &Self) -> Self::Cursor {
        let (left, right): (&'a A, &'a B) = (&self.left, &self.right);
        let (new_left, new_right): (&'a A, &'a B) = (&new.left, &new.right);
        (
            left.rebind(&cursor.0, &new_left),
            right.rebind(&cursor.1, &new_right),
        )
    }
}

impl_adaptor_source!([A, B], Zip<A, B>, ZipKind);

impl<A: ConstDual, B: ConstDual> ConstDual for Zip<A, B> {
    type Const = Zip<A::Const, B::Const>;

    fn into_const(self) -> Self::Const {
        Zip::new(self.left.into_const(), self.right.into_const())
    }
}

/// Pull-engine form of [`Zip`]. The right input is only resumed after the left one produced a
/// value.
#[derive(Constructor)]
pub struct ZipCoroutine<A: Coroutine, B: Coroutine> {
    left: Engine<A>,
    right: Engine<B>,
}

impl<A: Coroutine, B: Coroutine> ZipCoroutine<A, B> {
    pub fn left(&self) -> &Engine<A> {
        &self.left
    }

    pub fn right(&self) -> &Engine<B> {
        &self.right
    }
}

impl<A: Coroutine, B: Coroutine> Coroutine for ZipCoroutine<A, B> {
    type Yield = (A::Yield, B::Yield);

    fn resume(&mut self) -> Resume<Self::Yield> {
        let Some(left) = self.left.next() else {
            return Resume::Complete;
        };
        let Some(right) = self.right.next() else {
            return Resume::Complete;
        };
        Resume::Yield((left, right))
    }
}

/// Chooses how [`zip`] treats a pair of inputs, keyed by the pair of their kinds.
///
/// Two multi-pass inputs give a multi-pass [`Zip`]; two single-pass inputs give a pull engine.
/// Mixing the two is rejected at composition time.
pub trait ZipDispatch<A, B> {
    type Output;

    fn dispatch(left: A, right: B) -> Self::Output;
}

impl<A, B, KA, KB> ZipDispatch<A, B> for (KA, KB)
where
    A: IntoOwner<Kind = KA>,
    B: IntoOwner<Kind = KB>,
    KA: MultiPass,
    KB: MultiPass,
{
    type Output = Zip<A::Owner, B::Owner>;

    fn dispatch(left: A, right: B) -> Self::Output {
        Zip::new(left.into_owner(), right.into_owner())
    }
}

impl<A: IntoPull, B: IntoPull> ZipDispatch<A, B> for (Pulled, Pulled) {
    type Output = Engine<ZipCoroutine<A::Coroutine, B::Coroutine>>;

    fn dispatch(left: A, right: B) -> Self::Output {
        Engine::new(ZipCoroutine::new(left.into_pull(), right.into_pull()))
    }
}

/// Pairs of elements of `left` and `right`, up to the shorter input's end.
pub fn zip<A, B>(left: A, right: B) -> <(A::Kind, B::Kind) as ZipDispatch<A, B>>::Output
where
    A: Source,
    B: Source,
    (A::Kind, B::Kind): ZipDispatch<A, B>,
{
    <(A::Kind, B::Kind) as ZipDispatch<A, B>>::dispatch(left, right)
}

/// [`zip`] waiting for its left input.
#[derive(Copy, Clone, Debug, Constructor)]
pub struct Zipping<B> {
    right: B,
}

pub fn zipping<B>(right: B) -> Zipping<B> {
    Zipping::new(right)
}

impl<A, B> Adaptor<A> for Zipping<B>
where
    A: Source,
    B: Source,
    (A::Kind, B::Kind): ZipDispatch<A, B>,
{
    type Output = <(A::Kind, B::Kind) as ZipDispatch<A, B>>::Output;

    fn apply(self, left: A) -> Self::Output {
        zip(left, self.right)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use eyre::Result;
    use itertools::Itertools;
    use lazyseq_core_rs::{engine, Owned, Pipe, Traversal, View};

    use super::*;
    use crate::repeat::{repeat, Repeat};

    #[test]
    fn test_zip_stops_at_the_shorter_input() -> Result<()> {
        let numbers = vec![1, 2, 3];
        let letters = ['a', 'b'];
        let pairs = zip(&numbers, &letters);

        assert_eq!(
            (&pairs).elements().collect_vec(),
            vec![(&1, &'a'), (&2, &'b')]
        );
        assert_eq!((&pairs).size(), 2);
        assert_eq!((&pairs).back(), Some((&2, &'b')));
        assert_eq!((&pairs).read_nth(1), (&2, &'b'));

        type Pairs<'x> = Zip<View<&'x Vec<i32>>, View<&'x [char; 2]>>;
        let category = <&Pairs as Sequence>::CATEGORY;
        assert_eq!(category.traversal, Traversal::RandomAccess);
        assert!(category.sized && category.common && !category.mutable);
        category.ensure_no_stronger_than(&<&View<&Vec<i32>> as Sequence>::CATEGORY)?;
        Ok(())
    }

    #[test]
    fn test_zip_with_an_endless_side() {
        let labels = vec!['x', 'y', 'z'];
        let labelled = labels.pipe(zipping(repeat(0)));

        assert_eq!((&labelled).size_hint(), Some(3));
        assert_eq!(
            (&labelled).elements().map(|(c, n)| format!("{c}{n}")).join(","),
            "x0,y0,z0"
        );
        let category = <&Zip<Owned<Vec<char>>, Repeat<i32>> as Sequence>::CATEGORY;
        assert!(!category.infinite && !category.sized);
    }

    #[test]
    fn test_skipping_is_limited_by_the_shorter_side() {
        let letters = vec!['a', 'b', 'c'];
        let labelled = zip(&letters, repeat(0));
        let mut cursor = (&labelled).begin();
        assert_eq!((&labelled).skip(&mut cursor, 2), 2);
        assert_eq!((&labelled).read_at(&cursor), (&'c', &0));
        assert_eq!((&labelled).skip(&mut cursor, usize::MAX), 1);
        assert!((&labelled).is_end(&cursor));
    }

    #[test]
    fn test_single_pass_zip_never_overpulls_the_right_side() {
        let pulled = Cell::new(0);
        let right = (0..10).inspect(|_| pulled.set(pulled.get() + 1));
        let engine = zip(engine::pull(vec!['a', 'b']), engine::pull(right));

        assert_eq!(engine.collect_vec(), vec![('a', 0), ('b', 1)]);
        assert_eq!(pulled.get(), 2);
    }
}
