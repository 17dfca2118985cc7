use derive_getters::{Dissolve, Getters};
use derive_more::Constructor;
use lazyseq_core_rs::{
    Adaptor, BidirectionalSequence, Bound, Category, CommonSequence, ConstDual, Coroutine,
    Engine, IntoOwner, IntoPull, RandomAccessSequence, Rebind, Resume, Sequence, SequenceMut,
    SizedSequence, Source, Subrange,
};

use crate::kinds::{
    impl_adaptor_source, Borrowed, DropKind, FilterKind, JoinKind, MapKind, Owning, Pulled,
    RepeatKind, SplitKind, TakeKind, Viewed, Writable, ZipKind,
};
use crate::repeat::Repeated;

/// An owner without its first `count` elements.
///
/// The skipped prefix is skipped again every time the sequence is started, in constant time
/// when the base can skip in constant time. Borrowed storage and views never end up here
/// because they can be windowed once instead.
#[derive(Clone, Default, Debug, Constructor, Getters, Dissolve)]
pub struct Dropped<S> {
    base: S,
    count: usize,
}

impl<'a, S> Sequence for &'a Dropped<S>
where
    &'a S: Sequence,
{
    type Element = <&'a S as Sequence>::Element;
    type Cursor = <&'a S as Sequence>::Cursor;

    const CATEGORY: Category = <&'a S as Sequence>::CATEGORY.dropped();

    fn begin(&self) -> Self::Cursor {
        let base: &'a S = &self.base;
        let mut cursor = base.begin();
        base.skip(&mut cursor, self.count);
        cursor
    }

    fn is_end(&self, cursor: &Self::Cursor) -> bool {
        let base: &'a S = &self.base;
        base.is_end(cursor)
    }

    fn inc(&self, cursor: &mut Self::Cursor) {
        let base: &'a S = &self.base;
        base.inc(cursor)
    }

    fn read_at(&self, cursor: &Self::Cursor) -> Self::Element {
        let base: &'a S = &self.base;
        base.read_at(cursor)
    }

    fn distance_hint(&self, from: &Self::Cursor, to: &Self::Cursor) -> Option<usize> {
        let base: &'a S = &self.base;
        base.distance_hint(from, to)
    }

    fn size_hint(&self) -> Option<usize> {
        let base: &'a S = &self.base;
        base.size_hint().map(|size| size.saturating_sub(self.count))
    }

    fn skip(&self, cursor: &mut Self::Cursor, n: usize) -> usize {
        let base: &'a S = &self.base;
        base.skip(cursor, n)
    }
}

impl<'a, S> BidirectionalSequence for &'a Dropped<S>
where
    &'a S: BidirectionalSequence,
{
    fn dec(&self, cursor: &mut Self::Cursor) {
        let base: &'a S = &self.base;
        base.dec(cursor)
    }
}

impl<'a, S> RandomAccessSequence for &'a Dropped<S>
where
    &'a S: RandomAccessSequence,
{
    fn offset(&self, cursor: &mut Self::Cursor, by: isize) {
        let base: &'a S = &self.base;
        base.offset(cursor, by)
    }

    fn distance(&self, from: &Self::Cursor, to: &Self::Cursor) -> isize {
        let base: &'a S = &self.base;
        base.distance(from, to)
    }
}

impl<'a, S> CommonSequence for &'a Dropped<S>
where
    &'a S: CommonSequence,
{
    fn end(&self) -> Self::Cursor {
        let base: &'a S = &self.base;
        base.end()
    }
}

impl<'a, S> SizedSequence for &'a Dropped<S>
where
    &'a S: SizedSequence,
{
    fn size(&self) -> usize {
        let base: &'a S = &self.base;
        base.size().saturating_sub(self.count)
    }
}

impl<'a, S> Rebind for &'a Dropped<S>
where
    &'a S: Rebind,
{
    fn rebind(&self, cursor: &Self::Cursor, new: &Self) -> Self::Cursor {
        let base: &'a S = &self.base;
        let new_base: &'a S = &new.base;
        base.rebind(cursor, &new_base)
    }
}

/// Cursors of a dropped sequence are cursors of its base, so its windows are the base's.
impl<'a, S> Subrange for &'a Dropped<S>
where
    &'a S: Subrange,
{
    type Output = <&'a S as Subrange>::Output;

    fn subrange(
        self,
        head: Self::Cursor,
        tail: Bound<Self::Cursor>,
        len: Option<usize>,
    ) -> Self::Output {
        let base: &'a S = &self.base;
        base.subrange(head, tail, len)
    }
}

/// Writes go to the base; dropping changes where traversal starts, not the cursors.
impl<S: SequenceMut> SequenceMut for Dropped<S> {
    type Cursor = S::Cursor;
    type Value = S::Value;

    fn read_at_mut(&mut self, cursor: &Self::Cursor) -> &mut Self::Value {
        self.base.read_at_mut(cursor)
    }
}

impl<S: ConstDual> ConstDual for Dropped<S> {
    type Const = Dropped<S::Const>;

    fn into_const(self) -> Self::Const {
        Dropped::new(self.base.into_const(), self.count)
    }
}

impl_adaptor_source!([S], Dropped<S>, DropKind);

/// Pull-engine form of [`Dropped`]: skips the prefix on the first resume.
#[derive(Constructor)]
pub struct DropCoroutine<C: Coroutine> {
    source: Engine<C>,
    remaining: usize,
}

impl<C: Coroutine> Coroutine for DropCoroutine<C> {
    type Yield = C::Yield;

    fn resume(&mut self) -> Resume<C::Yield> {
        while self.remaining > 0 {
            self.remaining -= 1;
            if self.source.next().is_none() {
                self.remaining = 0;
                return Resume::Complete;
            }
        }
        self.source.next().into()
    }
}

/// Chooses how [`drop`] treats an input of a given kind.
pub trait DropDispatch<In> {
    type Output;

    fn dispatch(input: In, count: usize) -> Self::Output;
}

/// The window past the first `count` elements, keeping the length known.
fn drop_window<In: Subrange>(input: In, count: usize) -> In::Output {
    let mut head = input.begin();
    let moved = input.skip(&mut head, count);
    let len = input.size_hint().map(|size| size - moved);
    input.subrange(head, Bound::Natural, len)
}

/// Borrowed storage is windowed right away.
impl<In: Subrange> DropDispatch<In> for Borrowed {
    type Output = In::Output;

    fn dispatch(input: In, count: usize) -> Self::Output {
        drop_window(input, count)
    }
}

/// A view is narrowed into the simplest window of its base.
impl<In: Subrange> DropDispatch<In> for Viewed {
    type Output = In::Output;

    fn dispatch(input: In, count: usize) -> Self::Output {
        drop_window(input, count)
    }
}

macro_rules! nest_drop {
    ($($kind:ty),* $(,)?) => {
        $(
            impl<In: IntoOwner> DropDispatch<In> for $kind {
                type Output = Dropped<In::Owner>;

                fn dispatch(input: In, count: usize) -> Self::Output {
                    Dropped::new(input.into_owner(), count)
                }
            }
        )*
    };
}

nest_drop!(Owning, Writable, FilterKind, MapKind, TakeKind, JoinKind, SplitKind, ZipKind);

/// Dropping twice drops the sum.
impl<S> DropDispatch<Dropped<S>> for DropKind {
    type Output = Dropped<S>;

    fn dispatch(input: Dropped<S>, count: usize) -> Dropped<S> {
        let (base, dropped) = input.dissolve();
        log::trace!("Folding drop({count}) into an existing drop({dropped})");
        Dropped::new(base, dropped.saturating_add(count))
    }
}

impl<In: Repeated> DropDispatch<In> for RepeatKind {
    type Output = In;

    fn dispatch(input: In, count: usize) -> In {
        input.dropping_front(count)
    }
}

impl<In: IntoPull> DropDispatch<In> for Pulled {
    type Output = Engine<DropCoroutine<In::Coroutine>>;

    fn dispatch(input: In, count: usize) -> Self::Output {
        Engine::new(DropCoroutine::new(input.into_pull(), count))
    }
}

/// `input` without its first `count` elements; shorter inputs become empty.
pub fn drop<In>(input: In, count: usize) -> <In::Kind as DropDispatch<In>>::Output
where
    In: Source,
    In::Kind: DropDispatch<In>,
{
    <In::Kind as DropDispatch<In>>::dispatch(input, count)
}

/// [`drop`] waiting for its input.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Constructor)]
pub struct Dropping {
    count: usize,
}

pub fn dropping(count: usize) -> Dropping {
    Dropping::new(count)
}

impl<In> Adaptor<In> for Dropping
where
    In: Source,
    In::Kind: DropDispatch<In>,
{
    type Output = <In::Kind as DropDispatch<In>>::Output;

    fn apply(self, input: In) -> Self::Output {
        drop(input, self.count)
    }
}
