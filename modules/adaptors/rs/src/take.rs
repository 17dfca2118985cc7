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
use crate::repeat::{RepeatN, Repeated};

/// A base cursor paired with the number of elements already passed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Constructor, Getters, Dissolve)]
pub struct TakeCursor<C> {
    base: C,
    index: usize,
}

/// At most the first `count` elements of an owner.
///
/// The end is reached either at the base's end or after `count` elements, whichever comes
/// first. The result has a common end only when the base can be offset in constant time and
/// knows its length.
#[derive(Clone, Default, Debug, Constructor, Getters, Dissolve)]
pub struct Taken<S> {
    base: S,
    count: usize,
}

impl<'a, S> Sequence for &'a Taken<S>
where
    &'a S: Sequence,
{
    type Element = <&'a S as Sequence>::Element;
    type Cursor = TakeCursor<<&'a S as Sequence>::Cursor>;

    const CATEGORY: Category = <&'a S as Sequence>::CATEGORY.taken();

    fn begin(&self) -> Self::Cursor {
        let base: &'a S = &self.base;
        TakeCursor::new(base.begin(), 0)
    }

    fn is_end(&self, cursor: &Self::Cursor) -> bool {
        let base: &'a S = &self.base;
        cursor.index >= self.count || base.is_end(&cursor.base)
    }

    fn inc(&self, cursor: &mut Self::Cursor) {
        let base: &'a S = &self.base;
        base.inc(&mut cursor.base);
        cursor.index += 1;
    }

    fn read_at(&self, cursor: &Self::Cursor) -> Self::Element {
        let base: &'a S = &self.base;
        base.read_at(&cursor.base)
    }

    fn distance_hint(&self, from: &Self::Cursor, to: &Self::Cursor) -> Option<usize> {
        to.index.checked_sub(from.index)
    }

    fn size_hint(&self) -> Option<usize> {
        let base: &'a S = &self.base;
        base.size_hint().map(|size| size.min(self.count))
    }

    fn skip(&self, cursor: &mut Self::Cursor, n: usize) -> usize {
        let base: &'a S = &self.base;
        let left = self.count.saturating_sub(cursor.index);
        let moved = base.skip(&mut cursor.base, n.min(left));
        cursor.index += moved;
        moved
    }
}

impl<'a, S> BidirectionalSequence for &'a Taken<S>
where
    &'a S: BidirectionalSequence,
{
    fn dec(&self, cursor: &mut Self::Cursor) {
        let base: &'a S = &self.base;
        debug_assert!(cursor.index > 0, "decrementing past the beginning");
        base.dec(&mut cursor.base);
        cursor.index -= 1;
    }
}

impl<'a, S> RandomAccessSequence for &'a Taken<S>
where
    &'a S: RandomAccessSequence,
{
    fn offset(&self, cursor: &mut Self::Cursor, by: isize) {
        let base: &'a S = &self.base;
        base.offset(&mut cursor.base, by);
        cursor.index = cursor.index.checked_add_signed(by).unwrap_or(0);
        debug_assert!(cursor.index <= self.count, "offset moves past the end");
    }

    fn distance(&self, from: &Self::Cursor, to: &Self::Cursor) -> isize {
        to.index as isize - from.index as isize
    }
}

impl<'a, S> CommonSequence for &'a Taken<S>
where
    &'a S: RandomAccessSequence + SizedSequence,
{
    fn end(&self) -> Self::Cursor {
        let base: &'a S = &self.base;
        let len = base.size().min(self.count);
        let mut cursor = base.begin();
        base.offset(&mut cursor, len as isize);
        TakeCursor::new(cursor, len)
    }
}

impl<'a, S> SizedSequence for &'a Taken<S>
where
    &'a S: SizedSequence,
{
    fn size(&self) -> usize {
        let base: &'a S = &self.base;
        base.size().min(self.count)
    }
}

impl<'a, S> Rebind for &'a Taken<S>
where
    &'a S: Rebind,
{
    fn rebind(&self, cursor: &Self::Cursor, new: &Self) -> Self::Cursor {
        let base: &'a S = &self.base;
        let new_base: &'a S = &new.base;
        TakeCursor::new(base.rebind(&cursor.base, &new_base), cursor.index)
    }
}

/// A window of a prefix is a shorter prefix of a window of the base.
impl<'a, S> Subrange for &'a Taken<S>
where
    &'a S: Subrange,
{
    type Output = Taken<<&'a S as Subrange>::Output>;

    fn subrange(
        self,
        head: Self::Cursor,
        tail: Bound<Self::Cursor>,
        len: Option<usize>,
    ) -> Self::Output {
        let base: &'a S = &self.base;
        let (head, start) = head.dissolve();
        match tail {
            Bound::At(tail) => {
                let (tail, stop) = tail.dissolve();
                Taken::new(base.subrange(head, Bound::At(tail), len), stop - start)
            }
            Bound::Natural | Bound::Unreachable => {
                Taken::new(base.subrange(head, Bound::Natural, None), self.count - start)
            }
        }
    }
}

impl<S: SequenceMut> SequenceMut for Taken<S> {
    type Cursor = TakeCursor<S::Cursor>;
    type Value = S::Value;

    fn read_at_mut(&mut self, cursor: &Self::Cursor) -> &mut Self::Value {
        debug_assert!(cursor.index < self.count, "writing past the end of a prefix");
        self.base.read_at_mut(&cursor.base)
    }
}

impl<S: ConstDual> ConstDual for Taken<S> {
    type Const = Taken<S::Const>;

    fn into_const(self) -> Self::Const {
        Taken::new(self.base.into_const(), self.count)
    }
}

impl_adaptor_source!([S], Taken<S>, TakeKind);

/// Pull-engine form of [`Taken`]. Never resumes its source once `remaining` reaches zero.
#[derive(Constructor)]
pub struct TakeCoroutine<C: Coroutine> {
    source: Engine<C>,
    remaining: usize,
}

impl<C: Coroutine> TakeCoroutine<C> {
    pub fn source(&self) -> &Engine<C> {
        &self.source
    }
}

impl<C: Coroutine> Coroutine for TakeCoroutine<C> {
    type Yield = C::Yield;

    fn resume(&mut self) -> Resume<C::Yield> {
        if self.remaining == 0 {
            return Resume::Complete;
        }
        self.remaining -= 1;
        let next = self.source.next();
        if next.is_none() {
            self.remaining = 0;
        }
        next.into()
    }
}

/// Chooses how [`take`] treats an input of a given kind.
pub trait TakeDispatch<In> {
    type Output;

    fn dispatch(input: In, count: usize) -> Self::Output;
}

/// The window over the first `count` elements; its length is the number of elements skipped.
fn take_window<In: Subrange>(input: In, count: usize) -> In::Output {
    let head = input.begin();
    let mut tail = head.clone();
    let len = input.skip(&mut tail, count);
    input.subrange(head, Bound::At(tail), Some(len))
}

/// Borrowed storage is windowed right away.
impl<In: Subrange> TakeDispatch<In> for Borrowed {
    type Output = In::Output;

    fn dispatch(input: In, count: usize) -> Self::Output {
        take_window(input, count)
    }
}

/// A view is narrowed into the simplest window of its base.
impl<In: Subrange> TakeDispatch<In> for Viewed {
    type Output = In::Output;

    fn dispatch(input: In, count: usize) -> Self::Output {
        take_window(input, count)
    }
}

macro_rules! nest_take {
    ($($kind:ty),* $(,)?) => {
        $(
            impl<In: IntoOwner> TakeDispatch<In> for $kind {
                type Output = Taken<In::Owner>;

                fn dispatch(input: In, count: usize) -> Self::Output {
                    Taken::new(input.into_owner(), count)
                }
            }
        )*
    };
}

nest_take!(Owning, Writable, FilterKind, MapKind, DropKind, JoinKind, SplitKind, ZipKind);

/// Taking twice takes the smaller count.
impl<S> TakeDispatch<Taken<S>> for TakeKind {
    type Output = Taken<S>;

    fn dispatch(input: Taken<S>, count: usize) -> Taken<S> {
        let (base, taken) = input.dissolve();
        log::trace!("Folding take({count}) into an existing take({taken})");
        Taken::new(base, taken.min(count))
    }
}

impl<In: Repeated> TakeDispatch<In> for RepeatKind {
    type Output = RepeatN<In::Value>;

    fn dispatch(input: In, count: usize) -> Self::Output {
        input.taking_front(count)
    }
}

impl<In: IntoPull> TakeDispatch<In> for Pulled {
    type Output = Engine<TakeCoroutine<In::Coroutine>>;

    fn dispatch(input: In, count: usize) -> Self::Output {
        Engine::new(TakeCoroutine::new(input.into_pull(), count))
    }
}

/// At most the first `count` elements of `input`.
pub fn take<In>(input: In, count: usize) -> <In::Kind as TakeDispatch<In>>::Output
where
    In: Source,
    In::Kind: TakeDispatch<In>,
{
    <In::Kind as TakeDispatch<In>>::dispatch(input, count)
}

/// [`take`] waiting for its input.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Constructor)]
pub struct Taking {
    count: usize,
}

pub fn taking(count: usize) -> Taking {
    Taking::new(count)
}

impl<In> Adaptor<In> for Taking
where
    In: Source,
    In::Kind: TakeDispatch<In>,
{
    type Output = <In::Kind as TakeDispatch<In>>::Output;

    fn apply(self, input: In) -> Self::Output {
        take(input, self.count)
    }
}
