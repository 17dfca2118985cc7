use derive_getters::{Dissolve, Getters};
use derive_more::Constructor;
use higher_kinded_types::prelude::*;
use lazyseq_core_rs::{
    Adaptor, Bound, Category, ConstDual, Coroutine, Engine, IntoOwner, IntoPull, LendingIterator,
    Rebind, Resume, Semiregular, Sequence, Source, Subrange,
};

use crate::filter::{Equals, Predicate};
use crate::kinds::{
    impl_adaptor_source, Borrowed, DropKind, FilterKind, JoinKind, MapKind, Owning, Pulled,
    RepeatKind, SplitKind, TakeKind, Viewed, ZipKind,
};

/// The current segment `[head, tail)` of a split sequence.
///
/// `tail` rests on a delimiter or on the end of the base. `done` marks the end of the split
/// sequence itself, which is one step past the last segment.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Getters, Dissolve)]
pub struct SplitCursor<C> {
    head: C,
    tail: C,
    len: usize,
    done: bool,
}

/// Segments of an owner between elements matching a delimiter test.
///
/// Every delimiter ends a segment, so adjacent delimiters produce empty segments and a trailing
/// delimiter produces a trailing empty segment. An empty input has no segments at all. Segments
/// are windows into the base with a known length.
#[derive(Clone, Debug)]
pub struct Split<S, P> {
    base: S,
    delimiter: Semiregular<P>,
}

impl<S: Default, P> Default for Split<S, P> {
    fn default() -> Self {
        Self {
            base: S::default(),
            delimiter: Semiregular::default(),
        }
    }
}

impl<S, P> Split<S, P> {
    pub fn new(base: S, delimiter: P) -> Self {
        Self {
            base,
            delimiter: Semiregular::new(delimiter),
        }
    }

    pub fn base(&self) -> &S {
        &self.base
    }

    /// # Panics
    /// When the split was default-constructed.
    pub fn delimiter(&self) -> &P {
        self.delimiter.get()
    }
}

impl<'a, S: 'a, P: 'a> Split<S, P>
where
    &'a S: Sequence,
    P: Predicate<<&'a S as Sequence>::Element>,
{
    /// Walks from `head` to the next delimiter or the end, counting the elements passed.
    fn scan(
        &'a self,
        head: &<&'a S as Sequence>::Cursor,
    ) -> (<&'a S as Sequence>::Cursor, usize) {
        let base: &'a S = &self.base;
        let mut tail = head.clone();
        let mut len = 0;
        while !base.is_end(&tail) && !self.delimiter().test(&base.read_at(&tail)) {
            base.inc(&mut tail);
            len += 1;
        }
        (tail, len)
    }

    fn segment_at(
        &'a self,
        head: <&'a S as Sequence>::Cursor,
    ) -> SplitCursor<<&'a S as Sequence>::Cursor> {
        let (tail, len) = self.scan(&head);
        SplitCursor {
            head,
            tail,
            len,
            done: false,
        }
    }
}

impl<'a, S, P> Sequence for &'a Split<S, P>
where
    &'a S: Subrange,
    P: Predicate<<&'a S as Sequence>::Element>,
{
    type Element = <&'a S as Subrange>::Output;
    type Cursor = SplitCursor<<&'a S as Sequence>::Cursor>;

    const CATEGORY: Category = <&'a S as Sequence>::CATEGORY.split();

    fn begin(&self) -> Self::Cursor {
        let base: &'a S = &self.base;
        let head = base.begin();
        match base.is_end(&head) {
            true => SplitCursor {
                tail: head.clone(),
                head,
                len: 0,
                done: true,
            },
            false => self.segment_at(head),
        }
    }

    fn is_end(&self, cursor: &Self::Cursor) -> bool {
        cursor.done
    }

    fn inc(&self, cursor: &mut Self::Cursor) {
        debug_assert!(!cursor.done, "advancing past the last segment");
        let base: &'a S = &self.base;
        if base.is_end(&cursor.tail) {
            cursor.done = true;
            return;
        }
        let mut head = cursor.tail.clone();
        base.inc(&mut head);
        *cursor = self.segment_at(head);
    }

    fn read_at(&self, cursor: &Self::Cursor) -> Self::Element {
        let base: &'a S = &self.base;
        base.subrange(
            cursor.head.clone(),
            Bound::At(cursor.tail.clone()),
            Some(cursor.len),
        )
    }
}

impl<'a, S, P> Rebind for &'a Split<S, P>
where
    &'a S: Subrange + Rebind,
    P: Predicate<<&'a S as Sequence>::Element>,
{
    fn rebind(&self, cursor: &Self::Cursor, new: &Self) -> Self::Cursor {
        let base: &'a S = &self.base;
        let new_base: &'a S = &new.base;
        SplitCursor {
            head: base.rebind(&cursor.head, &new_base),
            tail: base.rebind(&cursor.tail, &new_base),
            len: cursor.len,
            done: cursor.done,
        }
    }
}

impl_adaptor_source!([S, P], Split<S, P>, SplitKind);

impl<S: ConstDual, P> ConstDual for Split<S, P> {
    type Const = Split<S::Const, P>;

    fn into_const(self) -> Self::Const {
        Split {
            base: self.base.into_const(),
            delimiter: self.delimiter,
        }
    }
}

/// Pull-engine form of [`Split`], collecting every segment into a fresh `Vec`.
pub struct SplitCoroutine<C: Coroutine, P> {
    source: Engine<C>,
    delimiter: P,
    /// At least one element was pulled, so one more segment is owed at the end.
    open: bool,
    finished: bool,
}

impl<C: Coroutine, P> SplitCoroutine<C, P> {
    pub fn new(source: Engine<C>, delimiter: P) -> Self {
        Self {
            source,
            delimiter,
            open: false,
            finished: false,
        }
    }
}

impl<C: Coroutine, P: Predicate<C::Yield>> Coroutine for SplitCoroutine<C, P> {
    type Yield = Vec<C::Yield>;

    fn resume(&mut self) -> Resume<Self::Yield> {
        if self.finished {
            return Resume::Complete;
        }
        let mut segment = Vec::new();
        loop {
            match self.source.next() {
                Some(item) => {
                    self.open = true;
                    if self.delimiter.test(&item) {
                        return Resume::Yield(segment);
                    }
                    segment.push(item);
                }
                None => {
                    self.finished = true;
                    return match self.open {
                        true => Resume::Yield(segment),
                        false => Resume::Complete,
                    };
                }
            }
        }
    }
}

/// Splits a single-pass input, lending each segment from one reused buffer.
///
/// Nothing is allocated per segment; a lent segment is valid until the next call to
/// [`LendingIterator::next`].
pub struct SplitLending<I: Iterator, P> {
    source: I,
    delimiter: P,
    buffer: Vec<I::Item>,
    open: bool,
    finished: bool,
}

impl<I: Iterator, P> SplitLending<I, P> {
    pub fn new(source: I, delimiter: P) -> Self {
        Self {
            source,
            delimiter,
            buffer: Vec::new(),
            open: false,
            finished: false,
        }
    }
}

impl<I, P> LendingIterator for SplitLending<I, P>
where
    I: Iterator,
    I::Item: 'static,
    P: Predicate<I::Item>,
{
    type Item = For!(<'iter> = &'iter [I::Item]);

    fn next(&mut self) -> Option<<Self::Item as ForLt>::Of<'_>> {
        if self.finished {
            return None;
        }
        self.buffer.clear();
        loop {
            match self.source.next() {
                Some(item) => {
                    self.open = true;
                    if self.delimiter.test(&item) {
                        return Some(self.buffer.as_slice());
                    }
                    self.buffer.push(item);
                }
                None => {
                    self.finished = true;
                    return match self.open {
                        true => Some(self.buffer.as_slice()),
                        false => None,
                    };
                }
            }
        }
    }
}

/// Segments of an already-open input separated by elements equal to `value`, lent one at a
/// time.
pub fn split_lending<I, T>(source: I, value: T) -> SplitLending<I::IntoIter, Equals<T>>
where
    I: IntoIterator,
{
    SplitLending::new(source.into_iter(), Equals::new(value))
}

/// Chooses how [`split`] treats an input of a given kind.
pub trait SplitDispatch<In, P> {
    type Output;

    fn dispatch(input: In, delimiter: P) -> Self::Output;
}

macro_rules! nest_split {
    ($($kind:ty),* $(,)?) => {
        $(
            impl<In: IntoOwner, P> SplitDispatch<In, P> for $kind {
                type Output = Split<In::Owner, P>;

                fn dispatch(input: In, delimiter: P) -> Self::Output {
                    Split::new(input.into_owner(), delimiter)
                }
            }
        )*
    };
}

// Splitting segments again works on the segments, so splits nest rather than fold.
nest_split!(
    Borrowed, Owning, Viewed, FilterKind, MapKind, DropKind, TakeKind, JoinKind, SplitKind,
    ZipKind, RepeatKind,
);

impl<In, P> SplitDispatch<In, P> for Pulled
where
    In: IntoPull,
    P: Predicate<<In::Coroutine as Coroutine>::Yield>,
{
    type Output = Engine<SplitCoroutine<In::Coroutine, P>>;

    fn dispatch(input: In, delimiter: P) -> Self::Output {
        Engine::new(SplitCoroutine::new(input.into_pull(), delimiter))
    }
}

/// Segments of `input` separated by elements equal to `value`.
pub fn split<In, T>(input: In, value: T) -> <In::Kind as SplitDispatch<In, Equals<T>>>::Output
where
    In: Source,
    In::Kind: SplitDispatch<In, Equals<T>>,
{
    <In::Kind as SplitDispatch<In, Equals<T>>>::dispatch(input, Equals::new(value))
}

/// Segments of `input` separated by elements passing `delimiter`.
pub fn split_when<In, P>(input: In, delimiter: P) -> <In::Kind as SplitDispatch<In, P>>::Output
where
    In: Source,
    In::Kind: SplitDispatch<In, P>,
{
    <In::Kind as SplitDispatch<In, P>>::dispatch(input, delimiter)
}

/// [`split_when`] waiting for its input.
#[derive(Copy, Clone, Debug, Constructor)]
pub struct Splitting<P> {
    delimiter: P,
}

pub fn splitting<T>(value: T) -> Splitting<Equals<T>> {
    Splitting::new(Equals::new(value))
}

pub fn splitting_when<P>(delimiter: P) -> Splitting<P> {
    Splitting::new(delimiter)
}

impl<In, P> Adaptor<In> for Splitting<P>
where
    In: Source,
    In::Kind: SplitDispatch<In, P>,
{
    type Output = <In::Kind as SplitDispatch<In, P>>::Output;

    fn apply(self, input: In) -> Self::Output {
        split_when(input, self.delimiter)
    }
}
