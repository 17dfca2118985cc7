use derive_getters::{Dissolve, Getters};
use derive_more::Constructor;
use lazyseq_core_rs::{
    Adaptor, BidirectionalSequence, Category, CommonSequence, ConstDual, Coroutine, Engine,
    IntoOwner, IntoPull, Rebind, Resume, Sequence, Source,
};

use crate::kinds::{
    impl_adaptor_source, Borrowed, DropKind, FilterKind, JoinKind, MapKind, Owning, Pulled,
    RepeatKind, SplitKind, TakeKind, Viewed, Writable, ZipKind,
};

/// Position in a flattened sequence: the outer cursor and, unless at the end, a cursor into
/// the segment it points at. The inner cursor is never at the end of its segment.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Constructor, Getters, Dissolve)]
pub struct JoinCursor<O, I> {
    outer: O,
    inner: Option<I>,
}

/// The elements of every segment of an owner, segment after segment.
///
/// Empty segments are skipped. Walking backwards needs both levels to be bidirectional with a
/// common end.
#[derive(Clone, Default, Debug, Constructor, Getters, Dissolve)]
pub struct Join<S> {
    base: S,
}

type Segment<'a, S> = <&'a S as Sequence>::Element;

impl<'a, S: 'a> Join<S>
where
    &'a S: Sequence,
    Segment<'a, S>: Sequence,
{
    /// Moves forward to the first element of the first non-empty segment at or after `outer`.
    fn settle(
        &'a self,
        mut outer: <&'a S as Sequence>::Cursor,
    ) -> JoinCursor<<&'a S as Sequence>::Cursor, <Segment<'a, S> as Sequence>::Cursor> {
        let base: &'a S = &self.base;
        while !base.is_end(&outer) {
            let segment = base.read_at(&outer);
            let inner = segment.begin();
            if !segment.is_end(&inner) {
                return JoinCursor::new(outer, Some(inner));
            }
            base.inc(&mut outer);
        }
        JoinCursor::new(outer, None)
    }
}

impl<'a, S> Sequence for &'a Join<S>
where
    &'a S: Sequence,
    Segment<'a, S>: Sequence,
{
    type Element = <Segment<'a, S> as Sequence>::Element;
    type Cursor = JoinCursor<<&'a S as Sequence>::Cursor, <Segment<'a, S> as Sequence>::Cursor>;

    const CATEGORY: Category =
        <&'a S as Sequence>::CATEGORY.joined(<Segment<'a, S> as Sequence>::CATEGORY);

    fn begin(&self) -> Self::Cursor {
        let base: &'a S = &self.base;
        self.settle(base.begin())
    }

    fn is_end(&self, cursor: &Self::Cursor) -> bool {
        let base: &'a S = &self.base;
        base.is_end(&cursor.outer)
    }

    fn inc(&self, cursor: &mut Self::Cursor) {
        let base: &'a S = &self.base;
        let segment = base.read_at(&cursor.outer);
        let Some(inner) = cursor.inner.as_mut() else {
            panic!("advancing past the end of a flattened sequence");
        };
        segment.inc(inner);
        if segment.is_end(inner) {
            let mut outer = cursor.outer.clone();
            base.inc(&mut outer);
            *cursor = self.settle(outer);
        }
    }

    fn read_at(&self, cursor: &Self::Cursor) -> Self::Element {
        let base: &'a S = &self.base;
        let segment = base.read_at(&cursor.outer);
        match &cursor.inner {
            Some(inner) => segment.read_at(inner),
            None => panic!("reading past the end of a flattened sequence"),
        }
    }
}

impl<'a, S> BidirectionalSequence for &'a Join<S>
where
    &'a S: BidirectionalSequence + CommonSequence,
    Segment<'a, S>: BidirectionalSequence + CommonSequence,
{
    fn dec(&self, cursor: &mut Self::Cursor) {
        let base: &'a S = &self.base;
        loop {
            if let Some(inner) = cursor.inner.as_mut() {
                let segment = base.read_at(&cursor.outer);
                if *inner != segment.begin() {
                    segment.dec(inner);
                    return;
                }
            }
            base.dec(&mut cursor.outer);
            cursor.inner = Some(base.read_at(&cursor.outer).end());
        }
    }
}

impl<'a, S> CommonSequence for &'a Join<S>
where
    &'a S: CommonSequence,
    Segment<'a, S>: Sequence,
{
    fn end(&self) -> Self::Cursor {
        let base: &'a S = &self.base;
        JoinCursor::new(base.end(), None)
    }
}

/// Both levels are rebound: the outer cursor against the new base, the inner one against the
/// segment the new outer cursor points at.
impl<'a, S> Rebind for &'a Join<S>
where
    &'a S: Rebind,
    Segment<'a, S>: Rebind,
{
    fn rebind(&self, cursor: &Self::Cursor, new: &Self) -> Self::Cursor {
        let base: &'a S = &self.base;
        let new_base: &'a S = &new.base;
        let outer = base.rebind(&cursor.outer, &new_base);
        let inner = cursor.inner.as_ref().map(|inner| {
            let segment = base.read_at(&cursor.outer);
            segment.rebind(inner, &new_base.read_at(&outer))
        });
        JoinCursor::new(outer, inner)
    }
}

impl_adaptor_source!([S], Join<S>, JoinKind);

impl<S: ConstDual> ConstDual for Join<S> {
    type Const = Join<S::Const>;

    fn into_const(self) -> Self::Const {
        Join::new(self.base.into_const())
    }
}

/// Pull-engine form of [`Join`]: drains one segment before pulling the next.
pub struct JoinCoroutine<C: Coroutine>
where
    C::Yield: IntoIterator,
{
    source: Engine<C>,
    current: Option<<C::Yield as IntoIterator>::IntoIter>,
}

impl<C: Coroutine> JoinCoroutine<C>
where
    C::Yield: IntoIterator,
{
    pub fn new(source: Engine<C>) -> Self {
        Self {
            source,
            current: None,
        }
    }
}

impl<C: Coroutine> Coroutine for JoinCoroutine<C>
where
    C::Yield: IntoIterator,
{
    type Yield = <C::Yield as IntoIterator>::Item;

    fn resume(&mut self) -> Resume<Self::Yield> {
        loop {
            if let Some(item) = self.current.as_mut().and_then(Iterator::next) {
                return Resume::Yield(item);
            }
            match self.source.next() {
                Some(segment) => self.current = Some(segment.into_iter()),
                None => {
                    self.current = None;
                    return Resume::Complete;
                }
            }
        }
    }
}

/// Chooses how [`join`] treats an input of a given kind.
pub trait JoinDispatch<In> {
    type Output;

    fn dispatch(input: In) -> Self::Output;
}

macro_rules! nest_join {
    ($($kind:ty),* $(,)?) => {
        $(
            impl<In: IntoOwner> JoinDispatch<In> for $kind {
                type Output = Join<In::Owner>;

                fn dispatch(input: In) -> Self::Output {
                    Join::new(input.into_owner())
                }
            }
        )*
    };
}

// Flattening a flattened sequence removes another level, so joins nest rather than fold.
nest_join!(
    Borrowed, Owning, Viewed, Writable, FilterKind, MapKind, DropKind, TakeKind, JoinKind,
    SplitKind, ZipKind, RepeatKind,
);

impl<In> JoinDispatch<In> for Pulled
where
    In: IntoPull,
    <In::Coroutine as Coroutine>::Yield: IntoIterator,
{
    type Output = Engine<JoinCoroutine<In::Coroutine>>;

    fn dispatch(input: In) -> Self::Output {
        Engine::new(JoinCoroutine::new(input.into_pull()))
    }
}

/// The elements of the segments of `input`, in order.
pub fn join<In>(input: In) -> <In::Kind as JoinDispatch<In>>::Output
where
    In: Source,
    In::Kind: JoinDispatch<In>,
{
    <In::Kind as JoinDispatch<In>>::dispatch(input)
}

/// [`join`] as a pipe stage.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Joining;

pub fn joining() -> Joining {
    Joining
}

impl<In> Adaptor<In> for Joining
where
    In: Source,
    In::Kind: JoinDispatch<In>,
{
    type Output = <In::Kind as JoinDispatch<In>>::Output;

    fn apply(self, input: In) -> Self::Output {
        join(input)
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use lazyseq_core_rs::{engine, Owned, Pipe, Traversal, View, ViewMut};

    use super::*;

    #[test]
    fn test_join_skips_empty_segments() {
        let nested: Vec<Vec<i32>> = vec![vec![], vec![1, 2, 3], vec![], vec![4, 5], vec![6]];
        let flat = join(&nested);
        assert_eq!((&flat).elements().copied().collect_vec(), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(
            (&flat).elements().rev().copied().collect_vec(),
            vec![6, 5, 4, 3, 2, 1]
        );
        assert_eq!((&flat).back(), Some(&6));

        let category = <&Join<View<&Vec<Vec<i32>>>> as Sequence>::CATEGORY;
        assert_eq!(category.traversal, Traversal::Bidirectional);
        assert!(!category.sized && category.common);
    }

    #[test]
    fn test_join_meets_in_the_middle() {
        let nested = vec![vec!['a', 'b'], vec![], vec!['c']];
        let flat = join(nested.clone());
        let mut iter = (&flat).elements();
        assert_eq!(iter.next(), Some(&'a'));
        assert_eq!(iter.next_back(), Some(&'c'));
        assert_eq!(iter.next(), Some(&'b'));
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn test_join_of_empty_input() {
        let nested: Vec<Vec<u8>> = vec![vec![], vec![]];
        let flat = nested.pipe(joining());
        assert!((&flat).empty());
        assert_eq!((&flat).back(), None);
    }

    #[test]
    fn test_cloned_join_rebinds() {
        let flat: Join<Owned<Vec<Vec<i32>>>> = join(vec![vec![1], vec![2, 3]]);
        let copy = flat.clone();
        let mut cursor = (&flat).begin();
        (&flat).inc(&mut cursor);
        let rebound = (&flat).rebind(&cursor, &&copy);
        assert_eq!((&copy).read_at(&rebound), &2);
    }

    #[test]
    fn test_flattening_a_writable_window_reads_only() {
        let mut nested: Vec<Vec<i32>> = vec![vec![1], vec![], vec![2, 3]];
        let flat = join(ViewMut::new(&mut nested));
        assert_eq!((&flat).elements().copied().collect_vec(), vec![1, 2, 3]);
        assert!(!<&Join<ViewMut<Vec<Vec<i32>>>> as Sequence>::CATEGORY.mutable);

        let flat: Join<View<&Vec<Vec<i32>>>> = flat.into_const();
        assert_eq!((&flat).back(), Some(&3));
    }

    #[test]
    fn test_single_pass_join() {
        let engine = join(engine::pull(vec!["ab", "", "c"]).pipe(crate::map::mapping(str::chars)));
        assert_eq!(engine.collect::<String>(), "abc");
    }
}
