use std::borrow::Borrow;

use derive_getters::Dissolve;
use derive_more::Constructor;
use lazyseq_core_rs::{
    Adaptor, BidirectionalSequence, Bound, Category, ConstDual, Coroutine, Engine, IntoOwner,
    IntoPull, Rebind, Resume, Semiregular, Sequence, SequenceMut, Source, Subrange,
};

use crate::kinds::{
    impl_adaptor_source, Borrowed, DropKind, FilterKind, JoinKind, MapKind, Owning, Pulled,
    RepeatKind, SplitKind, TakeKind, Viewed, Writable, ZipKind,
};

/// A test applied to elements.
pub trait Predicate<A> {
    fn test(&self, item: &A) -> bool;
}

impl<A, F> Predicate<A> for F
where
    F: Fn(&A) -> bool,
{
    #[inline(always)]
    fn test(&self, item: &A) -> bool {
        self(item)
    }
}

/// Conjunction of two predicates, evaluated left to right.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Constructor, Dissolve)]
pub struct Both<P, Q> {
    first: P,
    second: Q,
}

impl<A, P: Predicate<A>, Q: Predicate<A>> Predicate<A> for Both<P, Q> {
    fn test(&self, item: &A) -> bool {
        self.first.test(item) && self.second.test(item)
    }
}

/// Accepts elements equal to a value.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Constructor)]
pub struct Equals<T> {
    value: T,
}

impl<A: Borrow<T>, T: PartialEq> Predicate<A> for Equals<T> {
    fn test(&self, item: &A) -> bool {
        item.borrow() == &self.value
    }
}

/// Elements of an owner that pass a predicate.
///
/// The end is the base's natural end and is never a cursor of its own: walking back from it
/// would have to skip rejected elements it cannot see. The predicate lives in a [`Semiregular`] box, so a filter can be default-constructed and
/// clone-assigned even when the predicate cannot. A default filter has no predicate and panics
/// when traversed.
#[derive(Clone, Debug)]
pub struct Filter<S, P> {
    base: S,
    predicate: Semiregular<P>,
}

impl<S: Default, P> Default for Filter<S, P> {
    fn default() -> Self {
        Self {
            base: S::default(),
            predicate: Semiregular::default(),
        }
    }
}

impl<S, P> Filter<S, P> {
    pub fn new(base: S, predicate: P) -> Self {
        Self {
            base,
            predicate: Semiregular::new(predicate),
        }
    }

    pub fn base(&self) -> &S {
        &self.base
    }

    /// # Panics
    /// When the filter was default-constructed.
    pub fn predicate(&self) -> &P {
        self.predicate.get()
    }

    /// # Panics
    /// When the filter was default-constructed.
    pub fn into_parts(self) -> (S, P) {
        match self.predicate.into_inner() {
            Some(predicate) => (self.base, predicate),
            None => panic!("filter has no predicate"),
        }
    }
}

impl<'a, S: 'a, P: 'a> Filter<S, P>
where
    &'a S: Sequence,
    P: Predicate<<&'a S as Sequence>::Element>,
{
    fn accepts(&'a self, cursor: &<&'a S as Sequence>::Cursor) -> bool {
        let base: &'a S = &self.base;
        self.predicate().test(&base.read_at(cursor))
    }

    fn skip_rejected(&'a self, cursor: &mut <&'a S as Sequence>::Cursor) {
        let base: &'a S = &self.base;
        while !base.is_end(cursor) && !self.accepts(cursor) {
            base.inc(cursor);
        }
    }
}

impl<'a, S, P> Sequence for &'a Filter<S, P>
where
    &'a S: Sequence,
    P: Predicate<<&'a S as Sequence>::Element>,
{
    type Element = <&'a S as Sequence>::Element;
    type Cursor = <&'a S as Sequence>::Cursor;

    const CATEGORY: Category = <&'a S as Sequence>::CATEGORY.filtered();

    fn begin(&self) -> Self::Cursor {
        let filter: &'a Filter<S, P> = *self;
        let base: &'a S = &filter.base;
        let mut cursor = base.begin();
        filter.skip_rejected(&mut cursor);
        cursor
    }

    fn is_end(&self, cursor: &Self::Cursor) -> bool {
        let base: &'a S = &self.base;
        base.is_end(cursor)
    }

    fn inc(&self, cursor: &mut Self::Cursor) {
        let filter: &'a Filter<S, P> = *self;
        let base: &'a S = &filter.base;
        base.inc(cursor);
        filter.skip_rejected(cursor);
    }

    fn read_at(&self, cursor: &Self::Cursor) -> Self::Element {
        let base: &'a S = &self.base;
        base.read_at(cursor)
    }
}

impl<'a, S, P> BidirectionalSequence for &'a Filter<S, P>
where
    &'a S: BidirectionalSequence,
    P: Predicate<<&'a S as Sequence>::Element>,
{
    /// Steps back to the previous accepted element, which must exist.
    fn dec(&self, cursor: &mut Self::Cursor) {
        let filter: &'a Filter<S, P> = *self;
        let base: &'a S = &filter.base;
        loop {
            base.dec(cursor);
            if filter.accepts(cursor) {
                break;
            }
        }
    }
}

impl<'a, S, P> Rebind for &'a Filter<S, P>
where
    &'a S: Rebind,
    P: Predicate<<&'a S as Sequence>::Element>,
{
    fn rebind(&self, cursor: &Self::Cursor, new: &Self) -> Self::Cursor {
        let base: &'a S = &self.base;
        let new_base: &'a S = &new.base;
        base.rebind(cursor, &new_base)
    }
}

/// A window of a filter is the same filter over a window of its base.
impl<'a, S, P> Subrange for &'a Filter<S, P>
where
    &'a S: Subrange,
    P: Predicate<<&'a S as Sequence>::Element> + Clone,
{
    type Output = Filter<<&'a S as Subrange>::Output, P>;

    fn subrange(
        self,
        head: Self::Cursor,
        tail: Bound<Self::Cursor>,
        _len: Option<usize>,
    ) -> Self::Output {
        let base: &'a S = &self.base;
        let window = base.subrange(head, tail, None);
        Filter::new(window, self.predicate().clone())
    }
}

/// Writes go to the base. A written element must still pass the predicate.
impl<S: SequenceMut, P> SequenceMut for Filter<S, P> {
    type Cursor = S::Cursor;
    type Value = S::Value;

    fn read_at_mut(&mut self, cursor: &Self::Cursor) -> &mut Self::Value {
        self.base.read_at_mut(cursor)
    }
}

impl<S: ConstDual, P> ConstDual for Filter<S, P> {
    type Const = Filter<S::Const, P>;

    fn into_const(self) -> Self::Const {
        Filter {
            base: self.base.into_const(),
            predicate: self.predicate,
        }
    }
}

impl_adaptor_source!([S, P], Filter<S, P>, FilterKind);

/// Pull-engine form of [`Filter`].
#[derive(Constructor)]
pub struct FilterCoroutine<C: Coroutine, P> {
    source: Engine<C>,
    predicate: P,
}

impl<C: Coroutine, P: Predicate<C::Yield>> Coroutine for FilterCoroutine<C, P> {
    type Yield = C::Yield;

    fn resume(&mut self) -> Resume<C::Yield> {
        let predicate = &self.predicate;
        self.source.find(|item| predicate.test(item)).into()
    }
}

/// Chooses how [`filter`] treats an input of a given kind.
pub trait FilterDispatch<In, P> {
    type Output;

    fn dispatch(input: In, predicate: P) -> Self::Output;
}

macro_rules! nest_filter {
    ($($kind:ty),* $(,)?) => {
        $(
            impl<In: IntoOwner, P> FilterDispatch<In, P> for $kind {
                type Output = Filter<In::Owner, P>;

                fn dispatch(input: In, predicate: P) -> Self::Output {
                    Filter::new(input.into_owner(), predicate)
                }
            }
        )*
    };
}

nest_filter!(
    Borrowed, Owning, Viewed, Writable, MapKind, DropKind, TakeKind, JoinKind, SplitKind,
    ZipKind, RepeatKind,
);

/// Filtering a filter conjoins the predicates instead of stacking two layers.
impl<S, P, Q> FilterDispatch<Filter<S, P>, Q> for FilterKind {
    type Output = Filter<S, Both<P, Q>>;

    fn dispatch(input: Filter<S, P>, predicate: Q) -> Self::Output {
        let (base, first) = input.into_parts();
        Filter::new(base, Both::new(first, predicate))
    }
}

impl<In, P> FilterDispatch<In, P> for Pulled
where
    In: IntoPull,
    P: Predicate<<In::Coroutine as Coroutine>::Yield>,
{
    type Output = Engine<FilterCoroutine<In::Coroutine, P>>;

    fn dispatch(input: In, predicate: P) -> Self::Output {
        Engine::new(FilterCoroutine::new(input.into_pull(), predicate))
    }
}

/// Elements of `input` that pass `predicate`.
pub fn filter<In, P>(input: In, predicate: P) -> <In::Kind as FilterDispatch<In, P>>::Output
where
    In: Source,
    In::Kind: FilterDispatch<In, P>,
{
    <In::Kind as FilterDispatch<In, P>>::dispatch(input, predicate)
}

/// [`filter`] waiting for its input, for use with [`Pipe`](lazyseq_core_rs::Pipe).
#[derive(Copy, Clone, Debug, Constructor)]
pub struct Filtering<P> {
    predicate: P,
}

pub fn filtering<P>(predicate: P) -> Filtering<P> {
    Filtering::new(predicate)
}

impl<In, P> Adaptor<In> for Filtering<P>
where
    In: Source,
    In::Kind: FilterDispatch<In, P>,
{
    type Output = <In::Kind as FilterDispatch<In, P>>::Output;

    fn apply(self, input: In) -> Self::Output {
        filter(input, self.predicate)
    }
}

#[cfg(test)]
mod tests {
    use eyre::Result;
    use itertools::Itertools;
    use lazyseq_core_rs::{engine, Pipe, Traversal, View, ViewMut};

    use super::*;

    fn is_even(x: &&i32) -> bool {
        **x % 2 == 0
    }

    #[test]
    fn test_filter_borrowed_forward_and_back() {
        let values = vec![1, 2, 3, 4, 5, 6];
        let evens = filter(&values, is_even as fn(&&i32) -> bool);

        assert_eq!((&evens).elements().copied().collect_vec(), vec![2, 4, 6]);
        assert_eq!((&evens).front(), Some(&2));

        let mut cursor = (&evens).begin();
        (&evens).inc(&mut cursor);
        (&evens).inc(&mut cursor);
        assert_eq!((&evens).read_at(&cursor), &6);
        (&evens).dec(&mut cursor);
        assert_eq!((&evens).read_at(&cursor), &4);
        (&evens).dec(&mut cursor);
        assert_eq!(cursor, (&evens).begin());
    }

    #[test]
    fn test_end_is_found_by_walking() {
        let values = vec![2, 4, 5, 7];
        let evens = filter(&values, is_even as fn(&&i32) -> bool);
        let mut cursor = (&evens).begin();
        (&evens).inc(&mut cursor);
        (&evens).inc(&mut cursor);
        assert!((&evens).is_end(&cursor));
        assert_eq!(cursor, values.len());

        type Evens<'a> = Filter<View<&'a Vec<i32>>, fn(&&i32) -> bool>;
        assert!(!<&Evens as Sequence>::CATEGORY.common);
    }

    #[test]
    fn test_category_is_weakened() -> Result<()> {
        type Evens<'a> = Filter<View<&'a Vec<i32>>, fn(&&i32) -> bool>;
        let category = <&Evens as Sequence>::CATEGORY;

        assert_eq!(category.traversal, Traversal::Bidirectional);
        assert!(!category.sized);
        assert!(!category.common);
        assert!(!category.mutable);
        category.ensure_no_stronger_than(&<&View<&Vec<i32>> as Sequence>::CATEGORY)?;
        Ok(())
    }

    #[test]
    fn test_repeated_filters_fold() {
        let values = (1..=12).collect_vec();
        let folded = filter(&values, is_even as fn(&&i32) -> bool)
            .pipe(filtering(|x: &&i32| **x % 3 == 0));

        let _: &Filter<View<&Vec<i32>>, Both<fn(&&i32) -> bool, _>> = &folded;
        assert_eq!((&folded).elements().copied().collect_vec(), vec![6, 12]);
    }

    #[test]
    fn test_owning_filter_keeps_private_copy() {
        let values = vec![String::from("a"), String::from("bb"), String::from("ccc")];
        let long = filter(values, |s: &&String| s.len() > 1);
        let copy = long.clone();

        assert_eq!((&long).elements().collect_vec(), vec!["bb", "ccc"]);
        assert_eq!((&copy).elements().collect_vec(), vec!["bb", "ccc"]);
    }

    #[test]
    fn test_filter_subrange() {
        let values = vec![1, 2, 3, 4, 5, 6, 7, 8];
        let evens = filter(&values, is_even as fn(&&i32) -> bool);
        let mut head = (&evens).begin();
        (&evens).inc(&mut head);

        let window = (&evens).subrange(head, Bound::At(6), None);
        assert_eq!((&window).elements().copied().collect_vec(), vec![4, 6]);
        assert_eq!(*window.base(), &[4, 5, 6]);
    }

    #[test]
    fn test_writes_through_a_filtered_window() {
        type Writes<'x> = Filter<ViewMut<'x, Vec<i32>>, fn(&&i32) -> bool>;
        type Reads<'x> = Filter<View<&'x Vec<i32>>, fn(&&i32) -> bool>;

        let mut values: Vec<i32> = vec![1, 2, 3, 4, 5, 6];
        let mut evens = filter(ViewMut::new(&mut values), is_even as fn(&&i32) -> bool);
        let mut cursor = (&evens).begin();
        while !(&evens).is_end(&cursor) {
            *evens.read_at_mut(&cursor) *= 10;
            (&evens).inc(&mut cursor);
        }
        assert!(<&Writes as Sequence>::CATEGORY.mutable);

        let evens: Reads = evens.into_const();
        assert_eq!((&evens).elements().copied().collect_vec(), vec![20, 40, 60]);
        assert!(!<&Reads as Sequence>::CATEGORY.mutable);
        assert_eq!(values, vec![1, 20, 3, 40, 5, 60]);
    }

    #[test]
    fn test_single_pass_filter() {
        let engine = filter(engine::pull(1..=10), |x: &i32| *x > 7);
        assert_eq!(engine.collect_vec(), vec![8, 9, 10]);
    }

    #[test]
    #[should_panic(expected = "empty semiregular box")]
    fn test_default_filter_panics() {
        let filter: Filter<Vec<i32>, fn(&&i32) -> bool> = Filter::default();
        filter.predicate();
    }
}
