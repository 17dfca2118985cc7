use derive_getters::Dissolve;
use derive_more::Constructor;
use lazyseq_core_rs::{
    Adaptor, BidirectionalSequence, Bound, Category, CommonSequence, ConstDual, Coroutine,
    Engine, IntoOwner, IntoPull, RandomAccessSequence, Rebind, Resume, Semiregular, Sequence,
    SizedSequence, Source, Subrange,
};

use crate::kinds::{
    impl_adaptor_source, Borrowed, DropKind, FilterKind, JoinKind, MapKind, Owning, Pulled,
    RepeatKind, SplitKind, TakeKind, Viewed, Writable, ZipKind,
};

/// An element-wise function.
pub trait Transform<A> {
    type Output;

    fn apply(&self, item: A) -> Self::Output;
}

impl<A, B, F> Transform<A> for F
where
    F: Fn(A) -> B,
{
    type Output = B;

    #[inline(always)]
    fn apply(&self, item: A) -> B {
        self(item)
    }
}

/// `second` applied to the result of `first`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Constructor, Dissolve)]
pub struct Compose<F, G> {
    first: F,
    second: G,
}

impl<A, F, G> Transform<A> for Compose<F, G>
where
    F: Transform<A>,
    G: Transform<F::Output>,
{
    type Output = G::Output;

    fn apply(&self, item: A) -> G::Output {
        self.second.apply(self.first.apply(item))
    }
}

/// Elements of an owner passed through a function.
///
/// Keeps random access and the length of its input. Elements are computed on every read and
/// are never writable.
#[derive(Clone, Debug)]
pub struct Map<S, F> {
    base: S,
    transform: Semiregular<F>,
}

impl<S: Default, F> Default for Map<S, F> {
    fn default() -> Self {
        Self {
            base: S::default(),
            transform: Semiregular::default(),
        }
    }
}

impl<S, F> Map<S, F> {
    pub fn new(base: S, transform: F) -> Self {
        Self {
            base,
            transform: Semiregular::new(transform),
        }
    }

    pub fn base(&self) -> &S {
        &self.base
    }

    /// # Panics
    /// When the map was default-constructed.
    pub fn transform(&self) -> &F {
        self.transform.get()
    }

    /// # Panics
    /// When the map was default-constructed.
    pub fn into_parts(self) -> (S, F) {
        match self.transform.into_inner() {
            Some(transform) => (self.base, transform),
            None => panic!("map has no transform"),
        }
    }
}

impl<'a, S, F> Sequence for &'a Map<S, F>
where
    &'a S: Sequence,
    F: Transform<<&'a S as Sequence>::Element>,
{
    type Element = F::Output;
    type Cursor = <&'a S as Sequence>::Cursor;

    const CATEGORY: Category = <&'a S as Sequence>::CATEGORY.mapped();

    fn begin(&self) -> Self::Cursor {
        let base: &'a S = &self.base;
        base.begin()
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
        self.transform().apply(base.read_at(cursor))
    }

    fn distance_hint(&self, from: &Self::Cursor, to: &Self::Cursor) -> Option<usize> {
        let base: &'a S = &self.base;
        base.distance_hint(from, to)
    }

    fn size_hint(&self) -> Option<usize> {
        let base: &'a S = &self.base;
        base.size_hint()
    }

    fn skip(&self, cursor: &mut Self::Cursor, n: usize) -> usize {
        let base: &'a S = &self.base;
        base.skip(cursor, n)
    }
}

impl<'a, S, F> BidirectionalSequence for &'a Map<S, F>
where
    &'a S: BidirectionalSequence,
    F: Transform<<&'a S as Sequence>::Element>,
{
    fn dec(&self, cursor: &mut Self::Cursor) {
        let base: &'a S = &self.base;
        base.dec(cursor)
    }
}

impl<'a, S, F> RandomAccessSequence for &'a Map<S, F>
where
    &'a S: RandomAccessSequence,
    F: Transform<<&'a S as Sequence>::Element>,
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

impl<'a, S, F> CommonSequence for &'a Map<S, F>
where
    &'a S: CommonSequence,
    F: Transform<<&'a S as Sequence>::Element>,
{
    fn end(&self) -> Self::Cursor {
        let base: &'a S = &self.base;
        base.end()
    }
}

impl<'a, S, F> SizedSequence for &'a Map<S, F>
where
    &'a S: SizedSequence,
    F: Transform<<&'a S as Sequence>::Element>,
{
    fn size(&self) -> usize {
        let base: &'a S = &self.base;
        base.size()
    }
}

impl<'a, S, F> Rebind for &'a Map<S, F>
where
    &'a S: Rebind,
    F: Transform<<&'a S as Sequence>::Element>,
{
    fn rebind(&self, cursor: &Self::Cursor, new: &Self) -> Self::Cursor {
        let base: &'a S = &self.base;
        let new_base: &'a S = &new.base;
        base.rebind(cursor, &new_base)
    }
}

/// A window of a map is the same map over a window of its base.
impl<'a, S, F> Subrange for &'a Map<S, F>
where
    &'a S: Subrange,
    F: Transform<<&'a S as Sequence>::Element> + Clone,
{
    type Output = Map<<&'a S as Subrange>::Output, F>;

    fn subrange(
        self,
        head: Self::Cursor,
        tail: Bound<Self::Cursor>,
        len: Option<usize>,
    ) -> Self::Output {
        let base: &'a S = &self.base;
        Map::new(base.subrange(head, tail, len), self.transform().clone())
    }
}

impl_adaptor_source!([S, F], Map<S, F>, MapKind);

/// Mapped elements are computed, so only the base has a read-only form to switch to.
impl<S: ConstDual, F> ConstDual for Map<S, F> {
    type Const = Map<S::Const, F>;

    fn into_const(self) -> Self::Const {
        Map {
            base: self.base.into_const(),
            transform: self.transform,
        }
    }
}

/// Pull-engine form of [`Map`].
#[derive(Constructor)]
pub struct MapCoroutine<C: Coroutine, F> {
    source: Engine<C>,
    transform: F,
}

impl<C: Coroutine, F: Transform<C::Yield>> Coroutine for MapCoroutine<C, F> {
    type Yield = F::Output;

    fn resume(&mut self) -> Resume<F::Output> {
        let transform = &self.transform;
        self.source.next().map(|item| transform.apply(item)).into()
    }
}

/// Chooses how [`map`] treats an input of a given kind.
pub trait MapDispatch<In, F> {
    type Output;

    fn dispatch(input: In, transform: F) -> Self::Output;
}

macro_rules! nest_map {
    ($($kind:ty),* $(,)?) => {
        $(
            impl<In: IntoOwner, F> MapDispatch<In, F> for $kind {
                type Output = Map<In::Owner, F>;

                fn dispatch(input: In, transform: F) -> Self::Output {
                    Map::new(input.into_owner(), transform)
                }
            }
        )*
    };
}

nest_map!(
    Borrowed, Owning, Viewed, Writable, FilterKind, DropKind, TakeKind, JoinKind, SplitKind,
    ZipKind, RepeatKind,
);

/// Mapping a map composes the functions instead of stacking two layers.
impl<S, F, G> MapDispatch<Map<S, F>, G> for MapKind {
    type Output = Map<S, Compose<F, G>>;

    fn dispatch(input: Map<S, F>, transform: G) -> Self::Output {
        let (base, first) = input.into_parts();
        Map::new(base, Compose::new(first, transform))
    }
}

impl<In, F> MapDispatch<In, F> for Pulled
where
    In: IntoPull,
    F: Transform<<In::Coroutine as Coroutine>::Yield>,
{
    type Output = Engine<MapCoroutine<In::Coroutine, F>>;

    fn dispatch(input: In, transform: F) -> Self::Output {
        Engine::new(MapCoroutine::new(input.into_pull(), transform))
    }
}

/// Elements of `input` passed through `transform`.
pub fn map<In, F>(input: In, transform: F) -> <In::Kind as MapDispatch<In, F>>::Output
where
    In: Source,
    In::Kind: MapDispatch<In, F>,
{
    <In::Kind as MapDispatch<In, F>>::dispatch(input, transform)
}

/// [`map`] waiting for its input.
#[derive(Copy, Clone, Debug, Constructor)]
pub struct Mapping<F> {
    transform: F,
}

pub fn mapping<F>(transform: F) -> Mapping<F> {
    Mapping::new(transform)
}

impl<In, F> Adaptor<In> for Mapping<F>
where
    In: Source,
    In::Kind: MapDispatch<In, F>,
{
    type Output = <In::Kind as MapDispatch<In, F>>::Output;

    fn apply(self, input: In) -> Self::Output {
        map(input, self.transform)
    }
}

#[cfg(test)]
mod tests {
    use eyre::Result;
    use itertools::Itertools;
    use lazyseq_core_rs::{engine, Pipe, Traversal, View, ViewMut};

    use super::*;

    fn double(x: &i32) -> i32 {
        x * 2
    }

    #[test]
    fn test_map_keeps_random_access_and_size() -> Result<()> {
        let values = vec![1, 2, 3, 4];
        let doubled = map(&values, double as fn(&i32) -> i32);

        assert_eq!((&doubled).elements().collect_vec(), vec![2, 4, 6, 8]);
        assert_eq!((&doubled).size(), 4);
        assert_eq!((&doubled).read_nth(2), 6);
        assert_eq!((&doubled).elements().rev().collect_vec(), vec![8, 6, 4, 2]);

        let category = <&Map<View<&Vec<i32>>, fn(&i32) -> i32> as Sequence>::CATEGORY;
        assert_eq!(category.traversal, Traversal::RandomAccess);
        assert!(category.sized && !category.mutable);
        category.ensure_no_stronger_than(&<&View<&Vec<i32>> as Sequence>::CATEGORY)?;
        Ok(())
    }

    #[test]
    fn test_repeated_maps_compose() {
        let values = vec![1, 2, 3];
        let chained = map(&values, double as fn(&i32) -> i32)
            .pipe(mapping(|x: i32| x + 1))
            .pipe(mapping(|x: i32| x.to_string()));

        let _: &Map<View<&Vec<i32>>, Compose<Compose<fn(&i32) -> i32, _>, _>> = &chained;
        assert_eq!((&chained).elements().collect_vec(), vec!["3", "5", "7"]);
    }

    #[test]
    fn test_map_over_text() {
        let text = String::from("abc");
        let upper = map(&text, |c: char| c.to_ascii_uppercase());
        assert_eq!((&upper).elements().collect::<String>(), "ABC");
        assert_eq!((&upper).elements().rev().collect::<String>(), "CBA");
    }

    #[test]
    fn test_map_subrange_keeps_the_length() {
        let values = vec![1, 2, 3, 4, 5];
        let doubled = map(&values, double as fn(&i32) -> i32);
        let window = (&doubled).subrange(1, Bound::At(3), Some(2));
        assert_eq!((&window).elements().collect_vec(), vec![4, 6]);
        assert_eq!((&window).size(), 2);
    }

    #[test]
    fn test_map_over_a_writable_window_reads_current_values() {
        let mut values: Vec<i32> = vec![1, 2, 3];
        let mut window = ViewMut::new(&mut values);
        window.for_each_mut(|x| *x += 1);

        let doubled = map(window, double as fn(&i32) -> i32);
        assert_eq!((&doubled).elements().collect_vec(), vec![4, 6, 8]);
        let doubled: Map<View<&Vec<i32>>, fn(&i32) -> i32> = doubled.into_const();
        assert_eq!((&doubled).size(), 3);
    }

    #[test]
    fn test_single_pass_map() {
        let engine = map(engine::pull(vec!["a", "bb"]), |s: &str| s.len());
        assert_eq!(engine.collect_vec(), vec![1, 2]);
    }
}
