use std::marker::PhantomData;

use ::impl_tools::autoimpl;
use derive_getters::Dissolve;
use derive_more::Constructor;
use higher_kinded_types::prelude::*;
use higher_kinded_types::ForFixed;

/// A single-pass source whose items may borrow from the source itself.
///
/// This is the pull protocol for engines that reuse an internal buffer between steps: each item
/// is only valid until the next call to [`LendingIterator::next`].
#[autoimpl(for <T: trait + ?Sized> &mut T, Box <T>)]
pub trait LendingIterator {
    type Item: ForLt;

    fn next(&mut self) -> Option<<Self::Item as ForLt>::Of<'_>>;

    fn map<Fun, Out>(self, f: Fun) -> Map<Self, Fun, Out>
    where
        Self: Sized,
        Out: ForLt,
        for<'iter> Fun:
            FnMut(&'iter (), <Self::Item as ForLt>::Of<'iter>) -> <Out as ForLt>::Of<'iter>,
    {
        Map::new(self, f, PhantomData)
    }

    /// Drains the source, counting the items.
    fn count(mut self) -> usize
    where
        Self: Sized,
    {
        let mut total = 0;
        while self.next().is_some() {
            total += 1;
        }
        total
    }

    /// Copies every lent item into an owned value and collects them.
    fn collect_owned<Out, Fun>(mut self, mut to_owned: Fun) -> Vec<Out>
    where
        Self: Sized,
        for<'iter> Fun: FnMut(<Self::Item as ForLt>::Of<'iter>) -> Out,
    {
        let mut result = Vec::new();
        while let Some(item) = self.next() {
            result.push(to_owned(item));
        }
        result
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Dissolve, Constructor)]
pub struct Map<I, Fun, Out> {
    iter: I,
    map: Fun,
    _phantom: PhantomData<Out>,
}

impl<I, Fun, Out> LendingIterator for Map<I, Fun, Out>
where
    I: LendingIterator,
    Out: ForLt,
    for<'iter> Fun: FnMut(
        &'iter (),
        <<I as LendingIterator>::Item as ForLt>::Of<'iter>,
    ) -> <Out as ForLt>::Of<'iter>,
{
    type Item = Out;

    fn next(&mut self) -> Option<<Self::Item as ForLt>::Of<'_>> {
        self.iter.next().map(|item| (self.map)(&(), item))
    }
}

/// Lends the items of an ordinary iterator. Nothing is borrowed from the adapter.
#[derive(Clone, Debug, Dissolve, Constructor)]
pub struct Lent<I: Iterator> {
    inner: I,
}

impl<I: Iterator> LendingIterator for Lent<I> {
    type Item = ForFixed<I::Item>;

    fn next(&mut self) -> Option<<Self::Item as ForLt>::Of<'_>> {
        self.inner.next()
    }
}

pub trait IntoLendingIterator {
    type Item: ForLt;

    fn into_lending(self) -> impl LendingIterator<Item = Self::Item>;
}

impl<T: Iterator> IntoLendingIterator for T {
    type Item = ForFixed<T::Item>;

    fn into_lending(self) -> impl LendingIterator<Item = Self::Item> {
        Lent::new(self)
    }
}
