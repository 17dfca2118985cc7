use std::slice;

use derive_more::Constructor;

use crate::owned::Owned;
use crate::position::{Position, PositionMut};
use crate::sequence::{Container, Owner, Sequence};
use crate::view::{View, ViewMut};

/// Conversion of a writable iterator, position or view into its read-only counterpart.
///
/// The read-only form is its own dual, so converting twice never wraps twice. Types that are
/// already read-only map to themselves.
pub trait ConstDual: Sized {
    type Const: ConstDual<Const = Self::Const>;

    fn into_const(self) -> Self::Const;
}

impl<'a, T: ?Sized> ConstDual for &'a mut T {
    type Const = &'a T;

    fn into_const(self) -> &'a T {
        self
    }
}

impl<T: ?Sized> ConstDual for &T {
    type Const = Self;

    fn into_const(self) -> Self {
        self
    }
}

impl<'a, T> ConstDual for slice::IterMut<'a, T> {
    type Const = slice::Iter<'a, T>;

    fn into_const(self) -> slice::Iter<'a, T> {
        self.into_slice().iter()
    }
}

impl<T> ConstDual for slice::Iter<'_, T> {
    type Const = Self;

    fn into_const(self) -> Self {
        self
    }
}

/// Read-only adapter over any iterator whose items have a read-only dual.
#[derive(Clone, Debug, Constructor)]
pub struct ConstIter<I> {
    inner: I,
}

impl<I> Iterator for ConstIter<I>
where
    I: Iterator,
    I::Item: ConstDual,
{
    type Item = <I::Item as ConstDual>::Const;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(ConstDual::into_const)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<I> DoubleEndedIterator for ConstIter<I>
where
    I: DoubleEndedIterator,
    I::Item: ConstDual,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(ConstDual::into_const)
    }
}

impl<I> ConstDual for ConstIter<I> {
    type Const = Self;

    fn into_const(self) -> Self {
        self
    }
}

impl<A: ConstDual, B: ConstDual> ConstDual for (A, B) {
    type Const = (A::Const, B::Const);

    fn into_const(self) -> Self::Const {
        (self.0.into_const(), self.1.into_const())
    }
}

impl<T: ConstDual> ConstDual for Option<T> {
    type Const = Option<T::Const>;

    fn into_const(self) -> Self::Const {
        self.map(ConstDual::into_const)
    }
}

macro_rules! impl_self_dual {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ConstDual for $ty {
                type Const = Self;

                fn into_const(self) -> Self {
                    self
                }
            }
        )*
    };
}

impl_self_dual!(
    (), bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64
);

impl<S: Sequence> ConstDual for View<S> {
    type Const = Self;

    fn into_const(self) -> Self {
        self
    }
}

impl<'x, C: Owner + ?Sized> ConstDual for ViewMut<'x, C> {
    type Const = View<C::Handle<'x>>;

    fn into_const(self) -> Self::Const {
        self.into_view()
    }
}

impl<S: Sequence> ConstDual for Position<S> {
    type Const = Self;

    fn into_const(self) -> Self {
        self
    }
}

impl<'x, C: Owner + ?Sized> ConstDual for PositionMut<'x, C> {
    type Const = Position<C::Handle<'x>>;

    fn into_const(self) -> Self::Const {
        self.into_position()
    }
}

/// A private copy is read-only through its handles already.
impl<C: Container> ConstDual for Owned<C> {
    type Const = Self;

    fn into_const(self) -> Self {
        self
    }
}
