use std::collections::VecDeque;

use crate::engine::{Coroutine, Engine, SinglePass};
use crate::owned::Owned;
use crate::sequence::{Container, Sequence, SequenceMut};
use crate::view::{View, ViewMut};

/// Classifies an adaptor input so that each adaptor can pick its implementation path.
///
/// Every input type names exactly one kind marker. Adaptors implement their dispatch traits on
/// the markers rather than on the inputs, which keeps the per-kind implementations disjoint.
pub trait Source {
    type Kind;
}

/// A shared reference to storage that outlives the adaptor: the adaptor keeps a window.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Borrowed;

/// A container handed over by value: the adaptor keeps a private copy.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Owning;

/// An existing window, kept as is.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Viewed;

/// A writable window: adaptors keep it and forward writes to its owner.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Writable;

/// A single-pass input: the adaptor becomes a pull engine.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Pulled;

/// Multi-pass inputs turned into the owner an adaptor stores. References to the owner are the
/// handles the adaptor traverses.
pub trait IntoOwner: Source {
    type Owner;

    fn into_owner(self) -> Self::Owner;
}

/// Single-pass inputs turned into the engine an adaptor pulls from.
pub trait IntoPull: Source<Kind = Pulled> {
    type Coroutine: Coroutine;

    fn into_pull(self) -> Engine<Self::Coroutine>;
}

macro_rules! impl_borrowed {
    ([$($generics:tt)*], $handle:ty) => {
        impl<$($generics)*> Source for $handle {
            type Kind = Borrowed;
        }

        impl<$($generics)*> IntoOwner for $handle {
            type Owner = View<$handle>;

            fn into_owner(self) -> View<$handle> {
                View::new(self)
            }
        }
    };
}

impl_borrowed!(['x, T], &'x [T]);
impl_borrowed!(['x, T], &'x Vec<T>);
impl_borrowed!(['x, T, const N: usize], &'x [T; N]);
impl_borrowed!(['x, T], &'x VecDeque<T>);
impl_borrowed!(['x], &'x str);
impl_borrowed!(['x], &'x String);

macro_rules! impl_owning {
    ([$($generics:tt)*], $container:ty) => {
        impl<$($generics)*> Source for $container {
            type Kind = Owning;
        }

        impl<$($generics)*> IntoOwner for $container {
            type Owner = Owned<$container>;

            fn into_owner(self) -> Owned<$container> {
                Owned::new(self)
            }
        }
    };
}

impl_owning!([T: Clone], Vec<T>);
impl_owning!([T: Clone, const N: usize], [T; N]);
impl_owning!([T: Clone], VecDeque<T>);
impl_owning!([], String);

impl<C: Container> Source for Owned<C> {
    type Kind = Owning;
}

impl<C: Container> IntoOwner for Owned<C> {
    type Owner = Self;

    fn into_owner(self) -> Self {
        self
    }
}

impl<S: Sequence> Source for View<S> {
    type Kind = Viewed;
}

impl<S: Sequence> IntoOwner for View<S> {
    type Owner = Self;

    fn into_owner(self) -> Self {
        self
    }
}

impl<C: SequenceMut + ?Sized> Source for ViewMut<'_, C> {
    type Kind = Writable;
}

impl<C: SequenceMut + ?Sized> IntoOwner for ViewMut<'_, C> {
    type Owner = Self;

    fn into_owner(self) -> Self {
        self
    }
}

impl<C: Coroutine> Source for Engine<C> {
    type Kind = Pulled;
}

impl<C: Coroutine> IntoPull for Engine<C> {
    type Coroutine = C;

    fn into_pull(self) -> Self {
        self
    }
}

impl<I: Iterator> Source for SinglePass<I> {
    type Kind = Pulled;
}

impl<I: Iterator> IntoPull for SinglePass<I> {
    type Coroutine = Self;

    fn into_pull(self) -> Engine<Self> {
        Engine::new(self)
    }
}

/// A partially applied adaptor, waiting for its input.
pub trait Adaptor<In> {
    type Output;

    fn apply(self, input: In) -> Self::Output;
}

/// Infix composition: `input.pipe(adaptor)` is `adaptor` applied to `input`.
pub trait Pipe: Sized {
    fn pipe<A: Adaptor<Self>>(self, adaptor: A) -> A::Output {
        adaptor.apply(self)
    }
}

impl<T> Pipe for T {}

#[cfg(test)]
mod tests {
    use std::any::TypeId;
    use std::borrow::Borrow;

    use itertools::Itertools;

    use super::*;
    use crate::engine;

    fn kind_of<S: Source>(_: &S) -> TypeId
    where
        S::Kind: 'static,
    {
        TypeId::of::<S::Kind>()
    }

    /// Collects any multi-pass input through the owner it would be stored as.
    struct Collect;

    impl<In> Adaptor<In> for Collect
    where
        In: IntoOwner,
        for<'a> &'a In::Owner: Sequence,
        for<'a> <&'a In::Owner as Sequence>::Element: Borrow<i32>,
    {
        type Output = Vec<i32>;

        fn apply(self, input: In) -> Vec<i32> {
            let owner = input.into_owner();
            (&owner)
                .elements()
                .map(|x| *Borrow::<i32>::borrow(&x))
                .collect_vec()
        }
    }

    #[test]
    fn test_inputs_are_classified() {
        let values: Vec<i32> = vec![1, 2, 3];
        for (kind, expected) in [
            (kind_of(&&values), TypeId::of::<Borrowed>()),
            (kind_of(&values.clone()), TypeId::of::<Owning>()),
            (kind_of(&View::new(&values)), TypeId::of::<Viewed>()),
            (kind_of(&engine::pull(values.clone())), TypeId::of::<Pulled>()),
        ] {
            assert_eq!(kind, expected);
        }

        let mut values = values;
        let writable = ViewMut::new(&mut values);
        assert_eq!(kind_of(&writable), TypeId::of::<Writable>());
    }

    #[test]
    fn test_pipe_applies_the_adaptor() {
        let values = vec![4, 5, 6];
        assert_eq!((&values).pipe(Collect), vec![4, 5, 6]);
        assert_eq!(values.clone().pipe(Collect), vec![4, 5, 6]);
        assert_eq!(View::new(&values).next().pipe(Collect), vec![5, 6]);

        let mut engine = SinglePass::new(values.into_iter()).into_pull();
        assert_eq!(engine.next(), Some(4));
    }
}
