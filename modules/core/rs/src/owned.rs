use derive_getters::Getters;

use crate::category::Category;
use crate::indirect::Indirect;
use crate::rebind::Rebind;
use crate::sequence::{
    walk, BidirectionalSequence, CommonSequence, Container, ContiguousSequence,
    RandomAccessSequence, Sequence, SequenceMut, SizedSequence,
};

/// Cursors delimiting the window an [`Owned`] exposes over its private copy.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Getters)]
pub struct Bounds<C> {
    head: C,
    tail: C,
}

/// A private, heap-held copy of a container together with the window into it.
///
/// The wrapper is either empty (its default state) or populated. Cloning a populated wrapper
/// deep-copies the container and rebinds the window against the copy, so clones are fully
/// independent. Moving it moves the heap pointer only and never invalidates the window.
#[derive(Debug)]
pub struct Owned<C: Container> {
    cell: Indirect<C>,
    bounds: Option<Bounds<<C as Container>::Cursor>>,
}

impl<C: Container> Owned<C> {
    /// Takes over `container`, exposing all of it.
    pub fn new(container: C) -> Self {
        let bounds = Bounds {
            head: container.begin_cursor(),
            tail: container.end_cursor(),
        };
        Self {
            cell: Indirect::new(container),
            bounds: Some(bounds),
        }
    }

    pub fn is_empty_state(&self) -> bool {
        !self.cell.is_populated()
    }

    /// The private copy, if populated.
    pub fn get(&self) -> Option<&C> {
        self.cell.get()
    }

    pub fn bounds(&self) -> Option<&Bounds<<C as Container>::Cursor>> {
        self.bounds.as_ref()
    }

    pub fn into_inner(self) -> Option<C> {
        self.cell.into_inner()
    }

    /// # Panics
    /// When the wrapper is empty.
    fn populated(&self) -> (&C, &Bounds<<C as Container>::Cursor>) {
        match (self.cell.get(), &self.bounds) {
            (Some(container), Some(bounds)) => (container, bounds),
            _ => panic!("accessing an empty owning wrapper"),
        }
    }

    fn rebound(&self, copy: &C) -> Option<Bounds<<C as Container>::Cursor>> {
        let (container, bounds) = match (self.cell.get(), &self.bounds) {
            (Some(container), Some(bounds)) => (container, bounds),
            _ => return None,
        };
        log::debug!("Rebinding an owned window after a deep copy: {:?}", bounds);
        Some(Bounds {
            head: container.rebind_cursor(&bounds.head, copy),
            tail: container.rebind_cursor(&bounds.tail, copy),
        })
    }
}

impl<C: Container> Default for Owned<C> {
    fn default() -> Self {
        Self {
            cell: Indirect::default(),
            bounds: None,
        }
    }
}

impl<C: Container> Clone for Owned<C> {
    fn clone(&self) -> Self {
        let cell = self.cell.clone();
        let bounds = match cell.get() {
            Some(copy) => self.rebound(copy),
            None => None,
        };
        Self { cell, bounds }
    }

    fn clone_from(&mut self, source: &Self) {
        self.cell.clone_from(&source.cell);
        self.bounds = match self.cell.get() {
            Some(copy) => source.rebound(copy),
            None => None,
        };
    }
}

impl<C: Container> From<C> for Owned<C> {
    fn from(container: C) -> Self {
        Self::new(container)
    }
}

/// Reading through the wrapper yields elements borrowed from the private copy.
///
/// # Panics
/// Every operation panics on an empty wrapper.
impl<'a, C> Sequence for &'a Owned<C>
where
    C: Container,
    &'a C: Sequence<Cursor = <C as Container>::Cursor>,
{
    type Element = <&'a C as Sequence>::Element;
    type Cursor = <C as Container>::Cursor;

    const CATEGORY: Category = <&'a C as Sequence>::CATEGORY
        .owning()
        .with_mutable(C::WRITABLE);

    fn begin(&self) -> Self::Cursor {
        self.populated().1.head.clone()
    }

    fn is_end(&self, cursor: &Self::Cursor) -> bool {
        *cursor == self.populated().1.tail
    }

    fn inc(&self, cursor: &mut Self::Cursor) {
        let owned: &'a Owned<C> = *self;
        owned.populated().0.inc(cursor)
    }

    fn read_at(&self, cursor: &Self::Cursor) -> Self::Element {
        let owned: &'a Owned<C> = *self;
        owned.populated().0.read_at(cursor)
    }

    fn distance_hint(&self, from: &Self::Cursor, to: &Self::Cursor) -> Option<usize> {
        self.populated().0.distance_hint(from, to)
    }

    fn size_hint(&self) -> Option<usize> {
        let (container, bounds) = self.populated();
        container.distance_hint(&bounds.head, &bounds.tail)
    }

    fn skip(&self, cursor: &mut Self::Cursor, n: usize) -> usize {
        let owned: &'a Owned<C> = *self;
        let (container, bounds) = owned.populated();
        match container.distance_hint(cursor, &bounds.tail) {
            Some(left) => container.skip(cursor, n.min(left)),
            None => walk(self, cursor, n),
        }
    }
}

impl<'a, C> BidirectionalSequence for &'a Owned<C>
where
    C: Container,
    &'a C: BidirectionalSequence<Cursor = <C as Container>::Cursor>,
{
    fn dec(&self, cursor: &mut Self::Cursor) {
        self.populated().0.dec(cursor)
    }
}

impl<'a, C> RandomAccessSequence for &'a Owned<C>
where
    C: Container,
    &'a C: RandomAccessSequence<Cursor = <C as Container>::Cursor>,
{
    fn offset(&self, cursor: &mut Self::Cursor, by: isize) {
        self.populated().0.offset(cursor, by)
    }

    fn distance(&self, from: &Self::Cursor, to: &Self::Cursor) -> isize {
        self.populated().0.distance(from, to)
    }
}

impl<'a, C> CommonSequence for &'a Owned<C>
where
    C: Container,
    &'a C: Sequence<Cursor = <C as Container>::Cursor>,
{
    fn end(&self) -> Self::Cursor {
        self.populated().1.tail.clone()
    }
}

impl<'a, C> SizedSequence for &'a Owned<C>
where
    C: Container,
    &'a C: RandomAccessSequence<Cursor = <C as Container>::Cursor>,
{
    fn size(&self) -> usize {
        let (container, bounds) = self.populated();
        container.distance(&bounds.head, &bounds.tail) as usize
    }
}

macro_rules! impl_owned_contiguous {
    ([$($generics:tt)*], $container:ty) => {
        impl<'a, $($generics)*> ContiguousSequence for &'a Owned<$container> {
            type Value = T;

            fn contiguous(&self) -> &[T] {
                let (container, bounds) = self.populated();
                &container[bounds.head..bounds.tail]
            }
        }
    };
}

impl_owned_contiguous!([T: Clone], Vec<T>);
impl_owned_contiguous!([T: Clone, const N: usize], [T; N]);

impl<'a, C> Rebind for &'a Owned<C>
where
    C: Container,
    &'a C: Sequence<Cursor = <C as Container>::Cursor>,
{
    fn rebind(&self, cursor: &Self::Cursor, new: &Self) -> Self::Cursor {
        self.populated().0.rebind_cursor(cursor, new.populated().0)
    }
}

impl<C> SequenceMut for Owned<C>
where
    C: Container + SequenceMut<Cursor = <C as Container>::Cursor>,
{
    type Cursor = <C as Container>::Cursor;
    type Value = <C as SequenceMut>::Value;

    /// # Panics
    /// When the wrapper is empty.
    fn read_at_mut(&mut self, cursor: &Self::Cursor) -> &mut Self::Value {
        match self.cell.get_mut() {
            Some(container) => container.read_at_mut(cursor),
            None => panic!("accessing an empty owning wrapper"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use eyre::Result;
    use itertools::Itertools;

    use super::*;
    use crate::view::{Bound, View};

    #[test]
    fn test_clone_is_deeply_independent() -> Result<()> {
        let original = Owned::new(vec![1, 2, 3]);
        let mut copy = original.clone();
        assert_eq!(
            (&copy).elements().collect_vec(),
            (&original).elements().collect_vec()
        );

        *copy.read_at_mut(&1) = 20;
        assert_eq!((&original).elements().copied().collect_vec(), vec![1, 2, 3]);
        assert_eq!((&copy).elements().copied().collect_vec(), vec![1, 20, 3]);
        Ok(())
    }

    #[test]
    fn test_clone_rebinds_against_the_copy() {
        let original = Owned::new(VecDeque::from(['x', 'y', 'z']));
        let copy = original.clone();

        let (first, second) = (original.get(), copy.get());
        assert!(first.is_some() && second.is_some());
        assert!(!std::ptr::eq((&copy).read_at(&0), (&original).read_at(&0)));
        assert_eq!(copy.bounds(), original.bounds());
        assert_eq!((&copy).size(), 3);
    }

    #[test]
    fn test_empty_state() {
        let empty: Owned<Vec<i32>> = Owned::default();
        assert!(empty.is_empty_state());
        assert!(empty.clone().is_empty_state());

        let mut target = Owned::new(vec![1]);
        target.clone_from(&empty);
        assert!(target.is_empty_state());

        target.clone_from(&Owned::new(vec![5, 6]));
        assert_eq!(target.into_inner(), Some(vec![5, 6]));
    }

    #[test]
    fn test_empty_state_needs_no_default_payload() {
        #[derive(Clone, Debug)]
        struct Token;

        let empty: Owned<[Token; 2]> = Owned::default();
        assert!(empty.is_empty_state());
        let full = Owned::new([Token, Token]);
        assert_eq!((&full).size(), 2);
    }

    #[test]
    fn test_private_copy_keeps_contiguity_and_writes() {
        let owned = Owned::new(vec![1, 2, 3]);
        assert_eq!((&owned).contiguous(), &[1, 2, 3]);
        let mut cursor = (&owned).begin();
        assert_eq!((&owned).skip(&mut cursor, 10), 3);

        let category = <&Owned<Vec<i32>> as Sequence>::CATEGORY;
        assert!(category.mutable && !category.borrowed);
        assert!(!<&Owned<String> as Sequence>::CATEGORY.mutable);
    }

    #[test]
    #[should_panic(expected = "empty owning wrapper")]
    fn test_reading_empty_wrapper_panics() {
        let empty: Owned<Vec<i32>> = Owned::default();
        (&empty).begin();
    }

    #[test]
    fn test_views_over_owned_text() {
        let owned = Owned::new(String::from("abc"));
        let view = View::from_parts(&owned, 1, Bound::Natural);
        assert_eq!(view.elements().collect::<String>(), "bc");
        assert!(!<&Owned<String> as Sequence>::CATEGORY.borrowed);
    }
}
