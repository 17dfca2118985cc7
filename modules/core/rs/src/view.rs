use std::ops::Range;

use derive_getters::{Dissolve, Getters};
use eyre::{ensure, Result};

use crate::category::{Category, Traversal};
use crate::position::Position;
use crate::rebind::Rebind;
use crate::sequence::{
    walk, BidirectionalSequence, CommonSequence, ContiguousSequence, Iter, Owner,
    RandomAccessSequence, Sequence, SequenceMut, SizedSequence,
};

/// Where a window stops.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum Bound<C> {
    /// At an explicit cursor of the underlying sequence.
    At(C),
    /// Wherever the underlying sequence itself ends.
    #[default]
    Natural,
    /// Nowhere: only valid over infinite sequences.
    Unreachable,
}

impl<C> Bound<C> {
    pub fn as_cursor(&self) -> Option<&C> {
        match self {
            Bound::At(cursor) => Some(cursor),
            _ => None,
        }
    }

    pub fn map<D>(self, f: impl FnOnce(C) -> D) -> Bound<D> {
        match self {
            Bound::At(cursor) => Bound::At(f(cursor)),
            Bound::Natural => Bound::Natural,
            Bound::Unreachable => Bound::Unreachable,
        }
    }
}

/// A `(begin, end, optional length)` window into a sequence handle.
///
/// The view is a handle itself: it can be traversed by value or through a reference. A cached
/// length must always equal the number of elements in the window; it is checked against the
/// underlying sequence whenever that is possible in constant time.
#[derive(Clone, Debug, Getters, Dissolve)]
pub struct View<S: Sequence> {
    base: S,
    head: S::Cursor,
    tail: Bound<S::Cursor>,
    cached_len: Option<usize>,
}

impl<S: Sequence> View<S> {
    /// The whole sequence. The length is cached when the sequence knows it.
    pub fn new(base: S) -> Self {
        let head = base.begin();
        let cached_len = base.size_hint();
        Self {
            base,
            head,
            tail: Bound::Natural,
            cached_len,
        }
    }

    pub fn from_parts(base: S, head: S::Cursor, tail: Bound<S::Cursor>) -> Self {
        let cached_len = Self::measure(&base, &head, &tail);
        Self {
            base,
            head,
            tail,
            cached_len,
        }
    }

    /// A window with an explicit length.
    ///
    /// # Panics
    /// In debug builds, when `len` disagrees with a distance the base sequence can compute in
    /// constant time.
    pub fn sized(base: S, head: S::Cursor, tail: Bound<S::Cursor>, len: usize) -> Self {
        if let Some(actual) = Self::measure(&base, &head, &tail) {
            debug_assert_eq!(actual, len, "explicit length disagrees with the window");
            if actual != len {
                log::warn!("Explicit view length {len} disagrees with the measured {actual}");
            }
        }
        Self {
            base,
            head,
            tail,
            cached_len: Some(len),
        }
    }

    /// Checked form of [`View::sized`], validating in every build.
    pub fn try_sized(base: S, head: S::Cursor, tail: Bound<S::Cursor>, len: usize) -> Result<Self> {
        if let Some(actual) = Self::measure(&base, &head, &tail) {
            ensure!(
                actual == len,
                "explicit length {len} disagrees with the window's {actual} elements"
            );
        }
        Ok(Self {
            base,
            head,
            tail,
            cached_len: Some(len),
        })
    }

    fn measure(base: &S, head: &S::Cursor, tail: &Bound<S::Cursor>) -> Option<usize> {
        match tail {
            Bound::At(tail) => base.distance_hint(head, tail),
            Bound::Natural => {
                let skipped = base.distance_hint(&base.begin(), head)?;
                base.size_hint().map(|size| size - skipped)
            }
            Bound::Unreachable => None,
        }
    }

    /// Length if known without traversal.
    pub fn known_len(&self) -> Option<usize> {
        self.cached_len
            .or_else(|| Self::measure(&self.base, &self.head, &self.tail))
    }

    /// Counts the elements, walking the window when the length is not known.
    pub fn count(&self) -> usize {
        match self.known_len() {
            Some(len) => len,
            None => Iter::new(self).count(),
        }
    }

    /// The window without its first element. The view must not be empty.
    pub fn next(&self) -> Self
    where
        S: Clone,
    {
        let mut head = self.head.clone();
        debug_assert!(!Sequence::is_end(&self, &head), "advancing an empty view");
        self.base.inc(&mut head);
        Self {
            base: self.base.clone(),
            head,
            tail: self.tail.clone(),
            cached_len: self.cached_len.map(|len| len - 1),
        }
    }

    /// Moves the start forward by up to `n` elements, stopping at the end of the window. Takes
    /// constant time when the base can skip in constant time.
    pub fn advance(&self, n: usize) -> Self
    where
        S: Clone,
    {
        let mut head = self.head.clone();
        let moved = Sequence::skip(&self, &mut head, n);
        Self {
            base: self.base.clone(),
            head,
            tail: self.tail.clone(),
            cached_len: self.cached_len.map(|len| len - moved),
        }
    }

    /// Splits the window after its first `n` elements (or fewer, if it is shorter).
    pub fn split_at(&self, n: usize) -> (Self, Self)
    where
        S: Clone,
    {
        let rest = self.advance(n);
        let taken = match (self.cached_len, rest.cached_len) {
            (Some(all), Some(left)) => Some(all - left),
            _ => None,
        };
        let prefix = Self {
            base: self.base.clone(),
            head: self.head.clone(),
            tail: Bound::At(rest.head.clone()),
            cached_len: taken.or_else(|| self.base.distance_hint(&self.head, &rest.head)),
        };
        (prefix, rest)
    }

    /// The elements at offsets `range` within the window, clamped to its end.
    pub fn subview(&self, range: Range<usize>) -> Self
    where
        S: Clone,
    {
        let (_, rest) = self.split_at(range.start);
        let (window, _) = rest.split_at(range.end.saturating_sub(range.start));
        window
    }

    pub fn position(&self) -> Position<&Self> {
        Position::new(self, self.head.clone())
    }

    /// The same window against an equal-content copy of the base.
    pub fn rebind(&self, new: S) -> Self
    where
        S: Rebind,
    {
        let head = self.base.rebind(&self.head, &new);
        let tail = match &self.tail {
            Bound::At(tail) => Bound::At(self.base.rebind(tail, &new)),
            Bound::Natural => Bound::Natural,
            Bound::Unreachable => Bound::Unreachable,
        };
        Self {
            base: new,
            head,
            tail,
            cached_len: self.cached_len,
        }
    }
}

impl<S: BidirectionalSequence> View<S> {
    /// The window extended one element backwards. The start must not be the base's beginning.
    pub fn prev(&self) -> Self
    where
        S: Clone,
    {
        let mut head = self.head.clone();
        self.base.dec(&mut head);
        Self {
            base: self.base.clone(),
            head,
            tail: self.tail.clone(),
            cached_len: self.cached_len.map(|len| len + 1),
        }
    }
}

impl<S: RandomAccessSequence> View<S> {
    /// Shifts the start by `by` elements in constant time. The new start must stay within the
    /// window.
    pub fn offset(&self, by: isize) -> Self
    where
        S: Clone,
    {
        let mut head = self.head.clone();
        self.base.offset(&mut head, by);
        if let Bound::At(tail) = &self.tail {
            debug_assert!(
                self.base.distance(&head, tail) >= 0,
                "offset moves outside the window"
            );
        }
        let cached_len = self.cached_len.map(|len| {
            let left = isize::try_from(len).ok().and_then(|len| len.checked_sub(by));
            debug_assert!(
                left.is_some_and(|left| left >= 0),
                "offset moves outside the window"
            );
            left.and_then(|left| usize::try_from(left).ok()).unwrap_or(0)
        });
        Self {
            base: self.base.clone(),
            head,
            tail: self.tail.clone(),
            cached_len,
        }
    }
}

impl<S: Sequence> Sequence for View<S> {
    type Element = S::Element;
    type Cursor = S::Cursor;

    const CATEGORY: Category = S::CATEGORY.borrowed().read_only();

    fn begin(&self) -> Self::Cursor {
        self.head.clone()
    }

    fn is_end(&self, cursor: &Self::Cursor) -> bool {
        match &self.tail {
            Bound::At(tail) => cursor == tail,
            Bound::Natural => self.base.is_end(cursor),
            Bound::Unreachable => false,
        }
    }

    fn inc(&self, cursor: &mut Self::Cursor) {
        self.base.inc(cursor)
    }

    fn read_at(&self, cursor: &Self::Cursor) -> Self::Element {
        self.base.read_at(cursor)
    }

    fn distance_hint(&self, from: &Self::Cursor, to: &Self::Cursor) -> Option<usize> {
        self.base.distance_hint(from, to)
    }

    fn size_hint(&self) -> Option<usize> {
        self.known_len()
    }

    fn skip(&self, cursor: &mut Self::Cursor, n: usize) -> usize {
        match &self.tail {
            Bound::At(tail) => match self.base.distance_hint(cursor, tail) {
                Some(left) => self.base.skip(cursor, n.min(left)),
                None => walk(self, cursor, n),
            },
            Bound::Natural | Bound::Unreachable => self.base.skip(cursor, n),
        }
    }
}

impl<S: BidirectionalSequence> BidirectionalSequence for View<S> {
    fn dec(&self, cursor: &mut Self::Cursor) {
        self.base.dec(cursor)
    }
}

impl<S: RandomAccessSequence> RandomAccessSequence for View<S> {
    fn offset(&self, cursor: &mut Self::Cursor, by: isize) {
        self.base.offset(cursor, by)
    }

    fn distance(&self, from: &Self::Cursor, to: &Self::Cursor) -> isize {
        self.base.distance(from, to)
    }
}

impl<S: CommonSequence> CommonSequence for View<S> {
    /// # Panics
    /// When the window is unbounded.
    fn end(&self) -> Self::Cursor {
        match &self.tail {
            Bound::At(tail) => tail.clone(),
            Bound::Natural => self.base.end(),
            Bound::Unreachable => panic!("an unbounded view has no end cursor"),
        }
    }
}

impl<S: SizedSequence> SizedSequence for View<S> {
    fn size(&self) -> usize {
        self.count()
    }
}

/// A window into contiguous storage is itself contiguous.
impl<S: ContiguousSequence> ContiguousSequence for View<S> {
    type Value = S::Value;

    fn contiguous(&self) -> &[S::Value] {
        let start = self.base.distance(&self.base.begin(), &self.head) as usize;
        &self.base.contiguous()[start..start + self.count()]
    }
}

/// Traversal through a reference shares the window's cursors and elements.
impl<'a, S: Sequence> Sequence for &'a View<S> {
    type Element = S::Element;
    type Cursor = S::Cursor;

    const CATEGORY: Category = <View<S> as Sequence>::CATEGORY;

    fn begin(&self) -> Self::Cursor {
        <View<S> as Sequence>::begin(self)
    }

    fn is_end(&self, cursor: &Self::Cursor) -> bool {
        <View<S> as Sequence>::is_end(self, cursor)
    }

    fn inc(&self, cursor: &mut Self::Cursor) {
        <View<S> as Sequence>::inc(self, cursor)
    }

    fn read_at(&self, cursor: &Self::Cursor) -> Self::Element {
        <View<S> as Sequence>::read_at(self, cursor)
    }

    fn distance_hint(&self, from: &Self::Cursor, to: &Self::Cursor) -> Option<usize> {
        <View<S> as Sequence>::distance_hint(self, from, to)
    }

    fn size_hint(&self) -> Option<usize> {
        self.known_len()
    }

    fn skip(&self, cursor: &mut Self::Cursor, n: usize) -> usize {
        <View<S> as Sequence>::skip(self, cursor, n)
    }
}

impl<S: BidirectionalSequence> BidirectionalSequence for &View<S> {
    fn dec(&self, cursor: &mut Self::Cursor) {
        <View<S> as BidirectionalSequence>::dec(self, cursor)
    }
}

impl<S: RandomAccessSequence> RandomAccessSequence for &View<S> {
    fn offset(&self, cursor: &mut Self::Cursor, by: isize) {
        <View<S> as RandomAccessSequence>::offset(self, cursor, by)
    }

    fn distance(&self, from: &Self::Cursor, to: &Self::Cursor) -> isize {
        <View<S> as RandomAccessSequence>::distance(self, from, to)
    }
}

impl<S: CommonSequence> CommonSequence for &View<S> {
    fn end(&self) -> Self::Cursor {
        <View<S> as CommonSequence>::end(self)
    }
}

impl<S: SizedSequence> SizedSequence for &View<S> {
    fn size(&self) -> usize {
        self.count()
    }
}

impl<S: ContiguousSequence> ContiguousSequence for &View<S> {
    type Value = S::Value;

    fn contiguous(&self) -> &[S::Value] {
        <View<S> as ContiguousSequence>::contiguous(self)
    }
}

/// Views compare element by element, never by identity.
impl<S, T> PartialEq<View<T>> for View<S>
where
    S: Sequence,
    T: Sequence,
    S::Element: PartialEq<T::Element>,
{
    fn eq(&self, other: &View<T>) -> bool {
        if let (Some(left), Some(right)) = (self.known_len(), other.known_len()) {
            if left != right {
                return false;
            }
        }
        Iter::new(self).eq(Iter::new(other))
    }
}

/// A window with write access to the elements of its owner.
///
/// A shared reference to the view traverses the window through the owner's handle, so adaptors
/// can be stacked over it; writes go through [`SequenceMut`] with the same cursors.
#[derive(Debug)]
pub struct ViewMut<'x, C>
where
    C: SequenceMut + ?Sized,
{
    owner: &'x mut C,
    head: <C as SequenceMut>::Cursor,
    tail: Bound<<C as SequenceMut>::Cursor>,
    cached_len: Option<usize>,
}

impl<'x, C: Owner + ?Sized> ViewMut<'x, C> {
    pub fn new(owner: &'x mut C) -> Self {
        let (head, cached_len) = {
            let handle = owner.handle();
            (handle.begin(), handle.size_hint())
        };
        Self {
            owner,
            head,
            tail: Bound::Natural,
            cached_len,
        }
    }

    pub fn from_parts(
        owner: &'x mut C,
        head: <C as SequenceMut>::Cursor,
        tail: Bound<<C as SequenceMut>::Cursor>,
    ) -> Self {
        let cached_len = View::from_parts(owner.handle(), head.clone(), tail.clone()).cached_len;
        Self {
            owner,
            head,
            tail,
            cached_len,
        }
    }

    /// Checked constructor with an explicit length.
    pub fn try_sized(
        owner: &'x mut C,
        head: <C as SequenceMut>::Cursor,
        tail: Bound<<C as SequenceMut>::Cursor>,
        len: usize,
    ) -> Result<Self> {
        View::try_sized(owner.handle(), head.clone(), tail.clone(), len)?;
        Ok(Self {
            owner,
            head,
            tail,
            cached_len: Some(len),
        })
    }

    /// A read-only view of the same window, borrowing this one.
    pub fn as_view(&self) -> View<C::Handle<'_>> {
        View {
            base: self.owner.handle(),
            head: self.head.clone(),
            tail: self.tail.clone(),
            cached_len: self.cached_len,
        }
    }

    /// Gives up write access, keeping the window.
    pub fn into_view(self) -> View<C::Handle<'x>> {
        let owner: &'x C = self.owner;
        View {
            base: owner.handle(),
            head: self.head,
            tail: self.tail,
            cached_len: self.cached_len,
        }
    }

    /// Applies `f` to every element of the window in order.
    pub fn for_each_mut(&mut self, mut f: impl FnMut(&mut <C as SequenceMut>::Value)) {
        let mut cursor = self.head.clone();
        while !self.as_view().is_end(&cursor) {
            f(self.owner.read_at_mut(&cursor));
            self.owner.handle().inc(&mut cursor);
        }
    }

    pub fn front_mut(&mut self) -> Option<&mut <C as SequenceMut>::Value> {
        let empty = self.as_view().empty();
        match empty {
            true => None,
            false => Some(self.owner.read_at_mut(&self.head)),
        }
    }
}

impl<C: SequenceMut + ?Sized> SequenceMut for ViewMut<'_, C> {
    type Cursor = <C as SequenceMut>::Cursor;
    type Value = <C as SequenceMut>::Value;

    fn read_at_mut(&mut self, cursor: &Self::Cursor) -> &mut Self::Value {
        self.owner.read_at_mut(cursor)
    }
}

/// Reading through a writable window. Contiguity is not kept: the owner's slice can only be
/// lent for as long as a temporary handle lives.
impl<'a, 'x, C: Owner + ?Sized> Sequence for &'a ViewMut<'x, C> {
    type Element = <C::Handle<'a> as Sequence>::Element;
    type Cursor = <C as SequenceMut>::Cursor;

    const CATEGORY: Category = <C::Handle<'a> as Sequence>::CATEGORY
        .capped(Traversal::RandomAccess)
        .borrowed()
        .with_mutable(true);

    fn begin(&self) -> Self::Cursor {
        self.head.clone()
    }

    fn is_end(&self, cursor: &Self::Cursor) -> bool {
        let this: &'a ViewMut<'x, C> = *self;
        this.as_view().is_end(cursor)
    }

    fn inc(&self, cursor: &mut Self::Cursor) {
        let this: &'a ViewMut<'x, C> = *self;
        this.owner.handle().inc(cursor)
    }

    fn read_at(&self, cursor: &Self::Cursor) -> Self::Element {
        let this: &'a ViewMut<'x, C> = *self;
        this.owner.handle().read_at(cursor)
    }

    fn distance_hint(&self, from: &Self::Cursor, to: &Self::Cursor) -> Option<usize> {
        let this: &'a ViewMut<'x, C> = *self;
        this.owner.handle().distance_hint(from, to)
    }

    fn size_hint(&self) -> Option<usize> {
        let this: &'a ViewMut<'x, C> = *self;
        this.as_view().known_len()
    }

    fn skip(&self, cursor: &mut Self::Cursor, n: usize) -> usize {
        let this: &'a ViewMut<'x, C> = *self;
        this.as_view().skip(cursor, n)
    }
}

impl<'a, 'x, C> BidirectionalSequence for &'a ViewMut<'x, C>
where
    C: Owner + ?Sized,
    C::Handle<'a>: BidirectionalSequence,
{
    fn dec(&self, cursor: &mut Self::Cursor) {
        let this: &'a ViewMut<'x, C> = *self;
        this.owner.handle().dec(cursor)
    }
}

impl<'a, 'x, C> RandomAccessSequence for &'a ViewMut<'x, C>
where
    C: Owner + ?Sized,
    C::Handle<'a>: RandomAccessSequence,
{
    fn offset(&self, cursor: &mut Self::Cursor, by: isize) {
        let this: &'a ViewMut<'x, C> = *self;
        this.owner.handle().offset(cursor, by)
    }

    fn distance(&self, from: &Self::Cursor, to: &Self::Cursor) -> isize {
        let this: &'a ViewMut<'x, C> = *self;
        this.owner.handle().distance(from, to)
    }
}

impl<'a, 'x, C> CommonSequence for &'a ViewMut<'x, C>
where
    C: Owner + ?Sized,
    C::Handle<'a>: CommonSequence,
{
    fn end(&self) -> Self::Cursor {
        let this: &'a ViewMut<'x, C> = *self;
        this.as_view().end()
    }
}

impl<'a, 'x, C> SizedSequence for &'a ViewMut<'x, C>
where
    C: Owner + ?Sized,
    C::Handle<'a>: SizedSequence,
{
    fn size(&self) -> usize {
        let this: &'a ViewMut<'x, C> = *self;
        this.as_view().count()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use itertools::Itertools;

    use super::*;

    #[test]
    fn test_size_tracks_shifts() -> Result<()> {
        let values = vec![1, 2, 3, 4, 5, 6];
        let view = View::new(&values);
        assert_eq!(view.size(), 6);

        for (shifted, expected) in [
            (view.next(), 5),
            (view.advance(2), 4),
            (view.advance(2).prev(), 5),
            (view.offset(3), 3),
            (view.advance(100), 0),
        ] {
            assert_eq!(shifted.size(), expected);
            assert_eq!(shifted.size(), Iter::new(&shifted).count());
            assert_eq!(
                shifted.size() as isize,
                shifted.distance(&shifted.begin(), &shifted.end())
            );
        }
        Ok(())
    }

    #[test]
    fn test_explicit_lengths() -> Result<()> {
        let values = VecDeque::from([1, 2, 3, 4]);
        let view = View::try_sized(&values, 1, Bound::At(3), 2)?;
        assert_eq!(view.elements().copied().collect_vec(), vec![2, 3]);

        let err = View::try_sized(&values, 1, Bound::At(3), 3);
        assert!(err.is_err());
        Ok(())
    }

    #[test]
    fn test_split_and_subview() {
        let values = [10, 20, 30, 40, 50];
        let view = View::new(&values);

        let (left, right) = view.split_at(2);
        assert_eq!(left.known_len(), Some(2));
        assert_eq!(right.known_len(), Some(3));
        assert_eq!((&left).elements().copied().collect_vec(), vec![10, 20]);
        assert_eq!((&right).elements().copied().collect_vec(), vec![30, 40, 50]);

        let middle = view.subview(1..4);
        assert_eq!(middle.front(), Some(&20));
        assert_eq!(middle.back(), Some(&40));
        assert_eq!(view.subview(3..10).count(), 2);
    }

    #[test]
    fn test_equality_is_element_wise() {
        let left = vec![1, 2, 3];
        let right = VecDeque::from([0, 1, 2, 3]);

        assert_eq!(View::new(&left), View::new(&right).next());
        assert_ne!(View::new(&left), View::new(&right));
        assert_eq!(View::new(&left).advance(3), View::new(&right).advance(4));
    }

    #[test]
    fn test_natural_end_over_text() {
        let text = "héllo";
        let view = View::new(text).next();
        assert_eq!((&view).elements().collect::<String>(), "éllo");
        assert_eq!(view.known_len(), None);
    }

    #[test]
    fn test_view_mut() -> Result<()> {
        let mut values: Vec<i32> = vec![1, 2, 3, 4];
        let mut view = ViewMut::try_sized(&mut values, 1, Bound::At(3), 2)?;
        view.for_each_mut(|x| *x *= 10);
        if let Some(front) = view.front_mut() {
            *front += 1;
        }

        let view = view.into_view();
        assert_eq!(view.elements().copied().collect_vec(), vec![21, 30]);
        assert_eq!(values, vec![1, 21, 30, 4]);
        Ok(())
    }

    #[test]
    fn test_writable_window_reads_through_its_owner() {
        let mut values: Vec<i32> = vec![1, 2, 3, 4, 5];
        let mut view = ViewMut::from_parts(&mut values, 1, Bound::At(4));
        assert_eq!((&view).size(), 3);
        assert_eq!((&view).back(), Some(&4));

        let mut cursor = (&view).begin();
        while !(&view).is_end(&cursor) {
            *view.read_at_mut(&cursor) += 100;
            (&view).inc(&mut cursor);
        }
        assert_eq!((&view).elements().copied().collect_vec(), vec![102, 103, 104]);

        let category = <&ViewMut<Vec<i32>> as Sequence>::CATEGORY;
        assert!(category.mutable && category.borrowed);
        assert_eq!(category.traversal, Traversal::RandomAccess);
        assert_eq!(values, vec![1, 102, 103, 104, 5]);
    }

    #[test]
    fn test_window_over_a_slice_stays_contiguous() {
        let values = vec![1, 2, 3, 4, 5, 6];
        let view = View::from_parts(&values, 1, Bound::At(5)).next();
        assert_eq!(view.contiguous(), &[3, 4, 5]);
        assert_eq!((&view).contiguous(), &[3, 4, 5]);
        assert_eq!(View::new(&values).advance(9).contiguous(), &[] as &[i32]);

        let category = <View<&Vec<i32>> as Sequence>::CATEGORY;
        assert_eq!(category.traversal, <&Vec<i32> as Sequence>::CATEGORY.traversal);
        assert!(!category.mutable);
    }

    /// Random-access handle that refuses to be walked one element at a time.
    #[derive(Clone, Copy, Debug)]
    struct NoWalk<'a>(&'a [i32]);

    impl<'a> Sequence for NoWalk<'a> {
        type Element = &'a i32;
        type Cursor = usize;

        const CATEGORY: Category = <&'a [i32] as Sequence>::CATEGORY;

        fn begin(&self) -> usize {
            0
        }

        fn is_end(&self, cursor: &usize) -> bool {
            *cursor >= self.0.len()
        }

        fn inc(&self, _: &mut usize) {
            panic!("walked one element at a time");
        }

        fn read_at(&self, cursor: &usize) -> &'a i32 {
            &self.0[*cursor]
        }

        fn distance_hint(&self, from: &usize, to: &usize) -> Option<usize> {
            to.checked_sub(*from)
        }

        fn size_hint(&self) -> Option<usize> {
            Some(self.0.len())
        }

        fn skip(&self, cursor: &mut usize, n: usize) -> usize {
            Sequence::skip(&self.0, cursor, n)
        }
    }

    #[test]
    fn test_advance_skips_in_constant_time() {
        let values = [1, 2, 3, 4, 5];
        let view = View::new(NoWalk(&values));
        let rest = view.advance(3);
        assert_eq!(rest.known_len(), Some(2));
        assert_eq!(rest.front(), Some(&4));

        let bounded = View::from_parts(NoWalk(&values), 0, Bound::At(4)).advance(10);
        assert_eq!(*bounded.head(), 4);
        assert_eq!(bounded.known_len(), Some(0));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "explicit length disagrees")]
    fn test_unchecked_length_is_verified_in_debug_builds() {
        let values = vec![1, 2, 3];
        View::sized(&values, 0, Bound::At(2), 3);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "offset moves outside the window")]
    fn test_offset_past_the_tail_is_rejected() {
        let values = vec![1, 2, 3, 4];
        View::from_parts(&values, 0, Bound::At(2)).offset(3);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "offset moves outside the window")]
    fn test_offset_by_an_extreme_amount_is_rejected() {
        let values = vec![1, 2, 3];
        View::new(&values).offset(isize::MAX);
    }

    #[test]
    fn test_rebind_view() {
        let old = vec![1, 2, 3, 4, 5];
        let view = View::from_parts(&old, 1, Bound::At(4));

        let new = old.clone();
        let rebound = view.rebind(&new);
        assert_eq!(rebound, view);
        assert!(std::ptr::eq(*rebound.base(), &new));
    }
}
