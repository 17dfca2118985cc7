use std::collections::VecDeque;
use std::fmt::Debug;
use std::iter::FusedIterator;

use crate::category::Category;
use crate::position::Position;

/// A multi-pass sequence addressed through cursors.
///
/// The trait is implemented on *handles*: shared references to an owner (`&'a Vec<T>`,
/// `&'a Filter<..>`) or values whose elements never borrow from the handle itself. A cursor is
/// plain data and means nothing without the handle it came from; every operation takes the
/// handle explicitly, so cursors never hold back-references into the storage.
pub trait Sequence: Sized {
    /// What reading at a cursor yields.
    type Element;
    type Cursor: Clone + PartialEq + Debug;

    const CATEGORY: Category;

    fn begin(&self) -> Self::Cursor;

    fn is_end(&self, cursor: &Self::Cursor) -> bool;

    /// Moves the cursor one element forward. The cursor must not be at the end.
    fn inc(&self, cursor: &mut Self::Cursor);

    /// Reads the element at the cursor. The cursor must not be at the end.
    fn read_at(&self, cursor: &Self::Cursor) -> Self::Element;

    /// Number of elements in `[from, to)` when it is computable in constant time.
    fn distance_hint(&self, _from: &Self::Cursor, _to: &Self::Cursor) -> Option<usize> {
        None
    }

    /// Number of elements when it is known in constant time.
    fn size_hint(&self) -> Option<usize> {
        None
    }

    /// Moves `cursor` forward by up to `n` elements, stopping at the end, and reports how far
    /// it got. Handles that can measure the rest of the sequence answer in constant time.
    fn skip(&self, cursor: &mut Self::Cursor, n: usize) -> usize {
        walk(self, cursor, n)
    }

    fn empty(&self) -> bool {
        self.is_end(&self.begin())
    }

    fn front(&self) -> Option<Self::Element> {
        let cursor = self.begin();
        match self.is_end(&cursor) {
            true => None,
            false => Some(self.read_at(&cursor)),
        }
    }

    fn position(self) -> Position<Self> {
        let cursor = self.begin();
        Position::new(self, cursor)
    }

    fn elements(self) -> Iter<Self> {
        Iter::new(self)
    }
}

/// Steps `cursor` forward one element at a time, at most `n` times, and reports the steps taken.
pub fn walk<S: Sequence>(seq: &S, cursor: &mut S::Cursor, n: usize) -> usize {
    let mut moved = 0;
    while moved < n && !seq.is_end(cursor) {
        seq.inc(cursor);
        moved += 1;
    }
    moved
}

/// Index-addressed storage moves by clamping against its length.
fn skip_index(cursor: &mut usize, len: usize, n: usize) -> usize {
    let moved = n.min(len.saturating_sub(*cursor));
    *cursor += moved;
    moved
}

pub trait BidirectionalSequence: Sequence {
    /// Moves the cursor one element back. The cursor must not be at the beginning.
    fn dec(&self, cursor: &mut Self::Cursor);
}

pub trait RandomAccessSequence: BidirectionalSequence {
    fn offset(&self, cursor: &mut Self::Cursor, by: isize);

    fn distance(&self, from: &Self::Cursor, to: &Self::Cursor) -> isize;

    fn read_nth(&self, index: usize) -> Self::Element {
        let mut cursor = self.begin();
        self.offset(&mut cursor, index as isize);
        debug_assert!(!self.is_end(&cursor), "index {index} is out of bounds");
        self.read_at(&cursor)
    }
}

/// The end of the sequence is a cursor of the same type as its beginning.
pub trait CommonSequence: Sequence {
    fn end(&self) -> Self::Cursor;

    fn back(&self) -> Option<Self::Element>
    where
        Self: BidirectionalSequence,
    {
        let mut cursor = self.end();
        if cursor == self.begin() {
            return None;
        }
        self.dec(&mut cursor);
        Some(self.read_at(&cursor))
    }
}

pub trait SizedSequence: Sequence {
    fn size(&self) -> usize;
}

pub trait ContiguousSequence: RandomAccessSequence + CommonSequence + SizedSequence {
    type Value;

    fn contiguous(&self) -> &[Self::Value];
}

/// Write access to elements, implemented on owners rather than handles.
pub trait SequenceMut {
    type Cursor: Clone + PartialEq + Debug;
    type Value: ?Sized;

    fn read_at_mut(&mut self, cursor: &Self::Cursor) -> &mut Self::Value;
}

/// Writable storage that also hands out shared handles for traversal.
///
/// A handle's cursors address the same elements as the owner's mutable access path, so a
/// cursor found by walking a handle can be used for writing once the handle is gone.
pub trait Owner: SequenceMut {
    type Handle<'r>: Sequence<Cursor = <Self as SequenceMut>::Cursor>
    where
        Self: 'r;

    fn handle(&self) -> Self::Handle<'_>;
}

/// Owner-level description of leaf storage: containers that can be copied into an
/// [`Owned`](crate::owned::Owned) wrapper and whose cursors must be re-derived after the copy.
pub trait Container: Clone {
    type Cursor: Clone + PartialEq + Debug;

    /// Elements can be written through [`SequenceMut`].
    const WRITABLE: bool;

    fn begin_cursor(&self) -> Self::Cursor;

    fn end_cursor(&self) -> Self::Cursor;

    /// Re-derives `cursor`, obtained from `self`, against `new`, an equal-content copy.
    fn rebind_cursor(&self, cursor: &Self::Cursor, new: &Self) -> Self::Cursor;
}

/// Standard iterator over the elements of a sequence handle.
#[derive(Clone, Debug)]
pub struct Iter<S: Sequence> {
    seq: S,
    front: S::Cursor,
    back: Option<S::Cursor>,
}

impl<S: Sequence> Iter<S> {
    pub fn new(seq: S) -> Self {
        let front = seq.begin();
        Self::from_cursor(seq, front)
    }

    /// Iterates from `front` to the end of `seq`.
    pub fn from_cursor(seq: S, front: S::Cursor) -> Self {
        Self {
            seq,
            front,
            back: None,
        }
    }

    pub fn sequence(&self) -> &S {
        &self.seq
    }
}

impl<S: Sequence> Iterator for Iter<S> {
    type Item = S::Element;

    fn next(&mut self) -> Option<Self::Item> {
        if self.back.as_ref() == Some(&self.front) || self.seq.is_end(&self.front) {
            return None;
        }
        let item = self.seq.read_at(&self.front);
        self.seq.inc(&mut self.front);
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let to = match &self.back {
            Some(back) => self.seq.distance_hint(&self.front, back),
            None => self
                .seq
                .size_hint()
                .zip(self.seq.distance_hint(&self.seq.begin(), &self.front))
                .map(|(size, done)| size.saturating_sub(done)),
        };
        match to {
            Some(left) => (left, Some(left)),
            None => (0, None),
        }
    }
}

impl<S: BidirectionalSequence + CommonSequence> DoubleEndedIterator for Iter<S> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let seq = &self.seq;
        let back = self.back.get_or_insert_with(|| seq.end());
        if *back == self.front {
            return None;
        }
        seq.dec(back);
        Some(seq.read_at(back))
    }
}

impl<S: Sequence> FusedIterator for Iter<S> {}

macro_rules! impl_contiguous {
    ([$($generics:tt)*], $owner:ty) => {
        impl<'a, $($generics)*> Sequence for &'a $owner {
            type Element = &'a T;
            type Cursor = usize;

            const CATEGORY: Category = Category::CONTAINER.borrowed().read_only();

            #[inline(always)]
            fn begin(&self) -> usize {
                0
            }

            #[inline(always)]
            fn is_end(&self, cursor: &usize) -> bool {
                let owner: &'a $owner = *self;
                let slice: &'a [T] = &owner[..];
                *cursor >= slice.len()
            }

            #[inline(always)]
            fn inc(&self, cursor: &mut usize) {
                *cursor += 1;
            }

            #[inline(always)]
            fn read_at(&self, cursor: &usize) -> &'a T {
                let owner: &'a $owner = *self;
                let slice: &'a [T] = &owner[..];
                &slice[*cursor]
            }

            fn distance_hint(&self, from: &usize, to: &usize) -> Option<usize> {
                Some(to.saturating_sub(*from))
            }

            fn size_hint(&self) -> Option<usize> {
                let owner: &'a $owner = *self;
                let slice: &'a [T] = &owner[..];
                Some(slice.len())
            }

            fn skip(&self, cursor: &mut usize, n: usize) -> usize {
                let owner: &'a $owner = *self;
                let slice: &'a [T] = &owner[..];
                skip_index(cursor, slice.len(), n)
            }
        }

        impl<'a, $($generics)*> BidirectionalSequence for &'a $owner {
            #[inline(always)]
            fn dec(&self, cursor: &mut usize) {
                debug_assert!(*cursor > 0, "decrementing past the beginning");
                *cursor -= 1;
            }
        }

        impl<'a, $($generics)*> RandomAccessSequence for &'a $owner {
            #[inline(always)]
            fn offset(&self, cursor: &mut usize, by: isize) {
                *cursor = cursor.wrapping_add_signed(by);
            }

            #[inline(always)]
            fn distance(&self, from: &usize, to: &usize) -> isize {
                *to as isize - *from as isize
            }
        }

        impl<'a, $($generics)*> CommonSequence for &'a $owner {
            fn end(&self) -> usize {
                let owner: &'a $owner = *self;
                let slice: &'a [T] = &owner[..];
                slice.len()
            }
        }

        impl<'a, $($generics)*> SizedSequence for &'a $owner {
            fn size(&self) -> usize {
                let owner: &'a $owner = *self;
                let slice: &'a [T] = &owner[..];
                slice.len()
            }
        }

        impl<'a, $($generics)*> ContiguousSequence for &'a $owner {
            type Value = T;

            fn contiguous(&self) -> &[T] {
                &self[..]
            }
        }

        impl<$($generics)*> SequenceMut for $owner {
            type Cursor = usize;
            type Value = T;

            fn read_at_mut(&mut self, cursor: &usize) -> &mut T {
                &mut self[*cursor]
            }
        }

        impl<$($generics)*> Owner for $owner {
            type Handle<'r> = &'r $owner where Self: 'r;

            fn handle(&self) -> &$owner {
                self
            }
        }
    };
}

impl_contiguous!([T], [T]);
impl_contiguous!([T], Vec<T>);
impl_contiguous!([T, const N: usize], [T; N]);

/// A borrowed slice is also an owner: a window produced by the contiguous subrange anchor is
/// stored as `&'a [T]` and traversed through a reference to it, like any other owner.
impl<'b, 'a, T> Sequence for &'b &'a [T] {
    type Element = &'a T;
    type Cursor = usize;

    const CATEGORY: Category = Category::CONTAINER.borrowed().read_only();

    fn begin(&self) -> usize {
        0
    }

    fn is_end(&self, cursor: &usize) -> bool {
        *cursor >= self.len()
    }

    fn inc(&self, cursor: &mut usize) {
        *cursor += 1;
    }

    fn read_at(&self, cursor: &usize) -> &'a T {
        let slice: &'a [T] = **self;
        &slice[*cursor]
    }

    fn distance_hint(&self, from: &usize, to: &usize) -> Option<usize> {
        Some(to.saturating_sub(*from))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.len())
    }

    fn skip(&self, cursor: &mut usize, n: usize) -> usize {
        skip_index(cursor, self.len(), n)
    }
}

impl<'b, 'a, T> BidirectionalSequence for &'b &'a [T] {
    fn dec(&self, cursor: &mut usize) {
        debug_assert!(*cursor > 0, "decrementing past the beginning");
        *cursor -= 1;
    }
}

impl<'b, 'a, T> RandomAccessSequence for &'b &'a [T] {
    fn offset(&self, cursor: &mut usize, by: isize) {
        *cursor = cursor.wrapping_add_signed(by);
    }

    fn distance(&self, from: &usize, to: &usize) -> isize {
        *to as isize - *from as isize
    }
}

impl<'b, 'a, T> CommonSequence for &'b &'a [T] {
    fn end(&self) -> usize {
        self.len()
    }
}

impl<'b, 'a, T> SizedSequence for &'b &'a [T] {
    fn size(&self) -> usize {
        self.len()
    }
}

impl<'a, T> Sequence for &'a VecDeque<T> {
    type Element = &'a T;
    type Cursor = usize;

    const CATEGORY: Category = Category::CONTAINER
        .capped(crate::category::Traversal::RandomAccess)
        .borrowed()
        .read_only();

    fn begin(&self) -> usize {
        0
    }

    fn is_end(&self, cursor: &usize) -> bool {
        *cursor >= VecDeque::len(self)
    }

    fn inc(&self, cursor: &mut usize) {
        *cursor += 1;
    }

    fn read_at(&self, cursor: &usize) -> &'a T {
        let deque: &'a VecDeque<T> = *self;
        &deque[*cursor]
    }

    fn distance_hint(&self, from: &usize, to: &usize) -> Option<usize> {
        Some(to.saturating_sub(*from))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(VecDeque::len(self))
    }

    fn skip(&self, cursor: &mut usize, n: usize) -> usize {
        skip_index(cursor, VecDeque::len(self), n)
    }
}

impl<T> BidirectionalSequence for &VecDeque<T> {
    fn dec(&self, cursor: &mut usize) {
        debug_assert!(*cursor > 0, "decrementing past the beginning");
        *cursor -= 1;
    }
}

impl<T> RandomAccessSequence for &VecDeque<T> {
    fn offset(&self, cursor: &mut usize, by: isize) {
        *cursor = cursor.wrapping_add_signed(by);
    }

    fn distance(&self, from: &usize, to: &usize) -> isize {
        *to as isize - *from as isize
    }
}

impl<T> CommonSequence for &VecDeque<T> {
    fn end(&self) -> usize {
        VecDeque::len(self)
    }
}

impl<T> SizedSequence for &VecDeque<T> {
    fn size(&self) -> usize {
        VecDeque::len(self)
    }
}

impl<T> SequenceMut for VecDeque<T> {
    type Cursor = usize;
    type Value = T;

    fn read_at_mut(&mut self, cursor: &usize) -> &mut T {
        &mut self[*cursor]
    }
}

impl<T> Owner for VecDeque<T> {
    type Handle<'r> = &'r VecDeque<T> where Self: 'r;

    fn handle(&self) -> &VecDeque<T> {
        self
    }
}

/// Text is a bidirectional sequence of `char`s addressed by byte offsets.
impl Sequence for &str {
    type Element = char;
    type Cursor = usize;

    const CATEGORY: Category = Category::CONTAINER
        .capped(crate::category::Traversal::Bidirectional)
        .without_len()
        .read_only()
        .borrowed();

    fn begin(&self) -> usize {
        0
    }

    fn is_end(&self, cursor: &usize) -> bool {
        *cursor >= str::len(self)
    }

    fn inc(&self, cursor: &mut usize) {
        let width = self[*cursor..].chars().next().map_or(1, char::len_utf8);
        *cursor += width;
    }

    fn read_at(&self, cursor: &usize) -> char {
        match self[*cursor..].chars().next() {
            Some(ch) => ch,
            None => panic!("reading past the end of a string at byte {cursor}"),
        }
    }
}

impl BidirectionalSequence for &str {
    fn dec(&self, cursor: &mut usize) {
        let width = self[..*cursor].chars().next_back().map_or(1, char::len_utf8);
        *cursor -= width;
    }
}

impl CommonSequence for &str {
    fn end(&self) -> usize {
        str::len(self)
    }
}

impl<'a> Sequence for &'a String {
    type Element = char;
    type Cursor = usize;

    const CATEGORY: Category = <&'a str as Sequence>::CATEGORY;

    fn begin(&self) -> usize {
        0
    }

    fn is_end(&self, cursor: &usize) -> bool {
        Sequence::is_end(&self.as_str(), cursor)
    }

    fn inc(&self, cursor: &mut usize) {
        Sequence::inc(&self.as_str(), cursor)
    }

    fn read_at(&self, cursor: &usize) -> char {
        Sequence::read_at(&self.as_str(), cursor)
    }
}

impl BidirectionalSequence for &String {
    fn dec(&self, cursor: &mut usize) {
        BidirectionalSequence::dec(&self.as_str(), cursor)
    }
}

impl CommonSequence for &String {
    fn end(&self) -> usize {
        String::len(self)
    }
}

impl<T: Clone> Container for Vec<T> {
    type Cursor = usize;

    const WRITABLE: bool = true;

    fn begin_cursor(&self) -> usize {
        0
    }

    fn end_cursor(&self) -> usize {
        Vec::len(self)
    }

    fn rebind_cursor(&self, cursor: &usize, new: &Self) -> usize {
        crate::rebind::rebind_by_offset(&self, cursor, &new)
    }
}

impl<T: Clone, const N: usize> Container for [T; N] {
    type Cursor = usize;

    const WRITABLE: bool = true;

    fn begin_cursor(&self) -> usize {
        0
    }

    fn end_cursor(&self) -> usize {
        N
    }

    fn rebind_cursor(&self, cursor: &usize, new: &Self) -> usize {
        crate::rebind::rebind_by_offset(&self, cursor, &new)
    }
}

impl<T: Clone> Container for VecDeque<T> {
    type Cursor = usize;

    const WRITABLE: bool = true;

    fn begin_cursor(&self) -> usize {
        0
    }

    fn end_cursor(&self) -> usize {
        VecDeque::len(self)
    }

    fn rebind_cursor(&self, cursor: &usize, new: &Self) -> usize {
        crate::rebind::rebind_by_offset(&self, cursor, &new)
    }
}

impl Container for String {
    type Cursor = usize;

    const WRITABLE: bool = false;

    fn begin_cursor(&self) -> usize {
        0
    }

    fn end_cursor(&self) -> usize {
        String::len(self)
    }

    fn rebind_cursor(&self, cursor: &usize, new: &Self) -> usize {
        crate::rebind::rebind_by_walk(&self, cursor, &new)
    }
}
