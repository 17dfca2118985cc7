use derive_getters::{Dissolve, Getters};

use crate::rebind::Rebind;
use crate::sequence::{
    BidirectionalSequence, Iter, Owner, RandomAccessSequence, Sequence, SequenceMut,
};

/// A cursor paired with the handle it belongs to.
///
/// Unlike a bare cursor, a position can be read and moved on its own. Turning a position into an
/// iterator reads from the current element to the end of the sequence.
#[derive(Clone, Debug, Getters, Dissolve)]
pub struct Position<S: Sequence> {
    seq: S,
    cursor: S::Cursor,
}

impl<S: Sequence> Position<S> {
    pub fn new(seq: S, cursor: S::Cursor) -> Self {
        Self { seq, cursor }
    }

    pub fn is_end(&self) -> bool {
        self.seq.is_end(&self.cursor)
    }

    /// Reads the current element. The position must not be at the end.
    pub fn get(&self) -> S::Element {
        self.seq.read_at(&self.cursor)
    }

    pub fn advance(&mut self) -> &mut Self {
        self.seq.inc(&mut self.cursor);
        self
    }
}

impl<S: BidirectionalSequence> Position<S> {
    pub fn retreat(&mut self) -> &mut Self {
        self.seq.dec(&mut self.cursor);
        self
    }
}

impl<S: RandomAccessSequence> Position<S> {
    pub fn offset(&mut self, by: isize) -> &mut Self {
        self.seq.offset(&mut self.cursor, by);
        self
    }

    pub fn distance_to(&self, other: &Self) -> isize {
        self.seq.distance(&self.cursor, &other.cursor)
    }
}

impl<S: Rebind> Position<S> {
    /// Re-derives this position against an equal-content copy of the sequence.
    pub fn rebind(&self, new: S) -> Position<S> {
        let cursor = self.seq.rebind(&self.cursor, &new);
        Position::new(new, cursor)
    }
}

impl<S: Sequence> PartialEq for Position<S> {
    fn eq(&self, other: &Self) -> bool {
        self.cursor == other.cursor
    }
}

impl<S: Sequence> IntoIterator for Position<S> {
    type Item = S::Element;
    type IntoIter = Iter<S>;

    fn into_iter(self) -> Iter<S> {
        Iter::from_cursor(self.seq, self.cursor)
    }
}

/// A cursor paired with exclusive access to its owner.
#[derive(Debug)]
pub struct PositionMut<'x, C: SequenceMut + ?Sized> {
    owner: &'x mut C,
    cursor: <C as SequenceMut>::Cursor,
}

impl<'x, C: SequenceMut + ?Sized> PositionMut<'x, C> {
    pub fn new(owner: &'x mut C, cursor: <C as SequenceMut>::Cursor) -> Self {
        Self { owner, cursor }
    }

    pub fn cursor(&self) -> &<C as SequenceMut>::Cursor {
        &self.cursor
    }

    pub fn get_mut(&mut self) -> &mut <C as SequenceMut>::Value {
        self.owner.read_at_mut(&self.cursor)
    }

    pub fn set(&mut self, value: <C as SequenceMut>::Value)
    where
        <C as SequenceMut>::Value: Sized,
    {
        *self.get_mut() = value;
    }

    /// Gives up write access, keeping the same cursor.
    pub fn into_position(self) -> Position<C::Handle<'x>>
    where
        C: Owner,
    {
        let owner: &'x C = self.owner;
        Position::new(owner.handle(), self.cursor)
    }

    pub fn dissolve(self) -> (&'x mut C, <C as SequenceMut>::Cursor) {
        (self.owner, self.cursor)
    }
}

#[cfg(test)]
mod tests {
    use eyre::Result;

    use super::*;

    #[test]
    fn test_position_moves() {
        let values = vec![10, 20, 30, 40];
        let mut position = (&values).position();
        assert_eq!(position.get(), &10);

        position.advance().advance();
        assert_eq!(position.get(), &30);
        position.retreat();
        assert_eq!(position.get(), &20);
        position.offset(2);
        assert_eq!(position.get(), &40);

        let begin = (&values).position();
        assert_eq!(begin.distance_to(&position), 3);
        assert_eq!(position.into_iter().copied().collect::<Vec<_>>(), vec![40]);
    }

    #[test]
    fn test_rebind_position_to_copy() -> Result<()> {
        let original = vec!['a', 'b', 'c', 'd'];
        let mut position = (&original).position();
        position.offset(2);

        let copy = original.clone();
        let rebound = position.rebind(&copy);
        assert_eq!(rebound.get(), &'c');
        assert!(std::ptr::eq(rebound.get(), &copy[2]));
        Ok(())
    }

    #[test]
    fn test_position_mut() {
        let mut values: Vec<i32> = vec![1, 2, 3];
        let mut position = PositionMut::new(&mut values, 1);
        *position.get_mut() += 40;
        let current = *position.get_mut();
        position.set(current + 1);

        let position = position.into_position();
        assert_eq!(position.get(), &43);
    }
}
