/// Sole-owner heap cell.
///
/// Keeps the size of the value that embeds it independent of the payload and makes moving it a
/// pointer copy. Clone-assignment into a populated cell reuses the existing allocation.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Indirect<T> {
    cell: Option<Box<T>>,
}

impl<T> Indirect<T> {
    pub fn new(value: T) -> Self {
        Self {
            cell: Some(Box::new(value)),
        }
    }

    pub fn is_populated(&self) -> bool {
        self.cell.is_some()
    }

    pub fn get(&self) -> Option<&T> {
        self.cell.as_deref()
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.cell.as_deref_mut()
    }

    pub fn into_inner(self) -> Option<T> {
        self.cell.map(|boxed| *boxed)
    }
}

/// The empty cell, for any payload.
impl<T> Default for Indirect<T> {
    fn default() -> Self {
        Self { cell: None }
    }
}

impl<T: Clone> Clone for Indirect<T> {
    fn clone(&self) -> Self {
        Self {
            cell: self.cell.as_ref().map(|boxed| Box::new(T::clone(boxed))),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        match (&mut self.cell, &source.cell) {
            (Some(target), Some(source)) => T::clone_from(target, source),
            (target, source) => *target = source.clone(),
        }
    }
}
