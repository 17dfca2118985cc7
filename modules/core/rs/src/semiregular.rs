use std::fmt::{self, Debug};
use std::marker::PhantomData;

/// How a [`Semiregular`] box assigns a new payload over an existing one.
pub trait AssignPolicy {
    fn assign<P: Clone>(slot: &mut Option<P>, source: &Option<P>);
}

/// Hands assignment to the payload's own `clone_from`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Delegate;

/// Builds the new payload first and only then replaces the old one. A panicking clone leaves
/// the box holding its previous payload.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Reconstruct;

/// Drops the old payload first and then builds the new one. A panicking clone leaves the box
/// observably empty.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Nullable;

impl AssignPolicy for Delegate {
    fn assign<P: Clone>(slot: &mut Option<P>, source: &Option<P>) {
        slot.clone_from(source)
    }
}

impl AssignPolicy for Reconstruct {
    fn assign<P: Clone>(slot: &mut Option<P>, source: &Option<P>) {
        let fresh = source.clone();
        *slot = fresh;
    }
}

impl AssignPolicy for Nullable {
    fn assign<P: Clone>(slot: &mut Option<P>, source: &Option<P>) {
        *slot = None;
        *slot = source.clone();
    }
}

/// A box that gives clone-assignment and a default state to payloads that only support
/// construction, such as closures stored inside adaptors.
///
/// Reading an empty box is a precondition violation and panics.
pub struct Semiregular<P, A: AssignPolicy = Reconstruct> {
    slot: Option<P>,
    _policy: PhantomData<A>,
}

impl<P, A: AssignPolicy> Semiregular<P, A> {
    pub fn new(payload: P) -> Self {
        Self {
            slot: Some(payload),
            _policy: PhantomData,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    /// # Panics
    /// When the box is empty.
    pub fn get(&self) -> &P {
        match &self.slot {
            Some(payload) => payload,
            None => panic!("reading an empty semiregular box"),
        }
    }

    /// # Panics
    /// When the box is empty.
    pub fn get_mut(&mut self) -> &mut P {
        match &mut self.slot {
            Some(payload) => payload,
            None => panic!("reading an empty semiregular box"),
        }
    }

    pub fn replace(&mut self, payload: P) -> Option<P> {
        self.slot.replace(payload)
    }

    pub fn into_inner(self) -> Option<P> {
        self.slot
    }
}

impl<P, A: AssignPolicy> Default for Semiregular<P, A> {
    fn default() -> Self {
        Self {
            slot: None,
            _policy: PhantomData,
        }
    }
}

impl<P: Clone, A: AssignPolicy> Clone for Semiregular<P, A> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
            _policy: PhantomData,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        A::assign(&mut self.slot, &source.slot)
    }
}

impl<P, A: AssignPolicy> From<P> for Semiregular<P, A> {
    fn from(payload: P) -> Self {
        Self::new(payload)
    }
}

impl<P: Debug, A: AssignPolicy> Debug for Semiregular<P, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.slot {
            Some(payload) => f.debug_tuple("Semiregular").field(payload).finish(),
            None => f.write_str("Semiregular(<empty>)"),
        }
    }
}
