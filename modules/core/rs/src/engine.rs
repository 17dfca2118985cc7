use std::fmt::{self, Debug, Display};
use std::iter::FusedIterator;

use ::impl_tools::autoimpl;
use derive_more::Constructor;

/// Outcome of resuming a suspended computation.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Resume<Y> {
    /// Suspended after producing a value.
    Yield(Y),
    /// Ran to completion. Resuming again must keep returning `Complete`.
    Complete,
}

impl<Y> Resume<Y> {
    pub fn into_option(self) -> Option<Y> {
        match self {
            Resume::Yield(value) => Some(value),
            Resume::Complete => None,
        }
    }
}

impl<Y> From<Option<Y>> for Resume<Y> {
    fn from(value: Option<Y>) -> Self {
        match value {
            Some(value) => Resume::Yield(value),
            None => Resume::Complete,
        }
    }
}

/// A computation that suspends at every produced value.
///
/// Implementations are explicit state machines: the resume point is part of the state, and
/// every value needed across a suspension is a field. A single `resume` must do no more work
/// than producing the next value requires.
#[autoimpl(for <T: trait + ?Sized> &mut T, Box<T>)]
pub trait Coroutine {
    type Yield;

    fn resume(&mut self) -> Resume<Self::Yield>;
}

/// Life-cycle of an [`Engine`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum EngineState {
    /// Not resumed yet.
    #[default]
    Created,
    /// Suspended at a yield point.
    Running,
    /// The computation completed; nothing more will be produced.
    Finished,
}

impl Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EngineState::Created => "created",
            EngineState::Running => "running",
            EngineState::Finished => "finished",
        };
        f.write_str(name)
    }
}

/// Single-pass, on-demand producer driving a [`Coroutine`].
///
/// The engine buffers at most one value (filled only by [`Engine::peek`]) and never resumes
/// its computation unless a value is requested. Dropping it before completion discards the
/// buffered value and the suspended state without running anything further.
pub struct Engine<C: Coroutine> {
    coroutine: C,
    state: EngineState,
    buffered: Option<C::Yield>,
    pulls: usize,
}

impl<C: Coroutine> Engine<C> {
    pub fn new(coroutine: C) -> Self {
        Self {
            coroutine,
            state: EngineState::Created,
            buffered: None,
            pulls: 0,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// How many times the computation has been resumed.
    pub fn pulls(&self) -> usize {
        self.pulls
    }

    pub fn coroutine(&self) -> &C {
        &self.coroutine
    }

    fn pull(&mut self) -> Option<C::Yield> {
        if self.state == EngineState::Finished {
            return None;
        }
        if self.state == EngineState::Created {
            log::trace!("Starting a pull engine");
        }
        self.pulls += 1;
        match self.coroutine.resume() {
            Resume::Yield(value) => {
                self.state = EngineState::Running;
                Some(value)
            }
            Resume::Complete => {
                log::trace!("Pull engine finished after {} pulls", self.pulls);
                self.state = EngineState::Finished;
                None
            }
        }
    }

    /// The next value without consuming it, resuming the computation only if nothing is
    /// buffered yet.
    pub fn peek(&mut self) -> Option<&C::Yield> {
        if self.buffered.is_none() {
            self.buffered = self.pull();
        }
        self.buffered.as_ref()
    }
}

impl<C: Coroutine> Iterator for Engine<C> {
    type Item = C::Yield;

    fn next(&mut self) -> Option<Self::Item> {
        match self.buffered.take() {
            Some(value) => Some(value),
            None => self.pull(),
        }
    }
}

impl<C: Coroutine> FusedIterator for Engine<C> {}

impl<C: Coroutine> Drop for Engine<C> {
    fn drop(&mut self) {
        if self.state != EngineState::Finished {
            log::trace!(
                "Abandoning a {} pull engine after {} pulls",
                self.state,
                self.pulls
            );
        }
    }
}

impl<C: Coroutine + Debug> Debug for Engine<C>
where
    C::Yield: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("coroutine", &self.coroutine)
            .field("state", &self.state)
            .field("buffered", &self.buffered)
            .field("pulls", &self.pulls)
            .finish()
    }
}

/// Coroutine pulling from an already-open iterator.
#[derive(Clone, Debug, Constructor)]
pub struct SinglePass<I: Iterator> {
    source: I,
}

impl<I: Iterator> Coroutine for SinglePass<I> {
    type Yield = I::Item;

    fn resume(&mut self) -> Resume<I::Item> {
        self.source.next().into()
    }
}

/// Coroutine driven by a closure; `None` completes it.
#[derive(Clone, Debug, Constructor)]
pub struct FnCoroutine<F> {
    step: F,
    done: bool,
}

impl<F> FnCoroutine<F> {
    pub fn from_fn(step: F) -> Self {
        Self::new(step, false)
    }
}

impl<F, Y> Coroutine for FnCoroutine<F>
where
    F: FnMut() -> Option<Y>,
{
    type Yield = Y;

    fn resume(&mut self) -> Resume<Y> {
        if self.done {
            return Resume::Complete;
        }
        match (self.step)() {
            Some(value) => Resume::Yield(value),
            None => {
                self.done = true;
                Resume::Complete
            }
        }
    }
}

/// Wraps an already-open input stream into a pull engine.
pub fn pull<I: IntoIterator>(source: I) -> Engine<SinglePass<I::IntoIter>> {
    Engine::new(SinglePass::new(source.into_iter()))
}

pub fn from_fn<F, Y>(step: F) -> Engine<FnCoroutine<F>>
where
    F: FnMut() -> Option<Y>,
{
    Engine::new(FnCoroutine::from_fn(step))
}
