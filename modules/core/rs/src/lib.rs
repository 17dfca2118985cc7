pub mod category;
pub mod const_dual;
pub mod dispatch;
pub mod engine;
pub mod indirect;
mod lending_iterator;
pub mod owned;
pub mod position;
pub mod rebind;
pub mod semiregular;
pub mod sequence;
pub mod subrange;
pub mod view;

pub use category::{Category, Traversal};
pub use const_dual::{ConstDual, ConstIter};
pub use dispatch::{
    Adaptor, Borrowed, IntoOwner, IntoPull, Owning, Pipe, Pulled, Source, Viewed, Writable,
};
pub use engine::{Coroutine, Engine, EngineState, FnCoroutine, Resume, SinglePass};
pub use indirect::Indirect;
pub use lending_iterator::{IntoLendingIterator, LendingIterator, Lent};
pub use owned::Owned;
pub use position::{Position, PositionMut};
pub use rebind::Rebind;
pub use semiregular::Semiregular;
pub use sequence::{
    walk, BidirectionalSequence, CommonSequence, Container, ContiguousSequence, Iter, Owner,
    RandomAccessSequence, Sequence, SequenceMut, SizedSequence,
};
pub use subrange::Subrange;
pub use view::{Bound, View, ViewMut};
