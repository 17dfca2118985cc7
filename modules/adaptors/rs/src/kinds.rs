//! Kind markers naming which adaptor produced a value.
//!
//! An adaptor applied to the output of the same adaptor kind folds into a single layer; every
//! other multi-pass kind is wrapped as an ordinary owner.

pub use lazyseq_core_rs::{Borrowed, Owning, Pulled, Viewed, Writable};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct FilterKind;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct MapKind;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct DropKind;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct TakeKind;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct JoinKind;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct SplitKind;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct ZipKind;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct RepeatKind;

/// Kinds whose values can be traversed more than once.
pub trait MultiPass {}

impl MultiPass for Borrowed {}
impl MultiPass for Owning {}
impl MultiPass for Viewed {}
impl MultiPass for Writable {}
impl MultiPass for FilterKind {}
impl MultiPass for MapKind {}
impl MultiPass for DropKind {}
impl MultiPass for TakeKind {}
impl MultiPass for JoinKind {}
impl MultiPass for SplitKind {}
impl MultiPass for ZipKind {}
impl MultiPass for RepeatKind {}

/// Makes an adaptor type usable as the input of another adaptor: it is its own owner.
macro_rules! impl_adaptor_source {
    ([$($generics:tt)*], $adaptor:ty, $kind:ty) => {
        impl<$($generics)*> lazyseq_core_rs::Source for $adaptor {
            type Kind = $kind;
        }

        impl<$($generics)*> lazyseq_core_rs::IntoOwner for $adaptor {
            type Owner = Self;

            fn into_owner(self) -> Self {
                self
            }
        }
    };
}

pub(crate) use impl_adaptor_source;
