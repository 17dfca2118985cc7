pub mod drop;
pub mod filter;
pub mod join;
pub mod kinds;
pub mod map;
pub mod repeat;
pub mod split;
pub mod take;
pub mod zip;

pub use drop::{drop, dropping, DropCoroutine, Dropped, Dropping};
pub use filter::{filter, filtering, Both, Equals, Filter, FilterCoroutine, Filtering, Predicate};
pub use join::{join, joining, Join, JoinCoroutine, JoinCursor, Joining};
pub use kinds::MultiPass;
pub use map::{map, mapping, Compose, Map, MapCoroutine, Mapping, Transform};
pub use repeat::{repeat, repeat_n, Repeat, RepeatN, Repeated};
pub use split::{
    split, split_lending, split_when, splitting, splitting_when, Split, SplitCoroutine,
    SplitCursor, SplitLending, Splitting,
};
pub use take::{take, taking, TakeCoroutine, TakeCursor, Taken, Taking};
pub use zip::{zip, zipping, Zip, ZipCoroutine, Zipping};
