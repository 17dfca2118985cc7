use std::collections::VecDeque;

use crate::owned::Owned;
use crate::sequence::{Container, Sequence};
use crate::view::{Bound, View};

/// Turns two cursors of a handle into the simplest window over the same elements.
///
/// Contiguous storage answers with a plain slice; everything else falls back to a [`View`].
/// Adaptors answer with themselves rebuilt over a window of their input, so taking a window
/// of a window never nests.
pub trait Subrange: Sequence {
    type Output;

    /// `len`, when given, must equal the number of elements between `head` and `tail`.
    fn subrange(
        self,
        head: Self::Cursor,
        tail: Bound<Self::Cursor>,
        len: Option<usize>,
    ) -> Self::Output;
}

/// The generic fallback: a window with an optional explicit length.
pub fn window<S: Sequence>(
    base: S,
    head: S::Cursor,
    tail: Bound<S::Cursor>,
    len: Option<usize>,
) -> View<S> {
    match len {
        Some(len) => View::sized(base, head, tail, len),
        None => View::from_parts(base, head, tail),
    }
}

fn slice_window<T>(slice: &[T], head: usize, tail: Bound<usize>, len: Option<usize>) -> &[T] {
    debug_assert!(
        tail != Bound::Unreachable,
        "finite storage cannot have an unreachable end"
    );
    let end = match tail {
        Bound::At(end) => end,
        Bound::Natural | Bound::Unreachable => slice.len(),
    };
    let window = &slice[head..end];
    debug_assert!(
        len.is_none_or(|len| len == window.len()),
        "explicit length disagrees with the window"
    );
    window
}

macro_rules! impl_contiguous_subrange {
    ([$($generics:tt)*], $owner:ty) => {
        impl<'a, $($generics)*> Subrange for &'a $owner {
            type Output = &'a [T];

            fn subrange(self, head: usize, tail: Bound<usize>, len: Option<usize>) -> &'a [T] {
                slice_window(&self[..], head, tail, len)
            }
        }
    };
}

impl_contiguous_subrange!([T], [T]);
impl_contiguous_subrange!([T], Vec<T>);
impl_contiguous_subrange!([T, const N: usize], [T; N]);

impl<'a, T> Subrange for &&'a [T] {
    type Output = &'a [T];

    fn subrange(self, head: usize, tail: Bound<usize>, len: Option<usize>) -> &'a [T] {
        slice_window(*self, head, tail, len)
    }
}

macro_rules! impl_fallback_subrange {
    ([$($generics:tt)*], $handle:ty) => {
        impl<$($generics)*> Subrange for $handle
        where
            $handle: Sequence,
        {
            type Output = View<Self>;

            fn subrange(
                self,
                head: Self::Cursor,
                tail: Bound<Self::Cursor>,
                len: Option<usize>,
            ) -> View<Self> {
                window(self, head, tail, len)
            }
        }
    };
}

impl_fallback_subrange!(['a, T], &'a VecDeque<T>);
impl_fallback_subrange!(['a], &'a str);
impl_fallback_subrange!(['a], &'a String);
impl_fallback_subrange!(['a, C: Container], &'a Owned<C>);

/// A window of a window is the base's own window, so views never nest and views of slices
/// give slices back.
impl<S: Subrange> Subrange for View<S> {
    type Output = S::Output;

    fn subrange(
        self,
        head: Self::Cursor,
        tail: Bound<Self::Cursor>,
        len: Option<usize>,
    ) -> S::Output {
        let (base, _, own_tail, _) = self.dissolve();
        let tail = match tail {
            Bound::Natural => own_tail,
            tail => tail,
        };
        base.subrange(head, tail, len)
    }
}

impl<S: Subrange + Clone> Subrange for &View<S> {
    type Output = S::Output;

    fn subrange(
        self,
        head: Self::Cursor,
        tail: Bound<Self::Cursor>,
        len: Option<usize>,
    ) -> S::Output {
        self.clone().subrange(head, tail, len)
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    #[test]
    fn test_contiguous_storage_gives_slices() {
        let values = vec![1, 2, 3, 4, 5];
        let window: &[i32] = (&values).subrange(1, Bound::At(4), Some(3));
        assert_eq!(window, &[2, 3, 4]);

        let nested: &[i32] = (&window).subrange(1, Bound::Natural, None);
        assert_eq!(nested, &[3, 4]);
        assert!(std::ptr::eq(&nested[0], &values[2]));
    }

    #[test]
    fn test_other_storage_gives_views() {
        let values = VecDeque::from([1, 2, 3, 4, 5]);
        let window = (&values).subrange(1, Bound::At(4), None);
        assert_eq!(window.known_len(), Some(3));

        let nested = (&window).subrange(2, Bound::Natural, None);
        assert_eq!((&nested).elements().copied().collect_vec(), vec![3, 4]);
        assert_eq!(nested.known_len(), Some(2));
    }

    #[test]
    fn test_window_of_a_view_over_a_slice_is_a_slice() {
        let values = vec![1, 2, 3, 4, 5];
        let view = View::from_parts(&values, 1, Bound::At(4));
        let window: &[i32] = (&view).subrange(2, Bound::Natural, None);
        assert_eq!(window, &[3, 4]);
        assert!(std::ptr::eq(&window[0], &values[2]));
    }

    #[test]
    fn test_text_windows() {
        let text = String::from("lazy sequences");
        let window = (&text).subrange(5, Bound::At(8), None);
        assert_eq!(window.elements().collect::<String>(), "seq");
    }
}
