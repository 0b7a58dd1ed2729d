//! Non-owning views over the buffers a scan reads and writes.
//!
//! A [`Span`] is a shared view, a [`SpanMut`] an exclusive one. Both borrow
//! their storage, so the caller keeps ownership and the borrow checker
//! guarantees that the input and output of an out-of-place scan never alias.

use core::ops::{Deref, DerefMut};

/// A shared, contiguous view of `len()` elements.
#[derive(Debug)]
pub struct Span<'a, T> {
    data: &'a [T],
}

impl<T> Clone for Span<'_, T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Span<'_, T> {}

impl<'a, T> Span<'a, T> {
    /// Creates a view over `data`.
    #[inline]
    pub const fn new(data: &'a [T]) -> Self {
        Self { data }
    }

    /// Returns the viewed elements.
    #[inline]
    pub const fn as_slice(&self) -> &'a [T] {
        self.data
    }
}

impl<T> Deref for Span<'_, T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.data
    }
}

/// An exclusive, contiguous view of `len()` elements.
#[derive(Debug)]
pub struct SpanMut<'a, T> {
    data: &'a mut [T],
}

impl<'a, T> SpanMut<'a, T> {
    /// Creates a mutable view over `data`.
    #[inline]
    pub const fn new(data: &'a mut [T]) -> Self {
        Self { data }
    }

    /// Returns the viewed elements.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.data
    }

    /// Consumes the view and returns the underlying slice.
    #[inline]
    pub fn into_slice(self) -> &'a mut [T] {
        self.data
    }
}

impl<T> Deref for SpanMut<'_, T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.data
    }
}

impl<T> DerefMut for SpanMut<'_, T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.data
    }
}

/// Creates a shared view of a slice.
#[inline]
pub const fn make_span<T>(data: &[T]) -> Span<'_, T> {
    Span::new(data)
}

/// Creates an exclusive view of a slice.
#[inline]
pub const fn make_span_mut<T>(data: &mut [T]) -> SpanMut<'_, T> {
    SpanMut::new(data)
}

impl<'a, T> From<&'a [T]> for Span<'a, T> {
    #[inline]
    fn from(value: &'a [T]) -> Self {
        Self::new(value)
    }
}

impl<'a, T> From<&'a Vec<T>> for Span<'a, T> {
    #[inline]
    fn from(value: &'a Vec<T>) -> Self {
        Self::new(value)
    }
}

impl<'a, T, const N: usize> From<&'a [T; N]> for Span<'a, T> {
    #[inline]
    fn from(value: &'a [T; N]) -> Self {
        Self::new(value)
    }
}

impl<'a, T> From<&'a mut [T]> for SpanMut<'a, T> {
    #[inline]
    fn from(value: &'a mut [T]) -> Self {
        Self::new(value)
    }
}

impl<'a, T> From<&'a mut Vec<T>> for SpanMut<'a, T> {
    #[inline]
    fn from(value: &'a mut Vec<T>) -> Self {
        Self::new(value)
    }
}

impl<'a, T, const N: usize> From<&'a mut [T; N]> for SpanMut<'a, T> {
    #[inline]
    fn from(value: &'a mut [T; N]) -> Self {
        Self::new(value)
    }
}

#[cfg(feature = "ndarray")]
mod ndarray_views {
    use ndarray::{ArrayView1, ArrayViewMut1};

    use crate::{
        error::Error,
        span::{Span, SpanMut},
    };

    /// Views a one-dimensional [`ndarray`] view in standard layout.
    impl<'a, T> TryFrom<ArrayView1<'a, T>> for Span<'a, T> {
        type Error = Error;

        #[inline]
        fn try_from(value: ArrayView1<'a, T>) -> Result<Self, Self::Error> {
            value.to_slice().map(Span::new).ok_or(Error::NonContiguous)
        }
    }

    /// Views a mutable one-dimensional [`ndarray`] view in standard layout.
    impl<'a, T> TryFrom<ArrayViewMut1<'a, T>> for SpanMut<'a, T> {
        type Error = Error;

        #[inline]
        fn try_from(value: ArrayViewMut1<'a, T>) -> Result<Self, Self::Error> {
            value.into_slice().map(SpanMut::new).ok_or(Error::NonContiguous)
        }
    }

    #[cfg(test)]
    mod tests {
        use ndarray::{Array1, s};

        use crate::{
            error::Error,
            span::{Span, SpanMut},
        };

        #[test]
        fn contiguous_view_converts() {
            let array = Array1::from(vec![1, 2, 3, 4]);

            let span = Span::try_from(array.view()).unwrap();

            assert_eq!(span.as_slice(), &[1, 2, 3, 4]);
        }

        #[test]
        fn strided_view_is_rejected() {
            let array = Array1::from(vec![1, 2, 3, 4]);

            let result = Span::try_from(array.slice(s![..;2]));

            assert!(matches!(result, Err(Error::NonContiguous)));
        }

        #[test]
        fn mutable_view_writes_through() {
            let mut array = Array1::from(vec![1, 2, 3]);

            let mut span = SpanMut::try_from(array.view_mut()).unwrap();
            span[0] = 9;

            assert_eq!(array.to_vec(), vec![9, 2, 3]);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::span::{Span, SpanMut, make_span, make_span_mut};

    #[test]
    fn span_reports_length() {
        let data = [1, 2, 3];
        let span = make_span(&data);

        assert_eq!(span.len(), 3);
        assert!(!span.is_empty());
    }

    #[test]
    fn empty_span_is_empty() {
        let data: Vec<f32> = Vec::new();
        let span = Span::from(&data);

        assert!(span.is_empty());
    }

    #[test]
    fn span_mut_writes_through() {
        let mut data = vec![0, 0, 0];
        {
            let mut span = make_span_mut(&mut data);
            span.as_mut_slice()[1] = 5;
        }

        assert_eq!(data, vec![0, 5, 0]);
    }

    #[test]
    fn span_mut_from_array() {
        let mut data = [1_u8; 4];
        let span = SpanMut::from(&mut data);

        assert_eq!(span.into_slice().len(), 4);
    }

    #[test]
    fn span_is_copy() {
        let data = [1.0, 2.0];
        let span = make_span(&data);
        let copy = span;

        assert_eq!(span.as_slice(), copy.as_slice());
    }
}
