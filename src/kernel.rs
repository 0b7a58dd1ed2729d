//! Scan kernels.
//!
//! [`sequential`] holds the single-threaded reference kernels, which the
//! blocked kernel also calls for its per-block and aggregate passes.
//! [`blocked`] holds the three-phase kernel that runs on a
//! [`Backend`](crate::backend::Backend).
//!
//! Every kernel returns the final accumulator, that is the fold of the
//! seed and every scanned element. The blocked kernel uses it as the
//! block aggregate.

pub mod blocked;
pub mod sequential;

use crate::{error::Result, operator::Operator};

/// Whether the element at position `i` is folded into output `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanKind {
    /// `out[i] = seed ⊕ in[0] ⊕ … ⊕ in[i]`.
    Inclusive,
    /// `out[i] = seed ⊕ in[0] ⊕ … ⊕ in[i - 1]`, so `out[0] = seed`.
    Exclusive,
}

impl ScanKind {
    /// Runs the sequential kernel of this kind from `input` into `output`.
    ///
    /// # Errors
    ///
    /// Propagates the first operator failure.
    #[inline]
    pub fn scan<T, O>(
        self,
        input: &[T],
        output: &mut [T],
        op: &O,
        seed: T,
    ) -> Result<T>
    where
        T: Clone,
        O: Operator<T>,
    {
        match self {
            Self::Inclusive => sequential::inclusive(input, output, op, seed),
            Self::Exclusive => sequential::exclusive(input, output, op, seed),
        }
    }

    /// Runs the sequential kernel of this kind over `data` in place.
    ///
    /// # Errors
    ///
    /// Propagates the first operator failure.
    #[inline]
    pub fn scan_inplace<T, O>(
        self,
        data: &mut [T],
        op: &O,
        seed: T,
    ) -> Result<T>
    where
        T: Clone,
        O: Operator<T>,
    {
        match self {
            Self::Inclusive => sequential::inclusive_inplace(data, op, seed),
            Self::Exclusive => sequential::exclusive_inplace(data, op, seed),
        }
    }
}
