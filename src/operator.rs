//! Binary operators that can be scanned.
//!
//! Every scan is parameterised by an [`Operator`]: an associative binary
//! function paired with its identity element. The built-in operators are
//! zero-sized and generic over the element type through [`num_traits`], so
//! the same `Plus` value scans `i32`, `u64` or `f64` data.

use core::{
    fmt,
    ops::{
        Add, BitAnd as BitAndOp, BitOr as BitOrOp, BitXor as BitXorOp, Mul,
        Not,
    },
};

use num_traits::{Bounded, CheckedAdd, CheckedMul, One, Zero};

use crate::error::{Error, Result};

/// The contract every scanned operator must satisfy.
///
/// Implementations must be associative, `(a ⊕ b) ⊕ c == a ⊕ (b ⊕ c)`,
/// and [`Operator::identity()`] must satisfy `e ⊕ x == x ⊕ e == x`. Neither
/// property is checked. Breaking associativity gives results that depend
/// on how the input was split into blocks, it never causes a panic.
///
/// Commutativity is *not* required. The kernels always pass the earlier
/// operand as `lhs`.
pub trait Operator<T> {
    /// Returns the identity element of the operator.
    fn identity(&self) -> T;

    /// Combines two operands, `lhs` being the one that comes first in the
    /// sequence.
    ///
    /// # Errors
    ///
    /// Returns an error if the operator cannot produce a value, e.g. on
    /// checked arithmetic overflow. The scan stops at the first failure.
    fn combine(&self, lhs: T, rhs: T) -> Result<T>;
}

impl<T, O> Operator<T> for &O
where
    O: Operator<T> + ?Sized,
{
    #[inline]
    fn identity(&self) -> T {
        (**self).identity()
    }

    #[inline]
    fn combine(&self, lhs: T, rhs: T) -> Result<T> {
        (**self).combine(lhs, rhs)
    }
}

/// Addition, identity `0`. The default scan operator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Plus;

impl<T> Operator<T> for Plus
where
    T: Zero + Add<Output = T>,
{
    #[inline]
    fn identity(&self) -> T {
        T::zero()
    }

    #[inline]
    fn combine(&self, lhs: T, rhs: T) -> Result<T> {
        Ok(lhs + rhs)
    }
}

/// Multiplication, identity `1`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Multiplies;

impl<T> Operator<T> for Multiplies
where
    T: One + Mul<Output = T>,
{
    #[inline]
    fn identity(&self) -> T {
        T::one()
    }

    #[inline]
    fn combine(&self, lhs: T, rhs: T) -> Result<T> {
        Ok(lhs * rhs)
    }
}

/// Minimum, identity is the largest representable value.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Minimum;

impl<T> Operator<T> for Minimum
where
    T: Bounded + PartialOrd,
{
    #[inline]
    fn identity(&self) -> T {
        T::max_value()
    }

    #[inline]
    fn combine(&self, lhs: T, rhs: T) -> Result<T> {
        Ok(if rhs < lhs { rhs } else { lhs })
    }
}

/// Maximum, identity is the smallest representable value.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Maximum;

impl<T> Operator<T> for Maximum
where
    T: Bounded + PartialOrd,
{
    #[inline]
    fn identity(&self) -> T {
        T::min_value()
    }

    #[inline]
    fn combine(&self, lhs: T, rhs: T) -> Result<T> {
        Ok(if rhs > lhs { rhs } else { lhs })
    }
}

/// Bitwise or, identity `0`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitOr;

impl<T> Operator<T> for BitOr
where
    T: Zero + BitOrOp<Output = T>,
{
    #[inline]
    fn identity(&self) -> T {
        T::zero()
    }

    #[inline]
    fn combine(&self, lhs: T, rhs: T) -> Result<T> {
        Ok(lhs | rhs)
    }
}

/// Bitwise and, identity has every bit set.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitAnd;

impl<T> Operator<T> for BitAnd
where
    T: Zero + Not<Output = T> + BitAndOp<Output = T>,
{
    #[inline]
    fn identity(&self) -> T {
        !T::zero()
    }

    #[inline]
    fn combine(&self, lhs: T, rhs: T) -> Result<T> {
        Ok(lhs & rhs)
    }
}

/// Bitwise exclusive or, identity `0`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitXor;

impl<T> Operator<T> for BitXor
where
    T: Zero + BitXorOp<Output = T>,
{
    #[inline]
    fn identity(&self) -> T {
        T::zero()
    }

    #[inline]
    fn combine(&self, lhs: T, rhs: T) -> Result<T> {
        Ok(lhs ^ rhs)
    }
}

/// Logical and over `bool`, identity `true`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LogicalAnd;

impl Operator<bool> for LogicalAnd {
    #[inline]
    fn identity(&self) -> bool {
        true
    }

    #[inline]
    fn combine(&self, lhs: bool, rhs: bool) -> Result<bool> {
        Ok(lhs && rhs)
    }
}

/// Logical or over `bool`, identity `false`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LogicalOr;

impl Operator<bool> for LogicalOr {
    #[inline]
    fn identity(&self) -> bool {
        false
    }

    #[inline]
    fn combine(&self, lhs: bool, rhs: bool) -> Result<bool> {
        Ok(lhs || rhs)
    }
}

/// Overflow-checked addition, identity `0`.
///
/// Fails with [`Error::Overflow`] instead of wrapping or panicking.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CheckedPlus;

impl<T> Operator<T> for CheckedPlus
where
    T: Zero + CheckedAdd,
{
    #[inline]
    fn identity(&self) -> T {
        T::zero()
    }

    #[inline]
    fn combine(&self, lhs: T, rhs: T) -> Result<T> {
        lhs.checked_add(&rhs).ok_or(Error::Overflow {
            operator: "checked_plus",
        })
    }
}

/// Overflow-checked multiplication, identity `1`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CheckedMultiplies;

impl<T> Operator<T> for CheckedMultiplies
where
    T: One + CheckedMul,
{
    #[inline]
    fn identity(&self) -> T {
        T::one()
    }

    #[inline]
    fn combine(&self, lhs: T, rhs: T) -> Result<T> {
        lhs.checked_mul(&rhs).ok_or(Error::Overflow {
            operator: "checked_multiplies",
        })
    }
}

/// An operator built from an infallible closure and an identity value.
///
/// Created by [`from_fn()`].
#[derive(Clone, Copy)]
pub struct FnOperator<T, F> {
    identity: T,
    combine: F,
}

impl<T, F> fmt::Debug for FnOperator<T, F>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnOperator")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

impl<T, F> Operator<T> for FnOperator<T, F>
where
    T: Clone,
    F: Fn(T, T) -> T,
{
    #[inline]
    fn identity(&self) -> T {
        self.identity.clone()
    }

    #[inline]
    fn combine(&self, lhs: T, rhs: T) -> Result<T> {
        Ok((self.combine)(lhs, rhs))
    }
}

/// Wraps a closure into an [`Operator`].
///
/// The caller vouches for associativity and for `identity` being a true
/// identity of `combine`.
///
/// # Examples
///
/// ```
/// use blockscan::{Policy, inclusive_scan, operator};
///
/// let product = operator::from_fn(1_u64, |a, b| a.wrapping_mul(b));
/// let mut out = [0; 4];
/// inclusive_scan(&Policy::seq(), &[1, 2, 3, 4], &mut out, product).unwrap();
///
/// assert_eq!(out, [1, 2, 6, 24]);
/// ```
#[inline]
pub const fn from_fn<T, F>(identity: T, combine: F) -> FnOperator<T, F>
where
    F: Fn(T, T) -> T,
{
    FnOperator { identity, combine }
}

/// An operator built from a fallible closure and an identity value.
///
/// Created by [`try_from_fn()`].
#[derive(Clone, Copy)]
pub struct TryFnOperator<T, F> {
    identity: T,
    combine: F,
}

impl<T, F> fmt::Debug for TryFnOperator<T, F>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TryFnOperator")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

impl<T, F, E> Operator<T> for TryFnOperator<T, F>
where
    T: Clone,
    F: Fn(T, T) -> core::result::Result<T, E>,
    E: Into<Box<dyn core::error::Error + Send + Sync>>,
{
    #[inline]
    fn identity(&self) -> T {
        self.identity.clone()
    }

    #[inline]
    fn combine(&self, lhs: T, rhs: T) -> Result<T> {
        (self.combine)(lhs, rhs).map_err(|err| Error::Operator(err.into()))
    }
}

/// Wraps a fallible closure into an [`Operator`].
///
/// A closure error aborts the scan and is reported as
/// [`Error::Operator`].
#[inline]
pub const fn try_from_fn<T, F, E>(
    identity: T,
    combine: F,
) -> TryFnOperator<T, F>
where
    F: Fn(T, T) -> core::result::Result<T, E>,
{
    TryFnOperator { identity, combine }
}
