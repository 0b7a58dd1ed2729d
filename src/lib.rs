//! Prefix scans over arbitrary associative operators.
//!
//! `blockscan` computes inclusive and exclusive scans, in place or into a
//! separate buffer, for any [`Operator`]: addition, minimum, bitwise or,
//! matrix products, string concatenation. A [`Policy`] picks between the
//! single-threaded kernel and a three-phase blocked kernel that runs on a
//! [`Backend`](backend::Backend). Both fold operands in the same
//! left-to-right order, so non-commutative operators give the same answer
//! either way.
//!
//! # Examples
//!
//! ```
//! use blockscan::{Policy, exclusive_scan, inclusive_scan, operator::Plus};
//!
//! let input: Vec<i32> = (-1..19).collect();
//! let mut output = vec![0; input.len()];
//!
//! inclusive_scan(&Policy::par(), &input, &mut output, Plus).unwrap();
//! assert_eq!(&output[..4], &[-1, -1, 0, 2]);
//!
//! exclusive_scan(&Policy::seq(), &input, &mut output, Plus).unwrap();
//! assert_eq!(&output[..4], &[0, -1, -1, 0]);
//! ```
//!
//! # Features
//!
//! - `rayon` (default): [`backend::pool::RayonBackend`] becomes the
//!   default backend.
//! - `ndarray`: one-dimensional `ndarray` views convert into spans.

pub mod backend;
pub mod error;
pub mod kernel;
pub mod operator;
pub mod policy;
pub mod scan;
pub mod span;

pub use crate::{
    error::{Error, Result},
    operator::Operator,
    policy::{BlockLayout, BlockedPolicy, Policy},
    scan::{
        exclusive_scan, exclusive_scan_inplace,
        exclusive_scan_inplace_with_init, exclusive_scan_with_init,
        exclusive_sum, inclusive_scan, inclusive_scan_inplace,
        inclusive_scan_inplace_with_init, inclusive_scan_with_init,
        inclusive_sum,
    },
    span::{Span, SpanMut, make_span, make_span_mut},
};
