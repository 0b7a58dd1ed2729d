//! Inclusive and exclusive scan entry points.
//!
//! Every entry point takes a [`Policy`] that picks the kernel, the views to
//! read and write, and an [`Operator`]. The `_with_init` variants seed the
//! scan with an explicit value instead of the operator's identity.
//!
//! Out-of-place scans read from a [`Span`] and write to a [`SpanMut`] of the
//! same length. Since both borrow their storage, they can never alias. An
//! empty input is a no-op.

use num_traits::Zero;

use crate::{
    backend::Backend,
    error::{Error, Result},
    kernel::{ScanKind, blocked},
    operator::{Operator, Plus},
    policy::Policy,
    span::{Span, SpanMut},
};

/// Inclusive scan: `output[i] = input[0] ⊕ … ⊕ input[i]`.
///
/// # Errors
///
/// Returns [`Error::LengthMismatch`] if the views differ in length, and
/// propagates operator failures.
///
/// # Examples
///
/// ```
/// use blockscan::{Policy, inclusive_scan, operator::Minimum};
///
/// let input = [4, 6, 2, 8, 1];
/// let mut output = [0; 5];
/// inclusive_scan(&Policy::par(), &input, &mut output, Minimum).unwrap();
///
/// assert_eq!(output, [4, 4, 2, 2, 1]);
/// ```
#[inline]
pub fn inclusive_scan<'a, T, O, B>(
    policy: &Policy<B>,
    input: impl Into<Span<'a, T>>,
    output: impl Into<SpanMut<'a, T>>,
    op: O,
) -> Result<()>
where
    T: Clone + Send + Sync + 'a,
    O: Operator<T> + Sync,
    B: Backend,
{
    let init = op.identity();
    inclusive_scan_with_init(policy, input, output, op, init)
}

/// Inclusive scan seeded with `init`:
/// `output[i] = init ⊕ input[0] ⊕ … ⊕ input[i]`.
///
/// # Errors
///
/// Returns [`Error::LengthMismatch`] if the views differ in length, and
/// propagates operator failures.
pub fn inclusive_scan_with_init<'a, T, O, B>(
    policy: &Policy<B>,
    input: impl Into<Span<'a, T>>,
    output: impl Into<SpanMut<'a, T>>,
    op: O,
    init: T,
) -> Result<()>
where
    T: Clone + Send + Sync + 'a,
    O: Operator<T> + Sync,
    B: Backend,
{
    let input = input.into();
    let mut output = output.into();
    run(
        policy,
        ScanKind::Inclusive,
        input.as_slice(),
        output.as_mut_slice(),
        &op,
        init,
    )
}

/// Exclusive scan: `output[0]` is the identity and
/// `output[i] = input[0] ⊕ … ⊕ input[i - 1]`.
///
/// # Errors
///
/// Returns [`Error::LengthMismatch`] if the views differ in length, and
/// propagates operator failures.
#[inline]
pub fn exclusive_scan<'a, T, O, B>(
    policy: &Policy<B>,
    input: impl Into<Span<'a, T>>,
    output: impl Into<SpanMut<'a, T>>,
    op: O,
) -> Result<()>
where
    T: Clone + Send + Sync + 'a,
    O: Operator<T> + Sync,
    B: Backend,
{
    let init = op.identity();
    exclusive_scan_with_init(policy, input, output, op, init)
}

/// Exclusive scan seeded with `init`: `output[0] = init` and
/// `output[i] = init ⊕ input[0] ⊕ … ⊕ input[i - 1]`.
///
/// # Errors
///
/// Returns [`Error::LengthMismatch`] if the views differ in length, and
/// propagates operator failures.
pub fn exclusive_scan_with_init<'a, T, O, B>(
    policy: &Policy<B>,
    input: impl Into<Span<'a, T>>,
    output: impl Into<SpanMut<'a, T>>,
    op: O,
    init: T,
) -> Result<()>
where
    T: Clone + Send + Sync + 'a,
    O: Operator<T> + Sync,
    B: Backend,
{
    let input = input.into();
    let mut output = output.into();
    run(
        policy,
        ScanKind::Exclusive,
        input.as_slice(),
        output.as_mut_slice(),
        &op,
        init,
    )
}

/// Inclusive scan of `data` in place.
///
/// # Errors
///
/// Propagates operator failures; `data` is then partially scanned.
#[inline]
pub fn inclusive_scan_inplace<'a, T, O, B>(
    policy: &Policy<B>,
    data: impl Into<SpanMut<'a, T>>,
    op: O,
) -> Result<()>
where
    T: Clone + Send + Sync + 'a,
    O: Operator<T> + Sync,
    B: Backend,
{
    let init = op.identity();
    inclusive_scan_inplace_with_init(policy, data, op, init)
}

/// Inclusive scan of `data` in place, seeded with `init`.
///
/// # Errors
///
/// Propagates operator failures; `data` is then partially scanned.
pub fn inclusive_scan_inplace_with_init<'a, T, O, B>(
    policy: &Policy<B>,
    data: impl Into<SpanMut<'a, T>>,
    op: O,
    init: T,
) -> Result<()>
where
    T: Clone + Send + Sync + 'a,
    O: Operator<T> + Sync,
    B: Backend,
{
    let mut data = data.into();
    run_inplace(policy, ScanKind::Inclusive, data.as_mut_slice(), &op, init)
}

/// Exclusive scan of `data` in place.
///
/// # Errors
///
/// Propagates operator failures; `data` is then partially scanned.
///
/// # Examples
///
/// ```
/// use blockscan::{Policy, exclusive_scan_inplace, operator::Maximum};
///
/// let mut data = [3, 1, 7, 2];
/// exclusive_scan_inplace(&Policy::seq(), &mut data, Maximum).unwrap();
///
/// assert_eq!(data, [i32::MIN, 3, 3, 7]);
/// ```
#[inline]
pub fn exclusive_scan_inplace<'a, T, O, B>(
    policy: &Policy<B>,
    data: impl Into<SpanMut<'a, T>>,
    op: O,
) -> Result<()>
where
    T: Clone + Send + Sync + 'a,
    O: Operator<T> + Sync,
    B: Backend,
{
    let init = op.identity();
    exclusive_scan_inplace_with_init(policy, data, op, init)
}

/// Exclusive scan of `data` in place, seeded with `init`.
///
/// # Errors
///
/// Propagates operator failures; `data` is then partially scanned.
pub fn exclusive_scan_inplace_with_init<'a, T, O, B>(
    policy: &Policy<B>,
    data: impl Into<SpanMut<'a, T>>,
    op: O,
    init: T,
) -> Result<()>
where
    T: Clone + Send + Sync + 'a,
    O: Operator<T> + Sync,
    B: Backend,
{
    let mut data = data.into();
    run_inplace(policy, ScanKind::Exclusive, data.as_mut_slice(), &op, init)
}

/// Running sum, the inclusive scan under [`Plus`].
///
/// # Errors
///
/// Returns [`Error::LengthMismatch`] if the views differ in length.
#[inline]
pub fn inclusive_sum<'a, T, B>(
    policy: &Policy<B>,
    input: impl Into<Span<'a, T>>,
    output: impl Into<SpanMut<'a, T>>,
) -> Result<()>
where
    T: Clone + Send + Sync + Zero + 'a,
    B: Backend,
{
    inclusive_scan(policy, input, output, Plus)
}

/// Sum of all prior elements, the exclusive scan under [`Plus`].
///
/// # Errors
///
/// Returns [`Error::LengthMismatch`] if the views differ in length.
#[inline]
pub fn exclusive_sum<'a, T, B>(
    policy: &Policy<B>,
    input: impl Into<Span<'a, T>>,
    output: impl Into<SpanMut<'a, T>>,
) -> Result<()>
where
    T: Clone + Send + Sync + Zero + 'a,
    B: Backend,
{
    exclusive_scan(policy, input, output, Plus)
}

fn run<T, O, B>(
    policy: &Policy<B>,
    kind: ScanKind,
    input: &[T],
    output: &mut [T],
    op: &O,
    init: T,
) -> Result<()>
where
    T: Clone + Send + Sync,
    O: Operator<T> + Sync,
    B: Backend,
{
    if input.len() != output.len() {
        return Err(Error::LengthMismatch {
            input: input.len(),
            output: output.len(),
        });
    }
    if input.is_empty() {
        return Ok(());
    }

    if let Policy::Blocked(parallel) = policy {
        let layout = parallel.layout(input.len());
        if layout.block_count() > 1 {
            log::debug!(
                "blocked {kind:?} scan over {} elements in {} blocks of {}",
                layout.len(),
                layout.block_count(),
                layout.block_len()
            );
            return blocked::scan(
                parallel.backend(),
                &layout,
                kind,
                input,
                output,
                op,
                init,
            );
        }
    }

    log::debug!("sequential {kind:?} scan over {} elements", input.len());
    kind.scan(input, output, op, init).map(drop)
}

fn run_inplace<T, O, B>(
    policy: &Policy<B>,
    kind: ScanKind,
    data: &mut [T],
    op: &O,
    init: T,
) -> Result<()>
where
    T: Clone + Send + Sync,
    O: Operator<T> + Sync,
    B: Backend,
{
    if data.is_empty() {
        return Ok(());
    }

    if let Policy::Blocked(parallel) = policy {
        let layout = parallel.layout(data.len());
        if layout.block_count() > 1 {
            log::debug!(
                "blocked in-place {kind:?} scan over {} elements in {} blocks \
                 of {}",
                layout.len(),
                layout.block_count(),
                layout.block_len()
            );
            return blocked::scan_inplace(
                parallel.backend(),
                &layout,
                kind,
                data,
                op,
                init,
            );
        }
    }

    log::debug!(
        "sequential in-place {kind:?} scan over {} elements",
        data.len()
    );
    kind.scan_inplace(data, op, init).map(drop)
}
