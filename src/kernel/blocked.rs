//! Three-phase blocked scan.
//!
//! 1. Every block is scanned locally and in parallel. Block 0 is seeded
//!    with the caller's seed, the others with the identity, and each block
//!    reports its aggregate (its final accumulator).
//! 2. The aggregates are exclusively scanned on a single worker, giving
//!    every block the fold of all blocks before it.
//! 3. Every block except the first combines its offset into each of its
//!    outputs, again in parallel.
//!
//! Each phase returns only after all of its units have finished, which is
//! the barrier the next phase relies on. Blocks are folded in index order
//! and operands are never swapped, so non-commutative operators give the
//! same result as the sequential kernel. Floating-point results may differ
//! in the last bits because the grouping of additions changes.

use crate::{
    backend::Backend,
    error::Result,
    kernel::{ScanKind, sequential},
    operator::Operator,
    policy::BlockLayout,
};

/// Scans `input` into `output` block by block.
///
/// `layout` must cover exactly `input.len()` elements, which must equal
/// `output.len()`.
///
/// # Errors
///
/// Propagates the first operator failure. Output contents are unspecified
/// after a failure.
pub fn scan<T, O, B>(
    backend: &B,
    layout: &BlockLayout,
    kind: ScanKind,
    input: &[T],
    output: &mut [T],
    op: &O,
    seed: T,
) -> Result<()>
where
    T: Clone + Send + Sync,
    O: Operator<T> + Sync,
    B: Backend,
{
    debug_assert_eq!(input.len(), output.len(), "scan views differ in length");
    debug_assert_eq!(layout.len(), input.len(), "layout does not fit input");

    let block_len = layout.block_len();
    let mut seed = Some(seed);
    let units: Vec<_> = input
        .chunks(block_len)
        .zip(output.chunks_mut(block_len))
        .map(|(src, dst)| {
            (src, dst, seed.take().unwrap_or_else(|| op.identity()))
        })
        .collect();

    log::trace!("local pass over {} blocks", units.len());
    let aggregates = backend
        .run_blocks(units, |(src, dst, seed)| kind.scan(src, dst, op, seed))?;

    let offsets = block_offsets(backend, aggregates, op)?;
    fix_up(backend, output, block_len, offsets, op)
}

/// Scans `data` in place block by block.
///
/// `layout` must cover exactly `data.len()` elements.
///
/// # Errors
///
/// Propagates the first operator failure. Contents of `data` are
/// unspecified after a failure.
pub fn scan_inplace<T, O, B>(
    backend: &B,
    layout: &BlockLayout,
    kind: ScanKind,
    data: &mut [T],
    op: &O,
    seed: T,
) -> Result<()>
where
    T: Clone + Send + Sync,
    O: Operator<T> + Sync,
    B: Backend,
{
    debug_assert_eq!(layout.len(), data.len(), "layout does not fit input");

    let block_len = layout.block_len();
    let mut seed = Some(seed);
    let units: Vec<_> = data
        .chunks_mut(block_len)
        .map(|block| (block, seed.take().unwrap_or_else(|| op.identity())))
        .collect();

    log::trace!("local in-place pass over {} blocks", units.len());
    let aggregates = backend
        .run_blocks(units, |(block, seed)| kind.scan_inplace(block, op, seed))?;

    let offsets = block_offsets(backend, aggregates, op)?;
    fix_up(backend, data, block_len, offsets, op)
}

/// Turns block aggregates into block offsets with an exclusive scan.
fn block_offsets<T, O, B>(
    backend: &B,
    mut aggregates: Vec<T>,
    op: &O,
) -> Result<Vec<T>>
where
    T: Clone,
    O: Operator<T>,
    B: Backend,
{
    log::trace!("aggregate pass over {} blocks", aggregates.len());
    let _ = backend.run_single(|| {
        sequential::exclusive_inplace(&mut aggregates, op, op.identity())
    })?;

    Ok(aggregates)
}

/// Combines each block's offset into its outputs. Block 0 already carries
/// the seed and is left alone.
fn fix_up<T, O, B>(
    backend: &B,
    output: &mut [T],
    block_len: usize,
    offsets: Vec<T>,
    op: &O,
) -> Result<()>
where
    T: Clone + Send + Sync,
    O: Operator<T> + Sync,
    B: Backend,
{
    let units: Vec<_> = output
        .chunks_mut(block_len)
        .zip(offsets)
        .skip(1)
        .collect();

    log::trace!("fix-up pass over {} blocks", units.len());
    let _ = backend.run_blocks(units, |(block, offset)| {
        for slot in block.iter_mut() {
            *slot = op.combine(offset.clone(), slot.clone())?;
        }
        Ok(())
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::{
        backend::serial::SerialBackend,
        error::Error,
        kernel::{ScanKind, blocked, sequential},
        operator::{CheckedPlus, Maximum, Plus, from_fn},
        policy::BlockLayout,
    };

    fn blocked_copy(kind: ScanKind, input: &[i64], blocks: usize) -> Vec<i64> {
        let backend = SerialBackend::with_workers(blocks);
        let layout = BlockLayout::plan(input.len(), blocks, 1);
        let mut output = vec![0; input.len()];

        blocked::scan(&backend, &layout, kind, input, &mut output, &Plus, 0)
            .unwrap();

        output
    }

    #[test]
    fn blocked_inclusive_matches_sequential() {
        let input: Vec<i64> = (0..37).map(|v| v * 3 - 50).collect();
        let mut expected = vec![0; input.len()];
        let _ = sequential::inclusive(&input, &mut expected, &Plus, 0).unwrap();

        for blocks in 1..=9 {
            assert_eq!(
                blocked_copy(ScanKind::Inclusive, &input, blocks),
                expected,
                "{blocks} blocks"
            );
        }
    }

    #[test]
    fn blocked_exclusive_matches_sequential() {
        let input: Vec<i64> = (0..37).map(|v| (v * 7) % 11).collect();
        let mut expected = vec![0; input.len()];
        let _ = sequential::exclusive(&input, &mut expected, &Plus, 0).unwrap();

        for blocks in 1..=9 {
            assert_eq!(
                blocked_copy(ScanKind::Exclusive, &input, blocks),
                expected,
                "{blocks} blocks"
            );
        }
    }

    #[test]
    fn blocked_inplace_seed_lands_in_first_block_only() {
        let backend = SerialBackend::with_workers(3);
        let mut data = vec![1_i32; 9];
        let layout = BlockLayout::plan(data.len(), 3, 1);

        blocked::scan_inplace(
            &backend,
            &layout,
            ScanKind::Exclusive,
            &mut data,
            &Plus,
            100,
        )
        .unwrap();

        assert_eq!(data, vec![100, 101, 102, 103, 104, 105, 106, 107, 108]);
    }

    #[test]
    fn blocked_keeps_operand_order() {
        let concat = from_fn(String::new(), |a: String, b: String| a + &b);
        let input: Vec<String> = "abcdefg".chars().map(String::from).collect();
        let backend = SerialBackend::with_workers(3);
        let layout = BlockLayout::plan(input.len(), 3, 1);
        let mut output = vec![String::new(); input.len()];

        blocked::scan(
            &backend,
            &layout,
            ScanKind::Inclusive,
            &input,
            &mut output,
            &concat,
            String::new(),
        )
        .unwrap();

        assert_eq!(
            output,
            ["a", "ab", "abc", "abcd", "abcde", "abcdef", "abcdefg"]
        );
    }

    #[test]
    fn blocked_exclusive_max_starts_with_identity() {
        let backend = SerialBackend::with_workers(4);
        let mut data = vec![4, -3, 8, 2, 9, 1, 0, 12];
        let layout = BlockLayout::plan(data.len(), 4, 1);

        blocked::scan_inplace(
            &backend,
            &layout,
            ScanKind::Exclusive,
            &mut data,
            &Maximum,
            i32::MIN,
        )
        .unwrap();

        assert_eq!(data, vec![i32::MIN, 4, 4, 8, 8, 9, 9, 9]);
    }

    #[test]
    fn overflow_in_a_later_block_is_reported() {
        let backend = SerialBackend::with_workers(2);
        let input = [1_u8, 1, 1, 1, 250, 10];
        let layout = BlockLayout::plan(input.len(), 2, 1);
        let mut output = [0; 6];

        let result = blocked::scan(
            &backend,
            &layout,
            ScanKind::Inclusive,
            &input,
            &mut output,
            &CheckedPlus,
            0,
        );

        assert!(matches!(result, Err(Error::Overflow { .. })));
    }

    #[test]
    fn overflow_in_fix_up_is_reported() {
        let backend = SerialBackend::with_workers(2);
        let input = [200_u8, 50, 5, 1];
        let layout = BlockLayout::plan(input.len(), 2, 1);
        let mut output = [0; 4];

        let result = blocked::scan(
            &backend,
            &layout,
            ScanKind::Inclusive,
            &input,
            &mut output,
            &CheckedPlus,
            0,
        );

        assert!(matches!(result, Err(Error::Overflow { .. })));
    }
}
