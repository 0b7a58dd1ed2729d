//! Single-threaded scan kernels.
//!
//! These are the correctness oracle for every other kernel: one
//! accumulator, seeded with the caller's value and folded strictly left to
//! right. They keep no state outside their arguments and can run
//! concurrently on disjoint slices.

use core::mem;

use crate::{error::Result, operator::Operator};

/// Inclusive scan of `input` into `output`, returning the final
/// accumulator.
///
/// `input` and `output` must have the same length.
///
/// # Errors
///
/// Propagates the first operator failure. Outputs before the failing
/// position have been written, the rest are untouched.
pub fn inclusive<T, O>(
    input: &[T],
    output: &mut [T],
    op: &O,
    seed: T,
) -> Result<T>
where
    T: Clone,
    O: Operator<T>,
{
    debug_assert_eq!(input.len(), output.len(), "scan views differ in length");

    let mut acc = seed;
    for (item, slot) in input.iter().zip(output.iter_mut()) {
        acc = op.combine(acc, item.clone())?;
        slot.clone_from(&acc);
    }

    Ok(acc)
}

/// Exclusive scan of `input` into `output`, returning the final
/// accumulator.
///
/// `input` and `output` must have the same length.
///
/// # Errors
///
/// Propagates the first operator failure.
pub fn exclusive<T, O>(
    input: &[T],
    output: &mut [T],
    op: &O,
    seed: T,
) -> Result<T>
where
    T: Clone,
    O: Operator<T>,
{
    debug_assert_eq!(input.len(), output.len(), "scan views differ in length");

    let mut acc = seed;
    for (item, slot) in input.iter().zip(output.iter_mut()) {
        slot.clone_from(&acc);
        acc = op.combine(acc, item.clone())?;
    }

    Ok(acc)
}

/// Inclusive scan of `data` in place, returning the final accumulator.
///
/// # Errors
///
/// Propagates the first operator failure.
pub fn inclusive_inplace<T, O>(data: &mut [T], op: &O, seed: T) -> Result<T>
where
    T: Clone,
    O: Operator<T>,
{
    let mut acc = seed;
    for slot in data {
        acc = op.combine(acc, slot.clone())?;
        slot.clone_from(&acc);
    }

    Ok(acc)
}

/// Exclusive scan of `data` in place, returning the final accumulator.
///
/// # Errors
///
/// Propagates the first operator failure. The failing slot already holds
/// its exclusive prefix.
pub fn exclusive_inplace<T, O>(data: &mut [T], op: &O, seed: T) -> Result<T>
where
    T: Clone,
    O: Operator<T>,
{
    let mut acc = seed;
    for slot in data {
        // read before overwrite
        let item = mem::replace(slot, acc.clone());
        acc = op.combine(acc, item)?;
    }

    Ok(acc)
}

#[cfg(test)]
mod tests {
    use crate::{
        error::Error,
        kernel::sequential::{
            exclusive, exclusive_inplace, inclusive, inclusive_inplace,
        },
        operator::{CheckedPlus, Maximum, Minimum, Plus, from_fn},
    };

    #[test]
    fn inclusive_plus_is_running_sum() {
        let input = [3, 1, 4, 1, 5];
        let mut output = [0; 5];

        let total = inclusive(&input, &mut output, &Plus, 0).unwrap();

        assert_eq!(output, [3, 4, 8, 9, 14]);
        assert_eq!(total, 14);
    }

    #[test]
    fn exclusive_plus_shifts_right() {
        let input = [3, 1, 4, 1, 5];
        let mut output = [0; 5];

        let total = exclusive(&input, &mut output, &Plus, 0).unwrap();

        assert_eq!(output, [0, 3, 4, 8, 9]);
        assert_eq!(total, 14);
    }

    #[test]
    fn seed_is_folded_first() {
        let input = [1, 2];
        let mut output = [0; 2];

        let _ = inclusive(&input, &mut output, &Plus, 10).unwrap();
        assert_eq!(output, [11, 13]);

        let _ = exclusive(&input, &mut output, &Plus, 10).unwrap();
        assert_eq!(output, [10, 11]);
    }

    #[test]
    fn empty_input_returns_seed() {
        let mut output: [i32; 0] = [];

        assert_eq!(inclusive(&[], &mut output, &Plus, 7).unwrap(), 7);
        assert_eq!(exclusive_inplace(&mut output, &Plus, 7).unwrap(), 7);
    }

    #[test]
    fn inplace_matches_copy() {
        let input = [5, -2, 9, 0, -7, 3];
        let mut copied = [0; 6];
        let mut in_place = input;

        let _ = inclusive(&input, &mut copied, &Minimum, i32::MAX).unwrap();
        let _ = inclusive_inplace(&mut in_place, &Minimum, i32::MAX).unwrap();
        assert_eq!(copied, in_place);

        let mut in_place = input;
        let _ = exclusive(&input, &mut copied, &Maximum, i32::MIN).unwrap();
        let _ = exclusive_inplace(&mut in_place, &Maximum, i32::MIN).unwrap();
        assert_eq!(copied, in_place);
        assert_eq!(in_place, [i32::MIN, 5, 5, 9, 9, 9]);
    }

    #[test]
    fn operand_order_is_left_to_right() {
        let concat = from_fn(String::new(), |a: String, b: String| a + &b);
        let mut data: Vec<String> =
            ["a", "b", "c"].iter().map(|&s| s.to_owned()).collect();

        let total =
            inclusive_inplace(&mut data, &concat, String::new()).unwrap();

        assert_eq!(data, ["a", "ab", "abc"]);
        assert_eq!(total, "abc");
    }

    #[test]
    fn failure_stops_the_scan() {
        let input = [1, i8::MAX, 1, 1];
        let mut output = [0_i8; 4];

        let result = inclusive(&input, &mut output, &CheckedPlus, 0);

        assert!(matches!(result, Err(Error::Overflow { .. })));
        assert_eq!(output, [1, 0, 0, 0]);
    }
}
