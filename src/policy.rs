//! Execution policies and the block-partitioning heuristic.

use core::ops::Range;

use crate::backend::{Backend, SelectedBackend};

/// Minimum number of elements a block holds before the blocked scan
/// considers splitting further.
pub const DEFAULT_MIN_BLOCK_LEN: usize = 1024;

/// Selects which scan kernel runs.
///
/// `Sequential` always runs the single-threaded kernel. `Blocked` runs the
/// three-phase kernel on its backend whenever the input is large enough to
/// form more than one block, and falls back to the sequential kernel
/// otherwise.
#[derive(Debug, Clone)]
pub enum Policy<B = SelectedBackend> {
    /// Single-threaded left-to-right scan.
    Sequential,
    /// Three-phase blocked scan.
    Blocked(BlockedPolicy<B>),
}

impl Policy {
    /// The sequential policy.
    #[inline]
    #[must_use]
    pub const fn seq() -> Self {
        Self::Sequential
    }

    /// A blocked policy on the feature-selected default backend.
    #[inline]
    #[must_use]
    pub fn par() -> Self {
        Self::Blocked(BlockedPolicy::new(SelectedBackend::default()))
    }
}

impl<B> Policy<B>
where
    B: Backend,
{
    /// A blocked policy on `backend`.
    #[inline]
    #[must_use]
    pub const fn blocked(backend: B) -> Self {
        Self::Blocked(BlockedPolicy::new(backend))
    }

    /// Returns how the policy would partition `len` elements.
    ///
    /// The sequential policy always yields a single block.
    #[must_use]
    pub fn layout(&self, len: usize) -> BlockLayout {
        match self {
            Self::Sequential => BlockLayout::single(len),
            Self::Blocked(blocked) => blocked.layout(len),
        }
    }
}

/// Parameters of the blocked scan.
#[derive(Debug, Clone)]
pub struct BlockedPolicy<B> {
    backend: B,
    min_block_len: usize,
}

impl<B> BlockedPolicy<B>
where
    B: Backend,
{
    /// Creates a blocked policy with [`DEFAULT_MIN_BLOCK_LEN`].
    #[inline]
    #[must_use]
    pub const fn new(backend: B) -> Self {
        Self {
            backend,
            min_block_len: DEFAULT_MIN_BLOCK_LEN,
        }
    }

    /// Sets the smallest block the heuristic may create. Zero is treated
    /// as one.
    #[inline]
    #[must_use]
    pub fn with_min_block_len(mut self, min_block_len: usize) -> Self {
        self.min_block_len = min_block_len.max(1);
        self
    }

    /// Returns the backend that runs the blocks.
    #[inline]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns the smallest block the heuristic may create.
    #[inline]
    #[must_use]
    pub const fn min_block_len(&self) -> usize {
        self.min_block_len
    }

    /// Partitions `len` elements for the backend's current worker count.
    #[inline]
    #[must_use]
    pub fn layout(&self, len: usize) -> BlockLayout {
        BlockLayout::plan(len, self.backend.workers(), self.min_block_len)
    }
}

impl<B> From<BlockedPolicy<B>> for Policy<B> {
    #[inline]
    fn from(value: BlockedPolicy<B>) -> Self {
        Self::Blocked(value)
    }
}

/// A partition of `[0, len)` into contiguous, equally sized blocks.
///
/// Every block except possibly the last holds exactly `block_len()`
/// elements and no block is empty. The partition depends only on the
/// length and the planning parameters, never on the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockLayout {
    len: usize,
    block_len: usize,
    block_count: usize,
}

impl BlockLayout {
    /// Plans blocks for `len` elements.
    ///
    /// The block count is `min(workers, ceil(len / min_block_len))`, at
    /// least one. Elements are then spread evenly, which may round the
    /// count down again: 5 elements over 4 workers give blocks of 2, so
    /// only 3 blocks are formed.
    #[must_use]
    pub fn plan(len: usize, workers: usize, min_block_len: usize) -> Self {
        let min_block_len = min_block_len.max(1);
        let wanted = workers.min(len.div_ceil(min_block_len)).max(1);
        let block_len = len.div_ceil(wanted).max(1);

        Self {
            len,
            block_len,
            block_count: len.div_ceil(block_len).max(1),
        }
    }

    /// A layout with one block covering everything.
    #[inline]
    #[must_use]
    pub const fn single(len: usize) -> Self {
        Self {
            len,
            block_len: if len == 0 { 1 } else { len },
            block_count: 1,
        }
    }

    /// Total number of elements covered.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the layout covers no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Length of every block but the last.
    #[inline]
    #[must_use]
    pub const fn block_len(&self) -> usize {
        self.block_len
    }

    /// Number of blocks.
    #[inline]
    #[must_use]
    pub const fn block_count(&self) -> usize {
        self.block_count
    }

    /// Returns the descriptor of block `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`BlockLayout::block_count()`].
    #[must_use]
    pub fn block(&self, index: usize) -> Block {
        assert!(
            index < self.block_count,
            "block {index} out of range for {} blocks",
            self.block_count
        );
        let start = index * self.block_len;

        Block {
            index,
            range: start..(start + self.block_len).min(self.len),
        }
    }

    /// Iterates over all block descriptors in index order.
    pub fn blocks(&self) -> impl Iterator<Item = Block> {
        (0..self.block_count).map(|index| self.block(index))
    }
}

/// One contiguous slice of the scanned range.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Block {
    /// Position of the block, counted from the front.
    pub index: usize,
    /// Element range `[start, end)` covered by the block.
    pub range: Range<usize>,
}
