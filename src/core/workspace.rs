//! Reusable per-worker scratch space for minimizer extraction.

use std::collections::{HashSet, VecDeque};

// Typical window size range
const DEFAULT_DEQUE_CAPACITY: usize = 128;
// Conservative estimate
const ESTIMATED_MINIMIZERS_PER_SEQUENCE: usize = 32;

/// Scratch buffers owned by a single minimizer worker.
///
/// Reused across records so the deque, the per-sequence dedup set and the
/// output buffer are allocated once per worker rather than once per record.
pub struct MinimizerWorkspace {
    pub(crate) queue: VecDeque<(usize, u64)>,
    pub(crate) seen: HashSet<u64>,
    /// Unique minimizers of the most recently processed record.
    pub buffer: Vec<u64>,
}

impl MinimizerWorkspace {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::with_capacity(DEFAULT_DEQUE_CAPACITY),
            seen: HashSet::with_capacity(ESTIMATED_MINIMIZERS_PER_SEQUENCE),
            buffer: Vec::with_capacity(ESTIMATED_MINIMIZERS_PER_SEQUENCE),
        }
    }
}

impl Default for MinimizerWorkspace {
    fn default() -> Self {
        Self::new()
    }
}
