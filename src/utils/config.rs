//! Tuning constants and defaults in one place.

use std::num::NonZeroUsize;
use std::thread::available_parallelism;

/// Max elements a stage worker pops per batch. A batch is a count of
/// elements, not bytes; the per-element size is whatever the queue's element
/// type occupies. Larger batches amortize channel wakeups, smaller ones
/// lower latency through lightly loaded stages.
pub const DEFAULT_BATCH_SIZE: usize = 128;

/// Worker count for a fan-out pool when the caller has no better number:
/// available parallelism, floor of 1.
pub fn suggested_workers() -> usize {
    available_parallelism().map_or(1, NonZeroUsize::get)
}
