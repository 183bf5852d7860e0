//! Public types for the conveyr API.

use crate::queue::{Consumer, Producer};

/// An assembled chain or pool of stages, seen from the outside: one entry
/// producer feeding the first queue and at most one exit consumer draining
/// the last.
///
/// `exit` is `None` when the pipeline was deliberately truncated (no sink
/// attached). To tear a pipeline down, release `entry` (and any duplicates
/// you made of it); every worker then observes end-of-stream in turn, flushes
/// once, and exits. `Pipeline` itself owns no threads; join those through the
/// [`WorkerSet`](crate::pipeline::WorkerSet) returned alongside it.
pub struct Pipeline<I, O> {
    pub entry: Producer<I>,
    pub exit: Option<Consumer<O>>,
    /// Keeps a zero-worker pool's input queue open so feeding it blocks at
    /// capacity instead of failing. `None` for every other pipeline.
    pub(crate) parked_input: Option<Consumer<I>>,
}

impl<I, O> Pipeline<I, O> {
    pub(crate) fn new(entry: Producer<I>, exit: Option<Consumer<O>>) -> Self {
        Self {
            entry,
            exit,
            parked_input: None,
        }
    }

    /// Split into entry and exit so they can be moved to different owners,
    /// e.g. a feeding thread and a draining thread.
    ///
    /// For a zero-worker pool this releases the parked input reference, so a
    /// split pipeline's entry reports disconnection instead of blocking.
    pub fn into_parts(self) -> (Producer<I>, Option<Consumer<O>>) {
        (self.entry, self.exit)
    }
}
