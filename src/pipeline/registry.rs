//! Worker registry: ordered bookkeeping of spawned stage workers, joined in one call.

use log::debug;

use crate::Result;
use crate::pipeline::connect::Worker;

/// Ordered, growable collection of [`Worker`] handles.
///
/// Owned by whoever assembled the pipeline; join it after releasing the
/// pipeline's entry producer, otherwise the join blocks forever waiting for
/// end-of-stream. Dropping a non-empty set detaches the remaining workers.
#[derive(Default)]
pub struct WorkerSet {
    workers: Vec<Worker>,
}

impl WorkerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one more worker at the end of the set.
    pub fn push(&mut self, worker: Worker) {
        self.workers.push(worker);
    }

    /// Append every worker of `other`, preserving order.
    pub fn merge(&mut self, mut other: WorkerSet) {
        self.workers.append(&mut other.workers);
    }

    pub fn len(&self) -> usize {
        self.workers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    /// Join every recorded worker in order, draining the set. Once this
    /// returns, every worker has drained its input, flushed exactly once,
    /// and released its queue endpoints.
    ///
    /// All workers are joined even when one of them panicked; the first
    /// failure is reported after the rest have been joined. Calling again on
    /// the emptied set is a no-op.
    pub fn join_all(&mut self) -> Result<()> {
        let count = self.workers.len();
        let mut first_err = None;
        for worker in self.workers.drain(..) {
            if let Err(err) = worker.join()
                && first_err.is_none()
            {
                first_err = Some(err);
            }
        }
        if count > 0 {
            debug!("joined {} workers", count);
        }
        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Explicit fire-and-forget for the whole set: the workers keep running
    /// and release their own resources, but can no longer be joined.
    pub fn detach(mut self) {
        debug!("detaching {} workers", self.workers.len());
        self.workers.clear();
    }
}
