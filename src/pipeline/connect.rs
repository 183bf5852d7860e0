//! Stage connector: one consumer, one processor, one producer, one worker thread.

use log::{debug, trace};
use std::thread::{self, JoinHandle};

use crate::queue::{Consumer, Producer};
use crate::stage::Processor;
use crate::utils::config::DEFAULT_BATCH_SIZE;

/// Bind `input` and `output` to `processor` on a dedicated worker thread.
///
/// The worker pops batches of up to [`DEFAULT_BATCH_SIZE`] elements and hands
/// each to the processor until the input is permanently exhausted (every
/// producer handle on it released and the queue drained). It then calls
/// `flush` exactly once, releases both endpoints, and exits. Both handles are
/// owned by the worker from here on; the caller keeps no path to them.
///
/// Dropping the returned [`Worker`] detaches the thread (fire-and-forget):
/// it still drains, flushes, and releases its endpoints on its own, it just
/// can no longer be joined.
pub fn connect<P>(input: Consumer<P::In>, processor: P, output: Producer<P::Out>) -> Worker
where
    P: Processor,
{
    let handle = thread::spawn(move || stage_loop(input, processor, output));
    Worker { handle }
}

/// The drain/transform/flush loop run by every stage worker.
fn stage_loop<P>(input: Consumer<P::In>, mut processor: P, output: Producer<P::Out>)
where
    P: Processor,
{
    loop {
        let batch = input.pop_batch(DEFAULT_BATCH_SIZE);
        if batch.is_empty() {
            break;
        }
        trace!("stage worker: batch of {}", batch.len());
        processor.process(batch, &output);
    }
    debug!("stage worker: input exhausted, flushing");
    processor.flush();
    drop(input);
    drop(output);
}

/// Handle to one spawned stage worker.
///
/// There is no cancellation signal; a worker stops only by exhausting its
/// input. Join after releasing every producer handle feeding it, or the join
/// blocks indefinitely.
pub struct Worker {
    handle: JoinHandle<()>,
}

impl Worker {
    /// Block until the worker has drained, flushed, and released its
    /// endpoints. A panic inside the processor surfaces here as an error;
    /// the endpoints are still released either way, since the worker owned
    /// them by value.
    pub fn join(self) -> crate::Result<()> {
        self.handle
            .join()
            .map_err(|_| anyhow::anyhow!("stage worker panicked"))
    }

    /// Explicit fire-and-forget: same as dropping the handle.
    pub fn detach(self) {
        drop(self.handle);
    }
}
