//! Fan-out worker pool: N identical stages competing on one shared input queue.

use log::debug;

use crate::pipeline::connect::connect;
use crate::pipeline::registry::WorkerSet;
use crate::queue::{CapacityPolicy, Queue};
use crate::stage::Processor;
use crate::types::Pipeline;

/// Spawn `instances` copies of a stage sharing one input and one output queue.
///
/// `factory` is called once per worker with the worker index and builds that
/// worker's processor, so per-worker state is possible; stateless pools just
/// return the same thing every time. Elements are load-balanced across the
/// workers by the queue's own pop fairness: no element reaches more than one
/// worker, per-worker FIFO order is preserved, and the merged output order
/// across workers is unspecified.
///
/// Both internal queues are created under `policy`. The returned
/// [`Pipeline`]'s entry feeds the shared input queue and its exit drains the
/// shared output queue. Every worker observes end-of-stream independently
/// once the entry producer (and any duplicates) is released and the input
/// drains; each then flushes its own processor before exiting.
///
/// Dropping the returned [`WorkerSet`] detaches all workers. They still
/// drain, flush, and release their endpoints on their own, but nothing can
/// join them afterwards.
///
/// With `instances == 0` no worker ever drains the input queue; the pipeline
/// keeps the queue open internally, so feeding a bounded pool blocks once the
/// capacity is reached rather than failing. The output queue never receives a
/// producer, so the exit reports exhaustion immediately.
pub fn parallel<P, F>(
    instances: usize,
    policy: CapacityPolicy,
    mut factory: F,
) -> (Pipeline<P::In, P::Out>, WorkerSet)
where
    P: Processor,
    F: FnMut(usize) -> P,
{
    let input = Queue::new(policy);
    let output = Queue::new(policy);

    let mut workers = WorkerSet::new();
    for idx in 0..instances {
        workers.push(connect(input.consumer(), factory(idx), output.producer()));
    }
    debug!("parallel: spawned {} workers", instances);

    let mut pipeline = Pipeline::new(input.producer(), Some(output.consumer()));
    if instances == 0 {
        pipeline.parked_input = Some(input.consumer());
    }

    // Queues drop here: the pool's own direct references are released and
    // lifetime rests entirely on the handles held by workers and pipeline.
    (pipeline, workers)
}
