//! Chain builder: fold an ordered sequence of stages into one pipeline.

use log::debug;

use crate::pipeline::connect::connect;
use crate::pipeline::registry::WorkerSet;
use crate::queue::{CapacityPolicy, Consumer, Producer, Queue};
use crate::stage::Processor;
use crate::types::Pipeline;

/// Builds a multi-stage pipeline, one worker thread per stage.
///
/// Starts from the trivial pipeline (entry and exit on a single queue, no
/// workers) and grows it one stage at a time: each [`stage`](Self::stage)
/// call inserts a fresh queue after the current exit and connects a worker
/// between them. [`finish`](Self::finish) ends the chain;
/// [`truncate`](Self::truncate) ends it without a sink, releasing the exit so
/// the last stage's output is discarded.
///
/// A chain stage is single-threaded and therefore order-preserving end to
/// end. For fan-out parallelism inside a chain use
/// [`fan_out`](Self::fan_out), which trades global ordering for throughput on
/// that link.
///
/// ```ignore
/// let (pipe, mut workers) = PipelineBuilder::new(CapacityPolicy::Unbounded)
///     .stage(map(|n: u64| n * 2))
///     .stage(filter(|n| n % 3 != 0))
///     .finish();
/// pipe.entry.push_all(0..100);
/// let (entry, exit) = pipe.into_parts();
/// drop(entry);
/// while let Some(n) = exit.as_ref().unwrap().pop() { /* ... */ }
/// workers.join_all()?;
/// ```
pub struct PipelineBuilder<I, O>
where
    I: Send + 'static,
    O: Send + 'static,
{
    entry: Producer<I>,
    exit: Consumer<O>,
    workers: WorkerSet,
    policy: CapacityPolicy,
}

impl<I> PipelineBuilder<I, I>
where
    I: Send + 'static,
{
    /// The trivial pipeline: one queue under `policy`, entry producer and
    /// exit consumer on it, no workers. `policy` is also the default for
    /// every queue added later by [`stage`](Self::stage).
    pub fn new(policy: CapacityPolicy) -> Self {
        let first = Queue::new(policy);
        Self {
            entry: first.producer(),
            exit: first.consumer(),
            workers: WorkerSet::new(),
            policy,
        }
    }
}

impl<I, O> PipelineBuilder<I, O>
where
    I: Send + 'static,
    O: Send + 'static,
{
    /// Append one stage under the builder's default capacity policy.
    pub fn stage<P>(self, processor: P) -> PipelineBuilder<I, P::Out>
    where
        P: Processor<In = O>,
    {
        let policy = self.policy;
        self.stage_with(policy, processor)
    }

    /// Append one stage whose output queue uses `policy` instead of the
    /// builder default. The current exit becomes the stage's input; the new
    /// queue's consumer becomes the chain's exit.
    pub fn stage_with<P>(mut self, policy: CapacityPolicy, processor: P) -> PipelineBuilder<I, P::Out>
    where
        P: Processor<In = O>,
    {
        let next = Queue::new(policy);
        self.workers.push(connect(self.exit, processor, next.producer()));
        PipelineBuilder {
            entry: self.entry,
            exit: next.consumer(),
            workers: self.workers,
            policy: self.policy,
        }
    }

    /// Append a fan-out link: `instances` competing workers share the current
    /// exit queue and merge into one fresh output queue, as in
    /// [`parallel`](crate::pipeline::parallel). Order across this link is not
    /// preserved. With `instances == 0` the current exit is simply released
    /// and every stage downstream of this link sees an immediately exhausted
    /// input.
    pub fn fan_out<P, F>(mut self, instances: usize, mut factory: F) -> PipelineBuilder<I, P::Out>
    where
        P: Processor<In = O>,
        F: FnMut(usize) -> P,
    {
        let next = Queue::new(self.policy);
        for idx in 0..instances {
            self.workers
                .push(connect(self.exit.duplicate(), factory(idx), next.producer()));
        }
        drop(self.exit);
        debug!("fan_out: spawned {} workers on one link", instances);
        PipelineBuilder {
            entry: self.entry,
            exit: next.consumer(),
            workers: self.workers,
            policy: self.policy,
        }
    }

    /// End the chain. With zero stages this is the trivial pipeline and the
    /// returned set is empty.
    pub fn finish(self) -> (Pipeline<I, O>, WorkerSet) {
        debug!("pipeline: assembled with {} workers", self.workers.len());
        (Pipeline::new(self.entry, Some(self.exit)), self.workers)
    }

    /// End the chain without a sink: the current exit consumer is released
    /// and the pipeline's exit is absent. The last stage keeps running, but
    /// everything it pushes is discarded once no consumer remains; nothing
    /// further can be chained and no extra worker is spawned.
    pub fn truncate(self) -> (Pipeline<I, O>, WorkerSet) {
        drop(self.exit);
        debug!(
            "pipeline: truncated, assembled with {} workers",
            self.workers.len()
        );
        (Pipeline::new(self.entry, None), self.workers)
    }
}
