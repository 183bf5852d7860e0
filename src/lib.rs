//! Conveyr: thread-backed pipeline assembly over bounded channels.
//!
//! The building block is a [`Queue`](queue::Queue): a reference-counted,
//! multi-producer/multi-consumer channel of fixed element type, accessed
//! through move-only [`Producer`](queue::Producer) and
//! [`Consumer`](queue::Consumer) handles. On top of that this crate provides
//! the orchestration layer:
//!
//! - [`connect`](pipeline::connect()): bind one consumer, one
//!   [`Processor`](stage::Processor), and one producer to a dedicated worker
//!   thread.
//! - [`parallel`](pipeline::parallel()): a fan-out pool of N identical stages
//!   competing on one shared input queue and merging into one output queue.
//! - [`PipelineBuilder`](pipeline::PipelineBuilder): chain any number of
//!   stages end-to-end, each on its own worker thread.
//! - [`WorkerSet`](pipeline::WorkerSet): join every spawned worker in one
//!   call once the pipeline has drained.
//!
//! Workers stop by exhaustion, not by signal: drop the pipeline's entry
//! producer (and any duplicates), and every downstream stage observes
//! end-of-stream, flushes once, releases its endpoints, and exits.

pub mod pipeline;
pub mod queue;
pub mod stage;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use pipeline::{PipelineBuilder, Worker, WorkerSet, connect, parallel};
pub use queue::{CapacityPolicy, Consumer, Producer, Queue};
pub use stage::{Filter, Map, Processor, filter, map};
pub use types::Pipeline;

/// Result alias used by public conveyr API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;
