//! Pipeline components: stage connector, fan-out pool, chain builder, worker registry.

pub mod builder;
pub mod connect;
pub mod pool;
pub mod registry;

pub use builder::PipelineBuilder;
pub use connect::{Worker, connect};
pub use pool::parallel;
pub use registry::WorkerSet;
