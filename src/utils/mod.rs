pub mod config;
pub mod logger;

pub use config::{DEFAULT_BATCH_SIZE, suggested_workers};
pub use logger::setup_logging;
