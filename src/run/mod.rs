//! Run orchestration: concurrent dispatch with partial-failure isolation
//! and deterministic log aggregation.

mod dispatcher;
mod log_cache;

pub use dispatcher::{RunDispatcher, RunReport};
pub use log_cache::{LogCache, LogEntry, LogLevel, LogSink, TracingSink};
