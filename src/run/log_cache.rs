use std::collections::BTreeMap;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

/// Severity of one buffered report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Debug,
    Error,
}

/// One buffered report line. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
}

/// Destination for flushed report lines.
pub trait LogSink {
    fn emit(&mut self, level: LogLevel, message: &str);
}

/// Sink that forwards report lines to the tracing subscriber.
#[derive(Debug, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn emit(&mut self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Info => info!("{}", message),
            LogLevel::Debug => debug!("{}", message),
            LogLevel::Error => error!("{}", message),
        }
    }
}

/// Buffers per-sample report lines while detection calls run concurrently.
///
/// Entries are keyed by sample identifier. The map is mutex-guarded, so a
/// first insert into a new key cannot be lost when two tasks interleave,
/// and appends within a key keep their insertion order. Completion order of
/// the in-flight calls has no effect on flush output, which is what keeps
/// run logs reproducible.
#[derive(Debug, Default)]
pub struct LogCache {
    entries: Mutex<BTreeMap<String, Vec<LogEntry>>>,
}

impl LogCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line under the given sample identifier, creating its
    /// sequence on first use.
    pub async fn record(&self, sample: &str, level: LogLevel, message: impl Into<String>) {
        let entry = LogEntry {
            level,
            message: message.into(),
        };
        let mut entries = self.entries.lock().await;
        entries.entry(sample.to_string()).or_default().push(entry);
    }

    /// Emit everything to the sink, grouped by sample identifier in
    /// lexicographic order, insertion order within each group. Consumes the
    /// cache: a flush is terminal.
    pub fn flush(self, sink: &mut dyn LogSink) {
        let entries = self.entries.into_inner();
        for lines in entries.into_values() {
            for line in lines {
                sink.emit(line.level, &line.message);
            }
        }
    }
}
