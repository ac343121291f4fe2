// Integration tests for the log cache: concurrent recording must never
// lose an entry, and flush output must not depend on arrival order.

use reco_harness::{LogCache, LogLevel, LogSink};
use std::sync::Arc;

#[derive(Default)]
struct CaptureSink {
    lines: Vec<(LogLevel, String)>,
}

impl LogSink for CaptureSink {
    fn emit(&mut self, level: LogLevel, message: &str) {
        self.lines.push((level, message.to_string()));
    }
}

fn flushed(cache: LogCache) -> Vec<(LogLevel, String)> {
    let mut sink = CaptureSink::default();
    cache.flush(&mut sink);
    sink.lines
}

#[tokio::test]
async fn flush_orders_groups_lexicographically() {
    let cache = LogCache::new();

    // Recorded out of order on purpose.
    cache.record("c.flac", LogLevel::Info, "third").await;
    cache.record("a.flac", LogLevel::Info, "first").await;
    cache.record("b.flac", LogLevel::Error, "second").await;

    let lines = flushed(cache);

    assert_eq!(
        lines,
        vec![
            (LogLevel::Info, "first".to_string()),
            (LogLevel::Error, "second".to_string()),
            (LogLevel::Info, "third".to_string()),
        ]
    );
}

#[tokio::test]
async fn flush_preserves_insertion_order_within_a_group() {
    let cache = LogCache::new();

    cache.record("a.flac", LogLevel::Info, "one").await;
    cache.record("b.flac", LogLevel::Info, "interleaved").await;
    cache.record("a.flac", LogLevel::Debug, "two").await;
    cache.record("a.flac", LogLevel::Error, "three").await;

    let lines = flushed(cache);
    let a_lines: Vec<&str> = lines
        .iter()
        .map(|(_, message)| message.as_str())
        .filter(|message| *message != "interleaved")
        .collect();

    assert_eq!(a_lines, vec!["one", "two", "three"]);
}

#[tokio::test]
async fn concurrent_recording_loses_no_entries() {
    let cache = Arc::new(LogCache::new());

    // Many tasks hammer the same fresh key plus their own keys; the first
    // insert into a new key must survive the interleaving.
    let mut tasks = Vec::new();
    for i in 0..64 {
        let cache = Arc::clone(&cache);
        tasks.push(tokio::spawn(async move {
            cache.record("shared.flac", LogLevel::Info, format!("shared {}", i)).await;
            cache
                .record(&format!("task-{:02}.flac", i), LogLevel::Info, "own")
                .await;
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    let cache = Arc::into_inner(cache).expect("cache still shared");
    let lines = flushed(cache);

    let shared = lines.iter().filter(|(_, m)| m.starts_with("shared ")).count();
    let own = lines.iter().filter(|(_, m)| m == "own").count();
    assert_eq!(shared, 64);
    assert_eq!(own, 64);
}
