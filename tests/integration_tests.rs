//! Integration tests for the logger hierarchy
//!
//! These tests verify:
//! - Parent resolution regardless of creation order
//! - Level and option propagation
//! - At-most-once delivery of shared appenders
//! - Additivity cut-off
//! - Ring buffer contents after wraparound
//! - Statistics collection and reset
//! - Level directives

use parking_lot::Mutex;
use rust_logger_hierarchy::appenders::RingBufferAppender;
use rust_logger_hierarchy::core::layout::{render, Layout};
use rust_logger_hierarchy::prelude::*;
use std::sync::Arc;

/// Registry reporting into its own counters so tests do not see each other.
fn isolated() -> (Registry, Arc<LevelStats>) {
    let stats = Arc::new(LevelStats::new());
    let registry = Registry::builder().stats(Arc::clone(&stats)).build();
    (registry, stats)
}

/// Sink that records `origin:message` for every event it receives.
struct Recorder {
    name: &'static str,
    seen: Arc<Mutex<Vec<String>>>,
}

impl Appender for Recorder {
    fn append(&mut self, event: &LogEvent<'_>, layout: Option<&dyn Layout>) -> Result<()> {
        let mut out = Vec::new();
        render(event, layout, &mut out)?;
        self.seen
            .lock()
            .push(format!("{}:{}", event.origin, String::from_utf8_lossy(&out)));
        Ok(())
    }

    fn name(&self) -> &str {
        self.name
    }
}

fn recorder(name: &'static str) -> (AppenderHandle<Recorder>, Arc<Mutex<Vec<String>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let handle = AppenderHandle::new(Recorder {
        name,
        seen: Arc::clone(&seen),
    });
    (handle, seen)
}

#[test]
fn test_child_created_before_parent_adopts_propagated_level() {
    let (registry, _) = isolated();
    let leaf = registry.lookup("a.b.c");
    let mid = registry.lookup("a.b");

    mid.propagate_level(LogLevel::Warn);
    assert_eq!(leaf.level(), LogLevel::Warn);
    assert_eq!(leaf.parent(), Some(mid.clone()));
    assert_eq!(mid.parent(), Some(registry.root()));
}

#[test]
fn test_parent_resolution_in_both_orders() {
    for order in [["x.y", "x.y.z"], ["x.y.z", "x.y"]] {
        let (registry, _) = isolated();
        for name in order {
            registry.lookup(name);
        }
        let child = registry.lookup("x.y.z");
        assert_eq!(child.parent().map(|p| p.name().to_string()), Some("x.y".to_string()));
    }
}

#[test]
fn test_intermediate_logger_takes_over_settings() {
    let (registry, _) = isolated();
    registry.root().set_level(LogLevel::Info);
    let deep = registry.lookup("svc.db.pool");
    assert_eq!(deep.level(), LogLevel::Info);

    let svc = registry.lookup("svc");
    svc.set_level(LogLevel::Error);
    let db = registry.lookup("svc.db");

    // svc.db inherits from svc and hands that to svc.db.pool
    assert_eq!(db.level(), LogLevel::Error);
    assert_eq!(deep.level(), LogLevel::Error);
    assert_eq!(deep.parent(), Some(db));
}

#[test]
fn test_registry_order_is_non_decreasing() {
    let (registry, _) = isolated();
    for name in ["k.l.m.n", "k", "zz.top", "k.l", "a", "k.l.m"] {
        registry.lookup(name);
        let names = registry.names();
        assert!(names.windows(2).all(|w| w[0].len() <= w[1].len()), "{:?}", names);
        assert_eq!(names[0], "");
    }
    assert_eq!(registry.len(), 7);
}

#[test]
fn test_handles_share_state() {
    let (registry, _) = isolated();
    let first = registry.lookup("shared");
    let second = registry.lookup("shared");
    first.set_option(LoggerOptions::COLLECT_STATS, false, false);
    assert!(!second.option(LoggerOptions::COLLECT_STATS));
}

#[test]
fn test_shared_appender_delivered_once() {
    let (registry, stats) = isolated();
    let (sink, seen) = recorder("it::shared");
    let parent = registry.lookup("app");
    let child = registry.lookup("app.worker");
    parent.add(&sink);
    child.add(&sink);

    child.info("job done").unwrap();
    assert_eq!(*seen.lock(), vec!["app.worker:job done".to_string()]);
    assert_eq!(stats.take().count(LogLevel::Info), 1);
}

#[test]
fn test_additive_false_stops_at_node() {
    let (registry, _) = isolated();
    let (root_sink, root_seen) = recorder("it::root");
    let (mid_sink, mid_seen) = recorder("it::mid");
    registry.root().add(&root_sink);

    let mid = registry.lookup("net.http");
    mid.add(&mid_sink);
    let leaf = registry.lookup("net.http.client");

    leaf.warn("first").unwrap();
    mid.set_option(LoggerOptions::ADDITIVE, false, false);
    leaf.warn("second").unwrap();

    assert_eq!(mid_seen.lock().len(), 2);
    assert_eq!(*root_seen.lock(), vec!["net.http.client:first".to_string()]);
}

#[test]
fn test_levels_gate_logger_and_appender() {
    let (registry, _) = isolated();
    let (strict, strict_seen) = recorder("it::strict");
    let (lenient, lenient_seen) = recorder("it::lenient");
    strict.set_level(LogLevel::Error);

    let logger = registry.lookup("gate");
    logger.set_level(LogLevel::Info).add(&strict).add(&lenient);

    logger.verbose("below logger").unwrap();
    logger.warn("between").unwrap();
    logger.error("above both").unwrap();

    assert_eq!(
        *lenient_seen.lock(),
        vec!["gate:between".to_string(), "gate:above both".to_string()]
    );
    assert_eq!(*strict_seen.lock(), vec!["gate:above both".to_string()]);
}

#[test]
fn test_ring_buffer_keeps_tail() {
    let (registry, _) = isolated();
    let ring = AppenderHandle::new(RingBufferAppender::new(6));
    let logger = registry.lookup("ring");
    logger.add(&ring);

    logger.info("0123456789").unwrap();

    let mut out = Vec::new();
    ring.lock().print(&mut out).unwrap();
    assert_eq!(out, b"456789");
}

#[test]
fn test_ring_buffer_with_layout() {
    let (registry, _) = isolated();
    let ring = AppenderHandle::new(RingBufferAppender::new(4096))
        .with_layout(TextLayout::new().with_timestamp_format(TimestampFormat::Omit));
    let logger = registry.lookup("svc.api");
    logger.add(&ring);

    logger.info("started").unwrap();
    logger.error(format!("failed after {} ms", 250)).unwrap();

    let text = String::from_utf8(ring.lock().contents()).unwrap();
    assert_eq!(
        text,
        "[INFO ] svc.api - started\n[ERROR] svc.api - failed after 250 ms"
    );
}

#[test]
fn test_stats_count_delivered_events() {
    let (registry, stats) = isolated();
    let (sink, _) = recorder("it::stats");
    registry.root().add(&sink);
    let logger = registry.lookup("counted");

    for _ in 0..3 {
        logger.info("i").unwrap();
    }
    logger.warn("w").unwrap();
    logger.error("e").unwrap();

    let snapshot = stats.take();
    assert_eq!(snapshot.count(LogLevel::Info), 3);
    assert_eq!(snapshot.count(LogLevel::Warn), 1);
    assert_eq!(snapshot.total(), 5);
    assert_eq!(registry.stats().total(), 0);
}

#[test]
fn test_collect_stats_follows_origin() {
    let (registry, stats) = isolated();
    let (sink, _) = recorder("it::origin_stats");
    registry.root().add(&sink);

    let quiet = registry.lookup("uncounted");
    quiet.set_option(LoggerOptions::COLLECT_STATS, false, true);
    let child = registry.lookup("uncounted.child");

    quiet.info("not counted").unwrap();
    child.info("not counted either").unwrap();
    registry.root().info("counted").unwrap();

    assert_eq!(stats.take().total(), 1);
}

#[test]
fn test_sink_error_reaches_caller() {
    struct Failing;

    impl Appender for Failing {
        fn append(&mut self, _event: &LogEvent<'_>, _layout: Option<&dyn Layout>) -> Result<()> {
            Err(LoggerError::writer("Simulated failure"))
        }

        fn name(&self) -> &str {
            "it::failing"
        }
    }

    let (registry, stats) = isolated();
    let (parent_sink, parent_seen) = recorder("it::behind_failure");
    let parent = registry.lookup("io");
    parent.add(&parent_sink);
    let child = registry.lookup("io.disk");
    child.add(&AppenderHandle::new(Failing));

    let result = child.error("write failed");
    assert!(matches!(result, Err(LoggerError::WriterError(_))));
    assert!(parent_seen.lock().is_empty());
    assert_eq!(stats.take().total(), 0);
}

#[test]
fn test_unformattable_message_is_an_error_with_layout() {
    struct Broken;

    impl std::fmt::Display for Broken {
        fn fmt(&self, _: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            Err(std::fmt::Error)
        }
    }

    let (registry, stats) = isolated();
    let ring = AppenderHandle::new(RingBufferAppender::new(256)).with_layout(TextLayout::new());
    let logger = registry.lookup("render");
    logger.add(&ring);

    let result = logger.info(format_args!("{}", Broken));
    assert!(matches!(result, Err(LoggerError::FormatterError { .. })));
    assert!(ring.lock().is_empty());
    assert_eq!(stats.take().total(), 0);
}

#[test]
fn test_sinks_built_either_way_both_receive() {
    let (registry, _) = isolated();
    let ring = AppenderHandle::new(RingBufferAppender::new(64));
    registry.root().add(&ring);

    let seen = Arc::new(Mutex::new(Vec::new()));
    let other = AppenderHandle::try_new(Recorder {
        name: "it::fallible",
        seen: Arc::clone(&seen),
    })
    .unwrap();
    let child = registry.lookup("x.y");
    child.add(&other);

    child.info("hello").unwrap();
    assert_ne!(ring.mask(), other.mask());
    assert_eq!(ring.lock().contents(), b"hello");
    assert_eq!(*seen.lock(), vec!["x.y:hello".to_string()]);
}

#[test]
fn test_apply_directives() {
    let (registry, _) = isolated();
    let http = registry.lookup("net.http");
    let db = registry.lookup("db");

    let applied = registry.apply_directives("net.http=error, warn ,net=debug,db=bogus", LogLevel::Info);
    assert_eq!(applied, 4);
    assert_eq!(registry.root().level(), LogLevel::Warn);
    assert_eq!(registry.lookup("net").level(), LogLevel::Debug);
    assert_eq!(http.level(), LogLevel::Error);
    assert_eq!(db.level(), LogLevel::Info);
}

#[test]
fn test_directive_without_name_is_skipped() {
    let (registry, _) = isolated();
    assert_eq!(registry.apply_directives("=warn,,,.=error,a..b=debug", LogLevel::Info), 0);
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.root().level(), LogLevel::Trace);
}

#[test]
fn test_global_registry_is_shared() {
    let a = rust_logger_hierarchy::lookup("integration.global");
    let b = Registry::global().lookup("integration.global");
    assert_eq!(a, b);
    assert!(rust_logger_hierarchy::root().registry().same_as(Registry::global()));
}

#[test]
fn test_concurrent_logging_to_shared_ring() {
    let (registry, stats) = isolated();
    let ring = AppenderHandle::new(RingBufferAppender::new(1 << 16).with_separator(";"));
    registry.root().add(&ring);

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let logger = registry.lookup(&format!("worker.{}", t));
            std::thread::spawn(move || {
                for i in 0..25 {
                    logger.info(format_args!("{}-{}", t, i)).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let text = String::from_utf8(ring.lock().contents()).unwrap();
    assert_eq!(text.split(';').count(), 100);
    assert_eq!(stats.take().count(LogLevel::Info), 100);
}
