//! Property-based tests for rust_logger_hierarchy using proptest

use proptest::prelude::*;
use rust_logger_hierarchy::prelude::*;
use std::sync::Arc;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Debug),
        Just(LogLevel::Trace),
        Just(LogLevel::Verbose),
        Just(LogLevel::Info),
        Just(LogLevel::Warn),
        Just(LogLevel::Error),
        Just(LogLevel::Fatal),
        Just(LogLevel::None),
    ]
}

/// Dotted names over a tiny alphabet so that prefixes collide often.
fn logger_name() -> impl Strategy<Value = String> {
    prop::collection::vec("[ab]{1,2}", 1..5).prop_map(|segments| segments.join("."))
}

fn isolated() -> Registry {
    Registry::builder().stats(Arc::new(LevelStats::new())).build()
}

// ============================================================================
// LogLevel Tests
// ============================================================================

proptest! {
    /// Test that LogLevel string conversions roundtrip correctly
    #[test]
    fn test_log_level_str_roundtrip(level in any_level()) {
        let parsed: LogLevel = level.to_str().parse().unwrap();
        prop_assert_eq!(level, parsed);
        let lower: LogLevel = level.to_str().to_lowercase().parse().unwrap();
        prop_assert_eq!(level, lower);
    }

    /// Test that LogLevel ordering matches the discriminants
    #[test]
    fn test_log_level_ordering(level1 in any_level(), level2 in any_level()) {
        let val1 = level1 as u8;
        let val2 = level2 as u8;
        prop_assert_eq!(level1 <= level2, val1 <= val2);
        prop_assert_eq!(level1 < level2, val1 < val2);
    }

    /// A threshold admits exactly the emittable levels at or above it
    #[test]
    fn test_admits_matches_ordering(threshold in any_level(), event in any_level()) {
        let expected = event != LogLevel::None && event >= threshold;
        prop_assert_eq!(threshold.admits(event), expected);
    }

    /// Unknown level strings fall back to the default
    #[test]
    fn test_parse_or_falls_back(s in "[xyz]{1,8}", default in any_level()) {
        prop_assert_eq!(LogLevel::parse_or(&s, default), default);
    }
}

// ============================================================================
// Hierarchy Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Stored names stay ordered by length whatever the lookup order
    #[test]
    fn test_names_ordered_by_length(names in prop::collection::vec(logger_name(), 1..24)) {
        let registry = isolated();
        for name in &names {
            registry.lookup(name);
        }
        let stored = registry.names();
        prop_assert_eq!(stored[0].as_str(), "");
        prop_assert!(stored.windows(2).all(|w| w[0].len() <= w[1].len()));
    }

    /// Every logger's parent is its longest existing dot-prefix
    #[test]
    fn test_parent_is_longest_existing_prefix(names in prop::collection::vec(logger_name(), 1..24)) {
        let registry = isolated();
        for name in &names {
            registry.lookup(name);
        }
        let stored = registry.names();

        for name in &names {
            let full = format!("{}.", name);
            let expected = stored
                .iter()
                .filter(|candidate| candidate.len() < full.len() && full.starts_with(candidate.as_str()))
                .max_by_key(|candidate| candidate.len())
                .map(|candidate| candidate.trim_end_matches('.').to_string());

            let parent = registry.lookup(name).parent().map(|p| p.name().to_string());
            prop_assert_eq!(parent, expected);
        }
    }

    /// Repeated lookups never grow the registry
    #[test]
    fn test_lookup_idempotent(names in prop::collection::vec(logger_name(), 1..16)) {
        let registry = isolated();
        for name in &names {
            registry.lookup(name);
        }
        let len = registry.len();
        for name in &names {
            registry.lookup(name);
            registry.lookup(&format!("{}.", name));
        }
        prop_assert_eq!(registry.len(), len);
    }

    /// After propagating a level, the whole subtree reports it
    #[test]
    fn test_propagate_level_reaches_subtree(
        names in prop::collection::vec(logger_name(), 1..16),
        target in logger_name(),
        level in any_level(),
    ) {
        let registry = isolated();
        for name in &names {
            registry.lookup(name);
        }
        registry.lookup(&target).propagate_level(level);

        let prefix = format!("{}.", target);
        for name in &names {
            let full = format!("{}.", name);
            if full.starts_with(&prefix) {
                prop_assert_eq!(registry.lookup(name).level(), level);
            }
        }
    }

    /// Delivered events are counted once per call, whatever the chain looks like
    #[test]
    fn test_stats_sum_to_delivered_calls(
        levels in prop::collection::vec(any_level(), 0..40),
    ) {
        let stats = Arc::new(LevelStats::new());
        let registry = Registry::builder()
            .level(LogLevel::Debug)
            .stats(Arc::clone(&stats))
            .build();
        let ring = AppenderHandle::new(RingBufferAppender::new(64));
        registry.root().add(&ring);
        let logger = registry.lookup("a.b");
        logger.add(&ring);

        for level in &levels {
            logger.append(*level, "x", None).unwrap();
        }

        let expected = levels.iter().filter(|l| **l != LogLevel::None).count() as u64;
        prop_assert_eq!(stats.take().total(), expected);
        prop_assert_eq!(stats.peek().total(), 0);
    }
}
