//! Logger hierarchy
//!
//! Loggers are addressed by dotted names and stored dot-terminated, so
//! `"net"` becomes `"net."` and cannot be mistaken for a prefix of
//! `"network."`. The root logger has the empty name.
//!
//! Nodes are kept in a vector ordered by non-decreasing name length. Since an
//! ancestor's name is always shorter than its descendants', scanning that
//! vector front to back visits every possible ancestor of a name before the
//! name's own slot, and the last matching prefix seen is the nearest one.
//! Parents are plain node ids recomputed on every insert; nothing owns
//! anything through them.

use super::appender::AppenderHandle;
use super::context;
use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::logger::Logger;
use super::mask::Mask;
use super::options::LoggerOptions;
use super::stats::{LevelStats, StatsSnapshot};
use parking_lot::RwLock;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

pub(crate) type NodeId = usize;

pub(crate) const ROOT: NodeId = 0;

#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) name: String,
    pub(crate) level: LogLevel,
    pub(crate) options: LoggerOptions,
    /// Most recently added first.
    pub(crate) appenders: Vec<AppenderHandle>,
    pub(crate) parent: Option<NodeId>,
}

/// `candidate` names a proper ancestor of `name`. Both are dot-terminated.
#[inline]
fn is_dot_prefix(candidate: &str, name: &str) -> bool {
    candidate.len() < name.len() && name.starts_with(candidate)
}

/// `"a.b"` and `"a.b."` address the same logger.
fn normalize(name: &str) -> Cow<'_, str> {
    if name.ends_with('.') {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("{}.", name))
    }
}

#[derive(Debug)]
pub(crate) struct Hierarchy {
    /// Indexed by node id; nodes are never removed.
    pub(crate) nodes: Vec<Node>,
    /// Node ids by non-decreasing name length, root first.
    order: Vec<NodeId>,
    by_name: HashMap<String, NodeId>,
    adopt_on_insert: bool,
}

impl Hierarchy {
    fn new(level: LogLevel, options: LoggerOptions, adopt_on_insert: bool) -> Self {
        let root = Node {
            name: String::new(),
            level,
            options,
            appenders: Vec::new(),
            parent: None,
        };
        Self {
            nodes: vec![root],
            order: vec![ROOT],
            by_name: HashMap::from([(String::new(), ROOT)]),
            adopt_on_insert,
        }
    }

    pub(crate) fn find(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    /// `candidate` is a proper dot-prefix of `node` and at least as long as
    /// `node`'s current parent. Two distinct prefixes of one name never have
    /// the same length, so an equal length only re-selects the same parent.
    pub(crate) fn is_closer_ancestor(&self, candidate: NodeId, node: NodeId) -> bool {
        let candidate_name = &self.nodes[candidate].name;
        let node = &self.nodes[node];
        if !is_dot_prefix(candidate_name, &node.name) {
            return false;
        }
        match node.parent {
            None => true,
            Some(parent) => candidate_name.len() >= self.nodes[parent].name.len(),
        }
    }

    /// Add a node for the normalized `name`, which must not exist yet.
    pub(crate) fn insert(&mut self, name: String) -> NodeId {
        let id = self.nodes.len();
        let mut parent = None;
        let mut position = self.order.len();

        for (pos, &other) in self.order.iter().enumerate() {
            let candidate = &self.nodes[other].name;
            if candidate.len() > name.len() {
                position = pos;
                break;
            }
            if is_dot_prefix(candidate, &name) {
                parent = Some(other);
            }
        }

        // The root prefixes every name, so a parent always exists.
        let (level, options) = parent
            .map(|p| (self.nodes[p].level, self.nodes[p].options))
            .unwrap_or_default();

        self.nodes.push(Node {
            name: name.clone(),
            level,
            options,
            appenders: Vec::new(),
            parent,
        });
        self.order.insert(position, id);
        self.by_name.insert(name, id);

        self.update(id, self.adopt_on_insert);
        id
    }

    /// Re-parent every node for which `changed` is now the nearest ancestor.
    /// With `force`, those nodes also take over `changed`'s level and options.
    pub(crate) fn update(&mut self, changed: NodeId, force: bool) {
        let level = self.nodes[changed].level;
        let options = self.nodes[changed].options;

        for pos in 0..self.order.len() {
            let id = self.order[pos];
            if id == changed || !self.is_closer_ancestor(changed, id) {
                continue;
            }
            let node = &mut self.nodes[id];
            node.parent = Some(changed);
            if force {
                node.level = level;
                node.options = options;
            }
        }
    }

    /// Ids of `id` and every descendant of it.
    fn subtree(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let prefix = &self.nodes[id].name;
        self.order
            .iter()
            .copied()
            .filter(move |&other| other == id || is_dot_prefix(prefix, &self.nodes[other].name))
    }

    pub(crate) fn propagate_level(&mut self, id: NodeId, level: LogLevel) {
        let ids: Vec<_> = self.subtree(id).collect();
        for other in ids {
            self.nodes[other].level = level;
        }
    }

    pub(crate) fn propagate_option(&mut self, id: NodeId, option: LoggerOptions, enabled: bool) {
        let ids: Vec<_> = self.subtree(id).collect();
        for other in ids {
            self.nodes[other].options.set(option, enabled);
        }
    }

    /// Appenders an event at `level` starting at `origin` must reach, in
    /// delivery order, each sink identity at most once.
    pub(crate) fn route(&self, origin: NodeId, level: LogLevel) -> Vec<AppenderHandle> {
        let mut seen = Mask::EMPTY;
        let mut targets = Vec::new();
        let mut current = Some(origin);

        while let Some(id) = current {
            let node = &self.nodes[id];
            for appender in &node.appenders {
                let mask = appender.mask();
                if appender.level() > level || seen.intersects(mask) {
                    continue;
                }
                seen.insert(mask);
                targets.push(appender.clone());
            }
            if !node.options.contains(LoggerOptions::ADDITIVE) {
                break;
            }
            current = node.parent;
        }
        targets
    }

    fn names(&self) -> Vec<String> {
        self.order.iter().map(|&id| self.nodes[id].name.clone()).collect()
    }
}

pub(crate) struct Shared {
    pub(crate) hierarchy: RwLock<Hierarchy>,
    pub(crate) stats: Arc<LevelStats>,
}

/// One logger hierarchy.
///
/// Cloning a `Registry` yields another handle to the same hierarchy. Most
/// programs use [`Registry::global`]; independent hierarchies can be built
/// with [`Registry::new`] or [`Registry::builder`].
///
/// # Example
///
/// ```
/// use rust_logger_hierarchy::prelude::*;
///
/// let registry = Registry::new();
/// let leaf = registry.lookup("a.b.c");
/// let mid = registry.lookup("a.b");
///
/// mid.propagate_level(LogLevel::Warn);
/// assert_eq!(leaf.level(), LogLevel::Warn);
/// assert_eq!(leaf.parent().unwrap().name(), "a.b");
/// ```
#[derive(Clone)]
pub struct Registry {
    pub(crate) shared: Arc<Shared>,
}

impl Registry {
    /// A fresh hierarchy counting into the process-wide stats.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// The process-wide default hierarchy.
    pub fn global() -> &'static Registry {
        context::get().registry()
    }

    /// Return the logger named `name`, creating it on first use.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty; use [`root`](Self::root) for the root logger
    /// or [`try_lookup`](Self::try_lookup) to get an error instead.
    pub fn lookup(&self, name: &str) -> Logger {
        match self.try_lookup(name) {
            Ok(logger) => logger,
            Err(e) => panic!("{}", e),
        }
    }

    pub fn try_lookup(&self, name: &str) -> Result<Logger> {
        if name.is_empty() {
            return Err(LoggerError::invalid_name(
                name,
                "logger names must not be empty",
            ));
        }
        let key = normalize(name);
        if key[..key.len() - 1].split('.').any(str::is_empty) {
            return Err(LoggerError::invalid_name(
                name,
                "logger names must not contain empty segments",
            ));
        }

        let existing = self.shared.hierarchy.read().find(&key);
        let id = match existing {
            Some(id) => id,
            None => {
                let mut hierarchy = self.shared.hierarchy.write();
                // another caller may have inserted it between the two locks
                match hierarchy.find(&key) {
                    Some(id) => id,
                    None => hierarchy.insert(key.clone().into_owned()),
                }
            }
        };
        Ok(Logger::new(self.clone(), id, &key[..key.len() - 1]))
    }

    pub fn root(&self) -> Logger {
        Logger::new(self.clone(), ROOT, "")
    }

    /// Apply comma-separated level directives such as `"info,net=debug,net.http=warn"`.
    ///
    /// A bare level applies to the root. Each directive also propagates to the
    /// named logger's descendants; shorter names are applied first so the most
    /// specific directive wins. Unknown level names resolve to `default`.
    /// Directives naming an invalid logger are skipped with a warning.
    /// Returns the number of directives applied.
    pub fn apply_directives(&self, directives: &str, default: LogLevel) -> usize {
        let mut parsed = Vec::new();
        for directive in directives.split(',').map(str::trim).filter(|d| !d.is_empty()) {
            match directive.split_once('=') {
                Some((name, level)) => {
                    let name = name.trim();
                    if name.is_empty() {
                        eprintln!(
                            "[LOGGER WARNING] Ignoring directive '{}': missing logger name",
                            directive
                        );
                        continue;
                    }
                    parsed.push((name, LogLevel::parse_or(level, default)));
                }
                None => parsed.push(("", LogLevel::parse_or(directive, default))),
            }
        }

        parsed.sort_by_key(|(name, _)| normalize(name).len());
        let mut applied = 0;
        for (name, level) in &parsed {
            let logger = if name.is_empty() {
                self.root()
            } else {
                match self.try_lookup(name) {
                    Ok(logger) => logger,
                    Err(e) => {
                        eprintln!("[LOGGER WARNING] Ignoring directive for '{}': {}", name, e);
                        continue;
                    }
                }
            };
            logger.propagate_level(*level);
            applied += 1;
        }
        applied
    }

    /// Stored names in hierarchy order (dot-terminated, root first).
    pub fn names(&self) -> Vec<String> {
        self.shared.hierarchy.read().names()
    }

    /// Number of loggers, the root included.
    pub fn len(&self) -> usize {
        self.shared.hierarchy.read().nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Read and reset the per-level counters this hierarchy reports into.
    pub fn stats(&self) -> StatsSnapshot {
        self.shared.stats.take()
    }

    /// Whether `self` and `other` are handles to the same hierarchy.
    pub fn same_as(&self, other: &Registry) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry").field("names", &self.names()).finish()
    }
}

/// Builder for constructing a [`Registry`] with a fluent API
///
/// # Example
/// ```
/// use rust_logger_hierarchy::prelude::*;
/// use std::sync::Arc;
///
/// let stats = Arc::new(LevelStats::new());
/// let registry = Registry::builder()
///     .level(LogLevel::Info)
///     .options(LoggerOptions::ADDITIVE)
///     .stats(Arc::clone(&stats))
///     .build();
///
/// assert_eq!(registry.lookup("svc").level(), LogLevel::Info);
/// ```
pub struct RegistryBuilder {
    level: LogLevel,
    options: LoggerOptions,
    stats: Option<Arc<LevelStats>>,
    adopt_on_insert: bool,
}

impl RegistryBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            level: LogLevel::Trace,
            options: LoggerOptions::default(),
            stats: None,
            adopt_on_insert: true,
        }
    }

    /// Root level, inherited by loggers as they are created
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Root options, inherited by loggers as they are created
    #[must_use = "builder methods return a new value"]
    pub fn options(mut self, options: LoggerOptions) -> Self {
        self.options = options;
        self
    }

    /// Count deliveries into `stats` instead of the process-wide counters
    #[must_use = "builder methods return a new value"]
    pub fn stats(mut self, stats: Arc<LevelStats>) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Whether existing descendants take over the level and options of a
    /// newly created intermediate logger (default `true`). When `false` they
    /// are only re-parented.
    #[must_use = "builder methods return a new value"]
    pub fn adopt_on_insert(mut self, adopt: bool) -> Self {
        self.adopt_on_insert = adopt;
        self
    }

    pub fn build(self) -> Registry {
        let stats = self
            .stats
            .unwrap_or_else(|| Arc::clone(context::get().stats()));
        Registry {
            shared: Arc::new(Shared {
                hierarchy: RwLock::new(Hierarchy::new(
                    self.level,
                    self.options,
                    self.adopt_on_insert,
                )),
                stats,
            }),
        }
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
