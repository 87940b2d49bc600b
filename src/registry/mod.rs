//! Registry model: the items a host runtime knows about, and the queue of
//! items requested for the current page.
//!
//! A [`Registry`] is an owned, immutable copy of one asset class taken at the
//! start of an analysis. It never changes while the resolvers walk it, so no
//! locking is needed even when the host keeps mutating its own registry.
//!
//! Dangling names are valid data here: the queue and any `deps` list may name
//! items that were never registered. Lookups simply return `None` and
//! [`Registry::dependencies_of`] returns an empty slice for them.
//!
//! # Example
//!
//! ```rust
//! use asset_report::core::AssetKind;
//! use asset_report::registry::{Item, RegistryBuilder};
//!
//! let mut builder = RegistryBuilder::new(AssetKind::Script);
//! builder.register("jquery", Item::new("/js/jquery.js"), Some("core"));
//! builder.register("app", Item::new("/js/app.js").with_deps(["jquery"]), Some("plugin: shop"));
//! builder.enqueue("app");
//! let registry = builder.build();
//!
//! assert_eq!(registry.dependencies_of("app"), ["jquery".to_string()]);
//! assert!(registry.dependencies_of("missing").is_empty());
//! ```

pub mod snapshot;

pub use snapshot::{RegistrySnapshot, Snapshot};

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::core::AssetKind;

/// Declared version of an item.
///
/// Hosts export versions as strings or bare numbers; both are kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Version {
    /// Textual version such as `"6.4.2"`
    Text(String),
    /// Integer version such as a build timestamp
    Int(i64),
    /// Floating version such as `1.5`
    Float(f64),
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Version::Text(s) => write!(f, "{s}"),
            Version::Int(n) => write!(f, "{n}"),
            Version::Float(n) => write!(f, "{n}"),
        }
    }
}

/// Scalar that is either a real value or a boolean placeholder.
#[derive(Deserialize)]
#[serde(untagged)]
enum OrFlag<T> {
    Value(T),
    Flag(#[allow(dead_code)] bool),
}

fn source_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<OrFlag<String>>::deserialize(deserializer)? {
        Some(OrFlag::Value(source)) => source,
        Some(OrFlag::Flag(_)) | None => String::new(),
    })
}

fn version_or_none<'de, D>(deserializer: D) -> Result<Option<Version>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<OrFlag<Version>>::deserialize(deserializer)? {
        Some(OrFlag::Value(version)) => Some(version),
        Some(OrFlag::Flag(_)) | None => None,
    })
}

/// A registered asset.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Item {
    /// Source locator. Empty means the item is inline-only.
    ///
    /// Hosts export inline-only items with `false` or `null` here.
    #[serde(default, rename = "src", deserialize_with = "source_or_empty")]
    pub source: String,

    /// Declared version, if any. `false` and `null` mean none.
    #[serde(
        default,
        rename = "ver",
        deserialize_with = "version_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub version: Option<Version>,

    /// Names this item depends on, in declared order
    #[serde(default)]
    pub deps: Vec<String>,

    /// Presentation flags (`group` for footer placement, `data` for inline payloads)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, serde_json::Value>,

    /// Label of whatever registered the item (plugin, theme, core)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_by: Option<String>,
}

impl Item {
    /// Create an item with the given source and nothing else.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }

    /// Set the declared dependencies.
    #[must_use]
    pub fn with_deps<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.deps = deps.into_iter().map(Into::into).collect();
        self
    }

    /// Set the declared version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(Version::Text(version.into()));
        self
    }

    /// Insert a presentation flag.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Whether the item has a non-empty source locator.
    #[must_use]
    pub fn has_source(&self) -> bool {
        !self.source.is_empty()
    }

    /// Whether the item is deferred to the page footer.
    ///
    /// Hosts mark this with a truthy `group` flag (usually `1`).
    #[must_use]
    pub fn in_footer(&self) -> bool {
        match self.extra.get("group") {
            Some(serde_json::Value::Bool(b)) => *b,
            Some(serde_json::Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
            Some(serde_json::Value::String(s)) => !s.is_empty() && s != "0",
            _ => false,
        }
    }

    /// Byte length of the inline payload attached to the item, if any.
    #[must_use]
    pub fn inline_bytes(&self) -> Option<u64> {
        match self.extra.get("data") {
            Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s.len() as u64),
            _ => None,
        }
    }
}

/// An immutable registry of one asset kind plus its request queue.
#[derive(Debug, Clone)]
pub struct Registry {
    kind: AssetKind,
    registered: BTreeMap<String, Item>,
    queue: Vec<String>,
    queued: HashSet<String>,
}

impl Registry {
    /// Build a registry from already-collected items and a queue.
    ///
    /// Repeated queue entries are dropped after their first occurrence; the
    /// host's own queue never holds a name twice.
    pub fn new(kind: AssetKind, registered: BTreeMap<String, Item>, queue: Vec<String>) -> Self {
        let mut queued = HashSet::with_capacity(queue.len());
        let queue: Vec<String> =
            queue.into_iter().filter(|name| queued.insert(name.clone())).collect();

        Self {
            kind,
            registered,
            queue,
            queued,
        }
    }

    /// An empty registry of the given kind.
    #[must_use]
    pub fn empty(kind: AssetKind) -> Self {
        Self::new(kind, BTreeMap::new(), Vec::new())
    }

    /// The asset kind held by this registry.
    #[must_use]
    pub const fn kind(&self) -> AssetKind {
        self.kind
    }

    /// Look up an item by name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Item> {
        self.registered.get(name)
    }

    /// Whether `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.registered.contains_key(name)
    }

    /// Declared dependencies of `name`; empty when unknown.
    #[must_use]
    pub fn dependencies_of(&self, name: &str) -> &[String] {
        self.registered.get(name).map_or(&[], |item| item.deps.as_slice())
    }

    /// The explicitly requested names, in request order.
    #[must_use]
    pub fn queue(&self) -> &[String] {
        &self.queue
    }

    /// Whether `name` was explicitly requested.
    #[must_use]
    pub fn is_queued(&self, name: &str) -> bool {
        self.queued.contains(name)
    }

    /// Iterate over registered items in name order.
    pub fn items(&self) -> impl Iterator<Item = (&String, &Item)> {
        self.registered.iter()
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.registered.keys().map(String::as_str)
    }

    /// Number of registered items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registered.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }
}

/// Collects registrations before freezing them into a [`Registry`].
///
/// The attribution label is passed explicitly with every registration; the
/// builder never tries to work out who is calling it.
#[derive(Debug)]
pub struct RegistryBuilder {
    kind: AssetKind,
    registered: BTreeMap<String, Item>,
    queue: Vec<String>,
}

impl RegistryBuilder {
    /// Start an empty registry of `kind`.
    #[must_use]
    pub fn new(kind: AssetKind) -> Self {
        Self {
            kind,
            registered: BTreeMap::new(),
            queue: Vec::new(),
        }
    }

    /// Register an item under `name`.
    ///
    /// Returns `false` and leaves the existing item untouched if `name` is
    /// already registered. A `Some` attribution overrides the item's own
    /// `added_by`.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        mut item: Item,
        attribution: Option<&str>,
    ) -> bool {
        let name = name.into();
        if self.registered.contains_key(&name) {
            tracing::debug!("{} '{}' already registered, ignoring", self.kind, name);
            return false;
        }
        if let Some(label) = attribution {
            item.added_by = Some(label.to_string());
        }
        self.registered.insert(name, item);
        true
    }

    /// Request `name` for the current page. Returns `false` if already queued.
    pub fn enqueue(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.queue.contains(&name) {
            return false;
        }
        self.queue.push(name);
        true
    }

    /// Freeze into an immutable registry.
    #[must_use]
    pub fn build(self) -> Registry {
        Registry::new(self.kind, self.registered, self.queue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_and_dependencies() {
        let mut builder = RegistryBuilder::new(AssetKind::Script);
        builder.register("a", Item::new("a.js"), None);
        builder.register("b", Item::new("b.js").with_deps(["a", "ghost"]), None);
        let registry = builder.build();

        assert!(registry.lookup("a").is_some());
        assert!(registry.lookup("ghost").is_none());
        assert_eq!(registry.dependencies_of("b"), ["a".to_string(), "ghost".to_string()]);
        assert!(registry.dependencies_of("a").is_empty());
        assert!(registry.dependencies_of("ghost").is_empty());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_register_keeps_first() {
        let mut builder = RegistryBuilder::new(AssetKind::Style);
        assert!(builder.register("main", Item::new("one.css"), Some("theme: one")));
        assert!(!builder.register("main", Item::new("two.css"), Some("theme: two")));
        let registry = builder.build();

        let item = registry.lookup("main").unwrap();
        assert_eq!(item.source, "one.css");
        assert_eq!(item.added_by.as_deref(), Some("theme: one"));
    }

    #[test]
    fn test_queue_deduplicated() {
        let registry = Registry::new(
            AssetKind::Script,
            BTreeMap::new(),
            vec!["a".into(), "b".into(), "a".into()],
        );
        assert_eq!(registry.queue(), ["a".to_string(), "b".to_string()]);
        assert!(registry.is_queued("b"));
        assert!(!registry.is_queued("c"));
    }

    #[test]
    fn test_dangling_queue_entry_is_allowed() {
        let mut builder = RegistryBuilder::new(AssetKind::Script);
        builder.enqueue("nowhere");
        let registry = builder.build();
        assert!(registry.is_queued("nowhere"));
        assert!(!registry.contains("nowhere"));
    }

    #[test]
    fn test_footer_flag() {
        assert!(Item::new("x.js").with_extra("group", json!(1)).in_footer());
        assert!(Item::new("x.js").with_extra("group", json!(true)).in_footer());
        assert!(!Item::new("x.js").with_extra("group", json!(0)).in_footer());
        assert!(!Item::new("x.js").with_extra("group", json!("0")).in_footer());
        assert!(!Item::new("x.js").in_footer());
    }

    #[test]
    fn test_inline_bytes() {
        let item = Item::new("").with_extra("data", json!("var cfg = {};"));
        assert_eq!(item.inline_bytes(), Some(13));
        assert!(!item.has_source());
        assert_eq!(Item::new("x.js").inline_bytes(), None);
    }

    #[test]
    fn test_version_forms() {
        let item: Item = serde_json::from_value(json!({"src": "a.js", "ver": "1.2"})).unwrap();
        assert_eq!(item.version.unwrap().to_string(), "1.2");
        let item: Item = serde_json::from_value(json!({"src": "a.js", "ver": 20240101})).unwrap();
        assert_eq!(item.version.unwrap().to_string(), "20240101");
        let item: Item = serde_json::from_value(json!({"src": "a.js", "ver": null})).unwrap();
        assert!(item.version.is_none());
    }
}
