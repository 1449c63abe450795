//! Content nodes and their per-locale cache settings.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::locale::Locale;
use crate::target::CacheTarget;

/// Property key holding the tiered cache target of a node.
pub const PROPERTY_CACHE_TARGET: &str = "cache.target";

/// Legacy property key from the boolean disable era. Preserved on nodes
/// but never interpreted by the resolver.
pub const PROPERTY_CACHE_DISABLED: &str = "cache.disabled";

/// Response header carrying the browser cache duration.
pub const HEADER_MAX_AGE: &str = "max-age";

/// Response header carrying the shared (intermediate) cache duration.
pub const HEADER_S_MAXAGE: &str = "s-maxage";

/// Response header carrying the absolute expiry timestamp.
pub const HEADER_EXPIRES: &str = "Expires";

/// Fixed historical `Expires` value asserted on every policy update.
///
/// Signals "no absolute expiry, rely on max-age/s-maxage"; the literal is
/// part of the wire contract and must not be reformatted.
pub const EXPIRES_SENTINEL: &str = "Wed, 06 Jul 1983 5:00:00 GMT";

/// Identifier of a content node, owned by the node repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(SmolStr);

impl NodeId {
    /// Create a node id.
    pub fn new(id: impl AsRef<str>) -> Self {
        NodeId(SmolStr::new(id.as_ref()))
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        NodeId::new(id)
    }
}

/// A per-locale response-header override on a node.
///
/// Three states are meaningful and must stay distinguishable:
///
/// - `Unset` — no override; the header is left to inheritance.
/// - `Empty` — explicit "no value", persisted as an empty string; used by
///   the `none` target to assert "do not cache".
/// - `Value` — a concrete header value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderSetting {
    /// No override present ("inherit").
    Unset,
    /// Explicit empty sentinel ("no value").
    Empty,
    /// A concrete value.
    Value(String),
}

impl HeaderSetting {
    /// The concrete value, if any.
    pub fn value(&self) -> Option<&str> {
        match self {
            HeaderSetting::Value(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Whether no override is present at all.
    pub fn is_unset(&self) -> bool {
        matches!(self, HeaderSetting::Unset)
    }

    /// Build a setting for a whole number of seconds.
    pub fn seconds(seconds: u64) -> Self {
        HeaderSetting::Value(seconds.to_string())
    }
}

/// A content item in the site tree.
///
/// Nodes hold a weak back-reference to their parent id; children are
/// looked up through the repository, never owned. All cache-relevant
/// state lives in the per-locale property bag and header overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    id: NodeId,
    name: String,
    parent: Option<NodeId>,
    #[serde(default)]
    properties: HashMap<Locale, BTreeMap<String, String>>,
    // Empty string means the explicit-empty sentinel; absence means unset.
    #[serde(default)]
    headers: HashMap<Locale, BTreeMap<String, String>>,
}

impl Node {
    /// Create a root node.
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Node {
            id: id.into(),
            name: name.into(),
            parent: None,
            properties: HashMap::new(),
            headers: HashMap::new(),
        }
    }

    /// Create a node below the given parent.
    pub fn with_parent(
        id: impl Into<NodeId>,
        name: impl Into<String>,
        parent: impl Into<NodeId>,
    ) -> Self {
        Node {
            parent: Some(parent.into()),
            ..Node::new(id, name)
        }
    }

    /// The node id.
    pub fn id(&self) -> &NodeId {
        &self.id
    }

    /// The human-readable node name, used in change-log messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parent node id, if this is not a root.
    pub fn parent(&self) -> Option<&NodeId> {
        self.parent.as_ref()
    }

    /// Read a per-locale property.
    pub fn property(&self, locale: &Locale, key: &str) -> Option<&str> {
        self.properties
            .get(locale)
            .and_then(|bag| bag.get(key))
            .map(String::as_str)
    }

    /// Write a per-locale property.
    pub fn set_property(&mut self, locale: &Locale, key: &str, value: impl Into<String>) {
        self.properties
            .entry(locale.clone())
            .or_default()
            .insert(key.to_string(), value.into());
    }

    /// Read a per-locale header override.
    pub fn header(&self, locale: &Locale, name: &str) -> HeaderSetting {
        match self.headers.get(locale).and_then(|bag| bag.get(name)) {
            None => HeaderSetting::Unset,
            Some(value) if value.is_empty() => HeaderSetting::Empty,
            Some(value) => HeaderSetting::Value(value.clone()),
        }
    }

    /// Write a per-locale header override. `Unset` removes the override.
    pub fn set_header(&mut self, locale: &Locale, name: &str, setting: HeaderSetting) {
        let bag = self.headers.entry(locale.clone()).or_default();
        match setting {
            HeaderSetting::Unset => {
                bag.remove(name);
            }
            HeaderSetting::Empty => {
                bag.insert(name.to_string(), String::new());
            }
            HeaderSetting::Value(value) => {
                bag.insert(name.to_string(), value);
            }
        }
    }

    /// The node's own cache target for a locale.
    ///
    /// Nodes without the property, or with an unparseable historical
    /// value, resolve as [`CacheTarget::Inherit`].
    pub fn cache_target(&self, locale: &Locale) -> CacheTarget {
        match self.property(locale, PROPERTY_CACHE_TARGET) {
            None => CacheTarget::Inherit,
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(node = %self.id, locale = %locale, value = raw,
                    "unparseable cache.target, resolving as inherit");
                CacheTarget::Inherit
            }),
        }
    }

    /// A header override interpreted as whole seconds, when it holds one.
    pub fn header_seconds(&self, locale: &Locale, name: &str) -> Option<u64> {
        self.header(locale, name).value()?.parse().ok()
    }
}
