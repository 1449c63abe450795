//! The tiered cache-target policy model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which caches a node's rendered responses may be stored in.
///
/// Persisted per locale under the node's `cache.target` property. Nodes
/// without the property resolve as [`CacheTarget::Inherit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CacheTarget {
    /// Do not cache at all; `max-age` and `s-maxage` are cleared to the
    /// explicit-empty sentinel.
    None,
    /// Cache in shared (intermediate) caches only; `max-age` is forced
    /// to `0` while `s-maxage` carries the configured duration.
    Intermediate,
    /// Cache everywhere; `max-age` and `s-maxage` hold independent
    /// durations.
    All,
    /// No policy of its own; the effective policy comes from the
    /// closest ancestor with a concrete target.
    #[default]
    Inherit,
}

impl CacheTarget {
    /// All targets, in the order they are offered to operators.
    pub const VALUES: [CacheTarget; 4] = [
        CacheTarget::Inherit,
        CacheTarget::None,
        CacheTarget::Intermediate,
        CacheTarget::All,
    ];

    /// The persisted property value for this target.
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheTarget::None => "none",
            CacheTarget::Intermediate => "intermediate",
            CacheTarget::All => "all",
            CacheTarget::Inherit => "inherit",
        }
    }

    /// Translation key for the operator-facing label of this target.
    pub fn label_key(&self) -> String {
        format!("label.cache.target.{}", self.as_str())
    }
}

impl fmt::Display for CacheTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a cache-target value outside the known tiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown cache target: {0}")]
pub struct UnknownTarget(pub String);

impl FromStr for CacheTarget {
    type Err = UnknownTarget;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(CacheTarget::None),
            "intermediate" => Ok(CacheTarget::Intermediate),
            "all" => Ok(CacheTarget::All),
            "inherit" => Ok(CacheTarget::Inherit),
            other => Err(UnknownTarget(other.to_string())),
        }
    }
}
