//! Effective cache-policy resolution.
//!
//! The effective policy of a node is derived, never stored: nodes with a
//! concrete target read their own header overrides (with per-target
//! coercions), nodes with `inherit` walk up the parent chain. Resolution
//! is an explicit iterative ascent with a visited-id set so a violated
//! tree invariant surfaces as [`CoreError::CycleDetected`] instead of an
//! infinite loop.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::locale::Locale;
use crate::node::{HEADER_MAX_AGE, HEADER_S_MAXAGE, Node};
use crate::repository::NodeRepository;
use crate::site::SiteId;
use crate::target::CacheTarget;

/// The cache directives effective for a node in a locale.
///
/// `target` is always a concrete tier (`inherit` never appears here; an
/// unresolvable inherit chain yields no policy at all).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectivePolicy {
    /// The concrete tier the directives apply to.
    pub target: CacheTarget,
    /// Browser cache duration in seconds, when asserted.
    pub max_age: Option<u64>,
    /// Shared cache duration in seconds, when asserted.
    pub shared_max_age: Option<u64>,
}

impl EffectivePolicy {
    fn direct(node: &Node, locale: &Locale, target: CacheTarget) -> Self {
        match target {
            CacheTarget::None => EffectivePolicy {
                target,
                max_age: None,
                shared_max_age: None,
            },
            CacheTarget::Intermediate => EffectivePolicy {
                target,
                max_age: Some(0),
                shared_max_age: node.header_seconds(locale, HEADER_S_MAXAGE),
            },
            CacheTarget::All => EffectivePolicy {
                target,
                max_age: node.header_seconds(locale, HEADER_MAX_AGE),
                shared_max_age: node.header_seconds(locale, HEADER_S_MAXAGE),
            },
            // Callers only construct direct policies for concrete tiers.
            CacheTarget::Inherit => unreachable!("inherit is resolved through the parent chain"),
        }
    }
}

/// Resolve the effective policy of `node` for `locale`.
///
/// Returns `Ok(None)` when the inherit chain reaches a root without any
/// ancestor asserting a concrete target: no caching directives apply.
pub async fn resolve_effective_policy(
    repo: &dyn NodeRepository,
    site: &SiteId,
    revision: u64,
    node: &Node,
    locale: &Locale,
) -> Result<Option<EffectivePolicy>, CoreError> {
    let mut visited: HashSet<_> = HashSet::new();
    let mut current = node.clone();

    loop {
        if !visited.insert(current.id().clone()) {
            return Err(CoreError::CycleDetected(current.id().clone()));
        }

        let target = current.cache_target(locale);
        if target != CacheTarget::Inherit {
            return Ok(Some(EffectivePolicy::direct(&current, locale, target)));
        }

        match current.parent() {
            Some(parent) => current = repo.load(site, revision, parent).await?,
            None => return Ok(None),
        }
    }
}
