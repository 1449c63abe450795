//! In-memory [`NodeRepository`] implementation.
//!
//! Keeps per-site node maps behind a [`DashMap`], with a monotonically
//! increasing revision per site and a change log recording every save
//! message. Backs the admin service in development and the integration
//! tests everywhere.

use std::collections::HashMap;

use async_trait::async_trait;
use dashmap::DashMap;

use cachetier_core::{CoreError, Node, NodeId, NodeRepository, SiteId};

#[derive(Debug, Default)]
struct SiteState {
    revision: u64,
    nodes: HashMap<NodeId, Node>,
    change_log: Vec<String>,
}

/// Thread-safe in-memory node store.
#[derive(Debug, Default)]
pub struct InMemoryNodes {
    sites: DashMap<SiteId, SiteState>,
}

impl InMemoryNodes {
    /// Create an empty store.
    pub fn new() -> Self {
        InMemoryNodes::default()
    }

    /// Register a site at an initial revision.
    pub fn insert_site(&self, site: impl Into<SiteId>, revision: u64) {
        self.sites.entry(site.into()).or_default().revision = revision;
    }

    /// Seed a node into a site without going through `save`.
    pub fn insert_node(&self, site: impl Into<SiteId>, node: Node) {
        self.sites
            .entry(site.into())
            .or_default()
            .nodes
            .insert(node.id().clone(), node);
    }

    /// The change messages recorded for a site, in save order.
    pub fn change_log(&self, site: &SiteId) -> Vec<String> {
        self.sites
            .get(site)
            .map(|state| state.change_log.clone())
            .unwrap_or_default()
    }

    /// The current revision of a site, if registered.
    pub fn revision(&self, site: &SiteId) -> Option<u64> {
        self.sites.get(site).map(|state| state.revision)
    }
}

#[async_trait]
impl NodeRepository for InMemoryNodes {
    async fn load(&self, site: &SiteId, revision: u64, id: &NodeId) -> Result<Node, CoreError> {
        let state = self
            .sites
            .get(site)
            .ok_or_else(|| CoreError::SiteNotFound(site.clone()))?;
        state
            .nodes
            .get(id)
            .cloned()
            .ok_or_else(|| CoreError::NodeNotFound {
                site: site.clone(),
                revision,
                node: id.clone(),
            })
    }

    async fn save(&self, site: &SiteId, node: Node, change_message: &str) -> Result<Node, CoreError> {
        let mut state = self
            .sites
            .get_mut(site)
            .ok_or_else(|| CoreError::SiteNotFound(site.clone()))?;
        state.nodes.insert(node.id().clone(), node.clone());
        state.revision += 1;
        state.change_log.push(change_message.to_string());
        tracing::debug!(site = %site, node = %node.id(), revision = state.revision, change_message,
            "node saved");
        Ok(node)
    }
}
