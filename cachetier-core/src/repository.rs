//! The persistence seam for content nodes.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::node::{Node, NodeId};
use crate::site::SiteId;

/// Load and save content nodes.
///
/// Implementations own node identity and versioning: `save` produces a
/// new revision and records a human-readable change message. Conflict
/// semantics of the threaded `revision` belong to the implementation;
/// callers only pass it through.
#[async_trait]
pub trait NodeRepository: Send + Sync {
    /// Load a node from a site at a given revision.
    async fn load(&self, site: &SiteId, revision: u64, id: &NodeId) -> Result<Node, CoreError>;

    /// Persist a node with a change description, returning the saved
    /// node at its new revision.
    async fn save(
        &self,
        site: &SiteId,
        node: Node,
        change_message: &str,
    ) -> Result<Node, CoreError>;
}
