//! Error types for model and repository operations.

use thiserror::Error;

use crate::node::NodeId;
use crate::site::SiteId;

/// Error type for node loading, saving and policy resolution.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The requested site is not known to the repository.
    #[error("site {0} not found")]
    SiteNotFound(SiteId),

    /// The requested node does not exist in the site/revision.
    #[error("node {node} not found in site {site} revision {revision}")]
    NodeNotFound {
        /// Site the lookup ran against.
        site: SiteId,
        /// Revision the lookup ran against.
        revision: u64,
        /// The missing node id.
        node: NodeId,
    },

    /// A node was revisited while walking the parent chain.
    ///
    /// The tree invariant (no cycles) is violated; this is a fatal
    /// configuration error, never retried or looped over.
    #[error("cycle detected in node tree at {0}")]
    CycleDetected(NodeId),

    /// Repository storage failure.
    #[error(transparent)]
    Storage(Box<dyn std::error::Error + Send + Sync>),
}
