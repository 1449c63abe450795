//! The cache-invalidation seam.
//!
//! The transport towards the HTTP accelerator (ban-request syntax,
//! connection handling) is an external capability; this crate only
//! defines the contract and a no-op implementation.

use async_trait::async_trait;
use thiserror::Error;

use crate::locale::Locale;
use crate::node::Node;

/// Error type for invalidation requests.
#[derive(Debug, Error)]
pub enum BanError {
    /// The accelerator could not be reached or rejected the request.
    #[error(transparent)]
    Transport(Box<dyn std::error::Error + Send + Sync>),
}

/// Issue cache-invalidation ("ban") instructions for content nodes.
///
/// A single best-effort call per trigger; implementations must surface
/// transport failures through the returned error, never swallow them.
#[async_trait]
pub trait BanClient: Send + Sync {
    /// Ban the node's URL under the given base URL, optionally covering
    /// all descendants.
    async fn ban_node(
        &self,
        node: &Node,
        base_url: &str,
        locale: &Locale,
        recursive: bool,
    ) -> Result<(), BanError>;
}

/// Ban client that logs the request and succeeds.
///
/// Useful for environments without a front-end accelerator.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopBanClient;

#[async_trait]
impl BanClient for NoopBanClient {
    async fn ban_node(
        &self,
        node: &Node,
        base_url: &str,
        locale: &Locale,
        recursive: bool,
    ) -> Result<(), BanError> {
        tracing::debug!(node = %node.id(), base_url, locale = %locale, recursive,
            "ban request dropped (no accelerator configured)");
        Ok(())
    }
}
