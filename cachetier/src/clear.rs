//! The cache-invalidation trigger.

use cachetier_core::{BanClient, Locale, Node, Site};

use crate::error::AdminError;

/// Issue a best-effort ban for a node towards the front-end accelerator.
///
/// The ban runs against the site's configured base URL for the locale,
/// falling back to the inbound request's own base URL when the site has
/// none configured. A single call is issued; transport failure surfaces
/// as [`AdminError::Ban`] so the caller can report it to the operator.
pub async fn clear_cache(
    ban: &dyn BanClient,
    site: &Site,
    node: &Node,
    locale: &Locale,
    recursive: bool,
    request_base_url: &str,
) -> Result<(), AdminError> {
    let base_url = site.base_url(locale).unwrap_or(request_base_url);
    ban.ban_node(node, base_url, locale, recursive).await?;
    tracing::info!(node = %node.id(), locale = %locale, base_url, recursive, "node cache cleared");
    Ok(())
}
