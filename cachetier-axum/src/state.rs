use std::collections::HashMap;
use std::sync::Arc;

use cachetier::{AdminConfig, Capabilities, Translator};
use cachetier_core::{BanClient, Locale, NodeRepository, Site, SiteId};

/// Shared state of the admin routes.
#[derive(Clone)]
pub struct AppState {
    pub(crate) repo: Arc<dyn NodeRepository>,
    pub(crate) ban: Arc<dyn BanClient>,
    pub(crate) translator: Arc<Translator>,
    pub(crate) sites: Arc<HashMap<SiteId, Site>>,
    pub(crate) locales: Arc<Vec<Locale>>,
    pub(crate) capabilities: Capabilities,
}

impl AppState {
    /// Assemble the state from configuration and the two collaborators.
    pub fn new(
        repo: Arc<dyn NodeRepository>,
        ban: Arc<dyn BanClient>,
        translator: Translator,
        config: AdminConfig,
        capabilities: Capabilities,
    ) -> Self {
        let locales = config.locales();
        let sites = config
            .sites
            .into_iter()
            .map(|site| {
                let site = site.into_site();
                (site.id().clone(), site)
            })
            .collect();
        AppState {
            repo,
            ban,
            translator: Arc::new(translator),
            sites: Arc::new(sites),
            locales: Arc::new(locales),
            capabilities,
        }
    }

    pub(crate) fn site(&self, id: &SiteId) -> Option<&Site> {
        self.sites.get(id)
    }
}
