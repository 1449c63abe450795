use std::collections::HashMap;

use serde::Deserialize;

use cachetier_core::{Locale, Site};

use crate::error::AdminError;

/// Top-level administrative configuration, loaded from YAML.
///
/// ```yaml
/// locales: [en, nl]
/// sites:
///   - id: main
///     revision: 1
///     names:
///       en: Main site
///     base_urls:
///       en: "https://example.com"
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AdminConfig {
    /// The locales offered in the admin locale switcher.
    #[serde(default)]
    pub locales: Vec<String>,
    /// The configured sites.
    pub sites: Vec<SiteConfig>,
}

/// Configuration of one site.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SiteConfig {
    /// Site identifier.
    pub id: String,
    /// Current revision of the site tree.
    #[serde(default = "default_revision")]
    pub revision: u64,
    /// Per-locale display names.
    #[serde(default)]
    pub names: HashMap<String, String>,
    /// Per-locale base URLs; absent locales fall back to the request URL.
    #[serde(default)]
    pub base_urls: HashMap<String, String>,
}

fn default_revision() -> u64 {
    1
}

impl SiteConfig {
    /// Build the model [`Site`] from this configuration.
    pub fn into_site(self) -> Site {
        let mut site = Site::new(self.id.as_str(), self.revision);
        for (locale, name) in self.names {
            site.set_name(&Locale::new(locale), name);
        }
        for (locale, url) in self.base_urls {
            site.set_base_url(&Locale::new(locale), url);
        }
        site
    }
}

impl AdminConfig {
    /// Parse a YAML configuration document.
    pub fn from_yaml(yaml: &str) -> Result<Self, AdminError> {
        serde_saphyr::from_str(yaml)
            .map_err(|err| AdminError::Config(format!("invalid admin configuration: {err}")))
    }

    /// The configured locales as model types.
    pub fn locales(&self) -> Vec<Locale> {
        self.locales.iter().map(Locale::new).collect()
    }
}
