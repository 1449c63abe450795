//! Sites: the roots under which node trees live.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::locale::Locale;

/// Identifier of a site.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteId(SmolStr);

impl SiteId {
    /// Create a site id.
    pub fn new(id: impl AsRef<str>) -> Self {
        SiteId(SmolStr::new(id.as_ref()))
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl From<&str> for SiteId {
    fn from(id: &str) -> Self {
        SiteId::new(id)
    }
}

/// A site with its per-locale display names and base URLs.
///
/// The base URL is optional per locale; callers fall back to the inbound
/// request's own base URL when none is configured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    id: SiteId,
    revision: u64,
    #[serde(default)]
    names: HashMap<Locale, String>,
    #[serde(default)]
    base_urls: HashMap<Locale, String>,
}

impl Site {
    /// Create a site at the given revision.
    pub fn new(id: impl Into<SiteId>, revision: u64) -> Self {
        Site {
            id: id.into(),
            revision,
            names: HashMap::new(),
            base_urls: HashMap::new(),
        }
    }

    /// The site id.
    pub fn id(&self) -> &SiteId {
        &self.id
    }

    /// The revision this site handle refers to.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The display name for a locale.
    pub fn name(&self, locale: &Locale) -> Option<&str> {
        self.names.get(locale).map(String::as_str)
    }

    /// The configured base URL for a locale, if any.
    pub fn base_url(&self, locale: &Locale) -> Option<&str> {
        self.base_urls.get(locale).map(String::as_str)
    }

    /// Set the display name for a locale.
    pub fn set_name(&mut self, locale: &Locale, name: impl Into<String>) {
        self.names.insert(locale.clone(), name.into());
    }

    /// Set the base URL for a locale.
    pub fn set_base_url(&mut self, locale: &Locale, url: impl Into<String>) {
        self.base_urls.insert(locale.clone(), url.into());
    }
}
