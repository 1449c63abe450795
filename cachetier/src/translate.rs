use std::collections::HashMap;

use cachetier_core::Locale;

use crate::error::AdminError;

/// Locale-aware message lookup backed by per-locale key/value catalogs.
///
/// Catalogs are plain YAML mappings of locale to message key to template;
/// templates may carry `{name}` placeholders filled in by
/// [`translate_with`](Translator::translate_with). A missing key falls
/// back to the key itself so untranslated surfaces stay debuggable.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    catalogs: HashMap<Locale, HashMap<String, String>>,
}

impl Translator {
    /// Create an empty translator (every lookup falls back to the key).
    pub fn new() -> Self {
        Translator::default()
    }

    /// Load catalogs from a YAML document.
    ///
    /// ```yaml
    /// en:
    ///   label.cache.target.all: Cache everywhere
    ///   success.node.saved: Saved cache properties for {node}
    /// ```
    pub fn from_yaml(yaml: &str) -> Result<Self, AdminError> {
        let raw: HashMap<String, HashMap<String, String>> = serde_saphyr::from_str(yaml)
            .map_err(|err| AdminError::Config(format!("invalid translation catalog: {err}")))?;
        let catalogs = raw
            .into_iter()
            .map(|(locale, messages)| (Locale::new(locale), messages))
            .collect();
        Ok(Translator { catalogs })
    }

    /// Register a single message, mainly for tests and defaults.
    pub fn insert(&mut self, locale: &Locale, key: &str, message: impl Into<String>) {
        self.catalogs
            .entry(locale.clone())
            .or_default()
            .insert(key.to_string(), message.into());
    }

    /// Look up a message for a locale, falling back to the key.
    pub fn translate(&self, locale: &Locale, key: &str) -> String {
        self.catalogs
            .get(locale)
            .and_then(|catalog| catalog.get(key))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    /// Look up a message and substitute `{name}` placeholders.
    pub fn translate_with(&self, locale: &Locale, key: &str, params: &[(&str, &str)]) -> String {
        let mut message = self.translate(locale, key);
        for (name, value) in params {
            message = message.replace(&format!("{{{name}}}"), value);
        }
        message
    }
}
