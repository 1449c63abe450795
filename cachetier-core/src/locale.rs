//! Locale identifier type.

use std::fmt;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// A locale code such as `en` or `nl_BE`.
///
/// Cheap to clone; backed by an inline small string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale(SmolStr);

impl Locale {
    /// Create a locale from a code.
    pub fn new(code: impl AsRef<str>) -> Self {
        Locale(SmolStr::new(code.as_ref()))
    }

    /// The locale code as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl From<&str> for Locale {
    fn from(code: &str) -> Self {
        Locale::new(code)
    }
}
