//! User-facing message lookup.
//!
//! Messages are keyed by their English text. The built-in catalog is
//! embedded from `messages.json` at compile time.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Key of the message shown when a citation or bibliography cannot be
/// generated.
pub const GENERATION_FAILED: &str = "Cannot generate bibliography based on selected citation style.";

const FALLBACK_LANGUAGE: &str = "en";

/// Language code to message table.
///
/// # Panics
///
/// Panics if the embedded JSON is invalid, which only happens if
/// `messages.json` is edited incorrectly.
static CATALOG: Lazy<HashMap<String, HashMap<String, String>>> = Lazy::new(|| {
    let json_data = include_str!("../messages.json");
    serde_json::from_str(json_data).expect("Invalid message catalog JSON")
});

/// Translates message keys.
pub trait Localization {
    /// The translated message; implementations fall back to `key` itself.
    fn lookup(&self, key: &str) -> String;
}

/// The embedded message catalog for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageCatalog {
    language: String,
}

impl MessageCatalog {
    /// Catalog for a language code such as `de` or `de-AT`. Unknown
    /// languages fall back to English.
    pub fn new(language: impl AsRef<str>) -> Self {
        let language = language.as_ref().trim().to_ascii_lowercase();
        let primary = language
            .split(['-', '_'])
            .next()
            .unwrap_or(FALLBACK_LANGUAGE);
        let language = if CATALOG.contains_key(primary) {
            primary.to_string()
        } else {
            FALLBACK_LANGUAGE.to_string()
        };
        MessageCatalog { language }
    }

    pub fn english() -> Self {
        MessageCatalog::new(FALLBACK_LANGUAGE)
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Language codes with a built-in catalog, sorted.
    pub fn languages() -> Vec<&'static str> {
        let mut languages: Vec<&'static str> = CATALOG.keys().map(String::as_str).collect();
        languages.sort_unstable();
        languages
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        MessageCatalog::english()
    }
}

impl Localization for MessageCatalog {
    fn lookup(&self, key: &str) -> String {
        [self.language.as_str(), FALLBACK_LANGUAGE]
            .iter()
            .find_map(|language| CATALOG.get(*language).and_then(|messages| messages.get(key)))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}
