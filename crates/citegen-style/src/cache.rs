//! Caller-owned cache of loaded styles.
//!
//! Loading and parsing a style is done once per name; afterwards the shared
//! [`CitationStyle`] is handed out. The cache has no global state and no
//! automatic invalidation: callers decide when an entry is stale and call
//! [`StyleCache::remove`] or [`StyleCache::clear`].

use hashlink::LinkedHashMap;
use std::fmt::Display;
use std::sync::Arc;
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::CitationStyle;

/// Insertion-ordered cache of styles keyed by style name.
#[derive(Debug, Default)]
pub struct StyleCache {
    styles: LinkedHashMap<String, Arc<CitationStyle>>,
}

impl StyleCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a style, replacing any style previously registered under the same name.
    pub fn insert(&mut self, style: CitationStyle) -> Option<Arc<CitationStyle>> {
        self.styles
            .insert(style.name().to_string(), Arc::new(style))
    }

    pub fn get(&self, name: &str) -> Option<Arc<CitationStyle>> {
        self.styles.get(name).cloned()
    }

    /// Return the cached style, or run `load` to fetch its source and cache it.
    ///
    /// A failing loader or an unparsable source leaves the cache untouched.
    pub fn get_or_load<F, E>(&mut self, name: &str, load: F) -> Result<Arc<CitationStyle>>
    where
        F: FnOnce() -> std::result::Result<String, E>,
        E: Display,
    {
        if let Some(style) = self.styles.get(name) {
            return Ok(Arc::clone(style));
        }

        let source = load().map_err(|err| Error::Load {
            name: name.to_string(),
            message: err.to_string(),
        })?;
        let style = Arc::new(CitationStyle::from_source(name, source)?);
        debug!(style = name, title = style.title(), "cached citation style");
        self.styles.insert(name.to_string(), Arc::clone(&style));
        Ok(style)
    }

    /// Find the first cached style whose title matches exactly.
    pub fn find_by_title(&self, title: &str) -> Option<Arc<CitationStyle>> {
        self.styles
            .values()
            .find(|style| style.info().title.as_deref() == Some(title))
            .cloned()
    }

    pub fn remove(&mut self, name: &str) -> Option<Arc<CitationStyle>> {
        self.styles.remove(name)
    }

    pub fn clear(&mut self) {
        self.styles.clear();
    }

    /// Style names in load order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.styles.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}
