//! Style metadata types.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::parser::parse_style_info;

/// Style class: "in-text" or "note".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleClass {
    /// In-text citations (author-date, numeric).
    InText,
    /// Note-based citations (footnotes, endnotes).
    Note,
}

/// The `citation-format` category of a style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CitationFormat {
    AuthorDate,
    Author,
    Numeric,
    Label,
    Note,
}

impl CitationFormat {
    pub(crate) fn from_attr(value: &str) -> Option<Self> {
        match value {
            "author-date" => Some(CitationFormat::AuthorDate),
            "author" => Some(CitationFormat::Author),
            "numeric" => Some(CitationFormat::Numeric),
            "label" => Some(CitationFormat::Label),
            "note" => Some(CitationFormat::Note),
            _ => None,
        }
    }
}

/// Metadata read from the root `<style>` element and its `<info>` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleInfo {
    pub title: Option<String>,
    pub title_short: Option<String>,
    /// Style ID (URI).
    pub id: Option<String>,
    pub class: StyleClass,
    /// CSL version (e.g., "1.0").
    pub version: Option<String>,
    /// Default locale for the style (e.g., "en-US").
    pub default_locale: Option<String>,
    pub citation_format: Option<CitationFormat>,
    /// `href` of an `independent-parent` link, for dependent styles.
    pub independent_parent: Option<String>,
    pub has_bibliography: bool,
    /// Whether `<bibliography hanging-indent="true">` is set.
    pub hanging_indent: bool,
}

impl StyleInfo {
    pub fn is_dependent(&self) -> bool {
        self.independent_parent.is_some()
    }
}

/// A named style definition together with its parsed metadata.
///
/// The source is shared so that cached styles can be handed out cheaply.
#[derive(Debug, Clone)]
pub struct CitationStyle {
    name: String,
    source: Arc<str>,
    info: StyleInfo,
}

impl CitationStyle {
    /// Parse the metadata of `source` and bind it to `name`.
    pub fn from_source(name: impl Into<String>, source: impl Into<Arc<str>>) -> Result<Self> {
        let source = source.into();
        let info = parse_style_info(&source)?;
        Ok(CitationStyle {
            name: name.into(),
            source,
            info,
        })
    }

    /// The name the style was registered under (usually its file name).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn info(&self) -> &StyleInfo {
        &self.info
    }

    /// Display title, falling back to the style name.
    pub fn title(&self) -> &str {
        self.info.title.as_deref().unwrap_or(&self.name)
    }

    pub fn is_numeric(&self) -> bool {
        self.info.citation_format == Some(CitationFormat::Numeric)
    }

    pub fn has_bibliography(&self) -> bool {
        self.info.has_bibliography
    }
}

impl fmt::Display for CitationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}
