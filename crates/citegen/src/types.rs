//! Closed option enums passed explicitly through the pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Field schema a record collection follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dialect {
    /// The narrower BibTeX field set.
    #[serde(alias = "bibtex")]
    Legacy,
    /// The BibLaTeX superset, which adds `issue`, `eid`, `journaltitle`, `date`, ...
    #[default]
    #[serde(alias = "biblatex")]
    Extended,
}

/// Target output encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Encoding {
    /// Markup-bearing output (HTML entities and tags).
    #[serde(alias = "html")]
    Rich,
    /// Markup-free text.
    #[default]
    #[serde(alias = "text")]
    Plain,
}

/// What the style processor is asked to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderMode {
    /// A single in-text citation for all items.
    Citation,
    /// One entry per item, in input order.
    Bibliography,
}

/// Defaults for callers that do not carry their own collection settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GenerationOptions {
    pub dialect: Dialect,
    pub encoding: Encoding,
}

/// Error returned when parsing an option name fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct ParseOptionError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

impl FromStr for Dialect {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "legacy" | "bibtex" => Ok(Dialect::Legacy),
            "extended" | "biblatex" => Ok(Dialect::Extended),
            _ => Err(ParseOptionError {
                kind: "dialect",
                value: s.to_string(),
                expected: "legacy, bibtex, extended, biblatex",
            }),
        }
    }
}

impl FromStr for Encoding {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rich" | "html" => Ok(Encoding::Rich),
            "plain" | "text" => Ok(Encoding::Plain),
            _ => Err(ParseOptionError {
                kind: "encoding",
                value: s.to_string(),
                expected: "rich, html, plain, text",
            }),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Legacy => write!(f, "legacy"),
            Dialect::Extended => write!(f, "extended"),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Rich => write!(f, "rich"),
            Encoding::Plain => write!(f, "plain"),
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderMode::Citation => write!(f, "citation"),
            RenderMode::Bibliography => write!(f, "bibliography"),
        }
    }
}
