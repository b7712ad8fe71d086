//! Citation style definitions for citegen.
//!
//! A style definition is an opaque source string (normally CSL XML) identified
//! by a name. This crate never interprets layout grammar; it only reads the
//! metadata callers need to pick and describe a style, and it provides an
//! explicit, caller-owned [`StyleCache`] for styles that have been loaded once.
//!
//! # Overview
//!
//! - [`parse_style_info`]: read the root `<style>` element and its `<info>`
//! - [`CitationStyle`]: a named style source together with its [`StyleInfo`]
//! - [`StyleCache`]: insertion-ordered cache keyed by style name
//!
//! # Example
//!
//! ```rust
//! use citegen_style::{CitationFormat, parse_style_info};
//!
//! let csl = r#"<?xml version="1.0" encoding="utf-8"?>
//! <style xmlns="http://purl.org/net/xbiblio/csl" class="in-text" version="1.0">
//!   <info>
//!     <title>Numeric Test</title>
//!     <category citation-format="numeric"/>
//!   </info>
//!   <citation><layout><text variable="citation-number"/></layout></citation>
//! </style>"#;
//!
//! let info = parse_style_info(csl).unwrap();
//! assert_eq!(info.title.as_deref(), Some("Numeric Test"));
//! assert_eq!(info.citation_format, Some(CitationFormat::Numeric));
//! ```
//!
//! Anything that is not a `<style>` document is rejected:
//!
//! ```rust
//! use citegen_style::parse_style_info;
//!
//! let err = parse_style_info("faulty citation style").unwrap_err();
//! assert_eq!(err.code(), "CG-1-2");
//! ```

pub mod cache;
pub mod error;
pub mod parser;
pub mod types;

pub use cache::StyleCache;
pub use error::{Error, Result};
pub use parser::parse_style_info;
pub use types::*;
