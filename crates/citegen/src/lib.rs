//! Citation and bibliography generation for BibTeX and BibLaTeX records.
//!
//! The pipeline turns raw, LaTeX-encoded records into formatted output:
//!
//! ```text
//! Records + Collection ──▶ Normalizer ──▶ VariableMaps ──▶ StyleProcessor ──▶ OutputFormatter
//!   (raw fields,           (inheritance,   (CSL variables,   (style rendering,   (rich or plain
//!    dialect)               fallbacks,      per encoding)     HTML-like markup)    text)
//!                           decoding)
//! ```
//!
//! Style rendering itself is delegated to a [`StyleProcessor`]
//! implementation. Everything around it is handled here: mapping record
//! fields to style variables per [`Dialect`], one-level inheritance through
//! `crossref`, LaTeX decoding per [`Encoding`], DOI and article-number
//! prefixes, and the localized fallback message when a style fails.
//!
//! # Example
//!
//! ```
//! use citegen::{
//!     CitationGenerator, Collection, Dialect, Encoding, Record, RenderMode, StyleParseError,
//!     StyleProcessor, Variable, VariableMap,
//! };
//!
//! struct TitlesOnly;
//!
//! impl StyleProcessor for TitlesOnly {
//!     fn render(
//!         &self,
//!         items: &[VariableMap],
//!         _style_source: &str,
//!         mode: RenderMode,
//!     ) -> Result<Vec<String>, StyleParseError> {
//!         let titles = items
//!             .iter()
//!             .map(|item| format!("<i>{}</i>\n", item.get(Variable::Title).unwrap_or("")));
//!         Ok(match mode {
//!             RenderMode::Citation => vec![titles.collect()],
//!             RenderMode::Bibliography => titles.collect(),
//!         })
//!     }
//! }
//!
//! let records = vec![Record::new().with_field("title", r#"Sch{\"o}n"#)];
//! let collection = Collection::with_records(Dialect::Extended, records.clone());
//! let generator = CitationGenerator::new(TitlesOnly);
//!
//! let rich = generator.generate_bibliography(&records, "<style/>", Encoding::Rich, &collection);
//! assert_eq!(rich, vec!["<i>Sch&ouml;n</i>\n"]);
//! let plain = generator.generate_bibliography(&records, "<style/>", Encoding::Plain, &collection);
//! assert_eq!(plain, vec!["Schön\n"]);
//! ```

pub mod entities;
pub mod error;
pub mod format;
pub mod generator;
pub mod l10n;
pub mod latex;
pub mod names;
pub mod normalize;
pub mod processor;
pub mod record;
pub mod resolver;
pub mod types;
pub mod variable;

pub use error::{Error, Result};
pub use generator::CitationGenerator;
pub use l10n::{Localization, MessageCatalog};
pub use names::Name;
pub use normalize::{Normalizer, normalize};
pub use processor::{StyleParseError, StyleProcessor};
pub use record::{Collection, InheritedRecord, LinkResolver, NoLinks, Record};
pub use resolver::FieldFallbackResolver;
pub use types::{Dialect, Encoding, GenerationOptions, ParseOptionError, RenderMode};
pub use variable::{Variable, VariableMap};
