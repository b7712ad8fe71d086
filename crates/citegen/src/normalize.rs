//! Record normalization: records in, style-processor input out.
//!
//! For each record this:
//!
//! 1. follows the record's inheritance link (one level) through a
//!    [`LinkResolver`],
//! 2. picks a raw value per variable with [`FieldFallbackResolver`],
//! 3. collapses line breaks into single spaces,
//! 4. decodes LaTeX escapes into the target [`Encoding`],
//! 5. prefixes DOIs with the resolver URL.

use std::borrow::Cow;
use tracing::{debug, warn};

use crate::latex;
use crate::names::parse_names;
use crate::record::{InheritedRecord, LinkResolver, Record};
use crate::resolver::{self, FieldFallbackResolver};
use crate::types::{Dialect, Encoding};
use crate::variable::{Variable, VariableMap};

/// Resolver URL prepended to DOI values.
pub const DOI_RESOLVER: &str = "https://doi.org/";

/// Replace every line break (`\r\n`, `\n` or `\r`) with one space.
pub fn collapse_line_breaks(text: &str) -> Cow<'_, str> {
    if !text.contains(['\n', '\r']) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.replace("\r\n", " ").replace(['\n', '\r'], " "))
}

/// Normalizes records of one dialect into one target encoding.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer {
    resolver: FieldFallbackResolver,
    encoding: Encoding,
}

impl Normalizer {
    pub fn new(dialect: Dialect, encoding: Encoding) -> Self {
        Normalizer {
            resolver: FieldFallbackResolver::new(dialect),
            encoding,
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.resolver.dialect()
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Normalize one record. `index` is the zero-based position of the
    /// record in its batch, used for the id of records without a key.
    pub fn normalize<L>(&self, record: &Record, index: usize, links: &L) -> VariableMap
    where
        L: LinkResolver + ?Sized,
    {
        let id = match record.citation_key() {
            Some(key) if !key.trim().is_empty() => key.to_string(),
            _ => format!("item-{}", index + 1),
        };

        let parent = record.parent_key().and_then(|key| {
            let parent = links.resolve(key);
            match parent {
                Some(_) => debug!(record = %id, parent = key, "inheriting fields from parent record"),
                None => warn!(record = %id, parent = key, "parent record not found; using own fields only"),
            }
            parent
        });
        let view = InheritedRecord::new(record, parent);

        let mut map = VariableMap::new(id, resolver::item_type(view.entry_type()));
        for resolved in self.resolver.resolve(&view) {
            let raw = collapse_line_breaks(&resolved.value);
            let variable = resolved.variable;
            let value = match variable {
                Variable::Doi => doi_link(&raw, self.encoding),
                _ => latex::decode(&raw, self.encoding),
            };
            if !map.insert(variable, value) {
                continue;
            }
            if variable.is_name() {
                map.set_names(variable, parse_names(&raw, self.encoding));
            }
        }

        debug!(
            record = map.id(),
            item_type = map.item_type(),
            variables = map.len(),
            "normalized record"
        );
        map
    }

    /// Normalize a batch, preserving order.
    pub fn normalize_all<L>(&self, records: &[Record], links: &L) -> Vec<VariableMap>
    where
        L: LinkResolver + ?Sized,
    {
        records
            .iter()
            .enumerate()
            .map(|(index, record)| self.normalize(record, index, links))
            .collect()
    }
}

/// Normalize a single record on its own.
pub fn normalize<L>(record: &Record, dialect: Dialect, links: &L, encoding: Encoding) -> VariableMap
where
    L: LinkResolver + ?Sized,
{
    Normalizer::new(dialect, encoding).normalize(record, 0, links)
}

/// DOIs are linked as given: whitespace trimmed, no LaTeX decoding, and
/// markup escaped only in rich encoding.
fn doi_link(raw: &str, encoding: Encoding) -> String {
    let doi = raw.trim();
    if doi.is_empty() {
        return String::new();
    }
    match encoding {
        Encoding::Rich => format!("{}{}", DOI_RESOLVER, quick_xml::escape::partial_escape(doi)),
        Encoding::Plain => format!("{}{}", DOI_RESOLVER, doi),
    }
}
