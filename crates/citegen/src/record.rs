//! Bibliographic records and record collections.
//!
//! A [`Record`] is a case-insensitive mapping from field name to raw text, an
//! optional entry type tag, and an optional citation key. The inheritance
//! link to a parent record is the `crossref` field. A [`Collection`] owns the
//! records of one database together with its [`Dialect`] and resolves
//! inheritance links by citation key.

use hashlink::LinkedHashMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::Dialect;

/// Well-known field names. Field names are always stored lower-cased.
pub mod field {
    pub const ABSTRACT: &str = "abstract";
    pub const ADDRESS: &str = "address";
    pub const AUTHOR: &str = "author";
    pub const BOOKTITLE: &str = "booktitle";
    pub const CHAPTER: &str = "chapter";
    pub const COMMENT: &str = "comment";
    pub const CROSSREF: &str = "crossref";
    pub const DATE: &str = "date";
    pub const DOI: &str = "doi";
    pub const EDITION: &str = "edition";
    pub const EDITOR: &str = "editor";
    pub const EID: &str = "eid";
    pub const INSTITUTION: &str = "institution";
    pub const ISBN: &str = "isbn";
    pub const ISSN: &str = "issn";
    pub const ISSUE: &str = "issue";
    pub const JOURNAL: &str = "journal";
    pub const JOURNALTITLE: &str = "journaltitle";
    pub const LANGUAGE: &str = "language";
    pub const LOCATION: &str = "location";
    pub const MONTH: &str = "month";
    pub const NOTE: &str = "note";
    pub const NUMBER: &str = "number";
    pub const ORGANIZATION: &str = "organization";
    pub const PAGES: &str = "pages";
    pub const PAGETOTAL: &str = "pagetotal";
    pub const PUBLISHER: &str = "publisher";
    pub const SCHOOL: &str = "school";
    pub const SERIES: &str = "series";
    pub const SHORTTITLE: &str = "shorttitle";
    pub const TITLE: &str = "title";
    pub const TRANSLATOR: &str = "translator";
    pub const URL: &str = "url";
    pub const VOLUME: &str = "volume";
    pub const YEAR: &str = "year";
}

/// One bibliographic record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RecordData", into = "RecordData")]
pub struct Record {
    citation_key: Option<String>,
    entry_type: Option<String>,
    fields: LinkedHashMap<String, String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.citation_key = Some(key.into());
        self
    }

    /// Set the entry type tag (`article`, `book`, ...). Stored lower-cased.
    pub fn with_type(mut self, entry_type: impl AsRef<str>) -> Self {
        self.entry_type = Some(entry_type.as_ref().to_ascii_lowercase());
        self
    }

    pub fn with_field(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.set_field(name, value);
        self
    }

    /// Set a field, returning the previous value.
    pub fn set_field(&mut self, name: impl AsRef<str>, value: impl Into<String>) -> Option<String> {
        self.fields
            .replace(name.as_ref().to_ascii_lowercase(), value.into())
    }

    pub fn remove_field(&mut self, name: &str) -> Option<String> {
        self.fields.remove(&name.to_ascii_lowercase())
    }

    /// Raw value of a field, matched case-insensitively.
    pub fn field(&self, name: &str) -> Option<&str> {
        match self.fields.get(name) {
            Some(value) => Some(value.as_str()),
            None => self
                .fields
                .get(&name.to_ascii_lowercase())
                .map(String::as_str),
        }
    }

    /// Raw value of a field, treating empty or whitespace-only values as absent.
    pub fn non_empty_field(&self, name: &str) -> Option<&str> {
        self.field(name).filter(|value| !value.trim().is_empty())
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.non_empty_field(name).is_some()
    }

    /// Fields in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn citation_key(&self) -> Option<&str> {
        self.citation_key.as_deref()
    }

    pub fn entry_type(&self) -> Option<&str> {
        self.entry_type.as_deref()
    }

    /// Citation key of the parent record this record inherits from.
    pub fn parent_key(&self) -> Option<&str> {
        self.non_empty_field(field::CROSSREF).map(str::trim)
    }
}

#[derive(Clone, Serialize, Deserialize)]
struct RecordData {
    #[serde(default, alias = "id", alias = "citation-key", skip_serializing_if = "Option::is_none")]
    key: Option<String>,
    #[serde(default, rename = "type", alias = "entry-type", skip_serializing_if = "Option::is_none")]
    entry_type: Option<String>,
    #[serde(default)]
    fields: LinkedHashMap<String, String>,
}

impl From<RecordData> for Record {
    fn from(data: RecordData) -> Self {
        let mut record = Record {
            citation_key: data.key,
            entry_type: data.entry_type.map(|t| t.to_ascii_lowercase()),
            fields: LinkedHashMap::new(),
        };
        for (name, value) in data.fields {
            record.set_field(name, value);
        }
        record
    }
}

impl From<Record> for RecordData {
    fn from(record: Record) -> Self {
        RecordData {
            key: record.citation_key,
            entry_type: record.entry_type,
            fields: record.fields,
        }
    }
}

/// Lookup from a citation key to the record it identifies.
pub trait LinkResolver {
    fn resolve(&self, key: &str) -> Option<&Record>;
}

/// A resolver that knows no records, for normalizing records without context.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLinks;

impl LinkResolver for NoLinks {
    fn resolve(&self, _key: &str) -> Option<&Record> {
        None
    }
}

/// A record seen through its one-level inheritance link.
///
/// Fields the record lacks (absent or empty) are taken from the parent. The
/// parent's own link is never followed and `crossref` itself is not inherited.
#[derive(Debug, Clone, Copy)]
pub struct InheritedRecord<'a> {
    record: &'a Record,
    parent: Option<&'a Record>,
}

impl<'a> InheritedRecord<'a> {
    pub fn new(record: &'a Record, parent: Option<&'a Record>) -> Self {
        InheritedRecord { record, parent }
    }

    pub fn standalone(record: &'a Record) -> Self {
        InheritedRecord::new(record, None)
    }

    pub fn record(&self) -> &'a Record {
        self.record
    }

    pub fn parent(&self) -> Option<&'a Record> {
        self.parent
    }

    /// Non-empty value of a field, falling back to the parent.
    pub fn field(&self, name: &str) -> Option<&'a str> {
        self.record.non_empty_field(name).or_else(|| {
            if name.eq_ignore_ascii_case(field::CROSSREF) {
                return None;
            }
            self.parent.and_then(|parent| parent.non_empty_field(name))
        })
    }

    pub fn entry_type(&self) -> Option<&'a str> {
        self.record.entry_type()
    }
}

/// The records of one database plus the dialect they follow.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    dialect: Dialect,
    records: Vec<Record>,
    by_key: HashMap<String, usize>,
}

impl Collection {
    pub fn new(dialect: Dialect) -> Self {
        Collection {
            dialect,
            records: Vec::new(),
            by_key: HashMap::new(),
        }
    }

    pub fn with_records(dialect: Dialect, records: impl IntoIterator<Item = Record>) -> Self {
        let mut collection = Collection::new(dialect);
        for record in records {
            collection.push(record);
        }
        collection
    }

    /// Add a record. When two records share a key, the first one wins lookups.
    pub fn push(&mut self, record: Record) {
        if let Some(key) = record.citation_key() {
            self.by_key
                .entry(key.to_string())
                .or_insert(self.records.len());
        }
        self.records.push(record);
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn set_dialect(&mut self, dialect: Dialect) {
        self.dialect = dialect;
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, key: &str) -> Option<&Record> {
        self.by_key.get(key).map(|&index| &self.records[index])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl LinkResolver for Collection {
    fn resolve(&self, key: &str) -> Option<&Record> {
        self.get(key)
    }
}
