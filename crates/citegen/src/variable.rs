//! Normalized style-processor input.
//!
//! A [`VariableMap`] maps citation-style variables to non-empty text values,
//! with structured [`Name`] lists alongside the text of name variables. It
//! serializes to CSL-JSON so any CSL processor can consume it.

use quick_xml::escape::partial_escape;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::names::Name;
use crate::types::ParseOptionError;

/// A citation-style variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Variable {
    Author,
    Editor,
    Translator,
    Title,
    TitleShort,
    ContainerTitle,
    CollectionTitle,
    Publisher,
    PublisherPlace,
    Edition,
    Volume,
    Issue,
    /// The article number (CSL `number`).
    ArticleNumber,
    Page,
    NumberOfPages,
    ChapterNumber,
    Issued,
    Doi,
    Url,
    Isbn,
    Issn,
    Language,
    Note,
    Abstract,
}

impl Variable {
    pub const ALL: [Variable; 24] = [
        Variable::Author,
        Variable::Editor,
        Variable::Translator,
        Variable::Title,
        Variable::TitleShort,
        Variable::ContainerTitle,
        Variable::CollectionTitle,
        Variable::Publisher,
        Variable::PublisherPlace,
        Variable::Edition,
        Variable::Volume,
        Variable::Issue,
        Variable::ArticleNumber,
        Variable::Page,
        Variable::NumberOfPages,
        Variable::ChapterNumber,
        Variable::Issued,
        Variable::Doi,
        Variable::Url,
        Variable::Isbn,
        Variable::Issn,
        Variable::Language,
        Variable::Note,
        Variable::Abstract,
    ];

    /// The CSL variable name.
    pub fn csl_name(self) -> &'static str {
        match self {
            Variable::Author => "author",
            Variable::Editor => "editor",
            Variable::Translator => "translator",
            Variable::Title => "title",
            Variable::TitleShort => "title-short",
            Variable::ContainerTitle => "container-title",
            Variable::CollectionTitle => "collection-title",
            Variable::Publisher => "publisher",
            Variable::PublisherPlace => "publisher-place",
            Variable::Edition => "edition",
            Variable::Volume => "volume",
            Variable::Issue => "issue",
            Variable::ArticleNumber => "number",
            Variable::Page => "page",
            Variable::NumberOfPages => "number-of-pages",
            Variable::ChapterNumber => "chapter-number",
            Variable::Issued => "issued",
            Variable::Doi => "DOI",
            Variable::Url => "URL",
            Variable::Isbn => "ISBN",
            Variable::Issn => "ISSN",
            Variable::Language => "language",
            Variable::Note => "note",
            Variable::Abstract => "abstract",
        }
    }

    pub fn is_name(self) -> bool {
        matches!(self, Variable::Author | Variable::Editor | Variable::Translator)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.csl_name())
    }
}

impl FromStr for Variable {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variable::ALL
            .into_iter()
            .find(|v| v.csl_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseOptionError {
                kind: "variable",
                value: s.to_string(),
                expected: "a CSL variable name such as title, issue or container-title",
            })
    }
}

/// Style-processor input for one record.
///
/// Values of a map normalized for [`Encoding::Rich`] are markup-safe
/// fragments; values normalized for [`Encoding::Plain`] are literal text.
/// Empty values are never stored.
///
/// [`Encoding::Rich`]: crate::types::Encoding::Rich
/// [`Encoding::Plain`]: crate::types::Encoding::Plain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableMap {
    id: String,
    item_type: String,
    values: BTreeMap<Variable, String>,
    names: BTreeMap<Variable, Vec<Name>>,
}

impl VariableMap {
    pub fn new(id: impl Into<String>, item_type: impl Into<String>) -> Self {
        VariableMap {
            id: id.into(),
            item_type: item_type.into(),
            values: BTreeMap::new(),
            names: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The CSL item type (`article-journal`, `book`, ...).
    pub fn item_type(&self) -> &str {
        &self.item_type
    }

    pub fn get(&self, variable: Variable) -> Option<&str> {
        self.values.get(&variable).map(String::as_str)
    }

    pub fn contains(&self, variable: Variable) -> bool {
        self.values.contains_key(&variable)
    }

    /// Structured names of a name variable.
    pub fn names(&self, variable: Variable) -> Option<&[Name]> {
        self.names.get(&variable).map(Vec::as_slice)
    }

    /// Store a value. Empty or whitespace-only values are ignored and
    /// `false` is returned.
    pub fn insert(&mut self, variable: Variable, value: impl Into<String>) -> bool {
        let value = value.into();
        if value.trim().is_empty() {
            return false;
        }
        self.values.insert(variable, value);
        true
    }

    pub fn remove(&mut self, variable: Variable) -> Option<String> {
        self.names.remove(&variable);
        self.values.remove(&variable)
    }

    /// Attach structured names to a name variable that has a text value.
    pub fn set_names(&mut self, variable: Variable, names: Vec<Name>) {
        if variable.is_name() && self.contains(variable) && !names.is_empty() {
            self.names.insert(variable, names);
        }
    }

    /// Present variables in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = (Variable, &str)> {
        self.values.iter().map(|(v, value)| (*v, value.as_str()))
    }

    /// A copy with `&`, `<` and `>` escaped in every value and name, for
    /// handing literal text to a processor that reads values as markup.
    pub fn to_markup(&self) -> VariableMap {
        VariableMap {
            id: self.id.clone(),
            item_type: self.item_type.clone(),
            values: self
                .values
                .iter()
                .map(|(variable, value)| (*variable, partial_escape(value.as_str()).into_owned()))
                .collect(),
            names: self
                .names
                .iter()
                .map(|(variable, names)| (*variable, names.iter().map(Name::to_markup).collect()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Serialize for VariableMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len() + 2))?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry("type", &self.item_type)?;
        for (variable, value) in &self.values {
            let key = variable.csl_name();
            match (variable, self.names.get(variable)) {
                (_, Some(names)) => map.serialize_entry(key, names)?,
                (Variable::Issued, None) => map.serialize_entry(key, &IssuedDate::parse(value))?,
                _ => map.serialize_entry(key, value)?,
            }
        }
        map.end()
    }
}

/// CSL-JSON date: structured parts when the text is an ISO-like date or
/// range, a literal otherwise.
#[derive(Debug, PartialEq, Eq, serde::Serialize)]
enum IssuedDate<'a> {
    #[serde(rename = "date-parts")]
    Parts(Vec<Vec<i32>>),
    #[serde(rename = "literal")]
    Literal(&'a str),
}

impl<'a> IssuedDate<'a> {
    fn parse(text: &'a str) -> Self {
        let parts: Option<Vec<Vec<i32>>> = text
            .trim()
            .split('/')
            .take(3)
            .map(|end| {
                end.split('-')
                    .map(|part| part.trim().parse::<i32>().ok())
                    .collect::<Option<Vec<_>>>()
                    .filter(|parts| (1..=3).contains(&parts.len()))
            })
            .collect();
        match parts {
            Some(parts) if parts.len() <= 2 => IssuedDate::Parts(parts),
            _ => IssuedDate::Literal(text),
        }
    }
}
