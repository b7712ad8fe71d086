//! Dialect-aware arbitration of record fields into style variables.
//!
//! Each variable has an ordered list of candidate fields per [`Dialect`]; the
//! first candidate present with a non-empty value wins. A few variables carry
//! extra rules:
//!
//! - `number` (article number) is the raw `eid` field prefixed with
//!   `Article `, in the extended dialect only. An `eid` that decodes to
//!   nothing is skipped. When the article number is present, `page` is
//!   suppressed.
//! - `issued` is the extended `date` field, or `year` plus an optional
//!   `month` rendered as `YYYY` or `YYYY-MM`.

use std::borrow::Cow;

use crate::latex;
use crate::record::{InheritedRecord, field};
use crate::types::{Dialect, Encoding};
use crate::variable::Variable;

/// Prefix given to article numbers.
pub const ARTICLE_PREFIX: &str = "Article ";

/// Candidate fields of one variable, in priority order.
#[derive(Debug, Clone, Copy)]
pub struct FieldMapping {
    pub variable: Variable,
    pub legacy: &'static [&'static str],
    pub extended: &'static [&'static str],
}

const fn mapping(
    variable: Variable,
    legacy: &'static [&'static str],
    extended: &'static [&'static str],
) -> FieldMapping {
    FieldMapping {
        variable,
        legacy,
        extended,
    }
}

const PUBLISHERS: &[&str] = &[field::PUBLISHER, field::INSTITUTION, field::SCHOOL, field::ORGANIZATION];

pub const FIELD_MAPPINGS: &[FieldMapping] = &[
    mapping(Variable::Author, &[field::AUTHOR], &[field::AUTHOR]),
    mapping(Variable::Editor, &[field::EDITOR], &[field::EDITOR]),
    mapping(Variable::Translator, &[], &[field::TRANSLATOR]),
    mapping(Variable::Title, &[field::TITLE], &[field::TITLE]),
    mapping(Variable::TitleShort, &[field::SHORTTITLE], &[field::SHORTTITLE]),
    mapping(
        Variable::ContainerTitle,
        &[field::JOURNAL, field::BOOKTITLE],
        &[field::JOURNALTITLE, field::JOURNAL, field::BOOKTITLE],
    ),
    mapping(Variable::CollectionTitle, &[field::SERIES], &[field::SERIES]),
    mapping(Variable::Publisher, PUBLISHERS, PUBLISHERS),
    mapping(Variable::PublisherPlace, &[field::ADDRESS], &[field::LOCATION, field::ADDRESS]),
    mapping(Variable::Edition, &[field::EDITION], &[field::EDITION]),
    mapping(Variable::Volume, &[field::VOLUME], &[field::VOLUME]),
    mapping(Variable::Issue, &[field::NUMBER], &[field::NUMBER, field::ISSUE]),
    mapping(Variable::ArticleNumber, &[], &[field::EID]),
    mapping(Variable::Page, &[field::PAGES], &[field::PAGES]),
    mapping(Variable::NumberOfPages, &[], &[field::PAGETOTAL]),
    mapping(Variable::ChapterNumber, &[field::CHAPTER], &[field::CHAPTER]),
    mapping(Variable::Issued, &[field::YEAR], &[field::DATE, field::YEAR]),
    mapping(Variable::Doi, &[field::DOI], &[field::DOI]),
    mapping(Variable::Url, &[field::URL], &[field::URL]),
    mapping(Variable::Isbn, &[field::ISBN], &[field::ISBN]),
    mapping(Variable::Issn, &[field::ISSN], &[field::ISSN]),
    mapping(Variable::Language, &[], &[field::LANGUAGE]),
    mapping(Variable::Note, &[field::NOTE], &[field::NOTE]),
    mapping(Variable::Abstract, &[field::ABSTRACT], &[field::ABSTRACT]),
];

/// A variable value picked from a record, still in raw field syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedField<'a> {
    pub variable: Variable,
    /// The field the value came from.
    pub source: &'static str,
    pub value: Cow<'a, str>,
}

/// Picks, for every variable, the first present candidate field.
#[derive(Debug, Clone, Copy)]
pub struct FieldFallbackResolver {
    dialect: Dialect,
}

impl FieldFallbackResolver {
    pub fn new(dialect: Dialect) -> Self {
        FieldFallbackResolver { dialect }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Candidate fields for `variable` in this resolver's dialect.
    pub fn candidates(&self, variable: Variable) -> &'static [&'static str] {
        FIELD_MAPPINGS
            .iter()
            .find(|m| m.variable == variable)
            .map(|m| match self.dialect {
                Dialect::Legacy => m.legacy,
                Dialect::Extended => m.extended,
            })
            .unwrap_or(&[])
    }

    /// Resolve a single variable, ignoring rules between variables.
    pub fn resolve_variable<'a>(
        &self,
        record: &InheritedRecord<'a>,
        variable: Variable,
    ) -> Option<ResolvedField<'a>> {
        match variable {
            Variable::Issued => self.issued(record),
            Variable::ArticleNumber => self
                .first_present(record, variable)
                .filter(|resolved| !latex::decode(&resolved.value, Encoding::Plain).trim().is_empty())
                .map(|mut resolved| {
                    resolved.value = Cow::Owned(format!("{}{}", ARTICLE_PREFIX, resolved.value));
                    resolved
                }),
            _ => self.first_present(record, variable),
        }
    }

    /// Resolve every variable of a record, in [`Variable::ALL`] order.
    pub fn resolve<'a>(&self, record: &InheritedRecord<'a>) -> Vec<ResolvedField<'a>> {
        let has_article_number = self
            .resolve_variable(record, Variable::ArticleNumber)
            .is_some();
        Variable::ALL
            .into_iter()
            .filter(|&variable| !(variable == Variable::Page && has_article_number))
            .filter_map(|variable| self.resolve_variable(record, variable))
            .collect()
    }

    fn first_present<'a>(
        &self,
        record: &InheritedRecord<'a>,
        variable: Variable,
    ) -> Option<ResolvedField<'a>> {
        self.candidates(variable).iter().find_map(|&source| {
            record.field(source).map(|value| ResolvedField {
                variable,
                source,
                value: Cow::Borrowed(value),
            })
        })
    }

    fn issued<'a>(&self, record: &InheritedRecord<'a>) -> Option<ResolvedField<'a>> {
        if self.dialect == Dialect::Extended {
            if let Some(date) = record.field(field::DATE) {
                return Some(ResolvedField {
                    variable: Variable::Issued,
                    source: field::DATE,
                    value: Cow::Borrowed(date.trim()),
                });
            }
        }

        let year = record.field(field::YEAR)?.trim();
        let value = match record.field(field::MONTH).and_then(parse_month) {
            Some(month) => Cow::Owned(format!("{}-{:02}", year, month)),
            None => Cow::Borrowed(year),
        };
        Some(ResolvedField {
            variable: Variable::Issued,
            source: field::YEAR,
            value,
        })
    }
}

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Month number from `7`, `07`, `jul`, `July` or the macro form `#jul#`.
pub fn parse_month(raw: &str) -> Option<u32> {
    let month = raw
        .trim()
        .trim_matches(|c: char| matches!(c, '#' | '{' | '}'))
        .trim()
        .to_ascii_lowercase();
    if let Ok(number) = month.parse::<u32>() {
        return (1..=12).contains(&number).then_some(number);
    }
    if month.len() < 3 {
        return None;
    }
    MONTHS
        .iter()
        .position(|name| name.starts_with(month.trim_end_matches('.')))
        .map(|index| index as u32 + 1)
}

/// CSL item type for an entry type tag. Unknown or missing tags map to
/// `article`.
pub fn item_type(entry_type: Option<&str>) -> &'static str {
    let Some(entry_type) = entry_type else {
        return "article";
    };
    match entry_type.trim().to_ascii_lowercase().as_str() {
        "article" => "article-journal",
        "inproceedings" | "conference" => "paper-conference",
        "inbook" | "incollection" => "chapter",
        "phdthesis" | "mastersthesis" | "thesis" => "thesis",
        "techreport" | "report" => "report",
        "online" | "electronic" | "www" => "webpage",
        "unpublished" => "manuscript",
        "booklet" => "pamphlet",
        "manual" | "book" | "proceedings" => "book",
        "patent" => "patent",
        "dataset" => "dataset",
        "software" => "software",
        _ => "article",
    }
}
