//! Shared fixtures for citegen integration tests.
//!
//! [`FakeProcessor`] stands in for a CSL processor. It validates the style
//! source with citegen-style, then renders IEEE-like markup for numeric
//! styles and APA-like markup otherwise. Values are inserted verbatim, the
//! way a real processor treats normalized input.

#![allow(dead_code)]

use citegen::{
    Collection, Dialect, Name, Record, RenderMode, StyleParseError, StyleProcessor, Variable,
    VariableMap,
};
use citegen_style::{CitationFormat, parse_style_info};
use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;

/// Read a style from citegen-style's test data.
pub fn style(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../citegen-style/test-data")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|err| panic!("Failed to read {}: {}", path.display(), err))
}

pub fn ieee() -> String {
    style("ieee.csl")
}

pub fn apa() -> String {
    style("apa.csl")
}

/// The standard journal article used across tests.
pub fn test_entry() -> Record {
    Record::new()
        .with_key("Smith2016")
        .with_type("article")
        .with_field("author", "Smith, Bob and Jones, Bob and Williams, Jeff")
        .with_field("title", "Title of the test entry")
        .with_field("journal", "BibTeX Journal")
        .with_field("volume", "34")
        .with_field("number", "3")
        .with_field("pages", "45--67")
        .with_field("year", "2016")
        .with_field("month", "July")
        .with_field("doi", "10.1001/bla.blubb")
}

pub fn collection_of(dialect: Dialect, records: &[Record]) -> Collection {
    Collection::with_records(dialect, records.iter().cloned())
}

#[derive(Debug, Default)]
pub struct FakeProcessor {
    received: RefCell<Vec<VariableMap>>,
}

impl FakeProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Items passed to the most recent successful render.
    pub fn received(&self) -> Vec<VariableMap> {
        self.received.borrow().clone()
    }
}

impl StyleProcessor for FakeProcessor {
    fn render(
        &self,
        items: &[VariableMap],
        style_source: &str,
        mode: RenderMode,
    ) -> Result<Vec<String>, StyleParseError> {
        let info = parse_style_info(style_source).map_err(|err| StyleParseError::new(err.to_string()))?;
        self.received.replace(items.to_vec());
        let numeric = info.citation_format == Some(CitationFormat::Numeric);

        Ok(match mode {
            RenderMode::Citation if numeric => vec![
                (1..=items.len())
                    .map(|n| format!("[{}]", n))
                    .collect::<Vec<_>>()
                    .join(", "),
            ],
            RenderMode::Citation => vec![format!(
                "({})",
                items
                    .iter()
                    .map(|item| format!("{}, {}", first_family(item), year(item)))
                    .collect::<Vec<_>>()
                    .join("; ")
            )],
            RenderMode::Bibliography if numeric => items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    format!(
                        "  <div class=\"csl-entry\">\n    <div class=\"csl-left-margin\">[{}]</div><div class=\"csl-right-inline\">{}</div>\n  </div>\n",
                        i + 1,
                        ieee_body(item)
                    )
                })
                .collect(),
            RenderMode::Bibliography => items
                .iter()
                .map(|item| format!("  <div class=\"csl-entry\">{}</div>\n", apa_body(item)))
                .collect(),
        })
    }
}

/// A processor that always returns one fragment too few.
pub struct LossyProcessor;

impl StyleProcessor for LossyProcessor {
    fn render(
        &self,
        items: &[VariableMap],
        _style_source: &str,
        _mode: RenderMode,
    ) -> Result<Vec<String>, StyleParseError> {
        Ok(items.iter().skip(1).map(|item| item.id().to_string()).collect())
    }
}

fn first_family(item: &VariableMap) -> String {
    item.names(Variable::Author)
        .and_then(|names| names.first())
        .and_then(|name| name.family.clone().or_else(|| name.literal.clone()))
        .unwrap_or_default()
}

fn year(item: &VariableMap) -> String {
    item.get(Variable::Issued)
        .map(|issued| issued.chars().take(4).collect())
        .unwrap_or_else(|| "n.d.".to_string())
}

fn initialed(name: &Name) -> String {
    if let Some(literal) = &name.literal {
        return literal.clone();
    }
    let family = [&name.non_dropping_particle, &name.family]
        .into_iter()
        .flatten()
        .cloned()
        .collect::<Vec<_>>()
        .join(" ");
    match name.given.as_deref().and_then(|given| given.chars().next()) {
        Some(initial) => format!("{}. {}", initial, family),
        None => family,
    }
}

fn name_list(names: &[Name]) -> String {
    let rendered: Vec<String> = names.iter().map(initialed).collect();
    match rendered.as_slice() {
        [] => String::new(),
        [one] => one.clone(),
        [first, second] => format!("{} and {}", first, second),
        [init @ .., last] => format!("{}, and {}", init.join(", "), last),
    }
}

fn ieee_body(item: &VariableMap) -> String {
    let mut body = String::new();
    if let Some(authors) = item.names(Variable::Author) {
        body.push_str(&name_list(authors));
        body.push_str(", ");
    }
    if let Some(title) = item.get(Variable::Title) {
        body.push_str(&format!("&ldquo;{},&rdquo; ", title));
    }

    let mut parts = Vec::new();
    if let Some(container) = item.get(Variable::ContainerTitle) {
        parts.push(format!("<span style=\"font-style: italic\">{}</span>", container));
    }
    if let Some(editors) = item.names(Variable::Editor) {
        parts.push(format!("{}, Ed.", name_list(editors)));
    }
    match (item.get(Variable::PublisherPlace), item.get(Variable::Publisher)) {
        (Some(place), Some(publisher)) => parts.push(format!("{}: {}", place, publisher)),
        (Some(one), None) | (None, Some(one)) => parts.push(one.to_string()),
        (None, None) => {}
    }
    let labelled = [
        (Variable::Volume, "vol. "),
        (Variable::Issue, "no. "),
        (Variable::ArticleNumber, ""),
        (Variable::Page, "pp. "),
        (Variable::Issued, ""),
        (Variable::Doi, ""),
    ];
    for (variable, label) in labelled {
        if let Some(value) = item.get(variable) {
            parts.push(format!("{}{}", label, value));
        }
    }
    if !parts.is_empty() {
        body.push_str(&parts.join(", "));
        body.push('.');
    }
    body
}

fn apa_body(item: &VariableMap) -> String {
    let mut body = item
        .names(Variable::Author)
        .map(|authors| {
            authors
                .iter()
                .map(|name| name.display_name())
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default();
    body.push_str(&format!(" ({}).", year(item)));
    if let Some(title) = item.get(Variable::Title) {
        body.push_str(&format!(" {}.", title));
    }

    let mut source = Vec::new();
    if let Some(container) = item.get(Variable::ContainerTitle) {
        source.push(format!("<span style=\"font-style: italic\">{}</span>", container));
    }
    match (item.get(Variable::Volume), item.get(Variable::Issue)) {
        (Some(volume), Some(issue)) => source.push(format!("{}({})", volume, issue)),
        (Some(one), None) | (None, Some(one)) => source.push(one.to_string()),
        (None, None) => {}
    }
    for variable in [Variable::ArticleNumber, Variable::Page] {
        if let Some(value) = item.get(variable) {
            source.push(value.to_string());
        }
    }
    if !source.is_empty() {
        body.push_str(&format!(" {}.", source.join(", ")));
    }
    if let Some(doi) = item.get(Variable::Doi) {
        body.push_str(&format!(" {}", doi));
    }
    body
}
