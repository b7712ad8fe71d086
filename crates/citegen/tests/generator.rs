//! End-to-end generation tests against the fake style processor.

mod common;

use citegen::{
    CitationGenerator, Collection, Dialect, Encoding, Localization, MessageCatalog, Record, Variable,
};
use common::{FakeProcessor, apa, collection_of, ieee, test_entry};

const FAILURE: &str = "Cannot generate bibliography based on selected citation style.";

fn generator() -> CitationGenerator<FakeProcessor> {
    CitationGenerator::new(FakeProcessor::new())
}

fn ieee_entry(body: &str) -> String {
    format!(
        "  <div class=\"csl-entry\">\n    <div class=\"csl-left-margin\">[1]</div><div class=\"csl-right-inline\">{}</div>\n  </div>\n",
        body
    )
}

#[test]
fn test_default_citation() {
    let records = vec![test_entry()];
    let collection = collection_of(Dialect::Extended, &records);
    let citation = generator().generate_citation(&records, &ieee(), Encoding::Rich, &collection);
    assert_eq!(citation, "[1]");
}

#[test]
fn test_author_date_citation() {
    let records = vec![test_entry()];
    let collection = collection_of(Dialect::Extended, &records);
    let citation = generator().generate_citation(&records, &apa(), Encoding::Plain, &collection);
    assert_eq!(citation, "(Smith, 2016)");
}

#[test]
fn test_citation_covers_all_records() {
    let records = vec![test_entry(), Record::new().with_field("title", "Second")];
    let collection = collection_of(Dialect::Extended, &records);
    let citation = generator().generate_citation(&records, &ieee(), Encoding::Plain, &collection);
    assert_eq!(citation, "[1], [2]");
}

#[test]
fn test_rich_bibliography() {
    let records = vec![test_entry()];
    let collection = collection_of(Dialect::Extended, &records);
    let entries = generator().generate_bibliography(&records, &ieee(), Encoding::Rich, &collection);

    assert_eq!(
        entries,
        vec![ieee_entry(
            "B. Smith, B. Jones, and J. Williams, &ldquo;Title of the test entry,&rdquo; <span style=\"font-style: italic\">BibTeX Journal</span>, vol. 34, no. 3, pp. 45&ndash;67, 2016-07, https://doi.org/10.1001/bla.blubb."
        )]
    );
}

#[test]
fn test_plain_bibliography() {
    let records = vec![test_entry()];
    let collection = collection_of(Dialect::Extended, &records);
    let entries = generator().generate_bibliography(&records, &ieee(), Encoding::Plain, &collection);

    insta::assert_snapshot!(
        entries[0].trim_end(),
        @"[1]B. Smith, B. Jones, and J. Williams, “Title of the test entry,” BibTeX Journal, vol. 34, no. 3, pp. 45–67, 2016-07, https://doi.org/10.1001/bla.blubb."
    );
    assert!(entries[0].ends_with(".\n"));
}

#[test]
fn test_line_breaks_in_names_are_ignored() {
    let expected = vec![ieee_entry("F. Last and J. Doe, ")];
    for author in ["Last, First and\nDoe, Jane", "Last, First and\r\nDoe, Jane"] {
        let records = vec![Record::new().with_field("author", author)];
        let collection = Collection::new(Dialect::Extended);
        let entries = generator().generate_bibliography(&records, &ieee(), Encoding::Rich, &collection);
        assert_eq!(entries, expected, "author: {:?}", author);
    }
}

#[test]
fn test_diacritics() {
    let records = vec![Record::new().with_field("author", "L{\\\"a}st, First and Doe, Jane")];
    let collection = Collection::new(Dialect::Extended);

    let rich = generator().generate_bibliography(&records, &ieee(), Encoding::Rich, &collection);
    assert_eq!(rich, vec![ieee_entry("F. L&auml;st and J. Doe, ")]);

    let plain = generator().generate_bibliography(&records, &ieee(), Encoding::Plain, &collection);
    assert_eq!(plain, vec!["[1]F. Läst and J. Doe,\n".to_string()]);
}

#[test]
fn test_ampersand_in_title() {
    let records = vec![test_entry().with_field("title", "Famous quote: “&TitleTest&” - that is it")];
    let collection = collection_of(Dialect::Extended, &records);

    let plain = generator().generate_bibliography(&records, &ieee(), Encoding::Plain, &collection);
    assert_eq!(
        plain[0],
        "[1]B. Smith, B. Jones, and J. Williams, “Famous quote: “&TitleTest&” - that is it,” BibTeX Journal, vol. 34, no. 3, pp. 45–67, 2016-07, https://doi.org/10.1001/bla.blubb.\n"
    );

    let rich = generator().generate_bibliography(&records, &ieee(), Encoding::Rich, &collection);
    assert!(
        rich[0].contains("&ldquo;Famous quote: “&amp;TitleTest&amp;” - that is it,&rdquo;"),
        "Got: {}",
        rich[0]
    );
}

#[test]
fn test_plain_values_reach_processor_as_markup() {
    let records = vec![
        Record::new()
            .with_type("article")
            .with_field("author", "Doe, Jane")
            .with_field("title", r"Ben \& Jerry < x"),
    ];
    let collection = collection_of(Dialect::Extended, &records);
    let processor = FakeProcessor::new();
    let generator = CitationGenerator::new(&processor);

    let plain = generator.generate_bibliography(&records, &ieee(), Encoding::Plain, &collection);
    assert_eq!(plain, vec!["[1]J. Doe, “Ben & Jerry < x,”\n".to_string()]);
    assert_eq!(
        processor.received()[0].get(Variable::Title),
        Some("Ben &amp; Jerry &lt; x")
    );
}

#[test]
fn test_crossref_fields_are_inherited() {
    let child = Record::new()
        .with_key("smit2021")
        .with_type("incollection")
        .with_field("author", "Smith, Bob")
        .with_field("title", "An article")
        .with_field("pages", "1-10")
        .with_field("crossref", "jone2021");
    let parent = Record::new()
        .with_key("jone2021")
        .with_type("book")
        .with_field("editor", "Jones, John")
        .with_field("publisher", "Great Publisher")
        .with_field("title", "A book")
        .with_field("year", "2021")
        .with_field("address", "Somewhere");
    let collection = collection_of(Dialect::Extended, &[child.clone(), parent]);

    let processor = FakeProcessor::new();
    let generator = CitationGenerator::new(&processor);
    let entries = generator.generate_bibliography(&[child], &ieee(), Encoding::Plain, &collection);

    assert_eq!(
        entries,
        vec!["[1]B. Smith, “An article,” J. Jones, Ed., Somewhere: Great Publisher, pp. 1-10, 2021.\n".to_string()]
    );
    let received = processor.received();
    assert_eq!(received[0].id(), "smit2021");
    assert_eq!(received[0].item_type(), "chapter");
}

#[test]
fn test_missing_citation_style() {
    let records = vec![Record::new()];
    let collection = Collection::new(Dialect::Extended);
    let generator = generator();

    for encoding in [Encoding::Rich, Encoding::Plain] {
        assert_eq!(
            generator.generate_bibliography(&records, "faulty citation style", encoding, &collection),
            vec![FAILURE.to_string()]
        );
        assert_eq!(
            generator.generate_citation(&records, "faulty citation style", encoding, &collection),
            FAILURE
        );
    }
    assert_eq!(
        generator.generate_bibliography_string(&records, "faulty citation style", Encoding::Plain, &collection),
        FAILURE
    );
}

#[test]
fn test_failure_message_is_localized() {
    let records = vec![test_entry()];
    let collection = collection_of(Dialect::Extended, &records);
    let generator = generator().with_localization(MessageCatalog::new("de"));

    assert_eq!(
        generator.generate_citation(&records, "<not-a-style/>", Encoding::Plain, &collection),
        "Literaturverzeichnis kann mit dem gewählten Zitierstil nicht erstellt werden."
    );
}

struct Shouting;

impl Localization for Shouting {
    fn lookup(&self, key: &str) -> String {
        key.to_uppercase()
    }
}

#[test]
fn test_custom_localization() {
    let records = vec![Record::new()];
    let collection = Collection::new(Dialect::Legacy);
    let generator = generator().with_localization(Shouting);
    let entries = generator.generate_bibliography(&records, "", Encoding::Rich, &collection);
    assert_eq!(entries, vec![FAILURE.to_uppercase()]);
}

#[test]
fn test_bibliography_preserves_order() {
    let records: Vec<Record> = ["First", "Second", "Third"]
        .iter()
        .map(|title| Record::new().with_field("title", *title))
        .collect();
    let collection = collection_of(Dialect::Legacy, &records);

    let processor = FakeProcessor::new();
    let entries = CitationGenerator::new(&processor).generate_bibliography(
        &records,
        &apa(),
        Encoding::Plain,
        &collection,
    );

    assert_eq!(
        entries,
        vec!["(n.d.). First.\n", "(n.d.). Second.\n", "(n.d.). Third.\n"]
    );
    let ids: Vec<String> = processor.received().iter().map(|item| item.id().to_string()).collect();
    assert_eq!(ids, vec!["item-1", "item-2", "item-3"]);
}

#[test]
fn test_bibliography_string_concatenates_entries() {
    let records = vec![test_entry(), Record::new().with_field("title", "Second")];
    let collection = collection_of(Dialect::Extended, &records);
    let joined = generator().generate_bibliography_string(&records, &ieee(), Encoding::Plain, &collection);
    assert_eq!(joined.lines().count(), 2);
    assert!(joined.starts_with("[1]B. Smith"), "Got: {}", joined);
    assert!(joined.ends_with("[2]“Second,”\n"), "Got: {}", joined);
}

#[test]
fn test_empty_record_list() {
    let collection = Collection::new(Dialect::Extended);
    let entries = generator().generate_bibliography(&[], &ieee(), Encoding::Rich, &collection);
    assert!(entries.is_empty());
}
