//! Post-processing of style-processor markup into the target encoding.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::entities::decode_entities;
use crate::types::Encoding;

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^<>]*>").unwrap());
static SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]{2,}").unwrap());
static LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<div class="csl-left-margin">[^<]*</div>\s*$"#).unwrap());

/// Turn one raw processor fragment into the target encoding.
///
/// - [`Encoding::Rich`] keeps the markup, strips trailing whitespace from
///   each line and drops blank lines.
/// - [`Encoding::Plain`] strips tags, joins the trimmed lines with a space,
///   collapses runs of spaces and decodes entities. A line ending in the
///   left-margin label stays flush with the text that follows it.
///
/// Either way the result ends with exactly one line break if the fragment
/// ended with one, and with none otherwise.
pub fn format(raw: &str, encoding: Encoding) -> String {
    let ends_with_break = raw.trim_end_matches([' ', '\t']).ends_with('\n');
    let mut out = match encoding {
        Encoding::Rich => format_rich(raw),
        Encoding::Plain => format_plain(raw),
    };
    if ends_with_break && !out.is_empty() {
        out.push('\n');
    }
    out
}

/// Like [`format`], without a trailing line break.
pub fn format_citation(raw: &str, encoding: Encoding) -> String {
    let mut out = format(raw, encoding);
    out.truncate(out.trim_end_matches('\n').len());
    out
}

fn format_rich(raw: &str) -> String {
    raw.lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_plain(raw: &str) -> String {
    let mut joined = String::new();
    let mut flush = true;
    for line in raw.lines() {
        let text = TAG.replace_all(line, "");
        let text = text.trim();
        if text.is_empty() {
            continue;
        }
        if !flush {
            joined.push(' ');
        }
        joined.push_str(text);
        flush = LABEL.is_match(line);
    }
    let collapsed = SPACES.replace_all(&joined, " ");
    decode_entities(&collapsed).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENTRY: &str = "  <div class=\"csl-entry\">\n    <div class=\"csl-left-margin\">[1]</div><div class=\"csl-right-inline\">F. L&auml;st and J. Doe, &ldquo;Ben &amp; Jerry,&rdquo; </div>\n  </div>\n";

    #[test]
    fn test_rich_keeps_markup() {
        assert_eq!(format(ENTRY, Encoding::Rich), ENTRY);
        assert_eq!(
            format("<div>\n  <b>x</b>   \n</div>", Encoding::Rich),
            "<div>\n  <b>x</b>\n</div>"
        );
    }

    #[test]
    fn test_rich_normalizes_trailing_whitespace() {
        assert_eq!(format("<b>x</b>  \n\n  \n", Encoding::Rich), "<b>x</b>\n");
        assert_eq!(format("\n<i>y</i>", Encoding::Rich), "<i>y</i>");
    }

    #[test]
    fn test_plain_strips_markup() {
        assert_eq!(
            format(ENTRY, Encoding::Plain),
            "[1]F. Läst and J. Doe, “Ben & Jerry,”\n"
        );
    }

    #[test]
    fn test_plain_separates_block_lines() {
        let raw = "<div class=\"csl-entry\">\n  <div class=\"csl-block\">Smith</div>\n  <div class=\"csl-block\">Title</div>\n</div>\n";
        assert_eq!(format(raw, Encoding::Plain), "Smith Title\n");
    }

    #[test]
    fn test_plain_keeps_label_flush() {
        let raw = "<div class=\"csl-entry\">\n  <div class=\"csl-left-margin\">[2]</div>\n  <div class=\"csl-right-inline\">Text</div>\n</div>\n";
        assert_eq!(format(raw, Encoding::Plain), "[2]Text\n");
    }

    #[test]
    fn test_plain_collapses_spaces_and_keeps_unknown_entities() {
        assert_eq!(format("<span>a    b</span>", Encoding::Plain), "a b");
        assert_eq!(format("“&TitleTest&”", Encoding::Plain), "“&TitleTest&”");
        assert_eq!(format("x &lt;y&gt;", Encoding::Plain), "x <y>");
    }

    #[test]
    fn test_citation_has_no_trailing_break() {
        assert_eq!(format_citation("[1]\n", Encoding::Plain), "[1]");
        assert_eq!(format_citation("<span>[1]</span>\n", Encoding::Rich), "<span>[1]</span>");
        assert_eq!(format_citation("", Encoding::Plain), "");
    }
}
