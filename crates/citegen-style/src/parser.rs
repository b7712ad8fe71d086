//! Style metadata parser.
//!
//! Streams the style source with quick-xml and keeps only what the caller
//! needs to identify a style: the root `<style>` attributes, the `<info>`
//! block, and whether `<citation>` and `<bibliography>` are present. Layout
//! elements are skipped without being interpreted.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{Error, Result};
use crate::types::{CitationFormat, StyleClass, StyleInfo};

/// Parse the metadata of a style definition.
///
/// Fails when the source is not well-formed XML, has no `<style>` root, lacks
/// the `class` attribute, or has no `<citation>` element.
pub fn parse_style_info(source: &str) -> Result<StyleInfo> {
    let mut reader = Reader::from_str(source);
    reader.config_mut().trim_text(true);

    let mut builder: Option<InfoBuilder> = None;
    let mut path: Vec<String> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = local_name(&e);
                open_element(&mut builder, &path, &name, &e, reader.buffer_position())?;
                path.push(name);
            }
            Ok(Event::Empty(e)) => {
                let name = local_name(&e);
                open_element(&mut builder, &path, &name, &e, reader.buffer_position())?;
            }
            Ok(Event::End(_)) => {
                path.pop();
            }
            Ok(Event::Text(e)) => {
                if let Some(builder) = builder.as_mut() {
                    let text = e
                        .unescape()
                        .map_err(|err| Error::xml(err, reader.buffer_position()))?;
                    builder.text(&path, text.trim());
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => return Err(Error::xml(err, reader.error_position())),
        }
    }

    builder.ok_or(Error::MissingRoot)?.finish()
}

fn local_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

fn attribute(e: &BytesStart<'_>, name: &str, position: u64) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr.map_err(|err| Error::xml(err, position))?;
        if attr.key.local_name().as_ref() == name.as_bytes() {
            let value = attr
                .unescape_value()
                .map_err(|err| Error::xml(err, position))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

fn open_element(
    builder: &mut Option<InfoBuilder>,
    path: &[String],
    name: &str,
    e: &BytesStart<'_>,
    position: u64,
) -> Result<()> {
    if builder.is_none() {
        if name != "style" {
            return Err(Error::InvalidRootElement {
                found: name.to_string(),
            });
        }
        *builder = Some(InfoBuilder::from_root(e, position)?);
        return Ok(());
    }
    let Some(builder) = builder.as_mut() else {
        return Ok(());
    };

    match (path.len(), path.get(1).map(String::as_str), name) {
        (1, _, "citation") => builder.has_citation = true,
        (1, _, "bibliography") => {
            builder.info.has_bibliography = true;
            builder.info.hanging_indent =
                attribute(e, "hanging-indent", position)?.as_deref() == Some("true");
        }
        (2, Some("info"), "category") => {
            if let Some(format) = attribute(e, "citation-format", position)? {
                builder.info.citation_format = CitationFormat::from_attr(&format);
            }
        }
        (2, Some("info"), "link") => {
            if attribute(e, "rel", position)?.as_deref() == Some("independent-parent") {
                builder.info.independent_parent = attribute(e, "href", position)?;
            }
        }
        _ => {}
    }
    Ok(())
}

struct InfoBuilder {
    info: StyleInfo,
    has_citation: bool,
}

impl InfoBuilder {
    fn from_root(e: &BytesStart<'_>, position: u64) -> Result<Self> {
        let class = match attribute(e, "class", position)? {
            Some(value) => match value.as_str() {
                "in-text" => StyleClass::InText,
                "note" => StyleClass::Note,
                other => {
                    return Err(Error::InvalidAttributeValue {
                        element: "style".to_string(),
                        attribute: "class".to_string(),
                        value: other.to_string(),
                        expected: "\"in-text\" or \"note\"".to_string(),
                    });
                }
            },
            None => {
                return Err(Error::MissingAttribute {
                    element: "style".to_string(),
                    attribute: "class".to_string(),
                });
            }
        };

        Ok(InfoBuilder {
            info: StyleInfo {
                title: None,
                title_short: None,
                id: None,
                class,
                version: attribute(e, "version", position)?,
                default_locale: attribute(e, "default-locale", position)?,
                citation_format: None,
                independent_parent: None,
                has_bibliography: false,
                hanging_indent: false,
            },
            has_citation: false,
        })
    }

    fn text(&mut self, path: &[String], text: &str) {
        if text.is_empty() || path.len() != 3 || path[1] != "info" {
            return;
        }
        let slot = match path[2].as_str() {
            "title" => &mut self.info.title,
            "title-short" => &mut self.info.title_short,
            "id" => &mut self.info.id,
            _ => return,
        };
        slot.get_or_insert_with(String::new).push_str(text);
    }

    fn finish(self) -> Result<StyleInfo> {
        // Dependent styles borrow their layout from the parent.
        if !self.has_citation && !self.info.is_dependent() {
            return Err(Error::MissingElement {
                parent: "style".to_string(),
                element: "citation".to_string(),
            });
        }
        Ok(self.info)
    }
}
