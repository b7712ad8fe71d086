//! Structured parsing of name-list fields.
//!
//! Name lists separate persons with the word `and` at brace depth zero. Each
//! person follows one of three forms:
//!
//! - `First von Last`
//! - `von Last, First`
//! - `von Last, Jr, First`
//!
//! A person wholly wrapped in braces (`{Barnes and Noble}`) is an
//! institutional name and is kept as a literal. Every name part is decoded
//! with [`latex::decode`] for the target encoding.

use quick_xml::escape::partial_escape;
use serde::{Deserialize, Serialize};

use crate::latex;
use crate::types::Encoding;

/// A name in CSL-JSON form.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq, Hash)]
pub struct Name {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub given: Option<String>,

    /// Lower-case prefix of the family name ("van" in "Vincent van Gogh").
    #[serde(rename = "non-dropping-particle", skip_serializing_if = "Option::is_none")]
    pub non_dropping_particle: Option<String>,

    /// Suffix such as "Jr." or "III".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,

    /// Institutional name kept as a whole.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub literal: Option<String>,
}

impl Name {
    pub fn literal(text: impl Into<String>) -> Self {
        Name {
            literal: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn is_literal(&self) -> bool {
        self.literal.is_some()
    }

    /// A copy with `&`, `<` and `>` escaped in every part.
    pub fn to_markup(&self) -> Name {
        let escape = |part: &Option<String>| part.as_deref().map(|p| partial_escape(p).into_owned());
        Name {
            family: escape(&self.family),
            given: escape(&self.given),
            non_dropping_particle: escape(&self.non_dropping_particle),
            suffix: escape(&self.suffix),
            literal: escape(&self.literal),
        }
    }

    /// The name in "particle family suffix, given" order.
    pub fn display_name(&self) -> String {
        if let Some(literal) = &self.literal {
            return literal.clone();
        }

        let family_part = [&self.non_dropping_particle, &self.family, &self.suffix]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ");

        match &self.given {
            Some(given) if family_part.is_empty() => given.clone(),
            Some(given) => format!("{}, {}", family_part, given),
            None => family_part,
        }
    }
}

/// Parse a raw name-list field into structured names.
///
/// The `others` marker for truncated lists is dropped.
pub fn parse_names(raw: &str, encoding: Encoding) -> Vec<Name> {
    let mut names = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for token in tokens(raw) {
        if token.eq_ignore_ascii_case("and") {
            names.extend(parse_name(&current.join(" "), encoding));
            current.clear();
        } else {
            current.push(token);
        }
    }
    names.extend(parse_name(&current.join(" "), encoding));
    names
}

fn parse_name(raw: &str, encoding: Encoding) -> Option<Name> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "others" {
        return None;
    }
    if let Some(inner) = wrapped_in_group(raw) {
        let literal = latex::decode(inner, encoding);
        return (!literal.trim().is_empty()).then(|| Name::literal(literal.trim()));
    }

    let parts: Vec<Vec<&str>> = split_commas(raw).into_iter().map(tokens).collect();
    let mut name = Name::default();
    match parts.as_slice() {
        [words] => {
            let last = words.len() - 1;
            match words[..last].iter().position(|w| starts_lowercase(w)) {
                Some(von_start) => {
                    let von_end = (von_start..last)
                        .rev()
                        .find(|&i| starts_lowercase(words[i]))
                        .unwrap_or(von_start);
                    name.given = join(&words[..von_start], encoding);
                    name.non_dropping_particle = join(&words[von_start..=von_end], encoding);
                    name.family = join(&words[von_end + 1..], encoding);
                }
                None => {
                    name.given = join(&words[..last], encoding);
                    name.family = join(&words[last..], encoding);
                }
            }
        }
        [family, rest @ ..] => {
            let split_at = family[..family.len().saturating_sub(1)]
                .iter()
                .take_while(|w| starts_lowercase(w))
                .count();
            name.non_dropping_particle = join(&family[..split_at], encoding);
            name.family = join(&family[split_at..], encoding);
            match rest {
                [given] => name.given = join(given, encoding),
                [suffix, given @ ..] => {
                    name.suffix = join(suffix, encoding);
                    name.given = join(&given.concat(), encoding);
                }
                [] => {}
            }
        }
        [] => return None,
    }

    (name.family.is_some() || name.given.is_some()).then_some(name)
}

/// Split on whitespace outside braces.
fn tokens(raw: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut depth = 0i32;
    let mut start = None;
    for (i, c) in raw.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => depth -= 1,
            _ => {}
        }
        if c.is_whitespace() && depth <= 0 {
            if let Some(s) = start.take() {
                tokens.push(&raw[s..i]);
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        tokens.push(&raw[s..]);
    }
    tokens
}

fn split_commas(raw: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (i, c) in raw.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => depth -= 1,
            ',' if depth <= 0 => {
                parts.push(&raw[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&raw[start..]);
    parts
}

/// The inside of `raw` when one brace group spans all of it.
fn wrapped_in_group(raw: &str) -> Option<&str> {
    let inner = raw.strip_prefix('{')?.strip_suffix('}')?;
    let mut depth = 0i32;
    for c in inner.chars() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth < 0 {
                    return None;
                }
            }
            _ => {}
        }
    }
    (depth == 0).then_some(inner)
}

/// Particles start with a lower-case letter. Braced words never do.
fn starts_lowercase(word: &str) -> bool {
    if word.starts_with('{') && !word.starts_with("{\\") {
        return false;
    }
    latex::decode(word, Encoding::Plain)
        .chars()
        .find(|c| c.is_alphabetic())
        .is_some_and(char::is_lowercase)
}

fn join(words: &[&str], encoding: Encoding) -> Option<String> {
    if words.is_empty() {
        return None;
    }
    let decoded = latex::decode(&words.join(" "), encoding);
    let trimmed = decoded.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
