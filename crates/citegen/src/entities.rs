//! Markup entities.
//!
//! One table serves both directions: the LaTeX decoder encodes decoded
//! characters as entities for rich output, and the plain output formatter
//! decodes whatever entities the style processor left in its markup.

use std::borrow::Cow;

const NAMED: &[(char, &str)] = &[
    ('&', "amp"),
    ('<', "lt"),
    ('>', "gt"),
    ('"', "quot"),
    ('\'', "apos"),
    ('\u{a0}', "nbsp"),
    ('¡', "iexcl"),
    ('¢', "cent"),
    ('£', "pound"),
    ('¥', "yen"),
    ('§', "sect"),
    ('©', "copy"),
    ('«', "laquo"),
    ('®', "reg"),
    ('°', "deg"),
    ('±', "plusmn"),
    ('µ', "micro"),
    ('¶', "para"),
    ('·', "middot"),
    ('»', "raquo"),
    ('¿', "iquest"),
    ('À', "Agrave"),
    ('Á', "Aacute"),
    ('Â', "Acirc"),
    ('Ã', "Atilde"),
    ('Ä', "Auml"),
    ('Å', "Aring"),
    ('Æ', "AElig"),
    ('Ç', "Ccedil"),
    ('È', "Egrave"),
    ('É', "Eacute"),
    ('Ê', "Ecirc"),
    ('Ë', "Euml"),
    ('Ì', "Igrave"),
    ('Í', "Iacute"),
    ('Î', "Icirc"),
    ('Ï', "Iuml"),
    ('Ð', "ETH"),
    ('Ñ', "Ntilde"),
    ('Ò', "Ograve"),
    ('Ó', "Oacute"),
    ('Ô', "Ocirc"),
    ('Õ', "Otilde"),
    ('Ö', "Ouml"),
    ('×', "times"),
    ('Ø', "Oslash"),
    ('Ù', "Ugrave"),
    ('Ú', "Uacute"),
    ('Û', "Ucirc"),
    ('Ü', "Uuml"),
    ('Ý', "Yacute"),
    ('Þ', "THORN"),
    ('ß', "szlig"),
    ('à', "agrave"),
    ('á', "aacute"),
    ('â', "acirc"),
    ('ã', "atilde"),
    ('ä', "auml"),
    ('å', "aring"),
    ('æ', "aelig"),
    ('ç', "ccedil"),
    ('è', "egrave"),
    ('é', "eacute"),
    ('ê', "ecirc"),
    ('ë', "euml"),
    ('ì', "igrave"),
    ('í', "iacute"),
    ('î', "icirc"),
    ('ï', "iuml"),
    ('ð', "eth"),
    ('ñ', "ntilde"),
    ('ò', "ograve"),
    ('ó', "oacute"),
    ('ô', "ocirc"),
    ('õ', "otilde"),
    ('ö', "ouml"),
    ('÷', "divide"),
    ('ø', "oslash"),
    ('ù', "ugrave"),
    ('ú', "uacute"),
    ('û', "ucirc"),
    ('ü', "uuml"),
    ('ý', "yacute"),
    ('þ', "thorn"),
    ('ÿ', "yuml"),
    ('Œ', "OElig"),
    ('œ', "oelig"),
    ('Š', "Scaron"),
    ('š', "scaron"),
    ('Ÿ', "Yuml"),
    ('–', "ndash"),
    ('—', "mdash"),
    ('‘', "lsquo"),
    ('’', "rsquo"),
    ('‚', "sbquo"),
    ('“', "ldquo"),
    ('”', "rdquo"),
    ('„', "bdquo"),
    ('†', "dagger"),
    ('‡', "Dagger"),
    ('…', "hellip"),
    ('‰', "permil"),
    ('‹', "lsaquo"),
    ('›', "rsaquo"),
    ('€', "euro"),
    ('™', "trade"),
];

/// HTML entity name for a character, if it has one.
pub fn name_of(c: char) -> Option<&'static str> {
    NAMED.iter().find(|(ch, _)| *ch == c).map(|(_, name)| *name)
}

/// Character for an HTML entity name, if it is known.
pub fn char_of(name: &str) -> Option<char> {
    NAMED.iter().find(|(_, n)| *n == name).map(|(ch, _)| *ch)
}

/// Append `c` as an entity: named when one exists, decimal otherwise.
pub fn push_entity(out: &mut String, c: char) {
    out.push('&');
    match name_of(c) {
        Some(name) => out.push_str(name),
        None => {
            out.push('#');
            out.push_str(&u32::from(c).to_string());
        }
    }
    out.push(';');
}

/// Decode named and numeric entities.
///
/// Unknown or unterminated entities are left untouched, so a stray `&` in
/// processor output never fails a render.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match tail[1..].find(';').and_then(|end| {
            let name = &tail[1..1 + end];
            resolve(name).map(|c| (c, end + 2))
        }) {
            Some((c, consumed)) => {
                out.push(c);
                rest = &tail[consumed..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

fn resolve(name: &str) -> Option<char> {
    if name.is_empty() || name.len() > 10 {
        return None;
    }
    if let Some(number) = name.strip_prefix('#') {
        let code = match number.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => number.parse::<u32>().ok()?,
        };
        return char::from_u32(code);
    }
    char_of(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_entity() {
        let mut out = String::new();
        push_entity(&mut out, 'ä');
        push_entity(&mut out, 'ł');
        push_entity(&mut out, '–');
        assert_eq!(out, "&auml;&#322;&ndash;");
    }

    #[test]
    fn test_decode_named_and_numeric() {
        assert_eq!(decode_entities("L&auml;st &amp; Doe"), "Läst & Doe");
        assert_eq!(decode_entities("45&ndash;67"), "45–67");
        assert_eq!(decode_entities("&#322;&#x142;"), "łł");
        assert_eq!(decode_entities("&ldquo;Title,&rdquo;"), "“Title,”");
    }

    #[test]
    fn test_decode_leaves_unknown_entities() {
        assert_eq!(decode_entities("“&TitleTest&”"), "“&TitleTest&”");
        assert_eq!(decode_entities("&bogus; & &#xZZ;"), "&bogus; & &#xZZ;");
        assert_eq!(decode_entities("AT&T;"), "AT&T;");
    }

    #[test]
    fn test_decode_without_entities_borrows() {
        assert!(matches!(decode_entities("plain text"), Cow::Borrowed(_)));
    }
}
