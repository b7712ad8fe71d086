//! Decoding of LaTeX-encoded field text.
//!
//! Raw field values use LaTeX escapes for diacritics (`{\"a}`), special
//! letters (`\ss`), escaped symbols (`\&`), TeX ligatures (`--`, `~`) and text
//! styles (`\emph{...}`), with braces used for grouping and case protection.
//! [`decode`] turns all of that into the target encoding:
//!
//! - [`Encoding::Rich`]: a markup-safe fragment. Literal `&`, `<` and `>`
//!   are escaped, decoded non-ASCII characters become HTML entities and text
//!   styles become tags.
//! - [`Encoding::Plain`]: literal text. Decoded characters are emitted as
//!   Unicode and text styles are dropped.
//!
//! Characters that are already Unicode are left as they are. Escapes that
//! cannot be decoded pass through unchanged.

use quick_xml::escape::partial_escape;

use crate::entities;
use crate::types::Encoding;

/// Decode LaTeX escapes in `text` for the given target encoding.
pub fn decode(text: &str, encoding: Encoding) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut decoder = Decoder {
        chars: &chars,
        pos: 0,
        end: chars.len(),
        out: Output::new(encoding),
    };
    decoder.run();
    decoder.out.finish()
}

/// Precomposed forms per accent mark, as `base, composed` pairs.
const COMPOSED: &[(char, &str)] = &[
    ('"', "aäeëiïoöuüyÿAÄEËIÏOÖUÜYŸ"),
    ('\'', "aáeéiíoóuúyýcćnńsśzźlĺrŕgǵkḱmḿpṕwẃAÁEÉIÍOÓUÚYÝCĆNŃSŚZŹLĹRŔ"),
    ('`', "aàeèiìoòuùnǹwẁyỳAÀEÈIÌOÒUÙNǸ"),
    ('^', "aâeêiîoôuûcĉgĝhĥjĵsŝwŵyŷAÂEÊIÎOÔUÛCĈGĜHĤJĴSŜWŴYŶ"),
    ('~', "aãnñoõiĩuũAÃNÑOÕIĨUŨ"),
    ('=', "aāeēiīoōuūAĀEĒIĪOŌUŪ"),
    ('.', "cċeėgġzżIİCĊEĖGĠZŻ"),
    ('u', "aăgğuŭeĕiĭoŏAĂGĞUŬEĔIĬOŎ"),
    ('v', "cčdďeěnňrřsštťzžlľCČDĎEĚNŇRŘSŠTŤZŽLĽ"),
    ('H', "oőuűOŐUŰ"),
    ('c', "cçsştţgģkķlļnņrŗCÇSŞTŢGĢKĶLĻNŅRŖ"),
    ('k', "aąeęiįuųAĄEĘIĮUŲ"),
    ('r', "aåuůAÅUŮ"),
    ('d', "aạeẹiịoọuụAẠEẸIỊOỌUỤ"),
];

/// Accent marks as `(mark, combining, spacing)`.
const MARKS: &[(char, char, char)] = &[
    ('"', '\u{308}', '¨'),
    ('\'', '\u{301}', '´'),
    ('`', '\u{300}', '`'),
    ('^', '\u{302}', '^'),
    ('~', '\u{303}', '~'),
    ('=', '\u{304}', '¯'),
    ('.', '\u{307}', '˙'),
    ('u', '\u{306}', '˘'),
    ('v', '\u{30c}', 'ˇ'),
    ('H', '\u{30b}', '˝'),
    ('c', '\u{327}', '¸'),
    ('k', '\u{328}', '˛'),
    ('r', '\u{30a}', '˚'),
    ('d', '\u{323}', '.'),
    ('b', '\u{331}', '_'),
];

const SYMBOL_ACCENTS: &[char] = &['"', '\'', '`', '^', '~', '=', '.'];

fn letter_accent(name: &str) -> Option<char> {
    match name {
        "u" | "v" | "H" | "c" | "k" | "r" | "d" | "b" => name.chars().next(),
        _ => None,
    }
}

fn special_letter(name: &str) -> Option<char> {
    let c = match name {
        "ss" => 'ß',
        "o" => 'ø',
        "O" => 'Ø',
        "ae" => 'æ',
        "AE" => 'Æ',
        "oe" => 'œ',
        "OE" => 'Œ',
        "aa" => 'å',
        "AA" => 'Å',
        "l" => 'ł',
        "L" => 'Ł',
        "i" => 'ı',
        "j" => 'ȷ',
        "dh" => 'ð',
        "DH" => 'Ð',
        "th" => 'þ',
        "TH" => 'Þ',
        "ng" => 'ŋ',
        "NG" => 'Ŋ',
        "textendash" => '–',
        "textemdash" => '—',
        "ldots" | "dots" | "textellipsis" => '…',
        "textquoteleft" => '‘',
        "textquoteright" => '’',
        "textquotedblleft" => '“',
        "textquotedblright" => '”',
        "guillemotleft" => '«',
        "guillemotright" => '»',
        "S" => '§',
        "P" => '¶',
        "copyright" => '©',
        "textregistered" => '®',
        "texttrademark" => '™',
        "pounds" => '£',
        "euro" => '€',
        "textdegree" => '°',
        _ => return None,
    };
    Some(c)
}

/// Rich-mode tags for text style commands and declarations.
fn text_style(name: &str) -> Option<(&'static str, &'static str)> {
    let tags = match name {
        "emph" | "textit" | "textsl" | "em" | "it" | "sl" => ("<i>", "</i>"),
        "textbf" | "bf" => ("<b>", "</b>"),
        "textsc" | "sc" => (r#"<span style="font-variant:small-caps">"#, "</span>"),
        "textsuperscript" => ("<sup>", "</sup>"),
        "textsubscript" => ("<sub>", "</sub>"),
        "textrm" | "textsf" | "texttt" | "textup" | "textmd" | "textnormal" | "text"
        | "mbox" | "rm" | "sf" | "tt" | "up" => ("", ""),
        _ => return None,
    };
    Some(tags)
}

fn compose(mark: char, base: char) -> Option<char> {
    let (_, pairs) = COMPOSED.iter().find(|(m, _)| *m == mark)?;
    let mut chars = pairs.chars();
    while let (Some(plain), Some(composed)) = (chars.next(), chars.next()) {
        if plain == base {
            return Some(composed);
        }
    }
    None
}

struct Output {
    encoding: Encoding,
    buf: String,
    pending: String,
}

impl Output {
    fn new(encoding: Encoding) -> Self {
        Output {
            encoding,
            buf: String::new(),
            pending: String::new(),
        }
    }

    /// Text taken from the input; escaped on flush in rich encoding.
    fn literal(&mut self, c: char) {
        self.pending.push(c);
    }

    fn literal_str(&mut self, chars: &[char]) {
        self.pending.extend(chars);
    }

    /// A character produced by decoding an escape.
    fn decoded(&mut self, c: char) {
        if self.encoding == Encoding::Rich && !c.is_ascii() {
            self.flush();
            entities::push_entity(&mut self.buf, c);
        } else {
            self.pending.push(c);
        }
    }

    fn markup(&mut self, tag: &str) {
        if self.encoding == Encoding::Rich && !tag.is_empty() {
            self.flush();
            self.buf.push_str(tag);
        }
    }

    fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        match self.encoding {
            Encoding::Rich => self.buf.push_str(&partial_escape(self.pending.as_str())),
            Encoding::Plain => self.buf.push_str(&self.pending),
        }
        self.pending.clear();
    }

    fn finish(mut self) -> String {
        self.flush();
        self.buf
    }
}

struct Decoder<'a> {
    chars: &'a [char],
    pos: usize,
    end: usize,
    out: Output,
}

impl Decoder<'_> {
    fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        let index = self.pos + offset;
        if index < self.end {
            self.chars.get(index).copied()
        } else {
            None
        }
    }

    fn run(&mut self) {
        while let Some(c) = self.peek() {
            match c {
                '\\' => self.command(),
                '{' | '}' => self.pos += 1,
                '-' => self.dashes(),
                '~' => {
                    self.pos += 1;
                    self.out.decoded('\u{a0}');
                }
                '`' if self.peek_at(1) == Some('`') => {
                    self.pos += 2;
                    self.out.decoded('“');
                }
                '\'' if self.peek_at(1) == Some('\'') => {
                    self.pos += 2;
                    self.out.decoded('”');
                }
                _ => {
                    self.pos += 1;
                    self.out.literal(c);
                }
            }
        }
    }

    /// Index of the `}` closing the group opened at `open`.
    fn group_end(&self, open: usize) -> Option<usize> {
        let mut depth = 0usize;
        let mut index = open;
        while index < self.end {
            match self.chars[index] {
                '\\' => index += 1,
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(index);
                    }
                }
                _ => {}
            }
            index += 1;
        }
        None
    }

    fn skip_spaces(&mut self) {
        while self.peek() == Some(' ') {
            self.pos += 1;
        }
    }

    fn skip_empty_group(&mut self) {
        if self.peek() == Some('{') && self.peek_at(1) == Some('}') {
            self.pos += 2;
        }
    }

    fn dashes(&mut self) {
        let mut count = 0;
        while self.peek_at(count) == Some('-') {
            count += 1;
        }
        let start = self.pos;
        self.pos += count;
        match count {
            2 => self.out.decoded('–'),
            3 => self.out.decoded('—'),
            _ => self.out.literal_str(&self.chars[start..start + count]),
        }
    }

    fn command(&mut self) {
        let start = self.pos;
        self.pos += 1;
        let Some(next) = self.peek() else {
            self.out.literal('\\');
            return;
        };

        if SYMBOL_ACCENTS.contains(&next) {
            self.pos += 1;
            self.accent(next, start);
            return;
        }

        if !next.is_ascii_alphabetic() {
            self.pos += 1;
            match next {
                '&' | '%' | '$' | '#' | '_' | '{' | '}' => self.out.literal(next),
                ' ' | '\\' => self.out.literal(' '),
                // discretionary hyphen
                '-' => {}
                _ => self.out.literal_str(&self.chars[start..self.pos]),
            }
            return;
        }

        let name_start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
            self.pos += 1;
        }
        let name: String = self.chars[name_start..self.pos].iter().collect();

        if let Some(mark) = letter_accent(&name) {
            self.skip_spaces();
            self.accent(mark, start);
        } else if let Some(c) = special_letter(&name) {
            self.skip_spaces();
            self.skip_empty_group();
            self.out.decoded(c);
        } else if let Some((open, close)) = text_style(&name) {
            self.skip_spaces();
            if self.peek() == Some('{') {
                self.styled_group(open, close);
            }
        } else {
            self.unknown_command(start);
        }
    }

    /// Decode the group at the current position wrapped in `open`/`close`.
    fn styled_group(&mut self, open: &str, close: &str) {
        let Some(close_index) = self.group_end(self.pos) else {
            return;
        };
        let outer_end = std::mem::replace(&mut self.end, close_index);
        self.pos += 1;
        self.out.markup(open);
        self.run();
        self.out.markup(close);
        self.end = outer_end;
        self.pos = close_index + 1;
    }

    fn unknown_command(&mut self, start: usize) {
        self.out.literal_str(&self.chars[start..self.pos]);
        if self.peek() == Some('{') {
            if let Some(close_index) = self.group_end(self.pos) {
                self.out.literal_str(&self.chars[self.pos..=close_index]);
                self.pos = close_index + 1;
            }
        }
    }

    fn accent(&mut self, mark: char, start: usize) {
        let command_end = self.pos;
        match self.accent_base() {
            Some(Some(base)) => match compose(mark, base) {
                Some(composed) => self.out.decoded(composed),
                None => {
                    self.out.literal(base);
                    if let Some((_, combining, _)) = MARKS.iter().find(|(m, ..)| *m == mark) {
                        self.out.decoded(*combining);
                    }
                }
            },
            Some(None) => {
                if let Some((_, _, spacing)) = MARKS.iter().find(|(m, ..)| *m == mark) {
                    self.out.decoded(*spacing);
                }
            }
            None => {
                self.pos = command_end;
                self.out.literal_str(&self.chars[start..command_end]);
            }
        }
    }

    /// The accented letter: `Some(None)` for an empty group, `None` when
    /// there is no usable base.
    fn accent_base(&mut self) -> Option<Option<char>> {
        match self.peek()? {
            '{' => {
                let close_index = self.group_end(self.pos)?;
                let inner: String = self.chars[self.pos + 1..close_index].iter().collect();
                let base = match inner.trim() {
                    "" => None,
                    r"\i" => Some('i'),
                    r"\j" => Some('j'),
                    letter => {
                        let mut chars = letter.chars();
                        match (chars.next(), chars.next()) {
                            (Some(c), None) if c.is_alphabetic() => Some(c),
                            _ => return None,
                        }
                    }
                };
                self.pos = close_index + 1;
                Some(base)
            }
            '\\' => {
                let letter = self.peek_at(1).filter(|c| matches!(c, 'i' | 'j'))?;
                if self.peek_at(2).is_some_and(|c| c.is_ascii_alphabetic()) {
                    return None;
                }
                self.pos += 2;
                Some(Some(letter))
            }
            c if c.is_alphabetic() => {
                self.pos += 1;
                Some(Some(c))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rich(text: &str) -> String {
        decode(text, Encoding::Rich)
    }

    fn plain(text: &str) -> String {
        decode(text, Encoding::Plain)
    }

    #[test]
    fn test_diacritic_forms() {
        for input in [r#"{\"a}"#, r#"\"{a}"#, r#"\"a"#] {
            assert_eq!(rich(input), "&auml;", "input: {}", input);
            assert_eq!(plain(input), "ä", "input: {}", input);
        }
        assert_eq!(rich(r#"L{\"a}st"#), "L&auml;st");
        assert_eq!(plain(r#"Sch\"{o}n \'{e}t\'e"#), "Schön été");
        assert_eq!(plain(r#"na\"{\i}ve"#), "naïve");
    }

    #[test]
    fn test_letter_accents() {
        assert_eq!(plain(r"\v{c}"), "č");
        assert_eq!(rich(r"\v{c}"), "&#269;");
        assert_eq!(rich(r"Fran\c cois"), "Fran&ccedil;ois");
        assert_eq!(plain(r"Erd\H{o}s"), "Erdős");
    }

    #[test]
    fn test_accent_without_precomposed_form() {
        assert_eq!(plain(r"\b{x}"), "x\u{331}");
        assert_eq!(rich(r#"\"{x}"#), "x&#776;");
        assert_eq!(plain(r#"\"{}"#), "¨");
    }

    #[test]
    fn test_special_letters() {
        assert_eq!(plain(r"Gro\ss e"), "Große");
        assert_eq!(plain(r"{\o}ystein"), "øystein");
        assert_eq!(rich(r"\AE{}sir"), "&AElig;sir");
        assert_eq!(rich(r"{\L}\'od\'z"), "&#321;&oacute;d&#378;");
    }

    #[test]
    fn test_escaped_symbols() {
        assert_eq!(plain(r"Ben \& Jerry"), "Ben & Jerry");
        assert_eq!(plain(r"50\% of \$10 \#1 a\_b"), "50% of $10 #1 a_b");
        assert_eq!(plain("x < y > z"), "x < y > z");
    }

    #[test]
    fn test_rich_is_markup_safe() {
        assert_eq!(rich(r"Ben \& Jerry"), "Ben &amp; Jerry");
        assert_eq!(rich("Ben & Jerry"), "Ben &amp; Jerry");
        assert_eq!(rich("x < y > z"), "x &lt; y &gt; z");
        assert_eq!(rich(r"\emph{a < b}"), "<i>a &lt; b</i>");
    }

    #[test]
    fn test_ligatures() {
        assert_eq!(plain("pp. 45--67"), "pp. 45–67");
        assert_eq!(rich("pp. 45--67"), "pp. 45&ndash;67");
        assert_eq!(rich("yes---no"), "yes&mdash;no");
        assert_eq!(plain("a-b ----"), "a-b ----");
        assert_eq!(rich("Fig.~1"), "Fig.&nbsp;1");
        assert_eq!(plain("Fig.~1"), "Fig.\u{a0}1");
        assert_eq!(rich("``quoted''"), "&ldquo;quoted&rdquo;");
    }

    #[test]
    fn test_text_styles() {
        assert_eq!(rich(r"\emph{Nature} news"), "<i>Nature</i> news");
        assert_eq!(plain(r"\emph{Nature} news"), "Nature news");
        assert_eq!(rich(r#"\textbf{B\"{a}r}"#), "<b>B&auml;r</b>");
        assert_eq!(rich(r"H\textsubscript{2}O"), "H<sub>2</sub>O");
        assert_eq!(plain(r"{\em declared}"), "declared");
    }

    #[test]
    fn test_braces_are_removed() {
        assert_eq!(plain("{BibTeX} Journal"), "BibTeX Journal");
        assert_eq!(plain("{{Nested} groups}"), "Nested groups");
        assert_eq!(plain("unbalanced}"), "unbalanced");
    }

    #[test]
    fn test_malformed_and_unknown_pass_through() {
        assert_eq!(plain(r"\foo{bar} baz"), r"\foo{bar} baz");
        assert_eq!(plain(r#"trailing \""#), r#"trailing \""#);
        assert_eq!(plain(r"end \"), r"end \");
        assert_eq!(plain(r#"\"{xy}"#), r#"\"xy"#);
    }

    #[test]
    fn test_unicode_is_untouched() {
        assert_eq!(rich("Läst – José"), "Läst – José");
        assert_eq!(plain("Läst – José"), "Läst – José");
    }
}
