//! Forgiving HTML tokenizer for editable-block fragments.
//!
//! Follows the browser tokenizer's recovery behavior for everything the
//! editor sees in block contents:
//! - `<` not followed by a tag opener is literal text (`a < b`).
//! - Tag and attribute names run until whitespace, `/`, `>` (and `=` for
//!   attributes) and are ASCII-lowercased; duplicate attributes keep the first.
//! - `</>` is dropped; `</` followed by a non-letter, `<!...>` and `<?...>`
//!   become bogus comments.
//! - A tag left open at end of input is dropped, an unterminated comment runs
//!   to end of input.
//! - `script`/`style` are raw text, `textarea`/`title` are raw text with
//!   character references decoded.
//!
//! Not implemented: CDATA, foreign content, the full named-reference table
//! (see `entities`).
use crate::entities::{decode_attribute, decode_entities};
use crate::types::Token;
use memchr::memchr;

const HTML_COMMENT_START: &str = "<!--";
const HTML_COMMENT_END: &str = "-->";

fn starts_with_ignore_ascii_case_at(haystack: &[u8], start: usize, needle: &[u8]) -> bool {
    haystack.len() >= start + needle.len()
        && haystack[start..start + needle.len()].eq_ignore_ascii_case(needle)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TextMode {
    RawText,
    EscapableRawText,
}

fn text_mode(name: &str) -> Option<TextMode> {
    match name {
        "script" | "style" | "xmp" | "noembed" => Some(TextMode::RawText),
        "textarea" | "title" => Some(TextMode::EscapableRawText),
        _ => None,
    }
}

/// Find `</name` followed by whitespace, `/` or `>`; returns (start of `</`,
/// index just past the closing `>`).
///
/// Only positions holding ASCII `<` are candidates, so slicing at them stays on
/// UTF-8 boundaries.
fn find_raw_close_tag(hay: &[u8], from: usize, name: &str) -> Option<(usize, usize)> {
    let n = name.len();
    let mut i = from;
    while let Some(rel) = memchr(b'<', &hay[i..]) {
        i += rel;
        if hay.get(i + 1) == Some(&b'/')
            && starts_with_ignore_ascii_case_at(hay, i + 2, name.as_bytes())
        {
            let k = i + 2 + n;
            match hay.get(k) {
                Some(b) if b.is_ascii_whitespace() || *b == b'/' || *b == b'>' => {
                    let close = memchr(b'>', &hay[k..]).map(|r| k + r + 1)?;
                    return Some((i, close));
                }
                None => return None,
                _ => {}
            }
        }
        i += 1;
    }
    None
}

struct Cursor<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    /// Advance while `pred` holds. `pred` only ever rejects ASCII bytes, so the
    /// returned slice ends on a char boundary.
    fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.pos += 1;
        }
        debug_assert!(self.input.is_char_boundary(start));
        debug_assert!(self.input.is_char_boundary(self.pos));
        &self.input[start..self.pos]
    }

    /// Consume through the next `>`; returns the text before it, or the rest of
    /// the input when there is none.
    fn take_until_gt(&mut self) -> &'a str {
        let start = self.pos;
        match memchr(b'>', &self.bytes[start..]) {
            Some(rel) => {
                self.pos = start + rel + 1;
                &self.input[start..start + rel]
            }
            None => {
                self.pos = self.bytes.len();
                &self.input[start..]
            }
        }
    }
}

fn is_tag_name_end(b: u8) -> bool {
    b.is_ascii_whitespace() || b == b'/' || b == b'>'
}

fn is_attr_name_end(b: u8) -> bool {
    is_tag_name_end(b) || b == b'='
}

/// Tokenize a fragment. Never fails; malformed input is recovered.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut out = Vec::new();
    let mut cur = Cursor::new(input);

    while !cur.at_end() {
        let text_start = cur.pos;
        match memchr(b'<', &cur.bytes[cur.pos..]) {
            Some(rel) => cur.pos += rel,
            None => cur.pos = cur.bytes.len(),
        }
        if cur.pos > text_start {
            push_text(&mut out, &input[text_start..cur.pos]);
        }
        if cur.at_end() {
            break;
        }

        // cur.peek() == '<'
        let next = cur.bytes.get(cur.pos + 1).copied();
        match next {
            Some(b) if b.is_ascii_alphabetic() => {
                if let Some(token) = start_tag(&mut cur) {
                    let raw = match &token {
                        Token::StartTag { name, .. } => {
                            text_mode(name).map(|mode| (name.clone(), mode))
                        }
                        _ => None,
                    };
                    out.push(token);
                    if let Some((name, mode)) = raw {
                        raw_text_body(&mut cur, &mut out, &name, mode);
                    }
                }
            }
            Some(b'/') => end_tag(&mut cur, &mut out),
            Some(b'!') => markup_declaration(&mut cur, &mut out),
            Some(b'?') => {
                cur.pos += 1;
                let body = cur.take_until_gt();
                out.push(Token::Comment(body.to_string()));
            }
            _ => {
                push_text(&mut out, "<");
                cur.pos += 1;
            }
        }
    }

    out
}

fn push_text(out: &mut Vec<Token>, raw: &str) {
    let decoded = decode_entities(raw);
    if decoded.is_empty() {
        return;
    }
    if let Some(Token::Text(prev)) = out.last_mut() {
        prev.push_str(&decoded);
    } else {
        out.push(Token::Text(decoded));
    }
}

fn start_tag(cur: &mut Cursor<'_>) -> Option<Token> {
    cur.pos += 1;
    let name = cur.take_while(|b| !is_tag_name_end(b)).to_ascii_lowercase();
    let mut attributes: Vec<(String, Option<String>)> = Vec::new();
    let mut self_closing = false;

    loop {
        cur.skip_whitespace();
        match cur.peek() {
            None => {
                log::trace!(target: "html::tokenizer", "eof in <{name}>; tag dropped");
                return None;
            }
            Some(b'>') => {
                cur.pos += 1;
                break;
            }
            Some(b'/') => {
                cur.pos += 1;
                if cur.peek() == Some(b'>') {
                    self_closing = true;
                    cur.pos += 1;
                    break;
                }
                continue;
            }
            Some(_) => {}
        }

        // An attribute name may begin with `=`; the browser keeps it as part of
        // the name.
        let name_start = cur.pos;
        if cur.peek() == Some(b'=') {
            cur.pos += 1;
        }
        cur.take_while(|b| !is_attr_name_end(b));
        let attr_name = cur.input[name_start..cur.pos].to_ascii_lowercase();

        cur.skip_whitespace();
        let value = if cur.peek() == Some(b'=') {
            cur.pos += 1;
            cur.skip_whitespace();
            Some(attribute_value(cur))
        } else {
            None
        };

        if attributes.iter().any(|(k, _)| *k == attr_name) {
            log::trace!(target: "html::tokenizer", "duplicate attribute {attr_name} dropped");
        } else {
            attributes.push((attr_name, value));
        }
    }

    Some(Token::StartTag {
        name,
        attributes,
        self_closing,
    })
}

fn attribute_value(cur: &mut Cursor<'_>) -> String {
    match cur.peek() {
        Some(quote @ (b'"' | b'\'')) => {
            cur.pos += 1;
            let start = cur.pos;
            let end = memchr(quote, &cur.bytes[start..])
                .map(|rel| start + rel)
                .unwrap_or(cur.bytes.len());
            cur.pos = (end + 1).min(cur.bytes.len());
            decode_attribute(&cur.input[start..end])
        }
        _ => {
            let raw = cur.take_while(|b| !b.is_ascii_whitespace() && b != b'>');
            decode_attribute(raw)
        }
    }
}

fn end_tag(cur: &mut Cursor<'_>, out: &mut Vec<Token>) {
    cur.pos += 2;
    match cur.peek() {
        Some(b) if b.is_ascii_alphabetic() => {
            let name = cur.take_while(|b| !is_tag_name_end(b)).to_ascii_lowercase();
            // Attributes on end tags are discarded.
            match memchr(b'>', &cur.bytes[cur.pos..]) {
                Some(rel) => {
                    cur.pos += rel + 1;
                    out.push(Token::EndTag(name));
                }
                None => {
                    log::trace!(target: "html::tokenizer", "eof in </{name}; tag dropped");
                    cur.pos = cur.bytes.len();
                }
            }
        }
        Some(b'>') => {
            cur.pos += 1;
        }
        None => push_text(out, "</"),
        Some(_) => {
            let body = cur.take_until_gt();
            out.push(Token::Comment(body.to_string()));
        }
    }
}

fn markup_declaration(cur: &mut Cursor<'_>, out: &mut Vec<Token>) {
    let rest = &cur.input[cur.pos..];
    if rest.starts_with(HTML_COMMENT_START) {
        let body_start = cur.pos + HTML_COMMENT_START.len();
        let body = &cur.input[body_start..];
        // `<!-->` and `<!--->` are complete, empty comments.
        if body.starts_with('>') || body.starts_with("->") {
            cur.pos = body_start + body.find('>').map_or(0, |i| i + 1);
            out.push(Token::Comment(String::new()));
            return;
        }
        match body.find(HTML_COMMENT_END) {
            Some(end) => {
                out.push(Token::Comment(body[..end].to_string()));
                cur.pos = body_start + end + HTML_COMMENT_END.len();
            }
            None => {
                out.push(Token::Comment(body.to_string()));
                cur.pos = cur.bytes.len();
            }
        }
        return;
    }
    if starts_with_ignore_ascii_case_at(cur.bytes, cur.pos, b"<!doctype") {
        cur.pos += 2;
        let body = cur.take_until_gt();
        out.push(Token::Doctype(body.trim().to_string()));
        return;
    }
    cur.pos += 2;
    let body = cur.take_until_gt();
    out.push(Token::Comment(body.to_string()));
}

fn raw_text_body(cur: &mut Cursor<'_>, out: &mut Vec<Token>, name: &str, mode: TextMode) {
    let start = cur.pos;
    let (body_end, resume) = match find_raw_close_tag(cur.bytes, start, name) {
        Some((close_start, close_end)) => (close_start, Some(close_end)),
        None => (cur.bytes.len(), None),
    };
    let raw = &cur.input[start..body_end];
    if !raw.is_empty() {
        let text = match mode {
            TextMode::RawText => raw.to_string(),
            TextMode::EscapableRawText => decode_entities(raw),
        };
        out.push(Token::Text(text));
    }
    out.push(Token::EndTag(name.to_string()));
    cur.pos = resume.unwrap_or(cur.bytes.len());
}
