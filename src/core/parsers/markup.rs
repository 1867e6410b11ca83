//! A small, offset-preserving tokenizer for component template markup.
//!
//! It understands just enough HTML to locate attributes and text nodes:
//! start and end tags, quoted/unquoted attribute values, comments and the
//! raw-text elements whose content must not be touched. Every token carries
//! byte offsets into the input so edits can be spliced back in place.

/// One attribute of a start tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: Option<AttributeValue>,
    /// Offset of the first byte of the name.
    pub start: usize,
    /// Offset just past the closing quote (or the name, for bare attributes).
    pub end: usize,
}

impl Attribute {
    pub fn value_text(&self) -> Option<&str> {
        self.value.as_ref().map(|v| v.text.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeValue {
    pub text: String,
    /// Offsets of the value itself, excluding quotes.
    pub start: usize,
    pub end: usize,
    pub quote: Option<char>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTag {
    pub name: String,
    pub attributes: Vec<Attribute>,
    /// Offset just past `>`.
    pub end: usize,
    pub self_closing: bool,
}

impl StartTag {
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    StartTag(StartTag),
    EndTag,
    Text { start: usize, end: usize },
}

/// Elements whose content is never markup.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea"];

/// Tokenize `markup`. Comments, doctypes and raw-text element content are
/// dropped; everything else is returned in source order.
pub fn tokenize(markup: &str) -> Vec<Token> {
    let bytes = markup.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;
    let mut text_start = 0;

    while pos < bytes.len() {
        if bytes[pos..].starts_with(b"{{") {
            // Interpolations are opaque; `<` inside one is an operator.
            pos = match markup[pos + 2..].find("}}") {
                Some(i) => pos + 2 + i + 2,
                None => pos + 2,
            };
            continue;
        }
        if bytes[pos] != b'<' {
            pos += 1;
            continue;
        }

        let rest = &markup[pos..];
        if rest.starts_with("<!--") {
            push_text(&mut tokens, text_start, pos);
            pos = match markup[pos + 4..].find("-->") {
                Some(i) => pos + 4 + i + 3,
                None => bytes.len(),
            };
            text_start = pos;
        } else if rest.starts_with("<!") {
            push_text(&mut tokens, text_start, pos);
            pos = markup[pos..].find('>').map_or(bytes.len(), |i| pos + i + 1);
            text_start = pos;
        } else if rest.starts_with("</") && starts_tag_name(bytes, pos + 2) {
            push_text(&mut tokens, text_start, pos);
            let name_end = scan_tag_name(bytes, pos + 2);
            pos = markup[name_end..]
                .find('>')
                .map_or(bytes.len(), |i| name_end + i + 1);
            tokens.push(Token::EndTag);
            text_start = pos;
        } else if starts_tag_name(bytes, pos + 1) {
            push_text(&mut tokens, text_start, pos);
            let tag = parse_start_tag(markup, pos);
            pos = tag.end;
            let raw_name = tag.name.to_ascii_lowercase();
            let is_raw = !tag.self_closing && RAW_TEXT_ELEMENTS.contains(&raw_name.as_str());
            tokens.push(Token::StartTag(tag));
            if is_raw {
                let close = find_close_tag(markup, pos, &raw_name).unwrap_or(bytes.len());
                pos = close;
            }
            text_start = pos;
        } else {
            pos += 1;
        }
    }
    push_text(&mut tokens, text_start, bytes.len());
    tokens
}

fn push_text(tokens: &mut Vec<Token>, start: usize, end: usize) {
    if end > start {
        tokens.push(Token::Text { start, end });
    }
}

fn starts_tag_name(bytes: &[u8], pos: usize) -> bool {
    bytes.get(pos).is_some_and(|b| b.is_ascii_alphabetic())
}

fn scan_tag_name(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && !bytes[pos].is_ascii_whitespace() && !matches!(bytes[pos], b'>' | b'/')
    {
        pos += 1;
    }
    pos
}

fn skip_whitespace(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
        pos += 1;
    }
    pos
}

/// Parse the start tag beginning at `start` (which must point at `<`).
///
/// Unterminated tags run to the end of input.
pub fn parse_start_tag(markup: &str, start: usize) -> StartTag {
    let bytes = markup.as_bytes();
    let name_end = scan_tag_name(bytes, start + 1);
    let name = markup[start + 1..name_end].to_string();
    let mut attributes = Vec::new();
    let mut pos = name_end;
    let mut self_closing = false;

    loop {
        pos = skip_whitespace(bytes, pos);
        if pos >= bytes.len() {
            break;
        }
        match bytes[pos] {
            b'>' => {
                pos += 1;
                break;
            }
            b'/' if bytes.get(pos + 1) == Some(&b'>') => {
                self_closing = true;
                pos += 2;
                break;
            }
            b'/' => {
                pos += 1;
                continue;
            }
            _ => {}
        }

        let attr_start = pos;
        while pos < bytes.len()
            && !bytes[pos].is_ascii_whitespace()
            && !matches!(bytes[pos], b'=' | b'>')
            && !(bytes[pos] == b'/' && bytes.get(pos + 1) == Some(&b'>'))
        {
            pos += 1;
        }
        let attr_name = markup[attr_start..pos].to_string();

        let after_name = skip_whitespace(bytes, pos);
        let mut value = None;
        if bytes.get(after_name) == Some(&b'=') {
            let value_pos = skip_whitespace(bytes, after_name + 1);
            match bytes.get(value_pos) {
                Some(&q) if q == b'"' || q == b'\'' => {
                    let content_start = value_pos + 1;
                    let content_end = markup[content_start..]
                        .find(q as char)
                        .map_or(bytes.len(), |i| content_start + i);
                    value = Some(AttributeValue {
                        text: markup[content_start..content_end].to_string(),
                        start: content_start,
                        end: content_end,
                        quote: Some(q as char),
                    });
                    pos = (content_end + 1).min(bytes.len());
                }
                Some(_) => {
                    let mut end = value_pos;
                    while end < bytes.len()
                        && !bytes[end].is_ascii_whitespace()
                        && bytes[end] != b'>'
                    {
                        end += 1;
                    }
                    value = Some(AttributeValue {
                        text: markup[value_pos..end].to_string(),
                        start: value_pos,
                        end,
                        quote: None,
                    });
                    pos = end;
                }
                None => pos = value_pos,
            }
        }

        attributes.push(Attribute {
            name: attr_name,
            value,
            start: attr_start,
            end: pos,
        });
    }

    StartTag {
        name,
        attributes,
        end: pos,
        self_closing,
    }
}

/// Offset of the `</name` that closes a raw-text element opened before `from`.
pub fn find_close_tag(markup: &str, from: usize, name: &str) -> Option<usize> {
    let needle = format!("</{}", name);
    let lower = markup[from..].to_ascii_lowercase();
    let mut search = 0;
    while let Some(i) = lower[search..].find(&needle) {
        let at = search + i;
        let after = lower.as_bytes().get(at + needle.len());
        if after.is_none_or(|b| b.is_ascii_whitespace() || *b == b'>') {
            return Some(from + at);
        }
        search = at + needle.len();
    }
    None
}
