use crate::alignment::{Alignment, AlignmentDirection};
use crate::charclass::{
    is_valid_in_alignment, is_valid_in_format, is_valid_in_name, is_valid_in_tag,
};
use crate::template::Template;
use crate::token::{Destructuring, PropertyToken, TextToken, Token};

/// Single pass tokenizer over a message template.
///
/// Malformed tags never fail the parse: whatever cannot become a
/// [`PropertyToken`] is kept as text, so every input yields a template.
pub struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn remaining(&self) -> &'a [u8] {
        &self.input.as_bytes()[self.pos..]
    }

    pub fn parse(mut self) -> Vec<Token> {
        if self.input.is_empty() {
            return vec![Token::text("")];
        }

        // Each tag can split the surrounding text in two.
        let open_count = memchr::memchr_iter(b'{', self.input.as_bytes()).count();
        let mut tokens = Vec::with_capacity(1 + open_count * 2);

        while !self.at_end() {
            if let Some(token) = self.next_text() {
                tokens.push(token);
            }
            if self.at_end() {
                break;
            }
            if let Some(token) = self.next_property() {
                tokens.push(token);
            }
        }
        tokens
    }

    /// Consume literal text up to the next unescaped `{`.
    fn next_text(&mut self) -> Option<Token> {
        let start = self.pos;
        let bytes = self.input.as_bytes();
        let mut text = String::new();
        let mut run_start = start;

        while let Some(offset) = memchr::memchr2(b'{', b'}', self.remaining()) {
            let brace = self.pos + offset;
            let doubled = bytes.get(brace + 1) == Some(&bytes[brace]);
            text.push_str(&self.input[run_start..brace]);

            match (bytes[brace], doubled) {
                (b'{', false) => {
                    self.pos = brace;
                    return self.finish_text(text, start);
                }
                (brace_byte, true) => {
                    text.push(brace_byte as char);
                    self.pos = brace + 2;
                }
                (brace_byte, false) => {
                    text.push(brace_byte as char);
                    self.pos = brace + 1;
                }
            }
            run_start = self.pos;
        }

        text.push_str(&self.input[run_start..]);
        self.pos = self.input.len();
        self.finish_text(text, start)
    }

    fn finish_text(&self, text: String, start: usize) -> Option<Token> {
        if self.pos == start {
            return None;
        }
        Some(Token::Text(TextToken::escaped(
            text,
            &self.input[start..self.pos],
        )))
    }

    /// Consume a tag starting at `{`. Always advances past at least the brace.
    fn next_property(&mut self) -> Option<Token> {
        let first = self.pos;
        let after_brace = first + 1;
        let scanned = self.input[after_brace..]
            .char_indices()
            .find(|&(_, c)| !is_valid_in_tag(c))
            .map_or(self.input.len(), |(offset, _)| after_brace + offset);

        if self.input.as_bytes().get(scanned) != Some(&b'}') {
            self.pos = scanned;
            return Some(Token::text(&self.input[first..scanned]));
        }

        self.pos = scanned + 1;
        let raw = &self.input[first..self.pos];
        let content = &self.input[after_brace..scanned];

        Some(match parse_tag(raw, content) {
            Some(token) => Token::Property(token),
            None => Token::text(raw),
        })
    }
}

fn segment(text: &str) -> Option<&str> {
    Some(text).filter(|s| !s.is_empty())
}

struct TagParts<'a> {
    name: &'a str,
    format: Option<&'a str>,
    alignment: Option<&'a str>,
}

/// Split at the first `:` and the first `,`, whichever comes first deciding
/// the layout. `None` when a format or alignment segment would be empty.
fn split_tag_content(content: &str) -> Option<TagParts<'_>> {
    let format_delim = content.find(':');
    let alignment_delim = content.find(',');

    match (alignment_delim, format_delim) {
        (None, None) => Some(TagParts {
            name: content,
            format: None,
            alignment: None,
        }),
        (None, Some(f)) => Some(TagParts {
            name: &content[..f],
            format: Some(segment(&content[f + 1..])?),
            alignment: None,
        }),
        (Some(a), Some(f)) if a > f => Some(TagParts {
            name: &content[..f],
            format: Some(segment(&content[f + 1..])?),
            alignment: None,
        }),
        (Some(a), None) => Some(TagParts {
            name: &content[..a],
            format: None,
            alignment: Some(segment(&content[a + 1..])?),
        }),
        (Some(a), Some(f)) => Some(TagParts {
            name: &content[..a],
            format: Some(segment(&content[f + 1..])?),
            alignment: Some(segment(&content[a + 1..f])?),
        }),
    }
}

fn parse_alignment(text: &str) -> Option<Alignment> {
    if !text.chars().all(is_valid_in_alignment) {
        return None;
    }

    let (direction, digits) = match text.rfind('-') {
        None => (AlignmentDirection::Right, text),
        Some(0) => (AlignmentDirection::Left, &text[1..]),
        Some(_) => return None,
    };

    let width = digits.parse::<i32>().ok().filter(|&width| width > 0)?;
    Some(Alignment::new(direction, width as usize))
}

fn parse_tag(raw: &str, content: &str) -> Option<PropertyToken> {
    if content.is_empty() {
        return None;
    }

    let parts = split_tag_content(content)?;

    let mut name = parts.name;
    let mut destructuring = Destructuring::Default;
    if let Some(hint) = name.chars().next().and_then(Destructuring::from_hint) {
        destructuring = hint;
        name = &name[1..];
    }

    if name.is_empty() || !name.chars().all(is_valid_in_name) {
        return None;
    }

    if let Some(format) = parts.format
        && !format.chars().all(is_valid_in_format)
    {
        return None;
    }

    let alignment = match parts.alignment {
        Some(text) => Some(parse_alignment(text)?),
        None => None,
    };

    Some(PropertyToken::new(
        name.to_string(),
        raw.to_string(),
        parts.format.map(str::to_string),
        alignment,
        destructuring,
    ))
}

/// Parse `template` into an immutable [`Template`].
pub fn parse(template: &str) -> Template {
    Template::new(template.to_string(), Parser::new(template).parse())
}
