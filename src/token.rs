use crate::alignment::Alignment;
use crate::render::{PropertySource, render_property};
use crate::value::FormatProvider;
use std::fmt::{self, Write};
use std::hash::{Hash, Hasher};

/// How a captured value should be turned into a property value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Destructuring {
    #[default]
    Default,
    /// `{@Name}`: capture the structure of the value.
    Destructure,
    /// `{$Name}`: capture the value's string form.
    Stringify,
}

impl Destructuring {
    pub(crate) fn from_hint(c: char) -> Option<Self> {
        match c {
            '@' => Some(Destructuring::Destructure),
            '$' => Some(Destructuring::Stringify),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextToken {
    text: String,
    // Source text, kept only when `{{`/`}}` escapes made it differ from `text`.
    source: Option<Box<str>>,
}

impl TextToken {
    pub(crate) fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: None,
        }
    }

    pub(crate) fn escaped(text: String, source: &str) -> Self {
        let source = (text != source).then(|| Box::from(source));
        Self { text, source }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The text as written in the template, escapes intact.
    pub fn source(&self) -> &str {
        self.source.as_deref().unwrap_or(&self.text)
    }
}

/// A `{...}` tag that passed validation.
#[derive(Debug, Clone)]
pub struct PropertyToken {
    name: String,
    raw: String,
    format: Option<String>,
    alignment: Option<Alignment>,
    destructuring: Destructuring,
    position: Option<usize>,
}

impl PropertyToken {
    pub(crate) fn new(
        name: String,
        raw: String,
        format: Option<String>,
        alignment: Option<Alignment>,
        destructuring: Destructuring,
    ) -> Self {
        let position = parse_position(&name);
        Self {
            name,
            raw,
            format,
            alignment,
            destructuring,
            position,
        }
    }

    pub fn property_name(&self) -> &str {
        &self.name
    }

    /// The tag exactly as written in the template, braces included.
    pub fn raw_text(&self) -> &str {
        &self.raw
    }

    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    pub fn alignment(&self) -> Option<Alignment> {
        self.alignment
    }

    pub fn destructuring(&self) -> Destructuring {
        self.destructuring
    }

    pub fn is_positional(&self) -> bool {
        self.position.is_some()
    }

    pub fn try_get_positional_value(&self) -> Option<usize> {
        self.position
    }
}

// Digits only, no sign, and within `i32` range.
fn parse_position(name: &str) -> Option<usize> {
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    name.parse::<i32>().ok().map(|value| value as usize)
}

impl PartialEq for PropertyToken {
    fn eq(&self, other: &Self) -> bool {
        self.destructuring == other.destructuring
            && self.format == other.format
            && self.name == other.name
            && self.raw == other.raw
    }
}

impl Eq for PropertyToken {}

impl Hash for PropertyToken {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    Text(TextToken),
    Property(PropertyToken),
}

impl Token {
    pub(crate) fn text(text: impl Into<String>) -> Self {
        Token::Text(TextToken::new(text))
    }

    /// The token as written in the template.
    ///
    /// Concatenating `raw()` over every token of a template reproduces the
    /// template text exactly.
    pub fn raw(&self) -> &str {
        match self {
            Token::Text(token) => token.source(),
            Token::Property(token) => token.raw_text(),
        }
    }

    pub fn as_property(&self) -> Option<&PropertyToken> {
        match self {
            Token::Property(token) => Some(token),
            Token::Text(_) => None,
        }
    }

    pub fn render<P, W>(
        &self,
        properties: &P,
        output: &mut W,
        provider: Option<&dyn FormatProvider>,
    ) -> fmt::Result
    where
        P: PropertySource + ?Sized,
        W: Write + ?Sized,
    {
        match self {
            Token::Text(token) => output.write_str(token.text()),
            Token::Property(token) => render_property(token, properties, output, provider),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn token(name: &str, raw: &str, format: Option<&str>) -> PropertyToken {
        PropertyToken::new(
            name.to_string(),
            raw.to_string(),
            format.map(str::to_string),
            None,
            Destructuring::Default,
        )
    }

    fn hash_of(token: &PropertyToken) -> u64 {
        let mut hasher = DefaultHasher::new();
        token.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn positional_names() {
        assert_eq!(token("0", "{0}", None).try_get_positional_value(), Some(0));
        assert_eq!(token("12", "{12}", None).try_get_positional_value(), Some(12));
        assert!(!token("Name", "{Name}", None).is_positional());
        assert!(!token("1a", "{1a}", None).is_positional());
    }

    #[test]
    fn positional_overflow_is_named() {
        assert!(token("2147483647", "{2147483647}", None).is_positional());
        assert!(!token("2147483648", "{2147483648}", None).is_positional());
    }

    #[test]
    fn equality_uses_raw_text() {
        assert_eq!(token("A", "{A}", None), token("A", "{A}", None));
        assert_ne!(token("A", "{A}", None), token("A", "{A,5}", None));
        assert_ne!(token("A", "{A:x}", Some("x")), token("A", "{A:x}", None));
    }

    #[test]
    fn hash_uses_name_only() {
        assert_eq!(
            hash_of(&token("A", "{A}", None)),
            hash_of(&token("A", "{A:x}", Some("x")))
        );
    }

    #[test]
    fn display_writes_raw() {
        let property = Token::Property(token("A", "{A:x}", Some("x")));
        assert_eq!(property.to_string(), "{A:x}");
        assert_eq!(Token::text("plain").to_string(), "plain");
    }

    #[test]
    fn escaped_text_keeps_source() {
        let escaped = TextToken::escaped("{x}".to_string(), "{{x}}");
        assert_eq!(escaped.text(), "{x}");
        assert_eq!(escaped.source(), "{{x}}");

        let plain = TextToken::escaped("x }".to_string(), "x }");
        assert_eq!(plain.source(), "x }");
        assert_eq!(plain, TextToken::new("x }"));
    }
}
