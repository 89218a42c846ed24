use crate::error::{Result, TemplateError};
use crate::render::{IoWriter, PropertySource, estimate_output_size, render_tokens};
use crate::token::{PropertyToken, Token};
use crate::value::FormatProvider;
use std::fmt::{self, Write};

/// A parsed message template that can be rendered many times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    text: String,
    tokens: Vec<Token>,
}

impl Template {
    pub(crate) fn new(text: String, tokens: Vec<Token>) -> Self {
        Self { text, tokens }
    }

    /// The template as it was written.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn properties(&self) -> impl Iterator<Item = &PropertyToken> {
        self.tokens.iter().filter_map(Token::as_property)
    }

    /// Property tokens, when at least one of them is named.
    ///
    /// A template mixing `{0}` and `{Name}` binds every property by name.
    pub fn named_properties(&self) -> Option<Vec<&PropertyToken>> {
        let all: Vec<_> = self.properties().collect();
        if all.is_empty() || all.iter().all(|p| p.is_positional()) {
            return None;
        }
        Some(all)
    }

    /// Property tokens, when every one of them is positional.
    pub fn positional_properties(&self) -> Option<Vec<&PropertyToken>> {
        let all: Vec<_> = self.properties().collect();
        if all.is_empty() || !all.iter().all(|p| p.is_positional()) {
            return None;
        }
        Some(all)
    }

    /// Render into any `fmt::Write` sink.
    pub fn render<P, W>(
        &self,
        properties: &P,
        output: &mut W,
        provider: Option<&dyn FormatProvider>,
    ) -> Result<()>
    where
        P: PropertySource + ?Sized,
        W: Write + ?Sized,
    {
        render_tokens(&self.tokens, properties, output, provider)?;
        Ok(())
    }

    /// Render into a new string.
    pub fn render_to_string<P>(
        &self,
        properties: &P,
        provider: Option<&dyn FormatProvider>,
    ) -> Result<String>
    where
        P: PropertySource + ?Sized,
    {
        let mut output = String::with_capacity(estimate_output_size(self.text.len()));
        render_tokens(&self.tokens, properties, &mut output, provider)?;
        Ok(output)
    }

    /// Render into a byte sink such as a file or stdout.
    pub fn render_io<P, W>(
        &self,
        properties: &P,
        output: &mut W,
        provider: Option<&dyn FormatProvider>,
    ) -> Result<()>
    where
        P: PropertySource + ?Sized,
        W: std::io::Write + ?Sized,
    {
        let mut writer = IoWriter::new(output);
        match render_tokens(&self.tokens, properties, &mut writer, provider) {
            Ok(()) => Ok(()),
            Err(error) => Err(match writer.error.take() {
                Some(io) => TemplateError::Io(io),
                None => TemplateError::Format(error),
            }),
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
