use crate::token::{PropertyToken, Token};
use crate::value::{FormatProvider, PropertyValue};
use std::collections::{BTreeMap, HashMap};
use std::fmt::{self, Write};
use std::hash::BuildHasher;

/// Name to value lookup consulted while rendering. Matching is exact and
/// case-sensitive.
pub trait PropertySource {
    fn get_property(&self, name: &str) -> Option<&dyn PropertyValue>;
}

impl<V: PropertyValue, S: BuildHasher> PropertySource for HashMap<String, V, S> {
    fn get_property(&self, name: &str) -> Option<&dyn PropertyValue> {
        self.get(name).map(|value| value as &dyn PropertyValue)
    }
}

impl<V: PropertyValue> PropertySource for BTreeMap<String, V> {
    fn get_property(&self, name: &str) -> Option<&dyn PropertyValue> {
        self.get(name).map(|value| value as &dyn PropertyValue)
    }
}

impl<V: PropertyValue> PropertySource for [(&str, V)] {
    fn get_property(&self, name: &str) -> Option<&dyn PropertyValue> {
        self.iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value as &dyn PropertyValue)
    }
}

impl<V: PropertyValue, const N: usize> PropertySource for [(&str, V); N] {
    fn get_property(&self, name: &str) -> Option<&dyn PropertyValue> {
        self.as_slice().get_property(name)
    }
}

#[inline]
pub(crate) fn estimate_output_size(template_len: usize) -> usize {
    template_len + (template_len / 2) + 32
}

// Aligned values are usually short; the buffer grows for longer ones.
const ALIGNED_VALUE_CAPACITY: usize = 32;

/// Write every token to `output`, substituting properties.
pub fn render_tokens<P, W>(
    tokens: &[Token],
    properties: &P,
    output: &mut W,
    provider: Option<&dyn FormatProvider>,
) -> fmt::Result
where
    P: PropertySource + ?Sized,
    W: Write + ?Sized,
{
    for token in tokens {
        token.render(properties, output, provider)?;
    }
    Ok(())
}

pub(crate) fn render_property<P, W>(
    token: &PropertyToken,
    properties: &P,
    output: &mut W,
    provider: Option<&dyn FormatProvider>,
) -> fmt::Result
where
    P: PropertySource + ?Sized,
    W: Write + ?Sized,
{
    let Some(value) = properties.get_property(token.property_name()) else {
        return output.write_str(token.raw_text());
    };

    let Some(alignment) = token.alignment() else {
        return value.render(&mut DynWriter(output), token.format(), provider);
    };

    let mut buffer = String::with_capacity(ALIGNED_VALUE_CAPACITY);
    value.render(&mut buffer, token.format(), provider)?;
    alignment.pad(output, &buffer)
}

// Lets an unsized `W` be handed to `PropertyValue::render` as `dyn Write`.
struct DynWriter<'a, W: Write + ?Sized>(&'a mut W);

impl<W: Write + ?Sized> Write for DynWriter<'_, W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.write_str(s)
    }

    fn write_char(&mut self, c: char) -> fmt::Result {
        self.0.write_char(c)
    }
}

/// Adapts an `io::Write` byte sink to `fmt::Write`, keeping the underlying
/// I/O error.
pub(crate) struct IoWriter<'a, W: std::io::Write + ?Sized> {
    inner: &'a mut W,
    pub(crate) error: Option<std::io::Error>,
}

impl<'a, W: std::io::Write + ?Sized> IoWriter<'a, W> {
    pub(crate) fn new(inner: &'a mut W) -> Self {
        Self { inner, error: None }
    }
}

impl<W: std::io::Write + ?Sized> Write for IoWriter<'_, W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.inner.write_all(s.as_bytes()).map_err(|error| {
            self.error = Some(error);
            fmt::Error
        })
    }
}
