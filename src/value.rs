//! Property values and the culture hooks used while rendering them.

use crate::token::Destructuring;
use std::fmt::{self, Write};
use std::sync::Arc;

/// A value that can be substituted into a property tag.
pub trait PropertyValue {
    fn render(
        &self,
        output: &mut dyn Write,
        format: Option<&str>,
        provider: Option<&dyn FormatProvider>,
    ) -> fmt::Result;
}

impl<T: PropertyValue + ?Sized> PropertyValue for &T {
    fn render(
        &self,
        output: &mut dyn Write,
        format: Option<&str>,
        provider: Option<&dyn FormatProvider>,
    ) -> fmt::Result {
        (**self).render(output, format, provider)
    }
}

impl<T: PropertyValue + ?Sized> PropertyValue for Box<T> {
    fn render(
        &self,
        output: &mut dyn Write,
        format: Option<&str>,
        provider: Option<&dyn FormatProvider>,
    ) -> fmt::Result {
        (**self).render(output, format, provider)
    }
}

impl<T: PropertyValue + ?Sized> PropertyValue for Arc<T> {
    fn render(
        &self,
        output: &mut dyn Write,
        format: Option<&str>,
        provider: Option<&dyn FormatProvider>,
    ) -> fmt::Result {
        (**self).render(output, format, provider)
    }
}

/// Culture-specific formatting.
pub trait FormatProvider {
    fn decimal_separator(&self) -> char {
        '.'
    }

    /// Override the rendering of a scalar entirely. `None` keeps the default.
    fn format_scalar(&self, _value: &ScalarValue, _format: Option<&str>) -> Option<String> {
        None
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InvariantCulture;

impl FormatProvider for InvariantCulture {}

#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Char(char),
    Str(String),
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Null => f.write_str("null"),
            ScalarValue::Bool(value) => write!(f, "{value}"),
            ScalarValue::Int(value) => write!(f, "{value}"),
            ScalarValue::UInt(value) => write!(f, "{value}"),
            ScalarValue::Float(value) => write!(f, "{value}"),
            ScalarValue::Char(value) => f.write_char(*value),
            ScalarValue::Str(value) => f.write_str(value),
        }
    }
}

impl PropertyValue for ScalarValue {
    fn render(
        &self,
        output: &mut dyn Write,
        format: Option<&str>,
        provider: Option<&dyn FormatProvider>,
    ) -> fmt::Result {
        if let Some(provider) = provider
            && let Some(text) = provider.format_scalar(self, format)
        {
            return output.write_str(&text);
        }

        let literal = format.is_some_and(|f| f.contains('l'));
        let separator = provider.map_or('.', |p| p.decimal_separator());
        let number_format = NumberFormat::parse(format.unwrap_or(""));

        match self {
            ScalarValue::Str(value) if literal => output.write_str(value),
            ScalarValue::Str(value) => write_quoted(output, value, '"'),
            ScalarValue::Char(value) if literal => output.write_char(*value),
            ScalarValue::Char(value) => {
                let mut buf = [0u8; 4];
                write_quoted(output, value.encode_utf8(&mut buf), '\'')
            }
            ScalarValue::Int(value) => {
                write_integer(output, *value < 0, value.unsigned_abs(), number_format, separator)
            }
            ScalarValue::UInt(value) => {
                write_integer(output, false, *value, number_format, separator)
            }
            ScalarValue::Float(value) => write_float(output, *value, number_format, separator),
            ScalarValue::Null | ScalarValue::Bool(_) => write!(output, "{self}"),
        }
    }
}

fn write_quoted(output: &mut dyn Write, value: &str, quote: char) -> fmt::Result {
    output.write_char(quote)?;
    for c in value.chars() {
        if c == quote || c == '\\' {
            output.write_char('\\')?;
        }
        output.write_char(c)?;
    }
    output.write_char(quote)
}

/// Largest `D`, `X` and `F` precision honoured; longer ones are clamped.
const MAX_PRECISION: usize = 99;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberFormat {
    General,
    Hex { upper: bool, digits: usize },
    Digits(usize),
    Fixed { min_int: usize, decimals: usize },
}

impl NumberFormat {
    fn parse(format: &str) -> Self {
        let mut chars = format.chars();
        let Some(first) = chars.next() else {
            return NumberFormat::General;
        };
        let rest = chars.as_str();
        let count = || -> Option<usize> {
            if rest.is_empty() {
                return Some(0);
            }
            if !rest.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            Some(rest.parse().map_or(MAX_PRECISION, |n: usize| n.min(MAX_PRECISION)))
        };

        match first {
            'x' | 'X' => count().map_or(NumberFormat::General, |digits| NumberFormat::Hex {
                upper: first == 'X',
                digits,
            }),
            'd' | 'D' => count().map_or(NumberFormat::General, NumberFormat::Digits),
            'f' | 'F' | 'n' | 'N' => {
                let decimals = if rest.is_empty() { Some(2) } else { count() };
                decimals.map_or(NumberFormat::General, |decimals| NumberFormat::Fixed {
                    min_int: 1,
                    decimals,
                })
            }
            '0' => Self::parse_zero_pattern(format),
            _ => NumberFormat::General,
        }
    }

    // `000` or `0.00`
    fn parse_zero_pattern(format: &str) -> Self {
        let (int_part, frac_part) = match format.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (format, None),
        };
        let all_zeros = |s: &str| s.bytes().all(|b| b == b'0');
        if !all_zeros(int_part) {
            return NumberFormat::General;
        }

        match frac_part {
            None => NumberFormat::Digits(int_part.len()),
            Some(frac) if !frac.is_empty() && all_zeros(frac) => NumberFormat::Fixed {
                min_int: int_part.len(),
                decimals: frac.len(),
            },
            Some(_) => NumberFormat::General,
        }
    }
}

fn write_padded(output: &mut dyn Write, negative: bool, digits: &str, min: usize) -> fmt::Result {
    if negative {
        output.write_char('-')?;
    }
    for _ in digits.len()..min {
        output.write_char('0')?;
    }
    output.write_str(digits)
}

fn write_integer(
    output: &mut dyn Write,
    negative: bool,
    magnitude: u64,
    format: NumberFormat,
    separator: char,
) -> fmt::Result {
    match format {
        NumberFormat::General => write_padded(output, negative, &magnitude.to_string(), 0),
        NumberFormat::Digits(min) => write_padded(output, negative, &magnitude.to_string(), min),
        NumberFormat::Hex { upper, digits } => {
            // Negative values print their two's complement form.
            let bits = if negative {
                (magnitude as i64).wrapping_neg() as u64
            } else {
                magnitude
            };
            let hex = if upper {
                format!("{bits:X}")
            } else {
                format!("{bits:x}")
            };
            write_padded(output, false, &hex, digits)
        }
        NumberFormat::Fixed { min_int, decimals } => {
            write_padded(output, negative, &magnitude.to_string(), min_int)?;
            if decimals > 0 {
                output.write_char(separator)?;
                for _ in 0..decimals {
                    output.write_char('0')?;
                }
            }
            Ok(())
        }
    }
}

fn write_float(
    output: &mut dyn Write,
    value: f64,
    format: NumberFormat,
    separator: char,
) -> fmt::Result {
    if !value.is_finite() {
        return write!(output, "{value}");
    }

    let (min_int, decimals) = match format {
        NumberFormat::Fixed { min_int, decimals } => (min_int, decimals),
        NumberFormat::Digits(min) => (min, 0),
        NumberFormat::General | NumberFormat::Hex { .. } => {
            let text = value.to_string();
            return write_with_separator(output, &text, separator);
        }
    };

    let text = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text.as_str(), None),
    };
    let negative = value.is_sign_negative() && text.bytes().any(|b| b != b'0' && b != b'.');
    write_padded(output, negative, int_part, min_int)?;
    if let Some(frac) = frac_part {
        output.write_char(separator)?;
        output.write_str(frac)?;
    }
    Ok(())
}

fn write_with_separator(output: &mut dyn Write, text: &str, separator: char) -> fmt::Result {
    match text.split_once('.') {
        Some((int_part, frac_part)) if separator != '.' => {
            output.write_str(int_part)?;
            output.write_char(separator)?;
            output.write_str(frac_part)
        }
        _ => output.write_str(text),
    }
}

macro_rules! scalar_from {
    ($variant:ident, $target:ty; $($source:ty),*) => {
        $(
            impl From<$source> for ScalarValue {
                fn from(value: $source) -> Self {
                    ScalarValue::$variant(value as $target)
                }
            }
        )*
    };
}

scalar_from!(Int, i64; i8, i16, i32, i64, isize);
scalar_from!(UInt, u64; u8, u16, u32, u64, usize);
scalar_from!(Float, f64; f32, f64);

impl From<bool> for ScalarValue {
    fn from(value: bool) -> Self {
        ScalarValue::Bool(value)
    }
}

impl From<char> for ScalarValue {
    fn from(value: char) -> Self {
        ScalarValue::Char(value)
    }
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        ScalarValue::Str(value.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(value: String) -> Self {
        ScalarValue::Str(value)
    }
}

impl<T: Into<ScalarValue>> From<Option<T>> for ScalarValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ScalarValue::Null, Into::into)
    }
}

/// Turns captured values into renderable property values.
pub trait PropertyValueFactory {
    fn create(&self, value: ScalarValue, destructuring: Destructuring) -> Box<dyn PropertyValue>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarValueFactory;

impl PropertyValueFactory for ScalarValueFactory {
    fn create(&self, value: ScalarValue, destructuring: Destructuring) -> Box<dyn PropertyValue> {
        match destructuring {
            Destructuring::Stringify => Box::new(ScalarValue::Str(value.to_string())),
            Destructuring::Default | Destructuring::Destructure => Box::new(value),
        }
    }
}
