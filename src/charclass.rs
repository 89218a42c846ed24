//! Character classes for the contents of a `{...}` property tag.
//!
//! ASCII characters are looked up in a precomputed table; everything else
//! is classified by Unicode general category: letters and decimal digits
//! (`L*`, `Nd`) and punctuation (`P*`).

use bitflags::bitflags;
use unicode_general_category::{GeneralCategory, get_general_category};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CharClass: u8 {
        /// Letters, digits and `_`.
        const NAME = 0b0_0001;
        /// Letters, digits, punctuation and space, never `}`.
        const FORMAT = 0b0_0010;
        /// Digits and `-`.
        const ALIGNMENT = 0b0_0100;
        /// `@` and `$`.
        const HINT = 0b0_1000;
        /// Anything allowed between `{` and `}`.
        const TAG = 0b1_0000;
    }
}

const fn is_ascii_letter_or_digit(c: u8) -> bool {
    c.is_ascii_alphanumeric()
}

// Symbols such as `$`, `+`, `<`, `=`, `>`, `^`, backtick, `|` and `~` are
// not punctuation.
const fn is_ascii_punctuation(c: u8) -> bool {
    matches!(
        c,
        b'!' | b'"'
            | b'#'
            | b'%'
            | b'&'
            | b'\''
            | b'('
            | b')'
            | b'*'
            | b','
            | b'-'
            | b'.'
            | b'/'
            | b':'
            | b';'
            | b'?'
            | b'@'
            | b'['
            | b'\\'
            | b']'
            | b'_'
            | b'{'
            | b'}'
    )
}

const fn ascii_class(c: u8) -> CharClass {
    let mut bits = 0u8;
    let letter_or_digit = is_ascii_letter_or_digit(c);

    if letter_or_digit || c == b'_' {
        bits |= CharClass::NAME.bits();
    }
    if c != b'}' && (letter_or_digit || is_ascii_punctuation(c) || c == b' ') {
        bits |= CharClass::FORMAT.bits();
    }
    if c.is_ascii_digit() || c == b'-' {
        bits |= CharClass::ALIGNMENT.bits();
    }
    if c == b'@' || c == b'$' {
        bits |= CharClass::HINT.bits();
    }
    if bits != 0 || c == b':' {
        bits |= CharClass::TAG.bits();
    }

    CharClass::from_bits_retain(bits)
}

static ASCII_TABLE: [CharClass; 128] = {
    let mut table = [CharClass::empty(); 128];
    let mut i = 0;
    while i < 128 {
        table[i] = ascii_class(i as u8);
        i += 1;
    }
    table
};

fn unicode_class(c: char) -> CharClass {
    use GeneralCategory::*;

    let category = get_general_category(c);
    let letter_or_digit = matches!(
        category,
        UppercaseLetter
            | LowercaseLetter
            | TitlecaseLetter
            | ModifierLetter
            | OtherLetter
            | DecimalNumber
    );
    let punctuation = matches!(
        category,
        ConnectorPunctuation
            | DashPunctuation
            | OpenPunctuation
            | ClosePunctuation
            | InitialPunctuation
            | FinalPunctuation
            | OtherPunctuation
    );

    let mut class = CharClass::empty();
    if letter_or_digit {
        class |= CharClass::NAME;
    }
    if letter_or_digit || punctuation {
        class |= CharClass::FORMAT;
    }
    if !class.is_empty() {
        class |= CharClass::TAG;
    }
    class
}

#[inline]
pub fn classify(c: char) -> CharClass {
    if c.is_ascii() {
        ASCII_TABLE[c as usize]
    } else {
        unicode_class(c)
    }
}

#[inline]
pub fn is_valid_in_tag(c: char) -> bool {
    classify(c).contains(CharClass::TAG)
}

#[inline]
pub fn is_valid_in_name(c: char) -> bool {
    classify(c).contains(CharClass::NAME)
}

#[inline]
pub fn is_valid_in_format(c: char) -> bool {
    classify(c).contains(CharClass::FORMAT)
}

#[inline]
pub fn is_valid_in_alignment(c: char) -> bool {
    classify(c).contains(CharClass::ALIGNMENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_characters() {
        for c in ['a', 'Z', '0', '9', '_', 'é', 'Ж'] {
            assert!(is_valid_in_name(c), "{c:?} should be valid in a name");
        }
        for c in ['-', ' ', '@', '$', ':', ',', '.', '}'] {
            assert!(!is_valid_in_name(c), "{c:?} should not be valid in a name");
        }
    }

    #[test]
    fn format_characters() {
        for c in ['0', '.', ',', ':', ' ', '-', '#', '%', '{', '/', 'l'] {
            assert!(is_valid_in_format(c), "{c:?} should be valid in a format");
        }
        for c in ['}', '$', '+', '<', '=', '|', '~', '\t'] {
            assert!(!is_valid_in_format(c), "{c:?} should not be valid in a format");
        }
    }

    #[test]
    fn alignment_characters() {
        for c in "0123456789-".chars() {
            assert!(is_valid_in_alignment(c));
        }
        assert!(!is_valid_in_alignment('+'));
        assert!(!is_valid_in_alignment('a'));
    }

    #[test]
    fn tag_characters() {
        for c in ['@', '$', ':', ',', 'x', '_', ' ', '-'] {
            assert!(is_valid_in_tag(c), "{c:?} should be valid in a tag");
        }
        for c in ['}', '\n', '+', '=', '<'] {
            assert!(!is_valid_in_tag(c), "{c:?} should not be valid in a tag");
        }
    }

    #[test]
    fn non_ascii_punctuation_is_format() {
        assert!(is_valid_in_format('«'));
        assert!(is_valid_in_format('\u{2014}'));
        assert!(!is_valid_in_name('\u{2014}'));
        assert!(!is_valid_in_tag('€'));
    }

    #[test]
    fn punctuation_outside_common_blocks_is_format() {
        for c in ['\u{FF0C}', '\u{060C}', '\u{2E2E}', '\u{BF}', '\u{FF3F}'] {
            assert!(is_valid_in_format(c), "{c:?} should be valid in a format");
            assert!(is_valid_in_tag(c), "{c:?} should be valid in a tag");
            assert!(!is_valid_in_name(c), "{c:?} should not be valid in a name");
        }
    }

    #[test]
    fn only_decimal_digits_and_letters_are_names() {
        for c in ['\u{0663}', '\u{FF10}', 'ß', '\u{01C5}', '\u{02B0}', '字'] {
            assert!(is_valid_in_name(c), "{c:?} should be valid in a name");
        }
        // Other and letter numbers, combining marks and symbols.
        for c in ['\u{BD}', '\u{B2}', '\u{216B}', '\u{345}', '\u{301}', '\u{2603}'] {
            assert!(!is_valid_in_name(c), "{c:?} should not be valid in a name");
            assert!(!is_valid_in_tag(c), "{c:?} should not be valid in a tag");
        }
    }
}
