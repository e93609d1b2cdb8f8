//! Lexical classes and the token classifier.
//!
//! Every raw token produced by the [`Tokenizer`](crate::Tokenizer) falls into
//! exactly one [`TokenClass`]. Classes are byte patterns over a single-byte
//! code page, except [`TokenClass::String`], which also requires the UTF-16
//! big-endian byte-order marker right after the opening parenthesis.
//!
//! | Class               | Pattern                              |
//! |---------------------|--------------------------------------|
//! | `ArrayStart`        | `[`                                  |
//! | `ArrayEnd`          | `]`                                  |
//! | `DictStart`         | `<<`                                 |
//! | `DictEnd`           | `>>` followed by any number of NULs  |
//! | `Boolean`           | `true` or `false`                    |
//! | `Number`            | `-?[0-9]+`                           |
//! | `NumberWithDecimal` | `-?[0-9]*\.[0-9]+`                   |
//! | `Property`          | `/[a-zA-Z0-9]+`                      |
//! | `String`            | `(` FE FF ... `)`, inner `)` escaped |
//! | `UnknownTag`        | `([a-zA-Z0-9]+)`                     |
//! | `NoOp`              | empty                                |

use crate::{Error, Result};

/// Opening delimiter of string and tag literals.
pub const OPEN_PAREN: u8 = b'(';
/// Closing delimiter of string and tag literals.
pub const CLOSE_PAREN: u8 = b')';
/// Escape byte placed before parenthesis bytes inside string literals.
pub const ESCAPE: u8 = b'\\';
/// UTF-16 big-endian byte-order marker.
pub const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];
/// Byte sequence that switches the tokenizer into string scanning mode.
pub const STRING_START: [u8; 3] = [OPEN_PAREN, 0xFE, 0xFF];

/// The lexical category of a raw token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenClass {
    ArrayStart,
    ArrayEnd,
    DictStart,
    DictEnd,
    Boolean,
    Number,
    NumberWithDecimal,
    Property,
    String,
    UnknownTag,
    NoOp,
}

impl TokenClass {
    /// Returns `true` for the two classes that open a container.
    #[inline]
    #[must_use]
    pub const fn is_container_start(self) -> bool {
        matches!(self, TokenClass::ArrayStart | TokenClass::DictStart)
    }
}

/// A classified slice of the input buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    pub bytes: &'a [u8],
    pub class: TokenClass,
    /// Byte offset of the token within the input buffer.
    pub offset: usize,
}

type Pattern = fn(&[u8]) -> bool;

/// Patterns in evaluation order. `String` must be checked before `UnknownTag`:
/// both start with `(`, and only the byte-order marker tells them apart.
const PATTERNS: [(Pattern, TokenClass); 11] = [
    (is_string, TokenClass::String),
    (is_unknown_tag, TokenClass::UnknownTag),
    (is_array_start, TokenClass::ArrayStart),
    (is_array_end, TokenClass::ArrayEnd),
    (is_dict_start, TokenClass::DictStart),
    (is_dict_end, TokenClass::DictEnd),
    (is_boolean, TokenClass::Boolean),
    (is_number, TokenClass::Number),
    (is_number_with_decimal, TokenClass::NumberWithDecimal),
    (is_property, TokenClass::Property),
    (<[u8]>::is_empty, TokenClass::NoOp),
];

/// Classifies a raw token.
///
/// # Errors
///
/// Returns [`Error::Classification`] if no pattern matches.
///
/// # Examples
///
/// ```rust
/// use engine_data::token::{classify, TokenClass};
///
/// assert_eq!(classify(b"<<").unwrap(), TokenClass::DictStart);
/// assert_eq!(classify(b">>\0\0").unwrap(), TokenClass::DictEnd);
/// assert_eq!(classify(b"-.5").unwrap(), TokenClass::NumberWithDecimal);
/// assert!(classify(b"<<<").is_err());
/// ```
pub fn classify(token: &[u8]) -> Result<TokenClass> {
    let mut matched = PATTERNS
        .iter()
        .filter(|(pattern, _)| pattern(token))
        .map(|(_, class)| *class);

    let class = matched.next().ok_or_else(|| Error::classification(token))?;
    debug_assert!(
        matched.next().is_none(),
        "token {:?} matches more than one lexical class",
        token.escape_ascii().to_string()
    );
    Ok(class)
}

fn is_array_start(token: &[u8]) -> bool {
    token == b"["
}

fn is_array_end(token: &[u8]) -> bool {
    token == b"]"
}

fn is_dict_start(token: &[u8]) -> bool {
    token == b"<<"
}

// Fixed-size padding in the host file leaves NULs glued to the last `>>`.
fn is_dict_end(token: &[u8]) -> bool {
    token
        .strip_prefix(b">>")
        .map_or(false, |rest| rest.iter().all(|&b| b == 0))
}

fn is_boolean(token: &[u8]) -> bool {
    token == b"true" || token == b"false"
}

fn strip_sign(token: &[u8]) -> &[u8] {
    token.strip_prefix(b"-").unwrap_or(token)
}

fn all_digits(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_digit)
}

fn is_number(token: &[u8]) -> bool {
    let digits = strip_sign(token);
    !digits.is_empty() && all_digits(digits)
}

fn is_number_with_decimal(token: &[u8]) -> bool {
    let body = strip_sign(token);
    match body.iter().position(|&b| b == b'.') {
        Some(dot) => {
            let (int_part, frac_part) = (&body[..dot], &body[dot + 1..]);
            all_digits(int_part) && !frac_part.is_empty() && all_digits(frac_part)
        }
        None => false,
    }
}

fn is_identifier(bytes: &[u8]) -> bool {
    !bytes.is_empty() && bytes.iter().all(u8::is_ascii_alphanumeric)
}

fn is_property(token: &[u8]) -> bool {
    token.strip_prefix(b"/").map_or(false, is_identifier)
}

fn parenthesized(token: &[u8]) -> Option<&[u8]> {
    token
        .strip_prefix(&[OPEN_PAREN])
        .and_then(|rest| rest.strip_suffix(&[CLOSE_PAREN]))
}

fn is_string(token: &[u8]) -> bool {
    let Some(inner) = parenthesized(token) else {
        return false;
    };
    let Some(content) = inner.strip_prefix(&UTF16_BE_BOM) else {
        return false;
    };
    // Every `)` inside the literal must be escaped.
    content
        .iter()
        .enumerate()
        .all(|(i, &b)| b != CLOSE_PAREN || (i > 0 && content[i - 1] == ESCAPE))
}

fn is_unknown_tag(token: &[u8]) -> bool {
    parenthesized(token).map_or(false, is_identifier)
}
