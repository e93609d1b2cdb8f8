//! Mapping from lexical class to the element variant it constructs.
//!
//! The set of classes is fixed by the format, so the mapping is a plain
//! `match`. Container constructors only mark where the parser must recurse;
//! leaf constructors decode a single token into an [`Element`].

use crate::token::{Token, TokenClass, CLOSE_PAREN, ESCAPE, OPEN_PAREN, UTF16_BE_BOM};
use crate::{Element, Error, Property, Result, Tag};

/// The element variant responsible for a lexical class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Constructor {
    List,
    Dict,
    Boolean,
    Integer,
    Float,
    Property,
    String,
    Tag,
}

impl Constructor {
    /// Looks up the constructor registered for `class`.
    ///
    /// Terminators and `NoOp` have no entry: they are control tokens, never
    /// values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use engine_data::registry::Constructor;
    /// use engine_data::TokenClass;
    ///
    /// assert_eq!(Constructor::for_class(TokenClass::DictStart), Some(Constructor::Dict));
    /// assert_eq!(Constructor::for_class(TokenClass::DictEnd), None);
    /// ```
    #[must_use]
    pub const fn for_class(class: TokenClass) -> Option<Self> {
        match class {
            TokenClass::ArrayStart => Some(Constructor::List),
            TokenClass::DictStart => Some(Constructor::Dict),
            TokenClass::Boolean => Some(Constructor::Boolean),
            TokenClass::Number => Some(Constructor::Integer),
            TokenClass::NumberWithDecimal => Some(Constructor::Float),
            TokenClass::Property => Some(Constructor::Property),
            TokenClass::String => Some(Constructor::String),
            TokenClass::UnknownTag => Some(Constructor::Tag),
            TokenClass::ArrayEnd | TokenClass::DictEnd | TokenClass::NoOp => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self, Constructor::List | Constructor::Dict)
    }

    /// Decodes a leaf element from a single token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedInput`] if the token bytes do not form a
    /// valid value (integer overflow, invalid UTF-16), or if called on a
    /// container constructor.
    pub fn construct_leaf(self, token: &Token<'_>) -> Result<Element> {
        let bytes = token.bytes;
        match self {
            Constructor::Boolean => Ok(Element::Boolean(bytes == b"true")),
            Constructor::Integer => ascii(token)?
                .parse::<i64>()
                .map(Element::Integer)
                .map_err(|_| Error::malformed(token.offset, "integer out of range")),
            Constructor::Float => ascii(token)?
                .parse::<f64>()
                .map(Element::Float)
                .map_err(|_| Error::malformed(token.offset, "invalid float")),
            Constructor::Property => property(token).map(Element::Property),
            Constructor::String => decode_string(token).map(Element::String),
            Constructor::Tag => Ok(Element::Tag(Tag::new(bytes))),
            Constructor::List | Constructor::Dict => Err(Error::malformed(
                token.offset,
                "container cannot be built from a single token",
            )),
        }
    }
}

fn ascii<'a>(token: &Token<'a>) -> Result<&'a str> {
    std::str::from_utf8(token.bytes).map_err(|_| Error::malformed(token.offset, "non-ASCII token"))
}

/// Decodes a `/Name` token into its [`Property`].
///
/// # Errors
///
/// Returns [`Error::MalformedInput`] if the token is not valid ASCII.
pub fn property(token: &Token<'_>) -> Result<Property> {
    let name = ascii(token)?.trim_start_matches('/');
    Ok(Property::new(name))
}

/// Drops the escape byte in front of each parenthesis byte.
fn unescape(content: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(content.len());
    let mut bytes = content.iter().peekable();
    while let Some(&b) = bytes.next() {
        let escapes_paren = matches!(bytes.peek(), Some(&&OPEN_PAREN) | Some(&&CLOSE_PAREN));
        if b == ESCAPE && escapes_paren {
            continue;
        }
        out.push(b);
    }
    out
}

fn decode_string(token: &Token<'_>) -> Result<String> {
    let inner = token
        .bytes
        .strip_prefix(&[OPEN_PAREN])
        .and_then(|rest| rest.strip_suffix(&[CLOSE_PAREN]))
        .ok_or_else(|| Error::malformed(token.offset, "string literal without parentheses"))?;

    let raw = unescape(inner);
    let utf16 = raw
        .strip_prefix(&UTF16_BE_BOM)
        .ok_or_else(|| Error::malformed(token.offset, "string literal without byte-order mark"))?;

    if utf16.len() % 2 != 0 {
        return Err(Error::malformed(
            token.offset,
            "string literal has an odd number of UTF-16 bytes",
        ));
    }

    let units: Vec<u16> = utf16
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).map_err(|_| Error::malformed(token.offset, "invalid UTF-16 in string"))
}
