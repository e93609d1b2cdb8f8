//! Splitting raw EngineData bytes into classified tokens.
//!
//! The tokenizer has two scanning modes:
//!
//! - **Whitespace mode**: tokens are separated by runs of space, newline or
//!   tab bytes.
//! - **String mode**: entered when the remaining input starts with `(` and
//!   the UTF-16 big-endian byte-order marker. UTF-16 code units routinely
//!   contain the separator bytes, so the token instead runs up to the first
//!   `)` that is not preceded by the escape byte.
//!
//! A content byte equal to the escape byte is written unescaped, so a string
//! whose last code unit has `\` as its low byte (`ぜ` is `30 5C`) ends in
//! `\)` on the wire. When the escaped reading leaves the string misaligned
//! (a bare `)` after an odd number of content bytes, a bare `(`, or end of
//! input), the scanner falls back to the first `\)` that closed the string on
//! a code-unit boundary and was followed by a separator or end of input.
//!
//! ```rust
//! use engine_data::{Tokenizer, TokenClass};
//!
//! let classes: Vec<TokenClass> = Tokenizer::new(b"<< /Size 12 >>")
//!     .map(|token| token.map(|t| t.class))
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//!
//! assert_eq!(
//!     classes,
//!     [TokenClass::DictStart, TokenClass::Property, TokenClass::Number, TokenClass::DictEnd]
//! );
//! ```

use crate::token::{classify, Token, TokenClass, CLOSE_PAREN, ESCAPE, OPEN_PAREN, STRING_START};
use crate::{Error, Result};

/// Forward-only scanner over an EngineData buffer.
///
/// Yields `Result<Token>`; after the first error the iterator is exhausted.
/// To scan again from the start, construct a new `Tokenizer`.
#[derive(Clone, Debug)]
pub struct Tokenizer<'a> {
    input: &'a [u8],
    position: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Tokenizer { input, position: 0 }
    }

    /// Byte offset of the next unconsumed byte.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of bytes not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.input.len() - self.position
    }

    #[inline]
    fn is_separator(byte: u8) -> bool {
        matches!(byte, b' ' | b'\n' | b'\t')
    }

    /// Index of the closing `)` of a string literal starting at `literal[0]`.
    fn find_string_end(literal: &[u8]) -> Option<usize> {
        let mut content_len = 0;
        let mut fallback = None;
        let mut i = STRING_START.len();

        while i < literal.len() {
            let byte = literal[i];
            if byte == ESCAPE && matches!(literal.get(i + 1), Some(&OPEN_PAREN | &CLOSE_PAREN)) {
                if fallback.is_none()
                    && content_len % 2 == 1
                    && literal[i + 1] == CLOSE_PAREN
                    && literal.get(i + 2).map_or(true, |&b| Self::is_separator(b))
                {
                    fallback = Some(i + 1);
                }
                content_len += 1;
                i += 2;
                continue;
            }

            match byte {
                CLOSE_PAREN if content_len % 2 == 0 => return Some(i),
                CLOSE_PAREN => return fallback.or(Some(i)),
                OPEN_PAREN if fallback.is_some() => return fallback,
                _ => {}
            }
            content_len += 1;
            i += 1;
        }
        fallback
    }

    fn scan_string(&mut self) -> Result<&'a [u8]> {
        let input = self.input;
        let rest = &input[self.position..];
        let end = Self::find_string_end(rest)
            .ok_or_else(|| Error::malformed(self.position, "unterminated string literal"))?;

        self.position += end + 1;
        Ok(&rest[..=end])
    }

    fn scan_word(&mut self) -> &'a [u8] {
        let input = self.input;
        let rest = &input[self.position..];
        match rest.iter().position(|&b| Self::is_separator(b)) {
            Some(start) => {
                let run = rest[start..]
                    .iter()
                    .take_while(|&&b| Self::is_separator(b))
                    .count();
                self.position += start + run;
                &rest[..start]
            }
            None => {
                self.position = self.input.len();
                rest
            }
        }
    }

    fn next_token(&mut self) -> Option<Result<Token<'a>>> {
        loop {
            if self.remaining() == 0 {
                return None;
            }

            let offset = self.position;
            let bytes = if self.input[offset..].starts_with(&STRING_START) {
                match self.scan_string() {
                    Ok(bytes) => bytes,
                    Err(err) => return Some(Err(err)),
                }
            } else {
                self.scan_word()
            };

            let class = match classify(bytes) {
                Ok(class) => class,
                Err(_) => return Some(Err(Error::unknown_token(offset, bytes))),
            };
            if class == TokenClass::NoOp {
                continue;
            }

            return Some(Ok(Token {
                bytes,
                class,
                offset,
            }));
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.next_token();
        if matches!(item, Some(Err(_))) {
            self.position = self.input.len();
        }
        item
    }
}
