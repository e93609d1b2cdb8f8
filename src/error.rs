//! Error types for EngineData decoding and encoding.
//!
//! Decoding is all-or-nothing: the first classification or structural
//! problem aborts the whole decode and is returned to the caller. Encoding a
//! well-formed tree never fails; only the `io` helpers can report errors on
//! the encode side.
//!
//! ## Error Categories
//!
//! - **Classification**: a raw token matches none of the lexical classes
//! - **Unknown token**: the same condition, reported by the tokenizer with
//!   the byte offset of the token
//! - **Malformed input**: a structural violation (property without a value,
//!   unterminated string literal, value token that cannot start an element)
//! - **I/O**: reader/writer failures in [`crate::from_reader`] and
//!   [`crate::to_writer`]
//!
//! ## Examples
//!
//! ```rust
//! use engine_data::{decode, Error};
//!
//! let result = decode(b"<< /Key >> >>");
//! assert!(result.is_err());
//!
//! if let Err(err) = result {
//!     assert!(err.is_malformed());
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while decoding or encoding EngineData.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A token matched none of the lexical classes
    #[error("token `{token}` matches no lexical class")]
    Classification { token: String },

    /// The tokenizer produced a token it could not classify
    #[error("unknown token at byte {offset}: `{token}`")]
    UnknownToken { offset: usize, token: String },

    /// Structural violation in the token stream
    #[error("malformed input at byte {offset}: {msg}")]
    MalformedInput { offset: usize, msg: String },

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a classification error for a raw token.
    ///
    /// Non-printable bytes are escaped so that UTF-16 fragments stay readable.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use engine_data::Error;
    ///
    /// let err = Error::classification(b"<<<");
    /// assert!(err.to_string().contains("<<<"));
    /// ```
    pub fn classification(token: &[u8]) -> Self {
        Error::Classification {
            token: token.escape_ascii().to_string(),
        }
    }

    /// Creates an unknown-token error at the given byte offset.
    pub fn unknown_token(offset: usize, token: &[u8]) -> Self {
        Error::UnknownToken {
            offset,
            token: token.escape_ascii().to_string(),
        }
    }

    /// Creates a malformed-input error at the given byte offset.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use engine_data::Error;
    ///
    /// let err = Error::malformed(12, "property without a value");
    /// assert!(err.to_string().contains("byte 12"));
    /// ```
    pub fn malformed(offset: usize, msg: &str) -> Self {
        Error::MalformedInput {
            offset,
            msg: msg.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reader/writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns `true` if this error means the input bytes could not be decoded.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Error::Classification { .. } | Error::UnknownToken { .. } | Error::MalformedInput { .. }
        )
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
