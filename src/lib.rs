//! # engine_data
//!
//! A codec for EngineData, the nested text markup that layered image
//! documents embed as a binary blob to describe type layers (text runs,
//! fonts, paragraph and character styles).
//!
//! ## What is EngineData?
//!
//! EngineData is a PostScript-like tree of dictionaries, arrays and typed
//! scalars:
//!
//! ```text
//! <<
//!     /EngineDict
//!     <<
//!         /Editor
//!         <<
//!             /Text (þÿMake a change and save.)
//!         >>
//!     >>
//!     /Font
//!     <<
//!         /Name (þÿHelveticaNeue-Light)
//!         /FillColor
//!         <<
//!             /Type 1
//!             /Values [ 1.0 0.0 0.0 0.0 ]
//!         >>
//!         /StyleSheetSet [
//!         <<
//!             /Name (þÿNormal RGB)
//!         >>
//!         ]
//!     >>
//! >>
//! ```
//!
//! - `<< ... >>` is a dict of `/Name value` entries, in significant order
//! - `[ ... ]` is a list
//! - `(þÿ...)` is a UTF-16BE string with a byte-order marker
//! - `true`/`false`, integers, decimals such as `.5`, bare `/Name`
//!   properties, and opaque tags like `(hwid)`
//!
//! ## Quick Start
//!
//! ```rust
//! use engine_data::{decode, encode, Element};
//!
//! let input = b"<< /Font << /Name (\xfe\xff\x00A) /Size 12.0 >> >>";
//! let mut root = decode(input).unwrap();
//!
//! assert_eq!(
//!     root.pointer(&["Font", "Name"]).and_then(Element::as_str),
//!     Some("A")
//! );
//!
//! // Edit the tree and write it back
//! let font = root.as_dict_mut().and_then(|d| d.get_mut("Font")).unwrap();
//! font.as_dict_mut().unwrap().insert("Size", 14.5);
//!
//! let bytes = encode(&root);
//! assert_eq!(decode(&bytes).unwrap(), root);
//! ```
//!
//! ## Components
//!
//! - [`token`]: lexical classes and the classifier
//! - [`Tokenizer`]: splits bytes into classified tokens
//! - [`registry`]: maps lexical classes to element constructors
//! - [`Parser`]: descent decoder with an explicit container stack
//! - [`Writer`]: encoder reproducing the host encoder's layout
//! - [`Element`], [`Dict`], [`List`]: the decoded tree
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - Decoding never panics on malformed input; errors carry byte offsets
//! - Encoding a tree is infallible

pub mod de;
pub mod error;
pub mod list;
pub mod macros;
pub mod map;
pub mod options;
pub mod registry;
pub mod ser;
pub mod token;
pub mod tokenizer;
pub mod value;

pub use de::Parser;
pub use error::{Error, Result};
pub use list::List;
pub use map::Dict;
pub use options::{EncodeOptions, Layout};
pub use ser::Writer;
pub use token::{Token, TokenClass};
pub use tokenizer::Tokenizer;
pub use value::{Element, Property, Tag};

use std::io;

/// Decode EngineData bytes into an element tree.
///
/// # Examples
///
/// ```rust
/// use engine_data::{decode, Element};
///
/// let root = decode(b"<< /Kerning 0 /Leading .5 >>").unwrap();
/// assert_eq!(root.get("Leading"), Some(&Element::Float(0.5)));
/// ```
///
/// # Errors
///
/// Returns an error if a token matches no lexical class or the token stream
/// is structurally malformed. [`Error::is_malformed`] is `true` for all of
/// these.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn decode(input: &[u8]) -> Result<Element> {
    tracing::debug!(len = input.len(), "decoding engine data");
    let root = Parser::new(input).parse()?;
    tracing::debug!(kind = root.kind(), "decoded engine data");
    Ok(root)
}

/// Decode EngineData bytes as a dict.
///
/// Works for both the bracketed outer block and the flat block: at dict
/// level, anything that does not start an entry (including the root `<<`)
/// is skipped.
///
/// # Examples
///
/// ```rust
/// use engine_data::decode_dict;
///
/// let bracketed = decode_dict(b"\n\n<<\n\t/A 1\n>>").unwrap();
/// let flat = decode_dict(b" /A 1").unwrap();
/// assert_eq!(bracketed, flat);
/// ```
///
/// # Errors
///
/// Returns an error if the input cannot be tokenized or is malformed.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn decode_dict(input: &[u8]) -> Result<Dict> {
    tracing::debug!(len = input.len(), "decoding engine data dict");
    Parser::new(input).parse_dict()
}

/// Decode EngineData from an I/O stream.
///
/// # Examples
///
/// ```rust
/// use engine_data::from_reader;
/// use std::io::Cursor;
///
/// let root = from_reader(Cursor::new(b"<< /A true >>")).unwrap();
/// assert_eq!(root.get("A").and_then(|v| v.as_bool()), Some(true));
/// ```
///
/// # Errors
///
/// Returns an error if reading fails or the bytes cannot be decoded.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(mut reader: R) -> Result<Element>
where
    R: io::Read,
{
    let mut buffer = Vec::new();
    reader
        .read_to_end(&mut buffer)
        .map_err(|e| Error::io(&e.to_string()))?;
    decode(&buffer)
}

/// Encode an element tree as an outer EngineData document.
///
/// # Examples
///
/// ```rust
/// use engine_data::{encode, engine_data};
///
/// let bytes = encode(&engine_data!({ "Opacity": 0.5 }));
/// assert_eq!(bytes, b"\n\n<<\n\t/Opacity .5\n>>");
/// ```
#[must_use]
pub fn encode(element: &Element) -> Vec<u8> {
    encode_with_options(element, EncodeOptions::default())
}

/// Encode an element tree with custom options.
#[must_use]
pub fn encode_with_options(element: &Element, options: EncodeOptions) -> Vec<u8> {
    let mut writer = Writer::new();
    writer.write_root(element, &options);
    let output = writer.into_inner();
    tracing::debug!(
        kind = element.kind(),
        layout = ?options.layout,
        len = output.len(),
        "encoded engine data"
    );
    output
}

/// Encode a dict as a flat block: entries only, on a single line.
///
/// # Examples
///
/// ```rust
/// use engine_data::{encode_flat, Dict};
///
/// let mut dict = Dict::new();
/// dict.insert("A", 1);
/// dict.insert("B", false);
/// assert_eq!(encode_flat(&dict), b" /A 1 /B false");
/// ```
#[must_use]
pub fn encode_flat(dict: &Dict) -> Vec<u8> {
    let mut writer = Writer::new();
    writer.write_dict(dict, None, false);
    writer.into_inner()
}

/// Encode an element tree into a writer.
///
/// # Errors
///
/// Returns an error if writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W>(writer: W, element: &Element) -> Result<()>
where
    W: io::Write,
{
    to_writer_with_options(writer, element, EncodeOptions::default())
}

/// Encode an element tree into a writer with custom options.
///
/// # Errors
///
/// Returns an error if writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W>(
    mut writer: W,
    element: &Element,
    options: EncodeOptions,
) -> Result<()>
where
    W: io::Write,
{
    let bytes = encode_with_options(element, options);
    writer
        .write_all(&bytes)
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}
