//! EngineData decoding.
//!
//! This module provides the [`Parser`], which pulls tokens from a single
//! [`Tokenizer`] and builds an [`Element`] tree in one forward pass. Open
//! containers live on an explicit stack rather than the call stack, so
//! nesting depth is limited only by the size of the input.
//!
//! ## Leniency
//!
//! The decoder accepts what real host documents contain rather than what a
//! strict grammar would allow:
//!
//! - a container that runs out of input before its terminator is returned as
//!   it stands;
//! - `>>` may carry trailing NUL bytes;
//! - tokens that are neither a key nor `>>` at dict level are skipped;
//! - a repeated key overwrites the earlier value.
//!
//! ## Usage
//!
//! ```rust
//! use engine_data::{Parser, Element};
//!
//! let mut parser = Parser::new(b"/Kerning 0 /Tracking -10");
//! let dict = parser.parse_dict().unwrap();
//! assert_eq!(dict.get("Tracking"), Some(&Element::Integer(-10)));
//! ```

use crate::registry::{self, Constructor};
use crate::token::{Token, TokenClass};
use crate::{Dict, Element, Error, List, Property, Result, Tokenizer};

/// A container that has been opened but not yet terminated.
enum Frame {
    /// Ends at `>>`. `pending` holds the key (and its value's offset) whose
    /// value is the container currently open above this one.
    Dict {
        dict: Dict,
        pending: Option<(Property, usize)>,
    },
    /// Ends at `]`.
    List(List),
}

impl Frame {
    fn dict() -> Self {
        Frame::Dict {
            dict: Dict::new(),
            pending: None,
        }
    }

    fn attach(&mut self, element: Element) {
        match self {
            Frame::Dict { dict, pending } => {
                if let Some((key, offset)) = pending.take() {
                    insert_entry(dict, key, element, offset);
                }
            }
            Frame::List(list) => list.push(element),
        }
    }

    fn into_element(self) -> Element {
        match self {
            Frame::Dict { dict, .. } => Element::Dict(dict),
            Frame::List(list) => Element::List(list),
        }
    }
}

/// What a value token turned into.
enum Start {
    Leaf(Element),
    Open(Frame),
}

/// What to do with the frame on top of the stack after one token.
enum Step {
    Continue,
    Open(Frame),
    Close,
}

fn start(token: &Token<'_>) -> Result<Start> {
    match Constructor::for_class(token.class) {
        Some(Constructor::Dict) => Ok(Start::Open(Frame::dict())),
        Some(Constructor::List) => Ok(Start::Open(Frame::List(List::new()))),
        Some(constructor) => constructor.construct_leaf(token).map(Start::Leaf),
        None => Err(Error::malformed(
            token.offset,
            &format!("`{}` cannot start a value", token.bytes.escape_ascii()),
        )),
    }
}

fn insert_entry(dict: &mut Dict, key: Property, value: Element, offset: usize) {
    if dict.insert(key, value).is_some() {
        tracing::debug!(offset, "duplicate key overwritten");
    }
}

/// EngineData decoder.
pub struct Parser<'a> {
    tokens: Tokenizer<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Parser {
            tokens: Tokenizer::new(input),
        }
    }

    fn next_token(&mut self) -> Result<Option<Token<'a>>> {
        let token = self.tokens.next().transpose()?;
        if let Some(token) = &token {
            tracing::trace!(offset = token.offset, class = ?token.class, "token");
        }
        Ok(token)
    }

    /// Decodes the input as a single value.
    ///
    /// The first token decides the shape of the root: `<<` and `[` open a
    /// container, a property starts a bracket-less dict, and anything else is
    /// a lone leaf. Empty input decodes to an empty dict. Tokens after the
    /// root value are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be tokenized or is structurally
    /// malformed.
    pub fn parse(mut self) -> Result<Element> {
        let root = match self.next_token()? {
            None => Element::Dict(Dict::new()),
            Some(token) if token.class == TokenClass::Property => {
                self.descend(Frame::dict(), Some(token))?
            }
            Some(token) => match start(&token)? {
                Start::Leaf(element) => element,
                Start::Open(frame) => self.descend(frame, None)?,
            },
        };

        if self.tokens.remaining() > 0 {
            tracing::debug!(
                offset = self.tokens.position(),
                remaining = self.tokens.remaining(),
                "ignoring input after root value"
            );
        }
        Ok(root)
    }

    /// Decodes dict entries up to the next `>>` or the end of input.
    ///
    /// The opening `<<` must already have been consumed; if it has not, it is
    /// skipped like any other token that cannot start an entry.
    ///
    /// # Errors
    ///
    /// Returns an error if a key has no value or a value is malformed.
    pub fn parse_dict(&mut self) -> Result<Dict> {
        match self.descend(Frame::dict(), None)? {
            Element::Dict(dict) => Ok(dict),
            other => Err(Error::custom(format!("expected dict, found {}", other.kind()))),
        }
    }

    /// Decodes list items up to the next `]` or the end of input.
    ///
    /// The opening `[` must already have been consumed.
    ///
    /// # Errors
    ///
    /// Returns an error if an item is malformed or is a `>>` terminator.
    pub fn parse_list(&mut self) -> Result<List> {
        match self.descend(Frame::List(List::new()), None)? {
            Element::List(list) => Ok(list),
            other => Err(Error::custom(format!("expected list, found {}", other.kind()))),
        }
    }

    /// Fills `root` and every container opened inside it until `root` is
    /// terminated or the input ends. `lookahead` is consumed before the
    /// tokenizer.
    fn descend(
        &mut self,
        mut root: Frame,
        mut lookahead: Option<Token<'a>>,
    ) -> Result<Element> {
        let mut open: Vec<Frame> = Vec::new();
        loop {
            let token = match lookahead.take() {
                Some(token) => Some(token),
                None => self.next_token()?,
            };
            let top = open.last_mut().unwrap_or(&mut root);
            match self.step(top, token)? {
                Step::Continue => {}
                Step::Open(frame) => {
                    open.push(frame);
                    tracing::trace!(depth = open.len(), "container opened");
                }
                Step::Close => match open.pop() {
                    Some(done) => open
                        .last_mut()
                        .unwrap_or(&mut root)
                        .attach(done.into_element()),
                    None => return Ok(root.into_element()),
                },
            }
        }
    }

    fn step(&mut self, top: &mut Frame, token: Option<Token<'a>>) -> Result<Step> {
        let Some(token) = token else {
            return Ok(Step::Close);
        };

        match top {
            Frame::Dict { dict, pending } => match token.class {
                TokenClass::DictEnd => Ok(Step::Close),
                TokenClass::Property => {
                    let key = registry::property(&token)?;
                    let value_token = self.next_token()?.ok_or_else(|| {
                        Error::malformed(
                            self.tokens.position(),
                            &format!("property {} has no value", key),
                        )
                    })?;
                    match start(&value_token)? {
                        Start::Leaf(value) => {
                            insert_entry(dict, key, value, value_token.offset);
                            Ok(Step::Continue)
                        }
                        Start::Open(frame) => {
                            *pending = Some((key, value_token.offset));
                            Ok(Step::Open(frame))
                        }
                    }
                }
                class => {
                    tracing::debug!(
                        offset = token.offset,
                        ?class,
                        "skipping token outside of a dict entry"
                    );
                    Ok(Step::Continue)
                }
            },
            Frame::List(list) => match token.class {
                TokenClass::ArrayEnd => Ok(Step::Close),
                _ => match start(&token)? {
                    Start::Leaf(value) => {
                        list.push(value);
                        Ok(Step::Continue)
                    }
                    Start::Open(frame) => Ok(Step::Open(frame)),
                },
            },
        }
    }
}
