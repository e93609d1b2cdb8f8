//! Configuration options for EngineData encoding.
//!
//! EngineData shows up in two shapes inside host documents:
//!
//! - [`Layout::Document`]: the outer block. The root dict is bracketed with
//!   `<<`/`>>`, nested containers are indented with tabs, and the output
//!   starts with an extra blank line.
//! - [`Layout::Flat`]: the second, related data block. The root dict's
//!   entries are written on one line without the outer brackets.
//!
//! ## Examples
//!
//! ```rust
//! use engine_data::{encode_with_options, engine_data, EncodeOptions, Layout};
//!
//! let value = engine_data!({ "Version": 1 });
//!
//! let document = encode_with_options(&value, EncodeOptions::new());
//! assert_eq!(document, b"\n\n<<\n\t/Version 1\n>>");
//!
//! let flat = encode_with_options(&value, EncodeOptions::new().with_layout(Layout::Flat));
//! assert_eq!(flat, b" /Version 1");
//! ```

/// Overall shape of the encoded root dict.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Layout {
    #[default]
    Document,
    Flat,
}

/// Configuration options for EngineData encoding.
#[derive(Clone, Debug, Default)]
pub struct EncodeOptions {
    pub layout: Layout,
}

impl EncodeOptions {
    /// Creates default options ([`Layout::Document`]).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use engine_data::{EncodeOptions, Layout};
    ///
    /// let options = EncodeOptions::new();
    /// assert_eq!(options.layout, Layout::Document);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for the flat, bracket-less layout.
    #[must_use]
    pub fn flat() -> Self {
        EncodeOptions {
            layout: Layout::Flat,
        }
    }

    #[must_use]
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }
}
