//! EngineData encoding.
//!
//! This module provides the [`Writer`], which renders an [`Element`] tree
//! back into EngineData bytes following the conventions of the encoder that
//! produces the blobs found in the wild:
//!
//! - **Indented context**: dicts open on their own line, entries are indented
//!   with one tab per nesting level and each entry ends with a newline.
//! - **Inline context**: a single space stands in for every indentation and
//!   no newlines are written, e.g. ` << /A 1 >>`.
//! - **Lists** stay on one line (`[ 1 2 3 ]`) unless their first item is a
//!   dict, in which case each dict is laid out as an indented block.
//! - **Floats** use 12 significant digits, always carry a decimal point and
//!   drop the leading zero of magnitudes below one (`.5`, `-.25`).
//! - **Strings** are UTF-16BE with a byte-order marker; parenthesis bytes are
//!   escaped with a backslash.
//!
//! ## Usage
//!
//! Most users should use the functions in the crate root:
//!
//! ```rust
//! use engine_data::{encode, engine_data};
//!
//! let value = engine_data!({
//!     "Font": { "Name": "Arial", "FillColor": { "Values": [1.0, 0.0, 0.0, 0.0] } }
//! });
//!
//! let bytes = encode(&value);
//! assert!(bytes.starts_with(b"\n\n<<\n\t/Font\n\t<<\n\t\t/Name (\xfe\xff"));
//! ```
//!
//! ## Direct Writer Usage
//!
//! ```rust
//! use engine_data::{Element, Writer};
//!
//! let mut writer = Writer::new();
//! writer.write_element(&Element::Float(0.5));
//! assert_eq!(writer.into_inner(), b".5");
//! ```

use crate::token::{CLOSE_PAREN, ESCAPE, OPEN_PAREN, UTF16_BE_BOM};
use crate::{Dict, EncodeOptions, Element, Layout, List, Property, Tag};

/// Significant digits used when rendering floats.
const FLOAT_PRECISION: usize = 12;

/// Pending work of the writer, innermost container last.
enum Task<'e> {
    Dict {
        entries: indexmap::map::Iter<'e, Property, Element>,
        indent: Option<usize>,
        container: bool,
    },
    List {
        items: std::slice::Iter<'e, Element>,
        indent: Option<usize>,
    },
    /// Line break owed after a dict entry whose value is still being written.
    Newline,
}

/// The EngineData writer.
///
/// Indentation is passed explicitly: `Some(n)` means an indented context at
/// nesting level `n`, `None` means an inline context. Containers are walked
/// with an explicit task stack, so arbitrarily deep trees can be written.
#[derive(Debug, Default)]
pub struct Writer {
    output: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Writer {
            output: Vec::with_capacity(256),
        }
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.output
    }

    /// Writes a root element with the given layout.
    ///
    /// Only dict roots are affected by the layout; any other root is written
    /// inline.
    pub fn write_root(&mut self, element: &Element, options: &EncodeOptions) {
        match (element, options.layout) {
            (Element::Dict(dict), Layout::Document) => self.write_dict(dict, Some(0), true),
            (Element::Dict(dict), Layout::Flat) => self.write_dict(dict, None, false),
            (other, _) => self.write_element(other),
        }
    }

    fn write_newline(&mut self, indent: Option<usize>) {
        if indent.is_some() {
            self.output.push(b'\n');
        }
    }

    fn write_indent(&mut self, indent: Option<usize>) {
        match indent {
            Some(level) => self.output.extend(std::iter::repeat(b'\t').take(level)),
            None => self.output.push(b' '),
        }
    }

    /// Writes a dict.
    ///
    /// With `container` unset only the entries are written, without the
    /// surrounding `<<`/`>>`. The top-level dict (`indent == Some(0)`) is
    /// preceded by an extra newline.
    pub fn write_dict(&mut self, dict: &Dict, indent: Option<usize>, container: bool) {
        let mut tasks = Vec::new();
        self.open_dict(dict, indent, container, &mut tasks);
        self.run(tasks);
    }

    /// Writes a list, inline (`[ 1 2 ]`) or as indented dict blocks.
    pub fn write_list(&mut self, list: &List, indent: Option<usize>) {
        let mut tasks = Vec::new();
        self.open_list(list, indent, &mut tasks);
        self.run(tasks);
    }

    /// Writes any element in inline form.
    pub fn write_element(&mut self, element: &Element) {
        let mut tasks = Vec::new();
        self.write_inline(element, &mut tasks);
        self.run(tasks);
    }

    fn open_dict<'e>(
        &mut self,
        dict: &'e Dict,
        indent: Option<usize>,
        container: bool,
        tasks: &mut Vec<Task<'e>>,
    ) {
        if container {
            if indent == Some(0) {
                self.write_newline(indent);
            }
            self.write_newline(indent);
            self.write_indent(indent);
            self.output.extend_from_slice(b"<<");
            self.write_newline(indent);
        }
        tasks.push(Task::Dict {
            entries: dict.iter(),
            indent,
            container,
        });
    }

    fn open_list<'e>(&mut self, list: &'e List, indent: Option<usize>, tasks: &mut Vec<Task<'e>>) {
        self.output.push(b'[');
        tasks.push(Task::List {
            items: list.iter(),
            indent,
        });
    }

    /// Writes a leaf, or opens a container in inline context.
    fn write_inline<'e>(&mut self, element: &'e Element, tasks: &mut Vec<Task<'e>>) {
        match element {
            Element::Dict(dict) => self.open_dict(dict, None, true, tasks),
            Element::List(list) => self.open_list(list, None, tasks),
            leaf => self.write_leaf(leaf),
        }
    }

    fn run(&mut self, mut tasks: Vec<Task<'_>>) {
        while let Some(task) = tasks.last_mut() {
            match task {
                Task::Newline => {
                    tasks.pop();
                    self.output.push(b'\n');
                }
                Task::Dict {
                    entries,
                    indent,
                    container,
                } => {
                    let (indent, container) = (*indent, *container);
                    match entries.next() {
                        Some((key, value)) => {
                            let inner = indent.map(|level| level + 1);
                            self.write_indent(inner);
                            self.write_property(key);
                            if indent.is_some() {
                                tasks.push(Task::Newline);
                            }
                            match value {
                                Element::Dict(nested) => {
                                    self.open_dict(nested, inner, true, &mut tasks)
                                }
                                Element::List(list) => {
                                    self.output.push(b' ');
                                    let list_indent = if list.starts_with_dict() { inner } else { None };
                                    self.open_list(list, list_indent, &mut tasks);
                                }
                                leaf => {
                                    self.output.push(b' ');
                                    self.write_leaf(leaf);
                                }
                            }
                        }
                        None => {
                            tasks.pop();
                            if container {
                                self.write_indent(indent);
                                self.output.extend_from_slice(b">>");
                            }
                        }
                    }
                }
                Task::List { items, indent } => {
                    let indent = *indent;
                    match items.next() {
                        Some(Element::Dict(dict)) if indent.is_some() => {
                            self.open_dict(dict, indent, true, &mut tasks)
                        }
                        Some(item) => {
                            if !item.is_dict() {
                                self.output.push(b' ');
                            }
                            self.write_inline(item, &mut tasks);
                        }
                        None => {
                            tasks.pop();
                            match indent {
                                None => self.output.push(b' '),
                                Some(_) => {
                                    self.write_newline(indent);
                                    self.write_indent(indent);
                                }
                            }
                            self.output.push(b']');
                        }
                    }
                }
            }
        }
    }

    fn write_leaf(&mut self, element: &Element) {
        match element {
            Element::Dict(_) | Element::List(_) => {}
            Element::String(s) => self.write_string(s),
            Element::Boolean(b) => {
                let text: &[u8] = if *b { b"true" } else { b"false" };
                self.output.extend_from_slice(text);
            }
            Element::Integer(i) => self.output.extend_from_slice(i.to_string().as_bytes()),
            Element::Float(f) => self.output.extend_from_slice(format_float(*f).as_bytes()),
            Element::Property(p) => self.write_property(p),
            Element::Tag(tag) => self.write_tag(tag),
        }
    }

    fn write_property(&mut self, property: &Property) {
        self.output.push(b'/');
        self.output.extend_from_slice(property.as_str().as_bytes());
    }

    fn write_tag(&mut self, tag: &Tag) {
        self.output.extend_from_slice(tag.as_bytes());
    }

    fn write_string(&mut self, s: &str) {
        self.output.push(OPEN_PAREN);
        self.output.extend_from_slice(&UTF16_BE_BOM);
        for unit in s.encode_utf16() {
            for byte in unit.to_be_bytes() {
                if byte == OPEN_PAREN || byte == CLOSE_PAREN {
                    self.output.push(ESCAPE);
                }
                self.output.push(byte);
            }
        }
        self.output.push(CLOSE_PAREN);
    }
}

/// Renders a float the way EngineData stores it.
///
/// Twelve significant digits in C `%g` style, a forced decimal point, and no
/// leading zero for magnitudes strictly between zero and one.
///
/// # Examples
///
/// ```rust
/// use engine_data::ser::format_float;
///
/// assert_eq!(format_float(0.5), ".5");
/// assert_eq!(format_float(-0.25), "-.25");
/// assert_eq!(format_float(2.0), "2.0");
/// assert_eq!(format_float(1.5), "1.5");
/// assert_eq!(format_float(0.1 + 0.2), ".3");
/// ```
#[must_use]
pub fn format_float(value: f64) -> String {
    let mut text = format_general(value, FLOAT_PRECISION);
    if !text.contains('.') {
        text.push_str(".0");
    }

    let magnitude = value.abs();
    if magnitude > 0.0 && magnitude < 1.0 {
        if let Some(rest) = text.strip_prefix("0.") {
            text = format!(".{}", rest);
        } else if let Some(rest) = text.strip_prefix("-0.") {
            text = format!("-.{}", rest);
        }
    }
    text
}

/// C `printf("%.*g")` formatting.
fn format_general(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // Exponent after rounding to `precision` significant digits.
    let scientific = format!("{:.*e}", precision - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= precision as i32 {
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            if exponent < 0 { '-' } else { '+' },
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (precision as i32 - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}
