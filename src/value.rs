//! In-memory representation of decoded EngineData.
//!
//! This module provides the [`Element`] enum, the node type of a decoded
//! tree, together with the two leaf newtypes that need their own identity:
//! [`Property`] (identifier used as dict key or bare value) and [`Tag`]
//! (opaque bracketed atom carried through unmodified).
//!
//! ## Core Types
//!
//! - [`Element`]: containers ([`Dict`], [`List`]) and leaves (string, boolean,
//!   integer, float, property, tag)
//! - [`Property`]: immutable, hashable identifier
//! - [`Tag`]: raw bytes of an unrecognized `(name)` literal
//!
//! ### Creating Values
//!
//! ```rust
//! use engine_data::{Element, Property};
//!
//! let text = Element::from("Hello");
//! let size = Element::from(12.0);
//! let kind = Element::from(Property::new("Normal"));
//!
//! assert!(text.is_string());
//! assert_eq!(size.as_f64(), Some(12.0));
//! assert_eq!(kind.as_property().map(Property::as_str), Some("Normal"));
//! ```
//!
//! ### Extracting Values
//!
//! ```rust
//! use engine_data::Element;
//! use std::convert::TryFrom;
//!
//! let value = Element::from(42);
//! let num: i64 = i64::try_from(value).unwrap();
//! assert_eq!(num, 42);
//! ```

use crate::{Dict, List};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;

/// An identifier leaf, written `/Name` in the markup.
///
/// Properties key every [`Dict`] entry and may also appear as plain values
/// (for example `/StreamTag /CoolTypeFont`). They compare, hash and borrow as
/// their identifier text, so a dict can be queried with a plain `&str`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Property(String);

impl Property {
    /// Creates a property from its identifier, without the leading `/`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Property(name.into())
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Borrow<str> for Property {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Property {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.0)
    }
}

impl From<&str> for Property {
    fn from(value: &str) -> Self {
        Property(value.to_string())
    }
}

impl From<String> for Property {
    fn from(value: String) -> Self {
        Property(value)
    }
}

impl From<&Property> for Property {
    fn from(value: &Property) -> Self {
        value.clone()
    }
}

/// An unrecognized bracketed literal such as `(hwid)`, kept byte-for-byte.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Tag(Vec<u8>);

impl Tag {
    /// Wraps the raw token bytes, parentheses included.
    #[must_use]
    pub fn new(raw: impl Into<Vec<u8>>) -> Self {
        Tag(raw.into())
    }

    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The tag name between the parentheses, if the raw bytes have them.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.0
            .strip_prefix(b"(")
            .and_then(|rest| rest.strip_suffix(b")"))
            .and_then(|name| std::str::from_utf8(name).ok())
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.escape_ascii())
    }
}

/// A node of a decoded EngineData tree.
///
/// # Examples
///
/// ```rust
/// use engine_data::{Dict, Element, List};
///
/// let mut values = List::new();
/// values.push(1.0);
/// values.push(0.0);
///
/// let mut color = Dict::new();
/// color.insert("Type", 1);
/// color.insert("Values", values);
///
/// let element = Element::from(color);
/// assert!(element.is_dict());
/// assert_eq!(element.get("Type").and_then(Element::as_i64), Some(1));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    Dict(Dict),
    List(List),
    String(String),
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Property(Property),
    Tag(Tag),
}

impl Default for Element {
    fn default() -> Self {
        Element::Dict(Dict::new())
    }
}

impl Element {
    /// Returns `true` for [`Element::Dict`] and [`Element::List`].
    #[inline]
    #[must_use]
    pub const fn is_container(&self) -> bool {
        matches!(self, Element::Dict(_) | Element::List(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_dict(&self) -> bool {
        matches!(self, Element::Dict(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Element::List(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Element::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Element::Boolean(_))
    }

    /// Returns `true` for integers and floats.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Element::Integer(_) | Element::Float(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_property(&self) -> bool {
        matches!(self, Element::Property(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_tag(&self) -> bool {
        matches!(self, Element::Tag(_))
    }

    /// Short lowercase name of the variant, used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Element::Dict(_) => "dict",
            Element::List(_) => "list",
            Element::String(_) => "string",
            Element::Boolean(_) => "boolean",
            Element::Integer(_) => "integer",
            Element::Float(_) => "float",
            Element::Property(_) => "property",
            Element::Tag(_) => "tag",
        }
    }

    #[inline]
    #[must_use]
    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Element::Dict(dict) => Some(dict),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_dict_mut(&mut self) -> Option<&mut Dict> {
        match self {
            Element::Dict(dict) => Some(dict),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&List> {
        match self {
            Element::List(list) => Some(list),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_list_mut(&mut self) -> Option<&mut List> {
        match self {
            Element::List(list) => Some(list),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Element::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Element::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is an integer, returns it. Floats are not converted.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Element::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// If the value is numeric, returns it as an `f64`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use engine_data::Element;
    ///
    /// assert_eq!(Element::Float(0.5).as_f64(), Some(0.5));
    /// assert_eq!(Element::Integer(2).as_f64(), Some(2.0));
    /// assert_eq!(Element::Boolean(true).as_f64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Element::Integer(i) => Some(*i as f64),
            Element::Float(f) => Some(*f),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_property(&self) -> Option<&Property> {
        match self {
            Element::Property(p) => Some(p),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_tag(&self) -> Option<&Tag> {
        match self {
            Element::Tag(t) => Some(t),
            _ => None,
        }
    }

    /// Looks up `key` if this element is a dict.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Element> {
        self.as_dict().and_then(|dict| dict.get(key))
    }

    /// Follows a path of dict keys from this element.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use engine_data::decode;
    ///
    /// let root = decode(b"<< /EngineDict << /Editor << /Text 1 >> >> >>").unwrap();
    /// let text = root.pointer(&["EngineDict", "Editor", "Text"]);
    /// assert_eq!(text.and_then(|e| e.as_i64()), Some(1));
    /// ```
    #[must_use]
    pub fn pointer(&self, path: &[&str]) -> Option<&Element> {
        path.iter().try_fold(self, |element, key| element.get(key))
    }
}

/// Drops a batch of elements without recursing into nested containers.
pub(crate) fn release(mut pending: Vec<Element>) {
    while let Some(mut element) = pending.pop() {
        match &mut element {
            Element::List(list) => pending.extend(list.take_items()),
            Element::Dict(dict) => pending.extend(dict.take_values()),
            _ => {}
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Dict(dict) => write!(f, "<<{} entries>>", dict.len()),
            Element::List(list) => write!(f, "[{} items]", list.len()),
            Element::String(s) => write!(f, "({})", s),
            Element::Boolean(b) => write!(f, "{}", b),
            Element::Integer(i) => write!(f, "{}", i),
            Element::Float(fl) => write!(f, "{}", fl),
            Element::Property(p) => write!(f, "{}", p),
            Element::Tag(t) => write!(f, "{}", t),
        }
    }
}

impl Serialize for Property {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl Serialize for Element {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Element::Dict(dict) => dict.serialize(serializer),
            Element::List(list) => list.serialize(serializer),
            Element::String(s) => serializer.serialize_str(s),
            Element::Boolean(b) => serializer.serialize_bool(*b),
            Element::Integer(i) => serializer.serialize_i64(*i),
            Element::Float(f) => serializer.serialize_f64(*f),
            Element::Property(p) => p.serialize(serializer),
            Element::Tag(t) => serializer.serialize_str(&t.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for Element {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ElementVisitor;

        impl<'de> Visitor<'de> for ElementVisitor {
            type Value = Element;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any EngineData value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(Element::Boolean(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Element::Integer(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                match i64::try_from(value) {
                    Ok(i) => Ok(Element::Integer(i)),
                    Err(_) => Ok(Element::Float(value as f64)),
                }
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Element::Float(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Element::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Element::String(value))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut list = List::new();
                while let Some(elem) = seq.next_element::<Element>()? {
                    list.push(elem);
                }
                Ok(Element::List(list))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut dict = Dict::new();
                while let Some((key, value)) = map.next_entry::<String, Element>()? {
                    dict.insert(key, value);
                }
                Ok(Element::Dict(dict))
            }
        }

        deserializer.deserialize_any(ElementVisitor)
    }
}

impl TryFrom<Element> for i64 {
    type Error = crate::Error;

    fn try_from(value: Element) -> crate::Result<Self> {
        match value {
            Element::Integer(i) => Ok(i),
            other => Err(crate::Error::custom(format!(
                "expected integer, found {}",
                other.kind()
            ))),
        }
    }
}

impl TryFrom<Element> for f64 {
    type Error = crate::Error;

    fn try_from(value: Element) -> crate::Result<Self> {
        match value {
            Element::Integer(i) => Ok(i as f64),
            Element::Float(f) => Ok(f),
            other => Err(crate::Error::custom(format!(
                "expected number, found {}",
                other.kind()
            ))),
        }
    }
}

impl TryFrom<Element> for bool {
    type Error = crate::Error;

    fn try_from(value: Element) -> crate::Result<Self> {
        match value {
            Element::Boolean(b) => Ok(b),
            other => Err(crate::Error::custom(format!(
                "expected boolean, found {}",
                other.kind()
            ))),
        }
    }
}

impl TryFrom<Element> for String {
    type Error = crate::Error;

    fn try_from(value: Element) -> crate::Result<Self> {
        match value {
            Element::String(s) => Ok(s),
            other => Err(crate::Error::custom(format!(
                "expected string, found {}",
                other.kind()
            ))),
        }
    }
}

impl From<bool> for Element {
    fn from(value: bool) -> Self {
        Element::Boolean(value)
    }
}

impl From<i8> for Element {
    fn from(value: i8) -> Self {
        Element::Integer(value as i64)
    }
}

impl From<i16> for Element {
    fn from(value: i16) -> Self {
        Element::Integer(value as i64)
    }
}

impl From<i32> for Element {
    fn from(value: i32) -> Self {
        Element::Integer(value as i64)
    }
}

impl From<i64> for Element {
    fn from(value: i64) -> Self {
        Element::Integer(value)
    }
}

impl From<u8> for Element {
    fn from(value: u8) -> Self {
        Element::Integer(value as i64)
    }
}

impl From<u16> for Element {
    fn from(value: u16) -> Self {
        Element::Integer(value as i64)
    }
}

impl From<u32> for Element {
    fn from(value: u32) -> Self {
        Element::Integer(value as i64)
    }
}

impl From<f32> for Element {
    fn from(value: f32) -> Self {
        Element::Float(value as f64)
    }
}

impl From<f64> for Element {
    fn from(value: f64) -> Self {
        Element::Float(value)
    }
}

impl From<String> for Element {
    fn from(value: String) -> Self {
        Element::String(value)
    }
}

impl From<&str> for Element {
    fn from(value: &str) -> Self {
        Element::String(value.to_string())
    }
}

impl From<Property> for Element {
    fn from(value: Property) -> Self {
        Element::Property(value)
    }
}

impl From<Tag> for Element {
    fn from(value: Tag) -> Self {
        Element::Tag(value)
    }
}

impl From<Dict> for Element {
    fn from(value: Dict) -> Self {
        Element::Dict(value)
    }
}

impl From<List> for Element {
    fn from(value: List) -> Self {
        Element::List(value)
    }
}

impl From<Vec<Element>> for Element {
    fn from(value: Vec<Element>) -> Self {
        Element::List(List::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::convert::TryFrom;

    #[test]
    fn test_tryfrom_i64() {
        assert_eq!(i64::try_from(Element::Integer(42)).unwrap(), 42);
        assert!(i64::try_from(Element::Float(42.0)).is_err());
        assert!(i64::try_from(Element::from("42")).is_err());
    }

    #[test]
    fn test_tryfrom_f64() {
        assert_eq!(f64::try_from(Element::Float(0.25)).unwrap(), 0.25);
        assert_eq!(f64::try_from(Element::Integer(3)).unwrap(), 3.0);
        assert!(f64::try_from(Element::Boolean(false)).is_err());
    }

    #[test]
    fn test_tryfrom_bool_and_string() {
        assert!(bool::try_from(Element::Boolean(true)).unwrap());
        assert!(bool::try_from(Element::Integer(1)).is_err());
        assert_eq!(String::try_from(Element::from("hi")).unwrap(), "hi");
        let err = String::try_from(Element::Property(Property::new("hi"))).unwrap_err();
        assert_eq!(err.to_string(), "Error: expected string, found property");
    }

    #[test]
    fn test_property_identity() {
        let a = Property::new("Name");
        let b = Property::from("Name");
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "/Name");

        let set: HashSet<Property> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
        assert!(set.contains("Name"));
    }

    #[test]
    fn test_tag_name() {
        let tag = Tag::new(b"(hwid)".to_vec());
        assert_eq!(tag.name(), Some("hwid"));
        assert_eq!(tag.as_bytes(), b"(hwid)");
        assert_eq!(Tag::new(b"hwid".to_vec()).name(), None);
    }

    #[test]
    fn test_kind_and_predicates() {
        assert_eq!(Element::default().kind(), "dict");
        assert!(Element::from(vec![Element::from(1)]).is_list());
        assert!(Element::from(1.5f32).is_number());
        assert!(Element::from(Tag::new(b"(x)".to_vec())).is_tag());
        assert!(!Element::from(true).is_container());
    }

    #[test]
    fn test_serde_json_roundtrip_of_plain_values() {
        let mut dict = Dict::new();
        dict.insert("Name", "Arial");
        dict.insert("Size", 12);
        dict.insert("Leading", 1.5);
        dict.insert("Flags", vec![Element::from(true), Element::from(false)]);

        let json = serde_json::to_string(&Element::from(dict.clone())).unwrap();
        assert_eq!(
            json,
            r#"{"Name":"Arial","Size":12,"Leading":1.5,"Flags":[true,false]}"#
        );

        let back: Element = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Element::Dict(dict));
    }
}
