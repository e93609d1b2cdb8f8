//! Ordered dictionary type for EngineData `<< ... >>` containers.
//!
//! This module provides [`Dict`], a wrapper around [`IndexMap`] keyed by
//! [`Property`]. Entry order is part of the format: re-encoding a decoded
//! dict must emit its keys in the order they were read.
//!
//! Keys can be given as plain identifier strings everywhere; they are wrapped
//! into a [`Property`] on insert and borrowed as `&str` on lookup.
//!
//! ## Examples
//!
//! ```rust
//! use engine_data::{Dict, Element};
//!
//! let mut dict = Dict::new();
//! dict.insert("Name", "Minion Pro");
//! dict.insert("FontSize", 12.0);
//!
//! assert_eq!(dict.len(), 2);
//! assert_eq!(dict.get("Name").and_then(Element::as_str), Some("Minion Pro"));
//! assert!(dict.contains_key("FontSize"));
//! ```

use crate::{Element, Property};
use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::ops::{Index, IndexMut};

/// An ordered map of [`Property`] keys to [`Element`] values.
///
/// # Examples
///
/// ```rust
/// use engine_data::Dict;
///
/// let mut dict = Dict::new();
/// dict.insert("First", 1);
/// dict.insert("Second", 2);
///
/// // Iteration maintains insertion order
/// let keys: Vec<_> = dict.keys().map(|k| k.as_str()).collect();
/// assert_eq!(keys, vec!["First", "Second"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Dict(IndexMap<Property, Element>);

// `IndexMap` equality ignores order; two dicts are only equal when their
// entries match position by position.
impl PartialEq for Dict {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl Dict {
    #[must_use]
    pub fn new() -> Self {
        Dict(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Dict(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the dict.
    ///
    /// An existing key keeps its position and has its value replaced; the old
    /// value is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use engine_data::Dict;
    ///
    /// let mut dict = Dict::new();
    /// assert!(dict.insert("Key", 42).is_none());
    /// assert!(dict.insert("Key", 43).is_some());
    /// assert_eq!(dict.len(), 1);
    /// ```
    pub fn insert(
        &mut self,
        key: impl Into<Property>,
        value: impl Into<Element>,
    ) -> Option<Element> {
        self.0.insert(key.into(), value.into())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Element> {
        self.0.get(key)
    }

    #[must_use]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Element> {
        self.0.get_mut(key)
    }

    /// Removes a key, keeping the relative order of the remaining entries.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use engine_data::Dict;
    ///
    /// let mut dict = Dict::new();
    /// dict.insert("A", 1);
    /// dict.insert("B", 2);
    /// dict.insert("C", 3);
    /// assert!(dict.remove("B").is_some());
    ///
    /// let keys: Vec<_> = dict.keys().map(|k| k.as_str()).collect();
    /// assert_eq!(keys, vec!["A", "C"]);
    /// ```
    pub fn remove(&mut self, key: &str) -> Option<Element> {
        self.0.shift_remove(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the dict, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, Property, Element> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the dict, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, Property, Element> {
        self.0.values()
    }

    /// Returns an iterator over the entries of the dict, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, Property, Element> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> indexmap::map::IterMut<'_, Property, Element> {
        self.0.iter_mut()
    }

    pub(crate) fn take_values(&mut self) -> Vec<Element> {
        self.0.drain(..).map(|(_, value)| value).collect()
    }
}

// Nested containers are released through a worklist, not recursively.
impl Drop for Dict {
    fn drop(&mut self) {
        if self.0.values().any(Element::is_container) {
            crate::value::release(self.take_values());
        }
    }
}

impl Index<&str> for Dict {
    type Output = Element;

    /// # Panics
    ///
    /// Panics if the key is not present.
    fn index(&self, key: &str) -> &Element {
        match self.0.get(key) {
            Some(value) => value,
            None => panic!("key `/{}` not found in dict", key),
        }
    }
}

impl IndexMut<&str> for Dict {
    fn index_mut(&mut self, key: &str) -> &mut Element {
        match self.0.get_mut(key) {
            Some(value) => value,
            None => panic!("key `/{}` not found in dict", key),
        }
    }
}

impl IntoIterator for Dict {
    type Item = (Property, Element);
    type IntoIter = indexmap::map::IntoIter<Property, Element>;

    fn into_iter(mut self) -> Self::IntoIter {
        std::mem::take(&mut self.0).into_iter()
    }
}

impl<'a> IntoIterator for &'a Dict {
    type Item = (&'a Property, &'a Element);
    type IntoIter = indexmap::map::Iter<'a, Property, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Into<Property>, V: Into<Element>> FromIterator<(K, V)> for Dict {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Dict(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<Property>, V: Into<Element>> Extend<(K, V)> for Dict {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        self.0
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

impl Serialize for Dict {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
