//! Ordered sequence type for EngineData `[ ... ]` containers.

use crate::Element;
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use std::ops::{Index, IndexMut};

/// An ordered, possibly heterogeneous sequence of [`Element`] values.
///
/// # Examples
///
/// ```rust
/// use engine_data::{Element, List};
///
/// let mut values = List::new();
/// values.push(1.0);
/// values.push(0.5);
///
/// assert_eq!(values.len(), 2);
/// assert_eq!(values[1], Element::Float(0.5));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct List(Vec<Element>);

impl List {
    #[must_use]
    pub fn new() -> Self {
        List(Vec::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        List(Vec::with_capacity(capacity))
    }

    pub fn push(&mut self, value: impl Into<Element>) {
        self.0.push(value.into());
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Element> {
        self.0.get(index)
    }

    #[must_use]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Element> {
        self.0.get_mut(index)
    }

    #[must_use]
    pub fn first(&self) -> Option<&Element> {
        self.0.first()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Element> {
        self.0.iter_mut()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Element] {
        &self.0
    }

    /// Returns `true` if the first item is a dict.
    ///
    /// The writer lays such lists out one dict per indented block instead of
    /// on a single line.
    #[must_use]
    pub fn starts_with_dict(&self) -> bool {
        self.first().map_or(false, Element::is_dict)
    }

    pub(crate) fn take_items(&mut self) -> Vec<Element> {
        std::mem::take(&mut self.0)
    }
}

// Nested containers are released through a worklist, not recursively.
impl Drop for List {
    fn drop(&mut self) {
        if self.0.iter().any(Element::is_container) {
            crate::value::release(self.take_items());
        }
    }
}

impl Index<usize> for List {
    type Output = Element;

    fn index(&self, index: usize) -> &Element {
        &self.0[index]
    }
}

impl IndexMut<usize> for List {
    fn index_mut(&mut self, index: usize) -> &mut Element {
        &mut self.0[index]
    }
}

impl From<Vec<Element>> for List {
    fn from(items: Vec<Element>) -> Self {
        List(items)
    }
}

impl From<List> for Vec<Element> {
    fn from(mut list: List) -> Self {
        std::mem::take(&mut list.0)
    }
}

impl IntoIterator for List {
    type Item = Element;
    type IntoIter = std::vec::IntoIter<Element>;

    fn into_iter(mut self) -> Self::IntoIter {
        std::mem::take(&mut self.0).into_iter()
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Element;
    type IntoIter = std::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<V: Into<Element>> FromIterator<V> for List {
    fn from_iter<T: IntoIterator<Item = V>>(iter: T) -> Self {
        List(iter.into_iter().map(Into::into).collect())
    }
}

impl<V: Into<Element>> Extend<V> for List {
    fn extend<T: IntoIterator<Item = V>>(&mut self, iter: T) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}

impl Serialize for List {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in self {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}
