// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Joe Pearson
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt::{Display, Formatter};

#[cfg(feature = "serde")]
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Literal shown for attributes missing in the source data.
pub const NOT_AVAILABLE: &str = "N/A";

/// A displayable attribute value.
#[derive(Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    Text(String),
    List(Vec<String>),
}

impl Value {
    /// Returns the text of a [`Value::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::List(_) => None,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

/// Labeled values in insertion order, ready to be shown as a table.
///
/// # Examples
///
/// ```
/// use s100::{AttributeTable, Value};
///
/// let mut table = AttributeTable::new();
/// table.insert("Name", "Buoy 1");
/// table.insert("Colour", vec!["Red".to_string(), "White".to_string()]);
///
/// assert_eq!(table.text("Name"), Some("Buoy 1"));
/// assert_eq!(table.get("Colour").unwrap().to_string(), "Red, White");
/// assert_eq!(table.labels().collect::<Vec<_>>(), ["Name", "Colour"]);
/// ```
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct AttributeTable {
    rows: Vec<(String, Value)>,
}

impl AttributeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a row at the end or replaces the value of an existing label in
    /// place.
    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<Value>) {
        let label = label.into();
        let value = value.into();

        match self.rows.iter_mut().find(|(l, _)| *l == label) {
            Some((_, v)) => *v = value,
            None => self.rows.push((label, value)),
        }
    }

    pub fn get(&self, label: &str) -> Option<&Value> {
        self.rows
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, value)| value)
    }

    /// Returns the value of `label` if it is a text.
    pub fn text(&self, label: &str) -> Option<&str> {
        self.get(label).and_then(Value::as_text)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.get(label).is_some()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|(l, _)| l.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.rows.iter().map(|(l, v)| (l.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(feature = "serde")]
impl Serialize for AttributeTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.rows.len()))?;
        for (label, value) in &self.rows {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_keeps_order_and_replaces_in_place() {
        let mut table = AttributeTable::new();
        table.insert("a", "1");
        table.insert("b", "2");
        table.insert("a", "3");

        let rows: Vec<_> = table.iter().map(|(l, v)| (l, v.to_string())).collect();
        assert_eq!(rows, vec![("a", "3".to_string()), ("b", "2".to_string())]);
    }

    #[test]
    fn lists_are_not_text() {
        let mut table = AttributeTable::new();
        table.insert("list", vec!["x".to_string()]);

        assert!(table.contains("list"));
        assert_eq!(table.text("list"), None);
        assert_eq!(table.text("missing"), None);
    }
}
