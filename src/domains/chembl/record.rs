//! Loosely-typed ChEMBL records.
//!
//! ChEMBL answers with JSON objects whose fields come and go depending on the
//! entity and on what curators filled in. Instead of modelling every entity,
//! records stay as string-keyed maps and callers read fields through
//! [`Field`], which renders any absent or `null` value as [`NOT_AVAILABLE`].

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Sentinel printed in place of a missing field.
pub const NOT_AVAILABLE: &str = "N/A";

/// One record returned by the ChEMBL API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Wrap an already decoded JSON object.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Build a record from an arbitrary JSON value; only objects qualify.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    /// Borrow the record as a [`Fields`] view.
    pub fn view(&self) -> Fields<'_> {
        Fields(Some(&self.0))
    }

    /// Look up a top-level field.
    pub fn field(&self, key: &str) -> Field<'_> {
        self.view().field(key)
    }

    /// Look up a nested object, e.g. `molecule_properties`.
    pub fn nested(&self, key: &str) -> Fields<'_> {
        self.view().nested(key)
    }

    /// Look up a list of nested objects, e.g. `target_components`.
    pub fn list(&self, key: &str) -> Vec<Fields<'_>> {
        self.view().list(key)
    }

    /// Whether the record has no fields at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Borrowed view over a (possibly absent) JSON object.
///
/// An absent view behaves like an empty object, so lookups through a missing
/// `molecule_properties` still yield [`NOT_AVAILABLE`] rather than failing.
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a>(Option<&'a Map<String, Value>>);

impl<'a> Fields<'a> {
    pub fn field(self, key: &str) -> Field<'a> {
        Field(self.0.and_then(|fields| fields.get(key)).filter(|v| !v.is_null()))
    }

    pub fn nested(self, key: &str) -> Fields<'a> {
        Fields(self.field(key).0.and_then(Value::as_object))
    }

    pub fn list(self, key: &str) -> Vec<Fields<'a>> {
        self.field(key)
            .0
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_object)
                    .map(|item| Fields(Some(item)))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// A single optional field value.
///
/// `Display` writes strings without quotes, other scalars as JSON, and
/// [`NOT_AVAILABLE`] when the field is absent or `null`.
#[derive(Debug, Clone, Copy)]
pub struct Field<'a>(Option<&'a Value>);

impl<'a> Field<'a> {
    /// The field as text, or `None` when absent.
    pub fn text(self) -> Option<String> {
        self.0.map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    /// The field as text, treating an empty string like an absent field.
    pub fn non_empty(self) -> Option<String> {
        self.text().filter(|s| !s.trim().is_empty())
    }

    /// The field as text, or `fallback` when absent.
    pub fn or(self, fallback: &str) -> String {
        self.text().unwrap_or_else(|| fallback.to_string())
    }
}

impl fmt::Display for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(Value::String(s)) => f.write_str(s),
            Some(other) => write!(f, "{}", other),
            None => f.write_str(NOT_AVAILABLE),
        }
    }
}
