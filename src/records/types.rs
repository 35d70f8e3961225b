//! Record Data Types
//!
//! A catalog record is an attribute mapping whose keys are restricted to the
//! vocabulary of its object kind. Values are kept exactly as the service sent
//! them (strings, numbers or lists); nothing is coerced on the way in.

use crate::error::{CatalogError, Result};
use crate::query::types::ObjectKind;
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    #[serde(skip)]
    kind: ObjectKind,
    #[serde(flatten)]
    attributes: Map<String, Value>,
}

impl Record {
    pub fn new(kind: ObjectKind) -> Self {
        Self {
            kind,
            attributes: Map::new(),
        }
    }

    /// Validates a JSON object received from (or destined for) the service.
    ///
    /// Every key must belong to the vocabulary of `kind`.
    pub fn from_value(kind: ObjectKind, value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Self::from_map(kind, map),
            _ => Err(CatalogError::NotAnObject),
        }
    }

    pub fn from_map(kind: ObjectKind, attributes: Map<String, Value>) -> Result<Self> {
        if let Some(unknown) = attributes.keys().find(|key| !kind.has_attribute(key)) {
            return Err(CatalogError::UnknownAttribute {
                kind,
                attribute: unknown.clone(),
            });
        }
        Ok(Self { kind, attributes })
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    pub fn set(&mut self, attribute: &str, value: impl Into<Value>) -> Result<()> {
        if !self.kind.has_attribute(attribute) {
            return Err(CatalogError::UnknownAttribute {
                kind: self.kind,
                attribute: attribute.to_string(),
            });
        }
        self.attributes.insert(attribute.to_string(), value.into());
        Ok(())
    }

    pub fn with(mut self, attribute: &str, value: impl Into<Value>) -> Result<Self> {
        self.set(attribute, value)?;
        Ok(self)
    }

    pub fn get(&self, attribute: &str) -> Option<&Value> {
        self.attributes.get(attribute)
    }

    pub fn contains(&self, attribute: &str) -> bool {
        self.attributes.contains_key(attribute)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Attributes present on the record, in vocabulary order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> + '_ {
        self.kind
            .attributes()
            .iter()
            .filter_map(|name| self.attributes.get(*name).map(|value| (*name, value)))
    }

    /// The `book_id` / `author_id` value rendered as text.
    pub fn identifier(&self) -> Option<String> {
        self.get(self.kind.identifier_field().as_str())
            .map(value_text)
    }

    /// Body for an update: every attribute except the identifier, which
    /// travels in the `id` query parameter instead.
    pub fn without_identifier(&self) -> Map<String, Value> {
        let id_field = self.kind.identifier_field().as_str();
        self.attributes
            .iter()
            .filter(|(key, _)| key.as_str() != id_field)
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    pub fn to_json(&self) -> Value {
        Value::Object(self.attributes.clone())
    }
}

/// Text form of an attribute value: strings verbatim, lists comma-joined,
/// null as the empty string.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        Value::Array(items) => items.iter().map(value_text).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}
