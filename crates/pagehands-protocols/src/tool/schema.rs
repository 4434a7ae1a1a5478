//! Input schema types.
//!
//! A deliberately small JSON Schema subset: object schemas whose properties
//! are string/number/boolean primitives with optional enum, pattern, format
//! and numeric-bound constraints.

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Primitive type of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Boolean,
}

/// Schema for a single input field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSchema {
    #[serde(rename = "type")]
    pub kind: FieldType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
}

impl FieldSchema {
    fn of(kind: FieldType) -> Self {
        Self {
            kind,
            description: None,
            enum_values: None,
            pattern: None,
            format: None,
            minimum: None,
            maximum: None,
        }
    }

    pub fn string() -> Self {
        Self::of(FieldType::String)
    }

    pub fn number() -> Self {
        Self::of(FieldType::Number)
    }

    pub fn boolean() -> Self {
        Self::of(FieldType::Boolean)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn with_enum(mut self, values: Vec<String>) -> Self {
        self.enum_values = Some(values);
        self
    }

    pub fn with_bounds(mut self, minimum: Option<f64>, maximum: Option<f64>) -> Self {
        self.minimum = minimum;
        self.maximum = maximum;
        self
    }
}

/// An object schema with insertion-ordered properties.
///
/// Properties keep document order so generated schemas are stable across
/// runs. `required` is always a subset of the property keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectSchema {
    properties: Vec<(String, FieldSchema)>,
    required: Vec<String>,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a property. Returns `false` (leaving the schema unchanged) when a
    /// property with this name already exists.
    pub fn insert(&mut self, name: impl Into<String>, schema: FieldSchema) -> bool {
        let name = name.into();
        if self.properties.iter().any(|(n, _)| *n == name) {
            return false;
        }
        self.properties.push((name, schema));
        true
    }

    /// Mark a property as required. Ignored for unknown names, so the
    /// subset invariant holds by construction.
    pub fn mark_required(&mut self, name: &str) {
        if self.properties.iter().any(|(n, _)| n == name)
            && !self.required.iter().any(|n| n == name)
        {
            self.required.push(name.to_string());
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldSchema> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, s)| s)
    }

    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|(n, _)| n.as_str())
    }

    pub fn required(&self) -> &[String] {
        &self.required
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl Serialize for ObjectSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries = if self.required.is_empty() { 2 } else { 3 };
        let mut map = serializer.serialize_map(Some(entries))?;
        map.serialize_entry("type", "object")?;
        map.serialize_entry(
            "properties",
            &OrderedProperties {
                inner: &self.properties,
            },
        )?;
        if !self.required.is_empty() {
            map.serialize_entry("required", &self.required)?;
        }
        map.end()
    }
}

struct OrderedProperties<'a> {
    inner: &'a [(String, FieldSchema)],
}

impl Serialize for OrderedProperties<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.inner.len()))?;
        for (name, schema) in self.inner {
            map.serialize_entry(name, schema)?;
        }
        map.end()
    }
}
