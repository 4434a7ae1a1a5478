//! Tool descriptor and manifest types.

#[cfg(test)]
#[path = "definition_tests.rs"]
mod tests;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::ObjectSchema;

/// Descriptor of a synthesized tool, as exported to automation callers.
///
/// This is the exported shape: the executable handler travels separately (see
/// `ToolHandler`) and never leaves the process. Descriptors are immutable
/// after creation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    /// Slug name, unique within a registry.
    pub name: String,

    /// Human-readable sentence describing what invoking the tool does.
    pub description: String,

    /// Object schema of the handler input.
    pub input_schema: ObjectSchema,

    /// Behavioral hints for the caller.
    #[serde(skip_serializing_if = "ToolAnnotations::is_empty")]
    pub annotations: ToolAnnotations,
}

impl ToolDescriptor {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: ObjectSchema,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
            annotations: ToolAnnotations::default(),
        }
    }

    pub fn with_annotations(mut self, annotations: ToolAnnotations) -> Self {
        self.annotations = annotations;
        self
    }
}

/// Behavioral hints attached to a descriptor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolAnnotations {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_only_hint: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub destructive_hint: Option<bool>,
}

impl ToolAnnotations {
    pub fn read_only() -> Self {
        Self {
            read_only_hint: Some(true),
            destructive_hint: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.read_only_hint.is_none() && self.destructive_hint.is_none()
    }
}

/// Exported snapshot of all registered tools plus provenance metadata.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolManifest {
    /// Engine version that produced the snapshot.
    pub version: String,

    /// Origin of the hosting document.
    pub site: String,

    pub generated_at: DateTime<Utc>,

    pub generated_by: String,

    pub tools: Vec<ToolDescriptor>,
}
