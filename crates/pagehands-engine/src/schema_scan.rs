//! Form input schema inference.
//!
//! Walks a form's descendant controls and maps each to a schema primitive
//! with whatever constraints the markup surfaces: numeric bounds, formats,
//! regex patterns, and bounded option enums.

#[cfg(test)]
#[path = "schema_scan_tests.rs"]
mod tests;

use pagehands_protocols::{ElementRef, FieldSchema, ObjectSchema, Page};

use crate::controls::{CONTROL_SELECTOR, attr, control_kind, field_key};

/// Selects with more options than this get no enum constraint; a schema
/// enumerating a country list helps nobody.
const MAX_ENUM_OPTIONS: usize = 20;

/// Infers an object schema from a form's controls.
///
/// Callers must skip forms whose resulting schema is empty - a tool with no
/// identifiable fields is vacuous.
pub struct FormSchemaScanner<'a> {
    page: &'a dyn Page,
}

impl<'a> FormSchemaScanner<'a> {
    pub fn new(page: &'a dyn Page) -> Self {
        Self { page }
    }

    pub fn scan(&self, form: &ElementRef) -> ObjectSchema {
        let mut schema = ObjectSchema::new();
        for control in form.query_selector_all(CONTROL_SELECTOR) {
            let kind = control_kind(&control);
            if kind == "hidden" || kind == "submit" {
                continue;
            }
            let Some(key) = field_key(&control) else {
                continue;
            };
            let field = self.field_schema(&control, &kind);
            if !schema.insert(key.clone(), field) {
                // radio groups share a name; the first member wins
                continue;
            }
            if control.attribute("required").is_some() {
                schema.mark_required(&key);
            }
        }
        schema
    }

    /// Schema for a single control, shared with the standalone-input flow.
    pub(crate) fn field_schema(&self, control: &ElementRef, kind: &str) -> FieldSchema {
        let mut field = match kind {
            "number" | "range" => FieldSchema::number().with_bounds(
                numeric_attr(control, "min"),
                numeric_attr(control, "max"),
            ),
            "checkbox" => FieldSchema::boolean(),
            "email" => FieldSchema::string().with_format("email"),
            "url" => FieldSchema::string().with_format("uri"),
            "date" => FieldSchema::string().with_format("date"),
            "tel" => FieldSchema::string().with_format("phone"),
            _ => FieldSchema::string(),
        };

        if kind == "select" {
            if let Some(values) = bounded_option_values(control) {
                field = field.with_enum(values);
            }
        }
        if let Some(pattern) = attr(control, "pattern") {
            field = field.with_pattern(pattern);
        }
        if let Some(description) = self.control_description(control) {
            field = field.with_description(description);
        }
        field
    }

    /// Associated label text (matched by `for`/`id` linkage), else placeholder.
    fn control_description(&self, control: &ElementRef) -> Option<String> {
        if let Some(id) = attr(control, "id") {
            let label = self
                .page
                .query_selector_all(&format!("label[for='{id}']"))
                .into_iter()
                .next()
                .map(|label| label.text_content().trim().to_string())
                .filter(|text| !text.is_empty());
            if label.is_some() {
                return label;
            }
        }
        attr(control, "placeholder")
    }
}

fn numeric_attr(control: &ElementRef, name: &str) -> Option<f64> {
    attr(control, name).and_then(|v| v.parse::<f64>().ok())
}

/// Distinct non-empty option values in document order, or `None` when the
/// option set is empty or too large to constrain.
fn bounded_option_values(select: &ElementRef) -> Option<Vec<String>> {
    let mut values: Vec<String> = Vec::new();
    for option in select.query_selector_all("option") {
        let value = attr(&option, "value")
            .unwrap_or_else(|| option.text_content().trim().to_string());
        if !value.is_empty() && !values.contains(&value) {
            values.push(value);
        }
    }
    if values.is_empty() || values.len() > MAX_ENUM_OPTIONS {
        None
    } else {
        Some(values)
    }
}
