//! Shared helpers over form controls.

use pagehands_protocols::ElementRef;

/// Selector matching every form control the engine inspects.
pub(crate) const CONTROL_SELECTOR: &str = "input, select, textarea";

/// Kind of a control: the lowercased `type` attribute for inputs (defaulting
/// to `text`), or the tag name for selects and textareas.
pub(crate) fn control_kind(control: &ElementRef) -> String {
    match control.tag_name().as_str() {
        "select" => "select".to_string(),
        "textarea" => "textarea".to_string(),
        _ => attr(control, "type")
            .map(|t| t.to_lowercase())
            .unwrap_or_else(|| "text".to_string()),
    }
}

/// Field key a control contributes to its form's schema: `name`, else `id`.
pub(crate) fn field_key(control: &ElementRef) -> Option<String> {
    attr(control, "name").or_else(|| attr(control, "id"))
}

/// Read an attribute, treating blank values as absent.
pub(crate) fn attr(element: &ElementRef, name: &str) -> Option<String> {
    element
        .attribute(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
