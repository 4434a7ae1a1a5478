//! Human-readable tool descriptions.
//!
//! Deterministic, role-specific sentence construction from the accessible
//! label, title, placeholder and visible text surfaces.

#[cfg(test)]
#[path = "describe_tests.rs"]
mod tests;

use pagehands_protocols::ElementRef;

use crate::controls::{CONTROL_SELECTOR, attr, control_kind, field_key};

const MAX_FORM_LABEL: usize = 50;
const MAX_BUTTON_LABEL: usize = 50;
const MAX_LINK_TEXT: usize = 40;
const MAX_INPUT_LABEL: usize = 40;

/// Number of field names a form description enumerates.
const MAX_LISTED_FIELDS: usize = 5;

pub struct DescriptionGenerator;

impl DescriptionGenerator {
    /// Form sentence, appending up to five distinct field names
    /// parenthetically so callers see what the tool accepts at a glance.
    pub fn form(form: &ElementRef) -> String {
        let base = match attr(form, "aria-label").or_else(|| attr(form, "title")) {
            Some(label) => format!("Submit the '{}' form", truncate_chars(&label, MAX_FORM_LABEL)),
            None => "Submit this form".to_string(),
        };

        let mut fields: Vec<String> = Vec::new();
        for control in form.query_selector_all(CONTROL_SELECTOR) {
            let kind = control_kind(&control);
            if kind == "hidden" || kind == "submit" {
                continue;
            }
            let Some(name) = field_key(&control).or_else(|| attr(&control, "placeholder")) else {
                continue;
            };
            if !fields.contains(&name) {
                fields.push(name);
            }
            if fields.len() == MAX_LISTED_FIELDS {
                break;
            }
        }

        if fields.is_empty() {
            base
        } else {
            format!("{} (fields: {})", base, fields.join(", "))
        }
    }

    pub fn button(button: &ElementRef) -> String {
        match button_label(button) {
            Some(label) => format!(
                "Click the '{}' button",
                truncate_chars(&label, MAX_BUTTON_LABEL)
            ),
            None => "Click this button".to_string(),
        }
    }

    /// Link sentence; falls back to the raw href when no label or text exists.
    pub fn link(link: &ElementRef) -> String {
        let label = attr(link, "aria-label").or_else(|| visible_text(link));
        match label {
            Some(text) => format!("Navigate to '{}'", truncate_chars(&text, MAX_LINK_TEXT)),
            None => match attr(link, "href") {
                Some(href) => format!("Navigate to {href}"),
                None => "Navigate to this link's target".to_string(),
            },
        }
    }

    pub fn input(input: &ElementRef) -> String {
        let label = attr(input, "aria-label")
            .or_else(|| attr(input, "title"))
            .or_else(|| attr(input, "placeholder"))
            .or_else(|| field_key(input));
        match label {
            Some(label) => format!(
                "Set the value of the '{}' field",
                truncate_chars(&label, MAX_INPUT_LABEL)
            ),
            None => "Set the value of this field".to_string(),
        }
    }
}

pub(crate) fn button_label(button: &ElementRef) -> Option<String> {
    attr(button, "aria-label")
        .or_else(|| visible_text(button))
        .or_else(|| attr(button, "title"))
}

fn visible_text(element: &ElementRef) -> Option<String> {
    let text = element.text_content().trim().to_string();
    if text.is_empty() { None } else { Some(text) }
}

/// Truncate at a character boundary, no ellipsis.
pub(crate) fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
