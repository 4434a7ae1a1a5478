//! Tool name inference.
//!
//! Builds a slug name for an element from an ordered, role-specific candidate
//! list. Elements already carrying the manual instrumentation marker are never
//! renamed or re-registered: the generator returns `None` and the scanner
//! skips them.

#[cfg(test)]
#[path = "naming_tests.rs"]
mod tests;

use pagehands_protocols::ElementRef;

use crate::controls::attr;

/// Marker attribute set by pages that hand-instrument their own tools.
pub(crate) const MANUAL_TOOL_ATTR: &str = "data-mcp-tool";

const MAX_SLUG_LEN: usize = 40;

/// Visible button text longer than this is not a usable name candidate.
const MAX_BUTTON_TEXT: usize = 30;

/// Derives unique-ish slug names for elements by role.
///
/// Fallback names use the element's structural-position ordinal within its
/// scan phase rather than a random suffix, so repeated scans over the same
/// tree produce identical names.
pub struct NameGenerator {
    prefix: String,
}

impl NameGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Name for a form: `id` -> `name` -> `submit_<last action segment>` ->
    /// `form_<ordinal>`.
    pub fn form_name(&self, form: &ElementRef, ordinal: usize) -> Option<String> {
        if is_manually_instrumented(form) {
            return None;
        }
        let action_segment = attr(form, "action").and_then(|action| last_path_segment(&action));
        self.finish(&[
            attr(form, "id"),
            attr(form, "name"),
            action_segment.map(|segment| format!("submit_{segment}")),
            Some(format!("form_{ordinal}")),
        ])
    }

    /// Name for a button: accessible label -> short visible text -> `id` ->
    /// `action_<ordinal>`.
    pub fn button_name(&self, button: &ElementRef, ordinal: usize) -> Option<String> {
        if is_manually_instrumented(button) {
            return None;
        }
        let text = visible_text(button).filter(|t| t.chars().count() <= MAX_BUTTON_TEXT);
        self.finish(&[
            attr(button, "aria-label"),
            text,
            attr(button, "id"),
            Some(format!("action_{ordinal}")),
        ])
    }

    /// Name for a link: accessible label -> `navigate_<visible text>` ->
    /// `navigate_<ordinal>`.
    pub fn link_name(&self, link: &ElementRef, ordinal: usize) -> Option<String> {
        if is_manually_instrumented(link) {
            return None;
        }
        self.finish(&[
            attr(link, "aria-label"),
            visible_text(link).map(|text| format!("navigate_{text}")),
            Some(format!("navigate_{ordinal}")),
        ])
    }

    /// Name for a standalone input: `set_<name>` -> `set_<id>` ->
    /// `set_field_<ordinal>`.
    pub fn input_name(&self, input: &ElementRef, ordinal: usize) -> Option<String> {
        if is_manually_instrumented(input) {
            return None;
        }
        self.finish(&[
            attr(input, "name").map(|name| format!("set_{name}")),
            attr(input, "id").map(|id| format!("set_{id}")),
            Some(format!("set_field_{ordinal}")),
        ])
    }

    /// Slug the first usable candidate and apply the configured prefix.
    fn finish(&self, candidates: &[Option<String>]) -> Option<String> {
        let slug = candidates
            .iter()
            .flatten()
            .map(|candidate| slugify(candidate))
            .find(|slug| !slug.is_empty())?;
        if self.prefix.is_empty() {
            Some(slug)
        } else {
            Some(format!("{}_{}", self.prefix, slug))
        }
    }
}

pub(crate) fn is_manually_instrumented(element: &ElementRef) -> bool {
    element.attribute(MANUAL_TOOL_ATTR).is_some()
}

fn visible_text(element: &ElementRef) -> Option<String> {
    let text = element.text_content().trim().to_string();
    if text.is_empty() { None } else { Some(text) }
}

/// Last non-empty path segment of an action URL, without query or fragment.
fn last_path_segment(action: &str) -> Option<String> {
    let path = action
        .split(['?', '#'])
        .next()
        .unwrap_or_default();
    path.rsplit('/')
        .find(|segment| !segment.is_empty())
        .filter(|segment| !segment.contains(':'))
        .map(|segment| segment.to_string())
}

/// Slug transform: lowercase, strip characters outside `[a-z0-9 _-]`,
/// collapse whitespace/hyphen/underscore runs to a single underscore, trim
/// leading/trailing underscores, truncate to 40 characters.
///
/// Idempotent: `slugify(slugify(x)) == slugify(x)`.
pub fn slugify(raw: &str) -> String {
    let mut out = String::new();
    let mut pending_separator = false;
    for c in raw.to_lowercase().chars() {
        if c.is_whitespace() || c == '_' || c == '-' {
            pending_separator = true;
        } else if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_separator && !out.is_empty() {
                out.push('_');
            }
            pending_separator = false;
            out.push(c);
        }
    }
    let truncated: String = out.chars().take(MAX_SLUG_LEN).collect();
    truncated.trim_matches('_').to_string()
}
