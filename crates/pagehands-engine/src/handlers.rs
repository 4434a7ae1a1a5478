//! Executable tool handlers.
//!
//! Every handler closes over a live element handle, so invocation always
//! targets current document state rather than a scan-time snapshot. Handlers
//! are fire-and-forget: they return once their synthetic notifications have
//! been raised, without awaiting observer side effects.

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use pagehands_protocols::{ElementRef, HandlerError, Page, SyntheticEvent, ToolHandler};

use crate::controls::{CONTROL_SELECTOR, control_kind, field_key};
use crate::describe::{button_label, truncate_chars};

const MAX_CLICK_LABEL: usize = 50;

/// Builds the element-role handlers.
pub struct HandlerFactory {
    page: Arc<dyn Page>,
}

impl HandlerFactory {
    pub fn new(page: Arc<dyn Page>) -> Self {
        Self { page }
    }

    pub fn form(&self, form: ElementRef) -> Arc<dyn ToolHandler> {
        Arc::new(FormHandler { form })
    }

    pub fn button(&self, button: ElementRef) -> Arc<dyn ToolHandler> {
        Arc::new(ButtonHandler { button })
    }

    pub fn link(&self, link: ElementRef) -> Arc<dyn ToolHandler> {
        Arc::new(LinkHandler {
            link,
            page: Arc::clone(&self.page),
        })
    }

    pub fn input(&self, control: ElementRef) -> Arc<dyn ToolHandler> {
        Arc::new(InputHandler { control })
    }
}

/// Writes mapped fields into the form's current controls, raising bubbling
/// `input` and `change` notifications per written field and one cancelable
/// `submit` on the form itself.
struct FormHandler {
    form: ElementRef,
}

#[async_trait]
impl ToolHandler for FormHandler {
    async fn invoke(&self, input: Value) -> Result<Value, HandlerError> {
        let Some(map) = input.as_object() else {
            return Err(HandlerError::InvalidInput(
                "form input must be an object of field values".to_string(),
            ));
        };

        let mut applied: Vec<String> = Vec::new();
        for control in self.form.query_selector_all(CONTROL_SELECTOR) {
            let Some(key) = field_key(&control) else {
                continue;
            };
            if applied.contains(&key) {
                continue;
            }
            let Some(value) = map.get(&key) else {
                continue;
            };
            write_control(&control, value)?;
            applied.push(key);
        }

        self.form.dispatch_event(&SyntheticEvent::submit())?;
        debug!(fields = applied.len(), "form handler submitted");

        Ok(json!({
            "success": true,
            "message": format!("Form submitted with {} field(s) applied", applied.len()),
            "fields": applied,
        }))
    }
}

/// Assign a value to one control and raise the input/change pair.
fn write_control(control: &ElementRef, value: &Value) -> Result<(), HandlerError> {
    if control_kind(control) == "checkbox" {
        control.set_checked(truthy(value))?;
    } else {
        control.set_value(&coerce_string(value))?;
    }
    control.dispatch_event(&SyntheticEvent::input())?;
    control.dispatch_event(&SyntheticEvent::change())?;
    Ok(())
}

/// JavaScript-style truthiness, since callers hand us loosely typed JSON.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn coerce_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Invokes the element's native activation.
struct ButtonHandler {
    button: ElementRef,
}

#[async_trait]
impl ToolHandler for ButtonHandler {
    async fn invoke(&self, _input: Value) -> Result<Value, HandlerError> {
        self.button.activate()?;
        let label = button_label(&self.button).unwrap_or_else(|| "button".to_string());
        Ok(json!({
            "success": true,
            "message": format!("Clicked: {}", truncate_chars(&label, MAX_CLICK_LABEL)),
        }))
    }
}

/// Resolves the link target without navigating.
///
/// Navigating would tear down the hosting context and every registered tool,
/// so the caller is handed the absolute URL to act on instead.
struct LinkHandler {
    link: ElementRef,
    page: Arc<dyn Page>,
}

#[async_trait]
impl ToolHandler for LinkHandler {
    async fn invoke(&self, _input: Value) -> Result<Value, HandlerError> {
        let href = self.link.attribute("href").unwrap_or_default();
        if href.starts_with("javascript:") {
            self.link.activate()?;
            return Ok(json!({
                "success": true,
                "message": "Activated link",
            }));
        }

        let target = self
            .page
            .location()
            .join(&href)
            .map_err(|e| HandlerError::ExecutionFailed(format!("cannot resolve href '{href}': {e}")))?;
        let text = self.link.text_content().trim().to_string();
        Ok(json!({
            "success": true,
            "url": target.as_str(),
            "text": text,
            "message": format!("Link resolves to {target}; navigation is left to the caller"),
        }))
    }
}

/// Writes a single standalone control, raising the input/change pair.
struct InputHandler {
    control: ElementRef,
}

#[async_trait]
impl ToolHandler for InputHandler {
    async fn invoke(&self, input: Value) -> Result<Value, HandlerError> {
        let value = input
            .get("value")
            .ok_or_else(|| HandlerError::InvalidInput("missing 'value' field".to_string()))?;
        write_control(&self.control, value)?;
        Ok(json!({
            "success": true,
            "message": "Field value updated",
        }))
    }
}
