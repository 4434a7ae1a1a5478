//! Host element capability surface.
//!
//! The engine never talks to a concrete UI toolkit. It observes and drives the
//! hosting document through these traits, so the same inference logic runs
//! against a browser bridge or an in-memory test double.

use std::sync::Arc;

use tokio::sync::mpsc;
use url::Url;

use crate::error::HostError;

/// Shared handle to a live host element.
///
/// Handlers capture this handle, not a snapshot: reads and writes made through
/// it always target the element's current state.
pub type ElementRef = Arc<dyn Element>;

/// Capability surface over a single live element.
pub trait Element: Send + Sync {
    /// Tag name, lowercase.
    fn tag_name(&self) -> String;

    /// Read an attribute. `None` when the attribute is absent.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Write an attribute.
    fn set_attribute(&self, name: &str, value: &str);

    /// Visible text content, including descendant text.
    fn text_content(&self) -> String;

    /// All descendants matching a selector, in document order.
    fn query_selector_all(&self, selector: &str) -> Vec<ElementRef>;

    /// Whether this element matches a selector.
    fn matches(&self, selector: &str) -> bool;

    /// Whether this element or any of its ancestors matches a selector.
    ///
    /// Exclusion rules use this: an element is excluded if it matches or is
    /// nested inside a match.
    fn matches_or_within(&self, selector: &str) -> bool;

    /// Assign the element's value (text inputs, selects, textareas).
    fn set_value(&self, value: &str) -> Result<(), HostError>;

    /// Assign the element's checked flag (checkboxes, radios).
    fn set_checked(&self, checked: bool) -> Result<(), HostError>;

    /// Raise a synthetic event on this element.
    fn dispatch_event(&self, event: &SyntheticEvent) -> Result<(), HostError>;

    /// Invoke the element's native activation (click).
    fn activate(&self) -> Result<(), HostError>;
}

/// Capability surface over the hosting document.
pub trait Page: Send + Sync {
    /// All elements matching a selector, in document order.
    fn query_selector_all(&self, selector: &str) -> Vec<ElementRef>;

    /// Current document location. Link targets resolve against this.
    fn location(&self) -> Url;
}

/// A synthetic event raised by a handler.
///
/// Bubbling input/change notifications are what make observers bound to
/// native events (virtual-DOM frameworks included) react to scripted writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticEvent {
    pub name: String,
    pub bubbles: bool,
    pub cancelable: bool,
}

impl SyntheticEvent {
    pub fn new(name: impl Into<String>, bubbles: bool, cancelable: bool) -> Self {
        Self {
            name: name.into(),
            bubbles,
            cancelable,
        }
    }

    /// Bubbling, non-cancelable `input` notification.
    pub fn input() -> Self {
        Self::new("input", true, false)
    }

    /// Bubbling, non-cancelable `change` notification.
    pub fn change() -> Self {
        Self::new("change", true, false)
    }

    /// Bubbling, cancelable `submit` notification.
    pub fn submit() -> Self {
        Self::new("submit", true, true)
    }
}

/// Source of structural change notifications.
///
/// One signal means "something changed in the observed subtree" - no diff
/// detail is carried. A DOM bridge backs this with a mutation observer; tests
/// back it with a plain channel.
pub trait ChangeSource: Send + Sync {
    /// Subscribe to change signals.
    fn subscribe(&self) -> mpsc::UnboundedReceiver<()>;
}
