//! In-memory DOM double backing the engine's unit tests.
//!
//! Implements the host capability surface over a hand-built element tree with
//! a small selector subset: comma lists, tag names, `#id`, `.class`,
//! `[attr]` and `[attr='value']` (optionally tag-qualified). That covers
//! every selector the engine issues plus the ones tests configure.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tokio::sync::mpsc;
use url::Url;

use pagehands_protocols::{
    ChangeSource, Element, ElementRef, HostError, Page, SinkError, SyntheticEvent, ToolDescriptor,
    ToolSink,
};

pub(crate) struct FakeElement {
    tag: String,
    attrs: Mutex<HashMap<String, String>>,
    own_text: Mutex<String>,
    children: Mutex<Vec<Arc<FakeElement>>>,
    parent: Mutex<Weak<FakeElement>>,
    value: Mutex<String>,
    checked: Mutex<bool>,
    events: Mutex<Vec<String>>,
    activations: Mutex<usize>,
}

impl FakeElement {
    pub(crate) fn new(tag: &str) -> Arc<Self> {
        Arc::new(Self {
            tag: tag.to_lowercase(),
            attrs: Mutex::new(HashMap::new()),
            own_text: Mutex::new(String::new()),
            children: Mutex::new(Vec::new()),
            parent: Mutex::new(Weak::new()),
            value: Mutex::new(String::new()),
            checked: Mutex::new(false),
            events: Mutex::new(Vec::new()),
            activations: Mutex::new(0),
        })
    }

    pub(crate) fn with_attr(self: Arc<Self>, name: &str, value: &str) -> Arc<Self> {
        self.attrs.lock().insert(name.to_string(), value.to_string());
        self
    }

    pub(crate) fn with_text(self: Arc<Self>, text: &str) -> Arc<Self> {
        *self.own_text.lock() = text.to_string();
        self
    }

    pub(crate) fn with_child(self: Arc<Self>, child: Arc<FakeElement>) -> Arc<Self> {
        *child.parent.lock() = Arc::downgrade(&self);
        self.children.lock().push(child);
        self
    }

    pub(crate) fn current_value(&self) -> String {
        self.value.lock().clone()
    }

    pub(crate) fn is_checked(&self) -> bool {
        *self.checked.lock()
    }

    pub(crate) fn recorded_events(&self) -> Vec<String> {
        self.events.lock().clone()
    }

    pub(crate) fn activation_count(&self) -> usize {
        *self.activations.lock()
    }

    fn descendants(&self, out: &mut Vec<Arc<FakeElement>>) {
        for child in self.children.lock().iter() {
            out.push(child.clone());
            child.descendants(out);
        }
    }

    fn matches_selector_list(&self, selectors: &str) -> bool {
        selectors
            .split(',')
            .any(|selector| self.matches_simple(selector.trim()))
    }

    fn matches_simple(&self, selector: &str) -> bool {
        if selector.is_empty() {
            return false;
        }
        let chars: Vec<char> = selector.chars().collect();
        let mut i = 0;

        let mut tag = String::new();
        while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '*') {
            tag.push(chars[i]);
            i += 1;
        }
        if !tag.is_empty() && tag != "*" && tag.to_lowercase() != self.tag {
            return false;
        }

        let attrs = self.attrs.lock();
        while i < chars.len() {
            match chars[i] {
                '#' => {
                    i += 1;
                    let ident = read_ident(&chars, &mut i);
                    if attrs.get("id").map(String::as_str) != Some(ident.as_str()) {
                        return false;
                    }
                }
                '.' => {
                    i += 1;
                    let class = read_ident(&chars, &mut i);
                    let listed = attrs
                        .get("class")
                        .map(|c| c.split_whitespace().any(|part| part == class))
                        .unwrap_or(false);
                    if !listed {
                        return false;
                    }
                }
                '[' => {
                    let close = match chars[i..].iter().position(|c| *c == ']') {
                        Some(offset) => i + offset,
                        None => return false,
                    };
                    let inner: String = chars[i + 1..close].iter().collect();
                    i = close + 1;
                    let (name, expected) = match inner.split_once('=') {
                        Some((name, value)) => {
                            (name.trim(), Some(value.trim().trim_matches(|c| c == '\'' || c == '"')))
                        }
                        None => (inner.trim(), None),
                    };
                    match (attrs.get(name), expected) {
                        (None, _) => return false,
                        (Some(_), None) => {}
                        (Some(actual), Some(expected)) => {
                            if actual != expected {
                                return false;
                            }
                        }
                    }
                }
                _ => return false,
            }
        }
        true
    }
}

fn erase(el: Arc<FakeElement>) -> ElementRef {
    el
}

fn read_ident(chars: &[char], i: &mut usize) -> String {
    let mut ident = String::new();
    while *i < chars.len()
        && (chars[*i].is_ascii_alphanumeric() || chars[*i] == '-' || chars[*i] == '_')
    {
        ident.push(chars[*i]);
        *i += 1;
    }
    ident
}

impl Element for FakeElement {
    fn tag_name(&self) -> String {
        self.tag.clone()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.attrs.lock().get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.attrs.lock().insert(name.to_string(), value.to_string());
    }

    fn text_content(&self) -> String {
        let mut parts = Vec::new();
        let own = self.own_text.lock().trim().to_string();
        if !own.is_empty() {
            parts.push(own);
        }
        for child in self.children.lock().iter() {
            let text = child.text_content();
            if !text.is_empty() {
                parts.push(text);
            }
        }
        parts.join(" ")
    }

    fn query_selector_all(&self, selector: &str) -> Vec<ElementRef> {
        let mut all = Vec::new();
        self.descendants(&mut all);
        all.into_iter()
            .filter(|el| el.matches_selector_list(selector))
            .map(erase)
            .collect()
    }

    fn matches(&self, selector: &str) -> bool {
        self.matches_selector_list(selector)
    }

    fn matches_or_within(&self, selector: &str) -> bool {
        if self.matches_selector_list(selector) {
            return true;
        }
        let mut current = self.parent.lock().upgrade();
        while let Some(ancestor) = current {
            if ancestor.matches_selector_list(selector) {
                return true;
            }
            current = ancestor.parent.lock().upgrade();
        }
        false
    }

    fn set_value(&self, value: &str) -> Result<(), HostError> {
        *self.value.lock() = value.to_string();
        Ok(())
    }

    fn set_checked(&self, checked: bool) -> Result<(), HostError> {
        *self.checked.lock() = checked;
        Ok(())
    }

    fn dispatch_event(&self, event: &SyntheticEvent) -> Result<(), HostError> {
        self.events.lock().push(event.name.clone());
        Ok(())
    }

    fn activate(&self) -> Result<(), HostError> {
        *self.activations.lock() += 1;
        Ok(())
    }
}

pub(crate) struct FakePage {
    root: Arc<FakeElement>,
    location: Url,
}

impl FakePage {
    pub(crate) fn new(root: Arc<FakeElement>, location: &str) -> Arc<Self> {
        Arc::new(Self {
            root,
            location: Url::parse(location).expect("valid fixture url"),
        })
    }
}

impl Page for FakePage {
    fn query_selector_all(&self, selector: &str) -> Vec<ElementRef> {
        let mut all: Vec<Arc<FakeElement>> = vec![self.root.clone()];
        self.root.descendants(&mut all);
        all.into_iter()
            .filter(|el| el.matches_selector_list(selector))
            .map(erase)
            .collect()
    }

    fn location(&self) -> Url {
        self.location.clone()
    }
}

/// Change source driven by tests calling [`FakeChangeSource::signal`].
pub(crate) struct FakeChangeSource {
    tx: mpsc::UnboundedSender<()>,
    rx: Mutex<Option<mpsc::UnboundedReceiver<()>>>,
}

impl FakeChangeSource {
    pub(crate) fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx: Mutex::new(Some(rx)),
        }
    }

    pub(crate) fn signal(&self) {
        let _ = self.tx.send(());
    }
}

impl ChangeSource for FakeChangeSource {
    fn subscribe(&self) -> mpsc::UnboundedReceiver<()> {
        self.rx.lock().take().expect("subscribe called twice")
    }
}

/// Sink double recording forwarded tools; can be told to fail registration.
#[derive(Default)]
pub(crate) struct RecordingSink {
    pub(crate) registered: Mutex<Vec<String>>,
    pub(crate) clear_calls: Mutex<usize>,
    pub(crate) fail_register: bool,
}

impl RecordingSink {
    pub(crate) fn failing() -> Self {
        Self {
            fail_register: true,
            ..Self::default()
        }
    }
}

impl ToolSink for RecordingSink {
    fn register(&self, tool: &ToolDescriptor) -> Result<(), SinkError> {
        if self.fail_register {
            return Err(SinkError::RegistrationFailed("sink offline".to_string()));
        }
        self.registered.lock().push(tool.name.clone());
        Ok(())
    }

    fn clear_all(&self) -> Result<(), SinkError> {
        *self.clear_calls.lock() += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_by_tag_id_and_attr() {
        let input = FakeElement::new("input")
            .with_attr("id", "search-box")
            .with_attr("type", "email")
            .with_attr("class", "field wide");

        assert!(input.matches("input"));
        assert!(input.matches("#search-box"));
        assert!(input.matches("input[type='email']"));
        assert!(input.matches("[type=\"email\"]"));
        assert!(input.matches(".wide"));
        assert!(input.matches("input, select, textarea"));
        assert!(!input.matches("select"));
        assert!(!input.matches("input[type='url']"));
        assert!(!input.matches(".narrow"));
    }

    #[test]
    fn test_query_returns_document_order() {
        let form = FakeElement::new("form")
            .with_child(FakeElement::new("input").with_attr("name", "first"))
            .with_child(
                FakeElement::new("div")
                    .with_child(FakeElement::new("input").with_attr("name", "second")),
            );

        let controls = form.query_selector_all("input");
        assert_eq!(controls.len(), 2);
        assert_eq!(controls[0].attribute("name").as_deref(), Some("first"));
        assert_eq!(controls[1].attribute("name").as_deref(), Some("second"));
    }

    #[test]
    fn test_matches_or_within_walks_ancestors() {
        let button = FakeElement::new("button");
        let _form = FakeElement::new("form").with_child(button.clone());

        assert!(button.matches_or_within("form"));
        assert!(!button.matches_or_within("nav"));
    }

    #[test]
    fn test_text_content_includes_descendants() {
        let link = FakeElement::new("a")
            .with_text("View")
            .with_child(FakeElement::new("span").with_text("cart"));
        assert_eq!(link.text_content(), "View cart");
    }
}
