//! Scan orchestration.
//!
//! One scan pass enumerates candidate elements in a fixed phase order:
//!
//! 1. forms (schema must be non-empty)
//! 2. button-role elements not nested in a form, with a usable label
//! 3. links inside navigation landmarks
//! 4. elements matched by caller-supplied include selectors, classified by tag
//!
//! Every phase filters exclusions and runs into the same capacity gate:
//! scanning cost is unaffected once the registry is full, only registration
//! is dropped.

#[cfg(test)]
#[path = "scanner_tests.rs"]
mod tests;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, trace, warn};

use pagehands_protocols::{
    ElementRef, ObjectSchema, Page, RegistryError, ToolAnnotations, ToolDescriptor, ToolHandler,
};

use crate::config::EngineConfig;
use crate::controls::{attr, control_kind};
use crate::describe::{DescriptionGenerator, button_label};
use crate::handlers::HandlerFactory;
use crate::naming::{NameGenerator, is_manually_instrumented};
use crate::registry::{RegisteredTool, ToolRegistry};
use crate::schema_scan::FormSchemaScanner;

/// Marker set on elements whose tool made it into the registry, so later
/// passes recognize them as already instrumented.
pub(crate) const REGISTERED_ATTR: &str = "data-mcp-registered";

/// Landmarks bounding the link phase. Scanning every anchor on a page would
/// drown the registry in navigation noise.
const LANDMARK_SELECTORS: [&str; 3] = ["nav", "[role='navigation']", "header"];

const BUTTON_SELECTOR: &str = "button, [role='button']";

/// Outcome of one scan request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// False when the request was rejected because a scan was in progress.
    pub ran: bool,
    /// Tools stored this pass.
    pub registered: usize,
    /// Candidates that qualified but were not stored (duplicates, capacity,
    /// benign skips past the naming stage).
    pub skipped: usize,
}

/// Drives scan passes over the page.
pub struct Scanner {
    page: Arc<dyn Page>,
    config: EngineConfig,
    registry: Arc<ToolRegistry>,
    names: NameGenerator,
    handlers: HandlerFactory,
    scanning: AtomicBool,
}

impl Scanner {
    pub fn new(page: Arc<dyn Page>, config: EngineConfig, registry: Arc<ToolRegistry>) -> Self {
        Self {
            names: NameGenerator::new(config.prefix.clone()),
            handlers: HandlerFactory::new(Arc::clone(&page)),
            page,
            config,
            registry,
            scanning: AtomicBool::new(false),
        }
    }

    /// Run one scan pass. Overlapping requests are rejected, not queued: the
    /// registry has no lock against concurrent writers, so one pass at a time.
    pub fn scan(&self) -> ScanSummary {
        if self.scanning.swap(true, Ordering::SeqCst) {
            warn!("scan already in progress; request rejected");
            return ScanSummary::default();
        }

        let mut summary = ScanSummary {
            ran: true,
            ..ScanSummary::default()
        };
        self.scan_forms(&mut summary);
        self.scan_buttons(&mut summary);
        self.scan_links(&mut summary);
        self.scan_included(&mut summary);
        self.scanning.store(false, Ordering::SeqCst);

        info!(
            registered = summary.registered,
            skipped = summary.skipped,
            total = self.registry.len(),
            "scan pass finished"
        );
        summary
    }

    fn scan_forms(&self, summary: &mut ScanSummary) {
        for (ordinal, form) in self.page.query_selector_all("form").into_iter().enumerate() {
            self.try_form(&form, ordinal, summary);
        }
    }

    fn scan_buttons(&self, summary: &mut ScanSummary) {
        for (ordinal, button) in self
            .page
            .query_selector_all(BUTTON_SELECTOR)
            .into_iter()
            .enumerate()
        {
            if self.excluded(&button) {
                self.note_skip("button", "matches an exclusion selector");
                continue;
            }
            if button.matches_or_within("form") {
                self.note_skip("button", "nested within a form");
                continue;
            }
            if button_label(&button).is_none() {
                self.note_skip("button", "no visible or accessible label");
                continue;
            }
            self.try_button(&button, ordinal, summary);
        }
    }

    fn scan_links(&self, summary: &mut ScanSummary) {
        let mut ordinal = 0;
        for landmark_selector in LANDMARK_SELECTORS {
            for landmark in self.page.query_selector_all(landmark_selector) {
                for link in landmark.query_selector_all("a[href]") {
                    let href = attr(&link, "href").unwrap_or_default();
                    if href.is_empty() || href == "#" || href.starts_with("javascript:") {
                        self.note_skip("link", "empty, placeholder or script-pseudo href");
                        continue;
                    }
                    if self.excluded(&link) {
                        self.note_skip("link", "matches an exclusion selector");
                        continue;
                    }
                    self.try_link(&link, ordinal, summary);
                    ordinal += 1;
                }
            }
        }
    }

    /// Caller-supplied selectors, classified by tag: forms get the full form
    /// flow, standalone controls become single-field setters, anything else
    /// is treated as an activatable button.
    fn scan_included(&self, summary: &mut ScanSummary) {
        // one ordinal across all include selectors, so fallback names from
        // different selectors never collide
        let mut ordinal = 0;
        for selector in &self.config.include {
            for element in self.page.query_selector_all(selector) {
                if self.excluded(&element) {
                    self.note_skip("included element", "matches an exclusion selector");
                    continue;
                }
                match element.tag_name().as_str() {
                    "form" => self.try_form(&element, ordinal, summary),
                    "input" | "select" | "textarea" => self.try_input(&element, ordinal, summary),
                    _ => self.try_button(&element, ordinal, summary),
                }
                ordinal += 1;
            }
        }
    }

    fn try_form(&self, form: &ElementRef, ordinal: usize, summary: &mut ScanSummary) {
        if self.excluded(form) {
            self.note_skip("form", "matches an exclusion selector");
            return;
        }
        if form.attribute(REGISTERED_ATTR).is_some() {
            trace!("form already tool-registered");
            return;
        }
        if is_manually_instrumented(form) {
            self.note_skip("form", "manual tool marker present");
            return;
        }
        let Some(name) = self.names.form_name(form, ordinal) else {
            self.note_skip("form", "no usable name");
            return;
        };
        let schema = FormSchemaScanner::new(self.page.as_ref()).scan(form);
        if schema.is_empty() {
            self.note_skip(&name, "no identifiable fields");
            summary.skipped += 1;
            return;
        }
        let descriptor = ToolDescriptor::new(name, DescriptionGenerator::form(form), schema);
        self.submit(form, descriptor, self.handlers.form(form.clone()), summary);
    }

    fn try_button(&self, button: &ElementRef, ordinal: usize, summary: &mut ScanSummary) {
        if button.attribute(REGISTERED_ATTR).is_some() {
            trace!("button already tool-registered");
            return;
        }
        let Some(name) = self.names.button_name(button, ordinal) else {
            self.note_skip("button", "manual tool marker present");
            return;
        };
        let descriptor =
            ToolDescriptor::new(name, DescriptionGenerator::button(button), ObjectSchema::new());
        self.submit(
            button,
            descriptor,
            self.handlers.button(button.clone()),
            summary,
        );
    }

    fn try_link(&self, link: &ElementRef, ordinal: usize, summary: &mut ScanSummary) {
        // overlapping landmark selectors enumerate the same link more than
        // once per pass; the marker set on registration keeps one descriptor
        // per element
        if link.attribute(REGISTERED_ATTR).is_some() {
            trace!("link already tool-registered");
            return;
        }
        let Some(name) = self.names.link_name(link, ordinal) else {
            self.note_skip("link", "manual tool marker present");
            return;
        };
        let descriptor =
            ToolDescriptor::new(name, DescriptionGenerator::link(link), ObjectSchema::new())
                .with_annotations(ToolAnnotations::read_only());
        self.submit(link, descriptor, self.handlers.link(link.clone()), summary);
    }

    fn try_input(&self, control: &ElementRef, ordinal: usize, summary: &mut ScanSummary) {
        if control.attribute(REGISTERED_ATTR).is_some() {
            trace!("control already tool-registered");
            return;
        }
        let kind = control_kind(control);
        if kind == "hidden" || kind == "submit" {
            self.note_skip("included control", "hidden or submit kind");
            return;
        }
        let Some(name) = self.names.input_name(control, ordinal) else {
            self.note_skip("included control", "manual tool marker present");
            return;
        };
        let field = FormSchemaScanner::new(self.page.as_ref()).field_schema(control, &kind);
        let mut schema = ObjectSchema::new();
        schema.insert("value", field);
        schema.mark_required("value");
        let descriptor = ToolDescriptor::new(name, DescriptionGenerator::input(control), schema);
        self.submit(
            control,
            descriptor,
            self.handlers.input(control.clone()),
            summary,
        );
    }

    /// Hand a finished descriptor to the registry and mark the element on
    /// success. Registration failures are absorbed here; the pass continues.
    fn submit(
        &self,
        element: &ElementRef,
        descriptor: ToolDescriptor,
        handler: Arc<dyn ToolHandler>,
        summary: &mut ScanSummary,
    ) {
        let name = descriptor.name.clone();
        match self.registry.register(RegisteredTool { descriptor, handler }) {
            Ok(()) => {
                element.set_attribute(REGISTERED_ATTR, "true");
                summary.registered += 1;
            }
            Err(RegistryError::Duplicate(_)) => {
                summary.skipped += 1;
                debug!(tool = %name, "duplicate name; first registration wins");
            }
            Err(RegistryError::CapacityExceeded(capacity)) => {
                summary.skipped += 1;
                warn!(tool = %name, capacity, "tool capacity reached; registration dropped");
            }
        }
    }

    fn excluded(&self, element: &ElementRef) -> bool {
        self.config
            .exclude
            .iter()
            .any(|selector| element.matches_or_within(selector))
    }

    /// Benign skips are diagnostics, not errors. The `debug` config flag
    /// promotes them from trace to debug level.
    fn note_skip(&self, subject: &str, reason: &str) {
        if self.config.debug {
            debug!(subject, reason, "element skipped");
        } else {
            trace!(subject, reason, "element skipped");
        }
    }
}
