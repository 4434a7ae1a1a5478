//! Engine facade.
//!
//! [`PageAgent`] wires the scanner, registry and watcher together behind the
//! public surface an embedding host talks to: scan, list, look up, export a
//! manifest, watch for structural changes, tear down.

#[cfg(test)]
#[path = "agent_tests.rs"]
mod tests;

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info};

use pagehands_protocols::{ChangeSource, Page, ToolDescriptor, ToolManifest, ToolSink};

use crate::config::{ConfigError, EngineConfig};
use crate::registry::{RegisteredTool, ToolRegistry};
use crate::scanner::{ScanSummary, Scanner};
use crate::watcher::ChangeWatcher;

/// Synthesizes tools for one hosted document.
///
/// The agent owns a registry and a scanner over the page it was built for.
/// Scans can be requested explicitly or driven by a [`ChangeSource`] through
/// [`start_watching`](PageAgent::start_watching).
pub struct PageAgent {
    page: Arc<dyn Page>,
    config: EngineConfig,
    registry: Arc<ToolRegistry>,
    scanner: Arc<Scanner>,
    watcher: Mutex<Option<ChangeWatcher>>,
}

impl PageAgent {
    /// Build an agent over a page.
    ///
    /// The configuration is validated up front; a sink, when given, receives
    /// every registration and the final clear.
    pub fn new(
        page: Arc<dyn Page>,
        config: EngineConfig,
        sink: Option<Arc<dyn ToolSink>>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut registry = ToolRegistry::new(config.max_tools);
        if let Some(sink) = sink {
            registry = registry.with_sink(sink);
        }
        if let Some(callback) = &config.on_tool_registered {
            registry = registry.with_callback(Arc::clone(callback));
        }
        let registry = Arc::new(registry);
        let scanner = Arc::new(Scanner::new(
            Arc::clone(&page),
            config.clone(),
            Arc::clone(&registry),
        ));

        info!(site = %page.location(), "page agent created");
        Ok(Self {
            page,
            config,
            registry,
            scanner,
            watcher: Mutex::new(None),
        })
    }

    /// Run one scan pass now.
    pub fn scan(&self) -> ScanSummary {
        self.scanner.scan()
    }

    /// Exported descriptors in registration order.
    pub fn tools(&self) -> Vec<ToolDescriptor> {
        self.registry.exported()
    }

    /// Look up a registered tool, handler included.
    pub fn get(&self, name: &str) -> Option<RegisteredTool> {
        self.registry.get(name)
    }

    /// Snapshot of the current tool set, stamped with the page origin.
    pub fn manifest(&self) -> ToolManifest {
        let site = self.page.location().origin().ascii_serialization();
        self.registry.manifest(&site)
    }

    /// Start re-scanning on structural change signals.
    ///
    /// Signals are debounced by the configured quiet period. A no-op when
    /// watching is disabled in the configuration or already running. Must be
    /// called within a tokio runtime.
    pub fn start_watching(&self, source: &dyn ChangeSource) {
        if !self.config.watch {
            debug!("watching disabled by configuration");
            return;
        }
        let mut watcher = self.watcher.lock();
        if watcher.as_ref().is_some_and(ChangeWatcher::is_active) {
            debug!("watcher already running");
            return;
        }
        let scanner = Arc::clone(&self.scanner);
        *watcher = Some(ChangeWatcher::spawn(source, self.config.debounce, move || {
            scanner.scan();
        }));
        info!(debounce = ?self.config.debounce, "structural change watching started");
    }

    /// Stop reacting to change signals. Idempotent.
    pub fn stop_watching(&self) {
        if let Some(watcher) = self.watcher.lock().take() {
            watcher.stop();
        }
    }

    pub fn is_watching(&self) -> bool {
        self.watcher
            .lock()
            .as_ref()
            .is_some_and(ChangeWatcher::is_active)
    }

    /// Tear the agent down: stop watching and drop every registered tool,
    /// locally and in the sink.
    pub fn destroy(&self) {
        self.stop_watching();
        self.registry.clear();
        info!("page agent destroyed");
    }
}
