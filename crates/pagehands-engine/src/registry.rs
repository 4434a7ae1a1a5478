//! Deduplicated, capacity-bounded tool store.

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;
use tracing::{debug, warn};

use pagehands_protocols::{
    RegistryError, ToolDescriptor, ToolHandler, ToolManifest, ToolSink,
};

use crate::config::ToolCallback;

/// A stored tool: the exported descriptor plus its executable handler.
#[derive(Clone)]
pub struct RegisteredTool {
    pub descriptor: ToolDescriptor,
    pub handler: Arc<dyn ToolHandler>,
}

impl fmt::Debug for RegisteredTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredTool")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

/// Insertion-ordered tool store with first-wins dedup and a hard capacity.
///
/// Tools persist until [`clear`](ToolRegistry::clear); no per-element removal
/// happens when a source element leaves the tree. Successful registrations
/// are forwarded to the external sink best-effort and reported through the
/// per-tool callback exactly once per name.
pub struct ToolRegistry {
    capacity: usize,
    sink: Option<Arc<dyn ToolSink>>,
    on_registered: Option<ToolCallback>,
    tools: Mutex<Vec<RegisteredTool>>,
}

impl ToolRegistry {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            sink: None,
            on_registered: None,
            tools: Mutex::new(Vec::new()),
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn ToolSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn with_callback(mut self, callback: ToolCallback) -> Self {
        self.on_registered = Some(callback);
        self
    }

    /// Register a tool.
    ///
    /// First registration for a name wins; a later tool with the same name is
    /// rejected with [`RegistryError::Duplicate`]. Once `capacity` entries are
    /// stored, further registrations fail with
    /// [`RegistryError::CapacityExceeded`].
    pub fn register(&self, tool: RegisteredTool) -> Result<(), RegistryError> {
        let descriptor = {
            let mut tools = self.tools.lock();
            if tools
                .iter()
                .any(|stored| stored.descriptor.name == tool.descriptor.name)
            {
                return Err(RegistryError::Duplicate(tool.descriptor.name.clone()));
            }
            if tools.len() >= self.capacity {
                return Err(RegistryError::CapacityExceeded(self.capacity));
            }
            let descriptor = tool.descriptor.clone();
            tools.push(tool);
            descriptor
        };

        if let Some(sink) = &self.sink {
            if let Err(e) = sink.register(&descriptor) {
                warn!(tool = %descriptor.name, error = %e,
                    "external sink rejected tool; keeping local registration");
            }
        }
        if let Some(callback) = &self.on_registered {
            callback(&descriptor);
        }
        debug!(tool = %descriptor.name, "tool registered");
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools
            .lock()
            .iter()
            .any(|tool| tool.descriptor.name == name)
    }

    pub fn get(&self, name: &str) -> Option<RegisteredTool> {
        self.tools
            .lock()
            .iter()
            .find(|tool| tool.descriptor.name == name)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.tools.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.lock().is_empty()
    }

    /// Exported descriptors in registration order.
    pub fn exported(&self) -> Vec<ToolDescriptor> {
        self.tools
            .lock()
            .iter()
            .map(|tool| tool.descriptor.clone())
            .collect()
    }

    /// Snapshot of all registered tools plus provenance metadata.
    pub fn manifest(&self, site: &str) -> ToolManifest {
        ToolManifest {
            version: env!("CARGO_PKG_VERSION").to_string(),
            site: site.to_string(),
            generated_at: Utc::now(),
            generated_by: "pagehands".to_string(),
            tools: self.exported(),
        }
    }

    /// Drop every stored tool and tell the sink to do the same.
    pub fn clear(&self) {
        self.tools.lock().clear();
        if let Some(sink) = &self.sink {
            if let Err(e) = sink.clear_all() {
                warn!(error = %e, "external sink clear failed");
            }
        }
        debug!("tool registry cleared");
    }
}
