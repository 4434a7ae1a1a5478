//! # Pagehands Engine
//!
//! Inspects the interactive element tree of a hosted document and synthesizes
//! callable tool descriptors (name, description, input schema, executable
//! handler) for an automation caller, so page controls can be operated without
//! scraping markup.
//!
//! The engine observes only the structural tree and attribute/text surface -
//! it never parses application state. All host access goes through the
//! capability traits in [`pagehands_protocols`], so the same inference logic
//! runs against a browser bridge or an in-memory test double.
//!
//! ## Flow
//!
//! A [`ChangeWatcher`] (or an explicit request) triggers [`PageAgent::scan`].
//! Each scan pass enumerates candidate elements in a fixed phase order (forms,
//! out-of-form buttons, landmark links, caller-supplied include selectors),
//! filters exclusions, runs [`NameGenerator`] / [`DescriptionGenerator`] /
//! [`FormSchemaScanner`], binds a handler from [`HandlerFactory`] over the
//! live element, and submits the result to [`ToolRegistry`], which
//! deduplicates, enforces capacity, and forwards to the external sink.

mod agent;
mod config;
mod controls;
mod describe;
mod handlers;
mod naming;
mod registry;
mod scanner;
mod schema_scan;
mod watcher;

#[cfg(test)]
pub(crate) mod fake_dom;

pub use agent::PageAgent;
pub use config::{ConfigError, EngineConfig, ToolCallback};
pub use describe::DescriptionGenerator;
pub use handlers::HandlerFactory;
pub use naming::{NameGenerator, slugify};
pub use registry::{RegisteredTool, ToolRegistry};
pub use scanner::{ScanSummary, Scanner};
pub use schema_scan::FormSchemaScanner;
pub use watcher::ChangeWatcher;
