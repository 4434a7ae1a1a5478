//! # Pagehands Protocols
//!
//! Protocol definitions for the pagehands tool synthesis engine.
//! Contains the wire types and capability traits - no inference logic.
//!
//! ## Core Traits
//!
//! - [`Element`] - Capability surface over a live host element
//! - [`Page`] - Capability surface over the hosting document
//! - [`ToolHandler`] - Executable side of a synthesized tool
//! - [`ToolSink`] - External registry the engine forwards tools to
//! - [`ChangeSource`] - Structural change notifications for re-scans

pub mod error;
pub mod host;
pub mod tool;

// Re-export core traits and types
pub use error::{HandlerError, HostError, RegistryError, SinkError};
pub use host::{ChangeSource, Element, ElementRef, Page, SyntheticEvent};
pub use tool::{
    FieldSchema, FieldType, ObjectSchema, ToolAnnotations, ToolDescriptor, ToolHandler,
    ToolManifest, ToolSink,
};
