//! Handler and sink traits.

use async_trait::async_trait;

use crate::error::{HandlerError, SinkError};

use super::ToolDescriptor;

/// Executable side of a synthesized tool.
///
/// Handlers close over live element handles and replay field writes and
/// activations against them. They are fire-and-forget: they return once the
/// synthetic notifications have been raised, without awaiting any downstream
/// observer effect.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Invoke the tool with a JSON input payload.
    async fn invoke(&self, input: serde_json::Value) -> Result<serde_json::Value, HandlerError>;
}

/// External registry the engine forwards descriptors to.
///
/// Optional collaborator: when absent the engine degrades to local-only
/// bookkeeping. Forwarding is best-effort - a failed `register` leaves the
/// local registration in place.
pub trait ToolSink: Send + Sync {
    /// Forward a newly registered tool.
    fn register(&self, tool: &ToolDescriptor) -> Result<(), SinkError>;

    /// Drop every previously forwarded tool.
    fn clear_all(&self) -> Result<(), SinkError>;
}
