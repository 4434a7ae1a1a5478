//! Error taxonomy shared across the engine.

use thiserror::Error;

/// Errors raised by the local tool registry.
///
/// Both variants are recoverable: the orchestrator absorbs them and keeps
/// scanning. Nothing in the registration path propagates to `scan()` callers.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A tool with this name is already stored. First registration wins.
    #[error("tool already registered: {0}")]
    Duplicate(String),

    /// The registry holds `max_tools` entries; the registration was dropped.
    #[error("tool capacity reached ({0} tools)")]
    CapacityExceeded(usize),
}

/// Errors raised by a synthesized tool handler at invocation time.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The input payload did not have the expected shape.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A host element operation failed mid-invocation.
    #[error("handler execution failed: {0}")]
    ExecutionFailed(String),

    #[error(transparent)]
    Host(#[from] HostError),
}

/// Errors raised by the external registry sink.
///
/// Sink failures are logged and ignored; local registration still completes.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("sink registration failed: {0}")]
    RegistrationFailed(String),

    #[error("sink clear failed: {0}")]
    ClearFailed(String),
}

/// Errors raised by the host element capability surface.
#[derive(Debug, Error)]
pub enum HostError {
    /// The element handle no longer refers to a live element.
    #[error("element is detached from the document")]
    Detached,

    /// The host rejected the operation.
    #[error("host operation failed: {0}")]
    OperationFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_error_duplicate() {
        let err = RegistryError::Duplicate("search_form".to_string());
        assert!(err.to_string().contains("already registered"));
        assert!(err.to_string().contains("search_form"));
    }

    #[test]
    fn test_registry_error_capacity() {
        let err = RegistryError::CapacityExceeded(50);
        assert!(err.to_string().contains("capacity"));
        assert!(err.to_string().contains("50"));
    }

    #[test]
    fn test_handler_error_from_host() {
        let err: HandlerError = HostError::Detached.into();
        assert!(err.to_string().contains("detached"));
    }

    #[test]
    fn test_sink_error_display() {
        let err = SinkError::RegistrationFailed("connection lost".to_string());
        assert!(err.to_string().contains("connection lost"));
    }
}
