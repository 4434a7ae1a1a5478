//! Engine configuration.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use pagehands_protocols::ToolDescriptor;

/// Callback fired once per successfully registered tool.
pub type ToolCallback = Arc<dyn Fn(&ToolDescriptor) + Send + Sync>;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `max_tools` must be positive; a zero-capacity registry can never
    /// register anything.
    #[error("max_tools must be positive")]
    InvalidCapacity,
}

/// Engine configuration.
#[derive(Clone)]
pub struct EngineConfig {
    /// Prefix prepended (underscore-joined) to every generated tool name.
    pub prefix: String,

    /// Elements matching or nested inside any of these selectors are skipped.
    pub exclude: Vec<String>,

    /// Extra selectors scanned in the final phase, classified by tag.
    pub include: Vec<String>,

    /// Registry capacity. Registrations past this count are dropped.
    pub max_tools: usize,

    /// Whether structural changes trigger debounced re-scans.
    pub watch: bool,

    /// Raises per-element skip diagnostics from trace to debug level.
    pub debug: bool,

    /// Quiet period after the last structural-change signal before a re-scan.
    pub debounce: Duration,

    /// Invoked for each tool after it is stored and forwarded.
    pub on_tool_registered: Option<ToolCallback>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            exclude: Vec::new(),
            include: Vec::new(),
            max_tools: 50,
            watch: true,
            debug: false,
            debounce: Duration::from_millis(500),
            on_tool_registered: None,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_tools == 0 {
            return Err(ConfigError::InvalidCapacity);
        }
        Ok(())
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_exclude(mut self, selectors: Vec<String>) -> Self {
        self.exclude = selectors;
        self
    }

    pub fn with_include(mut self, selectors: Vec<String>) -> Self {
        self.include = selectors;
        self
    }

    pub fn with_max_tools(mut self, max_tools: usize) -> Self {
        self.max_tools = max_tools;
        self
    }

    pub fn with_watch(mut self, watch: bool) -> Self {
        self.watch = watch;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_on_tool_registered(mut self, callback: ToolCallback) -> Self {
        self.on_tool_registered = Some(callback);
        self
    }
}

impl fmt::Debug for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineConfig")
            .field("prefix", &self.prefix)
            .field("exclude", &self.exclude)
            .field("include", &self.include)
            .field("max_tools", &self.max_tools)
            .field("watch", &self.watch)
            .field("debug", &self.debug)
            .field("debounce", &self.debounce)
            .field("on_tool_registered", &self.on_tool_registered.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.max_tools, 50);
        assert!(config.watch);
        assert!(!config.debug);
        assert_eq!(config.debounce, Duration::from_millis(500));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let config = EngineConfig::default().with_max_tools(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidCapacity)
        ));
    }

    #[test]
    fn test_builder_chain() {
        let config = EngineConfig::default()
            .with_prefix("shop")
            .with_exclude(vec![".admin".to_string()])
            .with_max_tools(5)
            .with_watch(false);
        assert_eq!(config.prefix, "shop");
        assert_eq!(config.exclude, vec![".admin".to_string()]);
        assert_eq!(config.max_tools, 5);
        assert!(!config.watch);
    }
}
