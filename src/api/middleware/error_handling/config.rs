use serde::{Deserialize, Serialize};

/// Error handling configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorHandlingConfig {
    /// Substring of a body parser diagnostic that marks the body as invalid JSON.
    /// An empty trigger disables the JSON-specific message.
    pub malformed_body_trigger: String,
}

impl Default for ErrorHandlingConfig {
    fn default() -> Self {
        Self {
            malformed_body_trigger: "JSON".to_string(),
        }
    }
}

impl ErrorHandlingConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the malformed-body trigger
    pub fn with_malformed_body_trigger(mut self, trigger: impl Into<String>) -> Self {
        self.malformed_body_trigger = trigger.into();
        self
    }
}
