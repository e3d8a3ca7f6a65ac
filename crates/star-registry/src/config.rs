//! Registry configuration.

use std::time::Duration;

/// Default validity of a verification message: five minutes.
pub const DEFAULT_VALIDATION_WINDOW: Duration = Duration::from_secs(300);

/// Configuration for the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// How long after issuance a verification message may be submitted.
    /// A submission exactly at the limit is still accepted.
    pub validation_window: Duration,
}

impl RegistryConfig {
    pub fn with_validation_window(mut self, window: Duration) -> Self {
        self.validation_window = window;
        self
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            validation_window: DEFAULT_VALIDATION_WINDOW,
        }
    }
}
