//! Client configuration

/// Default indicator API base URL (Chilean economic indicators).
pub const DEFAULT_INDICATORS_URL: &str = "https://mindicador.cl/api";

/// Configuration for connecting to the SIGA backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL (e.g., "https://api.siga.example")
    pub base_url: String,

    /// Indicator API base URL
    pub indicators_url: String,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    /// Create a new configuration with default timeout and indicator URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            indicators_url: DEFAULT_INDICATORS_URL.to_string(),
            timeout: 30,
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the indicator API base URL
    pub fn with_indicators_url(mut self, url: impl Into<String>) -> Self {
        self.indicators_url = url.into();
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:3000")
    }
}
