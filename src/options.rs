//! Request options and transport configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::client::ClientError;

/// Default completion length used when the caller does not pick one.
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Default sampling temperature for free-form completions.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Temperature used for code generation and preset tasks.
pub const CODE_TEMPERATURE: f32 = 0.3;

/// A secret string type for sensitive data like API keys.
/// Prevents accidental logging or display of secrets.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretString(String);

impl SecretString {
    /// Create a new secret string.
    pub fn new(s: String) -> Self {
        Self(s)
    }

    /// Get the underlying secret value.
    pub fn expose_secret(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretString([REDACTED])")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s.to_string())
    }
}

/// Sampling parameters sent with every chat completion.
///
/// # Example
/// ```rust
/// use cerebras::options::ModelOptions;
///
/// let options = ModelOptions::default().with_temperature(0.3);
/// assert_eq!(options.max_tokens, 4096);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelOptions {
    /// Maximum tokens to generate
    pub max_tokens: u32,

    /// Temperature for sampling (0.0 - 2.0)
    pub temperature: f32,
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl ModelOptions {
    /// Set maximum tokens to generate.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Reject values the API would refuse anyway, before touching the network.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.max_tokens == 0 {
            return Err(ClientError::Config(
                "max_tokens must be a positive integer".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ClientError::Config(format!(
                "temperature must be within [0, 2], got {}",
                self.temperature
            )));
        }
        Ok(())
    }
}

/// HTTP-specific transport options.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// API key sent as a bearer token
    pub api_key: SecretString,

    /// Base URL for API endpoints, without a trailing slash
    pub base_url: String,

    /// Request timeout; `None` leaves reqwest's default in place
    pub timeout: Option<Duration>,
}

impl HttpTransport {
    /// Create new HTTP transport options.
    pub fn new(api_key: impl Into<SecretString>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: None,
        }
    }

    /// Set the timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
