//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// API client section
    #[serde(default)]
    pub api: ApiSection,

    /// Webhook verification section
    #[serde(default)]
    pub webhook: WebhookSection,
}

/// API client section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiSection {
    /// API endpoint (scheme and host)
    pub endpoint: Option<String>,

    /// API version path segment
    pub version: Option<String>,

    /// Bearer token
    pub token: Option<String>,

    /// Merchant client id
    pub client_id: Option<String>,

    /// Request timeout in seconds
    pub timeout: Option<u64>,

    /// Retries after the first attempt
    pub retries: Option<u32>,

    /// Extra HTTP headers as key-value pairs
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

/// Webhook verification section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebhookSection {
    /// Signing secret
    pub secret: Option<String>,

    /// Allowed clock skew in seconds
    pub tolerance: Option<u64>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# Inkress Configuration File

[api]
# API endpoint (default: https://api.inkress.com)
# endpoint = "https://api.inkress.com"

# API version (default: v1)
# version = "v1"

# Bearer token (required for API calls, can be overridden by --token)
# token = "your-token-here"

# Merchant client id, sent as the Client-Id header
# client_id = "m-your-merchant"

# Request timeout in seconds (default: 30)
# timeout = 30

# Retries after the first attempt, for transport and 5xx errors (default: 3)
# Retry k waits k seconds.
# retries = 3

# Extra HTTP headers
# [api.headers]
# X-Custom-Header = "value"

[webhook]
# Signing secret (required for sign/verify)
# secret = "whsec_your-secret"

# Allowed clock skew in seconds (default: 300)
# tolerance = 300
"#
    .to_string()
}
