//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use http::HeaderMap;
use http::header::{HeaderName, HeaderValue};
use url::Url;

use crate::client::ClientConfig;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// Credentials stay optional here: which ones are required depends on the
/// command, so [`client_config`](Self::client_config) and
/// [`webhook_secret`](Self::webhook_secret) report them as missing.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
pub struct ValidatedConfig {
    /// API endpoint
    pub endpoint: Url,

    /// API version path segment
    pub api_version: String,

    /// Bearer token, if any source provided one
    pub bearer_token: Option<String>,

    /// Merchant client id
    pub client_id: Option<String>,

    /// Request timeout
    pub timeout: Duration,

    /// Retries after the first attempt
    pub retries: u32,

    /// Extra HTTP headers
    pub headers: HeaderMap,

    /// Webhook signing secret, if any source provided one
    pub webhook_secret: Option<String>,

    /// Allowed webhook clock skew in seconds
    pub webhook_tolerance: u64,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Debug for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedConfig")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_version", &self.api_version)
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "<redacted>"))
            .field("client_id", &self.client_id)
            .field("timeout", &self.timeout)
            .field("retries", &self.retries)
            .field("headers", &self.headers.len())
            .field("webhook_secret", &self.webhook_secret.as_ref().map(|_| "<redacted>"))
            .field("webhook_tolerance", &self.webhook_tolerance)
            .field("verbose", &self.verbose)
            .finish()
    }
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ endpoint: {}, api_version: {}, client_id: {}, timeout: {}s, retries: {}, \
             headers: {}, token: {}, webhook_tolerance: {}s }}",
            self.endpoint,
            self.api_version,
            self.client_id.as_deref().unwrap_or("none"),
            self.timeout.as_secs(),
            self.retries,
            self.headers.len(),
            if self.bearer_token.is_some() { "set" } else { "unset" },
            self.webhook_tolerance,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The endpoint is not an absolute http(s) URL
    /// - The timeout is zero
    /// - Header format is invalid
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let api = toml.map(|t| &t.api);
        let webhook = toml.map(|t| &t.webhook);

        let endpoint = Self::resolve_endpoint(cli, toml)?;

        // Priority: CLI explicit > TOML > default
        let api_version = cli
            .api_version
            .clone()
            .or_else(|| api.and_then(|a| a.version.clone()))
            .unwrap_or_else(|| defaults::API_VERSION.to_string());

        let bearer_token = cli
            .token
            .clone()
            .or_else(|| api.and_then(|a| a.token.clone()))
            .filter(|t| !t.is_empty());

        let client_id = cli
            .client_id
            .clone()
            .or_else(|| api.and_then(|a| a.client_id.clone()))
            .filter(|id| !id.is_empty());

        let timeout = Self::resolve_timeout(cli, toml)?;

        let retries = cli
            .retries
            .or_else(|| api.and_then(|a| a.retries))
            .unwrap_or(defaults::RETRIES);

        let headers = Self::resolve_headers(cli, toml)?;

        let webhook_secret = cli
            .webhook_secret
            .clone()
            .or_else(|| webhook.and_then(|w| w.secret.clone()))
            .filter(|s| !s.is_empty());

        let webhook_tolerance = webhook
            .and_then(|w| w.tolerance)
            .unwrap_or(defaults::WEBHOOK_TOLERANCE_SECS);

        Ok(Self {
            endpoint,
            api_version,
            bearer_token,
            client_id,
            timeout,
            retries,
            headers,
            webhook_secret,
            webhook_tolerance,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    /// Builds the API client configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequired`] if no bearer token was given.
    pub fn client_config(&self) -> Result<ClientConfig, ConfigError> {
        let token = self.bearer_token.as_deref().ok_or_else(|| {
            ConfigError::missing(field::BEARER_TOKEN, "Use --token or set api.token in config file")
        })?;

        let mut config = ClientConfig::new(token)
            .with_endpoint(self.endpoint.as_str())
            .with_api_version(self.api_version.clone())
            .with_timeout(self.timeout)
            .with_retries(self.retries)
            .with_headers(self.headers.clone());
        if let Some(ref client_id) = self.client_id {
            config = config.with_client_id(client_id.clone());
        }
        Ok(config)
    }

    /// Returns the webhook signing secret.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequired`] if no secret was given.
    pub fn webhook_secret(&self) -> Result<&str, ConfigError> {
        self.webhook_secret.as_deref().ok_or_else(|| {
            ConfigError::missing(
                field::WEBHOOK_SECRET,
                "Use --webhook-secret or set webhook.secret in config file",
            )
        })
    }

    fn resolve_endpoint(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Url, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let endpoint_str = cli
            .endpoint
            .as_deref()
            .or_else(|| toml.and_then(|t| t.api.endpoint.as_deref()))
            .unwrap_or(defaults::ENDPOINT);

        let url = Url::parse(endpoint_str).map_err(|e| ConfigError::InvalidUrl {
            url: endpoint_str.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                url: endpoint_str.to_string(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        Ok(url)
    }

    fn resolve_timeout(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Duration, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let seconds = cli
            .timeout
            .or_else(|| toml.and_then(|t| t.api.timeout))
            .unwrap_or_else(|| defaults::TIMEOUT.as_secs());

        if seconds == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "timeout",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Duration::from_secs(seconds))
    }

    fn resolve_headers(cli: &Cli, toml: Option<&TomlConfig>) -> Result<HeaderMap, ConfigError> {
        let mut headers = HeaderMap::new();

        // Add TOML headers first (CLI can override)
        if let Some(toml) = toml {
            for (name, value) in &toml.api.headers {
                let header_name = parse_header_name(name)?;
                let header_value = parse_header_value(name, value)?;
                headers.insert(header_name, header_value);
            }
        }

        // Add CLI headers (override TOML)
        for header_str in &cli.headers {
            let (name, value) = parse_header_string(header_str)?;
            let header_name = parse_header_name(&name)?;
            let header_value = parse_header_value(&name, &value)?;
            headers.insert(header_name, header_value);
        }

        Ok(headers)
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Parses `Key=Value` query arguments into ordered pairs.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidQuery`] for an argument without `=` or
/// with an empty key.
pub fn parse_query_pairs(args: &[String]) -> Result<Vec<(String, String)>, ConfigError> {
    args.iter()
        .map(|arg| match arg.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                Ok((key.trim().to_string(), value.to_string()))
            }
            _ => Err(ConfigError::InvalidQuery { value: arg.clone() }),
        })
        .collect()
}

// Helper functions

fn parse_header_string(s: &str) -> Result<(String, String), ConfigError> {
    // Try "Key=Value" format first
    if let Some((name, value)) = s.split_once('=') {
        return Ok((name.trim().to_string(), value.trim().to_string()));
    }

    // Try "Key: Value" format
    if let Some((name, value)) = s.split_once(':') {
        return Ok((name.trim().to_string(), value.trim().to_string()));
    }

    Err(ConfigError::InvalidHeader {
        value: s.to_string(),
    })
}

fn parse_header_name(name: &str) -> Result<HeaderName, ConfigError> {
    name.parse::<HeaderName>()
        .map_err(|e| ConfigError::InvalidHeaderName {
            name: name.to_string(),
            reason: e.to_string(),
        })
}

fn parse_header_value(name: &str, value: &str) -> Result<HeaderValue, ConfigError> {
    HeaderValue::from_str(value).map_err(|e| ConfigError::InvalidHeaderValue {
        name: name.to_string(),
        reason: e.to_string(),
    })
}
