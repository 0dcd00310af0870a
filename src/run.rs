//! Command execution.
//!
//! Each subcommand other than `init` runs here against a
//! [`ValidatedConfig`]. The functions return their output instead of
//! printing it, so they can be exercised with a mock transport.

use std::path::Path;

use serde_json::{Map, Value};
use thiserror::Error;

use inkress::client::{ApiClient, ApiError, ApiResponse};
use inkress::config::{Command, ConfigError, ValidatedConfig, parse_query_pairs};
use inkress::time::{Clock, SystemClock};
use inkress::transport::{HttpClient, ReqwestClient};
use inkress::webhook::{WebhookVerifier, sign};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The command needs configuration that is missing or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The API call failed.
    #[error(
        "API request failed (status {status}): {message}",
        status = .0.status(),
        message = .0.message()
    )]
    Api(#[from] ApiError),

    /// The signature did not verify.
    #[error("Signature verification failed")]
    SignatureInvalid,

    /// The response could not be rendered.
    #[error("Failed to render response: {0}")]
    Render(#[source] serde_json::Error),
}

impl RunError {
    /// Whether this is a configuration problem rather than a runtime failure.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

/// Runs `command` and prints its output to stdout.
///
/// # Errors
///
/// Returns the first failure of the command.
pub async fn execute(command: &Command, config: &ValidatedConfig) -> Result<(), RunError> {
    match command {
        Command::Init { .. } => Ok(()),
        Command::Sign { payload, timestamp } => {
            let timestamp = timestamp.unwrap_or_else(|| SystemClock.unix_seconds());
            println!("{}", sign_file(config, payload, timestamp)?);
            Ok(())
        }
        Command::Verify {
            payload,
            signature,
            tolerance,
        } => {
            verify_file(config, payload, signature, *tolerance, &SystemClock)?;
            println!("Signature valid");
            Ok(())
        }
        Command::Get { path, query } => {
            let response = get(ReqwestClient::new(), config, path, query).await?;
            let rendered = serde_json::to_string_pretty(&response).map_err(RunError::Render)?;
            println!("{rendered}");
            Ok(())
        }
    }
}

/// Produces the signature header for the bytes of `path`.
///
/// # Errors
///
/// Fails if the secret is missing or the file cannot be read.
pub fn sign_file(
    config: &ValidatedConfig,
    path: &Path,
    timestamp: i64,
) -> Result<String, RunError> {
    let secret = config.webhook_secret()?;
    let payload = read_payload(path)?;
    Ok(sign(&payload, secret.as_bytes(), timestamp).to_string())
}

/// Checks `signature` against the bytes of `path`.
///
/// `tolerance` overrides the configured tolerance when given.
///
/// # Errors
///
/// Returns [`RunError::SignatureInvalid`] if verification fails.
pub fn verify_file<C: Clock + Clone>(
    config: &ValidatedConfig,
    path: &Path,
    signature: &str,
    tolerance: Option<u64>,
    clock: &C,
) -> Result<(), RunError> {
    let secret = config.webhook_secret()?;
    let payload = read_payload(path)?;

    let verifier = WebhookVerifier::with_clock(secret, clock.clone())
        .with_tolerance(tolerance.unwrap_or(config.webhook_tolerance));

    if verifier.verify(&payload, signature) {
        Ok(())
    } else {
        Err(RunError::SignatureInvalid)
    }
}

/// Issues `GET <path>` with `query` (`Key=Value` strings) through the pipeline.
///
/// # Errors
///
/// Fails on missing credentials, malformed query arguments, or the
/// pipeline's final [`ApiError`].
pub async fn get<H: HttpClient>(
    transport: H,
    config: &ValidatedConfig,
    path: &str,
    query: &[String],
) -> Result<ApiResponse<Value>, RunError> {
    let client = ApiClient::new(transport, config.client_config()?);

    let params: Map<String, Value> = parse_query_pairs(query)?
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect();

    Ok(client.get_with_query(path, &params).await?)
}

fn read_payload(path: &Path) -> Result<Vec<u8>, ConfigError> {
    std::fs::read(path).map_err(|e| ConfigError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })
}
