//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Inkress API client
///
/// Calls the Inkress commerce API and signs or verifies webhook payloads.
#[derive(Debug, Parser)]
#[command(name = "inkress")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// API endpoint (scheme and host)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// API version path segment
    #[arg(long = "api-version", global = true)]
    pub api_version: Option<String>,

    /// Bearer token for the Authorization header
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Merchant client id sent as the Client-Id header
    #[arg(long = "client-id", global = true)]
    pub client_id: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Retries after the first attempt for transport and server errors
    #[arg(long, global = true)]
    pub retries: Option<u32>,

    /// HTTP headers in 'Key=Value' or 'Key: Value' format (can be specified multiple times)
    #[arg(long = "header", value_name = "K=V", global = true)]
    pub headers: Vec<String>,

    /// Webhook signing secret
    #[arg(long = "webhook-secret", global = true)]
    pub webhook_secret: Option<String>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for inkress
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = super::defaults::CONFIG_FILE)]
        output: PathBuf,
    },

    /// Print the signature header for a webhook payload file
    Sign {
        /// File holding the exact payload bytes
        payload: PathBuf,

        /// Unix timestamp to sign at (default: now)
        #[arg(long)]
        timestamp: Option<i64>,
    },

    /// Check a signature header against a webhook payload file
    Verify {
        /// File holding the exact payload bytes
        payload: PathBuf,

        /// Signature header value (`t=...,v1=...`)
        #[arg(long, short)]
        signature: String,

        /// Allowed clock skew in seconds
        #[arg(long)]
        tolerance: Option<u64>,
    },

    /// Send a GET request and print the JSON response
    Get {
        /// Path below the API base, e.g. `/merchants`
        path: String,

        /// Query parameters in 'Key=Value' format (can be specified multiple times)
        #[arg(long = "query", short, value_name = "K=V")]
        query: Vec<String>,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Command::Init { .. })
    }
}
