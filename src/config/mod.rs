//! Configuration layer for the `inkress` binary.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! The library itself never reads configuration from the environment or the
//! filesystem; it takes an explicit [`ClientConfig`](crate::client::ClientConfig).
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! Headers from the CLI are layered over `[api.headers]`: a CLI header
//! replaces a TOML header of the same name, other TOML headers are kept.
//!
//! # Required Fields
//!
//! Nothing is required to load a configuration. The bearer token is only
//! required to build a [`ClientConfig`](crate::client::ClientConfig) and the
//! webhook secret only by the `sign` and `verify` commands.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;


pub use cli::{Cli, Command};
pub use error::{ConfigError, field};
pub use toml::{ApiSection, TomlConfig, WebhookSection, default_config_template};
pub use validated::{ValidatedConfig, parse_query_pairs, write_default_config};
