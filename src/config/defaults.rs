//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

pub use crate::client::{
    DEFAULT_API_VERSION as API_VERSION, DEFAULT_ENDPOINT as ENDPOINT, DEFAULT_TIMEOUT as TIMEOUT,
};
pub use crate::webhook::DEFAULT_TOLERANCE_SECS as WEBHOOK_TOLERANCE_SECS;

/// Default number of retries after the first attempt.
pub const RETRIES: u32 = crate::client::RetryPolicy::DEFAULT_MAX_RETRIES;

/// Default file name written by `inkress init`.
pub const CONFIG_FILE: &str = "inkress.toml";
