//! Request pipeline for the REST API.
//!
//! This module provides:
//! - Client configuration ([`ClientConfig`], [`ConfigUpdate`], [`PublicConfig`])
//! - Per-call options ([`RequestOptions`])
//! - Query encoding that drops null values ([`query_string`])
//! - Linear-backoff retries ([`RetryPolicy`])
//! - The response envelope ([`ApiResponse`])
//! - The single normalized error ([`ApiError`], [`ErrorKind`])
//! - The client itself ([`ApiClient`])

mod config;
mod error;
mod pipeline;
mod query;
mod request;
mod response;
mod retry;

#[cfg(test)]
mod pipeline_tests;
#[cfg(test)]
mod query_tests;

pub use config::{
    ClientConfig, ConfigUpdate, DEFAULT_API_VERSION, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT,
    PublicConfig,
};
pub use error::{ApiError, ErrorKind, IsRetryable};
pub use pipeline::{ApiClient, CLIENT_ID_HEADER};
pub use query::query_string;
pub use request::RequestOptions;
pub use response::{ApiResponse, ResponseState};
pub use retry::RetryPolicy;
