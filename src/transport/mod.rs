//! HTTP transport layer.
//!
//! This module provides the byte-moving boundary used by the API client:
//! - Request/response values ([`HttpRequest`], [`HttpResponse`])
//! - The transport abstraction ([`HttpClient`])
//! - The production transport ([`ReqwestClient`])
//! - Transport failures ([`HttpError`])

mod client;
mod error;
mod message;


pub use client::ReqwestClient;
pub use error::HttpError;
pub(crate) use message::overlay_headers;
pub use message::{HttpClient, HttpRequest, HttpResponse};
