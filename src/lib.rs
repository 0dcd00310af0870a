//! Inkress: client library for the Inkress commerce API
//!
//! A library for calling the authenticated REST API with timeouts,
//! retries and normalized errors, and for signing and verifying
//! webhook deliveries.

pub mod client;
pub mod config;
pub mod resources;
pub mod time;
pub mod transport;
pub mod webhook;

pub use resources::Inkress;
