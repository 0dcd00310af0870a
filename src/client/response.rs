//! The API response envelope.

use serde::{Deserialize, Serialize};

/// Outcome flag carried by every API response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseState {
    /// The call succeeded.
    #[default]
    Ok,
    /// The server reported an application-level error.
    Error,
}

/// `{ "state": "ok" | "error", "data"?, "result"? }`
///
/// Some endpoints place their payload in `result` instead of `data`; use
/// [`ApiResponse::into_payload`] to take whichever is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Outcome flag
    #[serde(default)]
    pub state: ResponseState,

    /// Primary payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Alternate payload slot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl<T> ApiResponse<T> {
    /// A successful response without payload (2xx with an empty body).
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            state: ResponseState::Ok,
            data: None,
            result: None,
        }
    }

    /// Returns true if `state` is `ok`.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.state == ResponseState::Ok
    }

    /// Returns `data`, falling back to `result`.
    #[must_use]
    pub fn into_payload(self) -> Option<T> {
        self.data.or(self.result)
    }
}
