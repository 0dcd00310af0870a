//! Query string encoding.

use serde::Serialize;
use serde_json::Value;

use super::ApiError;

/// Encodes `params` as an `application/x-www-form-urlencoded` query string.
///
/// `params` must serialize to a map (a struct or map type) or to `null`.
/// Entries whose value is `null` (including `None` fields) are omitted
/// rather than sent as empty strings. Strings are sent verbatim, numbers
/// and booleans in their display form, and nested arrays or objects as
/// compact JSON.
///
/// Returns `Ok(None)` when nothing remains to encode.
///
/// # Errors
///
/// Returns an [`ErrorKind::InvalidRequest`](super::ErrorKind::InvalidRequest)
/// error if `params` does not serialize to a map.
///
/// # Example
///
/// ```
/// use inkress::client::query_string;
/// use serde_json::json;
///
/// let query = query_string(&json!({ "a": 1, "b": null })).unwrap();
/// assert_eq!(query.as_deref(), Some("a=1"));
/// ```
pub fn query_string<Q: Serialize + ?Sized>(params: &Q) -> Result<Option<String>, ApiError> {
    let value = serde_json::to_value(params)
        .map_err(|e| ApiError::invalid_request(format!("Invalid query parameters: {e}")))?;

    let map = match value {
        Value::Null => return Ok(None),
        Value::Object(map) => map,
        other => {
            return Err(ApiError::invalid_request(format!(
                "Query parameters must be a map, got {other}"
            )));
        }
    };

    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    let mut appended = false;

    for (key, value) in &map {
        let rendered = match value {
            Value::Null => continue,
            Value::String(s) => s.clone(),
            Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => {
                value.to_string()
            }
        };
        serializer.append_pair(key, &rendered);
        appended = true;
    }

    Ok(appended.then(|| serializer.finish()))
}
