//! Attribute-style view over the API's JSON envelope.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::error::ApiError;

/// A successful API response.
///
/// Wraps the full JSON object, including the `error` and `reason` fields, and
/// passes every endpoint-specific field through unmodified. Absent keys read
/// as `None` rather than failing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiResponse {
    fields: Map<String, Value>,
}

impl ApiResponse {
    /// Returns the raw value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Returns `key` as a string slice when it holds a JSON string.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// Returns `key` as an integer when it holds a JSON integer.
    #[must_use]
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.fields.get(key).and_then(Value::as_i64)
    }

    /// Returns `key` as a bool when it holds a JSON boolean.
    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.fields.get(key).and_then(Value::as_bool)
    }

    /// Returns true when `key` is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// The envelope's `error` code (0 on success).
    #[must_use]
    pub fn error_code(&self) -> i64 {
        self.get_i64("error").unwrap_or_default()
    }

    /// The envelope's `reason` string, when present.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        self.get_str("reason")
    }

    /// Borrows the underlying JSON object.
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Consumes the response, returning the underlying JSON object.
    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.fields
    }

    /// Deserializes the whole envelope into a typed struct.
    ///
    /// # Errors
    ///
    /// Returns the serde error when the envelope does not match `T`.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(Value::Object(self.fields.clone()))
    }
}

impl From<Map<String, Value>> for ApiResponse {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

/// Interprets a decoded response body as an API envelope.
///
/// # Errors
///
/// Returns [`ApiError::InvalidResponse`] when the body is not an object or has
/// no integer `error` field, and [`ApiError::Request`] when `error` is non-zero.
pub(crate) fn parse_envelope(url: &str, body: Value) -> Result<ApiResponse, ApiError> {
    let Value::Object(fields) = body else {
        return Err(ApiError::invalid_response(url, "expected a JSON object"));
    };
    let Some(code) = fields.get("error").and_then(Value::as_i64) else {
        return Err(ApiError::invalid_response(
            url,
            "missing integer `error` field",
        ));
    };
    if code != 0 {
        let reason = fields
            .get("reason")
            .and_then(Value::as_str)
            .unwrap_or_default();
        return Err(ApiError::request(code, reason));
    }
    Ok(ApiResponse { fields })
}
