//! API responses handed to the parser.
//!
//! [`Response`] is the status code and decoded body of a response produced
//! elsewhere. Sieve never performs requests itself.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use sieve_core::Response;
//!
//! let response = Response::new(422, json!({ "message": "Invalid email" }));
//! assert!(response.is_client_error());
//! ```

use serde_json::Value;
use tracing::debug;

use crate::{Error, Result, StatusClass};

/// Status code and body of an API response.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    status: Option<u16>,
    data: Value,
}

impl Response {
    /// Creates a new response.
    #[must_use]
    pub fn new(status: impl Into<Option<u16>>, data: Value) -> Self {
        Self {
            status: status.into(),
            data,
        }
    }

    /// Creates a response whose status is unknown.
    #[must_use]
    pub fn unknown(data: Value) -> Self {
        Self { status: None, data }
    }

    /// Creates a response from a raw body.
    ///
    /// A body that is not valid JSON is kept as [`Value::Null`], i.e. a body
    /// carrying no error information.
    #[must_use]
    pub fn from_slice(status: impl Into<Option<u16>>, body: &[u8]) -> Self {
        let status = status.into();
        let data = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(body).unwrap_or_else(|err| {
                debug!(?status, error = %err, "response body is not JSON, ignoring it");
                Value::Null
            })
        };
        Self { status, data }
    }

    /// Creates a response from a raw body that must be valid JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::JsonDeserialization`] with the path of the failure.
    pub fn from_json(status: impl Into<Option<u16>>, body: &[u8]) -> Result<Self> {
        let mut deserializer = serde_json::Deserializer::from_slice(body);
        let data: Value = serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
            Error::json_deserialization(e.path().to_string(), e.inner().to_string())
        })?;
        deserializer
            .end()
            .map_err(|e| Error::json_deserialization(".", e.to_string()))?;
        Ok(Self::new(status, data))
    }

    /// HTTP status code, if known.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        self.status
    }

    /// Class of the status, if known.
    #[must_use]
    pub fn status_class(&self) -> Option<StatusClass> {
        self.status.map(StatusClass::of)
    }

    /// Response body.
    #[must_use]
    pub const fn data(&self) -> &Value {
        &self.data
    }

    /// Consume into body.
    #[must_use]
    pub fn into_data(self) -> Value {
        self.data
    }

    /// Status is 2xx.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status_class() == Some(StatusClass::SUCCESS)
    }

    /// Status is 4xx.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status_class() == Some(StatusClass::CLIENT_ERROR)
    }

    /// Status is 5xx.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status_class() == Some(StatusClass::SERVER_ERROR)
    }
}

impl<B: AsRef<[u8]>> From<http::Response<B>> for Response {
    fn from(response: http::Response<B>) -> Self {
        Self::from_slice(response.status().as_u16(), response.body().as_ref())
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};
    use bytes::Bytes;
    use serde_json::json;

    use super::*;

    #[test]
    fn response_basic() {
        let response = Response::new(404, json!({ "message": "Not found" }));

        check!(response.status() == Some(404));
        check!(response.status_class() == Some(StatusClass::CLIENT_ERROR));
        check!(response.data() == &json!({ "message": "Not found" }));
        check!(response.is_client_error());
        check!(!response.is_success());
        check!(!response.is_server_error());
    }

    #[test]
    fn response_unknown_status() {
        let response = Response::unknown(json!({}));
        check!(response.status().is_none());
        check!(response.status_class().is_none());
        check!(!response.is_success());

        check!(Response::new(None, json!({})) == response);
    }

    #[test]
    fn response_status_checks() {
        check!(Response::new(201, Value::Null).is_success());
        check!(Response::new(503, Value::Null).is_server_error());
        check!(!Response::new(302, Value::Null).is_client_error());
    }

    #[test]
    fn from_slice_parses_json() {
        let response = Response::from_slice(422, br#"{"errors":{"email":"Required"}}"#);
        check!(response.data() == &json!({ "errors": { "email": "Required" } }));
    }

    #[test]
    fn from_slice_ignores_invalid_json() {
        let response = Response::from_slice(500, b"<html>Bad Gateway</html>");
        check!(response.status() == Some(500));
        check!(response.data().is_null());

        check!(Response::from_slice(204, b"").data().is_null());
    }

    #[test]
    fn from_json_reports_path() {
        let_assert!(Ok(response) = Response::from_json(400, br#"{"message":"Bad"}"#));
        check!(response.into_data() == json!({ "message": "Bad" }));

        let result = Response::from_json(400, b"not json");
        let_assert!(Err(Error::JsonDeserialization { .. }) = result);

        let result = Response::from_json(400, br#"{"errors":{"email":["Required",}}"#);
        let_assert!(Err(Error::JsonDeserialization { path, .. }) = result);
        check!(path.contains("errors"));
    }

    #[test]
    fn from_json_rejects_trailing_data() {
        let result = Response::from_json(400, b"{} {}");
        let_assert!(Err(Error::JsonDeserialization { .. }) = result);
    }

    #[test]
    fn from_http_response() {
        let response = http::Response::builder()
            .status(422)
            .body(Bytes::from_static(br#"{"message":"Invalid"}"#))
            .expect("response");

        let response = Response::from(response);
        check!(response.status() == Some(422));
        check!(response.data() == &json!({ "message": "Invalid" }));
    }
}
