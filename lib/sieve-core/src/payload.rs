//! Error payload shapes found in API response bodies.
//!
//! Backends report errors in a handful of conventions:
//!
//! ```json
//! { "message": "Something is very wrong." }
//! { "errors": [["Foo"], ["Bar"]] }
//! { "errors": { "email": "Required" } }
//! { "errors": { "email": ["Required", "Must be an email"] } }
//! ```
//!
//! [`ErrorPayload::from_body`] recognizes them. Anything else under `errors`
//! is ignored, never reported as a failure.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error_map::MESSAGE_SEPARATOR;
use crate::{Error, ErrorMap, Result};

/// Body field holding structured errors.
pub const ERRORS_FIELD: &str = "errors";

/// Body field holding a single message.
pub const MESSAGE_FIELD: &str = "message";

/// Recognized shapes of the `errors` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorsShape {
    /// Groups of messages not tied to any field: `[["Foo"], ["Bar"]]`.
    Nested(Vec<Vec<String>>),
    /// Messages per field: `{ "email": "Required" }` or `{ "email": ["Required"] }`.
    Fields(IndexMap<String, FieldMessages>),
}

/// Message(s) reported for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldMessages {
    /// A single message.
    One(String),
    /// Several messages, in reported order.
    Many(Vec<String>),
}

impl FieldMessages {
    /// Flatten into a single message.
    #[must_use]
    pub fn joined(self) -> String {
        match self {
            Self::One(message) => message,
            Self::Many(messages) => messages.join(MESSAGE_SEPARATOR),
        }
    }
}

impl ErrorsShape {
    /// Recognize the shape of an `errors` value.
    ///
    /// Returns `None` for `null` and for any unrecognized shape.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        if value.is_null() {
            return None;
        }

        match Self::parse(value) {
            Ok(shape) => Some(shape),
            Err(Error::JsonDeserialization { path, message }) => {
                debug!(%path, error = %message, "ignoring unrecognized errors payload");
                None
            }
            Err(err) => {
                debug!(error = %err, "ignoring unrecognized errors payload");
                None
            }
        }
    }

    /// Parse an `errors` value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::JsonDeserialization`] with the path of the first
    /// offending element, e.g. `email[1]` or `[1][0]`.
    pub fn parse(value: &Value) -> Result<Self> {
        match value {
            Value::Object(fields) => fields
                .iter()
                .map(|(field, messages)| {
                    field_messages(field, messages).map(|messages| (field.clone(), messages))
                })
                .collect::<Result<IndexMap<_, _>>>()
                .map(Self::Fields),
            _ => deserialize_messages(value, None).map(Self::Nested),
        }
    }

    /// Flatten into normalized errors.
    ///
    /// Nested groups become a single generic message. Fields keep their order
    /// and never produce a generic entry.
    #[must_use]
    pub fn normalize(self) -> ErrorMap {
        match self {
            Self::Nested(groups) => {
                let messages: Vec<String> = groups.into_iter().flatten().collect();
                ErrorMap::generic(messages.join(MESSAGE_SEPARATOR))
            }
            Self::Fields(fields) => fields
                .into_iter()
                .map(|(field, messages)| (Some(field), messages.joined()))
                .collect(),
        }
    }
}

fn field_messages(field: &str, messages: &Value) -> Result<FieldMessages> {
    match messages {
        Value::String(message) => Ok(FieldMessages::One(message.clone())),
        _ => deserialize_messages(messages, Some(field)).map(FieldMessages::Many),
    }
}

/// Deserialize messages, reporting failures under `field` when given.
///
/// Message lists are sequences, so inner paths start with an index.
fn deserialize_messages<T: DeserializeOwned>(value: &Value, field: Option<&str>) -> Result<T> {
    serde_path_to_error::deserialize(value).map_err(|err| {
        let inner = err.path().to_string();
        let path = match field {
            None => inner,
            Some(field) if inner == "." => field.to_string(),
            Some(field) => format!("{field}{inner}"),
        };
        Error::json_deserialization(path, err.inner().to_string())
    })
}

/// Error information carried by a response body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorPayload {
    /// Structured errors, if recognized.
    pub errors: Option<ErrorsShape>,
    /// Non-empty top-level message.
    pub message: Option<String>,
}

impl ErrorPayload {
    /// Extract error information from a body.
    ///
    /// A body that is not a JSON object carries nothing.
    #[must_use]
    pub fn from_body(body: &Value) -> Self {
        let Some(object) = body.as_object() else {
            return Self::default();
        };

        let errors = object.get(ERRORS_FIELD).and_then(ErrorsShape::from_value);
        let message = object
            .get(MESSAGE_FIELD)
            .and_then(Value::as_str)
            .filter(|message| !message.is_empty())
            .map(str::to_string);

        Self { errors, message }
    }

    /// Returns `true` if the body carries no usable error information.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.errors.is_none() && self.message.is_none()
    }
}
