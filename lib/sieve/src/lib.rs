//! Normalize heterogeneous HTTP error response bodies into a uniform error map.
//!
//! Backends report errors in many shapes: a `message`, groups of messages,
//! messages per field. [`ResponseParser`] picks a rule from the response
//! status (exact status first, then status class, then a fallback message)
//! and turns the body into an [`ErrorMap`].
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use sieve::prelude::*;
//!
//! let parser = ResponseParser::new();
//!
//! let response = Response::new(422, json!({
//!     "errors": { "email": ["Required", "Must be an email"], "name": "Too short" }
//! }));
//! let errors = parser.get_errors(&response).expect("a response");
//! assert_eq!(errors.field("email"), Some("Required, Must be an email"));
//! assert_eq!(errors.field("name"), Some("Too short"));
//!
//! let response = Response::new(503, json!({ "message": "upstream timed out" }));
//! let errors = parser.get_errors(&response).expect("a response");
//! assert_eq!(errors.generic_message(), Some("Something went wrong, sorry about that"));
//! ```
//!
//! Rules for specific statuses are declared with [`error_rules`]:
//!
//! ```
//! use serde_json::{Value, json};
//! use sieve::prelude::*;
//!
//! struct ShopRules;
//!
//! #[error_rules]
//! impl ShopRules {
//!     fn errors_for_404(&self) -> ErrorMap {
//!         ErrorMap::generic("This product does not exist")
//!     }
//!
//!     #[rule("409")]
//!     fn conflict(&self, body: &Value, ctx: &RuleContext<'_>) -> ErrorMap {
//!         body.get("reason")
//!             .and_then(Value::as_str)
//!             .map_or_else(|| ctx.fallback(), ErrorMap::generic)
//!     }
//! }
//!
//! let parser = ResponseParser::builder().rules(ShopRules).build();
//! let errors = parser.errors_for(&Response::new(404, json!({ "message": "Not Found" })));
//! assert_eq!(errors.generic_message(), Some("This product does not exist"));
//! ```

mod config;
mod parser;
pub mod prelude;

pub use config::{ParserConfig, ParserConfigBuilder};
pub use parser::{ResponseParser, ResponseParserBuilder};

// Re-export core types
pub use sieve_core::{
    DEFAULT_FALLBACK_ERROR_MESSAGE, ERRORS_FIELD, Error, ErrorEntries, ErrorMap, ErrorPayload,
    ErrorsShape, FieldMessages, GENERIC_KEY, MESSAGE_FIELD, MESSAGE_SEPARATOR, Response, Result,
    Rule, RuleContext, RuleKey, RuleRegistry, RuleSet, StatusClass, rules,
};

// Re-export crates for macro-generated code
pub use serde_json;

// Re-export macros
pub use sieve_macro::error_rules;
