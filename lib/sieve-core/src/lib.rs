//! Core types and rules for sieve HTTP error normalization.
//!
//! This crate provides the foundational types used by sieve:
//! - [`Response`] - status code and decoded body of an API response
//! - [`ErrorMap`] - immutable, ordered mapping of normalized error messages
//! - [`StatusClass`] and [`RuleKey`] - keys rules are registered under
//! - [`Rule`], [`RuleContext`] and [`RuleSet`] - extraction rules
//! - [`rules`] - built-in rules for `2XX`, `4XX` and `5XX`
//! - [`RuleRegistry`] - rules by key, with exact-then-class resolution
//! - [`ErrorPayload`] - recognized error payload shapes
//! - [`Error`] and [`Result`] - error handling

mod error;
mod error_map;
mod payload;
pub mod prelude;
mod registry;
mod response;
mod rule;
pub mod rules;
mod status;

pub use error::{Error, Result};
pub use error_map::{ErrorEntries, ErrorMap, GENERIC_KEY, MESSAGE_SEPARATOR};
pub use payload::{ERRORS_FIELD, ErrorPayload, ErrorsShape, FieldMessages, MESSAGE_FIELD};
pub use registry::RuleRegistry;
pub use response::Response;
pub use rule::{Rule, RuleContext, RuleSet};
pub use status::{RuleKey, StatusClass};

/// Message used when no structured error can be extracted.
pub const DEFAULT_FALLBACK_ERROR_MESSAGE: &str = "Something went wrong, sorry about that";
