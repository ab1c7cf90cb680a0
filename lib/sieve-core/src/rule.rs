//! Extraction rules.
//!
//! A [`Rule`] turns a response body into an [`ErrorMap`]. Rules are
//! registered in a [`RuleRegistry`] under a [`RuleKey`](crate::RuleKey);
//! plain closures are rules too:
//!
//! ```
//! use serde_json::Value;
//! use sieve_core::{ErrorMap, RuleContext, RuleKey, RuleRegistry};
//!
//! let mut registry = RuleRegistry::with_defaults();
//! registry.insert(RuleKey::Exact(404), |_: &Value, _: &RuleContext<'_>| {
//!     ErrorMap::generic("Not found!")
//! });
//! ```

use std::sync::Arc;

use serde_json::Value;

use crate::{ErrorMap, RuleRegistry};

/// Information available to a rule besides the body.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    status: Option<u16>,
    fallback_error_message: &'a str,
}

impl<'a> RuleContext<'a> {
    /// Creates a new context.
    #[must_use]
    pub const fn new(status: Option<u16>, fallback_error_message: &'a str) -> Self {
        Self {
            status,
            fallback_error_message,
        }
    }

    /// Status of the response being parsed.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        self.status
    }

    /// Configured fallback message.
    #[must_use]
    pub const fn fallback_error_message(&self) -> &'a str {
        self.fallback_error_message
    }

    /// The fallback errors: the fallback message as a generic entry.
    #[must_use]
    pub fn fallback(&self) -> ErrorMap {
        ErrorMap::generic(self.fallback_error_message)
    }

    /// A generic error with the given message.
    #[must_use]
    pub fn generic(&self, message: impl Into<String>) -> ErrorMap {
        ErrorMap::generic(message)
    }
}

/// Extracts normalized errors from a response body.
///
/// Rules never fail: a body they cannot make sense of yields the fallback
/// errors (see [`RuleContext::fallback`]).
pub trait Rule: Send + Sync + 'static {
    /// Extract errors from the body.
    fn apply(&self, body: &Value, ctx: &RuleContext<'_>) -> ErrorMap;
}

impl<F> Rule for F
where
    F: Fn(&Value, &RuleContext<'_>) -> ErrorMap + Send + Sync + 'static,
{
    fn apply(&self, body: &Value, ctx: &RuleContext<'_>) -> ErrorMap {
        self(body, ctx)
    }
}

/// A bundle of rules that registers itself.
///
/// Usually implemented with the `#[error_rules]` attribute.
pub trait RuleSet: Send + Sync + 'static {
    /// Register every rule of the set, replacing rules with the same key.
    fn register(self: Arc<Self>, registry: &mut RuleRegistry);
}
