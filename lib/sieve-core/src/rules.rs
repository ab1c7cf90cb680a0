//! Built-in rules, one per status class.

use serde_json::Value;

use crate::payload::ErrorPayload;
use crate::{ErrorMap, Rule, RuleContext};

/// Rule for `2XX`: successful responses carry no errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct Success;

impl Rule for Success {
    fn apply(&self, _body: &Value, _ctx: &RuleContext<'_>) -> ErrorMap {
        ErrorMap::empty()
    }
}

/// Rule for `4XX`: field errors, then a message, then the fallback.
///
/// 1. `errors` as groups of messages: one generic entry, messages joined with `", "`.
/// 2. `errors` as messages per field: one entry per field, in field order.
/// 3. a non-empty `message`: one generic entry.
/// 4. otherwise the fallback errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientError;

impl Rule for ClientError {
    fn apply(&self, body: &Value, ctx: &RuleContext<'_>) -> ErrorMap {
        let ErrorPayload { errors, message } = ErrorPayload::from_body(body);

        if let Some(errors) = errors {
            return errors.normalize();
        }

        message.map_or_else(|| ctx.fallback(), ErrorMap::generic)
    }
}

/// Rule for `5XX`: server errors are never trusted, always the fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerError;

impl Rule for ServerError {
    fn apply(&self, _body: &Value, ctx: &RuleContext<'_>) -> ErrorMap {
        ctx.fallback()
    }
}

/// Rule applied when nothing else matches.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fallback;

impl Rule for Fallback {
    fn apply(&self, _body: &Value, ctx: &RuleContext<'_>) -> ErrorMap {
        ctx.fallback()
    }
}
