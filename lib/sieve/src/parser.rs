//! Response parser: picks the rule for a response and applies it.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::config::{ParserConfig, ParserConfigBuilder};
use crate::rules::Fallback;
use crate::{Error, ErrorMap, Response, Result, Rule, RuleContext, RuleKey, RuleRegistry, RuleSet};

/// Extracts normalized errors from API responses.
///
/// The rule for a response is, in order: the rule registered for its exact
/// status, the rule registered for its status class, the fallback. The
/// parser never changes once built and is cheap to clone.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use sieve::{ErrorMap, Response, ResponseParser, RuleContext, RuleKey};
///
/// let parser = ResponseParser::builder()
///     .fallback_error_message("Please try again later")
///     .rule(RuleKey::Exact(404), |_: &serde_json::Value, _: &RuleContext<'_>| {
///         ErrorMap::generic("Not found!")
///     })
///     .build();
///
/// let response = Response::new(422, json!({ "errors": { "email": ["Required"] } }));
/// let errors = parser.get_errors(&response).expect("a response");
/// assert_eq!(errors.field("email"), Some("Required"));
///
/// let response = Response::new(404, json!({}));
/// assert!(parser.throw_errors(&response).is_err());
/// ```
#[derive(Clone)]
pub struct ResponseParser {
    config: Arc<ParserConfig>,
    registry: Arc<RuleRegistry>,
}

impl std::fmt::Debug for ResponseParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseParser")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .finish()
    }
}

impl ResponseParser {
    /// Create a new parser with default configuration and built-in rules.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    /// Create a new parser with custom configuration and built-in rules.
    #[must_use]
    pub fn with_config(config: ParserConfig) -> Self {
        Self::from_parts(config, RuleRegistry::with_defaults())
    }

    fn from_parts(config: ParserConfig, registry: RuleRegistry) -> Self {
        Self {
            config: Arc::new(config),
            registry: Arc::new(registry),
        }
    }

    /// Create a new parser builder.
    #[must_use]
    pub fn builder() -> ResponseParserBuilder {
        ResponseParserBuilder::default()
    }

    /// Get the parser configuration.
    #[must_use]
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Get the registered rules.
    #[must_use]
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Errors reported by a response.
    ///
    /// Returns `None` only when there is no response. Never fails: whatever
    /// cannot be extracted degrades to the fallback message.
    pub fn get_errors<'a>(&self, response: impl Into<Option<&'a Response>>) -> Option<ErrorMap> {
        response.into().map(|response| self.errors_for(response))
    }

    /// Errors reported by a response, resolving its rule.
    #[must_use]
    pub fn errors_for(&self, response: &Response) -> ErrorMap {
        let status = response.status();
        let ctx = RuleContext::new(status, &self.config.fallback_error_message);

        if let Some((key, rule)) = self.registry.resolve(status) {
            debug!(?status, rule = %key, "resolved error rule");
            rule.apply(response.data(), &ctx)
        } else {
            trace!(?status, "no error rule matches, using fallback");
            Fallback.apply(response.data(), &ctx)
        }
    }

    /// Fail with the errors reported by a response, if any.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] carrying the errors when the response reports
    /// at least one. A missing response or one without errors (`2XX`) is `Ok`.
    pub fn throw_errors<'a>(&self, response: impl Into<Option<&'a Response>>) -> Result<()> {
        let Some(response) = response.into() else {
            return Ok(());
        };

        let errors = self.errors_for(response);
        if errors.is_empty() {
            return Ok(());
        }

        debug!(status = ?response.status(), %errors, "response reports errors");
        Err(Error::api(response.status(), errors))
    }
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`ResponseParser`].
///
/// Rules added to the builder are registered next to the built-in ones and
/// replace them when they share a key.
pub struct ResponseParserBuilder {
    config: ParserConfigBuilder,
    rules: RuleRegistry,
    use_defaults: bool,
}

impl Default for ResponseParserBuilder {
    fn default() -> Self {
        Self {
            config: ParserConfigBuilder::default(),
            rules: RuleRegistry::new(),
            use_defaults: true,
        }
    }
}

impl std::fmt::Debug for ResponseParserBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseParserBuilder")
            .field("config", &self.config)
            .field("rules", &self.rules)
            .field("use_defaults", &self.use_defaults)
            .finish()
    }
}

impl ResponseParserBuilder {
    // ========================================================================
    // Configuration
    // ========================================================================

    /// Replace the configuration.
    #[must_use]
    pub fn config(mut self, config: ParserConfig) -> Self {
        self.config = config.into();
        self
    }

    /// Set the fallback error message.
    #[must_use]
    pub fn fallback_error_message(mut self, message: impl Into<String>) -> Self {
        self.config = self.config.fallback_error_message(message);
        self
    }

    // ========================================================================
    // Rules
    // ========================================================================

    /// Register a rule for an exact status, a status class or [`RuleKey::Unknown`].
    #[must_use]
    pub fn rule(mut self, key: impl Into<RuleKey>, rule: impl Rule) -> Self {
        self.rules.insert(key, rule);
        self
    }

    /// Register every rule of a set, usually declared with `#[error_rules]`.
    #[must_use]
    pub fn rules<S: RuleSet>(mut self, rules: S) -> Self {
        self.rules.extend(rules);
        self
    }

    // ========================================================================
    // Defaults Control
    // ========================================================================

    /// Keep the built-in `2XX`, `4XX` and `5XX` rules (the default).
    #[must_use]
    pub fn with_defaults(mut self) -> Self {
        self.use_defaults = true;
        self
    }

    /// Drop the built-in rules: only registered rules apply.
    #[must_use]
    pub fn without_defaults(mut self) -> Self {
        self.use_defaults = false;
        self
    }

    /// Build the parser.
    #[must_use]
    pub fn build(self) -> ResponseParser {
        let mut registry = if self.use_defaults {
            RuleRegistry::with_defaults()
        } else {
            RuleRegistry::new()
        };
        registry.merge(self.rules);

        ResponseParser::from_parts(self.config.build(), registry)
    }
}
