//! Parser configuration types.

use serde::Deserialize;

use crate::DEFAULT_FALLBACK_ERROR_MESSAGE;

/// Configuration for the response parser.
///
/// Can be loaded from any serde format:
///
/// ```
/// use sieve::ParserConfig;
///
/// let config: ParserConfig =
///     serde_json::from_str(r#"{ "fallbackErrorMessage": "Please try again" }"#)
///         .expect("config");
/// assert_eq!(config.fallback_error_message, "Please try again");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Message reported when no structured error can be extracted.
    #[serde(alias = "fallbackErrorMessage")]
    pub fallback_error_message: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            fallback_error_message: DEFAULT_FALLBACK_ERROR_MESSAGE.to_string(),
        }
    }
}

impl ParserConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> ParserConfigBuilder {
        ParserConfigBuilder::default()
    }
}

/// Builder for [`ParserConfig`].
#[derive(Debug, Clone, Default)]
pub struct ParserConfigBuilder {
    fallback_error_message: Option<String>,
}

impl ParserConfigBuilder {
    /// Set the fallback error message.
    #[must_use]
    pub fn fallback_error_message(mut self, message: impl Into<String>) -> Self {
        self.fallback_error_message = Some(message.into());
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> ParserConfig {
        let defaults = ParserConfig::default();
        ParserConfig {
            fallback_error_message: self
                .fallback_error_message
                .unwrap_or(defaults.fallback_error_message),
        }
    }
}

impl From<ParserConfig> for ParserConfigBuilder {
    fn from(config: ParserConfig) -> Self {
        Self {
            fallback_error_message: Some(config.fallback_error_message),
        }
    }
}
