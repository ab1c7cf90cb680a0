//! Procedural macros for sieve HTTP error normalization.
//!
//! This crate provides `#[error_rules]`, which turns an inherent impl block
//! into a `sieve::RuleSet`. A method becomes a rule when:
//! - it is annotated with `#[rule("404")]`, `#[rule("4XX")]` or `#[rule(unknown)]`, or
//! - its name follows the `errors_for_<key>` convention: `errors_for_404`,
//!   `errors_for_4xx`, `errors_for_unknown`.
//!
//! Other methods are left untouched.
//!
//! # Example
//!
//! ```ignore
//! use sieve::prelude::*;
//!
//! struct ShopRules;
//!
//! #[error_rules]
//! impl ShopRules {
//!     fn errors_for_404(&self) -> ErrorMap {
//!         ErrorMap::generic("This product does not exist")
//!     }
//! }
//!
//! let parser = ResponseParser::builder().rules(ShopRules).build();
//! ```

mod attrs;
mod expand;

use proc_macro::TokenStream;

/// Register the rule methods of an impl block as a `sieve::RuleSet`.
///
/// A rule method takes `&self` and, optionally, the response body
/// (`&serde_json::Value`) and the rule context (`&sieve::RuleContext<'_>`),
/// and returns a `sieve::ErrorMap`:
///
/// ```ignore
/// #[error_rules]
/// impl ShopRules {
///     // By name: exact status 404
///     fn errors_for_404(&self) -> ErrorMap {
///         ErrorMap::generic("Not found!")
///     }
///
///     // By attribute: any 4XX without a more specific rule
///     #[rule("4XX")]
///     fn client_error(&self, body: &Value, ctx: &RuleContext<'_>) -> ErrorMap {
///         ctx.fallback()
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn error_rules(attr: TokenStream, item: TokenStream) -> TokenStream {
    expand::expand_error_rules(attr.into(), item.into())
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
