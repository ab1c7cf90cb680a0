//! Attribute parsing for sieve proc-macros.

use proc_macro2::TokenStream;
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::{Ident, LitInt, LitStr};

/// Prefix of rule methods discovered by name, e.g. `errors_for_404`.
pub(crate) const RULE_METHOD_PREFIX: &str = "errors_for_";

/// Name of the method attribute naming the rule key explicitly.
pub(crate) const RULE_ATTR: &str = "rule";

/// Key a rule method is registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum RuleKeySpec {
    /// An exact status code, e.g. `404`.
    Exact(u16),
    /// A status class, e.g. `4XX`.
    Class(u16),
    /// Responses without a status.
    Unknown,
}

impl RuleKeySpec {
    /// Parse a key: `"404"`, `"4XX"` (any case) or `"unknown"`.
    /// Returns `None` for anything else.
    #[must_use]
    pub(crate) fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("unknown") || s.eq_ignore_ascii_case("null") {
            return Some(Self::Unknown);
        }

        let (digits, is_class) = match s.strip_suffix("XX").or_else(|| s.strip_suffix("xx")) {
            Some(digits) => (digits, true),
            None => (s, false),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let value = digits.parse().ok()?;

        Some(if is_class {
            Self::Class(value)
        } else {
            Self::Exact(value)
        })
    }

    /// Key from a method name following the `errors_for_<key>` convention.
    #[must_use]
    pub(crate) fn from_method_name(name: &str) -> Option<Self> {
        name.strip_prefix(RULE_METHOD_PREFIX).and_then(Self::parse)
    }

    /// Tokens building the matching `sieve::RuleKey`.
    pub(crate) fn to_tokens(self) -> TokenStream {
        match self {
            Self::Exact(code) => quote! { ::sieve::RuleKey::Exact(#code) },
            Self::Class(hundreds) => {
                quote! { ::sieve::RuleKey::Class(::sieve::StatusClass::new(#hundreds)) }
            }
            Self::Unknown => quote! { ::sieve::RuleKey::Unknown },
        }
    }
}

impl std::fmt::Display for RuleKeySpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact(code) => write!(f, "{code}"),
            Self::Class(hundreds) => write!(f, "{hundreds}XX"),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}

/// Arguments of `#[rule(...)]`: `"404"`, `404`, `"4XX"` or `unknown`.
#[derive(Debug)]
pub(crate) struct RuleAttr {
    pub(crate) key: RuleKeySpec,
}

impl Parse for RuleAttr {
    fn parse(input: ParseStream<'_>) -> syn::Result<Self> {
        let lookahead = input.lookahead1();
        let (raw, span) = if lookahead.peek(LitStr) {
            let lit: LitStr = input.parse()?;
            (lit.value(), lit.span())
        } else if lookahead.peek(LitInt) {
            let lit: LitInt = input.parse()?;
            (lit.base10_digits().to_string(), lit.span())
        } else if lookahead.peek(Ident) {
            let ident: Ident = input.parse()?;
            (ident.to_string(), ident.span())
        } else {
            return Err(lookahead.error());
        };

        let key = RuleKeySpec::parse(raw.trim()).ok_or_else(|| {
            syn::Error::new(
                span,
                format!(
                    "invalid rule key: \"{raw}\". Expected a status (\"404\"), a status class (\"4XX\") or \"unknown\""
                ),
            )
        })?;

        Ok(Self { key })
    }
}
