//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and macros
//! for easy glob importing:
//!
//! ```ignore
//! use sieve::prelude::*;
//! ```

pub use crate::{
    Error, ErrorMap, ParserConfig, Response, ResponseParser, Result, Rule, RuleContext, RuleKey,
    RuleRegistry, RuleSet, StatusClass, error_rules,
};
