//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types
//! for easy glob importing:
//!
//! ```ignore
//! use sieve_core::prelude::*;
//! ```

pub use crate::{
    Error, ErrorMap, Response, Result, Rule, RuleContext, RuleKey, RuleRegistry, RuleSet,
    StatusClass,
};
