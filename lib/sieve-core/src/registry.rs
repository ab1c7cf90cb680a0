//! Rule registry.
//!
//! Maps [`RuleKey`]s to [`Rule`]s and resolves the rule for a status:
//! the exact status first, then its class.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::rules::{ClientError, ServerError, Success};
use crate::{Rule, RuleKey, RuleSet, StatusClass};

/// Rules by key.
#[derive(Clone, Default)]
pub struct RuleRegistry {
    rules: HashMap<RuleKey, Arc<dyn Rule>>,
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<String> = self.rules.keys().map(ToString::to_string).collect();
        keys.sort();
        f.debug_struct("RuleRegistry").field("keys", &keys).finish()
    }
}

impl RuleRegistry {
    /// An empty registry: every status resolves to the fallback.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the built-in `2XX`, `4XX` and `5XX` rules.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.insert(StatusClass::SUCCESS, Success);
        registry.insert(StatusClass::CLIENT_ERROR, ClientError);
        registry.insert(StatusClass::SERVER_ERROR, ServerError);
        registry
    }

    /// Register a rule, returning the rule it replaces.
    pub fn insert(&mut self, key: impl Into<RuleKey>, rule: impl Rule) -> Option<Arc<dyn Rule>> {
        self.insert_arc(key, Arc::new(rule))
    }

    /// Register a shared rule, returning the rule it replaces.
    pub fn insert_arc(
        &mut self,
        key: impl Into<RuleKey>,
        rule: Arc<dyn Rule>,
    ) -> Option<Arc<dyn Rule>> {
        self.rules.insert(key.into(), rule)
    }

    /// Register every rule of a set.
    pub fn extend<S: RuleSet>(&mut self, rules: S) {
        Arc::new(rules).register(self);
    }

    /// Register every rule of another registry, replacing rules with the same key.
    pub fn merge(&mut self, other: Self) {
        self.rules.extend(other.rules);
    }

    /// Rule registered under a key.
    #[must_use]
    pub fn get(&self, key: RuleKey) -> Option<&dyn Rule> {
        self.rules.get(&key).map(AsRef::as_ref)
    }

    /// Returns `true` if a rule is registered under the key.
    #[must_use]
    pub fn contains(&self, key: RuleKey) -> bool {
        self.rules.contains_key(&key)
    }

    /// Registered keys, in no particular order.
    #[must_use]
    pub fn keys(&self) -> impl Iterator<Item = RuleKey> + '_ {
        self.rules.keys().copied()
    }

    /// Number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if no rule is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rule for a status: exact status first, then status class.
    ///
    /// A missing status only matches [`RuleKey::Unknown`]. Returns `None`
    /// when the fallback applies.
    #[must_use]
    pub fn resolve(&self, status: Option<u16>) -> Option<(RuleKey, &dyn Rule)> {
        RuleKey::candidates(status)
            .into_iter()
            .find_map(|key| self.get(key).map(|rule| (key, rule)))
    }
}
