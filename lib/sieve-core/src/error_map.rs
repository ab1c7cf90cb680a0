//! Normalized error messages.
//!
//! [`ErrorMap`] maps a field name, or `None` for errors not tied to a field,
//! to a single message. Entries keep the order they were discovered in.
//!
//! # Example
//!
//! ```
//! use sieve_core::ErrorMap;
//!
//! let errors = ErrorMap::from_fields([("email", "Required"), ("name", "Too short")]);
//! assert_eq!(errors.field("email"), Some("Required"));
//! assert_eq!(errors.generic_message(), None);
//! assert_eq!(errors.to_string(), "email: Required; name: Too short");
//! ```

use std::fmt;

use indexmap::{Equivalent, IndexMap};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Separator used when several messages are flattened into one.
pub const MESSAGE_SEPARATOR: &str = ", ";

/// Key written for the generic entry when an [`ErrorMap`] is serialized.
pub const GENERIC_KEY: &str = "null";

/// Plain mapping an [`ErrorMap`] converts to and from.
pub type ErrorEntries = IndexMap<Option<String>, String>;

/// Borrowed form of an [`ErrorEntries`] key.
///
/// Hashes like `Option<String>`, so lookups need no allocation.
#[derive(Hash)]
struct KeyRef<'a>(Option<&'a str>);

impl Equivalent<Option<String>> for KeyRef<'_> {
    fn equivalent(&self, key: &Option<String>) -> bool {
        self.0 == key.as_deref()
    }
}

/// Immutable, ordered mapping of normalized error messages.
///
/// There is no way to change an `ErrorMap` once built:
///
/// ```compile_fail
/// use sieve_core::ErrorMap;
///
/// let mut errors = ErrorMap::generic("Oops");
/// errors.insert(Some("email".to_string()), "Required".to_string());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMap {
    entries: ErrorEntries,
}

impl ErrorMap {
    /// An empty map: no errors.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// A map holding a single message not tied to any field.
    #[must_use]
    pub fn generic(message: impl Into<String>) -> Self {
        let mut entries = ErrorEntries::with_capacity(1);
        entries.insert(None, message.into());
        Self { entries }
    }

    /// A map holding one message per field, in iteration order.
    ///
    /// A field given twice keeps its first position and its last message.
    #[must_use]
    pub fn from_fields<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        fields
            .into_iter()
            .map(|(field, message)| (Some(field.into()), message.into()))
            .collect()
    }

    /// Message for a key, `None` being the generic entry.
    #[must_use]
    pub fn get(&self, key: Option<&str>) -> Option<&str> {
        self.entries.get(&KeyRef(key)).map(String::as_str)
    }

    /// Message for a field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.get(Some(name))
    }

    /// Message not tied to any field.
    #[must_use]
    pub fn generic_message(&self) -> Option<&str> {
        self.get(None)
    }

    /// Returns `true` if the map has an entry for the key.
    #[must_use]
    pub fn contains_key(&self, key: Option<&str>) -> bool {
        self.get(key).is_some()
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (Option<&str>, &str)> {
        self.entries
            .iter()
            .map(|(key, message)| (key.as_deref(), message.as_str()))
    }

    /// Keys in insertion order.
    #[must_use]
    pub fn keys(&self) -> impl ExactSizeIterator<Item = Option<&str>> {
        self.entries.keys().map(Option::as_deref)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there is no error.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy of the entries as a plain mapping.
    #[must_use]
    pub fn to_map(&self) -> ErrorEntries {
        self.entries.clone()
    }

    /// Consume into the plain mapping.
    #[must_use]
    pub fn into_map(self) -> ErrorEntries {
        self.entries
    }
}

impl From<ErrorEntries> for ErrorMap {
    fn from(entries: ErrorEntries) -> Self {
        Self { entries }
    }
}

impl From<ErrorMap> for ErrorEntries {
    fn from(errors: ErrorMap) -> Self {
        errors.entries
    }
}

impl FromIterator<(Option<String>, String)> for ErrorMap {
    fn from_iter<I: IntoIterator<Item = (Option<String>, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ErrorMap {
    type Item = (Option<String>, String);
    type IntoIter = indexmap::map::IntoIter<Option<String>, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl fmt::Display for ErrorMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (key, message)) in self.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            match key {
                Some(field) => write!(f, "{field}: {message}")?,
                None => f.write_str(message)?,
            }
        }
        Ok(())
    }
}

impl Serialize for ErrorMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, message) in self.iter() {
            map.serialize_entry(key.unwrap_or(GENERIC_KEY), message)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use assert2::check;

    use super::*;

    #[test]
    fn empty_map() {
        let errors = ErrorMap::empty();
        check!(errors.is_empty());
        check!(errors.len() == 0);
        check!(errors.generic_message().is_none());
        check!(errors.to_string().is_empty());
    }

    #[test]
    fn generic_map() {
        let errors = ErrorMap::generic("Something went wrong");
        check!(errors.len() == 1);
        check!(errors.generic_message() == Some("Something went wrong"));
        check!(errors.get(None) == Some("Something went wrong"));
        check!(errors.contains_key(None));
        check!(!errors.contains_key(Some("email")));
    }

    #[test]
    fn fields_keep_insertion_order() {
        let errors = ErrorMap::from_fields([("zeta", "Z"), ("alpha", "A"), ("mid", "M")]);

        let keys: Vec<_> = errors.keys().collect();
        check!(keys == vec![Some("zeta"), Some("alpha"), Some("mid")]);
        check!(errors.field("alpha") == Some("A"));
        check!(errors.field("missing").is_none());
        check!(errors.generic_message().is_none());
    }

    #[test]
    fn lookup_tells_generic_entry_from_null_field() {
        let errors: ErrorMap = [
            (Some("null".to_string()), "Field".to_string()),
            (Some("email".to_string()), "Required".to_string()),
            (None, "Oops".to_string()),
        ]
        .into_iter()
        .collect();

        check!(errors.field("null") == Some("Field"));
        check!(errors.generic_message() == Some("Oops"));
        check!(errors.get(Some("email")) == Some("Required"));
        check!(errors.get(Some("")).is_none());
    }

    #[test]
    fn duplicate_field_keeps_first_position() {
        let errors = ErrorMap::from_fields([("a", "1"), ("b", "2"), ("a", "3")]);

        let entries: Vec<_> = errors.iter().collect();
        check!(entries == vec![(Some("a"), "3"), (Some("b"), "2")]);
    }

    #[test]
    fn plain_map_round_trip() {
        let errors = ErrorMap::from_fields([("foo", "Required"), ("bar", "Must be an email")]);

        let plain = errors.to_map();
        check!(plain.get(&Some("foo".to_string())) == Some(&"Required".to_string()));
        check!(ErrorMap::from(plain) == errors);

        let plain: ErrorEntries = errors.clone().into();
        check!(ErrorMap::from(plain.clone()) == errors);
        check!(errors.into_map() == plain);
    }

    #[test]
    fn value_equality() {
        check!(ErrorMap::generic("x") == ErrorMap::generic("x"));
        check!(ErrorMap::generic("x") != ErrorMap::generic("y"));
        check!(ErrorMap::generic("x") != ErrorMap::from_fields([("x", "x")]));
    }

    #[test]
    fn display() {
        let errors: ErrorMap = [
            (None, "Oops".to_string()),
            (Some("email".to_string()), "Required".to_string()),
        ]
        .into_iter()
        .collect();
        insta::assert_snapshot!(errors.to_string(), @"Oops; email: Required");
    }

    #[test]
    fn serialize_as_object() {
        let errors: ErrorMap = [
            (Some("foo".to_string()), "Required".to_string()),
            (None, "Oops".to_string()),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_string(&errors).expect("serialize");
        check!(json == r#"{"foo":"Required","null":"Oops"}"#);
    }

    #[test]
    fn into_iter_yields_owned_entries() {
        let entries: Vec<_> = ErrorMap::generic("Oops").into_iter().collect();
        check!(entries == vec![(None, "Oops".to_string())]);
    }
}
