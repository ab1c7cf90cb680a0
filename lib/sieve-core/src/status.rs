//! Status classes and rule keys.
//!
//! A [`RuleKey`] names the slot a rule is registered under: an exact status
//! code, a status class such as `4XX`, or the status-less [`RuleKey::Unknown`].

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Class of an HTTP status, i.e. its hundreds: `404` belongs to `4XX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StatusClass(u16);

impl StatusClass {
    /// The `2XX` class.
    pub const SUCCESS: Self = Self(2);
    /// The `4XX` class.
    pub const CLIENT_ERROR: Self = Self(4);
    /// The `5XX` class.
    pub const SERVER_ERROR: Self = Self(5);

    /// Class of the given status code.
    #[must_use]
    pub const fn of(status: u16) -> Self {
        Self(status / 100)
    }

    /// Class from its leading digit(s), `4` is `4XX`.
    #[must_use]
    pub const fn new(hundreds: u16) -> Self {
        Self(hundreds)
    }

    /// Leading digit(s) of the class.
    #[must_use]
    pub const fn hundreds(self) -> u16 {
        self.0
    }

    /// Returns `true` if the status code belongs to this class.
    #[must_use]
    pub const fn contains(self, status: u16) -> bool {
        status / 100 == self.0
    }
}

impl fmt::Display for StatusClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}XX", self.0)
    }
}

/// Key under which a rule is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKey {
    /// An exact status code, e.g. `404`.
    Exact(u16),
    /// A status class, e.g. `4XX`.
    Class(StatusClass),
    /// Responses without a status.
    Unknown,
}

impl RuleKey {
    /// Keys to look up for a status, most specific first.
    ///
    /// A missing status has no class, only [`RuleKey::Unknown`] applies.
    #[must_use]
    pub fn candidates(status: Option<u16>) -> Vec<Self> {
        match status {
            Some(code) => vec![Self::Exact(code), Self::Class(StatusClass::of(code))],
            None => vec![Self::Unknown],
        }
    }

    /// Returns `true` if this key names an exact status (or the unknown status).
    #[must_use]
    pub const fn is_exact(&self) -> bool {
        matches!(self, Self::Exact(_) | Self::Unknown)
    }
}

impl From<StatusClass> for RuleKey {
    fn from(class: StatusClass) -> Self {
        Self::Class(class)
    }
}

impl From<u16> for RuleKey {
    fn from(status: u16) -> Self {
        Self::Exact(status)
    }
}

impl fmt::Display for RuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(code) => write!(f, "{code}"),
            Self::Class(class) => write!(f, "{class}"),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}

impl FromStr for RuleKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        if key.eq_ignore_ascii_case("unknown") || key.eq_ignore_ascii_case("null") {
            return Ok(Self::Unknown);
        }

        let class_digits = key.strip_suffix("XX").or_else(|| key.strip_suffix("xx"));
        let digits = class_digits.unwrap_or(key);

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::invalid_rule_key(s));
        }
        let value: u16 = digits.parse().map_err(|_| Error::invalid_rule_key(s))?;

        Ok(match class_digits {
            Some(_) => Self::Class(StatusClass::new(value)),
            None => Self::Exact(value),
        })
    }
}
