//! Validated identifier value object
//!
//! Every pluggable component provider and every registered service is keyed
//! by a [`Name`]. Names are normalized to lowercase at construction, so two
//! names are equal iff their normalized forms match.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Maximum accepted identifier length
const MAX_NAME_LEN: usize = 64;

/// Validated identifier used as a factory-map and registry key
///
/// Accepts 1-64 ASCII characters: lowercase alphanumerics, `-` and `_`,
/// starting with an alphanumeric. Uppercase input is normalized to
/// lowercase rather than rejected.
///
/// # Example
///
/// ```
/// use vigil_domain::Name;
///
/// let name = Name::new("memory").unwrap();
/// assert_eq!(name.as_str(), "memory");
/// assert!(Name::new("").is_err());
/// assert!(Name::new("no spaces").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(String);

impl Name {
    /// Create a validated name
    pub fn new<S: AsRef<str>>(candidate: S) -> Result<Self> {
        let normalized = candidate.as_ref().trim().to_ascii_lowercase();

        if normalized.is_empty() {
            return Err(Error::invalid_name("name must not be empty"));
        }
        if normalized.len() > MAX_NAME_LEN {
            return Err(Error::invalid_name(format!(
                "name \"{}\" exceeds {} characters",
                normalized, MAX_NAME_LEN
            )));
        }
        if !normalized
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphanumeric())
        {
            return Err(Error::invalid_name(format!(
                "name \"{}\" must start with an alphanumeric character",
                normalized
            )));
        }
        if let Some(bad) = normalized
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(Error::invalid_name(format!(
                "name \"{}\" contains invalid character '{}'",
                normalized, bad
            )));
        }

        Ok(Self(normalized))
    }

    /// Create a name from a static, known-good identifier
    ///
    /// Intended for provider names fixed at build time. Panics if the
    /// identifier is invalid, which indicates a wiring bug rather than a
    /// runtime condition.
    pub fn must(candidate: &'static str) -> Self {
        match Self::new(candidate) {
            Ok(name) => name,
            Err(err) => panic!("invalid static name \"{candidate}\": {err}"),
        }
    }

    /// The normalized string form
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for Name {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Serialize for Name {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::new(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_identifiers() {
        for candidate in ["memory", "postgres", "in_memory", "redis-cluster", "v2"] {
            assert!(Name::new(candidate).is_ok(), "{candidate} should be valid");
        }
    }

    #[test]
    fn rejects_invalid_identifiers() {
        for candidate in ["", "  ", "no spaces", "-leading", "_leading", "tab\there", "ünïcode"] {
            assert!(Name::new(candidate).is_err(), "{candidate:?} should be invalid");
        }
    }

    #[test]
    fn normalizes_case_and_whitespace() {
        let a = Name::new("Memory").unwrap();
        let b = Name::new(" memory ").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "memory");
    }

    #[test]
    fn rejects_overlong_names() {
        let long = "a".repeat(MAX_NAME_LEN + 1);
        assert!(Name::new(&long).is_err());
        let ok = "a".repeat(MAX_NAME_LEN);
        assert!(Name::new(&ok).is_ok());
    }

    #[test]
    fn serde_round_trip_validates() {
        let name: Name = serde_json::from_str("\"memory\"").unwrap();
        assert_eq!(name.as_str(), "memory");
        assert!(serde_json::from_str::<Name>("\"bad name\"").is_err());
        assert_eq!(serde_json::to_string(&name).unwrap(), "\"memory\"");
    }
}
