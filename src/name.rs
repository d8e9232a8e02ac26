// Structured mbean names (domain + ordered key properties)

use crate::error::ReaderError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A management resource name: `domain:key=value,key=value,...`.
///
/// Property order is preserved from the parsed string so the canonical form
/// round-trips byte-identically. Names are immutable once parsed.
///
/// Pattern support (for `resolve` queries): `*` in the domain matches any
/// run of characters, a property value of `*` matches any value, and a
/// trailing `,*` (or a bare `domain:*`) matches names carrying additional
/// properties.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceName {
    domain: String,
    properties: Vec<(String, String)>,
    property_wildcard: bool,
}

impl ResourceName {
    pub fn parse(s: &str) -> Result<Self, ReaderError> {
        let (domain, props) = s
            .split_once(':')
            .ok_or_else(|| ReaderError::InvalidName(format!("missing ':' in {s:?}")))?;
        if domain.is_empty() {
            return Err(ReaderError::InvalidName(format!("empty domain in {s:?}")));
        }

        let mut properties = Vec::new();
        let mut property_wildcard = false;
        for part in props.split(',').filter(|p| !p.is_empty()) {
            if part == "*" {
                property_wildcard = true;
                continue;
            }
            let (key, value) = part.split_once('=').ok_or_else(|| {
                ReaderError::InvalidName(format!("property {part:?} is not key=value in {s:?}"))
            })?;
            if key.is_empty() {
                return Err(ReaderError::InvalidName(format!(
                    "empty property key in {s:?}"
                )));
            }
            if properties.iter().any(|(k, _)| k == key) {
                return Err(ReaderError::InvalidName(format!(
                    "duplicate property key {key:?} in {s:?}"
                )));
            }
            properties.push((key.to_string(), value.to_string()));
        }

        if properties.is_empty() && !property_wildcard {
            return Err(ReaderError::InvalidName(format!(
                "no key properties in {s:?}"
            )));
        }

        Ok(Self {
            domain: domain.to_string(),
            properties,
            property_wildcard,
        })
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Value of one key property, if present.
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// True if this name contains any wildcard and can only be used as a
    /// `resolve` pattern, not as a concrete resource.
    pub fn is_pattern(&self) -> bool {
        self.property_wildcard
            || self.domain.contains('*')
            || self.properties.iter().any(|(_, v)| v == "*")
    }

    /// Whether a concrete `name` matches this name used as a pattern.
    pub fn matches(&self, name: &ResourceName) -> bool {
        if !glob_match(&self.domain, &name.domain) {
            return false;
        }
        for (key, value) in &self.properties {
            match name.property(key) {
                Some(v) if value == "*" || v == value => {}
                _ => return false,
            }
        }
        // Without the trailing ,* the property sets must match exactly.
        self.property_wildcard || self.properties.len() == name.properties.len()
    }
}

/// Matches `pattern` against `text` where `*` spans any run of characters.
fn glob_match(pattern: &str, text: &str) -> bool {
    match pattern.split_once('*') {
        None => pattern == text,
        Some((prefix, rest)) => match text.strip_prefix(prefix) {
            None => false,
            Some(remainder) => {
                if rest.is_empty() {
                    return true;
                }
                (0..=remainder.len())
                    .filter(|i| remainder.is_char_boundary(*i))
                    .any(|i| glob_match(rest, &remainder[i..]))
            }
        },
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.domain)?;
        for (i, (key, value)) in self.properties.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{key}={value}")?;
        }
        if self.property_wildcard {
            if !self.properties.is_empty() {
                write!(f, ",")?;
            }
            write!(f, "*")?;
        }
        Ok(())
    }
}

impl FromStr for ResourceName {
    type Err = ReaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ResourceName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ResourceName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
