// Management session seam + document-backed implementation

use crate::error::{ReaderError, Result};
use crate::name::ResourceName;
use crate::value::AttributeValue;
use std::collections::BTreeMap;

/// An already-connected channel to a process's management interface.
///
/// Connection establishment, authentication, and transport security are the
/// implementor's responsibility; the reader only issues queries. Calls are
/// synchronous and blocking, and each one reflects current live state (no
/// caching on either side of the seam).
pub trait Session {
    /// All resource names matching `pattern`. Zero matches is a valid,
    /// empty result; a session that cannot service the query fails with
    /// `Resolution`.
    fn resolve(&self, pattern: &ResourceName) -> Result<Vec<ResourceName>>;

    /// One attribute of one concrete resource.
    fn get_attribute(&self, name: &ResourceName, attribute: &str) -> Result<AttributeValue>;
}

/// A `Session` over a fixed JSON document: resource canonical name →
/// attribute → tagged `AttributeValue` payload.
///
/// Backs offline snapshot documents in the binary and serves as the test
/// double everywhere else. Attribute payloads stay raw JSON until read, so
/// a malformed payload surfaces as `Decode` from `get_attribute`, the same
/// place a live transport would fail.
pub struct StaticSession {
    resources: Vec<(ResourceName, BTreeMap<String, serde_json::Value>)>,
    connected: bool,
}

impl StaticSession {
    pub fn from_json_str(document: &str) -> Result<Self> {
        let raw: BTreeMap<String, BTreeMap<String, serde_json::Value>> =
            serde_json::from_str(document)
                .map_err(|e| ReaderError::Decode(format!("session document: {e}")))?;
        let mut resources = Vec::with_capacity(raw.len());
        for (name, attributes) in raw {
            resources.push((ResourceName::parse(&name)?, attributes));
        }
        Ok(Self {
            resources,
            connected: true,
        })
    }

    /// Drops the connection; subsequent queries fail with `Resolution`.
    pub fn disconnect(&mut self) {
        self.connected = false;
    }

    fn ensure_connected(&self) -> Result<()> {
        if self.connected {
            Ok(())
        } else {
            Err(ReaderError::Resolution("session is not connected".into()))
        }
    }
}

impl Session for StaticSession {
    fn resolve(&self, pattern: &ResourceName) -> Result<Vec<ResourceName>> {
        self.ensure_connected()?;
        Ok(self
            .resources
            .iter()
            .map(|(name, _)| name)
            .filter(|name| pattern.matches(name))
            .cloned()
            .collect())
    }

    fn get_attribute(&self, name: &ResourceName, attribute: &str) -> Result<AttributeValue> {
        self.ensure_connected()?;
        let (_, attributes) = self
            .resources
            .iter()
            .find(|(n, _)| n == name)
            .ok_or_else(|| ReaderError::NoSuchResource(name.to_string()))?;
        let payload = attributes
            .get(attribute)
            .ok_or_else(|| ReaderError::NoSuchAttribute(format!("{attribute:?} on {name}")))?;
        let value: AttributeValue = serde_json::from_value(payload.clone())
            .map_err(|e| ReaderError::Decode(format!("{attribute:?} on {name}: {e}")))?;
        value.validate()?;
        Ok(value)
    }
}
