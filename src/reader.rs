// One-pass snapshot reader over a management session

use crate::error::{ReaderError, Result};
use crate::models::{Snapshot, SnapshotEntry, Target};
use crate::name::ResourceName;
use crate::session::Session;
use crate::value::AttributeValue;
use chrono::Utc;

/// Reads metric resources through a borrowed session for one poll pass.
///
/// Stateless beyond the borrow: every call is an independent round-trip
/// returning current live state, and results are fresh immutable values.
/// The borrow scopes the session's exclusive-use window; the reader itself
/// performs no locking and no retries.
pub struct SnapshotReader<'a, S: Session + ?Sized> {
    session: &'a S,
}

impl<'a, S: Session + ?Sized> SnapshotReader<'a, S> {
    pub fn new(session: &'a S) -> Self {
        Self { session }
    }

    /// All resources matching `pattern`. Zero matches is Ok(empty).
    pub fn resolve(&self, pattern: &ResourceName) -> Result<Vec<ResourceName>> {
        self.session.resolve(pattern)
    }

    /// One attribute of one concrete resource, decoded.
    pub fn read_attribute(&self, name: &ResourceName, attribute: &str) -> Result<AttributeValue> {
        self.session.get_attribute(name, attribute)
    }

    /// One poll pass: resolves each target pattern in order and reads each
    /// requested attribute of each match. Entry order follows target order,
    /// then resolution order, then attribute order. Aborts on the first
    /// error; callers that prefer to skip failed reads compose `resolve`
    /// and `read_attribute` themselves.
    pub fn poll(&self, targets: &[Target]) -> Result<Snapshot> {
        let taken_at = Utc::now();
        let mut entries = Vec::new();
        for target in targets {
            for name in self.resolve(&target.pattern)? {
                for attribute in &target.attributes {
                    let value = self.read_attribute(&name, attribute)?;
                    entries.push(SnapshotEntry {
                        name: name.clone(),
                        attribute: attribute.clone(),
                        value,
                    });
                }
            }
        }
        Ok(Snapshot { taken_at, entries })
    }
}

/// Percentage of `numerator` over `denominator`, rounded to two decimals:
/// `round(n/d × 10000) / 100`.
pub fn derive_percent(numerator: f64, denominator: f64) -> Result<f64> {
    if denominator == 0.0 {
        return Err(ReaderError::DivisionByZero);
    }
    Ok((numerator / denominator * 10000.0).round() / 100.0)
}
