// Poll output models

use crate::name::ResourceName;
use crate::value::AttributeValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One (name pattern, attributes) pair the caller wants polled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub pattern: ResourceName,
    pub attributes: Vec<String>,
}

/// One attribute read from one resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotEntry {
    pub name: ResourceName,
    pub attribute: String,
    pub value: AttributeValue,
}

/// The result of one poll pass: ordered entries, created fresh per poll,
/// never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub taken_at: DateTime<Utc>,
    pub entries: Vec<SnapshotEntry>,
}
