// Attribute value model (scalar / composite / tabular)

use crate::error::ReaderError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named fields of one composite record.
pub type CompositeFields = BTreeMap<String, AttributeValue>;

/// A decoded management attribute. Mirrors the shapes real attributes come
/// back in: plain scalars, composite records (memory usage), and tabular
/// data (per-pool sub-records inside last-GC info).
///
/// Decoding keeps every field the source returned; nothing is dropped
/// because the caller only asked for a subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum AttributeValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Composite(CompositeFields),
    Tabular(TabularValue),
}

/// An indexed collection of composite rows. Every row carries every index
/// field; index tuples are unique within the table. Row order is preserved
/// from the source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabularValue {
    index_names: Vec<String>,
    rows: Vec<AttributeValue>,
}

impl AttributeValue {
    /// Kind name for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            AttributeValue::Bool(_) => "bool",
            AttributeValue::Int(_) => "int",
            AttributeValue::Float(_) => "float",
            AttributeValue::Text(_) => "text",
            AttributeValue::Composite(_) => "composite",
            AttributeValue::Tabular(_) => "tabular",
        }
    }

    /// Looks up one field of a composite value.
    pub fn field(&self, name: &str) -> Result<&AttributeValue, ReaderError> {
        match self {
            AttributeValue::Composite(fields) => fields
                .get(name)
                .ok_or_else(|| ReaderError::NoSuchAttribute(format!("composite field {name:?}"))),
            other => Err(ReaderError::TypeMismatch {
                expected: "composite",
                actual: other.kind(),
            }),
        }
    }

    /// Looks up one row of a tabular value by its index tuple. The returned
    /// row is a composite, so lookups chain:
    /// `v.row(&[key])?.field("value")?.field("committed")?`.
    pub fn row(&self, index: &[AttributeValue]) -> Result<&AttributeValue, ReaderError> {
        match self {
            AttributeValue::Tabular(table) => table.row(index),
            other => Err(ReaderError::TypeMismatch {
                expected: "tabular",
                actual: other.kind(),
            }),
        }
    }

    pub fn as_i64(&self) -> Result<i64, ReaderError> {
        match self {
            AttributeValue::Int(n) => Ok(*n),
            other => Err(ReaderError::TypeMismatch {
                expected: "int",
                actual: other.kind(),
            }),
        }
    }

    /// Numeric view; accepts both int and float scalars since management
    /// endpoints report counters as either.
    pub fn as_f64(&self) -> Result<f64, ReaderError> {
        match self {
            AttributeValue::Int(n) => Ok(*n as f64),
            AttributeValue::Float(x) => Ok(*x),
            other => Err(ReaderError::TypeMismatch {
                expected: "number",
                actual: other.kind(),
            }),
        }
    }

    pub fn as_text(&self) -> Result<&str, ReaderError> {
        match self {
            AttributeValue::Text(s) => Ok(s),
            other => Err(ReaderError::TypeMismatch {
                expected: "text",
                actual: other.kind(),
            }),
        }
    }

    /// Recursively checks tabular shape invariants. Deserialized payloads
    /// go through this before they are handed to callers, since serde alone
    /// does not enforce index-field presence or tuple uniqueness.
    pub fn validate(&self) -> Result<(), ReaderError> {
        match self {
            AttributeValue::Composite(fields) => {
                fields.values().try_for_each(AttributeValue::validate)
            }
            AttributeValue::Tabular(table) => {
                table.check()?;
                table.rows.iter().try_for_each(AttributeValue::validate)
            }
            _ => Ok(()),
        }
    }
}

impl TabularValue {
    /// Builds a table, validating shape: every row must be a composite
    /// carrying every index field, and no two rows may share an index tuple.
    pub fn new(
        index_names: Vec<String>,
        rows: Vec<AttributeValue>,
    ) -> Result<Self, ReaderError> {
        let table = Self { index_names, rows };
        table.check()?;
        Ok(table)
    }

    fn check(&self) -> Result<(), ReaderError> {
        if self.index_names.is_empty() {
            return Err(ReaderError::Decode(
                "tabular value declares no index fields".into(),
            ));
        }
        let mut seen: Vec<Vec<&AttributeValue>> = Vec::with_capacity(self.rows.len());
        for row in &self.rows {
            let fields = match row {
                AttributeValue::Composite(fields) => fields,
                other => {
                    return Err(ReaderError::Decode(format!(
                        "tabular row is {}, expected composite",
                        other.kind()
                    )));
                }
            };
            let mut key = Vec::with_capacity(self.index_names.len());
            for index in &self.index_names {
                match fields.get(index) {
                    Some(v) => key.push(v),
                    None => {
                        return Err(ReaderError::Decode(format!(
                            "tabular row is missing index field {index:?}"
                        )));
                    }
                }
            }
            if seen.contains(&key) {
                return Err(ReaderError::Decode(format!(
                    "duplicate index tuple {key:?} in tabular value"
                )));
            }
            seen.push(key);
        }
        Ok(())
    }

    pub fn index_names(&self) -> &[String] {
        &self.index_names
    }

    pub fn rows(&self) -> &[AttributeValue] {
        &self.rows
    }

    /// Finds the row whose index fields equal `index`, in declaration order.
    /// An absent tuple is an error, never a default.
    pub fn row(&self, index: &[AttributeValue]) -> Result<&AttributeValue, ReaderError> {
        if index.len() != self.index_names.len() {
            return Err(ReaderError::TypeMismatch {
                expected: "index tuple matching the table's index fields",
                actual: "tuple of different arity",
            });
        }
        self.rows
            .iter()
            .find(|row| {
                self.index_names
                    .iter()
                    .zip(index)
                    .all(|(name, key)| match row {
                        AttributeValue::Composite(fields) => fields.get(name) == Some(key),
                        _ => false,
                    })
            })
            .ok_or_else(|| ReaderError::NoSuchAttribute(format!("tabular row {index:?}")))
    }
}
