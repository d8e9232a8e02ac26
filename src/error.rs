// Error taxonomy for resolve/read/decode operations

use thiserror::Error;

/// Everything that can go wrong between a name pattern and a decoded value.
/// Errors surface to the caller immediately; the library never retries,
/// suppresses, or logs on its own.
#[derive(Debug, Error)]
pub enum ReaderError {
    /// Resource name string is not `domain:key=value,...`.
    #[error("invalid resource name: {0}")]
    InvalidName(String),

    /// The session could not service a query (unreachable, not connected).
    #[error("resolution failed: {0}")]
    Resolution(String),

    #[error("no such resource: {0}")]
    NoSuchResource(String),

    /// Also covers tabular row-not-found: an index tuple names a row the
    /// same way an attribute key names a value.
    #[error("no such attribute: {0}")]
    NoSuchAttribute(String),

    /// Attribute payload could not be mapped into the value model.
    #[error("cannot decode attribute payload: {0}")]
    Decode(String),

    /// A decode helper was applied to the wrong value kind.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("cannot derive percentage: denominator is zero")]
    DivisionByZero,
}

pub type Result<T> = std::result::Result<T, ReaderError>;
