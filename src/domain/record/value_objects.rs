use crate::domain::errors::{DomainError, DomainResult};
use std::fmt;

/// Primary key of a persisted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(pub i64);

impl RecordId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("record id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }

    /// Interpret lookup input as an identifier.
    ///
    /// Only input that parses as a positive integer qualifies; everything else
    /// is treated as a slug by the lookup helpers.
    pub fn parse_lookup(input: &str) -> Option<Self> {
        input
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(|id| Self::new(id).ok())
    }
}

impl From<RecordId> for i64 {
    fn from(value: RecordId) -> Self {
        value.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
