//! Document identifier newtype.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Length of a hex-encoded document id.
const OBJECT_ID_LEN: usize = 24;

/// Error returned when a string is not a valid document id.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid document id: {0}")]
pub struct ObjectIdError(String);

/// A validated document store identifier.
///
/// The store addresses documents by a 12-byte id rendered as 24 lowercase
/// hex characters. Anything else in an `:id` path segment is rejected
/// before a store call is made.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an id string.
    pub fn parse(s: &str) -> Result<Self, ObjectIdError> {
        if s.len() == OBJECT_ID_LEN && s.bytes().all(|b| b.is_ascii_hexdigit()) {
            Ok(Self(s.to_ascii_lowercase()))
        } else {
            Err(ObjectIdError(s.to_string()))
        }
    }

    /// Get the inner hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ObjectId {
    type Err = ObjectIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
