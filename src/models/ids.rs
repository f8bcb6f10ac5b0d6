//! Strongly-typed student identifier
//!
//! Student IDs are user-assigned strings rather than generated UUIDs, so the
//! newtype carries the normalization rules: trimmed, uppercase, at least three
//! characters long.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::validation::validate_student_id;
use crate::error::RecordsError;

/// A validated, normalized student identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(String);

impl StudentId {
    /// Parse and normalize a raw identifier
    pub fn parse(s: &str) -> Result<Self, RecordsError> {
        validate_student_id(s).map(Self)
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether a raw, possibly lowercase identifier refers to this ID
    pub fn matches(&self, raw: &str) -> bool {
        self.0 == raw.trim().to_uppercase()
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StudentId {
    type Err = RecordsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for StudentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
