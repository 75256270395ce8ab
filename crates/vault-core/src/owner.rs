//! Owner identifiers

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest accepted owner identifier
pub const MAX_OWNER_LEN: usize = 64;

/// A validated owner identifier, safe to use as a single path component.
///
/// Only ASCII alphanumerics, `_` and `-` are accepted, so an identifier can
/// never contain a separator, `..`, or a leading dot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    /// Validate a raw identifier
    pub fn parse(raw: &str) -> Result<Self> {
        if is_safe_identifier(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(Error::InvalidOwner(raw.to_string()))
        }
    }

    /// The identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for OwnerId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        OwnerId::parse(&raw).map_err(serde::de::Error::custom)
    }
}

fn is_safe_identifier(raw: &str) -> bool {
    !raw.is_empty()
        && raw.len() <= MAX_OWNER_LEN
        && raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
