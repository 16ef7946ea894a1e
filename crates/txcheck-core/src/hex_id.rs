use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Length of a hex-encoded 32-byte hash.
pub const HEX_ID_LEN: usize = 64;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HexIdError {
    #[error("expected {expected} hex characters, got {actual}")]
    Length { expected: usize, actual: usize },

    #[error("non-hex character {ch:?} at position {position}")]
    NonHex { ch: char, position: usize },
}

/// A transaction id or block hash: exactly 64 hex characters.
///
/// Equality is exact. Case is kept as written so a fixture and a node answer
/// only match when they spell the hash identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct HexId(String);

impl HexId {
    pub fn parse(raw: &str) -> Result<Self, HexIdError> {
        let actual = raw.chars().count();
        if actual != HEX_ID_LEN {
            return Err(HexIdError::Length {
                expected: HEX_ID_LEN,
                actual,
            });
        }
        if let Some((position, ch)) = raw.chars().enumerate().find(|(_, c)| !c.is_ascii_hexdigit())
        {
            return Err(HexIdError::NonHex { ch, position });
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for HexId {
    type Err = HexIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for HexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for HexId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
