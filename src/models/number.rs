//! Certificate number and edition value types
//!
//! Certificate numbers follow the format `<prefix><marker>93<4-digit sequence>`
//! and editions are 2-digit zero-padded version counters. Using wrapper types
//! keeps the formatting rules in one place and prevents mixing up raw strings
//! at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CertError, CertResult};

/// Fixed marker between the year prefix and the running sequence
pub const FORM_MARKER: &str = "93";

/// Lowest sequence suffix ever assigned
pub const SUFFIX_FLOOR: u32 = 6000;

/// Highest sequence suffix that may still be incremented; 9999 is the last
/// value ever handed out, after which allocation for the year is exhausted
pub const SUFFIX_CEILING: u32 = 9998;

/// A human-readable certificate number, e.g. `AB936042`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CertificateNumber(String);

impl CertificateNumber {
    /// Wrap an existing certificate number string
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Build a certificate number from a year-prefix code and a sequence suffix
    pub fn format(code: &str, suffix: u32) -> Self {
        Self(format!("{}{}{:04}", code, FORM_MARKER, suffix))
    }

    /// The raw string form
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this number belongs to the given year-prefix code
    pub fn has_prefix(&self, code: &str) -> bool {
        self.0.starts_with(&format!("{}{}", code, FORM_MARKER))
    }

    /// Extract the trailing 4-digit sequence suffix, if present
    pub fn suffix(&self) -> Option<u32> {
        if self.0.len() < 4 {
            return None;
        }
        self.0[self.0.len() - 4..].parse().ok()
    }
}

/// Next sequence suffix to assign, given the highest suffix already in use
///
/// Starts at the floor when no number exists for the prefix yet, or when the
/// highest stored suffix falls outside the managed range. Once 9999 has been
/// handed out the year's sequence is exhausted; allocation never wraps.
pub fn next_suffix(highest: Option<u32>) -> CertResult<u32> {
    match highest {
        Some(n) if (SUFFIX_FLOOR..=SUFFIX_CEILING).contains(&n) => Ok(n + 1),
        Some(n) if n > SUFFIX_CEILING => Err(CertError::AllocationExhausted(format!(
            "Certificate number sequence is exhausted at suffix {}.",
            n
        ))),
        _ => Ok(SUFFIX_FLOOR),
    }
}

impl fmt::Display for CertificateNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CertificateNumber {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A 2-digit zero-padded edition counter ("00".."99")
///
/// Each edition of a certificate number is a full, independent row; the
/// numerically highest edition is the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edition(u8);

impl Edition {
    /// The initial edition of every newly created certificate
    pub fn initial() -> Self {
        Self(0)
    }

    /// Build an edition from a numeric value, rejecting values above 99
    pub fn from_number(n: u32) -> CertResult<Self> {
        if n > 99 {
            return Err(CertError::EditionRange(format!(
                "Edition {} is outside the range 00-99.",
                n
            )));
        }
        Ok(Self(n as u8))
    }

    /// The numeric value of this edition
    pub fn number(&self) -> u8 {
        self.0
    }

    /// The next edition, failing when the increment would leave 00-99
    pub fn next(&self) -> CertResult<Self> {
        if self.0 >= 99 {
            return Err(CertError::EditionRange(
                "Edition increment would result in a value outside the range 00-99.".into(),
            ));
        }
        Ok(Self(self.0 + 1))
    }
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

impl FromStr for Edition {
    type Err = CertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n: u32 = s
            .trim()
            .parse()
            .map_err(|_| CertError::EditionRange(format!("Edition has an invalid format: '{}'", s)))?;
        Self::from_number(n)
    }
}

// Serialize to the zero-padded text form used at the storage boundary
impl Serialize for Edition {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Edition {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
