//! Year prefix model
//!
//! An administrator assigns one short code per calendar year; the code forms
//! the leading segment of every certificate number allocated that year.

use serde::{Deserialize, Serialize};

/// A year-to-code mapping used by the identifier allocator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearPrefix {
    /// Calendar year, e.g. 2024
    pub year: i32,

    /// Short alphanumeric code issued administratively
    pub code: String,
}

impl YearPrefix {
    pub fn new(year: i32, code: impl Into<String>) -> Self {
        Self {
            year,
            code: code.into(),
        }
    }
}
