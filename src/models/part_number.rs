//! Part number register entry
//!
//! Product details are resolved from this register when a certificate is
//! created, so the record carries a snapshot of the description, type,
//! manufacturer, and serialization flag as they were at creation time.

use serde::{Deserialize, Serialize};

/// A product reference with its descriptive details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartNumber {
    pub product_no: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub product_type: String,

    #[serde(default)]
    pub manufacturer: String,

    /// "Yes" when individual units carry serial numbers
    #[serde(default)]
    pub serialization: String,
}

impl PartNumber {
    pub fn new(product_no: impl Into<String>) -> Self {
        Self {
            product_no: product_no.into(),
            description: String::new(),
            product_type: String::new(),
            manufacturer: String::new(),
            serialization: String::new(),
        }
    }
}
