//! Export module for certdesk
//!
//! Serializes search results in two formats:
//! - CSV: spreadsheet-compatible, one row per edition
//! - JSON: machine-readable with a schema version envelope

pub mod csv;
pub mod json;

pub use csv::export_certificates_csv;
pub use json::{export_certificates_json, CertificateExport, EXPORT_SCHEMA_VERSION};
