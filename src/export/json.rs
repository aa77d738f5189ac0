//! JSON export functionality
//!
//! Machine-readable export of certificate rows with a schema version for
//! downstream consumers.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CertError, CertResult};
use crate::models::CertificateRecord;

/// Schema version for the JSON export format
pub const EXPORT_SCHEMA_VERSION: u32 = 1;

/// Envelope around an exported set of certificate rows
#[derive(Debug, Serialize, Deserialize)]
pub struct CertificateExport {
    pub schema_version: u32,
    pub exported_at: DateTime<Utc>,
    pub certificates: Vec<CertificateRecord>,
}

/// Export certificate rows to pretty-printed JSON
pub fn export_certificates_json<W: Write>(
    records: &[CertificateRecord],
    writer: &mut W,
) -> CertResult<()> {
    let export = CertificateExport {
        schema_version: EXPORT_SCHEMA_VERSION,
        exported_at: Utc::now(),
        certificates: records.to_vec(),
    };

    serde_json::to_writer_pretty(&mut *writer, &export)
        .map_err(|e| CertError::Export(e.to_string()))?;
    writer
        .write_all(b"\n")
        .map_err(|e| CertError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CertState, CertificateNumber, Edition};
    use chrono::NaiveDate;

    #[test]
    fn test_export_round_trips() {
        let record = CertificateRecord {
            cert_no: CertificateNumber::new("AB936000"),
            edition: Edition::initial(),
            product_no: "PN-100".into(),
            product_description: String::new(),
            product_type: String::new(),
            manufacturer: String::new(),
            serial_no: "SN-0042".into(),
            serialization: String::new(),
            amendment: "A1".into(),
            signatory: "R. Vance".into(),
            date: NaiveDate::from_ymd_opt(2024, 3, 18).unwrap(),
            quantity: "05".into(),
            remarks1: String::new(),
            remarks2: String::new(),
            remarks3: String::new(),
            remarks4: String::new(),
            authorisation: String::new(),
            item: String::new(),
            status: String::new(),
            approved: String::new(),
            state: CertState::Printed,
            comment: String::new(),
            created_at: Utc::now(),
        };

        let mut out = Vec::new();
        export_certificates_json(&[record], &mut out).unwrap();

        let parsed: CertificateExport = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(parsed.certificates.len(), 1);
        assert_eq!(parsed.certificates[0].cert_no.as_str(), "AB936000");
        assert_eq!(parsed.certificates[0].state, CertState::Printed);
    }
}
