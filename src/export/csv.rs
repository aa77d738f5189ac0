//! CSV export functionality
//!
//! Exports certificate rows to spreadsheet-compatible CSV, one row per
//! edition, newest certificate numbers first.

use std::io::Write;

use crate::error::{CertError, CertResult};
use crate::models::CertificateRecord;

const HEADERS: [&str; 21] = [
    "Certificate No",
    "Edition",
    "State",
    "Product No",
    "Description",
    "Type",
    "Manufacturer",
    "Serial No",
    "Serialization",
    "Amendment",
    "Signatory",
    "Date",
    "Quantity",
    "Authorisation",
    "Item",
    "Status",
    "Approved",
    "Remarks 1",
    "Remarks 2",
    "Remarks 3",
    "Remarks 4",
];

/// Export certificate rows to CSV
pub fn export_certificates_csv<W: Write>(
    records: &[CertificateRecord],
    writer: &mut W,
) -> CertResult<()> {
    let mut csv = csv::Writer::from_writer(writer);

    csv.write_record(HEADERS)
        .map_err(|e| CertError::Export(e.to_string()))?;

    for record in records {
        csv.write_record([
            record.cert_no.as_str(),
            record.edition.to_string().as_str(),
            record.state.to_string().as_str(),
            record.product_no.as_str(),
            record.product_description.as_str(),
            record.product_type.as_str(),
            record.manufacturer.as_str(),
            record.serial_no.as_str(),
            record.serialization.as_str(),
            record.amendment.as_str(),
            record.signatory.as_str(),
            record.display_date().as_str(),
            record.quantity.as_str(),
            record.authorisation.as_str(),
            record.item.as_str(),
            record.status.as_str(),
            record.approved.as_str(),
            record.remarks1.as_str(),
            record.remarks2.as_str(),
            record.remarks3.as_str(),
            record.remarks4.as_str(),
        ])
        .map_err(|e| CertError::Export(e.to_string()))?;
    }

    csv.flush().map_err(|e| CertError::Export(e.to_string()))?;
    Ok(())
}
