//! Certificate rendering
//!
//! Printing is thin I/O over a finished record: a renderer receives the
//! record and produces output bytes. The built-in [`FormRenderer`] fills the
//! release-form fields into a deterministic key/value text layout; a PDF
//! template filler would implement the same trait.

use crate::error::CertResult;
use crate::models::CertificateRecord;

/// Renders one certificate edition to output bytes
pub trait CertificateRenderer {
    fn render(&self, record: &CertificateRecord) -> CertResult<Vec<u8>>;
}

/// Built-in renderer producing the filled form fields as text
///
/// Field derivations follow the release form layout: the tracking number is
/// `<cert_no>-2-<edition>`, the work order appends the serial number for
/// serialized parts, and the approved-design indicator is marked as an X in
/// one of two boxes.
#[derive(Debug, Default)]
pub struct FormRenderer;

impl FormRenderer {
    pub fn new() -> Self {
        Self
    }

    fn work_order(record: &CertificateRecord) -> String {
        if record.serialization.trim().eq_ignore_ascii_case("yes") {
            format!("{}-{}", record.product_no, record.serial_no)
        } else {
            record.product_no.clone()
        }
    }
}

impl CertificateRenderer for FormRenderer {
    fn render(&self, record: &CertificateRecord) -> CertResult<Vec<u8>> {
        // "." is the placeholder for an intentionally blank amendment
        let amendment = if record.amendment.trim() == "." {
            ""
        } else {
            record.amendment.as_str()
        };

        let approved = record
            .approved
            .to_lowercase()
            .starts_with("approved");

        let mut out = String::new();
        let mut field = |name: &str, value: &str| {
            out.push_str(name);
            out.push_str(": ");
            out.push_str(value);
            out.push('\n');
        };

        field("certificate_no", record.cert_no.as_str());
        field("edition", &record.edition.to_string());
        field(
            "tracking_no",
            &format!("{}-2-{}", record.cert_no, record.edition),
        );
        field("work_order", &Self::work_order(record));
        field("item", &record.item);
        field("description", &record.product_description);
        field("product_no", &record.product_no);
        field("quantity", &record.quantity);
        field("serial_no", &record.serial_no);
        field("status", &record.status);
        field("amendment", amendment);
        field("remarks1", &record.remarks1);
        field("remarks2", &record.remarks2);
        field("remarks3", &record.remarks3);
        field("remarks4", &record.remarks4);
        field("approved_design", if approved { "X" } else { "" });
        field("non_approved_design", if approved { "" } else { "X" });
        field("authorisation_no", &record.authorisation);
        field("signatory", &record.signatory);
        field("date", &record.display_date());

        Ok(out.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CertState, CertificateNumber, Edition};
    use chrono::{NaiveDate, Utc};

    fn record() -> CertificateRecord {
        CertificateRecord {
            cert_no: CertificateNumber::new("AB936042"),
            edition: Edition::from_number(1).unwrap(),
            product_no: "PN-100".into(),
            product_description: "Widget".into(),
            product_type: "Assembly".into(),
            manufacturer: "Acme".into(),
            serial_no: "SN-0042".into(),
            serialization: "Yes".into(),
            amendment: "A1, B2".into(),
            signatory: "R. Vance".into(),
            date: NaiveDate::from_ymd_opt(2024, 3, 18).unwrap(),
            quantity: "05".into(),
            remarks1: "First batch".into(),
            remarks2: String::new(),
            remarks3: String::new(),
            remarks4: String::new(),
            authorisation: "GB.145.00001".into(),
            item: "1".into(),
            status: "New".into(),
            approved: "Approved design data".into(),
            state: CertState::Valid,
            comment: String::new(),
            created_at: Utc::now(),
        }
    }

    fn rendered(record: &CertificateRecord) -> String {
        String::from_utf8(FormRenderer::new().render(record).unwrap()).unwrap()
    }

    #[test]
    fn test_tracking_number_and_date_format() {
        let out = rendered(&record());
        assert!(out.contains("tracking_no: AB936042-2-01\n"));
        assert!(out.contains("date: 18 Mar 2024\n"));
    }

    #[test]
    fn test_work_order_for_serialized_part() {
        let mut r = record();
        let out = rendered(&r);
        assert!(out.contains("work_order: PN-100-SN-0042\n"));

        r.serialization = "No".into();
        let out = rendered(&r);
        assert!(out.contains("work_order: PN-100\n"));
    }

    #[test]
    fn test_approved_design_boxes() {
        let out = rendered(&record());
        assert!(out.contains("approved_design: X\n"));
        assert!(out.contains("non_approved_design: \n"));

        let mut r = record();
        r.approved = "Non-approved design data".into();
        let out = rendered(&r);
        assert!(out.contains("approved_design: \n"));
        assert!(out.contains("non_approved_design: X\n"));
    }

    #[test]
    fn test_dot_amendment_renders_blank() {
        let mut r = record();
        r.amendment = ".".into();
        let out = rendered(&r);
        assert!(out.contains("amendment: \n"));
    }
}
