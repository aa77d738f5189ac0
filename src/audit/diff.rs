//! Field-level diff generation for audit logging
//!
//! Compares two certificate records field by field and produces the sparse
//! payload written to the audit log: a slot carries the new value only when
//! the field actually changed.

use crate::models::CertificateRecord;

use super::entry::FieldValues;

/// Trimmed, case-sensitive text equality; two blank values are equal
///
/// Treating "both empty/whitespace" as equal avoids spurious diffs caused by
/// empty-string vs missing-value inconsistencies in older rows.
pub fn text_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.trim(), b.trim());
    if a.is_empty() && b.is_empty() {
        return true;
    }
    a == b
}

/// Compute the changed fields between two editions of a record
///
/// Every comparable field is listed explicitly; adding a field to
/// `FieldValues` without handling it here fails to compile.
pub fn diff_records(old: &CertificateRecord, new: &CertificateRecord) -> FieldValues {
    let changed = |old_val: &str, new_val: &str| -> Option<String> {
        if text_eq(old_val, new_val) {
            None
        } else {
            Some(new_val.to_string())
        }
    };

    FieldValues {
        product_no: changed(&old.product_no, &new.product_no),
        product_description: changed(&old.product_description, &new.product_description),
        product_type: changed(&old.product_type, &new.product_type),
        manufacturer: changed(&old.manufacturer, &new.manufacturer),
        serial_no: changed(&old.serial_no, &new.serial_no),
        serialization: changed(&old.serialization, &new.serialization),
        amendment: changed(&old.amendment, &new.amendment),
        signatory: changed(&old.signatory, &new.signatory),
        date: changed(&old.date.to_string(), &new.date.to_string()),
        edition: changed(&old.edition.to_string(), &new.edition.to_string()),
        remarks1: changed(&old.remarks1, &new.remarks1),
        remarks2: changed(&old.remarks2, &new.remarks2),
        remarks3: changed(&old.remarks3, &new.remarks3),
        remarks4: changed(&old.remarks4, &new.remarks4),
        quantity: changed(&old.quantity, &new.quantity),
        authorisation: changed(&old.authorisation, &new.authorisation),
        item: changed(&old.item, &new.item),
        status: changed(&old.status, &new.status),
        approved: changed(&old.approved, &new.approved),
        state: changed(&old.state.to_string(), &new.state.to_string()),
        comment: changed(&old.comment, &new.comment),
    }
}
