//! Audit entry data structures
//!
//! Defines the structure of audit log entries: the audited action, who
//! performed it, when, and a sparse set of certificate field values. For
//! updates only changed fields carry a value, which makes the log a compact
//! diff stream rather than a snapshot stream.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{CertState, CertificateRecord};

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    /// A new certificate edition was created
    Add,
    /// An existing certificate was amended
    Update,
    /// An edition was removed by an administrator
    Delete,
    /// A certificate was rendered for printing
    Print,
    /// A certificate was cancelled
    Cancel,
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuditAction::Add => write!(f, "Add"),
            AuditAction::Update => write!(f, "Update"),
            AuditAction::Delete => write!(f, "Delete"),
            AuditAction::Print => write!(f, "Print"),
            AuditAction::Cancel => write!(f, "Cancel"),
        }
    }
}

/// Sparse per-field payload of an audit entry
///
/// One optional slot per comparable certificate field. The struct enumerates
/// every field explicitly so the compiler guarantees none is forgotten when
/// the record shape changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValues {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serialization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amendment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signatory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks3: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks4: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorisation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl FieldValues {
    /// Full snapshot of a record, every slot populated
    pub fn snapshot(record: &CertificateRecord) -> Self {
        Self {
            product_no: Some(record.product_no.clone()),
            product_description: Some(record.product_description.clone()),
            product_type: Some(record.product_type.clone()),
            manufacturer: Some(record.manufacturer.clone()),
            serial_no: Some(record.serial_no.clone()),
            serialization: Some(record.serialization.clone()),
            amendment: Some(record.amendment.clone()),
            signatory: Some(record.signatory.clone()),
            date: Some(record.date.to_string()),
            edition: Some(record.edition.to_string()),
            remarks1: Some(record.remarks1.clone()),
            remarks2: Some(record.remarks2.clone()),
            remarks3: Some(record.remarks3.clone()),
            remarks4: Some(record.remarks4.clone()),
            quantity: Some(record.quantity.clone()),
            authorisation: Some(record.authorisation.clone()),
            item: Some(record.item.clone()),
            status: Some(record.status.clone()),
            approved: Some(record.approved.clone()),
            state: Some(record.state.to_string()),
            comment: Some(record.comment.clone()),
        }
    }

    /// True when no slot carries a value
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Number of populated slots
    pub fn populated_count(&self) -> usize {
        [
            &self.product_no,
            &self.product_description,
            &self.product_type,
            &self.manufacturer,
            &self.serial_no,
            &self.serialization,
            &self.amendment,
            &self.signatory,
            &self.date,
            &self.edition,
            &self.remarks1,
            &self.remarks2,
            &self.remarks3,
            &self.remarks4,
            &self.quantity,
            &self.authorisation,
            &self.item,
            &self.status,
            &self.approved,
            &self.state,
            &self.comment,
        ]
        .iter()
        .filter(|v| v.is_some())
        .count()
    }
}

/// A single audit log entry; written once, never mutated or deleted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// The audited action
    pub action: AuditAction,

    /// Certificate number of the affected record
    pub cert_no: String,

    /// Identity of the user who performed the action
    pub performed_by: String,

    /// Sparse field payload; policy varies per action
    #[serde(default)]
    pub fields: FieldValues,
}

impl AuditEntry {
    /// Entry for a newly created edition: every field logged verbatim
    pub fn add(performed_by: impl Into<String>, record: &CertificateRecord) -> Self {
        Self {
            timestamp: Utc::now(),
            action: AuditAction::Add,
            cert_no: record.cert_no.as_str().to_string(),
            performed_by: performed_by.into(),
            fields: FieldValues::snapshot(record),
        }
    }

    /// Entry for an update: only the changed fields carry values
    pub fn update(
        performed_by: impl Into<String>,
        cert_no: impl Into<String>,
        changes: FieldValues,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            action: AuditAction::Update,
            cert_no: cert_no.into(),
            performed_by: performed_by.into(),
            fields: changes,
        }
    }

    /// Entry for an administrative edition delete: identifying key only
    pub fn delete(
        performed_by: impl Into<String>,
        cert_no: impl Into<String>,
        edition: impl std::fmt::Display,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            action: AuditAction::Delete,
            cert_no: cert_no.into(),
            performed_by: performed_by.into(),
            fields: FieldValues {
                edition: Some(edition.to_string()),
                ..Default::default()
            },
        }
    }

    /// Entry for a print: state is recorded only when the print actually
    /// transitioned the certificate to Printed
    pub fn print(
        performed_by: impl Into<String>,
        cert_no: impl Into<String>,
        edition: impl std::fmt::Display,
        state_changed: bool,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            action: AuditAction::Print,
            cert_no: cert_no.into(),
            performed_by: performed_by.into(),
            fields: FieldValues {
                state: state_changed.then(|| CertState::Printed.to_string()),
                edition: Some(edition.to_string()),
                ..Default::default()
            },
        }
    }

    /// Entry for a cancellation: state, edition, and the new comment; all
    /// other fields forced empty regardless of what changed
    pub fn cancel(
        performed_by: impl Into<String>,
        cert_no: impl Into<String>,
        edition: impl std::fmt::Display,
        comment: Option<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            action: AuditAction::Cancel,
            cert_no: cert_no.into(),
            performed_by: performed_by.into(),
            fields: FieldValues {
                state: Some(CertState::Cancelled.to_string()),
                edition: Some(edition.to_string()),
                comment,
                ..Default::default()
            },
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} by {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.action,
            self.cert_no,
            self.performed_by
        );
        let populated = self.fields.populated_count();
        if populated > 0 {
            output.push_str(&format!(" ({} field(s))", populated));
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CertificateNumber, Edition};
    use chrono::NaiveDate;

    fn record() -> CertificateRecord {
        CertificateRecord {
            cert_no: CertificateNumber::new("AB936000"),
            edition: Edition::initial(),
            product_no: "PN-100".into(),
            product_description: "Widget".into(),
            product_type: String::new(),
            manufacturer: String::new(),
            serial_no: "SN-1".into(),
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
            status: "New".into(),
            approved: String::new(),
            state: Default::default(),
            comment: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_action_display() {
        assert_eq!(AuditAction::Add.to_string(), "Add");
        assert_eq!(AuditAction::Print.to_string(), "Print");
        assert_eq!(AuditAction::Cancel.to_string(), "Cancel");
    }

    #[test]
    fn test_add_entry_full_snapshot() {
        let entry = AuditEntry::add("rvance", &record());
        assert_eq!(entry.action, AuditAction::Add);
        assert_eq!(entry.cert_no, "AB936000");
        assert_eq!(entry.fields.populated_count(), 21);
    }

    #[test]
    fn test_print_entry_with_transition() {
        let entry = AuditEntry::print("rvance", "AB936000", Edition::initial(), true);
        assert_eq!(entry.fields.state.as_deref(), Some("Printed"));
        assert_eq!(entry.fields.edition.as_deref(), Some("00"));
        assert!(entry.fields.quantity.is_none());
    }

    #[test]
    fn test_print_entry_without_transition() {
        let entry = AuditEntry::print("rvance", "AB936000", Edition::initial(), false);
        assert!(entry.fields.state.is_none());
        assert_eq!(entry.fields.edition.as_deref(), Some("00"));
    }

    #[test]
    fn test_cancel_entry_shape() {
        let entry = AuditEntry::cancel(
            "rvance",
            "AB936000",
            Edition::initial(),
            Some("withdrawn by customer".into()),
        );
        assert_eq!(entry.fields.state.as_deref(), Some("Cancelled"));
        assert_eq!(entry.fields.comment.as_deref(), Some("withdrawn by customer"));
        assert!(entry.fields.product_no.is_none());
        assert!(entry.fields.quantity.is_none());
    }

    #[test]
    fn test_delete_entry_key_only() {
        let entry = AuditEntry::delete("root", "AB936000", Edition::initial());
        assert_eq!(entry.fields.populated_count(), 1);
        assert_eq!(entry.fields.edition.as_deref(), Some("00"));
    }

    #[test]
    fn test_serialization_skips_absent_fields() {
        let entry = AuditEntry::print("rvance", "AB936000", Edition::initial(), false);
        let json = serde_json::to_string(&entry).unwrap();
        assert!(!json.contains("\"state\""));
        assert!(json.contains("\"edition\""));

        let back: AuditEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back.action, AuditAction::Print);
        assert!(back.fields.state.is_none());
    }

    #[test]
    fn test_human_readable_format() {
        let entry = AuditEntry::add("rvance", &record());
        let formatted = entry.format_human_readable();
        assert!(formatted.contains("Add"));
        assert!(formatted.contains("AB936000"));
        assert!(formatted.contains("rvance"));
    }
}
