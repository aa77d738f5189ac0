//! Certificate record model
//!
//! A certificate is identified by its number and edition; every edition is a
//! full, independent row. Once an edition is superseded by a later one it is
//! frozen as history and never mutated again.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CertError, CertResult};

use super::number::{CertificateNumber, Edition};

/// Lifecycle state of one certificate edition
///
/// `Valid` is the initial state of every newly created edition. No other
/// states are reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CertState {
    #[default]
    Valid,
    Printed,
    Cancelled,
}

impl CertState {
    /// Whether an update request may mutate the current row in place
    pub fn updatable_in_place(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Parse from the stored text form
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            s if s.eq_ignore_ascii_case("valid") => Some(Self::Valid),
            s if s.eq_ignore_ascii_case("printed") => Some(Self::Printed),
            s if s.eq_ignore_ascii_case("cancelled") => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for CertState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid => write!(f, "Valid"),
            Self::Printed => write!(f, "Printed"),
            Self::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// One edition of a quality certificate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateRecord {
    /// Certificate number, shared by all editions
    pub cert_no: CertificateNumber,

    /// Edition counter; (cert_no, edition) is unique
    pub edition: Edition,

    /// Product reference
    pub product_no: String,

    /// Description resolved from the part-number register
    #[serde(default)]
    pub product_description: String,

    #[serde(default)]
    pub product_type: String,

    #[serde(default)]
    pub manufacturer: String,

    pub serial_no: String,

    /// "Yes" when the part is serialized; drives the work-order form field
    #[serde(default)]
    pub serialization: String,

    /// Comma-joined list of amendment codes
    pub amendment: String,

    /// Name of the approving signatory
    pub signatory: String,

    /// Approval date
    pub date: NaiveDate,

    /// Quantity, zero-padded to 2 digits below 10
    pub quantity: String,

    #[serde(default)]
    pub remarks1: String,
    #[serde(default)]
    pub remarks2: String,
    #[serde(default)]
    pub remarks3: String,
    #[serde(default)]
    pub remarks4: String,

    #[serde(default)]
    pub authorisation: String,

    #[serde(default)]
    pub item: String,

    #[serde(default)]
    pub status: String,

    /// Approved-design indicator
    #[serde(default)]
    pub approved: String,

    /// Lifecycle state of this edition
    #[serde(default)]
    pub state: CertState,

    #[serde(default)]
    pub comment: String,

    /// When this edition's row was created (UTC)
    pub created_at: DateTime<Utc>,
}

impl CertificateRecord {
    /// The approval date in the form layout's display format
    pub fn display_date(&self) -> String {
        self.date.format("%d %b %Y").to_string()
    }
}

/// Form-bound certificate fields as submitted by the caller
///
/// Raw strings are validated and normalized by [`CertificateFields::validate`]
/// before any transition or write happens.
#[derive(Debug, Clone, Default)]
pub struct CertificateFields {
    pub product_no: String,
    pub serial_no: String,
    pub amendment: Vec<String>,
    pub signatory: String,
    pub date: String,
    pub quantity: String,
    pub remarks1: Option<String>,
    pub remarks2: Option<String>,
    pub remarks3: Option<String>,
    pub remarks4: Option<String>,
    pub authorisation: Option<String>,
    pub item: Option<String>,
    pub status: Option<String>,
    pub approved: Option<String>,
    pub comment: Option<String>,
}

/// Certificate fields after validation: date parsed, quantity reformatted,
/// amendment codes joined
#[derive(Debug, Clone)]
pub struct ValidatedFields {
    pub product_no: String,
    pub serial_no: String,
    pub amendment: String,
    pub signatory: String,
    pub date: NaiveDate,
    pub quantity: String,
    pub remarks1: String,
    pub remarks2: String,
    pub remarks3: String,
    pub remarks4: String,
    pub authorisation: String,
    pub item: String,
    pub status: String,
    pub approved: String,
    pub comment: String,
}

impl CertificateFields {
    /// Validate all fields, collecting every violation before reporting
    ///
    /// Quantity is accepted in `[0, 99999]` and reformatted to a 2-digit
    /// zero-padded string below 10, plain decimal otherwise.
    pub fn validate(&self) -> CertResult<ValidatedFields> {
        let mut errors = Vec::new();

        if self.product_no.trim().is_empty() {
            errors.push("Product Number is required.".to_string());
        }
        if self.serial_no.trim().is_empty() {
            errors.push("Serial Number is required.".to_string());
        }
        if self.amendment.iter().all(|a| a.trim().is_empty()) {
            errors.push("Amendment is required.".to_string());
        }
        if self.signatory.trim().is_empty() {
            errors.push("Signatory is required.".to_string());
        }

        let mut date = None;
        if self.date.trim().is_empty() {
            errors.push("Approval Date is required.".to_string());
        } else {
            match NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d") {
                Ok(d) => date = Some(d),
                Err(_) => errors.push("Invalid date format.".to_string()),
            }
        }

        let mut quantity = None;
        if self.quantity.trim().is_empty() {
            errors.push("Quantity is required.".to_string());
        } else {
            match self.quantity.trim().parse::<i64>() {
                Ok(n) if (0..=99999).contains(&n) => quantity = Some(format_quantity(n as u32)),
                Ok(_) => errors.push("Quantity must be between 0 and 99999.".to_string()),
                Err(_) => errors.push("Quantity must have a valid number format.".to_string()),
            }
        }

        if !errors.is_empty() {
            return Err(CertError::Validation(errors));
        }

        let opt = |v: &Option<String>| v.clone().unwrap_or_default().trim().to_string();

        Ok(ValidatedFields {
            product_no: self.product_no.trim().to_string(),
            serial_no: self.serial_no.trim().to_string(),
            amendment: self
                .amendment
                .iter()
                .map(|a| a.trim())
                .filter(|a| !a.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
            signatory: self.signatory.trim().to_string(),
            date: date.expect("date validated above"),
            quantity: quantity.expect("quantity validated above"),
            remarks1: opt(&self.remarks1),
            remarks2: opt(&self.remarks2),
            remarks3: opt(&self.remarks3),
            remarks4: opt(&self.remarks4),
            authorisation: opt(&self.authorisation),
            item: opt(&self.item),
            status: opt(&self.status),
            approved: opt(&self.approved),
            comment: opt(&self.comment),
        })
    }
}

/// Format a validated quantity for storage: "05" below 10, "123" otherwise
pub fn format_quantity(n: u32) -> String {
    if n < 10 {
        format!("{:02}", n)
    } else {
        n.to_string()
    }
}
