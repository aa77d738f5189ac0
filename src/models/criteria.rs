//! Search criteria for certificate queries
//!
//! Request-scoped filter over certificate fields; never persisted. Matching
//! mirrors the search form: partial match on certificate number and serial
//! number, exact match on product, signatory, and the amendment set, a date
//! range on the approval date, and substring match on quantity, edition, and
//! state.

use chrono::NaiveDate;

use crate::error::{CertError, CertResult};

use super::certificate::{format_quantity, CertificateRecord};

/// Free-form certificate filter
#[derive(Debug, Clone, Default)]
pub struct SearchCriteria {
    pub cert_no: Option<String>,
    pub product_no: Option<String>,
    pub serial_no: Option<String>,
    pub amendment: Vec<String>,
    pub signatory: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub quantity: Option<String>,
    pub edition: Option<String>,
    pub state: Option<String>,
}

impl SearchCriteria {
    /// Normalize numeric inputs the way records store them and check the
    /// date range
    ///
    /// An edition given as a bare number in 0..=99 is zero-padded; a
    /// quantity in 0..=9999 is reformatted like stored quantities.
    pub fn normalize(mut self) -> CertResult<Self> {
        if let Some(edition) = &self.edition {
            if let Ok(n) = edition.trim().parse::<u32>() {
                if n <= 99 {
                    self.edition = Some(format!("{:02}", n));
                }
            }
        }
        if let Some(quantity) = &self.quantity {
            if let Ok(n) = quantity.trim().parse::<u32>() {
                if n <= 9999 {
                    self.quantity = Some(format_quantity(n));
                }
            }
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                return Err(CertError::validation(
                    "Start date cannot be later than end date.",
                ));
            }
        }
        Ok(self)
    }

    /// Whether a record satisfies every populated filter
    pub fn matches(&self, record: &CertificateRecord) -> bool {
        if let Some(cert_no) = non_blank(&self.cert_no) {
            if !record.cert_no.as_str().contains(cert_no) {
                return false;
            }
        }
        if let Some(product_no) = non_blank(&self.product_no) {
            if record.product_no != product_no {
                return false;
            }
        }
        if let Some(serial_no) = non_blank(&self.serial_no) {
            if !record.serial_no.contains(serial_no) {
                return false;
            }
        }
        if self.amendment.iter().any(|a| !a.trim().is_empty()) {
            let joined = self
                .amendment
                .iter()
                .map(|a| a.trim())
                .filter(|a| !a.is_empty())
                .collect::<Vec<_>>()
                .join(", ");
            if record.amendment != joined {
                return false;
            }
        }
        if let Some(signatory) = non_blank(&self.signatory) {
            if record.signatory != signatory {
                return false;
            }
        }
        if let Some(start) = self.start_date {
            if record.date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if record.date > end {
                return false;
            }
        }
        if let Some(quantity) = non_blank(&self.quantity) {
            if !record.quantity.contains(quantity) {
                return false;
            }
        }
        if let Some(edition) = non_blank(&self.edition) {
            if !record.edition.to_string().contains(edition) {
                return false;
            }
        }
        if let Some(state) = non_blank(&self.state) {
            if !record
                .state
                .to_string()
                .to_lowercase()
                .contains(&state.to_lowercase())
            {
                return false;
            }
        }
        true
    }
}

fn non_blank(opt: &Option<String>) -> Option<&str> {
    opt.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
