//! Certificate service
//!
//! Business logic for the certificate lifecycle: creation with number
//! allocation, the state-conditioned update routing, printing, cancellation,
//! edition deletion, and search. Every mutation validates first, writes
//! second, and audits last; audit failures never undo the write.

use chrono::{Datelike, Utc};

use crate::audit::diff_records;
use crate::config::Settings;
use crate::error::{CertError, CertResult};
use crate::models::{
    CertState, CertificateFields, CertificateRecord, Edition, RequestContext, SearchCriteria,
    ValidatedFields,
};
use crate::render::CertificateRenderer;
use crate::storage::{SearchPage, Storage};

use super::allocator::AllocatorService;

/// Service for certificate lifecycle management
pub struct CertificateService<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
}

/// Result of an update request
#[derive(Debug, Clone)]
pub struct UpdateOutcome {
    pub record: CertificateRecord,
    /// True when the update appended a new edition instead of mutating in place
    pub new_edition: bool,
    /// False when nothing differed and no write or audit entry happened
    pub changed: bool,
}

impl<'a> CertificateService<'a> {
    /// Create a new certificate service
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self { storage, settings }
    }

    /// Create a certificate under the year's prefix
    ///
    /// Allocates the next number and inserts edition 00 in one repository
    /// unit of work, then records a full-snapshot Add audit entry.
    pub fn create(
        &self,
        ctx: &RequestContext,
        year: Option<i32>,
        fields: &CertificateFields,
    ) -> CertResult<CertificateRecord> {
        let validated = fields.validate()?;

        let year = year.unwrap_or_else(|| Utc::now().year());
        let prefix = AllocatorService::new(self.storage).prefix_for_year(year)?;

        let template = self.build_record(Edition::initial(), &validated)?;
        let record = self
            .storage
            .certificates
            .allocate_and_insert(&prefix.code, template)?;
        self.storage.certificates.save()?;

        self.storage.log_add(&ctx.user_id, &record);
        Ok(record)
    }

    /// Get the current (highest) edition of a certificate
    pub fn current_edition(&self, cert_no: &str) -> CertResult<CertificateRecord> {
        self.storage
            .certificates
            .current_edition(cert_no)?
            .ok_or_else(|| CertError::certificate_not_found(cert_no))
    }

    /// Get one specific edition of a certificate
    pub fn edition(&self, cert_no: &str, edition: Edition) -> CertResult<CertificateRecord> {
        self.storage
            .certificates
            .get(cert_no, edition)?
            .ok_or_else(|| {
                CertError::certificate_not_found(format!("{} edition {}", cert_no, edition))
            })
    }

    /// Get every edition of a certificate, oldest first
    pub fn editions(&self, cert_no: &str) -> CertResult<Vec<CertificateRecord>> {
        let editions = self.storage.certificates.editions_of(cert_no)?;
        if editions.is_empty() {
            return Err(CertError::certificate_not_found(cert_no));
        }
        Ok(editions)
    }

    /// Update a certificate edition
    ///
    /// Routing depends on the edition's state: Valid rows are mutated in
    /// place, Printed rows are frozen and superseded by a new edition, and
    /// Cancelled rows reject the update unless the `allow_cancelled_update`
    /// setting permits the new-edition path. An update that changes nothing
    /// succeeds without writing or auditing anything.
    pub fn update(
        &self,
        ctx: &RequestContext,
        cert_no: &str,
        edition: Edition,
        fields: &CertificateFields,
    ) -> CertResult<UpdateOutcome> {
        ctx.require_signatory()?;

        let existing = self.edition(cert_no, edition)?;
        let validated = fields.validate()?;

        match existing.state {
            CertState::Valid => self.update_in_place(ctx, existing, &validated),
            CertState::Printed => self.update_as_new_edition(ctx, existing, &validated),
            CertState::Cancelled => {
                if !self.settings.allow_cancelled_update {
                    return Err(CertError::IllegalState(
                        "Cannot update a cancelled certificate".into(),
                    ));
                }
                self.update_as_new_edition(ctx, existing, &validated)
            }
        }
    }

    fn update_in_place(
        &self,
        ctx: &RequestContext,
        existing: CertificateRecord,
        validated: &ValidatedFields,
    ) -> CertResult<UpdateOutcome> {
        let mut candidate = self.apply_fields(&existing, validated)?;
        candidate.cert_no = existing.cert_no.clone();
        candidate.edition = existing.edition;
        candidate.state = existing.state;
        candidate.created_at = existing.created_at;

        let changes = diff_records(&existing, &candidate);
        if changes.is_empty() {
            return Ok(UpdateOutcome {
                record: existing,
                new_edition: false,
                changed: false,
            });
        }

        self.storage.certificates.replace(candidate.clone())?;
        self.storage.certificates.save()?;
        self.storage
            .log_update(&ctx.user_id, candidate.cert_no.as_str(), changes);

        Ok(UpdateOutcome {
            record: candidate,
            new_edition: false,
            changed: true,
        })
    }

    fn update_as_new_edition(
        &self,
        ctx: &RequestContext,
        existing: CertificateRecord,
        validated: &ValidatedFields,
    ) -> CertResult<UpdateOutcome> {
        let mut candidate = self.apply_fields(&existing, validated)?;
        candidate.cert_no = existing.cert_no.clone();
        candidate.edition = existing.edition.next()?;
        candidate.state = CertState::Valid;
        candidate.created_at = Utc::now();

        let changes = diff_records(&existing, &candidate);
        if changes.is_empty() {
            return Ok(UpdateOutcome {
                record: existing,
                new_edition: false,
                changed: false,
            });
        }

        self.storage.certificates.insert(candidate.clone())?;
        self.storage.certificates.save()?;
        self.storage
            .log_update(&ctx.user_id, candidate.cert_no.as_str(), changes);

        Ok(UpdateOutcome {
            record: candidate,
            new_edition: true,
            changed: true,
        })
    }

    /// Print a certificate edition through the given renderer
    ///
    /// Rendering happens before any state change; a render failure leaves the
    /// record untouched. A Valid edition transitions to Printed; printing a
    /// Printed or Cancelled edition is a plain reprint with no transition.
    pub fn print(
        &self,
        ctx: &RequestContext,
        cert_no: &str,
        edition: Edition,
        renderer: &dyn CertificateRenderer,
    ) -> CertResult<Vec<u8>> {
        ctx.require_signatory()?;

        let mut record = self.edition(cert_no, edition)?;
        let bytes = renderer.render(&record)?;

        let state_changed = record.state == CertState::Valid;
        if state_changed {
            record.state = CertState::Printed;
            self.storage.certificates.replace(record.clone())?;
            self.storage.certificates.save()?;
        }

        self.storage
            .log_print(&ctx.user_id, cert_no, edition, state_changed);
        Ok(bytes)
    }

    /// Cancel a certificate edition
    ///
    /// Returns false without writing anything when the edition is already
    /// cancelled.
    pub fn cancel(
        &self,
        ctx: &RequestContext,
        cert_no: &str,
        edition: Edition,
        comment: Option<String>,
    ) -> CertResult<bool> {
        ctx.require_signatory()?;

        let mut record = self.edition(cert_no, edition)?;
        if record.state == CertState::Cancelled {
            return Ok(false);
        }

        record.state = CertState::Cancelled;
        if let Some(comment) = &comment {
            record.comment = comment.clone();
        }

        self.storage.certificates.replace(record)?;
        self.storage.certificates.save()?;
        self.storage.log_cancel(&ctx.user_id, cert_no, edition, comment);
        Ok(true)
    }

    /// Delete one edition row outright; administrators only
    pub fn delete_edition(
        &self,
        ctx: &RequestContext,
        cert_no: &str,
        edition: Edition,
    ) -> CertResult<bool> {
        ctx.require_admin()?;

        let removed = self.storage.certificates.remove(cert_no, edition)?;
        if removed {
            self.storage.certificates.save()?;
            self.storage.log_delete(&ctx.user_id, cert_no, edition);
        }
        Ok(removed)
    }

    /// Run a paged search using the configured page size
    pub fn search(&self, criteria: SearchCriteria, page: usize) -> CertResult<SearchPage> {
        let criteria = criteria.normalize()?;
        self.storage
            .certificates
            .search(&criteria, page, self.settings.page_size)
    }

    /// All rows matching the criteria, newest first (used by export)
    pub fn all_matching(&self, criteria: SearchCriteria) -> CertResult<Vec<CertificateRecord>> {
        let criteria = criteria.normalize()?;
        self.storage.certificates.all_matching(&criteria)
    }

    /// Build a record from validated fields, snapshotting product details
    /// from the part-number register and defaulting the authorisation number
    /// from reference data
    fn apply_fields(
        &self,
        existing: &CertificateRecord,
        validated: &ValidatedFields,
    ) -> CertResult<CertificateRecord> {
        let mut record = self.build_record(existing.edition, validated)?;
        // Keep the creation-time product snapshot unless the product changed
        if existing.product_no == validated.product_no {
            record.product_description = existing.product_description.clone();
            record.product_type = existing.product_type.clone();
            record.manufacturer = existing.manufacturer.clone();
            record.serialization = existing.serialization.clone();
        }
        if record.comment.is_empty() {
            record.comment = existing.comment.clone();
        }
        Ok(record)
    }

    fn build_record(
        &self,
        edition: Edition,
        validated: &ValidatedFields,
    ) -> CertResult<CertificateRecord> {
        let part = self.storage.reference.part(&validated.product_no)?;
        let (description, product_type, manufacturer, serialization) = match part {
            Some(p) => (p.description, p.product_type, p.manufacturer, p.serialization),
            None => Default::default(),
        };

        let authorisation = if validated.authorisation.is_empty() {
            self.storage.reference.authorisation_no()?
        } else {
            validated.authorisation.clone()
        };

        Ok(CertificateRecord {
            cert_no: crate::models::CertificateNumber::new(""),
            edition,
            product_no: validated.product_no.clone(),
            product_description: description,
            product_type,
            manufacturer,
            serial_no: validated.serial_no.clone(),
            serialization,
            amendment: validated.amendment.clone(),
            signatory: validated.signatory.clone(),
            date: validated.date,
            quantity: validated.quantity.clone(),
            remarks1: validated.remarks1.clone(),
            remarks2: validated.remarks2.clone(),
            remarks3: validated.remarks3.clone(),
            remarks4: validated.remarks4.clone(),
            authorisation,
            item: validated.item.clone(),
            status: validated.status.clone(),
            approved: validated.approved.clone(),
            state: CertState::Valid,
            comment: validated.comment.clone(),
            created_at: Utc::now(),
        })
    }
}
