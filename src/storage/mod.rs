//! Storage layer for certdesk
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation, plus the append-only audit log. The `log_*` helpers implement
//! the audit policy: a failed audit write is reported on stderr but never
//! fails the primary mutation that triggered it.

pub mod certificates;
pub mod file_io;
pub mod init;
pub mod prefixes;
pub mod reference;
pub mod users;

pub use certificates::{CertificateRepository, SearchPage, SearchRow};
pub use file_io::{read_json, write_json_atomic};
pub use init::{initialize_storage, needs_initialization};
pub use prefixes::PrefixRepository;
pub use reference::ReferenceRepository;
pub use users::UserRepository;

use crate::audit::{AuditEntry, AuditLogger, FieldValues};
use crate::config::paths::CertPaths;
use crate::error::CertResult;
use crate::models::{CertificateRecord, Edition};

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: CertPaths,
    pub certificates: CertificateRepository,
    pub prefixes: PrefixRepository,
    pub users: UserRepository,
    pub reference: ReferenceRepository,
    pub audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: CertPaths) -> CertResult<Self> {
        // Ensure directories exist
        paths.ensure_directories()?;

        Ok(Self {
            certificates: CertificateRepository::new(paths.certificates_file()),
            prefixes: PrefixRepository::new(paths.prefixes_file()),
            users: UserRepository::new(paths.users_file()),
            reference: ReferenceRepository::new(paths.reference_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &CertPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&self) -> CertResult<()> {
        self.certificates.load()?;
        self.prefixes.load()?;
        self.users.load()?;
        self.reference.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> CertResult<()> {
        self.certificates.save()?;
        self.prefixes.save()?;
        self.users.save()?;
        self.reference.save()?;
        Ok(())
    }

    /// Record a full-snapshot Add entry for a newly created certificate
    pub fn log_add(&self, performed_by: &str, record: &CertificateRecord) {
        self.record_audit(AuditEntry::add(performed_by, record));
    }

    /// Record an Update entry carrying only the changed fields
    pub fn log_update(&self, performed_by: &str, cert_no: &str, changes: FieldValues) {
        self.record_audit(AuditEntry::update(performed_by, cert_no, changes));
    }

    /// Record a Print entry; the state field is set only when the print
    /// transitioned the edition out of Valid
    pub fn log_print(&self, performed_by: &str, cert_no: &str, edition: Edition, state_changed: bool) {
        self.record_audit(AuditEntry::print(performed_by, cert_no, edition, state_changed));
    }

    /// Record a Cancel entry with the optional cancellation comment
    pub fn log_cancel(
        &self,
        performed_by: &str,
        cert_no: &str,
        edition: Edition,
        comment: Option<String>,
    ) {
        self.record_audit(AuditEntry::cancel(performed_by, cert_no, edition, comment));
    }

    /// Record a key-only Delete entry
    pub fn log_delete(&self, performed_by: &str, cert_no: &str, edition: Edition) {
        self.record_audit(AuditEntry::delete(performed_by, cert_no, edition));
    }

    fn record_audit(&self, entry: AuditEntry) {
        if let Err(e) = self.audit.log(&entry) {
            eprintln!(
                "warning: audit log write failed for {} {}: {}",
                entry.action, entry.cert_no, e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CertPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        storage.load_all().unwrap();
        assert_eq!(storage.certificates.count().unwrap(), 0);
    }

    #[test]
    fn test_audit_helpers_append() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CertPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        storage.log_print("rvance", "AB936000", Edition::initial(), true);
        storage.log_delete("admin", "AB936000", Edition::initial());

        let entries = storage.audit.read_all().unwrap();
        assert_eq!(entries.len(), 2);
    }
}
