//! Certificate number allocation
//!
//! Resolves the year's prefix code and previews the next number in the
//! sequence. The authoritative allocation happens inside the certificate
//! repository's `allocate_and_insert`, which re-reads the highest suffix
//! under its write lock; this service exists for lookups and the preview
//! operation.

use crate::error::{CertError, CertResult};
use crate::models::number::next_suffix;
use crate::models::{CertificateNumber, YearPrefix};
use crate::storage::Storage;

/// Service for certificate number allocation
pub struct AllocatorService<'a> {
    storage: &'a Storage,
}

impl<'a> AllocatorService<'a> {
    /// Create a new allocator service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Get the prefix assigned to a year, failing when none is configured
    pub fn prefix_for_year(&self, year: i32) -> CertResult<YearPrefix> {
        self.storage.prefixes.get(year)?.ok_or_else(|| {
            CertError::Config(format!(
                "No certificate number prefix is configured for year {}.",
                year
            ))
        })
    }

    /// Preview the next certificate number for a year
    ///
    /// The returned number is not reserved; a concurrent create may take it.
    pub fn next_number(&self, year: i32) -> CertResult<CertificateNumber> {
        let prefix = self.prefix_for_year(year)?;
        let highest = self.storage.certificates.highest_suffix(&prefix.code)?;
        Ok(CertificateNumber::format(&prefix.code, next_suffix(highest)?))
    }
}
