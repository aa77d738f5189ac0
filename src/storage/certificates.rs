//! Certificate repository for JSON storage
//!
//! Every edition of a certificate is a full, independent row keyed by
//! `(cert_no, edition)`. The repository also owns number allocation:
//! `allocate_and_insert` picks the next free number and inserts the new row
//! under one write lock, so two concurrent creates can never observe the same
//! "latest" number.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{CertError, CertResult};
use crate::models::number::next_suffix;
use crate::models::{CertificateNumber, CertificateRecord, Edition, SearchCriteria};

use super::file_io::{read_json, write_json_atomic};

/// Serializable certificate data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct CertificateData {
    certificates: Vec<CertificateRecord>,
}

/// One search result row with its latest-edition marker
#[derive(Debug, Clone)]
pub struct SearchRow {
    pub record: CertificateRecord,
    /// Whether this row is the highest edition of its certificate number
    pub is_latest_edition: bool,
}

/// One page of search results
#[derive(Debug, Clone)]
pub struct SearchPage {
    pub rows: Vec<SearchRow>,
    /// Total number of matching rows across all pages
    pub total: usize,
    /// 1-based page number
    pub page: usize,
    pub page_size: usize,
}

impl SearchPage {
    pub fn total_pages(&self) -> usize {
        if self.page_size == 0 {
            return 1;
        }
        self.total.div_ceil(self.page_size).max(1)
    }
}

/// Repository for certificate persistence
pub struct CertificateRepository {
    path: PathBuf,
    data: RwLock<HashMap<(CertificateNumber, Edition), CertificateRecord>>,
}

impl CertificateRepository {
    /// Create a new certificate repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load certificates from disk
    pub fn load(&self) -> CertResult<()> {
        let file_data: CertificateData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| CertError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for record in file_data.certificates {
            data.insert((record.cert_no.clone(), record.edition), record);
        }

        Ok(())
    }

    /// Save certificates to disk
    pub fn save(&self) -> CertResult<()> {
        let data = self
            .data
            .read()
            .map_err(|e| CertError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut certificates: Vec<_> = data.values().cloned().collect();
        certificates.sort_by(|a, b| {
            a.cert_no
                .cmp(&b.cert_no)
                .then(a.edition.cmp(&b.edition))
        });

        write_json_atomic(&self.path, &CertificateData { certificates })
    }

    /// Get one edition of a certificate
    pub fn get(&self, cert_no: &str, edition: Edition) -> CertResult<Option<CertificateRecord>> {
        let data = self
            .data
            .read()
            .map_err(|e| CertError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data
            .get(&(CertificateNumber::new(cert_no), edition))
            .cloned())
    }

    /// Get the current (highest) edition of a certificate
    pub fn current_edition(&self, cert_no: &str) -> CertResult<Option<CertificateRecord>> {
        let data = self
            .data
            .read()
            .map_err(|e| CertError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data
            .values()
            .filter(|r| r.cert_no.as_str() == cert_no)
            .max_by_key(|r| r.edition)
            .cloned())
    }

    /// Get all editions of a certificate, oldest first
    pub fn editions_of(&self, cert_no: &str) -> CertResult<Vec<CertificateRecord>> {
        let data = self
            .data
            .read()
            .map_err(|e| CertError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut editions: Vec<_> = data
            .values()
            .filter(|r| r.cert_no.as_str() == cert_no)
            .cloned()
            .collect();
        editions.sort_by_key(|r| r.edition);
        Ok(editions)
    }

    /// The highest sequence suffix currently stored for a year-prefix code
    ///
    /// Read-only preview; the authoritative read happens again inside
    /// [`allocate_and_insert`](Self::allocate_and_insert) under its write lock.
    pub fn highest_suffix(&self, code: &str) -> CertResult<Option<u32>> {
        let data = self
            .data
            .read()
            .map_err(|e| CertError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data
            .keys()
            .filter(|(no, _)| no.has_prefix(code))
            .filter_map(|(no, _)| no.suffix())
            .max())
    }

    /// Allocate the next certificate number for a year-prefix code and insert
    /// the new record under the same write lock
    ///
    /// The template's `cert_no` is overwritten with the allocated number. The
    /// lock is held across the read-highest and insert steps, making the pair
    /// a single unit of work.
    pub fn allocate_and_insert(
        &self,
        code: &str,
        mut template: CertificateRecord,
    ) -> CertResult<CertificateRecord> {
        let mut data = self
            .data
            .write()
            .map_err(|e| CertError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let highest = data
            .keys()
            .filter(|(no, _)| no.has_prefix(code))
            .filter_map(|(no, _)| no.suffix())
            .max();

        let number = CertificateNumber::format(code, next_suffix(highest)?);
        template.cert_no = number.clone();

        let key = (number, template.edition);
        if data.contains_key(&key) {
            return Err(CertError::Duplicate {
                entity_type: "Certificate",
                identifier: format!("{} edition {}", key.0, key.1),
            });
        }

        data.insert(key, template.clone());
        Ok(template)
    }

    /// Insert a new edition row, rejecting duplicates
    pub fn insert(&self, record: CertificateRecord) -> CertResult<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| CertError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let key = (record.cert_no.clone(), record.edition);
        if data.contains_key(&key) {
            return Err(CertError::Duplicate {
                entity_type: "Certificate",
                identifier: format!("{} edition {}", key.0, key.1),
            });
        }

        data.insert(key, record);
        Ok(())
    }

    /// Replace an existing edition row in place
    pub fn replace(&self, record: CertificateRecord) -> CertResult<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| CertError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let key = (record.cert_no.clone(), record.edition);
        if !data.contains_key(&key) {
            return Err(CertError::certificate_not_found(format!(
                "{} edition {}",
                key.0, key.1
            )));
        }

        data.insert(key, record);
        Ok(())
    }

    /// Remove one edition row
    pub fn remove(&self, cert_no: &str, edition: Edition) -> CertResult<bool> {
        let mut data = self
            .data
            .write()
            .map_err(|e| CertError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data
            .remove(&(CertificateNumber::new(cert_no), edition))
            .is_some())
    }

    /// Check if an edition row exists
    pub fn exists(&self, cert_no: &str, edition: Edition) -> CertResult<bool> {
        let data = self
            .data
            .read()
            .map_err(|e| CertError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.contains_key(&(CertificateNumber::new(cert_no), edition)))
    }

    /// Count edition rows
    pub fn count(&self) -> CertResult<usize> {
        let data = self
            .data
            .read()
            .map_err(|e| CertError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }

    /// Run a paged search, newest certificate numbers first
    ///
    /// `page` is 1-based. The latest-edition marker is computed against all
    /// stored editions, not only the matching ones.
    pub fn search(
        &self,
        criteria: &SearchCriteria,
        page: usize,
        page_size: usize,
    ) -> CertResult<SearchPage> {
        let data = self
            .data
            .read()
            .map_err(|e| CertError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut latest: HashMap<&CertificateNumber, Edition> = HashMap::new();
        for (no, edition) in data.keys() {
            let entry = latest.entry(no).or_insert(*edition);
            if *edition > *entry {
                *entry = *edition;
            }
        }

        let mut matching: Vec<&CertificateRecord> =
            data.values().filter(|r| criteria.matches(r)).collect();
        matching.sort_by(|a, b| {
            b.cert_no
                .cmp(&a.cert_no)
                .then(b.edition.cmp(&a.edition))
        });

        let total = matching.len();
        let page = page.max(1);
        let rows = matching
            .into_iter()
            .skip((page - 1) * page_size)
            .take(page_size)
            .map(|r| SearchRow {
                is_latest_edition: latest.get(&r.cert_no) == Some(&r.edition),
                record: r.clone(),
            })
            .collect();

        Ok(SearchPage {
            rows,
            total,
            page,
            page_size,
        })
    }

    /// All matching rows without paging, newest first (used by export)
    pub fn all_matching(&self, criteria: &SearchCriteria) -> CertResult<Vec<CertificateRecord>> {
        let data = self
            .data
            .read()
            .map_err(|e| CertError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut matching: Vec<_> = data
            .values()
            .filter(|r| criteria.matches(r))
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            b.cert_no
                .cmp(&a.cert_no)
                .then(b.edition.cmp(&a.edition))
        });
        Ok(matching)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CertState;
    use chrono::{NaiveDate, Utc};
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, CertificateRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("certificates.json");
        let repo = CertificateRepository::new(path);
        (temp_dir, repo)
    }

    fn record(cert_no: &str, edition: u32) -> CertificateRecord {
        CertificateRecord {
            cert_no: CertificateNumber::new(cert_no),
            edition: Edition::from_number(edition).unwrap(),
            product_no: "PN-100".into(),
            product_description: "Widget".into(),
            product_type: "Assembly".into(),
            manufacturer: "Acme".into(),
            serial_no: "SN-0042".into(),
            serialization: "Yes".into(),
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
            state: CertState::Valid,
            comment: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_allocation_starts_at_floor() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let created = repo.allocate_and_insert("AB", record("", 0)).unwrap();
        assert_eq!(created.cert_no.as_str(), "AB936000");
    }

    #[test]
    fn test_allocation_increments_highest() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.insert(record("AB936000", 0)).unwrap();
        repo.insert(record("AB936007", 0)).unwrap();
        // Another year's sequence must not interfere
        repo.insert(record("CD939000", 0)).unwrap();

        let created = repo.allocate_and_insert("AB", record("", 0)).unwrap();
        assert_eq!(created.cert_no.as_str(), "AB936008");
    }

    #[test]
    fn test_allocation_exhausted_at_9999() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.insert(record("AB939999", 0)).unwrap();

        let err = repo.allocate_and_insert("AB", record("", 0)).unwrap_err();
        assert!(matches!(err, CertError::AllocationExhausted(_)));
    }

    #[test]
    fn test_insert_rejects_duplicate_edition() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.insert(record("AB936000", 0)).unwrap();
        let err = repo.insert(record("AB936000", 0)).unwrap_err();
        assert!(matches!(err, CertError::Duplicate { .. }));

        // A later edition of the same number is fine
        repo.insert(record("AB936000", 1)).unwrap();
        assert_eq!(repo.count().unwrap(), 2);
    }

    #[test]
    fn test_current_edition_is_highest() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.insert(record("AB936000", 0)).unwrap();
        repo.insert(record("AB936000", 2)).unwrap();
        repo.insert(record("AB936000", 1)).unwrap();

        let current = repo.current_edition("AB936000").unwrap().unwrap();
        assert_eq!(current.edition.number(), 2);

        let editions = repo.editions_of("AB936000").unwrap();
        assert_eq!(editions.len(), 3);
        assert_eq!(editions[0].edition.number(), 0);
        assert_eq!(editions[2].edition.number(), 2);
    }

    #[test]
    fn test_replace_requires_existing() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let err = repo.replace(record("AB936000", 0)).unwrap_err();
        assert!(err.is_not_found());

        repo.insert(record("AB936000", 0)).unwrap();
        let mut updated = record("AB936000", 0);
        updated.serial_no = "SN-0099".into();
        repo.replace(updated).unwrap();

        let stored = repo.get("AB936000", Edition::initial()).unwrap().unwrap();
        assert_eq!(stored.serial_no, "SN-0099");
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.insert(record("AB936000", 0)).unwrap();
        repo.save().unwrap();

        let repo2 = CertificateRepository::new(temp_dir.path().join("certificates.json"));
        repo2.load().unwrap();
        assert!(repo2.exists("AB936000", Edition::initial()).unwrap());
    }

    #[test]
    fn test_remove() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.insert(record("AB936000", 0)).unwrap();
        assert!(repo.remove("AB936000", Edition::initial()).unwrap());
        assert!(!repo.remove("AB936000", Edition::initial()).unwrap());
    }

    #[test]
    fn test_search_pagination_and_latest_marker() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        for suffix in 6000..6005 {
            repo.insert(record(&format!("AB93{}", suffix), 0)).unwrap();
        }
        repo.insert(record("AB936004", 1)).unwrap();

        let page = repo.search(&SearchCriteria::default(), 1, 4).unwrap();
        assert_eq!(page.total, 6);
        assert_eq!(page.rows.len(), 4);
        assert_eq!(page.total_pages(), 2);

        // Newest number first, higher edition before lower
        assert_eq!(page.rows[0].record.cert_no.as_str(), "AB936004");
        assert_eq!(page.rows[0].record.edition.number(), 1);
        assert!(page.rows[0].is_latest_edition);
        assert_eq!(page.rows[1].record.cert_no.as_str(), "AB936004");
        assert!(!page.rows[1].is_latest_edition);

        let page2 = repo.search(&SearchCriteria::default(), 2, 4).unwrap();
        assert_eq!(page2.rows.len(), 2);
    }

    #[test]
    fn test_search_applies_criteria() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.insert(record("AB936000", 0)).unwrap();
        let mut other = record("AB936001", 0);
        other.serial_no = "SN-0777".into();
        repo.insert(other).unwrap();

        let criteria = SearchCriteria {
            serial_no: Some("0777".into()),
            ..Default::default()
        };
        let page = repo.search(&criteria, 1, 25).unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.rows[0].record.cert_no.as_str(), "AB936001");
    }
}
