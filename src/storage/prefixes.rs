//! Year-prefix repository for JSON storage
//!
//! Holds the administrative year-to-code assignments the allocator resolves
//! certificate numbers from. At most one code exists per calendar year.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{CertError, CertResult};
use crate::models::YearPrefix;

use super::file_io::{read_json, write_json_atomic};

/// Serializable prefix data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct PrefixData {
    prefixes: Vec<YearPrefix>,
}

/// Repository for year-prefix persistence
pub struct PrefixRepository {
    path: PathBuf,
    data: RwLock<HashMap<i32, YearPrefix>>,
}

impl PrefixRepository {
    /// Create a new prefix repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load prefixes from disk
    pub fn load(&self) -> CertResult<()> {
        let file_data: PrefixData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| CertError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for prefix in file_data.prefixes {
            data.insert(prefix.year, prefix);
        }

        Ok(())
    }

    /// Save prefixes to disk
    pub fn save(&self) -> CertResult<()> {
        let data = self
            .data
            .read()
            .map_err(|e| CertError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut prefixes: Vec<_> = data.values().cloned().collect();
        prefixes.sort_by_key(|p| p.year);

        write_json_atomic(&self.path, &PrefixData { prefixes })
    }

    /// Get the prefix assigned to a year
    pub fn get(&self, year: i32) -> CertResult<Option<YearPrefix>> {
        let data = self
            .data
            .read()
            .map_err(|e| CertError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&year).cloned())
    }

    /// Add a prefix for a year that has none yet
    pub fn add(&self, prefix: YearPrefix) -> CertResult<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| CertError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if data.contains_key(&prefix.year) {
            return Err(CertError::Duplicate {
                entity_type: "Prefix",
                identifier: prefix.year.to_string(),
            });
        }

        data.insert(prefix.year, prefix);
        Ok(())
    }

    /// Insert or replace the prefix for a year
    pub fn upsert(&self, prefix: YearPrefix) -> CertResult<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| CertError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(prefix.year, prefix);
        Ok(())
    }

    /// Delete the prefix for a year
    pub fn delete(&self, year: i32) -> CertResult<bool> {
        let mut data = self
            .data
            .write()
            .map_err(|e| CertError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&year).is_some())
    }

    /// Get all prefixes, ordered by year
    pub fn get_all(&self) -> CertResult<Vec<YearPrefix>> {
        let data = self
            .data
            .read()
            .map_err(|e| CertError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut prefixes: Vec<_> = data.values().cloned().collect();
        prefixes.sort_by_key(|p| p.year);
        Ok(prefixes)
    }

    /// Count prefixes
    pub fn count(&self) -> CertResult<usize> {
        let data = self
            .data
            .read()
            .map_err(|e| CertError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, PrefixRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prefixes.json");
        let repo = PrefixRepository::new(path);
        (temp_dir, repo)
    }

    #[test]
    fn test_add_and_get() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.add(YearPrefix::new(2024, "AB")).unwrap();

        let prefix = repo.get(2024).unwrap().unwrap();
        assert_eq!(prefix.code, "AB");
        assert!(repo.get(2023).unwrap().is_none());
    }

    #[test]
    fn test_add_rejects_duplicate_year() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.add(YearPrefix::new(2024, "AB")).unwrap();
        let err = repo.add(YearPrefix::new(2024, "CD")).unwrap_err();
        assert!(matches!(err, CertError::Duplicate { .. }));

        // The original assignment stays
        assert_eq!(repo.get(2024).unwrap().unwrap().code, "AB");
    }

    #[test]
    fn test_upsert_replaces() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.add(YearPrefix::new(2024, "AB")).unwrap();
        repo.upsert(YearPrefix::new(2024, "CD")).unwrap();
        assert_eq!(repo.get(2024).unwrap().unwrap().code, "CD");
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.add(YearPrefix::new(2023, "ZX")).unwrap();
        repo.add(YearPrefix::new(2024, "AB")).unwrap();
        repo.save().unwrap();

        let repo2 = PrefixRepository::new(temp_dir.path().join("prefixes.json"));
        repo2.load().unwrap();

        let all = repo2.get_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].year, 2023);
        assert_eq!(all[1].year, 2024);
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.add(YearPrefix::new(2024, "AB")).unwrap();
        assert!(repo.delete(2024).unwrap());
        assert!(!repo.delete(2024).unwrap());
        assert_eq!(repo.count().unwrap(), 0);
    }
}
