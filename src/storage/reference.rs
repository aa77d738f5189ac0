//! Reference data repository for JSON storage
//!
//! Lookup data maintained administratively: the part-number register, the
//! amendment and status code lists, the approved-design indicators, and the
//! company's release authorisation number. Certificate creation snapshots
//! product details from here.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{CertError, CertResult};
use crate::models::PartNumber;

use super::file_io::{read_json, write_json_atomic};

/// Serializable reference data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ReferenceData {
    #[serde(default)]
    part_numbers: Vec<PartNumber>,

    #[serde(default)]
    amendments: Vec<String>,

    #[serde(default)]
    statuses: Vec<String>,

    #[serde(default)]
    approved_indicators: Vec<String>,

    #[serde(default)]
    authorisation_no: String,
}

/// Repository for reference data persistence
pub struct ReferenceRepository {
    path: PathBuf,
    data: RwLock<ReferenceData>,
}

impl ReferenceRepository {
    /// Create a new reference data repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(ReferenceData::default()),
        }
    }

    /// Load reference data from disk
    pub fn load(&self) -> CertResult<()> {
        let file_data: ReferenceData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| CertError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        *data = file_data;
        Ok(())
    }

    /// Save reference data to disk
    pub fn save(&self) -> CertResult<()> {
        let data = self
            .data
            .read()
            .map_err(|e| CertError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        write_json_atomic(&self.path, &*data)
    }

    /// Look up a part by product number
    pub fn part(&self, product_no: &str) -> CertResult<Option<PartNumber>> {
        let data = self
            .data
            .read()
            .map_err(|e| CertError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data
            .part_numbers
            .iter()
            .find(|p| p.product_no == product_no)
            .cloned())
    }

    /// Get the full part-number register, ordered by product number
    pub fn parts(&self) -> CertResult<Vec<PartNumber>> {
        let data = self
            .data
            .read()
            .map_err(|e| CertError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut parts = data.part_numbers.clone();
        parts.sort_by(|a, b| a.product_no.cmp(&b.product_no));
        Ok(parts)
    }

    /// Add a part to the register
    pub fn add_part(&self, part: PartNumber) -> CertResult<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| CertError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if data.part_numbers.iter().any(|p| p.product_no == part.product_no) {
            return Err(CertError::Duplicate {
                entity_type: "Part",
                identifier: part.product_no,
            });
        }

        data.part_numbers.push(part);
        Ok(())
    }

    /// Remove a part from the register
    pub fn remove_part(&self, product_no: &str) -> CertResult<bool> {
        let mut data = self
            .data
            .write()
            .map_err(|e| CertError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let before = data.part_numbers.len();
        data.part_numbers.retain(|p| p.product_no != product_no);
        Ok(data.part_numbers.len() < before)
    }

    /// Get the amendment code list
    pub fn amendments(&self) -> CertResult<Vec<String>> {
        let data = self
            .data
            .read()
            .map_err(|e| CertError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.amendments.clone())
    }

    /// Add an amendment code if not already present
    pub fn add_amendment(&self, code: impl Into<String>) -> CertResult<()> {
        let code = code.into();
        let mut data = self
            .data
            .write()
            .map_err(|e| CertError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if !data.amendments.contains(&code) {
            data.amendments.push(code);
        }
        Ok(())
    }

    /// Get the status code list
    pub fn statuses(&self) -> CertResult<Vec<String>> {
        let data = self
            .data
            .read()
            .map_err(|e| CertError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.statuses.clone())
    }

    /// Get the approved-design indicator list
    pub fn approved_indicators(&self) -> CertResult<Vec<String>> {
        let data = self
            .data
            .read()
            .map_err(|e| CertError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.approved_indicators.clone())
    }

    /// Get the release authorisation number
    pub fn authorisation_no(&self) -> CertResult<String> {
        let data = self
            .data
            .read()
            .map_err(|e| CertError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.authorisation_no.clone())
    }

    /// Check whether any reference data has been loaded or seeded
    pub fn is_empty(&self) -> CertResult<bool> {
        let data = self
            .data
            .read()
            .map_err(|e| CertError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.part_numbers.is_empty()
            && data.amendments.is_empty()
            && data.statuses.is_empty()
            && data.approved_indicators.is_empty()
            && data.authorisation_no.is_empty())
    }

    /// Replace the status, indicator, and authorisation defaults
    pub fn seed(
        &self,
        statuses: Vec<String>,
        approved_indicators: Vec<String>,
        authorisation_no: impl Into<String>,
    ) -> CertResult<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| CertError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.statuses = statuses;
        data.approved_indicators = approved_indicators;
        data.authorisation_no = authorisation_no.into();
        Ok(())
    }
}
