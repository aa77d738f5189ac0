//! Audit logger for the append-only certificate audit trail
//!
//! Each entry is written as a single JSON line and flushed immediately.
//! Entries are never rewritten or deleted once on disk.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use crate::error::{CertError, CertResult};

use super::entry::AuditEntry;

/// Handles writing audit entries to the audit log file
///
/// The log file uses a line-delimited JSON format (JSONL) where each line
/// is a complete JSON object representing one audit entry.
pub struct AuditLogger {
    /// Path to the audit log file
    log_path: PathBuf,
}

impl AuditLogger {
    /// Create a new AuditLogger that writes to the specified path
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append one audit entry and flush
    pub fn log(&self, entry: &AuditEntry) -> CertResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| CertError::AuditLog(format!("Failed to open audit log: {}", e)))?;

        let json = serde_json::to_string(entry)
            .map_err(|e| CertError::AuditLog(format!("Failed to serialize audit entry: {}", e)))?;

        writeln!(file, "{}", json)
            .map_err(|e| CertError::AuditLog(format!("Failed to write audit entry: {}", e)))?;

        file.flush()
            .map_err(|e| CertError::AuditLog(format!("Failed to flush audit log: {}", e)))?;

        Ok(())
    }

    /// Read all audit entries, oldest first
    pub fn read_all(&self) -> CertResult<Vec<AuditEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| CertError::AuditLog(format!("Failed to open audit log: {}", e)))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                CertError::AuditLog(format!(
                    "Failed to read audit log line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: AuditEntry = serde_json::from_str(&line).map_err(|e| {
                CertError::AuditLog(format!(
                    "Failed to parse audit entry at line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            entries.push(entry);
        }

        Ok(entries)
    }

    /// Read the most recent N entries from the log
    pub fn read_recent(&self, count: usize) -> CertResult<Vec<AuditEntry>> {
        let all_entries = self.read_all()?;
        let start = all_entries.len().saturating_sub(count);
        Ok(all_entries[start..].to_vec())
    }

    /// Read all entries for one certificate number, oldest first
    pub fn read_for(&self, cert_no: &str) -> CertResult<Vec<AuditEntry>> {
        Ok(self
            .read_all()?
            .into_iter()
            .filter(|e| e.cert_no == cert_no)
            .collect())
    }

    /// Get the number of entries in the audit log
    pub fn entry_count(&self) -> CertResult<usize> {
        if !self.log_path.exists() {
            return Ok(0);
        }

        let file = File::open(&self.log_path)
            .map_err(|e| CertError::AuditLog(format!("Failed to open audit log: {}", e)))?;

        let reader = BufReader::new(file);
        let count = reader.lines().filter(|l| l.is_ok()).count();

        Ok(count)
    }

    /// Check if the audit log file exists
    pub fn exists(&self) -> bool {
        self.log_path.exists()
    }

    /// Get the path to the audit log file
    pub fn path(&self) -> &PathBuf {
        &self.log_path
    }
}
