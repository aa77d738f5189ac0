//! Audit logging system for certdesk
//!
//! Records every mutating certificate operation in an append-only log.
//! Update entries carry only the fields that changed, so the log reads as a
//! compact diff stream; Add entries are full snapshots, Print and Cancel
//! have fixed shapes, and Delete carries only the identifying key.
//!
//! # Architecture
//!
//! - `AuditEntry` / `FieldValues`: one log row with its sparse field payload.
//! - `AuditLogger`: writes entries to a line-delimited JSON (JSONL) file.
//! - `diff_records`: explicit field-by-field comparison between two editions.
//!
//! Audit failures are reported but never fail the primary mutation; the
//! swallow-and-report policy lives in the storage coordinator's `log_*`
//! helpers.

mod diff;
mod entry;
mod logger;

pub use diff::{diff_records, text_eq};
pub use entry::{AuditAction, AuditEntry, FieldValues};
pub use logger::AuditLogger;
