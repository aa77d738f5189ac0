//! Audit CLI commands
//!
//! Read-only views over the append-only audit log.

use clap::Subcommand;

use crate::error::CertResult;
use crate::storage::Storage;

/// Audit subcommands
#[derive(Subcommand)]
pub enum AuditCommands {
    /// Show the most recent audit entries
    Recent {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Show the full audit history of one certificate
    Show {
        /// Certificate number
        cert_no: String,
    },
}

/// Handle an audit command
pub fn handle_audit_command(storage: &Storage, cmd: AuditCommands) -> CertResult<()> {
    let entries = match cmd {
        AuditCommands::Recent { limit } => storage.audit.read_recent(limit)?,
        AuditCommands::Show { cert_no } => storage.audit.read_for(&cert_no)?,
    };

    if entries.is_empty() {
        println!("No audit entries found.");
        return Ok(());
    }

    for entry in entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
