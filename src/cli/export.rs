//! Export CLI commands
//!
//! Writes search results as CSV or JSON to a file or stdout.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Subcommand;

use crate::config::Settings;
use crate::error::{CertError, CertResult};
use crate::export::{export_certificates_csv, export_certificates_json};
use crate::services::CertificateService;
use crate::storage::Storage;

use super::certificate::CriteriaArgs;

/// Export subcommands
#[derive(Subcommand)]
pub enum ExportCommands {
    /// Export matching certificates as CSV
    Csv {
        #[command(flatten)]
        criteria: CriteriaArgs,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export matching certificates as JSON
    Json {
        #[command(flatten)]
        criteria: CriteriaArgs,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle an export command
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExportCommands,
) -> CertResult<()> {
    let service = CertificateService::new(storage, settings);

    let (criteria, output, as_json) = match cmd {
        ExportCommands::Csv { criteria, output } => (criteria, output, false),
        ExportCommands::Json { criteria, output } => (criteria, output, true),
    };

    let records = service.all_matching(criteria.into_criteria()?)?;
    let count = records.len();

    match output {
        Some(path) => {
            let file = File::create(&path)
                .map_err(|e| CertError::Export(format!("Failed to create {}: {}", path.display(), e)))?;
            let mut writer = BufWriter::new(file);
            if as_json {
                export_certificates_json(&records, &mut writer)?;
            } else {
                export_certificates_csv(&records, &mut writer)?;
            }
            writer
                .flush()
                .map_err(|e| CertError::Export(e.to_string()))?;
            eprintln!("Exported {} row(s) to {}.", count, path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            if as_json {
                export_certificates_json(&records, &mut writer)?;
            } else {
                export_certificates_csv(&records, &mut writer)?;
            }
        }
    }

    Ok(())
}
