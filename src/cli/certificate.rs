//! Certificate CLI commands
//!
//! Implements CLI commands for the certificate lifecycle, bridging clap
//! argument parsing with the certificate service.

use std::path::PathBuf;

use chrono::{Datelike, NaiveDate, Utc};
use clap::{Args, Subcommand};

use crate::config::Settings;
use crate::display::certificate::{
    format_certificate_details, format_edition_list, format_search_results,
};
use crate::error::{CertError, CertResult};
use crate::models::{CertificateFields, Edition, RequestContext, SearchCriteria};
use crate::render::FormRenderer;
use crate::services::{AllocatorService, CertificateService};
use crate::storage::Storage;

/// Form field arguments shared by create and update
#[derive(Args, Debug)]
pub struct FieldArgs {
    /// Product number
    #[arg(long)]
    pub product: String,

    /// Serial number
    #[arg(long)]
    pub serial: String,

    /// Amendment code (repeatable)
    #[arg(long = "amendment")]
    pub amendment: Vec<String>,

    /// Signatory name (defaults to the acting user's name)
    #[arg(long)]
    pub signatory: Option<String>,

    /// Approval date (YYYY-MM-DD)
    #[arg(long)]
    pub date: String,

    /// Quantity (0-99999)
    #[arg(long)]
    pub quantity: String,

    /// Remark line (repeatable, up to 4)
    #[arg(long = "remark")]
    pub remarks: Vec<String>,

    /// Release authorisation number (defaults from reference data)
    #[arg(long)]
    pub authorisation: Option<String>,

    /// Item number on the form
    #[arg(long)]
    pub item: Option<String>,

    /// Status code
    #[arg(long)]
    pub status: Option<String>,

    /// Approved-design indicator
    #[arg(long)]
    pub approved: Option<String>,

    /// Free-form comment
    #[arg(long)]
    pub comment: Option<String>,
}

impl FieldArgs {
    /// Convert to form fields, filling the signatory from the request context
    pub fn into_fields(self, ctx: &RequestContext) -> CertResult<CertificateFields> {
        if self.remarks.len() > 4 {
            return Err(CertError::validation(
                "At most 4 remark lines are supported.",
            ));
        }
        let mut remarks = self.remarks.into_iter();

        let signatory = self
            .signatory
            .or_else(|| ctx.signatory_name.clone())
            .unwrap_or_default();

        Ok(CertificateFields {
            product_no: self.product,
            serial_no: self.serial,
            amendment: self.amendment,
            signatory,
            date: self.date,
            quantity: self.quantity,
            remarks1: remarks.next(),
            remarks2: remarks.next(),
            remarks3: remarks.next(),
            remarks4: remarks.next(),
            authorisation: self.authorisation,
            item: self.item,
            status: self.status,
            approved: self.approved,
            comment: self.comment,
        })
    }
}

/// Search filter arguments shared by search and export
#[derive(Args, Debug, Default)]
pub struct CriteriaArgs {
    /// Certificate number (partial match)
    #[arg(long)]
    pub cert_no: Option<String>,

    /// Product number (exact match)
    #[arg(long)]
    pub product: Option<String>,

    /// Serial number (partial match)
    #[arg(long)]
    pub serial: Option<String>,

    /// Amendment code (repeatable, exact set match)
    #[arg(long = "amendment")]
    pub amendment: Vec<String>,

    /// Signatory name (exact match)
    #[arg(long)]
    pub signatory: Option<String>,

    /// Earliest approval date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// Latest approval date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,

    /// Quantity
    #[arg(long)]
    pub quantity: Option<String>,

    /// Edition
    #[arg(long)]
    pub edition: Option<String>,

    /// Lifecycle state (valid, printed, cancelled)
    #[arg(long)]
    pub state: Option<String>,
}

impl CriteriaArgs {
    pub fn into_criteria(self) -> CertResult<SearchCriteria> {
        let parse_date = |label: &str, value: Option<String>| -> CertResult<Option<NaiveDate>> {
            value
                .map(|v| {
                    NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d").map_err(|_| {
                        CertError::validation(format!("Invalid {} date format.", label))
                    })
                })
                .transpose()
        };

        Ok(SearchCriteria {
            cert_no: self.cert_no,
            product_no: self.product,
            serial_no: self.serial,
            amendment: self.amendment,
            signatory: self.signatory,
            start_date: parse_date("from", self.from)?,
            end_date: parse_date("to", self.to)?,
            quantity: self.quantity,
            edition: self.edition,
            state: self.state,
        })
    }
}

/// Certificate subcommands
#[derive(Subcommand)]
pub enum CertificateCommands {
    /// Create a new certificate under the year's prefix
    Create {
        /// Allocation year (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,

        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Show a certificate edition (the current one by default)
    Show {
        /// Certificate number
        cert_no: String,
        /// Edition (e.g. "01")
        #[arg(long)]
        edition: Option<String>,
    },
    /// List all editions of a certificate
    Editions {
        /// Certificate number
        cert_no: String,
    },
    /// Update a certificate edition
    Update {
        /// Certificate number
        cert_no: String,
        /// Edition to update (the current one by default)
        #[arg(long)]
        edition: Option<String>,

        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Print a certificate edition to a file or stdout
    Print {
        /// Certificate number
        cert_no: String,
        /// Edition to print (the current one by default)
        #[arg(long)]
        edition: Option<String>,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Cancel a certificate edition
    Cancel {
        /// Certificate number
        cert_no: String,
        /// Edition to cancel (the current one by default)
        #[arg(long)]
        edition: Option<String>,
        /// Cancellation comment
        #[arg(long)]
        comment: Option<String>,
    },
    /// Delete one edition row outright (administrators only)
    Delete {
        /// Certificate number
        cert_no: String,
        /// Edition to delete
        #[arg(long)]
        edition: String,
    },
    /// Search certificates
    Search {
        #[command(flatten)]
        criteria: CriteriaArgs,

        /// Results page (1-based)
        #[arg(long, default_value = "1")]
        page: usize,
    },
    /// Preview the next certificate number for a year
    NextNumber {
        /// Allocation year (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,
    },
}

/// Resolve an optional edition argument, falling back to the current edition
fn resolve_edition(
    service: &CertificateService<'_>,
    cert_no: &str,
    edition: Option<String>,
) -> CertResult<Edition> {
    match edition {
        Some(e) => e.parse(),
        None => Ok(service.current_edition(cert_no)?.edition),
    }
}

/// Handle a certificate command
pub fn handle_certificate_command(
    storage: &Storage,
    settings: &Settings,
    ctx: &RequestContext,
    cmd: CertificateCommands,
) -> CertResult<()> {
    let service = CertificateService::new(storage, settings);

    match cmd {
        CertificateCommands::Create { year, fields } => {
            let fields = fields.into_fields(ctx)?;
            let record = service.create(ctx, year, &fields)?;

            println!("Created certificate: {}", record.cert_no);
            println!("  Edition:  {}", record.edition);
            println!("  Product:  {}", record.product_no);
            println!("  Serial:   {}", record.serial_no);
            println!("  Date:     {}", record.display_date());
        }

        CertificateCommands::Show { cert_no, edition } => {
            let record = match edition {
                Some(e) => service.edition(&cert_no, e.parse()?)?,
                None => service.current_edition(&cert_no)?,
            };
            print!("{}", format_certificate_details(&record));
        }

        CertificateCommands::Editions { cert_no } => {
            let editions = service.editions(&cert_no)?;
            print!("{}", format_edition_list(&editions));
        }

        CertificateCommands::Update {
            cert_no,
            edition,
            fields,
        } => {
            let edition = resolve_edition(&service, &cert_no, edition)?;
            let fields = fields.into_fields(ctx)?;
            let outcome = service.update(ctx, &cert_no, edition, &fields)?;

            if !outcome.changed {
                println!("No changes for {} edition {}.", cert_no, edition);
            } else if outcome.new_edition {
                println!(
                    "Updated {}: new edition {} created (edition {} frozen).",
                    cert_no, outcome.record.edition, edition
                );
            } else {
                println!("Updated {} edition {} in place.", cert_no, edition);
            }
        }

        CertificateCommands::Print {
            cert_no,
            edition,
            output,
        } => {
            let edition = resolve_edition(&service, &cert_no, edition)?;
            let bytes = service.print(ctx, &cert_no, edition, &FormRenderer::new())?;

            match output {
                Some(path) => {
                    std::fs::write(&path, &bytes)?;
                    println!(
                        "Printed {} edition {} to {}.",
                        cert_no,
                        edition,
                        path.display()
                    );
                }
                None => {
                    let text = String::from_utf8_lossy(&bytes);
                    print!("{}", text);
                }
            }
        }

        CertificateCommands::Cancel {
            cert_no,
            edition,
            comment,
        } => {
            let edition = resolve_edition(&service, &cert_no, edition)?;
            if service.cancel(ctx, &cert_no, edition, comment)? {
                println!("Cancelled {} edition {}.", cert_no, edition);
            } else {
                println!("{} edition {} is already cancelled.", cert_no, edition);
            }
        }

        CertificateCommands::Delete { cert_no, edition } => {
            let edition: Edition = edition.parse()?;
            if service.delete_edition(ctx, &cert_no, edition)? {
                println!("Deleted {} edition {}.", cert_no, edition);
            } else {
                println!("{} edition {} does not exist.", cert_no, edition);
            }
        }

        CertificateCommands::Search { criteria, page } => {
            let page = service.search(criteria.into_criteria()?, page)?;
            print!("{}", format_search_results(&page));
        }

        CertificateCommands::NextNumber { year } => {
            let year = year.unwrap_or_else(|| Utc::now().year());
            let number = AllocatorService::new(storage).next_number(year)?;
            println!("{}", number);
        }
    }

    Ok(())
}
