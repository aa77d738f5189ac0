//! Reference data CLI commands
//!
//! Maintains the part-number register and the lookup lists; mutating
//! commands require the admin role. Reads go through the lookup cache.

use clap::Subcommand;

use crate::error::{CertError, CertResult};
use crate::models::{PartNumber, RequestContext};
use crate::services::{LookupCache, LookupService};
use crate::storage::Storage;

/// Reference data subcommands
#[derive(Subcommand)]
pub enum ReferenceCommands {
    /// List the part-number register
    Parts,
    /// Add a part to the register
    AddPart {
        /// Product number
        product: String,
        /// Description
        #[arg(long, default_value = "")]
        description: String,
        /// Product type
        #[arg(long = "type", default_value = "")]
        product_type: String,
        /// Manufacturer
        #[arg(long, default_value = "")]
        manufacturer: String,
        /// Whether units carry serial numbers
        #[arg(long)]
        serialized: bool,
    },
    /// Remove a part from the register
    RemovePart {
        /// Product number
        product: String,
    },
    /// Add an amendment code
    AddAmendment {
        /// Amendment code
        code: String,
    },
    /// Show all lookup lists
    Lookups,
}

/// Handle a reference data command
pub fn handle_reference_command(
    storage: &Storage,
    ctx: &RequestContext,
    cmd: ReferenceCommands,
) -> CertResult<()> {
    match cmd {
        ReferenceCommands::Parts => {
            let parts = storage.reference.parts()?;
            if parts.is_empty() {
                println!("No parts registered.");
            }
            for part in parts {
                println!(
                    "{}  {}  {}  {}  serialized: {}",
                    part.product_no,
                    part.description,
                    part.product_type,
                    part.manufacturer,
                    if part.serialization.eq_ignore_ascii_case("yes") {
                        "yes"
                    } else {
                        "no"
                    }
                );
            }
        }

        ReferenceCommands::AddPart {
            product,
            description,
            product_type,
            manufacturer,
            serialized,
        } => {
            ctx.require_admin()?;
            if product.trim().is_empty() {
                return Err(CertError::validation("Product number is required."));
            }
            storage.reference.add_part(PartNumber {
                product_no: product.trim().to_string(),
                description,
                product_type,
                manufacturer,
                serialization: if serialized { "Yes" } else { "No" }.to_string(),
            })?;
            storage.reference.save()?;
            println!("Added part {}.", product.trim());
        }

        ReferenceCommands::RemovePart { product } => {
            ctx.require_admin()?;
            if storage.reference.remove_part(product.trim())? {
                storage.reference.save()?;
                println!("Removed part {}.", product.trim());
            } else {
                println!("No part {}.", product.trim());
            }
        }

        ReferenceCommands::AddAmendment { code } => {
            ctx.require_admin()?;
            if code.trim().is_empty() {
                return Err(CertError::validation("Amendment code is required."));
            }
            storage.reference.add_amendment(code.trim())?;
            storage.reference.save()?;
            println!("Added amendment {}.", code.trim());
        }

        ReferenceCommands::Lookups => {
            let cache = LookupCache::new();
            let lookups = LookupService::new(storage, &cache);

            let list = |name: &str, values: Vec<String>| {
                println!("{}:", name);
                if values.is_empty() {
                    println!("  (none)");
                }
                for value in values {
                    println!("  {}", value);
                }
            };

            list("Product numbers", lookups.product_numbers()?);
            list("Amendments", lookups.amendments()?);
            list("Signatories", lookups.signatories()?);
            list("Statuses", lookups.statuses()?);
            list("States", lookups.states());
            list("Approved indicators", lookups.approved_indicators()?);

            let authorisation = storage.reference.authorisation_no()?;
            if !authorisation.is_empty() {
                println!("Authorisation no: {}", authorisation);
            }
        }
    }

    Ok(())
}
