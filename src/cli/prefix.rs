//! Prefix CLI commands
//!
//! Year-prefix administration; every mutating command requires the admin
//! role.

use clap::Subcommand;

use crate::display::prefix::format_prefix_list;
use crate::error::{CertError, CertResult};
use crate::models::{RequestContext, YearPrefix};
use crate::storage::Storage;

/// Prefix subcommands
#[derive(Subcommand)]
pub enum PrefixCommands {
    /// List the year-prefix assignments
    List,
    /// Assign a code to a year that has none yet
    Add {
        /// Calendar year
        year: i32,
        /// Prefix code (e.g. "AB")
        code: String,
    },
    /// Replace the code assigned to a year
    Set {
        /// Calendar year
        year: i32,
        /// Prefix code
        code: String,
    },
    /// Remove a year's assignment
    Remove {
        /// Calendar year
        year: i32,
    },
}

/// Handle a prefix command
pub fn handle_prefix_command(
    storage: &Storage,
    ctx: &RequestContext,
    cmd: PrefixCommands,
) -> CertResult<()> {
    match cmd {
        PrefixCommands::List => {
            let prefixes = storage.prefixes.get_all()?;
            print!("{}", format_prefix_list(&prefixes));
        }

        PrefixCommands::Add { year, code } => {
            ctx.require_admin()?;
            validate_code(&code)?;
            storage.prefixes.add(YearPrefix::new(year, code.clone()))?;
            storage.prefixes.save()?;
            println!("Assigned prefix {} to {}.", code, year);
        }

        PrefixCommands::Set { year, code } => {
            ctx.require_admin()?;
            validate_code(&code)?;
            storage.prefixes.upsert(YearPrefix::new(year, code.clone()))?;
            storage.prefixes.save()?;
            println!("Prefix for {} is now {}.", year, code);
        }

        PrefixCommands::Remove { year } => {
            ctx.require_admin()?;
            if storage.prefixes.delete(year)? {
                storage.prefixes.save()?;
                println!("Removed prefix for {}.", year);
            } else {
                println!("No prefix configured for {}.", year);
            }
        }
    }

    Ok(())
}

fn validate_code(code: &str) -> CertResult<()> {
    if code.trim().is_empty() {
        return Err(CertError::validation("Prefix code is required."));
    }
    if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(CertError::validation(
            "Prefix code must be alphanumeric.",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_code() {
        assert!(validate_code("AB").is_ok());
        assert!(validate_code("A1").is_ok());
        assert!(validate_code("").is_err());
        assert!(validate_code("A B").is_err());
    }
}
