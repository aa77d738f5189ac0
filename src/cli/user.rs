//! User CLI commands
//!
//! Staff account administration; mutating commands require the admin role.

use clap::Subcommand;

use crate::display::prefix::format_user_list;
use crate::error::{CertError, CertResult};
use crate::models::{RequestContext, Role, User};
use crate::storage::Storage;

/// User subcommands
#[derive(Subcommand)]
pub enum UserCommands {
    /// List user accounts
    List,
    /// Add or update a user account
    Add {
        /// Login identifier
        id: String,
        /// Display name (used as the signatory name on certificates)
        name: String,
        /// Role (admin, signatory, regular)
        #[arg(long, default_value = "regular")]
        role: String,
    },
    /// Remove a user account
    Remove {
        /// Login identifier
        id: String,
    },
}

fn parse_role(s: &str) -> CertResult<Role> {
    match s.trim().to_lowercase().as_str() {
        "admin" => Ok(Role::Admin),
        "signatory" => Ok(Role::Signatory),
        "regular" => Ok(Role::Regular),
        other => Err(CertError::validation(format!(
            "Invalid role: '{}'. Valid roles: admin, signatory, regular",
            other
        ))),
    }
}

/// Handle a user command
pub fn handle_user_command(
    storage: &Storage,
    ctx: &RequestContext,
    cmd: UserCommands,
) -> CertResult<()> {
    match cmd {
        UserCommands::List => {
            let users = storage.users.get_all()?;
            print!("{}", format_user_list(&users));
        }

        UserCommands::Add { id, name, role } => {
            ctx.require_admin()?;
            let role = parse_role(&role)?;
            storage.users.upsert(User {
                id: id.clone(),
                name,
                role,
            })?;
            storage.users.save()?;
            println!("Saved user {} ({}).", id, role);
        }

        UserCommands::Remove { id } => {
            ctx.require_admin()?;
            if storage.users.delete(&id)? {
                storage.users.save()?;
                println!("Removed user {}.", id);
            } else {
                println!("No user {}.", id);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_role() {
        assert_eq!(parse_role("admin").unwrap(), Role::Admin);
        assert_eq!(parse_role("Signatory").unwrap(), Role::Signatory);
        assert!(parse_role("root").is_err());
    }
}
