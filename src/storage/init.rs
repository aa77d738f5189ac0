//! Storage initialization
//!
//! Handles first-run setup and default data creation

use crate::config::paths::CertPaths;
use crate::error::CertResult;
use crate::models::{Role, User};

use super::Storage;

/// Default administrator account created on first run
pub const DEFAULT_ADMIN_ID: &str = "admin";

/// Initialize storage for a fresh installation
///
/// Seeds a default administrator account and the reference lookup lists the
/// certificate form depends on. Existing data is never overwritten.
pub fn initialize_storage(storage: &Storage) -> CertResult<()> {
    storage.load_all()?;

    if storage.users.count()? == 0 {
        storage.users.upsert(User {
            id: DEFAULT_ADMIN_ID.to_string(),
            name: "Administrator".to_string(),
            role: Role::Admin,
        })?;
        storage.users.save()?;
    }

    if storage.reference.is_empty()? {
        storage.reference.seed(
            vec!["New".to_string(), "Prototype".to_string()],
            vec![
                "Approved design data".to_string(),
                "Non-approved design data".to_string(),
            ],
            String::new(),
        )?;
        storage.reference.save()?;
    }

    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &CertPaths) -> bool {
    !paths.users_file().exists()
}
