//! User repository for JSON storage
//!
//! Staff accounts with their roles; looked up once per invocation to build
//! the request context.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{CertError, CertResult};
use crate::models::User;

use super::file_io::{read_json, write_json_atomic};

/// Serializable user data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct UserData {
    users: Vec<User>,
}

/// Repository for user persistence
pub struct UserRepository {
    path: PathBuf,
    data: RwLock<HashMap<String, User>>,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load users from disk
    pub fn load(&self) -> CertResult<()> {
        let file_data: UserData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| CertError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for user in file_data.users {
            data.insert(user.id.clone(), user);
        }

        Ok(())
    }

    /// Save users to disk
    pub fn save(&self) -> CertResult<()> {
        let data = self
            .data
            .read()
            .map_err(|e| CertError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut users: Vec<_> = data.values().cloned().collect();
        users.sort_by(|a, b| a.id.cmp(&b.id));

        write_json_atomic(&self.path, &UserData { users })
    }

    /// Get a user by login identifier
    pub fn get(&self, id: &str) -> CertResult<Option<User>> {
        let data = self
            .data
            .read()
            .map_err(|e| CertError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(id).cloned())
    }

    /// Get a user by login identifier, failing if absent
    pub fn get_required(&self, id: &str) -> CertResult<User> {
        self.get(id)?.ok_or_else(|| CertError::user_not_found(id))
    }

    /// Insert or update a user
    pub fn upsert(&self, user: User) -> CertResult<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| CertError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(user.id.clone(), user);
        Ok(())
    }

    /// Delete a user
    pub fn delete(&self, id: &str) -> CertResult<bool> {
        let mut data = self
            .data
            .write()
            .map_err(|e| CertError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(id).is_some())
    }

    /// Get all users, ordered by identifier
    pub fn get_all(&self) -> CertResult<Vec<User>> {
        let data = self
            .data
            .read()
            .map_err(|e| CertError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut users: Vec<_> = data.values().cloned().collect();
        users.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(users)
    }

    /// Count users
    pub fn count(&self) -> CertResult<usize> {
        let data = self
            .data
            .read()
            .map_err(|e| CertError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, UserRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("users.json");
        let repo = UserRepository::new(path);
        (temp_dir, repo)
    }

    fn user(id: &str, role: Role) -> User {
        User {
            id: id.into(),
            name: format!("User {}", id),
            role,
        }
    }

    #[test]
    fn test_upsert_and_get() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.upsert(user("rvance", Role::Signatory)).unwrap();

        let found = repo.get("rvance").unwrap().unwrap();
        assert_eq!(found.role, Role::Signatory);
        assert!(repo.get("nobody").unwrap().is_none());
    }

    #[test]
    fn test_get_required_missing_user() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let err = repo.get_required("ghost").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.upsert(user("admin", Role::Admin)).unwrap();
        repo.upsert(user("jdoe", Role::Regular)).unwrap();
        repo.save().unwrap();

        let repo2 = UserRepository::new(temp_dir.path().join("users.json"));
        repo2.load().unwrap();

        let all = repo2.get_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, "admin");
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.upsert(user("jdoe", Role::Regular)).unwrap();
        assert!(repo.delete("jdoe").unwrap());
        assert!(!repo.delete("jdoe").unwrap());
    }
}
