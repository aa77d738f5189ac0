//! User accounts and the per-request identity context
//!
//! Print, update, and cancel require signatory access; administrative
//! operations require the admin role. Identity is passed explicitly into
//! each service operation instead of living in ambient state.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CertError, CertResult};

/// Role assigned to a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access, including prefix and user management
    Admin,
    /// May approve, print, update, and cancel certificates
    Signatory,
    /// Read-only access to search and export
    #[default]
    Regular,
}

impl Role {
    /// Whether this role carries signatory access (admins are a superset)
    pub fn has_signatory_access(&self) -> bool {
        matches!(self, Self::Admin | Self::Signatory)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "Admin"),
            Self::Signatory => write!(f, "Signatory"),
            Self::Regular => write!(f, "Regular"),
        }
    }
}

/// A staff user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Login identifier
    pub id: String,

    /// Display name, used as the signatory name on certificates
    pub name: String,

    #[serde(default)]
    pub role: Role,
}

/// Identity context threaded through every mutating operation
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Identifier recorded as `performed_by` in the audit trail
    pub user_id: String,

    /// Signatory display name, when the user holds that role
    pub signatory_name: Option<String>,

    pub role: Role,
}

impl RequestContext {
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            signatory_name: None,
            role,
        }
    }

    /// Build a context from a stored user account
    pub fn for_user(user: &User) -> Self {
        Self {
            user_id: user.id.clone(),
            signatory_name: user
                .role
                .has_signatory_access()
                .then(|| user.name.clone()),
            role: user.role,
        }
    }

    /// Fail unless the caller holds signatory access
    pub fn require_signatory(&self) -> CertResult<()> {
        if self.role.has_signatory_access() {
            Ok(())
        } else {
            Err(CertError::Unauthorized(
                "signatory access is required for this operation".into(),
            ))
        }
    }

    /// Fail unless the caller is an administrator
    pub fn require_admin(&self) -> CertResult<()> {
        if self.role == Role::Admin {
            Ok(())
        } else {
            Err(CertError::Unauthorized(
                "administrator access is required for this operation".into(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signatory_access() {
        assert!(Role::Admin.has_signatory_access());
        assert!(Role::Signatory.has_signatory_access());
        assert!(!Role::Regular.has_signatory_access());
    }

    #[test]
    fn test_require_signatory() {
        let ctx = RequestContext::new("jdoe", Role::Regular);
        assert!(matches!(
            ctx.require_signatory(),
            Err(CertError::Unauthorized(_))
        ));

        let ctx = RequestContext::new("rvance", Role::Signatory);
        assert!(ctx.require_signatory().is_ok());
    }

    #[test]
    fn test_require_admin() {
        let ctx = RequestContext::new("rvance", Role::Signatory);
        assert!(ctx.require_admin().is_err());

        let ctx = RequestContext::new("root", Role::Admin);
        assert!(ctx.require_admin().is_ok());
    }

    #[test]
    fn test_context_for_user_carries_signatory_name() {
        let user = User {
            id: "rvance".into(),
            name: "R. Vance".into(),
            role: Role::Signatory,
        };
        let ctx = RequestContext::for_user(&user);
        assert_eq!(ctx.signatory_name.as_deref(), Some("R. Vance"));

        let regular = User {
            id: "jdoe".into(),
            name: "J. Doe".into(),
            role: Role::Regular,
        };
        assert!(RequestContext::for_user(&regular).signatory_name.is_none());
    }
}
