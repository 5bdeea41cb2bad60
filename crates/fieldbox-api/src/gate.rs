//! Access control gate.
//!
//! Two roles, no hierarchy beyond this binary partition. The gate is
//! consulted at every mutation handler before the store is touched; the
//! handlers are the only untrusted-facing entry points of this process, so
//! the check lives at the process's network boundary rather than inside the
//! stores themselves.

use fieldbox_core::{Error, Result, Role};

/// Operations restricted to administrators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    CreateDocument,
    UpdateDocument,
    CreateAccount,
    ManageAccounts,
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreateDocument => write!(f, "create document"),
            Self::UpdateDocument => write!(f, "update document"),
            Self::CreateAccount => write!(f, "create account"),
            Self::ManageAccounts => write!(f, "manage accounts"),
        }
    }
}

/// Whether `role` may perform `permission`.
///
/// Listing/searching, favoriting, chat/explanation, and logout are open to
/// every authenticated role and never reach this check.
pub fn allows(role: Role, permission: Permission) -> bool {
    match role {
        Role::Admin => true,
        Role::General => {
            // Spelled out so a new admin-only operation must be placed
            // deliberately.
            !matches!(
                permission,
                Permission::CreateDocument
                    | Permission::UpdateDocument
                    | Permission::CreateAccount
                    | Permission::ManageAccounts
            )
        }
    }
}

/// Require `permission` for `role`, or fail with [`Error::Forbidden`].
pub fn require(role: Role, permission: Permission) -> Result<()> {
    if allows(role, permission) {
        Ok(())
    } else {
        Err(Error::Forbidden(format!(
            "{} requires the ADMIN role",
            permission
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_is_allowed_everything() {
        for permission in [
            Permission::CreateDocument,
            Permission::UpdateDocument,
            Permission::CreateAccount,
            Permission::ManageAccounts,
        ] {
            assert!(allows(Role::Admin, permission));
            assert!(require(Role::Admin, permission).is_ok());
        }
    }

    #[test]
    fn general_is_denied_every_admin_operation() {
        for permission in [
            Permission::CreateDocument,
            Permission::UpdateDocument,
            Permission::CreateAccount,
            Permission::ManageAccounts,
        ] {
            assert!(!allows(Role::General, permission));
            let err = require(Role::General, permission).unwrap_err();
            assert!(matches!(err, Error::Forbidden(_)));
        }
    }
}
