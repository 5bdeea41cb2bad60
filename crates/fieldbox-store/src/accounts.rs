//! The in-memory account registry.

use std::sync::RwLock;

use tracing::info;
use uuid::Uuid;

use fieldbox_core::{Account, AccountDraft, Profile};

/// Process-wide account store.
///
/// Accounts are only ever created (by an existing admin through the
/// account-creation operation); they are never updated or deleted, and the
/// role is fixed at creation.
pub struct AccountStore {
    accounts: RwLock<Vec<Account>>,
}

impl AccountStore {
    /// Create an account store holding `seed`.
    pub fn new(seed: Vec<Account>) -> Self {
        info!(
            subsystem = "store",
            component = "accounts",
            account_count = seed.len(),
            "Account store initialized from seed"
        );
        Self {
            accounts: RwLock::new(seed),
        }
    }

    /// Find the account matching both `email` and `secret` exactly.
    pub fn find_by_credentials(&self, email: &str, secret: &str) -> Option<Account> {
        self.accounts
            .read()
            .expect("account lock poisoned")
            .iter()
            .find(|a| a.email == email && a.password == secret)
            .cloned()
    }

    /// Create an account from `draft` and append it to the registry.
    ///
    /// Email uniqueness is expected but not actively enforced here.
    pub fn add(&self, draft: AccountDraft) -> Account {
        let account = Account {
            id: Uuid::new_v4().to_string(),
            name: draft.name,
            email: draft.email,
            password: draft.password,
            role: draft.role,
        };

        info!(
            subsystem = "store",
            component = "accounts",
            op = "add",
            account_id = %account.id,
            role = %account.role,
            "Account created"
        );

        self.accounts
            .write()
            .expect("account lock poisoned")
            .push(account.clone());
        account
    }

    /// Password-free projections of all accounts, in insertion order.
    pub fn profiles(&self) -> Vec<Profile> {
        self.accounts
            .read()
            .expect("account lock poisoned")
            .iter()
            .map(Profile::from)
            .collect()
    }

    /// Number of registered accounts.
    pub fn len(&self) -> usize {
        self.accounts.read().expect("account lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldbox_core::Role;

    fn seeded_store() -> AccountStore {
        AccountStore::new(vec![Account {
            id: "admin-1".to_string(),
            name: "Feng Dou".to_string(),
            email: "feng.dou@dcsstech.com".to_string(),
            password: "Doufeng1983".to_string(),
            role: Role::Admin,
        }])
    }

    #[test]
    fn find_by_credentials_requires_exact_match_on_both() {
        let store = seeded_store();

        let found = store.find_by_credentials("feng.dou@dcsstech.com", "Doufeng1983");
        assert!(found.is_some());
        assert_eq!(found.unwrap().role, Role::Admin);

        assert!(store
            .find_by_credentials("feng.dou@dcsstech.com", "wrong")
            .is_none());
        assert!(store
            .find_by_credentials("nobody@dcsstech.com", "Doufeng1983")
            .is_none());
        // Case matters: credentials are exact-match.
        assert!(store
            .find_by_credentials("Feng.Dou@dcsstech.com", "Doufeng1983")
            .is_none());
    }

    #[test]
    fn add_appends_with_fresh_id() {
        let store = seeded_store();

        let created = store.add(AccountDraft {
            name: "Hanako Sato".to_string(),
            email: "hanako.sato@dcsstech.com".to_string(),
            password: "s3cret".to_string(),
            role: Role::General,
        });

        assert_ne!(created.id, "admin-1");
        assert_eq!(store.len(), 2);

        // Appended, not prepended: the seeded admin stays first.
        let profiles = store.profiles();
        assert_eq!(profiles[0].id, "admin-1");
        assert_eq!(profiles[1].id, created.id);
    }

    #[test]
    fn profiles_omit_secrets() {
        let store = seeded_store();
        let json = serde_json::to_string(&store.profiles()).unwrap();
        assert!(!json.contains("Doufeng1983"));
    }
}
