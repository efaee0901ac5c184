//! Operator account registry and session handling.

use sarraf_common::{Result, User, UserRole};
use sarraf_store::Store;
use std::sync::Arc;
use tracing::info;

/// Operator accounts and the login session slot.
///
/// There is no password check; the back office trusts whoever can reach
/// it. Session state lives in the store's session slot for hosts that
/// want login persistence, but workflow operations take their actor
/// explicitly and never read it.
#[derive(Clone)]
pub struct UserRegistry {
    store: Arc<Store>,
}

impl UserRegistry {
    /// Create a registry over a store.
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// All operator accounts.
    pub fn list(&self) -> Result<Vec<User>> {
        self.store.users()
    }

    /// Create an operator account.
    pub fn create(&self, username: impl Into<String>, role: UserRole) -> Result<User> {
        let user = User::new(username, role);
        let mut users = self.store.users()?;
        users.push(user.clone());
        self.store.save_users(&users)?;

        info!(user_id = %user.id, username = %user.username, "Created operator account");

        Ok(user)
    }

    /// Log in by username. Returns the user and records the session, or
    /// `None` when the username is unknown.
    pub fn login(&self, username: &str) -> Result<Option<User>> {
        let user = self
            .store
            .users()?
            .into_iter()
            .find(|user| user.username == username);

        if let Some(user) = &user {
            self.store.set_current_user(Some(user))?;
            info!(username = %user.username, "Operator logged in");
        }

        Ok(user)
    }

    /// Clear the session.
    pub fn logout(&self) -> Result<()> {
        self.store.set_current_user(None)
    }

    /// The logged-in operator, if any.
    pub fn current(&self) -> Result<Option<User>> {
        self.store.current_user()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> UserRegistry {
        let store = Arc::new(Store::in_memory());
        store.seed_defaults().unwrap();
        UserRegistry::new(store)
    }

    #[test]
    fn test_login_known_user() {
        let registry = setup();

        let user = registry.login("admin").unwrap().unwrap();
        assert_eq!(user.username, "admin");
        assert_eq!(registry.current().unwrap().unwrap().id, user.id);
    }

    #[test]
    fn test_login_unknown_user() {
        let registry = setup();
        assert!(registry.login("nobody").unwrap().is_none());
        assert!(registry.current().unwrap().is_none());
    }

    #[test]
    fn test_logout_clears_session() {
        let registry = setup();
        registry.login("admin").unwrap();
        registry.logout().unwrap();
        assert!(registry.current().unwrap().is_none());
    }

    #[test]
    fn test_create_account() {
        let registry = setup();
        registry.create("teller", UserRole::Accountant).unwrap();

        let users = registry.list().unwrap();
        assert_eq!(users.len(), 2);
        assert!(registry.login("teller").unwrap().is_some());
    }
}
