//! Authentication service.
//!
//! Username/password accounts over the YAML credential file, hashed with
//! Argon2id. Usernames are normalized like every other stored name: trimmed
//! and capitalized.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use rolodex_core::{ContactTree, TreeStore, tree::capitalize};

use crate::store::YamlStore;

/// Authentication service.
///
/// Handles registration and sign-in against the credential file.
pub struct AuthService<'a> {
    store: &'a YamlStore,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(store: &'a YamlStore) -> Self {
        Self { store }
    }

    /// Register a new account and seed its starter categories.
    ///
    /// Returns the normalized username.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::BlankCredentials` if either field is blank,
    /// `AuthError::UsernameTaken` if the username is registered, and
    /// `AuthError::Store` if the data files cannot be written.
    pub fn register(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let username = capitalize(username.trim());
        let password = password.trim();

        if username.is_empty() || password.is_empty() {
            return Err(AuthError::BlankCredentials);
        }
        if self.store.credential(&username)?.is_some() {
            return Err(AuthError::UsernameTaken);
        }

        let hash = hash_password(password)?;
        self.store.save_credential(&username, &hash)?;
        self.store.save(&username, &ContactTree::starter())?;

        Ok(username)
    }

    /// Sign in with username and password.
    ///
    /// Returns the normalized username.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the username is unknown,
    /// the password is blank, or the password does not match.
    pub fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let username = capitalize(username.trim());
        let password = password.trim();
        if password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        let hash = self
            .store
            .credential(&username)?
            .ok_or(AuthError::InvalidCredentials)?;
        verify_password(password, &hash)?;

        Ok(username)
    }
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> YamlStore {
        let dir = std::env::temp_dir().join(format!("rolodex-auth-test-{}", rand::random::<u64>()));
        YamlStore::open(dir).expect("temp dir")
    }

    #[test]
    fn test_hash_and_verify_round_trip() {
        let hash = hash_password("hunter2!").expect("hashes");
        assert!(verify_password("hunter2!", &hash).is_ok());
        assert!(matches!(
            verify_password("wrong", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_register_normalizes_and_seeds() {
        let store = temp_store();
        let auth = AuthService::new(&store);

        let username = auth.register("  alice ", "sekret123").expect("registers");
        assert_eq!(username, "Alice");
        assert_eq!(store.load("Alice").expect("loads"), ContactTree::starter());
    }

    #[test]
    fn test_register_rejects_blank_and_taken() {
        let store = temp_store();
        let auth = AuthService::new(&store);

        assert!(matches!(
            auth.register("", "sekret123"),
            Err(AuthError::BlankCredentials)
        ));
        assert!(matches!(
            auth.register("Alice", "   "),
            Err(AuthError::BlankCredentials)
        ));

        auth.register("Alice", "sekret123").expect("registers");
        assert!(matches!(
            auth.register("ALICE", "other-pass"),
            Err(AuthError::UsernameTaken)
        ));
    }

    #[test]
    fn test_login_checks_password() {
        let store = temp_store();
        let auth = AuthService::new(&store);
        auth.register("Alice", "sekret123").expect("registers");

        assert_eq!(auth.login("alice", "sekret123").expect("logs in"), "Alice");
        assert!(matches!(
            auth.login("alice", "wrong"),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login("Nobody", "sekret123"),
            Err(AuthError::InvalidCredentials)
        ));
    }
}
