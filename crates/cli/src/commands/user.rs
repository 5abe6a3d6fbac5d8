//! User account management commands.
//!
//! # Usage
//!
//! ```bash
//! # Create a new account
//! rdx user create -u alice -p sekret123
//!
//! # List accounts
//! rdx user list
//! ```
//!
//! # Environment Variables
//!
//! - `ROLODEX_DATA_DIR` - Directory holding the YAML data files

use std::path::Path;

use thiserror::Error;

use rolodex_core::{StoreError, TreeStore};
use rolodex_web::config::{ConfigError, RolodexConfig};
use rolodex_web::services::auth::{AuthError, AuthService};
use rolodex_web::store::YamlStore;

/// Errors that can occur during user commands.
#[derive(Debug, Error)]
pub enum UserCmdError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The data files could not be read or written.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Account creation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),
}

/// Open the YAML store, preferring an explicit `--data-dir` over the
/// configured one.
fn open_store(data_dir: Option<&Path>) -> Result<YamlStore, UserCmdError> {
    let dir = match data_dir {
        Some(dir) => dir.to_path_buf(),
        None => RolodexConfig::from_env()?.data_dir,
    };
    Ok(YamlStore::open(dir)?)
}

/// Create a new user account with the starter categories.
pub fn create(data_dir: Option<&Path>, username: &str, password: &str) -> Result<(), UserCmdError> {
    dotenvy::dotenv().ok();

    let store = open_store(data_dir)?;
    let auth = AuthService::new(&store);
    let username = auth.register(username, password)?;

    tracing::info!("Account created: {username}");
    Ok(())
}

/// List every account with its category and contact counts.
pub fn list(data_dir: Option<&Path>) -> Result<(), UserCmdError> {
    dotenvy::dotenv().ok();

    let store = open_store(data_dir)?;
    let credentials = store.load_credentials()?;

    if credentials.is_empty() {
        tracing::info!("No accounts yet.");
        return Ok(());
    }

    for username in credentials.keys() {
        let tree = store.load(username)?;
        let contacts: usize = tree.categories().iter().map(|c| c.contacts.len()).sum();
        tracing::info!(
            "{username}: {} categories, {contacts} contacts",
            tree.categories().len()
        );
    }
    Ok(())
}
