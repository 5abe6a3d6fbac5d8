//! File-based YAML persistence.
//!
//! The data directory holds two files, each a top-level mapping keyed by
//! username:
//!
//! - `contacts.yml` - username → contact tree
//! - `credentials.yml` - username → argon2 password hash
//!
//! Each save rewrites the whole file through a temp-file rename. Missing or
//! empty files load as empty maps. Concurrent requests for the same user
//! are last-writer-wins; an accepted limitation for a single-user app.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use rolodex_core::{ContactTree, StoreError, TreeStore};

const CONTACTS_FILE: &str = "contacts.yml";
const CREDENTIALS_FILE: &str = "credentials.yml";

/// YAML persistence rooted at a data directory.
#[derive(Debug, Clone)]
pub struct YamlStore {
    dir: PathBuf,
}

impl YamlStore {
    /// Create a store over `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    /// Load all stored contact trees, keyed by username.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file exists but cannot be read or
    /// decoded.
    pub fn load_trees(&self) -> Result<BTreeMap<String, ContactTree>, StoreError> {
        read_yaml(&self.path(CONTACTS_FILE))
    }

    /// Load all stored credentials (username → password hash).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file exists but cannot be read or
    /// decoded.
    pub fn load_credentials(&self) -> Result<BTreeMap<String, String>, StoreError> {
        read_yaml(&self.path(CREDENTIALS_FILE))
    }

    /// Look up one user's password hash.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the credentials file cannot be read.
    pub fn credential(&self, username: &str) -> Result<Option<String>, StoreError> {
        let mut credentials = self.load_credentials()?;
        Ok(credentials.remove(username))
    }

    /// Insert or replace one user's password hash.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the credentials file cannot be rewritten.
    pub fn save_credential(&self, username: &str, hash: &str) -> Result<(), StoreError> {
        let mut credentials = self.load_credentials()?;
        credentials.insert(username.to_owned(), hash.to_owned());
        write_yaml(&self.path(CREDENTIALS_FILE), &credentials)
    }
}

impl TreeStore for YamlStore {
    fn load(&self, username: &str) -> Result<ContactTree, StoreError> {
        let mut trees = self.load_trees()?;
        Ok(trees.remove(username).unwrap_or_default())
    }

    fn save(&self, username: &str, tree: &ContactTree) -> Result<(), StoreError> {
        let mut trees = self.load_trees()?;
        trees.insert(username.to_owned(), tree.clone());
        write_yaml(&self.path(CONTACTS_FILE), &trees)
    }
}

fn read_yaml<T>(path: &Path) -> Result<T, StoreError>
where
    T: serde::de::DeserializeOwned + Default,
{
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
        Err(err) => return Err(err.into()),
    };
    if contents.trim().is_empty() {
        return Ok(T::default());
    }
    serde_yaml::from_str(&contents).map_err(|e| StoreError::Malformed(e.to_string()))
}

fn write_yaml<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let yaml = serde_yaml::to_string(value).map_err(|e| StoreError::Malformed(e.to_string()))?;
    let tmp = path.with_extension("yml.tmp");
    fs::write(&tmp, yaml)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rolodex_core::{CategoryId, ContactId, ContactRecord};

    fn temp_store() -> YamlStore {
        let dir = std::env::temp_dir().join(format!("rolodex-store-test-{}", rand::random::<u64>()));
        YamlStore::open(dir).expect("temp dir")
    }

    #[test]
    fn test_missing_files_load_empty() {
        let store = temp_store();
        assert!(store.load_trees().expect("loads").is_empty());
        assert!(store.load_credentials().expect("loads").is_empty());
        assert_eq!(store.load("Nobody").expect("loads"), ContactTree::new());
    }

    #[test]
    fn test_tree_round_trip_preserves_order_and_values() {
        let store = temp_store();

        let mut tree = ContactTree::starter();
        if let Some(cat) = tree.category_mut(CategoryId::new(2)) {
            cat.contacts.insert(
                ContactId::new(1),
                ContactRecord::new("Sue", "", "sue@example.com"),
            );
        }
        store.save("Alice", &tree).expect("saves");

        assert_eq!(store.load("Alice").expect("loads"), tree);
        // Other users are unaffected.
        assert_eq!(store.load("Bob").expect("loads"), ContactTree::new());
    }

    #[test]
    fn test_save_keeps_other_users() {
        let store = temp_store();
        store.save("Alice", &ContactTree::starter()).expect("saves");
        store.save("Bob", &ContactTree::new()).expect("saves");
        assert_eq!(store.load("Alice").expect("loads"), ContactTree::starter());
    }

    #[test]
    fn test_credentials_round_trip() {
        let store = temp_store();
        store.save_credential("Alice", "$argon2id$stub").expect("saves");
        assert_eq!(
            store.credential("Alice").expect("loads").as_deref(),
            Some("$argon2id$stub")
        );
        assert_eq!(store.credential("Bob").expect("loads"), None);
    }
}
