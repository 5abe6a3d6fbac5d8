//! Persistence boundary for contact trees.
//!
//! The engine mutates trees in memory and commits them through this trait;
//! where and how they are stored is the caller's concern. The reference
//! implementation lives in `rolodex-web` and writes per-user YAML files.

use thiserror::Error;

use crate::tree::ContactTree;

/// Errors a store implementation can surface.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing storage failed.
    #[error("storage i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing data exists but cannot be decoded.
    #[error("malformed data file: {0}")]
    Malformed(String),
}

/// Durable storage for per-user contact trees.
///
/// Implementations must preserve category order and exact field values.
/// A user with no stored data loads as an empty tree.
pub trait TreeStore {
    /// Load `username`'s tree, or an empty tree if none is stored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing storage cannot be read or
    /// decoded.
    fn load(&self, username: &str) -> Result<ContactTree, StoreError>;

    /// Persist `username`'s tree wholesale.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing storage cannot be written.
    fn save(&self, username: &str, tree: &ContactTree) -> Result<(), StoreError>;
}
