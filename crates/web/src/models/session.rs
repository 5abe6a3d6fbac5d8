//! Session-related types.
//!
//! Besides the signed-in identity, the session carries the two pieces of
//! per-user state that must survive a redirect: the pending notification
//! batch and the undo ledger.

use serde::{Deserialize, Serialize};

/// Session-stored user identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Normalized username (capitalized on input, like every stored name).
    pub username: String,
}

/// Session keys.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the pending notification batch awaiting display.
    pub const NOTICES: &str = "notices";

    /// Key for the per-user undo ledger.
    pub const UNDO_LEDGER: &str = "undo_ledger";
}
