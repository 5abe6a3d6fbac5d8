//! Session-parked notifications and the undo ledger.
//!
//! A mutating handler stores its notification batch in the session and
//! redirects; the page it lands on takes the batch out for display. Taking
//! is destructive, which is what clears the queue when the next distinct
//! operation begins. Handlers that re-render a form directly pass their
//! batch to the template without parking it.
//!
//! The undo ledger rides along in the session the same way, surviving
//! across requests until consumed or overwritten.

use tower_sessions::Session;

use rolodex_core::{Notifications, UndoLedger};

use crate::models::session_keys;

type SessionResult<T> = Result<T, tower_sessions::session::Error>;

/// Park a notification batch for the next page to display.
///
/// Empty batches are not stored.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn park_notices(session: &Session, notices: &Notifications) -> SessionResult<()> {
    if notices.is_empty() && notices.commentary().is_none() {
        return Ok(());
    }
    session.insert(session_keys::NOTICES, notices).await
}

/// Take the pending notification batch, leaving the session clear.
///
/// # Errors
///
/// Returns an error if the session cannot be read.
pub async fn take_notices(session: &Session) -> SessionResult<Notifications> {
    Ok(session
        .remove::<Notifications>(session_keys::NOTICES)
        .await?
        .unwrap_or_default())
}

/// Load the undo ledger, defaulting to empty.
///
/// # Errors
///
/// Returns an error if the session cannot be read.
pub async fn load_ledger(session: &Session) -> SessionResult<UndoLedger> {
    Ok(session
        .get::<UndoLedger>(session_keys::UNDO_LEDGER)
        .await?
        .unwrap_or_default())
}

/// Store the undo ledger back into the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn store_ledger(session: &Session, ledger: &UndoLedger) -> SessionResult<()> {
    session.insert(session_keys::UNDO_LEDGER, ledger).await
}
