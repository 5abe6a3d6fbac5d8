//! Home page: the contact listing, or a welcome page for guests.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tower_sessions::Session;

use rolodex_core::{ContactTree, Notifications, TreeStore};

use crate::error::Result;
use crate::filters;
use crate::middleware::{OptionalAuth, load_ledger, take_notices};
use crate::state::AppState;

/// Welcome page shown to guests.
#[derive(Template, WebTemplate)]
#[template(path = "welcome.html")]
pub struct WelcomeTemplate {
    pub notices: Notifications,
    pub undoable: bool,
}

/// Contact listing for a signed-in user.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub username: String,
    pub tree: ContactTree,
    pub notices: Notifications,
    pub undoable: bool,
}

/// Display the home page.
///
/// Guests get the welcome page; signed-in users get their full contact
/// listing grouped by category.
pub async fn index(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    session: Session,
) -> Result<impl IntoResponse> {
    let notices = take_notices(&session).await?;

    let Some(user) = user else {
        return Ok(WelcomeTemplate {
            notices,
            undoable: false,
        }
        .into_response());
    };

    let tree = state.store().load(&user.username)?;
    let undoable = load_ledger(&session).await?.is_holding();

    Ok(IndexTemplate {
        username: user.username,
        tree,
        notices,
        undoable,
    }
    .into_response())
}
