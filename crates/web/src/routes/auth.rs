//! Authentication route handlers.
//!
//! Sign-in, registration, and sign-out. Failed attempts re-render the form
//! with notifications rather than redirecting, so typed usernames survive.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use rolodex_core::{CommentaryKind, Notifications};

use crate::error::Result;
use crate::filters;
use crate::middleware::{clear_current_user, park_notices, set_current_user, take_notices};
use crate::models::CurrentUser;
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Sign-in form data.
#[derive(Debug, Deserialize)]
pub struct SigninForm {
    pub username: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub password_confirm: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Sign-in page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/signin.html")]
pub struct SigninTemplate {
    pub username: String,
    pub notices: Notifications,
    pub undoable: bool,
}

/// Registration page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub username: String,
    pub notices: Notifications,
    pub undoable: bool,
}

// =============================================================================
// Sign-in Routes
// =============================================================================

/// Display the sign-in page.
pub async fn signin_page(session: Session) -> Result<impl IntoResponse> {
    let notices = take_notices(&session).await?;
    Ok(SigninTemplate {
        username: String::new(),
        notices,
        undoable: false,
    })
}

/// Handle sign-in form submission.
pub async fn signin(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SigninForm>,
) -> Result<Response> {
    let auth = AuthService::new(state.store());
    let mut notices = Notifications::default();

    match auth.login(&form.username, &form.password) {
        Ok(username) => {
            set_current_user(&session, &CurrentUser { username: username.clone() }).await?;

            notices.push(format!("Welcome {username}."));
            notices.set_commentary(CommentaryKind::Welcome);
            park_notices(&session, &notices).await?;
            Ok(Redirect::to("/").into_response())
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::warn!("Sign-in failed");
            notices.push("Invalid Credentials. Please enter a valid username and password.");
            Ok(SigninTemplate {
                username: form.username,
                notices,
                undoable: false,
            }
            .into_response())
        }
        Err(err) => Err(err.into()),
    }
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page(session: Session) -> Result<impl IntoResponse> {
    let notices = take_notices(&session).await?;
    Ok(RegisterTemplate {
        username: String::new(),
        notices,
        undoable: false,
    })
}

/// Handle registration form submission.
///
/// A successful registration signs the new user straight in.
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Response> {
    let mut notices = Notifications::default();

    if form.password != form.password_confirm {
        notices.push(
            "Password confirmation did not match. Please check your spelling and try again.",
        );
        return Ok(render_register(form.username, notices));
    }

    let auth = AuthService::new(state.store());
    match auth.register(&form.username, &form.password) {
        Ok(username) => {
            set_current_user(&session, &CurrentUser { username: username.clone() }).await?;

            notices.push("You have successfully created a new account.");
            notices.set_commentary(CommentaryKind::Signup);
            park_notices(&session, &notices).await?;
            Ok(Redirect::to("/").into_response())
        }
        Err(AuthError::BlankCredentials) => {
            notices.push("Username and password may not be blank.");
            Ok(render_register(form.username, notices))
        }
        Err(AuthError::UsernameTaken) => {
            notices.push("That username is taken. Please try another one.");
            Ok(render_register(form.username, notices))
        }
        Err(err) => Err(err.into()),
    }
}

fn render_register(username: String, notices: Notifications) -> Response {
    RegisterTemplate {
        username,
        notices,
        undoable: false,
    }
    .into_response()
}

// =============================================================================
// Sign-out Route
// =============================================================================

/// Handle sign-out.
///
/// Drops the whole session, including any held undo entry, then parks the
/// farewell notice for the welcome page.
pub async fn signout(session: Session) -> Result<impl IntoResponse> {
    clear_current_user(&session).await?;
    session.clear().await;

    let mut notices = Notifications::default();
    notices.push("You have been signed out.");
    notices.set_commentary(CommentaryKind::Signout);
    park_notices(&session, &notices).await?;

    Ok(Redirect::to("/"))
}
