//! HTTP route handlers for the contact manager.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Contact listing (or welcome page when signed out)
//! GET  /health                 - Health check
//!
//! # Auth
//! GET  /auth/signin            - Sign-in page
//! POST /auth/signin            - Sign-in action
//! GET  /auth/register          - Registration page
//! POST /auth/register          - Registration action
//! POST /auth/signout           - Sign-out action
//!
//! # Contacts (requires auth)
//! GET  /contacts/new           - New contact form
//! POST /contacts/new           - Create contact
//! GET  /contacts/{category_id}/{contact_id}/edit   - Edit contact form
//! POST /contacts/{category_id}/{contact_id}/edit   - Apply edit
//! POST /contacts/{category_id}/{contact_id}/delete - Delete contact
//! POST /undo                   - Reverse the last destructive action
//!
//! # Categories (requires auth)
//! GET  /categories             - Manage categories
//! GET  /categories/new         - New category form
//! POST /categories/new         - Create category
//! GET  /categories/{category_id}/edit   - Rename form
//! POST /categories/{category_id}/edit   - Apply rename
//! POST /categories/{category_id}/delete - Delete category and its contacts
//! ```

pub mod auth;
pub mod categories;
pub mod contacts;
pub mod home;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signin", get(auth::signin_page).post(auth::signin))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/signout", post(auth::signout))
}

/// Create the contact routes router.
pub fn contact_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/new",
            get(contacts::new_page).post(contacts::create),
        )
        .route(
            "/{category_id}/{contact_id}/edit",
            get(contacts::edit_page).post(contacts::edit),
        )
        .route("/{category_id}/{contact_id}/delete", post(contacts::delete))
}

/// Create the category routes router.
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(categories::index))
        .route(
            "/new",
            get(categories::new_page).post(categories::create),
        )
        .route(
            "/{category_id}/edit",
            get(categories::edit_page).post(categories::rename),
        )
        .route("/{category_id}/delete", post(categories::delete))
}

/// Create the full application router (without state or layers).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/undo", post(contacts::undo))
        .nest("/auth", auth_routes())
        .nest("/contacts", contact_routes())
        .nest("/categories", category_routes())
}
