//! Category route handlers.
//!
//! The category manager lists every category with its contact count and
//! offers create, rename, and delete. Deleting a category takes its
//! contacts with it, which is exactly the case the undo ledger exists for.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use rolodex_core::{Category, CategoryId, Notifications, RuleEngine, TreeStore};

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{RequireAuth, load_ledger, park_notices, store_ledger, take_notices};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Category form data, shared by create and rename.
#[derive(Debug, Deserialize)]
pub struct CategoryForm {
    pub name: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Category manager template.
#[derive(Template, WebTemplate)]
#[template(path = "categories/index.html")]
pub struct CategoryIndexTemplate {
    pub categories: Vec<Category>,
    pub notices: Notifications,
    pub undoable: bool,
}

/// New category form template.
#[derive(Template, WebTemplate)]
#[template(path = "categories/new.html")]
pub struct CategoryNewTemplate {
    pub name: String,
    pub notices: Notifications,
    pub undoable: bool,
}

/// Rename category form template.
#[derive(Template, WebTemplate)]
#[template(path = "categories/edit.html")]
pub struct CategoryEditTemplate {
    pub category_id: CategoryId,
    pub name: String,
    pub notices: Notifications,
    pub undoable: bool,
}

// =============================================================================
// Manager
// =============================================================================

/// Display the category manager.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
) -> Result<impl IntoResponse> {
    let tree = state.store().load(&user.username)?;
    let notices = take_notices(&session).await?;
    let undoable = load_ledger(&session).await?.is_holding();

    Ok(CategoryIndexTemplate {
        categories: tree.categories().to_vec(),
        notices,
        undoable,
    })
}

// =============================================================================
// Create
// =============================================================================

/// Display the new category form.
pub async fn new_page(session: Session) -> Result<impl IntoResponse> {
    let notices = take_notices(&session).await?;
    let undoable = load_ledger(&session).await?.is_holding();

    Ok(CategoryNewTemplate {
        name: String::new(),
        notices,
        undoable,
    })
}

/// Handle new category form submission.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Form(form): Form<CategoryForm>,
) -> Result<Response> {
    let mut tree = state.store().load(&user.username)?;
    let engine = RuleEngine::new(state.store(), &user.username);
    let mut notices = Notifications::default();

    if engine.create_category(&mut tree, &form.name, &mut notices)? {
        park_notices(&session, &notices).await?;
        return Ok(Redirect::to("/categories").into_response());
    }

    let undoable = load_ledger(&session).await?.is_holding();
    Ok(CategoryNewTemplate {
        name: form.name,
        notices,
        undoable,
    }
    .into_response())
}

// =============================================================================
// Rename
// =============================================================================

/// Display the rename form, prefilled with the current name.
pub async fn edit_page(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Path(category_id): Path<i32>,
) -> Result<Response> {
    let tree = state.store().load(&user.username)?;
    let category = CategoryId::new(category_id);
    let name = tree
        .category(category)
        .map(|c| c.name.clone())
        .ok_or_else(|| AppError::NotFound(format!("category {category_id}")))?;

    let notices = take_notices(&session).await?;
    let undoable = load_ledger(&session).await?.is_holding();

    Ok(CategoryEditTemplate {
        category_id: category,
        name,
        notices,
        undoable,
    }
    .into_response())
}

/// Handle rename form submission.
pub async fn rename(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Path(category_id): Path<i32>,
    Form(form): Form<CategoryForm>,
) -> Result<Response> {
    let mut tree = state.store().load(&user.username)?;
    let engine = RuleEngine::new(state.store(), &user.username);
    let mut ledger = load_ledger(&session).await?;
    let mut notices = Notifications::default();
    let category = CategoryId::new(category_id);

    if engine.rename_category(&mut tree, category, &form.name, &mut ledger, &mut notices)? {
        store_ledger(&session, &ledger).await?;
        park_notices(&session, &notices).await?;
        return Ok(Redirect::to("/categories").into_response());
    }

    Ok(CategoryEditTemplate {
        category_id: category,
        name: form.name,
        notices,
        undoable: ledger.is_holding(),
    }
    .into_response())
}

// =============================================================================
// Delete
// =============================================================================

/// Handle category deletion, taking any contacts with it.
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Path(category_id): Path<i32>,
) -> Result<impl IntoResponse> {
    let mut tree = state.store().load(&user.username)?;
    let engine = RuleEngine::new(state.store(), &user.username);
    let mut ledger = load_ledger(&session).await?;
    let mut notices = Notifications::default();

    engine.delete_category(&mut tree, CategoryId::new(category_id), &mut ledger, &mut notices)?;

    store_ledger(&session, &ledger).await?;
    park_notices(&session, &notices).await?;
    Ok(Redirect::to("/categories"))
}
