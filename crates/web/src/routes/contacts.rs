//! Contact route handlers.
//!
//! Create, edit, and delete contacts, plus the undo endpoint. Rejected
//! submissions re-render the form with the validation notices and the
//! user's input intact; successful mutations park their notices and
//! redirect to the listing.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use rolodex_core::{
    Category, CategoryId, ContactId, ContactTree, EditOutcome, Notifications, RuleEngine,
    TreeStore, UndoEntry, engine::ContactInput,
};

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{RequireAuth, load_ledger, park_notices, store_ledger, take_notices};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Contact form data, shared by create and edit.
///
/// `category_id` is absent when the user has no categories at all: the new
/// contact form renders no radio buttons then, so the browser submits
/// nothing for the field.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub category_id: Option<i32>,
}

// =============================================================================
// Templates
// =============================================================================

/// New contact form template.
#[derive(Template, WebTemplate)]
#[template(path = "contacts/new.html")]
pub struct ContactNewTemplate {
    pub categories: Vec<Category>,
    pub selected: CategoryId,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub notices: Notifications,
    pub undoable: bool,
}

/// Edit contact form template.
#[derive(Template, WebTemplate)]
#[template(path = "contacts/edit.html")]
pub struct ContactEditTemplate {
    pub categories: Vec<Category>,
    pub category_id: CategoryId,
    pub contact_id: ContactId,
    pub selected: CategoryId,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub notices: Notifications,
    pub undoable: bool,
}

// =============================================================================
// Create
// =============================================================================

/// Display the new contact form.
pub async fn new_page(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
) -> Result<Response> {
    let tree = state.store().load(&user.username)?;
    let notices = take_notices(&session).await?;
    let undoable = load_ledger(&session).await?.is_holding();
    // Preselect the newest category (the highest id under rescan allocation).
    let selected = newest_category(&tree);

    Ok(ContactNewTemplate {
        categories: tree.categories().to_vec(),
        selected,
        name: String::new(),
        phone: String::new(),
        email: String::new(),
        notices,
        undoable,
    }
    .into_response())
}

/// Handle new contact form submission.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Form(form): Form<ContactForm>,
) -> Result<Response> {
    let mut tree = state.store().load(&user.username)?;
    let engine = RuleEngine::new(state.store(), &user.username);
    let mut notices = Notifications::default();

    let Some(category_id) = form.category_id else {
        notices.push("You must first create a category");
        let undoable = load_ledger(&session).await?.is_holding();
        return Ok(ContactNewTemplate {
            categories: tree.categories().to_vec(),
            selected: newest_category(&tree),
            name: form.name,
            phone: form.phone,
            email: form.email,
            notices,
            undoable,
        }
        .into_response());
    };
    let category = CategoryId::new(category_id);

    if engine.create_contact(&mut tree, category, &form.as_input(), &mut notices)? {
        park_notices(&session, &notices).await?;
        return Ok(Redirect::to("/").into_response());
    }

    let undoable = load_ledger(&session).await?.is_holding();
    Ok(ContactNewTemplate {
        categories: tree.categories().to_vec(),
        selected: category,
        name: form.name,
        phone: form.phone,
        email: form.email,
        notices,
        undoable,
    }
    .into_response())
}

// =============================================================================
// Edit
// =============================================================================

/// Display the edit contact form, prefilled with the stored record.
pub async fn edit_page(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Path((category_id, contact_id)): Path<(i32, i32)>,
) -> Result<Response> {
    let tree = state.store().load(&user.username)?;
    let category = CategoryId::new(category_id);
    let contact = ContactId::new(contact_id);

    let record = tree
        .category(category)
        .and_then(|c| c.contacts.get(&contact))
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("contact {category_id}/{contact_id}")))?;

    let notices = take_notices(&session).await?;
    let undoable = load_ledger(&session).await?.is_holding();

    Ok(ContactEditTemplate {
        categories: tree.categories().to_vec(),
        category_id: category,
        contact_id: contact,
        selected: category,
        name: record.name,
        phone: record.phone,
        email: record.email,
        notices,
        undoable,
    }
    .into_response())
}

/// Handle edit contact form submission.
pub async fn edit(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Path((category_id, contact_id)): Path<(i32, i32)>,
    Form(form): Form<ContactForm>,
) -> Result<Response> {
    let mut tree = state.store().load(&user.username)?;
    let engine = RuleEngine::new(state.store(), &user.username);
    let mut ledger = load_ledger(&session).await?;
    let mut notices = Notifications::default();

    let category = CategoryId::new(category_id);
    let contact = ContactId::new(contact_id);
    // The edit form's select always submits a value while the contact's own
    // category exists; fall back to staying put if the field is missing.
    let new_category = form.category_id.map_or(category, CategoryId::new);

    let outcome = engine.edit_contact(
        &mut tree,
        category,
        contact,
        new_category,
        &form.as_input(),
        &mut ledger,
        &mut notices,
    )?;

    match outcome {
        EditOutcome::Applied => {
            store_ledger(&session, &ledger).await?;
            park_notices(&session, &notices).await?;
            Ok(Redirect::to("/").into_response())
        }
        EditOutcome::Unchanged => {
            park_notices(&session, &notices).await?;
            Ok(Redirect::to("/").into_response())
        }
        EditOutcome::Rejected => {
            let undoable = ledger.is_holding();
            Ok(ContactEditTemplate {
                categories: tree.categories().to_vec(),
                category_id: category,
                contact_id: contact,
                selected: new_category,
                name: form.name,
                phone: form.phone,
                email: form.email,
                notices,
                undoable,
            }
            .into_response())
        }
    }
}

// =============================================================================
// Delete
// =============================================================================

/// Handle contact deletion.
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Path((category_id, contact_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse> {
    let mut tree = state.store().load(&user.username)?;
    let engine = RuleEngine::new(state.store(), &user.username);
    let mut ledger = load_ledger(&session).await?;
    let mut notices = Notifications::default();

    engine.delete_contact(
        &mut tree,
        CategoryId::new(category_id),
        ContactId::new(contact_id),
        &mut ledger,
        &mut notices,
    )?;

    store_ledger(&session, &ledger).await?;
    park_notices(&session, &notices).await?;
    Ok(Redirect::to("/"))
}

// =============================================================================
// Undo
// =============================================================================

/// Reverse the most recent destructive action.
///
/// Category-level entries send the user back to the category manager;
/// everything else lands on the contact listing.
pub async fn undo(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
) -> Result<impl IntoResponse> {
    let mut tree = state.store().load(&user.username)?;
    let engine = RuleEngine::new(state.store(), &user.username);
    let mut ledger = load_ledger(&session).await?;
    let mut notices = Notifications::default();

    let target = if ledger.peek().is_some_and(UndoEntry::concerns_categories) {
        "/categories"
    } else {
        "/"
    };

    engine.undo(&mut tree, &mut ledger, &mut notices)?;

    store_ledger(&session, &ledger).await?;
    park_notices(&session, &notices).await?;
    Ok(Redirect::to(target))
}

/// The most recently created category: the highest id, since the allocator
/// hands out one past the current maximum.
fn newest_category(tree: &ContactTree) -> CategoryId {
    tree.categories()
        .iter()
        .map(|c| c.id)
        .max()
        .unwrap_or_else(|| CategoryId::new(0))
}

impl ContactForm {
    fn as_input(&self) -> ContactInput {
        ContactInput {
            name: self.name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
        }
    }
}
