//! The contact rule engine: every mutating operation on a user's tree.
//!
//! Each operation validates, checks duplicates, allocates ids, mutates the
//! in-memory tree, records an undo entry where applicable, persists through
//! the [`TreeStore`], and emits notifications. Validation and conflict
//! failures abort without mutating and leave the collected notifications
//! for re-display; they are never fatal. Unknown ids are contract
//! violations from the transport layer and surface as [`EngineError`].

use thiserror::Error;

use crate::alloc;
use crate::notify::{CommentaryKind, Notifications};
use crate::store::{StoreError, TreeStore};
use crate::tree::{Category, ContactRecord, ContactTree, capitalize};
use crate::types::{CategoryId, ContactId};
use crate::undo::{ContactRef, MissingCategory, UndoEntry, UndoLedger};
use crate::validate;

/// Raw, transport-supplied contact fields for a create or edit.
#[derive(Debug, Clone, Default)]
pub struct ContactInput {
    pub name: String,
    pub phone: String,
    pub email: String,
}

/// How an edit resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The contact was replaced (delete-old + create-new) and persisted.
    Applied,
    /// Nothing differed from the original; the tree was left untouched and
    /// no undo entry was recorded.
    Unchanged,
    /// Validation or conflict notifications blocked the edit.
    Rejected,
}

/// Contract violations and persistence failures.
///
/// These are not user-facing: the UI never offers an id that does not
/// exist, and a store failure means the mutation could not be committed.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no category with id {0}")]
    CategoryNotFound(CategoryId),

    #[error("no contact {contact} in category {category}")]
    ContactNotFound {
        category: CategoryId,
        contact: ContactId,
    },

    #[error(transparent)]
    Undo(#[from] MissingCategory),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The rule engine, bound to one user and a persistence backend.
pub struct RuleEngine<'a, S: TreeStore + ?Sized> {
    store: &'a S,
    username: &'a str,
}

impl<'a, S: TreeStore + ?Sized> RuleEngine<'a, S> {
    /// Create an engine for `username` committing through `store`.
    #[must_use]
    pub const fn new(store: &'a S, username: &'a str) -> Self {
        Self { store, username }
    }

    fn persist(&self, tree: &ContactTree) -> Result<(), EngineError> {
        self.store.save(self.username, tree)?;
        Ok(())
    }

    /// Create a contact in an existing category.
    ///
    /// Returns `true` if the contact was created, `false` if notifications
    /// blocked it (the tree is untouched either way on `false`).
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::CategoryNotFound`] for an unknown category and
    /// [`EngineError::Store`] if persisting fails.
    pub fn create_contact(
        &self,
        tree: &mut ContactTree,
        category: CategoryId,
        input: &ContactInput,
        notices: &mut Notifications,
    ) -> Result<bool, EngineError> {
        if tree.category(category).is_none() {
            return Err(EngineError::CategoryNotFound(category));
        }

        let name = capitalize(input.name.trim());
        let phone = input.phone.trim();
        let email = input.email.trim();

        validate::check_contact(tree, &name, phone, email, None, notices);
        if !notices.is_empty() {
            return Ok(false);
        }

        let id = alloc::next_contact_id(tree);
        if let Some(slot) = tree.category_mut(category) {
            slot.contacts
                .insert(id, ContactRecord::new(name.clone(), phone, email));
        }
        self.persist(tree)?;

        notices.push(format!("You have added \"{name}\" to your contacts."));
        notices.set_commentary(CommentaryKind::NewContact);
        Ok(true)
    }

    /// Edit a contact, possibly moving it to another category.
    ///
    /// The edit is modeled as delete-old + create-new: a fresh contact id is
    /// allocated even when the category stays the same, and the undo entry
    /// pairs both halves. An edit that changes nothing is a no-op that
    /// records no undo entry.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::CategoryNotFound`] /
    /// [`EngineError::ContactNotFound`] for unknown ids and
    /// [`EngineError::Store`] if persisting fails.
    #[allow(clippy::too_many_arguments)]
    pub fn edit_contact(
        &self,
        tree: &mut ContactTree,
        category: CategoryId,
        contact: ContactId,
        new_category: CategoryId,
        input: &ContactInput,
        ledger: &mut UndoLedger,
        notices: &mut Notifications,
    ) -> Result<EditOutcome, EngineError> {
        let original = tree
            .category(category)
            .ok_or(EngineError::CategoryNotFound(category))?
            .contacts
            .get(&contact)
            .cloned()
            .ok_or(EngineError::ContactNotFound { category, contact })?;
        if tree.category(new_category).is_none() {
            return Err(EngineError::CategoryNotFound(new_category));
        }

        let name = capitalize(input.name.trim());
        let phone = input.phone.trim().to_owned();
        let email = input.email.trim().to_owned();

        validate::check_contact(tree, &name, &phone, &email, Some(&original), notices);

        if new_category == category
            && name == original.name
            && phone == original.phone
            && email == original.email
        {
            notices.push("You haven't made any changes.");
            notices.set_commentary(CommentaryKind::Unchanged);
            return Ok(EditOutcome::Unchanged);
        }

        if !notices.is_empty() {
            return Ok(EditOutcome::Rejected);
        }

        let new_contact = alloc::next_contact_id(tree);
        if let Some(slot) = tree.category_mut(category) {
            slot.contacts.remove(&contact);
        }
        let record = ContactRecord::new(name.clone(), phone, email);
        if let Some(slot) = tree.category_mut(new_category) {
            slot.contacts.insert(new_contact, record.clone());
        }

        ledger.record(UndoEntry::EditedContact {
            deleted: ContactRef {
                category,
                contact,
                record: original,
            },
            created: ContactRef {
                category: new_category,
                contact: new_contact,
                record,
            },
        });
        self.persist(tree)?;

        notices.push(format!("You've successfully updated {name}."));
        notices.set_commentary(CommentaryKind::Edit);
        Ok(EditOutcome::Applied)
    }

    /// Delete a contact, making the deletion undoable.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::CategoryNotFound`] /
    /// [`EngineError::ContactNotFound`] for unknown ids and
    /// [`EngineError::Store`] if persisting fails.
    pub fn delete_contact(
        &self,
        tree: &mut ContactTree,
        category: CategoryId,
        contact: ContactId,
        ledger: &mut UndoLedger,
        notices: &mut Notifications,
    ) -> Result<(), EngineError> {
        let record = tree
            .category_mut(category)
            .ok_or(EngineError::CategoryNotFound(category))?
            .contacts
            .remove(&contact)
            .ok_or(EngineError::ContactNotFound { category, contact })?;

        let name = record.name.clone();
        ledger.record(UndoEntry::DeletedContact {
            category,
            contact,
            record,
        });
        self.persist(tree)?;

        notices.push(format!("{name} has been deleted."));
        notices.set_commentary(CommentaryKind::Delete);
        Ok(())
    }

    /// Create a new, empty category.
    ///
    /// Returns `true` on success, `false` when the name is blank or already
    /// taken by this user (case-insensitively, since names are capitalized
    /// on input). Creation is not undoable.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] if persisting fails.
    pub fn create_category(
        &self,
        tree: &mut ContactTree,
        name: &str,
        notices: &mut Notifications,
    ) -> Result<bool, EngineError> {
        let name = capitalize(name.trim());
        if name.is_empty() {
            notices.push("Category name may not be blank");
            return Ok(false);
        }
        if tree.categories().iter().any(|c| c.name == name) {
            notices.push("You already have a category with that name");
            return Ok(false);
        }

        let id = alloc::next_category_id(tree);
        tree.push_category(Category::new(id, name.clone()));
        self.persist(tree)?;

        notices.push(format!("\"{name}\" has been added to your categories."));
        notices.set_commentary(CommentaryKind::CategoryCreate);
        Ok(true)
    }

    /// Rename a category, making the rename undoable.
    ///
    /// Returns `true` on success, `false` when the new name is blank or
    /// collides with another category's name.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::CategoryNotFound`] for an unknown category and
    /// [`EngineError::Store`] if persisting fails.
    pub fn rename_category(
        &self,
        tree: &mut ContactTree,
        category: CategoryId,
        new_name: &str,
        ledger: &mut UndoLedger,
        notices: &mut Notifications,
    ) -> Result<bool, EngineError> {
        if tree.category(category).is_none() {
            return Err(EngineError::CategoryNotFound(category));
        }

        let name = capitalize(new_name.trim());
        validate::check_name(&name, notices);
        if tree
            .categories()
            .iter()
            .any(|c| c.id != category && c.name == name)
        {
            notices.push("You already have a category with that name");
        }
        if !notices.is_empty() {
            return Ok(false);
        }

        if let Some(slot) = tree.category_mut(category) {
            let old_name = std::mem::replace(&mut slot.name, name.clone());
            ledger.record(UndoEntry::RenamedCategory { category, old_name });
        }
        self.persist(tree)?;

        notices.push(format!("\"{name}\" has been renamed."));
        notices.set_commentary(CommentaryKind::CategoryRename);
        Ok(true)
    }

    /// Delete a whole category and the contacts in it, undoably.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::CategoryNotFound`] for an unknown category and
    /// [`EngineError::Store`] if persisting fails.
    pub fn delete_category(
        &self,
        tree: &mut ContactTree,
        category: CategoryId,
        ledger: &mut UndoLedger,
        notices: &mut Notifications,
    ) -> Result<(), EngineError> {
        let removed = tree
            .remove_category(category)
            .ok_or(EngineError::CategoryNotFound(category))?;

        notices.push(format!(
            "\"{}\" has been deleted, along with any contacts therein.",
            removed.name
        ));
        ledger.record(UndoEntry::DeletedCategory { category: removed });
        self.persist(tree)?;

        notices.set_commentary(CommentaryKind::CategoryDelete);
        Ok(())
    }

    /// Reverse the most recent destructive action, if one is held.
    ///
    /// Returns `true` if an entry was applied, `false` for the empty-ledger
    /// no-op (the UI hides the undo control in that case).
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Undo`] if the entry points at a category the
    /// tree no longer has, and [`EngineError::Store`] if persisting fails.
    pub fn undo(
        &self,
        tree: &mut ContactTree,
        ledger: &mut UndoLedger,
        notices: &mut Notifications,
    ) -> Result<bool, EngineError> {
        let Some(message) = ledger.undo(tree)? else {
            return Ok(false);
        };
        self.persist(tree)?;

        notices.push(message);
        notices.set_commentary(CommentaryKind::Restore);
        Ok(true)
    }
}
