//! The contact tree: one user's categories and the contacts within them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{CategoryId, ContactId};

/// A single contact: name plus phone and email.
///
/// `phone` and `email` may each be empty, but validation never lets both be
/// empty at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl ContactRecord {
    /// Create a record from already-normalized field values.
    #[must_use]
    pub fn new(name: impl Into<String>, phone: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
        }
    }
}

/// A named grouping of contacts.
///
/// The id is unique within the owning user's tree; the name is unique within
/// the tree after [`capitalize`] normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub contacts: BTreeMap<ContactId, ContactRecord>,
}

impl Category {
    /// Create an empty category.
    #[must_use]
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            contacts: BTreeMap::new(),
        }
    }
}

/// The full ordered set of one user's categories and their contacts.
///
/// Order is insertion order and is meaningful for display, not uniqueness.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactTree {
    categories: Vec<Category>,
}

impl ContactTree {
    /// Create an empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            categories: Vec::new(),
        }
    }

    /// The starter tree every new account receives.
    #[must_use]
    pub fn starter() -> Self {
        Self {
            categories: vec![
                Category::new(CategoryId::new(1), "Friends"),
                Category::new(CategoryId::new(2), "Work"),
                Category::new(CategoryId::new(3), "Other"),
            ],
        }
    }

    /// All categories in display order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a category by id.
    #[must_use]
    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Look up a category by id, mutably.
    pub fn category_mut(&mut self, id: CategoryId) -> Option<&mut Category> {
        self.categories.iter_mut().find(|c| c.id == id)
    }

    /// Append a category at the end of the display order.
    pub fn push_category(&mut self, category: Category) {
        self.categories.push(category);
    }

    /// Remove a category (and all contacts in it) by id.
    pub fn remove_category(&mut self, id: CategoryId) -> Option<Category> {
        let index = self.categories.iter().position(|c| c.id == id)?;
        Some(self.categories.remove(index))
    }

    /// Iterate over every contact record in the tree, across all categories.
    pub fn records(&self) -> impl Iterator<Item = &ContactRecord> {
        self.categories.iter().flat_map(|c| c.contacts.values())
    }

    /// Whether the tree has no categories at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Whether no category holds any contact.
    #[must_use]
    pub fn has_no_contacts(&self) -> bool {
        self.categories.iter().all(|c| c.contacts.is_empty())
    }
}

/// Normalize a name the way all user-entered names are stored: first
/// character uppercased, the remainder lowercased.
#[must_use]
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
