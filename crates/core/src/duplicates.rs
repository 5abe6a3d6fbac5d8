//! Duplicate detection across a user's whole tree.
//!
//! During an edit the record being edited is passed in as explicit context:
//! a value that merely matches that record's own current value is not a
//! duplicate, it is simply an unchanged field. The exclusion is evaluated
//! per field, so an unchanged phone does not shield a conflicting name.

use crate::tree::{ContactRecord, ContactTree};

/// Which contact field a duplicate scan compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Phone,
    Email,
}

impl ContactField {
    fn of<'a>(self, record: &'a ContactRecord) -> &'a str {
        match self {
            Self::Name => &record.name,
            Self::Phone => &record.phone,
            Self::Email => &record.email,
        }
    }
}

/// Whether any contact in any category already carries `value` in `field`.
///
/// When `editing` is the record currently being edited and its own value for
/// `field` equals `value`, the scan reports no duplicate even if another
/// contact also matches: the field is unchanged, and pre-existing conflicts
/// are not this edit's problem.
#[must_use]
pub fn is_duplicate(
    tree: &ContactTree,
    value: &str,
    field: ContactField,
    editing: Option<&ContactRecord>,
) -> bool {
    if editing.is_some_and(|record| field.of(record) == value) {
        return false;
    }
    tree.records().any(|record| field.of(record) == value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Category;
    use crate::types::{CategoryId, ContactId};

    fn sample_tree() -> ContactTree {
        let mut tree = ContactTree::new();
        tree.push_category(Category::new(CategoryId::new(1), "Friends"));
        tree.push_category(Category::new(CategoryId::new(2), "Work"));
        if let Some(cat) = tree.category_mut(CategoryId::new(1)) {
            cat.contacts.insert(
                ContactId::new(1),
                ContactRecord::new("Bob", "555-123-4567", "bob@example.com"),
            );
        }
        if let Some(cat) = tree.category_mut(CategoryId::new(2)) {
            cat.contacts.insert(
                ContactId::new(2),
                ContactRecord::new("Sue", "555-987-6543", "sue@example.com"),
            );
        }
        tree
    }

    #[test]
    fn test_detects_duplicates_across_categories() {
        let tree = sample_tree();
        assert!(is_duplicate(&tree, "Bob", ContactField::Name, None));
        assert!(is_duplicate(&tree, "555-987-6543", ContactField::Phone, None));
        assert!(is_duplicate(&tree, "sue@example.com", ContactField::Email, None));
        assert!(!is_duplicate(&tree, "Ann", ContactField::Name, None));
    }

    #[test]
    fn test_edit_context_excludes_own_values_per_field() {
        let tree = sample_tree();
        let bob = ContactRecord::new("Bob", "555-123-4567", "bob@example.com");

        // Unchanged fields are not duplicates of themselves.
        assert!(!is_duplicate(&tree, "Bob", ContactField::Name, Some(&bob)));
        assert!(!is_duplicate(&tree, "555-123-4567", ContactField::Phone, Some(&bob)));

        // Another contact's value still conflicts.
        assert!(is_duplicate(&tree, "Sue", ContactField::Name, Some(&bob)));
        assert!(is_duplicate(&tree, "sue@example.com", ContactField::Email, Some(&bob)));
    }

    #[test]
    fn test_exclusion_is_field_specific() {
        let tree = sample_tree();
        let bob = ContactRecord::new("Bob", "555-123-4567", "bob@example.com");
        // Bob's own name used as an email value is not shielded.
        assert!(!is_duplicate(&tree, "Bob", ContactField::Email, Some(&bob)));
    }
}
