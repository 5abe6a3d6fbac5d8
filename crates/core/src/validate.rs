//! Field validation: name, phone, and email format rules.
//!
//! Validation failures are user-facing notifications, not errors; every
//! check appends to the caller's [`Notifications`] batch so one submission
//! reports all of its problems at once.

use std::sync::LazyLock;

use regex::Regex;

use crate::duplicates::{self, ContactField};
use crate::notify::Notifications;
use crate::tree::{ContactRecord, ContactTree};

pub const BLANK_NAME_MSG: &str = "Name can not be blank.";
pub const PHONE_MSG: &str = "Phone number format is invalid.";
pub const EMAIL_MSG: &str = "Email address format is invalid.";
pub const EITHER_MSG: &str = "Either phone or email may be left blank";
pub const BOTH_MSG: &str = ", but not both.";

/// Accepted phone shapes: ten digits grouped 3-3-4 with an optional leading
/// `+` country code of one to six digits. The area group is mandatory, so a
/// bare seven-digit `###-####` is rejected.
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\+\d{1,6})?(\(\d{3}\)|\d{3}[-.]?)\d{3}[-.]?\d{4}$")
        .expect("phone pattern is valid")
});

/// `local@domain.tld`: ASCII word characters with single `.`/`-` separators
/// in the local part; lowercase-letter/digit/hyphen labels in the domain,
/// ending in an alphabetic top-level label. Case-insensitive.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Za-z0-9_]+([-.][A-Za-z0-9_]+)*@[a-z0-9-]+(\.[a-z0-9-]+)*\.[a-z]+$")
        .expect("email pattern is valid")
});

/// Push the blank-name notification if `name` is empty.
pub fn check_name(name: &str, notices: &mut Notifications) {
    if name.is_empty() {
        notices.push(BLANK_NAME_MSG);
    }
}

/// Nth byte counting back from the end, 1-based.
fn byte_from_end(s: &str, n: usize) -> Option<u8> {
    s.len().checked_sub(n).and_then(|i| s.as_bytes().get(i)).copied()
}

/// Whether `phone` is an acceptable phone number.
///
/// Beyond the grouped-digits pattern, separators must be consistent: a
/// leading `+` forbids `.` anywhere, `-` and `.` may not be mixed between
/// the two separator slots, and a separator-free ten-digit run may not carry
/// a stray separator at the internal offset.
#[must_use]
pub fn valid_phone(phone: &str) -> bool {
    if !PHONE_RE.is_match(phone) {
        return false;
    }
    if phone.contains('+') {
        !phone.contains('.')
    } else if byte_from_end(phone, 5) == Some(b'.') {
        byte_from_end(phone, 9) == Some(b'.')
    } else if byte_from_end(phone, 5) == Some(b'-') {
        byte_from_end(phone, 9) != Some(b'.')
    } else {
        !matches!(byte_from_end(phone, 8), Some(b'-' | b'.'))
    }
}

/// Whether `email` has the accepted `local@domain.tld` shape.
#[must_use]
pub fn valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Report on the phone/email pair.
///
/// Exactly one of phone and email may be blank. The messages and their
/// order depend on which fields are blank and which are malformed; a valid
/// pair (or one valid field plus one blank) is silent.
pub fn check_phone_email_combo(phone: &str, email: &str, notices: &mut Notifications) {
    let phone_bad = !valid_phone(phone) && !phone.is_empty();
    let email_bad = !valid_email(email) && !email.is_empty();

    if phone.is_empty() && email.is_empty() {
        notices.push(format!("{EITHER_MSG}{BOTH_MSG}"));
    } else if phone_bad && email_bad {
        notices.push(PHONE_MSG);
        notices.push(EMAIL_MSG);
        notices.push(format!("{EITHER_MSG}."));
    } else if phone_bad && valid_email(email) {
        notices.push(PHONE_MSG);
        notices.push(format!("{EITHER_MSG}."));
    } else if email_bad && valid_phone(phone) {
        notices.push(EMAIL_MSG);
        notices.push(format!("{EITHER_MSG}."));
    } else if phone_bad {
        notices.push(PHONE_MSG);
    } else if email_bad {
        notices.push(EMAIL_MSG);
    }
}

fn push_duplicate_notice(field: ContactField, notices: &mut Notifications) {
    let what = match field {
        ContactField::Name => "name",
        ContactField::Phone => "phone number",
        ContactField::Email => "email address",
    };
    notices.push(format!("You already have a contact with that {what}."));
}

/// Run every contact-field check, collecting all notifications.
///
/// `editing` is the record currently being edited, if any; its own values
/// are excluded from duplicate detection field by field.
pub fn check_contact(
    tree: &ContactTree,
    name: &str,
    phone: &str,
    email: &str,
    editing: Option<&ContactRecord>,
    notices: &mut Notifications,
) {
    check_name(name, notices);
    check_phone_email_combo(phone, email, notices);

    if duplicates::is_duplicate(tree, name, ContactField::Name, editing) {
        push_duplicate_notice(ContactField::Name, notices);
    }
    if !phone.is_empty() && duplicates::is_duplicate(tree, phone, ContactField::Phone, editing) {
        push_duplicate_notice(ContactField::Phone, notices);
    }
    if !email.is_empty() && duplicates::is_duplicate(tree, email, ContactField::Email, editing) {
        push_duplicate_notice(ContactField::Email, notices);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Category, ContactRecord};
    use crate::types::{CategoryId, ContactId};

    #[test]
    fn test_valid_phone_accepted_forms() {
        for phone in [
            "(555)123-4567",
            "555-123-4567",
            "555.123.4567",
            "5551234567",
            "+15551234567",
            "+1(555)123-4567",
            "+445551234567",
        ] {
            assert!(valid_phone(phone), "{phone} should be valid");
        }
    }

    #[test]
    fn test_valid_phone_rejected_forms() {
        for phone in [
            "555-1234",        // no area group
            "555-123.4567",    // mixed separators
            "555.123-4567",    // mixed separators
            "(555)123.4567",   // dot after bracket group
            "+1.555.123.4567", // plus forbids dots
            "555-1234567",     // stray dash in an otherwise bare run
            "55512345678",     // eleven digits, no prefix
            "not-a-phone",
            "",
        ] {
            assert!(!valid_phone(phone), "{phone} should be invalid");
        }
    }

    #[test]
    fn test_valid_email() {
        assert!(valid_email("bob@example.com"));
        assert!(valid_email("bob.smith-jr@mail.example.co.uk"));
        assert!(valid_email("BOB@EXAMPLE.COM"));
        assert!(!valid_email("bob@example"));
        assert!(!valid_email("bob@@example.com"));
        assert!(!valid_email("bob..smith@example.com"));
        assert!(!valid_email("@example.com"));
        assert!(!valid_email("bob@example.c0m"));
        assert!(!valid_email(""));
    }

    #[test]
    fn test_combo_both_blank() {
        let mut notices = Notifications::default();
        check_phone_email_combo("", "", &mut notices);
        assert_eq!(
            notices.messages(),
            ["Either phone or email may be left blank, but not both."]
        );
    }

    #[test]
    fn test_combo_both_invalid() {
        let mut notices = Notifications::default();
        check_phone_email_combo("not-a-phone", "not-an-email", &mut notices);
        assert_eq!(
            notices.messages(),
            [
                PHONE_MSG,
                EMAIL_MSG,
                "Either phone or email may be left blank.",
            ]
        );
    }

    #[test]
    fn test_combo_one_invalid_other_valid() {
        let mut notices = Notifications::default();
        check_phone_email_combo("bogus", "bob@example.com", &mut notices);
        assert_eq!(
            notices.messages(),
            [PHONE_MSG, "Either phone or email may be left blank."]
        );

        let mut notices = Notifications::default();
        check_phone_email_combo("555-123-4567", "bogus", &mut notices);
        assert_eq!(
            notices.messages(),
            [EMAIL_MSG, "Either phone or email may be left blank."]
        );
    }

    #[test]
    fn test_combo_one_invalid_other_blank() {
        let mut notices = Notifications::default();
        check_phone_email_combo("bogus", "", &mut notices);
        assert_eq!(notices.messages(), [PHONE_MSG]);

        let mut notices = Notifications::default();
        check_phone_email_combo("", "bogus", &mut notices);
        assert_eq!(notices.messages(), [EMAIL_MSG]);
    }

    #[test]
    fn test_combo_silent_cases() {
        for (phone, email) in [
            ("555-123-4567", "bob@example.com"),
            ("555-123-4567", ""),
            ("", "bob@example.com"),
        ] {
            let mut notices = Notifications::default();
            check_phone_email_combo(phone, email, &mut notices);
            assert!(notices.is_empty(), "({phone}, {email}) should be silent");
        }
    }

    #[test]
    fn test_check_contact_collects_everything() {
        let mut tree = crate::tree::ContactTree::new();
        tree.push_category(Category::new(CategoryId::new(1), "Friends"));
        if let Some(cat) = tree.category_mut(CategoryId::new(1)) {
            cat.contacts.insert(
                ContactId::new(1),
                ContactRecord::new("Bob", "555-123-4567", "bob@example.com"),
            );
        }

        let mut notices = Notifications::default();
        check_contact(&tree, "", "555-123-4567", "", None, &mut notices);
        assert_eq!(
            notices.messages(),
            [BLANK_NAME_MSG, "You already have a contact with that phone number."]
        );
    }
}
