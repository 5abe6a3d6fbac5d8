//! Ordered user-facing notifications for one operation.
//!
//! A [`Notifications`] batch collects every message an operation produces so
//! the user sees all of them in one response cycle. Successful operations
//! may also attach a commentary: one decorative follow-up line drawn from a
//! fixed six-entry ring for that kind of operation. The batch is
//! serde-serializable so the transport layer can park it in the session
//! across a redirect.

use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

/// An ordered batch of messages plus an optional commentary line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notifications {
    messages: Vec<String>,
    commentary: Option<String>,
}

impl Notifications {
    /// Append a message to the batch.
    pub fn push(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    /// Attach a commentary line for `kind`, replacing any previous one.
    pub fn set_commentary(&mut self, kind: CommentaryKind) {
        self.commentary = Some(kind.pick().to_owned());
    }

    /// The collected messages, in the order they were produced.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// The commentary line, if one was attached.
    #[must_use]
    pub fn commentary(&self) -> Option<&str> {
        self.commentary.as_deref()
    }

    /// Whether no messages have been collected. Commentary does not count;
    /// it never appears without a message.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// The operation kinds that carry a commentary ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentaryKind {
    Welcome,
    Signup,
    Signout,
    NewContact,
    Edit,
    Delete,
    Restore,
    Unchanged,
    CategoryCreate,
    CategoryDelete,
    CategoryRename,
}

impl CommentaryKind {
    /// The fixed candidate ring for this kind.
    #[must_use]
    pub const fn candidates(self) -> &'static [&'static str; 6] {
        match self {
            Self::Welcome => &[
                "It's not what you know, but who you know...",
                "Life is about relationships...",
                "Organize your contacts here!",
                "Good to see a familiar face.",
                "Your people await.",
                "Back to the rolodex...",
            ],
            Self::Signup => &[
                "Get started below!",
                "Now... Who do you know?",
                "Today is a great day to meet someone new.",
                "Everyone starts with an empty book.",
                "Your first contact is the hardest.",
                "Welcome aboard!",
            ],
            Self::Signout => &[
                "We're sad to see you go.",
                "Come back soon!",
                "Now go make some new friends!",
                "Off into the real world, then.",
                "Your contacts will keep.",
                "Until next time.",
            ],
            Self::NewContact => &[
                "Must be an interesting person...",
                "That's it... Now you're getting the hang of it!",
                "Building bridges, I see.",
                "Quite the socialite.",
                "Another name for the collection.",
                "They seemed nice.",
            ],
            Self::Edit => &[
                "Ahh, the winds of change...",
                "You seem to be friends with a chameleon!",
                "The only constant is that nothing remains constant... - Heraclitus",
                "People do move around these days.",
                "Keeping the records straight, I see.",
                "Details, details...",
            ],
            Self::Delete => &[
                "Your time is too valuable for people like that...",
                "I hope you said goodbye!",
                "We all must go separate ways, eventually.",
                "So long, then.",
                "One less birthday to remember.",
                "They'll never know.",
            ],
            Self::Restore => &[
                "Ugh. Here we go...",
                "A little indecisive, aren't we?",
                "Make up your mind!",
                "Hmmm... This could go on for a while.",
                "Good thing nothing is ever really gone.",
                "Second thoughts, second chances.",
            ],
            Self::Unchanged => &[
                "Is that what you meant to do?",
                "Maybe you'd like to try again?",
                "You're wasting my time...",
                "Nothing ventured, nothing changed.",
                "The record remains untouched.",
                "A bold display of restraint.",
            ],
            Self::CategoryCreate => &[
                "Now add some contacts!",
                "What organization skills you have.",
                "Very creative of you...",
                "A label for everything.",
                "The filing cabinet grows.",
                "Where will you put this one?",
            ],
            Self::CategoryDelete => &[
                "People don't need labels, anyways...",
                "Those people musn't have mattered much.",
                "Well, that was drastic...",
                "Sweeping things clean, I see.",
                "A bold reorganization.",
                "Gone, contacts and all.",
            ],
            Self::CategoryRename => &[
                "Was that really necessary?",
                "Are you being productive, or just spinning your wheels?",
                "The contacts therein remain unchanged.",
                "A rose by any other name...",
                "New label, same people.",
                "If it helps you find things...",
            ],
        }
    }

    /// Draw one candidate from the ring.
    #[must_use]
    pub fn pick(self) -> &'static str {
        self.candidates()
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or_default()
    }
}
