//! Rolodex Core - Domain rule engine.
//!
//! This crate implements the rules that govern contact and category
//! mutation for one user's address book:
//!
//! - [`alloc`] - Unique-id allocation for categories and contacts
//! - [`validate`] - Name/phone/email format rules
//! - [`duplicates`] - Duplicate detection with self-exclusion during edits
//! - [`notify`] - Ordered user-facing notification batches
//! - [`undo`] - Single-slot undo for destructive operations
//! - [`engine`] - The operations themselves, orchestrating the above
//!
//! # Architecture
//!
//! The core crate contains only types and rules - no I/O, no HTTP, no
//! filesystem access. Persistence is abstracted behind the
//! [`store::TreeStore`] trait so the engine can commit a mutated tree
//! without knowing where it lives.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod alloc;
pub mod duplicates;
pub mod engine;
pub mod notify;
pub mod store;
pub mod tree;
pub mod types;
pub mod undo;
pub mod validate;

pub use engine::{EditOutcome, EngineError, RuleEngine};
pub use notify::{CommentaryKind, Notifications};
pub use store::{StoreError, TreeStore};
pub use tree::{Category, ContactRecord, ContactTree};
pub use types::{CategoryId, ContactId};
pub use undo::{ContactRef, UndoEntry, UndoLedger};
