//! Core identifier types for Rolodex.

pub mod id;

pub use id::{CategoryId, ContactId};
