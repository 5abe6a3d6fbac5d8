//! Domain models for the web front end.

pub mod session;

pub use session::{CurrentUser, keys as session_keys};
