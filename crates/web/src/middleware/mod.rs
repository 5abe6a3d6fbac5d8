//! HTTP middleware and session plumbing.
//!
//! # Layer Order (bottom to top in Router)
//!
//! 1. `TraceLayer` (request tracing)
//! 2. Session layer (tower-sessions, in-memory store)

pub mod auth;
pub mod flash;
pub mod session;

pub use auth::{OptionalAuth, RequireAuth, clear_current_user, set_current_user};
pub use flash::{load_ledger, park_notices, store_ledger, take_notices};
pub use session::create_session_layer;
