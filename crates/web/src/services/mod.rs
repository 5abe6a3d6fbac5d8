//! Services for the web front end.

pub mod auth;
