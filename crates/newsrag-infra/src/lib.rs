//! Infrastructure layer for Newsrag.
//!
//! Contains implementations of the traits defined in `newsrag-core`:
//! SQLite session storage and the HTTP client for the retrieval
//! collaborator, plus configuration loading.

pub mod config;
pub mod retrieval;
pub mod sqlite;
