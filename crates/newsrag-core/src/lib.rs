//! Business logic and trait definitions for Newsrag.
//!
//! This crate defines the "ports" (`SessionStore`, `RetrievalClient`) that
//! the infrastructure layer implements, plus the components built on top of
//! them: history windowing, chat listing, deletion, and the ask
//! orchestration. It depends only on `newsrag-types` -- never on
//! `newsrag-infra` or any database/IO crate.

pub mod ask;
pub mod deletion;
pub mod history;
pub mod listing;
pub mod retrieval;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;
