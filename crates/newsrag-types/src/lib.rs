//! Shared domain types for Newsrag.
//!
//! This crate contains the persisted message model, the derived read types
//! (chat summaries, history windows), configuration, and the error taxonomy
//! used across the platform.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod config;
pub mod error;
pub mod message;
