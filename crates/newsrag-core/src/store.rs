//! SessionStore trait definition.
//!
//! Durable, queryable, append-only message log. Implementations live in
//! `newsrag-infra` (e.g., `SqliteSessionStore`). Uses native async fn in
//! traits (RPITIT, Rust 2024 edition).

use newsrag_types::error::StoreError;
use newsrag_types::message::{Message, MessageDraft, MessageKey};

/// Outcome of a bulk delete.
///
/// Deletion is never atomic across the key set: each key is deleted
/// independently and failures are reported per key so the caller can
/// retry only those.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteReport {
    /// Keys whose delete call succeeded.
    pub deleted: usize,
    /// Keys whose delete call failed.
    pub failed: Vec<MessageKey>,
}

impl DeleteReport {
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Storage trait for the chat message log.
///
/// All queries are scoped to one user; a chat thread is a filter over the
/// user's partition, not a partition of its own. The store must be safe
/// for concurrent use by many simultaneous callers.
pub trait SessionStore: Send + Sync {
    /// Persist a draft, assigning its timestamp at write time.
    ///
    /// Insert-only: an existing `(user_id, timestamp)` key is never
    /// overwritten. Fails loudly on backend unavailability; no retry.
    /// Returns the stored message including the assigned timestamp.
    fn append(
        &self,
        draft: MessageDraft,
    ) -> impl std::future::Future<Output = Result<Message, StoreError>> + Send;

    /// All messages of one user, ascending by timestamp.
    fn query_by_user(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Message>, StoreError>> + Send;

    /// All messages of one chat thread, ascending by timestamp.
    fn query_by_chat(
        &self,
        user_id: &str,
        chat_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Message>, StoreError>> + Send;

    /// The `limit` most recently written messages of one chat thread,
    /// descending by timestamp.
    fn query_recent(
        &self,
        user_id: &str,
        chat_id: &str,
        limit: u32,
    ) -> impl std::future::Future<Output = Result<Vec<Message>, StoreError>> + Send;

    /// Delete the given keys, one by one.
    ///
    /// Returns a [`DeleteReport`] with per-key outcomes. Only a failure to
    /// reach the backend at all is an `Err`; individual key failures land
    /// in the report.
    fn delete_many(
        &self,
        keys: &[MessageKey],
    ) -> impl std::future::Future<Output = Result<DeleteReport, StoreError>> + Send;
}
