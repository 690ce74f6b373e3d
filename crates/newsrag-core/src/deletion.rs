//! Bulk removal of chat messages: one thread, or a user's entire history.

use tracing::{info, warn};

use newsrag_types::error::DeleteError;
use newsrag_types::message::{Message, MessageKey};

use crate::store::SessionStore;

/// Removes all messages of a chat thread, or of a user entirely.
///
/// Both operations are destructive and irreversible; there is no soft
/// delete. Deletion has no cross-key atomicity: when some keys fail,
/// the survivors are reported via [`DeleteError::Partial`] rather than
/// folded into a binary success/failure.
pub struct DeletionManager<S: SessionStore> {
    store: S,
}

impl<S: SessionStore> DeletionManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Delete every message of `(user_id, chat_id)`.
    ///
    /// Returns `Ok(false)` when the thread does not exist (zero matches),
    /// `Ok(true)` when every matched key was removed.
    pub async fn delete_chat(&self, user_id: &str, chat_id: &str) -> Result<bool, DeleteError> {
        let messages = self.store.query_by_chat(user_id, chat_id).await?;
        self.delete_messages(user_id, messages).await
    }

    /// Delete every message of `user_id`, across all threads.
    pub async fn delete_all_chats(&self, user_id: &str) -> Result<bool, DeleteError> {
        let messages = self.store.query_by_user(user_id).await?;
        self.delete_messages(user_id, messages).await
    }

    async fn delete_messages(
        &self,
        user_id: &str,
        messages: Vec<Message>,
    ) -> Result<bool, DeleteError> {
        if messages.is_empty() {
            return Ok(false);
        }

        let keys: Vec<MessageKey> = messages.iter().map(Message::key).collect();
        let report = self.store.delete_many(&keys).await?;

        if report.all_succeeded() {
            info!(user_id, deleted = report.deleted, "Messages deleted");
            Ok(true)
        } else {
            warn!(
                user_id,
                deleted = report.deleted,
                failed = report.failed.len(),
                "Partial delete"
            );
            Err(DeleteError::Partial {
                deleted: report.deleted,
                failed: report.failed,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::ChatLister;
    use crate::testing::MemoryStore;
    use newsrag_types::message::MessageDraft;

    #[tokio::test]
    async fn test_delete_chat_then_not_found() {
        let store = MemoryStore::new();
        store.push(MessageDraft::user("u1", "c1", "a")).await;
        store.push(MessageDraft::assistant("u1", "c1", "b", vec![])).await;
        store.push(MessageDraft::user("u1", "c2", "c")).await;

        let manager = DeletionManager::new(store.clone());
        assert!(manager.delete_chat("u1", "c1").await.unwrap());

        // Thread gone, other thread untouched.
        assert!(store.messages_of("u1", "c1").await.is_empty());
        assert_eq!(store.messages_of("u1", "c2").await.len(), 1);

        // Second delete of the same thread is a normal negative result.
        assert!(!manager.delete_chat("u1", "c1").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_all_chats_empties_listing() {
        let store = MemoryStore::new();
        store.push(MessageDraft::user("u1", "c1", "a")).await;
        store.push(MessageDraft::user("u1", "c2", "b")).await;
        store.push(MessageDraft::user("u2", "c1", "other user")).await;

        let manager = DeletionManager::new(store.clone());
        assert!(manager.delete_all_chats("u1").await.unwrap());

        let lister = ChatLister::new(store.clone());
        assert!(lister.list("u1").await.unwrap().is_empty());

        // Other users' partitions are untouched.
        assert_eq!(store.messages_of("u2", "c1").await.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_all_chats_not_found() {
        let store = MemoryStore::new();
        let manager = DeletionManager::new(store);
        assert!(!manager.delete_all_chats("nobody").await.unwrap());
    }

    #[tokio::test]
    async fn test_partial_failure_reports_survivors() {
        let store = MemoryStore::new();
        store.push(MessageDraft::user("u1", "c1", "a")).await;
        let stuck = store.push(MessageDraft::user("u1", "c1", "b")).await;
        store.push(MessageDraft::user("u1", "c1", "c")).await;
        store.fail_delete_of(stuck.key()).await;

        let manager = DeletionManager::new(store.clone());
        let err = manager.delete_chat("u1", "c1").await.unwrap_err();

        match err {
            DeleteError::Partial { deleted, failed } => {
                assert_eq!(deleted, 2);
                assert_eq!(failed, vec![stuck.key()]);
            }
            other => panic!("expected partial delete, got {other:?}"),
        }

        // The stuck message survives for a targeted retry.
        assert_eq!(store.messages_of("u1", "c1").await.len(), 1);
    }
}
