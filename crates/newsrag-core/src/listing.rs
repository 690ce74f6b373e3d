//! Chat listing: the distinct chat threads of a user, most recent first.

use std::collections::HashSet;

use newsrag_types::error::StoreError;
use newsrag_types::message::ChatSummary;

use crate::store::SessionStore;

/// Derives the chat-thread list of a user from the message log.
///
/// There is no persisted thread index; the list is computed by scanning
/// the user's messages and keeping the maximum timestamp per `chat_id`.
pub struct ChatLister<S: SessionStore> {
    store: S,
}

impl<S: SessionStore> ChatLister<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// One entry per distinct `chat_id`, sorted by `last_used` descending.
    ///
    /// Ties on `last_used` keep scan order (stable sort); the tie order is
    /// implementation-defined.
    pub async fn list(&self, user_id: &str) -> Result<Vec<ChatSummary>, StoreError> {
        let messages = self.store.query_by_user(user_id).await?;

        // Walking newest-to-oldest, the first sighting of a chat_id carries
        // its maximum timestamp.
        let mut seen = HashSet::new();
        let mut chats = Vec::new();
        for msg in messages.iter().rev() {
            if seen.insert(msg.chat_id.as_str()) {
                chats.push(ChatSummary {
                    chat_id: msg.chat_id.clone(),
                    last_used: msg.timestamp,
                });
            }
        }

        chats.sort_by(|a, b| b.last_used.cmp(&a.last_used));
        Ok(chats)
    }
}
