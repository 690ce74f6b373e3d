//! In-memory [`SessionStore`] used by unit tests in this crate.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};

use newsrag_types::error::StoreError;
use newsrag_types::message::{Message, MessageDraft, MessageKey};

use crate::store::{DeleteReport, SessionStore};

#[derive(Default)]
struct Inner {
    messages: Vec<Message>,
    last_issued: Option<DateTime<Utc>>,
    /// Keys whose delete call is forced to fail.
    fail_deletes: HashSet<MessageKey>,
}

/// Append-only in-memory message log with the same timestamp-assignment
/// contract as the SQLite store: write-time timestamps, monotonic per
/// store instance.
#[derive(Clone, Default)]
pub(crate) struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append without going through the trait, for test seeding.
    pub(crate) async fn push(&self, draft: MessageDraft) -> Message {
        self.append(draft).await.unwrap()
    }

    /// Arrange for `delete_many` to fail on the given key.
    pub(crate) async fn fail_delete_of(&self, key: MessageKey) {
        self.inner.lock().unwrap().fail_deletes.insert(key);
    }

    /// Current contents of one thread, ascending.
    pub(crate) async fn messages_of(&self, user_id: &str, chat_id: &str) -> Vec<Message> {
        self.query_by_chat(user_id, chat_id).await.unwrap()
    }

    fn next_timestamp(inner: &mut Inner) -> DateTime<Utc> {
        let now = Utc::now();
        let candidate = match inner.last_issued {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        inner.last_issued = Some(candidate);
        candidate
    }
}

impl SessionStore for MemoryStore {
    async fn append(&self, draft: MessageDraft) -> Result<Message, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let timestamp = Self::next_timestamp(&mut inner);
        let msg = draft.into_message(timestamp);
        inner.messages.push(msg.clone());
        Ok(msg)
    }

    async fn query_by_user(&self, user_id: &str) -> Result<Vec<Message>, StoreError> {
        let inner = self.inner.lock().unwrap();
        let mut result: Vec<Message> = inner
            .messages
            .iter()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect();
        result.sort_by_key(|m| m.timestamp);
        Ok(result)
    }

    async fn query_by_chat(&self, user_id: &str, chat_id: &str) -> Result<Vec<Message>, StoreError> {
        let all = self.query_by_user(user_id).await?;
        Ok(all.into_iter().filter(|m| m.chat_id == chat_id).collect())
    }

    async fn query_recent(
        &self,
        user_id: &str,
        chat_id: &str,
        limit: u32,
    ) -> Result<Vec<Message>, StoreError> {
        let mut thread = self.query_by_chat(user_id, chat_id).await?;
        thread.reverse();
        thread.truncate(limit as usize);
        Ok(thread)
    }

    async fn delete_many(&self, keys: &[MessageKey]) -> Result<DeleteReport, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let mut report = DeleteReport::default();
        for key in keys {
            if inner.fail_deletes.contains(key) {
                report.failed.push(key.clone());
                continue;
            }
            let before = inner.messages.len();
            inner
                .messages
                .retain(|m| !(m.user_id == key.user_id && m.timestamp == key.timestamp));
            // Only rows actually removed count as deleted.
            report.deleted += before - inner.messages.len();
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_timestamps_strictly_ascending() {
        let store = MemoryStore::new();
        let mut previous = None;
        for i in 0..20 {
            let msg = store.push(MessageDraft::user("u1", "c1", format!("m{i}"))).await;
            if let Some(prev) = previous {
                assert!(msg.timestamp > prev, "timestamps must never collide");
            }
            previous = Some(msg.timestamp);
        }
    }

    #[tokio::test]
    async fn test_append_order_equals_query_order() {
        let store = MemoryStore::new();
        for i in 0..5 {
            store.push(MessageDraft::user("u1", "c1", format!("m{i}"))).await;
        }
        let thread = store.query_by_chat("u1", "c1").await.unwrap();
        let contents: Vec<&str> = thread.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["m0", "m1", "m2", "m3", "m4"]);
    }
}
