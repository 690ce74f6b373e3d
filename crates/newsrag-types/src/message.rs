//! Chat message types for Newsrag.
//!
//! A chat thread is not a stored entity: it exists the moment its first
//! message is appended and disappears when its last message is deleted.
//! Everything else here (`ChatSummary`, `HistoryTurn`) is derived at read
//! time from the message set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Author of a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A single persisted chat turn.
///
/// Messages are immutable once written: there is no update operation,
/// only append and delete. `(user_id, timestamp)` is the uniqueness key;
/// within a thread, ascending timestamp order equals append order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub user_id: String,
    pub chat_id: String,
    /// Assigned by the store writer at append time, never by the caller.
    pub timestamp: DateTime<Utc>,
    pub role: MessageRole,
    pub content: String,
    /// Citation URLs; empty for user-authored turns.
    pub sources: Vec<String>,
}

impl Message {
    /// The uniqueness/deletion key of this message.
    pub fn key(&self) -> MessageKey {
        MessageKey {
            user_id: self.user_id.clone(),
            timestamp: self.timestamp,
        }
    }
}

/// A message before the store has assigned its timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageDraft {
    pub user_id: String,
    pub chat_id: String,
    pub role: MessageRole,
    pub content: String,
    pub sources: Vec<String>,
}

impl MessageDraft {
    /// Draft a user turn. User turns never carry sources.
    pub fn user(user_id: impl Into<String>, chat_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            chat_id: chat_id.into(),
            role: MessageRole::User,
            content: content.into(),
            sources: Vec::new(),
        }
    }

    /// Draft an assistant turn with its retrieval citations.
    pub fn assistant(
        user_id: impl Into<String>,
        chat_id: impl Into<String>,
        content: impl Into<String>,
        sources: Vec<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            chat_id: chat_id.into(),
            role: MessageRole::Assistant,
            content: content.into(),
            sources,
        }
    }

    /// Finalize the draft with the store-assigned timestamp.
    pub fn into_message(self, timestamp: DateTime<Utc>) -> Message {
        Message {
            user_id: self.user_id,
            chat_id: self.chat_id,
            timestamp,
            role: self.role,
            content: self.content,
            sources: self.sources,
        }
    }
}

/// Uniqueness key of a persisted message, also the unit of deletion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageKey {
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
}

/// One chat thread of a user, with its most recent activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSummary {
    pub chat_id: String,
    pub last_used: DateTime<Utc>,
}

/// One element of the bounded context window handed to the retrieval
/// collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryTurn {
    pub role: MessageRole,
    pub content: String,
}

impl From<&Message> for HistoryTurn {
    fn from(msg: &Message) -> Self {
        Self {
            role: msg.role,
            content: msg.content.clone(),
        }
    }
}

/// The result of a completed ask: the generated answer and its citations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub answer: String,
    pub sources: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_role_roundtrip() {
        for role in [MessageRole::User, MessageRole::Assistant] {
            let s = role.to_string();
            let parsed: MessageRole = s.parse().unwrap();
            assert_eq!(role, parsed);
        }
    }

    #[test]
    fn test_message_role_serde() {
        let json = serde_json::to_string(&MessageRole::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
        let parsed: MessageRole = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, MessageRole::Assistant);
    }

    #[test]
    fn test_message_role_parse_invalid() {
        assert!("system".parse::<MessageRole>().is_err());
    }

    #[test]
    fn test_user_draft_has_no_sources() {
        let draft = MessageDraft::user("u1", "c1", "What happened today?");
        assert_eq!(draft.role, MessageRole::User);
        assert!(draft.sources.is_empty());
    }

    #[test]
    fn test_draft_into_message() {
        let ts = Utc::now();
        let msg = MessageDraft::assistant("u1", "c1", "X", vec!["s1".to_string()])
            .into_message(ts);
        assert_eq!(msg.timestamp, ts);
        assert_eq!(msg.role, MessageRole::Assistant);
        assert_eq!(msg.sources, vec!["s1".to_string()]);
        assert_eq!(msg.key().user_id, "u1");
        assert_eq!(msg.key().timestamp, ts);
    }

    #[test]
    fn test_history_turn_from_message() {
        let msg = MessageDraft::user("u1", "c1", "hello").into_message(Utc::now());
        let turn = HistoryTurn::from(&msg);
        assert_eq!(turn.role, MessageRole::User);
        assert_eq!(turn.content, "hello");
    }
}
