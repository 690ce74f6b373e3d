//! SQLite session store implementation.
//!
//! Implements `SessionStore` from `newsrag-core` using sqlx with split
//! read/write pools: raw queries, a private Row struct, and RFC-3339 text
//! timestamps whose lexicographic order equals chronological order.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, DurationRound, SecondsFormat, Utc};
use sqlx::Row;
use tracing::warn;

use newsrag_core::store::{DeleteReport, SessionStore};
use newsrag_types::error::StoreError;
use newsrag_types::message::{Message, MessageDraft, MessageKey, MessageRole};

use super::pool::DatabasePool;

/// SQLite-backed implementation of `SessionStore`.
///
/// Timestamps are assigned here, at append time, from a mutex-guarded
/// monotonic clock: each append takes `max(now, last + 1µs)` so two
/// same-instant appends through this store never collide on the
/// `(user_id, timestamp)` primary key. A residual collision from another
/// writer process trips the key constraint and fails loudly.
#[derive(Clone)]
pub struct SqliteSessionStore {
    pool: DatabasePool,
    last_issued: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl SqliteSessionStore {
    /// Create a new store backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            pool,
            last_issued: Arc::new(Mutex::new(None)),
        }
    }

    fn next_timestamp(&self) -> DateTime<Utc> {
        let now = Utc::now();
        // Truncate to the stored precision first, otherwise two instants
        // distinct in nanoseconds could serialize identically.
        let now = now
            .duration_trunc(Duration::microseconds(1))
            .unwrap_or(now);

        let mut last = self
            .last_issued
            .lock()
            .expect("timestamp clock poisoned");
        let candidate = match *last {
            Some(prev) if now <= prev => prev + Duration::microseconds(1),
            _ => now,
        };
        *last = Some(candidate);
        candidate
    }
}

// ---------------------------------------------------------------------------
// Private Row type for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

struct MessageRow {
    user_id: String,
    chat_id: String,
    timestamp: String,
    role: String,
    content: String,
    sources: String,
}

impl MessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            user_id: row.try_get("user_id")?,
            chat_id: row.try_get("chat_id")?,
            timestamp: row.try_get("timestamp")?,
            role: row.try_get("role")?,
            content: row.try_get("content")?,
            sources: row.try_get("sources")?,
        })
    }

    fn into_message(self) -> Result<Message, StoreError> {
        let timestamp = parse_datetime(&self.timestamp)?;
        let role: MessageRole = self
            .role
            .parse()
            .map_err(|e: String| StoreError::Query(e))?;
        let sources: Vec<String> = serde_json::from_str(&self.sources)
            .map_err(|e| StoreError::Query(format!("invalid sources JSON: {e}")))?;

        Ok(Message {
            user_id: self.user_id,
            chat_id: self.chat_id,
            timestamp,
            role,
            content: self.content,
            sources,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Pool exhaustion and socket-level failures are connection problems;
/// everything else surfaces as a query error with the driver message.
fn map_sqlx_error(e: sqlx::Error) -> StoreError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            StoreError::Connection
        }
        other => StoreError::Query(other.to_string()),
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Query(format!("invalid datetime: {e}")))
}

/// Fixed-width RFC-3339 with microseconds, so text order is time order.
fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn rows_into_messages(rows: Vec<sqlx::sqlite::SqliteRow>) -> Result<Vec<Message>, StoreError> {
    let mut messages = Vec::with_capacity(rows.len());
    for row in &rows {
        let msg_row = MessageRow::from_row(row).map_err(|e| StoreError::Query(e.to_string()))?;
        messages.push(msg_row.into_message()?);
    }
    Ok(messages)
}

// ---------------------------------------------------------------------------
// SessionStore implementation
// ---------------------------------------------------------------------------

impl SessionStore for SqliteSessionStore {
    async fn append(&self, draft: MessageDraft) -> Result<Message, StoreError> {
        let timestamp = self.next_timestamp();
        let msg = draft.into_message(timestamp);

        let sources_json = serde_json::to_string(&msg.sources)
            .map_err(|e| StoreError::Query(format!("serialize sources: {e}")))?;

        let result = sqlx::query(
            r#"INSERT INTO chat_messages (user_id, chat_id, timestamp, role, content, sources)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&msg.user_id)
        .bind(&msg.chat_id)
        .bind(format_datetime(&msg.timestamp))
        .bind(msg.role.to_string())
        .bind(&msg.content)
        .bind(&sources_json)
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(_) => Ok(msg),
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("UNIQUE") => {
                Err(StoreError::DuplicateKey(format!(
                    "{} @ {}",
                    msg.user_id,
                    format_datetime(&msg.timestamp)
                )))
            }
            Err(e) => Err(map_sqlx_error(e)),
        }
    }

    async fn query_by_user(&self, user_id: &str) -> Result<Vec<Message>, StoreError> {
        let rows = sqlx::query(
            "SELECT * FROM chat_messages WHERE user_id = ? ORDER BY timestamp ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(map_sqlx_error)?;

        rows_into_messages(rows)
    }

    async fn query_by_chat(&self, user_id: &str, chat_id: &str) -> Result<Vec<Message>, StoreError> {
        let rows = sqlx::query(
            r#"SELECT * FROM chat_messages
               WHERE user_id = ? AND chat_id = ?
               ORDER BY timestamp ASC"#,
        )
        .bind(user_id)
        .bind(chat_id)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(map_sqlx_error)?;

        rows_into_messages(rows)
    }

    async fn query_recent(
        &self,
        user_id: &str,
        chat_id: &str,
        limit: u32,
    ) -> Result<Vec<Message>, StoreError> {
        let rows = sqlx::query(
            r#"SELECT * FROM chat_messages
               WHERE user_id = ? AND chat_id = ?
               ORDER BY timestamp DESC
               LIMIT ?"#,
        )
        .bind(user_id)
        .bind(chat_id)
        .bind(limit as i64)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(map_sqlx_error)?;

        rows_into_messages(rows)
    }

    async fn delete_many(&self, keys: &[MessageKey]) -> Result<DeleteReport, StoreError> {
        let mut report = DeleteReport::default();

        // One DELETE per key. No transaction: the contract is per-key
        // outcomes, not all-or-nothing.
        for key in keys {
            let result = sqlx::query(
                "DELETE FROM chat_messages WHERE user_id = ? AND timestamp = ?",
            )
            .bind(&key.user_id)
            .bind(format_datetime(&key.timestamp))
            .execute(&self.pool.writer)
            .await;

            match result {
                // A key that matched no row is not a deletion.
                Ok(res) => report.deleted += res.rows_affected() as usize,
                Err(e) => {
                    warn!(user_id = %key.user_id, error = %e, "Delete failed for key");
                    report.failed.push(key.clone());
                }
            }
        }

        Ok(report)
    }
}
