//! History windowing: the bounded recent-turn context for retrieval calls.

use newsrag_types::error::StoreError;
use newsrag_types::message::HistoryTurn;

use crate::store::SessionStore;

/// Default number of recent turns supplied as conversational context.
pub const DEFAULT_WINDOW: u32 = 4;

/// Fetch the `limit` newest turns of a thread, oldest first.
///
/// Both user and assistant turns count toward the window. A thread with
/// fewer than `limit` messages yields all of them; an empty thread yields
/// an empty window, not an error.
pub async fn recent_window<S: SessionStore>(
    store: &S,
    user_id: &str,
    chat_id: &str,
    limit: u32,
) -> Result<Vec<HistoryTurn>, StoreError> {
    if limit == 0 {
        return Ok(Vec::new());
    }

    let mut newest_first = store.query_recent(user_id, chat_id, limit).await?;
    newest_first.reverse();
    Ok(newest_first.iter().map(HistoryTurn::from).collect())
}

/// Derives bounded context windows from a [`SessionStore`].
pub struct HistoryWindower<S: SessionStore> {
    store: S,
}

impl<S: SessionStore> HistoryWindower<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// See [`recent_window`].
    pub async fn recent(
        &self,
        user_id: &str,
        chat_id: &str,
        limit: u32,
    ) -> Result<Vec<HistoryTurn>, StoreError> {
        recent_window(&self.store, user_id, chat_id, limit).await
    }
}
