//! Ask orchestration: persist the question, gather context, call the
//! retrieval collaborator, persist the answer.

use tracing::{info, warn};

use newsrag_types::error::AskError;
use newsrag_types::message::{Answer, MessageDraft};

use crate::history::{recent_window, DEFAULT_WINDOW};
use crate::retrieval::{RetrievalClient, RetrievalRequest};
use crate::store::SessionStore;

/// Sequences persistence and retrieval into one conversational turn.
///
/// Within one call the steps are strictly sequential; across calls many
/// invocations may run concurrently against the same store and client.
pub struct QueryService<S: SessionStore, R: RetrievalClient> {
    store: S,
    retrieval: R,
}

impl<S: SessionStore, R: RetrievalClient> QueryService<S, R> {
    pub fn new(store: S, retrieval: R) -> Self {
        Self { store, retrieval }
    }

    /// Run one ask: validate, persist the user turn, window the recent
    /// history, call the collaborator, persist the assistant turn.
    ///
    /// When the collaborator call fails, the user turn written before it
    /// remains persisted -- an at-least-once side effect, not a rollback
    /// design. A caller retry after such a failure will therefore write a
    /// second user turn; there is no idempotency key.
    pub async fn ask(
        &self,
        user_id: &str,
        chat_id: &str,
        question: &str,
        num_sources: u32,
    ) -> Result<Answer, AskError> {
        if question.trim().is_empty() {
            return Err(AskError::Validation("question must not be empty".to_string()));
        }
        if chat_id.trim().is_empty() {
            return Err(AskError::Validation("chat_id must not be empty".to_string()));
        }

        self.store
            .append(MessageDraft::user(user_id, chat_id, question))
            .await?;

        let chat_history = recent_window(&self.store, user_id, chat_id, DEFAULT_WINDOW).await?;

        let request = RetrievalRequest {
            question: question.to_string(),
            num_sources,
            chat_history,
        };
        let response = match self.retrieval.answer(&request).await {
            Ok(response) => response,
            Err(err) => {
                // The user turn stays persisted; only the answer is missing.
                warn!(user_id, chat_id, %err, "Retrieval call failed");
                return Err(AskError::Upstream(err));
            }
        };

        self.store
            .append(MessageDraft::assistant(
                user_id,
                chat_id,
                &response.answer,
                response.sources.clone(),
            ))
            .await?;

        info!(user_id, chat_id, sources = response.sources.len(), "Ask completed");

        Ok(Answer {
            answer: response.answer,
            sources: response.sources,
        })
    }
}
