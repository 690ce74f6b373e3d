//! RetrievalClient trait definition and wire types.
//!
//! The answer-generation service is a black box consumed over a narrow
//! contract: one question plus a bounded history window in, one answer
//! plus citations out. The HTTP implementation lives in `newsrag-infra`.

use serde::{Deserialize, Serialize};

use newsrag_types::error::RetrievalError;
use newsrag_types::message::HistoryTurn;

/// Request payload for one collaborator call.
#[derive(Debug, Clone, Serialize)]
pub struct RetrievalRequest {
    pub question: String,
    pub num_sources: u32,
    pub chat_history: Vec<HistoryTurn>,
}

/// Response payload of a successful collaborator call.
#[derive(Debug, Clone, Deserialize)]
pub struct RetrievalResponse {
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<String>,
}

/// Client trait for the retrieval collaborator.
///
/// A non-success response, transport failure, or timeout is a hard failure
/// for the calling ask; the client never retries on its own.
pub trait RetrievalClient: Send + Sync {
    fn answer(
        &self,
        request: &RetrievalRequest,
    ) -> impl std::future::Future<Output = Result<RetrievalResponse, RetrievalError>> + Send;
}
