//! Application configuration, deserialized from `config.toml`.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the Newsrag service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub retrieval: RetrievalConfig,
}

/// Connection settings for the retrieval collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Endpoint the answer-generation service listens on.
    pub endpoint: String,
    /// Hard timeout for one collaborator call, in seconds.
    pub timeout_secs: u64,
    /// How many citations to request when the caller does not say.
    pub default_num_sources: u32,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080/query".to_string(),
            timeout_secs: 15,
            default_num_sources: 3,
        }
    }
}
