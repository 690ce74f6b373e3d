//! CLI argument definitions for `nrag`.

use clap::{Parser, Subcommand};

/// Retrieval-augmented chat over the news archive.
#[derive(Parser)]
#[command(name = "nrag", version, about)]
pub struct Cli {
    /// Emit machine-readable JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Export spans via OpenTelemetry (stdout exporter)
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ask a question within a chat thread
    Ask {
        /// User the thread belongs to
        user: String,
        /// Chat thread identifier
        chat: String,
        /// The question to ask
        question: String,
        /// How many citations to request (config default when omitted)
        #[arg(long)]
        sources: Option<u32>,
    },

    /// Print the full message history of a chat thread
    History {
        user: String,
        chat: String,
    },

    /// Print the recent-turn window used as retrieval context
    Recent {
        user: String,
        chat: String,
        /// Window size
        #[arg(long, default_value_t = newsrag_core::history::DEFAULT_WINDOW)]
        limit: u32,
    },

    /// List a user's chat threads, most recently active first
    Chats {
        user: String,
    },

    /// Delete one chat thread
    DeleteChat {
        user: String,
        chat: String,
    },

    /// Delete every chat thread of a user
    DeleteAll {
        user: String,
    },
}
