//! Newsrag CLI entry point.
//!
//! Binary name: `nrag`
//!
//! Parses CLI arguments, initializes the database and services, then
//! dispatches to the appropriate command handler.

mod cli;
mod commands;
mod state;

use clap::Parser;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let _tracing = newsrag_observe::tracing_setup::init_tracing(cli.otel)?;

    let state = AppState::init().await?;

    match cli.command {
        Commands::Ask {
            user,
            chat,
            question,
            sources,
        } => {
            commands::ask(&state, &user, &chat, &question, sources, cli.json).await?;
        }

        Commands::History { user, chat } => {
            commands::history(&state, &user, &chat, cli.json).await?;
        }

        Commands::Recent { user, chat, limit } => {
            commands::recent(&state, &user, &chat, limit, cli.json).await?;
        }

        Commands::Chats { user } => {
            commands::chats(&state, &user, cli.json).await?;
        }

        Commands::DeleteChat { user, chat } => {
            commands::delete_chat(&state, &user, &chat, cli.json).await?;
        }

        Commands::DeleteAll { user } => {
            commands::delete_all(&state, &user, cli.json).await?;
        }
    }

    Ok(())
}
