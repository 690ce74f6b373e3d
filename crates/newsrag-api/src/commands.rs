//! Command handlers: thin rendering over the core services.

use anyhow::Result;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;

use newsrag_core::store::SessionStore;
use newsrag_types::error::DeleteError;

use crate::state::AppState;

/// Run one ask and print the answer with its citations.
pub async fn ask(
    state: &AppState,
    user: &str,
    chat: &str,
    question: &str,
    sources: Option<u32>,
    json: bool,
) -> Result<()> {
    let num_sources = sources.unwrap_or(state.config.retrieval.default_num_sources);
    let answer = state.query_service.ask(user, chat, question, num_sources).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&answer)?);
        return Ok(());
    }

    println!();
    println!("{}", answer.answer);
    if !answer.sources.is_empty() {
        println!();
        println!("  {}", style("Sources").bold());
        for source in &answer.sources {
            println!("  - {}", style(source).dim());
        }
    }
    println!();
    Ok(())
}

/// Print the full history of one thread, oldest first.
pub async fn history(state: &AppState, user: &str, chat: &str, json: bool) -> Result<()> {
    let messages = state.store.query_by_chat(user, chat).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&messages)?);
        return Ok(());
    }

    if messages.is_empty() {
        println!();
        println!(
            "  {} No messages in chat '{}' for user '{}'.",
            style("i").blue().bold(),
            style(chat).cyan(),
            style(user).cyan()
        );
        println!();
        return Ok(());
    }

    for msg in &messages {
        let when = msg.timestamp.format("%Y-%m-%d %H:%M:%S").to_string();
        println!(
            "{} {} {}",
            style(when).dim(),
            style(format!("[{}]", msg.role)).bold(),
            msg.content
        );
    }
    Ok(())
}

/// Print the bounded context window of a thread, oldest first.
pub async fn recent(
    state: &AppState,
    user: &str,
    chat: &str,
    limit: u32,
    json: bool,
) -> Result<()> {
    let window = state.windower.recent(user, chat, limit).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&window)?);
        return Ok(());
    }

    for turn in &window {
        println!("{} {}", style(format!("[{}]", turn.role)).bold(), turn.content);
    }
    Ok(())
}

/// List a user's threads with last-used recency.
pub async fn chats(state: &AppState, user: &str, json: bool) -> Result<()> {
    let chats = state.lister.list(user).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&chats)?);
        return Ok(());
    }

    if chats.is_empty() {
        println!();
        println!(
            "  {} No chats found for '{}'. Start one with: {}",
            style("i").blue().bold(),
            style(user).cyan(),
            style(format!("nrag ask {user} <chat> <question>")).yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Chat").fg(Color::White),
        Cell::new("Last used").fg(Color::White),
    ]);

    for chat in &chats {
        table.add_row(vec![
            Cell::new(&chat.chat_id).fg(Color::Cyan),
            Cell::new(chat.last_used.format("%Y-%m-%d %H:%M").to_string()).fg(Color::DarkGrey),
        ]);
    }

    println!("{table}");
    Ok(())
}

/// Delete one thread, reporting not-found and partial failures distinctly.
pub async fn delete_chat(state: &AppState, user: &str, chat: &str, json: bool) -> Result<()> {
    let outcome = state.deletion.delete_chat(user, chat).await;
    report_delete(outcome, &format!("chat '{chat}'"), json)
}

/// Delete every thread of a user.
pub async fn delete_all(state: &AppState, user: &str, json: bool) -> Result<()> {
    let outcome = state.deletion.delete_all_chats(user).await;
    report_delete(outcome, &format!("all chats of '{user}'"), json)
}

fn report_delete(outcome: Result<bool, DeleteError>, what: &str, json: bool) -> Result<()> {
    match outcome {
        Ok(found) => {
            if json {
                println!("{}", serde_json::json!({ "found": found }));
            } else if found {
                println!("{} Deleted {what}.", style("✓").green());
            } else {
                println!("{} Nothing to delete: {what} not found.", style("i").blue());
            }
            Ok(())
        }
        Err(DeleteError::Partial { deleted, failed }) => {
            // Surface the survivors so the caller can retry just those.
            eprintln!(
                "{} Partial delete of {what}: {deleted} removed, {} keys survived.",
                style("✗").red(),
                failed.len()
            );
            Err(DeleteError::Partial { deleted, failed }.into())
        }
        Err(err) => Err(err.into()),
    }
}
