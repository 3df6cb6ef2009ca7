// SPDX-FileCopyrightText: 2026 Zedny Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `zedny chat` command implementation.
//!
//! Interactive REPL over one [`ChatSession`]: colored transcript, an
//! escalation card under escalated replies, and readline history.

use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

use zedny_chat::{ChatSession, TurnOutcome};
use zedny_core::ZednyError;
use zedny_core::types::{ConversationTurn, HealthStatus, Sender, TurnBadge};

use crate::session::PortalSession;

/// Runs the `zedny chat` interactive REPL.
pub async fn run_chat(portal: &PortalSession) -> Result<(), ZednyError> {
    let chat = portal.chat();

    let mut rl = DefaultEditor::new()
        .map_err(|e| ZednyError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", portal.config().portal.name.bold().green());
    println!(
        "Type {} to exit, {} for ideas, {} to reprint the conversation.\n",
        "/quit".yellow(),
        "/suggest".yellow(),
        "/history".yellow()
    );

    match portal.check_backend().await {
        HealthStatus::Healthy => println!("{}", portal.backend_label().dimmed()),
        HealthStatus::Unhealthy(_) => println!(
            "{}",
            format!("{} is not responding", portal.backend_label()).yellow()
        ),
    }

    for turn in chat.transcript().await {
        print_turn(&turn);
    }
    print_suggestions(&chat).await;

    let prompt = format!("{}> ", "you".green());
    loop {
        if portal.cancel_token().is_cancelled() {
            break;
        }
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                match trimmed {
                    "/quit" | "/exit" => break,
                    "/suggest" => {
                        print_suggestions(&chat).await;
                        continue;
                    }
                    "/history" => {
                        for turn in chat.transcript().await {
                            print_turn(&turn);
                        }
                        continue;
                    }
                    "" => continue,
                    _ => {}
                }

                let _ = rl.add_history_entry(&line);
                chat.set_draft(line);
                send_and_render(&chat).await;
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    chat.close();
    println!("{}", "goodbye".dimmed());
    Ok(())
}

/// Submits the current draft and prints the assistant turn when it lands.
async fn send_and_render(chat: &ChatSession) {
    let Some(handle) = chat.send_draft().await else {
        debug!("draft not submitted");
        return;
    };

    if chat.is_composing() {
        println!("{}", "ZEdny AI is typing...".dimmed());
    }

    match handle.await {
        Ok(outcome) => {
            if let Some(turn) = outcome.assistant_turn() {
                print_turn(turn);
            } else if outcome == TurnOutcome::Discarded {
                debug!("reply discarded after teardown");
            }
        }
        Err(e) => eprintln!("{}: {e}", "error".red()),
    }
}

async fn print_suggestions(chat: &ChatSession) {
    let suggestions = chat.suggestions().await;
    if suggestions.is_empty() {
        return;
    }
    println!("{}", "Try asking:".dimmed());
    for suggestion in suggestions {
        println!("  {} {suggestion}", "-".dimmed());
    }
    println!();
}

fn print_turn(turn: &ConversationTurn) {
    let stamp = format!("[{}]", turn.timestamp).dimmed();
    match turn.sender {
        Sender::User => println!("{stamp} {} {}", "you:".green().bold(), turn.text),
        Sender::Assistant => println!("{stamp} {} {}", "ZEdny AI:".cyan().bold(), turn.text),
    }

    if let Some(card) = &turn.structured_data {
        println!("  {}", card.title.bold());
        for insight in &card.insights {
            println!("    {} {insight}", "*".yellow());
        }
        for step in &card.steps {
            println!("    {} {step}", "[x]".green());
        }
    }

    match turn.badge() {
        Some(TurnBadge::Escalated) => println!("  {}", "ESCALATED".red().bold()),
        Some(TurnBadge::AutoReply) => println!("  {}", "AUTO-REPLY".blue()),
        None => {}
    }
    println!();
}
