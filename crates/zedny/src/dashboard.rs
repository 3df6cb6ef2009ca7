// SPDX-FileCopyrightText: 2026 Zedny Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `zedny dashboard` command implementation.
//!
//! Polls the ticket feed and reprints the merged view after every pass
//! until Ctrl+C, or prints a single pass with `--once`.

use colored::Colorize;
use tracing::info;

use zedny_core::ZednyError;
use zedny_core::types::{Priority, Ticket, TicketStatus, User};
use zedny_dashboard::DashboardView;

use crate::session::PortalSession;
use crate::users::welcome_lines;

/// Runs the `zedny dashboard` command.
pub async fn run_dashboard(portal: &PortalSession, once: bool, json: bool) -> Result<(), ZednyError> {
    let reconciler = portal.reconciler();

    if once {
        reconciler.poll_once().await;
        emit(&reconciler.view(), portal.user(), json)?;
        return Ok(());
    }

    let mut updates = reconciler.subscribe();
    let poller = portal.start_poller(reconciler.clone());
    info!(
        interval_secs = portal.config().dashboard.poll_interval_secs,
        "dashboard view opened"
    );

    loop {
        tokio::select! {
            _ = portal.cancel_token().cancelled() => break,
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = updates.borrow_and_update().clone();
                emit(&view, portal.user(), json)?;
            }
        }
    }

    poller.shutdown().await;
    info!("dashboard view closed");
    Ok(())
}

fn emit(view: &DashboardView, user: &User, json: bool) -> Result<(), ZednyError> {
    if json {
        let rendered = serde_json::to_string(view)
            .map_err(|e| ZednyError::Internal(format!("failed to serialize dashboard: {e}")))?;
        println!("{rendered}");
    } else {
        render(view, user);
    }
    Ok(())
}

fn render(view: &DashboardView, user: &User) {
    let (title, subtitle) = welcome_lines(user);
    println!("{}", title.bold());
    println!("{}", subtitle.dimmed());
    println!(
        "{} {}   {} {}   {} {}   {} {}",
        "Pending Requests:".dimmed(),
        view.stats.pending,
        "Active Projects:".dimmed(),
        view.stats.active,
        "Completed:".dimmed(),
        view.stats.completed,
        "Urgent Actions:".dimmed(),
        view.stats.urgent.to_string().red(),
    );
    println!();

    let visible = view.visible_to(user);
    if visible.is_empty() {
        println!("{}", "No reports yet.".dimmed());
    }
    for ticket in visible {
        println!("{}", ticket_line(ticket));
    }
    println!();
}

fn ticket_line(ticket: &Ticket) -> String {
    let priority = match ticket.priority {
        Priority::High => "HIGH".red().bold(),
        Priority::Medium => "MEDIUM".yellow(),
        Priority::Low => "LOW".green(),
    };
    let status = match ticket.status {
        TicketStatus::New => ticket.status.to_string().cyan(),
        TicketStatus::InProgress => ticket.status.to_string().yellow(),
        TicketStatus::Completed => ticket.status.to_string().green(),
    };
    let who = ticket
        .client
        .as_deref()
        .or(ticket.assignee.as_deref())
        .unwrap_or_default();
    let tags = if ticket.tags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", ticket.tags.join(", "))
    };

    format!(
        "{:<6} #{:<4} {} ({}, {}) {} {}{}",
        priority,
        ticket.id,
        ticket.summary,
        ticket.department.to_string().to_uppercase(),
        status,
        who.dimmed(),
        ticket.created_at.to_string().dimmed(),
        tags.dimmed(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use zedny_dashboard::seed_tickets;

    #[test]
    fn ticket_line_names_client_and_department() {
        colored::control::set_override(false);
        let line = ticket_line(&seed_tickets()[0]);
        assert!(line.contains("#r1"), "got: {line}");
        assert!(line.contains("(AI, new)"), "got: {line}");
        assert!(line.contains("TechCorp Industries"), "got: {line}");
        assert!(line.contains("2 mins ago"), "got: {line}");
    }
}
