// SPDX-FileCopyrightText: 2026 Zedny Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Placeholder tickets shown alongside the live feed.

use zedny_core::types::{CreatedAt, Department, Priority, Ticket, TicketOrigin, TicketStatus};

/// The locally seeded tickets, in display order.
pub fn seed_tickets() -> Vec<Ticket> {
    vec![
        seed(
            "r1",
            "TechCorp Industries",
            "Custom AI Model Training for Logistics",
            Department::Ai,
            Priority::High,
            TicketStatus::New,
            "2 mins ago",
        ),
        seed(
            "r2",
            "GreenLeaf Cafe",
            "E-commerce Website Overhaul",
            Department::Web,
            Priority::Medium,
            TicketStatus::InProgress,
            "1 hour ago",
        ),
        seed(
            "r3",
            "StartupX",
            "SEO & Content Strategy for Launch",
            Department::Content,
            Priority::Low,
            TicketStatus::New,
            "3 hours ago",
        ),
    ]
}

fn seed(
    id: &str,
    client: &str,
    summary: &str,
    department: Department,
    priority: Priority,
    status: TicketStatus,
    created_at: &str,
) -> Ticket {
    Ticket {
        id: id.to_string(),
        origin: TicketOrigin::Seed,
        summary: summary.to_string(),
        department,
        priority,
        status,
        created_at: CreatedAt::Label(created_at.to_string()),
        assignee: None,
        client: Some(client.to_string()),
        tags: Vec::new(),
    }
}
