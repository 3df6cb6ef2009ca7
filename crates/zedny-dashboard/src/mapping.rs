// SPDX-FileCopyrightText: 2026 Zedny Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Backend issue records to dashboard tickets.

use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::warn;

use zedny_core::types::{
    CreatedAt, Department, IssueRecord, Priority, Ticket, TicketOrigin, TicketStatus,
};

/// Assignee label for records without an `assigned_to`.
pub const UNASSIGNED: &str = "Unassigned";

/// Tag attached to every ticket that came from the backend.
pub const LIVE_TAG: &str = "API";

/// Naive timestamp layout the backend emits (no offset, UTC by convention).
const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Maps one backend record into a live ticket.
///
/// Out-of-enumeration department, priority, or status values are coerced
/// to their documented fallbacks; the ticket is never dropped.
pub fn ticket_from_record(record: &IssueRecord) -> Ticket {
    Ticket {
        id: record.id.to_string(),
        origin: TicketOrigin::Live,
        summary: summary_of(record),
        department: Department::coerce(&record.department),
        priority: Priority::coerce(&record.priority),
        status: TicketStatus::coerce(&record.status),
        created_at: parse_created_at(&record.created_at),
        assignee: Some(assignee_label(record.assigned_to)),
        client: None,
        tags: vec![LIVE_TAG.to_string()],
    }
}

/// The reporter's description, or the backend's AI summary when the
/// description is blank.
fn summary_of(record: &IssueRecord) -> String {
    match &record.ai_summary {
        Some(ai) if record.description.trim().is_empty() => ai.clone(),
        _ => record.description.clone(),
    }
}

fn assignee_label(assigned_to: Option<i64>) -> String {
    match assigned_to {
        Some(id) => format!("Employee #{id}"),
        None => UNASSIGNED.to_string(),
    }
}

/// Parses a backend timestamp. RFC 3339 first, then the naive layout read
/// as UTC; anything else is kept verbatim as a label.
pub fn parse_created_at(raw: &str) -> CreatedAt {
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return CreatedAt::At(at.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, NAIVE_FORMAT) {
        return CreatedAt::At(naive.and_utc());
    }
    warn!(created_at = raw, "unparseable ticket timestamp, keeping as label");
    CreatedAt::Label(raw.to_string())
}
