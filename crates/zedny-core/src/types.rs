// SPDX-FileCopyrightText: 2026 Zedny Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared by the chat surface, the dashboard, and the backend client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::warn;

use crate::error::ZednyError;

/// Assistant text appended when a classification call fails.
pub const CONNECTIVITY_FAILURE_TEXT: &str = "Sorry, I'm having trouble connecting to the server.";

/// Unique identifier for a conversation session, sent with every chat request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

/// Unique identifier for a conversation turn.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnId(pub String);

impl TurnId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        TurnId(uuid::Uuid::new_v4().to_string())
    }
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is not operational.
    Unhealthy(String),
}

// --- Conversation types ---

/// Author of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

/// Structured card attached to an assistant turn that resulted from an escalation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscalationCard {
    pub title: String,
    /// Priority, department, and truncated summary, in that order.
    pub insights: Vec<String>,
    /// Fixed next-action checklist.
    pub steps: Vec<String>,
}

/// Presentation badge derived for assistant turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TurnBadge {
    /// The utterance was routed to a department.
    Escalated,
    /// The assistant answered directly.
    AutoReply,
}

/// One message unit in a conversation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub id: TurnId,
    pub sender: Sender,
    pub text: String,
    /// Human-readable creation time (e.g. `10:00 AM`).
    pub timestamp: String,
    #[serde(rename = "structuredData", skip_serializing_if = "Option::is_none")]
    pub structured_data: Option<EscalationCard>,
    /// Set only on the apology turn appended when classification failed.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub failed: bool,
}

impl ConversationTurn {
    fn new(sender: Sender, text: String, structured_data: Option<EscalationCard>) -> Self {
        Self {
            id: TurnId::generate(),
            sender,
            text,
            timestamp: chrono::Local::now().format("%I:%M %p").to_string(),
            structured_data,
            failed: false,
        }
    }

    /// A turn authored by the user.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text.into(), None)
    }

    /// A plain assistant turn without a card.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Sender::Assistant, text.into(), None)
    }

    /// An assistant turn carrying an escalation card.
    pub fn escalation(text: impl Into<String>, card: EscalationCard) -> Self {
        Self::new(Sender::Assistant, text.into(), Some(card))
    }

    /// The fixed apology appended when the classifier could not be reached.
    pub fn connectivity_failure() -> Self {
        Self {
            failed: true,
            ..Self::new(Sender::Assistant, CONNECTIVITY_FAILURE_TEXT.to_string(), None)
        }
    }

    /// Badge shown under assistant turns. User turns and the
    /// connectivity-failure turn carry none.
    pub fn badge(&self) -> Option<TurnBadge> {
        if self.sender != Sender::Assistant || self.failed {
            return None;
        }
        if self.structured_data.is_some() {
            Some(TurnBadge::Escalated)
        } else {
            Some(TurnBadge::AutoReply)
        }
    }
}

// --- Ticket enumerations ---

/// Department a ticket is routed to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Department {
    Web,
    Ai,
    Content,
}

impl Department {
    /// Value used when the backend reports a department outside the fixed set.
    pub const FALLBACK: Department = Department::Web;

    /// Parses a backend value, rejecting anything outside the enumeration.
    pub fn parse_backend(raw: &str) -> Result<Self, ZednyError> {
        raw.trim().parse().map_err(|_| ZednyError::Validation {
            field: "department".into(),
            value: raw.to_string(),
        })
    }

    /// Parses a backend value, falling back to [`Department::FALLBACK`].
    pub fn coerce(raw: &str) -> Self {
        Self::parse_backend(raw).unwrap_or_else(|e| {
            warn!(error = %e, fallback = %Self::FALLBACK, "coercing department");
            Self::FALLBACK
        })
    }
}

/// Ticket urgency.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Priority {
    Low,
    Medium,
    #[strum(to_string = "high", serialize = "urgent", serialize = "critical")]
    High,
}

impl Priority {
    /// Value used when the backend reports a priority outside the fixed set.
    pub const FALLBACK: Priority = Priority::Medium;

    /// Parses a backend value, rejecting anything outside the enumeration.
    pub fn parse_backend(raw: &str) -> Result<Self, ZednyError> {
        raw.trim().parse().map_err(|_| ZednyError::Validation {
            field: "priority".into(),
            value: raw.to_string(),
        })
    }

    /// Parses a backend value, falling back to [`Priority::FALLBACK`].
    pub fn coerce(raw: &str) -> Self {
        Self::parse_backend(raw).unwrap_or_else(|e| {
            warn!(error = %e, fallback = %Self::FALLBACK, "coercing priority");
            Self::FALLBACK
        })
    }
}

/// Ticket workflow status.
///
/// Accepts both the dashboard vocabulary and the backend's
/// (`open`, `in_progress`, `resolved`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(ascii_case_insensitive)]
pub enum TicketStatus {
    #[strum(to_string = "new", serialize = "open")]
    New,
    #[strum(to_string = "in-progress", serialize = "in_progress")]
    InProgress,
    #[strum(
        to_string = "completed",
        serialize = "resolved",
        serialize = "closed",
        serialize = "done"
    )]
    Completed,
}

impl TicketStatus {
    /// Value used when the backend reports a status outside the fixed set.
    pub const FALLBACK: TicketStatus = TicketStatus::New;

    /// Parses a backend value, rejecting anything outside the enumeration.
    pub fn parse_backend(raw: &str) -> Result<Self, ZednyError> {
        raw.trim().parse().map_err(|_| ZednyError::Validation {
            field: "status".into(),
            value: raw.to_string(),
        })
    }

    /// Parses a backend value, falling back to [`TicketStatus::FALLBACK`].
    pub fn coerce(raw: &str) -> Self {
        Self::parse_backend(raw).unwrap_or_else(|e| {
            warn!(error = %e, fallback = %Self::FALLBACK, "coercing status");
            Self::FALLBACK
        })
    }
}

// --- Tickets ---

/// Where a ticket came from. Never sent to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum TicketOrigin {
    Live,
    Seed,
}

/// Creation time of a ticket: a parsed instant or a relative label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CreatedAt {
    At(DateTime<Utc>),
    Label(String),
}

impl std::fmt::Display for CreatedAt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CreatedAt::At(at) => write!(f, "{}", at.format("%Y-%m-%d %H:%M")),
            CreatedAt::Label(label) => f.write_str(label),
        }
    }
}

/// A dashboard-visible unit of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ticket {
    pub id: String,
    #[serde(skip)]
    pub origin: TicketOrigin,
    pub summary: String,
    pub department: Department,
    pub priority: Priority,
    pub status: TicketStatus,
    #[serde(rename = "createdAt")]
    pub created_at: CreatedAt,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// A ticket-shaped record as returned by the backend's issue list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IssueRecord {
    pub id: i64,
    pub description: String,
    pub department: String,
    pub priority: String,
    pub status: String,
    #[serde(default)]
    pub ai_summary: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<i64>,
    pub created_at: String,
}

// --- Classification ---

/// Escalation details returned alongside an `escalate` action.
#[derive(Debug, Clone, PartialEq)]
pub struct EscalationReport {
    pub department: Department,
    pub priority: Priority,
    pub summary: String,
    /// Backend-extracted details, kept opaque.
    pub extracted_info: Option<serde_json::Value>,
}

/// Outcome of classifying one user utterance.
///
/// The report exists only on the escalate branch, so it cannot be read
/// without matching on the action first.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassificationResponse {
    Reply { text: String },
    Escalate { text: String, report: EscalationReport },
}

impl ClassificationResponse {
    /// Assistant-facing message, present on both branches.
    pub fn text(&self) -> &str {
        match self {
            ClassificationResponse::Reply { text } => text,
            ClassificationResponse::Escalate { text, .. } => text,
        }
    }
}

// --- Identity ---

/// Role of the person using the portal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum UserRole {
    Client,
    Employee,
    Admin,
}

/// Externally supplied user descriptor. Read-only to this crate family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<Department>,
}

impl User {
    /// First word of the display name.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}
