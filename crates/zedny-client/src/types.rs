// SPDX-FileCopyrightText: 2026 Zedny Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the backend's chat endpoint.
//!
//! These mirror the JSON exactly; conversion into validated domain types
//! happens in the crate root.

use serde::{Deserialize, Serialize};

/// Body of `POST {base}/chat`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
    pub session_id: &'a str,
    /// The backend's request model names the caller `user_id`.
    pub user_id: &'a str,
}

/// Classification decision as spelled on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireAction {
    Reply,
    Escalate,
}

/// Body of a successful chat response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponseBody {
    pub action: WireAction,
    pub text: String,
    #[serde(default)]
    pub report: Option<ReportBody>,
}

/// Escalation report as sent by the backend. Enumerations are still raw strings.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportBody {
    pub department: String,
    pub priority: String,
    pub summary: String,
    #[serde(default)]
    pub extracted_info: Option<serde_json::Value>,
}
