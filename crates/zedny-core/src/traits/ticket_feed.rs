// SPDX-FileCopyrightText: 2026 Zedny Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ticket feed adapter trait for the backend's live issue list.

use async_trait::async_trait;

use crate::traits::adapter::PluginAdapter;
use crate::types::IssueRecord;

/// Adapter that lists the backend's current tickets.
///
/// Polling is best-effort: implementations degrade every failure to an
/// empty list instead of returning an error.
#[async_trait]
pub trait TicketFeedAdapter: PluginAdapter {
    /// Fetches the current ticket records in backend order.
    async fn list_tickets(&self) -> Vec<IssueRecord>;
}
