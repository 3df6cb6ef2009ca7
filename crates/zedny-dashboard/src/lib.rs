// SPDX-FileCopyrightText: 2026 Zedny Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Staff dashboard state for the Zedny client portal.
//!
//! Polls the backend ticket feed, maps records into typed tickets, and
//! keeps a merged, de-duplicated view with derived counters.

pub mod mapping;
pub mod poller;
pub mod reconciler;
pub mod seed;

pub use mapping::{parse_created_at, ticket_from_record};
pub use poller::{PollerHandle, spawn_poller};
pub use reconciler::{DashboardStats, DashboardView, ReconcileOutcome, TicketFeedReconciler};
pub use seed::seed_tickets;
