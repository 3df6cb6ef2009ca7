// SPDX-FileCopyrightText: 2026 Zedny Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Merges the polled live ticket feed with the seeded tickets.
//!
//! Each pass replaces the live set wholesale unless the poll came back
//! empty, in which case the previous live set is kept. The merged list is
//! `reverse(live) ++ seed` with duplicate ids dropped (first one wins), and
//! the counters are recomputed from it on every pass.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{Mutex, watch};
use tracing::debug;

use zedny_config::model::DashboardConfig;
use zedny_core::traits::TicketFeedAdapter;
use zedny_core::types::{IssueRecord, Priority, Ticket, TicketStatus, User, UserRole};

use crate::mapping::ticket_from_record;
use crate::seed::seed_tickets;

/// Aggregate counters derived from the merged list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    /// Every ticket in the merged list.
    pub pending: usize,
    /// High-priority tickets.
    pub urgent: usize,
    /// Tickets in progress.
    pub active: usize,
    pub completed: usize,
}

impl DashboardStats {
    pub fn from_tickets(tickets: &[Ticket]) -> Self {
        let count = |pred: fn(&Ticket) -> bool| tickets.iter().filter(|t| pred(t)).count();
        Self {
            pending: tickets.len(),
            urgent: count(|t| t.priority == Priority::High),
            active: count(|t| t.status == TicketStatus::InProgress),
            completed: count(|t| t.status == TicketStatus::Completed),
        }
    }
}

/// Render-ready dashboard state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardView {
    pub tickets: Vec<Ticket>,
    pub stats: DashboardStats,
    /// Live tickets currently held (before de-duplication).
    pub live_count: usize,
    /// Number of reconciliation passes that produced this view.
    pub generation: u64,
}

impl DashboardView {
    /// Builds the merged view: newest live tickets first, then seeds.
    pub fn merge(live: &[Ticket], seed: &[Ticket], generation: u64) -> Self {
        let mut seen = HashSet::new();
        let tickets: Vec<Ticket> = live
            .iter()
            .rev()
            .chain(seed.iter())
            .filter(|t| seen.insert(t.id.clone()))
            .cloned()
            .collect();
        let stats = DashboardStats::from_tickets(&tickets);
        Self {
            tickets,
            stats,
            live_count: live.len(),
            generation,
        }
    }

    /// Tickets the given user should see.
    ///
    /// Employees scoped to a department see only that department; everyone
    /// else sees the full list. Counters are not narrowed.
    pub fn visible_to(&self, user: &User) -> Vec<&Ticket> {
        match (user.role, user.department) {
            (UserRole::Employee, Some(department)) => self
                .tickets
                .iter()
                .filter(|t| t.department == department)
                .collect(),
            _ => self.tickets.iter().collect(),
        }
    }
}

/// Result of one reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The live set was replaced with this many tickets.
    Replaced { live: usize },
    /// The poll was empty; the previous live set was kept.
    Retained { live: usize },
}

/// Keeps the merged ticket view fresh.
pub struct TicketFeedReconciler {
    feed: Arc<dyn TicketFeedAdapter>,
    seed: Vec<Ticket>,
    /// Locked for a whole poll so passes never overlap.
    live: Mutex<LiveSet>,
    view: watch::Sender<DashboardView>,
}

#[derive(Default)]
struct LiveSet {
    tickets: Vec<Ticket>,
    generation: u64,
}

impl TicketFeedReconciler {
    pub fn new(feed: Arc<dyn TicketFeedAdapter>, seed: Vec<Ticket>) -> Self {
        let (view, _) = watch::channel(DashboardView::merge(&[], &seed, 0));
        Self {
            feed,
            seed,
            live: Mutex::new(LiveSet::default()),
            view,
        }
    }

    /// Creates a reconciler, seeding it unless `[dashboard] seed_tickets` is off.
    pub fn from_config(feed: Arc<dyn TicketFeedAdapter>, config: &DashboardConfig) -> Self {
        let seed = if config.seed_tickets {
            seed_tickets()
        } else {
            Vec::new()
        };
        Self::new(feed, seed)
    }

    /// Polls the feed once and reconciles the result.
    pub async fn poll_once(&self) -> ReconcileOutcome {
        let mut live = self.live.lock().await;
        let records = self.feed.list_tickets().await;
        self.reconcile(&mut live, &records)
    }

    /// Reconciles an already fetched batch of records.
    pub async fn apply(&self, records: &[IssueRecord]) -> ReconcileOutcome {
        let mut live = self.live.lock().await;
        self.reconcile(&mut live, records)
    }

    fn reconcile(&self, live: &mut LiveSet, records: &[IssueRecord]) -> ReconcileOutcome {
        let outcome = if records.is_empty() {
            debug!(live = live.tickets.len(), "empty ticket poll, keeping live set");
            ReconcileOutcome::Retained {
                live: live.tickets.len(),
            }
        } else {
            live.tickets = records.iter().map(ticket_from_record).collect();
            ReconcileOutcome::Replaced {
                live: live.tickets.len(),
            }
        };

        live.generation += 1;
        let view = DashboardView::merge(&live.tickets, &self.seed, live.generation);
        debug!(
            generation = view.generation,
            merged = view.tickets.len(),
            urgent = view.stats.urgent,
            "ticket view reconciled"
        );
        self.view.send_replace(view);
        outcome
    }

    /// Current merged view.
    pub fn view(&self) -> DashboardView {
        self.view.borrow().clone()
    }

    /// Receiver notified after every reconciliation pass.
    pub fn subscribe(&self) -> watch::Receiver<DashboardView> {
        self.view.subscribe()
    }

    pub fn merged_tickets(&self) -> Vec<Ticket> {
        self.view.borrow().tickets.clone()
    }

    pub fn stats(&self) -> DashboardStats {
        self.view.borrow().stats
    }

    pub fn seed(&self) -> &[Ticket] {
        &self.seed
    }
}
