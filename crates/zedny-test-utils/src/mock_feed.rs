// SPDX-FileCopyrightText: 2026 Zedny Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock ticket feed adapter with scripted poll results.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use zedny_core::ZednyError;
use zedny_core::traits::{PluginAdapter, TicketFeedAdapter};
use zedny_core::types::{HealthStatus, IssueRecord};

/// A mock ticket feed that returns one scripted batch per poll.
///
/// Once the script runs out every poll returns an empty list, which is
/// exactly what a degraded backend looks like to the reconciler.
/// Per-poll delays make a fetch slower than the polling interval.
pub struct MockTicketFeed {
    polls: Arc<Mutex<VecDeque<Vec<IssueRecord>>>>,
    delays: Mutex<VecDeque<Duration>>,
    count: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockTicketFeed {
    /// Create a feed with no scripted polls.
    pub fn new() -> Self {
        Self::with_polls(Vec::new())
    }

    /// Create a feed pre-loaded with poll results, oldest first.
    pub fn with_polls(polls: Vec<Vec<IssueRecord>>) -> Self {
        Self {
            polls: Arc::new(Mutex::new(VecDeque::from(polls))),
            delays: Mutex::new(VecDeque::new()),
            count: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Delay the first polls by the given durations, in order. Later polls
    /// answer immediately.
    pub fn with_delays(mut self, delays: Vec<Duration>) -> Self {
        self.delays = Mutex::new(VecDeque::from(delays));
        self
    }

    /// Highest number of polls that were ever running at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Number of polls served so far.
    pub fn poll_count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl Default for MockTicketFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockTicketFeed {
    fn name(&self) -> &str {
        "mock-ticket-feed"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, ZednyError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), ZednyError> {
        Ok(())
    }
}

#[async_trait]
impl TicketFeedAdapter for MockTicketFeed {
    async fn list_tickets(&self) -> Vec<IssueRecord> {
        self.count.fetch_add(1, Ordering::SeqCst);
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(running, Ordering::SeqCst);

        let delay = self.delays.lock().await.pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let records = self.polls.lock().await.pop_front().unwrap_or_default();

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        records
    }
}

/// Builds a backend issue record with an open status and a fixed timestamp.
pub fn issue(id: i64, department: &str, priority: &str) -> IssueRecord {
    IssueRecord {
        id,
        description: format!("Issue {id}"),
        department: department.to_string(),
        priority: priority.to_string(),
        status: "open".to_string(),
        ai_summary: None,
        assigned_to: None,
        created_at: "2026-03-01T09:30:00.123456".to_string(),
    }
}
