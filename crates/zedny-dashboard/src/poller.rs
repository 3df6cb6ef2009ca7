// SPDX-FileCopyrightText: 2026 Zedny Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cancellable background polling of the ticket feed.
//!
//! One task per dashboard view polls immediately, then once per interval.
//! Ticks are handled sequentially and missed ticks are skipped, so polls
//! never overlap or pile up behind a slow backend.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::reconciler::{ReconcileOutcome, TicketFeedReconciler};

/// Owns a running poller. Dropping the handle stops it.
pub struct PollerHandle {
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    /// Requests the poller to stop after its current tick.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Stops the poller and waits for its task to exit.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take()
            && let Err(e) = task.await
        {
            debug!(error = %e, "ticket poller task ended abnormally");
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Spawns the poller for `reconciler`.
///
/// The poller stops when `parent` is cancelled or when the returned handle
/// is cancelled or dropped; stopping the handle leaves `parent` untouched.
pub fn spawn_poller(
    reconciler: Arc<TicketFeedReconciler>,
    interval: Duration,
    parent: &CancellationToken,
) -> PollerHandle {
    let cancel = parent.child_token();
    let task_cancel = cancel.clone();

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!(interval_ms = interval.as_millis() as u64, "ticket poller started");

        loop {
            tokio::select! {
                _ = task_cancel.cancelled() => break,
                _ = ticker.tick() => {
                    tokio::select! {
                        biased;
                        _ = task_cancel.cancelled() => break,
                        outcome = reconciler.poll_once() => match outcome {
                            ReconcileOutcome::Replaced { live } => {
                                debug!(live, "ticket poll replaced live set");
                            }
                            ReconcileOutcome::Retained { live } => {
                                debug!(live, "ticket poll retained live set");
                            }
                        },
                    }
                }
            }
        }

        info!("ticket poller shutting down");
    });

    PollerHandle {
        cancel,
        task: Some(task),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_tickets;
    use zedny_test_utils::mock_feed::{MockTicketFeed, issue};

    fn setup(feed: MockTicketFeed) -> (Arc<MockTicketFeed>, Arc<TicketFeedReconciler>) {
        let feed = Arc::new(feed);
        let reconciler = Arc::new(TicketFeedReconciler::new(feed.clone(), seed_tickets()));
        (feed, reconciler)
    }

    #[tokio::test(start_paused = true)]
    async fn polls_immediately_then_every_interval() {
        let (feed, reconciler) = setup(MockTicketFeed::with_polls(vec![vec![issue(
            1, "web", "low",
        )]]));
        let parent = CancellationToken::new();
        let mut view = reconciler.subscribe();

        let handle = spawn_poller(reconciler.clone(), Duration::from_secs(3), &parent);

        view.changed().await.unwrap();
        assert_eq!(feed.poll_count(), 1);
        assert_eq!(reconciler.view().live_count, 1);

        tokio::time::sleep(Duration::from_millis(6_100)).await;
        assert_eq!(feed.poll_count(), 3);
        // Later polls were empty, so the first live ticket is still held.
        assert_eq!(reconciler.view().live_count, 1);

        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_handle_stops_polling() {
        let (feed, reconciler) = setup(MockTicketFeed::new());
        let parent = CancellationToken::new();

        let handle = spawn_poller(reconciler, Duration::from_secs(3), &parent);
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(feed.poll_count(), 1);

        drop(handle);
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(feed.poll_count(), 1);
        assert!(!parent.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn parent_cancellation_stops_polling() {
        let (feed, reconciler) = setup(MockTicketFeed::new());
        let parent = CancellationToken::new();

        let handle = spawn_poller(reconciler, Duration::from_secs(3), &parent);
        tokio::time::sleep(Duration::from_millis(100)).await;

        parent.cancel();
        assert!(handle.is_cancelled());
        handle.shutdown().await;

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(feed.poll_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_fetch_never_overlaps_and_does_not_burst() {
        // The first fetch takes 3.5 intervals.
        let (feed, reconciler) =
            setup(MockTicketFeed::new().with_delays(vec![Duration::from_millis(3_500)]));
        let parent = CancellationToken::new();

        let handle = spawn_poller(reconciler, Duration::from_secs(1), &parent);

        tokio::time::sleep(Duration::from_millis(3_000)).await;
        assert_eq!(feed.poll_count(), 1, "ticks during a running fetch start no new poll");

        // One catch-up poll when the slow fetch lands, not one per missed tick.
        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(feed.poll_count(), 2);

        // Back on the interval grid afterwards.
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(feed.poll_count(), 3);
        tokio::time::sleep(Duration::from_millis(1_000)).await;
        assert_eq!(feed.poll_count(), 4);

        assert_eq!(feed.max_in_flight(), 1);
        handle.shutdown().await;
    }
}
