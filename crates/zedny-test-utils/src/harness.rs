// SPDX-FileCopyrightText: 2026 Zedny Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles a chat session and a ticket reconciler over
//! mock adapters, so tests drive the whole portal core without a backend.

use std::sync::Arc;

use zedny_chat::{ChatSession, TurnOutcome};
use zedny_config::model::ZednyConfig;
use zedny_core::types::{ConversationTurn, IssueRecord};
use zedny_dashboard::{DashboardView, ReconcileOutcome, TicketFeedReconciler};

use crate::mock_classifier::{MockClassifier, Outcome};
use crate::mock_feed::MockTicketFeed;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    outcomes: Vec<Outcome>,
    polls: Vec<Vec<IssueRecord>>,
    config: ZednyConfig,
    gated: bool,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            outcomes: Vec::new(),
            polls: Vec::new(),
            config: ZednyConfig::default(),
            gated: false,
        }
    }

    /// Set scripted classifier outcomes.
    pub fn with_outcomes(mut self, outcomes: Vec<Outcome>) -> Self {
        self.outcomes = outcomes;
        self
    }

    /// Set scripted ticket feed polls.
    pub fn with_polls(mut self, polls: Vec<Vec<IssueRecord>>) -> Self {
        self.polls = polls;
        self
    }

    /// Set the greeting seeded into the transcript (`None` for none).
    pub fn with_greeting(mut self, greeting: Option<&str>) -> Self {
        self.config.portal.greeting = greeting.map(str::to_string);
        self
    }

    /// Include or omit the seeded dashboard tickets.
    pub fn with_seed_tickets(mut self, enabled: bool) -> Self {
        self.config.dashboard.seed_tickets = enabled;
        self
    }

    /// Hold classifier calls until released.
    pub fn gated(mut self) -> Self {
        self.gated = true;
        self
    }

    /// Build the harness.
    pub fn build(self) -> TestHarness {
        let classifier = MockClassifier::with_outcomes(self.outcomes);
        let classifier = Arc::new(if self.gated {
            classifier.gated()
        } else {
            classifier
        });
        let feed = Arc::new(MockTicketFeed::with_polls(self.polls));

        let chat = ChatSession::from_config(&self.config.portal, classifier.clone());
        let reconciler = TicketFeedReconciler::from_config(feed.clone(), &self.config.dashboard);

        TestHarness {
            classifier,
            feed,
            chat,
            reconciler: Arc::new(reconciler),
        }
    }
}

/// A complete portal core wired to mock adapters.
pub struct TestHarness {
    pub classifier: Arc<MockClassifier>,
    pub feed: Arc<MockTicketFeed>,
    pub chat: ChatSession,
    pub reconciler: Arc<TicketFeedReconciler>,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Send a message through the chat session and wait for the reply.
    pub async fn send_message(&self, text: &str) -> TurnOutcome {
        self.chat.send(text).await
    }

    pub async fn transcript(&self) -> Vec<ConversationTurn> {
        self.chat.transcript().await
    }

    /// Run one ticket feed poll.
    pub async fn poll(&self) -> ReconcileOutcome {
        self.reconciler.poll_once().await
    }

    pub fn dashboard(&self) -> DashboardView {
        self.reconciler.view()
    }
}
