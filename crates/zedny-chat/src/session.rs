// SPDX-FileCopyrightText: 2026 Zedny Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Presentation-facing chat session.
//!
//! A [`ChatSession`] owns one transcript, its turn controller, and the
//! composer draft. Presentation reads the transcript, watches the composing
//! signal, and submits text; it never mutates turns.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use zedny_config::model::PortalConfig;
use zedny_core::traits::ClassifierAdapter;
use zedny_core::types::{ConversationTurn, SessionId};

use crate::controller::{TurnController, TurnOutcome};
use crate::store::ConversationStore;

/// Starter prompts offered on a fresh conversation.
pub const SUGGESTIONS: [&str; 4] = [
    "I need a website for my business",
    "Integrate AI into my app",
    "Content strategy for social media",
    "Fix bugs in my legacy code",
];

/// Suggestions disappear once the transcript holds this many turns.
const SUGGESTION_CUTOFF: usize = 3;

/// Chat surface state for one conversation.
pub struct ChatSession {
    controller: Arc<TurnController>,
    draft: watch::Sender<String>,
}

impl ChatSession {
    /// Creates a session with an empty transcript.
    pub fn new(session: SessionId, classifier: Arc<dyn ClassifierAdapter>) -> Self {
        Self::with_store(session, classifier, ConversationStore::new())
    }

    /// Creates a session whose transcript opens with an assistant greeting.
    pub fn with_greeting(
        session: SessionId,
        classifier: Arc<dyn ClassifierAdapter>,
        greeting: impl Into<String>,
    ) -> Self {
        let store = ConversationStore::with_turns(vec![ConversationTurn::assistant(greeting)]);
        Self::with_store(session, classifier, store)
    }

    /// Creates a session from the `[portal]` configuration section.
    pub fn from_config(config: &PortalConfig, classifier: Arc<dyn ClassifierAdapter>) -> Self {
        let session = SessionId(config.session_id.clone());
        match config.greeting.as_deref().map(str::trim) {
            Some(greeting) if !greeting.is_empty() => {
                Self::with_greeting(session, classifier, greeting)
            }
            _ => Self::new(session, classifier),
        }
    }

    fn with_store(
        session: SessionId,
        classifier: Arc<dyn ClassifierAdapter>,
        store: ConversationStore,
    ) -> Self {
        let controller = TurnController::new(session, Arc::new(store), classifier);
        let (draft, _) = watch::channel(String::new());
        Self {
            controller: Arc::new(controller),
            draft,
        }
    }

    pub fn session_id(&self) -> &SessionId {
        self.controller.session_id()
    }

    /// Snapshot of the transcript in display order.
    pub async fn transcript(&self) -> Vec<ConversationTurn> {
        self.controller.store().list().await
    }

    pub fn is_composing(&self) -> bool {
        self.controller.is_composing()
    }

    /// Receiver for the "assistant is composing" signal.
    pub fn composing(&self) -> watch::Receiver<bool> {
        self.controller.subscribe_composing()
    }

    /// Starter prompts, offered only while the conversation is young.
    pub async fn suggestions(&self) -> &'static [&'static str] {
        if self.controller.store().len().await < SUGGESTION_CUTOFF {
            &SUGGESTIONS
        } else {
            &[]
        }
    }

    /// Replaces the composer draft.
    pub fn set_draft(&self, text: impl Into<String>) {
        self.draft.send_replace(text.into());
    }

    pub fn draft(&self) -> String {
        self.draft.borrow().clone()
    }

    /// Submits the composer draft.
    ///
    /// The draft is cleared only when a turn actually starts; blank drafts and
    /// drafts submitted while the assistant is composing stay in place.
    pub async fn send_draft(&self) -> Option<JoinHandle<TurnOutcome>> {
        if self.is_composing() {
            debug!(session = %self.session_id().0, "draft held, assistant is composing");
            return None;
        }
        let text = self.draft();
        let handle = self.submit(&text).await?;
        self.draft.send_replace(String::new());
        Some(handle)
    }

    /// Submits text and returns once the user turn is in the transcript.
    ///
    /// Classification continues on a spawned task; the handle may be awaited
    /// or dropped. Returns `None` when nothing was started (blank input,
    /// a turn already in flight, or a closed session).
    pub async fn submit(&self, text: &str) -> Option<JoinHandle<TurnOutcome>> {
        match self.controller.begin(text).await {
            Ok(pending) => Some(tokio::spawn(pending.resolve())),
            Err(outcome) => {
                debug!(session = %self.session_id().0, ?outcome, "submission not started");
                None
            }
        }
    }

    /// Submits text and waits for the assistant turn.
    pub async fn send(&self, text: &str) -> TurnOutcome {
        self.controller.run_turn(text).await
    }

    /// Tears the session down. An in-flight result is discarded.
    pub fn close(&self) {
        self.controller.close();
    }

    pub fn is_closed(&self) -> bool {
        self.controller.is_closed()
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        self.controller.close();
    }
}
