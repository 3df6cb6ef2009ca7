// SPDX-FileCopyrightText: 2026 Zedny Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turn controller: one user submission through classification to a reply.
//!
//! A turn is split into two phases. [`TurnController::begin`] performs the
//! optimistic half (the user turn is appended and the composing signal is
//! raised) without touching the network. [`PendingTurn::resolve`] awaits the
//! classifier and appends exactly one assistant turn: the translated reply,
//! an escalation with its card, or the connectivity apology.

use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use zedny_core::traits::ClassifierAdapter;
use zedny_core::types::{
    ClassificationResponse, ConversationTurn, EscalationCard, EscalationReport, SessionId,
};

use crate::store::ConversationStore;

/// Title of every escalation card.
pub const ESCALATION_TITLE: &str = "Issue Escalation Report";

/// Fixed next-action checklist shown on every escalation card.
pub const ESCALATION_STEPS: [&str; 3] = [
    "Issue logged in Dashboard",
    "Email notification sent to manager",
    "Ticket assigned to specialist",
];

/// Maximum characters of the report summary shown on the card.
const SUMMARY_PREVIEW_CHARS: usize = 50;

/// States in the turn FSM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    /// Waiting for a submission.
    Idle,
    /// Appending the user turn.
    Sending,
    /// Classifier call in flight.
    AwaitingClassification,
    /// Assistant reply appended.
    Resolved,
    /// Apology appended after a classifier failure.
    Failed,
}

impl std::fmt::Display for TurnState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurnState::Idle => write!(f, "idle"),
            TurnState::Sending => write!(f, "sending"),
            TurnState::AwaitingClassification => write!(f, "awaiting_classification"),
            TurnState::Resolved => write!(f, "resolved"),
            TurnState::Failed => write!(f, "failed"),
        }
    }
}

/// What happened to one submission.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// Blank input; nothing changed.
    Ignored,
    /// Another turn is still awaiting classification.
    Busy,
    /// The conversation was torn down before the submission.
    Closed,
    /// The classifier answered; carries the appended assistant turn.
    Resolved(ConversationTurn),
    /// The classifier failed; carries the appended apology turn.
    Failed(ConversationTurn),
    /// The conversation was torn down while classification was in flight,
    /// so the result was dropped.
    Discarded,
}

impl TurnOutcome {
    /// The assistant turn this submission appended, if any.
    pub fn assistant_turn(&self) -> Option<&ConversationTurn> {
        match self {
            TurnOutcome::Resolved(turn) | TurnOutcome::Failed(turn) => Some(turn),
            _ => None,
        }
    }
}

/// Drives submissions for one conversation.
pub struct TurnController {
    session: SessionId,
    store: Arc<ConversationStore>,
    classifier: Arc<dyn ClassifierAdapter>,
    state: watch::Sender<TurnState>,
    composing: watch::Sender<bool>,
    /// Held for the lifetime of a [`PendingTurn`]; at most one per conversation.
    slot: Arc<Mutex<()>>,
    teardown: CancellationToken,
}

impl TurnController {
    pub fn new(
        session: SessionId,
        store: Arc<ConversationStore>,
        classifier: Arc<dyn ClassifierAdapter>,
    ) -> Self {
        let (state, _) = watch::channel(TurnState::Idle);
        let (composing, _) = watch::channel(false);
        Self {
            session,
            store,
            classifier,
            state,
            composing,
            slot: Arc::new(Mutex::new(())),
            teardown: CancellationToken::new(),
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session
    }

    pub fn store(&self) -> &Arc<ConversationStore> {
        &self.store
    }

    /// Current state of the turn FSM.
    pub fn state(&self) -> TurnState {
        *self.state.borrow()
    }

    /// Whether the assistant is composing a reply.
    pub fn is_composing(&self) -> bool {
        *self.composing.borrow()
    }

    /// Receiver for the composing signal.
    pub fn subscribe_composing(&self) -> watch::Receiver<bool> {
        self.composing.subscribe()
    }

    /// Tears the conversation down. Later submissions return
    /// [`TurnOutcome::Closed`] and an in-flight result is discarded.
    pub fn close(&self) {
        if !self.teardown.is_cancelled() {
            info!(session = %self.session.0, "conversation torn down");
            self.teardown.cancel();
        }
    }

    pub fn is_closed(&self) -> bool {
        self.teardown.is_cancelled()
    }

    /// Starts a turn: appends the user turn and raises the composing signal.
    ///
    /// Returns the outcome instead of a pending turn when the input is blank,
    /// the conversation is closed, or another turn is in flight. None of
    /// those cases touch the store.
    pub async fn begin(self: &Arc<Self>, text: &str) -> Result<PendingTurn, TurnOutcome> {
        if text.trim().is_empty() {
            return Err(TurnOutcome::Ignored);
        }
        if self.is_closed() {
            return Err(TurnOutcome::Closed);
        }
        let Ok(slot) = self.slot.clone().try_lock_owned() else {
            debug!(session = %self.session.0, "submission rejected, turn in flight");
            return Err(TurnOutcome::Busy);
        };

        self.transition(TurnState::Sending);
        self.store.append(ConversationTurn::user(text)).await;
        self.transition(TurnState::AwaitingClassification);
        self.composing.send_replace(true);

        Ok(PendingTurn {
            controller: Arc::clone(self),
            utterance: text.to_string(),
            _slot: slot,
        })
    }

    /// Runs a whole turn in place.
    pub async fn run_turn(self: &Arc<Self>, text: &str) -> TurnOutcome {
        match self.begin(text).await {
            Ok(pending) => pending.resolve().await,
            Err(outcome) => outcome,
        }
    }

    fn transition(&self, next: TurnState) {
        let previous = self.state.send_replace(next);
        debug!(
            session = %self.session.0,
            from = %previous,
            to = %next,
            "turn state transition"
        );
    }
}

/// A turn whose user half is in the transcript and whose classification
/// is outstanding.
///
/// Dropping it, whether after [`resolve`](Self::resolve) or because its task
/// was aborted, clears the composing signal and returns the FSM to idle.
pub struct PendingTurn {
    controller: Arc<TurnController>,
    utterance: String,
    _slot: OwnedMutexGuard<()>,
}

impl PendingTurn {
    /// Awaits classification and appends the assistant turn.
    pub async fn resolve(self) -> TurnOutcome {
        let controller = &self.controller;
        let result = controller
            .classifier
            .classify(&controller.session, &self.utterance)
            .await;

        if controller.is_closed() {
            info!(
                session = %controller.session.0,
                "discarding classification result after teardown"
            );
            return TurnOutcome::Discarded;
        }

        match result {
            Ok(response) => {
                let turn = translate(response);
                controller.store.append(turn.clone()).await;
                controller.transition(TurnState::Resolved);
                TurnOutcome::Resolved(turn)
            }
            Err(e) => {
                warn!(
                    session = %controller.session.0,
                    error = %e,
                    "classification failed, appending connectivity notice"
                );
                let turn = ConversationTurn::connectivity_failure();
                controller.store.append(turn.clone()).await;
                controller.transition(TurnState::Failed);
                TurnOutcome::Failed(turn)
            }
        }
    }
}

impl Drop for PendingTurn {
    fn drop(&mut self) {
        self.controller.composing.send_replace(false);
        self.controller.transition(TurnState::Idle);
    }
}

/// Translates a classification response into the assistant turn to append.
pub fn translate(response: ClassificationResponse) -> ConversationTurn {
    match response {
        ClassificationResponse::Reply { text } => ConversationTurn::assistant(text),
        ClassificationResponse::Escalate { text, report } => {
            let card = escalation_card(&report);
            let department = report.department.to_string().to_uppercase();
            ConversationTurn::escalation(
                format!("{text}\n\n(Internal Note: Escalated to {department} Dept)"),
                card,
            )
        }
    }
}

/// Builds the card shown under an escalated reply.
pub fn escalation_card(report: &EscalationReport) -> EscalationCard {
    let preview: String = report.summary.chars().take(SUMMARY_PREVIEW_CHARS).collect();
    EscalationCard {
        title: ESCALATION_TITLE.to_string(),
        insights: vec![
            format!("Priority: {}", report.priority.to_string().to_uppercase()),
            format!("Dept: {}", report.department.to_string().to_uppercase()),
            format!("Summary: {preview}..."),
        ],
        steps: ESCALATION_STEPS.iter().map(|s| s.to_string()).collect(),
    }
}
