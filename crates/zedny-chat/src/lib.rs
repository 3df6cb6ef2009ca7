// SPDX-FileCopyrightText: 2026 Zedny Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation handling for the Zedny client portal.
//!
//! The [`ConversationStore`] holds a transcript, the [`TurnController`]
//! drives each submission through classification, and [`ChatSession`] is
//! what the chat surface talks to.

pub mod controller;
pub mod session;
pub mod store;

pub use controller::{
    ESCALATION_STEPS, ESCALATION_TITLE, PendingTurn, TurnController, TurnOutcome, TurnState,
    escalation_card, translate,
};
pub use session::{ChatSession, SUGGESTIONS};
pub use store::ConversationStore;
