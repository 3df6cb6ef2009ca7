// SPDX-FileCopyrightText: 2026 Zedny Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Append-only transcript of one conversation.

use tokio::sync::RwLock;
use zedny_core::types::ConversationTurn;

/// Ordered transcript of one conversation.
///
/// Turns are only ever appended; insertion order is display order. Appends
/// are serialized by the write lock, so the stored order equals the order
/// in which `append` calls acquired it.
#[derive(Debug, Default)]
pub struct ConversationStore {
    turns: RwLock<Vec<ConversationTurn>>,
}

impl ConversationStore {
    /// An empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// A transcript seeded with the given turns.
    pub fn with_turns(turns: Vec<ConversationTurn>) -> Self {
        Self {
            turns: RwLock::new(turns),
        }
    }

    /// Appends one turn at the end of the transcript.
    pub async fn append(&self, turn: ConversationTurn) {
        self.turns.write().await.push(turn);
    }

    /// Snapshot of the transcript in insertion order.
    pub async fn list(&self) -> Vec<ConversationTurn> {
        self.turns.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.turns.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.turns.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zedny_core::types::Sender;

    #[tokio::test]
    async fn new_store_is_empty() {
        let store = ConversationStore::new();
        assert!(store.is_empty().await);
        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn list_returns_appended_turns_in_order_unmodified() {
        let store = ConversationStore::new();
        let turns: Vec<ConversationTurn> = (0..5)
            .map(|i| {
                if i % 2 == 0 {
                    ConversationTurn::user(format!("question {i}"))
                } else {
                    ConversationTurn::assistant(format!("answer {i}"))
                }
            })
            .collect();

        for turn in &turns {
            store.append(turn.clone()).await;
        }

        assert_eq!(store.list().await, turns);
        assert_eq!(store.len().await, 5);
    }

    #[tokio::test]
    async fn snapshot_is_detached_from_later_appends() {
        let store = ConversationStore::with_turns(vec![ConversationTurn::assistant("hello")]);
        let snapshot = store.list().await;
        store.append(ConversationTurn::user("hi")).await;

        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.len().await, 2);
        assert_eq!(store.list().await[1].sender, Sender::User);
    }
}
