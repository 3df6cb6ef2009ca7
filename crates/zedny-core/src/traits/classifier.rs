// SPDX-FileCopyrightText: 2026 Zedny Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Classifier adapter trait for the remote message classification service.

use async_trait::async_trait;

use crate::error::ZednyError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ClassificationResponse, SessionId};

/// Adapter that decides whether a user utterance gets a direct reply or
/// becomes an escalation ticket.
#[async_trait]
pub trait ClassifierAdapter: PluginAdapter {
    /// Classifies one non-empty utterance.
    ///
    /// Makes a single attempt. Any transport failure, non-success status, or
    /// malformed body is returned as an error; a partially parsed response
    /// is never returned.
    async fn classify(
        &self,
        session: &SessionId,
        utterance: &str,
    ) -> Result<ClassificationResponse, ZednyError>;
}
