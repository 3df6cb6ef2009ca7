// SPDX-FileCopyrightText: 2026 Zedny Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock classifier adapter for deterministic testing.
//!
//! `MockClassifier` implements `ClassifierAdapter` with pre-configured
//! outcomes, so turn tests run without a backend.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, Semaphore};

use zedny_core::ZednyError;
use zedny_core::traits::{ClassifierAdapter, PluginAdapter};
use zedny_core::types::{
    ClassificationResponse, Department, EscalationReport, HealthStatus, Priority, SessionId,
};

/// A scripted classification outcome.
pub type Outcome = Result<ClassificationResponse, ZednyError>;

/// A mock classifier that returns pre-configured outcomes.
///
/// Outcomes are popped from a FIFO queue. When the queue is empty,
/// a "mock reply" reply is returned. A gated classifier holds every call
/// until [`MockClassifier::release`] grants it a permit.
pub struct MockClassifier {
    outcomes: Arc<Mutex<VecDeque<Outcome>>>,
    calls: Arc<Mutex<Vec<(SessionId, String)>>>,
    gate: Option<Arc<Semaphore>>,
}

impl MockClassifier {
    /// Create a new mock classifier with an empty outcome queue.
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            gate: None,
        }
    }

    /// Create a mock classifier pre-loaded with the given outcomes.
    pub fn with_outcomes(outcomes: Vec<Outcome>) -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::from(outcomes))),
            ..Self::new()
        }
    }

    /// Hold every call pending until released.
    pub fn gated(mut self) -> Self {
        self.gate = Some(Arc::new(Semaphore::new(0)));
        self
    }

    /// Let one held call proceed. No-op on an ungated classifier.
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }

    /// Utterances received so far, in call order.
    pub async fn utterances(&self) -> Vec<String> {
        self.calls
            .lock()
            .await
            .iter()
            .map(|(_, text)| text.clone())
            .collect()
    }

    /// Number of classify calls received so far.
    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }

    async fn next_outcome(&self) -> Outcome {
        self.outcomes
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(reply("mock reply")))
    }
}

impl Default for MockClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockClassifier {
    fn name(&self) -> &str {
        "mock-classifier"
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
impl ClassifierAdapter for MockClassifier {
    async fn classify(
        &self,
        session: &SessionId,
        utterance: &str,
    ) -> Result<ClassificationResponse, ZednyError> {
        self.calls
            .lock()
            .await
            .push((session.clone(), utterance.to_string()));

        if let Some(gate) = &self.gate {
            let permit = gate
                .acquire()
                .await
                .map_err(|e| ZednyError::Internal(format!("mock gate closed: {e}")))?;
            permit.forget();
        }

        self.next_outcome().await
    }
}

/// A plain reply response.
pub fn reply(text: &str) -> ClassificationResponse {
    ClassificationResponse::Reply {
        text: text.to_string(),
    }
}

/// An escalation response with the given routing.
pub fn escalation(
    text: &str,
    department: Department,
    priority: Priority,
    summary: &str,
) -> ClassificationResponse {
    ClassificationResponse::Escalate {
        text: text.to_string(),
        report: EscalationReport {
            department,
            priority,
            summary: summary.to_string(),
            extracted_info: None,
        },
    }
}

/// A transport failure, as produced when the backend is unreachable.
pub fn connection_refused() -> ZednyError {
    ZednyError::transport(
        "HTTP request failed",
        std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused"),
    )
}
