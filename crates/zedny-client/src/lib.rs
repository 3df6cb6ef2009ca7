// SPDX-FileCopyrightText: 2026 Zedny Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP backend adapter for the Zedny client portal.
//!
//! This crate implements [`ClassifierAdapter`] and [`TicketFeedAdapter`]
//! against the backend's `chat` and `issues` endpoints.

pub mod client;
pub mod types;

use async_trait::async_trait;
use tracing::{debug, info, warn};
use zedny_config::model::BackendConfig;
use zedny_core::error::ZednyError;
use zedny_core::traits::{ClassifierAdapter, PluginAdapter, TicketFeedAdapter};
use zedny_core::types::{
    ClassificationResponse, Department, EscalationReport, HealthStatus, IssueRecord, Priority,
    SessionId,
};

use crate::client::BackendClient;
use crate::types::{ChatResponseBody, WireAction};

/// Remote classification and ticket feed backend over HTTP.
pub struct HttpBackend {
    client: BackendClient,
}

impl HttpBackend {
    /// Creates a backend adapter from the given configuration.
    pub fn new(config: &BackendConfig) -> Result<Self, ZednyError> {
        let client = BackendClient::new(config)?;
        info!(base_url = client.base_url(), "HTTP backend initialized");
        Ok(Self { client })
    }

    /// Creates an adapter with an existing client (for testing).
    pub fn with_client(client: BackendClient) -> Self {
        Self { client }
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }
}

#[async_trait]
impl PluginAdapter for HttpBackend {
    fn name(&self) -> &str {
        "http-backend"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, ZednyError> {
        match self.client.get_issues().await {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(e.to_string())),
        }
    }

    async fn shutdown(&self) -> Result<(), ZednyError> {
        debug!("HTTP backend shutting down");
        Ok(())
    }
}

#[async_trait]
impl ClassifierAdapter for HttpBackend {
    async fn classify(
        &self,
        session: &SessionId,
        utterance: &str,
    ) -> Result<ClassificationResponse, ZednyError> {
        let body = self.client.post_chat(utterance, &session.0).await?;
        Ok(into_classification(body))
    }
}

#[async_trait]
impl TicketFeedAdapter for HttpBackend {
    async fn list_tickets(&self) -> Vec<IssueRecord> {
        match self.client.get_issues().await {
            Ok(value) => parse_issue_list(value),
            Err(e) => {
                warn!(error = %e, "ticket feed poll failed, treating as empty");
                Vec::new()
            }
        }
    }
}

/// Converts a wire response into the domain type.
///
/// An `escalate` action without a report is downgraded to a reply.
fn into_classification(body: ChatResponseBody) -> ClassificationResponse {
    match (body.action, body.report) {
        (WireAction::Escalate, Some(report)) => ClassificationResponse::Escalate {
            text: body.text,
            report: EscalationReport {
                department: Department::coerce(&report.department),
                priority: Priority::coerce(&report.priority),
                summary: report.summary,
                extracted_info: report.extracted_info,
            },
        },
        (WireAction::Escalate, None) => {
            warn!("escalate response carried no report, treating as reply");
            ClassificationResponse::Reply { text: body.text }
        }
        (WireAction::Reply, _) => ClassificationResponse::Reply { text: body.text },
    }
}

/// Reads a JSON array of issue records, skipping elements that do not parse.
fn parse_issue_list(value: serde_json::Value) -> Vec<IssueRecord> {
    let serde_json::Value::Array(items) = value else {
        warn!("issue list response is not an array, treating as empty");
        return Vec::new();
    };

    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<IssueRecord>(item) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(error = %e, "skipping malformed issue record");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ReportBody;
    use tracing_test::traced_test;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn backend_for(server: &MockServer) -> HttpBackend {
        let client = BackendClient::new(&BackendConfig::default())
            .unwrap()
            .with_base_url(server.uri());
        HttpBackend::with_client(client)
    }

    fn session() -> SessionId {
        SessionId("s-1".into())
    }

    #[test]
    fn escalate_with_report_maps_enums() {
        let body = ChatResponseBody {
            action: WireAction::Escalate,
            text: "Routing you to our AI team.".into(),
            report: Some(ReportBody {
                department: "AI".into(),
                priority: "urgent".into(),
                summary: "Model training".into(),
                extracted_info: None,
            }),
        };
        match into_classification(body) {
            ClassificationResponse::Escalate { report, .. } => {
                assert_eq!(report.department, Department::Ai);
                assert_eq!(report.priority, Priority::High);
            }
            other => panic!("expected escalate, got {other:?}"),
        }
    }

    #[test]
    #[traced_test]
    fn escalate_without_report_becomes_reply() {
        let body = ChatResponseBody {
            action: WireAction::Escalate,
            text: "Forwarding.".into(),
            report: None,
        };
        assert_eq!(
            into_classification(body),
            ClassificationResponse::Reply {
                text: "Forwarding.".into()
            }
        );
        assert!(logs_contain("carried no report"));
    }

    #[test]
    fn reply_ignores_stray_report() {
        let body = ChatResponseBody {
            action: WireAction::Reply,
            text: "Hi".into(),
            report: Some(ReportBody {
                department: "web".into(),
                priority: "low".into(),
                summary: "x".into(),
                extracted_info: None,
            }),
        };
        assert!(matches!(
            into_classification(body),
            ClassificationResponse::Reply { .. }
        ));
    }

    #[test]
    fn issue_list_skips_bad_elements() {
        let value = serde_json::json!([
            {"id": 1, "description": "Site down", "department": "web", "priority": "high",
             "status": "open", "assigned_to": 4, "created_at": "2026-01-05T10:00:00"},
            {"id": "oops"},
            {"id": 2, "description": "Logo", "department": "content", "priority": "low",
             "status": "resolved", "created_at": "2026-01-05T11:00:00"}
        ]);
        let records = parse_issue_list(value);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 1);
        assert_eq!(records[0].assigned_to, Some(4));
        assert_eq!(records[1].assigned_to, None);
    }

    #[test]
    fn non_array_issue_list_is_empty() {
        assert!(parse_issue_list(serde_json::json!({"detail": "nope"})).is_empty());
    }

    #[tokio::test]
    async fn classify_escalation_round_trip() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "action": "escalate",
                "text": "I've flagged this for our web team.",
                "report": {"department": "web", "priority": "high", "summary": "Checkout broken"}
            })))
            .mount(&server)
            .await;

        let backend = backend_for(&server);
        let response = backend.classify(&session(), "checkout is broken").await.unwrap();
        match response {
            ClassificationResponse::Escalate { text, report } => {
                assert_eq!(text, "I've flagged this for our web team.");
                assert_eq!(report.summary, "Checkout broken");
                assert_eq!(report.department, Department::Web);
            }
            other => panic!("expected escalate, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn classify_propagates_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let err = backend_for(&server)
            .classify(&session(), "hello")
            .await
            .unwrap_err();
        assert!(err.is_remote());
    }

    #[tokio::test]
    async fn list_tickets_degrades_to_empty_on_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/issues/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        assert!(backend_for(&server).list_tickets().await.is_empty());
    }

    #[tokio::test]
    async fn list_tickets_returns_records_in_backend_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/issues/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 7, "description": "a", "department": "ai", "priority": "low",
                 "status": "open", "created_at": "2026-01-05T10:00:00"},
                {"id": 8, "description": "b", "department": "web", "priority": "high",
                 "status": "in_progress", "created_at": "2026-01-05T10:05:00"}
            ])))
            .mount(&server)
            .await;

        let ids: Vec<i64> = backend_for(&server)
            .list_tickets()
            .await
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![7, 8]);
    }

    #[tokio::test]
    async fn health_check_reports_unreachable_backend() {
        let client = BackendClient::new(&BackendConfig::default())
            .unwrap()
            .with_base_url("http://127.0.0.1:9/api");
        let status = HttpBackend::with_client(client).health_check().await.unwrap();
        assert!(matches!(status, HealthStatus::Unhealthy(_)));
    }

    #[tokio::test]
    async fn adapter_identity_and_healthy_backend() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/issues/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let backend = backend_for(&server);
        assert_eq!(backend.name(), "http-backend");
        assert_eq!(backend.version(), semver::Version::new(0, 1, 0));
        assert_eq!(backend.health_check().await.unwrap(), HealthStatus::Healthy);
        backend.shutdown().await.unwrap();
    }
}
