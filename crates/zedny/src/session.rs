// SPDX-FileCopyrightText: 2026 Zedny Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Explicit session context shared by the chat and dashboard commands.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use zedny_chat::ChatSession;
use zedny_client::HttpBackend;
use zedny_config::model::ZednyConfig;
use zedny_core::ZednyError;
use zedny_core::traits::PluginAdapter;
use zedny_core::types::{HealthStatus, User};
use zedny_dashboard::{PollerHandle, TicketFeedReconciler, spawn_poller};

/// Everything one portal invocation owns: configuration, the current user,
/// the backend adapter, and the teardown token.
pub struct PortalSession {
    config: ZednyConfig,
    user: User,
    backend: Arc<HttpBackend>,
    cancel: CancellationToken,
}

impl PortalSession {
    pub fn new(
        config: ZednyConfig,
        user: User,
        cancel: CancellationToken,
    ) -> Result<Self, ZednyError> {
        let backend = Arc::new(HttpBackend::new(&config.backend)?);
        info!(
            user = %user.id,
            role = %user.role,
            adapter = backend.name(),
            version = %backend.version(),
            base_url = backend.base_url(),
            "portal session started"
        );
        Ok(Self {
            config,
            user,
            backend,
            cancel,
        })
    }

    pub fn config(&self) -> &ZednyConfig {
        &self.config
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Adapter identity for status lines, e.g. `http-backend 0.1.0 at http://...`.
    pub fn backend_label(&self) -> String {
        format!(
            "{} {} at {}",
            self.backend.name(),
            self.backend.version(),
            self.backend.base_url()
        )
    }

    /// Opens the conversation for this invocation.
    pub fn chat(&self) -> ChatSession {
        ChatSession::from_config(&self.config.portal, self.backend.clone())
    }

    /// Creates the reconciler for the dashboard view.
    pub fn reconciler(&self) -> Arc<TicketFeedReconciler> {
        Arc::new(TicketFeedReconciler::from_config(
            self.backend.clone(),
            &self.config.dashboard,
        ))
    }

    /// Starts polling into `reconciler`; stops on teardown or when the
    /// handle is dropped.
    pub fn start_poller(&self, reconciler: Arc<TicketFeedReconciler>) -> PollerHandle {
        let interval = Duration::from_secs(self.config.dashboard.poll_interval_secs);
        spawn_poller(reconciler, interval, &self.cancel)
    }

    /// Checks the backend; a failure is reported but never fatal.
    pub async fn check_backend(&self) -> HealthStatus {
        let status = self
            .backend
            .health_check()
            .await
            .unwrap_or_else(|e| HealthStatus::Unhealthy(e.to_string()));
        if let HealthStatus::Unhealthy(reason) = &status {
            warn!(base_url = self.backend.base_url(), reason = %reason, "backend unreachable");
        }
        status
    }

    pub async fn shutdown(&self) {
        self.cancel.cancel();
        if let Err(e) = self.backend.shutdown().await {
            warn!(error = %e, "backend shutdown failed");
        }
        info!("portal session closed");
    }
}
