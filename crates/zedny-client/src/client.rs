// SPDX-FileCopyrightText: 2026 Zedny Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP transport for the classification backend.
//!
//! Provides [`BackendClient`], which resolves endpoints, sends a single
//! attempt per call, follows at most one redirect hop, and maps failures
//! onto [`ZednyError::Transport`] and [`ZednyError::Protocol`].

use std::time::Duration;

use reqwest::header::LOCATION;
use reqwest::{Method, Response, StatusCode, Url};
use serde::Serialize;
use tracing::debug;
use zedny_config::model::BackendConfig;
use zedny_core::ZednyError;

use crate::types::{ChatRequest, ChatResponseBody};

/// HTTP client for backend communication.
///
/// Automatic redirects are disabled on the underlying client so that the
/// single permitted hop keeps the original method and body.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
    trailing_slash: bool,
}

impl BackendClient {
    /// Creates a client for the base URL resolved from `config`.
    pub fn new(config: &BackendConfig) -> Result<Self, ZednyError> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ZednyError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.resolved_base_url(),
            trailing_slash: config.trailing_slash,
        })
    }

    /// Overrides the base URL (used to point at a mock server).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.base_url = url.strip_suffix('/').map(str::to_string).unwrap_or(url);
        self
    }

    /// Returns the base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for a named endpoint, honoring the trailing-slash setting.
    pub fn endpoint(&self, name: &str) -> String {
        let slash = if self.trailing_slash { "/" } else { "" };
        format!("{}/{name}{slash}", self.base_url)
    }

    /// Sends one utterance to `POST {base}/chat`.
    pub async fn post_chat(
        &self,
        message: &str,
        session_id: &str,
    ) -> Result<ChatResponseBody, ZednyError> {
        let url = self.endpoint("chat");
        let body = ChatRequest {
            message,
            session_id,
            user_id: session_id,
        };
        let response = self.execute(Method::POST, &url, Some(&body)).await?;
        let text = success_body(response).await?;
        serde_json::from_str(&text)
            .map_err(|e| ZednyError::malformed(format!("failed to parse chat response: {e}")))
    }

    /// Fetches `GET {base}/issues` as untyped JSON.
    pub async fn get_issues(&self) -> Result<serde_json::Value, ZednyError> {
        let url = self.endpoint("issues");
        let response = self.execute::<()>(Method::GET, &url, None).await?;
        let text = success_body(response).await?;
        serde_json::from_str(&text)
            .map_err(|e| ZednyError::malformed(format!("failed to parse issue list: {e}")))
    }

    /// Sends a request, following a redirect response exactly once with the
    /// same method and body.
    async fn execute<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<Response, ZednyError> {
        let response = self.send(method.clone(), url, body).await?;
        let status = response.status();
        debug!(status = %status, url, "backend response received");

        if !is_followable(status) {
            return Ok(response);
        }

        let target = redirect_target(&response)?;
        debug!(status = %status, location = %target, "following redirect");

        let followed = self.send(method, target.as_str(), body).await?;
        let followed_status = followed.status();
        debug!(status = %followed_status, url = %target, "redirected response received");

        if is_followable(followed_status) {
            return Err(ZednyError::Protocol {
                message: format!("backend redirected again from {target}"),
                status: Some(followed_status.as_u16()),
            });
        }
        Ok(followed)
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<Response, ZednyError> {
        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }
        request
            .send()
            .await
            .map_err(|e| ZednyError::transport(format!("HTTP request to {url} failed"), e))
    }
}

/// Resolves the `Location` header of a redirect against the request URL.
/// Redirect statuses that point at a new location. `300` and `304` do not,
/// and fall through to the status check.
fn is_followable(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::MOVED_PERMANENTLY
            | StatusCode::FOUND
            | StatusCode::SEE_OTHER
            | StatusCode::TEMPORARY_REDIRECT
            | StatusCode::PERMANENT_REDIRECT
    )
}

fn redirect_target(response: &Response) -> Result<Url, ZednyError> {
    let location = response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ZednyError::Transport {
            message: format!("redirect {} without a Location header", response.status()),
            source: None,
        })?;

    response
        .url()
        .join(location)
        .map_err(|e| ZednyError::transport(format!("invalid redirect location `{location}`"), e))
}

/// Reads the body of a success response, or maps the status to a protocol error.
async fn success_body(response: Response) -> Result<String, ZednyError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ZednyError::Protocol {
            message: format!("backend returned {status}: {body}"),
            status: Some(status.as_u16()),
        });
    }
    response
        .text()
        .await
        .map_err(|e| ZednyError::transport("failed to read response body", e))
}
