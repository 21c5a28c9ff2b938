//! Shared reqwest plumbing for the REST collaborators.

use std::time::Duration;

use raffine_core::auth::AuthToken;
use raffine_core::error::{RaffineError, Result};
use raffine_infrastructure::AppConfig;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::dto::ErrorBody;

/// Base URL plus a pooled HTTP client. Cheap to clone.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
            timeout,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.api_url, config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(self.url(path)).timeout(self.timeout)
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.client.post(self.url(path)).timeout(self.timeout)
    }

    pub(crate) fn put(&self, path: &str) -> RequestBuilder {
        self.client.put(self.url(path)).timeout(self.timeout)
    }

    /// Attaches the bearer token.
    pub(crate) fn auth_request(&self, request: RequestBuilder, token: &AuthToken) -> RequestBuilder {
        request.header("Authorization", format!("Bearer {}", token.as_str()))
    }

    /// Sends `request` and decodes a JSON body from a 2xx response.
    ///
    /// `fallback` is reported when a failed response carries no message.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        fallback: &str,
    ) -> Result<T> {
        let response = self.send_checked(request, fallback).await?;
        response.json::<T>().await.map_err(|e| RaffineError::Serialization {
            format: "json".to_string(),
            message: e.to_string(),
        })
    }

    /// Sends `request` and discards the body of a 2xx response.
    pub(crate) async fn send(&self, request: RequestBuilder, fallback: &str) -> Result<()> {
        self.send_checked(request, fallback).await.map(|_| ())
    }

    async fn send_checked(&self, request: RequestBuilder, fallback: &str) -> Result<Response> {
        let response = request.send().await.map_err(|e| {
            tracing::debug!(error = %e, "Request failed before a response");
            RaffineError::transport(e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(collaborator_error(status, &body, fallback))
    }
}

/// Builds the error for a non-2xx response, preferring the body's `message`.
pub(crate) fn collaborator_error(status: StatusCode, body: &str, fallback: &str) -> RaffineError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string());
    tracing::debug!(status = status.as_u16(), %message, "Collaborator rejected request");
    RaffineError::collaborator(Some(status.as_u16()), message)
}
