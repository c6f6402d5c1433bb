//! Shared HTTP client for the LotOps API.
//!
//! Provides a minimal client with generic GET/POST/PUT/DELETE helpers and
//! domain methods (imports, inventory, schedule, preferences, VIN). The CLI
//! crate uses this client directly.

pub mod api;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// API version prefix (e.g. "/api/v0"). Set LOTOPS_API_VERSION to match the server.
pub fn api_prefix() -> String {
    let version = std::env::var("LOTOPS_API_VERSION").unwrap_or_else(|_| "v0".to_string());
    format!("/api/{version}")
}

/// HTTP client for the LotOps API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create client from environment: LOTOPS_API_URL (or API_URL),
    /// defaulting to the local development server.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("LOTOPS_API_URL")
            .or_else(|_| std::env::var("API_URL"))
            .unwrap_or_else(|_| "http://localhost:4000".to_string());

        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET `path`, appending `query` when non-empty.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self.build_url(path);
        let mut request = self.client.get(&url);

        if !query.is_empty() {
            request = request.query(query);
        }

        Self::send_json(request, &url).await
    }

    /// POST with an empty body.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.build_url(path);
        Self::send_json(self.client.post(&url), &url).await
    }

    /// POST `body` as JSON.
    pub async fn post_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.build_url(path);
        Self::send_json(self.client.post(&url).json(body), &url).await
    }

    /// PUT `body` as JSON.
    pub async fn put_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.build_url(path);
        Self::send_json(self.client.put(&url).json(body), &url).await
    }

    /// POST a multipart form.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T> {
        let url = self.build_url(path);
        Self::send_json(self.client.post(&url).multipart(form), &url).await
    }

    /// DELETE `path`, discarding the response body.
    pub async fn delete(&self, path: &str) -> Result<()> {
        let url = self.build_url(path);
        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .with_context(|| format!("Failed to reach {url}"))?;

        Self::ensure_success(response).await?;
        Ok(())
    }

    /// Sends a prepared request and decodes the JSON body of a 2xx response.
    async fn send_json<T: DeserializeOwned>(request: reqwest::RequestBuilder, url: &str) -> Result<T> {
        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to reach {url}"))?;
        let response = Self::ensure_success(response).await?;
        response
            .json()
            .await
            .context("Failed to decode response body")
    }

    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let detail = response
            .text()
            .await
            .unwrap_or_else(|_| "<no body>".to_string());
        Err(anyhow::anyhow!("API returned {status}: {detail}"))
    }
}

// Everything the CLI binds against is reachable from the crate root.
pub use api::{
    ConflictProbe, ImportListResponse, InventoryListResponse, RegisterImportsResponse,
    RejectedUpload, ShiftListResponse, ShiftPayload, VinCheckResponse,
};
pub use lotops_core::models::{
    Dealer, DealerPreference, ImportFile, ImportStatus, ImportSummary, ScheduleShift, Vehicle,
};
