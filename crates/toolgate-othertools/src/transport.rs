//! The narrow HTTP collaborator `OpenApiTool`/`WebhookTool` dispatch
//! through; building the request, following the base URL, and parsing the
//! response are the transport's concern, not this crate's.
//! [`ReqwestTransport`] is the one concrete implementation this workspace
//! ships, for outbound HTTP via `reqwest`.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(String),
}

#[async_trait]
pub trait OpenApiTransport: Send + Sync {
    async fn send(
        &self,
        method: &str,
        url: &str,
        body: Option<&str>,
    ) -> Result<HttpResponse, TransportError>;
}

#[async_trait]
pub trait WebhookTransport: Send + Sync {
    async fn post(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
        body: &str,
    ) -> Result<HttpResponse, TransportError>;
}

/// `reqwest`-backed implementation shared by both transport traits.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// # Panics
    /// Panics only if the underlying TLS backend fails to initialize,
    /// which `reqwest::Client::new` documents as happening only on a
    /// misconfigured build environment.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .expect("reqwest client with static TLS config"),
        }
    }
}

#[async_trait]
impl OpenApiTransport for ReqwestTransport {
    async fn send(
        &self,
        method: &str,
        url: &str,
        body: Option<&str>,
    ) -> Result<HttpResponse, TransportError> {
        let method = method
            .parse::<reqwest::Method>()
            .map_err(|e| TransportError::Request(e.to_string()))?;
        let mut builder = self.client.request(method, url);
        if let Some(body) = body {
            builder = builder.body(body.to_string());
        }
        send_request(builder).await
    }
}

#[async_trait]
impl WebhookTransport for ReqwestTransport {
    async fn post(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
        body: &str,
    ) -> Result<HttpResponse, TransportError> {
        let mut builder = self.client.post(url).body(body.to_string());
        for (name, value) in headers {
            builder = builder.header(name, value);
        }
        send_request(builder).await
    }
}

async fn send_request(builder: reqwest::RequestBuilder) -> Result<HttpResponse, TransportError> {
    let response = builder
        .send()
        .await
        .map_err(|e| TransportError::Request(e.to_string()))?;
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .map_err(|e| TransportError::Request(e.to_string()))?;
    Ok(HttpResponse { status, body })
}
