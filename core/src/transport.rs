//! Executes an `HttpRequest` against the network.
//!
//! # Design
//! The controller depends on the `Transport` trait rather than on reqwest so
//! that tests can script responses and hold a request in flight. A transport
//! returns `Ok` for every HTTP response, including 4xx/5xx; status
//! interpretation stays in `SubmitClient::parse_submit`.

use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::error::FormError;
use crate::http::{HttpRequest, HttpResponse};

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, FormError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, FormError> {
        (**self).send(request).await
    }
}

/// reqwest-backed transport with a per-request timeout.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, FormError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FormError::Transport(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, FormError> {
        let started = Instant::now();
        let mut builder = self.client.post(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.body(request.body).send().await.map_err(|e| {
            let kind = if e.is_timeout() { "timed out" } else { "failed" };
            tracing::debug!(url = %request.url, error = %e, "request {kind}");
            FormError::Transport(format!("request {kind}: {e}"))
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| FormError::Transport(format!("failed to read response body: {e}")))?;

        tracing::debug!(
            url = %request.url,
            status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "acceptor responded"
        );
        Ok(HttpResponse { status, body })
    }
}
