//! HTTP transport seam.
//!
//! The view never performs I/O itself: the runtime owns an `Arc<dyn Transport>`
//! and awaits it for the single in-flight request. `HttpTransport` is the real
//! implementation over `reqwest`; tests substitute scripted fakes.
//!
//! ERROR HANDLING
//! ==============
//! Every reqwest failure is flattened into a [`TransportError`] string variant.
//! The dispatcher reports all of them with the same generic toast, so the
//! detail only matters for logs.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use tracing::debug;

use super::types::{CSRF_HEADER, HttpRequest, HttpResponse, Method, TransportError};
use crate::config::ClientConfig;

#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one request and read the full response body.
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// `reqwest`-backed transport with a cookie jar for the server session.
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    /// Build a transport for `config.base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse or the client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let base_url =
            Url::parse(&config.base_url).map_err(|e| TransportError::InvalidBaseUrl(format!("{}: {e}", config.base_url)))?;
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| TransportError::ClientBuild(e.to_string()))?;
        Ok(Self { http, base_url })
    }

    fn url_for(&self, path: &str) -> Result<Url, TransportError> {
        self.base_url
            .join(path)
            .map_err(|e| TransportError::InvalidBaseUrl(format!("{path}: {e}")))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = self.url_for(&request.path)?;
        let mut builder = match request.method {
            Method::Get => self.http.get(url.clone()),
            Method::Post => self.http.post(url.clone()).form(&request.wire_form()),
        };
        if let Some(token) = &request.csrf_token {
            builder = builder.header(CSRF_HEADER, token);
        }

        let resp = builder
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;
        let status = resp.status().as_u16();
        let final_url = resp.url().clone();
        let redirected = final_url != url;
        let body = resp.text().await.map_err(|e| TransportError::Decode(e.to_string()))?;

        debug!(path = %request.path, status, redirected, final_url = %final_url, "http response");
        Ok(HttpResponse { status, final_url: final_url.to_string(), redirected, body })
    }
}
