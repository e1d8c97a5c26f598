//! Outbound HTTP seams and their `reqwest` implementation.
//!
//! The resolver only ever needs two kinds of request: a header-only probe
//! that reports the status and `Location` without following redirects, and a
//! GET that returns the raw body. Both are traits so resolution can run
//! against in-memory stubs.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, COOKIE, HOST, LOCATION};
use tracing::trace;
use url::Url;

use contentlink_shared::{ContentLinkError, Result};

/// User-Agent string for all outbound requests.
const USER_AGENT: &str = concat!("ContentLink/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// A header-only request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeRequest {
    pub url: Url,
    /// `Host` header override.
    pub host: Option<String>,
    /// Raw `Cookie` header value.
    pub cookie: Option<String>,
}

impl ProbeRequest {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            host: None,
            cookie: None,
        }
    }
}

/// Status and redirect target of a probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResponse {
    pub status: u16,
    pub location: Option<String>,
}

impl ProbeResponse {
    /// 301 or 302.
    pub fn is_redirect(&self) -> bool {
        matches!(self.status, 301 | 302)
    }
}

/// A JSON GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadRequest {
    pub url: Url,
    /// `Host` header override.
    pub host: Option<String>,
}

/// Status and raw body of a GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadResponse {
    pub status: u16,
    pub body: String,
}

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// Performs header-only requests without following redirects.
#[async_trait]
pub trait ProbeClient: Send + Sync {
    async fn probe(&self, request: ProbeRequest) -> Result<ProbeResponse>;
}

/// Performs GET requests and returns the raw body.
#[async_trait]
pub trait ReadClient: Send + Sync {
    async fn get(&self, request: ReadRequest) -> Result<ReadResponse>;
}

// ---------------------------------------------------------------------------
// reqwest implementation
// ---------------------------------------------------------------------------

/// `reqwest`-backed probe and read client.
///
/// Every request is bounded by the timeout given at construction.
#[derive(Debug, Clone)]
pub struct HttpClient {
    /// Never follows redirects; the caller inspects them.
    probe: Client,
    read: Client,
}

impl HttpClient {
    /// Build clients with the given per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self> {
        let probe = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::none())
            .timeout(timeout)
            .build()
            .map_err(|e| {
                ContentLinkError::Network(format!("failed to build HTTP client: {e}"))
            })?;

        let read = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| {
                ContentLinkError::Network(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self { probe, read })
    }
}

#[async_trait]
impl ProbeClient for HttpClient {
    async fn probe(&self, request: ProbeRequest) -> Result<ProbeResponse> {
        let url = request.url;
        let mut builder = self.probe.head(url.clone());
        if let Some(host) = &request.host {
            builder = builder.header(HOST, host);
        }
        if let Some(cookie) = &request.cookie {
            builder = builder.header(COOKIE, cookie);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| request_error(&url, &e))?;

        let status = response.status().as_u16();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        trace!(%url, status, ?location, "probe complete");
        Ok(ProbeResponse { status, location })
    }
}

#[async_trait]
impl ReadClient for HttpClient {
    async fn get(&self, request: ReadRequest) -> Result<ReadResponse> {
        let url = request.url;
        let mut builder = self
            .read
            .get(url.clone())
            .header(ACCEPT, "application/json");
        if let Some(host) = &request.host {
            builder = builder.header(HOST, host);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| request_error(&url, &e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| request_error(&url, &e))?;

        trace!(%url, status, len = body.len(), "read complete");
        Ok(ReadResponse { status, body })
    }
}

/// Network error for a failed request, naming timeouts explicitly and
/// carrying the full source chain otherwise.
fn request_error(url: &Url, error: &reqwest::Error) -> ContentLinkError {
    if error.is_timeout() {
        return ContentLinkError::Network(format!("{url}: request timed out"));
    }

    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    ContentLinkError::Network(format!("{url}: {message}"))
}
