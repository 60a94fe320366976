//! Typed request executor.
//!
//! # Design
//! `RequestExecutor` holds an injected transport and configuration provider
//! and carries no mutable state between calls. `fetch` is split into
//! `build_request` (endpoint to `HttpRequest`) and `parse_response`
//! (`HttpResponse` to typed value) with exactly one `Transport::execute` in
//! between. There are no retries at any step.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::ConfigProvider;
use crate::endpoint::Endpoint;
use crate::error::FetchError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{ReqwestTransport, Transport};

/// Timeout applied to every request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Message carried by `FetchError::Custom` when a response has no status.
pub const INVALID_RESPONSE: &str = "Invalid response received";

/// Builds, executes and decodes one request per `fetch` call.
#[derive(Debug, Clone)]
pub struct RequestExecutor<T, C> {
    transport: T,
    config: C,
}

impl<C: ConfigProvider> RequestExecutor<ReqwestTransport, C> {
    /// Executor over a fresh `reqwest::Client`.
    pub fn with_config(config: C) -> Self {
        Self::new(ReqwestTransport::new(), config)
    }
}

impl<T: Transport, C: ConfigProvider> RequestExecutor<T, C> {
    pub fn new(transport: T, config: C) -> Self {
        Self { transport, config }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// Fetch `endpoint` and decode its JSON body as `R`.
    pub async fn fetch<R: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<R, FetchError> {
        let request = self.build_request(endpoint)?;
        debug!(target: "typed_fetch::http", method = %request.method, url = %request.url, "sending request");

        let response = match self.transport.execute(request).await {
            Ok(response) => response,
            Err(error) => {
                debug!(target: "typed_fetch::http", err = %error, "request error");
                return Err(error.into());
            }
        };
        debug!(
            target: "typed_fetch::http",
            status = ?response.status,
            bytes = response.body.len(),
            "response received"
        );

        self.parse_response(response)
    }

    /// Assemble the request for `endpoint` without executing it.
    ///
    /// Headers are always exactly `accept: application/json` and
    /// `Authorization: <token>`; the timeout is always `REQUEST_TIMEOUT`.
    pub fn build_request(&self, endpoint: &Endpoint) -> Result<HttpRequest, FetchError> {
        let url = resolve_url(endpoint)?;
        Ok(HttpRequest {
            method: endpoint.method,
            url,
            headers: vec![
                ("accept".to_string(), "application/json".to_string()),
                ("Authorization".to_string(), self.config.api_token()),
            ],
            timeout: REQUEST_TIMEOUT,
        })
    }

    /// Classify `response` and decode its body as `R`.
    pub fn parse_response<R: DeserializeOwned>(&self, response: HttpResponse) -> Result<R, FetchError> {
        let status = response
            .status
            .ok_or_else(|| FetchError::Custom(INVALID_RESPONSE.to_string()))?;
        check_status(status)?;
        serde_json::from_slice(&response.body).map_err(FetchError::DecodingError)
    }
}

/// Any status outside 200..=299 is a failure; the body is not inspected.
fn check_status(status: u16) -> Result<(), FetchError> {
    if (200..=299).contains(&status) {
        Ok(())
    } else {
        Err(FetchError::ServerError { status })
    }
}

/// Parse the endpoint URL and append its query items after any query pairs
/// the URL already carries. Every failure is `BadUrl`.
fn resolve_url(endpoint: &Endpoint) -> Result<Url, FetchError> {
    let mut url = Url::parse(&endpoint.url).map_err(|_| FetchError::BadUrl)?;
    // Opaque URLs (mailto:, data:) have no path to request.
    if url.cannot_be_a_base() {
        return Err(FetchError::BadUrl);
    }

    if let Some(items) = endpoint.query_items.as_deref() {
        if !items.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(items.iter().map(|(name, value)| (name.as_str(), value.as_str())));
        }
    }
    Ok(url)
}
