//! API client
//!
//! [`ApiClient`] fetches one resource at a time and keeps a short history of
//! what the server answered. Pagination is layered on top through
//! [`ApiClient::pages`] and [`ApiClient::items`].

use super::history::{RecordedResponse, ResponseHistory};
use super::rate_limit::{RateLimitInfo, RateLimiter};
use super::transport::{ReqwestTransport, Transport, TransportRequest};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::pagination::{Items, Pages};
use crate::params::Params;
use crate::types::{JsonValue, Method};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

/// Disqus API client
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    config: ClientConfig,
    history: Mutex<ResponseHistory>,
    rate_limiter: Option<RateLimiter>,
}

impl ApiClient {
    /// Create a client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client using reqwest for transport
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = ReqwestTransport::new(&config.user_agent, config.timeout())?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client over a custom transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        config.validate()?;
        let history = ResponseHistory::new(config.history_capacity);
        let rate_limiter = config.throttle.as_ref().map(RateLimiter::new);

        Ok(Self {
            transport,
            config,
            history: Mutex::new(history),
            rate_limiter,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Check if the client-side throttle is enabled
    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }

    /// Fetch `resource` with a GET request
    pub async fn get(&self, resource: &str, params: &Params) -> Result<JsonValue> {
        self.json(resource, Method::GET, params).await
    }

    /// Fetch one resource and parse the JSON body
    ///
    /// `params` are layered over the configured defaults. The response is
    /// recorded in the history before its status is checked, so a failed call
    /// still shows up in [`ApiClient::last_response`].
    pub async fn json(&self, resource: &str, method: Method, params: &Params) -> Result<JsonValue> {
        let url = self.config.resource_url(resource)?;
        let merged = self.config.default_params.merged(params);

        if let Some(ref limiter) = self.rate_limiter {
            limiter.wait().await;
        }

        let request = TransportRequest {
            method,
            url: url.clone(),
            query: merged.to_query_pairs(),
            timeout: self.config.timeout(),
        };
        debug!(
            "{} {} ({} params, cursor={:?})",
            method,
            url,
            request.query.len(),
            request.query_value(crate::params::CURSOR_PARAM)
        );

        let response = self.transport.send(request).await?;
        let status = response.status;
        let recorded = RecordedResponse {
            method,
            url,
            status,
            headers: response.headers,
            body: response.body,
        };
        let outcome = if recorded.is_success() {
            serde_json::from_str::<JsonValue>(&recorded.body).map_err(Error::from)
        } else {
            warn!("{} {} failed with HTTP {}", method, resource, status);
            Err(Error::api(status, recorded.body.clone()))
        };
        self.history().push(recorded);
        outcome
    }

    /// Lazily walk every page of a cursor-paginated resource
    pub fn pages(&self, resource: impl Into<String>, method: Method, params: Params) -> Pages<'_> {
        Pages::new(self, resource.into(), method, params)
    }

    /// Lazily walk every item across all pages of a resource
    pub fn items(&self, resource: impl Into<String>, method: Method, params: Params) -> Items<'_> {
        Items::new(self.pages(resource, method, params))
    }

    /// Most recent response, if any request has completed
    pub fn last_response(&self) -> Option<RecordedResponse> {
        self.history().last().cloned()
    }

    /// Raw `X-Ratelimit-Remaining` header of the last response
    pub fn rate_limit_remaining(&self) -> Option<String> {
        self.history()
            .last()
            .and_then(|r| r.rate_limit_remaining().map(str::to_string))
    }

    /// Parsed `X-Ratelimit-*` headers of the last response
    pub fn rate_limit(&self) -> Option<RateLimitInfo> {
        self.history().last().and_then(RecordedResponse::rate_limit)
    }

    /// Number of responses currently retained
    pub fn history_len(&self) -> usize {
        self.history().len()
    }

    /// Copy of the retained responses, oldest first
    pub fn responses(&self) -> Vec<RecordedResponse> {
        self.history().iter().cloned().collect()
    }

    pub fn clear_history(&self) {
        self.history().clear();
    }

    fn history(&self) -> MutexGuard<'_, ResponseHistory> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.config.base_url)
            .field("history_len", &self.history_len())
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}
