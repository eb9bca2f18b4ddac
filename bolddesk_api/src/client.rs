//! HTTP client for the BoldDesk REST API.

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::{
    query::Query,
    rate_limit::{RateLimitSnapshot, RateLimitTracker},
    services::{Agents, Brands, ContactGroups, Contacts, Fields, Tickets, Worklogs},
    Error,
};

/// Client-wide request timeout. Large exports can take minutes.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Header BoldDesk reads the API key from.
const API_KEY_HEADER: &str = "x-api-key";

/// Error bodies longer than this are cut before logging.
const MAX_LOGGED_BODY: usize = 2000;

/// HTTP client for the BoldDesk API.
///
/// Cloning is cheap and clones share the connection pool and the
/// rate-limit tracker. Build a second client with [`Client::new`] for
/// independent tracking.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    /// Base URL including the API prefix, e.g. `https://acme.bolddesk.com/api/v1`.
    base_api_url: String,
    api_key: String,
    timeout: Duration,
    rate_limiter: Arc<RateLimitTracker>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_api_url", &self.base_api_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a client for a BoldDesk domain such as `acme.bolddesk.com`.
    pub fn new(domain: &str, api_key: &str) -> Result<Self, Error> {
        Self::with_base_url(&api_base_url(domain), api_key)
    }

    /// Creates a client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str, api_key: &str) -> Result<Self, Error> {
        Url::parse(base_url).map_err(|e| Error::InvalidUrl(format!("{}: {}", base_url, e)))?;
        Ok(Self {
            http: build_http(api_key, DEFAULT_TIMEOUT)?,
            base_api_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            timeout: DEFAULT_TIMEOUT,
            rate_limiter: Arc::new(RateLimitTracker::new()),
        })
    }

    /// Replaces the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, Error> {
        self.http = build_http(&self.api_key, timeout)?;
        self.timeout = timeout;
        Ok(self)
    }

    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The most recent rate-limit reading, if any response carried one.
    pub fn rate_limit(&self) -> Option<RateLimitSnapshot> {
        self.rate_limiter.latest()
    }

    pub fn rate_limiter(&self) -> &RateLimitTracker {
        &self.rate_limiter
    }

    pub fn tickets(&self) -> Tickets<'_> {
        Tickets::new(self)
    }

    pub fn contacts(&self) -> Contacts<'_> {
        Contacts::new(self)
    }

    pub fn contact_groups(&self) -> ContactGroups<'_> {
        ContactGroups::new(self)
    }

    pub fn agents(&self) -> Agents<'_> {
        Agents::new(self)
    }

    pub fn brands(&self) -> Brands<'_> {
        Brands::new(self)
    }

    pub fn worklogs(&self) -> Worklogs<'_> {
        Worklogs::new(self)
    }

    pub fn fields(&self) -> Fields<'_> {
        Fields::new(self)
    }

    fn get_url(&self, path: &str, query: Option<&impl Query>) -> Result<Url, Error> {
        let url = Url::parse(format!("{}{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::InvalidUrl(format!("{}{}: {}", self.base_api_url, path, e))
        })?;
        Ok(match query {
            Some(query) => query.add_to_url(&url),
            None => url,
        })
    }

    pub(crate) async fn get<T, Q>(&self, path: &str, query: Option<&Q>) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        let url = self.get_url(path, query)?;
        self.send::<T, ()>(Method::GET, url, None).await
    }

    pub(crate) async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.get_url(path, None::<&crate::query::ListQuery>)?;
        self.send(Method::POST, url, Some(body)).await
    }

    pub(crate) async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.get_url(path, None::<&crate::query::ListQuery>)?;
        self.send(Method::PUT, url, Some(body)).await
    }

    pub(crate) async fn patch<T, B>(&self, path: &str, body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.get_url(path, None::<&crate::query::ListQuery>)?;
        self.send(Method::PATCH, url, Some(body)).await
    }

    pub(crate) async fn delete<T>(&self, path: &str) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let url = self.get_url(path, None::<&crate::query::ListQuery>)?;
        self.send::<T, ()>(Method::DELETE, url, None).await
    }

    async fn send<T, B>(&self, method: Method, url: Url, body: Option<&B>) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        tracing::debug!("{} {}", method, url);
        let started = Instant::now();

        let mut request = self.http.request(method.clone(), url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| transport_error(e, &url, started))?;

        self.rate_limiter.record_headers(resp.headers());

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| transport_error(e, &url, started))?;

        if !status.is_success() {
            let err = Error::from_response(status.as_u16(), &body, self.rate_limiter.latest());
            if status.as_u16() == 429 {
                tracing::warn!("Rate limited on {} {}", method, url.path());
            } else {
                tracing::error!(
                    "{} {} failed with status {}: {}",
                    method,
                    url.path(),
                    status,
                    truncate_body(&body)
                );
            }
            return Err(err);
        }

        tracing::debug!(
            "{} {} -> {} in {} ms",
            method,
            url.path(),
            status,
            started.elapsed().as_millis()
        );

        // Some endpoints answer deletes and actions with an empty body.
        let text = if body.trim().is_empty() { "{}" } else { body.as_str() };
        serde_json::from_str::<T>(text).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::Decode {
                message: e.to_string(),
                body: snippet,
            }
        })
    }
}

/// Turns a domain into the API base URL. A value that already carries a
/// scheme is only stripped of trailing slashes and given the `/api/v1` prefix.
pub fn api_base_url(domain: &str) -> String {
    let domain = domain.trim().trim_end_matches('/');
    let base = if domain.starts_with("http://") || domain.starts_with("https://") {
        domain.to_string()
    } else {
        format!("https://{}", domain)
    };
    if base.ends_with("/api/v1") {
        base
    } else {
        format!("{}/api/v1", base)
    }
}

fn build_http(api_key: &str, timeout: Duration) -> Result<reqwest::Client, Error> {
    let mut headers = HeaderMap::new();
    let mut key = HeaderValue::from_str(api_key)
        .map_err(|_| Error::InvalidUrl("API key contains invalid header characters".to_string()))?;
    key.set_sensitive(true);
    headers.insert(API_KEY_HEADER, key);
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    reqwest::Client::builder()
        .user_agent(concat!("bolddesk-rs/", env!("CARGO_PKG_VERSION")))
        .default_headers(headers)
        .timeout(timeout)
        .build()
        .map_err(|e| {
            tracing::error!("Failed to build HTTP client: {}", e);
            Error::Transport(e)
        })
}

fn transport_error(e: reqwest::Error, url: &Url, started: Instant) -> Error {
    if e.is_timeout() {
        let elapsed_ms = started.elapsed().as_millis() as u64;
        tracing::error!("Request to {} timed out after {} ms", url, elapsed_ms);
        Error::Timeout {
            url: url.to_string(),
            elapsed_ms,
        }
    } else {
        tracing::error!("Failed to get resource: {}", e);
        Error::Transport(e)
    }
}

fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_LOGGED_BODY {
        return body.to_string();
    }
    let mut end = MAX_LOGGED_BODY;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}
