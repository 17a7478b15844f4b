//! Main ShowsClient

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use reqwest::Client;
use reqwest::Method;
use reqwest::RequestBuilder;

use crate::error::ApiError;

/// Client for the shows and purchases API.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across threads safely.
///
/// # Example
///
/// ```ignore
/// use showtix_lib::ShowsClient;
///
/// let client = ShowsClient::builder()
///     .url("https://localhost:7145/api/shows")
///     .timeout(Duration::from_secs(30))
///     .build()?;
///
/// let shows = client.list_shows().await?;
/// ```
#[derive(Clone)]
pub struct ShowsClient {
    inner: Arc<ShowsClientInner>,
}

struct ShowsClientInner {
    base_url: String,
    http_client: Client,
    timeout: Option<Duration>,
}

impl ShowsClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> ShowsClientBuilder<Missing> {
        ShowsClientBuilder::new()
    }

    /// Returns the shows endpoint this client talks to.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Joins path segments onto the shows endpoint.
    pub(crate) fn endpoint(&self, segment: Option<&str>) -> String {
        let base = self.inner.base_url.trim_end_matches('/');
        match segment {
            Some(segment) => format!("{}/{}", base, segment),
            None => base.to_string(),
        }
    }

    /// Starts a request with the configured per-request timeout applied.
    pub(crate) fn request(&self, method: Method, url: &str) -> RequestBuilder {
        debug!("{} {}", method, url);
        let mut request = self.inner.http_client.request(method, url);
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }
        request
    }

    /// Sends a request, mapping transport failures to [`ApiError`].
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, ApiError> {
        request.send().await.map_err(|e| self.transport_error(e))
    }

    /// Classifies a reqwest failure, keeping timeouts distinct.
    pub(crate) fn transport_error(&self, error: reqwest::Error) -> ApiError {
        match (error.is_timeout(), self.inner.timeout) {
            (true, Some(timeout)) => ApiError::Timeout(timeout),
            _ => ApiError::Network(error),
        }
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`ShowsClient`].
///
/// Uses the typestate pattern to ensure the URL is set at compile time.
///
/// # Example
///
/// ```ignore
/// let client = ShowsClient::builder()
///     .url("https://localhost:7145/api/shows")
///     .timeout(Duration::from_secs(30))
///     .connect_timeout(Duration::from_secs(5))
///     .build()?;
/// ```
pub struct ShowsClientBuilder<Url> {
    url: Url,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl ShowsClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }

    /// Sets the shows endpoint URL, e.g. `https://host/api/shows`.
    pub fn url(self, url: impl Into<String>) -> ShowsClientBuilder<Set<String>> {
        ShowsClientBuilder {
            url: Set(url.into()),
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl Default for ShowsClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> ShowsClientBuilder<U> {
    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl ShowsClientBuilder<Set<String>> {
    /// Builds the [`ShowsClient`].
    ///
    /// Fails if the URL is not an absolute http(s) URL or the HTTP client
    /// cannot be created.
    pub fn build(self) -> Result<ShowsClient, ApiError> {
        let base_url = self.url.0;
        match url::Url::parse(&base_url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            _ => return Err(ApiError::InvalidUrl(base_url)),
        }

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build()?
            }
        };

        Ok(ShowsClient {
            inner: Arc::new(ShowsClientInner {
                base_url,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}
