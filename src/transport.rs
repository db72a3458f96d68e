//! The HTTP transport seam.
//!
//! A [`Transport`] performs exactly one HTTP round trip and reports the status,
//! headers and body. It must not fail on non-2xx statuses: deciding what a
//! status means is the job of [`Classification`](crate::Classification).
//!
//! [`HttpTransport`] is the default implementation, built on `reqwest`.

use crate::metadata::RequestMetadata;
use crate::{Error, Result};
use http::{HeaderMap, HeaderName, HeaderValue};
use std::future::Future;
use std::time::Duration;

/// What a transport returns for one HTTP call.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// The numeric status code as received.
    pub status: u16,
    /// The response headers.
    pub headers: HeaderMap,
    /// The response body as text.
    pub body: String,
}

/// Performs a single HTTP request.
///
/// Implementations make one attempt, never retry, and return non-2xx
/// responses as data. Cancellation and timeouts are the implementation's
/// concern; dropping the returned future must not trigger a retry.
///
/// # Examples
///
/// ```
/// use degreed::metadata::RequestMetadata;
/// use degreed::{RawResponse, Result, Transport};
/// use http::HeaderMap;
///
/// #[derive(Clone)]
/// struct AlwaysNoContent;
///
/// impl Transport for AlwaysNoContent {
///     async fn send(&self, _request: RequestMetadata) -> Result<RawResponse> {
///         Ok(RawResponse { status: 204, headers: HeaderMap::new(), body: String::new() })
///     }
/// }
/// ```
pub trait Transport: Clone + Send + Sync + 'static {
    /// Sends `request` and returns what the server answered.
    fn send(&self, request: RequestMetadata) -> impl Future<Output = Result<RawResponse>> + Send;
}

/// A [`Transport`] backed by a pooled `reqwest::Client`.
///
/// Redirects are not followed: a 3xx comes back to the caller as-is, so one
/// call is always one request.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http_client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Creates a new `HttpTransportBuilder` for configuring a transport.
    pub fn builder() -> HttpTransportBuilder {
        HttpTransportBuilder::new()
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: RequestMetadata) -> Result<RawResponse> {
        let mut builder = self
            .http_client
            .request(request.method, request.url)
            .headers(request.headers);

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.text().await?;

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

/// Builder for configuring and creating an [`HttpTransport`].
///
/// # Examples
///
/// ```no_run
/// use degreed::HttpTransport;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), degreed::Error> {
/// let transport = HttpTransport::builder()
///     .timeout(Duration::from_secs(30))
///     .default_header("User-Agent", "my-app/1.0")?
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct HttpTransportBuilder {
    default_headers: HeaderMap,
    timeout: Option<Duration>,
}

impl HttpTransportBuilder {
    /// Creates a new `HttpTransportBuilder` with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a default header that will be included in all requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header value: {}", e)))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the configured `HttpTransport`.
    ///
    /// # Errors
    ///
    /// Returns an error if the reqwest client cannot be built.
    pub fn build(self) -> Result<HttpTransport> {
        let mut builder = reqwest::Client::builder()
            .default_headers(self.default_headers)
            .redirect(reqwest::redirect::Policy::none());
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let http_client = builder.build().map_err(|e| {
            Error::ConfigurationError(format!("Failed to build HTTP client: {}", e))
        })?;

        Ok(HttpTransport { http_client })
    }
}
