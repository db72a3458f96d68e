//! The entry point: a token, a configuration and a transport.
//!
//! [`Client`] holds no per-call state; each resource accessor returns a fresh
//! resource client bound to the same token and base URL. Use
//! [`ClientBuilder`] to configure one.

use crate::config::Config;
use crate::content::Courses;
use crate::request::Request;
use crate::transport::{HttpTransport, HttpTransportBuilder, Transport};
use crate::Result;
use std::fmt;
use std::time::Duration;

/// Environment variable read by [`Client::from_env`].
pub const TOKEN_ENV: &str = "DEGREED_TOKEN";

/// Client for the Degreed API.
///
/// Cheap to clone and safe to share between tasks.
///
/// # Examples
///
/// ```no_run
/// use degreed::Client;
///
/// # async fn example() -> Result<(), degreed::Error> {
/// let client = Client::new("someoauthtoken")?;
///
/// let response = client.courses().all(Some("1234")).await?;
/// println!("Courses: {}", response.body()?);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client<T: Transport = HttpTransport> {
    token: Option<String>,
    config: Config,
    transport: T,
}

impl Client {
    /// Creates a client for the production API authenticating with `token`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP transport cannot be built.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::builder().token(token).build()
    }

    /// Creates a new `ClientBuilder` for configuring a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Builds a client from `DEGREED_TOKEN` and `DEGREED_BASE_URL`.
    ///
    /// A missing token yields an unauthenticated client.
    ///
    /// # Errors
    ///
    /// Returns an error if `DEGREED_BASE_URL` is unusable or the transport
    /// cannot be built.
    pub fn from_env() -> Result<Self> {
        let mut builder = Self::builder().config(Config::from_env()?);
        if let Ok(token) = std::env::var(TOKEN_ENV) {
            if !token.trim().is_empty() {
                builder = builder.token(token.trim());
            }
        }
        builder.build()
    }
}

impl<T: Transport> Client<T> {
    /// Creates a client over a caller-supplied transport.
    pub fn with_transport(token: Option<String>, config: Config, transport: T) -> Self {
        Self {
            token,
            config,
            transport,
        }
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Access the courses client.
    pub fn courses(&self) -> Courses<T> {
        Courses::new(self.request(), self.config.clone())
    }

    /// A verb-level request helper carrying this client's token, for
    /// endpoints without a dedicated resource client.
    pub fn request(&self) -> Request<T> {
        Request::new(self.transport.clone(), self.token.clone())
    }
}

impl<T: Transport> fmt::Debug for Client<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Builder for configuring and creating a [`Client`].
///
/// # Examples
///
/// ```no_run
/// use degreed::ClientBuilder;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), degreed::Error> {
/// let client = ClientBuilder::new()
///     .token("someoauthtoken")
///     .base_url("https://api.betatest.degreed.com/api/v2")?
///     .timeout(Duration::from_secs(30))
///     .default_header("User-Agent", "my-app/1.0")?
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ClientBuilder {
    token: Option<String>,
    config: Config,
    transport: HttpTransportBuilder,
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the bearer token sent with every request.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the API root.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        self.config = Config::new(url)?;
        Ok(self)
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Adds a default header that will be included in all requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        self.transport = self.transport.default_header(name, value)?;
        Ok(self)
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.transport = self.transport.timeout(timeout);
        self
    }

    /// Builds the configured `Client`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP transport cannot be built.
    pub fn build(self) -> Result<Client> {
        Ok(Client::with_transport(
            self.token,
            self.config,
            self.transport.build()?,
        ))
    }
}
