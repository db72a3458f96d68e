//! Client configuration.

use crate::{Error, Result};
use url::Url;

/// The production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.degreed.com/api/v2";

/// Environment variable read by [`Config::from_env`].
pub const BASE_URL_ENV: &str = "DEGREED_BASE_URL";

/// Where the API lives.
///
/// Passed explicitly to [`Client`](crate::Client); nothing in the library
/// reads or mutates a global.
///
/// # Examples
///
/// ```
/// use degreed::Config;
///
/// let config = Config::default();
/// assert_eq!(config.base_url(), "https://api.degreed.com/api/v2");
///
/// let staging = Config::new("https://api.betatest.degreed.com/api/v2/").unwrap();
/// assert_eq!(staging.base_url(), "https://api.betatest.degreed.com/api/v2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    base_url: String,
}

impl Config {
    /// Creates a configuration rooted at `base_url`. A trailing slash is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if `base_url` does not parse, or
    /// [`Error::ConfigurationError`] if it is not an http(s) URL with a host.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let parsed = Url::parse(base_url.as_ref())?;
        if !matches!(parsed.scheme(), "http" | "https") || !parsed.has_host() {
            return Err(Error::ConfigurationError(format!(
                "Base URL must be an http(s) URL with a host: {}",
                base_url.as_ref()
            )));
        }
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(Error::ConfigurationError(format!(
                "Base URL must not carry a query or fragment: {}",
                base_url.as_ref()
            )));
        }

        Ok(Self {
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    /// Reads the base URL from `DEGREED_BASE_URL`, falling back to
    /// [`DEFAULT_BASE_URL`] when unset or empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is set to an unusable URL.
    pub fn from_env() -> Result<Self> {
        match std::env::var(BASE_URL_ENV) {
            Ok(value) if !value.trim().is_empty() => Self::new(value.trim()),
            _ => Ok(Self::default()),
        }
    }

    /// The API root, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins a collection path such as `content/courses` onto the base URL.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}
