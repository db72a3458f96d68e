//! Response envelope that keeps the raw body and parses it on demand.
//!
//! The [`Response`] type holds the status, headers and raw body of one HTTP
//! call. The body is only parsed when asked for, so a caller that checks the
//! status alone never sees a parse error.

use crate::classify::Classification;
use crate::error::ErrorResponse;
use crate::transport::RawResponse;
use crate::{Error, Result};
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// The result of one HTTP call to the Degreed API.
///
/// Resource clients only hand back a `Response` after classification has
/// passed, so the status is never a 4xx or 5xx.
///
/// # Examples
///
/// ```no_run
/// use degreed::Client;
///
/// # async fn example() -> Result<(), degreed::Error> {
/// let client = Client::new("someoauthtoken")?;
/// let response = client.courses().all(Some("1234")).await?;
///
/// println!("Status: {}", response.code());
/// println!("Took {:?}", response.latency);
///
/// let body = response.body()?;
/// println!("First title: {}", body["data"][0]["attributes"]["title"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code of the response.
    pub status: StatusCode,

    /// The response headers.
    pub headers: HeaderMap,

    /// The raw response body as a string.
    pub raw_body: String,

    /// Time from dispatch until the transport returned.
    pub latency: Duration,
}

impl Response {
    /// Creates a new `Response`.
    pub fn new(status: StatusCode, headers: HeaderMap, raw_body: String, latency: Duration) -> Self {
        Self {
            status,
            headers,
            raw_body,
            latency,
        }
    }

    /// Builds a `Response` from what a transport returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidStatus`] if the transport reported a status
    /// code outside the valid HTTP range.
    pub fn from_raw(raw: RawResponse, latency: Duration) -> Result<Self> {
        let status = StatusCode::from_u16(raw.status).map_err(|_| Error::InvalidStatus(raw.status))?;
        Ok(Self::new(status, raw.headers, raw.body, latency))
    }

    /// The numeric HTTP status code.
    pub fn code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Returns `true` if the status is 2xx.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Parses the body as JSON.
    ///
    /// A blank or whitespace-only body yields an empty object rather than an
    /// error, so "no content" is distinguishable from malformed content.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeserializationFailed`] if the body is not valid JSON.
    ///
    /// # Examples
    ///
    /// ```
    /// use degreed::Response;
    /// use http::{HeaderMap, StatusCode};
    /// use std::time::Duration;
    ///
    /// let empty = Response::new(StatusCode::NO_CONTENT, HeaderMap::new(), "  ".into(), Duration::ZERO);
    /// assert_eq!(empty.body().unwrap(), serde_json::json!({}));
    ///
    /// let broken = Response::new(StatusCode::OK, HeaderMap::new(), "not json".into(), Duration::ZERO);
    /// assert!(broken.body().is_err());
    /// ```
    pub fn body(&self) -> Result<Value> {
        self.json()
    }

    /// Deserializes the body into `T`. A blank body is read as `{}`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeserializationFailed`] if the body is not valid JSON
    /// or does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        let text = if self.raw_body.trim().is_empty() {
            "{}"
        } else {
            self.raw_body.as_str()
        };

        serde_json::from_str(text).map_err(|e| Error::DeserializationFailed {
            raw_response: self.raw_body.clone(),
            serde_error: e.to_string(),
            status: self.status,
        })
    }

    /// The nested `error.message` field of the body, if the body is JSON and
    /// carries one. Non-string messages are rendered as JSON text.
    pub fn error_message(&self) -> Option<String> {
        match self.body().ok()?.pointer("/error/message")? {
            Value::Null => None,
            Value::String(message) => Some(message.clone()),
            other => Some(other.to_string()),
        }
    }

    /// The `links.next` URL of a list response, if the server supplied one.
    ///
    /// The client never follows it on its own.
    pub fn next_link(&self) -> Option<String> {
        self.body()
            .ok()?
            .pointer("/links/next")?
            .as_str()
            .map(str::to_string)
    }

    /// Returns a reference to a header value by name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// Classifies the status code, returning `self` if it passes or the
    /// matching error otherwise.
    ///
    /// # Errors
    ///
    /// Returns `BadRequest`, `Unauthorized`, `Forbidden`, `ClientError` or
    /// `ServerError` according to [`Classification::of`].
    ///
    /// # Examples
    ///
    /// ```
    /// use degreed::{Error, Response};
    /// use http::{HeaderMap, StatusCode};
    /// use std::time::Duration;
    ///
    /// let response = Response::new(
    ///     StatusCode::UNAUTHORIZED,
    ///     HeaderMap::new(),
    ///     r#"{"error":{"message":"bad token"}}"#.into(),
    ///     Duration::ZERO,
    /// );
    ///
    /// let err = response.raise_on_error().unwrap_err();
    /// assert!(matches!(err, Error::Unauthorized(_)));
    /// assert_eq!(err.to_string(), "HTTP code: 401, message: bad token");
    /// ```
    pub fn raise_on_error(self) -> Result<Self> {
        let classification = Classification::of(self.status);
        if classification.is_pass() {
            return Ok(self);
        }

        let details = ErrorResponse {
            status: self.status,
            message: self.error_message(),
            raw_response: self.raw_body,
        };

        tracing::debug!(
            status = details.status.as_u16(),
            classification = ?classification,
            "Response classified as error"
        );

        Err(classification
            .into_error(details)
            .unwrap_or(Error::InvalidStatus(self.status.as_u16())))
    }
}
