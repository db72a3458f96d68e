//! Error types for Degreed API calls.
//!
//! Every failure the library can produce is a variant of [`Error`], so callers can
//! match broadly (`Err(e)`) or narrowly (`Err(Error::Unauthorized(_))`). Errors fall
//! into four groups:
//!
//! - validation failures raised before any network call ([`Error::is_validation`]),
//! - HTTP status failures produced by classifying a response ([`Error::status`]),
//! - body parse failures raised when reading a response body,
//! - transport failures (network, timeout).

use http::StatusCode;
use std::fmt;

/// The details of a response that was classified as an error.
///
/// Its `Display` output is `HTTP code: <code>, message: <message>`, where the
/// message is the nested `error.message` field of the response body. When the
/// body carries no such field the message renders empty.
///
/// Tooling may pattern-match on this text, so the format is stable.
#[derive(Debug, Clone)]
pub struct ErrorResponse {
    /// The HTTP status code of the response.
    pub status: StatusCode,
    /// The `error.message` field of the body, if present.
    pub message: Option<String>,
    /// The raw response body.
    pub raw_response: String,
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HTTP code: {}, message: {}",
            self.status.as_u16(),
            self.message.as_deref().unwrap_or_default()
        )
    }
}

/// The main error type for Degreed API calls.
///
/// # Examples
///
/// ```no_run
/// use degreed::{Client, Error};
///
/// # async fn example() -> Result<(), Error> {
/// let client = Client::new("someoauthtoken")?;
///
/// match client.courses().all(None).await {
///     Ok(response) => println!("Courses: {}", response.body()?),
///     Err(Error::Unauthorized(details)) => {
///         eprintln!("Token rejected ({}), re-authenticate", details);
///     }
///     Err(e) if e.is_server_error() => eprintln!("Degreed is having trouble: {}", e),
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A required parameter was not supplied.
    ///
    /// Raised before any request is sent.
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    /// A parameter declared as an integer could not be converted strictly.
    ///
    /// Raised before any request is sent.
    #[error("Invalid integer for {field}: {value:?}")]
    InvalidInteger {
        /// The parameter name
        field: &'static str,
        /// The rejected input
        value: String,
    },

    /// An invalid URL was provided.
    ///
    /// Raised before any request is sent.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Invalid configuration was provided, such as a header value that is not
    /// valid HTTP or a base URL that cannot carry a path.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Failed to serialize the request body.
    #[error("Failed to serialize request: {0}")]
    SerializationFailed(String),

    /// The response body is present but is not valid JSON (or does not match the
    /// requested type).
    ///
    /// Only raised when the body is read, never by the call itself.
    #[error("Failed to deserialize response (status {status}): {serde_error}")]
    DeserializationFailed {
        /// The raw response body that failed to deserialize
        raw_response: String,
        /// The serde error message
        serde_error: String,
        /// The HTTP status code
        status: StatusCode,
    },

    /// The server returned 400 Bad Request.
    #[error("{0}")]
    BadRequest(ErrorResponse),

    /// The server returned 401 Unauthorized.
    ///
    /// Usually means the token expired or was revoked.
    #[error("{0}")]
    Unauthorized(ErrorResponse),

    /// The server returned 403 Forbidden.
    #[error("{0}")]
    Forbidden(ErrorResponse),

    /// The server returned any other 4xx status.
    #[error("{0}")]
    ClientError(ErrorResponse),

    /// The server returned a 5xx status.
    #[error("{0}")]
    ServerError(ErrorResponse),

    /// A network-level error occurred (connection failed, DNS lookup failed, etc.).
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The request timed out.
    ///
    /// Timeouts are configured on the transport, not per call.
    #[error("Request timed out")]
    Timeout,

    /// The transport reported a status code that is not a valid HTTP status.
    #[error("Invalid HTTP status code from transport: {0}")]
    InvalidStatus(u16),
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Error::Timeout
        } else {
            Error::Network(error)
        }
    }
}

impl Error {
    /// Returns the response details for errors produced by status classification.
    pub fn response(&self) -> Option<&ErrorResponse> {
        match self {
            Error::BadRequest(r)
            | Error::Unauthorized(r)
            | Error::Forbidden(r)
            | Error::ClientError(r)
            | Error::ServerError(r) => Some(r),
            _ => None,
        }
    }

    /// Returns the HTTP status code if this error has one.
    ///
    /// Returns `Some(status)` for classified HTTP errors and `DeserializationFailed`,
    /// `None` for other error types.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::DeserializationFailed { status, .. } => Some(*status),
            _ => self.response().map(|r| r.status),
        }
    }

    /// Returns the raw response body if this error has one.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Error::DeserializationFailed { raw_response, .. } => Some(raw_response),
            _ => self.response().map(|r| r.raw_response.as_str()),
        }
    }

    /// Returns the server-supplied `error.message`, if any.
    pub fn message(&self) -> Option<&str> {
        self.response()?.message.as_deref()
    }

    /// Returns `true` for any 4xx classification, including the specific
    /// `BadRequest`, `Unauthorized` and `Forbidden` kinds.
    ///
    /// # Examples
    ///
    /// ```
    /// use degreed::{Error, ErrorResponse};
    /// use http::StatusCode;
    ///
    /// let err = Error::Forbidden(ErrorResponse {
    ///     status: StatusCode::FORBIDDEN,
    ///     message: None,
    ///     raw_response: String::new(),
    /// });
    ///
    /// assert!(err.is_client_error());
    /// assert!(!err.is_server_error());
    /// assert_eq!(err.to_string(), "HTTP code: 403, message: ");
    /// ```
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::BadRequest(_) | Error::Unauthorized(_) | Error::Forbidden(_) | Error::ClientError(_)
        )
    }

    /// Returns `true` for 5xx classifications.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Error::ServerError(_))
    }

    /// Returns `true` for errors raised while validating input, before any
    /// request reached the transport.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::MissingParameter(_)
                | Error::InvalidInteger { .. }
                | Error::InvalidUrl(_)
                | Error::SerializationFailed(_)
        )
    }
}

/// A specialized `Result` type for Degreed API calls.
///
/// This is a convenience alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
