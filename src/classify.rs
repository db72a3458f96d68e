//! Status code classification.
//!
//! Whether a response is an error, and which kind, depends on the status code
//! alone. Every resource client shares this one table.

use crate::error::{Error, ErrorResponse};
use http::StatusCode;

/// The outcome of classifying an HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Not an error. Covers 2xx as well as 1xx and 3xx, which are passed through.
    Pass,
    /// 400
    BadRequest,
    /// 401
    Unauthorized,
    /// 403
    Forbidden,
    /// Any other 4xx.
    ClientError,
    /// Any 5xx.
    ServerError,
}

impl Classification {
    /// Classifies a status code. First match wins:
    ///
    /// | status | classification |
    /// |---|---|
    /// | 400 | `BadRequest` |
    /// | 401 | `Unauthorized` |
    /// | 403 | `Forbidden` |
    /// | 400..500 | `ClientError` |
    /// | 500..600 | `ServerError` |
    /// | otherwise | `Pass` |
    ///
    /// # Examples
    ///
    /// ```
    /// use degreed::Classification;
    /// use http::StatusCode;
    ///
    /// assert_eq!(Classification::of(StatusCode::CREATED), Classification::Pass);
    /// assert_eq!(Classification::of(StatusCode::FOUND), Classification::Pass);
    /// assert_eq!(Classification::of(StatusCode::NOT_FOUND), Classification::ClientError);
    /// assert_eq!(Classification::of(StatusCode::BAD_GATEWAY), Classification::ServerError);
    /// ```
    pub fn of(status: StatusCode) -> Self {
        match status.as_u16() {
            400 => Classification::BadRequest,
            401 => Classification::Unauthorized,
            403 => Classification::Forbidden,
            400..=499 => Classification::ClientError,
            500..=599 => Classification::ServerError,
            _ => Classification::Pass,
        }
    }

    /// Returns `true` if this classification does not raise.
    pub fn is_pass(self) -> bool {
        self == Classification::Pass
    }

    /// Wraps response details in the error variant for this classification.
    ///
    /// Returns `None` for [`Classification::Pass`].
    pub fn into_error(self, details: ErrorResponse) -> Option<Error> {
        match self {
            Classification::Pass => None,
            Classification::BadRequest => Some(Error::BadRequest(details)),
            Classification::Unauthorized => Some(Error::Unauthorized(details)),
            Classification::Forbidden => Some(Error::Forbidden(details)),
            Classification::ClientError => Some(Error::ClientError(details)),
            Classification::ServerError => Some(Error::ServerError(details)),
        }
    }
}
