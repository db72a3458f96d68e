//! Request metadata: everything a transport needs to perform one HTTP call.

use crate::{Error, Result};
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use serde::Serialize;
use url::Url;

/// A fully-described HTTP request.
///
/// Built per call by [`Request`](crate::Request) and handed to a
/// [`Transport`](crate::Transport). The URL is always absolute.
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    /// The HTTP method (GET, POST, etc.).
    pub method: Method,

    /// The absolute request URL, query string included.
    pub url: Url,

    /// Headers for this request.
    pub headers: HeaderMap,

    /// The serialized JSON body, if any.
    pub body: Option<String>,
}

impl RequestMetadata {
    /// Creates a new `RequestMetadata` with the given method and URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if `url` is not an absolute URL with a host.
    ///
    /// # Examples
    ///
    /// ```
    /// use degreed::metadata::RequestMetadata;
    /// use http::Method;
    ///
    /// assert!(RequestMetadata::new(Method::GET, "https://api.degreed.com/api/v2").is_ok());
    /// assert!(RequestMetadata::new(Method::GET, "/content/courses").is_err());
    /// ```
    pub fn new(method: Method, url: &str) -> Result<Self> {
        Ok(Self {
            method,
            url: parse_absolute(url)?,
            headers: HeaderMap::new(),
            body: None,
        })
    }

    /// Adds a header to the request.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header value: {}", e)))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Attaches `Authorization: Bearer <token>` when a token is given.
    ///
    /// The header value is marked sensitive so it is redacted from `Debug` output.
    pub fn with_bearer_token(mut self, token: Option<&str>) -> Result<Self> {
        if let Some(token) = token {
            let mut value = HeaderValue::try_from(format!("Bearer {}", token))
                .map_err(|e| Error::ConfigurationError(format!("Invalid token: {}", e)))?;
            value.set_sensitive(true);
            self.headers.insert(AUTHORIZATION, value);
        }
        Ok(self)
    }

    /// Appends URL-encoded query pairs, preserving their order.
    ///
    /// An empty iterator leaves the URL untouched (no dangling `?`).
    pub fn with_query_params<K, V>(mut self, params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut params = params.into_iter().peekable();
        if params.peek().is_some() {
            let mut pairs = self.url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key.as_ref(), value.as_ref());
            }
        }
        self
    }

    /// Serializes `body` as JSON and sets `Content-Type: application/json`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SerializationFailed`] if `body` cannot be serialized.
    pub fn with_json_body<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        let json =
            serde_json::to_string(body).map_err(|e| Error::SerializationFailed(e.to_string()))?;
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.body = Some(json);
        Ok(self)
    }

    /// Returns a header value by name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }
}

fn parse_absolute(url: &str) -> Result<Url> {
    let parsed = Url::parse(url)?;
    if parsed.cannot_be_a_base() || !parsed.has_host() {
        return Err(Error::InvalidUrl(url::ParseError::EmptyHost));
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://api.degreed.com/api/v2/content/courses";

    #[test]
    fn rejects_relative_and_hostless_urls() {
        assert!(matches!(
            RequestMetadata::new(Method::GET, "content/courses"),
            Err(Error::InvalidUrl(_))
        ));
        assert!(matches!(
            RequestMetadata::new(Method::GET, "mailto:someone@example.com"),
            Err(Error::InvalidUrl(_))
        ));
        assert!(matches!(
            RequestMetadata::new(Method::GET, "not a url"),
            Err(Error::InvalidUrl(_))
        ));
    }

    #[test]
    fn empty_query_leaves_url_untouched() {
        let req = RequestMetadata::new(Method::GET, URL)
            .unwrap()
            .with_query_params(Vec::<(String, String)>::new());
        assert_eq!(req.url.as_str(), URL);
        assert_eq!(req.url.query(), None);
    }

    #[test]
    fn query_pairs_are_encoded_in_order() {
        let req = RequestMetadata::new(Method::GET, URL)
            .unwrap()
            .with_query_params([("filter[external_id]", "12 34"), ("page", "2")]);

        let pairs: Vec<(String, String)> = req.url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("filter[external_id]".to_string(), "12 34".to_string()),
                ("page".to_string(), "2".to_string()),
            ]
        );
        assert_eq!(req.url.query(), Some("filter%5Bexternal_id%5D=12+34&page=2"));
    }

    #[test]
    fn bearer_token_is_optional() {
        let req = RequestMetadata::new(Method::GET, URL)
            .unwrap()
            .with_bearer_token(None)
            .unwrap();
        assert!(req.header("authorization").is_none());

        let req = req.with_bearer_token(Some("someoauthtoken")).unwrap();
        assert_eq!(req.header("authorization"), Some("Bearer someoauthtoken"));
        assert!(!format!("{:?}", req.headers).contains("someoauthtoken"));
    }

    #[test]
    fn json_body_sets_content_type() {
        let req = RequestMetadata::new(Method::POST, URL)
            .unwrap()
            .with_json_body(&serde_json::json!({"data": {"type": "content/courses"}}))
            .unwrap();

        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(
            req.body.as_deref(),
            Some(r#"{"data":{"type":"content/courses"}}"#)
        );
    }

    #[test]
    fn invalid_header_is_a_configuration_error() {
        let result = RequestMetadata::new(Method::GET, URL)
            .unwrap()
            .with_header("bad header", "value");
        assert!(matches!(result, Err(Error::ConfigurationError(_))));
    }
}
