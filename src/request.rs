//! Verb-level request helpers shared by every resource client.
//!
//! [`Request`] turns a URL plus optional query or body into a
//! [`RequestMetadata`], sends it through a [`Transport`] and classifies the
//! result. A value returned from any of its methods always passed
//! classification; error statuses come back as `Err`.

use crate::metadata::RequestMetadata;
use crate::transport::{HttpTransport, Transport};
use crate::{Response, Result};
use http::Method;
use serde::Serialize;
use std::time::Instant;

/// Issues authenticated GET/POST/PATCH/DELETE calls.
///
/// Holds nothing but the transport and the token, so it can be shared and
/// called concurrently.
#[derive(Clone)]
pub struct Request<T: Transport = HttpTransport> {
    transport: T,
    token: Option<String>,
}

impl<T: Transport> Request<T> {
    /// Creates a request helper that authenticates with `token` when present.
    pub fn new(transport: T, token: Option<String>) -> Self {
        Self { transport, token }
    }

    /// GET `url`, appending `query` as URL-encoded pairs when non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`](crate::Error::InvalidUrl) before sending if
    /// `url` is not absolute, a transport error, or the classification error
    /// for a 4xx/5xx status.
    pub async fn get<K, V>(&self, url: &str, query: impl IntoIterator<Item = (K, V)>) -> Result<Response>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let metadata = self.prepare(Method::GET, url)?.with_query_params(query);
        self.execute(metadata).await
    }

    /// POST `url` with an optional JSON body.
    ///
    /// # Errors
    ///
    /// See [`Request::get`]; serialization failures are raised before sending.
    pub async fn post<B>(&self, url: &str, body: Option<&B>) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        let metadata = self.prepare_with_body(Method::POST, url, body)?;
        self.execute(metadata).await
    }

    /// PATCH `url` with an optional JSON body.
    ///
    /// # Errors
    ///
    /// See [`Request::post`].
    pub async fn patch<B>(&self, url: &str, body: Option<&B>) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        let metadata = self.prepare_with_body(Method::PATCH, url, body)?;
        self.execute(metadata).await
    }

    /// DELETE `url`.
    ///
    /// # Errors
    ///
    /// See [`Request::get`].
    pub async fn delete(&self, url: &str) -> Result<Response> {
        let metadata = self.prepare(Method::DELETE, url)?;
        self.execute(metadata).await
    }

    fn prepare(&self, method: Method, url: &str) -> Result<RequestMetadata> {
        RequestMetadata::new(method, url)?.with_bearer_token(self.token.as_deref())
    }

    fn prepare_with_body<B>(&self, method: Method, url: &str, body: Option<&B>) -> Result<RequestMetadata>
    where
        B: Serialize + ?Sized,
    {
        let metadata = self.prepare(method, url)?;
        match body {
            Some(body) => metadata.with_json_body(body),
            None => Ok(metadata),
        }
    }

    /// Sends one request and classifies the response.
    async fn execute(&self, metadata: RequestMetadata) -> Result<Response> {
        tracing::debug!(
            method = %metadata.method,
            url = %metadata.url,
            has_body = metadata.body.is_some(),
            "Executing HTTP request"
        );

        let start_time = Instant::now();
        let raw = self.transport.send(metadata).await?;
        let latency = start_time.elapsed();

        tracing::debug!(
            status = raw.status,
            latency_ms = latency.as_millis(),
            "Received HTTP response"
        );

        Response::from_raw(raw, latency)?.raise_on_error()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::transport::RawResponse;
    use crate::Error;
    use http::HeaderMap;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    /// In-memory transport that records requests and replies with a canned response.
    #[derive(Clone)]
    pub(crate) struct RecordingTransport {
        pub(crate) requests: Arc<Mutex<Vec<RequestMetadata>>>,
        status: u16,
        body: String,
    }

    impl RecordingTransport {
        pub(crate) fn replying(status: u16, body: &str) -> Self {
            Self {
                requests: Arc::new(Mutex::new(Vec::new())),
                status,
                body: body.to_string(),
            }
        }

        pub(crate) fn sent(&self) -> Vec<RequestMetadata> {
            self.requests.lock().unwrap().clone()
        }

        pub(crate) fn last(&self) -> RequestMetadata {
            self.sent().pop().expect("no request was sent")
        }
    }

    impl Transport for RecordingTransport {
        async fn send(&self, request: RequestMetadata) -> Result<RawResponse> {
            self.requests.lock().unwrap().push(request);
            Ok(RawResponse {
                status: self.status,
                headers: HeaderMap::new(),
                body: self.body.clone(),
            })
        }
    }

    const URL: &str = "https://api.degreed.com/api/v2/content/courses";

    fn request(transport: &RecordingTransport, token: Option<&str>) -> Request<RecordingTransport> {
        Request::new(transport.clone(), token.map(str::to_string))
    }

    #[tokio::test]
    async fn get_sends_token_and_query() {
        let transport = RecordingTransport::replying(200, r#"{"data":[]}"#);
        let response = request(&transport, Some("someoauthtoken"))
            .get(URL, [("filter[external_id]", "1234")])
            .await
            .unwrap();

        assert_eq!(response.code(), 200);
        let sent = transport.last();
        assert_eq!(sent.method, Method::GET);
        assert_eq!(sent.header("authorization"), Some("Bearer someoauthtoken"));
        assert_eq!(
            sent.url.as_str(),
            "https://api.degreed.com/api/v2/content/courses?filter%5Bexternal_id%5D=1234"
        );
        assert!(sent.body.is_none());
    }

    #[tokio::test]
    async fn get_without_token_sends_no_authorization() {
        let transport = RecordingTransport::replying(200, "{}");
        request(&transport, None)
            .get(URL, Vec::<(String, String)>::new())
            .await
            .unwrap();

        let sent = transport.last();
        assert!(sent.header("authorization").is_none());
        assert_eq!(sent.url.query(), None);
    }

    #[tokio::test]
    async fn post_serializes_body_as_json() {
        let transport = RecordingTransport::replying(201, "{}");
        let body = json!({"data": {"type": "content/courses", "attributes": {"title": "x"}}});
        request(&transport, Some("t"))
            .post(URL, Some(&body))
            .await
            .unwrap();

        let sent = transport.last();
        assert_eq!(sent.method, Method::POST);
        assert_eq!(sent.header("content-type"), Some("application/json"));
        let sent_body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(sent_body, body);
    }

    #[tokio::test]
    async fn patch_without_body_sends_nothing() {
        let transport = RecordingTransport::replying(200, "");
        request(&transport, Some("t"))
            .patch(URL, None::<&serde_json::Value>)
            .await
            .unwrap();

        let sent = transport.last();
        assert_eq!(sent.method, Method::PATCH);
        assert!(sent.body.is_none());
        assert!(sent.header("content-type").is_none());
        assert_eq!(sent.header("authorization"), Some("Bearer t"));
    }

    #[tokio::test]
    async fn delete_sends_one_request() {
        let transport = RecordingTransport::replying(204, "");
        let response = request(&transport, Some("t")).delete(URL).await.unwrap();

        assert_eq!(response.code(), 204);
        assert_eq!(transport.sent().len(), 1);
        assert_eq!(transport.last().method, Method::DELETE);
    }

    #[tokio::test]
    async fn invalid_url_fails_before_sending() {
        let transport = RecordingTransport::replying(200, "{}");
        let result = request(&transport, Some("t")).delete("/content/courses/foo").await;

        assert!(matches!(result, Err(Error::InvalidUrl(_))));
        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn error_status_is_raised_not_returned() {
        let transport = RecordingTransport::replying(401, r#"{"error":{"message":"bad token"}}"#);
        let err = request(&transport, Some("t"))
            .get(URL, Vec::<(String, String)>::new())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Unauthorized(_)));
        assert_eq!(err.to_string(), "HTTP code: 401, message: bad token");
        assert_eq!(transport.sent().len(), 1);
    }

    #[tokio::test]
    async fn server_error_is_not_retried() {
        let transport = RecordingTransport::replying(503, "");
        let err = request(&transport, Some("t")).delete(URL).await.unwrap_err();

        assert!(err.is_server_error());
        assert_eq!(transport.sent().len(), 1);
    }
}
