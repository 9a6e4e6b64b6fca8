use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client as HttpClient, Method, RequestBuilder};
use serde::Serialize;
use serde_json::Value;

use crate::envelope::{LogNotifier, NoopSession, Notifier, SessionSink, normalize};
use crate::error::ApiError;
use crate::message::{ChatInput, ChatRequest};
use crate::stream::{CancelHandle, ChatStream, open};

pub type ApiResult<T> = Result<T, ApiError>;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Connection settings for [`ApiClient`].
pub struct ClientConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// HTTP client for the platform API: envelope-normalized CRUD requests plus
/// the streamed chat session.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    http: HttpClient,
    // The streaming endpoint carries no deadline; a session ends on the
    // sentinel, transport close, or cancellation.
    stream_http: HttpClient,
    notifier: Arc<dyn Notifier>,
    session: Arc<dyn SessionSink>,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        let http = HttpClient::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ApiError::transport)?;

        Ok(Self {
            base_url: normalize_base_url(&config.base_url),
            token: config.token,
            http,
            stream_http: HttpClient::new(),
            notifier: Arc::new(LogNotifier),
            session: Arc::new(NoopSession),
        })
    }

    /// Replace the default log-only notifier with a host-provided one.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Wire the session teardown invoked on application code 401.
    pub fn with_session_sink(mut self, session: Arc<dyn SessionSink>) -> Self {
        self.session = session;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get(&self, path: &str) -> ApiResult<Value> {
        self.send(self.request(Method::GET, path)).await
    }

    pub async fn get_query<Q: Serialize + ?Sized>(&self, path: &str, query: &Q) -> ApiResult<Value> {
        self.send(self.request(Method::GET, path).query(query)).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<Value> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    /// POST with query parameters and an empty body, for endpoints that take
    /// their arguments in the query string.
    pub async fn post_query<Q: Serialize + ?Sized>(&self, path: &str, query: &Q) -> ApiResult<Value> {
        self.send(self.request(Method::POST, path).query(query)).await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<Value> {
        self.send(self.request(Method::PUT, path).json(body)).await
    }

    pub async fn delete(&self, path: &str) -> ApiResult<Value> {
        self.send(self.request(Method::DELETE, path)).await
    }

    /// Non-streamed chat completion.
    pub async fn chat(&self, input: impl Into<ChatInput>) -> ApiResult<Value> {
        self.chat_request(ChatRequest::new(input)).await
    }

    /// Non-streamed chat with an explicit request (web search, etc.).
    pub async fn chat_request(&self, request: ChatRequest) -> ApiResult<Value> {
        self.post("/aigc/chat", &request).await
    }

    /// Streamed chat. The stream is single-pass; the handle cancels it.
    pub fn chat_stream(&self, input: impl Into<ChatInput>) -> (ChatStream, CancelHandle) {
        self.chat_stream_request(ChatRequest::new(input))
    }

    pub fn chat_stream_request(&self, request: ChatRequest) -> (ChatStream, CancelHandle) {
        let url = format!("{}/aigc/chat/stream", self.base_url);
        open(
            self.stream_http.clone(),
            url,
            self.token.clone(),
            request,
            Arc::clone(&self.notifier),
        )
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("{method} {url}");
        let mut builder = self.http.request(method, url);
        if let Some(token) = &self.token {
            builder = builder.header("token", token);
        }
        builder
    }

    async fn send(&self, builder: RequestBuilder) -> ApiResult<Value> {
        let response = match builder.send().await {
            Ok(response) => response,
            Err(err) => {
                let err = ApiError::transport(err);
                self.notifier.error(&err.to_string());
                return Err(err);
            }
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(err) => {
                let err = ApiError::transport(err);
                self.notifier.error(&err.to_string());
                return Err(err);
            }
        };

        // Non-JSON bodies go through normalization as plain text.
        let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
        normalize(status, body, self.notifier.as_ref(), self.session.as_ref())
    }
}

fn normalize_base_url(value: &str) -> String {
    value.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new(ClientConfig::new("http://localhost:8000/")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }
}
