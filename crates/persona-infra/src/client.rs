//! HttpPersonaClient -- concrete [`PersonaService`] implementation over HTTP.
//!
//! Talks JSON to the persona service:
//! - `POST /api/chat` and `POST /api/extract-memory` for the session controller
//! - `GET /api/memory/{user_id}` and `GET /` for the shell
//!
//! Transport errors, non-2xx statuses, and undecodable bodies each map to a
//! [`ClientError`] variant. No retries.

use std::time::Duration;

use reqwest::Url;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use persona_core::service::PersonaService;
use persona_types::chat::{
    ChatRequest, ChatResponse, ExtractMemoryRequest, ExtractMemoryResponse, MemoryLookup,
    ServiceStatus,
};
use persona_types::config::ClientConfig;
use persona_types::error::ClientError;
use persona_types::memory::StoredMemory;

/// Longest error body kept in [`ClientError::Status`].
const MAX_ERROR_BODY: usize = 512;

pub struct HttpPersonaClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpPersonaClient {
    /// Create a client for the service at `base_url`.
    ///
    /// Trailing slashes are ignored; only `http` and `https` are accepted.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let base_url = parse_base_url(base_url)?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("persona/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, base_url })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        Self::new(
            &config.base_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// The normalized service URL (no trailing slash).
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Accumulated memory the service holds for `user_id`, if any.
    pub async fn stored_memory(&self, user_id: &str) -> Result<Option<StoredMemory>, ClientError> {
        let url = self.url(&["api", "memory", user_id])?;
        let lookup: MemoryLookup = self.get_json(url).await?;
        Ok(lookup.into_stored())
    }

    /// Liveness probe against the service root.
    pub async fn health(&self) -> Result<ServiceStatus, ClientError> {
        let url = self.url(&[])?;
        self.get_json(url).await
    }

    /// Build an endpoint URL, percent-encoding each segment.
    fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| ClientError::InvalidBaseUrl(self.base_url.to_string()))?;
            path.pop_if_empty();
            path.extend(segments);
        }
        Ok(url)
    }

    async fn post_json<B, R>(&self, url: Url, body: &B) -> Result<R, ClientError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        debug!(url = %url, "POST");
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        read_json(response).await
    }

    async fn get_json<R: DeserializeOwned>(&self, url: Url) -> Result<R, ClientError> {
        debug!(url = %url, "GET");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        read_json(response).await
    }
}

impl PersonaService for HttpPersonaClient {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ClientError> {
        let url = self.url(&["api", "chat"])?;
        self.post_json(url, request).await
    }

    async fn extract_memory(
        &self,
        request: &ExtractMemoryRequest,
    ) -> Result<ExtractMemoryResponse, ClientError> {
        let url = self.url(&["api", "extract-memory"])?;
        self.post_json(url, request).await
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ClientError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).map_err(|_| ClientError::InvalidBaseUrl(raw.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ClientError::InvalidBaseUrl(raw.to_string())),
    }
}

async fn read_json<R: DeserializeOwned>(response: reqwest::Response) -> Result<R, ClientError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ClientError::Transport(format!("failed to read response body: {e}")))?;

    if !status.is_success() {
        let mut body = body;
        if body.len() > MAX_ERROR_BODY {
            let cut = (0..=MAX_ERROR_BODY)
                .rev()
                .find(|&i| body.is_char_boundary(i))
                .unwrap_or(0);
            body.truncate(cut);
        }
        return Err(ClientError::Status {
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use persona_types::message::Message;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> HttpPersonaClient {
        HttpPersonaClient::new(&server.uri(), Duration::from_secs(5)).unwrap()
    }

    fn chat_request() -> ChatRequest {
        ChatRequest {
            messages: vec![Message::user("I love hiking")],
            personality: "therapist".to_string(),
            user_id: "default_user".to_string(),
        }
    }

    #[test]
    fn test_base_url_normalization() {
        let client = HttpPersonaClient::new("http://localhost:8000/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(
            client.url(&["api", "chat"]).unwrap().as_str(),
            "http://localhost:8000/api/chat"
        );
    }

    #[test]
    fn test_base_url_with_prefix_path() {
        let client =
            HttpPersonaClient::new("https://example.com/persona/", Duration::from_secs(1)).unwrap();
        assert_eq!(
            client.url(&["api", "extract-memory"]).unwrap().as_str(),
            "https://example.com/persona/api/extract-memory"
        );
    }

    #[test]
    fn test_user_id_is_percent_encoded() {
        let client = HttpPersonaClient::new("http://localhost:8000", Duration::from_secs(1)).unwrap();
        assert_eq!(
            client.url(&["api", "memory", "a b/c"]).unwrap().as_str(),
            "http://localhost:8000/api/memory/a%20b%2Fc"
        );
    }

    #[test]
    fn test_rejects_invalid_base_urls() {
        for raw in ["not a url", "ftp://example.com", ""] {
            let result = HttpPersonaClient::new(raw, Duration::from_secs(1));
            assert!(matches!(result, Err(ClientError::InvalidBaseUrl(_))), "{raw}");
        }
    }

    #[tokio::test]
    async fn test_chat_posts_conversation() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_json(json!({
                "messages": [{"role": "user", "content": "I love hiking"}],
                "personality": "therapist",
                "user_id": "default_user"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "response": "Nice!",
                "personality": "therapist",
                "before_response": "B",
                "after_response": "Nice!",
                "extracted_memory": {"preferences": [{"preference": "hiking"}]}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = client(&server).chat(&chat_request()).await.unwrap();
        assert_eq!(response.response, "Nice!");
        assert_eq!(response.before_response, "B");
        let memory = response.extracted_memory.unwrap();
        assert_eq!(memory.preferences[0].preference, "hiking");
    }

    #[tokio::test]
    async fn test_extract_memory_posts_without_personality() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/extract-memory"))
            .and(body_json(json!({
                "messages": [{"role": "user", "content": "I have a dog"}],
                "user_id": "default_user"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "extracted_memory": {"facts": [{"fact": "has a dog", "importance": "high"}]},
                "total_memory": {"preferences": [], "emotional_patterns": [],
                                 "facts": [{"fact": "has a dog"}], "updated_at": "2024-05-01T09:30:15.5"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let request = ExtractMemoryRequest {
            messages: vec![Message::user("I have a dog")],
            user_id: "default_user".to_string(),
        };
        let response = client(&server).extract_memory(&request).await.unwrap();
        assert_eq!(response.extracted_memory.unwrap().facts[0].fact, "has a dog");
        assert!(response.total_memory.unwrap().updated_at.is_some());
    }

    #[tokio::test]
    async fn test_server_error_maps_to_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(500).set_body_string(r#"{"detail":"model down"}"#))
            .mount(&server)
            .await;

        let err = client(&server).chat(&chat_request()).await.unwrap_err();
        match err {
            ClientError::Status { status, body } => {
                assert_eq!(status, 500);
                assert!(body.contains("model down"));
            }
            other => panic!("expected Status, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_long_error_body_is_truncated() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(502).set_body_string("é".repeat(1000)))
            .mount(&server)
            .await;

        let err = client(&server).chat(&chat_request()).await.unwrap_err();
        let ClientError::Status { body, .. } = err else {
            panic!("expected Status");
        };
        assert!(body.len() <= MAX_ERROR_BODY);
    }

    #[tokio::test]
    async fn test_malformed_body_maps_to_decode() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client(&server).chat(&chat_request()).await.unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_service_maps_to_transport() {
        // Reserve a free port, then release it so nothing is listening there.
        let addr = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let client =
            HttpPersonaClient::new(&format!("http://{addr}"), Duration::from_secs(2)).unwrap();

        let err = client.chat(&chat_request()).await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)), "got {err:?}");

        let err = client.health().await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_stored_memory_found_and_missing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/memory/default_user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "preferences": [{"preference": "hiking"}],
                "emotional_patterns": [],
                "facts": [],
                "updated_at": "2024-05-01T09:30:15.123456"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/memory/nobody"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "No memory found for this user"
            })))
            .mount(&server)
            .await;

        let client = client(&server);
        let stored = client.stored_memory("default_user").await.unwrap().unwrap();
        assert_eq!(stored.memory.preferences[0].preference, "hiking");
        assert!(client.stored_memory("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_health() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "Persona AI API is running"
            })))
            .mount(&server)
            .await;

        let status = client(&server).health().await.unwrap();
        assert_eq!(status.message, "Persona AI API is running");
    }
}
