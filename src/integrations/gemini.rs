use crate::config::GeminiConfig;
use crate::error::{CarbonError, Result};
use serde::Serialize;
use std::time::Duration;

/// Thin client for the Gemini `generateContent` endpoint.
///
/// Sends exactly one single-turn request per call. Conversation history is
/// never forwarded.
pub struct GeminiClient {
    client: reqwest::Client,
    config: GeminiConfig,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Returns the first candidate's text, or `None` when the response
    /// does not have the expected shape.
    pub async fn generate(&self, prompt: &str) -> Result<Option<String>> {
        if !self.config.is_configured() {
            return Err(CarbonError::NotConfigured("Gemini API key".into()));
        }

        let payload = GenerateRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
        };

        tracing::debug!(model = %self.config.model, "sending generateContent request");

        let response = self
            .client
            .post(self.endpoint())
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(CarbonError::UpstreamStatus { status, body });
        }

        let data: serde_json::Value = response.json().await?;
        let reply = data
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string);

        if reply.is_none() {
            tracing::warn!("Unexpected Gemini response format: {}", data);
        }

        Ok(reply)
    }

    /// Cheap reachability probe used by `carbonwise check`.
    pub async fn test_connection(&self) -> Result<bool> {
        if !self.config.is_configured() {
            return Ok(false);
        }

        let url = format!(
            "{}/models/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        );

        let response = self
            .client
            .get(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .send()
            .await
            .map_err(|e| CarbonError::ServiceUnavailable(format!("Gemini: {}", e)))?;

        Ok(response.status().is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const GENERATE_PATH: &str = "/models/gemini-2.5-flash:generateContent";

    fn config_for(server: &MockServer) -> GeminiConfig {
        GeminiConfig {
            api_key: "test-key".into(),
            base_url: server.uri(),
            ..GeminiConfig::default()
        }
    }

    #[test]
    fn endpoint_joins_base_and_model() {
        let client = GeminiClient::new(GeminiConfig {
            base_url: "https://example.test/v1/".into(),
            ..GeminiConfig::default()
        })
        .unwrap();
        assert_eq!(
            client.endpoint(),
            "https://example.test/v1/models/gemini-2.5-flash:generateContent"
        );
    }

    #[tokio::test]
    async fn generate_returns_first_candidate_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_json(json!({
                "contents": [{ "parts": [{ "text": "hello" }] }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "content": { "parts": [{ "text": "Hi there!" }] } }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GeminiClient::new(config_for(&server)).unwrap();
        let reply = client.generate("hello").await.unwrap();
        assert_eq!(reply.as_deref(), Some("Hi there!"));
    }

    #[tokio::test]
    async fn generate_unexpected_shape_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
            .mount(&server)
            .await;

        let client = GeminiClient::new(config_for(&server)).unwrap();
        assert_eq!(client.generate("hello").await.unwrap(), None);
    }

    #[tokio::test]
    async fn generate_http_error_carries_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(403).set_body_string("API key invalid"))
            .mount(&server)
            .await;

        let client = GeminiClient::new(config_for(&server)).unwrap();
        match client.generate("hello").await {
            Err(CarbonError::UpstreamStatus { status, body }) => {
                assert_eq!(status, 403);
                assert_eq!(body, "API key invalid");
            }
            other => panic!("expected upstream status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn generate_without_key_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = GeminiClient::new(GeminiConfig {
            api_key: String::new(),
            base_url: server.uri(),
            ..GeminiConfig::default()
        })
        .unwrap();

        assert!(matches!(
            client.generate("hello").await,
            Err(CarbonError::NotConfigured(_))
        ));
    }
}
