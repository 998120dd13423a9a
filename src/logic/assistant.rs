use crate::config::GeminiConfig;
use crate::error::{CarbonError, Result};
use crate::integrations::GeminiClient;

/// Fixed instruction placed in front of every question.
pub const SYSTEM_PREFIX: &str = "You are a friendly sustainability assistant for an \
     Answer in 2–3 short sentences and more points if required, make it use friendly: ";

pub const NOT_CONFIGURED_REPLY: &str = "Gemini API key not configured.";
pub const FALLBACK_REPLY: &str = "Sorry, I couldn't generate a reply.";

/// Single-turn prompt: fixed prefix followed by the user's text.
pub fn build_prompt(question: &str) -> String {
    format!("{}{}", SYSTEM_PREFIX, question)
}

/// Trimmed question, or `EmptyQuestion` when nothing is left.
pub fn validate_question(question: &str) -> Result<&str> {
    let trimmed = question.trim();
    if trimmed.is_empty() {
        Err(CarbonError::EmptyQuestion)
    } else {
        Ok(trimmed)
    }
}

/// Chat front for the sustainability tab.
///
/// Only an empty question is an error; every other failure is turned into
/// a reply string so the conversation can continue.
pub struct SustainabilityAssistant {
    client: Option<GeminiClient>,
}

impl SustainabilityAssistant {
    pub fn new(config: &GeminiConfig) -> Self {
        let client = if config.is_configured() {
            match GeminiClient::new(config.clone()) {
                Ok(client) => Some(client),
                Err(e) => {
                    tracing::warn!("Failed to build Gemini client: {}", e);
                    None
                }
            }
        } else {
            tracing::warn!("Gemini API key not configured - chat replies will be unavailable");
            None
        };

        Self { client }
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    pub fn client(&self) -> Option<&GeminiClient> {
        self.client.as_ref()
    }

    pub async fn ask(&self, question: &str) -> Result<String> {
        let question = validate_question(question)?;

        let client = match &self.client {
            Some(client) => client,
            None => return Ok(NOT_CONFIGURED_REPLY.to_string()),
        };

        let reply = match client.generate(&build_prompt(question)).await {
            Ok(Some(text)) => text,
            Ok(None) => FALLBACK_REPLY.to_string(),
            Err(CarbonError::UpstreamStatus { status, body }) => {
                tracing::error!(status, "Gemini HTTP error: {}", body);
                format!("Gemini HTTP error: {}", body)
            }
            Err(CarbonError::NotConfigured(_)) => NOT_CONFIGURED_REPLY.to_string(),
            Err(e) => {
                tracing::error!("Gemini request error: {}", e);
                format!("Gemini request error: {}", e)
            }
        };

        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> GeminiConfig {
        GeminiConfig {
            api_key: "test-key".into(),
            base_url: server.uri(),
            ..GeminiConfig::default()
        }
    }

    #[test]
    fn prompt_is_prefix_plus_question() {
        let prompt = build_prompt("How do I save power?");
        assert!(prompt.starts_with(SYSTEM_PREFIX));
        assert!(prompt.ends_with("How do I save power?"));
    }

    #[test]
    fn validate_question_trims_and_rejects_blank() {
        assert_eq!(validate_question("  compost?  ").unwrap(), "compost?");
        assert!(matches!(validate_question(""), Err(CarbonError::EmptyQuestion)));
        assert!(matches!(
            validate_question(" \t\n "),
            Err(CarbonError::EmptyQuestion)
        ));
    }

    #[tokio::test]
    async fn whitespace_question_never_reaches_service() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let assistant = SustainabilityAssistant::new(&config_for(&server));
        assert!(matches!(
            assistant.ask("   ").await,
            Err(CarbonError::EmptyQuestion)
        ));
    }

    #[tokio::test]
    async fn missing_key_degrades_to_message() {
        let assistant = SustainabilityAssistant::new(&GeminiConfig::default());
        assert!(!assistant.is_configured());
        assert_eq!(assistant.ask("hello").await.unwrap(), NOT_CONFIGURED_REPLY);
    }

    #[tokio::test]
    async fn sends_trimmed_question_with_prefix() {
        let server = MockServer::start().await;
        let expected = build_prompt("Is cycling better?");
        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "contents": [{ "parts": [{ "text": expected }] }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "content": { "parts": [{ "text": "Yes!" }] } }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let assistant = SustainabilityAssistant::new(&config_for(&server));
        assert_eq!(assistant.ask("  Is cycling better?  ").await.unwrap(), "Yes!");
    }

    #[tokio::test]
    async fn malformed_reply_uses_placeholder() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "error": null })))
            .mount(&server)
            .await;

        let assistant = SustainabilityAssistant::new(&config_for(&server));
        assert_eq!(assistant.ask("hello").await.unwrap(), FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn http_error_becomes_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("backend down"))
            .mount(&server)
            .await;

        let assistant = SustainabilityAssistant::new(&config_for(&server));
        assert_eq!(
            assistant.ask("hello").await.unwrap(),
            "Gemini HTTP error: backend down"
        );
    }

    #[tokio::test]
    async fn unreachable_service_becomes_reply() {
        let assistant = SustainabilityAssistant::new(&GeminiConfig {
            api_key: "test-key".into(),
            base_url: "http://127.0.0.1:9".into(),
            timeout_secs: 2,
            ..GeminiConfig::default()
        });

        let reply = assistant.ask("hello").await.unwrap();
        assert!(reply.starts_with("Gemini request error:"), "got {}", reply);
    }
}
