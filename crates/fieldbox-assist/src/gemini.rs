//! Gemini inference backend implementation.
//!
//! Talks to a Gemini-compatible `generateContent` REST endpoint. Chat calls
//! carry a system instruction; grounded-explanation calls additionally
//! enable the Google Search tool and surface the grounding citations.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use fieldbox_core::{
    defaults, ChatBackend, Citation, Error, GroundedReply, GroundedSearchBackend, Result,
};

/// Configuration for a [`GeminiBackend`].
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Base URL of the Gemini API.
    pub base_url: String,
    /// API key sent as the `x-goog-api-key` header. May be empty in test
    /// setups pointing at a local stub.
    pub api_key: String,
    /// Generation model slug.
    pub model: String,
    /// Sampling temperature for all calls.
    pub temperature: f64,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::GEMINI_BASE_URL.to_string(),
            api_key: String::new(),
            model: defaults::GEN_MODEL.to_string(),
            temperature: defaults::GEN_TEMPERATURE,
            timeout_secs: defaults::GEN_TIMEOUT_SECS,
        }
    }
}

impl GeminiConfig {
    /// Build a config from environment variables, falling back to defaults.
    ///
    /// Recognized: `GEMINI_API_KEY`, `GEMINI_BASE_URL`, `GEMINI_MODEL`,
    /// `FIELDBOX_GEN_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| defaults::GEMINI_BASE_URL.to_string());
        let api_key = std::env::var("GEMINI_API_KEY").unwrap_or_default();
        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| defaults::GEN_MODEL.to_string());
        let timeout_secs = std::env::var("FIELDBOX_GEN_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults::GEN_TIMEOUT_SECS);

        if api_key.is_empty() {
            warn!(
                subsystem = "assist",
                component = "gemini",
                "GEMINI_API_KEY is not set; model calls will be rejected upstream"
            );
        }

        Self {
            base_url,
            api_key,
            model,
            temperature: defaults::GEN_TEMPERATURE,
            timeout_secs,
        }
    }
}

/// Gemini inference backend.
pub struct GeminiBackend {
    client: Client,
    config: GeminiConfig,
}

impl GeminiBackend {
    /// Create a backend for `config`.
    pub fn new(config: GeminiConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");
        Self { client, config }
    }

    /// Create from environment variables.
    pub fn from_env() -> Self {
        Self::new(GeminiConfig::from_env())
    }

    /// Issue one `generateContent` call and return the parsed response.
    async fn generate_content(
        &self,
        system: Option<&str>,
        prompt: &str,
        grounded: bool,
    ) -> Result<GenerateContentResponse> {
        let start = Instant::now();

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            system_instruction: system.map(|text| Content {
                role: None,
                parts: vec![Part {
                    text: text.to_string(),
                }],
            }),
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
            },
            tools: grounded.then(|| vec![Tool::google_search()]),
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Inference(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Inference(format!(
                "Gemini returned {}: {}",
                status, body
            )));
        }

        let result: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| Error::Inference(format!("Failed to parse response: {}", e)))?;

        debug!(
            subsystem = "assist",
            component = "gemini",
            model = %self.config.model,
            grounded,
            prompt_len = prompt.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Generation complete"
        );
        Ok(result)
    }
}

#[async_trait]
impl ChatBackend for GeminiBackend {
    async fn generate_with_system(&self, system: &str, message: &str) -> Result<String> {
        let response = self.generate_content(Some(system), message, false).await?;
        Ok(response.primary_text().unwrap_or_default())
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

#[async_trait]
impl GroundedSearchBackend for GeminiBackend {
    async fn generate_grounded(&self, prompt: &str) -> Result<GroundedReply> {
        let response = self.generate_content(None, prompt, true).await?;
        Ok(GroundedReply {
            text: response.primary_text(),
            citations: response.grounding_citations(),
        })
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    generation_config: GenerationConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Tool>>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f64,
}

/// Tool declaration enabling Google Search grounding.
#[derive(Serialize)]
struct Tool {
    google_search: serde_json::Value,
}

impl Tool {
    fn google_search() -> Self {
        Self {
            google_search: serde_json::json!({}),
        }
    }
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Deserialize)]
struct GroundingChunk {
    web: Option<WebSource>,
}

#[derive(Deserialize)]
struct WebSource {
    uri: String,
    title: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, `None` when the model
    /// produced no usable text.
    fn primary_text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("");
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Raw web grounding citations of the first candidate, in wire order.
    fn grounding_citations(&self) -> Vec<Citation> {
        self.candidates
            .first()
            .and_then(|c| c.grounding_metadata.as_ref())
            .map(|m| {
                m.grounding_chunks
                    .iter()
                    .filter_map(|chunk| {
                        chunk.web.as_ref().map(|web| Citation {
                            title: web.title.clone(),
                            uri: web.uri.clone(),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn backend_for(server: &MockServer) -> GeminiBackend {
        GeminiBackend::new(GeminiConfig {
            base_url: server.uri(),
            api_key: "test-key".to_string(),
            model: "gemini-2.5-flash".to_string(),
            temperature: 0.3,
            timeout_secs: 5,
        })
    }

    #[tokio::test]
    async fn chat_sends_system_instruction_and_parses_text() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_partial_json(json!({
                "systemInstruction": {"parts": [{"text": "framing"}]},
                "generationConfig": {"temperature": 0.3}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": {"role": "model", "parts": [{"text": "こちらの手順書をご確認ください。"}]}
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let backend = backend_for(&server);
        let reply = backend
            .generate_with_system("framing", "HDDの交換手順は？")
            .await
            .unwrap();
        assert_eq!(reply, "こちらの手順書をご確認ください。");
    }

    #[tokio::test]
    async fn chat_with_no_candidates_yields_empty_text() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let backend = backend_for(&server);
        let reply = backend.generate_with_system("framing", "質問").await.unwrap();
        assert!(reply.is_empty());
    }

    #[tokio::test]
    async fn grounded_call_enables_search_tool_and_parses_citations() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "tools": [{"google_search": {}}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": {"role": "model", "parts": [{"text": "vPCとは…"}]},
                    "groundingMetadata": {
                        "groundingChunks": [
                            {"web": {"uri": "https://example.com/vpc", "title": "vPC Guide"}},
                            {"web": {"uri": "https://example.com/untitled"}},
                            {"retrievedContext": {"uri": "ignored"}}
                        ]
                    }
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let backend = backend_for(&server);
        let reply = backend.generate_grounded("vPCについて").await.unwrap();

        assert_eq!(reply.text.as_deref(), Some("vPCとは…"));
        assert_eq!(reply.citations.len(), 2);
        assert_eq!(reply.citations[0].title.as_deref(), Some("vPC Guide"));
        assert_eq!(reply.citations[1].title, None);
        assert_eq!(reply.citations[1].uri, "https://example.com/untitled");
    }

    #[tokio::test]
    async fn non_success_status_maps_to_inference_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
            .mount(&server)
            .await;

        let backend = backend_for(&server);
        let err = backend.generate_with_system("s", "m").await.unwrap_err();
        match err {
            Error::Inference(msg) => {
                assert!(msg.contains("429"));
                assert!(msg.contains("quota exceeded"));
            }
            other => panic!("Expected Inference error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn malformed_body_maps_to_inference_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let backend = backend_for(&server);
        let err = backend.generate_grounded("term").await.unwrap_err();
        assert!(matches!(err, Error::Inference(_)));
    }

    #[test]
    fn multi_part_text_is_concatenated() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"parts": [{"text": "前半。"}, {"text": "後半。"}]}
            }]
        }))
        .unwrap();
        assert_eq!(response.primary_text().as_deref(), Some("前半。後半。"));
    }

    #[test]
    fn empty_parts_yield_no_primary_text() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": []}}]
        }))
        .unwrap();
        assert_eq!(response.primary_text(), None);
    }
}
