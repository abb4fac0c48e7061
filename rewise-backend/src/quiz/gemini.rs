//! Typed HTTP client for the Gemini text generation API.

use super::QuizGenerator;
use crate::config::{Config, defaults};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub struct GeminiClient {
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    client: reqwest::Client,
}

// ── API types ───────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

impl GenerateResponse {
    /// Text of the first candidate, parts joined in order.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.trim().is_empty() { None } else { Some(text) }
    }
}

// ── Client impl ─────────────────────────────────────

impl GeminiClient {
    pub fn new(config: &Config) -> Result<Self, String> {
        Ok(Self {
            base_url: config.gemini_api_url.clone(),
            api_key: config.google_api_key.clone(),
            model: config.gemini_model.clone(),
            temperature: defaults::GEMINI_TEMPERATURE,
            client: crate::http::build_client(defaults::AI_TIMEOUT_SECS)?,
        })
    }
}

#[async_trait]
impl QuizGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, String> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
            },
        };

        log::info!("[QUIZ] Requesting MCQs from {}", self.model);

        let resp = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.base_url, self.model
            ))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| format!("Generate content failed: {}", e))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(format!("Generate content HTTP {}: {}", status, body));
        }

        let parsed: GenerateResponse = resp
            .json()
            .await
            .map_err(|e| format!("Parse generate response: {}", e))?;

        parsed
            .text()
            .ok_or_else(|| "Model returned no text".to_string())
    }
}
