//! Google Gemini `generateContent` client.

use crate::config::provider::ProviderSettings;
use crate::domain::model::ReadingPrompt;
use crate::domain::ports::GenerativeModel;
use crate::utils::error::{Result, TarotError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    system_instruction: Content<'a>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: Option<u32>,
    #[serde(default)]
    candidates_token_count: Option<u32>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, all parts joined.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    settings: ProviderSettings,
}

impl GeminiClient {
    pub fn new(settings: ProviderSettings) -> Result<Self> {
        if settings.api_key.trim().is_empty() {
            return Err(TarotError::MissingConfigError {
                field: "API_KEY".to_string(),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()?;

        Ok(Self { client, settings })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.model
        )
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate(&self, prompt: &ReadingPrompt) -> Result<String> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part {
                    text: &prompt.user_prompt,
                }],
            }],
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: &prompt.system_instruction,
                }],
            },
            generation_config: GenerationConfig {
                temperature: prompt.temperature,
                top_k: prompt.top_k,
            },
        };

        let url = self.endpoint();
        tracing::debug!("Sending generateContent request to: {}", url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.settings.api_key.as_str())
            .json(&body)
            .send()
            .await
            .map_err(|e| TarotError::upstream(format!("request failed: {}", e)))?;

        let status = response.status();
        tracing::debug!("Gemini API response status: {}", status);

        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::error!("Gemini API error: {} - {}", status, detail);
            return Err(TarotError::upstream(format!("HTTP {}: {}", status, detail)));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| TarotError::upstream(format!("unreadable response: {}", e)))?;

        if let Some(usage) = &parsed.usage_metadata {
            tracing::debug!(
                "Gemini API usage - Prompt: {:?} tokens, Response: {:?} tokens",
                usage.prompt_token_count,
                usage.candidates_token_count
            );
        }

        let text = parsed.text();
        if text.is_empty() {
            return Err(TarotError::EmptyResponse);
        }
        Ok(text)
    }
}
