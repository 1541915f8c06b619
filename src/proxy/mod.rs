//! Stateless reading proxy.
//!
//! Accepts `POST {cardName, isReversed, question}`, builds the prompt and
//! relays the provider's text back as `{"text": ...}`, or `{"error": ...}`
//! with a 4xx/5xx status.

pub mod http;

use crate::adapters::gemini::GeminiClient;
use crate::config::provider::ProviderSettings;
use crate::core::prompt::{build_prompt, Sampling};
use crate::domain::model::{ReadingRequest, ReadingResponse};
use crate::domain::ports::{GenerativeModel, ReadingService};
use crate::utils::error::{Result, TarotError};
use async_trait::async_trait;

pub use http::{HttpEvent, HttpReply};

/// Status code plus JSON body, independent of the hosting runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyReply {
    pub status: u16,
    pub body: ReadingResponse,
}

impl ProxyReply {
    pub fn text(text: String) -> Self {
        Self {
            status: 200,
            body: ReadingResponse::Text { text },
        }
    }

    pub fn from_error(error: &TarotError) -> Self {
        Self {
            status: error.status_code(),
            body: ReadingResponse::Error {
                error: error.public_message(),
            },
        }
    }

    pub fn body_json(&self) -> String {
        serde_json::to_string(&self.body).unwrap_or_else(|_| "{}".to_string())
    }
}

pub struct ReadingProxy<M: GenerativeModel> {
    model: Option<M>,
    sampling: Sampling,
}

impl ReadingProxy<GeminiClient> {
    /// Build the proxy from settings. A missing credential is logged once and
    /// turned into an unconfigured proxy that answers every request with 500.
    pub fn from_settings(settings: Result<ProviderSettings>) -> Result<Self> {
        match settings {
            Ok(settings) => {
                let sampling = settings.sampling();
                Ok(Self::new(GeminiClient::new(settings)?, sampling))
            }
            Err(e @ TarotError::MissingConfigError { .. }) => {
                tracing::error!("❌ {} ({})", e, e.recovery_suggestion());
                Ok(Self::unconfigured())
            }
            Err(e) => Err(e),
        }
    }
}

impl<M: GenerativeModel> ReadingProxy<M> {
    pub fn new(model: M, sampling: Sampling) -> Self {
        Self {
            model: Some(model),
            sampling,
        }
    }

    pub fn unconfigured() -> Self {
        Self {
            model: None,
            sampling: Sampling::default(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.model.is_some()
    }

    /// Validate the request and call the provider once.
    pub async fn generate(&self, request: &ReadingRequest) -> Result<String> {
        let model = self.model.as_ref().ok_or_else(|| TarotError::MissingConfigError {
            field: "API_KEY".to_string(),
        })?;

        if request.card_name.is_empty() {
            return Err(TarotError::MissingField {
                field: "cardName".to_string(),
            });
        }

        let prompt = build_prompt(request, self.sampling);
        let text = model.generate(&prompt).await?;
        if text.is_empty() {
            return Err(TarotError::EmptyResponse);
        }
        Ok(text)
    }

    /// Handle one HTTP request: method check, then configuration, then body.
    pub async fn handle(&self, method: &str, body: Option<&str>) -> ProxyReply {
        self.respond(method, Ok(body.map(str::to_string))).await
    }

    async fn respond(&self, method: &str, body: Result<Option<String>>) -> ProxyReply {
        match self.process(method, body).await {
            Ok(text) => ProxyReply::text(text),
            Err(e) => {
                match e.status_code() {
                    500 => tracing::error!("Reading request failed: {}", e),
                    _ => tracing::warn!("Reading request rejected: {}", e),
                }
                ProxyReply::from_error(&e)
            }
        }
    }

    async fn process(&self, method: &str, body: Result<Option<String>>) -> Result<String> {
        if !method.eq_ignore_ascii_case("POST") {
            return Err(TarotError::MethodNotAllowed {
                method: method.to_string(),
            });
        }
        if !self.is_configured() {
            return Err(TarotError::MissingConfigError {
                field: "API_KEY".to_string(),
            });
        }

        let body = body?;
        let request: ReadingRequest = match body.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => serde_json::from_str(raw)?,
            _ => ReadingRequest {
                card_name: String::new(),
                is_reversed: false,
                question: String::new(),
            },
        };

        tracing::info!(
            "Generating reading for {} (reversed: {})",
            request.card_name,
            request.is_reversed
        );
        self.generate(&request).await
    }

    /// Adapter for API-Gateway / function-URL style events.
    pub async fn handle_event(&self, event: &HttpEvent) -> HttpReply {
        // 解碼失敗要排在 method 與設定檢查之後回報
        let reply = self.respond(event.method(), event.decoded_body()).await;
        HttpReply::from(reply)
    }
}

/// In-process use: the terminal talks to the provider without a deployed proxy.
#[async_trait]
impl<M: GenerativeModel> ReadingService for ReadingProxy<M> {
    async fn request_reading(&self, request: &ReadingRequest) -> Result<String> {
        self.generate(request).await
    }
}
