use crate::domain::model::{ReadingRequest, ReadingResponse};
use crate::domain::ports::ReadingService;
use crate::utils::error::{Result, TarotError};
use async_trait::async_trait;
use reqwest::Client;

/// Fetches readings from a deployed reading proxy.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    client: Client,
    endpoint: String,
}

impl ProxyClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ReadingService for ProxyClient {
    async fn request_reading(&self, request: &ReadingRequest) -> Result<String> {
        tracing::debug!("POST {} for {}", self.endpoint, request.card_name);

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Proxy response status: {}", status);

        // 錯誤回應可能不是 JSON（例如閘道器的 HTML 頁面）
        let body = response.text().await?;
        let parsed: Option<ReadingResponse> = serde_json::from_str(&body).ok();

        match parsed {
            Some(ReadingResponse::Text { text }) if status.is_success() => {
                if text.is_empty() {
                    Err(TarotError::EmptyResponse)
                } else {
                    Ok(text)
                }
            }
            Some(ReadingResponse::Error { error }) => Err(TarotError::ProxyError {
                status: status.as_u16(),
                message: error,
            }),
            _ => Err(TarotError::ProxyError {
                status: status.as_u16(),
                message: format!("unexpected response body ({} bytes)", body.len()),
            }),
        }
    }
}
