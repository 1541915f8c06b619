use crate::proxy::ProxyReply;
use crate::utils::error::{Result, TarotError};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The subset of an API Gateway (REST or HTTP API) / Lambda function URL
/// event the proxy needs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpEvent {
    #[serde(default)]
    pub http_method: Option<String>,
    #[serde(default)]
    pub request_context: Option<RequestContext>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestContext {
    #[serde(default)]
    pub http: Option<HttpDescription>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HttpDescription {
    #[serde(default)]
    pub method: Option<String>,
}

impl HttpEvent {
    pub fn post(body: impl Into<String>) -> Self {
        Self {
            http_method: Some("POST".to_string()),
            request_context: None,
            body: Some(body.into()),
            is_base64_encoded: false,
        }
    }

    /// Request body as text; base64 bodies are decoded first.
    pub fn decoded_body(&self) -> Result<Option<String>> {
        let Some(body) = self.body.as_deref() else {
            return Ok(None);
        };
        if !self.is_base64_encoded {
            return Ok(Some(body.to_string()));
        }

        let bytes = STANDARD
            .decode(body.trim())
            .map_err(|e| TarotError::InvalidEncoding {
                message: e.to_string(),
            })?;
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|e| TarotError::InvalidEncoding {
                message: e.to_string(),
            })
    }

    /// `httpMethod` (payload v1) or `requestContext.http.method` (payload v2).
    pub fn method(&self) -> &str {
        self.http_method
            .as_deref()
            .or_else(|| {
                self.request_context
                    .as_ref()
                    .and_then(|ctx| ctx.http.as_ref())
                    .and_then(|http| http.method.as_deref())
            })
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpReply {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl From<ProxyReply> for HttpReply {
    fn from(reply: ProxyReply) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        if reply.status == 405 {
            headers.insert("Allow".to_string(), "POST".to_string());
        }

        Self {
            status_code: reply.status,
            headers,
            body: reply.body_json(),
        }
    }
}
