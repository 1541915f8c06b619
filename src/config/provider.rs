use crate::core::prompt::{Sampling, DEFAULT_TEMPERATURE, DEFAULT_TOP_K};
use crate::utils::error::{Result, TarotError};
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_url, Validate,
};
use std::env;
use std::str::FromStr;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

/// Everything needed to talk to the generative-language provider.
#[derive(Clone)]
pub struct ProviderSettings {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub top_k: u32,
    pub timeout_seconds: u64,
}

// api_key 不可出現在日誌中
impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("api_key", &"***")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .field("top_k", &self.top_k)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl ProviderSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            top_k: DEFAULT_TOP_K,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }

    /// 從環境變數讀取設定；API_KEY 必填
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| TarotError::MissingConfigError {
                field: "API_KEY".to_string(),
            })?;

        let mut settings = Self::new(api_key);
        if let Ok(model) = env::var("GEMINI_MODEL") {
            settings.model = model;
        }
        if let Ok(base_url) = env::var("GEMINI_BASE_URL") {
            settings.base_url = base_url;
        }
        settings.temperature = parse_env("GEMINI_TEMPERATURE", settings.temperature)?;
        settings.top_k = parse_env("GEMINI_TOP_K", settings.top_k)?;
        settings.timeout_seconds = parse_env("GEMINI_TIMEOUT_SECONDS", settings.timeout_seconds)?;

        Ok(settings)
    }

    pub fn sampling(&self) -> Sampling {
        Sampling {
            temperature: self.temperature,
            top_k: self.top_k,
        }
    }
}

fn parse_env<T: FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| TarotError::InvalidConfigValueError {
                field: name.to_string(),
                value: raw.clone(),
                reason: "Value could not be parsed".to_string(),
            }),
        Err(_) => Ok(default),
    }
}

impl Validate for ProviderSettings {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("api_key", &self.api_key).map_err(|_| {
            TarotError::MissingConfigError {
                field: "API_KEY".to_string(),
            }
        })?;
        validate_non_empty_string("model", &self.model)?;
        validate_url("base_url", &self.base_url)?;
        validate_range("temperature", self.temperature, 0.0, 2.0)?;
        validate_range("top_k", self.top_k, 1, 100)?;
        validate_range("timeout_seconds", self.timeout_seconds, 1, 600)?;

        tracing::debug!("✅ Provider configuration validation passed");
        Ok(())
    }
}
