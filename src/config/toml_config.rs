use crate::config::provider::ProviderSettings;
use crate::utils::error::{Result, TarotError};
use crate::utils::validation::{validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is a valid regex"));

pub const DEFAULT_REVEAL_DELAY_MS: u64 = 100;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub provider: Option<ProviderSection>,
    pub client: Option<ClientSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderSection {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub temperature: Option<f32>,
    pub top_k: Option<u32>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientSection {
    pub proxy_url: Option<String>,
    pub reveal_delay_ms: Option<u64>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| TarotError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${API_KEY})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    pub fn proxy_url(&self) -> Option<&str> {
        self.client.as_ref().and_then(|c| c.proxy_url.as_deref())
    }

    pub fn reveal_delay_ms(&self) -> u64 {
        self.client
            .as_ref()
            .and_then(|c| c.reveal_delay_ms)
            .unwrap_or(DEFAULT_REVEAL_DELAY_MS)
    }

    /// Provider settings from the `[provider]` section, falling back to the
    /// environment for the key. An unresolved `${VAR}` counts as missing.
    /// Without a `[provider]` section everything comes from the environment.
    pub fn provider_settings(&self) -> Result<ProviderSettings> {
        let Some(section) = self.provider.clone() else {
            let settings = ProviderSettings::from_env()?;
            settings.validate()?;
            return Ok(settings);
        };

        let api_key = section
            .api_key
            .filter(|key| !key.trim().is_empty() && !ENV_VAR.is_match(key))
            .or_else(|| std::env::var("API_KEY").ok())
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| TarotError::MissingConfigError {
                field: "API_KEY".to_string(),
            })?;

        let mut settings = ProviderSettings::new(api_key);
        if let Some(model) = section.model {
            settings.model = model;
        }
        if let Some(base_url) = section.base_url {
            settings.base_url = base_url;
        }
        if let Some(temperature) = section.temperature {
            settings.temperature = temperature;
        }
        if let Some(top_k) = section.top_k {
            settings.top_k = top_k;
        }
        if let Some(timeout_seconds) = section.timeout_seconds {
            settings.timeout_seconds = timeout_seconds;
        }

        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(proxy_url) = self.proxy_url() {
            validate_url("client.proxy_url", proxy_url)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[provider]
api_key = "abc123"
model = "gemini-2.5-pro"
temperature = 0.5
top_k = 20

[client]
proxy_url = "https://tarot.example.com/api/generate-reading"
reveal_delay_ms = 250
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.proxy_url(),
            Some("https://tarot.example.com/api/generate-reading")
        );
        assert_eq!(config.reveal_delay_ms(), 250);

        let settings = config.provider_settings().unwrap();
        assert_eq!(settings.api_key, "abc123");
        assert_eq!(settings.model, "gemini-2.5-pro");
        assert_eq!(settings.top_k, 20);
        assert_eq!(settings.timeout_seconds, 60);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("MYSTIC_TEST_PROXY_URL", "https://proxy.test/reading");

        let config = TomlConfig::from_toml_str(
            r#"
[client]
proxy_url = "${MYSTIC_TEST_PROXY_URL}"
"#,
        )
        .unwrap();
        assert_eq!(config.proxy_url(), Some("https://proxy.test/reading"));

        std::env::remove_var("MYSTIC_TEST_PROXY_URL");
    }

    #[test]
    fn test_invalid_proxy_url() {
        let config = TomlConfig::from_toml_str(
            r#"
[client]
proxy_url = "invalid-url"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.proxy_url().is_none());
        assert_eq!(config.reveal_delay_ms(), DEFAULT_REVEAL_DELAY_MS);
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[provider]\napi_key = \"file-key\"\ntop_k = 0\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert!(matches!(
            config.provider_settings(),
            Err(TarotError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            TomlConfig::from_toml_str("[provider\nmodel = 1"),
            Err(TarotError::ConfigError { .. })
        ));
    }
}
