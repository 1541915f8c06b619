pub mod provider;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "mystic-tarot")]
#[command(about = "Draw a tarot card and receive an AI-guided reading")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Reading proxy endpoint; without it the provider is called directly
    #[arg(long, env = "READING_PROXY_URL")]
    pub proxy_url: Option<String>,

    /// Ask one question, print the reading and exit
    #[arg(short, long)]
    pub question: Option<String>,

    /// Pause before the card is revealed
    #[arg(long)]
    pub reveal_delay_ms: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl crate::utils::validation::Validate for CliConfig {
    fn validate(&self) -> crate::utils::error::Result<()> {
        if let Some(proxy_url) = &self.proxy_url {
            crate::utils::validation::validate_url("proxy_url", proxy_url)?;
        }
        Ok(())
    }
}
