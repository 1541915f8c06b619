pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod proxy;
pub mod ui;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{GeminiClient, ProxyClient};
pub use config::{provider::ProviderSettings, toml_config::TomlConfig};
pub use core::{reader::TarotReader, session::Session};
pub use proxy::ReadingProxy;
pub use utils::error::{Result, TarotError};
