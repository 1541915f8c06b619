use clap::Parser;
use mystic_tarot::core::reader::DrawOutcome;
use mystic_tarot::domain::ports::ReadingService;
use mystic_tarot::ui::terminal;
use mystic_tarot::utils::{logger, validation::Validate};
use mystic_tarot::{
    CliConfig, GeminiClient, ProviderSettings, ProxyClient, ReadingProxy, TarotError, TarotReader,
    TomlConfig,
};
use std::time::Duration;

fn fail(e: &TarotError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(1);
}

/// 有 proxy_url 時走代理，否則直接呼叫 Gemini（需要 API_KEY）
fn build_service(
    config: &CliConfig,
    file: &TomlConfig,
) -> mystic_tarot::Result<Box<dyn ReadingService>> {
    let proxy_url = config
        .proxy_url
        .clone()
        .or_else(|| file.proxy_url().map(str::to_string));

    match proxy_url {
        Some(url) => {
            tracing::info!("🌐 Using reading proxy at {}", url);
            Ok(Box::new(ProxyClient::new(url)))
        }
        None => {
            let settings: ProviderSettings = file.provider_settings()?;
            tracing::info!("🔑 Calling {} directly", settings.model);
            tracing::debug!("Provider settings: {:?}", settings);
            let sampling = settings.sampling();
            let model = GeminiClient::new(settings)?;
            Ok(Box::new(ReadingProxy::new(model, sampling)))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        fail(&e);
    }

    let file = match &config.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match TomlConfig::from_file(path).and_then(|c| c.validate().map(|_| c)) {
                Ok(file) => file,
                Err(e) => fail(&e),
            }
        }
        None => TomlConfig::default(),
    };

    let service = match build_service(&config, &file) {
        Ok(service) => service,
        Err(e) => fail(&e),
    };

    let reveal_delay = Duration::from_millis(
        config
            .reveal_delay_ms
            .unwrap_or_else(|| file.reveal_delay_ms()),
    );

    let reader = TarotReader::new(service);
    let mut stdout = tokio::io::stdout();

    match &config.question {
        Some(question) => {
            let outcome = terminal::run_once(&reader, question, &mut stdout, reveal_delay).await?;
            if matches!(outcome, DrawOutcome::Failed(_)) {
                std::process::exit(2);
            }
        }
        None => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            terminal::run_interactive(&reader, stdin, &mut stdout, reveal_delay).await?;
        }
    }

    Ok(())
}
