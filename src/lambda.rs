#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use mystic_tarot::proxy::{HttpEvent, HttpReply};
#[cfg(feature = "lambda")]
use mystic_tarot::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use mystic_tarot::{GeminiClient, ProviderSettings, ReadingProxy};
#[cfg(feature = "lambda")]
use std::sync::Arc;

#[cfg(feature = "lambda")]
async fn function_handler(
    proxy: Arc<ReadingProxy<GeminiClient>>,
    event: LambdaEvent<HttpEvent>,
) -> Result<HttpReply, Error> {
    tracing::info!(
        request_id = %event.context.request_id,
        method = event.payload.method(),
        "Reading request received"
    );

    let reply = proxy.handle_event(&event.payload).await;

    tracing::info!(status = reply.status_code, "Reading request finished");
    Ok(reply)
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    // 冷啟動時建立設定；缺少 API_KEY 時每個請求都回 500
    let settings = ProviderSettings::from_env().and_then(|s| s.validate().map(|_| s));
    let proxy = Arc::new(
        ReadingProxy::from_settings(settings)
            .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?,
    );
    tracing::info!(
        configured = proxy.is_configured(),
        "Reading proxy ready"
    );

    run(service_fn(move |event: LambdaEvent<HttpEvent>| {
        let proxy = Arc::clone(&proxy);
        async move { function_handler(proxy, event).await }
    }))
    .await
}
