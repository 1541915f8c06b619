// Adapters layer: concrete implementations of the domain ports over HTTP.

pub mod gemini;
pub mod proxy_client;

pub use gemini::GeminiClient;
pub use proxy_client::ProxyClient;
