use crate::domain::model::{ReadingPrompt, ReadingRequest};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Anything that can turn a drawn card and a question into reading text.
#[async_trait]
pub trait ReadingService: Send + Sync {
    async fn request_reading(&self, request: &ReadingRequest) -> Result<String>;
}

/// A single non-streaming call to a generative-language provider.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(&self, prompt: &ReadingPrompt) -> Result<String>;
}

#[async_trait]
impl<T: ReadingService + ?Sized> ReadingService for Box<T> {
    async fn request_reading(&self, request: &ReadingRequest) -> Result<String> {
        (**self).request_reading(request).await
    }
}
