use async_trait::async_trait;
use crate::Result;

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Human-readable name of the backing model
    fn name(&self) -> &str;

    /// Sends a single user-role prompt and returns the first completion, trimmed.
    async fn generate(&self, prompt: &str, temperature: f32) -> Result<String>;
}
