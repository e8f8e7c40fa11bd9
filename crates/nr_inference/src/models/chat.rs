use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use nr_core::{Config, Error, Result, TextGenerator};
use reqwest::Client;
use serde::{Deserialize, Serialize};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    #[serde(default)]
    content: Option<String>,
}

/// Client for any OpenAI-compatible `/chat/completions` endpoint (Groq by default).
pub struct ChatCompletionModel {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
    model_name: String,
}

impl ChatCompletionModel {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model_name: impl Into<String>,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Generation(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client: Arc::new(client),
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model_name: model_name.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.require_generation_key()?;
        Self::new(api_key, config.generation_base_url.as_str(), config.model_name.as_str())
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }
}

impl fmt::Debug for ChatCompletionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatCompletionModel")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model_name", &self.model_name)
            .finish()
    }
}

/// Pulls the first completion out of a raw response body.
fn first_completion(body: &str) -> Result<String> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| Error::Generation(format!("Malformed completion response: {}", e)))?;

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| Error::Generation("Completion response has no choices".to_string()))?;

    Ok(choice.message.content.unwrap_or_default().trim().to_string())
}

#[async_trait]
impl TextGenerator for ChatCompletionModel {
    fn name(&self) -> &str {
        "ChatCompletion"
    }

    async fn generate(&self, prompt: &str, temperature: f32) -> Result<String> {
        let request = ChatRequest {
            model: &self.model_name,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature,
        };

        tracing::debug!(
            "Requesting completion from {} ({} prompt chars, temperature {})",
            self.model_name,
            prompt.chars().count(),
            temperature
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Generation(format!("Completion request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Generation(format!("Failed to read completion body: {}", e)))?;

        if !status.is_success() {
            return Err(Error::Generation(format!(
                "Completion endpoint returned {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        first_completion(&body)
    }
}
