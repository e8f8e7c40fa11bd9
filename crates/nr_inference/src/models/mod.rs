use std::fmt;
use std::sync::Arc;

use clap::ValueEnum;
use nr_core::{Config, Result, TextGenerator};

pub mod chat;
pub mod dummy;

pub use chat::ChatCompletionModel;
pub use dummy::DummyModel;

/// Which text generator backs the prompt chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModelKind {
    /// OpenAI-compatible chat completions (Groq by default)
    Chat,
    /// Offline echo model, no API key needed
    Dummy,
}

impl Default for ModelKind {
    fn default() -> Self {
        Self::Chat
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelKind::Chat => write!(f, "chat"),
            ModelKind::Dummy => write!(f, "dummy"),
        }
    }
}

pub fn create_model(kind: ModelKind, config: &Config) -> Result<Arc<dyn TextGenerator>> {
    let model: Arc<dyn TextGenerator> = match kind {
        ModelKind::Chat => Arc::new(ChatCompletionModel::from_config(config)?),
        ModelKind::Dummy => Arc::new(DummyModel::new()),
    };
    tracing::info!("🧠 Text generator ready: {} ({})", model.name(), config.model_name);
    Ok(model)
}
