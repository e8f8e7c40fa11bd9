pub mod chain;
pub mod models;
pub mod sections;

pub use chain::{ChainInput, ChainOutput, PromptChain};
pub use models::{create_model, ModelKind};
