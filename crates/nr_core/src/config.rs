use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub const DEFAULT_SEARCH_BASE_URL: &str = "https://api.tavily.com";
pub const DEFAULT_GENERATION_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL_NAME: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_PORT: u16 = 10000;
pub const DEFAULT_COMPANY: &str = "대웅제약";
pub const DEFAULT_COMPANY_ALIASES: [&str; 1] = ["대웅"];

/// The company the expert and strategist stages write for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub name: String,
    pub aliases: Vec<String>,
}

impl CompanyProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Name followed by aliases; used for corpus relevance checks.
    pub fn terms(&self) -> Vec<String> {
        std::iter::once(self.name.clone())
            .chain(self.aliases.iter().cloned())
            .collect()
    }
}

impl Default for CompanyProfile {
    fn default() -> Self {
        DEFAULT_COMPANY_ALIASES
            .iter()
            .fold(Self::new(DEFAULT_COMPANY), |profile, alias| profile.with_alias(*alias))
    }
}

/// Process-wide settings, built once at startup and read-only afterwards.
#[derive(Clone)]
pub struct Config {
    pub search_api_key: Option<String>,
    pub search_base_url: String,
    pub generation_api_key: Option<String>,
    pub generation_base_url: String,
    pub model_name: String,
    pub port: u16,
    pub company: CompanyProfile,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_api_key: None,
            search_base_url: DEFAULT_SEARCH_BASE_URL.to_string(),
            generation_api_key: None,
            generation_base_url: DEFAULT_GENERATION_BASE_URL.to_string(),
            model_name: DEFAULT_MODEL_NAME.to_string(),
            port: DEFAULT_PORT,
            company: CompanyProfile::default(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("search_api_key", &self.search_api_key.as_deref().map(|_| "<redacted>"))
            .field("search_base_url", &self.search_base_url)
            .field("generation_api_key", &self.generation_api_key.as_deref().map(|_| "<redacted>"))
            .field("generation_base_url", &self.generation_base_url)
            .field("model_name", &self.model_name)
            .field("port", &self.port)
            .field("company", &self.company)
            .finish()
    }
}

impl Config {
    /// Loads `path`, or a `.env` found in the working directory or a parent,
    /// into the process environment. Variables already set win. Must run
    /// before anything reads the environment, `RUST_LOG` included.
    pub fn load_env(path: Option<&Path>) -> Result<Option<PathBuf>> {
        match path {
            Some(path) => {
                dotenvy::from_path(path).map_err(|e| {
                    Error::Config(format!("Failed to load {}: {}", path.display(), e))
                })?;
                Ok(Some(path.to_path_buf()))
            }
            None => Ok(dotenvy::dotenv().ok()),
        }
    }

    /// Reads the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let defaults = Self::default();
        let port = match get("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| Error::Config(format!("Invalid PORT '{}': {}", raw, e)))?,
            None => defaults.port,
        };
        let company = match get("NR_COMPANY") {
            Some(name) => CompanyProfile::new(name),
            None => defaults.company,
        };

        Ok(Self {
            search_api_key: get("TAVILY_API_KEY"),
            search_base_url: get("TAVILY_BASE_URL").unwrap_or(defaults.search_base_url),
            generation_api_key: get("GROQ_API_KEY"),
            generation_base_url: get("GROQ_BASE_URL").unwrap_or(defaults.generation_base_url),
            model_name: get("GROQ_MODEL").unwrap_or(defaults.model_name),
            port,
            company,
        })
    }

    pub fn require_search_key(&self) -> Result<&str> {
        self.search_api_key
            .as_deref()
            .ok_or_else(|| Error::Config("TAVILY_API_KEY is required".to_string()))
    }

    pub fn require_generation_key(&self) -> Result<&str> {
        self.generation_api_key
            .as_deref()
            .ok_or_else(|| Error::Config("GROQ_API_KEY is required".to_string()))
    }
}
