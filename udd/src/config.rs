//! Configuration types and loading
//!
//! All paths and limits that the original tool kept as module-level defaults
//! live in one explicit config struct passed into each entry point.

use std::fs;
use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// LLM provider configuration
    pub llm: LlmConfig,

    /// Default input file locations
    pub paths: PathsConfig,

    /// Rolling-context bounds for the drafting orchestrator
    pub drafting: DraftingConfig,

    /// Output document defaults
    pub document: DocumentConfig,
}

impl Config {
    /// Validate configuration before use
    ///
    /// Call this early so a missing API key fails before any drafting begins.
    pub fn validate(&self) -> Result<()> {
        if std::env::var(&self.llm.api_key_env).is_err() {
            return Err(eyre::eyre!(
                "LLM API key not found. Set the {} environment variable.",
                self.llm.api_key_env
            ));
        }
        Ok(())
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .uddgen.yml
        let local_config = PathBuf::from(".uddgen.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/uddgen/uddgen.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("uddgen").join("uddgen.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// LLM provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name ("anthropic" or "openai")
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Maximum tokens per response
    #[serde(rename = "max-tokens")]
    pub max_tokens: u32,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl LlmConfig {
    /// Read the API key from the configured environment variable
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env).ok()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "gpt-4o".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            base_url: "https://api.openai.com".to_string(),
            max_tokens: 4096,
            timeout_ms: 300_000,
        }
    }
}

/// Default input file locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// UDD section definition file
    #[serde(rename = "sections-file")]
    pub sections_file: PathBuf,

    /// UDD-to-FSD mapping file
    #[serde(rename = "mapping-file")]
    pub mapping_file: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            sections_file: PathBuf::from("config/udd_sections.txt"),
            mapping_file: PathBuf::from("config/fsd_mapping.json"),
        }
    }
}

/// Rolling-context bounds for the drafting orchestrator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftingConfig {
    /// How many previously drafted sections to carry as context
    #[serde(rename = "context-window")]
    pub context_window: usize,

    /// Character cap applied to each carried section snippet
    #[serde(rename = "snippet-max-chars")]
    pub snippet_max_chars: usize,
}

impl Default for DraftingConfig {
    fn default() -> Self {
        Self {
            context_window: 3,
            snippet_max_chars: 1200,
        }
    }
}

/// Output document defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Title used when the request does not carry one
    #[serde(rename = "default-title")]
    pub default_title: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            default_title: "Unified Design Document".to_string(),
        }
    }
}
